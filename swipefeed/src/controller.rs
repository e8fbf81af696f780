// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame controller.

use core::fmt;

use glam::DVec3;
use swipefeed_gesture::{GestureClassifier, GestureDelta, GestureState, PointerId};
use swipefeed_orbit::{CameraPose, CameraRig, CameraState};
use swipefeed_snap::{FeedPosition, ScrollState, SnapDecision, SnapEngine};
use swipefeed_timing::{Scheduler, ScopeId, StabilityEvent, StabilityPhase, StabilityTracker};
use swipefeed_window::{FeedWindow, SlotRole};
use tracing::{debug, info, trace, warn};

use crate::config::FeedConfig;
use crate::error::ContentError;
use crate::input::InputEvent;
use crate::library::{Capabilities, ContentLibrary, LibraryProvider};
use crate::observer::{FeedObserver, NoUiSurfaces, UiSurfaceFilter};

/// What one call to [`FeedController::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// The classified gesture delta that was applied.
    pub delta: GestureDelta,
    /// Outcome of a page release evaluated this frame.
    pub decision: Option<SnapDecision>,
    /// New current index, if a commit moved the feed this frame.
    pub committed_index: Option<usize>,
    /// Stability transition observed this frame.
    pub stability: Option<StabilityEvent>,
    /// Index whose settle notification fired this frame.
    pub settled_index: Option<usize>,
}

/// Where a loaded slot sits relative to the resting position of the current item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotPlacement {
    /// Role of the slot.
    pub role: SlotRole,
    /// Feed index the slot holds.
    pub index: usize,
    /// Vertical world offset; the next item sits one spacing below the current one.
    pub vertical_offset: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FeedAction {
    NotifySettled { index: usize },
}

fn scope_of(index: usize) -> ScopeId {
    ScopeId(index as u64)
}

/// Drives a paged 3D feed one frame at a time.
///
/// The controller owns every moving part and runs them in a fixed order on
/// each [`tick`](Self::tick):
///
/// 1. the gesture classifier resolves the frame's input,
/// 2. orbit and zoom go to the camera, page deltas to the snap engine,
/// 3. a page release is decided and a commit advances the three-slot window,
/// 4. the snap animation steps,
/// 5. the camera updates around the current item,
/// 6. the stability tracker observes whether the feed moved,
/// 7. due deferred actions run.
///
/// A new controller is inactive and holds no content; call
/// [`set_active`](Self::set_active) to load the window.
pub struct FeedController<L, O = (), F = NoUiSurfaces>
where
    L: ContentLibrary,
{
    library: L,
    observer: O,
    filter: F,
    config: FeedConfig,
    ids: Vec<L::Id>,
    index: usize,
    active: bool,
    window: FeedWindow<L::Handle>,
    gesture: GestureClassifier,
    snap: SnapEngine,
    camera: CameraRig,
    pose: CameraPose,
    stability: StabilityTracker,
    scheduler: Scheduler<FeedAction>,
    swallowed: Vec<PointerId>,
    settled_capabilities: Option<Capabilities>,
    tick_count: u64,
    time: f64,
}

impl<L, O, F> fmt::Debug for FeedController<L, O, F>
where
    L: ContentLibrary,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedController")
            .field("len", &self.ids.len())
            .field("index", &self.index)
            .field("active", &self.active)
            .field("scroll", &self.snap.state())
            .field("stability", &self.stability.phase())
            .field("tick", &self.tick_count)
            .finish_non_exhaustive()
    }
}

impl<L, O, F> FeedController<L, O, F>
where
    L: ContentLibrary,
    O: FeedObserver<L::Id>,
    F: UiSurfaceFilter,
{
    /// Creates an inactive controller over `library`'s current id list.
    ///
    /// `config` is used as given; run [`FeedConfig::validate`] on untrusted input first.
    pub fn new(library: L, observer: O, filter: F, config: FeedConfig) -> Self {
        let ids = library.ordered_ids();
        let mut camera = CameraRig::new(config.camera);
        camera.fit(None);
        let pose = camera.pose(DVec3::ZERO);
        Self {
            window: FeedWindow::new(ids.len()),
            gesture: GestureClassifier::new(config.gesture),
            snap: SnapEngine::new(config.snap),
            stability: StabilityTracker::new(config.stability_delay),
            camera,
            pose,
            library,
            observer,
            filter,
            config,
            ids,
            index: 0,
            active: false,
            scheduler: Scheduler::new(),
            swallowed: Vec::new(),
            settled_capabilities: None,
            tick_count: 0,
            time: 0.0,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Returns `true` while the feed holds content and accepts input.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of items in the feed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the feed has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Current feed index, or `None` for an empty feed.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (self.index < self.ids.len()).then_some(self.index)
    }

    /// Id of the current item.
    #[must_use]
    pub fn current_content_id(&self) -> Option<&L::Id> {
        self.ids.get(self.index)
    }

    /// Capabilities of the current item, available once it has settled.
    #[must_use]
    pub fn current_capabilities(&self) -> Option<Capabilities> {
        self.settled_capabilities
    }

    /// The three-slot window.
    #[must_use]
    pub fn window(&self) -> &FeedWindow<L::Handle> {
        &self.window
    }

    /// The content library.
    #[must_use]
    pub fn library(&self) -> &L {
        &self.library
    }

    /// Mutable access to the content library.
    ///
    /// Changes to the ordered id list take effect on [`reload_feed`](Self::reload_feed).
    pub fn library_mut(&mut self) -> &mut L {
        &mut self.library
    }

    /// The observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Camera pose computed by the last tick.
    #[must_use]
    pub fn camera_pose(&self) -> CameraPose {
        self.pose
    }

    /// Camera distance and angle state.
    #[must_use]
    pub fn camera_state(&self) -> CameraState {
        self.camera.state()
    }

    /// Vertical scroll state.
    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        self.snap.state()
    }

    /// Gesture tracking snapshot.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// Stability phase.
    #[must_use]
    pub fn stability_phase(&self) -> StabilityPhase {
        self.stability.phase()
    }

    /// Where each loaded slot should be drawn this frame.
    ///
    /// Offsets include the current scroll offset, so a fully dragged feed puts
    /// the next item where the current one rests.
    #[must_use]
    pub fn slot_placements(&self) -> Vec<SlotPlacement> {
        let offset = self.snap.offset();
        let spacing = self.config.snap.spacing;
        self.window
            .slots()
            .iter()
            .filter_map(|slot| {
                let index = slot.loaded_index()?;
                let role = slot.role();
                Some(SlotPlacement {
                    role,
                    index,
                    vertical_offset: offset - role.offset() as f64 * spacing,
                })
            })
            .collect()
    }

    /// Activates or deactivates the feed.
    ///
    /// Deactivating releases every live handle and drops in-flight gestures,
    /// animation and deferred work. Activating loads the window around the
    /// current index.
    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            info!(index = self.index, len = self.ids.len(), "feed activated");
            self.load_current();
        } else {
            info!(index = self.index, "feed deactivated");
            self.with_window(|window, provider| window.release_all(provider));
            self.gesture.reset();
            self.snap.reset();
            self.interrupt_stability();
            self.scheduler.clear();
            self.swallowed.clear();
            self.settled_capabilities = None;
        }
    }

    /// Jumps to `id` without a slide animation.
    ///
    /// Navigating to the current item does nothing. An in-flight snap or drag is
    /// dropped. Unknown ids are rejected and leave the feed untouched.
    pub fn navigate_to(&mut self, id: &L::Id) -> Result<(), ContentError> {
        let Some(target) = self.ids.iter().position(|candidate| candidate == id) else {
            return Err(ContentError::UnknownId(format!("{id:?}")));
        };
        if target == self.index {
            trace!(index = target, "already at navigation target");
            return Ok(());
        }
        info!(from = self.index, to = target, "navigating");
        let previous = self.index;
        self.index = target;
        self.snap.reset();
        self.gesture.reset();
        self.interrupt_stability();
        if self.active {
            self.with_window(|window, provider| window.load_around(provider, target));
        }
        self.current_changed(previous);
        Ok(())
    }

    /// Re-reads the ordered id list from the library.
    ///
    /// The current item stays current if it is still in the feed; otherwise the
    /// index is clamped into the new list. Live handles are rebuilt because
    /// indices may now refer to different items.
    pub fn reload_feed(&mut self) {
        let ids = self.library.ordered_ids();
        let previous_id = self.ids.get(self.index).cloned();
        let previous = self.index;
        let target = previous_id
            .as_ref()
            .and_then(|id| ids.iter().position(|candidate| candidate == id))
            .unwrap_or_else(|| self.index.min(ids.len().saturating_sub(1)));

        self.with_window(|window, provider| window.release_all(provider));
        self.ids = ids;
        self.index = target;
        self.snap.reset();
        self.gesture.reset();
        debug!(len = self.ids.len(), index = target, "feed reloaded");

        let active = self.active;
        let len = self.ids.len();
        self.with_window(|window, provider| {
            window.set_len(provider, len);
            if active {
                window.load_around(provider, target);
            }
        });

        if self.ids.get(self.index) == previous_id.as_ref() && previous == target {
            self.refit_camera();
            self.schedule_settle_notice();
        } else {
            self.current_changed(previous);
        }
    }

    /// Feeds one input event to the gesture classifier.
    ///
    /// Returns `false` if the event was swallowed, either because the feed is
    /// inactive or because the pointer went down over interactive UI.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.active {
            trace!(?event, "input ignored while inactive");
            return false;
        }
        match event {
            InputEvent::PointerDown(sample) => {
                if self.filter.is_over_interactive_ui(sample.position) {
                    trace!(id = sample.id.0, "pointer down over UI; swallowed");
                    self.swallowed.push(sample.id);
                    return false;
                }
                self.gesture.pointer_down(sample);
            }
            InputEvent::PointerMove(sample) => {
                if self.swallowed.contains(&sample.id) {
                    return false;
                }
                self.gesture.pointer_move(sample);
            }
            InputEvent::PointerUp(sample) => {
                if self.unswallow(sample.id) {
                    return false;
                }
                self.gesture.pointer_up(sample);
            }
            InputEvent::PointerCancel { id, time } => {
                if self.unswallow(id) {
                    return false;
                }
                self.gesture.pointer_cancel(id, time);
            }
            InputEvent::Wheel(delta) => self.gesture.wheel(delta),
            InputEvent::Pinch(delta) => self.gesture.pinch(delta),
        }
        true
    }

    /// Advances the feed by `dt` seconds.
    ///
    /// Never fails: unavailable content and unmeasurable bounds degrade to
    /// empty slots and fallback framing.
    pub fn tick(&mut self, dt: f64) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.active {
            return report;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.tick_count += 1;
        self.time += dt;

        let frame = self.gesture.take_frame();
        report.delta = frame.delta;
        if frame.interacted {
            self.camera.note_interaction();
        }
        match frame.delta {
            GestureDelta::Orbit(dx) => self.camera.orbit_by_pixels(dx),
            GestureDelta::Page(dy) => self.snap.apply_page_delta(dy, dt),
            GestureDelta::Zoom(delta) => self.camera.zoom(delta),
            GestureDelta::None => {}
        }

        if frame.page_released {
            let decision = self
                .snap
                .release(FeedPosition::new(self.index, self.ids.len()));
            report.decision = Some(decision);
            if let Some(direction) = decision.committed() {
                match self.with_window(|window, provider| window.advance(provider, direction)) {
                    Ok(index) => {
                        let previous = self.index;
                        self.index = index;
                        self.current_changed(previous);
                        report.committed_index = Some(index);
                    }
                    Err(rejected) => {
                        warn!(%rejected, "window refused a committed page");
                        self.snap.reset();
                    }
                }
            }
        }

        self.snap.tick(dt);

        let anchor = self.current_anchor();
        self.pose = self.camera.update(dt, anchor, self.snap.is_snapping());

        report.stability = self.stability.observe(self.snap.is_moving(), self.time);
        match report.stability {
            Some(StabilityEvent::Reveal) => {
                self.retry_after_settle();
                self.observer.on_reveal(self.index);
            }
            Some(StabilityEvent::Hide) => self.observer.on_hide(),
            None => {}
        }

        for action in self.scheduler.drain_due(self.tick_count, self.time) {
            match action {
                FeedAction::NotifySettled { index } => {
                    if self.notify_settled(index) {
                        report.settled_index = Some(index);
                    }
                }
            }
        }

        report
    }

    fn with_window<R>(
        &mut self,
        f: impl FnOnce(&mut FeedWindow<L::Handle>, &mut LibraryProvider<'_, L>) -> R,
    ) -> R {
        let mut provider = LibraryProvider::new(&mut self.library, &self.ids);
        f(&mut self.window, &mut provider)
    }

    fn load_current(&mut self) {
        let index = self.index;
        self.with_window(|window, provider| window.load_around(provider, index));
        self.interrupt_stability();
        self.refit_camera();
        self.pose = self.camera.pose(self.current_anchor());
        self.schedule_settle_notice();
    }

    fn interrupt_stability(&mut self) {
        if self.stability.interrupt() == Some(StabilityEvent::Hide) {
            self.observer.on_hide();
        }
    }

    fn current_changed(&mut self, previous: usize) {
        self.scheduler.cancel_scope(scope_of(previous));
        self.settled_capabilities = None;
        self.camera.reset_for_new_content();
        self.refit_camera();
        self.schedule_settle_notice();
        debug!(from = previous, to = self.index, "current item changed");
        self.observer.on_current_changed(self.index);
    }

    fn refit_camera(&mut self) {
        let bounds = match self.window.current_handle() {
            Some(handle) => match self.library.bounds(handle) {
                Ok(bounds) => Some(bounds),
                Err(err) => {
                    debug!(index = self.index, %err, "bounds query failed");
                    None
                }
            },
            None => None,
        };
        self.camera.fit(bounds);
    }

    fn current_anchor(&self) -> DVec3 {
        self.window
            .current_handle()
            .map_or(DVec3::ZERO, |handle| self.library.anchor(handle))
    }

    fn schedule_settle_notice(&mut self) {
        if !self.active || self.current_index().is_none() {
            return;
        }
        let index = self.index;
        self.scheduler.schedule_at_tick(
            self.tick_count + self.config.capability_delay_ticks,
            scope_of(index),
            FeedAction::NotifySettled { index },
        );
    }

    /// Returns `true` if the notification was delivered.
    fn notify_settled(&mut self, index: usize) -> bool {
        if index != self.index {
            return false;
        }
        if !self.snap.is_settled() {
            self.scheduler.schedule_at_tick(
                self.tick_count + 1,
                scope_of(index),
                FeedAction::NotifySettled { index },
            );
            return false;
        }
        let Some(id) = self.ids.get(index) else {
            return false;
        };
        let capabilities = self.library.capabilities(id);
        self.settled_capabilities = Some(capabilities);
        debug!(index, ?capabilities, "current item settled");
        self.observer.on_current_settled(index, id, capabilities);
        true
    }

    fn retry_after_settle(&mut self) {
        let recovered = self.with_window(|window, provider| window.retry_unavailable(provider));
        if recovered > 0 {
            debug!(recovered, "unavailable content recovered");
        }
        if recovered > 0 || self.camera.is_fallback() {
            self.refit_camera();
        }
    }

    fn unswallow(&mut self, id: PointerId) -> bool {
        let before = self.swallowed.len();
        self.swallowed.retain(|swallowed| *swallowed != id);
        before != self.swallowed.len()
    }
}
