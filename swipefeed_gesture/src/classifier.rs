// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use tracing::trace;

use crate::drag::DragState;

/// Host-assigned identifier of a pointer (mouse, pen, or one touch contact).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// One pointer sample in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Which pointer produced the sample.
    pub id: PointerId,
    /// Screen-space position, y growing downwards.
    pub position: Point,
    /// Timestamp in seconds.
    pub time: f64,
}

impl PointerSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(id: PointerId, position: Point, time: f64) -> Self {
        Self { id, position, time }
    }
}

/// Axis a drag has been locked to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AxisLock {
    /// Not decided yet.
    #[default]
    Unset,
    /// Horizontal drag: orbit the camera.
    Horizontal,
    /// Vertical drag: page the feed.
    Vertical,
}

/// What the classifier is currently tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureMode {
    /// No pointer is tracked.
    #[default]
    Idle,
    /// A single pointer is dragging.
    Drag,
    /// Two pointers are pinching.
    Pinch,
    /// A pinch lost one pointer; the other is ignored until it is released.
    Suspended,
}

/// Tagged per-frame output.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum GestureDelta {
    /// Nothing to apply this frame.
    #[default]
    None,
    /// Horizontal screen delta of an orbit drag.
    Orbit(f64),
    /// Vertical screen delta of a page drag.
    Page(f64),
    /// Camera distance delta; positive moves away from the content.
    Zoom(f64),
}

/// Everything the classifier has to report for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GestureFrame {
    /// The frame's tagged delta.
    pub delta: GestureDelta,
    /// A page-locked drag ended (or was preempted) and the feed should decide
    /// whether to commit.
    pub page_released: bool,
    /// The user touched anything this frame, or is still holding a pointer.
    pub interacted: bool,
}

/// Snapshot of the single-drag state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    /// A pointer is pressed and being classified.
    pub active_pointer: bool,
    /// Axis lock of the current drag.
    pub axis_lock: AxisLock,
    /// Position where the current drag started.
    pub start_position: Option<Point>,
    /// Most recent position of the current drag.
    pub last_position: Option<Point>,
}

/// Tuning for [`GestureClassifier`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Minimum per-frame movement, in pixels, before a drag is locked to an axis.
    pub noise_floor: f64,
    /// Camera distance units per wheel unit.
    pub wheel_zoom_scale: f64,
    /// Camera distance units per pixel of pinch distance change.
    pub pinch_zoom_scale: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            noise_floor: 2.0,
            wheel_zoom_scale: 1.0,
            pinch_zoom_scale: 0.05,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Pinch {
    first: (PointerId, Point),
    second: (PointerId, Point),
    distance: f64,
}

impl Pinch {
    fn new(first: (PointerId, Point), second: (PointerId, Point)) -> Self {
        Self {
            first,
            second,
            distance: first.1.distance(second.1),
        }
    }

    fn contains(&self, id: PointerId) -> bool {
        self.first.0 == id || self.second.0 == id
    }

    fn other(&self, id: PointerId) -> PointerId {
        if self.first.0 == id {
            self.second.0
        } else {
            self.first.0
        }
    }

    /// Moves one contact and returns the change in separation.
    fn move_contact(&mut self, id: PointerId, pos: Point) -> Option<f64> {
        if self.first.0 == id {
            self.first.1 = pos;
        } else if self.second.0 == id {
            self.second.1 = pos;
        } else {
            return None;
        }
        let distance = self.first.1.distance(self.second.1);
        if !distance.is_finite() || distance <= 0.0 || self.distance <= 0.0 {
            trace!(distance, "ignoring degenerate pinch sample");
            self.distance = distance;
            return None;
        }
        let change = distance - self.distance;
        self.distance = distance;
        Some(change)
    }
}

/// Classifies pointer, wheel and pinch input into one [`GestureFrame`] per frame.
///
/// Feed events as they arrive, then call [`GestureClassifier::take_frame`] once
/// per frame.
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    config: GestureConfig,
    mode: GestureMode,
    primary: Option<PointerId>,
    suspended: Option<PointerId>,
    drag: DragState,
    axis_lock: AxisLock,
    pinch: Option<Pinch>,
    frame: FrameAccum,
    release_pending: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameAccum {
    drag: Vec2,
    axis: AxisLock,
    dragged: bool,
    wheel: f64,
    pinch: f64,
    saw_wheel: bool,
    touched: bool,
}

impl GestureClassifier {
    /// Creates an idle classifier.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            mode: GestureMode::Idle,
            primary: None,
            suspended: None,
            drag: DragState::default(),
            axis_lock: AxisLock::Unset,
            pinch: None,
            frame: FrameAccum::default(),
            release_pending: false,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the configuration; in-flight gestures keep their state.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Current tracking mode.
    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Axis lock of the current drag.
    #[must_use]
    pub fn axis_lock(&self) -> AxisLock {
        self.axis_lock
    }

    /// Snapshot of the single-drag state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        GestureState {
            active_pointer: self.mode == GestureMode::Drag,
            axis_lock: self.axis_lock,
            start_position: self.drag.start_pos,
            last_position: self.drag.last_pos,
        }
    }

    /// A pointer was pressed.
    pub fn pointer_down(&mut self, sample: PointerSample) {
        self.frame.touched = true;
        match self.mode {
            GestureMode::Idle | GestureMode::Suspended => self.begin_drag(sample),
            GestureMode::Drag => match self.primary {
                Some(primary) if primary == sample.id => self.begin_drag(sample),
                Some(primary) => self.begin_pinch(primary, sample),
                None => self.begin_drag(sample),
            },
            GestureMode::Pinch => {
                trace!(id = sample.id.0, "ignoring extra pointer during pinch");
            }
        }
    }

    /// A pointer moved.
    pub fn pointer_move(&mut self, sample: PointerSample) {
        if !sample.position.is_finite() {
            trace!(id = sample.id.0, "ignoring non-finite pointer sample");
            return;
        }
        match self.mode {
            GestureMode::Drag if self.primary == Some(sample.id) => {
                self.frame.touched = true;
                if let Some(delta) = self.drag.update(sample.position, sample.time) {
                    self.accumulate_drag(delta);
                }
            }
            GestureMode::Pinch => {
                self.frame.touched = true;
                if let Some(change) = self
                    .pinch
                    .as_mut()
                    .and_then(|pinch| pinch.move_contact(sample.id, sample.position))
                {
                    self.frame.pinch += change;
                }
            }
            _ => {}
        }
    }

    /// A pointer was released.
    pub fn pointer_up(&mut self, sample: PointerSample) {
        match self.mode {
            GestureMode::Drag if self.primary == Some(sample.id) => {
                self.frame.touched = true;
                if sample.position.is_finite() {
                    if let Some(delta) = self.drag.update(sample.position, sample.time) {
                        self.accumulate_drag(delta);
                    }
                }
                self.finish_drag();
                self.mode = GestureMode::Idle;
            }
            GestureMode::Pinch if self.pinch.is_some_and(|p| p.contains(sample.id)) => {
                self.frame.touched = true;
                self.suspended = self.pinch.map(|p| p.other(sample.id));
                self.pinch = None;
                self.mode = GestureMode::Suspended;
            }
            GestureMode::Suspended if self.suspended == Some(sample.id) => {
                self.suspended = None;
                self.mode = GestureMode::Idle;
            }
            _ => {}
        }
    }

    /// The platform canceled a pointer; treated as a release at its last position.
    pub fn pointer_cancel(&mut self, id: PointerId, time: f64) {
        let position = match self.mode {
            GestureMode::Drag => self.drag.last_pos,
            _ => None,
        };
        self.pointer_up(PointerSample::new(
            id,
            position.unwrap_or(Point::new(f64::NAN, f64::NAN)),
            time,
        ));
    }

    /// Mouse wheel or trackpad scroll; positive values scroll "up" (zoom in).
    pub fn wheel(&mut self, delta: f64) {
        if !delta.is_finite() {
            trace!(delta, "ignoring non-finite wheel delta");
            return;
        }
        self.frame.wheel += delta;
        self.frame.saw_wheel = true;
        self.frame.touched = true;
    }

    /// Platform pinch/magnify gesture: change in contact separation in pixels.
    pub fn pinch(&mut self, distance_delta: f64) {
        if !delta_is_usable(distance_delta) {
            trace!(distance_delta, "ignoring empty pinch delta");
            return;
        }
        self.frame.pinch += distance_delta;
        self.frame.touched = true;
    }

    /// Drops all tracking state, including any in-flight drag.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Resolves this frame's input into a [`GestureFrame`] and starts a new frame.
    pub fn take_frame(&mut self) -> GestureFrame {
        let frame = core::mem::take(&mut self.frame);
        let zoom = frame.saw_wheel || frame.pinch != 0.0;

        let delta = if zoom {
            GestureDelta::Zoom(
                -(frame.wheel * self.config.wheel_zoom_scale
                    + frame.pinch * self.config.pinch_zoom_scale),
            )
        } else if self.mode == GestureMode::Drag || (frame.dragged && frame.drag != Vec2::ZERO) {
            // A lift without movement is not a zero-velocity sample.
            match frame.axis {
                AxisLock::Horizontal => GestureDelta::Orbit(frame.drag.x),
                AxisLock::Vertical => GestureDelta::Page(frame.drag.y),
                AxisLock::Unset => GestureDelta::None,
            }
        } else {
            GestureDelta::None
        };

        // A release in a wheel frame is reported on the next frame.
        let page_released = self.release_pending && !frame.saw_wheel;
        if page_released {
            self.release_pending = false;
        }

        self.frame.axis = if self.mode == GestureMode::Drag {
            self.axis_lock
        } else {
            AxisLock::Unset
        };

        GestureFrame {
            delta,
            page_released,
            interacted: frame.touched || self.mode != GestureMode::Idle,
        }
    }

    fn begin_drag(&mut self, sample: PointerSample) {
        if self.mode == GestureMode::Drag {
            self.finish_drag();
        }
        self.mode = GestureMode::Drag;
        self.primary = Some(sample.id);
        self.suspended = None;
        self.drag.start(sample.position, sample.time);
        self.axis_lock = AxisLock::Unset;
        self.frame.axis = AxisLock::Unset;
        self.frame.drag = Vec2::ZERO;
    }

    fn begin_pinch(&mut self, primary: PointerId, sample: PointerSample) {
        let anchor = self.drag.last_pos.unwrap_or(sample.position);
        self.finish_drag();
        // Movement already accumulated this frame belonged to the drag.
        self.frame.drag = Vec2::ZERO;
        self.frame.axis = AxisLock::Unset;
        self.frame.dragged = false;
        self.pinch = Some(Pinch::new((primary, anchor), (sample.id, sample.position)));
        self.mode = GestureMode::Pinch;
    }

    fn finish_drag(&mut self) {
        if self.axis_lock == AxisLock::Vertical {
            self.release_pending = true;
        }
        self.drag.end();
        self.primary = None;
        self.axis_lock = AxisLock::Unset;
    }

    fn accumulate_drag(&mut self, delta: Vec2) {
        if !delta.is_finite() {
            return;
        }
        self.frame.dragged = true;
        self.frame.drag += delta;
        if self.axis_lock == AxisLock::Unset {
            let moved = self.frame.drag;
            let floor = self.config.noise_floor;
            if moved.hypot2() > floor * floor {
                self.axis_lock = if moved.x.abs() > moved.y.abs() {
                    AxisLock::Horizontal
                } else {
                    AxisLock::Vertical
                };
                trace!(axis = ?self.axis_lock, "drag axis locked");
            }
        }
        self.frame.axis = self.axis_lock;
    }
}

fn delta_is_usable(delta: f64) -> bool {
    delta.is_finite() && delta != 0.0
}
