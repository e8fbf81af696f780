// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `swipefeed` crate.
//!
//! These drive a [`FeedController`] through input events and frame ticks the
//! way a host would.

use std::collections::HashSet;

use glam::DVec3;
use kurbo::Point;
use swipefeed::{
    Bounds3, Capabilities, ContentError, ContentLibrary, Direction, FeedConfig, FeedController,
    FeedObserver, FrameReport, InputEvent, NoUiSurfaces, PointerId, PointerSample, SlotRole,
    SnapDecision, StabilityEvent, UiSurfaceFilter,
};

const DT: f64 = 1.0 / 60.0;
const FINGER: PointerId = PointerId(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Scene {
    serial: u32,
    id: &'static str,
}

#[derive(Debug, Default)]
struct Shelf {
    ids: Vec<&'static str>,
    serial: u32,
    live: HashSet<Scene>,
    created: Vec<&'static str>,
    destroyed: Vec<&'static str>,
    missing: HashSet<&'static str>,
    unmeasured: HashSet<&'static str>,
}

impl Shelf {
    fn new(ids: &[&'static str]) -> Self {
        Self {
            ids: ids.to_vec(),
            ..Self::default()
        }
    }
}

impl ContentLibrary for Shelf {
    type Id = &'static str;
    type Handle = Scene;

    fn ordered_ids(&self) -> Vec<&'static str> {
        self.ids.clone()
    }

    fn instantiate(&mut self, id: &&'static str) -> Result<Scene, ContentError> {
        if self.missing.contains(id) {
            return Err(ContentError::Unavailable((*id).to_owned()));
        }
        self.serial += 1;
        let scene = Scene {
            serial: self.serial,
            id,
        };
        self.live.insert(scene);
        self.created.push(id);
        Ok(scene)
    }

    fn destroy(&mut self, handle: Scene) {
        assert!(self.live.remove(&handle), "destroyed a scene twice");
        self.destroyed.push(handle.id);
    }

    fn bounds(&self, handle: &Scene) -> Result<Bounds3, ContentError> {
        if self.unmeasured.contains(handle.id) {
            return Err(ContentError::BoundsNotReady);
        }
        Ok(Bounds3::from_center_size(DVec3::ZERO, DVec3::splat(16.0)))
    }

    fn anchor(&self, _handle: &Scene) -> DVec3 {
        DVec3::new(0.0, 2.0, 0.0)
    }

    fn capabilities(&self, id: &&'static str) -> Capabilities {
        if *id == "c" {
            Capabilities::INTERACTIVE | Capabilities::AUDIO
        } else {
            Capabilities::PLAYABLE
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Reveal(usize),
    Hide,
    Changed(usize),
    Settled(usize, &'static str, Capabilities),
}

#[derive(Debug, Default)]
struct Log(Vec<Event>);

impl FeedObserver<&'static str> for Log {
    fn on_reveal(&mut self, index: usize) {
        self.0.push(Event::Reveal(index));
    }

    fn on_hide(&mut self) {
        self.0.push(Event::Hide);
    }

    fn on_current_changed(&mut self, index: usize) {
        self.0.push(Event::Changed(index));
    }

    fn on_current_settled(&mut self, index: usize, id: &&'static str, capabilities: Capabilities) {
        self.0.push(Event::Settled(index, id, capabilities));
    }
}

type Feed<F = NoUiSurfaces> = FeedController<Shelf, Log, F>;

fn config() -> FeedConfig {
    let mut config = FeedConfig::default();
    config.snap.sensitivity = 1.0;
    config.snap.velocity_threshold = 5.0;
    config
}

fn feed(ids: &[&'static str]) -> Feed {
    let mut feed = FeedController::new(Shelf::new(ids), Log::default(), NoUiSurfaces, config());
    feed.set_active(true);
    feed
}

fn sample(x: f64, y: f64) -> PointerSample {
    PointerSample::new(FINGER, Point::new(x, y), 0.0)
}

/// Drags vertically by `dy` pixels over one frame and releases on the next.
fn swipe<F: UiSurfaceFilter>(feed: &mut Feed<F>, dy: f64) -> FrameReport {
    feed.handle_input(InputEvent::PointerDown(sample(200.0, 500.0)));
    feed.tick(DT);
    feed.handle_input(InputEvent::PointerMove(sample(200.0, 500.0 + dy)));
    feed.tick(DT);
    feed.handle_input(InputEvent::PointerUp(sample(200.0, 500.0 + dy)));
    feed.tick(DT)
}

fn settle<F: UiSurfaceFilter>(feed: &mut Feed<F>) {
    for _ in 0..600 {
        feed.tick(DT);
        let scroll = feed.scroll_state();
        if !scroll.is_snapping && scroll.offset == 0.0 {
            return;
        }
    }
    panic!("feed never settled: {:?}", feed.scroll_state());
}

fn run<F: UiSurfaceFilter>(feed: &mut Feed<F>, seconds: f64) -> Vec<FrameReport> {
    let frames = (seconds / DT).round() as usize;
    (0..frames).map(|_| feed.tick(DT)).collect()
}

fn assert_window_matches_index<F: UiSurfaceFilter>(feed: &Feed<F>) {
    let window = feed.window();
    let index = feed.current_index().unwrap();
    assert!(window.is_consistent(), "window drifted from index {index}");
    assert_eq!(window.center(), index);
    assert_eq!(window.slot(SlotRole::Current).loaded_index(), Some(index));
    assert_eq!(
        window.slot(SlotRole::Previous).loaded_index(),
        index.checked_sub(1)
    );
    let next = (index + 1 < feed.len()).then_some(index + 1);
    assert_eq!(window.slot(SlotRole::Next).loaded_index(), next);
    assert!(feed.library().live.len() <= 3);
}

#[test]
fn new_controller_is_inactive_and_empty_handed() {
    let feed = FeedController::new(Shelf::new(&["a", "b"]), (), NoUiSurfaces, config());
    assert!(!feed.is_active());
    assert!(feed.library().created.is_empty());
    assert_eq!(feed.current_content_id(), Some(&"a"));
}

#[test]
fn three_item_feed_stops_at_the_end() {
    let mut feed = feed(&["a", "b", "c"]);
    assert_window_matches_index(&feed);

    let report = swipe(&mut feed, -40.0);
    assert_eq!(report.decision, Some(SnapDecision::Commit(Direction::Next)));
    assert_eq!(report.committed_index, Some(1));
    settle(&mut feed);
    assert_window_matches_index(&feed);

    let report = swipe(&mut feed, -40.0);
    assert_eq!(report.committed_index, Some(2));
    settle(&mut feed);
    assert_eq!(feed.current_content_id(), Some(&"c"));

    let report = swipe(&mut feed, -40.0);
    assert_eq!(report.decision, Some(SnapDecision::Rejected(Direction::Next)));
    assert_eq!(report.committed_index, None);
    settle(&mut feed);
    assert_eq!(feed.current_index(), Some(2));
    assert_eq!(feed.scroll_state().offset, 0.0);
    assert_window_matches_index(&feed);
}

#[test]
fn short_drag_held_still_snaps_back() {
    let mut feed = feed(&["a", "b", "c"]);
    feed.handle_input(InputEvent::PointerDown(sample(200.0, 500.0)));
    feed.tick(DT);
    feed.handle_input(InputEvent::PointerMove(sample(200.0, 490.0)));
    feed.tick(DT);
    // The finger rests before lifting, so the release carries no velocity.
    feed.tick(DT);
    feed.handle_input(InputEvent::PointerUp(sample(200.0, 490.0)));
    let report = feed.tick(DT);
    assert_eq!(report.decision, Some(SnapDecision::SnapBack));
    settle(&mut feed);
    assert_eq!(feed.current_index(), Some(0));
}

/// Moves 60 pixels per frame for three frames, then lifts on a frame of its own.
fn flick<F: UiSurfaceFilter>(feed: &mut Feed<F>, direction: f64) -> FrameReport {
    let mut y = 500.0;
    feed.handle_input(InputEvent::PointerDown(sample(200.0, y)));
    feed.tick(DT);
    for _ in 0..3 {
        y += 60.0 * direction;
        feed.handle_input(InputEvent::PointerMove(sample(200.0, y)));
        feed.tick(DT);
    }
    feed.handle_input(InputEvent::PointerUp(sample(200.0, y)));
    feed.tick(DT)
}

fn default_feed(ids: &[&'static str]) -> Feed {
    let mut feed = FeedController::new(
        Shelf::new(ids),
        Log::default(),
        NoUiSurfaces,
        FeedConfig::default(),
    );
    feed.set_active(true);
    feed
}

#[test]
fn quick_flick_commits_below_the_page_threshold() {
    let mut feed = default_feed(&["a", "b", "c"]);
    let report = flick(&mut feed, -1.0);
    assert_eq!(report.delta, swipefeed::GestureDelta::None);
    assert_eq!(report.decision, Some(SnapDecision::Commit(Direction::Next)));
    assert_eq!(report.committed_index, Some(1));
    settle(&mut feed);
    assert_window_matches_index(&feed);
}

#[test]
fn quick_flick_back_at_the_start_is_rejected() {
    let mut feed = default_feed(&["a", "b", "c"]);
    let report = flick(&mut feed, 1.0);
    assert!(feed.scroll_state().offset > -30.0);
    assert_eq!(
        report.decision,
        Some(SnapDecision::Rejected(Direction::Previous))
    );
    settle(&mut feed);
    assert_eq!(feed.current_index(), Some(0));
}

#[test]
fn paging_back_at_the_start_is_rejected() {
    let mut feed = feed(&["a", "b", "c"]);
    let report = swipe(&mut feed, 40.0);
    assert_eq!(
        report.decision,
        Some(SnapDecision::Rejected(Direction::Previous))
    );
    settle(&mut feed);
    assert_eq!(feed.current_index(), Some(0));
    assert_window_matches_index(&feed);
}

#[test]
fn commit_recycles_exactly_one_scene() {
    let mut feed = feed(&["a", "b", "c", "d", "e"]);
    feed.navigate_to(&"b").unwrap();
    settle(&mut feed);

    let window = feed.window();
    let old_current = *window.slot(SlotRole::Current).handle().unwrap();
    let old_next = *window.slot(SlotRole::Next).handle().unwrap();
    let created = feed.library().created.len();
    let destroyed = feed.library().destroyed.len();

    let report = swipe(&mut feed, -40.0);
    assert_eq!(report.committed_index, Some(2));

    let window = feed.window();
    assert_eq!(window.slot(SlotRole::Previous).handle(), Some(&old_current));
    assert_eq!(window.slot(SlotRole::Current).handle(), Some(&old_next));
    assert_eq!(feed.library().created.len(), created + 1);
    assert_eq!(feed.library().destroyed.len(), destroyed + 1);
    assert_eq!(feed.library().created.last(), Some(&"d"));
    assert_eq!(feed.library().destroyed.last(), Some(&"a"));
}

#[test]
fn commit_faces_the_new_item_forward() {
    let mut feed = feed(&["a", "b"]);
    feed.handle_input(InputEvent::PointerDown(sample(100.0, 400.0)));
    feed.tick(DT);
    feed.handle_input(InputEvent::PointerMove(sample(200.0, 400.0)));
    let report = feed.tick(DT);
    assert!(matches!(report.delta, swipefeed::GestureDelta::Orbit(_)));
    feed.handle_input(InputEvent::PointerUp(sample(200.0, 400.0)));
    feed.tick(DT);
    assert_ne!(feed.camera_state().orbit_angle, 0.0);
    assert_eq!(feed.scroll_state().offset, 0.0);

    swipe(&mut feed, -40.0);
    assert_eq!(feed.current_index(), Some(1));
    assert_eq!(feed.camera_state().orbit_angle, 0.0);
}

#[test]
fn camera_frames_current_content() {
    let mut feed = feed(&["a", "b"]);
    let state = feed.camera_state();
    assert_eq!((state.min_distance, state.max_distance), (30.0, 100.0));

    feed.handle_input(InputEvent::Wheel(-1_000.0));
    feed.tick(DT);
    let state = feed.camera_state();
    assert!(state.target_distance + state.manual_zoom_offset <= 100.0 + 1e-9);
    assert_eq!(feed.camera_pose().target, DVec3::new(0.0, 2.0, 0.0));
}

#[test]
fn unmeasurable_content_uses_default_distance() {
    let mut shelf = Shelf::new(&["a", "b"]);
    shelf.unmeasured.insert("a");
    let mut feed = FeedController::new(shelf, Log::default(), NoUiSurfaces, config());
    feed.set_active(true);
    let state = feed.camera_state();
    assert_eq!(state.target_distance, 25.0);
    assert_eq!((state.min_distance, state.max_distance), (15.0, 50.0));

    // Bounds become available; the next settle refits.
    feed.library_mut().unmeasured.clear();
    run(&mut feed, 1.0);
    assert_eq!(feed.camera_state().min_distance, 30.0);
}

#[test]
fn unavailable_content_is_retried_on_settle() {
    let mut shelf = Shelf::new(&["a", "b", "c"]);
    shelf.missing.insert("b");
    let mut feed = FeedController::new(shelf, Log::default(), NoUiSurfaces, config());
    feed.set_active(true);
    assert!(feed.window().slot(SlotRole::Next).is_unavailable());

    // Paging onto missing content is allowed; nothing is framed.
    swipe(&mut feed, -40.0);
    assert_eq!(feed.current_index(), Some(1));
    assert!(feed.window().current_handle().is_none());
    assert_eq!(feed.camera_state().target_distance, 25.0);

    feed.library_mut().missing.clear();
    settle(&mut feed);
    run(&mut feed, 1.0);
    assert_eq!(
        feed.window().current_handle().map(|scene| scene.id),
        Some("b")
    );
    assert_eq!(feed.camera_state().min_distance, 30.0);
}

#[test]
fn reveal_fires_once_after_the_feed_is_still() {
    let mut feed = feed(&["a", "b"]);
    let reports = run(&mut feed, 2.0);
    let reveals: Vec<_> = reports
        .iter()
        .enumerate()
        .filter(|(_, r)| r.stability == Some(StabilityEvent::Reveal))
        .map(|(frame, _)| frame)
        .collect();
    assert_eq!(reveals.len(), 1);
    // Still from the first frame; revealed half a second later.
    assert!((29..=31).contains(&reveals[0]), "revealed at frame {}", reveals[0]);
    assert!(feed.observer().0.contains(&Event::Reveal(0)));
}

#[test]
fn paging_hides_then_reveals_again() {
    let mut feed = feed(&["a", "b"]);
    run(&mut feed, 1.0);
    swipe(&mut feed, -40.0);
    settle(&mut feed);
    run(&mut feed, 1.0);

    let events = &feed.observer().0;
    let hide = events.iter().position(|e| *e == Event::Hide).unwrap();
    let changed = events.iter().position(|e| *e == Event::Changed(1)).unwrap();
    let reveal = events.iter().position(|e| *e == Event::Reveal(1)).unwrap();
    assert!(hide < changed && changed < reveal, "events: {events:?}");
}

#[test]
fn capabilities_are_read_once_settled() {
    let mut feed = feed(&["a", "b", "c"]);
    assert_eq!(feed.current_capabilities(), None);
    let report = feed.tick(DT);
    assert_eq!(report.settled_index, Some(0));
    assert_eq!(feed.current_capabilities(), Some(Capabilities::PLAYABLE));

    feed.navigate_to(&"c").unwrap();
    assert_eq!(feed.current_capabilities(), None);
    feed.tick(DT);
    assert_eq!(
        feed.current_capabilities(),
        Some(Capabilities::INTERACTIVE | Capabilities::AUDIO)
    );
    let settled: Vec<_> = feed
        .observer()
        .0
        .iter()
        .filter(|e| matches!(e, Event::Settled(..)))
        .cloned()
        .collect();
    assert_eq!(
        settled,
        [
            Event::Settled(0, "a", Capabilities::PLAYABLE),
            Event::Settled(2, "c", Capabilities::INTERACTIVE | Capabilities::AUDIO),
        ]
    );
}

#[test]
fn settle_notice_waits_for_the_snap() {
    let mut feed = feed(&["a", "b", "c"]);
    feed.tick(DT);
    let report = swipe(&mut feed, -40.0);
    assert_eq!(report.committed_index, Some(1));
    assert_eq!(feed.current_capabilities(), None);

    let mut settled_at = None;
    for frame in 0..600 {
        let report = feed.tick(DT);
        if report.settled_index.is_some() {
            settled_at = Some(frame);
            break;
        }
        assert!(feed.scroll_state().is_snapping || feed.scroll_state().offset != 0.0);
    }
    assert!(settled_at.is_some());
    assert_eq!(feed.current_capabilities(), Some(Capabilities::PLAYABLE));
}

#[test]
fn navigation_jumps_without_animation() {
    let mut feed = feed(&["a", "b", "c", "d"]);
    feed.navigate_to(&"d").unwrap();
    assert_eq!(feed.current_index(), Some(3));
    assert_eq!(feed.scroll_state().offset, 0.0);
    assert!(!feed.scroll_state().is_snapping);
    assert_window_matches_index(&feed);

    let before = feed.library().created.len();
    feed.navigate_to(&"d").unwrap();
    assert_eq!(feed.library().created.len(), before);
}

#[test]
fn navigation_hides_the_revealed_item_first() {
    let mut feed = feed(&["a", "b", "c"]);
    run(&mut feed, 1.0);
    feed.navigate_to(&"c").unwrap();
    run(&mut feed, 1.0);

    let events: Vec<_> = feed
        .observer()
        .0
        .iter()
        .filter(|e| !matches!(e, Event::Settled(..)))
        .cloned()
        .collect();
    assert_eq!(
        events,
        [
            Event::Reveal(0),
            Event::Hide,
            Event::Changed(2),
            Event::Reveal(2)
        ]
    );
}

#[test]
fn deactivation_hides_the_revealed_item() {
    let mut feed = feed(&["a", "b"]);
    run(&mut feed, 1.0);
    feed.set_active(false);
    assert_eq!(feed.observer().0.last(), Some(&Event::Hide));

    // Reactivating is silent until the feed settles again.
    feed.set_active(true);
    assert_eq!(feed.observer().0.last(), Some(&Event::Hide));
    run(&mut feed, 1.0);
    assert_eq!(feed.observer().0.last(), Some(&Event::Reveal(0)));
}

#[test]
fn unknown_navigation_target_changes_nothing() {
    let mut feed = feed(&["a", "b"]);
    let err = feed.navigate_to(&"zzz").unwrap_err();
    assert!(matches!(err, ContentError::UnknownId(_)));
    assert_eq!(feed.current_index(), Some(0));
    assert_window_matches_index(&feed);
}

#[test]
fn deactivation_releases_every_scene() {
    let mut feed = feed(&["a", "b", "c"]);
    swipe(&mut feed, -40.0);
    feed.set_active(false);
    assert!(feed.library().live.is_empty());
    assert!(feed.window().is_unloaded());
    assert!(!feed.handle_input(InputEvent::Wheel(1.0)));

    feed.set_active(true);
    assert_eq!(feed.current_index(), Some(1));
    assert_window_matches_index(&feed);
}

#[test]
fn empty_feed_renders_nothing_and_waits() {
    let mut feed = feed(&[]);
    assert_eq!(feed.current_index(), None);
    assert_eq!(feed.current_content_id(), None);
    let report = swipe(&mut feed, -40.0);
    assert_eq!(
        report.decision,
        Some(SnapDecision::Rejected(Direction::Next))
    );
    settle(&mut feed);
    assert!(feed.library().created.is_empty());

    feed.library_mut().ids = vec!["a"];
    feed.reload_feed();
    assert_eq!(feed.current_content_id(), Some(&"a"));
    assert_window_matches_index(&feed);
}

#[test]
fn reload_keeps_the_current_item() {
    let mut feed = feed(&["a", "b", "c"]);
    feed.navigate_to(&"b").unwrap();
    feed.library_mut().ids = vec!["x", "y", "b", "c"];
    feed.reload_feed();
    assert_eq!(feed.current_index(), Some(2));
    assert_eq!(feed.current_content_id(), Some(&"b"));
    assert_window_matches_index(&feed);
    assert_eq!(feed.library().live.len(), 3);
}

struct TopBar;

impl UiSurfaceFilter for TopBar {
    fn is_over_interactive_ui(&self, position: Point) -> bool {
        position.y < 100.0
    }
}

#[test]
fn pointers_pressed_over_ui_never_reach_the_feed() {
    let mut feed = FeedController::new(Shelf::new(&["a", "b"]), Log::default(), TopBar, config());
    feed.set_active(true);

    assert!(!feed.handle_input(InputEvent::PointerDown(sample(200.0, 50.0))));
    assert!(!feed.handle_input(InputEvent::PointerMove(sample(200.0, 400.0))));
    let report = feed.tick(DT);
    assert_eq!(report.delta, swipefeed::GestureDelta::None);
    assert!(!feed.handle_input(InputEvent::PointerUp(sample(200.0, 400.0))));
    assert_eq!(feed.current_index(), Some(0));

    // A fresh press outside the bar works normally.
    let report = swipe(&mut feed, -40.0);
    assert_eq!(report.committed_index, Some(1));
}

#[test]
fn slot_placements_follow_the_scroll_offset() {
    let mut feed = feed(&["a", "b", "c"]);
    feed.navigate_to(&"b").unwrap();
    feed.handle_input(InputEvent::PointerDown(sample(200.0, 500.0)));
    feed.tick(DT);
    feed.handle_input(InputEvent::PointerMove(sample(200.0, 480.0)));
    feed.tick(DT);

    let offset = feed.scroll_state().offset;
    assert!((offset - 20.0).abs() < 1e-9);
    let placements = feed.slot_placements();
    assert_eq!(placements.len(), 3);
    for placement in placements {
        let expected = match placement.role {
            SlotRole::Previous => offset + 100.0,
            SlotRole::Current => offset,
            SlotRole::Next => offset - 100.0,
        };
        assert!((placement.vertical_offset - expected).abs() < 1e-9);
    }
}
