// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipefeed: a virtualized feed of 3D scenes paged by gesture.
//!
//! The user swipes through an ordered list of scenes one at a time. Vertical
//! drags page the feed; horizontal drags orbit the camera around the current
//! scene; wheel and pinch zoom. [`FeedController`] fuses the building blocks
//! into one frame-synchronous loop:
//!
//! - [`swipefeed_window`]: three resident scene instances (previous, current,
//!   next) recycled one slot at a time as the feed pages.
//! - [`swipefeed_gesture`]: per-drag axis lock deciding between orbit and page.
//! - [`swipefeed_snap`]: drag integration, commit/snap-back decisions and the
//!   damped snap animation.
//! - [`swipefeed_orbit`]: camera distance fitted to the current scene's bounds,
//!   content-relative zoom limits and idle auto-rotation.
//! - [`swipefeed_timing`]: the reveal/hide stability debounce and the deferred
//!   action scheduler.
//!
//! Hosts plug in a [`ContentLibrary`] that instantiates scenes, an optional
//! [`FeedObserver`] for lifecycle callbacks, and an optional [`UiSurfaceFilter`]
//! that claims pointers pressed over host UI.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use kurbo::Point;
//! use swipefeed::{
//!     Bounds3, ContentError, ContentLibrary, FeedConfig, FeedController, InputEvent,
//!     NoUiSurfaces, PointerId, PointerSample,
//! };
//!
//! struct Cubes;
//!
//! impl ContentLibrary for Cubes {
//!     type Id = &'static str;
//!     type Handle = &'static str;
//!
//!     fn ordered_ids(&self) -> Vec<&'static str> {
//!         vec!["a", "b", "c"]
//!     }
//!     fn instantiate(&mut self, id: &&'static str) -> Result<&'static str, ContentError> {
//!         Ok(*id)
//!     }
//!     fn destroy(&mut self, _handle: &'static str) {}
//!     fn bounds(&self, _handle: &&'static str) -> Result<Bounds3, ContentError> {
//!         Ok(Bounds3::from_center_size(DVec3::ZERO, DVec3::splat(8.0)))
//!     }
//!     fn anchor(&self, _handle: &&'static str) -> DVec3 {
//!         DVec3::ZERO
//!     }
//! }
//!
//! let mut feed = FeedController::new(Cubes, (), NoUiSurfaces, FeedConfig::default());
//! feed.set_active(true);
//!
//! // Swipe up by 400px within one frame.
//! let finger = PointerId(1);
//! feed.handle_input(InputEvent::PointerDown(PointerSample::new(finger, Point::new(200.0, 700.0), 0.0)));
//! feed.handle_input(InputEvent::PointerUp(PointerSample::new(finger, Point::new(200.0, 300.0), 0.016)));
//! let report = feed.tick(1.0 / 60.0);
//! assert_eq!(report.committed_index, Some(1));
//! assert_eq!(feed.current_content_id(), Some(&"b"));
//! ```
//!
//! ## Frame order
//!
//! Every [`FeedController::tick`] runs gesture classification, orbit/zoom/page
//! input, release decision and window advance, snap damping, camera update,
//! stability observation and deferred actions, in that order. Each piece of
//! state has exactly one writer.

mod config;
mod controller;
mod error;
mod input;
mod library;
mod observer;

pub use config::FeedConfig;
pub use controller::{FeedController, FrameReport, SlotPlacement};
pub use error::{ConfigError, ContentError};
pub use input::InputEvent;
pub use library::{Capabilities, ContentLibrary};
pub use observer::{FeedObserver, NoUiSurfaces, UiSurfaceFilter};

pub use swipefeed_gesture::{GestureDelta, PointerId, PointerSample};
pub use swipefeed_orbit::{Bounds3, CameraPose, CameraState};
pub use swipefeed_snap::{Direction, ScrollState, SnapDecision};
pub use swipefeed_timing::{StabilityEvent, StabilityPhase};
pub use swipefeed_window::{SlotRole, WindowStats};
