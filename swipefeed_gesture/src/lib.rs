// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipefeed Gesture: turn raw pointer traffic into one tagged delta per frame.
//!
//! A paged 3D feed overloads a single drag surface: horizontal drags orbit the
//! camera around the current scene, vertical drags page through the feed, two
//! fingers pinch-zoom, and a mouse wheel zooms directly. This crate decides
//! which of those the user means.
//!
//! - [`drag`]: position/time bookkeeping for a single active pointer.
//! - [`GestureClassifier`]: consumes pointer down/move/up, wheel and pinch
//!   events as they arrive, and yields one [`GestureFrame`] per frame from
//!   [`GestureClassifier::take_frame`].
//!
//! ## Axis lock
//!
//! Each drag is locked to an axis exactly once: on the first frame whose
//! movement exceeds [`GestureConfig::noise_floor`], the dominant component of
//! *that frame's* movement decides between [`AxisLock::Horizontal`] (orbit) and
//! [`AxisLock::Vertical`] (page). The lock holds until the pointer is released,
//! however the finger wanders afterwards.
//!
//! ```rust
//! use kurbo::Point;
//! use swipefeed_gesture::{GestureClassifier, GestureConfig, GestureDelta, PointerId, PointerSample};
//!
//! let mut gestures = GestureClassifier::new(GestureConfig::default());
//! let finger = PointerId(1);
//!
//! gestures.pointer_down(PointerSample::new(finger, Point::new(100.0, 400.0), 0.0));
//! gestures.pointer_move(PointerSample::new(finger, Point::new(101.0, 380.0), 0.016));
//! assert_eq!(gestures.take_frame().delta, GestureDelta::Page(-20.0));
//!
//! // Mostly horizontal now, but the drag is already a page drag.
//! gestures.pointer_move(PointerSample::new(finger, Point::new(160.0, 378.0), 0.033));
//! assert_eq!(gestures.take_frame().delta, GestureDelta::Page(-2.0));
//!
//! gestures.pointer_up(PointerSample::new(finger, Point::new(160.0, 378.0), 0.05));
//! assert!(gestures.take_frame().page_released);
//! ```
//!
//! ## Zoom
//!
//! Two simultaneous pointers preempt drag classification and produce
//! [`GestureDelta::Zoom`]. Lifting one of the two ends the pinch and leaves the
//! classifier suspended until a fresh drag starts. Wheel input is an immediate
//! zoom and suppresses orbit/page output for the frame it arrives in.
//!
//! Zoom deltas are expressed in camera distance units: positive values move
//! the camera away from the content.
//!
//! Pointer input over interactive UI is expected to be filtered out by the
//! host before it reaches the classifier.
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;

mod classifier;

pub use classifier::{
    AxisLock, GestureClassifier, GestureConfig, GestureDelta, GestureFrame, GestureMode,
    GestureState, PointerId, PointerSample,
};
