// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use swipefeed_gesture::{PointerId, PointerSample};

/// Raw input delivered to [`FeedController::handle_input`](crate::FeedController::handle_input).
///
/// Positions are screen pixels with y pointing down; times are seconds on the
/// host clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A pointer or touch was pressed.
    PointerDown(PointerSample),
    /// A pressed pointer moved.
    PointerMove(PointerSample),
    /// A pointer was released.
    PointerUp(PointerSample),
    /// The platform took a pointer away (for example a system gesture).
    PointerCancel {
        /// Which pointer.
        id: PointerId,
        /// When.
        time: f64,
    },
    /// Mouse wheel or two-finger scroll; positive zooms in.
    Wheel(f64),
    /// Platform pinch/magnify: change in contact separation in pixels.
    Pinch(f64),
}
