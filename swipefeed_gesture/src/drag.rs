// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: movement deltas, total offsets and timing for one pointer.
//!
//! ## Usage
//!
//! 1) Start a drag with [`DragState::start`] at the pointer-down position and time.
//! 2) On each move, call [`DragState::update`] to get the delta since the previous sample.
//! 3) Use [`DragState::total_offset`] for the cumulative offset and
//!    [`DragState::elapsed`] for the drag duration.
//! 4) End the drag with [`DragState::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use swipefeed_gesture::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0), 1.0);
//! assert!(drag.is_dragging());
//!
//! let delta = drag.update(Point::new(15.0, 25.0), 1.25).unwrap();
//! assert_eq!(delta.x, 5.0);
//! assert_eq!(delta.y, 5.0);
//! assert_eq!(drag.elapsed(), Some(0.25));
//! ```

use kurbo::{Point, Vec2};

/// Tracks one pointer from press to release.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Position at pointer-down.
    pub start_pos: Option<Point>,
    /// Most recent position.
    pub last_pos: Option<Point>,
    /// Timestamp of pointer-down.
    pub start_time: f64,
    /// Timestamp of the most recent sample.
    pub last_time: f64,
}

impl DragState {
    /// Start tracking a new drag from `pos` at `time`.
    pub fn start(&mut self, pos: Point, time: f64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.start_time = time;
        self.last_time = time;
    }

    /// Record a new sample, returning the movement since the previous one.
    pub fn update(&mut self, pos: Point, time: f64) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos);
        self.last_time = time;
        last.map(|last| pos - last)
    }

    /// Offset from the drag start to `current_pos`.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Time between pointer-down and the most recent sample.
    pub fn elapsed(&self) -> Option<f64> {
        self.start_pos.map(|_| self.last_time - self.start_time)
    }

    /// End the drag and reset state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}
