// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipefeed Snap: the vertical paging physics of a one-item-at-a-time feed.
//!
//! While the user drags, the feed follows the finger: [`SnapEngine::apply_page_delta`]
//! integrates screen deltas into a signed content-space offset and estimates
//! velocity. On release, [`SnapEngine::release`] decides between committing to
//! the next/previous item and snapping back, then animates the offset towards
//! zero with a critically damped spring ([`SmoothDamp`]) on each
//! [`SnapEngine::tick`].
//!
//! The offset is measured from the settled position of the current item, in
//! the same units as [`SnapConfig::spacing`]. Positive offsets move towards the
//! next item. Committing shifts the offset by one spacing in the opposite
//! direction so that the newly current item stays exactly where it was on
//! screen, then snaps it home.
//!
//! ```rust
//! use swipefeed_snap::{Direction, FeedPosition, SnapConfig, SnapDecision, SnapEngine};
//!
//! let mut engine = SnapEngine::new(SnapConfig::default());
//!
//! // Drag up by 400 pixels over a few frames.
//! for _ in 0..4 {
//!     engine.apply_page_delta(-100.0, 1.0 / 60.0);
//! }
//! assert!((engine.offset() - 40.0).abs() < 1e-9);
//!
//! let decision = engine.release(FeedPosition::new(0, 3));
//! assert_eq!(decision, SnapDecision::Commit(Direction::Next));
//! assert!((engine.offset() - -60.0).abs() < 1e-9);
//!
//! while engine.is_snapping() {
//!     engine.tick(1.0 / 60.0);
//! }
//! assert_eq!(engine.offset(), 0.0);
//! ```
//!
//! The engine does not know about the window cache; the caller applies the
//! returned [`SnapDecision`] to it.
//!
//! This crate is `no_std`.

#![no_std]

mod damp;
mod engine;

pub use damp::SmoothDamp;
pub use engine::{FeedPosition, ScrollState, SnapConfig, SnapDecision, SnapEngine, decide};
pub use swipefeed_window::Direction;
