// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipefeed Timing: host-agnostic timing primitives for a paged feed.
//!
//! - [`StabilityTracker`] turns a per-frame "is the feed moving?" signal into
//!   one-shot [`StabilityEvent::Reveal`] and [`StabilityEvent::Hide`] events.
//!   Reveal fires once the feed has been still for a configurable delay;
//!   Hide fires as soon as movement resumes after the feed was still.
//! - [`Scheduler`] queues deferred actions due at a frame tick or at a time,
//!   grouped by scope so a whole group can be cancelled at once.
//!
//! Neither type reads a clock. Hosts pass the current time or tick in.
//!
//! ```rust
//! use swipefeed_timing::{StabilityEvent, StabilityTracker};
//!
//! let mut tracker = StabilityTracker::new(0.5);
//! assert_eq!(tracker.observe(false, 10.0), None);
//! assert_eq!(tracker.observe(false, 10.25), None);
//! assert_eq!(tracker.observe(false, 10.5), Some(StabilityEvent::Reveal));
//! assert_eq!(tracker.observe(false, 11.0), None);
//! assert_eq!(tracker.observe(true, 11.1), Some(StabilityEvent::Hide));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scheduler;
mod stability;

pub use scheduler::{Due, Scheduler, ScopeId, Token};
pub use stability::{StabilityEvent, StabilityPhase, StabilityTracker};
