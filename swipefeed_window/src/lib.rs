// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipefeed Window: a three-slot sliding window over a paged feed.
//!
//! A paged feed shows one item at a time out of an ordered list indexed
//! `0..len`. Each item is expensive to realize (a full 3D scene, for example),
//! so only the current item and its two neighbors are kept resident. This crate
//! models that window:
//!
//! - [`SlotRole`]: the three positions of the window, `Previous`, `Current` and
//!   `Next`.
//! - [`SlotLoad`]: what a slot holds. A slot is either empty (its index is out of
//!   range), holds a live handle for an index, or remembers that the provider
//!   could not produce a handle for that index.
//! - [`SceneProvider`]: the seam through which the window asks the host to
//!   instantiate and destroy handles. The window is the only caller.
//! - [`FeedWindow`]: owns the three slots and keeps them aligned with a center
//!   index via [`FeedWindow::load_around`] and [`FeedWindow::advance`].
//!
//! Paging by one is a rotation: the slot that leaves the window is destroyed and
//! reused for the new far neighbor, while the other two slots are relabeled. The
//! handle that becomes `Current` is never rebuilt.
//!
//! ## Minimal example
//!
//! ```rust
//! use swipefeed_window::{Direction, FeedWindow, SceneProvider, SlotRole};
//!
//! /// Hands out the index itself as the "scene".
//! struct Indices;
//!
//! impl SceneProvider for Indices {
//!     type Handle = usize;
//!     type Error = ();
//!
//!     fn instantiate(&mut self, index: usize) -> Result<usize, ()> {
//!         Ok(index)
//!     }
//!
//!     fn destroy(&mut self, _handle: usize) {}
//! }
//!
//! let mut provider = Indices;
//! let mut window = FeedWindow::new(10);
//! window.load_around(&mut provider, 0);
//! assert_eq!(window.slot(SlotRole::Previous).loaded_index(), None);
//! assert_eq!(window.current_handle(), Some(&0));
//!
//! window.advance(&mut provider, Direction::Next).unwrap();
//! assert_eq!(window.slot(SlotRole::Previous).loaded_index(), Some(0));
//! assert_eq!(window.slot(SlotRole::Next).loaded_index(), Some(2));
//! ```
//!
//! Failures to instantiate are not errors of the window: the slot is marked
//! [`SlotLoad::Unavailable`] and a `tracing` warning is emitted. Callers treat an
//! unavailable `Current` as "nothing to show" and may call
//! [`FeedWindow::retry_unavailable`] later.
//!
//! This crate is `no_std`.

#![no_std]

mod provider;
mod slot;
mod window;

pub use provider::SceneProvider;
pub use slot::{SlotLoad, SlotRole, WindowSlot};
pub use window::{AdvanceRejected, Direction, FeedWindow, WindowStats};
