// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipefeed Orbit: an orbit camera that frames whatever content it is given.
//!
//! Every item of a 3D feed has a different size. This crate keeps a camera on a
//! fixed-elevation orbit around the current item and picks its distance from the
//! item's bounding box:
//!
//! - [`compute_optimal_distance`] derives the distance at which the largest
//!   horizontal extent of the content fills the horizontal field of view with a
//!   margin, plus a zoom range that scales with content size relative to a
//!   reference size.
//! - [`CameraRig`] owns the orbit angle, manual zoom offset and smoothed
//!   distance, produces a [`CameraPose`] each frame, and auto-rotates after a
//!   period without interaction.
//!
//! The effective distance is always
//! `clamp(target_distance + manual_zoom_offset, min_distance, max_distance)`,
//! so manual zoom can never leave the content-relative range.
//!
//! ```rust
//! use glam::DVec3;
//! use swipefeed_orbit::{Bounds3, CameraConfig, CameraRig};
//!
//! let mut rig = CameraRig::new(CameraConfig::default());
//! rig.fit(Some(Bounds3::from_center_size(DVec3::ZERO, DVec3::splat(16.0))));
//! assert_eq!(rig.state().min_distance, 30.0);
//! assert_eq!(rig.state().max_distance, 100.0);
//!
//! rig.zoom(1_000.0);
//! assert!((rig.effective_distance() - 100.0).abs() < 1e-9);
//!
//! let pose = rig.update(1.0 / 60.0, DVec3::ZERO, false);
//! assert_eq!(pose.target, DVec3::ZERO);
//! ```
//!
//! Angles are in degrees at the API surface.

mod bounds;
mod rig;

pub use bounds::Bounds3;
pub use rig::{CameraConfig, CameraPose, CameraRig, CameraState, DistanceFit, compute_optimal_distance};
