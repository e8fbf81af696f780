// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::{DMat4, DVec3};
use tracing::debug;

use crate::bounds::Bounds3;

/// Tuning for [`CameraRig`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Viewport width divided by height.
    pub aspect: f64,
    /// How much larger than the content the framed region is.
    pub margin: f64,
    /// Content extent at which the base distance range applies unscaled.
    pub reference_size: f64,
    /// Minimum distance for content of `reference_size`.
    pub base_min_distance: f64,
    /// Maximum distance for content of `reference_size`.
    pub base_max_distance: f64,
    /// Distance used when the content cannot be measured.
    pub default_distance: f64,
    /// Fixed elevation of the orbit above the horizon, in degrees.
    pub elevation_degrees: f64,
    /// Exponential approach rate of the smoothed distance, per second.
    pub distance_sharpness: f64,
    /// Seconds without interaction before auto-rotation starts.
    pub idle_delay: f64,
    /// Auto-rotation speed in degrees per second.
    pub auto_rotate_speed: f64,
    /// Orbit degrees per pixel of horizontal drag.
    pub orbit_degrees_per_pixel: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            aspect: 9.0 / 16.0,
            margin: 1.5,
            reference_size: 8.0,
            base_min_distance: 15.0,
            base_max_distance: 50.0,
            default_distance: 25.0,
            elevation_degrees: 20.0,
            distance_sharpness: 8.0,
            idle_delay: 3.0,
            auto_rotate_speed: 15.0,
            orbit_degrees_per_pixel: 0.3,
        }
    }
}

impl CameraConfig {
    /// Horizontal field of view in radians, derived from the vertical one and
    /// the aspect ratio.
    #[must_use]
    pub fn horizontal_fov(&self) -> f64 {
        let half_v = self.fov_y_degrees.to_radians() * 0.5;
        2.0 * (half_v.tan() * self.aspect).atan()
    }
}

/// Distance target and zoom range for one piece of content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceFit {
    /// Distance at which the content fills the view with the configured margin.
    pub target: f64,
    /// Closest allowed distance.
    pub min: f64,
    /// Farthest allowed distance.
    pub max: f64,
}

impl DistanceFit {
    /// The fit used when content cannot be measured.
    #[must_use]
    pub fn fallback(config: &CameraConfig) -> Self {
        Self {
            target: config.default_distance,
            min: config.base_min_distance,
            max: config.base_max_distance,
        }
    }

    /// Clamps `distance` into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, distance: f64) -> f64 {
        distance.clamp(self.min, self.max)
    }
}

/// Computes the framing distance for content whose largest horizontal extent
/// is `extent`, viewed through a horizontal field of view of `fov` radians.
///
/// The zoom range is the base range scaled by `extent / reference_size`, so
/// content twice the reference size may be viewed from twice as far (and no
/// closer than twice the base minimum). Returns `None` for non-positive or
/// non-finite extents and for degenerate fields of view.
#[must_use]
pub fn compute_optimal_distance(extent: f64, fov: f64, config: &CameraConfig) -> Option<DistanceFit> {
    let fov_ok = fov.is_finite() && fov > 0.0 && fov < core::f64::consts::PI;
    if !(extent.is_finite() && extent > 0.0) || !fov_ok || config.reference_size <= 0.0 {
        return None;
    }
    let half_width = extent * config.margin * 0.5;
    let target = half_width / (fov * 0.5).tan();
    let scale = extent / config.reference_size;
    Some(DistanceFit {
        target,
        min: config.base_min_distance * scale,
        max: config.base_max_distance * scale,
    })
}

/// Where the camera is and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Camera position.
    pub eye: DVec3,
    /// Look-at point.
    pub target: DVec3,
}

impl CameraPose {
    /// Right-handed view matrix with +Y up.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.target, DVec3::Y)
    }
}

/// Snapshot of the rig's distance and angle state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Orbit angle in degrees, in `[0, 360)`.
    pub orbit_angle: f64,
    /// Smoothed distance used for the last pose.
    pub current_distance: f64,
    /// Auto-fit distance for the current content.
    pub target_distance: f64,
    /// User zoom applied on top of the auto-fit distance.
    pub manual_zoom_offset: f64,
    /// Closest allowed distance.
    pub min_distance: f64,
    /// Farthest allowed distance.
    pub max_distance: f64,
}

/// Orbit camera framing the current feed item.
#[derive(Clone, Debug)]
pub struct CameraRig {
    config: CameraConfig,
    fit: DistanceFit,
    orbit_angle: f64,
    current_distance: f64,
    manual_zoom_offset: f64,
    idle_time: f64,
    auto_rotating: bool,
    fallback: bool,
}

impl CameraRig {
    /// Creates a rig using the fallback framing.
    #[must_use]
    pub fn new(config: CameraConfig) -> Self {
        let fit = DistanceFit::fallback(&config);
        Self {
            config,
            fit,
            orbit_angle: 0.0,
            current_distance: fit.clamp(fit.target),
            manual_zoom_offset: 0.0,
            idle_time: 0.0,
            auto_rotating: false,
            fallback: true,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Snapshot of angle and distances.
    #[must_use]
    pub fn state(&self) -> CameraState {
        CameraState {
            orbit_angle: self.orbit_angle,
            current_distance: self.current_distance,
            target_distance: self.fit.target,
            manual_zoom_offset: self.manual_zoom_offset,
            min_distance: self.fit.min,
            max_distance: self.fit.max,
        }
    }

    /// The distance the smoothed distance is heading towards.
    #[must_use]
    pub fn effective_distance(&self) -> f64 {
        self.fit.clamp(self.fit.target + self.manual_zoom_offset)
    }

    /// Returns `true` while idle auto-rotation is running.
    #[must_use]
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotating
    }

    /// Returns `true` if the current framing is the fallback, not a measured fit.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Frames new content, or falls back to the default distance for `None`
    /// and unusable boxes.
    pub fn fit(&mut self, bounds: Option<Bounds3>) {
        let measured = bounds.filter(Bounds3::is_valid).and_then(|bounds| {
            compute_optimal_distance(
                bounds.largest_horizontal_extent(),
                self.config.horizontal_fov(),
                &self.config,
            )
        });
        match measured {
            Some(fit) => {
                self.fit = fit;
                self.fallback = false;
            }
            None => {
                debug!(?bounds, "content not measurable; using default camera distance");
                self.fit = DistanceFit::fallback(&self.config);
                self.fallback = true;
            }
        }
        self.clamp_manual_zoom();
    }

    /// Rotates the orbit by `degrees` immediately.
    pub fn orbit(&mut self, degrees: f64) {
        self.note_interaction();
        if degrees.is_finite() {
            self.orbit_angle = wrap_degrees(self.orbit_angle + degrees);
        }
    }

    /// Rotates the orbit by a horizontal drag of `pixels`.
    ///
    /// Dragging right turns the content to the right.
    pub fn orbit_by_pixels(&mut self, pixels: f64) {
        self.orbit(-pixels * self.config.orbit_degrees_per_pixel);
    }

    /// Moves the camera `delta` units further away (negative: closer), within
    /// the content's zoom range.
    pub fn zoom(&mut self, delta: f64) {
        self.note_interaction();
        if delta.is_finite() {
            self.manual_zoom_offset += delta;
            self.clamp_manual_zoom();
        }
    }

    /// Cancels auto-rotation and restarts the idle timer.
    pub fn note_interaction(&mut self) {
        self.idle_time = 0.0;
        self.auto_rotating = false;
    }

    /// Faces new content: orbit back to zero, manual zoom cleared, idle timer
    /// re-armed.
    pub fn reset_for_new_content(&mut self) {
        self.orbit_angle = 0.0;
        self.manual_zoom_offset = 0.0;
        self.note_interaction();
    }

    /// Advances idle rotation and distance smoothing by `dt` seconds and returns
    /// the pose looking at `anchor`.
    ///
    /// Auto-rotation is held while `snapping`.
    pub fn update(&mut self, dt: f64, anchor: DVec3, snapping: bool) -> CameraPose {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if !snapping {
            if !self.auto_rotating {
                self.idle_time += dt;
                if self.idle_time >= self.config.idle_delay {
                    self.auto_rotating = true;
                }
            } else {
                self.orbit_angle =
                    wrap_degrees(self.orbit_angle + self.config.auto_rotate_speed * dt);
            }
        }

        let goal = self.effective_distance();
        let blend = 1.0 - (-self.config.distance_sharpness * dt).exp();
        self.current_distance += (goal - self.current_distance) * blend;
        if (goal - self.current_distance).abs() < 1e-6 {
            self.current_distance = goal;
        }

        self.pose(anchor)
    }

    /// Pose for the current angle and smoothed distance, without advancing time.
    #[must_use]
    pub fn pose(&self, anchor: DVec3) -> CameraPose {
        let azimuth = self.orbit_angle.to_radians();
        let elevation = self.config.elevation_degrees.to_radians();
        let d = self.current_distance;
        let offset = DVec3::new(
            d * elevation.cos() * azimuth.sin(),
            d * elevation.sin(),
            d * elevation.cos() * azimuth.cos(),
        );
        CameraPose {
            eye: anchor + offset,
            target: anchor,
        }
    }

    fn clamp_manual_zoom(&mut self) {
        let effective = self.effective_distance();
        self.manual_zoom_offset = effective - self.fit.target;
    }
}

fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
