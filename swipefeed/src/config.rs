// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregate configuration for a [`FeedController`](crate::FeedController).

use serde::{Deserialize, Serialize};
use swipefeed_gesture::GestureConfig;
use swipefeed_orbit::CameraConfig;
use swipefeed_snap::SnapConfig;

use crate::error::ConfigError;

/// Every tunable of the feed in one place.
///
/// Missing fields deserialize to their defaults, so a partial JSON document
/// only overrides what it names:
///
/// ```rust
/// use swipefeed::FeedConfig;
///
/// let config = FeedConfig::from_json_str(r#"{ "snap": { "page_threshold": 40.0 } }"#).unwrap();
/// assert_eq!(config.snap.page_threshold, 40.0);
/// assert_eq!(config.snap.spacing, 100.0);
/// assert_eq!(config.stability_delay, 0.5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Paging physics.
    pub snap: SnapConfig,
    /// Gesture classification.
    pub gesture: GestureConfig,
    /// Camera framing and auto-rotation.
    pub camera: CameraConfig,
    /// Seconds the feed must be still before content is revealed.
    pub stability_delay: f64,
    /// Frames to wait after the current index changes before reading its
    /// capabilities.
    pub capability_delay_ticks: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            gesture: GestureConfig::default(),
            camera: CameraConfig::default(),
            stability_delay: 0.5,
            capability_delay_ticks: 1,
        }
    }
}

impl FeedConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let snap = &self.snap;
        positive("snap.sensitivity", snap.sensitivity)?;
        positive("snap.spacing", snap.spacing)?;
        positive("snap.page_threshold", snap.page_threshold)?;
        positive("snap.velocity_threshold", snap.velocity_threshold)?;
        positive("snap.smooth_time", snap.smooth_time)?;
        positive("snap.epsilon", snap.epsilon)?;
        if snap.page_threshold >= snap.spacing {
            return Err(invalid("snap.page_threshold", "must be less than the spacing"));
        }

        let gesture = &self.gesture;
        non_negative("gesture.noise_floor", gesture.noise_floor)?;
        finite("gesture.wheel_zoom_scale", gesture.wheel_zoom_scale)?;
        finite("gesture.pinch_zoom_scale", gesture.pinch_zoom_scale)?;

        let camera = &self.camera;
        positive("camera.fov_y_degrees", camera.fov_y_degrees)?;
        if camera.fov_y_degrees >= 180.0 {
            return Err(invalid("camera.fov_y_degrees", "must be below 180 degrees"));
        }
        positive("camera.aspect", camera.aspect)?;
        positive("camera.margin", camera.margin)?;
        positive("camera.reference_size", camera.reference_size)?;
        positive("camera.base_min_distance", camera.base_min_distance)?;
        positive("camera.base_max_distance", camera.base_max_distance)?;
        if camera.base_min_distance > camera.base_max_distance {
            return Err(invalid(
                "camera.base_min_distance",
                "must not exceed camera.base_max_distance",
            ));
        }
        positive("camera.default_distance", camera.default_distance)?;
        finite("camera.elevation_degrees", camera.elevation_degrees)?;
        positive("camera.distance_sharpness", camera.distance_sharpness)?;
        non_negative("camera.idle_delay", camera.idle_delay)?;
        finite("camera.auto_rotate_speed", camera.auto_rotate_speed)?;
        finite("camera.orbit_degrees_per_pixel", camera.orbit_degrees_per_pixel)?;

        non_negative("stability_delay", self.stability_delay)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must not be negative"))
    }
}
