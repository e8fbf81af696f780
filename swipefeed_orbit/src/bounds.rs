// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use glam::DVec3;

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds3 {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Bounds3 {
    /// Creates a box from two opposite corners in any order.
    #[must_use]
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box from its center and full size.
    #[must_use]
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    /// Full size along each axis.
    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Largest extent in the horizontal (XZ) plane.
    #[must_use]
    pub fn largest_horizontal_extent(&self) -> f64 {
        let size = self.size();
        size.x.max(size.z)
    }

    /// Returns `true` if both corners are finite and the box has some
    /// horizontal extent.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.largest_horizontal_extent() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::Bounds3;

    #[test]
    fn corners_are_normalized() {
        let b = Bounds3::new(DVec3::new(2.0, 0.0, -1.0), DVec3::new(-2.0, 3.0, 1.0));
        assert_eq!(b.min, DVec3::new(-2.0, 0.0, -1.0));
        assert_eq!(b.max, DVec3::new(2.0, 3.0, 1.0));
        assert_eq!(b.center(), DVec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn horizontal_extent_ignores_height() {
        let tower = Bounds3::from_center_size(DVec3::ZERO, DVec3::new(2.0, 40.0, 3.0));
        assert_eq!(tower.largest_horizontal_extent(), 3.0);
        assert!(tower.is_valid());
    }

    #[test]
    fn flat_or_broken_boxes_are_invalid() {
        let pole = Bounds3::from_center_size(DVec3::ZERO, DVec3::new(0.0, 5.0, 0.0));
        assert!(!pole.is_valid());
        let nan = Bounds3 {
            min: DVec3::splat(f64::NAN),
            max: DVec3::ONE,
        };
        assert!(!nan.is_valid());
    }
}
