// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Critically damped spring towards a moving target.
///
/// Uses a rational approximation of `exp(-x)` so it needs no floating-point
/// library. The spring never overshoots its target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothDamp {
    velocity: f64,
}

impl SmoothDamp {
    /// Creates a spring at rest.
    #[must_use]
    pub const fn new() -> Self {
        Self { velocity: 0.0 }
    }

    /// Current spring velocity in units per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Stops the spring.
    pub fn reset(&mut self) {
        self.velocity = 0.0;
    }

    /// Advances `current` towards `target` by `dt` seconds.
    ///
    /// `smooth_time` is roughly the time to reach the target.
    pub fn step(&mut self, current: f64, target: f64, smooth_time: f64, dt: f64) -> f64 {
        if dt <= 0.0 {
            return current;
        }
        let omega = 2.0 / smooth_time.max(1e-4);
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
        let change = current - target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        let output = target + (change + temp) * decay;

        if (target > current) == (output > target) {
            self.velocity = 0.0;
            return target;
        }
        output
    }
}
