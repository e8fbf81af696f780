// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use swipefeed_window::Direction;
use tracing::{debug, trace};

use crate::damp::SmoothDamp;

/// Tuning for [`SnapEngine`].
///
/// Distances are in content units (the unit of [`SnapConfig::spacing`]),
/// velocities in content units per second.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapConfig {
    /// Content units per screen pixel of vertical drag.
    pub sensitivity: f64,
    /// Distance between two consecutive items.
    pub spacing: f64,
    /// Offset beyond which a release commits.
    pub page_threshold: f64,
    /// Velocity beyond which a release commits, even below the offset threshold.
    pub velocity_threshold: f64,
    /// A flick only commits when the offset is not displaced against it.
    ///
    /// When `false`, a flick past [`SnapConfig::velocity_threshold`] commits in
    /// its own direction wherever the offset is.
    pub flick_needs_same_side: bool,
    /// Approximate duration of a snap animation in seconds.
    pub smooth_time: f64,
    /// Distance under which a snap is considered finished.
    pub epsilon: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            spacing: 100.0,
            page_threshold: 30.0,
            velocity_threshold: 150.0,
            flick_needs_same_side: true,
            smooth_time: 0.15,
            epsilon: 0.01,
        }
    }
}

/// Where the feed currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedPosition {
    /// Current index.
    pub index: usize,
    /// Number of items in the feed.
    pub len: usize,
}

impl FeedPosition {
    /// Creates a position.
    #[must_use]
    pub const fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }

    /// Returns `true` if paging one step in `direction` stays inside the feed.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        match direction {
            Direction::Previous => self.index > 0 && self.index < self.len,
            Direction::Next => self.index + 1 < self.len,
        }
    }
}

/// Outcome of a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapDecision {
    /// Move to the neighbor in this direction.
    Commit(Direction),
    /// Stay on the current item.
    SnapBack,
    /// The gesture asked for this direction but the feed ends there; snapping back.
    Rejected(Direction),
}

impl SnapDecision {
    /// The committed direction, if any.
    #[must_use]
    pub fn committed(self) -> Option<Direction> {
        match self {
            Self::Commit(direction) => Some(direction),
            Self::SnapBack | Self::Rejected(_) => None,
        }
    }
}

/// Vertical scroll state of the feed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Signed distance from the settled position; positive is towards the next item.
    pub offset: f64,
    /// Last measured drag velocity (or spring velocity while snapping).
    pub velocity: f64,
    /// A snap animation owns `offset`.
    pub is_snapping: bool,
    /// Target of the snap animation.
    pub snap_target: f64,
}

/// Decides what a release with the given offset and velocity does.
///
/// A release commits towards the next item when the offset passed the page
/// threshold, or when it is flicked faster than the velocity threshold (while
/// not displaced towards the previous item, unless
/// [`SnapConfig::flick_needs_same_side`] is off); previous is symmetric.
/// Commits that would leave the feed become [`SnapDecision::Rejected`].
#[must_use]
pub fn decide(
    offset: f64,
    velocity: f64,
    position: FeedPosition,
    config: &SnapConfig,
) -> SnapDecision {
    let loose = !config.flick_needs_same_side;
    let wanted = if offset > config.page_threshold
        || (velocity > config.velocity_threshold && (loose || offset >= 0.0))
    {
        Some(Direction::Next)
    } else if offset < -config.page_threshold
        || (velocity < -config.velocity_threshold && (loose || offset <= 0.0))
    {
        Some(Direction::Previous)
    } else {
        None
    };
    match wanted {
        None => SnapDecision::SnapBack,
        Some(direction) if position.can_move(direction) => SnapDecision::Commit(direction),
        Some(direction) => SnapDecision::Rejected(direction),
    }
}

/// Drag integration and snap animation for the feed offset.
///
/// Exactly one source drives the offset at any time: drag deltas while not
/// snapping, the spring while snapping. A drag delta that arrives mid-snap
/// grabs the feed and cancels the animation.
#[derive(Clone, Debug)]
pub struct SnapEngine {
    config: SnapConfig,
    state: ScrollState,
    spring: SmoothDamp,
}

impl SnapEngine {
    /// Creates a settled engine.
    #[must_use]
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            state: ScrollState::default(),
            spring: SmoothDamp::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: SnapConfig) {
        self.config = config;
    }

    /// Snapshot of the scroll state.
    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Current offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Returns `true` while a snap animation runs.
    #[must_use]
    pub fn is_snapping(&self) -> bool {
        self.state.is_snapping
    }

    /// Returns `true` when the offset is exactly zero and nothing animates.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.state.is_snapping && self.state.offset == 0.0
    }

    /// Returns `true` when the feed is displaced or animating.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        !self.is_settled()
    }

    /// Integrates a vertical screen delta (pixels, y down) over `dt` seconds.
    ///
    /// Dragging up moves towards the next item.
    pub fn apply_page_delta(&mut self, delta_y: f64, dt: f64) {
        if !delta_y.is_finite() {
            trace!(delta_y, "ignoring non-finite page delta");
            return;
        }
        if self.state.is_snapping {
            trace!(offset = self.state.offset, "snap grabbed by drag");
            self.state.is_snapping = false;
            self.spring.reset();
        }
        let change = -delta_y * self.config.sensitivity;
        self.state.offset += change;
        if dt > 0.0 {
            self.state.velocity = change / dt;
        }
    }

    /// Evaluates a release and starts the matching snap.
    ///
    /// On [`SnapDecision::Commit`] the offset is rebased onto the new item
    /// before snapping, so the caller must advance its window in the same frame.
    pub fn release(&mut self, position: FeedPosition) -> SnapDecision {
        let decision = decide(
            self.state.offset,
            self.state.velocity,
            position,
            &self.config,
        );
        match decision {
            SnapDecision::Commit(direction) => {
                self.state.offset -= self.direction_sign(direction) * self.config.spacing;
                debug!(
                    ?direction,
                    offset = self.state.offset,
                    velocity = self.state.velocity,
                    "page committed"
                );
            }
            SnapDecision::Rejected(direction) => {
                debug!(?direction, index = position.index, "page rejected at feed edge");
            }
            SnapDecision::SnapBack => {}
        }
        self.snap_to(0.0);
        decision
    }

    /// Starts (or redirects) a snap towards `target` from the current offset.
    pub fn snap_to(&mut self, target: f64) {
        self.state.snap_target = target;
        self.state.is_snapping = true;
        self.finish_if_close();
    }

    /// Advances the snap animation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if !self.state.is_snapping {
            return;
        }
        self.state.offset = self.spring.step(
            self.state.offset,
            self.state.snap_target,
            self.config.smooth_time,
            dt,
        );
        self.state.velocity = self.spring.velocity();
        self.finish_if_close();
    }

    /// Returns to a settled state at offset zero.
    pub fn reset(&mut self) {
        self.state = ScrollState::default();
        self.spring.reset();
    }

    fn finish_if_close(&mut self) {
        if (self.state.offset - self.state.snap_target).abs() < self.config.epsilon {
            self.state.offset = self.state.snap_target;
            self.state.is_snapping = false;
            self.state.velocity = 0.0;
            self.spring.reset();
        }
    }

    fn direction_sign(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Previous => -1.0,
            Direction::Next => 1.0,
        }
    }
}
