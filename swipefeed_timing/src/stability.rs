// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::debug;

/// Where the feed is on the way from moving to still.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StabilityPhase {
    /// Moving. The content is not ready to be shown.
    #[default]
    Unstable,
    /// Still, but not yet for long enough.
    Settling,
    /// Still for at least the delay. Reveal has fired.
    Stable,
}

/// One-shot transitions reported by [`StabilityTracker::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StabilityEvent {
    /// The feed has been still for the delay.
    Reveal,
    /// Movement resumed after the feed was still.
    Hide,
}

/// Debounces a "moving" signal into reveal and hide events.
#[derive(Clone, Debug)]
pub struct StabilityTracker {
    delay: f64,
    phase: StabilityPhase,
    stable_since: Option<f64>,
    fired_reveal: bool,
}

impl StabilityTracker {
    /// Creates a tracker that reveals after `delay` seconds without movement.
    ///
    /// The tracker starts [`Unstable`](StabilityPhase::Unstable).
    #[must_use]
    pub fn new(delay: f64) -> Self {
        Self {
            delay: if delay.is_finite() { delay.max(0.0) } else { 0.0 },
            phase: StabilityPhase::Unstable,
            stable_since: None,
            fired_reveal: false,
        }
    }

    /// Reveal delay in seconds.
    #[must_use]
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> StabilityPhase {
        self.phase
    }

    /// Returns `true` once reveal has fired and no movement has been seen since.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.phase == StabilityPhase::Stable
    }

    /// Time at which the current still period began.
    #[must_use]
    pub fn stable_since(&self) -> Option<f64> {
        self.stable_since
    }

    /// Returns `true` if reveal fired for the current still period.
    #[must_use]
    pub fn has_fired_reveal(&self) -> bool {
        self.fired_reveal
    }

    /// Feeds one frame's movement signal at time `now`.
    ///
    /// Returns [`StabilityEvent::Reveal`] on the first frame at which the feed
    /// has been still for at least the delay, and [`StabilityEvent::Hide`] on
    /// the first moving frame after a still one. All other frames return `None`.
    pub fn observe(&mut self, moving: bool, now: f64) -> Option<StabilityEvent> {
        if moving {
            let was_still = self.phase != StabilityPhase::Unstable;
            self.phase = StabilityPhase::Unstable;
            self.stable_since = None;
            self.fired_reveal = false;
            return was_still.then(|| {
                debug!(now, "feed moving; hide");
                StabilityEvent::Hide
            });
        }

        match self.phase {
            StabilityPhase::Unstable => {
                self.phase = StabilityPhase::Settling;
                self.stable_since = Some(now);
                self.try_reveal(now)
            }
            StabilityPhase::Settling => self.try_reveal(now),
            StabilityPhase::Stable => None,
        }
    }

    /// Returns to [`Unstable`](StabilityPhase::Unstable) as if movement started.
    ///
    /// Reports [`StabilityEvent::Hide`] when the feed was still, like a moving
    /// frame would. Use this when the host jumps the feed instead of moving it.
    pub fn interrupt(&mut self) -> Option<StabilityEvent> {
        let was_still = self.phase != StabilityPhase::Unstable;
        self.reset();
        was_still.then(|| {
            debug!("feed interrupted; hide");
            StabilityEvent::Hide
        })
    }

    /// Returns to [`Unstable`](StabilityPhase::Unstable) without emitting events.
    pub fn reset(&mut self) {
        self.phase = StabilityPhase::Unstable;
        self.stable_since = None;
        self.fired_reveal = false;
    }

    fn try_reveal(&mut self, now: f64) -> Option<StabilityEvent> {
        let since = self.stable_since?;
        if self.fired_reveal || now - since < self.delay {
            return None;
        }
        self.phase = StabilityPhase::Stable;
        self.fired_reveal = true;
        debug!(now, since, "feed still; reveal");
        Some(StabilityEvent::Reveal)
    }
}
