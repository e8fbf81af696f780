// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callbacks and input filtering.

use kurbo::Point;

use crate::library::Capabilities;

/// Receives feed lifecycle notifications from [`FeedController::tick`].
///
/// Every method defaults to doing nothing. `()` implements this trait for
/// hosts that do not care.
///
/// [`FeedController::tick`]: crate::FeedController::tick
pub trait FeedObserver<Id> {
    /// The feed has been still long enough to show `index`.
    fn on_reveal(&mut self, index: usize) {
        let _ = index;
    }

    /// The feed started moving after being still.
    fn on_hide(&mut self) {}

    /// The current index changed (commit, navigation or reload).
    fn on_current_changed(&mut self, index: usize) {
        let _ = index;
    }

    /// The current item settled; its capabilities are now valid.
    fn on_current_settled(&mut self, index: usize, id: &Id, capabilities: Capabilities) {
        let _ = (index, id, capabilities);
    }
}

impl<Id> FeedObserver<Id> for () {}

/// Decides which pointer presses belong to host UI rather than to the feed.
pub trait UiSurfaceFilter {
    /// Returns `true` if `position` is over an interactive UI surface.
    fn is_over_interactive_ui(&self, position: Point) -> bool;
}

/// A filter with no UI surfaces: every pointer reaches the feed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoUiSurfaces;

impl UiSurfaceFilter for NoUiSurfaces {
    fn is_over_interactive_ui(&self, _position: Point) -> bool {
        false
    }
}
