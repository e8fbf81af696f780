// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Position of a slot inside the three-slot window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotRole {
    /// The item before the current one.
    Previous,
    /// The item being shown.
    Current,
    /// The item after the current one.
    Next,
}

impl SlotRole {
    /// All roles in window order.
    pub const ALL: [Self; 3] = [Self::Previous, Self::Current, Self::Next];

    /// Signed distance from the center of the window.
    #[must_use]
    pub const fn offset(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Current => 0,
            Self::Next => 1,
        }
    }

    /// Position of this role in [`SlotRole::ALL`].
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::Previous => 0,
            Self::Current => 1,
            Self::Next => 2,
        }
    }

    /// Feed index this role should hold for a window centered on `center`.
    ///
    /// Returns `None` when that index falls outside `0..len`.
    #[must_use]
    pub fn target_index(self, center: usize, len: usize) -> Option<usize> {
        let index = match self {
            Self::Previous => center.checked_sub(1)?,
            Self::Current => center,
            Self::Next => center.checked_add(1)?,
        };
        (index < len).then_some(index)
    }
}

/// Contents of a window slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotLoad<H> {
    /// Nothing is loaded; the slot's index is outside the feed.
    Empty,
    /// The provider failed to instantiate `index`.
    ///
    /// This is the "loaded index `-1`" marker: the slot is aligned with the
    /// window but has nothing to render.
    Unavailable {
        /// Index the slot was asked to hold.
        index: usize,
    },
    /// A live handle for `index`.
    Loaded {
        /// Index held by the slot.
        index: usize,
        /// Handle owned by this slot alone.
        handle: H,
    },
}

impl<H> Default for SlotLoad<H> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<H> SlotLoad<H> {
    /// Index with a live handle, if any.
    #[must_use]
    pub fn loaded_index(&self) -> Option<usize> {
        match self {
            Self::Loaded { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Index this slot is aligned with, whether or not it could be loaded.
    #[must_use]
    pub fn requested_index(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Unavailable { index } | Self::Loaded { index, .. } => Some(*index),
        }
    }

    /// The live handle, if any.
    #[must_use]
    pub fn handle(&self) -> Option<&H> {
        match self {
            Self::Loaded { handle, .. } => Some(handle),
            _ => None,
        }
    }

    /// Returns `true` if the provider failed to produce a handle.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// One of the three slots of a [`FeedWindow`](crate::FeedWindow).
#[derive(Clone, Debug)]
pub struct WindowSlot<H> {
    pub(crate) role: SlotRole,
    pub(crate) load: SlotLoad<H>,
}

impl<H> WindowSlot<H> {
    pub(crate) const fn empty(role: SlotRole) -> Self {
        Self {
            role,
            load: SlotLoad::Empty,
        }
    }

    /// Current role of the slot.
    #[must_use]
    pub fn role(&self) -> SlotRole {
        self.role
    }

    /// What the slot holds.
    #[must_use]
    pub fn load(&self) -> &SlotLoad<H> {
        &self.load
    }

    /// See [`SlotLoad::loaded_index`].
    #[must_use]
    pub fn loaded_index(&self) -> Option<usize> {
        self.load.loaded_index()
    }

    /// See [`SlotLoad::requested_index`].
    #[must_use]
    pub fn requested_index(&self) -> Option<usize> {
        self.load.requested_index()
    }

    /// See [`SlotLoad::handle`].
    #[must_use]
    pub fn handle(&self) -> Option<&H> {
        self.load.handle()
    }

    /// See [`SlotLoad::is_unavailable`].
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.load.is_unavailable()
    }
}
