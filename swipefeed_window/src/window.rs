// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::mem;

use tracing::{debug, warn};

use crate::provider::SceneProvider;
use crate::slot::{SlotLoad, SlotRole, WindowSlot};

/// Paging direction through the feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards index `0`.
    Previous,
    /// Towards index `len - 1`.
    Next,
}

impl Direction {
    /// `-1` for [`Direction::Previous`], `+1` for [`Direction::Next`].
    #[must_use]
    pub const fn delta(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }

    /// The other direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Previous => Self::Next,
            Self::Next => Self::Previous,
        }
    }

    /// The slot role that lies in this direction from `Current`.
    #[must_use]
    pub const fn role(self) -> SlotRole {
        match self {
            Self::Previous => SlotRole::Previous,
            Self::Next => SlotRole::Next,
        }
    }
}

/// Returned by [`FeedWindow::advance`] when the window is already at the end
/// of the feed in the requested direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceRejected {
    /// Center index at the time of the request.
    pub center: usize,
    /// Requested direction.
    pub direction: Direction,
}

impl fmt::Display for AdvanceRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot advance {:?} from index {}",
            self.direction, self.center
        )
    }
}

impl core::error::Error for AdvanceRejected {}

/// Lifetime counters for provider traffic issued by a [`FeedWindow`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowStats {
    /// Successful [`SceneProvider::instantiate`] calls.
    pub instantiated: u64,
    /// [`SceneProvider::destroy`] calls.
    pub destroyed: u64,
    /// Failed [`SceneProvider::instantiate`] calls.
    pub failed: u64,
}

/// Three-slot window over a feed of `len` items.
///
/// The window is centered on an index and keeps `center - 1`, `center` and
/// `center + 1` resident, leaving out-of-range roles empty. Handles are created
/// and destroyed exclusively through the [`SceneProvider`] passed to each
/// mutating call; the window never holds on to the provider.
#[derive(Clone, Debug)]
pub struct FeedWindow<H> {
    slots: [WindowSlot<H>; 3],
    center: usize,
    len: usize,
    stats: WindowStats,
}

impl<H> FeedWindow<H> {
    /// Creates an unloaded window over a feed of `len` items, centered on `0`.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: SlotRole::ALL.map(WindowSlot::empty),
            center: 0,
            len,
            stats: WindowStats::default(),
        }
    }

    /// Number of items in the feed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the feed has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index the window is centered on.
    #[must_use]
    pub fn center(&self) -> usize {
        self.center
    }

    /// The slot currently playing `role`.
    #[must_use]
    pub fn slot(&self, role: SlotRole) -> &WindowSlot<H> {
        &self.slots[role.position()]
    }

    /// All three slots in window order.
    #[must_use]
    pub fn slots(&self) -> &[WindowSlot<H>; 3] {
        &self.slots
    }

    /// Handle held by the `Current` slot, if it is loaded.
    #[must_use]
    pub fn current_handle(&self) -> Option<&H> {
        self.slot(SlotRole::Current).handle()
    }

    /// Provider traffic counters since creation.
    #[must_use]
    pub fn stats(&self) -> WindowStats {
        self.stats
    }

    /// Returns `true` if every slot is aligned with the center index.
    ///
    /// Unavailable slots count as aligned: they hold the right index but the
    /// provider had nothing for it.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        SlotRole::ALL.iter().all(|&role| {
            self.slot(role).requested_index() == role.target_index(self.center, self.len)
        })
    }

    /// Returns `true` if no slot holds anything.
    #[must_use]
    pub fn is_unloaded(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| matches!(slot.load, SlotLoad::Empty))
    }

    /// Aligns the window with `center`.
    ///
    /// `center` is clamped into the feed. Slots whose index is still wanted keep
    /// their handle (moving to their new role if needed); everything else is
    /// destroyed before the missing indices are instantiated. Slots previously
    /// marked unavailable are retried.
    pub fn load_around<P>(&mut self, provider: &mut P, center: usize)
    where
        P: SceneProvider<Handle = H> + ?Sized,
    {
        let center = center.min(self.len.saturating_sub(1));
        let targets = SlotRole::ALL.map(|role| role.target_index(center, self.len));

        let mut old: [SlotLoad<H>; 3] =
            core::array::from_fn(|pos| mem::take(&mut self.slots[pos].load));
        let mut kept: [Option<SlotLoad<H>>; 3] = [None, None, None];
        for (pos, target) in targets.iter().enumerate() {
            let Some(target) = *target else {
                continue;
            };
            if let Some(found) = old
                .iter_mut()
                .find(|load| load.loaded_index() == Some(target))
            {
                kept[pos] = Some(mem::take(found));
            }
        }

        for leftover in old {
            if let SlotLoad::Loaded { index, handle } = leftover {
                self.destroy(provider, index, handle);
            }
        }

        for (pos, target) in targets.into_iter().enumerate() {
            let load = match (kept[pos].take(), target) {
                (Some(load), _) => load,
                (None, Some(index)) => self.instantiate(provider, index),
                (None, None) => SlotLoad::Empty,
            };
            self.slots[pos] = WindowSlot {
                role: SlotRole::ALL[pos],
                load,
            };
        }

        if self.center != center {
            debug!(from = self.center, to = center, "window recentered");
        }
        self.center = center;
    }

    /// Moves the window one item in `direction`.
    ///
    /// The slot falling out of the window is destroyed and reused for the new far
    /// neighbor; the other two slots are relabeled without touching their
    /// handles. Returns the new center index, or [`AdvanceRejected`] when the
    /// window is already at the end of the feed in that direction.
    ///
    /// A window that is not aligned with its center (for example after
    /// [`FeedWindow::release_all`]) is reloaded around the new center instead.
    pub fn advance<P>(
        &mut self,
        provider: &mut P,
        direction: Direction,
    ) -> Result<usize, AdvanceRejected>
    where
        P: SceneProvider<Handle = H> + ?Sized,
    {
        let rejected = AdvanceRejected {
            center: self.center,
            direction,
        };
        let new_center = match direction {
            Direction::Previous => self.center.checked_sub(1).ok_or(rejected)?,
            Direction::Next => self
                .center
                .checked_add(1)
                .filter(|next| *next < self.len)
                .ok_or(rejected)?,
        };

        if !self.is_consistent() {
            self.load_around(provider, new_center);
            return Ok(new_center);
        }

        match direction {
            Direction::Next => self.slots.rotate_left(1),
            Direction::Previous => self.slots.rotate_right(1),
        }
        for (slot, role) in self.slots.iter_mut().zip(SlotRole::ALL) {
            slot.role = role;
        }

        let recycled = direction.role().position();
        if let SlotLoad::Loaded { index, handle } = mem::take(&mut self.slots[recycled].load) {
            self.destroy(provider, index, handle);
        }
        self.center = new_center;
        let load = match direction.role().target_index(new_center, self.len) {
            Some(index) => self.instantiate(provider, index),
            None => SlotLoad::Empty,
        };
        self.slots[recycled].load = load;

        debug!(center = new_center, ?direction, "window advanced");
        Ok(new_center)
    }

    /// Changes the feed length, keeping the window centered as close to its
    /// current index as the new length allows.
    ///
    /// Handles are reused by index, so this is only correct when the items at
    /// surviving indices are unchanged. Release the window first when the feed
    /// was reordered; an unloaded window stays unloaded and only has its center
    /// clamped.
    pub fn set_len<P>(&mut self, provider: &mut P, len: usize)
    where
        P: SceneProvider<Handle = H> + ?Sized,
    {
        self.len = len;
        if len == 0 {
            self.release_all(provider);
            self.center = 0;
        } else if self.is_unloaded() {
            self.center = self.center.min(len - 1);
        } else {
            self.load_around(provider, self.center);
        }
    }

    /// Destroys every live handle and leaves all slots empty.
    ///
    /// The center index is kept so the window can be reloaded in place.
    pub fn release_all<P>(&mut self, provider: &mut P)
    where
        P: SceneProvider<Handle = H> + ?Sized,
    {
        for pos in 0..self.slots.len() {
            if let SlotLoad::Loaded { index, handle } = mem::take(&mut self.slots[pos].load) {
                self.destroy(provider, index, handle);
            }
        }
    }

    /// Retries every slot marked [`SlotLoad::Unavailable`].
    ///
    /// Returns how many slots now hold a live handle as a result.
    pub fn retry_unavailable<P>(&mut self, provider: &mut P) -> usize
    where
        P: SceneProvider<Handle = H> + ?Sized,
    {
        let mut recovered = 0;
        for pos in 0..self.slots.len() {
            let SlotLoad::Unavailable { index } = self.slots[pos].load else {
                continue;
            };
            let load = self.instantiate(provider, index);
            if load.loaded_index().is_some() {
                recovered += 1;
            }
            self.slots[pos].load = load;
        }
        recovered
    }

    fn instantiate<P>(&mut self, provider: &mut P, index: usize) -> SlotLoad<H>
    where
        P: SceneProvider<Handle = H> + ?Sized,
    {
        match provider.instantiate(index) {
            Ok(handle) => {
                self.stats.instantiated += 1;
                debug!(index, "scene instantiated");
                SlotLoad::Loaded { index, handle }
            }
            Err(error) => {
                self.stats.failed += 1;
                warn!(index, ?error, "scene unavailable; slot left empty");
                SlotLoad::Unavailable { index }
            }
        }
    }

    fn destroy<P>(&mut self, provider: &mut P, index: usize, handle: H)
    where
        P: SceneProvider<Handle = H> + ?Sized,
    {
        provider.destroy(handle);
        self.stats.destroyed += 1;
        debug!(index, "scene destroyed");
    }
}
