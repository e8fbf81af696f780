// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The content library seam and its adapter onto the window's provider.

use core::fmt::Debug;

use glam::DVec3;
use swipefeed_orbit::Bounds3;
use swipefeed_window::SceneProvider;

use crate::error::ContentError;

bitflags::bitflags! {
    /// What a piece of content can do once it is current and settled.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Accepts direct interaction (for example a minigame).
        const INTERACTIVE = 0b0000_0001;
        /// Has playback to start when shown.
        const PLAYABLE    = 0b0000_0010;
        /// Emits audio.
        const AUDIO       = 0b0000_0100;
    }
}

/// Host-provided store of feed content.
///
/// The controller only ever calls [`instantiate`](Self::instantiate) and
/// [`destroy`](Self::destroy) through its three-slot window, so at most three
/// handles are alive at once.
pub trait ContentLibrary {
    /// Stable identifier of one piece of content.
    type Id: Clone + Eq + Debug;
    /// A live, renderable instance.
    type Handle;

    /// The feed, in order.
    fn ordered_ids(&self) -> Vec<Self::Id>;

    /// Builds a live instance of `id`.
    fn instantiate(&mut self, id: &Self::Id) -> Result<Self::Handle, ContentError>;

    /// Tears down an instance.
    fn destroy(&mut self, handle: Self::Handle);

    /// World-space bounds of an instance.
    fn bounds(&self, handle: &Self::Handle) -> Result<Bounds3, ContentError>;

    /// Point the camera orbits around.
    fn anchor(&self, handle: &Self::Handle) -> DVec3;

    /// Capabilities of `id`.
    fn capabilities(&self, id: &Self::Id) -> Capabilities {
        let _ = id;
        Capabilities::empty()
    }
}

/// Presents a library plus the current id list as a [`SceneProvider`].
pub(crate) struct LibraryProvider<'a, L: ContentLibrary> {
    library: &'a mut L,
    ids: &'a [L::Id],
}

impl<'a, L: ContentLibrary> LibraryProvider<'a, L> {
    pub(crate) fn new(library: &'a mut L, ids: &'a [L::Id]) -> Self {
        Self { library, ids }
    }
}

impl<L: ContentLibrary> SceneProvider for LibraryProvider<'_, L> {
    type Handle = L::Handle;
    type Error = ContentError;

    fn instantiate(&mut self, index: usize) -> Result<Self::Handle, Self::Error> {
        let id = self.ids.get(index).ok_or(ContentError::OutOfRange {
            index,
            len: self.ids.len(),
        })?;
        self.library.instantiate(id)
    }

    fn destroy(&mut self, handle: Self::Handle) {
        self.library.destroy(handle);
    }
}
