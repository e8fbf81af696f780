// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

/// Host-side factory for the heavy per-item instances held by a [`FeedWindow`].
///
/// The window calls [`SceneProvider::instantiate`] when an index enters the
/// window and [`SceneProvider::destroy`] when it leaves. Handles are passed back
/// by value, so a handle can only ever be destroyed once.
///
/// [`FeedWindow`]: crate::FeedWindow
pub trait SceneProvider {
    /// Opaque handle to an instantiated item.
    type Handle;

    /// Reason an index could not be instantiated.
    type Error: Debug;

    /// Instantiates the item at `index`.
    ///
    /// `index` is always within `0..len` of the window issuing the call.
    fn instantiate(&mut self, index: usize) -> Result<Self::Handle, Self::Error>;

    /// Destroys a handle previously returned by [`SceneProvider::instantiate`].
    fn destroy(&mut self, handle: Self::Handle);
}

impl<P: SceneProvider + ?Sized> SceneProvider for &mut P {
    type Handle = P::Handle;
    type Error = P::Error;

    fn instantiate(&mut self, index: usize) -> Result<Self::Handle, Self::Error> {
        (**self).instantiate(index)
    }

    fn destroy(&mut self, handle: Self::Handle) {
        (**self).destroy(handle);
    }
}
