// Copyright 2025 the Swipefeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use thiserror::Error;

/// Why a piece of content could not be used.
///
/// Returned by [`ContentLibrary`](crate::ContentLibrary) implementations and by
/// [`FeedController::navigate_to`](crate::FeedController::navigate_to). The
/// frame tick itself never fails: content errors become empty slots and
/// fallback framing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The library could not instantiate the content.
    #[error("content unavailable: {0}")]
    Unavailable(String),
    /// The content exists but cannot report its bounds yet.
    #[error("content bounds not ready")]
    BoundsNotReady,
    /// No content with this id is in the feed.
    #[error("unknown content id: {0}")]
    UnknownId(String),
    /// A feed index past the end of the ordered id list.
    #[error("feed index {index} out of range for {len} items")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Feed length at the time of the request.
        len: usize,
    },
}

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Json(#[from] serde_json::Error),
    /// A value is outside its usable range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}
