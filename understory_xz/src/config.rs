// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration shared by the encoder and the range decomposer.

use crate::error::{Result, XzError};

/// Default quadtree depth, and so the default address length for points.
pub const DEFAULT_MAX_DEPTH: u8 = 20;

/// Deepest supported quadtree level.
///
/// Every cell corner down to this level is exactly representable in `f64`, so
/// the encoder, decoder, and decomposer agree bit for bit on cell edges.
pub const MAX_SUPPORTED_DEPTH: u8 = 48;

/// Parameters for address assignment and range decomposition.
///
/// Index and query with the same `max_depth`. A query decomposed with a
/// shallower depth than the index was built with can miss the deeper addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct XzConfig {
    /// Maximum address length. Default: [`DEFAULT_MAX_DEPTH`].
    pub max_depth: u8,

    /// Optional cap on the number of ranges a single query window may produce.
    ///
    /// Exceeding it fails the decomposition instead of truncating, since a
    /// truncated range set would miss data. Default: no cap.
    pub range_limit: Option<usize>,
}

impl Default for XzConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            range_limit: None,
        }
    }
}

impl XzConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum address length.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Cap the number of ranges per query window.
    #[must_use]
    pub fn with_range_limit(mut self, limit: usize) -> Self {
        self.range_limit = Some(limit);
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// [`XzError::InvalidConfig`] when `max_depth` is zero or above
    /// [`MAX_SUPPORTED_DEPTH`], or when `range_limit` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(XzError::InvalidConfig("max_depth must be at least 1"));
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return Err(XzError::InvalidConfig(
                "max_depth exceeds MAX_SUPPORTED_DEPTH",
            ));
        }
        if self.range_limit == Some(0) {
            return Err(XzError::InvalidConfig("range_limit must be positive"));
        }
        Ok(())
    }
}
