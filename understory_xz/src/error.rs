// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for addressing and range decomposition.

use alloc::string::String;

use thiserror::Error;

use crate::types::BoundingBox;

/// Errors returned by the XZ kernel.
///
/// Well-formed, in-domain input never fails; every variant describes input the
/// caller should have rejected or a guard the caller configured.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum XzError {
    /// A normalized box reaches outside `[-1, 1] x [-1, 1]` or has non-finite coordinates.
    #[error("bounding box {bbox:?} is outside the normalized domain [-1, 1] x [-1, 1]")]
    OutOfDomain {
        /// The rejected box.
        bbox: BoundingBox,
    },

    /// A box whose minimum exceeds its maximum on some axis.
    #[error("bounding box {bbox:?} is inverted")]
    InvertedBox {
        /// The rejected box.
        bbox: BoundingBox,
    },

    /// A point set with no points has no bounding box.
    #[error("cannot compute a bounding box of zero points")]
    NoPoints,

    /// An address string containing something other than quadrant digits.
    #[error("invalid address digit {digit:?} at position {position}")]
    InvalidDigit {
        /// The offending character.
        digit: char,
        /// Its character offset in the input.
        position: usize,
    },

    /// An address deeper than the supported depth.
    #[error("address of depth {depth} exceeds the maximum depth {max_depth}")]
    AddressTooDeep {
        /// Depth of the rejected address.
        depth: usize,
        /// The limit it was checked against.
        max_depth: u8,
    },

    /// A wire range whose `end` is neither `start` nor `start` plus the prefix marker.
    #[error("malformed range {{start: {start:?}, end: {end:?}}}")]
    MalformedRange {
        /// Wire `start`.
        start: String,
        /// Wire `end`.
        end: String,
    },

    /// Range decomposition would emit more ranges than the configured cap.
    #[error("query window decomposes into more than {limit} ranges")]
    RangeLimitExceeded {
        /// The configured cap.
        limit: usize,
    },

    /// Configuration rejected by [`XzConfig::validate`](crate::XzConfig::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Result type for XZ operations.
pub type Result<T> = core::result::Result<T, XzError>;
