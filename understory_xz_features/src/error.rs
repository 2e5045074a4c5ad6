// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for feature handling.

use thiserror::Error;
use understory_xz::XzError;

/// Why a geometry could not be reduced to a bounding box.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Only points and polygons have a bounding-box reduction.
    #[error("geometry type {kind} is not supported")]
    Unsupported {
        /// GeoJSON type name.
        kind: &'static str,
    },

    /// A position with fewer than two coordinates.
    #[error("position has {len} coordinates, expected at least 2")]
    MalformedPosition {
        /// Number of coordinates found.
        len: usize,
    },

    /// A polygon without an exterior ring, or with an empty one.
    #[error("polygon has no exterior ring")]
    EmptyPolygon,
}

/// Errors returned when processing a feature collection.
#[derive(Error, Debug)]
pub enum FeatureError {
    /// The collection contains no features.
    #[error("feature collection must contain at least one feature")]
    EmptyCollection,

    /// A feature's geometry is malformed.
    #[error("feature {index}: {source}")]
    Geometry {
        /// Position of the feature in the collection.
        index: usize,
        /// What was wrong with it.
        #[source]
        source: GeometryError,
    },

    /// The kernel rejected a feature's bounding box (for example, out of domain).
    #[error("feature {index}: {source}")]
    Xz {
        /// Position of the feature in the collection.
        index: usize,
        /// The kernel error.
        #[source]
        source: XzError,
    },

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] XzError),

    /// JSON (de)serialization failed.
    #[error("feature JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for feature operations.
pub type Result<T> = std::result::Result<T, FeatureError>;
