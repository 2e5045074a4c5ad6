// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_xz_features --heading-base-level=0

//! Understory XZ Features: GeoJSON-style feature collections in, XZ addresses and key ranges out.
//!
//! This crate wraps [`understory_xz`] with the request/response shapes an
//! indexing service speaks:
//!
//! - [`assign_addresses`]: for each feature, the address to store it under.
//! - [`query_ranges`]: for each feature, treated as a query window, the key
//!   ranges to scan.
//!
//! Coordinates are longitude/latitude. Points and polygons are supported;
//! polygons are reduced to the bounding box of their exterior ring. Features
//! with any other geometry, or none, are passed through without an address
//! (or with no ranges) and logged at `warn` level via `tracing`.
//!
//! ## Example
//!
//! ```rust
//! use understory_xz::XzConfig;
//! use understory_xz_features::{assign_addresses_json, query_ranges_json};
//!
//! let config = XzConfig::new().with_max_depth(6);
//! let stored = assign_addresses_json(
//!     r#"{"type": "FeatureCollection", "features": [
//!         {"type": "Feature", "id": "berlin",
//!          "geometry": {"type": "Point", "coordinates": [13.4, 52.5]}}
//!     ]}"#,
//!     &config,
//! )
//! .unwrap();
//! assert!(stored.starts_with(r#"{"features":[{"id":"berlin","address":"3"#));
//!
//! let ranges = query_ranges_json(
//!     r#"{"type": "FeatureCollection", "features": [
//!         {"type": "Feature", "id": "window",
//!          "geometry": {"type": "Polygon", "coordinates": [[
//!              [0, 40], [30, 40], [30, 60], [0, 60], [0, 40]
//!          ]]}}
//!     ]}"#,
//!     &config,
//! )
//! .unwrap();
//! assert!(ranges.contains(r#"{"start":"","end":""}"#));
//! ```
//!
//! Exact ranges have `start == end`; prefix ranges have `end` set to `start`
//! followed by `*`, meaning every address beginning with `start`.

pub mod error;
pub mod feature;
pub mod geometry;
pub mod service;

pub use error::{FeatureError, GeometryError, Result};
pub use feature::{CollectionTag, Feature, FeatureCollection, FeatureId, FeatureTag};
pub use geometry::{Geometry, Position};
pub use service::{
    AddressResponse, AddressedFeature, RangeResponse, RangedFeature, assign_addresses,
    assign_addresses_json, coverage_feature, from_json, query_ranges, query_ranges_json, to_json,
};
