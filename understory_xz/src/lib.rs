// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_xz --heading-base-level=0

//! Understory XZ: XZ-order addresses for bounding boxes and query-window key ranges.
//!
//! Understory XZ lets 2D range queries run as plain 1D scans over any ordered
//! key-value store, without a dedicated spatial index structure.
//!
//! - [`encode`] assigns a sortable [`Address`] to a bounding box.
//! - [`decode`] reconstructs the region an address covers.
//! - [`decompose`] (or the lazy [`ranges`]) turns a query window into a set of
//!   [`Range`]s that, scanned together, find every indexed box whose coverage
//!   touches the window.
//!
//! ## Addresses and coverage
//!
//! Coordinates live in the normalized domain `[-1, 1] x [-1, 1]`; longitude
//! and latitude map onto it by dividing by 180 and 90 (see [`normalize`]).
//! An address is a string of quadrant digits naming a quadtree cell:
//!
//! ```text
//! +---+---+
//! | 2 | 3 |
//! +---+---+
//! | 0 | 1 |
//! +---+---+
//! ```
//!
//! What an address stands for is the cell's *coverage*: the cell doubled in
//! width and height from its minimum corner. The encoder picks the deepest cell
//! whose coverage still contains the box, so a box straddling a cell boundary
//! does not have to climb to a large common ancestor. The encoder, decoder,
//! and decomposer all use the same [`Cell`] halving and doubling, which is what
//! keeps query results complete.
//!
//! ## Example
//!
//! ```rust
//! use understory_xz::{BoundingBox, Range, XzConfig, decode, decompose, encode, normalize};
//!
//! let config = XzConfig::default();
//!
//! // The whole domain fits in the coverage of the first quadrant.
//! let everything = BoundingBox::new(-1.0, 1.0, -1.0, 1.0);
//! let address = encode(&everything, &config).unwrap();
//! assert_eq!(address.as_str(), "0");
//! assert_eq!(decode(&address), everything);
//!
//! // Points descend all the way down.
//! let berlin = normalize(13.404954, 52.520008);
//! let address = encode(&BoundingBox::point(berlin.x, berlin.y), &config).unwrap();
//! assert_eq!(address.depth(), 20);
//!
//! // A window around the point yields ranges, one of which holds its address.
//! // Index and query with the same depth.
//! let config = XzConfig::new().with_max_depth(10);
//! let address = encode(&BoundingBox::point(berlin.x, berlin.y), &config).unwrap();
//! let window = BoundingBox::new(berlin.x - 0.01, berlin.x + 0.01, berlin.y - 0.01, berlin.y + 0.01);
//! let ranges = decompose(&window, &config).unwrap();
//! assert!(ranges.iter().any(|r: &Range| r.contains(&address)));
//! ```
//!
//! ## Scanning an ordered store
//!
//! [`Range::scan_bounds`] gives the key bounds to scan: an exact range is a
//! single key, a prefix range covers its address and everything below it. The
//! `{start, end}` wire form ([`KeyRange`]) marks prefix ranges with a trailing
//! [`PREFIX_MARKER`].
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use understory_xz::{BoundingBox, XzConfig, decompose, encode};
//!
//! let config = XzConfig::new().with_max_depth(8);
//! let mut store: BTreeMap<String, Vec<&str>> = BTreeMap::new();
//! for (name, bbox) in [
//!     ("a", BoundingBox::new(0.10, 0.12, 0.10, 0.12)),
//!     ("b", BoundingBox::new(-0.8, -0.7, 0.5, 0.6)),
//! ] {
//!     let key = encode(&bbox, &config).unwrap().to_string();
//!     store.entry(key).or_default().push(name);
//! }
//!
//! let window = BoundingBox::new(0.0, 0.25, 0.0, 0.25);
//! let mut hits = Vec::new();
//! for range in decompose(&window, &config).unwrap() {
//!     for (_, names) in store.range(range.scan_bounds()) {
//!         hits.extend(names.iter().copied());
//!     }
//! }
//! assert_eq!(hits, ["a"]);
//! ```
//!
//! Candidates found this way still need an exact intersection test against
//! their real geometry: coverage boxes are conservative.
//!
//! ## Float semantics
//!
//! Inputs must be finite and inside the domain; out-of-domain boxes are
//! rejected with [`XzError::OutOfDomain`], never clamped. All operations are
//! pure and deterministic.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod address;
pub mod cell;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod range;
pub mod types;

pub use address::{Address, Quadrant};
pub use cell::Cell;
pub use config::{DEFAULT_MAX_DEPTH, MAX_SUPPORTED_DEPTH, XzConfig};
pub use decode::{decode, decode_lon_lat};
pub use encode::{encode, encode_lon_lat};
pub use error::{Result, XzError};
pub use range::{KeyRange, PREFIX_MARKER, Range, RangeIter, decompose, ranges};
pub use types::{BoundingBox, DOMAIN, bounding_box, denormalize, normalize};
