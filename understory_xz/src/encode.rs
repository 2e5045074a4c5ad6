// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Address encoder: bounding box to XZ address.

use kurbo::Point;

use crate::address::Address;
use crate::cell::{coverage, select, split};
use crate::config::XzConfig;
use crate::error::{Result, XzError};
use crate::types::{BoundingBox, DOMAIN, bounding_box};

/// Assign an address to a normalized bounding box.
///
/// Descends from the domain root, choosing at each level the quadrant that
/// holds the box's minimum corner, and stops before the first level whose
/// coverage box would no longer reach the box's maximum corner. The returned
/// address therefore always [decodes](crate::decode::decode) to a box containing
/// `bbox`. Points reach `config.max_depth`.
///
/// # Errors
///
/// [`XzError::OutOfDomain`] or [`XzError::InvertedBox`] when `bbox` is not a
/// valid box inside [`DOMAIN`], [`XzError::InvalidConfig`] for a bad `config`.
pub fn encode(bbox: &BoundingBox, config: &XzConfig) -> Result<Address> {
    config.validate()?;
    let bbox = bbox.in_domain()?;
    Ok(descend(&bbox, config.max_depth))
}

/// Normalize lon/lat points, reduce them to a bounding box, and encode it.
///
/// # Errors
///
/// [`XzError::NoPoints`] for an empty point set, otherwise as [`encode`].
pub fn encode_lon_lat<I>(points: I, config: &XzConfig) -> Result<Address>
where
    I: IntoIterator<Item = Point>,
{
    let bbox = bounding_box(points).ok_or(XzError::NoPoints)?;
    encode(&bbox.normalized(), config)
}

fn descend(bbox: &BoundingBox, max_depth: u8) -> Address {
    let mut cell = DOMAIN;
    let mut address = Address::root();
    for _ in 0..max_depth {
        let quadrant = select(&cell, bbox.xmin, bbox.ymin);
        let next = split(&cell, quadrant);
        // The minimum corner is inside `next` by construction, so containment
        // only depends on the far corner.
        if !coverage(&next).contains(bbox) {
            break;
        }
        address.push(quadrant);
        cell = next;
    }
    address
}
