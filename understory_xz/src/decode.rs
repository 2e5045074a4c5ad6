// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Address decoder: XZ address to its coverage box.

use crate::address::Address;
use crate::cell::Cell;
use crate::types::BoundingBox;

/// The effective coverage box of `address`, in normalized coordinates.
///
/// Halves the domain once per digit and doubles the final cell from its
/// minimum corner. For any in-domain box `b`, `decode(&encode(b))` contains `b`.
pub fn decode(address: &Address) -> BoundingBox {
    Cell::from_address(address).coverage()
}

/// The effective coverage box of `address`, in longitude/latitude.
///
/// Coverage boxes near the top or right edge extend past ±180/±90.
pub fn decode_lon_lat(address: &Address) -> BoundingBox {
    decode(address).denormalized()
}
