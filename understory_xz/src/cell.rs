// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree cells and their effective coverage.
//!
//! A cell's address does not stand for the cell itself but for its *coverage*:
//! the cell doubled in width and height, anchored at its minimum corner.
//!
//! ```text
//! +-------+-------+
//! |       |       |
//! |   coverage    |
//! +-------+       |
//! | cell  |       |
//! +-------+-------+
//! ```
//!
//! Siblings' coverage boxes overlap. That overlap is what lets a box straddling
//! a quadrant boundary still be assigned to a single cell. The encoder, the
//! decoder, and the range decomposer all go through the halving and doubling
//! helpers in this module, so they agree on where a cell and its coverage end.

use crate::address::{Address, Quadrant};
use crate::types::{BoundingBox, DOMAIN};

/// Midpoint of a cell on both axes.
#[inline]
pub(crate) fn midpoint(cell: &BoundingBox) -> (f64, f64) {
    (
        (cell.xmin + cell.xmax) / 2.0,
        (cell.ymin + cell.ymax) / 2.0,
    )
}

/// The quadrant of `cell` that a minimum corner at `(x, y)` falls into.
///
/// Ties on a midline resolve toward the lower/left quadrant.
#[inline]
pub(crate) fn select(cell: &BoundingBox, x: f64, y: f64) -> Quadrant {
    let (xmid, ymid) = midpoint(cell);
    Quadrant::from_halves(x > xmid, y > ymid)
}

/// Plain halving of `cell` into one of its quadrants.
#[inline]
pub(crate) fn split(cell: &BoundingBox, quadrant: Quadrant) -> BoundingBox {
    let (xmid, ymid) = midpoint(cell);
    let (xmin, xmax) = if quadrant.is_right() {
        (xmid, cell.xmax)
    } else {
        (cell.xmin, xmid)
    };
    let (ymin, ymax) = if quadrant.is_upper() {
        (ymid, cell.ymax)
    } else {
        (cell.ymin, ymid)
    };
    BoundingBox::new(xmin, xmax, ymin, ymax)
}

/// The effective coverage of a cell: doubled in extent from its minimum corner.
#[inline]
pub(crate) fn coverage(cell: &BoundingBox) -> BoundingBox {
    BoundingBox::new(
        cell.xmin,
        cell.xmin + 2.0 * cell.width(),
        cell.ymin,
        cell.ymin + 2.0 * cell.height(),
    )
}

/// A quadtree cell together with the address that reaches it.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    bounds: BoundingBox,
    address: Address,
}

impl Cell {
    /// The root cell: the whole domain, empty address.
    pub fn root() -> Self {
        Self {
            bounds: DOMAIN,
            address: Address::root(),
        }
    }

    /// Walk from the root down to the cell named by `address`.
    pub fn from_address(address: &Address) -> Self {
        let bounds = address
            .quadrants()
            .fold(DOMAIN, |cell, q| split(&cell, q));
        Self {
            bounds,
            address: address.clone(),
        }
    }

    /// The cell's own box (not doubled).
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// The address of this cell.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Consume the cell, keeping its address.
    pub fn into_address(self) -> Address {
        self.address
    }

    /// Depth below the root.
    pub fn depth(&self) -> usize {
        self.address.depth()
    }

    /// The child cell in `quadrant`.
    #[must_use]
    pub fn child(&self, quadrant: Quadrant) -> Self {
        Self {
            bounds: split(&self.bounds, quadrant),
            address: self.address.child(quadrant),
        }
    }

    /// All four children in digit order.
    pub fn children(&self) -> [Self; 4] {
        Quadrant::ALL.map(|q| self.child(q))
    }

    /// The region this cell's address is guaranteed to cover.
    pub fn coverage(&self) -> BoundingBox {
        coverage(&self.bounds)
    }
}
