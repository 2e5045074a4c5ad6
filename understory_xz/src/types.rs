// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding boxes in the normalized domain and the lon/lat normalizer.

use kurbo::{Point, Rect};

use crate::error::{Result, XzError};

/// Longitude divisor mapping `[-180, 180]` onto `[-1, 1]`.
pub const LON_SCALE: f64 = 180.0;

/// Latitude divisor mapping `[-90, 90]` onto `[-1, 1]`.
pub const LAT_SCALE: f64 = 90.0;

/// The fixed root region every address descends from.
pub const DOMAIN: BoundingBox = BoundingBox::new(-1.0, 1.0, -1.0, 1.0);

/// Axis-aligned bounding box.
///
/// Boxes handed to the encoder or the range decomposer are expected to be in
/// normalized coordinates (see [`normalize`]). The same type is also used for
/// lon/lat boxes before normalization and for decoded coverage boxes, which may
/// extend past the domain.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Minimum x (left)
    pub xmin: f64,
    /// Maximum x (right)
    pub xmax: f64,
    /// Minimum y (bottom)
    pub ymin: f64,
    /// Maximum y (top)
    pub ymax: f64,
}

impl BoundingBox {
    /// Create a new box from its x interval followed by its y interval.
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// A degenerate (zero-area) box at a single point.
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new(x, x, y, y)
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Whether `other` lies entirely within this box. Edges count as inside.
    pub fn contains(&self, other: &Self) -> bool {
        self.xmin <= other.xmin
            && other.xmax <= self.xmax
            && self.ymin <= other.ymin
            && other.ymax <= self.ymax
    }

    /// Whether the point lies within this box. Edges count as inside.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.xmin <= x && x <= self.xmax && self.ymin <= y && y <= self.ymax
    }

    /// Whether the two boxes share any point, including a shared edge or corner.
    ///
    /// Touching counts as intersecting so that degenerate query windows (points,
    /// lines) and geometries sitting exactly on a cell edge are never pruned.
    pub fn intersects(&self, other: &Self) -> bool {
        self.xmin <= other.xmax
            && other.xmin <= self.xmax
            && self.ymin <= other.ymax
            && other.ymin <= self.ymax
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
        }
    }

    /// Grow the box to include a point.
    pub fn union_point(&self, x: f64, y: f64) -> Self {
        self.union(&Self::point(x, y))
    }

    /// Return true if the box is inverted (max below min on either axis). Assumes no NaN.
    pub fn is_inverted(&self) -> bool {
        self.xmax < self.xmin || self.ymax < self.ymin
    }

    /// Map a lon/lat box into normalized coordinates.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.xmin / LON_SCALE,
            self.xmax / LON_SCALE,
            self.ymin / LAT_SCALE,
            self.ymax / LAT_SCALE,
        )
    }

    /// Map a normalized box back to lon/lat.
    pub fn denormalized(&self) -> Self {
        Self::new(
            self.xmin * LON_SCALE,
            self.xmax * LON_SCALE,
            self.ymin * LAT_SCALE,
            self.ymax * LAT_SCALE,
        )
    }

    /// Check that a normalized box can be handed to the encoder or decomposer.
    ///
    /// Out-of-domain boxes are rejected rather than clamped: clamping would
    /// silently break the guarantee that a decoded address covers its box.
    ///
    /// # Errors
    ///
    /// [`XzError::OutOfDomain`] for non-finite coordinates or a box reaching
    /// past [`DOMAIN`], [`XzError::InvertedBox`] when min exceeds max.
    pub fn in_domain(self) -> Result<Self> {
        let finite = self.xmin.is_finite()
            && self.xmax.is_finite()
            && self.ymin.is_finite()
            && self.ymax.is_finite();
        if !finite {
            return Err(XzError::OutOfDomain { bbox: self });
        }
        if self.is_inverted() {
            return Err(XzError::InvertedBox { bbox: self });
        }
        if !DOMAIN.contains(&self) {
            return Err(XzError::OutOfDomain { bbox: self });
        }
        Ok(self)
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.x1, rect.y0, rect.y1)
    }
}

impl From<BoundingBox> for Rect {
    fn from(bbox: BoundingBox) -> Self {
        Self::new(bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax)
    }
}

/// Map a longitude/latitude pair into the normalized domain.
pub fn normalize(lon: f64, lat: f64) -> Point {
    Point::new(lon / LON_SCALE, lat / LAT_SCALE)
}

/// Map a normalized point back to longitude/latitude.
pub fn denormalize(point: Point) -> (f64, f64) {
    (point.x * LON_SCALE, point.y * LAT_SCALE)
}

/// Reduce a point set to its bounding box. Returns `None` for an empty set.
///
/// Each of the four extrema is tracked independently.
pub fn bounding_box<I>(points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = Point>,
{
    let mut it = points.into_iter();
    let first = it.next()?;
    Some(it.fold(BoundingBox::point(first.x, first.y), |acc, p| {
        acc.union_point(p.x, p.y)
    }))
}
