// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoJSON geometries and their bounding-box reduction.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use understory_xz::{BoundingBox, bounding_box};

use crate::error::GeometryError;

/// A GeoJSON position: longitude, latitude, and optionally more (ignored).
pub type Position = Vec<f64>;

/// A GeoJSON geometry object.
///
/// All geometry types deserialize, so a collection mixing types is accepted as
/// a whole; only [`Point`](Self::Point) and [`Polygon`](Self::Polygon) reduce
/// to a bounding box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position.
    Point {
        /// The position.
        coordinates: Position,
    },
    /// Several positions.
    MultiPoint {
        /// The positions.
        coordinates: Vec<Position>,
    },
    /// A connected line.
    LineString {
        /// The vertices.
        coordinates: Vec<Position>,
    },
    /// Several lines.
    MultiLineString {
        /// The lines.
        coordinates: Vec<Vec<Position>>,
    },
    /// Exterior ring followed by any holes.
    Polygon {
        /// The rings.
        coordinates: Vec<Vec<Position>>,
    },
    /// Several polygons.
    MultiPolygon {
        /// The polygons.
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    /// A heterogeneous set of geometries.
    GeometryCollection {
        /// The members.
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    /// A point at `(lon, lat)`.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self::Point {
            coordinates: vec![lon, lat],
        }
    }

    /// A closed rectangular polygon tracing `bbox` counter-clockwise.
    pub fn rectangle(bbox: &BoundingBox) -> Self {
        let ring = [
            (bbox.xmin, bbox.ymin),
            (bbox.xmax, bbox.ymin),
            (bbox.xmax, bbox.ymax),
            (bbox.xmin, bbox.ymax),
            (bbox.xmin, bbox.ymin),
        ];
        Self::Polygon {
            coordinates: vec![ring.iter().map(|&(x, y)| vec![x, y]).collect()],
        }
    }

    /// The GeoJSON type name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::MultiPoint { .. } => "MultiPoint",
            Self::LineString { .. } => "LineString",
            Self::MultiLineString { .. } => "MultiLineString",
            Self::Polygon { .. } => "Polygon",
            Self::MultiPolygon { .. } => "MultiPolygon",
            Self::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    /// Bounding box in longitude/latitude.
    ///
    /// A point gives a degenerate box; a polygon gives the box of its exterior
    /// ring (holes lie inside it).
    ///
    /// # Errors
    ///
    /// [`GeometryError::Unsupported`] for every other geometry type,
    /// [`GeometryError::MalformedPosition`] and [`GeometryError::EmptyPolygon`]
    /// for malformed input.
    pub fn bounding_box(&self) -> Result<BoundingBox, GeometryError> {
        match self {
            Self::Point { coordinates } => {
                let p = to_point(coordinates)?;
                Ok(BoundingBox::point(p.x, p.y))
            }
            Self::Polygon { coordinates } => {
                let ring = coordinates.first().ok_or(GeometryError::EmptyPolygon)?;
                let points = ring
                    .iter()
                    .map(|position| to_point(position))
                    .collect::<Result<Vec<_>, _>>()?;
                bounding_box(points).ok_or(GeometryError::EmptyPolygon)
            }
            other => Err(GeometryError::Unsupported { kind: other.kind() }),
        }
    }
}

fn to_point(position: &[f64]) -> Result<Point, GeometryError> {
    match position {
        [lon, lat, ..] => Ok(Point::new(*lon, *lat)),
        _ => Err(GeometryError::MalformedPosition {
            len: position.len(),
        }),
    }
}
