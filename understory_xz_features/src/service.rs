// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two request/response operations: address assignment and range query.
//!
//! Both take a [`FeatureCollection`] in longitude/latitude, reduce each
//! feature's geometry to a bounding box, normalize it, and hand it to the
//! kernel. Responses keep request order and echo each feature's identifier.

use serde::{Deserialize, Serialize};
use understory_xz::{Address, BoundingBox, KeyRange, XzConfig, decode_lon_lat, decompose, encode};

use crate::error::{FeatureError, GeometryError, Result};
use crate::feature::{Feature, FeatureCollection, FeatureId};
use crate::geometry::Geometry;

/// One entry of an [`AddressResponse`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressedFeature {
    /// The feature's identifier, when it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    /// The assigned address; absent for unsupported or missing geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Response to [`assign_addresses`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    /// One entry per request feature, in request order.
    pub features: Vec<AddressedFeature>,
}

/// One entry of a [`RangeResponse`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangedFeature {
    /// The feature's identifier, when it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    /// Key ranges to scan; empty for unsupported or missing geometry.
    pub ranges: Vec<KeyRange>,
}

/// Response to [`query_ranges`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeResponse {
    /// One entry per request feature, in request order.
    pub features: Vec<RangedFeature>,
}

/// The normalized box of a feature, or `None` when it has nothing to index.
fn normalized_box(index: usize, feature: &Feature) -> Result<Option<BoundingBox>> {
    let Some(geometry) = &feature.geometry else {
        tracing::warn!(index, id = ?feature.id, "feature has no geometry; skipping");
        return Ok(None);
    };
    match geometry.bounding_box() {
        Ok(bbox) => Ok(Some(bbox.normalized())),
        Err(GeometryError::Unsupported { kind }) => {
            tracing::warn!(index, id = ?feature.id, kind, "unsupported geometry; skipping");
            Ok(None)
        }
        Err(source) => Err(FeatureError::Geometry { index, source }),
    }
}

fn check_request(collection: &FeatureCollection, config: &XzConfig) -> Result<()> {
    config.validate()?;
    if collection.is_empty() {
        return Err(FeatureError::EmptyCollection);
    }
    Ok(())
}

/// Assign an address to every feature in the collection.
///
/// Points and polygons get an address; features with any other geometry, or
/// none, are listed without one.
///
/// # Errors
///
/// [`FeatureError::EmptyCollection`] for an empty request,
/// [`FeatureError::Config`] for an invalid `config`, and per-feature
/// [`FeatureError::Geometry`] or [`FeatureError::Xz`] for malformed or
/// out-of-domain input. Nothing is returned for the rest of the collection
/// once one feature fails.
pub fn assign_addresses(
    collection: &FeatureCollection,
    config: &XzConfig,
) -> Result<AddressResponse> {
    check_request(collection, config)?;
    let features = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| -> Result<AddressedFeature> {
            let address = normalized_box(index, feature)?
                .map(|bbox| encode(&bbox, config))
                .transpose()
                .map_err(|source| FeatureError::Xz { index, source })?;
            Ok(AddressedFeature {
                id: feature.id.clone(),
                address,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(features = features.len(), "assigned addresses");
    Ok(AddressResponse { features })
}

/// Compute the key ranges covering each feature's bounding box.
///
/// Each feature is treated as a query window. A point is a degenerate window
/// and still finds every indexed box whose coverage touches it.
///
/// # Errors
///
/// As [`assign_addresses`]; the kernel error for a feature may also be
/// [`RangeLimitExceeded`](understory_xz::XzError::RangeLimitExceeded).
pub fn query_ranges(collection: &FeatureCollection, config: &XzConfig) -> Result<RangeResponse> {
    check_request(collection, config)?;
    let features = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| -> Result<RangedFeature> {
            let ranges: Vec<KeyRange> = match normalized_box(index, feature)? {
                Some(window) => decompose(&window, config)
                    .map_err(|source| FeatureError::Xz { index, source })?
                    .iter()
                    .map(|r| r.to_key_range())
                    .collect(),
                None => Vec::new(),
            };
            Ok(RangedFeature {
                id: feature.id.clone(),
                ranges,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(
        features = features.len(),
        ranges = features.iter().map(|f| f.ranges.len()).sum::<usize>(),
        "computed query ranges"
    );
    Ok(RangeResponse { features })
}

/// A feature whose polygon is the lon/lat coverage of `address`.
///
/// Useful for drawing what an address stands for on a map. The coverage of a
/// shallow address reaches past the valid lon/lat range.
pub fn coverage_feature(address: &Address) -> Feature {
    Feature::new(
        Some(FeatureId::from(address.to_string())),
        Geometry::rectangle(&decode_lon_lat(address)),
    )
    .with_property("address", address.as_str())
    .with_property("depth", address.depth())
}

/// Parse a feature collection from JSON.
///
/// # Errors
///
/// [`FeatureError::Json`] for malformed JSON or an unknown geometry type.
pub fn from_json(json: &str) -> Result<FeatureCollection> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize any response (or collection) to JSON.
///
/// # Errors
///
/// [`FeatureError::Json`] if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// JSON in, JSON out: [`assign_addresses`] on a serialized collection.
///
/// # Errors
///
/// As [`from_json`] and [`assign_addresses`].
pub fn assign_addresses_json(json: &str, config: &XzConfig) -> Result<String> {
    to_json(&assign_addresses(&from_json(json)?, config)?)
}

/// JSON in, JSON out: [`query_ranges`] on a serialized collection.
///
/// # Errors
///
/// As [`from_json`] and [`query_ranges`].
pub fn query_ranges_json(json: &str, config: &XzConfig) -> Result<String> {
    to_json(&query_ranges(&from_json(json)?, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use understory_xz::{Range, XzError};

    fn config() -> XzConfig {
        XzConfig::new().with_max_depth(4)
    }

    fn collection(value: Value) -> FeatureCollection {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn addresses_follow_request_order_and_echo_ids() {
        let request = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "whole", "geometry": {"type": "Polygon", "coordinates": [[
                    [-180, -90], [180, -90], [180, 90], [-180, 90], [-180, -90]
                ]]}},
                {"type": "Feature", "id": 2, "geometry": {"type": "Point", "coordinates": [90, 45]}},
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}},
                {"type": "Feature", "id": "none", "geometry": null}
            ]
        }));
        let response = assign_addresses(&request, &config()).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({"features": [
                {"id": "whole", "address": "0"},
                {"id": 2, "address": "3033"},
                {},
                {"id": "none"}
            ]})
        );
    }

    #[test]
    fn out_of_domain_feature_is_rejected() {
        let request: FeatureCollection = [
            Feature::new(Some("ok".into()), Geometry::point(0.0, 0.0)),
            Feature::new(Some("far".into()), Geometry::point(200.0, 0.0)),
        ]
        .into_iter()
        .collect();
        let err = assign_addresses(&request, &config()).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::Xz {
                index: 1,
                source: XzError::OutOfDomain { .. }
            }
        ));
    }

    #[test]
    fn empty_collection_and_bad_config_are_rejected() {
        let empty = FeatureCollection::default();
        assert!(matches!(
            assign_addresses(&empty, &config()),
            Err(FeatureError::EmptyCollection)
        ));
        let one: FeatureCollection = [Feature::new(None, Geometry::point(0.0, 0.0))]
            .into_iter()
            .collect();
        assert!(matches!(
            query_ranges(&one, &XzConfig::new().with_max_depth(0)),
            Err(FeatureError::Config(XzError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn malformed_geometry_names_the_feature() {
        let request = collection(json!({
            "features": [
                {"geometry": {"type": "Point", "coordinates": [1, 2]}},
                {"geometry": {"type": "Polygon", "coordinates": []}}
            ]
        }));
        assert!(matches!(
            assign_addresses(&request, &config()),
            Err(FeatureError::Geometry {
                index: 1,
                source: GeometryError::EmptyPolygon
            })
        ));
    }

    #[test]
    fn ranges_cover_indexed_features() {
        let indexed: FeatureCollection = [
            Feature::new(Some("berlin".into()), Geometry::point(13.4, 52.5)),
            Feature::new(Some("sydney".into()), Geometry::point(151.2, -33.9)),
        ]
        .into_iter()
        .collect();
        let addresses = assign_addresses(&indexed, &config()).unwrap();

        let europe = Geometry::rectangle(&BoundingBox::new(-10.0, 30.0, 35.0, 70.0));
        let query: FeatureCollection = [
            Feature::new(Some("europe".into()), europe),
            Feature::new(Some("line".into()), Geometry::LineString {
                coordinates: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
            }),
        ]
        .into_iter()
        .collect();
        let response = query_ranges(&query, &config()).unwrap();
        assert_eq!(response.features[0].id, Some("europe".into()));
        assert!(response.features[1].ranges.is_empty());

        let ranges: Vec<Range> = response.features[0]
            .ranges
            .iter()
            .map(|r| r.to_range().unwrap())
            .collect();
        let hit = |i: usize| {
            let address = addresses.features[i].address.as_ref().unwrap();
            ranges.iter().any(|r| r.contains(address))
        };
        assert!(hit(0), "berlin lies in the window");
        assert!(!hit(1), "sydney lies far outside the window");
    }

    #[test]
    fn point_query_yields_exact_ranges_on_the_wire() {
        let json = query_ranges_json(
            r#"{"features": [{"id": "p", "geometry": {"type": "Point", "coordinates": [45, 45]}}]}"#,
            &config(),
        )
        .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let ranges = value["features"][0]["ranges"].as_array().unwrap();
        assert_eq!(ranges[0], json!({"start": "", "end": ""}));
        assert!(ranges.iter().all(|r| r["start"] == r["end"]));
    }

    #[test]
    fn json_endpoints_report_parse_errors() {
        assert!(matches!(
            assign_addresses_json("{not json", &config()),
            Err(FeatureError::Json(_))
        ));
        let out = assign_addresses_json(
            r#"{"type": "FeatureCollection", "features": [{"id": "a", "geometry": {"type": "Point", "coordinates": [-180, -90]}}]}"#,
            &config(),
        )
        .unwrap();
        assert_eq!(out, r#"{"features":[{"id":"a","address":"0000"}]}"#);
    }

    #[test]
    fn coverage_feature_draws_the_decoded_box() {
        let address: Address = "3".parse().unwrap();
        let feature = coverage_feature(&address);
        assert_eq!(feature.id, Some(FeatureId::from("3")));
        let bbox = feature.geometry.as_ref().unwrap().bounding_box().unwrap();
        assert_eq!(bbox, BoundingBox::new(0.0, 360.0, 0.0, 180.0));
        let props = feature.properties.unwrap();
        assert_eq!(props["address"], "3");
        assert_eq!(props["depth"], 1);
    }
}
