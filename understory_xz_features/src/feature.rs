// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoJSON features and feature collections.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geometry::Geometry;

/// A feature identifier: GeoJSON allows either a string or a number.
///
/// Identifiers are echoed back verbatim in responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    /// A string identifier.
    String(String),
    /// A numeric identifier.
    Number(serde_json::Number),
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FeatureId {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for FeatureId {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<u64> for FeatureId {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// The `"type": "Feature"` tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    /// The only value.
    #[default]
    Feature,
}

/// The `"type": "FeatureCollection"` tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionTag {
    /// The only value.
    #[default]
    FeatureCollection,
}

/// A GeoJSON feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Type tag; optional on input.
    #[serde(rename = "type", default)]
    pub tag: FeatureTag,
    /// Optional identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    /// The geometry; GeoJSON allows `null`.
    pub geometry: Option<Geometry>,
    /// Free-form properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// A feature with the given identifier and geometry and no properties.
    pub fn new(id: Option<FeatureId>, geometry: Geometry) -> Self {
        Self {
            tag: FeatureTag::Feature,
            id,
            geometry: Some(geometry),
            properties: None,
        }
    }

    /// Attach a property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.to_owned(), value.into());
        self
    }
}

/// A GeoJSON feature collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Type tag; optional on input.
    #[serde(rename = "type", default)]
    pub tag: CollectionTag,
    /// The features, in request order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether there are no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            tag: CollectionTag::FeatureCollection,
            features: iter.into_iter().collect(),
        }
    }
}
