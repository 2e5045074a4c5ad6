// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! XZ features.
//!
//! Run the two JSON operations on a small feature collection and print the
//! coverage polygon of one assigned address.
//!
//! Run:
//! - `RUST_LOG=warn cargo run -p understory_xz_demos --example xz_features`

use understory_xz::XzConfig;
use understory_xz_features::{
    assign_addresses, coverage_feature, from_json, query_ranges, to_json,
};

const REQUEST: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "id": "berlin",
         "geometry": {"type": "Point", "coordinates": [13.4, 52.5]}},
        {"type": "Feature", "id": 17,
         "geometry": {"type": "Polygon", "coordinates": [[
             [-10, 35], [30, 35], [30, 70], [-10, 70], [-10, 35]
         ]]}},
        {"type": "Feature", "id": "route",
         "geometry": {"type": "LineString", "coordinates": [[0, 0], [10, 10]]}}
    ]
}"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = XzConfig::new().with_max_depth(6);
    let collection = from_json(REQUEST).unwrap();

    let addresses = assign_addresses(&collection, &config).unwrap();
    println!("addresses: {}", to_json(&addresses).unwrap());

    let ranges = query_ranges(&collection, &config).unwrap();
    for feature in &ranges.features {
        let id = feature.id.as_ref().map(ToString::to_string).unwrap_or_default();
        println!("ranges for {id}: {}", feature.ranges.len());
    }

    if let Some(address) = addresses.features[0].address.as_ref() {
        let coverage = coverage_feature(address);
        println!(
            "coverage of {address}: {}",
            serde_json::to_string_pretty(&coverage).unwrap()
        );
    }
}
