// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! XZ ordered store.
//!
//! Index named boxes in a `BTreeMap` keyed by address and answer a window
//! query with range scans, refining candidates by their exact boxes.
//!
//! Run:
//! - `RUST_LOG=understory_xz=trace cargo run -p understory_xz_demos --example xz_ordered_store`

use std::collections::BTreeMap;

use understory_xz::{BoundingBox, XzConfig, decompose, encode};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = XzConfig::new().with_max_depth(10).with_range_limit(10_000);
    let places = [
        ("harbor", BoundingBox::new(0.10, 0.12, 0.30, 0.31)),
        ("field", BoundingBox::new(0.20, 0.40, 0.20, 0.25)),
        ("lake", BoundingBox::new(-0.50, -0.45, 0.60, 0.66)),
        ("tower", BoundingBox::point(0.15, 0.28)),
        ("ridge", BoundingBox::new(-0.05, 0.05, -0.90, 0.90)),
    ];

    let mut store: BTreeMap<String, Vec<(&str, BoundingBox)>> = BTreeMap::new();
    for (name, bbox) in places {
        let address = encode(&bbox, &config).unwrap();
        println!("{name:>6} -> {address}");
        store.entry(address.into()).or_default().push((name, bbox));
    }

    let window = BoundingBox::new(0.0, 0.2, 0.25, 0.35);
    let ranges = decompose(&window, &config).unwrap();
    let mut candidates = Vec::new();
    for range in &ranges {
        for (_, entries) in store.range(range.scan_bounds()) {
            candidates.extend(entries.iter().copied());
        }
    }
    let hits: Vec<&str> = candidates
        .iter()
        .filter(|(_, bbox)| bbox.intersects(&window))
        .map(|(name, _)| *name)
        .collect();
    println!(
        "window {window:?}: {} ranges, {} candidates, hits {hits:?}",
        ranges.len(),
        candidates.len()
    );
}
