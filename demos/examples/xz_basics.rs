// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! XZ basics.
//!
//! Encode a few boxes, decode their addresses, and decompose a query window.
//!
//! Run:
//! - `cargo run -p understory_xz_demos --example xz_basics`

use kurbo::Point;
use understory_xz::{BoundingBox, XzConfig, bounding_box, decode, decompose, encode, normalize};

fn main() {
    let config = XzConfig::new().with_max_depth(8);

    // A small box around central Europe, given as lon/lat corners.
    let corners = [normalize(5.0, 45.0), normalize(15.0, 55.0), normalize(10.0, 50.0)];
    let europe = bounding_box(corners).unwrap();
    let address = encode(&europe, &config).unwrap();
    println!("europe {europe:?}");
    println!("  address {address} (depth {})", address.depth());
    println!("  covers  {:?}", decode(&address));

    // A single point goes as deep as the configuration allows.
    let point = normalize(-0.1, 51.5);
    let bbox = BoundingBox::point(point.x, point.y);
    println!("london  address {}", encode(&bbox, &config).unwrap());

    // A box straddling the center lands near the root.
    let center = bounding_box([Point::new(-0.01, -0.01), Point::new(0.01, 0.01)]).unwrap();
    println!("center  address {:?}", encode(&center, &config).unwrap().as_str());

    // Decompose a window; prefix ranges cover whole subtrees.
    let window = BoundingBox::new(0.0, 0.25, 0.5, 0.75);
    let ranges = decompose(&window, &XzConfig::new().with_max_depth(4)).unwrap();
    println!("window {window:?}: {} ranges", ranges.len());
    for range in ranges.iter().filter(|r| r.is_prefix()) {
        let wire = range.to_key_range();
        println!("  prefix {} .. {}", wire.start, wire.end);
    }
}
