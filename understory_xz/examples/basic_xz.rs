// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory XZ: encode, decode, and decompose a window.

use understory_xz::{BoundingBox, XzConfig, decode, decompose, encode};

fn main() {
    let config = XzConfig::new().with_max_depth(6);

    let bbox = BoundingBox::new(0.1, 0.2, 0.3, 0.35);
    let address = encode(&bbox, &config).unwrap();
    println!("address of {:?}: {}", bbox, address);
    println!("coverage: {:?}", decode(&address));

    let window = BoundingBox::new(0.0, 0.25, 0.25, 0.5);
    let ranges = decompose(&window, &config).unwrap();
    let hit = ranges.iter().any(|r| r.contains(&address));
    println!("{} ranges, box found: {}", ranges.len(), hit);
}
