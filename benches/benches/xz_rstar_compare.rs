// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use std::collections::BTreeMap;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_xz::{BoundingBox, XzConfig, decompose, encode};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_boxes(n: usize) -> Vec<BoundingBox> {
    let cell = 2.0 / n as f64;
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = -1.0 + x as f64 * cell;
            let y0 = -1.0 + y as f64 * cell;
            out.push(BoundingBox::new(x0, x0 + cell, y0, y0 + cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[BoundingBox]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|b| Rectangle::from_corners([b.xmin, b.ymin], [b.xmax, b.ymax]))
        .collect()
}

/// An XZ-addressed ordered store: address to the boxes stored under it.
fn build_store(boxes: &[BoundingBox], config: &XzConfig) -> BTreeMap<String, Vec<u32>> {
    let mut store: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for (i, bbox) in boxes.iter().enumerate() {
        if let Ok(address) = encode(bbox, config) {
            store.entry(address.into()).or_default().push(i as u32);
        }
    }
    store
}

fn bench_xz_vs_rstar(c: &mut Criterion) {
    let mut group = c.benchmark_group("xz_vs_rstar");
    let config = XzConfig::new().with_max_depth(10);
    let window = BoundingBox::new(-0.2, 0.2, -0.2, 0.2);
    for &n in &[64usize, 128] {
        let boxes = gen_grid_boxes(n);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("xz_btree_build_query_n{}", n), |b| {
            b.iter(|| {
                let store = build_store(&boxes, &config);
                let mut hits = 0_usize;
                if let Ok(ranges) = decompose(&window, &config) {
                    for range in &ranges {
                        // Candidates only; a real store would refine by box.
                        hits += store
                            .range(range.scan_bounds())
                            .map(|(_, ids)| ids.len())
                            .sum::<usize>();
                    }
                }
                black_box(hits);
            })
        });

        let store = build_store(&boxes, &config);
        group.bench_function(format!("xz_btree_query_n{}", n), |b| {
            b.iter(|| {
                let hits: usize = decompose(&window, &config)
                    .map(|ranges| {
                        ranges
                            .iter()
                            .flat_map(|r| store.range(r.scan_bounds()))
                            .flat_map(|(_, ids)| ids.iter())
                            .filter(|&&id| boxes[id as usize].intersects(&window))
                            .count()
                    })
                    .unwrap_or(0);
                black_box(hits);
            })
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&boxes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [window.xmin, window.ymin],
                        [window.xmax, window.ymax],
                    );
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_xz_vs_rstar);
criterion_main!(benches);
