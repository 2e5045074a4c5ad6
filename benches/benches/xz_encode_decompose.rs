// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_xz::{BoundingBox, XzConfig, decode, decompose, encode, ranges};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Random boxes in the normalized domain, each side at most `max_extent`.
fn gen_random_boxes(count: usize, max_extent: f64, seed: u64) -> Vec<BoundingBox> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let w = rng.next_f64() * max_extent;
        let h = rng.next_f64() * max_extent;
        let x0 = -1.0 + rng.next_f64() * (2.0 - w);
        let y0 = -1.0 + rng.next_f64() * (2.0 - h);
        out.push(BoundingBox::new(x0, x0 + w, y0, y0 + h));
    }
    out
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("xz_encode");
    let points = gen_random_boxes(10_000, 0.0, 1);
    let small = gen_random_boxes(10_000, 0.01, 2);
    let config = XzConfig::default();
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("points_depth20", |b| {
        b.iter(|| {
            for bbox in &points {
                black_box(encode(bbox, &config).ok());
            }
        })
    });
    group.bench_function("small_boxes_depth20", |b| {
        b.iter(|| {
            for bbox in &small {
                black_box(encode(bbox, &config).ok());
            }
        })
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("xz_decode");
    let config = XzConfig::default();
    let addresses: Vec<_> = gen_random_boxes(10_000, 0.0, 3)
        .iter()
        .filter_map(|bbox| encode(bbox, &config).ok())
        .collect();
    group.throughput(Throughput::Elements(addresses.len() as u64));
    group.bench_function("depth20", |b| {
        b.iter(|| {
            for address in &addresses {
                black_box(decode(address));
            }
        })
    });
    group.finish();
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("xz_decompose");
    let window = BoundingBox::new(-0.3, 0.2, 0.1, 0.45);
    for &depth in &[6_u8, 8, 10] {
        let config = XzConfig::new().with_max_depth(depth);
        group.bench_function(format!("window_depth{}", depth), |b| {
            b.iter(|| black_box(decompose(&window, &config).map(|r| r.len())))
        });
    }

    // Full depth only pays off lazily; take a fixed prefix of the stream.
    let config = XzConfig::default();
    group.bench_function("lazy_first_1000_depth20", |b| {
        b.iter(|| black_box(ranges(&window, &config).map(|it| it.take(1000).count())))
    });
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_decompose);
criterion_main!(benches);
