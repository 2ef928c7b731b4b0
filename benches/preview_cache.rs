// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the scrub preview cache.
//!
//! Measures the performance of:
//! - Cache hits while the pointer sweeps a warmed scrub bar
//! - A miss followed by capture completion and thumbnail scaling
//! - Time formatting for the hover label

use criterion::{criterion_group, criterion_main, Criterion};
use scrub_player::infrastructure::SimulatedCapture;
use scrub_player::player::{format_hms, PreviewCache, PreviewSettings};
use std::hint::black_box;

const DURATION_SECS: f64 = 600.0;

/// Builds a cache whose pre-warm sweep has fully settled.
fn warmed_cache() -> PreviewCache {
    let capture = SimulatedCapture::new();
    let mut cache = PreviewCache::new(PreviewSettings::default(), Some(Box::new(capture.clone())));
    cache.load_source("bench.mp4");
    cache.prewarm(DURATION_SECS);
    while let Some(event) = capture.complete_next() {
        cache.handle_event(event);
    }
    cache
}

/// Benchmark hover lookups that all hit the cache.
fn bench_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("preview_cache");
    let mut cache = warmed_cache();

    group.bench_function("hit_sweep", |b| {
        b.iter(|| {
            for secs in (0..600).step_by(10) {
                black_box(cache.request_preview(f64::from(secs) + 0.4));
            }
        });
    });

    group.finish();
}

/// Benchmark a cold request through to a stored thumbnail.
///
/// Includes the frame downscale, which dominates the cost.
fn bench_miss_and_complete(c: &mut Criterion) {
    let mut group = c.benchmark_group("preview_cache");

    group.bench_function("miss_then_complete", |b| {
        b.iter(|| {
            let capture = SimulatedCapture::new();
            let mut cache =
                PreviewCache::new(PreviewSettings::default(), Some(Box::new(capture.clone())));
            cache.load_source("bench.mp4");
            cache.request_preview(black_box(42.5));
            while let Some(event) = capture.complete_next() {
                cache.handle_event(event);
            }
            black_box(cache.active_preview().map(|thumbnail| thumbnail.width()));
        });
    });

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("preview_cache");

    group.bench_function("format_hms", |b| {
        b.iter(|| {
            black_box(format_hms(black_box(3725.4)));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_hits, bench_miss_and_complete, bench_format);
criterion_main!(benches);
