mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use monomatch::layout::calibrate::calibrate;
use monomatch::sampling::{PoissonDiskSampling, UNIT_CENTER};

// Spacing multiplier over output dimension, as used by the renderer.
const SEPARATIONS: [f32; 4] = [128.0 / 1024.0, 128.0 / 2048.0, 128.0 / 4096.0, 64.0 / 4096.0];

fn sampling_poisson_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/poisson_disk");

    for &radius in &SEPARATIONS {
        let strategy = PoissonDiskSampling::new(radius);
        let expected = strategy.sample_seeded(0xBEEF).len();
        group.throughput(common::items_throughput(expected));

        let mut seed = 0xC0FFEE_u64;
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, _| {
            b.iter(|| {
                seed = seed.wrapping_add(1);
                let pts = strategy.sample_seeded(seed);
                black_box(pts.len());
            });
        });
    }

    group.finish();
}

fn calibration_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/calibrate");
    let radius = 128.0 / 4096.0;
    let points = PoissonDiskSampling::new(radius).sample_seeded(0xA11CE);

    for &required in &[3usize, 8, 14, 24, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(required), &required, |b, &required| {
            b.iter(|| {
                let cal = calibrate(&points, UNIT_CENTER, required, radius).expect("dense enough");
                black_box(cal.selected.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::fast_criterion();
    targets = sampling_poisson_benches, calibration_benches
}
criterion_main!(benches);
