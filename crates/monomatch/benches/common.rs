use std::time::Duration;

use criterion::{Criterion, Throughput};

/// Deck construction and sampling run in microseconds to a few milliseconds.
#[allow(dead_code)]
pub fn fast_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(30)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

/// Card renders take tens of milliseconds each.
#[allow(dead_code)]
pub fn render_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(10)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(8))
}

/// Throughput in cards or sample points per iteration.
#[allow(dead_code)]
pub fn items_throughput(items: usize) -> Throughput {
    Throughput::Elements(items.max(1) as u64)
}
