//! Leakage Assessment Benchmark
//!
//! Trace collection rate of the t-test, serial or on the Rayon pool
//! depending on the `multithread` feature.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use keccak_dom::leakage::{assess, LeakageConfig, Probe};
use keccak_dom::Width;

fn bench_assess(c: &mut Criterion) {
    let mut group = c.benchmark_group("Leakage");
    group.sample_size(10);

    for width in [Width::new(200).unwrap(), Width::F1600] {
        let config = LeakageConfig {
            width,
            rounds: 1,
            traces: 1024,
            ..LeakageConfig::default()
        };
        group.throughput(Throughput::Elements(config.traces as u64));
        group.bench_function(format!("share0-{}", width.state_bits()), |b| {
            b.iter(|| assess(&config, Probe::Share0).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_assess);
criterion_main!(benches);
