//! Sponge Benchmarks
//!
//! Masked SHA3-256 throughput against the `sha3` crate.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keccak_dom::{hash_with, MaskPrng, Masking, MaskedHasher, Sha3Variant};
use rand::prelude::*;
use sha3::Digest;
use std::hint::black_box;

const KB: usize = 1024;

fn bench_sha3_256(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA3-256");

    let sizes = [(64, "64B"), (KB, "1KB"), (16 * KB, "16KB")];

    for (size, name) in sizes {
        let mut input = vec![0u8; size];
        rand::rng().fill(&mut input[..]);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("masked", name), &input, |b, data| {
            b.iter(|| hash_with(Sha3Variant::Sha3_256, black_box(data), MaskPrng::new(0)));
        });

        group.bench_with_input(BenchmarkId::new("unmasked", name), &input, |b, data| {
            b.iter(|| {
                let mut h = MaskedHasher::with_masking(
                    Sha3Variant::Sha3_256,
                    Masking::Disabled,
                    MaskPrng::new(0),
                );
                h.update(black_box(data));
                h.finalize()
            });
        });

        group.bench_with_input(BenchmarkId::new("sha3-crate", name), &input, |b, data| {
            b.iter(|| sha3::Sha3_256::digest(black_box(data)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sha3_256);
criterion_main!(benches);
