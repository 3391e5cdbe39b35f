//! Permutation Benchmarks
//!
//! Cost of the masked engine against the unmasked datapath and the `keccak`
//! crate, per width and per tick.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use keccak_dom::{
    Control, Cycle, MaskPrng, MaskSource, Masking, PermutationEngine, Phase, Session, Width,
    SUPPORTED_WIDTHS,
};
use std::hint::black_box;

// =============================================================================
// BENCHMARK 1: FULL PERMUTATION PER WIDTH
// =============================================================================

fn bench_widths(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Keccak-f");

    for bits in SUPPORTED_WIDTHS {
        let width = Width::new(bits).unwrap();
        if !width.supports_masking() {
            continue;
        }
        for masking in [Masking::Enabled, Masking::Disabled] {
            let mut session = Session::new(
                PermutationEngine::new(width, masking).unwrap(),
                MaskPrng::new(1),
            );
            let zeros = vec![0u8; width.state_bytes()];
            session.load(&zeros, &zeros).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{masking:?}"), bits),
                &width,
                |b, _| b.iter(|| black_box(&mut session).permute()),
            );
        }
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: REFERENCE COMPARISON
// =============================================================================

fn bench_reference(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Reference-F1600");

    let mut lanes = [0u64; 25];
    group.bench_function("keccak-crate", |b| {
        b.iter(|| keccak::f1600(black_box(&mut lanes)));
    });

    let state = [0u8; 200];
    group.bench_function("keccak-dom-reference", |b| {
        b.iter(|| keccak_dom::keccak_f(black_box(&state), 1600).unwrap());
    });
    group.finish();
}

// =============================================================================
// BENCHMARK 3: SINGLE TICKS
// =============================================================================

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Ticks-F1600");

    let mut engine = PermutationEngine::masked(1600).unwrap();
    let mut fresh = [0u8; 100];
    MaskPrng::new(2).fill_masks(&mut fresh);
    let controls = [
        Control::new(0, Phase::Linear, Cycle::C0),
        Control::new(0, Phase::Nonlinear, Cycle::C1),
        Control::new(0, Phase::Nonlinear, Cycle::C2),
        Control::new(0, Phase::Nonlinear, Cycle::C3),
    ];

    group.bench_function("round-of-steps", |b| {
        b.iter(|| {
            engine.load(&[0u8; 200], &[0u8; 200]).unwrap();
            for control in controls {
                engine.step(black_box(control), &fresh).unwrap();
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_widths, bench_reference, bench_ticks);
criterion_main!(benches);
