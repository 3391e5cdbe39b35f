//! Leakage Assessment
//!
//! Fixed-vs-random Welch t-test (TVLA style) over simulated traces. A trace
//! is the Hamming weight of every lane of one probed value after every tick
//! of a session; each (tick, lane) pair is a sample point. Traces are split
//! into a fixed-input group and a random-input group by a coin flip, and a
//! point leaks at first order if `|t|` exceeds the threshold.
//!
//! Traces are collected in batches, one engine per batch, with each batch
//! seeded by forking the root generator, so the report is the same for any
//! thread count.

use rand_core::RngCore;

use crate::codec::to_box;
use crate::engine::parallel::{batch_ranges, BatchProcessor};
use crate::engine::{PermutationEngine, Session};
use crate::kernels::reference::first_round;
use crate::masks::{MaskPrng, MaskSource};
use crate::types::{Error, Masking, StateBox, Width, ZERO_BOX};

/// Traces per batch.
const BATCH_TRACES: usize = 256;

/// Lanes per state.
const LANES: usize = 25;

// =============================================================================
// WELCH ACCUMULATOR
// =============================================================================

/// Input group of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// The fixed input.
    Fixed,
    /// A uniformly random input.
    Random,
}

/// Running two-group mean and variance (Welford) for one sample point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Welch {
    count: [u64; 2],
    mean: [f64; 2],
    m2: [f64; 2],
}

impl Welch {
    /// Empty accumulator.
    pub const fn new() -> Self {
        Self {
            count: [0; 2],
            mean: [0.0; 2],
            m2: [0.0; 2],
        }
    }

    /// Add one observation to `group`.
    #[allow(clippy::cast_precision_loss)]
    pub fn add(&mut self, group: Group, value: f64) {
        let g = group as usize;
        self.count[g] += 1;
        let delta = value - self.mean[g];
        self.mean[g] += delta / self.count[g] as f64;
        self.m2[g] += delta * (value - self.mean[g]);
    }

    /// Fold another accumulator into this one (Chan et al.).
    #[allow(clippy::cast_precision_loss)]
    pub fn merge(&mut self, other: &Self) {
        for g in 0..2 {
            let (na, nb) = (self.count[g], other.count[g]);
            if nb == 0 {
                continue;
            }
            if na == 0 {
                self.count[g] = nb;
                self.mean[g] = other.mean[g];
                self.m2[g] = other.m2[g];
                continue;
            }
            let n = na + nb;
            let delta = other.mean[g] - self.mean[g];
            self.mean[g] += delta * nb as f64 / n as f64;
            self.m2[g] += other.m2[g] + delta * delta * (na as f64 * nb as f64) / n as f64;
            self.count[g] = n;
        }
    }

    /// Observations per group.
    pub const fn count(&self, group: Group) -> u64 {
        self.count[group as usize]
    }

    /// Sample mean of `group`.
    pub const fn mean(&self, group: Group) -> f64 {
        self.mean[group as usize]
    }

    /// Unbiased sample variance of `group`.
    #[allow(clippy::cast_precision_loss)]
    pub fn variance(&self, group: Group) -> f64 {
        let g = group as usize;
        if self.count[g] < 2 {
            0.0
        } else {
            self.m2[g] / (self.count[g] - 1) as f64
        }
    }

    /// Welch's t statistic, fixed minus random.
    ///
    /// Zero when either group has fewer than two observations or both means
    /// coincide; infinite when the means differ with zero variance.
    #[allow(clippy::cast_precision_loss)]
    pub fn t(&self) -> f64 {
        if self.count.iter().any(|&n| n < 2) {
            return 0.0;
        }
        let diff = self.mean[0] - self.mean[1];
        let se = (self.variance(Group::Fixed) / self.count[0] as f64
            + self.variance(Group::Random) / self.count[1] as f64)
            .sqrt();
        if se > 0.0 {
            diff / se
        } else if diff == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(diff)
        }
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// What a trace records at every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Lane weights of share 0 of the masked engine.
    Share0,
    /// Lane weights of share 1 of the masked engine.
    Share1,
    /// Lane weights of the recombined masked state (leaks by construction).
    Combined,
    /// Lane weights of the unmasked engine's state (leaks by construction).
    Unmasked,
}

impl Probe {
    const fn masking(self) -> Masking {
        match self {
            Self::Unmasked => Masking::Disabled,
            _ => Masking::Enabled,
        }
    }
}

/// Parameters of one assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct LeakageConfig {
    /// State width.
    pub width: Width,
    /// Rounds run per trace (the last `rounds` of Keccak-f).
    pub rounds: usize,
    /// Number of traces, both groups together.
    pub traces: usize,
    /// Root seed for inputs, group choice and masks.
    pub seed: u64,
    /// `|t|` above which a point counts as leaking.
    pub threshold: f64,
    /// Input of the fixed group.
    pub fixed: StateBox,
}

impl Default for LeakageConfig {
    fn default() -> Self {
        Self {
            width: Width::F1600,
            rounds: 2,
            traces: 4000,
            seed: 0,
            threshold: 4.5,
            fixed: ZERO_BOX,
        }
    }
}

/// Outcome of an assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct LeakageReport {
    /// Probed value.
    pub probe: Probe,
    /// Traces collected.
    pub traces: usize,
    /// Threshold used.
    pub threshold: f64,
    /// `t` per sample point, tick-major then lane `5x + y`.
    pub t_values: Vec<f64>,
    /// Largest `|t|`.
    pub max_abs_t: f64,
    /// Index of the point with the largest `|t|`.
    pub worst_point: usize,
}

impl LeakageReport {
    /// Whether any point exceeds the threshold.
    pub fn leaks(&self) -> bool {
        self.max_abs_t > self.threshold
    }

    /// `(tick, x, y)` of the worst point.
    pub const fn worst_location(&self) -> (usize, usize, usize) {
        let lane = self.worst_point % LANES;
        (self.worst_point / LANES, lane / 5, lane % 5)
    }

    /// Points above the threshold.
    pub fn leaking_points(&self) -> usize {
        self.t_values
            .iter()
            .filter(|t| t.abs() > self.threshold)
            .count()
    }
}

// =============================================================================
// ASSESSMENT
// =============================================================================

/// Run the fixed-vs-random t-test for `probe`.
///
/// # Errors
/// Returns `Error::MaskingTooNarrow` for a masked probe at the 25-bit width
/// and `Error::RoundCount` if `config.rounds` exceeds the width's rounds.
pub fn assess(config: &LeakageConfig, probe: Probe) -> Result<LeakageReport, Error> {
    let engine = PermutationEngine::new(config.width, probe.masking())?;
    first_round(config.width, config.rounds)?;
    let points = config.rounds * engine.ticks_per_round() * LANES;
    let root = MaskPrng::new(config.seed);

    let ranges: Vec<_> = batch_ranges(config.traces, BATCH_TRACES).collect();
    let batches = (0..ranges.len()).process_batches(|b| {
        let mut rng = root.fork(b as u64);
        let mut acc = vec![Welch::new(); points];
        let mut session = Session::new(engine.clone(), rng.fork(0));
        for _ in ranges[b].clone() {
            collect_trace(config, probe, &mut session, &mut rng, &mut acc);
        }
        acc
    });

    let mut total = vec![Welch::new(); points];
    for batch in &batches {
        for (sum, part) in total.iter_mut().zip(batch) {
            sum.merge(part);
        }
    }

    let t_values: Vec<f64> = total.iter().map(Welch::t).collect();
    let (worst_point, max_abs_t) = t_values
        .iter()
        .map(|t| t.abs())
        .enumerate()
        .fold((0, 0.0), |best, (i, t)| if t > best.1 { (i, t) } else { best });

    Ok(LeakageReport {
        probe,
        traces: config.traces,
        threshold: config.threshold,
        t_values,
        max_abs_t,
        worst_point,
    })
}

fn collect_trace(
    config: &LeakageConfig,
    probe: Probe,
    session: &mut Session<MaskPrng>,
    rng: &mut MaskPrng,
    acc: &mut [Welch],
) {
    let width = config.width;
    let group = if rng.next_u64() & 1 == 0 {
        Group::Fixed
    } else {
        Group::Random
    };
    let input = match group {
        Group::Fixed => config.fixed,
        Group::Random => random_box(rng, width),
    };
    let mask = random_box(rng, width);
    session.load_box([xor(&input, &mask), mask]);

    let mut tick = 0;
    let observed = session.permute_rounds_observed(config.rounds, |engine, _| {
        let lanes = match probe {
            Probe::Share0 | Probe::Unmasked => engine.shares()[0],
            Probe::Share1 => engine.shares()[1],
            Probe::Combined => engine.combined(),
        };
        for (i, lane) in lanes.iter().flatten().enumerate() {
            acc[tick * LANES + i].add(group, f64::from(lane.count_ones()));
        }
        tick += 1;
    });
    debug_assert!(observed.is_ok(), "round count checked by assess");
}

fn random_box(rng: &mut MaskPrng, width: Width) -> StateBox {
    let mut bytes = [0u8; 200];
    rng.fill_masks(&mut bytes[..width.state_bytes()]);
    to_box(&bytes, width)
}

fn xor(a: &StateBox, b: &StateBox) -> StateBox {
    let mut out = *a;
    for (x, column) in out.iter_mut().enumerate() {
        for (y, lane) in column.iter_mut().enumerate() {
            *lane ^= b[x][y];
        }
    }
    out
}
