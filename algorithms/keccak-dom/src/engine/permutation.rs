//! Permutation Engine
//!
//! Holds the shared state and advances it one tick at a time under external
//! control. In masked mode a round takes four ticks:
//!
//! ```text
//! cycle 0  Linear     theta, rho, pi on each share, latched
//! cycle 1  Nonlinear  DOM registers <- low halves, fresh masks
//! cycle 2  Nonlinear  low half written (+ iota low); registers <- high halves, recycled masks
//! cycle 3  Nonlinear  high half written (+ iota high)
//! ```
//!
//! With masking disabled every tick is one complete unmasked round.

use crate::codec::{to_bits, to_box, write_box};
use crate::engine::chi::{unpack_masks, ChiEngine};
use crate::engine::iota::{self, Span};
#[cfg(debug_assertions)]
use crate::engine::scheduler::ScheduleMonitor;
use crate::engine::scheduler::{decode, writes_state};
use crate::kernels::linear::linear;
use crate::kernels::reference;
use crate::types::{
    Control, Cycle, Error, Masking, Phase, PhaseTag, Share, Shares, StateBox, Width, ZERO_BOX,
};
#[cfg(any(test, feature = "fault-injection"))]
use crate::types::HalfSheet;

/// Fault to inject between ticks.
#[cfg(any(test, feature = "fault-injection"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// XOR `delta` into lane `(x, y)` of share `share`.
    Lane {
        /// Share to corrupt.
        share: Share,
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Bits to flip.
        delta: u64,
    },
    /// Overwrite one domain of row `row`'s DOM multiplier registers.
    DomRegister {
        /// Multiplier row, `0..5`.
        row: usize,
        /// Share domain.
        domain: Share,
        /// Inner-product register.
        inner: HalfSheet,
        /// Resharing cross-term register.
        cross: HalfSheet,
    },
}

/// Two-share (or single-share) Keccak-f round engine.
#[derive(Debug, Clone)]
pub struct PermutationEngine {
    width: Width,
    masking: Masking,
    shares: [StateBox; 2],
    tag: PhaseTag,
    chi: ChiEngine,
    #[cfg(debug_assertions)]
    monitor: ScheduleMonitor,
}

impl PermutationEngine {
    /// Engine for `width` holding the all-zero state.
    ///
    /// # Errors
    /// Returns `Error::MaskingTooNarrow` when masking is requested for the
    /// 25-bit width, whose one-bit lanes cannot be split into halves.
    pub fn new(width: Width, masking: Masking) -> Result<Self, Error> {
        if masking == Masking::Enabled && !width.supports_masking() {
            return Err(Error::MaskingTooNarrow(width.state_bits()));
        }
        Ok(Self::build(width, masking))
    }

    /// Keccak-f[1600] engine; both masking modes exist at this width.
    pub fn keccak_f1600(masking: Masking) -> Self {
        Self::build(Width::F1600, masking)
    }

    fn build(width: Width, masking: Masking) -> Self {
        Self {
            width,
            masking,
            shares: [ZERO_BOX; 2],
            tag: PhaseTag::Loaded,
            chi: ChiEngine::new(),
            #[cfg(debug_assertions)]
            monitor: ScheduleMonitor::new(width.rounds()),
        }
    }

    /// Masked engine for a state width given in bits.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedWidth` or `Error::MaskingTooNarrow`.
    pub fn masked(state_width: usize) -> Result<Self, Error> {
        Self::new(Width::new(state_width)?, Masking::Enabled)
    }

    /// Single-share engine for a state width given in bits.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedWidth`.
    pub fn unmasked(state_width: usize) -> Result<Self, Error> {
        Self::new(Width::new(state_width)?, Masking::Disabled)
    }

    /// Start a session from two packed shares.
    ///
    /// With masking disabled the engine keeps `share0 ^ share1` as its single
    /// state.
    ///
    /// # Errors
    /// Returns `Error::StateLength` if either share is not
    /// `width.state_bytes()` long.
    pub fn load(&mut self, share0: &[u8], share1: &[u8]) -> Result<(), Error> {
        let expected = self.width.state_bytes();
        for share in [share0, share1] {
            if share.len() != expected {
                return Err(Error::StateLength {
                    expected,
                    actual: share.len(),
                });
            }
        }
        self.load_box([to_box(share0, self.width), to_box(share1, self.width)]);
        Ok(())
    }

    /// Start a session from two lane boxes.
    pub fn load_box(&mut self, shares: [StateBox; 2]) {
        let mask = self.width.lane_mask();
        let mut shares = shares;
        for share in &mut shares {
            for lane in share.iter_mut().flatten() {
                *lane &= mask;
            }
        }
        if self.masking == Masking::Disabled {
            let other = shares[1];
            for (x, column) in shares[0].iter_mut().enumerate() {
                for (y, lane) in column.iter_mut().enumerate() {
                    *lane ^= other[x][y];
                }
            }
            shares[1] = ZERO_BOX;
        }
        self.shares = shares;
        self.tag = PhaseTag::Loaded;
        self.chi.clear();
        #[cfg(debug_assertions)]
        self.monitor.reset();
    }

    /// Advance one tick and return the resulting shares.
    ///
    /// `fresh_random` is read only at masked cycle 1; other ticks accept any
    /// slice, including an empty one.
    ///
    /// # Errors
    /// Returns `Error::RoundOutOfRange` for a round index past the width's
    /// schedule and `Error::RandomnessLength` if cycle 1 gets other than
    /// `width.random_bytes()` bytes. A rejected tick leaves the engine as it
    /// was.
    ///
    /// # Panics
    /// Debug builds panic on a control sequence that breaks the four-cycle
    /// schedule.
    pub fn tick(&mut self, control: Control, fresh_random: &[u8]) -> Result<Shares, Error> {
        self.step(control, fresh_random)?;
        Ok(self.read())
    }

    /// Advance one tick without materializing the packed shares.
    ///
    /// # Errors
    /// Same as [`tick`](Self::tick).
    ///
    /// # Panics
    /// Same as [`tick`](Self::tick).
    pub fn step(&mut self, control: Control, fresh_random: &[u8]) -> Result<(), Error> {
        let rounds = self.width.rounds();
        if control.round >= rounds {
            return Err(Error::RoundOutOfRange {
                round: control.round,
                rounds,
            });
        }
        let wants_fresh = self.masking == Masking::Enabled
            && control.phase == Phase::Nonlinear
            && decode(control.cycle).fresh_randomness;
        let expected = self.width.random_bytes();
        if wants_fresh && fresh_random.len() != expected {
            return Err(Error::RandomnessLength {
                expected,
                actual: fresh_random.len(),
            });
        }
        self.advance(control, fresh_random);
        Ok(())
    }

    /// Let the next tick open a new permutation on the current shares.
    pub(crate) fn restart_schedule(&mut self) {
        #[cfg(debug_assertions)]
        self.monitor.reset();
    }

    /// Tick with a control word already checked against the width.
    pub(crate) fn advance(&mut self, control: Control, fresh_random: &[u8]) {
        match self.masking {
            Masking::Disabled => {
                self.shares[0] = reference::round(&self.shares[0], control.round, self.width);
                self.tag = PhaseTag::Phase2Output;
            }
            Masking::Enabled => {
                #[cfg(debug_assertions)]
                self.monitor.observe(control);
                match control.phase {
                    Phase::Linear => self.linear_tick(),
                    Phase::Nonlinear => self.nonlinear_tick(control, fresh_random),
                }
            }
        }
    }

    fn linear_tick(&mut self) {
        for share in &mut self.shares {
            *share = linear(share, self.width);
        }
        self.tag = PhaseTag::Phase1Output;
    }

    fn nonlinear_tick(&mut self, control: Control, fresh_random: &[u8]) {
        let ctl = decode(control.cycle);

        // Registers from the previous tick are written before they relatch.
        if writes_state(control.cycle) {
            let out_low = ctl.out_data_low();
            self.chi.write(&mut self.shares, out_low, self.width);
            let span = if out_low { Span::Low } else { Span::High };
            iota::inject(&mut self.shares[0], control.round, span, self.width);
            self.tag = if control.cycle == Cycle::C3 {
                PhaseTag::Phase2Output
            } else {
                PhaseTag::Phase2Partial
            };
        }

        if ctl.update_dom {
            let masks = if ctl.fresh_randomness {
                unpack_masks(fresh_random, self.width)
            } else {
                self.chi.recycled_masks()
            };
            self.chi
                .update(&self.shares, ctl.in_data_low, &masks, self.width);
        }
    }

    /// XOR packed public or pre-shared bytes into `share`, starting at flat
    /// bit 0. Bytes past the state are ignored.
    ///
    /// With masking disabled both shares land in the single state.
    pub fn absorb(&mut self, share: Share, bytes: &[u8]) {
        let delta = to_box(bytes, self.width);
        let target = match self.masking {
            Masking::Disabled => Share::Zero,
            Masking::Enabled => share,
        };
        for (x, column) in self.shares[target.index()].iter_mut().enumerate() {
            for (y, lane) in column.iter_mut().enumerate() {
                *lane ^= delta[x][y];
            }
        }
    }

    /// Current shares in packed flat form.
    pub fn read(&self) -> Shares {
        Shares {
            share0: to_bits(&self.shares[0], self.width),
            share1: to_bits(&self.shares[1], self.width),
        }
    }

    /// Current shares as lane boxes.
    pub const fn shares(&self) -> &[StateBox; 2] {
        &self.shares
    }

    /// XOR of the shares. Only for the public output boundary and tests.
    pub fn combined(&self) -> StateBox {
        let mut out = self.shares[0];
        for (x, column) in out.iter_mut().enumerate() {
            for (y, lane) in column.iter_mut().enumerate() {
                *lane ^= self.shares[1][x][y];
            }
        }
        out
    }

    /// Recombine only the lanes covering the first `out.len()` packed bytes
    /// and write those bytes to `out`.
    ///
    /// Lanes past the prefix stay shared. The sponge squeezes through this so
    /// the capacity is never unmasked. Bytes of `out` past the packed state
    /// are left untouched.
    pub fn combined_prefix(&self, out: &mut [u8]) {
        let mut prefix = ZERO_BOX;
        for index in 0..prefix_lanes(self.width, out.len()) {
            let (x, y) = (index % 5, index / 5);
            prefix[x][y] = self.shares[0][x][y] ^ self.shares[1][x][y];
        }
        write_box(&prefix, self.width, out);
    }

    /// Which transform produced the current state.
    pub const fn phase_tag(&self) -> PhaseTag {
        self.tag
    }

    /// State width.
    pub const fn width(&self) -> Width {
        self.width
    }

    /// Masking mode.
    pub const fn masking(&self) -> Masking {
        self.masking
    }

    /// Ticks per round in the current masking mode.
    pub const fn ticks_per_round(&self) -> usize {
        match self.masking {
            Masking::Disabled => crate::kernels::constants::UNMASKED_TICKS_PER_ROUND,
            Masking::Enabled => crate::kernels::constants::MASKED_TICKS_PER_ROUND,
        }
    }

    /// Corrupt a share lane or a DOM register between ticks.
    ///
    /// # Panics
    /// Panics if an index is out of range.
    #[cfg(any(test, feature = "fault-injection"))]
    pub fn inject_fault(&mut self, fault: Fault) {
        match fault {
            Fault::Lane { share, x, y, delta } => {
                self.shares[share.index()][x][y] ^= delta & self.width.lane_mask();
            }
            Fault::DomRegister {
                row,
                domain,
                inner,
                cross,
            } => self.chi.row_mut(row).force(domain.index(), inner, cross),
        }
    }
}

/// Lanes, in packed order `x + 5y`, that hold the first `bytes` bytes.
pub(crate) const fn prefix_lanes(width: Width, bytes: usize) -> usize {
    let bits = bytes * 8;
    let w = width.lane_bits() as usize;
    let lanes = bits.div_ceil(w);
    if lanes > 25 {
        25
    } else {
        lanes
    }
}
