//! Session Runner
//!
//! Drives a [`PermutationEngine`] through whole rounds, generating the
//! control words and pulling fresh randomness from a [`MaskSource`].

use crate::engine::permutation::PermutationEngine;
use crate::kernels::reference::first_round;
use crate::masks::MaskSource;
use crate::types::{Control, Cycle, Error, Masking, Phase, Shares, StateBox, Width};

/// Fresh randomness per round at the widest state (`1600 / 16` bytes).
const MAX_RANDOM_BYTES: usize = Width::F1600.random_bytes();

/// An engine bound to a mask source.
#[derive(Debug, Clone)]
pub struct Session<S> {
    engine: PermutationEngine,
    source: S,
    fresh: [u8; MAX_RANDOM_BYTES],
}

impl<S: MaskSource> Session<S> {
    /// Wrap an engine; `source` supplies the cycle-1 masks of every round.
    pub const fn new(engine: PermutationEngine, source: S) -> Self {
        Self {
            engine,
            source,
            fresh: [0; MAX_RANDOM_BYTES],
        }
    }

    /// Load two packed shares.
    ///
    /// # Errors
    /// Returns `Error::StateLength` on a share of the wrong size.
    pub fn load(&mut self, share0: &[u8], share1: &[u8]) -> Result<(), Error> {
        self.engine.load(share0, share1)
    }

    /// Load two lane boxes.
    pub fn load_box(&mut self, shares: [StateBox; 2]) {
        self.engine.load_box(shares);
    }

    /// Run round `round`: four ticks masked, one unmasked.
    ///
    /// # Errors
    /// Returns `Error::RoundOutOfRange` if `round >= width.rounds()`.
    pub fn round(&mut self, round: usize) -> Result<(), Error> {
        self.round_observed(round, |_, _| {})
    }

    /// Run round `round`, calling `observe` after every tick.
    ///
    /// # Errors
    /// Returns `Error::RoundOutOfRange` if `round >= width.rounds()`.
    pub fn round_observed<F>(&mut self, round: usize, mut observe: F) -> Result<(), Error>
    where
        F: FnMut(&PermutationEngine, Control),
    {
        let rounds = self.engine.width().rounds();
        if round >= rounds {
            return Err(Error::RoundOutOfRange { round, rounds });
        }
        self.run_round(round, &mut observe);
        Ok(())
    }

    fn run_round<F>(&mut self, round: usize, observe: &mut F)
    where
        F: FnMut(&PermutationEngine, Control),
    {
        if self.engine.masking() == Masking::Disabled {
            let control = Control::new(round, Phase::Linear, Cycle::C0);
            self.engine.advance(control, &[]);
            observe(&self.engine, control);
            return;
        }

        let n = self.engine.width().random_bytes();
        for cycle in Cycle::ALL {
            let phase = if cycle == Cycle::C0 {
                Phase::Linear
            } else {
                Phase::Nonlinear
            };
            let control = Control::new(round, phase, cycle);
            if cycle == Cycle::C1 {
                self.source.fill_masks(&mut self.fresh[..n]);
                self.engine.advance(control, &self.fresh[..n]);
            } else {
                self.engine.advance(control, &[]);
            }
            observe(&self.engine, control);
        }
    }

    /// Keccak-f: every round of the width.
    pub fn permute(&mut self) {
        let mut observe = |_: &PermutationEngine, _: Control| {};
        self.engine.restart_schedule();
        for round in 0..self.engine.width().rounds() {
            self.run_round(round, &mut observe);
        }
    }

    /// Keccak-p: the last `rounds` rounds of Keccak-f.
    ///
    /// # Errors
    /// Returns `Error::RoundCount` if `rounds` exceeds `width.rounds()`.
    pub fn permute_rounds(&mut self, rounds: usize) -> Result<(), Error> {
        self.permute_rounds_observed(rounds, |_, _| {})
    }

    /// Keccak-p with a per-tick observer.
    ///
    /// # Errors
    /// Returns `Error::RoundCount` if `rounds` exceeds `width.rounds()`.
    pub fn permute_rounds_observed<F>(&mut self, rounds: usize, mut observe: F) -> Result<(), Error>
    where
        F: FnMut(&PermutationEngine, Control),
    {
        let width = self.engine.width();
        let first = first_round(width, rounds)?;
        self.engine.restart_schedule();
        for round in first..width.rounds() {
            self.run_round(round, &mut observe);
        }
        Ok(())
    }

    /// Current packed shares.
    pub fn read(&self) -> Shares {
        self.engine.read()
    }

    /// The wrapped engine.
    pub const fn engine(&self) -> &PermutationEngine {
        &self.engine
    }

    /// Mutable access to the wrapped engine.
    pub const fn engine_mut(&mut self) -> &mut PermutationEngine {
        &mut self.engine
    }

    /// Mutable access to the mask source.
    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Release the engine and the source.
    pub fn into_parts(self) -> (PermutationEngine, S) {
        (self.engine, self.source)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::kernels::reference;
    use crate::masks::{MaskFn, MaskPrng};
    use crate::types::ZERO_BOX;

    #[test]
    fn zero_state_known_answer_through_masked_session() {
        let engine = PermutationEngine::masked(1600).unwrap();
        let mut session = Session::new(engine, MaskPrng::new(1));
        session.load_box([ZERO_BOX, ZERO_BOX]);
        session.permute();
        let out = session.engine().combined();
        assert_eq!(out[0][0], 0xF125_8F79_40E1_DDE7);
        assert_eq!(out[1][0], 0x84D5_CCF9_33C0_478A);
    }

    #[test]
    fn masked_equals_unmasked_for_every_round_count() {
        let width = Width::new(200).unwrap();
        let mut state = ZERO_BOX;
        state[1][2] = 0xA5;
        state[4][4] = 0x3C;
        for rounds in 0..=width.rounds() {
            let mut masked = Session::new(
                PermutationEngine::new(width, Masking::Enabled).unwrap(),
                MaskPrng::new(rounds as u64),
            );
            let mut plain = Session::new(
                PermutationEngine::new(width, Masking::Disabled).unwrap(),
                MaskPrng::new(0),
            );
            masked.load_box([state, ZERO_BOX]);
            plain.load_box([state, ZERO_BOX]);
            masked.permute_rounds(rounds).unwrap();
            plain.permute_rounds(rounds).unwrap();

            let mut expected = state;
            reference::keccak_p(&mut expected, width, rounds).unwrap();
            assert_eq!(masked.engine().combined(), expected, "rounds={rounds}");
            assert_eq!(plain.engine().combined(), expected, "rounds={rounds}");
        }
    }

    #[test]
    fn observer_sees_every_tick() {
        let width = Width::new(100).unwrap();
        let mut session = Session::new(
            PermutationEngine::new(width, Masking::Enabled).unwrap(),
            MaskPrng::new(5),
        );
        let mut ticks = Vec::new();
        session
            .permute_rounds_observed(2, |_, control| ticks.push(control))
            .unwrap();
        assert_eq!(ticks.len(), 8);
        assert_eq!(ticks[0], Control::new(14, Phase::Linear, Cycle::C0));
        assert_eq!(ticks[7], Control::new(15, Phase::Nonlinear, Cycle::C3));
    }

    #[test]
    fn source_is_called_once_per_masked_round() {
        let mut calls = 0usize;
        let source = MaskFn(|dest: &mut [u8]| {
            calls += 1;
            dest.fill(0x11);
        });
        let mut session = Session::new(PermutationEngine::masked(400).unwrap(), source);
        session.permute();
        drop(session);
        assert_eq!(calls, 20);
    }

    #[test]
    fn permute_after_single_round_starts_a_new_schedule() {
        let width = Width::F1600;
        let mut state = ZERO_BOX;
        state[0][0] = 0x0123_4567_89AB_CDEF;
        let mut session = Session::new(
            PermutationEngine::new(width, Masking::Enabled).unwrap(),
            MaskPrng::new(17),
        );
        session.load_box([state, ZERO_BOX]);
        session.round(0).unwrap();
        session.permute();
        session.permute_rounds(12).unwrap();

        let mut expected = reference::round(&state, 0, width);
        reference::keccak_p(&mut expected, width, 24).unwrap();
        reference::keccak_p(&mut expected, width, 12).unwrap();
        assert_eq!(session.engine().combined(), expected);
    }

    #[test]
    fn too_many_rounds_rejected() {
        let mut session = Session::new(PermutationEngine::masked(50).unwrap(), MaskPrng::new(0));
        assert_eq!(
            session.permute_rounds(15),
            Err(Error::RoundCount {
                requested: 15,
                rounds: 14
            })
        );
    }
}
