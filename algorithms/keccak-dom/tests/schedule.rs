//! Schedule Monitor Tests
//!
//! A mis-sequenced control stream is a caller bug; debug builds stop at the
//! first offending tick.

#![cfg(debug_assertions)]
#![allow(clippy::unwrap_used)]

use keccak_dom::{Control, Cycle, PermutationEngine, Phase};

fn engine() -> PermutationEngine {
    let mut engine = PermutationEngine::masked(1600).unwrap();
    engine.load(&[0u8; 200], &[0u8; 200]).unwrap();
    engine
}

#[test]
#[should_panic(expected = "cycle 3 followed cycle 1")]
fn test_skipped_cycle_panics() {
    let mut e = engine();
    let fresh = [0u8; 100];
    e.tick(Control::new(0, Phase::Linear, Cycle::C0), &[]).unwrap();
    e.tick(Control::new(0, Phase::Nonlinear, Cycle::C1), &fresh).unwrap();
    let _ = e.tick(Control::new(0, Phase::Nonlinear, Cycle::C3), &[]);
}

#[test]
#[should_panic(expected = "nonlinear phase held for 1 tick(s)")]
fn test_short_phase_pulse_panics() {
    let mut e = engine();
    e.tick(Control::new(0, Phase::Linear, Cycle::C0), &[]).unwrap();
    e.tick(Control::new(0, Phase::Nonlinear, Cycle::C1), &[0u8; 100]).unwrap();
    let _ = e.tick(Control::new(0, Phase::Linear, Cycle::C2), &[]);
}

#[test]
#[should_panic(expected = "expected round 0")]
fn test_round_change_mid_round_panics() {
    let mut e = engine();
    e.tick(Control::new(0, Phase::Linear, Cycle::C0), &[]).unwrap();
    let _ = e.tick(Control::new(1, Phase::Nonlinear, Cycle::C1), &[0u8; 100]);
}

#[test]
fn test_reload_forgets_history() {
    let mut e = engine();
    e.tick(Control::new(0, Phase::Linear, Cycle::C0), &[]).unwrap();
    e.load(&[0u8; 200], &[0u8; 200]).unwrap();
    // A fresh session may start at any round.
    e.tick(Control::new(20, Phase::Linear, Cycle::C0), &[]).unwrap();
}
