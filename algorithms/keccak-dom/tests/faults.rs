//! Fault Injection Tests
//!
//! Corrupts shares or multiplier registers in the middle of a permutation
//! and checks what reaches the output.

#![cfg(feature = "fault-injection")]
#![allow(clippy::unwrap_used)]

use keccak_dom::{
    keccak_f, split_state, verify_state, Fault, MaskPrng, PermutationEngine, Session, Share,
};

fn session_with_state(state: &[u8], seed: u64) -> Session<MaskPrng> {
    let mut masks = MaskPrng::new(seed);
    let shares = split_state(state, 1600, &mut masks).unwrap();
    let mut session = Session::new(PermutationEngine::masked(1600).unwrap(), masks);
    session.load(&shares.share0, &shares.share1).unwrap();
    session
}

fn finish(session: &mut Session<MaskPrng>, from: usize) {
    for round in from..24 {
        session.round(round).unwrap();
    }
}

#[test]
fn test_single_share_fault_reaches_output() {
    let state: Vec<u8> = (0..200u8).collect();
    let expected = keccak_f(&state, 1600).unwrap();

    let mut session = session_with_state(&state, 1);
    finish(&mut session, 0);
    assert!(verify_state(&session.read(), &expected));

    let mut faulty = session_with_state(&state, 1);
    for round in 0..12 {
        faulty.round(round).unwrap();
    }
    faulty.engine_mut().inject_fault(Fault::Lane {
        share: Share::Zero,
        x: 1,
        y: 1,
        delta: 1,
    });
    finish(&mut faulty, 12);
    assert!(!verify_state(&faulty.read(), &expected));
}

#[test]
fn test_fault_in_both_shares_is_invisible() {
    // Masking is not a fault countermeasure: the same flip in both shares
    // leaves the shared value unchanged.
    let state = [0x5Au8; 200];
    let expected = keccak_f(&state, 1600).unwrap();
    let mut session = session_with_state(&state, 2);
    for round in 0..5 {
        session.round(round).unwrap();
    }
    for share in Share::ALL {
        session.engine_mut().inject_fault(Fault::Lane {
            share,
            x: 3,
            y: 2,
            delta: 0xDEAD_BEEF,
        });
    }
    finish(&mut session, 5);
    assert!(verify_state(&session.read(), &expected));
}

#[test]
fn test_register_fault_between_rounds_is_overwritten() {
    // Registers are relatched on cycle 1 before the next write.
    let state = [0u8; 200];
    let expected = keccak_f(&state, 1600).unwrap();
    let mut session = session_with_state(&state, 3);
    for round in 0..8 {
        session.round(round).unwrap();
    }
    session.engine_mut().inject_fault(Fault::DomRegister {
        row: 2,
        domain: Share::One,
        inner: [u64::MAX; 5],
        cross: [u64::MAX; 5],
    });
    finish(&mut session, 8);
    assert!(verify_state(&session.read(), &expected));
}
