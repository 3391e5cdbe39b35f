#![no_main]

use keccak_dom::{keccak_p, permute_masked, split_state, verify_state, MaskPrng};
use libfuzzer_sys::fuzz_target;

const WIDTHS: [usize; 6] = [50, 100, 200, 400, 800, 1600];

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    // Byte 0 picks the width, byte 1 the round count, bytes 2..10 the seed.
    if data.len() < 10 {
        return;
    }
    let width = WIDTHS[data[0] as usize % WIDTHS.len()];
    let bytes = width.div_ceil(8);
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&data[2..10]);
    let mut masks = MaskPrng::new(u64::from_le_bytes(seed));

    let mut state = vec![0u8; bytes];
    for (dst, src) in state.iter_mut().zip(&data[10..]) {
        *dst = *src;
    }
    if width % 8 != 0 {
        state[bytes - 1] &= (1u8 << (width % 8)) - 1;
    }

    let max_rounds = 12 + 2 * (width / 25).trailing_zeros() as usize;
    let rounds = data[1] as usize % (max_rounds + 1);

    // =============================================================================
    // MASKED VS REFERENCE
    // =============================================================================

    let shares = split_state(&state, width, &mut masks).unwrap();
    let out = permute_masked(&shares, width, rounds, &mut masks).unwrap();
    let expected = keccak_p(&state, width, rounds).unwrap();

    assert!(
        verify_state(&out, &expected),
        "masked Keccak-p[{width}, {rounds}] differs from the reference"
    );
});
