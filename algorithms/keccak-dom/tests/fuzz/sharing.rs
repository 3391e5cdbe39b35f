use bolero::check;
use keccak_dom::{keccak_p, permute_masked, split_state, verify_state, MaskPrng};

const WIDTHS: [usize; 6] = [50, 100, 200, 400, 800, 1600];

#[test]
fn fuzz_masked_matches_reference() {
    check!()
        .with_type::<(u64, u8, u8, Vec<u8>)>()
        .for_each(|(seed, width_sel, rounds_sel, data)| {
            let width = WIDTHS[usize::from(*width_sel) % WIDTHS.len()];
            let bytes = width.div_ceil(8);
            let rounds = usize::from(*rounds_sel) % 4;

            // Pad or truncate the input to one state, then clear padding bits.
            let mut state = vec![0u8; bytes];
            for (dst, src) in state.iter_mut().zip(data.iter()) {
                *dst = *src;
            }
            if width % 8 != 0 {
                state[bytes - 1] &= (1u8 << (width % 8)) - 1;
            }

            let mut masks = MaskPrng::new(*seed);
            let shares = split_state(&state, width, &mut masks).unwrap();
            assert!(verify_state(&shares, &state), "split does not recombine");

            let out = permute_masked(&shares, width, rounds, &mut masks).unwrap();
            let expected = keccak_p(&state, width, rounds).unwrap();
            assert!(
                verify_state(&out, &expected),
                "masked Keccak-p[{width}, {rounds}] mismatch"
            );
        });
}
