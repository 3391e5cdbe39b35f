use bolero::check;
use keccak_dom::{keccak_f, permute_masked, split_state, verify_digest, verify_state, MaskPrng};

#[test]
fn fuzz_verification_logic() {
    check!()
        .with_type::<(u64, Vec<u8>)>()
        .for_each(|(seed, data)| {
            let mut state = [0u8; 25];
            for (dst, src) in state.iter_mut().zip(data.iter()) {
                *dst = *src;
            }

            // =============================================================================
            // POSITIVE TEST
            // =============================================================================

            let mut masks = MaskPrng::new(*seed);
            let shares = split_state(&state, 200, &mut masks).unwrap();
            let out = permute_masked(&shares, 200, 18, &mut masks).unwrap();
            let expected = keccak_f(&state, 200).unwrap();
            assert!(verify_state(&out, &expected), "verify_state() failed on correct output");

            // =============================================================================
            // NEGATIVE TESTS (CORRUPTION)
            // =============================================================================

            // 1. Share Corruption
            let idx = data.len() % 25;
            let mut corrupted = out.clone();
            corrupted.share1[idx] ^= 0x01;
            assert!(
                !verify_state(&corrupted, &expected),
                "verify_state() succeeded on a corrupted share"
            );

            // 2. Expected Value Corruption
            let mut bad = expected.clone();
            bad[idx] ^= 0x80;
            assert!(
                !verify_state(&out, &bad),
                "verify_state() succeeded on a corrupted reference"
            );

            // 3. Digest Comparison
            assert!(verify_digest(&expected, &expected));
            assert!(!verify_digest(&expected, &bad));
        });
}
