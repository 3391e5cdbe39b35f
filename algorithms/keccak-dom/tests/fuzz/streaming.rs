use bolero::check;
use keccak_dom::{hash_with, MaskPrng, MaskedHasher, Sha3Variant};

#[test]
fn fuzz_streaming_consistency() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        // =============================================================================
        // BASELINE (ONE-SHOT)
        // =============================================================================
        let expected = hash_with(Sha3Variant::Sha3_256, data, MaskPrng::new(0));

        // =============================================================================
        // STREAMING VARIATIONS
        // =============================================================================

        // 1. Single Update, different masks
        let mut hasher = MaskedHasher::new(Sha3Variant::Sha3_256, MaskPrng::new(1));
        hasher.update(data);
        assert_eq!(hasher.finalize(), expected, "Streaming single update mismatch");

        // 2. Byte-by-Byte (Small Inputs Only)
        if data.len() < 256 {
            let mut hasher = MaskedHasher::new(Sha3Variant::Sha3_256, MaskPrng::new(2));
            for b in data {
                hasher.update(&[*b]);
            }
            assert_eq!(hasher.finalize(), expected, "Byte-by-byte streaming mismatch");
        }

        // 3. Arbitrary Split Points
        if data.len() > 1 {
            for split_idx in [1, data.len() / 2, data.len() - 1] {
                let mut hasher = MaskedHasher::new(Sha3Variant::Sha3_256, MaskPrng::new(3));
                let (first, second) = data.split_at(split_idx);
                hasher.update(first);
                hasher.update(second);
                assert_eq!(hasher.finalize(), expected, "Split at {split_idx} mismatch");
            }
        }

        // 4. Masked input shares
        let mask: Vec<u8> = data.iter().map(|b| b.rotate_left(3) ^ 0xA5).collect();
        let share0: Vec<u8> = data.iter().zip(&mask).map(|(d, m)| d ^ m).collect();
        let mut hasher = MaskedHasher::new(Sha3Variant::Sha3_256, MaskPrng::new(4));
        hasher.update_shared(&share0, &mask).unwrap();
        assert_eq!(hasher.finalize(), expected, "Shared input mismatch");
    });
}

#[test]
fn fuzz_matches_sha3_crate() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        let ours = hash_with(Sha3Variant::Sha3_512, data, MaskPrng::new(9));
        let reference = <sha3::Sha3_512 as sha3::Digest>::digest(data);
        assert_eq!(ours, reference.as_slice());
    });
}
