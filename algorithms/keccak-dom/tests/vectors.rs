//! Known-Answer Vectors for keccak-dom
//!
//! Checks the masked sponge and the masked permutation against the JSON
//! vectors in `tests/test_vectors.json`.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use keccak_dom::{
    MaskPrng, MaskedHasher, Masking, PermutationEngine, Session, Sha3Variant, ZERO_BOX,
};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;

#[derive(Deserialize)]
struct SpongeVector {
    name: String,
    variant: String,
    input: String,
    output: String,
}

#[derive(Deserialize)]
struct Lane {
    x: usize,
    y: usize,
    value: String,
}

#[derive(Deserialize)]
struct PermutationVector {
    name: String,
    width: usize,
    input: String,
    lanes: Vec<Lane>,
}

#[derive(Deserialize)]
struct TestVectors {
    sponge: Vec<SpongeVector>,
    permutation: Vec<PermutationVector>,
}

fn load() -> TestVectors {
    let file = File::open("tests/test_vectors.json").expect("Failed to open test_vectors.json");
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).expect("Failed to parse JSON")
}

#[test]
fn test_sponge_vectors() {
    println!("\n=== Verifying Sponge Vectors ===");
    for vector in load().sponge {
        let variant = Sha3Variant::from_name(&vector.variant).expect("unknown variant");
        let expected = hex::decode(&vector.output).unwrap();

        for masking in [Masking::Enabled, Masking::Disabled] {
            let mut hasher = MaskedHasher::with_masking(variant, masking, MaskPrng::new(0xC0FFEE));
            hasher.update(vector.input.as_bytes());
            let mut out = vec![0u8; expected.len()];
            hasher.finalize_into(&mut out).unwrap();
            assert_eq!(
                hex::encode(&out),
                vector.output,
                "Vector mismatched: {} ({masking:?})",
                vector.name
            );
        }
        println!("ok {:<20} | {}", vector.name, vector.output);
    }
    println!("================================\n");
}

#[test]
fn test_permutation_vectors() {
    for vector in load().permutation {
        assert_eq!(vector.input, "ZERO", "only zero-state vectors are defined");
        let engine = PermutationEngine::masked(vector.width).unwrap();
        let mut session = Session::new(engine, MaskPrng::new(17));

        // Zero state split as (whole, zero).
        session.load_box([ZERO_BOX, ZERO_BOX]);
        session.permute();
        let out = session.engine().combined();

        for lane in &vector.lanes {
            let expected = u64::from_str_radix(&lane.value, 16).unwrap();
            assert_eq!(
                out[lane.x][lane.y], expected,
                "{}: lane ({}, {})",
                vector.name, lane.x, lane.y
            );
        }
    }
}
