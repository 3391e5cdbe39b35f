//! Generator for keccak-dom test vectors
//!
//! Generates the canonical JSON test vectors used by `tests/test_vectors.json`.
//! Every value is computed on the masked engine.
#![allow(clippy::unwrap_used)]
use keccak_dom::{hash_with, MaskPrng, PermutationEngine, Session, Sha3Variant, ZERO_BOX};
use serde_json::json;

fn main() {
    // =========================================================================
    // 1. SPONGE VECTORS
    // =========================================================================

    let mut sponge = Vec::new();
    let mut masks = MaskPrng::new(0x5EED);
    for variant in Sha3Variant::ALL {
        // SHAKE vectors are only published for the empty message.
        let inputs: &[&str] = if variant.is_xof() { &[""] } else { &["", "abc"] };
        for input in inputs {
            let label = if input.is_empty() { "empty" } else { input };
            let name = if variant.is_xof() {
                format!("{}_{label}_{}", variant.name(), variant.output_len())
            } else {
                format!("{}_{label}", variant.name().replace('-', "_"))
            };
            let output = hash_with(variant, input.as_bytes(), masks.fork(sponge.len() as u64));
            sponge.push(json!({
                "name": name,
                "variant": variant.name(),
                "input": input,
                "output": hex::encode(output)
            }));
        }
    }

    // =========================================================================
    // 2. PERMUTATION VECTORS
    // =========================================================================

    let mut session = Session::new(PermutationEngine::masked(1600).unwrap(), masks);
    session.load_box([ZERO_BOX, ZERO_BOX]);
    session.permute();
    let out = session.engine().combined();
    let lanes: Vec<_> = [(0usize, 0usize), (1, 0)]
        .into_iter()
        .map(|(x, y)| json!({ "x": x, "y": y, "value": format!("{:016x}", out[x][y]) }))
        .collect();
    let permutation = vec![json!({
        "name": "keccak_f1600_zero",
        "width": 1600,
        "input": "ZERO",
        "lanes": lanes
    })];

    let output = json!({ "sponge": sponge, "permutation": permutation });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
