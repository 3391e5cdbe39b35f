#![no_main]

use keccak_dom::{hash_with, MaskPrng, MaskedHasher, Sha3Variant};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // Byte 0 picks the variant, byte 1 the chunk size (1 to 255).
    let variant = Sha3Variant::ALL[data[0] as usize % Sha3Variant::ALL.len()];
    let chunk_size = (data[1] as usize % 255) + 1;
    let msg = &data[2..];

    // One-shot reference
    let reference = hash_with(variant, msg, MaskPrng::new(0));

    // Streaming with different masks and arbitrary chunking
    let mut hasher = MaskedHasher::new(variant, MaskPrng::new(1));
    for chunk in msg.chunks(chunk_size) {
        hasher.update(chunk);
    }
    let streaming = hasher.finalize();

    // They must be identical
    assert_eq!(
        reference, streaming,
        "Streaming and one-shot {variant} differ!"
    );
});
