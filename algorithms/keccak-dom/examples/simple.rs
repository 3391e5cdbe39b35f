//! keccak-dom Basic Example
//!
//! Minimal usage: `let digest = keccak_dom::sha3_256(&data);`

#![allow(clippy::pedantic, clippy::nursery)]

fn main() {
    // Masks are drawn from process entropy; the digest is the plain SHA3-256.
    let data = b"Hello, World!";
    let digest = keccak_dom::sha3_256(data);

    println!("Data:     {:?}", String::from_utf8_lossy(data));
    println!("SHA3-256: {}", hex::encode(digest));
}
