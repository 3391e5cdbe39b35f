//! Check Command
//!
//! Verify checksums from file (like sha3sum -c).

use super::hash::{hash_file, Algorithm};
use anyhow::{Context, Result};
use keccak_dom::{verify_digest, Sha3Variant};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// =============================================================================
// CHECK
// =============================================================================

/// Verify checksums from a checksum file.
pub fn check_mode(checksum_file: &Path, algo: Algorithm) -> Result<()> {
    let file = File::open(checksum_file)
        .with_context(|| format!("Failed to open: {}", checksum_file.display()))?;
    let variant = Sha3Variant::from(algo);

    let reader = BufReader::new(file);
    let mut total = 0;
    let mut failed = 0;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Format: "hash  filename" (two spaces)
        let Some((expected_hex, file_path)) = line.split_once("  ") else {
            eprintln!("Warning: Invalid format: {line}");
            continue;
        };
        let file_path = file_path.trim();
        total += 1;

        let Ok(expected) = hex::decode(expected_hex.trim()) else {
            println!("{file_path}: FAILED (malformed digest)");
            failed += 1;
            continue;
        };

        // SHAKE lines carry their own output length.
        let length = variant.is_xof().then_some(expected.len());
        match hash_file(Path::new(file_path), variant, length) {
            Ok(actual) if verify_digest(&actual, &expected) => println!("{file_path}: OK"),
            Ok(_) => {
                println!("{file_path}: FAILED");
                failed += 1;
            }
            Err(e) => {
                println!("{file_path}: FAILED ({e:#})");
                failed += 1;
            }
        }
    }

    println!();
    if failed == 0 {
        println!("All {total} checksums verified");
    } else {
        eprintln!("WARNING: {failed} of {total} checksums did NOT match");
        std::process::exit(1);
    }

    Ok(())
}
