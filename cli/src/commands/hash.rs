//! Hash Command
//!
//! File hashing on the masked sponge, one file per Rayon task.

use anyhow::{Context, Result};
use clap::ValueEnum;
use keccak_dom::{MaskPrng, MaskedHasher, Sha3Variant};
use rayon::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Algorithm {
    /// SHA3-224
    #[value(name = "sha3-224")]
    Sha3_224,
    /// SHA3-256
    #[value(name = "sha3-256")]
    Sha3_256,
    /// SHA3-384
    #[value(name = "sha3-384")]
    Sha3_384,
    /// SHA3-512
    #[value(name = "sha3-512")]
    Sha3_512,
    /// SHAKE128 (32 bytes unless --length is given)
    Shake128,
    /// SHAKE256 (64 bytes unless --length is given)
    Shake256,
}

impl From<Algorithm> for Sha3Variant {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Sha3_224 => Self::Sha3_224,
            Algorithm::Sha3_256 => Self::Sha3_256,
            Algorithm::Sha3_384 => Self::Sha3_384,
            Algorithm::Sha3_512 => Self::Sha3_512,
            Algorithm::Shake128 => Self::Shake128,
            Algorithm::Shake256 => Self::Shake256,
        }
    }
}

/// Stream `path` through a masked hasher with fresh masks.
pub fn hash_file(path: &Path, variant: Sha3Variant, length: Option<usize>) -> Result<Vec<u8>> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;

    let mut hasher = MaskedHasher::new(variant, MaskPrng::from_entropy());
    let mut buffer = [0u8; 128 * 1024]; // 128 KB buffer

    loop {
        let n = file
            .read(&mut buffer)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let len = match length {
        Some(len) if variant.is_xof() => len,
        _ => variant.output_len(),
    };
    let mut out = vec![0u8; len];
    hasher.finalize_xof(&mut out);
    Ok(out)
}

/// Hash files in parallel and print `sha3sum`-style lines in input order.
pub fn hash_files(files: &[PathBuf], algo: Algorithm, length: Option<usize>) -> Result<()> {
    let variant = Sha3Variant::from(algo);
    if length.is_some() && !variant.is_xof() {
        anyhow::bail!("--length only applies to SHAKE128 and SHAKE256");
    }

    let results: Vec<_> = files
        .par_iter()
        .map(|path| (path, hash_file(path, variant, length)))
        .collect();

    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(digest) => println!("{}  {}", hex::encode(digest), path.display()),
            Err(e) => {
                eprintln!("Error: {}: {e:#}", path.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("Failed to hash {failed} file(s)");
    }

    Ok(())
}
