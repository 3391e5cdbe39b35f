//! Permute Command
//!
//! Keccak-p on a user-supplied state, masked or on the reference datapath.

use anyhow::{Context, Result};
use keccak_dom::{keccak_p, permute_masked, split_state, MaskPrng, Width};

/// Permute the hex-encoded `state` and print the recombined result.
pub fn permute_mode(
    state: &str,
    width: usize,
    rounds: Option<usize>,
    unmasked: bool,
    seed: Option<u64>,
    print_shares: bool,
) -> Result<()> {
    let width = Width::new(width)?;
    let rounds = rounds.unwrap_or_else(|| width.rounds());
    let bytes = hex::decode(state.trim()).context("State is not valid hex")?;

    if unmasked {
        if print_shares {
            anyhow::bail!("--shares needs the masked engine");
        }
        let out = keccak_p(&bytes, width.state_bits(), rounds)?;
        println!("{}", hex::encode(out));
        return Ok(());
    }

    let mut masks = seed.map_or_else(MaskPrng::from_entropy, MaskPrng::new);
    let shares = split_state(&bytes, width.state_bits(), &mut masks)?;
    let out = permute_masked(&shares, width.state_bits(), rounds, &mut masks)
        .with_context(|| format!("Masked {width} failed"))?;

    let combined: Vec<u8> = out
        .share0
        .iter()
        .zip(&out.share1)
        .map(|(a, b)| a ^ b)
        .collect();
    println!("{}", hex::encode(combined));
    if print_shares {
        println!("share0: {}", hex::encode(&out.share0));
        println!("share1: {}", hex::encode(&out.share1));
    }

    Ok(())
}
