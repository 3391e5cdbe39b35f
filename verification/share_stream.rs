//! # `PractRand` Share Stream
//!
//! Writes one share of masked permutations of a fixed input to stdout.
//!
//! Each iteration re-splits the same state and runs a masked Keccak-f. If
//! the masking is sound the selected share is indistinguishable from random
//! bytes even though the underlying value never changes, so piping the
//! stream into `RNG_test stdin` should pass.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use keccak_dom::{MaskPrng, MaskSource, PermutationEngine, Session, Width};
use std::io::{self, Write};

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Share {
    /// Share 0
    Zero,
    /// Share 1
    One,
}

#[derive(Parser)]
#[command(name = "share_stream")]
#[command(about = "Stream masked-permutation shares for statistical batteries")]
struct Args {
    /// State width in bits
    #[arg(short, long, default_value_t = 1600)]
    width: usize,

    /// Rounds per permutation (defaults to every round of the width)
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Share to emit
    #[arg(long, value_enum, default_value_t = Share::Zero)]
    share: Share,

    /// Mask seed (defaults to entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Fixed input byte repeated over the state
    #[arg(long, default_value_t = 0)]
    fill: u8,
}

/// Entry point for the share stream generator.
fn main() -> Result<()> {
    let args = Args::parse();
    let width = Width::new(args.width)?;
    let rounds = args.rounds.unwrap_or_else(|| width.rounds());

    let masks = args.seed.map_or_else(MaskPrng::from_entropy, MaskPrng::new);
    let mut session = Session::new(PermutationEngine::masked(args.width)?, masks);

    let state = vec![args.fill; width.state_bytes()];
    let mut share1 = vec![0u8; width.state_bytes()];

    let stdout = io::stdout();
    let mut handle = io::BufWriter::new(stdout.lock());

    loop {
        session.source_mut().fill_masks(&mut share1);
        let share0: Vec<u8> = state.iter().zip(&share1).map(|(s, m)| s ^ m).collect();
        session.load(&share0, &share1)?;
        session
            .permute_rounds(rounds)
            .with_context(|| format!("{width} has fewer than {rounds} rounds"))?;

        let out = session.read();
        let bytes = match args.share {
            Share::Zero => &out.share0,
            Share::One => &out.share1,
        };
        // Only whole bytes; the last byte of the 50-bit state is partial.
        let whole = width.state_bits() / 8;
        if handle.write_all(&bytes[..whole]).is_err() {
            break;
        }
    }

    Ok(())
}
