//! keccak-dom CLI
//!
//! Masked SHA-3 hashing, single permutations and first-order leakage
//! assessment from the command line.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check_mode, hash_files, leakage_mode, permute_mode, Algorithm, ProbeArg};
use std::path::PathBuf;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "keccak-dom")]
#[command(about = "Two-share DOM-masked Keccak-f: hashing, permutation and leakage tests", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash files on the masked engine (like sha3sum)
    Hash {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Hashing algorithm to use
        #[arg(short, long, value_enum, default_value_t = Algorithm::Sha3_256)]
        algo: Algorithm,

        /// Output bytes for SHAKE (defaults to the full-security length)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Verify checksums from file (like sha3sum -c)
    Check {
        #[arg(value_name = "FILE")]
        checksum_file: PathBuf,

        /// Algorithm the checksums were made with
        #[arg(short, long, value_enum, default_value_t = Algorithm::Sha3_256)]
        algo: Algorithm,
    },

    /// Run Keccak-p on a hex-encoded state and print the result
    Permute {
        /// Packed state, `ceil(width / 8)` bytes as hex
        #[arg(value_name = "HEX")]
        state: String,

        /// State width in bits
        #[arg(short, long, default_value_t = 1600)]
        width: usize,

        /// Rounds to run (defaults to every round of the width)
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Use the single-share reference datapath
        #[arg(long)]
        unmasked: bool,

        /// Seed for the share split and chi masks (defaults to entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Also print both output shares
        #[arg(long)]
        shares: bool,
    },

    /// Fixed-vs-random Welch t-test on simulated lane weights
    Leakage {
        /// State width in bits
        #[arg(short, long, default_value_t = 1600)]
        width: usize,

        /// Rounds per trace
        #[arg(short, long, default_value_t = 2)]
        rounds: usize,

        /// Traces, both groups together
        #[arg(short, long, default_value_t = 4000)]
        traces: usize,

        /// Root seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// |t| threshold
        #[arg(long, default_value_t = 4.5)]
        threshold: f64,

        /// Values to probe (repeatable; defaults to both shares)
        #[arg(short, long, value_enum)]
        probe: Vec<ProbeArg>,
    },
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hash {
            files,
            algo,
            length,
        } => hash_files(&files, algo, length)?,
        Commands::Check {
            checksum_file,
            algo,
        } => check_mode(&checksum_file, algo)?,
        Commands::Permute {
            state,
            width,
            rounds,
            unmasked,
            seed,
            shares,
        } => permute_mode(&state, width, rounds, unmasked, seed, shares)?,
        Commands::Leakage {
            width,
            rounds,
            traces,
            seed,
            threshold,
            probe,
        } => leakage_mode(width, rounds, traces, seed, threshold, &probe)?,
    }

    Ok(())
}
