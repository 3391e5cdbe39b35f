//! CLI Commands
//!
//! All keccak-dom CLI commands organized as separate modules.

mod check;
mod hash;
mod leakage;
mod permute;

pub use check::check_mode;
pub use hash::{hash_files, Algorithm};
pub use leakage::{leakage_mode, ProbeArg};
pub use permute::permute_mode;
