#![cfg_attr(not(feature = "std"), no_std)]

//! # keccak-dom
//!
//! Cycle-level model of a two-share, Domain-Oriented Masking (DOM)
//! implementation of the Keccak-f permutation for every width from
//! Keccak-f[50] to Keccak-f[1600], together with the unmasked reference,
//! a masked SHA-3/SHAKE sponge, and a first-order leakage assessment.
//!
//! The state is kept as two Boolean shares whose XOR is the true state. The
//! linear steps run on each share separately; chi runs on five DOM AND
//! multipliers over half-lanes, fed by fresh randomness on one cycle and by
//! recycled intermediate products on the next. A round therefore takes four
//! ticks.

//! # Usage
//! ```rust
//! use keccak_dom::{Control, Cycle, MaskPrng, MaskSource, PermutationEngine, Phase};
//!
//! // 1. Tick-level control
//! let mut engine = PermutationEngine::masked(1600)?;
//! engine.load(&[0u8; 200], &[0u8; 200])?;
//! let mut fresh = [0u8; 100];
//! MaskPrng::new(1).fill_masks(&mut fresh);
//! engine.tick(Control::new(0, Phase::Linear, Cycle::C0), &[])?;
//! engine.tick(Control::new(0, Phase::Nonlinear, Cycle::C1), &fresh)?;
//! engine.tick(Control::new(0, Phase::Nonlinear, Cycle::C2), &[])?;
//! let shares = engine.tick(Control::new(0, Phase::Nonlinear, Cycle::C3), &[])?;
//! assert_eq!(shares.share0[0] ^ shares.share1[0], 0x01);
//!
//! // 2. Whole permutations
//! use keccak_dom::Session;
//!
//! let mut session = Session::new(PermutationEngine::masked(800)?, MaskPrng::new(2));
//! session.load(&[0u8; 100], &[0u8; 100])?;
//! session.permute();
//!
//! // 3. Masked hashing
//! let digest = keccak_dom::sha3_256(b"abc");
//! assert_eq!(digest[..4], [0x3a, 0x98, 0x5d, 0xa7]);
//! # Ok::<(), keccak_dom::Error>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod codec;
mod engine;
// Share-agnostic kernels, public for tests and benchmarks
#[doc(hidden)]
pub mod kernels;
#[cfg(feature = "std")]
pub mod leakage;
mod masks;
mod oneshot;
mod streaming;
mod types;

// =============================================================================
// EXPORTS
// =============================================================================

#[cfg(feature = "digest-trait")]
pub use digest;
pub use rand_core;
#[cfg(any(test, feature = "fault-injection"))]
pub use engine::Fault;
pub use engine::{PermutationEngine, Session};
pub use masks::{MaskFn, MaskPrng, MaskSource};
pub use oneshot::{
    hash_with, keccak_f, keccak_p, permute_masked, split_state, verify_digest, verify_state,
};
#[cfg(feature = "std")]
pub use oneshot::{sha3_224, sha3_256, sha3_384, sha3_512, shake128, shake256};
#[cfg(feature = "digest-trait")]
pub use streaming::{MaskedSha3_256, MaskedSha3_512};
pub use streaming::{MaskedHasher, Sha3Variant};
pub use types::{
    Control, Cycle, Error, HalfSheet, Masking, Phase, PhaseTag, Share, Shares, StateBox,
    Width, SUPPORTED_WIDTHS, ZERO_BOX,
};

/// Engine internals: cycle decode, chi datapath, iota split.
#[doc(hidden)]
pub mod internals {
    pub use crate::engine::chi::{lane_half, merge_half, unpack_masks, ChiEngine, RowMasks};
    pub use crate::engine::iota::{round_constant, Span};
    pub use crate::engine::scheduler::{decode, recycle_source, CycleControl, ScheduleMonitor};
}
