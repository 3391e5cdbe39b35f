//! Masked Sponge
//!
//! SHA-3 and SHAKE over the two-share Keccak-f[1600] engine.
//!
//! The sponge state is created as a random split of zero. Public message
//! bytes enter share 0 only; secret input that is already shared can be
//! absorbed into both shares with [`MaskedHasher::update_shared`]. The
//! shares are combined only when output is squeezed.

use core::fmt;

use crate::codec::to_box;
use crate::engine::{PermutationEngine, Session};
use crate::masks::{MaskPrng, MaskSource};
use crate::types::{Error, Masking, Share, Width};

#[cfg(feature = "digest-trait")]
use digest::typenum::{U32, U64};
#[cfg(feature = "digest-trait")]
use digest::Output;
#[cfg(feature = "digest-trait")]
use digest::{FixedOutput, HashMarker, OutputSizeUser, Reset, Update};

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Largest rate of the supported variants (SHAKE128).
const MAX_RATE: usize = 168;

// =============================================================================
// VARIANTS
// =============================================================================

/// FIPS 202 instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sha3Variant {
    /// SHA3-224.
    Sha3_224,
    /// SHA3-256.
    Sha3_256,
    /// SHA3-384.
    Sha3_384,
    /// SHA3-512.
    Sha3_512,
    /// SHAKE128 extendable output.
    Shake128,
    /// SHAKE256 extendable output.
    Shake256,
}

impl Sha3Variant {
    /// Every variant.
    pub const ALL: [Self; 6] = [
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Shake128,
        Self::Shake256,
    ];

    /// Sponge rate in bytes: `200 - 2 * security / 8`.
    pub const fn rate(self) -> usize {
        match self {
            Self::Sha3_224 => 144,
            Self::Sha3_256 | Self::Shake256 => 136,
            Self::Sha3_384 => 104,
            Self::Sha3_512 => 72,
            Self::Shake128 => 168,
        }
    }

    /// Domain separation bits plus the first padding bit.
    pub const fn suffix(self) -> u8 {
        if self.is_xof() {
            0x1F
        } else {
            0x06
        }
    }

    /// Whether the variant is an extendable-output function.
    pub const fn is_xof(self) -> bool {
        matches!(self, Self::Shake128 | Self::Shake256)
    }

    /// Digest size in bytes; for SHAKE, the output length giving its full
    /// security level.
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha3_224 => 28,
            Self::Sha3_256 | Self::Shake128 => 32,
            Self::Sha3_384 => 48,
            Self::Sha3_512 | Self::Shake256 => 64,
        }
    }

    /// Lowercase name, as printed by `sha3sum`-style tools.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha3_224 => "sha3-224",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_384 => "sha3-384",
            Self::Sha3_512 => "sha3-512",
            Self::Shake128 => "shake128",
            Self::Shake256 => "shake256",
        }
    }

    /// Look a variant up by [`name`](Self::name), ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Sha3Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// MASKED HASHER
// =============================================================================

/// Incremental SHA-3/SHAKE over the masked permutation.
#[derive(Debug, Clone)]
pub struct MaskedHasher<S = MaskPrng> {
    variant: Sha3Variant,
    session: Session<S>,
    /// Pending rate bytes per share.
    blocks: [[u8; MAX_RATE]; 2],
    pos: usize,
}

impl<S: MaskSource> MaskedHasher<S> {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Masked hasher drawing share splits and chi masks from `source`.
    pub fn new(variant: Sha3Variant, source: S) -> Self {
        Self::with_masking(variant, Masking::Enabled, source)
    }

    /// Hasher with an explicit masking mode; `Masking::Disabled` runs the
    /// single-share reference datapath.
    pub fn with_masking(variant: Sha3Variant, masking: Masking, source: S) -> Self {
        let mut hasher = Self {
            variant,
            session: Session::new(PermutationEngine::keccak_f1600(masking), source),
            blocks: [[0; MAX_RATE]; 2],
            pos: 0,
        };
        hasher.reset();
        hasher
    }

    /// The instance being computed.
    pub const fn variant(&self) -> Sha3Variant {
        self.variant
    }

    // =========================================================================
    // STATE MODIFICATION
    // =========================================================================

    /// Absorb public bytes (share 0 only).
    pub fn update(&mut self, data: &[u8]) {
        self.absorb(data, None);
    }

    /// Absorb a secret given as two shares, `input = share0 ^ share1`.
    ///
    /// # Errors
    /// Returns `Error::ShareLength` if the shares differ in length.
    pub fn update_shared(&mut self, share0: &[u8], share1: &[u8]) -> Result<(), Error> {
        if share0.len() != share1.len() {
            return Err(Error::ShareLength {
                share0: share0.len(),
                share1: share1.len(),
            });
        }
        self.absorb(share0, Some(share1));
        Ok(())
    }

    fn absorb(&mut self, share0: &[u8], share1: Option<&[u8]>) {
        let rate = self.variant.rate();
        let mut offset = 0;
        while offset < share0.len() {
            let take = (rate - self.pos).min(share0.len() - offset);
            let input = offset..offset + take;
            let block = self.pos..self.pos + take;
            xor_into(&mut self.blocks[0][block.clone()], &share0[input.clone()]);
            if let Some(share1) = share1 {
                xor_into(&mut self.blocks[1][block], &share1[input]);
            }
            self.pos += take;
            offset += take;
            if self.pos == rate {
                self.flush_block();
            }
        }
    }

    fn flush_block(&mut self) {
        let rate = self.variant.rate();
        let engine = self.session.engine_mut();
        engine.absorb(Share::Zero, &self.blocks[0][..rate]);
        engine.absorb(Share::One, &self.blocks[1][..rate]);
        self.session.permute();
        self.blocks = [[0; MAX_RATE]; 2];
        self.pos = 0;
    }

    /// Restart with a fresh random split of the zero state.
    pub fn reset(&mut self) {
        let mut seed = [0u8; 200];
        self.session.source_mut().fill_masks(&mut seed);
        let mask = to_box(&seed, Width::F1600);
        self.session.load_box([mask, mask]);
        self.blocks = [[0; MAX_RATE]; 2];
        self.pos = 0;
    }

    // =========================================================================
    // FINALIZATION
    // =========================================================================

    /// Finish and return [`Sha3Variant::output_len`] bytes.
    pub fn finalize(self) -> Vec<u8> {
        let mut out = vec![0u8; self.variant.output_len()];
        self.finalize_xof(&mut out);
        out
    }

    /// Finish into a buffer of exactly the digest size (any size for SHAKE).
    ///
    /// # Errors
    /// Returns `Error::OutputLength` if a fixed-size digest does not fit
    /// `out` exactly.
    pub fn finalize_into(self, out: &mut [u8]) -> Result<(), Error> {
        let expected = self.variant.output_len();
        if !self.variant.is_xof() && out.len() != expected {
            return Err(Error::OutputLength {
                expected,
                actual: out.len(),
            });
        }
        self.finalize_xof(out);
        Ok(())
    }

    /// Pad, then squeeze `out.len()` bytes.
    pub fn finalize_xof(mut self, out: &mut [u8]) {
        let rate = self.variant.rate();
        self.blocks[0][self.pos] ^= self.variant.suffix();
        self.blocks[0][rate - 1] ^= 0x80;
        self.flush_block();

        let mut chunks = out.chunks_mut(rate).peekable();
        while let Some(chunk) = chunks.next() {
            self.session.engine().combined_prefix(chunk);
            if chunks.peek().is_some() {
                self.session.permute();
            }
        }
    }
}

fn xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

// =============================================================================
// TRAIT IMPL
// =============================================================================

macro_rules! fixed_digest {
    ($name:ident, $variant:expr, $size:ty, $doc:literal) => {
        #[doc = $doc]
        ///
        /// Masks come from a [`MaskPrng`] seeded from process entropy.
        #[cfg(feature = "digest-trait")]
        #[derive(Debug, Clone)]
        pub struct $name(MaskedHasher<MaskPrng>);

        #[cfg(feature = "digest-trait")]
        impl Default for $name {
            fn default() -> Self {
                Self(MaskedHasher::new($variant, MaskPrng::from_entropy()))
            }
        }

        #[cfg(feature = "digest-trait")]
        impl OutputSizeUser for $name {
            type OutputSize = $size;
        }

        #[cfg(feature = "digest-trait")]
        impl Update for $name {
            fn update(&mut self, data: &[u8]) {
                self.0.update(data);
            }
        }

        #[cfg(feature = "digest-trait")]
        impl FixedOutput for $name {
            fn finalize_into(self, out: &mut Output<Self>) {
                self.0.finalize_xof(out);
            }
        }

        #[cfg(feature = "digest-trait")]
        impl Reset for $name {
            fn reset(&mut self) {
                self.0.reset();
            }
        }

        #[cfg(feature = "digest-trait")]
        impl HashMarker for $name {}
    };
}

fixed_digest!(
    MaskedSha3_256,
    Sha3Variant::Sha3_256,
    U32,
    "SHA3-256 on the masked engine, for use through the `digest` traits."
);
fixed_digest!(
    MaskedSha3_512,
    Sha3Variant::Sha3_512,
    U64,
    "SHA3-512 on the masked engine, for use through the `digest` traits."
);
