//! Public API Layer
//!
use crate::codec::{to_bits, to_box};
use crate::engine::{PermutationEngine, Session};
use crate::kernels::reference;
use crate::masks::{MaskFn, MaskSource};
use crate::streaming::{MaskedHasher, Sha3Variant};
use crate::types::{Error, Masking, Shares, Width};
use subtle::ConstantTimeEq;

#[cfg(feature = "std")]
use crate::masks::MaskPrng;

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// =============================================================================
// REFERENCE PERMUTATION
// =============================================================================

/// Unmasked Keccak-f[b] on a packed state.
///
/// # Example
/// ```rust
/// let out = keccak_dom::keccak_f(&[0u8; 200], 1600)?;
/// assert_eq!(out[..8], 0xF1258F7940E1DDE7u64.to_le_bytes());
/// # Ok::<(), keccak_dom::Error>(())
/// ```
///
/// # Errors
/// Returns `Error::UnsupportedWidth` or `Error::StateLength`.
pub fn keccak_f(state: &[u8], state_width: usize) -> Result<Vec<u8>, Error> {
    let width = Width::new(state_width)?;
    keccak_p(state, state_width, width.rounds())
}

/// Unmasked Keccak-p[b, nr]: the last `rounds` rounds of Keccak-f[b].
///
/// # Errors
/// Returns `Error::UnsupportedWidth`, `Error::StateLength`, or
/// `Error::RoundCount`.
pub fn keccak_p(state: &[u8], state_width: usize, rounds: usize) -> Result<Vec<u8>, Error> {
    let width = Width::new(state_width)?;
    check_len(state, width)?;
    let mut lanes = to_box(state, width);
    reference::keccak_p(&mut lanes, width, rounds)?;
    Ok(to_bits(&lanes, width))
}

// =============================================================================
// MASKED PERMUTATION
// =============================================================================

/// Split a packed state into two shares: `share1` random, `share0 = state ^ share1`.
///
/// # Errors
/// Returns `Error::UnsupportedWidth` or `Error::StateLength`.
pub fn split_state<S: MaskSource>(
    state: &[u8],
    state_width: usize,
    source: &mut S,
) -> Result<Shares, Error> {
    let width = Width::new(state_width)?;
    check_len(state, width)?;
    let mut share1 = vec![0u8; width.state_bytes()];
    source.fill_masks(&mut share1);
    // Clear padding bits past the state.
    share1 = to_bits(&to_box(&share1, width), width);
    let share0 = state.iter().zip(&share1).map(|(s, m)| s ^ m).collect();
    Ok(Shares { share0, share1 })
}

/// Run Keccak-p[b, `rounds`] on the masked engine.
///
/// # Example
/// ```rust
/// use keccak_dom::{permute_masked, split_state, verify_state, MaskPrng};
///
/// let mut masks = MaskPrng::new(7);
/// let shares = split_state(&[0u8; 200], 1600, &mut masks)?;
/// let out = permute_masked(&shares, 1600, 24, &mut masks)?;
/// let expected = keccak_dom::keccak_f(&[0u8; 200], 1600)?;
/// assert!(verify_state(&out, &expected));
/// # Ok::<(), keccak_dom::Error>(())
/// ```
///
/// # Errors
/// Returns `Error::UnsupportedWidth`, `Error::MaskingTooNarrow`,
/// `Error::StateLength`, or `Error::RoundCount`.
pub fn permute_masked<S: MaskSource>(
    shares: &Shares,
    state_width: usize,
    rounds: usize,
    source: &mut S,
) -> Result<Shares, Error> {
    let engine = PermutationEngine::new(Width::new(state_width)?, Masking::Enabled)?;
    let mut session = Session::new(engine, MaskFn(|dest: &mut [u8]| source.fill_masks(dest)));
    session.load(&shares.share0, &shares.share1)?;
    session.permute_rounds(rounds)?;
    Ok(session.read())
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Recombine `shares` and compare against `expected` in constant time.
#[must_use]
pub fn verify_state(shares: &Shares, expected: &[u8]) -> bool {
    if shares.share0.len() != shares.share1.len() {
        return false;
    }
    let combined: Vec<u8> = shares
        .share0
        .iter()
        .zip(&shares.share1)
        .map(|(a, b)| a ^ b)
        .collect();
    combined.ct_eq(expected).into()
}

/// Compare two digests in constant time.
#[must_use]
pub fn verify_digest(computed: &[u8], expected: &[u8]) -> bool {
    computed.ct_eq(expected).into()
}

// =============================================================================
// MASKED HASHING
// =============================================================================

/// Hash `data` with `variant`, drawing masks from `source`.
///
/// Returns [`Sha3Variant::output_len`] bytes.
pub fn hash_with<S: MaskSource>(variant: Sha3Variant, data: &[u8], source: S) -> Vec<u8> {
    let mut hasher = MaskedHasher::new(variant, source);
    hasher.update(data);
    hasher.finalize()
}

/// Masked SHA3-224.
#[cfg(feature = "std")]
#[must_use]
pub fn sha3_224(data: &[u8]) -> [u8; 28] {
    fixed(Sha3Variant::Sha3_224, data)
}

/// Masked SHA3-256.
///
/// # Example
/// ```rust
/// let digest = keccak_dom::sha3_256(b"abc");
/// assert_eq!(digest[0], 0x3a);
/// ```
#[cfg(feature = "std")]
#[must_use]
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    fixed(Sha3Variant::Sha3_256, data)
}

/// Masked SHA3-384.
#[cfg(feature = "std")]
#[must_use]
pub fn sha3_384(data: &[u8]) -> [u8; 48] {
    fixed(Sha3Variant::Sha3_384, data)
}

/// Masked SHA3-512.
#[cfg(feature = "std")]
#[must_use]
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    fixed(Sha3Variant::Sha3_512, data)
}

/// Masked SHAKE128 with `len` output bytes.
#[cfg(feature = "std")]
#[must_use]
pub fn shake128(data: &[u8], len: usize) -> Vec<u8> {
    xof(Sha3Variant::Shake128, data, len)
}

/// Masked SHAKE256 with `len` output bytes.
#[cfg(feature = "std")]
#[must_use]
pub fn shake256(data: &[u8], len: usize) -> Vec<u8> {
    xof(Sha3Variant::Shake256, data, len)
}

#[cfg(feature = "std")]
fn fixed<const N: usize>(variant: Sha3Variant, data: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let mut hasher = MaskedHasher::new(variant, MaskPrng::from_entropy());
    hasher.update(data);
    hasher.finalize_xof(&mut out);
    out
}

#[cfg(feature = "std")]
fn xof(variant: Sha3Variant, data: &[u8], len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    let mut hasher = MaskedHasher::new(variant, MaskPrng::from_entropy());
    hasher.update(data);
    hasher.finalize_xof(&mut out);
    out
}

// =============================================================================
// INTERNAL
// =============================================================================

const fn check_len(state: &[u8], width: Width) -> Result<(), Error> {
    if state.len() == width.state_bytes() {
        Ok(())
    } else {
        Err(Error::StateLength {
            expected: width.state_bytes(),
            actual: state.len(),
        })
    }
}
