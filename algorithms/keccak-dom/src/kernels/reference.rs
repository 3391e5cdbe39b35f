//! Unmasked reference permutation.
//!
//! Single-share Keccak-f[b] and Keccak-p[b, nr]. Serves as the ground truth
//! for the masked engine and as its `Masking::Disabled` round function.

use crate::kernels::constants::ROUND_CONSTANTS;
use crate::kernels::linear::linear;
use crate::types::{Error, StateBox, Width, ZERO_BOX};

/// Nonlinear row mixing: `a[x] ^= !a[x+1] & a[x+2]`.
pub fn chi(state: &StateBox, width: Width) -> StateBox {
    let mask = width.lane_mask();
    let mut out = ZERO_BOX;
    for x in 0..5 {
        for y in 0..5 {
            let t = !state[(x + 1) % 5][y] & state[(x + 2) % 5][y];
            out[x][y] = (state[x][y] ^ t) & mask;
        }
    }
    out
}

/// Round constant injection into lane (0, 0).
pub fn iota(state: &StateBox, round: usize, width: Width) -> StateBox {
    let mut out = *state;
    out[0][0] ^= ROUND_CONSTANTS[round] & width.lane_mask();
    out
}

/// One full round with round index `round`.
pub fn round(state: &StateBox, round: usize, width: Width) -> StateBox {
    iota(&chi(&linear(state, width), width), round, width)
}

/// Keccak-f[b]: all `width.rounds()` rounds.
pub fn keccak_f(state: &mut StateBox, width: Width) {
    for r in 0..width.rounds() {
        *state = round(state, r, width);
    }
}

/// Keccak-p[b, nr]: the last `rounds` rounds of Keccak-f[b].
///
/// # Errors
/// Returns `Error::RoundCount` if `rounds` exceeds `width.rounds()`.
pub fn keccak_p(state: &mut StateBox, width: Width, rounds: usize) -> Result<(), Error> {
    let first = first_round(width, rounds)?;
    for r in first..width.rounds() {
        *state = round(state, r, width);
    }
    Ok(())
}

/// Index of the first round of Keccak-p[b, `rounds`].
///
/// # Errors
/// Returns `Error::RoundCount` if `rounds` exceeds `width.rounds()`.
pub const fn first_round(width: Width, rounds: usize) -> Result<usize, Error> {
    if rounds > width.rounds() {
        return Err(Error::RoundCount {
            requested: rounds,
            rounds: width.rounds(),
        });
    }
    Ok(width.rounds() - rounds)
}
