//! Linear step functions (theta, rho, pi).
//!
//! All three are affine over GF(2), so they are applied to each share on its
//! own with no cross-share interaction.

use crate::kernels::constants::{PI_ROTATE, RHO_OFFSETS};
use crate::types::{StateBox, Width, ZERO_BOX};

/// Rotate a `W`-bit lane left by `amount` positions.
#[inline]
pub fn rotate_lane(lane: u64, amount: u32, width: Width) -> u64 {
    let w = width.lane_bits();
    let amount = amount % w;
    if amount == 0 {
        return lane;
    }
    ((lane << amount) | (lane >> (w - amount))) & width.lane_mask()
}

/// Column-parity mixing.
pub fn theta(state: &StateBox, width: Width) -> StateBox {
    let mut parity = [0u64; 5];
    for (x, column) in state.iter().enumerate() {
        parity[x] = column.iter().fold(0, |acc, lane| acc ^ lane);
    }

    let mut out = *state;
    for (x, column) in out.iter_mut().enumerate() {
        let d = parity[(x + 4) % 5] ^ rotate_lane(parity[(x + 1) % 5], 1, width);
        for lane in column.iter_mut() {
            *lane ^= d;
        }
    }
    out
}

/// Lane rotation with the standard offset table.
pub fn rho(state: &StateBox, width: Width) -> StateBox {
    rho_with(state, &RHO_OFFSETS, width)
}

/// Lane rotation with an explicit offset table.
pub fn rho_with(state: &StateBox, offsets: &[[u32; 5]; 5], width: Width) -> StateBox {
    let mut out = ZERO_BOX;
    for x in 0..5 {
        for y in 0..5 {
            out[x][y] = rotate_lane(state[x][y], offsets[x][y], width);
        }
    }
    out
}

/// Lane permutation.
pub fn pi(state: &StateBox) -> StateBox {
    let mut out = ZERO_BOX;
    for x in 0..5 {
        for y in 0..5 {
            out[x][y] = state[PI_ROTATE[x][y]][x];
        }
    }
    out
}

/// Phase 1: `pi(rho(theta(state)))`.
pub fn linear(state: &StateBox, width: Width) -> StateBox {
    pi(&rho(&theta(state, width), width))
}
