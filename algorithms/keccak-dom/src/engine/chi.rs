//! Chi Engine
//!
//! Five registered DOM multipliers, one per row `x`, realize the masked
//! nonlinear step over half-sheets:
//!
//! ```text
//! chi(A)[x] = A[x] ^ (!A[x+1] & A[x+2])
//! ```
//!
//! Row `x` multiplies `(!A0[x+1], A1[x+1])` by `(A0[x+2], A1[x+2])`; inverting
//! share 0 alone negates the shared value. The result is XORed back into the
//! same half of row `x` in each share; the other half is carried through.

use subtle::{Choice, ConditionallySelectable};

use crate::codec::read_bits;
use crate::engine::scheduler::recycle_source;
use crate::kernels::constants::DOM_ROWS;
use crate::kernels::dom::DomMultiplier;
use crate::types::{HalfSheet, StateBox, Width};

/// Fresh or recycled masks, one half-sheet per row.
pub type RowMasks = [HalfSheet; DOM_ROWS];

// =============================================================================
// HALF SELECTION
// =============================================================================

/// Extract the selected half of a lane.
#[inline]
pub fn lane_half(lane: u64, low: Choice, width: Width) -> u64 {
    let high = lane >> width.half_bits();
    u64::conditional_select(&high, &lane, low) & width.half_mask()
}

/// Replace the selected half of a lane with `half`, keeping the other half.
#[inline]
pub fn merge_half(lane: u64, half: u64, low: Choice, width: Width) -> u64 {
    let h = width.half_bits();
    let hm = width.half_mask();
    let half = half & hm;
    let into_low = (lane & !hm) | half;
    let into_high = (lane & hm) | (half << h);
    u64::conditional_select(&into_high, &into_low, low) & width.lane_mask()
}

/// Half-sheet of row `x` from one share.
pub fn sheet_half(state: &StateBox, x: usize, low: Choice, width: Width) -> HalfSheet {
    let mut out = [0u64; 5];
    for (y, word) in out.iter_mut().enumerate() {
        *word = lane_half(state[x][y], low, width);
    }
    out
}

/// Unpack `b/2` bits of fresh randomness into per-row half-sheets.
///
/// Row `x` takes bits `[x·5·W/2, (x+1)·5·W/2)`; lane `y` of a row takes the
/// `y`-th `W/2`-bit slice of that range.
pub fn unpack_masks(fresh: &[u8], width: Width) -> RowMasks {
    let h = width.half_bits();
    let mut masks = [[0u64; 5]; DOM_ROWS];
    for (x, row) in masks.iter_mut().enumerate() {
        for (y, word) in row.iter_mut().enumerate() {
            *word = read_bits(fresh, (5 * x + y) * h as usize, h);
        }
    }
    masks
}

// =============================================================================
// CHI ENGINE
// =============================================================================

/// Row-parallel masked chi with registered DOM multipliers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChiEngine {
    rows: [DomMultiplier; DOM_ROWS],
}

impl ChiEngine {
    /// Engine with cleared registers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch every row's multiplier with operands from the selected half.
    pub fn update(&mut self, shares: &[StateBox; 2], in_low: bool, masks: &RowMasks, width: Width) {
        let low = Choice::from(u8::from(in_low));
        let hm = width.half_mask();
        for (x, dom) in self.rows.iter_mut().enumerate() {
            let x1 = (x + 1) % DOM_ROWS;
            let x2 = (x + 2) % DOM_ROWS;
            let mut a = [
                sheet_half(&shares[0], x1, low, width),
                sheet_half(&shares[1], x1, low, width),
            ];
            for word in &mut a[0] {
                *word = !*word & hm;
            }
            let b = [
                sheet_half(&shares[0], x2, low, width),
                sheet_half(&shares[1], x2, low, width),
            ];
            dom.update(a, b, &masks[x]);
        }
    }

    /// Products from the last latch, rotated so row `x` gets row `x - 1`'s.
    pub fn recycled_masks(&self) -> RowMasks {
        let mut masks = [[0u64; 5]; DOM_ROWS];
        for (x, row) in masks.iter_mut().enumerate() {
            *row = self.rows[recycle_source(x)].prd();
        }
        masks
    }

    /// Write the registered results into the selected half of each share.
    ///
    /// `chi_k[x] = dom_k[x] ^ input_k[x]` on the written half.
    pub fn write(&self, shares: &mut [StateBox; 2], out_low: bool, width: Width) {
        let low = Choice::from(u8::from(out_low));
        for (x, dom) in self.rows.iter().enumerate() {
            let q = dom.output();
            for (share, q_share) in shares.iter_mut().zip(q.iter()) {
                for (y, lane) in share[x].iter_mut().enumerate() {
                    let half = lane_half(*lane, low, width) ^ q_share[y];
                    *lane = merge_half(*lane, half, low, width);
                }
            }
        }
    }

    /// Clear all multiplier registers.
    pub fn clear(&mut self) {
        for dom in &mut self.rows {
            dom.clear();
        }
    }

    /// Mutable access to one row's multiplier (fault injection).
    #[cfg(any(test, feature = "fault-injection"))]
    pub fn row_mut(&mut self, x: usize) -> &mut DomMultiplier {
        &mut self.rows[x]
    }
}
