//! Domain-Oriented Masking (DOM) AND gate.
//!
//! Computes a two-share AND: given `a = a0 ^ a1` and `b = b0 ^ b1`, returns
//! `(q0, q1)` with `q0 ^ q1 == a & b`. Each share stays in its own domain;
//! the two cross-domain products are reshared with one fresh mask `z`
//! before they meet a domain:
//!
//! ```text
//! q0 = (a0 & b0) ^ ((a0 & b1) ^ z)
//! q1 = (a1 & b1) ^ ((a1 & b0) ^ z)
//! ```
//!
//! The masked cross term `(a0 & b1) ^ z` is exported as `prd` so that another
//! multiplier can consume it as a recycled mask in a later cycle.

use crate::types::HalfSheet;

// =============================================================================
// COMBINATIONAL
// =============================================================================

/// Result of one DOM evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomOutput<T> {
    /// Output shares.
    pub q: [T; 2],
    /// Masked cross-domain product, reusable as randomness elsewhere.
    pub prd: T,
}

/// Single-word DOM AND.
#[inline]
pub const fn dom_and(a: [u64; 2], b: [u64; 2], z: u64) -> DomOutput<u64> {
    let inner0 = a[0] & b[0];
    let inner1 = a[1] & b[1];
    let cross0 = (a[0] & b[1]) ^ z;
    let cross1 = (a[1] & b[0]) ^ z;
    DomOutput {
        q: [inner0 ^ cross0, inner1 ^ cross1],
        prd: cross0,
    }
}

/// DOM AND over a half-sheet, one mask word per lane.
pub fn dom_and_sheet(a: [HalfSheet; 2], b: [HalfSheet; 2], z: &HalfSheet) -> DomOutput<HalfSheet> {
    let mut out = DomOutput {
        q: [[0; 5]; 2],
        prd: [0; 5],
    };
    for y in 0..5 {
        let r = dom_and([a[0][y], a[1][y]], [b[0][y], b[1][y]], z[y]);
        out.q[0][y] = r.q[0];
        out.q[1][y] = r.q[1];
        out.prd[y] = r.prd;
    }
    out
}

// =============================================================================
// REGISTERED (PIPELINED)
// =============================================================================

/// Registered DOM multiplier.
///
/// `update` latches the per-domain inner products and the resharing cross
/// terms; the recombined shares and `prd` appear on the outputs from the next
/// cycle on. Splitting the recombination across a register stage keeps the
/// cross terms from meeting unmasked in one combinational cloud.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomMultiplier {
    inner: [HalfSheet; 2],
    cross: [HalfSheet; 2],
}

impl DomMultiplier {
    /// Multiplier with cleared registers.
    pub const fn new() -> Self {
        Self {
            inner: [[0; 5]; 2],
            cross: [[0; 5]; 2],
        }
    }

    /// Latch a new evaluation.
    pub fn update(&mut self, a: [HalfSheet; 2], b: [HalfSheet; 2], z: &HalfSheet) {
        for y in 0..5 {
            self.inner[0][y] = a[0][y] & b[0][y];
            self.inner[1][y] = a[1][y] & b[1][y];
            self.cross[0][y] = (a[0][y] & b[1][y]) ^ z[y];
            self.cross[1][y] = (a[1][y] & b[0][y]) ^ z[y];
        }
    }

    /// Output shares of the last latched evaluation.
    pub fn output(&self) -> [HalfSheet; 2] {
        let mut q = [[0; 5]; 2];
        for (d, share) in q.iter_mut().enumerate() {
            for (y, word) in share.iter_mut().enumerate() {
                *word = self.inner[d][y] ^ self.cross[d][y];
            }
        }
        q
    }

    /// Recyclable product of the last latched evaluation.
    pub const fn prd(&self) -> HalfSheet {
        self.cross[0]
    }

    /// Clear the registers.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Overwrite one domain's registers (fault injection).
    #[cfg(any(test, feature = "fault-injection"))]
    pub fn force(&mut self, domain: usize, inner: HalfSheet, cross: HalfSheet) {
        self.inner[domain] = inner;
        self.cross[domain] = cross;
    }
}
