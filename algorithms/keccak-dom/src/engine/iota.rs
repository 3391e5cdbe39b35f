//! Iota Injector
//!
//! The round constant is public, so it enters share 0 only. In masked mode
//! it is split the same way chi is: the low `W/2` bits go in with the low
//! half, the high bits with the high half.

use crate::kernels::constants::ROUND_CONSTANTS;
use crate::types::{StateBox, Width};

/// Round constant bits for one lane half (or the whole lane).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Bits `0..W/2`.
    Low,
    /// Bits `W/2..W`.
    High,
    /// Bits `0..W`.
    Full,
}

/// `RC[round]` restricted to `span` of a `W`-bit lane.
pub const fn round_constant(round: usize, span: Span, width: Width) -> u64 {
    let rc = ROUND_CONSTANTS[round] & width.lane_mask();
    match span {
        Span::Low => rc & width.half_mask(),
        Span::High => rc & !width.half_mask(),
        Span::Full => rc,
    }
}

/// XOR the selected round constant bits into lane `(0, 0)` of share 0.
pub const fn inject(share0: &mut StateBox, round: usize, span: Span, width: Width) {
    share0[0][0] ^= round_constant(round, span, width);
}
