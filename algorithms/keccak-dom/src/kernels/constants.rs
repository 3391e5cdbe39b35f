//! Keccak-f Constants
//!
//! Round constants come from the Keccak LFSR over GF(2):
//!
//! ```text
//! x^8 + x^6 + x^5 + x^4 + 1
//! ```
//!
//! Bit `2^j - 1` of `RC[i]` is LFSR output `7i + j`. The published table is
//! kept verbatim and checked against the LFSR at compile time.
//!
//! Rho offsets are `(t + 1)(t + 2) / 2 mod 64` along the `(x, y)` orbit of
//! `(1, 0)` under `(x, y) -> (y, 2x + 3y)`.

use static_assertions::const_assert;

// =============================================================================
// ROUNDS
// =============================================================================

/// Rounds of Keccak-f[1600]; narrower widths use a prefix of the schedule.
pub const MAX_ROUNDS: usize = 24;

// =============================================================================
// ROUND CONSTANTS (IOTA)
// =============================================================================

/// Published iota constants; `W < 64` uses the low `W` bits.
pub const ROUND_CONSTANTS: [u64; MAX_ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Derive the iota constants from the LFSR.
pub const fn lfsr_round_constants() -> [u64; MAX_ROUNDS] {
    let mut out = [0u64; MAX_ROUNDS];
    let mut lfsr: u8 = 1;
    let mut i = 0;
    while i < MAX_ROUNDS {
        let mut j = 0;
        while j < 7 {
            if lfsr & 1 != 0 {
                out[i] |= 1 << ((1 << j) - 1);
            }
            lfsr = if lfsr & 0x80 != 0 {
                (lfsr << 1) ^ 0x71
            } else {
                lfsr << 1
            };
            j += 1;
        }
        i += 1;
    }
    out
}

const fn round_constants_match() -> bool {
    let derived = lfsr_round_constants();
    let mut i = 0;
    while i < MAX_ROUNDS {
        if derived[i] != ROUND_CONSTANTS[i] {
            return false;
        }
        i += 1;
    }
    true
}

const_assert!(round_constants_match());

// =============================================================================
// RHO
// =============================================================================

/// Rotation offsets `RhoOffset[x][y]` for 64-bit lanes; reduce `mod W`.
pub const RHO_OFFSETS: [[u32; 5]; 5] = [
    [0, 36, 3, 41, 18],
    [1, 44, 10, 45, 2],
    [62, 6, 43, 15, 61],
    [28, 55, 25, 21, 56],
    [27, 20, 39, 8, 14],
];

const fn rho_offsets_match() -> bool {
    let (mut x, mut y) = (1usize, 0usize);
    let mut t = 0u32;
    while t < 24 {
        if RHO_OFFSETS[x][y] != ((t + 1) * (t + 2) / 2) % 64 {
            return false;
        }
        let next_y = (2 * x + 3 * y) % 5;
        x = y;
        y = next_y;
        t += 1;
    }
    RHO_OFFSETS[0][0] == 0
}

const_assert!(rho_offsets_match());

// =============================================================================
// PI
// =============================================================================

/// Lane permutation: `pi(A)[x][y] = A[PI_ROTATE[x][y]][x]`.
pub const PI_ROTATE: [[usize; 5]; 5] = [
    [0, 3, 1, 4, 2],
    [1, 4, 2, 0, 3],
    [2, 0, 3, 1, 4],
    [3, 1, 4, 2, 0],
    [4, 2, 0, 3, 1],
];

const fn pi_table_matches() -> bool {
    let mut x = 0;
    while x < 5 {
        let mut y = 0;
        while y < 5 {
            if PI_ROTATE[x][y] != (x + 3 * y) % 5 {
                return false;
            }
            y += 1;
        }
        x += 1;
    }
    true
}

const_assert!(pi_table_matches());

// =============================================================================
// SCHEDULE
// =============================================================================

/// Ticks per round with masking enabled.
pub const MASKED_TICKS_PER_ROUND: usize = 4;

/// Ticks per round with masking disabled.
pub const UNMASKED_TICKS_PER_ROUND: usize = 1;

/// Multipliers in the chi engine, one per row.
pub const DOM_ROWS: usize = 5;

/// Row whose product row `x` recycles: `x - 1 mod 5`.
pub const RECYCLE_SOURCE_OFFSET: usize = DOM_ROWS - 1;
