//! Shared types used across the keccak-dom library.

use core::fmt;
#[cfg(feature = "std")]
use std::error;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// =============================================================================
// STATE LAYOUT
// =============================================================================

/// A Keccak state as a 5×5 array of lanes, indexed `[x][y]`.
///
/// Every lane holds `W` bits in the low end of a `u64`; the unused upper bits
/// are always zero.
pub type StateBox = [[u64; 5]; 5];

/// An all-zero state.
pub const ZERO_BOX: StateBox = [[0; 5]; 5];

/// Half of one row's sheet: the five lanes `(x, 0..5)` restricted to either
/// the low or the high `W/2` bit positions.
pub type HalfSheet = [u64; 5];

/// Supported permutation widths `b = 25·W`.
pub const SUPPORTED_WIDTHS: [usize; 7] = [25, 50, 100, 200, 400, 800, 1600];

/// Validated permutation width.
///
/// Construct with `Width::new` or `Width::try_from`; every other type in the
/// crate trusts that `lane_bits` is a power of two in `1..=64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Width {
    log2_lane: u32,
}

impl Width {
    /// Keccak-f[1600], the SHA-3 width.
    pub const F1600: Self = Self { log2_lane: 6 };

    /// Validate a state width in bits.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedWidth` unless `state_width` is one of
    /// `SUPPORTED_WIDTHS`.
    pub const fn new(state_width: usize) -> Result<Self, Error> {
        let log2_lane = match state_width {
            25 => 0,
            50 => 1,
            100 => 2,
            200 => 3,
            400 => 4,
            800 => 5,
            1600 => 6,
            _ => return Err(Error::UnsupportedWidth(state_width)),
        };
        Ok(Self { log2_lane })
    }

    /// Lane size `W` in bits.
    pub const fn lane_bits(self) -> u32 {
        1 << self.log2_lane
    }

    /// `log2(W)`.
    pub const fn log2_lane(self) -> u32 {
        self.log2_lane
    }

    /// State size `b = 25·W` in bits.
    pub const fn state_bits(self) -> usize {
        25 * self.lane_bits() as usize
    }

    /// Bytes needed to hold the packed flat state.
    pub const fn state_bytes(self) -> usize {
        self.state_bits().div_ceil(8)
    }

    /// Fresh randomness per masked evaluation (`b/2` bits).
    pub const fn random_bits(self) -> usize {
        self.state_bits() / 2
    }

    /// Bytes needed to hold one tick's fresh randomness.
    pub const fn random_bytes(self) -> usize {
        self.random_bits().div_ceil(8)
    }

    /// Bits per lane half (`W/2`); zero for the 25-bit width.
    pub const fn half_bits(self) -> u32 {
        self.lane_bits() / 2
    }

    /// Number of rounds of Keccak-f: `12 + 2·log2(W)`.
    pub const fn rounds(self) -> usize {
        12 + 2 * self.log2_lane as usize
    }

    /// Mask selecting the `W` valid bits of a lane.
    pub const fn lane_mask(self) -> u64 {
        low_mask(self.lane_bits())
    }

    /// Mask selecting the `W/2` bits of a lane half.
    pub const fn half_mask(self) -> u64 {
        low_mask(self.half_bits())
    }

    /// Whether a two-share engine can be built for this width.
    pub const fn supports_masking(self) -> bool {
        self.log2_lane >= 1
    }
}

impl TryFrom<usize> for Width {
    type Error = Error;

    fn try_from(state_width: usize) -> Result<Self, Self::Error> {
        Self::new(state_width)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keccak-f[{}]", self.state_bits())
    }
}

/// Mask with the low `bits` bits set (`bits <= 64`).
pub(crate) const fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

// =============================================================================
// CONTROL SURFACE
// =============================================================================

/// Number of shares the engine keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Masking {
    /// `Share = 1`: one combinational round per tick.
    Disabled,
    /// `Share = 2`: DOM-masked chi on a four-cycle schedule.
    Enabled,
}

/// Phase selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Theta, rho, pi.
    Linear,
    /// Chi and iota.
    Nonlinear,
}

/// One of the two Boolean shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Share {
    /// Share 0.
    Zero,
    /// Share 1.
    One,
}

impl Share {
    /// Both shares in index order.
    pub const ALL: [Self; 2] = [Self::Zero, Self::One];

    /// Share index as an integer.
    pub const fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

/// Cycle index of the four-cycle masked schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Cycle {
    /// Phase 1 / carry-through.
    C0 = 0,
    /// Low half, fresh randomness.
    C1 = 1,
    /// High half, recycled products.
    C2 = 2,
    /// High half written out.
    C3 = 3,
}

impl Cycle {
    /// All cycles in schedule order.
    pub const ALL: [Self; 4] = [Self::C0, Self::C1, Self::C2, Self::C3];

    /// The cycle that must follow this one.
    pub const fn next(self) -> Self {
        match self {
            Self::C0 => Self::C1,
            Self::C1 => Self::C2,
            Self::C2 => Self::C3,
            Self::C3 => Self::C0,
        }
    }

    /// Cycle index as an integer.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Cycle {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::C0),
            1 => Ok(Self::C1),
            2 => Ok(Self::C2),
            3 => Ok(Self::C3),
            _ => Err(Error::CycleOutOfRange(value)),
        }
    }
}

/// Control inputs sampled on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    /// Round index, `0 <= round < width.rounds()`.
    pub round: usize,
    /// Phase selector.
    pub phase: Phase,
    /// Cycle index within the round.
    pub cycle: Cycle,
}

impl Control {
    /// Build a control word.
    pub const fn new(round: usize, phase: Phase, cycle: Cycle) -> Self {
        Self {
            round,
            phase,
            cycle,
        }
    }
}

/// Which transform produced the engine's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTag {
    /// Freshly loaded, no tick applied yet.
    Loaded,
    /// Output of theta, rho, pi.
    Phase1Output,
    /// Low half of chi and iota written, high half pending.
    Phase2Partial,
    /// Output of a complete round.
    Phase2Output,
}

/// Both shares in packed flat form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shares {
    /// Share 0.
    pub share0: Vec<u8>,
    /// Share 1.
    pub share1: Vec<u8>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Caller-contract violations rejected by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// State width not in `SUPPORTED_WIDTHS`.
    UnsupportedWidth(usize),
    /// Masking needs at least two bits per lane (`b >= 50`).
    MaskingTooNarrow(usize),
    /// A packed state had the wrong number of bytes.
    StateLength {
        /// Bytes required by the width.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// The fresh randomness had the wrong number of bytes.
    RandomnessLength {
        /// Bytes required by the width.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// Round index beyond the round constant schedule of the width.
    RoundOutOfRange {
        /// Requested round.
        round: usize,
        /// Rounds of the width.
        rounds: usize,
    },
    /// Requested more rounds than the width defines.
    RoundCount {
        /// Requested rounds.
        requested: usize,
        /// Rounds of the width.
        rounds: usize,
    },
    /// Cycle index outside `0..=3`.
    CycleOutOfRange(u8),
    /// Pre-shared input halves of different lengths.
    ShareLength {
        /// Bytes of share 0.
        share0: usize,
        /// Bytes of share 1.
        share1: usize,
    },
    /// Fixed-length digest requested into a buffer of another size.
    OutputLength {
        /// Digest size in bytes.
        expected: usize,
        /// Buffer size in bytes.
        actual: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedWidth(w) => write!(
                f,
                "unsupported state width {w}; expected one of 25, 50, 100, 200, 400, 800, 1600"
            ),
            Self::MaskingTooNarrow(w) => {
                write!(f, "masking requires a state width of at least 50 bits, got {w}")
            }
            Self::StateLength { expected, actual } => {
                write!(f, "state must be {expected} bytes, got {actual}")
            }
            Self::RandomnessLength { expected, actual } => {
                write!(f, "fresh randomness must be {expected} bytes, got {actual}")
            }
            Self::RoundOutOfRange { round, rounds } => {
                write!(f, "round index {round} out of range (width has {rounds} rounds)")
            }
            Self::RoundCount { requested, rounds } => {
                write!(f, "requested {requested} rounds, width has {rounds}")
            }
            Self::CycleOutOfRange(c) => write!(f, "cycle index {c} out of range 0..=3"),
            Self::ShareLength { share0, share1 } => {
                write!(f, "input shares differ in length: {share0} and {share1} bytes")
            }
            Self::OutputLength { expected, actual } => {
                write!(f, "digest is {expected} bytes, output buffer is {actual}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for Error {}
