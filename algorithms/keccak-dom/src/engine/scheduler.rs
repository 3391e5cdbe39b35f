//! Round/Cycle Scheduler
//!
//! Combinational decode of the cycle index into the chi engine's mux
//! controls, the product-recycling rotation, and the debug-build schedule
//! monitor.

use crate::kernels::constants::{DOM_ROWS, RECYCLE_SOURCE_OFFSET};
use crate::types::{Control, Cycle, Phase};

// =============================================================================
// CYCLE DECODE
// =============================================================================

/// Mux controls for one cycle of the nonlinear phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleControl {
    /// Multiplier inputs come from the low lane halves.
    pub in_data_low: bool,
    /// Multipliers take fresh external randomness (else recycled products).
    pub fresh_randomness: bool,
    /// The DOM registers latch this cycle.
    pub update_dom: bool,
}

impl CycleControl {
    /// Output mux: the computed half goes to the low half of the lane.
    pub const fn out_data_low(self) -> bool {
        !self.in_data_low
    }
}

/// Decode table of the four-cycle schedule.
pub const fn decode(cycle: Cycle) -> CycleControl {
    match cycle {
        Cycle::C0 => CycleControl {
            in_data_low: true,
            fresh_randomness: false,
            update_dom: false,
        },
        Cycle::C1 => CycleControl {
            in_data_low: true,
            fresh_randomness: true,
            update_dom: true,
        },
        Cycle::C2 => CycleControl {
            in_data_low: false,
            fresh_randomness: false,
            update_dom: true,
        },
        Cycle::C3 => CycleControl {
            in_data_low: true,
            fresh_randomness: false,
            update_dom: false,
        },
    }
}

/// Cycles whose DOM outputs are written into the state.
pub const fn writes_state(cycle: Cycle) -> bool {
    matches!(cycle, Cycle::C2 | Cycle::C3)
}

/// Row whose latest product feeds row `row` when products are recycled.
///
/// Row `x`'s multiplier never reuses its own product nor those of rows
/// `x + 1` and `x + 2`, whose new values depend on row `x`'s previous output.
pub const fn recycle_source(row: usize) -> usize {
    (row + RECYCLE_SOURCE_OFFSET) % DOM_ROWS
}

// =============================================================================
// SCHEDULE MONITOR
// =============================================================================

/// Consistency checker for the externally driven control sequence.
///
/// Hardware has no interlock for a mis-sequenced schedule; the monitor makes
/// such misuse visible by panicking. It never repairs the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleMonitor {
    rounds: usize,
    last: Option<Control>,
    nonlinear_run: usize,
}

impl ScheduleMonitor {
    /// Monitor for a width with `rounds` rounds, expecting a fresh session.
    pub const fn new(rounds: usize) -> Self {
        Self {
            rounds,
            last: None,
            nonlinear_run: 0,
        }
    }

    /// Forget the history (new session loaded).
    pub const fn reset(&mut self) {
        self.last = None;
        self.nonlinear_run = 0;
    }

    /// Check a masked-mode control word against the history.
    ///
    /// # Panics
    /// Panics on an out-of-order cycle, a round index change inside a round,
    /// a skipped round (a restart after the final round is allowed), a
    /// linear phase outside cycle 0, or a nonlinear phase selector held for
    /// fewer than two ticks.
    pub fn observe(&mut self, control: Control) {
        if let Some(prev) = self.last {
            assert!(
                control.cycle == prev.cycle.next(),
                "schedule violation: cycle {} followed cycle {}",
                control.cycle.index(),
                prev.cycle.index()
            );
            // After the final round a new permutation may start at any round.
            let restart = control.cycle == Cycle::C0 && prev.round + 1 == self.rounds;
            let expected_round = if control.cycle == Cycle::C0 {
                prev.round + 1
            } else {
                prev.round
            };
            assert!(
                restart || control.round == expected_round,
                "schedule violation: round {} at cycle {}, expected round {}",
                control.round,
                control.cycle.index(),
                expected_round
            );
            if prev.phase == Phase::Nonlinear && control.phase == Phase::Linear {
                assert!(
                    self.nonlinear_run >= 2,
                    "schedule violation: nonlinear phase held for {} tick(s)",
                    self.nonlinear_run
                );
            }
        } else {
            assert!(
                control.cycle == Cycle::C0,
                "schedule violation: session started at cycle {}",
                control.cycle.index()
            );
        }

        assert!(
            control.phase == Phase::Nonlinear || control.cycle == Cycle::C0,
            "schedule violation: linear phase selected at cycle {}",
            control.cycle.index()
        );

        self.nonlinear_run = match control.phase {
            Phase::Nonlinear => self.nonlinear_run + 1,
            Phase::Linear => 0,
        };
        self.last = Some(control);
    }
}
