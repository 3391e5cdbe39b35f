//! Execution Engine
//!
//! The masked round datapath, its cycle scheduler, and the session runner
//! that drives it.

pub mod chi;
pub mod iota;
pub mod parallel;
pub mod permutation;
pub mod scheduler;
pub mod session;

#[cfg(any(test, feature = "fault-injection"))]
pub use permutation::Fault;
pub(crate) use permutation::prefix_lanes;
pub use permutation::PermutationEngine;
pub use session::Session;
