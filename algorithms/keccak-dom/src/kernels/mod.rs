//! Kernels
//!
//! Share-agnostic building blocks: the Keccak-f tables, the linear step
//! functions, the DOM AND gate, and the unmasked reference rounds.

pub mod constants;
pub mod dom;
pub mod linear;
pub mod reference;
