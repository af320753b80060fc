//! Architectural state.
//!
//! Holds the programmer-visible register file. The program counter lives in the fetch
//! unit and the stage register in the decode unit.

/// The 33-entry register file.
pub mod regbank;

pub use regbank::{RegBank, RegIds, RegValues};
