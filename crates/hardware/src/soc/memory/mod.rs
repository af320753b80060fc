//! On-chip memories.
//!
//! This module implements the word-addressed stores used for instruction and data
//! memory. It provides:
//! 1. **Sram:** A flat array of 64-bit cells with a registered read port and one
//!    optional synchronous write port.
//! 2. **SramPort:** The per-tick address and write request driven into an `Sram`.

/// Static RAM with registered output.
pub mod sram;

pub use sram::{Sram, SramPort};
