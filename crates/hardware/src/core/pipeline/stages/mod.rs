//! Datapath stage logic.
//!
//! This module contains the stage-specific units of the five-stage datapath. It includes:
//! 1. **Fetch:** The program counter and instruction memory.
//! 2. **Decode:** The stage sequencer, control table lookup, and register mapping.
//! 3. **Writeback:** Result selection and the register and PC writes.
//!
//! The execute and memory stages are carried by the [`Alu`](crate::core::units::alu::Alu)
//! and the [`Lsu`](crate::core::units::lsu::Lsu).

/// Instruction decode and stage sequencing.
pub mod decode;

/// Instruction fetch unit.
pub mod fetch;

/// Writeback stage.
pub mod writeback;

pub use decode::{Decoded, Decoder};
pub use fetch::Fetcher;
pub use writeback::{WbOut, select_result, writeback_stage};
