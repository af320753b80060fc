//! Execution units.
//!
//! This module contains the units that carry the execute and memory stages: the ALU and
//! the load/store unit with its data memory.

/// Arithmetic Logic Unit.
pub mod alu;

/// Load/Store Unit.
pub mod lsu;
