//! Core processor implementation.
//!
//! This module contains the microcoded processor: its architectural register file, the
//! stage sequencing and control tables, the execution units, and the composite device
//! that wires them together.

/// Architectural state (register file).
pub mod arch;

/// Processor composite device.
pub mod cpu;

/// Stage sequencing, control signals, and microcode tables.
pub mod pipeline;

/// Per-cycle trace snapshots.
pub mod trace;

/// Execution units (ALU, LSU).
pub mod units;

pub use self::cpu::Cpu;
pub use self::trace::CycleTrace;
