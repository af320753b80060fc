//! Five-stage datapath control.
//!
//! This module contains the sequencing and control of the fetch, decode, execute, memory,
//! and writeback stages. It includes the following components:
//! 1. **Signals:** The control word types selected per opcode.
//! 2. **Control:** The microcode tables mapping each opcode to its control words.
//! 3. **Stages:** The fetch unit, the decoder and stage sequencer, and writeback.

/// Microcode tables indexed by opcode.
pub mod control;

/// Control word types.
pub mod signals;

/// Stage units (fetch, decode, writeback).
pub mod stages;
