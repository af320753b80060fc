//! Microcoded processor simulator library.
//!
//! This crate implements a cycle-accurate simulator of a five-stage microcoded processor:
//! 1. **SoC:** A synchronous-circuit kernel (registers, latches, wires, multiplexers, a
//!    two-phase tick scheduler) and registered-output SRAM.
//! 2. **ISA:** The 32-opcode fixed-width instruction set, its bit-exact codec, an assembler,
//!    and a disassembler.
//! 3. **Core:** Fetch unit, stage sequencer with microcode tables, register file, ALU,
//!    load/store unit, and writeback, wired into one clocked processor.
//! 4. **Simulation:** Image loading, configuration, per-cycle traces, and statistics.

/// Common types and constants (register geometry, encoding masks, errors).
pub mod common;
/// Simulator configuration (defaults and JSON structures).
pub mod config;
/// Processor core (datapath units, control tables, composite device).
pub mod core;
/// Instruction set (opcodes, codec, assembler, disassembler).
pub mod isa;
/// Simulator driver and image loader.
pub mod sim;
/// Signal kernel, scheduler, and memories.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main processor type; owns every datapath unit and the statistics.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Tick scheduler; construct with `System::new`.
pub use crate::soc::System;
