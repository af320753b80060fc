//! Per-cycle trace.
//!
//! A [`CycleTrace`] is a read-only snapshot of the settled datapath for one tick, taken
//! before the clock edge. Taking it never mutates simulated state. It serializes to JSON
//! for machine consumers and renders as one text line for people.

use std::fmt;

use serde::Serialize;

use crate::core::arch::regbank::RegIds;
use crate::core::pipeline::signals::{ControlSignals, Stage, StageEnables};

/// Snapshot of one tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CycleTrace {
    /// Ticks completed before this one.
    pub clock: u64,
    /// Active stage.
    pub stage: Stage,
    /// Committed program counter.
    pub pc: u64,
    /// Instruction word at the PC.
    pub word: u32,
    /// Disassembly of `word`.
    pub disasm: String,
    /// Stage enable flags.
    pub enables: StageEnables,
    /// Control words of the decoded opcode.
    pub ctrl: ControlSignals,
    /// Mapped register indices.
    pub ids: RegIds,
    /// Committed ALU output.
    pub alu_out: u64,
    /// Committed LSU output.
    pub lsu_out: u64,
    /// Register write scheduled this tick, if any.
    pub reg_write: Option<u64>,
    /// PC write scheduled this tick, if any.
    pub pc_write: Option<u64>,
    /// Committed register file, guard last.
    pub regs: Vec<u64>,
}

impl fmt::Display for CycleTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>8}] {:<9} pc={:#06x} {:08x}  {:<20} alu={:#x} lsu={:#x}",
            self.clock,
            self.stage,
            self.pc,
            self.word,
            self.disasm,
            self.alu_out,
            self.lsu_out,
        )?;
        for (idx, val) in self.regs.iter().enumerate() {
            if *val != 0 {
                write!(f, " r{idx}={val:#x}")?;
            }
        }
        Ok(())
    }
}
