//! Instruction Decode (ID) and Control Unit.
//!
//! This module implements the stage sequencer and the microcode lookup. It performs:
//! 1. **Sequencing:** A five-state stage register that advances one step every tick,
//!    wrapping Writeback to Fetch, with one enable flag per state.
//! 2. **Field Extraction:** Unpacking the fetched word into an [`Instr`].
//! 3. **Signal Lookup:** Indexing the control tables by opcode.
//! 4. **Register Mapping:** Resolving each register field to a register file index.

use tracing::trace;

use crate::common::constants::{GUARD_REG, LINK_REG};
use crate::core::arch::regbank::RegIds;
use crate::core::pipeline::control;
use crate::core::pipeline::signals::{ControlSignals, RegMapOpt, Stage, StageEnables};
use crate::isa::instruction::Instr;
use crate::soc::signal::{Reg, Signal};
use crate::soc::traits::Clocked;

/// Everything the decoder derives from one instruction word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Unpacked instruction fields.
    pub instr: Instr,
    /// Control words for the opcode.
    pub ctrl: ControlSignals,
    /// Mapped register file indices.
    pub ids: RegIds,
}

/// Stage sequencer and decoder.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    stage: Reg<Stage>,
}

impl Decoder {
    /// Creates a decoder in the Fetch stage.
    pub const fn new() -> Self {
        Self {
            stage: Reg::new(Stage::Fetch),
        }
    }

    /// Returns the committed stage.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage.read()
    }

    /// Returns the enable flags of the committed stage.
    #[inline]
    pub fn enables(&self) -> StageEnables {
        self.stage().enables()
    }

    /// Decodes an instruction word.
    ///
    /// # Arguments
    ///
    /// * `word` - Raw 32-bit instruction.
    ///
    /// # Returns
    ///
    /// The unpacked fields, the opcode's control words, and the mapped register indices.
    pub fn decode(word: u32) -> Decoded {
        let instr = Instr::from_u32(word);
        let ctrl = control::lookup(instr.opcode);
        let ids = RegIds {
            rd: Self::map_reg(ctrl.reg_map.rd, instr.rd),
            rs: Self::map_reg(ctrl.reg_map.rs, instr.rs),
            rt: Self::map_reg(ctrl.reg_map.rt, instr.rt),
        };
        Decoded { instr, ctrl, ids }
    }

    /// Resolves one register field.
    ///
    /// Direct fields pass through; link fields become the link register; disabled fields
    /// become the guard register.
    #[inline]
    pub const fn map_reg(opt: RegMapOpt, field: u8) -> usize {
        match opt {
            RegMapOpt::Direct => field as usize,
            RegMapOpt::Link => LINK_REG,
            RegMapOpt::Disabled => GUARD_REG,
        }
    }

    /// Schedules the advance to the next stage.
    pub fn do_function(&mut self) {
        let next = self.stage().next();
        trace!(from = ?self.stage(), to = ?next, "stage");
        self.stage.write(next);
    }

    /// Returns to the Fetch stage.
    pub fn reset(&mut self) {
        self.stage.reset();
    }
}

impl Clocked for Decoder {
    fn on_clock_edge(&mut self) {
        self.stage.on_clock_edge();
    }
}
