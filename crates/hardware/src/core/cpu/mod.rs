//! Processor composite.
//!
//! This module wires the datapath units into one clocked device. It coordinates the following:
//! 1. **Settling:** Every combinational signal of a tick is computed from committed state
//!    alone, in data-flow order: fetch, decode, register read, ALU operands, LSU port,
//!    writeback.
//! 2. **Scheduling:** Each unit receives its settled inputs and schedules its pending
//!    writes; nothing becomes visible until the clock edge.
//! 3. **Retirement:** On the writeback tick the instruction is counted in the statistics,
//!    and the halt opcode raises the system stop flag.
//! 4. **Observation:** Per-cycle traces and register inspection without side effects.

use tracing::{debug, info};

use crate::common::constants::NUM_REGS;
use crate::common::error::ImageError;
use crate::config::Config;
use crate::core::arch::regbank::{RegBank, RegValues};
use crate::core::pipeline::signals::{LsuOp, Stage, StageEnables};
use crate::core::pipeline::stages::{Decoded, Decoder, Fetcher, WbOut, writeback_stage};
use crate::core::trace::CycleTrace;
use crate::core::units::alu::Alu;
use crate::core::units::lsu::Lsu;
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::{OpClass, Opcode};
use crate::soc::memory::SramPort;
use crate::soc::system::SimControl;
use crate::soc::traits::{Clocked, Device};
use crate::stats::SimStats;

/// Every combinational signal of one tick, settled from committed state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSignals {
    /// Active stage.
    pub stage: Stage,
    /// Stage enable flags.
    pub enables: StageEnables,
    /// Committed program counter.
    pub pc: u64,
    /// Address of the next sequential instruction.
    pub pc_plus_4: u64,
    /// Instruction word at the PC.
    pub word: u32,
    /// Decoder outputs.
    pub decoded: Decoded,
    /// Register read-port values.
    pub regs: RegValues,
    /// Selected ALU operands.
    pub alu_operands: (u64, u64),
    /// Committed ALU output.
    pub alu_out: u64,
    /// Data memory request.
    pub lsu_port: SramPort,
    /// Committed LSU output.
    pub lsu_out: u64,
    /// Writeback outputs.
    pub wb: WbOut,
}

/// The microcoded processor.
///
/// Owns every datapath unit by value; cross-unit wiring happens in [`Cpu::settle`].
#[derive(Clone, Debug)]
pub struct Cpu {
    fetcher: Fetcher,
    decoder: Decoder,
    regs: RegBank,
    alu: Alu,
    lsu: Lsu,
    /// Performance counters.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a processor at power-on state with memories sized from `config`.
    ///
    /// # Panics
    ///
    /// Panics if a memory capacity is not a non-zero multiple of 8; use
    /// [`Config::validate`] to check beforehand.
    pub fn new(config: &Config) -> Self {
        Self {
            fetcher: Fetcher::new(config.memory.imem_bytes),
            decoder: Decoder::new(),
            regs: RegBank::new(),
            alu: Alu::new(),
            lsu: Lsu::new(config.memory.dmem_bytes),
            stats: SimStats::default(),
        }
    }

    /// Loads a program image into instruction memory.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::TooLarge`] if the image does not fit.
    pub fn load_program(&mut self, image: &[u64]) -> Result<(), ImageError> {
        self.fetcher.load(image)
    }

    /// Loads a data image into data memory.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::TooLarge`] if the image does not fit.
    pub fn load_data(&mut self, image: &[u64]) -> Result<(), ImageError> {
        self.lsu.load(image)
    }

    /// Settles the combinational datapath for the current tick.
    ///
    /// Pure: reads committed state only and may be called any number of times.
    pub fn settle(&self) -> TickSignals {
        let stage = self.decoder.stage();
        let enables = stage.enables();
        let pc = self.fetcher.pc();
        let pc_plus_4 = self.fetcher.pc_plus_4();
        let word = self.fetcher.instruction();
        let decoded = Decoder::decode(word);
        let regs = self.regs.read(decoded.ids);
        let alu_operands = self
            .alu
            .operands(decoded.ctrl.alu, regs, decoded.instr.imm_u64(), pc);
        let alu_out = self.alu.out();
        let lsu_port = Lsu::port(enables.memory, decoded.ctrl.lsu, regs, alu_out, pc_plus_4);
        let lsu_out = self.lsu.out();
        let wb = writeback_stage(
            enables.writeback,
            decoded.ctrl.wb,
            regs,
            alu_out,
            lsu_out,
            pc_plus_4,
        );
        TickSignals {
            stage,
            enables,
            pc,
            pc_plus_4,
            word,
            decoded,
            regs,
            alu_operands,
            alu_out,
            lsu_port,
            lsu_out,
            wb,
        }
    }

    /// Takes a trace snapshot of the current tick.
    ///
    /// # Arguments
    ///
    /// * `clock` - Ticks completed so far, recorded in the snapshot.
    pub fn trace(&self, clock: u64) -> CycleTrace {
        let sig = self.settle();
        CycleTrace {
            clock,
            stage: sig.stage,
            pc: sig.pc,
            word: sig.word,
            disasm: disassemble(sig.decoded.instr),
            enables: sig.enables,
            ctrl: sig.decoded.ctrl,
            ids: sig.decoded.ids,
            alu_out: sig.alu_out,
            lsu_out: sig.lsu_out,
            reg_write: sig.wb.reg_write,
            pc_write: sig.wb.pc_write,
            regs: self.regs.snapshot().to_vec(),
        }
    }

    /// Restores every register to its power-on value. Memory contents are kept.
    pub fn reset(&mut self) {
        info!("cpu reset");
        self.fetcher.reset();
        self.decoder.reset();
        self.regs.reset();
        self.alu.reset();
        self.lsu.reset();
        self.stats = SimStats::default();
    }

    /// Returns the committed program counter.
    pub fn pc(&self) -> u64 {
        self.fetcher.pc()
    }

    /// Returns the committed stage.
    pub fn stage(&self) -> Stage {
        self.decoder.stage()
    }

    /// Returns the committed value of register `idx` (0-32).
    ///
    /// # Panics
    ///
    /// Panics if `idx` is past the guard register.
    pub fn reg(&self, idx: usize) -> u64 {
        self.regs.get(idx)
    }

    /// Returns a snapshot of the register file, guard last.
    pub fn regs(&self) -> [u64; NUM_REGS] {
        self.regs.snapshot()
    }

    /// Returns the register file mutably for initial state setup.
    pub const fn regbank_mut(&mut self) -> &mut RegBank {
        &mut self.regs
    }

    /// Returns the fetch unit.
    pub const fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Returns the ALU.
    pub const fn alu(&self) -> &Alu {
        &self.alu
    }

    /// Returns the load/store unit.
    pub const fn lsu(&self) -> &Lsu {
        &self.lsu
    }

    fn retire(&mut self, sig: &TickSignals, ctl: &mut SimControl) {
        let opcode = sig.decoded.instr.opcode;
        let class = opcode.class();
        let taken = class == OpClass::Branch && sig.wb.pc_write != Some(sig.pc_plus_4);
        self.stats.record_retire(class, taken);
        debug!(
            pc = sig.pc,
            instr = %disassemble(sig.decoded.instr),
            next_pc = ?sig.wb.pc_write,
            "retire"
        );
        match opcode {
            Opcode::Halt => ctl.stop(),
            Opcode::In | Opcode::Out => debug!(op = %opcode, "I/O stub"),
            _ => {}
        }
    }
}

impl Clocked for Cpu {
    fn on_clock_edge(&mut self) {
        self.fetcher.on_clock_edge();
        self.decoder.on_clock_edge();
        self.regs.on_clock_edge();
        self.alu.on_clock_edge();
        self.lsu.on_clock_edge();
    }
}

impl Device for Cpu {
    fn name(&self) -> &str {
        "cpu"
    }

    fn do_function(&mut self, ctl: &mut SimControl) {
        let sig = self.settle();

        let halting = sig.enables.writeback && sig.decoded.instr.opcode == Opcode::Halt;
        self.fetcher.do_function(sig.enables.fetch, sig.wb.pc_write, !halting);
        self.decoder.do_function();
        self.regs.do_function(sig.decoded.ids.rd, sig.wb.reg_write);
        let (a, b) = sig.alu_operands;
        self.alu
            .do_function(sig.enables.execute, sig.decoded.ctrl.alu.op, a, b);
        self.lsu.do_function(sig.lsu_port);

        if sig.enables.memory {
            match sig.decoded.ctrl.lsu.op {
                LsuOp::Load => self.stats.dmem_reads += 1,
                LsuOp::Store => self.stats.dmem_writes += 1,
                LsuOp::Nop => {}
            }
        }
        if sig.enables.writeback {
            self.retire(&sig, ctl);
        }
        self.stats.cycles += 1;
    }
}
