//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the execute-stage ALU. Two six-port multiplexers select the
//! operands from the register read ports, the immediate, the PC, or zero; the selected
//! operation runs combinationally and its result is captured in an output latch only on
//! ticks where the execute stage is enabled, so the output holds steady otherwise.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: IntAdd, IntSub, IntMul, IntDiv
//! - [`float`]:      FpAdd, FpSub, FpMul, FpDiv
//! - [`logic`]:      And, Or, Xor, Not, CmpNeq, CmpGt
//! - [`shifts`]:     ShiftL, ShiftR, SetHigh12

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Double-precision operations on bit-reinterpreted lanes.
pub mod float;

/// Bitwise logical and comparison operations.
pub mod logic;

/// Shift and high-field insert operations.
pub mod shifts;

use tracing::{trace, warn};

use crate::common::constants::UNDEFINED_SENTINEL;
use crate::core::arch::regbank::RegValues;
use crate::core::pipeline::signals::{AluCtrl, AluOp, AluSrc};
use crate::soc::mux::Mux;
use crate::soc::signal::{Latch, Signal};
use crate::soc::traits::Clocked;

/// Number of operand multiplexer ports: rd, rs, rt, imm, pc, zero.
pub const OPERAND_PORTS: usize = 6;

/// The execute-stage ALU with its operand multiplexers and output latch.
#[derive(Clone, Debug)]
pub struct Alu {
    p0_mux: Mux,
    p1_mux: Mux,
    out: Latch<u64>,
}

impl Alu {
    /// Creates an ALU whose output reads zero until first enabled.
    pub const fn new() -> Self {
        Self {
            p0_mux: Mux::new("alu.p0", OPERAND_PORTS),
            p1_mux: Mux::new("alu.p1", OPERAND_PORTS),
            out: Latch::new(0),
        }
    }

    /// Executes an ALU operation.
    ///
    /// Dispatches to the appropriate submodule based on the operation type.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand
    ///
    /// # Returns
    ///
    /// The 64-bit result, or the undefined sentinel for [`AluOp::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mcsim_core::core::pipeline::signals::AluOp;
    /// use mcsim_core::core::units::alu::Alu;
    ///
    /// assert_eq!(Alu::execute(AluOp::IntAdd, 40, 2), 42);
    /// assert_eq!(Alu::execute(AluOp::CmpGt, -1_i64 as u64, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::ShiftL, 8, 3), 64);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
        match op {
            AluOp::IntAdd | AluOp::IntSub | AluOp::IntMul | AluOp::IntDiv => {
                arithmetic::execute(op, a, b)
            }
            AluOp::FpAdd | AluOp::FpSub | AluOp::FpMul | AluOp::FpDiv => float::execute(op, a, b),
            AluOp::And | AluOp::Or | AluOp::Xor | AluOp::Not | AluOp::CmpNeq | AluOp::CmpGt => {
                logic::execute(op, a, b)
            }
            AluOp::ShiftL | AluOp::ShiftR | AluOp::SetHigh12 => shifts::execute(op, a, b),
            AluOp::None => {
                warn!("ALU evaluated with no operation");
                UNDEFINED_SENTINEL
            }
        }
    }

    /// Resolves both operands for a control word.
    ///
    /// # Arguments
    ///
    /// * `ctrl` - ALU control word selecting the operand sources.
    /// * `regs` - Register read-port values.
    /// * `imm`  - Zero-extended immediate field.
    /// * `pc`   - Current program counter.
    ///
    /// # Returns
    ///
    /// `(operand0, operand1)`. A source of [`AluSrc::None`] reads as the undefined sentinel.
    pub fn operands(&self, ctrl: AluCtrl, regs: RegValues, imm: u64, pc: u64) -> (u64, u64) {
        let ports = [regs.rd, regs.rs, regs.rt, imm, pc, 0];
        (
            Self::operand(&self.p0_mux, &ports, ctrl.p0),
            Self::operand(&self.p1_mux, &ports, ctrl.p1),
        )
    }

    fn operand(mux: &Mux, ports: &[u64; OPERAND_PORTS], src: AluSrc) -> u64 {
        match src.port() {
            Some(sel) => mux.select(ports, sel),
            None => {
                warn!(mux = mux.name(), "operand has no source");
                UNDEFINED_SENTINEL
            }
        }
    }

    /// Returns the committed ALU output.
    #[inline]
    pub fn out(&self) -> u64 {
        self.out.read()
    }

    /// Evaluates the ALU for this tick.
    ///
    /// When `enabled` is false nothing is scheduled and the output holds across the edge.
    pub fn do_function(&mut self, enabled: bool, op: AluOp, a: u64, b: u64) {
        if !enabled {
            return;
        }
        let res = Self::execute(op, a, b);
        trace!(?op, a, b, res, "alu");
        self.out.latch(res);
    }

    /// Clears the output latch.
    pub fn reset(&mut self) {
        self.out.reset();
    }
}

impl Default for Alu {
    fn default() -> Self {
        Self::new()
    }
}

impl Clocked for Alu {
    fn on_clock_edge(&mut self) {
        self.out.on_clock_edge();
    }
}
