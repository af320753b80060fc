//! Control signals.
//!
//! This module defines the per-opcode control words that configure each datapath unit. It performs:
//! 1. **Register Mapping:** How each register field resolves to a register file index.
//! 2. **Operand Selection:** Sources for the ALU and load/store unit inputs.
//! 3. **Operation Selection:** The ALU operation and the memory operation.
//! 4. **Writeback Routing:** Which result is written back and where it goes.
//! 5. **Stage Sequencing:** The five processor stages and their enable flags.

use std::fmt;

use serde::Serialize;

/// How a register field maps to a register file index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum RegMapOpt {
    /// The raw field value is the index.
    #[default]
    Direct,
    /// Forced to the link register.
    Link,
    /// Forced to the guard register.
    Disabled,
}

/// Register mapping of the three register fields of one opcode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegMap {
    /// Destination field mapping.
    pub rd: RegMapOpt,
    /// Source field mapping.
    pub rs: RegMapOpt,
    /// Second source field mapping.
    pub rt: RegMapOpt,
}

/// ALU operand source.
///
/// Every variant except `None` is one port of the operand multiplexer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum AluSrc {
    /// No source; reads as the undefined sentinel.
    #[default]
    None,
    /// Destination register value.
    RegD,
    /// Source register value.
    RegS,
    /// Second source register value.
    RegT,
    /// Zero-extended immediate field.
    Imm,
    /// Current program counter.
    Pc,
    /// Constant zero.
    Const0,
}

impl AluSrc {
    /// Returns the operand multiplexer port for this source, or `None` for [`AluSrc::None`].
    pub const fn port(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::RegD => Some(0),
            Self::RegS => Some(1),
            Self::RegT => Some(2),
            Self::Imm => Some(3),
            Self::Pc => Some(4),
            Self::Const0 => Some(5),
        }
    }
}

/// ALU operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum AluOp {
    /// No operation; produces the undefined sentinel.
    #[default]
    None,
    /// Wrapping 64-bit addition.
    IntAdd,
    /// Wrapping 64-bit subtraction.
    IntSub,
    /// Wrapping 64-bit multiplication.
    IntMul,
    /// Signed 64-bit division.
    IntDiv,
    /// IEEE-754 double addition.
    FpAdd,
    /// IEEE-754 double subtraction.
    FpSub,
    /// IEEE-754 double multiplication.
    FpMul,
    /// IEEE-754 double division.
    FpDiv,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Bitwise complement of operand 0.
    Not,
    /// Logical shift left.
    ShiftL,
    /// Logical shift right.
    ShiftR,
    /// 1 if the operands differ, else 0.
    CmpNeq,
    /// 1 if operand 0 is greater than operand 1 (signed), else 0.
    CmpGt,
    /// Operand 0 with bits 52-63 replaced by the low 12 bits of operand 1.
    SetHigh12,
}

/// ALU control word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AluCtrl {
    /// Operation.
    pub op: AluOp,
    /// First operand source.
    pub p0: AluSrc,
    /// Second operand source.
    pub p1: AluSrc,
}

/// Memory operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum LsuOp {
    /// No memory access.
    #[default]
    Nop,
    /// Read one cell.
    Load,
    /// Write one cell.
    Store,
}

/// Load/store unit address and data source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum LsuSrc {
    /// No source; reads as the undefined sentinel.
    #[default]
    None,
    /// The slot just below the link register: `rs - 8`, with `rs` mapped to the link register.
    Link,
    /// Source register value.
    RegS,
    /// ALU output.
    Alu,
    /// Address of the next sequential instruction.
    PcPlus4,
}

/// Load/store unit control word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LsuCtrl {
    /// Memory operation.
    pub op: LsuOp,
    /// Address source.
    pub addr: LsuSrc,
    /// Store data source.
    pub data: LsuSrc,
}

/// Writeback result source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum WbSrc {
    /// No result; reads as the undefined sentinel.
    #[default]
    None,
    /// ALU output.
    Alu,
    /// Load/store unit output.
    Lsu,
    /// Destination register value if the ALU output is nonzero, else the next sequential PC.
    AluCond,
}

/// Writeback destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum WbDst {
    /// The result is discarded.
    #[default]
    None,
    /// Written to the mapped destination register.
    RegD,
    /// Written to the program counter.
    Pc,
}

/// Writeback control word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WbCtrl {
    /// Result source.
    pub src: WbSrc,
    /// Result destination.
    pub dst: WbDst,
}

/// Every control word selected by one opcode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ControlSignals {
    /// Register field mapping.
    pub reg_map: RegMap,
    /// ALU control.
    pub alu: AluCtrl,
    /// Load/store unit control.
    pub lsu: LsuCtrl,
    /// Writeback control.
    pub wb: WbCtrl,
}

/// Processor stage. Exactly one stage is active per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    /// Instruction fetch.
    #[default]
    Fetch,
    /// Decode and register read.
    Decode,
    /// ALU evaluation.
    Execute,
    /// Data memory access.
    Memory,
    /// Register and PC update.
    Writeback,
}

impl Stage {
    /// Returns the stage that follows this one, wrapping Writeback to Fetch.
    pub const fn next(self) -> Self {
        match self {
            Self::Fetch => Self::Decode,
            Self::Decode => Self::Execute,
            Self::Execute => Self::Memory,
            Self::Memory => Self::Writeback,
            Self::Writeback => Self::Fetch,
        }
    }

    /// Returns the enable flags for this stage.
    pub const fn enables(self) -> StageEnables {
        StageEnables {
            fetch: matches!(self, Self::Fetch),
            decode: matches!(self, Self::Decode),
            execute: matches!(self, Self::Execute),
            memory: matches!(self, Self::Memory),
            writeback: matches!(self, Self::Writeback),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode",
            Self::Execute => "Execute",
            Self::Memory => "Memory",
            Self::Writeback => "Writeback",
        })
    }
}

/// Per-stage enable flags derived from the current stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct StageEnables {
    /// Fetch stage active.
    pub fetch: bool,
    /// Decode stage active.
    pub decode: bool,
    /// Execute stage active; gates the ALU.
    pub execute: bool,
    /// Memory stage active; gates the load/store unit.
    pub memory: bool,
    /// Writeback stage active; gates register and PC writes.
    pub writeback: bool,
}
