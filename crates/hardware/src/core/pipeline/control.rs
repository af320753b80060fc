//! Microcode tables.
//!
//! Four fixed lookup tables indexed by opcode select every control signal of the datapath:
//! the register mapping, the ALU control word, the load/store control word, and the
//! writeback control word. Each opcode has exactly one entry in every table, so decoding
//! is a constant-time lookup with no computation.

use crate::core::pipeline::signals::{
    AluCtrl, AluOp, AluSrc, ControlSignals, LsuCtrl, LsuOp, LsuSrc, RegMap, RegMapOpt, WbCtrl,
    WbDst, WbSrc,
};
use crate::isa::opcodes::Opcode;

use crate::core::pipeline::signals::AluSrc::{
    Const0 as ZERO, Imm as IMM, Pc as PC, RegD as RD, RegS as RS, RegT as RT,
};
use crate::core::pipeline::signals::RegMapOpt::{Direct as D, Disabled as X, Link as L};

const fn map(rd: RegMapOpt, rs: RegMapOpt, rt: RegMapOpt) -> RegMap {
    RegMap { rd, rs, rt }
}

const fn alu(op: AluOp, p0: AluSrc, p1: AluSrc) -> AluCtrl {
    AluCtrl { op, p0, p1 }
}

const fn lsu(op: LsuOp, addr: LsuSrc, data: LsuSrc) -> LsuCtrl {
    LsuCtrl { op, addr, data }
}

const fn wb(src: WbSrc, dst: WbDst) -> WbCtrl {
    WbCtrl { src, dst }
}

const NO_MEM: LsuCtrl = lsu(LsuOp::Nop, LsuSrc::None, LsuSrc::None);
const TO_RD: WbCtrl = wb(WbSrc::Alu, WbDst::RegD);
const TO_PC: WbCtrl = wb(WbSrc::Alu, WbDst::Pc);
const COND_PC: WbCtrl = wb(WbSrc::AluCond, WbDst::Pc);
const NO_WB: WbCtrl = wb(WbSrc::None, WbDst::None);

/// Register mapping table, indexed by opcode.
pub const REG_MAP_TABLE: [RegMap; 32] = [
    map(D, D, D), // add
    map(D, D, X), // addi
    map(D, D, D), // sub
    map(D, D, X), // subi
    map(D, D, D), // mul
    map(D, D, D), // div
    map(D, D, D), // and
    map(D, D, D), // or
    map(D, D, D), // xor
    map(D, D, X), // not
    map(D, D, D), // shr
    map(D, D, X), // shri
    map(D, D, D), // shl
    map(D, D, X), // shli
    map(D, X, X), // br
    map(D, X, X), // brr
    map(X, X, X), // bri
    map(D, D, X), // brnz
    map(D, L, X), // call
    map(X, L, X), // ret
    map(D, D, D), // brgt
    map(D, D, X), // ld
    map(D, D, X), // mov
    map(D, X, X), // movi
    map(D, D, X), // st
    map(D, D, D), // addf
    map(D, D, D), // subf
    map(D, D, D), // mulf
    map(D, D, D), // divf
    map(X, X, X), // in
    map(X, X, X), // out
    map(X, X, X), // halt
];

/// ALU control table, indexed by opcode.
pub const ALU_TABLE: [AluCtrl; 32] = [
    alu(AluOp::IntAdd, RS, RT),      // add
    alu(AluOp::IntAdd, RS, IMM),     // addi
    alu(AluOp::IntSub, RS, RT),      // sub
    alu(AluOp::IntSub, RS, IMM),     // subi
    alu(AluOp::IntMul, RS, RT),      // mul
    alu(AluOp::IntDiv, RS, RT),      // div
    alu(AluOp::And, RS, RT),         // and
    alu(AluOp::Or, RS, RT),          // or
    alu(AluOp::Xor, RS, RT),         // xor
    alu(AluOp::Not, RS, ZERO),       // not
    alu(AluOp::ShiftR, RS, RT),      // shr
    alu(AluOp::ShiftR, RS, IMM),     // shri
    alu(AluOp::ShiftL, RS, RT),      // shl
    alu(AluOp::ShiftL, RS, IMM),     // shli
    alu(AluOp::IntAdd, RD, ZERO),    // br
    alu(AluOp::IntAdd, RD, PC),      // brr
    alu(AluOp::IntAdd, RD, IMM),     // bri
    alu(AluOp::CmpNeq, RS, ZERO),    // brnz
    alu(AluOp::IntAdd, RD, ZERO),    // call
    alu(AluOp::IntAdd, ZERO, ZERO),  // ret
    alu(AluOp::CmpGt, RS, RT),       // brgt
    alu(AluOp::IntAdd, RS, IMM),     // ld
    alu(AluOp::IntAdd, RS, ZERO),    // mov
    alu(AluOp::SetHigh12, RD, IMM),  // movi
    alu(AluOp::IntAdd, RS, IMM),     // st
    alu(AluOp::FpAdd, RS, RT),       // addf
    alu(AluOp::FpSub, RS, RT),       // subf
    alu(AluOp::FpMul, RS, RT),       // mulf
    alu(AluOp::FpDiv, RS, RT),       // divf
    alu(AluOp::IntAdd, ZERO, ZERO),  // in
    alu(AluOp::IntAdd, ZERO, ZERO),  // out
    alu(AluOp::IntAdd, ZERO, ZERO),  // halt
];

/// Load/store control table, indexed by opcode.
pub const LSU_TABLE: [LsuCtrl; 32] = [
    NO_MEM, // add
    NO_MEM, // addi
    NO_MEM, // sub
    NO_MEM, // subi
    NO_MEM, // mul
    NO_MEM, // div
    NO_MEM, // and
    NO_MEM, // or
    NO_MEM, // xor
    NO_MEM, // not
    NO_MEM, // shr
    NO_MEM, // shri
    NO_MEM, // shl
    NO_MEM, // shli
    NO_MEM, // br
    NO_MEM, // brr
    NO_MEM, // bri
    NO_MEM, // brnz
    lsu(LsuOp::Store, LsuSrc::Link, LsuSrc::PcPlus4), // call
    lsu(LsuOp::Load, LsuSrc::Link, LsuSrc::None),     // ret
    NO_MEM, // brgt
    lsu(LsuOp::Load, LsuSrc::Alu, LsuSrc::None),      // ld
    NO_MEM, // mov
    NO_MEM, // movi
    lsu(LsuOp::Store, LsuSrc::Alu, LsuSrc::RegS),     // st
    NO_MEM, // addf
    NO_MEM, // subf
    NO_MEM, // mulf
    NO_MEM, // divf
    NO_MEM, // in
    NO_MEM, // out
    NO_MEM, // halt
];

/// Writeback control table, indexed by opcode.
pub const WB_TABLE: [WbCtrl; 32] = [
    TO_RD,   // add
    TO_RD,   // addi
    TO_RD,   // sub
    TO_RD,   // subi
    TO_RD,   // mul
    TO_RD,   // div
    TO_RD,   // and
    TO_RD,   // or
    TO_RD,   // xor
    TO_RD,   // not
    TO_RD,   // shr
    TO_RD,   // shri
    TO_RD,   // shl
    TO_RD,   // shli
    TO_PC,   // br
    TO_PC,   // brr
    TO_PC,   // bri
    COND_PC, // brnz
    TO_PC,   // call
    wb(WbSrc::Lsu, WbDst::Pc),   // ret
    COND_PC, // brgt
    wb(WbSrc::Lsu, WbDst::RegD), // ld
    TO_RD,   // mov
    TO_RD,   // movi
    NO_WB,   // st
    TO_RD,   // addf
    TO_RD,   // subf
    TO_RD,   // mulf
    TO_RD,   // divf
    NO_WB,   // in
    NO_WB,   // out
    NO_WB,   // halt
];

/// Looks up every control word for `op`.
#[inline]
pub const fn lookup(op: Opcode) -> ControlSignals {
    let idx = op.bits() as usize;
    ControlSignals {
        reg_map: REG_MAP_TABLE[idx],
        alu: ALU_TABLE[idx],
        lsu: LSU_TABLE[idx],
        wb: WB_TABLE[idx],
    }
}

/// Which instruction fields an opcode actually uses.
///
/// A register field is used when it maps through directly; the immediate is used when
/// either ALU operand selects it. The assembler and disassembler share this operand order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct OperandSlots {
    /// `rd` appears in the operand list.
    pub rd: bool,
    /// `rs` appears in the operand list.
    pub rs: bool,
    /// `rt` appears in the operand list.
    pub rt: bool,
    /// The immediate appears in the operand list.
    pub imm: bool,
}

impl OperandSlots {
    /// Number of operands written in assembly.
    pub const fn count(self) -> usize {
        self.rd as usize + self.rs as usize + self.rt as usize + self.imm as usize
    }
}

/// Returns the operand slots `op` uses.
pub const fn operand_slots(op: Opcode) -> OperandSlots {
    let ctrl = lookup(op);
    OperandSlots {
        rd: matches!(ctrl.reg_map.rd, RegMapOpt::Direct),
        rs: matches!(ctrl.reg_map.rs, RegMapOpt::Direct),
        rt: matches!(ctrl.reg_map.rt, RegMapOpt::Direct),
        imm: matches!(ctrl.alu.p0, AluSrc::Imm) || matches!(ctrl.alu.p1, AluSrc::Imm),
    }
}
