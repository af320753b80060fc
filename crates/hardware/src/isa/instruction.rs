//! Instruction encoding and decoding.
//!
//! This module converts between the five-field instruction record and its packed form. It provides:
//! 1. **Codec:** Shift/mask packing of [`Instr`] to and from a 32-bit word.
//! 2. **Image Building:** Packing pairs of instructions into 64-bit memory cells.
//!
//! Word layout: bits [4:0] opcode, [9:5] rd, [14:10] rs, [19:15] rt, [31:20] imm.
//! A memory cell holds two words, the first in bits [31:0] and the second in bits [63:32].

use serde::Serialize;

use crate::common::constants::{
    IMM_MASK, IMM_SHIFT, OPCODE_MASK, RD_SHIFT, REG_MASK, RS_SHIFT, RT_SHIFT,
};
use crate::common::error::{ImageError, fatal};
use crate::isa::opcodes::Opcode;

/// A decoded instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Instr {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register field (5 bits).
    pub rd: u8,
    /// Source register field (5 bits).
    pub rs: u8,
    /// Second source register field (5 bits).
    pub rt: u8,
    /// Immediate field (12 bits, zero-extended when used).
    pub imm: u16,
}

impl Instr {
    /// Builds an instruction, truncating each field to its encoded width.
    pub const fn new(opcode: Opcode, rd: u8, rs: u8, rt: u8, imm: u16) -> Self {
        Self {
            opcode,
            rd: rd & REG_MASK as u8,
            rs: rs & REG_MASK as u8,
            rt: rt & REG_MASK as u8,
            imm: imm & IMM_MASK as u16,
        }
    }

    /// Unpacks a 32-bit instruction word.
    #[inline]
    pub const fn from_u32(word: u32) -> Self {
        Self {
            opcode: Opcode::from_u5((word & OPCODE_MASK) as u8),
            rd: ((word >> RD_SHIFT) & REG_MASK) as u8,
            rs: ((word >> RS_SHIFT) & REG_MASK) as u8,
            rt: ((word >> RT_SHIFT) & REG_MASK) as u8,
            imm: ((word >> IMM_SHIFT) & IMM_MASK) as u16,
        }
    }

    /// Packs the instruction into a 32-bit word.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        (self.opcode.bits() as u32 & OPCODE_MASK)
            | ((self.rd as u32 & REG_MASK) << RD_SHIFT)
            | ((self.rs as u32 & REG_MASK) << RS_SHIFT)
            | ((self.rt as u32 & REG_MASK) << RT_SHIFT)
            | ((self.imm as u32 & IMM_MASK) << IMM_SHIFT)
    }

    /// Returns the immediate zero-extended to 64 bits.
    #[inline]
    pub const fn imm_u64(self) -> u64 {
        self.imm as u64
    }
}

impl From<u32> for Instr {
    fn from(word: u32) -> Self {
        Self::from_u32(word)
    }
}

impl From<Instr> for u32 {
    fn from(instr: Instr) -> Self {
        instr.as_u32()
    }
}

/// Packs two instruction words into one memory cell.
#[inline]
pub const fn pack_cell(low: Instr, high: Instr) -> u64 {
    (low.as_u32() as u64) | ((high.as_u32() as u64) << 32)
}

/// Selects the instruction word at byte address `addr` from the cell containing it.
///
/// Bit 2 of the address chooses the high half.
#[inline]
pub const fn select_half(cell: u64, addr: u64) -> u32 {
    if addr & 0x4 == 0 {
        cell as u32
    } else {
        (cell >> 32) as u32
    }
}

/// Packs an instruction sequence into memory cells, two per cell, low instruction first.
///
/// # Errors
///
/// Returns [`ImageError::OddInstructionCount`] if `instrs` has an odd length.
pub fn try_build_image(instrs: &[Instr]) -> Result<Vec<u64>, ImageError> {
    if instrs.len() % 2 != 0 {
        return Err(ImageError::OddInstructionCount(instrs.len()));
    }
    Ok(instrs
        .chunks_exact(2)
        .map(|pair| pack_cell(pair[0], pair[1]))
        .collect())
}

/// Packs an instruction sequence into memory cells, two per cell, low instruction first.
///
/// # Panics
///
/// Panics if `instrs` has an odd length; an odd image is a programming error.
pub fn build_image(instrs: &[Instr]) -> Vec<u64> {
    match try_build_image(instrs) {
        Ok(cells) => cells,
        Err(err) => fatal("build_image", err),
    }
}
