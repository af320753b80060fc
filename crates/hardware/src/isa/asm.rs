//! Line assembler.
//!
//! This module turns assembly text into instructions. It provides:
//! 1. **Parsing:** One instruction per line, `#` or `;` comments, `r0`..`r31` registers,
//!    and decimal or `0x` hexadecimal immediates.
//! 2. **Operand Checking:** Each opcode takes exactly the operands it uses, in
//!    `rd, rs, rt, imm` order (e.g., `addi r1, r0, 5`, `br r3`, `bri 0x40`, `halt`).
//! 3. **Image Building:** Packing the result into memory cells, padded with `halt`.

use crate::common::constants::{IMM_MASK, NUM_GPRS};
use crate::common::error::AsmError;
use crate::core::pipeline::control::operand_slots;
use crate::isa::instruction::{Instr, build_image};
use crate::isa::opcodes::Opcode;

/// Assembles a whole source text.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered, tagged with its 1-based line number.
pub fn assemble(src: &str) -> Result<Vec<Instr>, AsmError> {
    let mut out = Vec::new();
    for (idx, text) in src.lines().enumerate() {
        if let Some(instr) = assemble_line(idx + 1, text)? {
            out.push(instr);
        }
    }
    Ok(out)
}

/// Assembles source text into an instruction memory image.
///
/// A trailing `halt` is appended when the instruction count is odd, so the image always
/// fills whole cells.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered.
pub fn assemble_image(src: &str) -> Result<Vec<u64>, AsmError> {
    let mut instrs = assemble(src)?;
    if instrs.len() % 2 != 0 {
        instrs.push(Instr::new(Opcode::Halt, 0, 0, 0, 0));
    }
    Ok(build_image(&instrs))
}

/// Assembles one source line. Blank and comment-only lines yield `None`.
///
/// # Errors
///
/// Returns an [`AsmError`] for an unknown mnemonic, a malformed operand, or the wrong
/// operand count.
pub fn assemble_line(line: usize, text: &str) -> Result<Option<Instr>, AsmError> {
    let code = text
        .split(['#', ';'])
        .next()
        .unwrap_or_default()
        .trim();
    if code.is_empty() {
        return Ok(None);
    }

    let (mnemonic, rest) = code.split_once(char::is_whitespace).unwrap_or((code, ""));
    let opcode: Opcode = mnemonic.parse().map_err(|()| AsmError::UnknownMnemonic {
        line,
        mnemonic: mnemonic.to_string(),
    })?;

    let operands: Vec<&str> = rest
        .split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .collect();
    let slots = operand_slots(opcode);
    if operands.len() != slots.count() {
        return Err(AsmError::OperandCount {
            line,
            mnemonic: opcode.mnemonic().to_string(),
            expected: slots.count(),
            found: operands.len(),
        });
    }

    // The count matches, so every used slot has a token.
    let mut tokens = operands.into_iter();
    let mut reg = |used: bool| -> Result<u8, AsmError> {
        if used {
            parse_reg(line, tokens.next().unwrap_or_default())
        } else {
            Ok(0)
        }
    };
    let rd = reg(slots.rd)?;
    let rs = reg(slots.rs)?;
    let rt = reg(slots.rt)?;
    let imm = if slots.imm {
        parse_imm(line, tokens.next().unwrap_or_default())?
    } else {
        0
    };

    Ok(Some(Instr::new(opcode, rd, rs, rt, imm)))
}

fn parse_reg(line: usize, tok: &str) -> Result<u8, AsmError> {
    let bad = || AsmError::BadRegister {
        line,
        token: tok.to_string(),
    };
    let num = tok
        .strip_prefix(['r', 'R'])
        .ok_or_else(bad)?
        .parse::<u8>()
        .map_err(|_| bad())?;
    if usize::from(num) < NUM_GPRS {
        Ok(num)
    } else {
        Err(bad())
    }
}

fn parse_imm(line: usize, tok: &str) -> Result<u16, AsmError> {
    let bad = || AsmError::BadImmediate {
        line,
        token: tok.to_string(),
    };
    let val = match tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => tok.parse::<u32>(),
    }
    .map_err(|_| bad())?;
    if val <= IMM_MASK {
        Ok(val as u16)
    } else {
        Err(bad())
    }
}
