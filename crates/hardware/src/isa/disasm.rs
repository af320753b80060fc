//! Instruction disassembler.
//!
//! Converts an instruction into the text form accepted by the
//! [`assembler`](crate::isa::asm): the mnemonic followed by the operands the opcode
//! actually uses, in `rd, rs, rt, imm` order.
//!
//! # Usage
//!
//! ```
//! use mcsim_core::isa::disasm::disassemble;
//! use mcsim_core::isa::{Instr, Opcode};
//!
//! let text = disassemble(Instr::new(Opcode::Addi, 1, 0, 0, 5));
//! assert_eq!(text, "addi r1, r0, 5");
//! ```

use crate::core::pipeline::control::operand_slots;
use crate::isa::instruction::Instr;

/// Renders `instr` as assembly text.
pub fn disassemble(instr: Instr) -> String {
    let slots = operand_slots(instr.opcode);
    let mut operands = Vec::with_capacity(slots.count());
    if slots.rd {
        operands.push(format!("r{}", instr.rd));
    }
    if slots.rs {
        operands.push(format!("r{}", instr.rs));
    }
    if slots.rt {
        operands.push(format!("r{}", instr.rt));
    }
    if slots.imm {
        operands.push(instr.imm.to_string());
    }

    if operands.is_empty() {
        instr.opcode.mnemonic().to_string()
    } else {
        format!("{} {}", instr.opcode.mnemonic(), operands.join(", "))
    }
}

/// Renders a packed instruction word as assembly text.
pub fn disassemble_word(word: u32) -> String {
    disassemble(Instr::from_u32(word))
}
