//! Instruction Set Architecture.
//!
//! This module defines the 32-opcode fixed-width instruction set. It provides:
//! 1. **Opcodes:** The named opcode space and its statistics categories.
//! 2. **Instruction:** Bit-exact packing of instruction records and memory images.
//! 3. **Assembler:** Text to instructions and images.
//! 4. **Disassembler:** Instructions to text.

/// Line assembler.
pub mod asm;

/// Instruction disassembler.
pub mod disasm;

/// Instruction record and image packing.
pub mod instruction;

/// Opcode definitions.
pub mod opcodes;

pub use instruction::{Instr, build_image, try_build_image};
pub use opcodes::{OpClass, Opcode};
