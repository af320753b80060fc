//! Global Machine Constants.
//!
//! This module defines constants shared across the datapath. It includes:
//! 1. **Register Constants:** Register file size, guard slot, and link register.
//! 2. **Memory Constants:** Cell width and default memory capacities.
//! 3. **Instruction Constants:** Field masks and shifts of the 32-bit encoding.
//! 4. **Sentinels:** Values produced by disabled or undefined signal sources.

/// Number of general-purpose registers.
pub const NUM_GPRS: usize = 32;

/// Index of the guard register that disabled operand slots resolve to.
pub const GUARD_REG: usize = 32;

/// Total number of register file entries (general-purpose plus guard).
pub const NUM_REGS: usize = NUM_GPRS + 1;

/// Register implicitly used by call and return as the link register.
pub const LINK_REG: usize = 31;

/// Value held by the guard register from power-on.
///
/// Kept at zero so that the branch-immediate form, whose base operand is
/// disabled, jumps to the absolute immediate address.
pub const GUARD_SENTINEL: u64 = 0;

/// Value produced by an undefined signal source or a disabled operation.
pub const UNDEFINED_SENTINEL: u64 = 12_345_678;

/// Width of one memory cell in bytes.
pub const CELL_BYTES: u64 = 8;

/// Size of one instruction in bytes.
pub const INSTRUCTION_BYTES: u64 = 4;

/// Offset from the link register at which call and return keep the return address.
pub const LINK_SLOT_OFFSET: u64 = 8;

/// Default instruction memory capacity in bytes.
pub const DEFAULT_IMEM_BYTES: usize = 1024;

/// Default data memory capacity in bytes.
pub const DEFAULT_DMEM_BYTES: usize = 1024;

/// Bit mask for the opcode field (bits 0-4).
pub const OPCODE_MASK: u32 = 0x1F;

/// Bit mask for a register field.
pub const REG_MASK: u32 = 0x1F;

/// Bit position of the destination register field.
pub const RD_SHIFT: u32 = 5;

/// Bit position of the source register field.
pub const RS_SHIFT: u32 = 10;

/// Bit position of the second source register field.
pub const RT_SHIFT: u32 = 15;

/// Bit mask for the immediate field (12 bits).
pub const IMM_MASK: u32 = 0xFFF;

/// Bit position of the immediate field.
pub const IMM_SHIFT: u32 = 20;

/// First bit replaced by the set-high-bits ALU operation.
pub const HIGH12_SHIFT: u32 = 52;
