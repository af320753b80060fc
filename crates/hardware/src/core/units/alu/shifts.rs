//! ALU shifts and high-field insertion.
//!
//! Shifts are logical in both directions. A shift amount of 64 or more clears the value.
//! `SetHigh12` keeps bits 0-51 of the first operand and replaces bits 52-63 with the low
//! 12 bits of the second.

use crate::common::constants::{HIGH12_SHIFT, IMM_MASK};
use crate::core::pipeline::signals::AluOp;

/// Mask of the bits `SetHigh12` preserves (bits 0-51).
const LOW52_MASK: u64 = (1 << HIGH12_SHIFT) - 1;

/// Executes a shift or field-insert operation.
///
/// # Arguments
///
/// * `op` - The ALU operation.
/// * `a`  - The value to shift, or the value whose high field is replaced.
/// * `b`  - The shift amount, or the new high field in its low 12 bits.
///
/// # Returns
///
/// The 64-bit result. Returns `0` for opcodes outside this group.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    let amount = u32::try_from(b).unwrap_or(u32::MAX);
    match op {
        AluOp::ShiftL => a.checked_shl(amount).unwrap_or(0),
        AluOp::ShiftR => a.checked_shr(amount).unwrap_or(0),
        AluOp::SetHigh12 => (a & LOW52_MASK) | ((b & u64::from(IMM_MASK)) << HIGH12_SHIFT),
        _ => 0,
    }
}
