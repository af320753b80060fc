//! ALU bitwise logic and comparisons.
//!
//! Comparisons produce `1` when true and `0` when false; the greater-than compare is signed.

use crate::core::pipeline::signals::AluOp;

/// Executes a logical or comparison operation.
///
/// # Arguments
///
/// * `op` - The ALU operation.
/// * `a`  - First operand.
/// * `b`  - Second operand (ignored by `Not`).
///
/// # Returns
///
/// The 64-bit result. Returns `0` for opcodes outside this group.
pub const fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Not => !a,
        AluOp::CmpNeq => (a != b) as u64,
        AluOp::CmpGt => ((a as i64) > (b as i64)) as u64,
        _ => 0,
    }
}
