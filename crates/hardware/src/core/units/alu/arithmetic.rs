//! ALU integer arithmetic.
//!
//! Implements two's-complement add, subtract, multiply, and signed divide on 64-bit
//! lanes. Overflow wraps. Division by zero yields the undefined sentinel instead of
//! trapping, and `i64::MIN / -1` wraps to `i64::MIN`.

use tracing::warn;

use crate::common::constants::UNDEFINED_SENTINEL;
use crate::core::pipeline::signals::AluOp;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation (must be an `Int*` variant).
/// * `a`  - First operand, interpreted as signed.
/// * `b`  - Second operand, interpreted as signed.
///
/// # Returns
///
/// The 64-bit result. Returns `0` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    let (x, y) = (a as i64, b as i64);
    match op {
        AluOp::IntAdd => x.wrapping_add(y) as u64,
        AluOp::IntSub => x.wrapping_sub(y) as u64,
        AluOp::IntMul => x.wrapping_mul(y) as u64,
        AluOp::IntDiv => {
            if y == 0 {
                warn!(dividend = x, "integer division by zero");
                UNDEFINED_SENTINEL
            } else {
                x.wrapping_div(y) as u64
            }
        }
        _ => 0,
    }
}
