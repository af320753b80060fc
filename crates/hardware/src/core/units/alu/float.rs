//! ALU double-precision arithmetic.
//!
//! Operands are the raw bit patterns of IEEE-754 doubles carried in the 64-bit lanes;
//! results are reinterpreted back the same way. NaN and infinity follow host semantics.

use crate::core::pipeline::signals::AluOp;

/// Executes a floating-point operation.
///
/// # Arguments
///
/// * `op` - The ALU operation (must be an `Fp*` variant).
/// * `a`  - First operand bits.
/// * `b`  - Second operand bits.
///
/// # Returns
///
/// The bit pattern of the result. Returns `0` for non-floating-point opcodes.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    let (x, y) = (f64::from_bits(a), f64::from_bits(b));
    let res = match op {
        AluOp::FpAdd => x + y,
        AluOp::FpSub => x - y,
        AluOp::FpMul => x * y,
        AluOp::FpDiv => x / y,
        _ => return 0,
    };
    res.to_bits()
}
