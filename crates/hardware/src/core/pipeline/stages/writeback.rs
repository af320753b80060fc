//! Writeback (WB) Stage.
//!
//! This module implements the combinational writeback logic. It selects the result from
//! the ALU output, the LSU output, or the branch-conditional value, then produces the two
//! optional writes that close the instruction cycle: the register file write and the PC
//! write. The PC write is present on every writeback tick, so the PC advances exactly once
//! per instruction, either to the next sequential address or to a computed target.

use serde::Serialize;
use tracing::warn;

use crate::common::constants::UNDEFINED_SENTINEL;
use crate::core::arch::regbank::RegValues;
use crate::core::pipeline::signals::{WbCtrl, WbDst, WbSrc};

/// Writes produced by the writeback stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WbOut {
    /// Selected result value.
    pub result: u64,
    /// Register file write, present on a writeback tick whose destination is a register.
    pub reg_write: Option<u64>,
    /// PC write, present on every writeback tick.
    pub pc_write: Option<u64>,
}

/// Selects the writeback result.
///
/// # Arguments
///
/// * `src`       - Result source.
/// * `regs`      - Register read-port values (`rd` is the branch target for `AluCond`).
/// * `alu_out`   - Committed ALU output.
/// * `lsu_out`   - Committed LSU output.
/// * `pc_plus_4` - Address of the next sequential instruction.
pub fn select_result(
    src: WbSrc,
    regs: RegValues,
    alu_out: u64,
    lsu_out: u64,
    pc_plus_4: u64,
) -> u64 {
    match src {
        WbSrc::Alu => alu_out,
        WbSrc::Lsu => lsu_out,
        WbSrc::AluCond => {
            if alu_out != 0 {
                regs.rd
            } else {
                pc_plus_4
            }
        }
        WbSrc::None => UNDEFINED_SENTINEL,
    }
}

/// Evaluates the writeback stage.
///
/// # Arguments
///
/// * `enabled`   - Writeback stage active this tick.
/// * `ctrl`      - Writeback control word.
/// * `regs`      - Register read-port values.
/// * `alu_out`   - Committed ALU output.
/// * `lsu_out`   - Committed LSU output.
/// * `pc_plus_4` - Address of the next sequential instruction.
///
/// # Returns
///
/// The selected result and the register and PC writes. Both writes are absent when the
/// stage is disabled.
pub fn writeback_stage(
    enabled: bool,
    ctrl: WbCtrl,
    regs: RegValues,
    alu_out: u64,
    lsu_out: u64,
    pc_plus_4: u64,
) -> WbOut {
    let result = select_result(ctrl.src, regs, alu_out, lsu_out, pc_plus_4);
    if !enabled {
        return WbOut {
            result,
            reg_write: None,
            pc_write: None,
        };
    }
    if ctrl.dst == WbDst::Pc && ctrl.src == WbSrc::None {
        warn!("PC write with no result source");
    }
    WbOut {
        result,
        reg_write: (ctrl.dst == WbDst::RegD).then_some(result),
        pc_write: Some(if ctrl.dst == WbDst::Pc {
            result
        } else {
            pc_plus_4
        }),
    }
}
