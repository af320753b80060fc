//! Load/Store Unit (LSU).
//!
//! This module implements the memory-stage unit that owns data memory. It provides:
//! 1. **Operand Muxes:** Address and store-data selection from the link slot, `rs`, the
//!    ALU output, or the next sequential PC.
//! 2. **Port Drive:** On an enabled memory tick the selected address is driven for both
//!    loads and stores, with the write port enabled only for stores. Otherwise the port
//!    idles at address 0 with no write.
//! 3. **Output:** The data memory's registered read output, exposed unconditionally;
//!    consumers gate its use by the control signals.

use tracing::{debug, warn};

use crate::common::constants::{LINK_SLOT_OFFSET, UNDEFINED_SENTINEL};
use crate::common::error::ImageError;
use crate::core::arch::regbank::RegValues;
use crate::core::pipeline::signals::{LsuCtrl, LsuOp, LsuSrc};
use crate::soc::memory::{Sram, SramPort};
use crate::soc::traits::Clocked;

/// The load/store unit and its data memory.
#[derive(Clone, Debug)]
pub struct Lsu {
    dmem: Sram,
}

impl Lsu {
    /// Creates an LSU backed by a zero-filled data memory of `dmem_bytes` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `dmem_bytes` is not a non-zero multiple of 8.
    pub fn new(dmem_bytes: usize) -> Self {
        Self {
            dmem: Sram::new("dmem", dmem_bytes),
        }
    }

    /// Resolves an address or data source.
    ///
    /// # Arguments
    ///
    /// * `src`       - Selected source.
    /// * `regs`      - Register read-port values; `rs` holds the link register for `Link`.
    /// * `alu_out`   - Committed ALU output.
    /// * `pc_plus_4` - Address of the next sequential instruction.
    pub fn operand(src: LsuSrc, regs: RegValues, alu_out: u64, pc_plus_4: u64) -> u64 {
        match src {
            LsuSrc::Link => regs.rs.wrapping_sub(LINK_SLOT_OFFSET),
            LsuSrc::RegS => regs.rs,
            LsuSrc::Alu => alu_out,
            LsuSrc::PcPlus4 => pc_plus_4,
            LsuSrc::None => {
                warn!("LSU operand has no source");
                UNDEFINED_SENTINEL
            }
        }
    }

    /// Computes the data memory request for this tick.
    ///
    /// The address and data muxes are only evaluated when the memory stage is enabled
    /// and the control word requests an access.
    pub fn port(
        enabled: bool,
        ctrl: LsuCtrl,
        regs: RegValues,
        alu_out: u64,
        pc_plus_4: u64,
    ) -> SramPort {
        if !enabled {
            return SramPort::default();
        }
        match ctrl.op {
            LsuOp::Nop => SramPort::default(),
            LsuOp::Load => SramPort::read(Self::operand(ctrl.addr, regs, alu_out, pc_plus_4)),
            LsuOp::Store => SramPort::write(
                Self::operand(ctrl.addr, regs, alu_out, pc_plus_4),
                Self::operand(ctrl.data, regs, alu_out, pc_plus_4),
            ),
        }
    }

    /// Drives the data memory for this tick.
    ///
    /// # Panics
    ///
    /// Panics if the address lies past the end of data memory.
    pub fn do_function(&mut self, port: SramPort) {
        if let Some(val) = port.write {
            debug!(addr = port.addr, val, "store");
        }
        self.dmem.do_function(port);
    }

    /// Returns the data memory's registered output.
    #[inline]
    pub fn out(&self) -> u64 {
        self.dmem.out()
    }

    /// Returns the data memory for inspection.
    pub const fn dmem(&self) -> &Sram {
        &self.dmem
    }

    /// Loads an initial data image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::TooLarge`] if the image does not fit data memory.
    pub fn load(&mut self, image: &[u64]) -> Result<(), ImageError> {
        self.dmem.load(image)
    }

    /// Clears the memory output register. Memory contents are kept.
    pub fn reset(&mut self) {
        self.dmem.reset();
    }
}

impl Clocked for Lsu {
    fn on_clock_edge(&mut self) {
        self.dmem.on_clock_edge();
    }
}
