//! Instruction Fetch (IF) Unit.
//!
//! This module implements the program counter and instruction memory. It performs:
//! 1. **Addressing:** The effective fetch address is the PC override from writeback when
//!    one is present this tick, otherwise the committed PC. It drives the instruction
//!    memory's read port every tick except the one that retires `halt`, whose sequential
//!    successor is never fetched and may lie past the end of memory.
//! 2. **Selection:** The instruction word is the half of the registered memory output
//!    chosen by bit 2 of the committed PC.
//! 3. **PC Update:** A PC override commits on the same edge that latches the memory
//!    output, so the new PC and its instruction become visible together.
//!
//! The straight-line advance is carried by the writeback PC write, which is present once
//! per instruction, so the PC moves exactly once per instruction cycle.

use tracing::trace;

use crate::common::constants::INSTRUCTION_BYTES;
use crate::common::error::ImageError;
use crate::isa::instruction::select_half;
use crate::soc::memory::{Sram, SramPort};
use crate::soc::mux::Mux;
use crate::soc::signal::{Reg, Signal, Wire};
use crate::soc::traits::Clocked;

/// Program counter plus instruction memory.
#[derive(Clone, Debug)]
pub struct Fetcher {
    pc: Reg<u64>,
    imem: Sram,
    addr_mux: Mux,
}

impl Fetcher {
    /// Creates a fetch unit at PC 0 with a zero-filled instruction memory.
    ///
    /// # Panics
    ///
    /// Panics if `imem_bytes` is not a non-zero multiple of 8.
    pub fn new(imem_bytes: usize) -> Self {
        Self {
            pc: Reg::new(0),
            imem: Sram::new("imem", imem_bytes),
            addr_mux: Mux::new("fetch.addr", 2),
        }
    }

    /// Returns the committed program counter.
    #[inline]
    pub fn pc(&self) -> u64 {
        self.pc.read()
    }

    /// Returns the address of the next sequential instruction.
    #[inline]
    pub fn pc_plus_4(&self) -> u64 {
        self.pc().wrapping_add(INSTRUCTION_BYTES)
    }

    /// Returns the instruction word at the committed PC.
    #[inline]
    pub fn instruction(&self) -> u32 {
        select_half(self.imem.out(), self.pc())
    }

    /// Returns the address driven into instruction memory this tick.
    ///
    /// # Arguments
    ///
    /// * `pc_write` - PC override from writeback, if any.
    #[inline]
    pub fn fetch_addr(&self, pc_write: Option<u64>) -> u64 {
        let target = pc_write.unwrap_or_default();
        let next = Wire::new(move || target);
        let ports: [&dyn Signal<u64>; 2] = [&self.pc, &next];
        self.addr_mux.select_signal(&ports, usize::from(pc_write.is_some()))
    }

    /// Drives instruction memory and schedules the PC update.
    ///
    /// # Arguments
    ///
    /// * `fetch_en` - Fetch stage active this tick.
    /// * `pc_write` - PC override from writeback, if any.
    /// * `prefetch` - Drive instruction memory this tick; `false` holds its output.
    ///
    /// # Panics
    ///
    /// Panics if `prefetch` is set and the fetch address lies past the end of
    /// instruction memory.
    pub fn do_function(&mut self, fetch_en: bool, pc_write: Option<u64>, prefetch: bool) {
        if fetch_en {
            trace!(pc = self.pc(), word = self.instruction(), "fetch");
        }
        if prefetch {
            self.imem.do_function(SramPort::read(self.fetch_addr(pc_write)));
        }
        if let Some(target) = pc_write {
            self.pc.write(target);
        }
    }

    /// Loads a program image and presents the first instruction.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::TooLarge`] if the image does not fit instruction memory.
    pub fn load(&mut self, image: &[u64]) -> Result<(), ImageError> {
        self.imem.load(image)?;
        self.imem.prime(self.pc());
        Ok(())
    }

    /// Returns the instruction memory for inspection.
    pub const fn imem(&self) -> &Sram {
        &self.imem
    }

    /// Returns the PC to 0 and presents the instruction there. Memory contents are kept.
    pub fn reset(&mut self) {
        self.pc.reset();
        self.imem.reset();
        self.imem.prime(self.pc());
    }
}

impl Clocked for Fetcher {
    fn on_clock_edge(&mut self) {
        self.pc.on_clock_edge();
        self.imem.on_clock_edge();
    }
}
