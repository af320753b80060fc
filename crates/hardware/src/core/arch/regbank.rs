//! Register bank.
//!
//! This module implements the 33-entry register file. It performs the following:
//! 1. **Storage:** 32 general-purpose registers plus the guard register at index 32.
//! 2. **Read Path:** Three combinational read ports addressed by the mapped `rd`, `rs`, and
//!    `rt` indices, active every tick regardless of stage.
//! 3. **Write Path:** One write port, committed on the clock edge when writeback supplies
//!    a value.
//! 4. **Invariant Enforcement:** The guard register keeps its sentinel; a write aimed at it
//!    is a wiring error.

use serde::Serialize;
use tracing::debug;

use crate::common::constants::{GUARD_REG, GUARD_SENTINEL, NUM_REGS};
use crate::common::error::fatal;
use crate::soc::signal::{Reg, Signal};
use crate::soc::traits::Clocked;

/// Register file indices after mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegIds {
    /// Destination index.
    pub rd: usize,
    /// Source index.
    pub rs: usize,
    /// Second source index.
    pub rt: usize,
}

/// Values on the three read ports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegValues {
    /// Value at the mapped destination index.
    pub rd: u64,
    /// Value at the mapped source index.
    pub rs: u64,
    /// Value at the mapped second source index.
    pub rt: u64,
}

/// The register file.
#[derive(Clone, Debug)]
pub struct RegBank {
    regs: [Reg<u64>; NUM_REGS],
}

impl RegBank {
    /// Creates a register file with every register zero and the guard at its sentinel.
    pub fn new() -> Self {
        Self {
            regs: std::array::from_fn(|idx| {
                Reg::new(if idx == GUARD_REG { GUARD_SENTINEL } else { 0 })
            }),
        }
    }

    /// Reads the three ports.
    ///
    /// # Arguments
    ///
    /// * `ids` - Mapped register indices, each in `0..=32`.
    ///
    /// # Returns
    ///
    /// The committed value of each addressed register.
    #[inline]
    pub fn read(&self, ids: RegIds) -> RegValues {
        RegValues {
            rd: self.get(ids.rd),
            rs: self.get(ids.rs),
            rt: self.get(ids.rt),
        }
    }

    /// Returns the committed value of register `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is past the guard register.
    pub fn get(&self, idx: usize) -> u64 {
        match self.regs.get(idx) {
            Some(reg) => reg.read(),
            None => fatal("regbank", format_args!("register index {idx} out of range")),
        }
    }

    /// Returns a snapshot of every committed register, guard last.
    pub fn snapshot(&self) -> [u64; NUM_REGS] {
        std::array::from_fn(|idx| self.regs[idx].read())
    }

    /// Schedules the write-port update for this tick.
    ///
    /// # Arguments
    ///
    /// * `dest`  - Mapped destination index.
    /// * `write` - Value to commit on the edge, if the write is enabled.
    ///
    /// # Panics
    ///
    /// Panics if an enabled write targets the guard register or an index past it.
    pub fn do_function(&mut self, dest: usize, write: Option<u64>) {
        let Some(val) = write else {
            return;
        };
        if dest >= GUARD_REG {
            fatal(
                "regbank",
                format_args!("write of {val:#x} to reserved register index {dest}"),
            );
        }
        debug!(reg = dest, val, "register write");
        self.regs[dest].write(val);
    }

    /// Sets register `idx` immediately, bypassing the clock (test and loader setup).
    ///
    /// # Panics
    ///
    /// Panics if `idx` is the guard register or past it.
    pub fn set(&mut self, idx: usize, val: u64) {
        if idx >= GUARD_REG {
            fatal("regbank", format_args!("cannot preset register index {idx}"));
        }
        self.regs[idx].force(val);
    }

    /// Restores every register to its power-on value.
    pub fn reset(&mut self) {
        for reg in &mut self.regs {
            reg.reset();
        }
    }
}

impl Default for RegBank {
    fn default() -> Self {
        Self::new()
    }
}

impl Clocked for RegBank {
    fn on_clock_edge(&mut self) {
        for reg in &mut self.regs {
            reg.on_clock_edge();
        }
    }
}
