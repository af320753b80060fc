//! Synchronous-circuit simulation kernel.
//!
//! This module organizes the hardware-description layer the datapath is built on. It provides:
//! 1. **Traits:** [`Clocked`] and [`Device`], the settle/commit protocol every component follows.
//! 2. **Signals:** Registered ([`Reg`], [`Latch`]) and combinational ([`Wire`]) value sources.
//! 3. **Mux:** A named selector that aborts on an out-of-range port.
//! 4. **System:** The two-phase tick scheduler with its halt flag.
//! 5. **Memory:** The registered-output [`Sram`] used for instruction and data stores.

/// On-chip memories.
pub mod memory;

/// Named multiplexer.
pub mod mux;

/// Signal sources (registers, latches, wires).
pub mod signal;

/// Tick scheduler.
pub mod system;

/// Clocked and device traits.
pub mod traits;

pub use memory::{Sram, SramPort};
pub use mux::Mux;
pub use signal::{Latch, Reg, Signal, Wire};
pub use system::{SimControl, System};
pub use traits::{Clocked, Device};
