//! Clocked device traits.
//!
//! This module defines the two traits every piece of simulated hardware implements. It provides:
//! 1. **Clocked:** The clock-edge commit of pending state into committed state.
//! 2. **Device:** A self-contained top-level component the [`System`](crate::soc::System)
//!    can schedule: it settles its combinational logic in `do_function` and commits in
//!    `on_clock_edge`.
//!
//! Units whose inputs are wired by a parent composite (the fetch unit, the ALU, the
//! register file) implement only [`Clocked`]; the parent evaluates them during its own
//! `do_function` with the upstream values passed explicitly.

use crate::soc::system::SimControl;

/// State that commits on a clock edge.
///
/// Implementors move every pending value into its committed slot, recursing into the
/// sub-devices they own. Edges are simultaneous, so the order in which independent
/// registers commit never affects the result.
pub trait Clocked {
    /// Commits pending values. Called once per tick after every `do_function` pass.
    fn on_clock_edge(&mut self);
}

/// A top-level device scheduled by the [`System`](crate::soc::System).
///
/// `do_function` reads only committed state and schedules pending writes; nothing it
/// writes is visible to any reader until the following `on_clock_edge`.
pub trait Device: Clocked {
    /// Returns a short name for diagnostics (e.g., `"cpu"`).
    fn name(&self) -> &str;

    /// Settles combinational logic for the current tick and schedules register writes.
    ///
    /// # Arguments
    ///
    /// * `ctl` - Scheduler control block (clock counter and halt flag).
    fn do_function(&mut self, ctl: &mut SimControl);
}

impl<T: Clocked + ?Sized> Clocked for Box<T> {
    fn on_clock_edge(&mut self) {
        (**self).on_clock_edge();
    }
}

impl<T: Device + ?Sized> Device for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn do_function(&mut self, ctl: &mut SimControl) {
        (**self).do_function(ctl);
    }
}
