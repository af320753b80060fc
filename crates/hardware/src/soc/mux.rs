//! Multiplexer.
//!
//! A named N-way selector. Selecting a port that does not exist is a wiring error
//! and aborts the run with a diagnostic naming the multiplexer.

use crate::common::error::fatal;
use crate::soc::signal::Signal;

/// An N-way multiplexer with a fixed port count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mux {
    name: &'static str,
    width: usize,
}

impl Mux {
    /// Creates a multiplexer named `name` with `width` input ports.
    pub const fn new(name: &'static str, width: usize) -> Self {
        Self { name, width }
    }

    /// Returns the multiplexer's name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of input ports.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Selects one of the already-evaluated port values.
    ///
    /// # Arguments
    ///
    /// * `ports` - Port values in port order; must hold exactly `width` entries.
    /// * `sel`   - Index of the port to forward.
    ///
    /// # Returns
    ///
    /// The value on port `sel`.
    ///
    /// # Panics
    ///
    /// Panics if `ports` does not match the port count or `sel` is out of range.
    pub fn select<T: Copy>(&self, ports: &[T], sel: usize) -> T {
        if ports.len() != self.width {
            fatal(
                self.name,
                format_args!("wired with {} ports, expected {}", ports.len(), self.width),
            );
        }
        match ports.get(sel) {
            Some(val) => *val,
            None => fatal(
                self.name,
                format_args!("selector {sel} out of range for {} ports", self.width),
            ),
        }
    }

    /// Selects one of several signal sources and reads it.
    ///
    /// Only the selected source is read.
    ///
    /// # Panics
    ///
    /// Panics if `ports` does not match the port count or `sel` is out of range.
    pub fn select_signal<T>(&self, ports: &[&dyn Signal<T>], sel: usize) -> T {
        if ports.len() != self.width {
            fatal(
                self.name,
                format_args!("wired with {} ports, expected {}", ports.len(), self.width),
            );
        }
        match ports.get(sel) {
            Some(port) => port.read(),
            None => fatal(
                self.name,
                format_args!("selector {sel} out of range for {} ports", self.width),
            ),
        }
    }
}
