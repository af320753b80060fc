//! Signal sources.
//!
//! This module implements the values that flow between devices. It provides:
//! 1. **Signal:** The read capability shared by every source.
//! 2. **Reg:** A registered value with committed and pending slots, updated on the clock edge.
//! 3. **Latch:** A registered value that only captures when written during the tick,
//!    holding its previous contents otherwise.
//! 4. **Wire:** A combinational value recomputed from a function on every read.

use std::fmt;

use crate::soc::traits::Clocked;

/// A source that produces a value of type `T` when read.
///
/// Reads never mutate simulated state and may be repeated any number of times within a tick.
pub trait Signal<T> {
    /// Returns the current value of the signal.
    fn read(&self) -> T;
}

/// A clocked register.
///
/// `read` returns the committed value; `write` only changes the pending value, which
/// becomes visible after the next clock edge. A register that is not written during a
/// tick keeps its value across the edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reg<T> {
    cur: T,
    next: T,
    init: T,
}

impl<T: Copy> Reg<T> {
    /// Creates a register whose committed and pending values are `init`.
    pub const fn new(init: T) -> Self {
        Self {
            cur: init,
            next: init,
            init,
        }
    }

    /// Schedules `val` to be committed on the next clock edge.
    #[inline]
    pub fn write(&mut self, val: T) {
        self.next = val;
    }

    /// Restores the power-on value in both slots.
    pub fn reset(&mut self) {
        self.cur = self.init;
        self.next = self.init;
    }

    /// Sets both slots immediately, bypassing the clock.
    ///
    /// Only for initialization-time state such as a memory read port primed at load.
    pub fn force(&mut self, val: T) {
        self.cur = val;
        self.next = val;
    }
}

impl<T: Copy> Signal<T> for Reg<T> {
    #[inline]
    fn read(&self) -> T {
        self.cur
    }
}

impl<T: Copy> Clocked for Reg<T> {
    #[inline]
    fn on_clock_edge(&mut self) {
        self.cur = self.next;
    }
}

impl<T: Copy + Default> Default for Reg<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// An enable-gated register.
///
/// Captures a value only on ticks where [`Latch::latch`] is called; on every other edge
/// the committed value is held. Used for outputs that must stay stable while their
/// producer is disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Latch<T> {
    cur: T,
    pending: Option<T>,
    init: T,
}

impl<T: Copy> Latch<T> {
    /// Creates a latch holding `init`.
    pub const fn new(init: T) -> Self {
        Self {
            cur: init,
            pending: None,
            init,
        }
    }

    /// Captures `val` on the next clock edge.
    #[inline]
    pub fn latch(&mut self, val: T) {
        self.pending = Some(val);
    }

    /// Restores the power-on value and drops any pending capture.
    pub fn reset(&mut self) {
        self.cur = self.init;
        self.pending = None;
    }
}

impl<T: Copy> Signal<T> for Latch<T> {
    #[inline]
    fn read(&self) -> T {
        self.cur
    }
}

impl<T: Copy> Clocked for Latch<T> {
    #[inline]
    fn on_clock_edge(&mut self) {
        if let Some(val) = self.pending.take() {
            self.cur = val;
        }
    }
}

/// A combinational signal.
///
/// Holds a pure function that is re-evaluated on every read; the result is never cached.
pub struct Wire<F> {
    func: F,
}

impl<F> Wire<F> {
    /// Wraps `func` as a signal source.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<T, F: Fn() -> T> Signal<T> for Wire<F> {
    #[inline]
    fn read(&self) -> T {
        (self.func)()
    }
}

impl<F> fmt::Debug for Wire<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wire").finish_non_exhaustive()
    }
}
