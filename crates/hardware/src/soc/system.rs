//! System scheduler.
//!
//! This module implements the two-phase tick loop that drives every registered device. It provides:
//! 1. **Scheduling:** `run` repeats a `do_function` pass over all devices followed by an
//!    `on_clock_edge` pass, so every write scheduled in a tick is collected before any commits.
//! 2. **Halt Control:** A stop flag any device may raise through [`SimControl`]; once set,
//!    `run` executes no further ticks until `reset`.
//! 3. **Lifecycle:** `register` attaches top-level devices and `reset` clears devices,
//!    clock, and stop flag.
//!
//! The scheduler is an ordinary value rather than process-wide state, so independent
//! simulations can coexist (for example, in parallel tests).

use tracing::{info, trace};

use crate::soc::traits::Device;

/// Scheduler control block handed to devices during `do_function`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimControl {
    clock: u64,
    stopped: bool,
}

impl SimControl {
    /// Returns the number of ticks completed so far.
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Returns `true` once a device has requested a halt.
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Requests a halt. The current tick still completes its clock edge.
    pub fn stop(&mut self) {
        if !self.stopped {
            info!(clock = self.clock, "stop requested");
        }
        self.stopped = true;
    }
}

/// The tick scheduler and owner of the top-level devices.
#[derive(Debug)]
pub struct System<D> {
    devices: Vec<D>,
    ctl: SimControl,
}

impl<D: Device> System<D> {
    /// Creates an empty system at clock 0.
    pub const fn new() -> Self {
        Self {
            devices: Vec::new(),
            ctl: SimControl {
                clock: 0,
                stopped: false,
            },
        }
    }

    /// Attaches top-level devices. They are scheduled in registration order.
    pub fn register(&mut self, devices: impl IntoIterator<Item = D>) {
        self.devices.extend(devices);
    }

    /// Runs up to `ticks` ticks, stopping early once the halt flag is raised.
    ///
    /// Each tick settles every device via `do_function`, then commits every device via
    /// `on_clock_edge`, then advances the clock.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            if self.ctl.stopped {
                break;
            }
            for dev in &mut self.devices {
                dev.do_function(&mut self.ctl);
            }
            for dev in &mut self.devices {
                dev.on_clock_edge();
            }
            self.ctl.clock += 1;
            trace!(clock = self.ctl.clock, "tick");
        }
    }

    /// Removes every device and clears the clock and the stop flag.
    pub fn reset(&mut self) {
        info!(devices = self.devices.len(), "system reset");
        self.devices.clear();
        self.ctl = SimControl::default();
    }

    /// Returns the number of ticks completed since the last reset.
    pub const fn clock(&self) -> u64 {
        self.ctl.clock
    }

    /// Returns `true` once a halt has been requested.
    pub const fn is_stopped(&self) -> bool {
        self.ctl.stopped
    }

    /// Raises the halt flag from outside the device graph (e.g., a test harness).
    pub fn stop(&mut self) {
        self.ctl.stop();
    }

    /// Returns the registered devices.
    pub fn devices(&self) -> &[D] {
        &self.devices
    }

    /// Returns the registered devices mutably.
    pub fn devices_mut(&mut self) -> &mut [D] {
        &mut self.devices
    }
}

impl<D: Device> Default for System<D> {
    fn default() -> Self {
        Self::new()
    }
}
