//! Simulator: owns the scheduler, the processor, and the run configuration.
//!
//! The processor is the single device registered with the [`System`]; the simulator adds
//! image loading, trace recording, and the run-to-halt loop with its cycle budget.

use tracing::info;

use crate::common::error::{ConfigError, ImageError, SimError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::signals::Stage;
use crate::core::trace::CycleTrace;
use crate::soc::System;
use crate::stats::SimStats;

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    system: System<Cpu>,
    config: Config,
    traces: Vec<CycleTrace>,
}

impl Simulator {
    /// Creates a simulator with a power-on processor.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`Config::validate`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut system = System::new();
        system.register([Cpu::new(&config)]);
        Ok(Self {
            system,
            config,
            traces: Vec::new(),
        })
    }

    /// Loads a program image into instruction memory.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::TooLarge`] if the image does not fit.
    pub fn load_program(&mut self, image: &[u64]) -> Result<(), ImageError> {
        self.cpu_mut().load_program(image)
    }

    /// Loads a data image into data memory.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::TooLarge`] if the image does not fit.
    pub fn load_data(&mut self, image: &[u64]) -> Result<(), ImageError> {
        self.cpu_mut().load_data(image)
    }

    /// Executes one tick, recording its trace when tracing is enabled.
    ///
    /// Does nothing once the processor has halted.
    pub fn step(&mut self) {
        if self.system.is_stopped() {
            return;
        }
        let general = &self.config.general;
        if general.trace && (!general.trace_fetch_only || self.cpu().stage() == Stage::Fetch) {
            let trace = self.observe();
            self.traces.push(trace);
        }
        self.system.run(1);
    }

    /// Executes up to `ticks` ticks, stopping early on halt.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            if self.system.is_stopped() {
                break;
            }
            self.step();
        }
    }

    /// Runs until the halt instruction retires.
    ///
    /// # Returns
    ///
    /// The total number of ticks executed since the last reset.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if `general.max_cycles` ticks pass without a halt.
    pub fn run_until_halt(&mut self) -> Result<u64, SimError> {
        while !self.system.is_stopped() {
            if self.system.clock() >= self.config.general.max_cycles {
                return Err(SimError::CycleLimit {
                    cycles: self.system.clock(),
                    pc: self.cpu().pc(),
                });
            }
            self.step();
        }
        info!(cycles = self.system.clock(), "halted");
        Ok(self.system.clock())
    }

    /// Takes a trace snapshot of the upcoming tick without advancing.
    pub fn observe(&self) -> CycleTrace {
        self.cpu().trace(self.system.clock())
    }

    /// Resets the scheduler and the processor. Memory contents are kept.
    pub fn reset(&mut self) {
        let fresh = Cpu::new(&self.config);
        let mut cpu = std::mem::replace(self.cpu_mut(), fresh);
        self.system.reset();
        cpu.reset();
        self.system.register([cpu]);
        self.traces.clear();
    }

    /// Returns the processor.
    pub fn cpu(&self) -> &Cpu {
        match self.system.devices() {
            [cpu, ..] => cpu,
            [] => unreachable!("simulator always holds its processor"),
        }
    }

    /// Returns the processor mutably.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        match self.system.devices_mut() {
            [cpu, ..] => cpu,
            [] => unreachable!("simulator always holds its processor"),
        }
    }

    /// Returns the number of ticks executed since the last reset.
    pub const fn clock(&self) -> u64 {
        self.system.clock()
    }

    /// Returns `true` once the halt instruction has retired.
    pub const fn is_halted(&self) -> bool {
        self.system.is_stopped()
    }

    /// Returns the recorded traces.
    pub fn traces(&self) -> &[CycleTrace] {
        &self.traces
    }

    /// Removes and returns the recorded traces.
    pub fn take_traces(&mut self) -> Vec<CycleTrace> {
        std::mem::take(&mut self.traces)
    }

    /// Returns the run configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the processor's statistics.
    pub fn stats(&self) -> &SimStats {
        &self.cpu().stats
    }
}
