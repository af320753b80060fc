//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline memory capacities and run limits.
//! 2. **Structures:** General (run control and tracing) and memory (capacity) sections.
//! 3. **Validation:** Memory geometry and cycle budget checks.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or use `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{CELL_BYTES, DEFAULT_DMEM_BYTES, DEFAULT_IMEM_BYTES};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine when not explicitly overridden in JSON.
mod defaults {
    use crate::common::constants;

    /// Instruction memory capacity in bytes (1 KiB, 256 instructions).
    pub const IMEM_BYTES: usize = constants::DEFAULT_IMEM_BYTES;

    /// Data memory capacity in bytes (1 KiB, 128 cells).
    pub const DMEM_BYTES: usize = constants::DEFAULT_DMEM_BYTES;

    /// Tick budget for a run to reach `halt`.
    pub const MAX_CYCLES: u64 = 1_000_000;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use mcsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 5000, "trace": true },
///     "memory": { "dmem_bytes": 4096 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, 5000);
/// assert!(config.general.trace);
/// assert_eq!(config.memory.dmem_bytes, 4096);
/// assert_eq!(config.memory.imem_bytes, 1024);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Run control and tracing
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory capacities
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields, and the
    /// errors of [`Config::validate`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks memory geometry and the cycle budget.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BadCapacity`] if a memory capacity is zero, not a power of
    /// two, or not a multiple of the cell size, and [`ConfigError::ZeroCycleBudget`] if
    /// `max_cycles` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_capacity("memory.imem_bytes", self.memory.imem_bytes)?;
        check_capacity("memory.dmem_bytes", self.memory.dmem_bytes)?;
        if self.general.max_cycles == 0 {
            return Err(ConfigError::ZeroCycleBudget);
        }
        Ok(())
    }
}

fn check_capacity(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value.is_power_of_two() && value as u64 % CELL_BYTES == 0 {
        Ok(())
    } else {
        Err(ConfigError::BadCapacity { field, value })
    }
}

/// General simulation settings and options.
///
/// Contains the run limit and per-cycle trace selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Maximum ticks `run_until_halt` executes before giving up
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Record a per-cycle trace
    #[serde(default)]
    pub trace: bool,

    /// When tracing, record only Fetch-stage ticks (one entry per instruction)
    #[serde(default = "GeneralConfig::default_trace_fetch_only")]
    pub trace_fetch_only: bool,
}

impl GeneralConfig {
    /// Returns the default tick budget.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    /// Traces default to one entry per instruction.
    fn default_trace_fetch_only() -> bool {
        true
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            trace: false,
            trace_fetch_only: true,
        }
    }
}

/// Memory capacities.
///
/// Both memories are arrays of 64-bit cells; capacities are given in bytes.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Instruction memory capacity in bytes
    #[serde(default = "MemoryConfig::default_imem_bytes")]
    pub imem_bytes: usize,

    /// Data memory capacity in bytes
    #[serde(default = "MemoryConfig::default_dmem_bytes")]
    pub dmem_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default instruction memory capacity.
    fn default_imem_bytes() -> usize {
        defaults::IMEM_BYTES
    }

    /// Returns the default data memory capacity.
    fn default_dmem_bytes() -> usize {
        defaults::DMEM_BYTES
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            imem_bytes: DEFAULT_IMEM_BYTES,
            dmem_bytes: DEFAULT_DMEM_BYTES,
        }
    }
}
