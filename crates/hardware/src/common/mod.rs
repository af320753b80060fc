//! Common utilities and types used throughout the simulator.
//!
//! This module provides building blocks shared across every component. It includes:
//! 1. **Constants:** Register file geometry, memory cell width, encoding masks, and sentinels.
//! 2. **Error Handling:** Recoverable error types for images, assembly, configuration, and runs.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use constants::{GUARD_REG, LINK_REG, NUM_REGS, UNDEFINED_SENTINEL};
pub use error::{AsmError, ConfigError, ImageError, SimError, fatal};
