//! Simulation driver and image loading.
//!
//! Provides the [`Simulator`] run loop and utilities for reading program and data images
//! from disk.

/// Image file loading and writing.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

pub use simulator::Simulator;
