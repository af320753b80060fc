//! Simulation driver and loader tests.

pub mod simulator;
