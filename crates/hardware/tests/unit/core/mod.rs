//! Processor core tests.

pub mod cpu;
pub mod fetch;
pub mod lsu;
pub mod regbank;
