//! Error definitions.
//!
//! This module defines the recoverable error types reported at the crate boundary. It provides:
//! 1. **Image Errors:** Building, sizing, and reading instruction and data images.
//! 2. **Assembler Errors:** Malformed assembly source, reported with the offending line.
//! 3. **Configuration Errors:** JSON parsing and memory geometry validation.
//! 4. **Simulation Errors:** Runs that fail to reach the halt instruction.
//!
//! Programming-contract violations (multiplexer selector out of range, memory
//! address past capacity) are not represented here; they abort the run.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading a memory image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Instructions are packed two per cell, so the count must be even.
    #[error("instruction image needs an even number of instructions, got {0}")]
    OddInstructionCount(usize),

    /// The image does not fit the memory it is loaded into.
    #[error("{device}: image of {cells} cells exceeds capacity of {capacity} cells")]
    TooLarge {
        /// Name of the receiving memory.
        device: String,
        /// Number of cells in the image.
        cells: usize,
        /// Number of cells the memory holds.
        capacity: usize,
    },

    /// A raw image file is not a whole number of 64-bit cells.
    #[error("image file {path} is {len} bytes, not a multiple of 8")]
    Truncated {
        /// Offending file.
        path: PathBuf,
        /// File length in bytes.
        len: usize,
    },

    /// The image file could not be read.
    #[error("failed to read image {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// An assembly source file failed to assemble.
    #[error(transparent)]
    Asm(#[from] AsmError),
}

/// Errors raised by the assembler. Each variant carries the 1-based source line.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AsmError {
    /// The mnemonic does not name an opcode.
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// Source line.
        line: usize,
        /// Token found in mnemonic position.
        mnemonic: String,
    },

    /// A register operand is not `r0`..`r31`.
    #[error("line {line}: bad register `{token}`")]
    BadRegister {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The immediate does not parse or does not fit 12 bits.
    #[error("line {line}: bad immediate `{token}` (expected 0..=4095)")]
    BadImmediate {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The operand count does not match the opcode's operand slots.
    #[error("line {line}: `{mnemonic}` takes {expected} operands, got {found}")]
    OperandCount {
        /// Source line.
        line: usize,
        /// Mnemonic being assembled.
        mnemonic: String,
        /// Operands the opcode takes.
        expected: usize,
        /// Operands found.
        found: usize,
    },
}

/// Errors raised while parsing or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document is malformed or has unexpected fields.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A memory capacity is zero, not a power of two, or not a whole number of cells.
    #[error("{field} = {value} must be a non-zero power of two and a multiple of 8")]
    BadCapacity {
        /// Configuration field name.
        field: &'static str,
        /// Rejected value.
        value: usize,
    },

    /// The cycle budget is zero.
    #[error("general.max_cycles must be non-zero")]
    ZeroCycleBudget,
}

/// Errors raised while driving a simulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// The cycle budget ran out before the halt instruction retired.
    #[error("no halt after {cycles} cycles (pc = {pc:#x})")]
    CycleLimit {
        /// Ticks executed.
        cycles: u64,
        /// Program counter when the budget ran out.
        pc: u64,
    },
}

/// Aborts the run after a programming-contract violation.
///
/// Logs the diagnostic at `error` level and then panics with a message naming
/// the offending device. Used for conditions such as an out-of-range multiplexer
/// selector or a memory address past capacity, which no caller can recover from.
///
/// # Arguments
///
/// * `device` - Name of the device that detected the violation.
/// * `detail` - Description of the violation.
///
/// # Panics
///
/// Always.
#[cold]
#[track_caller]
pub fn fatal(device: &str, detail: impl fmt::Display) -> ! {
    tracing::error!(device, "{detail}");
    panic!("{device}: {detail}");
}
