//! Opcode definitions.
//!
//! Names the 32 values of the 5-bit opcode field. Every value is defined, so decoding an
//! opcode never fails; behavior is fixed entirely by the control tables in
//! [`control`](crate::core::pipeline::control).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Instruction opcode (bits 0-4 of the instruction word).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum Opcode {
    /// Integer add: `rd = rs + rt`.
    #[default]
    Add = 0,
    /// Integer add immediate: `rd = rs + imm`.
    Addi = 1,
    /// Integer subtract: `rd = rs - rt`.
    Sub = 2,
    /// Integer subtract immediate: `rd = rs - imm`.
    Subi = 3,
    /// Integer multiply: `rd = rs * rt`.
    Mul = 4,
    /// Signed integer divide: `rd = rs / rt`.
    Div = 5,
    /// Bitwise and.
    And = 6,
    /// Bitwise or.
    Or = 7,
    /// Bitwise exclusive or.
    Xor = 8,
    /// Bitwise complement: `rd = !rs`.
    Not = 9,
    /// Logical shift right by register.
    Shr = 10,
    /// Logical shift right by immediate.
    Shri = 11,
    /// Shift left by register.
    Shl = 12,
    /// Shift left by immediate.
    Shli = 13,
    /// Jump to the address in `rd`.
    Br = 14,
    /// Jump relative: `pc = rd + pc`.
    Brr = 15,
    /// Jump to the immediate address.
    Bri = 16,
    /// Jump to `rd` if `rs != 0`.
    Brnz = 17,
    /// Call `rd`, saving the return address below the link register.
    Call = 18,
    /// Return to the address saved below the link register.
    Ret = 19,
    /// Jump to `rd` if `rs > rt` (signed).
    Brgt = 20,
    /// Load: `rd = mem[rs + imm]`.
    Ld = 21,
    /// Register move: `rd = rs`.
    Mov = 22,
    /// Replace the upper 12 bits of `rd` with `imm`.
    Movi = 23,
    /// Store: `mem[rs + imm] = rs`.
    St = 24,
    /// Double-precision add.
    Addf = 25,
    /// Double-precision subtract.
    Subf = 26,
    /// Double-precision multiply.
    Mulf = 27,
    /// Double-precision divide.
    Divf = 28,
    /// Input port stub.
    In = 29,
    /// Output port stub.
    Out = 30,
    /// Stop the simulation.
    Halt = 31,
}

/// Coarse instruction category used for statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OpClass {
    /// Integer arithmetic, logic, shift, and move.
    Alu,
    /// Double-precision arithmetic.
    Float,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Branch, call, and return.
    Branch,
    /// I/O stubs and halt.
    System,
}

impl Opcode {
    /// All opcodes in encoding order.
    pub const ALL: [Self; 32] = [
        Self::Add,
        Self::Addi,
        Self::Sub,
        Self::Subi,
        Self::Mul,
        Self::Div,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Not,
        Self::Shr,
        Self::Shri,
        Self::Shl,
        Self::Shli,
        Self::Br,
        Self::Brr,
        Self::Bri,
        Self::Brnz,
        Self::Call,
        Self::Ret,
        Self::Brgt,
        Self::Ld,
        Self::Mov,
        Self::Movi,
        Self::St,
        Self::Addf,
        Self::Subf,
        Self::Mulf,
        Self::Divf,
        Self::In,
        Self::Out,
        Self::Halt,
    ];

    /// Decodes the low five bits of `bits`; higher bits are ignored.
    #[inline]
    pub const fn from_u5(bits: u8) -> Self {
        Self::ALL[(bits & 0x1F) as usize]
    }

    /// Returns the 5-bit encoding.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Addi => "addi",
            Self::Sub => "sub",
            Self::Subi => "subi",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Not => "not",
            Self::Shr => "shr",
            Self::Shri => "shri",
            Self::Shl => "shl",
            Self::Shli => "shli",
            Self::Br => "br",
            Self::Brr => "brr",
            Self::Bri => "bri",
            Self::Brnz => "brnz",
            Self::Call => "call",
            Self::Ret => "ret",
            Self::Brgt => "brgt",
            Self::Ld => "ld",
            Self::Mov => "mov",
            Self::Movi => "movi",
            Self::St => "st",
            Self::Addf => "addf",
            Self::Subf => "subf",
            Self::Mulf => "mulf",
            Self::Divf => "divf",
            Self::In => "in",
            Self::Out => "out",
            Self::Halt => "halt",
        }
    }

    /// Returns the statistics category of this opcode.
    pub const fn class(self) -> OpClass {
        match self {
            Self::Br | Self::Brr | Self::Bri | Self::Brnz | Self::Call | Self::Ret | Self::Brgt => {
                OpClass::Branch
            }
            Self::Ld => OpClass::Load,
            Self::St => OpClass::Store,
            Self::Addf | Self::Subf | Self::Mulf | Self::Divf => OpClass::Float,
            Self::In | Self::Out | Self::Halt => OpClass::System,
            _ => OpClass::Alu,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = ();

    /// Parses a mnemonic, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
