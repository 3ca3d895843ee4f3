//! Opcodes understood by the stack simulator
//!
//! Only a handful of Bitcoin Script opcodes are simulated. Each one keeps
//! its real script byte so that reference material and the simulator agree
//! on naming and encoding.

use std::fmt;
use std::str::FromStr;

/// Simulated opcode enumeration
///
/// Discriminants are the Bitcoin Script byte values.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Add the top two numbers
    Add = 0x93,
    /// Compare the top two values for equality
    Equal = 0x87,
    /// Duplicate top of stack
    Dup = 0x76,
    /// Swap top two stack elements
    Swap = 0x7c,
}

impl Opcode {
    /// Every simulated opcode, in display order
    pub const ALL: [Opcode; 4] = [Opcode::Add, Opcode::Equal, Opcode::Dup, Opcode::Swap];

    /// Look up an opcode by its script name (exact match)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Decode a script byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.byte() == byte)
    }

    #[inline]
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Script name, e.g. `OP_ADD`
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "OP_ADD",
            Self::Equal => "OP_EQUAL",
            Self::Dup => "OP_DUP",
            Self::Swap => "OP_SWAP",
        }
    }

    /// Number of stack items the opcode needs
    pub fn min_depth(self) -> usize {
        match self {
            Self::Dup => 1,
            Self::Add | Self::Equal | Self::Swap => 2,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown opcode name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOpcode(pub String);

impl fmt::Display for UnknownOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown opcode: {}", self.0)
    }
}

impl std::error::Error for UnknownOpcode {}

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownOpcode(s.to_string()))
    }
}
