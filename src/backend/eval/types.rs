//! Type definitions for the stack evaluator.
//!
//! - EvalFault: the two failure kinds, rendered as in-band sentinels
//! - OperationDefinition: an opcode bound to its pure transformation

use std::fmt;

use crate::backend::models::{Stack, StackValue};
use crate::backend::opcodes::Opcode;

/// Result of an internal evaluator step
pub type EvalResult<T> = Result<T, EvalFault>;

/// Failures an operation can hit.
///
/// These never escape the operation table as `Err`: they are appended to
/// the returned stack as text sentinels (see [`EvalFault::sentinel`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalFault {
    /// The stack holds fewer items than the operation consumes
    InsufficientOperands,
    /// An arithmetic operand is not a number
    NonNumericOperand,
}

impl EvalFault {
    pub const ALL: [EvalFault; 2] = [EvalFault::InsufficientOperands, EvalFault::NonNumericOperand];

    /// The exact in-band text for this fault
    pub fn sentinel(self) -> &'static str {
        match self {
            Self::InsufficientOperands => "Error: Insufficient items",
            Self::NonNumericOperand => "Error: Non-numeric values",
        }
    }

    /// Recognize a sentinel produced by the evaluator
    pub fn from_sentinel(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fault| fault.sentinel() == text)
    }

    pub fn to_value(self) -> StackValue {
        StackValue::text(self.sentinel())
    }
}

impl fmt::Display for EvalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sentinel())
    }
}

impl std::error::Error for EvalFault {}

/// One row of the operation table: an opcode and its transformation.
///
/// `execute` is pure: it reads the input snapshot and returns a new one.
#[derive(Debug, Clone, Copy)]
pub struct OperationDefinition {
    pub opcode: Opcode,
    pub execute: fn(&Stack) -> Stack,
}

impl OperationDefinition {
    /// Unique table key, e.g. `OP_ADD`
    #[inline]
    pub fn name(&self) -> &'static str {
        self.opcode.name()
    }

    #[inline]
    pub fn apply(&self, stack: &Stack) -> Stack {
        (self.execute)(stack)
    }
}
