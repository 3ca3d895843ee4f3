//! Comparison operations for the stack evaluator.

use super::operands::{faulted, pop_operands};
use crate::backend::models::{Stack, StackValue};
use crate::backend::opcodes::Opcode;

/// `OP_EQUAL`: replaces the top two values with a boolean.
///
/// Operands go through the shared extraction, so a boolean compares equal
/// to the matching 0/1 number. Text never equals a number.
pub fn op_equal(stack: &Stack) -> Stack {
    match pop_operands::<2>(stack) {
        Ok((rest, [a, b])) => rest.with(StackValue::Bool(a == b)),
        Err(fault) => faulted(stack.clone(), fault, Opcode::Equal),
    }
}
