//! Stack manipulation operations for the stack evaluator.
//!
//! These move values around without interpreting them, so they skip the
//! boolean normalization done for arithmetic and comparison operands.

use super::operands::faulted;
use super::types::EvalFault;
use crate::backend::models::Stack;
use crate::backend::opcodes::Opcode;

/// `OP_DUP`: pushes a copy of the top value.
pub fn op_dup(stack: &Stack) -> Stack {
    match stack.top() {
        Some(top) => stack.pushed(top.clone()),
        None => faulted(stack.clone(), EvalFault::InsufficientOperands, Opcode::Dup),
    }
}

/// `OP_SWAP`: exchanges the top two values.
pub fn op_swap(stack: &Stack) -> Stack {
    match stack.split_top(2) {
        Some((rest, [lower, upper])) => rest.with(upper.clone()).with(lower.clone()),
        _ => faulted(stack.clone(), EvalFault::InsufficientOperands, Opcode::Swap),
    }
}
