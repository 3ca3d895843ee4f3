//! Arithmetic operations for the stack evaluator.

use super::operands::{faulted, pop_operands};
use super::types::EvalFault;
use crate::backend::models::{Stack, StackValue};
use crate::backend::opcodes::Opcode;

/// `OP_ADD`: replaces the top two numbers with their sum.
pub fn op_add(stack: &Stack) -> Stack {
    let (rest, [a, b]) = match pop_operands::<2>(stack) {
        Ok(popped) => popped,
        Err(fault) => return faulted(stack.clone(), fault, Opcode::Add),
    };
    match (a, b) {
        (StackValue::Number(x), StackValue::Number(y)) => rest.with(StackValue::Number(x + y)),
        _ => faulted(rest, EvalFault::NonNumericOperand, Opcode::Add),
    }
}
