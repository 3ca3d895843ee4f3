//! Stack Evaluator
//!
//! Applies one named operation to a stack snapshot and returns the
//! resulting snapshot. Operations live in a fixed, ordered table; table order
//! is display order and names are unique.
//!
//! Failures never take an error path: the evaluator appends a sentinel text
//! value (`"Error: ..."`) to the returned stack. Inputs are borrowed and never
//! modified, so callers can keep every snapshot they have seen.
//!
//! This module is organized into submodules by functionality:
//! - `types`: EvalFault and OperationDefinition
//! - `operands`: operand extraction and boolean normalization
//! - `arithmetic`: OP_ADD
//! - `comparison`: OP_EQUAL
//! - `stack_ops`: OP_DUP, OP_SWAP

use tracing::trace;

use crate::backend::models::Stack;
use crate::backend::opcodes::Opcode;

// === Submodules ===

mod arithmetic;
mod comparison;
mod operands;
mod stack_ops;
mod types;


// === Re-exports ===

pub use arithmetic::op_add;
pub use comparison::op_equal;
pub use operands::pop_operands;
pub use stack_ops::{op_dup, op_swap};
pub use types::{EvalFault, EvalResult, OperationDefinition};

/// The operation table, in display order
pub static OPERATIONS: [OperationDefinition; 4] = [
    OperationDefinition { opcode: Opcode::Add, execute: op_add },
    OperationDefinition { opcode: Opcode::Equal, execute: op_equal },
    OperationDefinition { opcode: Opcode::Dup, execute: op_dup },
    OperationDefinition { opcode: Opcode::Swap, execute: op_swap },
];

pub fn operations() -> &'static [OperationDefinition] {
    &OPERATIONS
}

/// Ordered operation names
pub fn operation_names() -> impl Iterator<Item = &'static str> {
    OPERATIONS.iter().map(OperationDefinition::name)
}

/// Find an operation by exact name
pub fn lookup(name: &str) -> Option<&'static OperationDefinition> {
    OPERATIONS.iter().find(|def| def.name() == name)
}

/// Table row for a known opcode
pub fn definition(opcode: Opcode) -> &'static OperationDefinition {
    match opcode {
        Opcode::Add => &OPERATIONS[0],
        Opcode::Equal => &OPERATIONS[1],
        Opcode::Dup => &OPERATIONS[2],
        Opcode::Swap => &OPERATIONS[3],
    }
}

/// Apply the operation called `name` to `stack`.
///
/// Returns `None` when the table has no such operation; the caller decides
/// how to report an unrecognized name.
pub fn apply(stack: &Stack, name: &str) -> Option<Stack> {
    lookup(name).map(|def| run(def, stack))
}

/// Apply a known opcode to `stack`
pub fn apply_opcode(stack: &Stack, opcode: Opcode) -> Stack {
    run(definition(opcode), stack)
}

/// Sentinel on top of `stack`, if the last operation failed
pub fn halt_message(stack: &Stack) -> Option<&str> {
    stack.halt_message()
}

fn run(def: &OperationDefinition, stack: &Stack) -> Stack {
    trace!(target: "opcode_explorer::eval", op = def.name(), depth = stack.len(), "apply");
    def.apply(stack)
}
