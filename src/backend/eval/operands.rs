//! Operand extraction shared by multi-operand operations.
//!
//! This is the only place where booleans are coerced to integers.

use tracing::debug;

use super::types::{EvalFault, EvalResult};
use crate::backend::models::{Stack, StackValue};
use crate::backend::opcodes::Opcode;

/// Removes the top `N` values from `stack`.
///
/// On success returns the remaining stack and the removed values in
/// bottom-to-top order, booleans normalized to 0/1. Fails with
/// `InsufficientOperands` when the stack is shallower than `N`; the caller
/// still holds the untouched input in that case.
pub fn pop_operands<const N: usize>(stack: &Stack) -> EvalResult<(Stack, [StackValue; N])> {
    let (rest, top) = stack.split_top(N).ok_or(EvalFault::InsufficientOperands)?;
    let operands: [StackValue; N] = std::array::from_fn(|i| top[i].clone().normalized());
    Ok((rest, operands))
}

/// Appends the sentinel for `fault` to `stack`
pub(super) fn faulted(stack: Stack, fault: EvalFault, opcode: Opcode) -> Stack {
    debug!(target: "opcode_explorer::eval", op = %opcode, %fault, depth = stack.len(), "operation faulted");
    stack.with(fault.to_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack;

    #[test]
    fn test_pop_operands_order_and_rest() {
        let (rest, [a, b]) = pop_operands::<2>(&stack![1, 2, 3]).unwrap();
        assert_eq!(rest, stack![1]);
        assert_eq!(a, StackValue::from(2));
        assert_eq!(b, StackValue::from(3));
    }

    #[test]
    fn test_pop_operands_normalizes_booleans() {
        let (rest, [a, b]) = pop_operands::<2>(&stack![true, false]).unwrap();
        assert!(rest.is_empty());
        assert_eq!(a, StackValue::from(1));
        assert_eq!(b, StackValue::from(0));
    }

    #[test]
    fn test_pop_operands_keeps_text() {
        let (_, [a]) = pop_operands::<1>(&stack!["x"]).unwrap();
        assert_eq!(a, StackValue::from("x"));
    }

    #[test]
    fn test_pop_operands_insufficient() {
        let input = stack![1];
        assert_eq!(pop_operands::<2>(&input).unwrap_err(), EvalFault::InsufficientOperands);
        assert_eq!(input, stack![1]);
    }
}
