/// Test utilities for the stack evaluator integration tests
///
/// Builders for stacks written as literal strings, and a helper that
/// replays a sequence of operations while keeping every snapshot.
use opcode_explorer::backend::{apply, parse_values, Stack};

pub const INSUFFICIENT: &str = "Error: Insufficient items";
pub const NON_NUMERIC: &str = "Error: Non-numeric values";

/// Build a stack from a line of literals, e.g. `r#"1 "a" true"#`
pub fn stack_of(line: &str) -> Stack {
    parse_values(line)
        .unwrap_or_else(|e| panic!("bad literal line {:?}: {}", line, e))
        .into_iter()
        .collect()
}

/// Apply `ops` in order, returning the initial stack followed by each result
pub fn replay(initial: Stack, ops: &[&str]) -> Vec<Stack> {
    let mut snapshots = vec![initial];
    for op in ops {
        let last = snapshots.last().expect("at least the initial snapshot");
        let next = apply(last, op).unwrap_or_else(|| panic!("{} is not simulated", op));
        snapshots.push(next);
    }
    snapshots
}
