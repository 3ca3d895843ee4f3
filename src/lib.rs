/// Opcode Explorer - Bitcoin Script Stack Simulator Library
///
/// This library simulates a small subset of Bitcoin Script opcodes on an
/// in-memory stack, for teaching how stack-based scripts behave. It is not
/// a script interpreter: there is no parsing of scripts, no byte encoding,
/// and no consensus rules.
///
/// # Architecture
///
/// 1. **Models** (`backend::models`)
///    - `StackValue`: text, arbitrary-precision integer, or boolean
///    - `Stack`: an immutable snapshot; index 0 is the bottom
///
/// 2. **Evaluator** (`backend::eval`)
///    - A fixed, ordered table of operations: `OP_ADD`, `OP_EQUAL`,
///      `OP_DUP`, `OP_SWAP`
///    - Each operation maps a snapshot to a new snapshot
///    - Failures are reported in-band as an `"Error: ..."` text value on top
///
/// 3. **Reference data** (`backend::descriptors`)
///    - Display metadata for documented opcodes, independent of the evaluator
///
/// 4. **Front ends**
///    - `backend::simulation`: step / undo / reset over snapshots
///    - `repl`: the interactive stepper
///    - `ffi`: C ABI exchanging JSON
///
/// # Example
///
/// ```rust
/// use opcode_explorer::backend::*;
/// use opcode_explorer::stack;
///
/// let result = apply(&stack![2, 3], "OP_ADD").unwrap();
/// assert_eq!(result, stack![5]);
///
/// let result = apply(&stack![1], "OP_SWAP").unwrap();
/// assert_eq!(halt_message(&result), Some("Error: Insufficient items"));
/// ```

pub mod backend;
pub mod config;
pub mod ffi;
pub mod repl;

pub use backend::{
    apply, descriptor, descriptors, lookup, operations, OpcodeDescriptor, OperationDefinition,
    Stack, StackValue,
};
pub use config::{Config, ConfigError};
