// Backend for the opcode explorer
//
// - `models`: stack values and immutable stack snapshots
// - `opcodes`: identifiers and byte values of the simulated opcodes
// - `eval`: the operation table and the pure stack evaluator
// - `descriptors`: reference data for documented opcodes
// - `literal`: reading user-typed values
// - `simulation`: step/undo driver over the evaluator

pub mod descriptors;
pub mod eval;
pub mod literal;
pub mod models;
pub mod opcodes;
pub mod simulation;

pub use descriptors::{descriptor, descriptors, is_simulated, OpcodeDescriptor};
pub use eval::{
    apply, apply_opcode, halt_message, lookup, operation_names, operations, EvalFault,
    OperationDefinition,
};
pub use literal::{parse_value, parse_values, LiteralError};
pub use models::*;
pub use opcodes::{Opcode, UnknownOpcode};
pub use simulation::{Simulation, SimulationError, SimulationOptions};
