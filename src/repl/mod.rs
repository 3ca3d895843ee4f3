//! Interactive stepper
//!
//! - `commands`: line parsing into `:commands` and push/apply steps
//! - `state_machine`: Ready / Halted / Exiting with per-state prompts
//! - `helper`: rustyline completion, hints and validation
//! - `session`: the session driver and the editor loop

pub mod commands;
pub mod helper;
pub mod session;
pub mod state_machine;

pub use commands::{Command, Input, InputError, Step};
pub use helper::ExplorerHelper;
pub use session::{run, ReplError, Session};
pub use state_machine::{LineStatus, ReplEvent, ReplState, ReplStateMachine, StateTransition};
