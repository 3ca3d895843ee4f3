//! Step-by-step simulation driver
//!
//! Wraps the stateless evaluator with the bookkeeping an interactive
//! front end needs: the current snapshot, a bounded undo history, and the
//! rule that an `Error:` sentinel on top of the stack halts further steps.

use std::collections::VecDeque;
use std::fmt;

use serde::Deserialize;
use tracing::{debug, info};

use super::eval;
use super::models::{Stack, StackValue};
use super::opcodes::Opcode;

/// Simulation behaviour, loaded from the `[simulation]` config section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationOptions {
    /// Refuse further steps while a sentinel is on top of the stack
    pub halt_on_error: bool,
    /// Snapshots kept for undo; the oldest is dropped first
    pub max_undo_depth: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            halt_on_error: true,
            max_undo_depth: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// No operation with this name in the evaluator table
    UnknownOperation(String),
    /// The undo history is empty
    NothingToUndo,
    /// The stack is halted on the contained sentinel
    Halted(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOperation(name) => write!(f, "Unknown operation: {}", name),
            Self::NothingToUndo => write!(f, "Nothing to undo"),
            Self::Halted(msg) => write!(f, "Simulation halted: {}", msg),
        }
    }
}

impl std::error::Error for SimulationError {}

pub type SimulationResult<T> = Result<T, SimulationError>;

/// An interactive stack simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    initial: Stack,
    current: Stack,
    history: VecDeque<Stack>,
    options: SimulationOptions,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Stack::new())
    }
}

impl Simulation {
    pub fn new(initial: Stack) -> Self {
        Self::with_options(initial, SimulationOptions::default())
    }

    pub fn with_options(initial: Stack, options: SimulationOptions) -> Self {
        Self {
            current: initial.clone(),
            initial,
            history: VecDeque::new(),
            options,
        }
    }

    /// Current snapshot
    pub fn stack(&self) -> &Stack {
        &self.current
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Number of snapshots available to [`Simulation::undo`]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Sentinel on top of the current stack, if any
    pub fn halt_message(&self) -> Option<&str> {
        self.current.halt_message()
    }

    pub fn is_halted(&self) -> bool {
        self.options.halt_on_error && self.halt_message().is_some()
    }

    /// Push a literal value
    pub fn push(&mut self, value: StackValue) -> SimulationResult<&Stack> {
        self.ensure_running()?;
        let next = self.current.pushed(value);
        debug!(target: "opcode_explorer::simulation", depth = next.len(), "push");
        Ok(self.advance(next))
    }

    /// Apply the operation called `name`
    pub fn step(&mut self, name: &str) -> SimulationResult<&Stack> {
        let def = eval::lookup(name)
            .ok_or_else(|| SimulationError::UnknownOperation(name.to_string()))?;
        self.step_opcode(def.opcode)
    }

    pub fn step_opcode(&mut self, opcode: Opcode) -> SimulationResult<&Stack> {
        self.ensure_running()?;
        debug!(target: "opcode_explorer::simulation", op = %opcode, depth = self.current.len(), "step");
        let next = eval::apply_opcode(&self.current, opcode);
        if let Some(msg) = next.halt_message() {
            info!(target: "opcode_explorer::simulation", op = %opcode, message = msg, "simulation halted");
        }
        Ok(self.advance(next))
    }

    /// Restore the previous snapshot
    pub fn undo(&mut self) -> SimulationResult<&Stack> {
        let previous = self.history.pop_back().ok_or(SimulationError::NothingToUndo)?;
        debug!(target: "opcode_explorer::simulation", remaining = self.history.len(), "undo");
        self.current = previous;
        Ok(&self.current)
    }

    /// Back to the initial stack with an empty history
    pub fn reset(&mut self) {
        debug!(target: "opcode_explorer::simulation", "reset");
        self.history.clear();
        self.current = self.initial.clone();
    }

    fn ensure_running(&self) -> SimulationResult<()> {
        match self.halt_message() {
            Some(msg) if self.options.halt_on_error => Err(SimulationError::Halted(msg.to_string())),
            _ => Ok(()),
        }
    }

    fn advance(&mut self, next: Stack) -> &Stack {
        let previous = std::mem::replace(&mut self.current, next);
        if self.options.max_undo_depth > 0 {
            if self.history.len() == self.options.max_undo_depth {
                self.history.pop_front();
            }
            self.history.push_back(previous);
        }
        &self.current
    }
}
