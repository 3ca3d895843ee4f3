//! REPL line parsing
//!
//! A line is either a `:command` or a sequence of tokens. Bare words that
//! look like opcode names (`OP_...`) are operations; every other token is a
//! literal to push.

use std::fmt;

use crate::backend::literal::{self, LiteralError, Token};
use crate::backend::models::StackValue;

/// Commands offered for completion, in help order
pub const COMMANDS: &[&str] = &[":stack", ":undo", ":reset", ":ops", ":describe", ":help", ":quit"];

pub const HELP: &str = "\
Enter values and opcode names separated by spaces, e.g. `2 3 OP_ADD`.
Values: integers, true/false, \"quoted text\" or bare words.

Commands:
  :stack            Show the current stack
  :undo             Step back one snapshot
  :reset            Restore the initial stack
  :ops              List the simulated operations
  :describe <NAME>  Show reference data for an opcode
  :help             Show this message
  :quit             Leave the explorer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Stack,
    Undo,
    Reset,
    Ops,
    Describe(String),
    Help,
    Quit,
}

/// One unit of work from a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Operation(String),
    Push(StackValue),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Command(Command),
    Steps(Vec<Step>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    Literal(LiteralError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(cmd) => write!(f, "Unknown command: {} (try :help)", cmd),
            Self::MissingArgument(cmd) => write!(f, "{} needs an argument", cmd),
            Self::Literal(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for InputError {}

impl From<LiteralError> for InputError {
    fn from(err: LiteralError) -> Self {
        InputError::Literal(err)
    }
}

pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Input::Empty);
    }
    if trimmed.starts_with(':') {
        return parse_command(trimmed).map(Input::Command);
    }

    let steps = literal::tokenize(trimmed)?
        .into_iter()
        .map(|token| match token {
            Token::Word(word) if word.starts_with("OP_") => Step::Operation(word),
            other => Step::Push(other.into_value()),
        })
        .collect();
    Ok(Input::Steps(steps))
}

fn parse_command(line: &str) -> Result<Command, InputError> {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match name {
        ":stack" | ":s" => Ok(Command::Stack),
        ":undo" | ":u" => Ok(Command::Undo),
        ":reset" => Ok(Command::Reset),
        ":ops" => Ok(Command::Ops),
        ":describe" | ":d" => arg
            .map(|a| Command::Describe(a.to_string()))
            .ok_or(InputError::MissingArgument(":describe")),
        ":help" | ":h" => Ok(Command::Help),
        ":quit" | ":q" | ":exit" => Ok(Command::Quit),
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}
