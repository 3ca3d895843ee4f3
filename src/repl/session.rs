//! Interactive stepper session
//!
//! [`Session`] turns input lines into simulation steps and output lines;
//! [`run`] wires it to a rustyline editor.

use std::fmt;
use std::fs;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Editor};
use tracing::{debug, warn};

use super::commands::{self, Command, Input, Step, HELP};
use super::helper::ExplorerHelper;
use super::state_machine::{ReplEvent, ReplState, ReplStateMachine};
use crate::backend::descriptors;
use crate::backend::eval;
use crate::backend::models::Stack;
use crate::backend::simulation::Simulation;
use crate::config::Config;

#[derive(Debug)]
pub enum ReplError {
    Readline(ReadlineError),
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Readline(err) => write!(f, "Line editor failed: {}", err),
        }
    }
}

impl std::error::Error for ReplError {}

impl From<ReadlineError> for ReplError {
    fn from(err: ReadlineError) -> Self {
        ReplError::Readline(err)
    }
}

pub struct Session {
    simulation: Simulation,
    machine: ReplStateMachine,
}

impl Session {
    pub fn new(config: &Config, initial: Stack) -> Self {
        let mut session = Self {
            simulation: Simulation::with_options(initial, config.simulation.clone()),
            machine: ReplStateMachine::new(config.repl.prompt.clone()),
        };
        session.sync_state();
        session
    }

    pub fn prompt(&self) -> &str {
        self.machine.prompt()
    }

    pub fn state(&self) -> &ReplState {
        self.machine.state()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn is_exiting(&self) -> bool {
        self.machine.is_exiting()
    }

    pub fn handle_event(&mut self, event: ReplEvent) {
        self.machine.process_event(event);
    }

    /// Process one input line and return the lines to print
    pub fn handle_line(&mut self, line: &str) -> Vec<String> {
        let input = match commands::parse_line(line) {
            Ok(input) => input,
            Err(err) => return vec![format!("error: {}", err)],
        };

        let mut out = match input {
            Input::Empty => return vec![],
            Input::Command(cmd) => self.run_command(cmd),
            Input::Steps(steps) => self.run_steps(steps),
        };

        if !self.is_exiting() {
            self.sync_state();
            if let ReplState::Halted { message } = self.state() {
                out.push(format!("halted on \"{}\"; use :undo or :reset", message));
            }
        }
        out
    }

    fn run_steps(&mut self, steps: Vec<Step>) -> Vec<String> {
        let mut out = Vec::new();
        for step in steps {
            let result = match step {
                Step::Operation(name) => self.simulation.step(&name).map(|_| ()),
                Step::Push(value) => self.simulation.push(value).map(|_| ()),
            };
            if let Err(err) = result {
                // Remaining tokens on the line are skipped
                out.push(format!("error: {}", err));
                break;
            }
        }
        out.push(self.simulation.stack().to_string());
        out
    }

    fn run_command(&mut self, cmd: Command) -> Vec<String> {
        match cmd {
            Command::Stack => vec![self.simulation.stack().to_string()],
            Command::Undo => match self.simulation.undo() {
                Ok(stack) => vec![stack.to_string()],
                Err(err) => vec![format!("error: {}", err)],
            },
            Command::Reset => {
                self.simulation.reset();
                vec![self.simulation.stack().to_string()]
            }
            Command::Ops => eval::operations()
                .iter()
                .map(|def| {
                    format!(
                        "{:<10} 0x{:02x}  needs {} item(s)",
                        def.name(),
                        def.opcode.byte(),
                        def.opcode.min_depth()
                    )
                })
                .collect(),
            Command::Describe(name) => match descriptors::descriptor(&name) {
                Some(d) => d.to_string().lines().map(str::to_string).collect(),
                None if descriptors::is_simulated(&name) => {
                    vec![format!("{} is simulated but has no reference entry", name)]
                }
                None => vec![format!("No reference entry for {}", name)],
            },
            Command::Help => HELP.lines().map(str::to_string).collect(),
            Command::Quit => {
                self.machine.process_event(ReplEvent::QuitRequested);
                vec![]
            }
        }
    }

    fn sync_state(&mut self) {
        let halt = if self.simulation.is_halted() {
            self.simulation.halt_message().map(str::to_string)
        } else {
            None
        };
        self.machine.process_event(ReplEvent::StackChanged(halt));
    }
}

/// Run the interactive stepper until `:quit` or end of input
pub fn run(config: &Config, initial: Stack) -> Result<(), ReplError> {
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.repl.max_history_entries)?
        .auto_add_history(false)
        .completion_type(CompletionType::List)
        .build();
    let mut editor: Editor<ExplorerHelper, DefaultHistory> = Editor::with_config(editor_config)?;
    editor.set_helper(Some(ExplorerHelper::new()));

    let history_path = config.repl.history_path();
    if let Some(path) = history_path.as_deref().filter(|p| p.exists()) {
        if let Err(err) = editor.load_history(path) {
            warn!(target: "opcode_explorer::repl", path = %path.display(), error = %err, "could not load history");
        }
    }

    println!("Opcode Explorer {} (type :help for commands)", env!("CARGO_PKG_VERSION"));
    let mut session = Session::new(config, initial);
    println!("{}", session.simulation().stack());

    while !session.is_exiting() {
        let prompt = session.prompt().to_string();
        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                    if let Some(helper) = editor.helper_mut() {
                        helper.add_to_history(line.clone());
                    }
                }
                for out in session.handle_line(&line) {
                    println!("{}", out);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                session.handle_event(ReplEvent::Interrupted);
            }
            Err(ReadlineError::Eof) => session.handle_event(ReplEvent::Eof),
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match editor.save_history(&path) {
            Ok(()) => debug!(target: "opcode_explorer::repl", path = %path.display(), "history saved"),
            Err(err) => {
                warn!(target: "opcode_explorer::repl", path = %path.display(), error = %err, "could not save history")
            }
        }
    }
    Ok(())
}
