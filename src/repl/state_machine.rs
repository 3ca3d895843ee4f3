//! State machine for the interactive stepper
//!
//! Tracks whether the session accepts input, is halted on a sentinel, or is
//! shutting down, and which prompt goes with each state.

use crate::backend::literal::{self, LiteralError};

/// REPL states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplState {
    /// Ready to accept tokens and commands
    Ready,
    /// Top of the stack is a sentinel; only commands make progress
    Halted { message: String },
    /// Quit or end of input received
    Exiting,
}

/// REPL events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplEvent {
    /// The simulation stack changed; carries the halt message, if halted
    StackChanged(Option<String>),
    /// User interrupted (Ctrl-C)
    Interrupted,
    /// End of input (Ctrl-D)
    Eof,
    /// `:quit`
    QuitRequested,
}

/// State transition results
#[derive(Debug, PartialEq, Eq)]
pub enum StateTransition {
    NoChange,
    Transition(ReplState),
    TransitionWithPrompt { new_state: ReplState, prompt: String },
}

/// Whether a line can be submitted as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStatus {
    Complete,
    /// Open string literal; more input needed
    Incomplete,
    Invalid { reason: String },
}

pub struct ReplStateMachine {
    state: ReplState,
    prompt: String,
    halted_prompt: String,
}

impl ReplStateMachine {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            state: ReplState::Ready,
            prompt: prompt.into(),
            halted_prompt: "halted> ".to_string(),
        }
    }

    pub fn state(&self) -> &ReplState {
        &self.state
    }

    /// Prompt for the current state
    pub fn prompt(&self) -> &str {
        match self.state {
            ReplState::Halted { .. } => &self.halted_prompt,
            _ => &self.prompt,
        }
    }

    pub fn set_halted_prompt(&mut self, prompt: String) {
        self.halted_prompt = prompt;
    }

    pub fn is_exiting(&self) -> bool {
        self.state == ReplState::Exiting
    }

    /// Process an event and return the transition
    pub fn process_event(&mut self, event: ReplEvent) -> StateTransition {
        match (&self.state, event) {
            (ReplState::Exiting, _) => StateTransition::NoChange,

            (_, ReplEvent::Eof | ReplEvent::QuitRequested) => {
                self.state = ReplState::Exiting;
                StateTransition::Transition(ReplState::Exiting)
            }

            // Ctrl-C only discards the current line
            (_, ReplEvent::Interrupted) => StateTransition::NoChange,

            (ReplState::Ready, ReplEvent::StackChanged(Some(message))) => {
                self.enter(ReplState::Halted { message }, self.halted_prompt.clone())
            }

            (ReplState::Halted { message: current }, ReplEvent::StackChanged(Some(message))) => {
                if *current == message {
                    StateTransition::NoChange
                } else {
                    self.state = ReplState::Halted { message };
                    StateTransition::Transition(self.state.clone())
                }
            }

            (ReplState::Halted { .. }, ReplEvent::StackChanged(None)) => {
                self.enter(ReplState::Ready, self.prompt.clone())
            }

            (ReplState::Ready, ReplEvent::StackChanged(None)) => StateTransition::NoChange,
        }
    }

    fn enter(&mut self, new_state: ReplState, prompt: String) -> StateTransition {
        self.state = new_state.clone();
        StateTransition::TransitionWithPrompt { new_state, prompt }
    }

    /// Check a line before submission. Command lines are always complete.
    pub fn check_line(input: &str) -> LineStatus {
        if input.trim_start().starts_with(':') {
            return LineStatus::Complete;
        }
        match literal::tokenize(input) {
            Ok(_) => LineStatus::Complete,
            Err(LiteralError::UnterminatedString { .. }) => LineStatus::Incomplete,
            Err(err) => LineStatus::Invalid {
                reason: err.to_string(),
            },
        }
    }
}

impl Default for ReplStateMachine {
    fn default() -> Self {
        Self::new("stack> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_to_halted_and_back() {
        let mut sm = ReplStateMachine::default();
        assert_eq!(sm.prompt(), "stack> ");

        let t = sm.process_event(ReplEvent::StackChanged(Some("Error: Insufficient items".into())));
        assert!(matches!(
            t,
            StateTransition::TransitionWithPrompt { ref prompt, .. } if prompt == "halted> "
        ));
        assert_eq!(sm.prompt(), "halted> ");

        let t = sm.process_event(ReplEvent::StackChanged(None));
        assert_eq!(
            t,
            StateTransition::TransitionWithPrompt {
                new_state: ReplState::Ready,
                prompt: "stack> ".to_string(),
            }
        );
    }

    #[test]
    fn test_same_halt_is_no_change() {
        let mut sm = ReplStateMachine::default();
        sm.process_event(ReplEvent::StackChanged(Some("Error: a".into())));
        assert_eq!(
            sm.process_event(ReplEvent::StackChanged(Some("Error: a".into()))),
            StateTransition::NoChange
        );
        assert_eq!(
            sm.process_event(ReplEvent::StackChanged(Some("Error: b".into()))),
            StateTransition::Transition(ReplState::Halted {
                message: "Error: b".into()
            })
        );
    }

    #[test]
    fn test_interrupt_keeps_state() {
        let mut sm = ReplStateMachine::default();
        sm.process_event(ReplEvent::StackChanged(Some("Error: a".into())));
        assert_eq!(sm.process_event(ReplEvent::Interrupted), StateTransition::NoChange);
        assert!(matches!(sm.state(), ReplState::Halted { .. }));
    }

    #[test]
    fn test_exit_is_terminal() {
        let mut sm = ReplStateMachine::default();
        sm.process_event(ReplEvent::QuitRequested);
        assert!(sm.is_exiting());
        assert_eq!(sm.process_event(ReplEvent::StackChanged(None)), StateTransition::NoChange);
        assert!(sm.is_exiting());

        let mut sm = ReplStateMachine::default();
        sm.process_event(ReplEvent::Eof);
        assert!(sm.is_exiting());
    }

    #[test]
    fn test_check_line() {
        assert_eq!(ReplStateMachine::check_line("1 2 OP_ADD"), LineStatus::Complete);
        assert_eq!(ReplStateMachine::check_line(r#"1 "open"#), LineStatus::Incomplete);
        assert!(matches!(
            ReplStateMachine::check_line(r#""a\q""#),
            LineStatus::Invalid { .. }
        ));
        assert_eq!(ReplStateMachine::check_line(r#":describe "x"#), LineStatus::Complete);
    }
}
