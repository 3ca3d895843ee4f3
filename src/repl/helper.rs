//! Rustyline helper integration
//!
//! Completion of opcode names and commands, hints from recent lines, and
//! validation of unterminated strings.

use std::borrow::Cow;
use std::collections::VecDeque;

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

use super::commands::COMMANDS;
use super::state_machine::{LineStatus, ReplStateMachine};
use crate::backend::{descriptors, eval};

const HINT_HISTORY: usize = 100;

pub struct ExplorerHelper {
    command_history: VecDeque<String>,
}

impl ExplorerHelper {
    pub fn new() -> Self {
        Self {
            command_history: VecDeque::with_capacity(HINT_HISTORY),
        }
    }

    /// Add a submitted line for hints
    pub fn add_to_history(&mut self, line: String) {
        if self.command_history.len() >= HINT_HISTORY {
            self.command_history.pop_front();
        }
        self.command_history.push_back(line);
    }

    fn candidates(line_before_word: &str) -> Vec<&'static str> {
        // After :describe, offer every documented opcode
        if line_before_word.trim_start().starts_with(":describe") {
            let mut names: Vec<&'static str> = descriptors::descriptors().iter().map(|d| d.name).collect();
            names.extend(eval::operation_names().filter(|n| descriptors::descriptor(n).is_none()));
            return names;
        }
        if line_before_word.trim().is_empty() {
            return eval::operation_names().chain(COMMANDS.iter().copied()).collect();
        }
        eval::operation_names().collect()
    }
}

impl Default for ExplorerHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for ExplorerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_before_cursor = &line[..pos];
        let word_start = line_before_cursor
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let partial = &line_before_cursor[word_start..];

        if partial.is_empty() {
            return Ok((pos, vec![]));
        }

        let mut matches: Vec<Pair> = Self::candidates(&line_before_cursor[..word_start])
            .into_iter()
            .filter(|c| c.starts_with(partial))
            .map(|c| Pair {
                display: c.to_string(),
                replacement: c.to_string(),
            })
            .collect();
        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches.dedup_by(|a, b| a.display == b.display);

        Ok((word_start, matches))
    }
}

impl Hinter for ExplorerHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        self.command_history
            .iter()
            .rev()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Highlighter for ExplorerHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.contains("OP_") {
            return Cow::Borrowed(line);
        }
        // Known opcodes in cyan; spacing is preserved
        let mut out = String::with_capacity(line.len() + 16);
        let mut word_start = None;
        for (i, ch) in line.char_indices().chain(std::iter::once((line.len(), ' '))) {
            match (ch.is_whitespace(), word_start) {
                (false, None) => word_start = Some(i),
                (true, Some(start)) => {
                    let word = &line[start..i];
                    if eval::lookup(word).is_some() {
                        out.push_str(&format!("\x1b[36m{}\x1b[0m", word));
                    } else {
                        out.push_str(word);
                    }
                    word_start = None;
                }
                _ => {}
            }
            if ch.is_whitespace() && i < line.len() {
                out.push(ch);
            }
        }
        Cow::Owned(out)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }
}

impl Validator for ExplorerHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(match ReplStateMachine::check_line(ctx.input()) {
            LineStatus::Complete => ValidationResult::Valid(None),
            LineStatus::Incomplete => ValidationResult::Incomplete,
            LineStatus::Invalid { reason } => ValidationResult::Invalid(Some(format!("  ({})", reason))),
        })
    }
}

impl Helper for ExplorerHelper {}
