use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::command::COMMANDS;

const FIELDS: &[&str] = &["age", "weight", "height", "goal", "activity"];

/// Rustyline helper providing command completion, highlighting, and hints.
#[derive(Clone, Default)]
pub struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        // Field names after "/set "
        if let Some(partial) = line.strip_prefix("/set ") {
            if !partial.contains(' ') {
                let start = line.len() - partial.len();
                return Ok((start, candidates(FIELDS, partial)));
            }
            return Ok((pos, vec![]));
        }

        if line.starts_with('/') && !line.contains(' ') {
            Ok((0, candidates(COMMANDS, line)))
        } else {
            Ok((pos, vec![]))
        }
    }
}

fn candidates(options: &[&str], prefix: &str) -> Vec<Pair> {
    options
        .iter()
        .filter(|option| option.starts_with(prefix))
        .map(|option| Pair {
            display: option.to_string(),
            replacement: option.to_string(),
        })
        .collect()
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            COMMANDS
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}
