//! Line editor helper: slash command completion and inline hints

use rallies_core::ui::slash::suggestions_for;
use rallies_core::ui::styled::{Styles, paint};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow::{self, Owned};

#[derive(Clone, Default)]
pub struct ShellHelper;

impl ShellHelper {
    /// Command names completing the `/`-prefixed word in `line`
    fn candidates(line: &str) -> Vec<String> {
        match line.strip_prefix('/') {
            Some(prefix) if !prefix.contains(char::is_whitespace) => suggestions_for(prefix)
                .into_iter()
                .map(|info| format!("/{}", info.name))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = Self::candidates(&line[..pos])
            .into_iter()
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd,
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.len() < 2 {
            return None;
        }
        Self::candidates(line)
            .into_iter()
            .find(|cmd| cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Highlighter for ShellHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(paint(&Styles::dim(), hint))
    }
}

impl Validator for ShellHelper {}
