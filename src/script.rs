//! Replay scripts: one command per line, standing in for a run of user gestures.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::dispatch::{Command, Engine, Op};
use crate::error::Error;
use crate::listing::Listing;
use crate::view::{Transition, ViewState};

/// `<command> [element-id]`, with optional trailing `# comment`.
static LINE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| return Regex::new(r"^\s*([A-Za-z][\w-]*)(?:\s+([^\s#]+))?\s*(?:#.*)?$").ok());

/// A parsed script line, not yet bound to a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The command to run.
    pub command: Command,
    /// One-based line number in the script.
    pub line: usize,
    /// Selected element id, as written.
    pub origin: Option<String>,
}

/// Parse a script. Blank lines and `#` comments are skipped.
///
/// # Errors
///
/// Returns `Error::ScriptSyntax` for a line that is not `<command> [element-id]`,
/// or `Error::UnknownCommand` for a command name that doesn't exist.
pub fn parse(content: &str) -> Result<Vec<Step>, Error> {
    let mut steps = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line = index.saturating_add(1);
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        steps.push(parse_script_line(trimmed, line)?);
    }
    return Ok(steps);
}

/// Read and parse a script from disk.
///
/// # Errors
///
/// Returns `Error::ScriptNotFound` if the file doesn't exist, `Error::Io` for
/// other read failures, or any error from [`parse`].
pub fn read(path: &Path) -> Result<Vec<Step>, Error> {
    let content = match std::fs::read_to_string(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::ScriptNotFound { path: path.to_path_buf() });
        },
        Err(e) => return Err(Error::Io(e)),
        Ok(c) => c,
    };
    return parse(&content);
}

/// Bind every step to the listing before anything is applied, so a bad
/// element id fails the whole replay rather than leaving it half done.
///
/// # Errors
///
/// Returns `Error::MissingOrigin` or `Error::UnknownElement` for the first
/// step that cannot be bound.
pub fn bind(listing: &Listing, steps: &[Step]) -> Result<Vec<Op>, Error> {
    return steps
        .iter()
        .map(|step| return step.command.bind(listing, step.origin.as_deref()))
        .collect();
}

/// Apply bound operations in order from the initial view.
///
/// `on_step` sees every intermediate transition; the last one is returned.
pub fn replay(engine: &Engine<'_>, ops: &[Op], mut on_step: impl FnMut(&Op, &Transition)) -> Transition {
    let mut current = Transition::to(ViewState::initial());
    for op in ops {
        current = engine.apply(&current.view, op);
        on_step(op, &current);
    }
    tracing::debug!(steps = ops.len(), marks = current.view.mark_count(), "replay finished");
    return current;
}

/// Parse one non-blank, non-comment line.
///
/// # Errors
///
/// Returns `Error::ScriptSyntax` or `Error::UnknownCommand`.
fn parse_script_line(trimmed: &str, line: usize) -> Result<Step, Error> {
    let syntax_error = || return Error::ScriptSyntax { content: trimmed.to_string(), line };
    let pattern = LINE_PATTERN.as_ref().ok_or_else(syntax_error)?;
    let captures = pattern.captures(trimmed).ok_or_else(syntax_error)?;
    let name = captures.get(1).ok_or_else(syntax_error)?.as_str();
    let command: Command = name.parse()?;
    let origin = captures.get(2).map(|m| return m.as_str().to_string());
    return Ok(Step { command, line, origin });
}
