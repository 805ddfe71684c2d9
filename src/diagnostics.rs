use std::fmt::Write as _;

use crate::dispatch::Command;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::ListingNotFound { path } => render_listing_not_found(&path.display().to_string()),
        Error::ListingCorrupt { reason } => render_listing_corrupt(reason),
        Error::UnknownCommand { name, suggestion } => render_unknown_command(name, suggestion.as_deref()),
        Error::MissingOrigin { command } => render_missing_origin(command),
        Error::UnknownElement { id } => render_unknown_element(id),
        Error::ScriptSyntax { line, content } => render_script_syntax(*line, content),
        _ => render_generic(e),
    }
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::ScriptNotFound { path } => format!("\
# Error: Script Not Found

`{}` does not exist.
", path.display()),

        Error::ConfigInvalid(e) => format!("\
# Error: Invalid Config

{e}

## Fix

Check `.defnav.toml`. Known keys are `format` and `scroll_duration_ms`.
"),

        Error::UnknownFormat { name } => format!("\
# Error: Unknown Format

`{name}` is not an output format.

## Supported formats

- `text`
- `json`
"),

        Error::Watch { reason } => format!("\
# Error: Watch Failed

{reason}
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::Json(e) => format!("\
# Error: Invalid JSON

{e}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_listing_not_found(path: &str) -> String {
    format!("\
# Error: Listing Not Found

`{path}` does not exist.

## Fix

Point defnav at the annotated listing written by the analysis step:

    defnav apply path/to/listing.json all-var
")
}

fn render_listing_corrupt(reason: &str) -> String {
    format!("\
# Error: Listing Corrupt

{reason}

## Fix

Every element needs a non-empty `id` that is unique across the listing.
Regenerate the listing with the analysis step.
")
}

fn render_unknown_command(name: &str, suggestion: Option<&str>) -> String {
    let mut out = format!("\
# Error: Unknown Command

`{name}` is not a defnav command.
");

    if let Some(suggestion) = suggestion {
        let _ = write!(out, "\n## Did you mean `{suggestion}`?\n");
        return out;
    }

    out.push_str("\n## Available commands\n\n");
    for command in Command::all() {
        let _ = writeln!(out, "- `{command}`");
    }
    out
}

fn render_missing_origin(command: &str) -> String {
    format!("\
# Error: Missing Origin

`{command}` acts on a selected element.

## Fix

Pass the id of the element the user selected:

    defnav apply path/to/listing.json {command} <element-id>
")
}

fn render_unknown_element(id: &str) -> String {
    format!("\
# Error: Unknown Element

No element with id `{id}` exists in the listing.

## Fix

List the annotated elements and their ids:

    defnav stats path/to/listing.json
")
}

fn render_script_syntax(line: usize, content: &str) -> String {
    format!("\
# Error: Script Syntax

Line {line} is not a command:

    {content}

## Fix

Write one command per line, optionally followed by an element id:

    sel-var e12
    unslice
")
}

/// Find the suggestion that matches `name` once case and punctuation are ignored.
pub(crate) fn find_closest_suggestion(name: &str, suggestions: &[String]) -> Option<String> {
    let normalized = strip_punctuation(name);
    suggestions.iter()
        .find(|s| strip_punctuation(s) == normalized)
        .cloned()
}

/// Lowercase and drop everything but letters and digits, for fuzzy comparison.
fn strip_punctuation(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_ignores_case_and_separators() {
        let names = vec!["sel-var".to_string(), "goto-val".to_string()];
        assert_eq!(find_closest_suggestion("GOTO_VAL", &names), Some("goto-val".to_string()));
        assert_eq!(find_closest_suggestion("select", &names), None);
    }

    #[test]
    fn unknown_command_without_suggestion_lists_commands() {
        let md = render_error(&Error::UnknownCommand { name: "zap".to_string(), suggestion: None });
        assert!(md.starts_with("# Error: Unknown Command"));
        assert!(md.contains("- `goto-var`"));
        assert!(md.contains("- `unslice`"));
    }

    #[test]
    fn unknown_command_with_suggestion_offers_it() {
        let md = render_error(&Error::UnknownCommand {
            name: "SliCall".to_string(),
            suggestion: Some("sli-call".to_string()),
        });
        assert!(md.contains("## Did you mean `sli-call`?"));
    }
}
