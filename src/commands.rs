//! Core CLI commands for defnav: apply, replay, stats, commands.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::dispatch::{Command, Engine};
use crate::error;
use crate::goto::Navigation;
use crate::listing::Listing;
use crate::render::{self, Format, Report};
use crate::script;
use crate::stats::Stats;
use crate::types::Mark;
use crate::view::{Transition, ViewState};

/// Apply one command to the initial view of a listing and print the report.
///
/// # Errors
///
/// Returns errors from config loading, listing reading, command parsing or
/// binding, and rendering.
pub fn apply(
    listing_path: &Path,
    command: &str,
    element: Option<&str>,
    format: Option<Format>,
) -> Result<(), error::Error> {
    let config = Config::load(&PathBuf::from("."))?;
    let listing = Listing::read(listing_path)?;
    let engine = Engine::new(&listing).with_scroll_duration(config.scroll_duration_ms);

    let command: Command = command.parse()?;
    let op = command.bind(&listing, element)?;

    let transition = match (op.command, op.origin.as_ref()) {
        (Command::Goto(kind), Some(origin)) => {
            let (transition, navigation) = engine.goto(&ViewState::initial(), kind, origin);
            report_navigation(&listing, navigation, &transition);
            transition
        },
        _ => engine.apply(&ViewState::initial(), &op),
    };

    return print_report(&listing, &transition, format.unwrap_or(config.format));
}

/// Print the command catalogue grouped the way the context menu groups it.
pub fn list_commands() {
    print!("{}", render_command_table());
}

/// Replay a script over a listing, printing the final report, or the report
/// after every step with `trace`.
///
/// # Errors
///
/// Returns errors from config loading, listing or script reading, binding,
/// and rendering.
pub fn replay(
    listing_path: &Path,
    script_path: &Path,
    format: Option<Format>,
    trace: bool,
) -> Result<(), error::Error> {
    let config = Config::load(&PathBuf::from("."))?;
    let format = format.unwrap_or(config.format);
    let listing = Listing::read(listing_path)?;
    let steps = script::read(script_path)?;
    let ops = script::bind(&listing, &steps)?;
    let engine = Engine::new(&listing).with_scroll_duration(config.scroll_duration_ms);

    let mut step_error = None;
    let last = script::replay(&engine, &ops, |op, transition| {
        if !trace || step_error.is_some() {
            return;
        }
        match op.origin.as_ref() {
            Some(origin) => println!("## {} {origin}\n", op.command),
            None => println!("## {}\n", op.command),
        }
        if let Err(e) = print_report(engine.listing(), transition, format) {
            step_error = Some(e);
        }
    });
    if let Some(e) = step_error {
        return Err(e);
    }

    let count = ops.len();
    eprintln!("replayed {count} steps from {}", script_path.display());
    if trace {
        return Ok(());
    }
    return print_report(&listing, &last, format);
}

/// Print statistics for a listing, as markdown or JSON.
///
/// # Errors
///
/// Returns errors from config loading, listing reading, or JSON serialization.
pub fn stats(listing_path: &Path, format: Option<Format>) -> Result<(), error::Error> {
    let config = Config::load(&PathBuf::from("."))?;
    let listing = Listing::read(listing_path)?;
    let stats = Stats::collect(&listing);

    match format.unwrap_or(config.format) {
        Format::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        Format::Text => print!("{}", stats.to_markdown()),
    }
    return Ok(());
}

/// Render a transition and print it to stdout.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
fn print_report(listing: &Listing, transition: &Transition, format: Format) -> Result<(), error::Error> {
    let report = Report::new(listing, transition);
    let rendered = render::render(listing, &report, format)?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    return Ok(());
}

/// The command catalogue as a markdown table.
fn render_command_table() -> String {
    let mut out = String::from("| Command | Menu | Needs element |\n|---------|------|---------------|\n");
    for command in Command::all() {
        let menu = command.group().map_or_else(
            || return command.label().to_string(),
            |group| return format!("{group} > {}", command.label()),
        );
        let needs = if command.needs_origin() { "yes" } else { "no" };
        let _ = writeln!(out, "| `{command}` | {menu} | {needs} |");
    }
    return out;
}

/// Tell the user how a goto ended; stdout carries only the report.
fn report_navigation(listing: &Listing, navigation: Navigation, transition: &Transition) {
    match navigation {
        Navigation::Ambiguous => {
            let candidates = count_goto_targets(&transition.view);
            eprintln!("goto: definitions disagree, sliced to {candidates} candidates");
        },
        Navigation::NoTarget => eprintln!("goto: no definition found"),
        Navigation::Unresolved => eprintln!("goto: selection is not a navigable fact"),
        Navigation::Unique => {
            let Some(scroll) = &transition.scroll else {
                return;
            };
            match listing.row(scroll.row).and_then(|row| return row.line) {
                Some(line) => eprintln!("goto: {} on line {line}", scroll.element),
                None => eprintln!("goto: {} in {}", scroll.element, scroll.row),
            }
        },
    }
    return;
}

/// Goto targets in a view; the origin's use mark is not one of them.
fn count_goto_targets(view: &ViewState) -> usize {
    return view.marks().filter(|(_, mark)| return *mark == Mark::Goto).count();
}
