use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::dispatch::Command;
use crate::render::Format;
use crate::types::Tag;

/// Output the defnav reference document.
pub fn run(json: bool) {
    let root = PathBuf::from(".");
    let state = gather_state(&root);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

struct CurrentState {
    config_error: Option<String>,
    config_found: bool,
    effective: Config,
}

fn gather_state(root: &Path) -> CurrentState {
    let config_found = root.join(".defnav.toml").exists();
    let (effective, config_error) = match Config::load(root) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e.to_string())),
    };
    return CurrentState { config_error, config_found, effective };
}

const fn format_name(format: Format) -> &'static str {
    return match format {
        Format::Json => "json",
        Format::Text => "text",
    };
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_commands();
    print_markdown_listing_format();
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
}

fn print_markdown_header(version: &str) {
    print!(
        "\
# defnav {version}

Highlight, slice, and goto-definition over an annotated def/use listing.

## Workflow

    defnav apply <listing> <command> [element]    Apply one command to a fresh view
    defnav replay <listing> <script> [--trace]    Apply a script of commands in order
    defnav watch <listing> <script>               Replay again whenever either file changes
    defnav stats <listing>                        Summarise tags, addresses, ambiguity
    defnav commands                               List commands and their menu labels

"
    );
}

fn print_markdown_commands() {
    println!("## Commands\n");
    for command in Command::all() {
        let label = command.group().map_or_else(
            || return command.label().to_string(),
            |group| return format!("{group} > {}", command.label()),
        );
        let arg = if command.needs_origin() { " <element>" } else { "" };
        println!("    {:<24}{label}", format!("{command}{arg}"));
    }
    println!();
}

fn print_markdown_listing_format() {
    let tags = Tag::all().iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
    print!(
        "\
## Listing Format

    {{\"rows\": [{{\"line\": 3, \"text\": \"y = x + 1\",
               \"elements\": [{{\"id\": \"e7\", \"class\": \"ENV-DEF DENV-DEF\",
                              \"address\": \"a2\", \"text\": \"y\", \"children\": []}}]}}]}}

Tags recognised in `class`: {tags}

## Configuration (.defnav.toml)

    format = \"text\"              # default output format: text | json
    scroll_duration_ms = 200     # goto scroll animation bound

## Current State

"
    );
}

fn print_markdown_state(state: &CurrentState) {
    match (&state.config_error, state.config_found) {
        (Some(e), _) => println!("Config:  .defnav.toml (invalid: {e})"),
        (None, true) => println!("Config:  .defnav.toml (found)"),
        (None, false) => println!("Config:  .defnav.toml (not found)"),
    }
    println!("Format:  {}", format_name(state.effective.format));
    println!("Scroll:  {} ms", state.effective.scroll_duration_ms);
}

fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Success |
| 1    | Error (missing listing, bad command, bad element, bad script) |
"
    );
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson {
    commands: Vec<CommandInfo>,
    current_state: StateJson,
    exit_codes: Vec<ExitCodeInfo>,
    tags: Vec<String>,
    version: String,
}

#[derive(Serialize)]
struct CommandInfo {
    group: Option<String>,
    label: String,
    name: String,
    needs_element: bool,
}

#[derive(Serialize)]
struct ExitCodeInfo {
    code: u8,
    meaning: String,
}

#[derive(Serialize)]
struct StateJson {
    config_error: Option<String>,
    config_found: bool,
    format: String,
    scroll_duration_ms: u64,
}

fn print_json(state: &CurrentState) {
    let info = InfoJson {
        commands: Command::all()
            .into_iter()
            .map(|command| {
                return CommandInfo {
                    group: command.group().map(str::to_string),
                    label: command.label().to_string(),
                    name: command.to_string(),
                    needs_element: command.needs_origin(),
                };
            })
            .collect(),
        current_state: StateJson {
            config_error: state.config_error.clone(),
            config_found: state.config_found,
            format: format_name(state.effective.format).to_string(),
            scroll_duration_ms: state.effective.scroll_duration_ms,
        },
        exit_codes: vec![
            ExitCodeInfo { code: 0, meaning: "Success".to_string() },
            ExitCodeInfo { code: 1, meaning: "Error".to_string() },
        ],
        tags: Tag::all().iter().map(ToString::to_string).collect(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}
