use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use defnav::render::Format;
use defnav::{commands, diagnostics, error, info, watch};

#[derive(Parser)]
#[command(name = "defnav", about = "Highlight, slice, and goto-definition over def/use listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one command to a fresh view and print the result
    Apply {
        /// Annotated listing (JSON)
        listing: PathBuf,
        /// Command name, e.g. sel-var or goto-val (see `defnav commands`)
        command: String,
        /// Id of the selected element, for commands that act on a selection
        element: Option<String>,
        /// Output format: text or json (default from .defnav.toml)
        #[arg(long)]
        format: Option<Format>,
    },
    /// List every command with its context-menu label
    Commands,
    /// Print the full reference document
    Info {
        /// Output as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Apply a script of commands in order, starting from a fresh view
    Replay {
        /// Annotated listing (JSON)
        listing: PathBuf,
        /// Script with one `<command> [element]` per line
        script: PathBuf,
        /// Output format: text or json (default from .defnav.toml)
        #[arg(long)]
        format: Option<Format>,
        /// Print the view after every step, not just the last
        #[arg(long)]
        trace: bool,
    },
    /// Summarise tags, addresses, and ambiguous goto targets in a listing
    Stats {
        /// Annotated listing (JSON)
        listing: PathBuf,
        /// Output format: text (markdown) or json
        #[arg(long)]
        format: Option<Format>,
    },
    /// Replay a script and replay it again whenever the listing or script changes
    Watch {
        /// Annotated listing (JSON)
        listing: PathBuf,
        /// Script with one `<command> [element]` per line
        script: PathBuf,
        /// Output format: text or json (default from .defnav.toml)
        #[arg(long)]
        format: Option<Format>,
    },
}

/// Route tracing output to stderr, filtered by `DEFNAV_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DEFNAV_LOG").or_else(|_| return EnvFilter::try_new("defnav=warn"));
    let Ok(filter) = filter else {
        return;
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
    return;
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<(), error::Error> = match cli.command {
        Commands::Apply { listing, command, element, format } => {
            commands::apply(&listing, &command, element.as_deref(), format)
        },
        Commands::Commands => {
            commands::list_commands();
            Ok(())
        },
        Commands::Info { json } => {
            info::run(json);
            Ok(())
        },
        Commands::Replay { listing, script, format, trace } => commands::replay(&listing, &script, format, trace),
        Commands::Stats { listing, format } => commands::stats(&listing, format),
        Commands::Watch { listing, script, format } => watch::run(&listing, &script, format),
    };

    return match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}
