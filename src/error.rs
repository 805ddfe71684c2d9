/// Crate-level error types for defnav diagnostics.
use std::path::PathBuf;

/// Failures at the boundary of the engine: loading listings, scripts and
/// config, or binding a command to its origin element. Engine operations
/// themselves never fail. Each variant names the file, command, or element
/// involved.
#[allow(clippy::error_impl_error, reason = "crate-level error type")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `.defnav.toml` exists but cannot be parsed.
    #[error("invalid config: {0}")]
    ConfigInvalid(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON (de)serialization failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// The listing parsed as JSON but violates the document contract.
    #[error("listing corrupt: {reason}")]
    ListingCorrupt {
        /// Description of the violation.
        reason: String,
    },

    /// The listing file does not exist on disk.
    #[error("listing not found: {}", path.display())]
    ListingNotFound {
        /// Path to the missing listing.
        path: PathBuf,
    },

    /// A command that acts on a selection was invoked without an origin element.
    #[error("command `{command}` needs an origin element")]
    MissingOrigin {
        /// Name of the command.
        command: String,
    },

    /// The replay script does not exist on disk.
    #[error("script not found: {}", path.display())]
    ScriptNotFound {
        /// Path to the missing script.
        path: PathBuf,
    },

    /// A replay script line could not be parsed.
    #[error("script syntax error on line {line}: `{content}`")]
    ScriptSyntax {
        /// Raw text of the offending line.
        content: String,
        /// One-based line number.
        line: usize,
    },

    /// No command with this name exists.
    #[error("unknown command: `{name}`")]
    UnknownCommand {
        /// The name as typed.
        name: String,
        /// The closest known command name, if any.
        suggestion: Option<String>,
    },

    /// The origin element id is not part of the listing.
    #[error("unknown element: `{id}`")]
    UnknownElement {
        /// The element id as given.
        id: String,
    },

    /// Output format other than `text` or `json`.
    #[error("unknown output format: `{name}`")]
    UnknownFormat {
        /// The format name as given.
        name: String,
    },

    /// The filesystem watcher could not be set up.
    #[error("watch failed: {reason}")]
    Watch {
        /// Description of the failure.
        reason: String,
    },
}
