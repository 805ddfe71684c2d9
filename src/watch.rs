//! File watcher: replays a script on startup, then re-replays when the
//! listing or the script changes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::commands;
use crate::error;
use crate::fingerprint::{self, Fingerprint};
use crate::render::Format;

/// Debounce delay between filesystem events and re-replay.
const DEBOUNCE_MS: u64 = 100;

/// Parent directories of the watched files. Editors often replace files
/// instead of writing them in place, so directories are watched, not files.
fn collect_watch_dirs(files: &[&Path]) -> HashSet<PathBuf> {
    let mut dirs = HashSet::new();
    for file in files {
        let parent = file.parent().filter(|p| return !p.as_os_str().is_empty());
        dirs.insert(parent.map_or_else(|| return PathBuf::from("."), Path::to_path_buf));
    }
    return dirs;
}

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns `Error::Watch` if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, error::Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return error::Error::Watch {
            reason: format!("watcher setup failed: {e}"),
        };
    });
}

/// Entry point for the watch command.
///
/// Replays once, then watches the listing and script and replays again after
/// every change that actually altered their contents.
///
/// # Errors
///
/// Returns errors from watcher setup. Replay errors are printed and the
/// watch continues.
pub fn run(listing: &Path, script: &Path, format: Option<Format>) -> Result<(), error::Error> {
    eprintln!("watch: initial replay");
    let mut last = run_replay(listing, script, format);

    let files = [listing, script];
    let watch_dirs = collect_watch_dirs(&files);

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;

    for dir in &watch_dirs {
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot watch directory");
        }
    }

    let dir_count = watch_dirs.len();
    eprintln!("watch: monitoring {dir_count} directories, press Ctrl+C to stop");

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}

        let current = fingerprint::fingerprint_files(&files).ok();
        if current.is_some() && current == last {
            tracing::debug!("watch: contents unchanged, skipping");
            continue;
        }
        eprintln!("watch: change detected, replaying...");
        tracing::info!(listing = %listing.display(), script = %script.display(), "re-replaying");
        last = run_replay(listing, script, format);
    }

    return Ok(());
}

/// Replay once and print the result. Returns the fingerprint of the inputs
/// the replay saw, or `None` if they could not be read.
fn run_replay(listing: &Path, script: &Path, format: Option<Format>) -> Option<Fingerprint> {
    let seen = fingerprint::fingerprint_files(&[listing, script]).ok();
    if let Err(e) = commands::replay(listing, script, format, false) {
        crate::diagnostics::print_error(&e);
    }
    return seen;
}
