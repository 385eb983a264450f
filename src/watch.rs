//! Watch mode
//!
//! Keeps Markdown files normalized in place while they are being edited.
//! Files that are already clean are never rewritten, so the watcher's own
//! writes settle after one extra event.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notify::{Config as WatcherConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::normalize::normalize;
use crate::runner::has_extension;

#[derive(Debug)]
enum WatcherEvent {
    MarkdownChanged(PathBuf),
    WatcherError(notify::Error),
}

/// Watch the configured inputs until the watcher shuts down
pub async fn watch(config: &Config) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();

    let explicit_files: Vec<PathBuf> = config
        .inputs
        .iter()
        .filter(|path| path.is_file())
        .filter_map(|path| path.canonicalize().ok())
        .collect();
    let extensions = config.extensions.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                    for path in event.paths {
                        if is_watched(&path, &explicit_files, &extensions) {
                            let _ = tx.send(WatcherEvent::MarkdownChanged(path));
                        }
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(WatcherEvent::WatcherError(e));
            }
        },
        WatcherConfig::default(),
    )?;

    for input in &config.inputs {
        let mode = if input.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(input, mode)
            .with_context(|| format!("Failed to watch {}", input.display()))?;
        log::info!("Watching {}", input.display());
    }

    process_events(rx).await;
    Ok(())
}

/// Handle events until every sender is gone. Failures are logged and the
/// loop carries on.
async fn process_events(mut rx: mpsc::UnboundedReceiver<WatcherEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            WatcherEvent::MarkdownChanged(path) => match renormalize(&path).await {
                Ok(true) => log::info!("Normalized {}", path.display()),
                Ok(false) => log::debug!("{} is already clean", path.display()),
                Err(e) => log::error!("{:#}", e),
            },
            WatcherEvent::WatcherError(e) => {
                log::error!("File watcher error: {}", e);
            }
        }
    }
}

/// Files named on the command line are always watched, even without a
/// Markdown extension; anything else must match `extensions`.
fn is_watched(path: &Path, explicit_files: &[PathBuf], extensions: &[String]) -> bool {
    if has_extension(path, extensions) {
        return true;
    }
    path.canonicalize()
        .map(|path| explicit_files.contains(&path))
        .unwrap_or(false)
}

/// Normalize a file in place. Returns whether it was rewritten.
pub async fn renormalize(path: &Path) -> Result<bool> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        // Editors often replace files through a rename; the path may be gone
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read Markdown file: {}", path.display()));
        }
    };

    let normalized = normalize(content.as_str());
    if normalized == content {
        return Ok(false);
    }

    tokio::fs::write(path, normalized)
        .await
        .with_context(|| format!("Failed to write Markdown file: {}", path.display()))?;
    Ok(true)
}
