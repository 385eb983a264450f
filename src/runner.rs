//! Runner
//!
//! Resolves the configured inputs, normalizes them and performs the output
//! mode. Kept free of process concerns so it can be driven from tests.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::blog::BlogArchive;
use crate::config::{BlogSelection, Config};
use crate::document::{Document, Source};
use crate::normalize::{normalize_traced, Normalized};

pub use crate::config::Mode;

/// Summary of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Number of documents or posts normalized
    pub processed: usize,
    /// Inputs whose text changed (or would change, in check mode)
    pub changed: Vec<String>,
    /// Inputs that could not be read
    pub failed: Vec<String>,
}

impl Outcome {
    /// 2 when an input failed, 1 when check mode found changes, else 0
    pub fn exit_status(&self, mode: Mode) -> u8 {
        if !self.failed.is_empty() {
            2
        } else if mode == Mode::Check && !self.changed.is_empty() {
            1
        } else {
            0
        }
    }
}

/// Run the configured normalization.
///
/// `stdin` is only read when no inputs are configured.
pub fn run(config: &Config, stdin: impl Read, stdout: &mut impl Write) -> Result<Outcome> {
    if let Some(selection) = &config.blog {
        return run_blog(config, selection, stdout);
    }

    let mut outcome = Outcome::default();

    if config.inputs.is_empty() {
        let document = Document::from_reader(stdin)?;
        process_document(config, &document, false, stdout, &mut outcome)?;
        return Ok(outcome);
    }

    let files = collect_files(&config.inputs, &config.extensions)?;
    // Several printed files are told apart by a `==> path <==` header
    let separate = config.mode == Mode::Print && files.len() > 1;
    let mut printed = 0;

    for path in files {
        match Document::load(&path) {
            Ok(document) => {
                if separate {
                    if printed > 0 {
                        writeln!(stdout)?;
                    }
                    writeln!(stdout, "==> {} <==", document.source())?;
                    printed += 1;
                }
                process_document(config, &document, separate, stdout, &mut outcome)?;
            }
            Err(e) => {
                log::error!("{:#}", e);
                outcome.failed.push(path.display().to_string());
            }
        }
    }

    Ok(outcome)
}

fn process_document(
    config: &Config,
    document: &Document,
    separate: bool,
    stdout: &mut impl Write,
    outcome: &mut Outcome,
) -> Result<()> {
    let normalized = document.normalize();
    outcome.processed += 1;

    if config.explain {
        explain(&document.source().to_string(), &normalized);
    }

    let changed = !normalized.is_unchanged();
    if changed {
        outcome.changed.push(document.source().to_string());
    }

    match config.mode {
        Mode::Print => {
            stdout.write_all(normalized.text.as_bytes())?;
            if separate && !normalized.text.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
        Mode::InPlace => match document.source() {
            Source::File(path) if changed => {
                document.write_back(&normalized.text)?;
                log::info!("Normalized {}", path.display());
            }
            Source::File(_) => log::debug!("{} is already clean", document.source()),
            Source::Stdin => bail!("Cannot rewrite standard input in place"),
        },
        Mode::Check => {
            if changed {
                writeln!(stdout, "{}", document.source())?;
            }
        }
    }

    Ok(())
}

fn run_blog(
    config: &Config,
    selection: &BlogSelection,
    stdout: &mut impl Write,
) -> Result<Outcome> {
    let archive = BlogArchive::load(&selection.archive)?;
    let archive_name = selection.archive.display().to_string();
    let mut outcome = Outcome::default();

    if config.explain {
        for post in archive.posts() {
            let label = format!("{}#{}", archive_name, post.id);
            explain(&label, &normalize_traced(post.content.as_deref()));
        }
    }

    if let Some(id) = &selection.post {
        let post = archive
            .find(id)
            .with_context(|| format!("Blog post '{}' not found in {}", id, archive_name))?;
        let content = post.normalized_content();
        outcome.processed = 1;
        if content != post.content.as_deref().unwrap_or_default() {
            outcome.changed.push(format!("{}#{}", archive_name, id));
        }

        match config.mode {
            Mode::Print => stdout.write_all(content.as_bytes())?,
            Mode::Check => {
                for label in &outcome.changed {
                    writeln!(stdout, "{}", label)?;
                }
            }
            Mode::InPlace => bail!("--post cannot be used with --in-place"),
        }
        return Ok(outcome);
    }

    let (normalized, changed) = archive.normalize_all();
    outcome.processed = archive.posts().len();
    outcome.changed = changed
        .iter()
        .map(|id| format!("{}#{}", archive_name, id))
        .collect();

    match config.mode {
        Mode::Print => writeln!(stdout, "{}", normalized.to_json_pretty()?)?,
        Mode::InPlace => {
            if !changed.is_empty() {
                let json = normalized.to_json_pretty()?;
                fs::write(&selection.archive, json + "\n").with_context(|| {
                    format!("Failed to write blog archive: {}", archive_name)
                })?;
                log::info!("Normalized {} post(s) in {}", changed.len(), archive_name);
            }
        }
        Mode::Check => {
            for label in &outcome.changed {
                writeln!(stdout, "{}", label)?;
            }
        }
    }

    Ok(outcome)
}

fn explain(label: &str, normalized: &Normalized) {
    if normalized.is_unchanged() {
        log::info!("{}: already clean", label);
    } else {
        log::info!("{}: {}", label, normalized.applied.join(", "));
    }
}

/// Expand inputs into the list of files to process.
///
/// Explicit file paths are kept as given; directories are walked
/// recursively for files with one of `extensions`, in sorted order.
pub fn collect_files(inputs: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            walk_directory(input, extensions, &mut files)?;
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn walk_directory(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk_directory(&path, extensions, files)?;
        } else if has_extension(&path, extensions) {
            files.push(path);
        }
    }
    Ok(())
}

/// Case-insensitive extension check against a list of bare extensions
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
