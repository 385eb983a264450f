//! Document Inputs
//!
//! One Markdown input (a file or standard input) and its original text.

use anyhow::{bail, Context, Result};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::normalize::{normalize_traced, Normalized};

/// Where a document's text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A Markdown input with its original content
#[derive(Debug, Clone)]
pub struct Document {
    source: Source,
    content: String,
}

impl Document {
    pub fn new(source: Source, content: impl Into<String>) -> Self {
        Self {
            source,
            content: content.into(),
        }
    }

    /// Read a document from standard input (or any reader standing in for it)
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Failed to read Markdown from standard input")?;
        Ok(Self::new(Source::Stdin, content))
    }

    /// Load a document from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read Markdown file: {}", path.display()))?;
        Ok(Self::new(Source::File(path.to_path_buf()), content))
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn normalize(&self) -> Normalized {
        normalize_traced(self.content.as_str())
    }

    pub fn is_clean(&self) -> bool {
        self.normalize().is_unchanged()
    }

    /// Replace the file this document was loaded from
    pub fn write_back(&self, text: &str) -> Result<()> {
        match &self.source {
            Source::File(path) => fs::write(path, text)
                .with_context(|| format!("Failed to write Markdown file: {}", path.display())),
            Source::Stdin => bail!("Cannot write back to standard input"),
        }
    }
}
