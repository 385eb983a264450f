//! Configuration management for mdclean.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML configuration files (project and user level)
//! - Validation of flag combinations

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Project-level configuration file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".mdclean.toml";

const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown"];
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Command-line arguments for mdclean
#[derive(Debug, Parser)]
#[command(name = "mdclean")]
#[command(about = "Clean up formatting artifacts in Markdown documents")]
#[command(version)]
pub struct Args {
    /// Files or directories to normalize; reads standard input when omitted
    pub paths: Vec<PathBuf>,

    /// Rewrite files instead of printing the result
    #[arg(short = 'i', long, conflicts_with = "check")]
    pub in_place: bool,

    /// Only report inputs that would change; exit with status 1 if any do
    #[arg(long)]
    pub check: bool,

    /// Log which rules rewrote each input
    #[arg(long)]
    pub explain: bool,

    /// Keep running and re-normalize files as they change
    #[arg(long)]
    pub watch: bool,

    /// Blog archive exported from the content endpoint (JSON array of posts)
    #[arg(long, value_name = "FILE")]
    pub blogs: Option<PathBuf>,

    /// Only print the post with this id from the blog archive
    #[arg(long, value_name = "ID", requires = "blogs")]
    pub post: Option<String>,

    /// File extension to pick up when walking directories (repeatable)
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Configuration file to use instead of the default lookup
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Settings read from a TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub extensions: Option<Vec<String>>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration TOML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))
    }
}

/// What to do with normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write normalized text to standard output
    Print,
    /// Rewrite inputs that change
    InPlace,
    /// Write nothing, report inputs that would change
    Check,
}

/// Blog archive input selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSelection {
    pub archive: PathBuf,
    pub post: Option<String>,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Files and directories to process; empty means standard input
    pub inputs: Vec<PathBuf>,
    pub mode: Mode,
    pub explain: bool,
    pub watch: bool,
    pub blog: Option<BlogSelection>,
    /// Lowercase extensions, without the leading dot
    pub extensions: Vec<String>,
    pub log_level: String,
    /// Configuration file that was loaded, if any
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments, loading the config file
    pub fn from_args(args: Args) -> Result<Self> {
        let config_file = match &args.config {
            Some(path) => Some(path.clone()),
            None => discover_config_file(),
        };

        let file = match &config_file {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };

        let mut config = Self::from_parts(args, file)?;
        config.config_file = config_file;
        Ok(config)
    }

    /// Merge arguments over file settings. Command-line values win.
    pub fn from_parts(args: Args, file: FileConfig) -> Result<Self> {
        if args.watch {
            if args.check {
                bail!("--watch cannot be combined with --check");
            }
            if args.blogs.is_some() {
                bail!("--watch cannot be combined with --blogs");
            }
            if args.paths.is_empty() {
                bail!("--watch needs at least one file or directory");
            }
        }
        if args.blogs.is_some() && !args.paths.is_empty() {
            bail!("--blogs reads the archive file; do not pass other paths");
        }
        if args.in_place {
            if args.post.is_some() {
                bail!("--post prints a single post and cannot be used with --in-place");
            }
            if args.paths.is_empty() && args.blogs.is_none() {
                bail!("--in-place needs at least one file or directory");
            }
        }

        let mode = if args.check {
            Mode::Check
        } else if args.in_place || args.watch {
            Mode::InPlace
        } else {
            Mode::Print
        };

        let extensions = if !args.extensions.is_empty() {
            args.extensions
        } else if let Some(extensions) = file.extensions {
            extensions
        } else {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        };
        let extensions = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        let log_level = args
            .log_level
            .or(file.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Config {
            inputs: args.paths,
            mode,
            explain: args.explain,
            watch: args.watch,
            blog: args.blogs.map(|archive| BlogSelection {
                archive,
                post: args.post,
            }),
            extensions,
            log_level,
            config_file: None,
        })
    }
}

/// Project file first, then the user config directory
fn discover_config_file() -> Option<PathBuf> {
    let project = PathBuf::from(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    let user = dirs::config_dir()?.join("mdclean").join("config.toml");
    user.is_file().then_some(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mdclean").chain(argv.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_parts(args(&[]), FileConfig::default()).expect("config");
        assert!(config.inputs.is_empty());
        assert_eq!(config.mode, Mode::Print);
        assert_eq!(config.extensions, vec!["md", "markdown"]);
        assert_eq!(config.log_level, "warn");
        assert!(config.blog.is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig::from_toml("extensions = [\"txt\"]\nlog_level = \"debug\"")
            .expect("parse toml");
        let config = Config::from_parts(
            args(&["--extension", ".MDX", "--log-level", "info", "docs"]),
            file.clone(),
        )
        .expect("config");
        assert_eq!(config.extensions, vec!["mdx"]);
        assert_eq!(config.log_level, "info");

        let config = Config::from_parts(args(&["docs"]), file).expect("config");
        assert_eq!(config.extensions, vec!["txt"]);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_modes() {
        let check = Config::from_parts(args(&["--check", "a.md"]), FileConfig::default());
        assert_eq!(check.expect("config").mode, Mode::Check);

        let watch = Config::from_parts(args(&["--watch", "docs"]), FileConfig::default());
        assert_eq!(watch.expect("config").mode, Mode::InPlace);
    }

    #[test]
    fn test_invalid_combinations() {
        let file = FileConfig::default;
        assert!(Config::from_parts(args(&["--watch"]), file()).is_err());
        assert!(Config::from_parts(args(&["--watch", "--check", "a.md"]), file()).is_err());
        assert!(Config::from_parts(args(&["--in-place"]), file()).is_err());
        assert!(Config::from_parts(args(&["--blogs", "b.json", "a.md"]), file()).is_err());
        assert!(
            Config::from_parts(args(&["-i", "--blogs", "b.json", "--post", "1"]), file()).is_err()
        );
        assert!(Args::try_parse_from(["mdclean", "--post", "1"]).is_err());
        assert!(Args::try_parse_from(["mdclean", "-i", "--check", "a.md"]).is_err());
    }

    #[test]
    fn test_blog_selection() {
        let config = Config::from_parts(
            args(&["--blogs", "blogs.json", "--post", "12"]),
            FileConfig::default(),
        )
        .expect("config");
        assert_eq!(
            config.blog,
            Some(BlogSelection {
                archive: PathBuf::from("blogs.json"),
                post: Some("12".to_string()),
            })
        );
    }

    #[test]
    fn test_invalid_toml() {
        assert!(FileConfig::from_toml("extensions = 3").is_err());
    }
}
