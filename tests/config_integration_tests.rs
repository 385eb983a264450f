//! Configuration file loading
use std::fs;

use clap::Parser;
use markdown_normalizer::config::{Args, Config};

#[test]
fn test_explicit_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("mdclean.toml");
    fs::write(&path, "extensions = [\"md\", \"txt\"]\nlog_level = \"info\"\n").expect("write");

    let args = Args::try_parse_from(["mdclean", "--config", path.to_str().expect("utf-8")])
        .expect("arguments");
    let config = Config::from_args(args).expect("create config");

    assert_eq!(config.config_file.as_deref(), Some(path.as_path()));
    assert_eq!(config.extensions, vec!["md", "txt"]);
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let args = Args::try_parse_from(["mdclean", "--config", path.to_str().expect("utf-8")])
        .expect("arguments");
    let err = Config::from_args(args).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.toml"));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "log_level = [").expect("write");

    let args = Args::try_parse_from(["mdclean", "--config", path.to_str().expect("utf-8")])
        .expect("arguments");
    assert!(Config::from_args(args).is_err());
}
