//! Markdown Normalizer
//!
//! Cleans up Markdown that picked up formatting artifacts on its way in
//! from scrapers and spreadsheet exports, before it reaches a renderer.
//!
//! This library provides:
//! - The normalizer itself and its ordered rewrite rules
//! - Document and blog-archive inputs
//! - Configuration, the batch runner and watch mode behind `mdclean`

pub mod blog;
pub mod config;
pub mod document;
pub mod normalize;
pub mod runner;
pub mod watch;

pub use blog::{BlogArchive, BlogPost};
pub use config::Config;
pub use document::{Document, Source};
pub use normalize::{normalize, normalize_traced, Normalized};
