//! Markdown Normalizer
//!
//! Cleans up formatting artifacts that scraping and import tools leave in
//! Markdown, before the text is handed to a renderer. Pure text in, text
//! out: no I/O and no shared state.

pub mod rules;

use std::borrow::Cow;

pub use rules::{Rule, RULES};

/// Result of a traced normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    /// Names of the rules that rewrote their input, in pipeline order.
    /// Rules can undo each other (e.g. `a **b**` is trimmed to `a**b**`
    /// and then spaced again), so this may be non-empty for clean text.
    pub applied: Vec<&'static str>,
    changed: bool,
}

impl Normalized {
    /// True when the output equals the input
    pub fn is_unchanged(&self) -> bool {
        !self.changed
    }
}

/// Normalize a Markdown document.
///
/// Runs every rule in [`RULES`] in order. Absent input gives an empty
/// string; no input can make this fail.
///
/// ```
/// use markdown_normalizer::normalize;
///
/// assert_eq!(normalize("word**bold**"), "word **bold**");
/// assert_eq!(normalize(None::<&str>), "");
/// ```
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> String {
    run_pipeline(text.into(), |_| {})
}

/// Same as [`normalize`], also reporting which rules rewrote the text
pub fn normalize_traced<'a>(text: impl Into<Option<&'a str>>) -> Normalized {
    let original = text.into();
    let mut applied = Vec::new();
    let text = run_pipeline(original, |rule| applied.push(rule.name));
    let changed = text != original.unwrap_or_default();
    Normalized {
        text,
        applied,
        changed,
    }
}

fn run_pipeline(text: Option<&str>, mut on_change: impl FnMut(&Rule)) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut current = text.to_owned();
    for rule in &RULES {
        let rewritten = match rule.apply(&current) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(rewritten) => rewritten,
        };
        // A match can rewrite text to itself, e.g. an already spaced heading
        if rewritten != current {
            log::trace!("rule '{}' rewrote text", rule.name);
            on_change(rule);
            current = rewritten;
        }
    }
    current
}
