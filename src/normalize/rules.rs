//! Rewrite Rules
//!
//! The ordered text rewrites that make up the normalizer. Every rule is a
//! total function over text and returns the input borrowed when it has
//! nothing to fix.

use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// A heading marker glued to the text before it, e.g. `text## Header`
static HEADING_ARTIFACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^\n])\s*(#{1,6}\s)").expect("valid heading artifact regex")
});

/// `***content***` with optional padding inside the asterisks
static TRIPLE_ASTERISK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*\*\s*([^*]+?)\s*\*\*\*").expect("valid triple asterisk regex")
});

static SPACE_AFTER_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\s+").expect("valid bold padding regex"));

static SPACE_BEFORE_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\*\*").expect("valid bold padding regex"));

static BOLD_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*").expect("valid bold delimiter regex"));

/// A blank line; bold spans never cross one
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph break regex"));

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+([,.])").expect("valid punctuation spacing regex")
});

/// Two or more spaces/tabs, or a lone tab
static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}|\t").expect("valid space run regex"));

/// A single named rewrite step of the normalizer
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier, used by `--explain` and [`find`]
    pub name: &'static str,
    pub description: &'static str,
    rewrite: fn(&str) -> Cow<'_, str>,
}

impl Rule {
    /// Run this rule on its own
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        (self.rewrite)(text)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// The pipeline, in the order it must run. Later rules rely on the
/// output of earlier ones.
pub static RULES: [Rule; 6] = [
    Rule {
        name: "header-spacing",
        description: "Start glued heading markers on their own paragraph",
        rewrite: space_headings,
    },
    Rule {
        name: "triple-asterisk",
        description: "Collapse ***text*** to *text*",
        rewrite: collapse_triple_asterisks,
    },
    Rule {
        name: "bold-padding",
        description: "Strip whitespace just inside ** delimiters",
        rewrite: trim_bold_padding,
    },
    Rule {
        name: "stuck-bold",
        description: "Separate a ** opener from the word before it",
        rewrite: space_stuck_bold,
    },
    Rule {
        name: "space-before-punctuation",
        description: "Remove whitespace before commas and periods",
        rewrite: trim_space_before_punctuation,
    },
    Rule {
        name: "collapse-spaces",
        description: "Collapse runs of spaces and tabs to one space",
        rewrite: collapse_space_runs,
    },
];

/// Look up a rule by name
pub fn find(name: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.name == name)
}

/// The hash run a string starts with has no preceding character, so it is
/// kept out of the match; otherwise its first `#` would be captured.
fn space_headings(text: &str) -> Cow<'_, str> {
    let body = text.trim_start_matches('#');
    let leading = &text[..text.len() - body.len()];
    match HEADING_ARTIFACT.replace_all(body, "${1}\n\n${2}") {
        Cow::Borrowed(_) => Cow::Borrowed(text),
        Cow::Owned(spaced) => Cow::Owned(format!("{}{}", leading, spaced)),
    }
}

fn collapse_triple_asterisks(text: &str) -> Cow<'_, str> {
    TRIPLE_ASTERISK.replace_all(text, "*${1}*")
}

/// Trims after every `**`, then before every `**`. Delimiters are not
/// paired, so each one is handled on its own.
fn trim_bold_padding(text: &str) -> Cow<'_, str> {
    match SPACE_AFTER_BOLD.replace_all(text, "**") {
        Cow::Borrowed(text) => SPACE_BEFORE_BOLD.replace_all(text, "**"),
        Cow::Owned(trimmed) => Cow::Owned(
            SPACE_BEFORE_BOLD
                .replace_all(&trimmed, "**")
                .into_owned(),
        ),
    }
}

/// Delimiters alternate opener/closer in document order, restarting at each
/// blank line. Only openers glued to an ASCII alphanumeric get a space.
fn space_stuck_bold(text: &str) -> Cow<'_, str> {
    let mut rewritten = String::new();
    let mut copied = 0;
    let mut previous_end = 0;
    let mut opener = true;

    for delimiter in BOLD_DELIMITER.find_iter(text) {
        let start = delimiter.start();
        if PARAGRAPH_BREAK.is_match(&text[previous_end..start]) {
            opener = true;
        }

        let glued = text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());

        if opener && glued {
            rewritten.push_str(&text[copied..start]);
            rewritten.push(' ');
            copied = start;
        }

        previous_end = delimiter.end();
        opener = !opener;
    }

    if rewritten.is_empty() {
        return Cow::Borrowed(text);
    }
    rewritten.push_str(&text[copied..]);
    Cow::Owned(rewritten)
}

fn trim_space_before_punctuation(text: &str) -> Cow<'_, str> {
    SPACE_BEFORE_PUNCTUATION.replace_all(text, "${1}")
}

fn collapse_space_runs(text: &str) -> Cow<'_, str> {
    SPACE_RUN.replace_all(text, " ")
}
