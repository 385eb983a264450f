//! Blog Post Schema
//!
//! Posts as delivered by the content endpoint's `get_blogs` action.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

use crate::normalize::normalize;

/// Post identifier. The spreadsheet backend emits numbers for numeric ids
/// and strings otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(Number),
    Text(String),
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{}", n),
            PostId::Text(s) => f.write_str(s),
        }
    }
}

impl PostId {
    /// Ids are compared by their string form, so `7` matches `"7"`
    pub fn matches(&self, id: &str) -> bool {
        match self {
            PostId::Text(s) => s == id,
            PostId::Number(n) => n.to_string() == id,
        }
    }
}

/// A single blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: Option<String>,
    /// Raw Markdown body
    #[serde(default)]
    pub content: Option<String>,
    /// Columns this tool does not interpret, kept for round-trips
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlogPost {
    /// Post body after normalization; a post without content gives `""`
    pub fn normalized_content(&self) -> String {
        normalize(self.content.as_deref())
    }
}
