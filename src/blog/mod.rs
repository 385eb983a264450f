//! Blog Archive
//!
//! Local exports of the blog content endpoint: a JSON array of posts whose
//! Markdown bodies go through the normalizer before rendering.

pub mod schema;

pub use schema::{BlogPost, PostId};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// All posts of one `get_blogs` payload, in payload order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogArchive {
    posts: Vec<BlogPost>,
}

impl BlogArchive {
    pub fn new(posts: Vec<BlogPost>) -> Self {
        Self { posts }
    }

    /// Parse an archive from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse blog archive JSON")
    }

    /// Load an archive from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read blog archive: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid blog archive: {}", path.display()))
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    /// Find a post by id, compared in string form
    pub fn find(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|post| post.id.matches(id))
    }

    /// Normalize every post body.
    ///
    /// Returns the new archive and the ids of the posts whose content changed.
    pub fn normalize_all(&self) -> (BlogArchive, Vec<PostId>) {
        let mut changed = Vec::new();
        let posts = self
            .posts
            .iter()
            .map(|post| {
                let content = post.normalized_content();
                if content != post.content.as_deref().unwrap_or_default() {
                    changed.push(post.id.clone());
                }
                BlogPost {
                    // Keep null content as null
                    content: post.content.as_ref().map(|_| content),
                    ..post.clone()
                }
            })
            .collect();

        (BlogArchive { posts }, changed)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize blog archive")
    }
}
