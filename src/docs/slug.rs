//! Heading slugs
//!
//! Slug rule: lowercase, drop punctuation other than hyphens and underscores,
//! collapse whitespace runs into single hyphens. Repeats within one document
//! get `-1`, `-2`, ... in order of appearance.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Inline links and images inside heading text: keep the label
static INLINE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("Invalid INLINE_LINK_RE regex"));

/// Inline HTML tags inside heading text
static HTML_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[A-Za-z][^>]*>").expect("Invalid HTML_TAG_RE regex"));

/// Reduce inline Markdown in a heading to the text a renderer would show
pub fn plain_text(heading: &str) -> String {
    let without_links = INLINE_LINK_RE.replace_all(heading, "$1");
    HTML_TAG_RE.replace_all(&without_links, "").into_owned()
}

/// Slug for a single heading, without de-duplication
pub fn slugify(text: &str) -> String {
    let text = plain_text(text);

    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_space = false;
    for c in kept.trim().chars() {
        if c.is_whitespace() {
            in_space = true;
            continue;
        }
        if in_space {
            slug.push('-');
            in_space = false;
        }
        slug.push(c);
    }

    slug
}

/// Per-document slug allocator
#[derive(Debug, Default)]
pub struct SlugRegistry {
    seen: HashSet<String>,
    counts: HashMap<String, usize>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a unique slug for heading text. Returns "" for text with
    /// nothing sluggable.
    pub fn resolve(&mut self, text: &str) -> String {
        let base = slugify(text);
        if base.is_empty() {
            return base;
        }

        let mut slug = base.clone();
        if self.seen.contains(&slug) {
            let count = self.counts.entry(base.clone()).or_insert(0);
            loop {
                *count += 1;
                let candidate = format!("{}-{}", base, count);
                if !self.seen.contains(&candidate) {
                    slug = candidate;
                    break;
                }
            }
        }

        self.seen.insert(slug.clone());
        slug
    }

    /// Reserve an explicit id (`{#id}`); false if it was already taken
    pub fn claim(&mut self, id: &str) -> bool {
        self.seen.insert(id.to_string())
    }
}
