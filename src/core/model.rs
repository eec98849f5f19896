//! Document model
//!
//! Every stage of the pipeline reads and produces these types: the loader
//! builds [`Document`]s, the checker turns their [`Link`]s into [`Finding`]s,
//! and the renderer serializes both.

use serde::{Deserialize, Serialize};

/// Warning codes surfaced in reports
pub mod codes {
    pub const MALFORMED_LINK: &str = "MALFORMED_LINK";
    pub const UNCLOSED_FENCE: &str = "UNCLOSED_FENCE";
    pub const DUPLICATE_ANCHOR: &str = "DUPLICATE_ANCHOR";
    pub const LOSSY_UTF8: &str = "LOSSY_UTF8";
}

/// Kind of broken link
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Target path does not correspond to a loaded document or asset
    BrokenFile,
    /// Target document exists but does not define the anchor
    BrokenAnchor,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::BrokenFile => "broken-file",
            Severity::BrokenAnchor => "broken-anchor",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Markdown heading with its resolved slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub text: String,

    /// 1 for `#`, 6 for `######`
    pub level: u8,

    /// 1-indexed line of the heading text
    pub line: u32,

    /// Empty when the heading text has no sluggable characters
    pub slug: String,
}

/// An anchor declared directly in the source (`<a id="..">`, `{#..}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitAnchor {
    pub id: String,
    pub line: u32,
}

/// An inline link `[label](target)` found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target exactly as written between the parentheses (title stripped)
    pub target: String,

    /// Decoded path part of the target; empty means the same document
    pub path: String,

    /// Fragment after `#`, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    pub label: String,

    pub line: u32,
    pub column: u32,

    #[serde(default)]
    pub image: bool,
}

impl Link {
    /// Links with a URI scheme or a protocol-relative prefix point outside the book
    pub fn is_external(&self) -> bool {
        if self.target.starts_with("//") {
            return true;
        }
        match self.target.split_once(':') {
            Some((scheme, _)) => {
                let mut chars = scheme.chars();
                chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                    && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                    && !scheme.contains('/')
            }
            None => false,
        }
    }

    pub fn is_same_document(&self) -> bool {
        self.path.is_empty()
    }

    /// Anchor to verify, ignoring a bare `#`
    pub fn checked_anchor(&self) -> Option<&str> {
        self.anchor.as_deref().filter(|a| !a.is_empty())
    }
}

/// A recoverable problem noticed while reading a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Warning {
    pub fn new(code: &str, message: impl Into<String>, path: &str, line: Option<u32>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            path: path.to_string(),
            line,
        }
    }
}

/// A single Markdown file and everything extracted from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Path relative to root, using '/' as separator
    pub path: String,

    /// xxh3 hash of the raw content
    pub hash: String,

    pub headings: Vec<Heading>,

    pub anchors: Vec<ExplicitAnchor>,

    pub links: Vec<Link>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,

    #[serde(skip)]
    pub content: String,
}

impl Document {
    /// Every anchor id this document answers to
    pub fn anchor_ids(&self) -> impl Iterator<Item = &str> {
        self.headings
            .iter()
            .map(|h| h.slug.as_str())
            .filter(|s| !s.is_empty())
            .chain(self.anchors.iter().map(|a| a.id.as_str()))
    }

    /// Directory of this document relative to root ("" for top level)
    pub fn dir(&self) -> &str {
        self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }
}

/// A link whose target does not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Document containing the link
    pub source: String,
    pub line: u32,
    pub column: u32,

    /// Raw link target
    pub link: String,

    pub label: String,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn new(source: &Document, link: &Link, severity: Severity, message: String) -> Self {
        Self {
            source: source.path.clone(),
            line: link.line,
            column: link.column,
            link: link.target.clone(),
            label: link.label.clone(),
            severity,
            message,
        }
    }

    /// Ordering used in reports: source path, then position
    pub fn sort_key(&self) -> (&str, u32, u32) {
        (self.source.as_str(), self.line, self.column)
    }
}
