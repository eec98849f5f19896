//! Anchor index
//!
//! Maps every loaded document to the anchors it defines, and remembers the
//! non-Markdown assets seen during the walk. Built once per run and then
//! only read.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::model::Document;

/// Files a directory link falls back to, in order
const DIRECTORY_INDEX_FILES: &[&str] = &["README.md", "index.md", "readme.md"];

/// What a link path resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Document(&'a str),
    Asset,
}

#[derive(Debug, Default, Clone)]
pub struct AnchorIndex {
    documents: BTreeMap<String, BTreeSet<String>>,
    assets: BTreeSet<String>,
}

impl AnchorIndex {
    pub fn build<'a>(
        documents: impl IntoIterator<Item = &'a Document>,
        assets: impl IntoIterator<Item = String>,
    ) -> Self {
        let documents = documents
            .into_iter()
            .map(|doc| {
                let anchors = doc.anchor_ids().map(str::to_string).collect();
                (doc.path.clone(), anchors)
            })
            .collect();

        Self {
            documents,
            assets: assets.into_iter().collect(),
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Resolve a root-relative path to a document (or directory index) or asset
    pub fn resolve(&self, path: &str) -> Option<Target<'_>> {
        let trimmed = path.trim_end_matches('/');

        if !path.ends_with('/') {
            if let Some((key, _)) = self.documents.get_key_value(trimmed) {
                return Some(Target::Document(key.as_str()));
            }
            if self.assets.contains(trimmed) {
                return Some(Target::Asset);
            }
        }

        DIRECTORY_INDEX_FILES.iter().find_map(|file| {
            let candidate = if trimmed.is_empty() {
                file.to_string()
            } else {
                format!("{}/{}", trimmed, file)
            };
            self.documents
                .get_key_value(candidate.as_str())
                .map(|(key, _)| Target::Document(key.as_str()))
        })
    }

    pub fn has_anchor(&self, document: &str, anchor: &str) -> bool {
        self.documents
            .get(document)
            .is_some_and(|anchors| anchors.contains(anchor))
    }

    /// Anchors of a document in sorted order
    pub fn anchors(&self, document: &str) -> impl Iterator<Item = &str> {
        self.documents
            .get(document)
            .into_iter()
            .flat_map(|anchors| anchors.iter().map(String::as_str))
    }
}
