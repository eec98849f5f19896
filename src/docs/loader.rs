//! Document loading
//!
//! Walks the root with the `ignore` crate, sorted by file name so every run
//! sees files in the same order. Markdown files become [`Document`]s; every
//! other file is remembered as an asset that links may point at.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::config::CheckConfig;
use crate::core::error::CheckError;
use crate::core::file_reader::read_text_lossy;
use crate::core::model::{codes, Document, Warning};
use crate::core::paths::make_relative;
use crate::core::util::{has_extension, hash_bytes};
use crate::docs::headings::scan_headings;
use crate::docs::links::extract_links;

/// A file discovered under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Markdown { path: PathBuf, relative: String },
    Asset { relative: String },
}

/// All documents and assets of one run
#[derive(Debug, Default)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub assets: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DocumentLoader {
    root: PathBuf,
    config: CheckConfig,
}

impl DocumentLoader {
    /// Fails if the root does not exist or is not a directory
    pub fn new(root: &Path, config: CheckConfig) -> Result<Self, CheckError> {
        if !root.exists() {
            return Err(CheckError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(CheckError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let root = root
            .canonicalize()
            .map_err(|e| CheckError::io(root, e))?;

        Ok(Self { root, config })
    }

    /// Walk the root lazily. Each call starts a fresh walk.
    pub fn entries(&self) -> impl Iterator<Item = Result<Entry, CheckError>> + '_ {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(!self.config.hidden)
            .git_ignore(self.config.respect_ignore)
            .git_global(self.config.respect_ignore)
            .git_exclude(self.config.respect_ignore)
            .ignore(self.config.respect_ignore)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        builder.build().filter_map(move |entry| {
            let entry = match entry {
                Ok(e) => e,
                Err(source) => {
                    return Some(Err(CheckError::Walk {
                        path: self.root.clone(),
                        source,
                    }))
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                return None;
            }

            let path = entry.into_path();
            let relative = make_relative(&path, &self.root)?;

            if has_extension(&path, &self.config.extensions) {
                Some(Ok(Entry::Markdown { path, relative }))
            } else {
                Some(Ok(Entry::Asset { relative }))
            }
        })
    }

    /// Lazy sequence of documents in path order
    pub fn documents(&self) -> impl Iterator<Item = Result<Document, CheckError>> + '_ {
        self.entries().filter_map(|entry| match entry {
            Ok(Entry::Markdown { path, relative }) => Some(read_document(&path, &relative)),
            Ok(Entry::Asset { .. }) => None,
            Err(e) => Some(Err(e)),
        })
    }

    /// Load every document and asset; the first I/O error aborts
    pub fn load(&self) -> Result<Corpus, CheckError> {
        let mut markdown = Vec::new();
        let mut assets = Vec::new();

        for entry in self.entries() {
            match entry? {
                Entry::Markdown { path, relative } => markdown.push((path, relative)),
                Entry::Asset { relative } => assets.push(relative),
            }
        }

        let documents = read_documents(&markdown)?;
        debug!(
            documents = documents.len(),
            assets = assets.len(),
            root = %self.root.display(),
            "loaded corpus"
        );

        Ok(Corpus { documents, assets })
    }
}

#[cfg(not(feature = "parallel"))]
fn read_documents(files: &[(PathBuf, String)]) -> Result<Vec<Document>, CheckError> {
    files
        .iter()
        .map(|(path, relative)| read_document(path, relative))
        .collect()
}

#[cfg(feature = "parallel")]
fn read_documents(files: &[(PathBuf, String)]) -> Result<Vec<Document>, CheckError> {
    use rayon::prelude::*;

    files
        .par_iter()
        .map(|(path, relative)| read_document(path, relative))
        .collect()
}

/// Read and parse one Markdown file
pub fn read_document(path: &Path, relative: &str) -> Result<Document, CheckError> {
    let read = read_text_lossy(path)?;
    if read.lossy_conversion {
        warn!(path = relative, "invalid UTF-8 replaced while reading");
    }
    Ok(build_document(relative, read.content, read.lossy_conversion))
}

/// Build a document from its content; headings and links are independent passes
pub fn build_document(relative: &str, content: String, lossy: bool) -> Document {
    let heading_scan = scan_headings(&content, relative);
    let link_scan = extract_links(&content, relative);

    let mut warnings = Vec::new();
    if lossy {
        warnings.push(Warning::new(
            codes::LOSSY_UTF8,
            "file is not valid UTF-8; invalid bytes were replaced",
            relative,
            None,
        ));
    }
    warnings.extend(heading_scan.warnings);
    warnings.extend(link_scan.warnings);
    warnings.sort_by_key(|w| w.line);

    for w in &warnings {
        warn!(path = %w.path, line = ?w.line, code = %w.code, "{}", w.message);
    }

    Document {
        path: relative.to_string(),
        hash: hash_bytes(content.as_bytes()),
        headings: heading_scan.headings,
        anchors: heading_scan.anchors,
        links: link_scan.links,
        warnings,
        content,
    }
}
