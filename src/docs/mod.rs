//! Docs module - Load Markdown documents and extract their structure
//!
//! Provides:
//! - loader: Walk the root and build documents
//! - headings: Headings and explicit anchors
//! - slug: Heading text to anchor slugs
//! - links: Inline link extraction
//! - index: Per-document anchor sets
//! - api: anchors/links listing commands

pub mod api;
pub mod blocks;
pub mod headings;
pub mod index;
pub mod links;
pub mod loader;
pub mod slug;
