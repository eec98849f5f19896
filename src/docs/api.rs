//! Listing commands for documents: headings/anchors of one file, and every
//! extracted link under a root

use anyhow::{Context, Result};
use std::path::Path;

use crate::check::report::ExitStatus;
use crate::core::config::CheckConfig;
use crate::core::paths::normalize_path;
use crate::core::render::{RenderConfig, Renderer};
use crate::docs::loader::{read_document, DocumentLoader};

/// Run the anchors command
pub fn run_anchors(file: &Path, render: RenderConfig) -> Result<ExitStatus> {
    let doc = read_document(file, &normalize_path(file))
        .with_context(|| format!("listing anchors of {}", file.display()))?;

    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render_outline(&doc));

    Ok(ExitStatus::Success)
}

/// Run the links command
pub fn run_links(root: &Path, config: CheckConfig, render: RenderConfig) -> Result<ExitStatus> {
    let loader = DocumentLoader::new(root, config)
        .with_context(|| format!("listing links under {}", root.display()))?;

    let documents = loader
        .documents()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("listing links under {}", root.display()))?;

    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render_links(&documents));

    Ok(ExitStatus::Success)
}
