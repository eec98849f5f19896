//! Check module - The link checking pipeline
//!
//! Provides:
//! - checker: Resolve every link against the anchor index
//! - report: Aggregate findings into a pass/fail report

pub mod checker;
pub mod report;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::core::config::CheckConfig;
use crate::core::error::CheckError;
use crate::core::render::{RenderConfig, Renderer};
use crate::docs::index::AnchorIndex;
use crate::docs::loader::DocumentLoader;
use checker::check_documents;
use report::{ExitStatus, Report};

/// Load, index and check everything under `root`
pub fn check_root(root: &Path, config: CheckConfig) -> Result<Report, CheckError> {
    let loader = DocumentLoader::new(root, config)?;
    let corpus = loader.load()?;

    let index = AnchorIndex::build(&corpus.documents, corpus.assets);
    let outcome = check_documents(&corpus.documents, &index);

    let warnings = corpus
        .documents
        .iter()
        .flat_map(|doc| doc.warnings.iter().cloned())
        .collect();

    Ok(Report::new(outcome, warnings, index.document_count()))
}

/// Run the check command
pub fn run_check(root: &Path, config: CheckConfig, render: RenderConfig) -> Result<ExitStatus> {
    let report = check_root(root, config)
        .with_context(|| format!("checking {}", root.display()))?;

    info!(
        documents = report.summary.documents,
        links = report.summary.links_checked,
        broken_file = report.summary.broken_file,
        broken_anchor = report.summary.broken_anchor,
        "check finished"
    );

    let renderer = Renderer::with_config(render);
    println!("{}", renderer.render_report(&report));

    Ok(report.status())
}
