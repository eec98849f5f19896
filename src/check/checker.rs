//! Cross-document link checking
//!
//! Every link is resolved against the directory of the document it appears
//! in. The pass only reads the [`AnchorIndex`]; it runs after all documents
//! are loaded.

use tracing::{debug, trace};

use crate::core::model::{Document, Finding, Link, Severity};
use crate::core::paths::resolve_relative;
use crate::docs::index::{AnchorIndex, Target};

/// Findings plus counters for the report summary
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub findings: Vec<Finding>,
    pub links_checked: usize,
    pub external_skipped: usize,
}

/// Check every link of every document against the index
pub fn check_documents(documents: &[Document], index: &AnchorIndex) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();

    for doc in documents {
        for link in &doc.links {
            if link.is_external() {
                outcome.external_skipped += 1;
                continue;
            }
            outcome.links_checked += 1;

            if let Some(finding) = check_link(doc, link, index) {
                trace!(source = %finding.source, line = finding.line, link = %finding.link, "broken link");
                outcome.findings.push(finding);
            }
        }
    }

    outcome
        .findings
        .sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    debug!(
        checked = outcome.links_checked,
        external = outcome.external_skipped,
        findings = outcome.findings.len(),
        "link check complete"
    );

    outcome
}

/// Check a single internal link
pub fn check_link(source: &Document, link: &Link, index: &AnchorIndex) -> Option<Finding> {
    let target_doc = if link.is_same_document() {
        source.path.as_str()
    } else {
        let Some(resolved) = resolve_relative(source.dir(), &link.path) else {
            return Some(Finding::new(
                source,
                link,
                Severity::BrokenFile,
                format!("'{}' points outside the root directory", link.path),
            ));
        };

        match index.resolve(&resolved) {
            Some(Target::Document(path)) => path,
            // Anchors into non-Markdown files are not checked
            Some(Target::Asset) => return None,
            None => {
                return Some(Finding::new(
                    source,
                    link,
                    Severity::BrokenFile,
                    format!("file '{}' not found", resolved),
                ))
            }
        }
    };

    let anchor = link.checked_anchor()?;
    if index.has_anchor(target_doc, anchor) {
        return None;
    }

    debug!(
        document = target_doc,
        anchor,
        available = ?index.anchors(target_doc).collect::<Vec<_>>(),
        "anchor not defined"
    );

    Some(Finding::new(
        source,
        link,
        Severity::BrokenAnchor,
        format!("anchor '#{}' not found in '{}'", anchor, target_doc),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::loader::build_document;

    fn doc(path: &str, content: &str) -> Document {
        build_document(path, content.to_string(), false)
    }

    fn run(docs: &[Document], assets: &[&str]) -> CheckOutcome {
        let index = AnchorIndex::build(docs, assets.iter().map(|s| s.to_string()));
        check_documents(docs, &index)
    }

    #[test]
    fn test_valid_cross_link() {
        let docs = vec![doc("a.md", "[see b](b.md#intro)\n"), doc("b.md", "# Intro\n")];
        let outcome = run(&docs, &[]);
        assert!(outcome.findings.is_empty());
        assert_eq!(outcome.links_checked, 1);
    }

    #[test]
    fn test_broken_anchor() {
        let docs = vec![doc("a.md", "[see b](b.md#intros)\n"), doc("b.md", "# Intro\n")];
        let outcome = run(&docs, &[]);
        assert_eq!(outcome.findings.len(), 1);
        let f = &outcome.findings[0];
        assert_eq!(f.source, "a.md");
        assert_eq!(f.severity, Severity::BrokenAnchor);
        assert_eq!(f.link, "b.md#intros");
        assert_eq!(f.line, 1);
    }

    #[test]
    fn test_broken_file() {
        let docs = vec![doc("a.md", "[see c](c.md)\n")];
        let outcome = run(&docs, &[]);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].severity, Severity::BrokenFile);
    }

    #[test]
    fn test_broken_file_with_anchor_reports_once() {
        let docs = vec![doc("a.md", "[see c](c.md#intro)\n")];
        let outcome = run(&docs, &[]);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].severity, Severity::BrokenFile);
    }

    #[test]
    fn test_same_document_anchor() {
        let docs = vec![doc("a.md", "# Top\n[up](#top) [bad](#bottom) [bare](#)\n")];
        let outcome = run(&docs, &[]);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].link, "#bottom");
        assert_eq!(outcome.findings[0].severity, Severity::BrokenAnchor);
    }

    #[test]
    fn test_relative_resolution() {
        let docs = vec![
            doc("part1/ch01.md", "[g](../glossary.md#aggregate) [n](ch02.md)\n"),
            doc("part1/ch02.md", "# Two\n"),
            doc("glossary.md", "## Aggregate\n"),
        ];
        assert!(run(&docs, &[]).findings.is_empty());
    }

    #[test]
    fn test_escaping_root_is_broken_file() {
        let docs = vec![doc("a.md", "[out](../outside.md)\n")];
        let outcome = run(&docs, &[]);
        assert_eq!(outcome.findings[0].severity, Severity::BrokenFile);
    }

    #[test]
    fn test_external_links_skipped() {
        let docs = vec![doc(
            "a.md",
            "[web](https://example.com/x.md) [mail](mailto:a@b.c)\n",
        )];
        let outcome = run(&docs, &[]);
        assert!(outcome.findings.is_empty());
        assert_eq!(outcome.external_skipped, 2);
        assert_eq!(outcome.links_checked, 0);
    }

    #[test]
    fn test_assets_and_directories() {
        let docs = vec![
            doc("a.md", "![map](img/map.png) [p](part1/) [q](img/map.png#frag)\n"),
            doc("part1/README.md", "# Part\n"),
        ];
        assert!(run(&docs, &["img/map.png"]).findings.is_empty());
    }

    #[test]
    fn test_explicit_anchor_target() {
        let docs = vec![
            doc("a.md", "[term](glossary.md#bc)\n"),
            doc("glossary.md", "<a id=\"bc\"></a>\n**Bounded Context**\n"),
        ];
        assert!(run(&docs, &[]).findings.is_empty());
    }

    #[test]
    fn test_fenced_links_produce_no_findings() {
        let docs = vec![doc("a.md", "```\n[x](missing.md)\n```\n")];
        let outcome = run(&docs, &[]);
        assert!(outcome.findings.is_empty());
        assert_eq!(outcome.links_checked, 0);
    }

    #[test]
    fn test_findings_sorted_by_source_and_line() {
        let docs = vec![
            doc("b.md", "[x](x.md)\n\n[y](y.md)\n"),
            doc("a.md", "\n[z](z.md)\n"),
        ];
        let outcome = run(&docs, &[]);
        let keys: Vec<_> = outcome
            .findings
            .iter()
            .map(|f| (f.source.as_str(), f.line))
            .collect();
        assert_eq!(keys, vec![("a.md", 2), ("b.md", 1), ("b.md", 3)]);
    }

    #[test]
    fn test_every_finding_occurs_in_source() {
        let docs = vec![
            doc("a.md", "[1](nope.md) [2](b.md#nope) [3](#self)\n"),
            doc("b.md", "# B\n"),
        ];
        let outcome = run(&docs, &[]);
        assert_eq!(outcome.findings.len(), 3);
        for f in &outcome.findings {
            let source = docs.iter().find(|d| d.path == f.source).unwrap();
            assert!(source.content.contains(&format!("]({})", f.link)));
        }
    }

    #[test]
    fn test_idempotent() {
        let docs = vec![
            doc("a.md", "[1](nope.md) [2](b.md#nope)\n"),
            doc("b.md", "# B\n# B\n[3](a.md#x)\n"),
        ];
        assert_eq!(run(&docs, &[]), run(&docs, &[]));
    }
}
