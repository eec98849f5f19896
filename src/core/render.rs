//! Renderer module
//!
//! Renders reports and listings to text, json, jsonl or md

use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use crate::check::report::Report;
use crate::core::model::{Document, Severity, Warning};
use crate::core::util::truncate_chars;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Jsonl,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for reports and listings
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let out = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        out.unwrap_or_else(|_| "null".to_string())
    }

    fn to_jsonl<T: Serialize>(&self, values: impl IntoIterator<Item = T>) -> String {
        values
            .into_iter()
            .map(|v| self.to_json(&v))
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render the result of `check`
    pub fn render_report(&self, report: &Report) -> String {
        match self.config.format {
            OutputFormat::Text => self.report_text(report),
            OutputFormat::Json => self.to_json(report),
            OutputFormat::Jsonl => self.report_jsonl(report),
            OutputFormat::Markdown => self.report_markdown(report),
        }
    }

    fn report_text(&self, report: &Report) -> String {
        let mut output = String::new();

        for finding in &report.findings {
            let severity = match finding.severity {
                Severity::BrokenFile => finding.severity.as_str().red().bold(),
                Severity::BrokenAnchor => finding.severity.as_str().yellow().bold(),
            };
            output.push_str(&format!(
                "{}:{}:{}: {}: {} ({})\n",
                finding.source.bold(),
                finding.line,
                finding.column,
                severity,
                finding.link,
                finding.message
            ));
        }

        for warning in &report.warnings {
            output.push_str(&format!(
                "{}[{}] {}: {}\n",
                "warning".yellow(),
                warning.code,
                location(warning),
                warning.message
            ));
        }

        if !output.is_empty() {
            output.push('\n');
        }

        let summary = report.summary_line();
        if report.ok {
            output.push_str(&summary.green().to_string());
        } else {
            output.push_str(&summary.red().to_string());
        }

        output
    }

    /// One finding per line, then warnings, then a summary object
    fn report_jsonl(&self, report: &Report) -> String {
        let findings = report
            .findings
            .iter()
            .map(|f| serde_json::to_value(f).unwrap_or_default());
        let warnings = report
            .warnings
            .iter()
            .map(|w| json!({ "warning": w }));
        let tail = std::iter::once(json!({ "ok": report.ok, "summary": report.summary }));

        self.to_jsonl(findings.chain(warnings).chain(tail))
    }

    fn report_markdown(&self, report: &Report) -> String {
        let mut output = String::new();

        if !report.findings.is_empty() {
            output.push_str("## Findings\n\n");
            output.push_str("| Source | Line | Link | Severity |\n");
            output.push_str("|--------|------|------|----------|\n");
            for f in &report.findings {
                output.push_str(&format!(
                    "| `{}` | {} | `{}` | {} |\n",
                    f.source, f.line, f.link, f.severity
                ));
            }
            output.push('\n');
        }

        if !report.warnings.is_empty() {
            output.push_str("## Warnings\n\n");
            for w in &report.warnings {
                output.push_str(&format!("- **{}** `{}`: {}\n", w.code, location(w), w.message));
            }
            output.push('\n');
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("{}\n", report.summary_line()));
        output
    }

    /// Render the headings and explicit anchors of one document
    pub fn render_outline(&self, doc: &Document) -> String {
        match self.config.format {
            OutputFormat::Json => self.to_json(&json!({
                "path": doc.path,
                "headings": doc.headings,
                "anchors": doc.anchors,
            })),
            OutputFormat::Jsonl => self.to_jsonl(
                doc.headings
                    .iter()
                    .map(|h| json!({ "slug": h.slug, "level": h.level, "line": h.line, "text": h.text }))
                    .chain(
                        doc.anchors
                            .iter()
                            .map(|a| json!({ "slug": a.id, "line": a.line, "explicit": true })),
                    ),
            ),
            OutputFormat::Text | OutputFormat::Markdown => {
                let md = self.config.format == OutputFormat::Markdown;
                let mut output = String::new();
                if md {
                    output.push_str(&format!("## `{}`\n\n", doc.path));
                }
                for h in &doc.headings {
                    let indent = "  ".repeat(h.level.saturating_sub(1) as usize);
                    let slug = if h.slug.is_empty() {
                        "(no anchor)".to_string()
                    } else {
                        format!("#{}", h.slug)
                    };
                    if md {
                        output.push_str(&format!("{}- `{}` {}\n", indent, slug, h.text));
                    } else {
                        output.push_str(&format!(
                            "{:>5}  {}{}  {}\n",
                            h.line,
                            indent,
                            slug.cyan(),
                            truncate_chars(&h.text, 60).dimmed()
                        ));
                    }
                }
                for a in &doc.anchors {
                    if md {
                        output.push_str(&format!("- `#{}` (explicit, line {})\n", a.id, a.line));
                    } else {
                        output.push_str(&format!("{:>5}  {}  (explicit)\n", a.line, format!("#{}", a.id).cyan()));
                    }
                }
                output.trim_end().to_string()
            }
        }
    }

    /// Render every extracted link
    pub fn render_links(&self, documents: &[Document]) -> String {
        let rows = documents.iter().flat_map(|doc| {
            doc.links.iter().map(move |link| {
                json!({
                    "source": doc.path,
                    "line": link.line,
                    "column": link.column,
                    "link": link.target,
                    "label": link.label,
                    "external": link.is_external(),
                    "image": link.image,
                })
            })
        });

        match self.config.format {
            OutputFormat::Json => self.to_json(&rows.collect::<Vec<_>>()),
            OutputFormat::Jsonl => self.to_jsonl(rows),
            OutputFormat::Markdown => {
                let mut output = String::from("| Source | Line | Link | Label |\n|--------|------|------|-------|\n");
                for doc in documents {
                    for link in &doc.links {
                        output.push_str(&format!(
                            "| `{}` | {} | `{}` | {} |\n",
                            doc.path, link.line, link.target, link.label
                        ));
                    }
                }
                output
            }
            OutputFormat::Text => documents
                .iter()
                .flat_map(|doc| {
                    doc.links.iter().map(move |link| {
                        format!(
                            "{}:{}:{}: {}",
                            doc.path,
                            link.line,
                            link.column,
                            if link.is_external() {
                                link.target.dimmed().to_string()
                            } else {
                                link.target.clone()
                            }
                        )
                    })
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

fn location(warning: &Warning) -> String {
    match warning.line {
        Some(line) => format!("{}:{}", warning.path, line),
        None => warning.path.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::checker::CheckOutcome;
    use crate::core::model::Finding;
    use crate::docs::loader::build_document;

    fn sample_report() -> Report {
        let finding = Finding {
            source: "03-tactical-patterns.md".to_string(),
            line: 12,
            column: 3,
            link: "04-integration-patterns.md#44-missing".to_string(),
            label: "missing".to_string(),
            severity: Severity::BrokenAnchor,
            message: "anchor '#44-missing' not found".to_string(),
        };
        let outcome = CheckOutcome {
            findings: vec![finding],
            links_checked: 4,
            external_skipped: 0,
        };
        let warning = Warning::new("MALFORMED_LINK", "unclosed target", "a.md", Some(3));
        Report::new(outcome, vec![warning], 2)
    }

    fn renderer(format: OutputFormat) -> Renderer {
        Renderer::with_config(RenderConfig::with_pretty(format, false))
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("raw".parse::<OutputFormat>().unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_render_report_text() {
        plain();
        let output = renderer(OutputFormat::Text).render_report(&sample_report());
        assert!(output.contains(
            "03-tactical-patterns.md:12:3: broken-anchor: 04-integration-patterns.md#44-missing"
        ));
        assert!(output.contains("warning[MALFORMED_LINK] a.md:3: unclosed target"));
        assert!(output.ends_with("1 broken link (0 broken-file, 1 broken-anchor); 4 links checked in 2 documents"));
    }

    #[test]
    fn test_render_report_json() {
        let output = renderer(OutputFormat::Json).render_report(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["findings"][0]["link"], "04-integration-patterns.md#44-missing");
        assert_eq!(value["findings"][0]["severity"], "broken-anchor");
        assert_eq!(value["warnings"][0]["code"], "MALFORMED_LINK");
    }

    #[test]
    fn test_render_report_jsonl() {
        let output = renderer(OutputFormat::Jsonl).render_report(&sample_report());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        let last: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last["ok"], false);
        assert_eq!(last["summary"]["broken_anchor"], 1);
    }

    #[test]
    fn test_render_report_pretty_json() {
        let config = RenderConfig::with_pretty(OutputFormat::Json, true);
        let output = Renderer::with_config(config).render_report(&sample_report());
        assert!(output.contains("\n  "));
    }

    #[test]
    fn test_render_report_markdown() {
        let output = renderer(OutputFormat::Markdown).render_report(&sample_report());
        assert!(output.contains("## Findings"));
        assert!(output.contains("| `03-tactical-patterns.md` | 12 |"));
        assert!(output.contains("## Warnings"));
        assert!(output.contains("## Summary"));
    }

    #[test]
    fn test_render_outline() {
        plain();
        let doc = build_document(
            "a.md",
            "# Intro\n## Intro\n<a id=\"x\"></a>\n".to_string(),
            false,
        );
        let text = renderer(OutputFormat::Text).render_outline(&doc);
        assert!(text.contains("#intro"));
        assert!(text.contains("#intro-1"));
        assert!(text.contains("#x  (explicit)"));

        let jsonl = renderer(OutputFormat::Jsonl).render_outline(&doc);
        assert_eq!(jsonl.lines().count(), 3);
    }

    #[test]
    fn test_render_links() {
        plain();
        let docs = vec![build_document(
            "a.md",
            "[b](b.md#x) [web](https://example.com)\n".to_string(),
            false,
        )];
        let text = renderer(OutputFormat::Text).render_links(&docs);
        assert_eq!(text, "a.md:1:1: b.md#x\na.md:1:13: https://example.com");

        let json = renderer(OutputFormat::Json).render_links(&docs);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["external"], true);
    }
}
