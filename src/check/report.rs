//! Pass/fail report
//!
//! Aggregates findings and warnings from one run. Findings are never
//! truncated; warnings never affect the exit status.

use serde::{Deserialize, Serialize};
use std::process::ExitCode;

use crate::check::checker::CheckOutcome;
use crate::core::model::{Finding, Severity, Warning};

/// Process exit signal derived from a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn code(&self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Run statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub documents: usize,
    pub links_checked: usize,
    pub external_skipped: usize,
    pub broken_file: usize,
    pub broken_anchor: usize,
    pub warnings: usize,
}

impl Summary {
    pub fn broken(&self) -> usize {
        self.broken_file + self.broken_anchor
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub findings: Vec<Finding>,
    pub ok: bool,
    pub summary: Summary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn new(outcome: CheckOutcome, warnings: Vec<Warning>, documents: usize) -> Self {
        let count = |severity: Severity| {
            outcome
                .findings
                .iter()
                .filter(|f| f.severity == severity)
                .count()
        };

        let summary = Summary {
            documents,
            links_checked: outcome.links_checked,
            external_skipped: outcome.external_skipped,
            broken_file: count(Severity::BrokenFile),
            broken_anchor: count(Severity::BrokenAnchor),
            warnings: warnings.len(),
        };

        Self {
            ok: outcome.findings.is_empty(),
            findings: outcome.findings,
            summary,
            warnings,
        }
    }

    pub fn status(&self) -> ExitStatus {
        if self.ok {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }

    /// One-line human summary
    pub fn summary_line(&self) -> String {
        let s = &self.summary;
        let scope = format!(
            "{} {} checked in {} {}",
            s.links_checked,
            plural(s.links_checked, "link", "links"),
            s.documents,
            plural(s.documents, "document", "documents"),
        );

        if self.ok {
            format!("ok: no broken links ({})", scope)
        } else {
            format!(
                "{} broken {} ({} broken-file, {} broken-anchor); {}",
                s.broken(),
                plural(s.broken(), "link", "links"),
                s.broken_file,
                s.broken_anchor,
                scope
            )
        }
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
