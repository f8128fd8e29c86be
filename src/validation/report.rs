//! Validation Report
//!
//! Catalog-wide summary produced by `ContentStore::validate_all` and printed
//! by the `validate_content` binary, as text or JSON.

use std::fmt::Write as _;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{Severity, ValidationIssue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub generated_at: String,
    pub brands_checked: usize,
    pub engines_checked: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: Vec<ValidationIssue>,
    #[serde(default)]
    pub load_failures: Vec<String>,
}

impl ValidationReport {
    pub fn new(brands_checked: usize, engines_checked: usize, issues: Vec<ValidationIssue>) -> Self {
        let error_count = issues.iter().filter(|i| i.severity == Severity::Error).count();
        let warning_count = issues.len() - error_count;

        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            brands_checked,
            engines_checked,
            error_count,
            warning_count,
            issues,
            load_failures: Vec::new(),
        }
    }

    /// Attach loader failures. Each one counts as an error.
    pub fn with_load_failures<I, S>(mut self, failures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.load_failures = failures.into_iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0 || !self.load_failures.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && self.warning_count == 0
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "# Content validation");
        let _ = writeln!(out);
        let _ = writeln!(out, "Generated: {}", self.generated_at);
        let _ = writeln!(
            out,
            "Checked {} brand(s), {} engine(s): {} error(s), {} warning(s)",
            self.brands_checked, self.engines_checked, self.error_count, self.warning_count
        );

        if !self.load_failures.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "## Load failures ({})", self.load_failures.len());
            let _ = writeln!(out);
            for failure in &self.load_failures {
                let _ = writeln!(out, "- {}", failure);
            }
        }

        for severity in [Severity::Error, Severity::Warning] {
            let section: Vec<&ValidationIssue> =
                self.issues.iter().filter(|i| i.severity == severity).collect();
            if section.is_empty() {
                continue;
            }
            let heading = match severity {
                Severity::Error => "Errors",
                Severity::Warning => "Warnings",
            };
            let _ = writeln!(out);
            let _ = writeln!(out, "## {} ({})", heading, section.len());
            let _ = writeln!(out);
            for issue in section {
                let _ = writeln!(out, "- `{}`: {}", issue.path, issue.message);
            }
        }

        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
