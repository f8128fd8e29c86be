//! Content Validation
//!
//! Checks brand and engine records against the invariants the type system
//! cannot express: non-empty copy, well-formed URLs, breadcrumb ordering,
//! FAQ/graph agreement, reference integrity inside the structured-data graph.
//!
//! Validation never fails and never panics. It returns a list of
//! [`ValidationIssue`]s, each with a severity and a dotted path such as
//! `polestar.b308.schema.graph[1].breadcrumb.itemListElement[2].position`.
//!
//! Rule modules:
//! - `content`: brand and engine copy (hero, specs, models, issues, FAQs)
//! - `graph`: schema.org `@graph` invariants
//! - `text`: URL, markup and date helpers shared by both

pub mod report;

mod content;
mod graph;
mod text;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::types::{BrandRecord, EngineRecord};

pub use report::ValidationReport;
pub use text::{is_absolute_http_url, parse_schema_date};

// ============================================================================
// Issues
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One violated content invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.path, self.message)
    }
}

/// Dotted path into a brand record, built up while walking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root(key: &str) -> Self {
        Self(key.to_string())
    }

    pub fn key(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{}]", self.0, i))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collects issues in visiting order.
#[derive(Debug, Default)]
pub(crate) struct IssueSink {
    issues: Vec<ValidationIssue>,
}

impl IssueSink {
    pub(crate) fn push(&mut self, severity: Severity, path: &FieldPath, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity,
            path: path.as_str().to_string(),
            message: message.into(),
        });
    }

    pub(crate) fn error(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.push(Severity::Error, path, message);
    }

    pub(crate) fn warning(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.push(Severity::Warning, path, message);
    }

    /// Error when `value` is empty or whitespace.
    pub(crate) fn require_text(&mut self, path: &FieldPath, value: &str) {
        if text::is_blank(value) {
            self.error(path, "must not be empty");
        }
    }

    pub(crate) fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }
}

// ============================================================================
// Options
// ============================================================================

/// Soft limits for SEO copy; exceeding them is a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub title_soft_limit: usize,
    pub description_soft_limit: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            title_soft_limit: 70,
            description_soft_limit: 160,
        }
    }
}

impl From<&crate::config::CatalogConfig> for ValidationOptions {
    fn from(config: &crate::config::CatalogConfig) -> Self {
        Self {
            title_soft_limit: config.title_soft_limit,
            description_soft_limit: config.description_soft_limit,
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Validate a brand and all of its engines with default options.
pub fn validate(brand_key: &str, brand: &BrandRecord) -> Vec<ValidationIssue> {
    validate_with(brand_key, brand, &ValidationOptions::default())
}

/// Validate a brand and all of its engines. Engines are visited in key order
/// so the result is deterministic.
pub fn validate_with(
    brand_key: &str,
    brand: &BrandRecord,
    options: &ValidationOptions,
) -> Vec<ValidationIssue> {
    let mut sink = IssueSink::default();
    let root = FieldPath::root(brand_key);

    content::check_brand(&mut sink, &root, brand_key, brand);

    for (engine_key, engine) in brand.sorted_engines() {
        check_engine(&mut sink, &root.key(engine_key), engine_key, engine, options);
    }

    sink.into_issues()
}

/// Validate a single engine record.
pub fn validate_engine(
    brand_key: &str,
    engine_key: &str,
    engine: &EngineRecord,
    options: &ValidationOptions,
) -> Vec<ValidationIssue> {
    let mut sink = IssueSink::default();
    let path = FieldPath::root(brand_key).key(engine_key);
    check_engine(&mut sink, &path, engine_key, engine, options);
    sink.into_issues()
}

fn check_engine(
    sink: &mut IssueSink,
    path: &FieldPath,
    engine_key: &str,
    engine: &EngineRecord,
    options: &ValidationOptions,
) {
    content::check_engine(sink, path, engine_key, engine, options);
    graph::check_graph(sink, &path.key("schema"), engine);
}
