//! Engine Catalog
//!
//! Content store for car-brand engine reference pages: brand records, engine
//! records with their schema.org JSON-LD graph, content validation, and the
//! FAQPage derived from each engine's FAQs.
//!
//! - `catalog/`: content model, loader and read-only store
//! - `schema_org/`: typed `@graph` nodes, FAQPage derivation, script payloads
//! - `validation/`: content invariants reported as issues, never raised
//! - `config`: environment configuration for the binaries

pub mod catalog;
pub mod config;
pub mod error;
pub mod schema_org;
pub mod validation;

// Re-export commonly used types
pub use catalog::{load_dir, BrandRecord, ContentStore, EngineRecord, LoadOptions, LoadOutcome};
pub use config::CatalogConfig;
pub use error::{MalformedContentError, NotFoundError};
pub use schema_org::derive_faq_page_node;
pub use validation::{
    validate, validate_with, Severity, ValidationIssue, ValidationOptions, ValidationReport,
};
