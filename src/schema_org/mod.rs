//! Structured data (schema.org JSON-LD) for engine pages.
//!
//! - `graph`: typed `@graph` node kinds
//! - `derive`: FAQPage built from the engine's `faqs`
//! - `json_ld`: script payload for the rendering layer

pub mod graph;
pub mod derive;
pub mod json_ld;

pub use graph::{
    ArticleNode, Breadcrumb, BreadcrumbList, DatasetNode, FaqAnswer, FaqPageNode, FaqQuestion,
    GraphNode, IdRef, IdTarget, ListItem, SchemaGraph, SchemaNode, VehicleCompatibility,
    VehicleEngineNode, WebPageNode, WebSiteNode, SCHEMA_ORG_CONTEXT,
};
pub use derive::derive_faq_page_node;
