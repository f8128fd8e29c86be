//! Catalog: typed brand/engine records, loading and lookup.
//!
//! - `types`: page content model (`BrandRecord`, `EngineRecord`, ...)
//! - `extra_notes`: compatible-model notes, typed where the shape is known
//! - `store`: immutable in-memory store with lookups and search
//! - `loader`: content directory to `ContentStore`, failures isolated per record

pub mod types;
pub mod extra_notes;
pub mod store;
pub mod loader;

#[cfg(test)]
pub(crate) mod test_support;

pub use types::{BrandRecord, EngineRecord};
pub use extra_notes::ExtraNote;
pub use store::{CatalogStats, ContentStore, EngineRef};
pub use loader::{load_brand_str, load_dir, LoadOptions, LoadOutcome};
