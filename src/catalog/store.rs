//! Content Store - In-memory brand/engine records for page rendering
//!
//! Built once by the loader, then shared read-only (`&ContentStore` or
//! `Arc<ContentStore>`). Two-level FxHashMap keyed by brand, then engine.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::catalog::types::{BrandRecord, EngineRecord};
use crate::error::NotFoundError;
use crate::validation::{validate_with, ValidationOptions, ValidationReport};

#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    brands: FxHashMap<String, BrandRecord>,
}

/// Search hit: an engine page by brand and engine key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineRef<'a> {
    pub brand: &'a str,
    pub engine: &'a str,
    pub title: &'a str,
}

/// Catalog size, for load summaries and the validation report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub brands: usize,
    pub engines: usize,
    pub faqs: usize,
    pub graph_nodes: usize,
    pub spec_rows: usize,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_brands<I>(brands: I) -> Self
    where
        I: IntoIterator<Item = (String, BrandRecord)>,
    {
        Self {
            brands: brands.into_iter().collect(),
        }
    }

    /// Insert or replace a brand. Returns the previous record for that key.
    pub fn insert_brand(&mut self, key: impl Into<String>, brand: BrandRecord) -> Option<BrandRecord> {
        self.brands.insert(key.into(), brand)
    }

    pub fn contains_brand(&self, brand: &str) -> bool {
        self.brands.contains_key(brand)
    }

    pub fn get_brand(&self, brand: &str) -> Result<&BrandRecord, NotFoundError> {
        self.brands.get(brand).ok_or_else(|| NotFoundError::UnknownBrand {
            brand: brand.to_string(),
        })
    }

    pub fn get_engine(&self, brand: &str, engine: &str) -> Result<&EngineRecord, NotFoundError> {
        self.get_brand(brand)?
            .engines
            .get(engine)
            .ok_or_else(|| NotFoundError::UnknownEngine {
                brand: brand.to_string(),
                engine: engine.to_string(),
            })
    }

    /// Brand keys in lexicographic order.
    pub fn list_brands(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.brands.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Engine keys of one brand in lexicographic order.
    pub fn list_engines(&self, brand: &str) -> Result<Vec<&str>, NotFoundError> {
        Ok(self.get_brand(brand)?.engine_keys())
    }

    /// Keys that could stand in for a failed lookup: every brand when the
    /// brand is unknown, otherwise that brand's engines.
    pub fn alternatives(&self, err: &NotFoundError) -> Vec<&str> {
        if err.is_unknown_brand() {
            return self.list_brands();
        }
        self.list_engines(err.brand()).unwrap_or_default()
    }

    /// Number of brands.
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    pub fn engine_count(&self) -> usize {
        self.brands.values().map(|b| b.engines.len()).sum()
    }

    /// Validate every brand in parallel. Issues come back grouped by brand
    /// in key order, so the report is stable across runs.
    pub fn validate_all(&self, options: &ValidationOptions) -> ValidationReport {
        let brands = self.list_brands();

        let issues: Vec<_> = brands
            .par_iter()
            .map(|key| match self.brands.get(*key) {
                Some(brand) => validate_with(key, brand, options),
                None => Vec::new(),
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        ValidationReport::new(brands.len(), self.engine_count(), issues)
    }

    /// Case-insensitive engine lookup for authoring tools.
    ///
    /// Engine-key prefix matches come first, then metadata-title substring
    /// matches; each group is ordered by (brand, engine).
    pub fn search_engines(&self, query: &str, limit: usize) -> Vec<EngineRef<'_>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut by_key = Vec::new();
        let mut by_title = Vec::new();
        for brand_key in self.list_brands() {
            let Some(brand) = self.brands.get(brand_key) else { continue };
            for (engine_key, engine) in brand.sorted_engines() {
                let hit = EngineRef {
                    brand: brand_key,
                    engine: engine_key,
                    title: &engine.metadata.title,
                };
                if engine_key.to_lowercase().starts_with(&needle) {
                    by_key.push(hit);
                } else if engine.metadata.title.to_lowercase().contains(&needle) {
                    by_title.push(hit);
                }
            }
        }

        by_key.into_iter().chain(by_title).take(limit).collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            brands: self.brands.len(),
            ..CatalogStats::default()
        };
        for engine in self.brands.values().flat_map(|b| b.engines.values()) {
            stats.engines += 1;
            stats.faqs += engine.faqs.len();
            stats.graph_nodes += engine.schema.graph.len();
            stats.spec_rows += engine.technical_specifications.engine_specs.len();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{sample_brand, sample_engine};

    fn sample_store() -> ContentStore {
        let mut brand = sample_brand();
        let mut turbo = sample_engine();
        turbo.metadata.title = "Polestar B308T Engine: Turbo Variant Specs".to_string();
        brand.engines.insert("b308t".to_string(), turbo);

        let mut hybrid = sample_engine();
        hybrid.metadata.title = "Polestar H520 Hybrid with B308 heritage".to_string();
        brand.engines.insert("h520".to_string(), hybrid);

        ContentStore::from_brands([("polestar".to_string(), brand)])
    }

    #[test]
    fn test_lookup_and_not_found() {
        let store = sample_store();

        assert!(store.get_brand("polestar").is_ok());
        assert!(store.get_engine("polestar", "b308").is_ok());

        let err = store.get_engine("polestar", "doesnotexist").unwrap_err();
        assert_eq!(
            err,
            NotFoundError::UnknownEngine {
                brand: "polestar".to_string(),
                engine: "doesnotexist".to_string()
            }
        );

        let err = store.get_brand("doesnotexist").unwrap_err();
        assert!(err.is_unknown_brand());

        // lookups are case-sensitive
        assert!(store.get_brand("Polestar").is_err());
        assert!(store.get_engine("doesnotexist", "b308").unwrap_err().is_unknown_brand());
    }

    #[test]
    fn test_alternatives_for_failed_lookup() {
        let mut store = sample_store();
        store.insert_brand("alfa-romeo", sample_brand());

        let err = store.get_engine("volvo", "b4204t").unwrap_err();
        assert_eq!(err.brand(), "volvo");
        assert_eq!(store.alternatives(&err), vec!["alfa-romeo", "polestar"]);

        let err = store.get_engine("polestar", "b4204t").unwrap_err();
        assert_eq!(err.brand(), "polestar");
        assert_eq!(store.alternatives(&err), vec!["b308", "b308t", "h520"]);
    }

    #[test]
    fn test_listing_is_sorted() {
        let mut store = sample_store();
        store.insert_brand("alfa-romeo", sample_brand());

        assert_eq!(store.list_brands(), vec!["alfa-romeo", "polestar"]);
        assert_eq!(store.list_engines("polestar").unwrap(), vec!["b308", "b308t", "h520"]);
        assert!(store.list_engines("volvo").is_err());
        assert_eq!(store.len(), 2);
        assert_eq!(store.engine_count(), 4);
    }

    #[test]
    fn test_validate_all_is_ordered() {
        let mut store = sample_store();
        let mut broken = sample_brand();
        if let Some(engine) = broken.engines.get_mut("b308") {
            engine.metadata.description.clear();
        }
        store.insert_brand("alfa-romeo", broken.clone());
        store.insert_brand("zastava", broken);

        let report = store.validate_all(&ValidationOptions::default());
        assert_eq!(report.brands_checked, 3);
        assert_eq!(report.engines_checked, 5);
        assert_eq!(report.error_count, 2);

        let paths: Vec<&str> = report.errors().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["alfa-romeo.b308.metadata.description", "zastava.b308.metadata.description"]
        );
    }

    #[test]
    fn test_search_engines() {
        let store = sample_store();

        let hits = store.search_engines("B308", 10);
        let keys: Vec<&str> = hits.iter().map(|h| h.engine).collect();
        // key prefix matches first, then title matches
        assert_eq!(keys, vec!["b308", "b308t", "h520"]);

        assert_eq!(store.search_engines("b308", 1).len(), 1);
        assert!(store.search_engines("   ", 10).is_empty());
        assert!(store.search_engines("diesel", 10).is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = sample_store().stats();
        assert_eq!(stats.brands, 1);
        assert_eq!(stats.engines, 3);
        assert_eq!(stats.faqs, 6);
        assert_eq!(stats.graph_nodes, 15);
        assert_eq!(stats.spec_rows, 6);
    }
}
