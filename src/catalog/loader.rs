//! Content Loader
//!
//! Reads the content directory into a [`ContentStore`]. Two layouts are
//! accepted side by side:
//!
//! ```text
//! content/
//! ├── polestar.json            whole brand, engines inline
//! └── volvo/
//!     ├── brand.json           hero image + research links (+ optional inline engines)
//!     └── engines/
//!         ├── b4204t.json      one engine per file
//!         └── d4204t.json
//! ```
//!
//! Failures are isolated: a malformed engine is dropped and reported, the rest
//! of its brand still loads. Only an unreadable content root is fatal.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::catalog::store::ContentStore;
use crate::catalog::types::{
    is_valid_brand_key, is_valid_engine_key, BrandRecord, EngineRecord, ImageRef, ResearchResources,
};
use crate::config::CatalogConfig;
use crate::error::{KeyKind, MalformedContentError};

const BRAND_FILE: &str = "brand.json";
const ENGINES_DIR: &str = "engines";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Rebuild each engine's FAQPage node from its `faqs` while loading.
    pub sync_faq_pages: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { sync_faq_pages: true }
    }
}

impl From<&CatalogConfig> for LoadOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            sync_faq_pages: config.sync_faq_pages,
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub store: ContentStore,
    pub failures: Vec<MalformedContentError>,
}

impl LoadOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A brand whose record parsed, plus the engines that were dropped from it.
pub type BrandLoad = Result<(BrandRecord, Vec<MalformedContentError>), MalformedContentError>;

/// Brand JSON with engines left raw so each can fail on its own.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrandShell {
    hero_image: ImageRef,
    research_resources: ResearchResources,
    #[serde(default, deserialize_with = "engine_entries")]
    engines: Vec<(String, Value)>,
}

/// Inline engines in document order, repeated keys included.
fn engine_entries<'de, D>(deserializer: D) -> Result<Vec<(String, Value)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, Value)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object of engines keyed by engine key")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, Value>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

#[derive(Debug)]
enum BrandSource {
    File { key: String, path: PathBuf },
    Directory { key: String, path: PathBuf },
}

impl BrandSource {
    fn key(&self) -> &str {
        match self {
            BrandSource::File { key, .. } | BrandSource::Directory { key, .. } => key,
        }
    }

    fn path(&self) -> &Path {
        match self {
            BrandSource::File { path, .. } | BrandSource::Directory { path, .. } => path,
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Load every brand under `root`.
pub fn load_dir(root: &Path, options: &LoadOptions) -> anyhow::Result<LoadOutcome> {
    let mut sources = discover_brands(root)
        .with_context(|| format!("Failed to read content directory {}", root.display()))?;
    sources.sort_by(|a, b| a.key().cmp(b.key()).then_with(|| a.path().cmp(b.path())));

    info!("Loading {} brand source(s) from {}", sources.len(), root.display());

    let loaded: Vec<(&BrandSource, BrandLoad)> = sources
        .par_iter()
        .map(|source| (source, load_source(source, options)))
        .collect();

    let mut outcome = LoadOutcome::default();
    for (source, result) in loaded {
        let key = source.key();

        if !is_valid_brand_key(key) {
            outcome.failures.push(MalformedContentError::InvalidKey {
                path: source.path().to_path_buf(),
                kind: KeyKind::Brand,
                key: key.to_string(),
            });
            continue;
        }
        if outcome.store.contains_brand(key) {
            outcome.failures.push(MalformedContentError::DuplicateBrand {
                path: source.path().to_path_buf(),
                brand: key.to_string(),
            });
            continue;
        }

        match result {
            Ok((brand, dropped)) => {
                debug!("Loaded brand '{}' ({} engines)", key, brand.engines.len());
                outcome.failures.extend(dropped);
                outcome.store.insert_brand(key, brand);
            }
            Err(err) => outcome.failures.push(err),
        }
    }

    for failure in &outcome.failures {
        warn!("Skipped malformed content: {}", failure);
    }

    let stats = outcome.store.stats();
    info!(
        "Loaded {} brands, {} engines, {} FAQs ({} failures)",
        stats.brands,
        stats.engines,
        stats.faqs,
        outcome.failures.len()
    );

    Ok(outcome)
}

/// Parse one brand from an in-memory JSON document.
///
/// Engines that fail to parse are returned alongside the record instead of
/// failing the brand.
pub fn load_brand_str(brand_key: &str, json: &str, options: &LoadOptions) -> BrandLoad {
    let path = PathBuf::from(format!("<{}>", brand_key));
    if !is_valid_brand_key(brand_key) {
        return Err(MalformedContentError::InvalidKey {
            path,
            kind: KeyKind::Brand,
            key: brand_key.to_string(),
        });
    }
    parse_brand(brand_key, &path, json, options)
}

// ============================================================================
// Discovery and parsing
// ============================================================================

fn discover_brands(root: &Path) -> std::io::Result<Vec<BrandSource>> {
    let mut sources = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if entry.file_type()?.is_dir() {
            sources.push(BrandSource::Directory {
                key: name.to_string(),
                path,
            });
        } else if let Some(key) = name.strip_suffix(".json") {
            sources.push(BrandSource::File {
                key: key.to_string(),
                path,
            });
        } else {
            debug!("Ignoring {}", path.display());
        }
    }

    Ok(sources)
}

fn load_source(source: &BrandSource, options: &LoadOptions) -> BrandLoad {
    match source {
        BrandSource::File { key, path } => {
            debug!("Reading {}", path.display());
            let text = read_file(path)?;
            parse_brand(key, path, &text, options)
        }
        BrandSource::Directory { key, path } => load_brand_dir(key, path, options),
    }
}

fn load_brand_dir(brand_key: &str, dir: &Path, options: &LoadOptions) -> BrandLoad {
    let brand_path = dir.join(BRAND_FILE);
    debug!("Reading {}", brand_path.display());
    let text = read_file(&brand_path)?;
    let (mut brand, mut failures) = parse_brand(brand_key, &brand_path, &text, options)?;

    let engines_dir = dir.join(ENGINES_DIR);
    if !engines_dir.is_dir() {
        return Ok((brand, failures));
    }

    let mut files = match engine_files(&engines_dir) {
        Ok(files) => files,
        Err(source) => {
            failures.push(MalformedContentError::Io {
                path: engines_dir,
                source,
            });
            return Ok((brand, failures));
        }
    };
    files.sort();

    let parsed: Vec<(String, PathBuf, Result<EngineRecord, MalformedContentError>)> = files
        .into_par_iter()
        .map(|(engine_key, path)| {
            let result = load_engine_file(brand_key, &engine_key, &path, options);
            (engine_key, path, result)
        })
        .collect();

    for (engine_key, path, result) in parsed {
        match result {
            Ok(_) if brand.engines.contains_key(&engine_key) => {
                failures.push(MalformedContentError::DuplicateEngine {
                    path,
                    brand: brand_key.to_string(),
                    engine: engine_key,
                });
            }
            Ok(engine) => {
                brand.engines.insert(engine_key, engine);
            }
            Err(err) => failures.push(err),
        }
    }

    Ok((brand, failures))
}

fn engine_files(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let key = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.starts_with('.'))
            .and_then(|n| n.strip_suffix(".json"))
            .map(str::to_string);
        match key {
            Some(key) => files.push((key, path)),
            None => debug!("Ignoring {}", path.display()),
        }
    }
    Ok(files)
}

fn load_engine_file(
    brand_key: &str,
    engine_key: &str,
    path: &Path,
    options: &LoadOptions,
) -> Result<EngineRecord, MalformedContentError> {
    if !is_valid_engine_key(engine_key) {
        return Err(MalformedContentError::InvalidKey {
            path: path.to_path_buf(),
            kind: KeyKind::Engine,
            key: engine_key.to_string(),
        });
    }

    debug!("Reading {}", path.display());
    let text = read_file(path)?;
    let mut engine: EngineRecord = serde_json::from_str(&text).map_err(|source| {
        if source.is_data() {
            MalformedContentError::Engine {
                path: path.to_path_buf(),
                brand: brand_key.to_string(),
                engine: engine_key.to_string(),
                source,
            }
        } else {
            MalformedContentError::Syntax {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    finish_engine(brand_key, engine_key, &mut engine, options);
    Ok(engine)
}

fn parse_brand(brand_key: &str, path: &Path, text: &str, options: &LoadOptions) -> BrandLoad {
    let shell: BrandShell = serde_json::from_str(text).map_err(|source| {
        if source.is_data() {
            MalformedContentError::Brand {
                path: path.to_path_buf(),
                brand: brand_key.to_string(),
                source,
            }
        } else {
            MalformedContentError::Syntax {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mut failures = Vec::new();
    let mut seen = HashSet::new();
    let mut raw_engines = Vec::with_capacity(shell.engines.len());
    for (engine_key, value) in shell.engines {
        if seen.contains(&engine_key) {
            failures.push(MalformedContentError::DuplicateEngine {
                path: path.to_path_buf(),
                brand: brand_key.to_string(),
                engine: engine_key,
            });
        } else {
            seen.insert(engine_key.clone());
            raw_engines.push((engine_key, value));
        }
    }

    let parsed: Vec<(String, Result<EngineRecord, MalformedContentError>)> = raw_engines
        .into_par_iter()
        .map(|(engine_key, value)| {
            let result = parse_inline_engine(brand_key, &engine_key, path, value, options);
            (engine_key, result)
        })
        .collect();

    let mut brand = BrandRecord {
        hero_image: shell.hero_image,
        research_resources: shell.research_resources,
        engines: Default::default(),
    };
    for (engine_key, result) in parsed {
        match result {
            Ok(engine) => {
                brand.engines.insert(engine_key, engine);
            }
            Err(err) => failures.push(err),
        }
    }

    Ok((brand, failures))
}

fn parse_inline_engine(
    brand_key: &str,
    engine_key: &str,
    path: &Path,
    value: Value,
    options: &LoadOptions,
) -> Result<EngineRecord, MalformedContentError> {
    if !is_valid_engine_key(engine_key) {
        return Err(MalformedContentError::InvalidKey {
            path: path.to_path_buf(),
            kind: KeyKind::Engine,
            key: engine_key.to_string(),
        });
    }

    let mut engine: EngineRecord =
        serde_json::from_value(value).map_err(|source| MalformedContentError::Engine {
            path: path.to_path_buf(),
            brand: brand_key.to_string(),
            engine: engine_key.to_string(),
            source,
        })?;

    finish_engine(brand_key, engine_key, &mut engine, options);
    Ok(engine)
}

fn finish_engine(brand_key: &str, engine_key: &str, engine: &mut EngineRecord, options: &LoadOptions) {
    if options.sync_faq_pages && engine.sync_faq_page() {
        debug!("Re-derived FAQPage for {}.{}", brand_key, engine_key);
    }
}

fn read_file(path: &Path) -> Result<String, MalformedContentError> {
    fs::read_to_string(path).map_err(|source| MalformedContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}
