//! Error types for catalog lookups and content loading.
//!
//! Validation problems are not errors: they are collected as
//! [`ValidationIssue`](crate::validation::ValidationIssue) values instead.

use std::path::PathBuf;

use thiserror::Error;

/// Requested brand or engine is not in the store.
///
/// The two variants let the rendering layer word its 404 differently for
/// "no such brand" and "no such engine for this brand".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("unknown brand '{brand}'")]
    UnknownBrand { brand: String },

    #[error("unknown engine '{engine}' for brand '{brand}'")]
    UnknownEngine { brand: String, engine: String },
}

impl NotFoundError {
    pub fn brand(&self) -> &str {
        match self {
            NotFoundError::UnknownBrand { brand } => brand,
            NotFoundError::UnknownEngine { brand, .. } => brand,
        }
    }

    pub fn is_unknown_brand(&self) -> bool {
        matches!(self, NotFoundError::UnknownBrand { .. })
    }
}

/// Raw content that could not be turned into a typed record.
///
/// Each failure is scoped to one file, brand shell or engine; the loader
/// skips the affected record and keeps going.
#[derive(Debug, Error)]
pub enum MalformedContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: invalid JSON: {source}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: brand '{brand}' does not match the brand schema: {source}", path.display())]
    Brand {
        path: PathBuf,
        brand: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: engine '{brand}.{engine}' does not match the engine schema: {source}", path.display())]
    Engine {
        path: PathBuf,
        brand: String,
        engine: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: invalid {kind} key '{key}'", path.display())]
    InvalidKey {
        path: PathBuf,
        kind: KeyKind,
        key: String,
    },

    #[error("{}: brand '{brand}' is defined more than once", path.display())]
    DuplicateBrand { path: PathBuf, brand: String },

    #[error("{}: engine '{brand}.{engine}' is defined more than once", path.display())]
    DuplicateEngine {
        path: PathBuf,
        brand: String,
        engine: String,
    },
}

impl MalformedContentError {
    /// File the failure was detected in.
    pub fn path(&self) -> &PathBuf {
        match self {
            MalformedContentError::Io { path, .. }
            | MalformedContentError::Syntax { path, .. }
            | MalformedContentError::Brand { path, .. }
            | MalformedContentError::Engine { path, .. }
            | MalformedContentError::InvalidKey { path, .. }
            | MalformedContentError::DuplicateBrand { path, .. }
            | MalformedContentError::DuplicateEngine { path, .. } => path,
        }
    }
}

/// Which identifier a malformed key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Brand,
    Engine,
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyKind::Brand => f.write_str("brand"),
            KeyKind::Engine => f.write_str("engine"),
        }
    }
}
