//! Environment configuration.
//!
//! Read once at startup by the binaries:
//!
//! | Variable                 | Default   |
//! |--------------------------|-----------|
//! | `CONTENT_DIR`            | `content` |
//! | `SYNC_FAQ_PAGES`         | `true`    |
//! | `TITLE_SOFT_LIMIT`       | `70`      |
//! | `DESCRIPTION_SOFT_LIMIT` | `160`     |
//! | `FAIL_ON_WARNINGS`       | `false`   |
//!
//! Unset or empty variables take the default; unparseable values are an error.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub content_dir: PathBuf,
    pub sync_faq_pages: bool,
    pub title_soft_limit: usize,
    pub description_soft_limit: usize,
    pub fail_on_warnings: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            sync_faq_pages: true,
            title_soft_limit: 70,
            description_soft_limit: 160,
            fail_on_warnings: false,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; tests pass a map instead of the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            content_dir: get("CONTENT_DIR").map(PathBuf::from).unwrap_or(defaults.content_dir),
            sync_faq_pages: match get("SYNC_FAQ_PAGES") {
                Some(v) => parse_bool("SYNC_FAQ_PAGES", &v)?,
                None => defaults.sync_faq_pages,
            },
            title_soft_limit: match get("TITLE_SOFT_LIMIT") {
                Some(v) => parse_number("TITLE_SOFT_LIMIT", &v)?,
                None => defaults.title_soft_limit,
            },
            description_soft_limit: match get("DESCRIPTION_SOFT_LIMIT") {
                Some(v) => parse_number("DESCRIPTION_SOFT_LIMIT", &v)?,
                None => defaults.description_soft_limit,
            },
            fail_on_warnings: match get("FAIL_ON_WARNINGS") {
                Some(v) => parse_bool("FAIL_ON_WARNINGS", &v)?,
                None => defaults.fail_on_warnings,
            },
        })
    }
}

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{} must be a boolean (true/false), got '{}'", name, value)),
    }
}

fn parse_number<T>(name: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("{} must be a non-negative integer, got '{}'", name, value))
}
