//! Content model for brand and engine pages.
//!
//! Field names mirror the authored JSON (camelCase). Compatible-model rows keep
//! their display-style keys (`Make`, `OEM Source`, ...) because the rendering
//! layer prints them as table headers.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::extra_notes::ExtraNote;
use crate::schema_org::graph::SchemaGraph;

// ============================================================================
// Brand
// ============================================================================

/// One brand's content: hero image, research links and its engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandRecord {
    pub hero_image: ImageRef,
    pub research_resources: ResearchResources,
    #[serde(default)]
    pub engines: FxHashMap<String, EngineRecord>,
}

impl BrandRecord {
    /// Engine keys in lexicographic order.
    pub fn engine_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Engines in key order.
    pub fn sorted_engines(&self) -> Vec<(&str, &EngineRecord)> {
        let mut engines: Vec<(&str, &EngineRecord)> = self
            .engines
            .iter()
            .map(|(key, engine)| (key.as_str(), engine))
            .collect();
        engines.sort_unstable_by(|a, b| a.0.cmp(b.0));
        engines
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

/// External references shown in the brand's research sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResources {
    pub service_manual: String,
    pub service_bulletin_index: String,
}

// ============================================================================
// Engine
// ============================================================================

/// Full content bundle for one engine page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineRecord {
    pub metadata: PageMetadata,
    pub hero: EngineHero,
    pub technical_specifications: TechnicalSpecifications,
    pub compatible_models: CompatibleModels,
    pub banner_image: String,
    pub common_reliability_issues: ReliabilityIssues,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    pub schema: SchemaGraph,
}

/// SEO title/description pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineHero {
    /// Production range, e.g. "2015–2021".
    pub years: String,
    pub paragraphs: Vec<String>,
    pub disclaimer: Disclaimer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclaimer {
    pub title: String,
    pub text: String,
}

// ============================================================================
// Technical specifications
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSpecifications {
    pub description: String,
    pub engine_specs: Vec<EngineSpecRow>,
    pub practical_implications: PracticalImplications,
}

/// One row of the spec table. An empty `source` means unsourced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSpecRow {
    pub parameter: String,
    pub value: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticalImplications {
    #[serde(default)]
    pub verification_notes: BTreeMap<String, String>,
    #[serde(default)]
    pub citations: Vec<String>,
}

// ============================================================================
// Compatible models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibleModels {
    /// May carry simple inline markup (`<strong>`, `<em>`, ...).
    pub description: String,
    pub compatible_models: Vec<CompatibleModelRow>,
    #[serde(default)]
    pub guidance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_notes: Option<Vec<ExtraNote>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibleModelRow {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Models")]
    pub models: String,
    #[serde(rename = "Years")]
    pub years: String,
    #[serde(rename = "Variants")]
    pub variants: String,
    #[serde(rename = "OEM Source")]
    pub oem_source: String,
}

// ============================================================================
// Reliability issues and FAQs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliabilityIssues {
    pub subheading: String,
    pub issues: Vec<ReliabilityIssue>,
    pub info_block: InfoBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityIssue {
    pub title: String,
    pub symptoms: String,
    pub cause: String,
    pub fix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoBlock {
    pub title: String,
    pub description: String,
    /// CSS gradient utility classes, presentation only.
    #[serde(default)]
    pub gradient: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

// ============================================================================
// Keys
// ============================================================================

/// Engine keys are lowercase alphanumerics (`b308`, `b6304t2`, `ed1`).
pub fn is_valid_engine_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// Brand keys additionally allow inner hyphens (`land-rover`).
pub fn is_valid_brand_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    match bytes.first() {
        Some(first) if first.is_ascii_lowercase() || first.is_ascii_digit() => {}
        _ => return false,
    }
    !key.ends_with('-')
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_key_pattern() {
        for key in ["b308", "b6304t2", "h630t3", "ed1", "hpc"] {
            assert!(is_valid_engine_key(key), "{key} should be valid");
        }
        for key in ["", "B308", "b308-t", "b 308", "éd1"] {
            assert!(!is_valid_engine_key(key), "{key} should be invalid");
        }
    }

    #[test]
    fn test_brand_key_pattern() {
        assert!(is_valid_brand_key("polestar"));
        assert!(is_valid_brand_key("land-rover"));
        assert!(!is_valid_brand_key("-volvo"));
        assert!(!is_valid_brand_key("volvo-"));
        assert!(!is_valid_brand_key("Volvo"));
        assert!(!is_valid_brand_key(""));
    }

    #[test]
    fn test_compatible_row_uses_display_keys() {
        let json = r#"{
            "Make": "Volvo",
            "Models": "S60, V70",
            "Years": "2001-2009",
            "Variants": "T5",
            "OEM Source": "Volvo EPC"
        }"#;
        let row: CompatibleModelRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.make, "Volvo");
        assert_eq!(row.oem_source, "Volvo EPC");

        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["OEM Source"], "Volvo EPC");
    }

    #[test]
    fn test_spec_row_source_defaults_to_empty() {
        let row: EngineSpecRow =
            serde_json::from_str(r#"{"parameter": "Bore", "value": "83 mm"}"#).unwrap();
        assert!(row.source.is_empty());
    }
}
