//! Extra notes attached to the compatible-models section.
//!
//! Authored notes are open maps: a `key` plus arbitrary text or text-list
//! fields. Most of them fall into a few recurring kinds, so they are parsed
//! into typed variants when the key and fields fit, and kept as
//! [`GenericNote`] otherwise. Either way the JSON written back is the same
//! open shape that was read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single field value inside an authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteValue {
    Text(String),
    List(Vec<String>),
}

impl NoteValue {
    pub fn is_blank(&self) -> bool {
        match self {
            NoteValue::Text(text) => text.trim().is_empty(),
            NoteValue::List(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

/// Wire shape shared by every note kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExtraNote {
    pub key: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, NoteValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawExtraNote", into = "RawExtraNote")]
pub enum ExtraNote {
    HybridSystem(HybridSystemNote),
    SoftwareDependency(SoftwareDependencyNote),
    Identification(IdentificationNote),
    Generic(GenericNote),
}

/// Hybrid drivetrain components paired with the engine (motor, battery, ISG).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridSystemNote {
    pub key: String,
    pub title: String,
    pub description: String,
    pub components: Vec<String>,
}

/// ECU / TCM software levels the engine depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareDependencyNote {
    pub key: String,
    pub title: String,
    pub description: String,
    pub software_versions: Vec<String>,
}

/// Where to find the engine code on the vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentificationNote {
    pub key: String,
    pub title: String,
    pub description: String,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericNote {
    pub key: String,
    pub fields: BTreeMap<String, NoteValue>,
}

impl ExtraNote {
    pub fn key(&self) -> &str {
        match self {
            ExtraNote::HybridSystem(note) => &note.key,
            ExtraNote::SoftwareDependency(note) => &note.key,
            ExtraNote::Identification(note) => &note.key,
            ExtraNote::Generic(note) => &note.key,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            ExtraNote::HybridSystem(_) => "hybrid system",
            ExtraNote::SoftwareDependency(_) => "software dependency",
            ExtraNote::Identification(_) => "identification",
            ExtraNote::Generic(_) => "generic",
        }
    }

    /// Field name → value, in the authored wire shape (without `key`).
    pub fn fields(&self) -> BTreeMap<String, NoteValue> {
        RawExtraNote::from(self.clone()).fields
    }
}

// ============================================================================
// Wire conversion
// ============================================================================

/// `(title, description, list)` when the note has exactly those three fields.
fn typed_shape(
    fields: &BTreeMap<String, NoteValue>,
    list_field: &str,
) -> Option<(String, String, Vec<String>)> {
    if fields.len() != 3 {
        return None;
    }
    match (fields.get("title"), fields.get("description"), fields.get(list_field)) {
        (Some(NoteValue::Text(title)), Some(NoteValue::Text(description)), Some(NoteValue::List(list))) => {
            Some((title.clone(), description.clone(), list.clone()))
        }
        _ => None,
    }
}

impl From<RawExtraNote> for ExtraNote {
    fn from(raw: RawExtraNote) -> Self {
        let prefix = raw.key.to_ascii_lowercase();

        if prefix.starts_with("hybrid") {
            if let Some((title, description, components)) = typed_shape(&raw.fields, "components") {
                return ExtraNote::HybridSystem(HybridSystemNote {
                    key: raw.key,
                    title,
                    description,
                    components,
                });
            }
        } else if prefix.starts_with("software") {
            if let Some((title, description, software_versions)) =
                typed_shape(&raw.fields, "softwareVersions")
            {
                return ExtraNote::SoftwareDependency(SoftwareDependencyNote {
                    key: raw.key,
                    title,
                    description,
                    software_versions,
                });
            }
        } else if prefix.starts_with("identification") {
            if let Some((title, description, locations)) = typed_shape(&raw.fields, "locations") {
                return ExtraNote::Identification(IdentificationNote {
                    key: raw.key,
                    title,
                    description,
                    locations,
                });
            }
        }

        ExtraNote::Generic(GenericNote {
            key: raw.key,
            fields: raw.fields,
        })
    }
}

fn typed_fields(
    title: String,
    description: String,
    list_field: &str,
    list: Vec<String>,
) -> BTreeMap<String, NoteValue> {
    let mut fields = BTreeMap::new();
    fields.insert("title".to_string(), NoteValue::Text(title));
    fields.insert("description".to_string(), NoteValue::Text(description));
    fields.insert(list_field.to_string(), NoteValue::List(list));
    fields
}

impl From<ExtraNote> for RawExtraNote {
    fn from(note: ExtraNote) -> Self {
        match note {
            ExtraNote::HybridSystem(n) => RawExtraNote {
                key: n.key,
                fields: typed_fields(n.title, n.description, "components", n.components),
            },
            ExtraNote::SoftwareDependency(n) => RawExtraNote {
                key: n.key,
                fields: typed_fields(n.title, n.description, "softwareVersions", n.software_versions),
            },
            ExtraNote::Identification(n) => RawExtraNote {
                key: n.key,
                fields: typed_fields(n.title, n.description, "locations", n.locations),
            },
            ExtraNote::Generic(n) => RawExtraNote {
                key: n.key,
                fields: n.fields,
            },
        }
    }
}
