//! JSON-LD output for the rendering layer.
//!
//! The graph is embedded verbatim in a `<script type="application/ld+json">`
//! element, so the payload escapes the characters that could end the script
//! element or be read as markup.

use crate::schema_org::graph::SchemaGraph;

/// schema.org types the catalog may emit, at any nesting depth.
pub const RECOGNIZED_TYPES: &[&str] = &[
    "WebPage",
    "WebSite",
    "Article",
    "VehicleEngine",
    "Dataset",
    "FAQPage",
    "BreadcrumbList",
    "ListItem",
    "Question",
    "Answer",
    "Vehicle",
    "Car",
    "Brand",
    "Organization",
    "Person",
    "ImageObject",
    "QuantitativeValue",
    "EngineSpecification",
    "DataDownload",
    "CreativeWork",
];

pub fn is_recognized_type(type_name: &str) -> bool {
    RECOGNIZED_TYPES.contains(&type_name)
}

/// Compact JSON for the script element.
pub fn to_payload(graph: &SchemaGraph) -> serde_json::Result<String> {
    let json = serde_json::to_string(graph)?;
    Ok(escape_for_script(&json))
}

/// Complete `<script>` element.
pub fn script_tag(graph: &SchemaGraph) -> serde_json::Result<String> {
    Ok(format!(
        r#"<script type="application/ld+json">{}</script>"#,
        to_payload(graph)?
    ))
}

/// These characters only occur inside JSON strings, where `\uXXXX` escapes are
/// equivalent, so the result is still the same JSON document.
fn escape_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}
