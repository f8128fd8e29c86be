//! schema.org `@graph` model.
//!
//! Each node kind keeps the properties the catalog reasons about as typed
//! fields and everything else in a flattened `extra` map, so a graph that is
//! loaded and written back is unchanged. Nodes that do not parse as one of the
//! known kinds are kept as raw JSON ([`GraphNode::Unrecognized`]) and flagged
//! by validation instead of failing the whole engine record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The only `@context` the rendering layer emits.
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaGraph {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@graph", default)]
    pub graph: Vec<GraphNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphNode {
    Typed(SchemaNode),
    Unrecognized(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum SchemaNode {
    WebPage(WebPageNode),
    WebSite(WebSiteNode),
    Article(ArticleNode),
    VehicleEngine(VehicleEngineNode),
    Dataset(DatasetNode),
    #[serde(rename = "FAQPage")]
    FaqPage(FaqPageNode),
    BreadcrumbList(BreadcrumbList),
}

/// `{"@id": "..."}` pointer to another node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    #[serde(rename = "@id")]
    pub id: String,
}

impl IdRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

// ============================================================================
// Node kinds
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPageNode {
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_part_of: Option<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<Breadcrumb>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A WebPage breadcrumb is either written inline or points at a top-level
/// BreadcrumbList node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Breadcrumb {
    Inline(BreadcrumbList),
    Reference(IdRef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSiteNode {
    #[serde(rename = "@id")]
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleNode {
    #[serde(rename = "@id")]
    pub id: String,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_part_of: Option<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_entity_of_page: Option<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<IdRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleEngineNode {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub known_vehicle_compatibility: Vec<VehicleCompatibility>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One vehicle the engine was fitted to. Authors describe these loosely
/// (plain name, or nested manufacturer / model objects), so only the name is
/// typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCompatibility {
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VehicleCompatibility {
    /// All string content of the entry, lowercased and space-joined.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(name) = &self.name {
            parts.push(name);
        }
        for value in self.extra.values() {
            collect_strings(value, &mut parts);
        }
        parts.join(" ").to_lowercase()
    }
}

fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|item| collect_strings(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect_strings(item, out)),
        _ => {}
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetNode {
    #[serde(rename = "@id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPageNode {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub main_entity: Vec<FaqQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqQuestion {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub accepted_answer: FaqAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqAnswer {
    #[serde(rename = "@type")]
    pub kind: String,
    pub text: String,
}

impl FaqQuestion {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            kind: "Question".to_string(),
            name: question.into(),
            accepted_answer: FaqAnswer {
                kind: "Answer".to_string(),
                text: answer.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbList {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub item_list_element: Vec<ListItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(rename = "@type", default = "list_item_type")]
    pub kind: String,
    pub position: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

fn list_item_type() -> String {
    "ListItem".to_string()
}

// ============================================================================
// Accessors
// ============================================================================

impl SchemaNode {
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaNode::WebPage(_) => "WebPage",
            SchemaNode::WebSite(_) => "WebSite",
            SchemaNode::Article(_) => "Article",
            SchemaNode::VehicleEngine(_) => "VehicleEngine",
            SchemaNode::Dataset(_) => "Dataset",
            SchemaNode::FaqPage(_) => "FAQPage",
            SchemaNode::BreadcrumbList(_) => "BreadcrumbList",
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            SchemaNode::WebPage(n) => Some(&n.id),
            SchemaNode::WebSite(n) => Some(&n.id),
            SchemaNode::Article(n) => Some(&n.id),
            SchemaNode::VehicleEngine(n) => Some(&n.id),
            SchemaNode::Dataset(n) => Some(&n.id),
            SchemaNode::FaqPage(n) => n.id.as_deref(),
            SchemaNode::BreadcrumbList(n) => n.id.as_deref(),
        }
    }
}

impl GraphNode {
    pub fn typed(&self) -> Option<&SchemaNode> {
        match self {
            GraphNode::Typed(node) => Some(node),
            GraphNode::Unrecognized(_) => None,
        }
    }

    /// `@type` as written. Unrecognised nodes report whatever string they carry.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            GraphNode::Typed(node) => Some(node.type_name()),
            GraphNode::Unrecognized(value) => value.get("@type").and_then(Value::as_str),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            GraphNode::Typed(node) => node.id(),
            GraphNode::Unrecognized(value) => value.get("@id").and_then(Value::as_str),
        }
    }
}

impl SchemaGraph {
    pub fn new(graph: Vec<GraphNode>) -> Self {
        Self {
            context: SCHEMA_ORG_CONTEXT.to_string(),
            graph,
        }
    }

    pub fn typed_nodes(&self) -> impl Iterator<Item = &SchemaNode> {
        self.graph.iter().filter_map(GraphNode::typed)
    }

    /// First WebPage node; pages carry exactly one.
    pub fn web_page(&self) -> Option<&WebPageNode> {
        self.typed_nodes().find_map(|node| match node {
            SchemaNode::WebPage(page) => Some(page),
            _ => None,
        })
    }

    pub fn faq_page(&self) -> Option<&FaqPageNode> {
        self.typed_nodes().find_map(|node| match node {
            SchemaNode::FaqPage(faq) => Some(faq),
            _ => None,
        })
    }

    pub fn vehicle_engine(&self) -> Option<&VehicleEngineNode> {
        self.typed_nodes().find_map(|node| match node {
            SchemaNode::VehicleEngine(engine) => Some(engine),
            _ => None,
        })
    }

    /// Position of the first FAQPage in `@graph`.
    pub fn faq_page_index(&self) -> Option<usize> {
        self.graph
            .iter()
            .position(|node| matches!(node, GraphNode::Typed(SchemaNode::FaqPage(_))))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.graph.iter().find(|node| node.id() == Some(id))
    }

    /// Breadcrumb lists written inline in a WebPage, with the page's index.
    pub fn inline_breadcrumbs(&self) -> impl Iterator<Item = (usize, &BreadcrumbList)> {
        self.graph.iter().enumerate().filter_map(|(i, node)| match node {
            GraphNode::Typed(SchemaNode::WebPage(WebPageNode {
                breadcrumb: Some(Breadcrumb::Inline(list)),
                ..
            })) => Some((i, list)),
            _ => None,
        })
    }

    /// Resolve an `@id` against top-level nodes first, then inline breadcrumb lists.
    pub fn resolve_id(&self, id: &str) -> Option<IdTarget<'_>> {
        if let Some(node) = self.find_by_id(id) {
            return Some(IdTarget::Node(node));
        }
        self.inline_breadcrumbs()
            .find(|(_, list)| list.id.as_deref() == Some(id))
            .map(|(_, list)| IdTarget::InlineBreadcrumb(list))
    }
}

/// What an `@id` reference points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdTarget<'a> {
    Node(&'a GraphNode),
    InlineBreadcrumb(&'a BreadcrumbList),
}

impl IdTarget<'_> {
    pub fn type_name(&self) -> Option<&str> {
        match self {
            IdTarget::Node(node) => node.type_name(),
            IdTarget::InlineBreadcrumb(_) => Some("BreadcrumbList"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_graph() -> Value {
        json!({
            "@context": "https://schema.org",
            "@graph": [
                {
                    "@type": "WebSite",
                    "@id": "https://example.com/#website",
                    "url": "https://example.com/",
                    "name": "Engine Reference"
                },
                {
                    "@type": "WebPage",
                    "@id": "https://example.com/polestar/b308#webpage",
                    "url": "https://example.com/polestar/b308",
                    "name": "B308",
                    "isPartOf": { "@id": "https://example.com/#website" },
                    "inLanguage": "en-US",
                    "breadcrumb": {
                        "@type": "BreadcrumbList",
                        "itemListElement": [
                            { "@type": "ListItem", "position": 1, "name": "Home", "item": "https://example.com/" },
                            { "@type": "ListItem", "position": 2, "name": "B308", "item": "https://example.com/polestar/b308" }
                        ]
                    }
                },
                {
                    "@type": "Recipe",
                    "@id": "https://example.com/#recipe",
                    "name": "Not an engine"
                }
            ]
        })
    }

    #[test]
    fn test_graph_parses_known_and_unknown_nodes() {
        let graph: SchemaGraph = serde_json::from_value(sample_graph()).unwrap();

        assert_eq!(graph.graph.len(), 3);
        assert_eq!(graph.graph[0].type_name(), Some("WebSite"));
        assert!(matches!(graph.graph[2], GraphNode::Unrecognized(_)));
        assert_eq!(graph.graph[2].type_name(), Some("Recipe"));

        let page = graph.web_page().unwrap();
        assert_eq!(page.url, "https://example.com/polestar/b308");
        match &page.breadcrumb {
            Some(Breadcrumb::Inline(list)) => assert_eq!(list.item_list_element.len(), 2),
            other => panic!("expected inline breadcrumb, got {:?}", other),
        }
    }

    #[test]
    fn test_graph_round_trips_unknown_properties() {
        let original = sample_graph();
        let graph: SchemaGraph = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(serde_json::to_value(&graph).unwrap(), original);
    }

    #[test]
    fn test_breadcrumb_reference() {
        let page: WebPageNode = serde_json::from_value(json!({
            "@id": "https://example.com/p#webpage",
            "url": "https://example.com/p",
            "name": "P",
            "breadcrumb": { "@id": "https://example.com/p#breadcrumb" }
        }))
        .unwrap();
        assert_eq!(
            page.breadcrumb,
            Some(Breadcrumb::Reference(IdRef::new("https://example.com/p#breadcrumb")))
        );
    }

    #[test]
    fn test_find_by_id() {
        let graph: SchemaGraph = serde_json::from_value(sample_graph()).unwrap();
        let site = graph.find_by_id("https://example.com/#website").unwrap();
        assert_eq!(site.type_name(), Some("WebSite"));
        assert!(graph.find_by_id("https://example.com/#missing").is_none());
    }

    #[test]
    fn test_resolve_id_reaches_inline_breadcrumb() {
        let mut value = sample_graph();
        value["@graph"][1]["breadcrumb"]["@id"] = json!("https://example.com/polestar/b308#breadcrumb");
        let graph: SchemaGraph = serde_json::from_value(value).unwrap();

        assert!(graph.find_by_id("https://example.com/polestar/b308#breadcrumb").is_none());
        let target = graph.resolve_id("https://example.com/polestar/b308#breadcrumb").unwrap();
        assert!(matches!(target, IdTarget::InlineBreadcrumb(_)));
        assert_eq!(target.type_name(), Some("BreadcrumbList"));

        let site = graph.resolve_id("https://example.com/#website").unwrap();
        assert_eq!(site.type_name(), Some("WebSite"));
        assert_eq!(graph.inline_breadcrumbs().map(|(i, _)| i).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_vehicle_compatibility_text() {
        let entry: VehicleCompatibility = serde_json::from_value(json!({
            "@type": "Vehicle",
            "name": "S60 T5",
            "manufacturer": { "@type": "Organization", "name": "Volvo" }
        }))
        .unwrap();
        let text = entry.searchable_text();
        assert!(text.contains("s60 t5"));
        assert!(text.contains("volvo"));
    }
}
