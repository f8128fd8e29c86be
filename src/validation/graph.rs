//! Rules for the schema.org `@graph` attached to each engine page.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::catalog::types::EngineRecord;
use crate::schema_org::json_ld::is_recognized_type;
use crate::schema_org::{
    ArticleNode, Breadcrumb, BreadcrumbList, FaqPageNode, GraphNode, IdRef, SchemaGraph,
    SchemaNode, VehicleEngineNode, WebPageNode, SCHEMA_ORG_CONTEXT,
};
use crate::validation::text::{is_absolute_http_url, is_blank, parse_schema_date};
use crate::validation::{FieldPath, IssueSink};

/// `@type`s with a typed model; a node carrying one of these that still
/// landed in `Unrecognized` has the wrong shape.
const MODELLED_TYPES: &[&str] = &[
    "WebPage",
    "WebSite",
    "Article",
    "VehicleEngine",
    "Dataset",
    "FAQPage",
    "BreadcrumbList",
];

pub(super) fn check_graph(sink: &mut IssueSink, path: &FieldPath, engine: &EngineRecord) {
    let schema = &engine.schema;

    if schema.context != SCHEMA_ORG_CONTEXT {
        sink.error(
            &path.key("context"),
            format!("@context must be '{}', found '{}'", SCHEMA_ORG_CONTEXT, schema.context),
        );
    }

    let graph_path = path.key("graph");
    if schema.graph.is_empty() {
        sink.error(&graph_path, "@graph is empty");
        return;
    }

    check_ids(sink, &graph_path, schema);

    let page_url = schema.web_page().map(|page| page.url.as_str());
    let mut web_pages = 0usize;
    let mut faq_pages = 0usize;
    let mut vehicle_engines = 0usize;

    for (i, node) in schema.graph.iter().enumerate() {
        let node_path = graph_path.index(i);
        let typed = match node {
            GraphNode::Typed(typed) => typed,
            GraphNode::Unrecognized(value) => {
                check_unrecognized(sink, &node_path, value);
                if let Value::Object(map) = value {
                    for (key, child) in map.iter().filter(|(key, _)| key.as_str() != "@type") {
                        check_nested_types(sink, &node_path.key(key), child);
                    }
                }
                continue;
            }
        };

        check_node_types(sink, &node_path, typed);

        match typed {
            SchemaNode::WebPage(page) => {
                web_pages += 1;
                if web_pages > 1 {
                    sink.warning(&node_path, "more than one WebPage node; only the first is used");
                }
                check_web_page(sink, &node_path, schema, page);
            }
            SchemaNode::WebSite(site) => {
                require_url(sink, &node_path.key("url"), &site.url);
                sink.require_text(&node_path.key("name"), &site.name);
            }
            SchemaNode::Article(article) => check_article(sink, &node_path, schema, article),
            SchemaNode::VehicleEngine(vehicle) => {
                vehicle_engines += 1;
                check_vehicle_engine(sink, &node_path, engine, vehicle);
            }
            SchemaNode::Dataset(dataset) => {
                sink.require_text(&node_path.key("name"), &dataset.name);
            }
            SchemaNode::FaqPage(faq) => {
                faq_pages += 1;
                if faq_pages > 1 {
                    sink.warning(&node_path, "more than one FAQPage node");
                }
                check_faq_page(sink, &node_path, engine, faq);
            }
            SchemaNode::BreadcrumbList(list) => check_breadcrumb(sink, &node_path, list, page_url),
        }
    }

    if web_pages == 0 {
        sink.error(&graph_path, "no WebPage node");
    }
    if vehicle_engines == 0 {
        sink.warning(&graph_path, "no VehicleEngine node");
    }
    if faq_pages == 0 && !engine.faqs.is_empty() {
        sink.warning(&graph_path, "faqs present but no FAQPage node");
    }
}

/// `@id`s are unique across top-level nodes and inline breadcrumb lists.
fn check_ids(sink: &mut IssueSink, graph_path: &FieldPath, schema: &SchemaGraph) {
    let mut seen = HashSet::new();
    for (i, node) in schema.graph.iter().enumerate() {
        let Some(id) = node.id() else { continue };
        register_id(sink, &mut seen, &graph_path.index(i).key("@id"), id);
    }
    for (i, list) in schema.inline_breadcrumbs() {
        let Some(id) = list.id.as_deref() else { continue };
        register_id(sink, &mut seen, &graph_path.index(i).key("breadcrumb").key("@id"), id);
    }
}

fn register_id<'a>(sink: &mut IssueSink, seen: &mut HashSet<&'a str>, path: &FieldPath, id: &'a str) {
    if !seen.insert(id) {
        sink.error(path, format!("duplicate @id '{}'", id));
    }
    if !is_absolute_http_url(id) {
        sink.warning(path, format!("@id '{}' is not an absolute URL", id));
    }
}

fn check_unrecognized(sink: &mut IssueSink, path: &FieldPath, value: &Value) {
    match value.get("@type").and_then(Value::as_str) {
        Some(kind) if MODELLED_TYPES.contains(&kind) => {
            sink.error(path, format!("{} node is missing required properties or has the wrong shape", kind))
        }
        Some(kind) if is_recognized_type(kind) => {
            sink.warning(path, format!("{} node is not checked", kind))
        }
        Some(kind) => sink.error(path, format!("unrecognised @type '{}'", kind)),
        None => sink.error(path, "node has no @type"),
    }
}

/// Nested objects inside a typed node: its `extra` properties and vehicle
/// entries. Top-level `@type`s are settled by deserialization.
fn check_node_types(sink: &mut IssueSink, path: &FieldPath, node: &SchemaNode) {
    match node {
        SchemaNode::WebPage(page) => {
            check_extra_types(sink, path, &page.extra);
            if let Some(Breadcrumb::Inline(list)) = &page.breadcrumb {
                check_extra_types(sink, &path.key("breadcrumb"), &list.extra);
            }
        }
        SchemaNode::WebSite(site) => check_extra_types(sink, path, &site.extra),
        SchemaNode::Article(article) => check_extra_types(sink, path, &article.extra),
        SchemaNode::VehicleEngine(vehicle) => {
            check_extra_types(sink, path, &vehicle.extra);
            let compat_path = path.key("knownVehicleCompatibility");
            for (j, entry) in vehicle.known_vehicle_compatibility.iter().enumerate() {
                let entry_path = compat_path.index(j);
                if let Some(kind) = &entry.kind {
                    check_type_name(sink, &entry_path.key("@type"), kind);
                }
                check_extra_types(sink, &entry_path, &entry.extra);
            }
        }
        SchemaNode::Dataset(dataset) => check_extra_types(sink, path, &dataset.extra),
        SchemaNode::FaqPage(faq) => check_extra_types(sink, path, &faq.extra),
        SchemaNode::BreadcrumbList(list) => check_extra_types(sink, path, &list.extra),
    }
}

fn check_extra_types(sink: &mut IssueSink, path: &FieldPath, extra: &Map<String, Value>) {
    for (key, value) in extra {
        check_nested_types(sink, &path.key(key), value);
    }
}

/// Every `@type` found below `value`, at any depth, must be a recognised type.
fn check_nested_types(sink: &mut IssueSink, path: &FieldPath, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = path.key(key);
                if key == "@type" {
                    check_type_value(sink, &child_path, child);
                } else {
                    check_nested_types(sink, &child_path, child);
                }
            }
        }
        Value::Array(items) => {
            for (j, item) in items.iter().enumerate() {
                check_nested_types(sink, &path.index(j), item);
            }
        }
        _ => {}
    }
}

/// `@type` may be a single name or a list of names.
fn check_type_value(sink: &mut IssueSink, path: &FieldPath, kind: &Value) {
    match kind {
        Value::String(name) => check_type_name(sink, path, name),
        Value::Array(names) => {
            for (j, name) in names.iter().enumerate() {
                match name.as_str() {
                    Some(name) => check_type_name(sink, &path.index(j), name),
                    None => sink.error(&path.index(j), "@type must be a string"),
                }
            }
        }
        _ => sink.error(path, "@type must be a string"),
    }
}

fn check_type_name(sink: &mut IssueSink, path: &FieldPath, name: &str) {
    if !is_recognized_type(name) {
        sink.error(path, format!("unrecognised @type '{}'", name));
    }
}

/// Error unless `reference` names a node in `@graph` or an inline breadcrumb
/// list, optionally of `expected` type.
fn check_reference(
    sink: &mut IssueSink,
    path: &FieldPath,
    schema: &SchemaGraph,
    reference: &IdRef,
    expected: Option<&str>,
) {
    match schema.resolve_id(&reference.id) {
        None => sink.error(path, format!("@id '{}' does not resolve to a node in @graph", reference.id)),
        Some(target) => {
            if let Some(expected) = expected {
                let found = target.type_name().unwrap_or("untyped node");
                if found != expected {
                    sink.error(
                        path,
                        format!("'{}' is a {}, expected {}", reference.id, found, expected),
                    );
                }
            }
        }
    }
}

fn require_url(sink: &mut IssueSink, path: &FieldPath, url: &str) {
    if !is_absolute_http_url(url) {
        sink.error(path, format!("'{}' is not an absolute http(s) URL", url));
    }
}

// ============================================================================
// Node kinds
// ============================================================================

fn check_web_page(sink: &mut IssueSink, path: &FieldPath, schema: &SchemaGraph, page: &WebPageNode) {
    require_url(sink, &path.key("url"), &page.url);
    sink.require_text(&path.key("name"), &page.name);

    match &page.is_part_of {
        Some(site) => check_reference(sink, &path.key("isPartOf"), schema, site, Some("WebSite")),
        None => sink.warning(&path.key("isPartOf"), "WebPage is not linked to a WebSite"),
    }

    let crumb_path = path.key("breadcrumb");
    match &page.breadcrumb {
        Some(Breadcrumb::Inline(list)) => check_breadcrumb(sink, &crumb_path, list, Some(&page.url)),
        // top-level lists are checked where they appear in @graph
        Some(Breadcrumb::Reference(reference)) => {
            check_reference(sink, &crumb_path, schema, reference, Some("BreadcrumbList"))
        }
        None => sink.warning(&crumb_path, "WebPage has no breadcrumb"),
    }
}

fn check_article(sink: &mut IssueSink, path: &FieldPath, schema: &SchemaGraph, article: &ArticleNode) {
    sink.require_text(&path.key("headline"), &article.headline);

    match &article.is_part_of {
        Some(page) => check_reference(sink, &path.key("isPartOf"), schema, page, Some("WebPage")),
        None => sink.warning(&path.key("isPartOf"), "Article is not linked to a WebPage"),
    }
    if let Some(page) = &article.main_entity_of_page {
        check_reference(sink, &path.key("mainEntityOfPage"), schema, page, Some("WebPage"));
    }
    if let Some(about) = &article.about {
        check_reference(sink, &path.key("about"), schema, about, None);
    }

    let published = parse_date_field(sink, &path.key("datePublished"), article.date_published.as_deref());
    let modified = parse_date_field(sink, &path.key("dateModified"), article.date_modified.as_deref());
    if let (Some(published), Some(modified)) = (published, modified) {
        if modified < published {
            sink.warning(&path.key("dateModified"), "dateModified is earlier than datePublished");
        }
    }
}

fn parse_date_field(
    sink: &mut IssueSink,
    path: &FieldPath,
    value: Option<&str>,
) -> Option<chrono::NaiveDateTime> {
    let value = value?;
    let parsed = parse_schema_date(value);
    if parsed.is_none() {
        sink.error(path, format!("'{}' is not an ISO-8601 date", value));
    }
    parsed
}

/// Every make in the compatible-models table should appear among the
/// vehicles, and every vehicle should belong to one of those makes.
fn check_vehicle_engine(
    sink: &mut IssueSink,
    path: &FieldPath,
    engine: &EngineRecord,
    vehicle: &VehicleEngineNode,
) {
    sink.require_text(&path.key("name"), &vehicle.name);

    let mut makes: Vec<String> = engine
        .compatible_models
        .compatible_models
        .iter()
        .map(|row| row.make.trim().to_lowercase())
        .filter(|make| !make.is_empty())
        .collect();
    makes.sort();
    makes.dedup();

    let compat_path = path.key("knownVehicleCompatibility");
    let texts: Vec<String> = vehicle
        .known_vehicle_compatibility
        .iter()
        .map(|entry| entry.searchable_text())
        .collect();

    for make in &makes {
        if !texts.iter().any(|text| text.contains(make.as_str())) {
            sink.warning(
                &compat_path,
                format!("make '{}' from compatibleModels has no vehicle entry", make),
            );
        }
    }

    if makes.is_empty() {
        return;
    }
    for (j, text) in texts.iter().enumerate() {
        if !makes.iter().any(|make| text.contains(make.as_str())) {
            sink.warning(&compat_path.index(j), "vehicle names no make from compatibleModels");
        }
    }
}

/// The FAQPage must mirror `faqs` question for question.
fn check_faq_page(sink: &mut IssueSink, path: &FieldPath, engine: &EngineRecord, faq: &FaqPageNode) {
    let entities = path.key("mainEntity");

    if faq.main_entity.len() != engine.faqs.len() {
        sink.error(
            &entities,
            format!(
                "{} questions but the page has {} faqs",
                faq.main_entity.len(),
                engine.faqs.len()
            ),
        );
    }

    for (j, (question, source)) in faq.main_entity.iter().zip(&engine.faqs).enumerate() {
        let q_path = entities.index(j);
        let answer_path = q_path.key("acceptedAnswer");

        if question.kind != "Question" {
            sink.error(&q_path.key("@type"), format!("expected Question, found '{}'", question.kind));
        }
        if question.name != source.question {
            sink.error(&q_path.key("name"), format!("does not match faqs[{}].question", j));
        }
        if question.accepted_answer.kind != "Answer" {
            sink.error(
                &answer_path.key("@type"),
                format!("expected Answer, found '{}'", question.accepted_answer.kind),
            );
        }
        if question.accepted_answer.text != source.answer {
            sink.error(&answer_path.key("text"), format!("does not match faqs[{}].answer", j));
        }
    }
}

/// Positions run 1..=n and the last crumb is the page itself.
fn check_breadcrumb(
    sink: &mut IssueSink,
    path: &FieldPath,
    list: &BreadcrumbList,
    page_url: Option<&str>,
) {
    let items = path.key("itemListElement");
    let Some(last) = list.item_list_element.len().checked_sub(1) else {
        sink.error(&items, "breadcrumb is empty");
        return;
    };

    for (j, crumb) in list.item_list_element.iter().enumerate() {
        let crumb_path = items.index(j);
        let expected = j as i64 + 1;

        if crumb.kind != "ListItem" {
            sink.error(&crumb_path.key("@type"), format!("expected ListItem, found '{}'", crumb.kind));
        }
        if crumb.position != expected {
            sink.error(
                &crumb_path.key("position"),
                format!("expected position {}, found {}", expected, crumb.position),
            );
        }
        if is_blank(&crumb.name) {
            sink.error(&crumb_path.key("name"), "must not be empty");
        }

        let item_path = crumb_path.key("item");
        match crumb.item.as_deref() {
            Some(url) if !is_absolute_http_url(url) => {
                sink.error(&item_path, format!("'{}' is not an absolute http(s) URL", url))
            }
            None if j != last => sink.warning(&item_path, "crumb has no link"),
            _ => {}
        }

        if j == last {
            if let Some(page_url) = page_url {
                match crumb.item.as_deref() {
                    Some(url) if url == page_url => {}
                    Some(url) => sink.error(
                        &item_path,
                        format!("last crumb '{}' does not match WebPage.url '{}'", url, page_url),
                    ),
                    None => sink.error(&item_path, "last crumb must link to WebPage.url"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::catalog::test_support::{sample_engine_json, PAGE_URL};
    use crate::catalog::types::EngineRecord;
    use crate::validation::{validate_engine, Severity, ValidationIssue, ValidationOptions};

    fn engine_with(edit: impl FnOnce(&mut Value)) -> EngineRecord {
        let mut value = sample_engine_json();
        edit(&mut value);
        serde_json::from_value(value).unwrap()
    }

    fn check(engine: &EngineRecord) -> Vec<ValidationIssue> {
        validate_engine("polestar", "b308", engine, &ValidationOptions::default())
    }

    fn has(issues: &[ValidationIssue], severity: Severity, path: &str) -> bool {
        issues.iter().any(|i| i.severity == severity && i.path == path)
    }

    const GRAPH: &str = "polestar.b308.schema.graph";

    #[test]
    fn test_wrong_context() {
        let engine = engine_with(|v| v["schema"]["@context"] = json!("http://schema.org"));
        assert!(has(&check(&engine), Severity::Error, "polestar.b308.schema.context"));
    }

    #[test]
    fn test_empty_graph() {
        let engine = engine_with(|v| v["schema"]["@graph"] = json!([]));
        let issues = check(&engine);
        assert!(has(&issues, Severity::Error, GRAPH));
    }

    #[test]
    fn test_breadcrumb_position_out_of_order() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][1]["breadcrumb"]["itemListElement"][1]["position"] = json!(3);
        });
        let issues = check(&engine);
        assert!(has(
            &issues,
            Severity::Error,
            &format!("{GRAPH}[1].breadcrumb.itemListElement[1].position")
        ));
    }

    #[test]
    fn test_last_crumb_must_be_page_url() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][1]["breadcrumb"]["itemListElement"][2]["item"] =
                json!("https://www.example-engines.com/polestar");
        });
        let issues = check(&engine);
        assert!(has(
            &issues,
            Severity::Error,
            &format!("{GRAPH}[1].breadcrumb.itemListElement[2].item")
        ));
    }

    #[test]
    fn test_breadcrumb_reference_resolves() {
        let engine = engine_with(|v| {
            let list = v["schema"]["@graph"][1]["breadcrumb"].take();
            let mut list = list.as_object().cloned().unwrap();
            list.insert("@id".into(), json!(format!("{PAGE_URL}#breadcrumb")));
            v["schema"]["@graph"][1]["breadcrumb"] = json!({ "@id": format!("{PAGE_URL}#breadcrumb") });
            v["schema"]["@graph"].as_array_mut().unwrap().push(Value::Object(list));
        });
        let issues = check(&engine);
        assert!(issues.is_empty(), "unexpected issues: {:#?}", issues);
    }

    #[test]
    fn test_dangling_reference() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][2]["isPartOf"] = json!({ "@id": "https://www.example-engines.com/#nope" });
        });
        assert!(has(&check(&engine), Severity::Error, &format!("{GRAPH}[2].isPartOf")));
    }

    #[test]
    fn test_reference_to_wrong_type() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][1]["isPartOf"] = json!({ "@id": format!("{PAGE_URL}#article") });
        });
        assert!(has(&check(&engine), Severity::Error, &format!("{GRAPH}[1].isPartOf")));
    }

    #[test]
    fn test_unknown_and_unchecked_types() {
        let engine = engine_with(|v| {
            let graph = v["schema"]["@graph"].as_array_mut().unwrap();
            graph.push(json!({ "@type": "Recipe", "name": "Pancakes" }));
            graph.push(json!({ "@type": "Organization", "name": "Volvo Cars" }));
        });
        let issues = check(&engine);
        assert!(has(&issues, Severity::Error, &format!("{GRAPH}[5]")));
        assert!(has(&issues, Severity::Warning, &format!("{GRAPH}[6]")));
    }

    #[test]
    fn test_nested_types_are_checked() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][3]["knownVehicleCompatibility"][0]["@type"] = json!("Recipe");
            v["schema"]["@graph"][2]["author"] = json!({ "@type": "Pancake", "name": "Editorial team" });
            v["schema"]["@graph"][3]["manufacturer"] = json!({
                "@type": "Organization",
                "name": "Volvo Cars",
                "brand": { "@type": ["Brand", "Spaceship"], "name": "Polestar" }
            });
        });
        let issues = check(&engine);
        assert!(has(
            &issues,
            Severity::Error,
            &format!("{GRAPH}[3].knownVehicleCompatibility[0].@type")
        ));
        assert!(has(&issues, Severity::Error, &format!("{GRAPH}[2].author.@type")));
        assert!(has(&issues, Severity::Error, &format!("{GRAPH}[3].manufacturer.brand.@type[1]")));
        assert!(!has(&issues, Severity::Error, &format!("{GRAPH}[3].manufacturer.@type")));
        assert!(!has(&issues, Severity::Error, &format!("{GRAPH}[3].manufacturer.brand.@type[0]")));
    }

    #[test]
    fn test_recognized_nested_types_pass() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][2]["author"] = json!({ "@type": "Organization", "name": "Editorial team" });
            v["schema"]["@graph"][3]["knownVehicleCompatibility"][0]["manufacturer"] =
                json!({ "@type": "Organization", "name": "Volvo" });
        });
        let issues = check(&engine);
        assert!(issues.is_empty(), "unexpected issues: {:#?}", issues);
    }

    #[test]
    fn test_inline_breadcrumb_id_resolves() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][1]["breadcrumb"]["@id"] = json!(format!("{PAGE_URL}#breadcrumb"));
            v["schema"]["@graph"][2]["about"] = json!({ "@id": format!("{PAGE_URL}#breadcrumb") });
        });
        let issues = check(&engine);
        assert!(issues.is_empty(), "unexpected issues: {:#?}", issues);
    }

    #[test]
    fn test_inline_breadcrumb_duplicate_id() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][1]["breadcrumb"]["@id"] = json!(format!("{PAGE_URL}#article"));
        });
        assert!(has(&check(&engine), Severity::Error, &format!("{GRAPH}[1].breadcrumb.@id")));
    }

    #[test]
    fn test_dataset_node() {
        let dataset = json!({
            "@type": "Dataset",
            "@id": format!("{PAGE_URL}#dataset"),
            "name": "B308 specification table",
            "description": "Displacement and configuration figures."
        });

        let valid = dataset.clone();
        let engine = engine_with(|v| v["schema"]["@graph"].as_array_mut().unwrap().push(valid));
        let issues = check(&engine);
        assert!(issues.is_empty(), "unexpected issues: {:#?}", issues);

        let mut unnamed = dataset;
        unnamed["name"] = json!("  ");
        let engine = engine_with(|v| v["schema"]["@graph"].as_array_mut().unwrap().push(unnamed));
        assert!(has(&check(&engine), Severity::Error, &format!("{GRAPH}[5].name")));
    }

    #[test]
    fn test_web_site_url_and_name() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][0]["url"] = json!("www.example-engines.com");
            v["schema"]["@graph"][0]["name"] = json!("");
        });
        let issues = check(&engine);
        assert!(has(&issues, Severity::Error, &format!("{GRAPH}[0].url")));
        assert!(has(&issues, Severity::Error, &format!("{GRAPH}[0].name")));
    }

    #[test]
    fn test_misshapen_web_page() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][1].as_object_mut().unwrap().remove("url");
        });
        let issues = check(&engine);
        assert!(has(&issues, Severity::Error, &format!("{GRAPH}[1]")));
        assert!(has(&issues, Severity::Error, GRAPH));
    }

    #[test]
    fn test_duplicate_id() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][3]["@id"] = json!(format!("{PAGE_URL}#article"));
        });
        assert!(has(&check(&engine), Severity::Error, &format!("{GRAPH}[3].@id")));
    }

    #[test]
    fn test_article_dates() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][2]["dateModified"] = json!("2023-12-31");
        });
        assert!(has(&check(&engine), Severity::Warning, &format!("{GRAPH}[2].dateModified")));

        let engine = engine_with(|v| {
            v["schema"]["@graph"][2]["datePublished"] = json!("March 2024");
        });
        assert!(has(&check(&engine), Severity::Error, &format!("{GRAPH}[2].datePublished")));
    }

    #[test]
    fn test_faq_page_out_of_sync() {
        let engine = engine_with(|v| {
            v["faqs"][0]["answer"] = json!("Mostly.");
        });
        let issues = check(&engine);
        assert!(has(
            &issues,
            Severity::Error,
            &format!("{GRAPH}[4].mainEntity[0].acceptedAnswer.text")
        ));

        let mut engine = engine;
        engine.sync_faq_page();
        assert!(check(&engine).is_empty());
    }

    #[test]
    fn test_faq_count_mismatch() {
        let engine = engine_with(|v| {
            v["faqs"].as_array_mut().unwrap().pop();
        });
        assert!(has(&check(&engine), Severity::Error, &format!("{GRAPH}[4].mainEntity")));
    }

    #[test]
    fn test_missing_faq_page_warns() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"].as_array_mut().unwrap().remove(4);
        });
        let issues = check(&engine);
        assert!(has(&issues, Severity::Warning, GRAPH));
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_vehicle_makes_follow_compatible_models() {
        let engine = engine_with(|v| {
            v["schema"]["@graph"][3]["knownVehicleCompatibility"] =
                json!([{ "@type": "Vehicle", "name": "Polestar 2" }]);
        });
        let issues = check(&engine);
        let path = format!("{GRAPH}[3].knownVehicleCompatibility");
        assert!(has(&issues, Severity::Warning, &path));
        assert!(has(&issues, Severity::Warning, &format!("{path}[0]")));
    }
}
