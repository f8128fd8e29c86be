//! Rules for brand and engine copy.

use std::collections::HashSet;

use crate::catalog::extra_notes::ExtraNote;
use crate::catalog::types::{
    is_valid_brand_key, is_valid_engine_key, BrandRecord, CompatibleModels, EngineRecord,
    ReliabilityIssues, TechnicalSpecifications,
};
use crate::validation::text::{
    contains_year, inline_markup_problems, is_absolute_http_url, is_blank, is_url_or_site_path,
};
use crate::validation::{FieldPath, IssueSink, ValidationOptions};

// ============================================================================
// Brand
// ============================================================================

pub(super) fn check_brand(sink: &mut IssueSink, root: &FieldPath, brand_key: &str, brand: &BrandRecord) {
    if !is_valid_brand_key(brand_key) {
        sink.error(root, format!("brand key '{}' must be lowercase letters, digits and inner hyphens", brand_key));
    }

    let hero = root.key("heroImage");
    sink.require_text(&hero.key("src"), &brand.hero_image.src);
    sink.require_text(&hero.key("alt"), &brand.hero_image.alt);
    if !is_blank(&brand.hero_image.src) && !is_url_or_site_path(&brand.hero_image.src) {
        sink.error(&hero.key("src"), "must be an absolute URL or a path starting with '/'");
    }

    let resources = root.key("researchResources");
    for (field, url) in [
        ("serviceManual", &brand.research_resources.service_manual),
        ("serviceBulletinIndex", &brand.research_resources.service_bulletin_index),
    ] {
        if !is_absolute_http_url(url) {
            sink.error(&resources.key(field), format!("'{}' is not an absolute http(s) URL", url));
        }
    }

    if brand.engines.is_empty() {
        sink.warning(&root.key("engines"), "brand has no engines");
    }

    for engine_key in brand.engine_keys() {
        if !is_valid_engine_key(engine_key) {
            sink.error(
                &root.key(engine_key),
                format!("engine key '{}' must be lowercase letters and digits only", engine_key),
            );
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

pub(super) fn check_engine(
    sink: &mut IssueSink,
    path: &FieldPath,
    _engine_key: &str,
    engine: &EngineRecord,
    options: &ValidationOptions,
) {
    check_metadata(sink, &path.key("metadata"), engine, options);
    check_hero(sink, &path.key("hero"), engine);
    check_specifications(sink, &path.key("technicalSpecifications"), &engine.technical_specifications);
    check_compatible_models(sink, &path.key("compatibleModels"), &engine.compatible_models);

    let banner = path.key("bannerImage");
    if is_blank(&engine.banner_image) {
        sink.error(&banner, "must not be empty");
    } else if !is_url_or_site_path(&engine.banner_image) {
        sink.error(&banner, "must be an absolute URL or a path starting with '/'");
    }

    check_reliability(sink, &path.key("commonReliabilityIssues"), &engine.common_reliability_issues);
    check_faqs(sink, &path.key("faqs"), engine);
}

fn check_metadata(sink: &mut IssueSink, path: &FieldPath, engine: &EngineRecord, options: &ValidationOptions) {
    let meta = &engine.metadata;
    sink.require_text(&path.key("title"), &meta.title);
    sink.require_text(&path.key("description"), &meta.description);

    let title_len = meta.title.chars().count();
    if title_len > options.title_soft_limit {
        sink.warning(
            &path.key("title"),
            format!("{} characters; search results truncate after ~{}", title_len, options.title_soft_limit),
        );
    }
    let description_len = meta.description.chars().count();
    if description_len > options.description_soft_limit {
        sink.warning(
            &path.key("description"),
            format!(
                "{} characters; search results truncate after ~{}",
                description_len, options.description_soft_limit
            ),
        );
    }
}

fn check_hero(sink: &mut IssueSink, path: &FieldPath, engine: &EngineRecord) {
    let hero = &engine.hero;

    let years = path.key("years");
    if is_blank(&hero.years) {
        sink.error(&years, "must not be empty");
    } else if !contains_year(&hero.years) {
        sink.warning(&years, format!("'{}' does not name a year", hero.years));
    }

    let paragraphs = path.key("paragraphs");
    if hero.paragraphs.is_empty() {
        sink.error(&paragraphs, "needs at least one paragraph");
    }
    for (i, paragraph) in hero.paragraphs.iter().enumerate() {
        sink.require_text(&paragraphs.index(i), paragraph);
    }

    let disclaimer = path.key("disclaimer");
    sink.require_text(&disclaimer.key("title"), &hero.disclaimer.title);
    sink.require_text(&disclaimer.key("text"), &hero.disclaimer.text);
}

fn check_specifications(sink: &mut IssueSink, path: &FieldPath, specs: &TechnicalSpecifications) {
    sink.require_text(&path.key("description"), &specs.description);

    let rows = path.key("engineSpecs");
    if specs.engine_specs.is_empty() {
        sink.warning(&rows, "spec table is empty");
    }

    let mut seen = HashSet::new();
    for (i, row) in specs.engine_specs.iter().enumerate() {
        let row_path = rows.index(i);
        sink.require_text(&row_path.key("parameter"), &row.parameter);
        sink.require_text(&row_path.key("value"), &row.value);
        if is_blank(&row.source) {
            sink.warning(&row_path.key("source"), "unsourced value");
        }
        if !is_blank(&row.parameter) && !seen.insert(row.parameter.trim().to_lowercase()) {
            sink.warning(&row_path.key("parameter"), format!("duplicate parameter '{}'", row.parameter));
        }
    }

    let implications = path.key("practicalImplications");
    let notes = implications.key("verificationNotes");
    for (key, note) in &specs.practical_implications.verification_notes {
        if is_blank(key) {
            sink.error(&notes, "verification note has an empty key");
        } else {
            sink.require_text(&notes.key(key), note);
        }
    }
    let citations = implications.key("citations");
    for (i, citation) in specs.practical_implications.citations.iter().enumerate() {
        sink.require_text(&citations.index(i), citation);
    }
}

fn check_compatible_models(sink: &mut IssueSink, path: &FieldPath, models: &CompatibleModels) {
    let description = path.key("description");
    sink.require_text(&description, &models.description);
    for problem in inline_markup_problems(&models.description) {
        sink.warning(&description, problem);
    }

    let rows = path.key("compatibleModels");
    if models.compatible_models.is_empty() {
        sink.warning(&rows, "no compatible models listed");
    }
    for (i, row) in models.compatible_models.iter().enumerate() {
        let row_path = rows.index(i);
        for (field, value) in [
            ("Make", &row.make),
            ("Models", &row.models),
            ("Years", &row.years),
            ("Variants", &row.variants),
            ("OEM Source", &row.oem_source),
        ] {
            sink.require_text(&row_path.key(field), value);
        }
    }

    if is_blank(&models.guidance) {
        sink.warning(&path.key("guidance"), "no fitment guidance");
    }

    if let Some(notes) = &models.extra_notes {
        check_extra_notes(sink, &path.key("extraNotes"), notes);
    }
}

fn check_extra_notes(sink: &mut IssueSink, path: &FieldPath, notes: &[ExtraNote]) {
    let mut keys = HashSet::new();

    for (i, note) in notes.iter().enumerate() {
        let note_path = path.index(i);

        if is_blank(note.key()) {
            sink.error(&note_path.key("key"), "must not be empty");
        } else if !keys.insert(note.key()) {
            sink.warning(&note_path.key("key"), format!("duplicate note key '{}'", note.key()));
        }

        let label = note.kind_label();
        match note {
            ExtraNote::HybridSystem(n) => check_typed_note(
                sink,
                &note_path,
                label,
                &n.title,
                &n.description,
                "components",
                &n.components,
            ),
            ExtraNote::SoftwareDependency(n) => check_typed_note(
                sink,
                &note_path,
                label,
                &n.title,
                &n.description,
                "softwareVersions",
                &n.software_versions,
            ),
            ExtraNote::Identification(n) => check_typed_note(
                sink,
                &note_path,
                label,
                &n.title,
                &n.description,
                "locations",
                &n.locations,
            ),
            ExtraNote::Generic(n) => {
                if n.fields.is_empty() {
                    sink.warning(&note_path, "note has no content besides its key");
                }
                for (field, value) in &n.fields {
                    if value.is_blank() {
                        sink.warning(&note_path.key(field), "empty note field");
                    }
                }
            }
        }
    }
}

fn check_typed_note(
    sink: &mut IssueSink,
    path: &FieldPath,
    label: &str,
    title: &str,
    description: &str,
    list_field: &str,
    list: &[String],
) {
    sink.require_text(&path.key("title"), title);
    sink.require_text(&path.key("description"), description);

    let list_path = path.key(list_field);
    if list.is_empty() {
        sink.warning(&list_path, format!("{} note has an empty {} list", label, list_field));
    }
    for (i, item) in list.iter().enumerate() {
        sink.require_text(&list_path.index(i), item);
    }
}

fn check_reliability(sink: &mut IssueSink, path: &FieldPath, section: &ReliabilityIssues) {
    sink.require_text(&path.key("subheading"), &section.subheading);

    let issues = path.key("issues");
    if section.issues.is_empty() {
        sink.warning(&issues, "no reliability issues listed");
    }
    for (i, issue) in section.issues.iter().enumerate() {
        let issue_path = issues.index(i);
        sink.require_text(&issue_path.key("title"), &issue.title);
        sink.require_text(&issue_path.key("symptoms"), &issue.symptoms);
        sink.require_text(&issue_path.key("cause"), &issue.cause);
        sink.require_text(&issue_path.key("fix"), &issue.fix);
    }

    let info = path.key("infoBlock");
    sink.require_text(&info.key("title"), &section.info_block.title);
    sink.require_text(&info.key("description"), &section.info_block.description);
    if is_blank(&section.info_block.gradient) {
        sink.warning(&info.key("gradient"), "no gradient class; block renders unstyled");
    }
}

fn check_faqs(sink: &mut IssueSink, path: &FieldPath, engine: &EngineRecord) {
    if engine.faqs.is_empty() {
        sink.warning(path, "engine has no FAQs");
    }

    let mut questions = HashSet::new();
    for (i, faq) in engine.faqs.iter().enumerate() {
        let faq_path = path.index(i);
        let question = faq.question.trim();

        if question.is_empty() {
            sink.error(&faq_path.key("question"), "must not be empty");
        } else {
            if !question.ends_with('?') {
                sink.warning(&faq_path.key("question"), "should end with '?'");
            }
            if !questions.insert(question.to_lowercase()) {
                sink.warning(&faq_path.key("question"), "duplicate question");
            }
        }
        sink.require_text(&faq_path.key("answer"), &faq.answer);
    }
}
