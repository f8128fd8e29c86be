//! FAQPage derivation.
//!
//! The `faqs` array on an engine record is the single source of truth for FAQ
//! content. The FAQPage node in the structured-data graph is rebuilt from it
//! rather than authored a second time.

use crate::catalog::types::{EngineRecord, Faq};
use crate::schema_org::graph::{FaqPageNode, FaqQuestion, GraphNode, SchemaNode};

/// Build the FAQPage node for an engine from its `faqs`.
///
/// The `@id` and any extra properties of an existing FAQPage node are kept.
/// Without one, the id is `<WebPage.url>#faq` when the graph has a WebPage.
pub fn derive_faq_page_node(engine: &EngineRecord) -> FaqPageNode {
    let existing = engine.schema.faq_page();

    let id = existing
        .and_then(|node| node.id.clone())
        .or_else(|| {
            engine
                .schema
                .web_page()
                .map(|page| format!("{}#faq", page.url.trim_end_matches('#')))
        });

    FaqPageNode {
        id,
        main_entity: engine.faqs.iter().map(question_from_faq).collect(),
        extra: existing.map(|node| node.extra.clone()).unwrap_or_default(),
    }
}

fn question_from_faq(faq: &Faq) -> FaqQuestion {
    FaqQuestion::new(faq.question.clone(), faq.answer.clone())
}

impl EngineRecord {
    /// Replace the graph's FAQPage with one derived from `faqs`.
    ///
    /// Appends a FAQPage when there is none, and removes it when `faqs` is
    /// empty. Returns `true` when the graph changed.
    pub fn sync_faq_page(&mut self) -> bool {
        let index = self.schema.faq_page_index();

        if self.faqs.is_empty() {
            return match index {
                Some(i) => {
                    self.schema.graph.remove(i);
                    true
                }
                None => false,
            };
        }

        let derived = GraphNode::Typed(SchemaNode::FaqPage(derive_faq_page_node(self)));
        match index {
            Some(i) if self.schema.graph[i] == derived => false,
            Some(i) => {
                self.schema.graph[i] = derived;
                true
            }
            None => {
                self.schema.graph.push(derived);
                true
            }
        }
    }
}
