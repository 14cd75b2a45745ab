//! Prose-page enrichment.
//!
//! Enrichment is a separate phase over the already-normalized collection: it
//! consumes the base items and produces a new collection in which prose-page
//! variants carry their rendered Markdown body. Nothing observes a
//! half-enriched collection.

use crate::browser::BrowserSession;
use crate::content::extract_page_content;
use crate::extractor::ExtractOptions;
use crate::model::{DocItem, StoryVariant};

/// Populate `full_source` on every prose-page variant, sequentially in
/// collection order. Extraction failures leave the variant empty.
pub async fn enrich_items(
    session: &BrowserSession,
    items: Vec<DocItem>,
    options: &ExtractOptions,
) -> Vec<DocItem> {
    let mut enriched = Vec::with_capacity(items.len());

    for item in items {
        if !item.is_prose_page() {
            enriched.push(item);
            continue;
        }

        let DocItem {
            id,
            title,
            component,
            stories,
        } = item;

        let mut filled = Vec::with_capacity(stories.len());
        for variant in stories {
            let full_source = extract_page_content(session, &variant.id, options).await;
            filled.push(StoryVariant {
                full_source,
                ..variant
            });
        }

        enriched.push(DocItem {
            id,
            title,
            component,
            stories: filled,
        });
    }

    enriched
}
