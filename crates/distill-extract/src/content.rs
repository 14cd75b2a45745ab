//! Prose-page content extraction.

use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::assets::SITE_ORIGIN;
use crate::browser::BrowserSession;
use crate::error::ExtractError;
use crate::extractor::ExtractOptions;
use crate::js;

/// Container the docs renderer mounts prose content into.
const DOCS_CONTAINER: &str = "#storybook-docs";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Extract a prose page's rendered body as Markdown.
///
/// Any failure here is recovered locally: a single page must not fail the
/// batch, so the variant just renders empty.
pub async fn extract_page_content(
    session: &BrowserSession,
    variant_id: &str,
    options: &ExtractOptions,
) -> String {
    match extract_inner_html(session, variant_id, options).await {
        Ok(html) => distill_markdown::render(&html),
        Err(err) => {
            tracing::warn!("content extraction failed for {}: {}", variant_id, err);
            String::new()
        }
    }
}

async fn extract_inner_html(
    session: &BrowserSession,
    variant_id: &str,
    options: &ExtractOptions,
) -> Result<String, ExtractError> {
    let docs_id = docs_variant_id(variant_id);
    let url = format!("{}/iframe.html?viewMode=docs&id={}", SITE_ORIGIN, docs_id);

    let page = session.open_page().await?;
    let result = async {
        page.goto(url).await?;
        wait_for_container(&page, options.content_wait).await?;
        let html: String = page
            .evaluate(js::docs_container_html(DOCS_CONTAINER))
            .await?
            .into_value()?;
        Ok(html)
    }
    .await;

    if let Err(err) = page.close().await {
        tracing::debug!("page close failed for {}: {}", variant_id, err);
    }
    result
}

async fn wait_for_container(
    page: &chromiumoxide::Page,
    wait: Duration,
) -> Result<(), ExtractError> {
    let deadline = Instant::now() + wait;
    loop {
        let attached: bool = page
            .evaluate(js::selector_attached(DOCS_CONTAINER))
            .await?
            .into_value()?;
        if attached {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(ExtractError::MarkerTimeout(DOCS_CONTAINER.to_string()));
        }
        sleep(POLL_INTERVAL).await;
    }
}

/// Rewrite a story id to its documentation-view variant.
pub fn docs_variant_id(variant_id: &str) -> String {
    match variant_id.rfind("--") {
        Some(pos) => format!("{}--docs", &variant_id[..pos]),
        None => format!("{}--docs", variant_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rewrites_story_suffix_to_docs() {
        assert_eq!(docs_variant_id("example-button--primary"), "example-button--docs");
        assert_eq!(docs_variant_id("docs-intro--docs"), "docs-intro--docs");
    }

    #[test]
    fn appends_docs_suffix_when_id_has_none() {
        assert_eq!(docs_variant_id("standalone"), "standalone--docs");
    }
}
