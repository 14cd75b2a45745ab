//! Top-level extraction pipeline.

use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page;
use tokio::time::{sleep, Instant};

use crate::assets::SITE_ORIGIN;
use crate::browser::BrowserSession;
use crate::enrich::enrich_items;
use crate::error::ExtractError;
use crate::js;
use crate::model::DocItem;
use crate::registry::{self, detect_shape, RawExtraction, RegistryProbe};

const REGISTRY_POLL: Duration = Duration::from_millis(250);

/// Tunable waits for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How long to wait for the story registry on the entry page before the
    /// run fails with `RegistryNotFound`.
    pub registry_wait: Duration,

    /// Per-page wait for the docs container; failures are recovered locally.
    pub content_wait: Duration,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            registry_wait: Duration::from_secs(60),
            content_wait: Duration::from_secs(2),
        }
    }
}

/// Extract the full documentable item collection from a static build.
///
/// Owns the browser for the whole run and releases it on every exit path,
/// including failures mid-extraction.
pub async fn extract_site(
    site_root: &Path,
    options: &ExtractOptions,
) -> Result<Vec<DocItem>, ExtractError> {
    let session = BrowserSession::launch(site_root).await?;
    let result = extract_with_session(&session, options).await;
    session.shutdown().await;
    result
}

async fn extract_with_session(
    session: &BrowserSession,
    options: &ExtractOptions,
) -> Result<Vec<DocItem>, ExtractError> {
    let page = session.open_page().await?;
    page.goto(format!("{}/iframe.html", SITE_ORIGIN)).await?;

    wait_for_registry(&page, options.registry_wait).await?;

    let probe: RegistryProbe =
        serde_json::from_value(evaluate_json(&page, js::PROBE.to_string()).await?)?;
    let shape = detect_shape(&probe).ok_or(ExtractError::RegistryShapeUnsupported {
        preview_props: probe.preview_props,
        store_props: probe.store_props,
    })?;
    tracing::debug!("registry shape: {:?}", shape);

    let payload = evaluate_json(&page, shape.script()).await?;
    let raw: RawExtraction = serde_json::from_value(payload)?;
    let items = registry::normalize(raw);
    tracing::info!("extracted {} documentable items", items.len());

    if let Err(err) = page.close().await {
        tracing::debug!("entry page close failed: {}", err);
    }

    Ok(enrich_items(session, items, options).await)
}

async fn wait_for_registry(page: &Page, wait: Duration) -> Result<(), ExtractError> {
    let deadline = Instant::now() + wait;
    loop {
        let ready: bool = page.evaluate(js::REGISTRY_READY).await?.into_value()?;
        if ready {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(ExtractError::RegistryNotFound {
                waited_secs: wait.as_secs(),
            });
        }
        sleep(REGISTRY_POLL).await;
    }
}

/// Evaluate a script (awaiting any promise) and marshal the result by value.
async fn evaluate_json(page: &Page, script: String) -> Result<serde_json::Value, ExtractError> {
    let params = EvaluateParams::builder()
        .expression(script)
        .await_promise(true)
        .return_by_value(true)
        .build()
        .map_err(ExtractError::Script)?;
    Ok(page.evaluate(params).await?.into_value()?)
}
