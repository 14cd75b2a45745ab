//! Browser session lifetime and disk-backed request interception.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::fetch::{
    self, EventRequestPaused, FulfillRequestParams, HeaderEntry, RequestPattern,
};
use chromiumoxide::cdp::browser_protocol::page::SetBypassCspParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::assets::{AssetResolver, AssetResponse};
use crate::error::ExtractError;

/// A launched browser plus the asset resolver shared by every page the run
/// opens. The session is owned by the top-level extraction routine and must
/// be shut down on every exit path.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    resolver: AssetResolver,
}

impl BrowserSession {
    /// Launch a headless browser serving the given site root.
    pub async fn launch(site_root: &Path) -> Result<Self, ExtractError> {
        let resolver = AssetResolver::new(site_root)?;
        let config = BrowserConfig::builder()
            .build()
            .map_err(ExtractError::Launch)?;
        let (browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move {
            while handler.next().await.is_some() {}
        });
        Ok(Self {
            browser,
            handler_task,
            resolver,
        })
    }

    /// Open a fresh page with CSP bypass enabled and every request routed
    /// through the asset resolver.
    ///
    /// CSP bypass is required because fulfilled responses look cross-origin
    /// to the document. Interception must be installed before navigation so
    /// the entry document itself is served from disk.
    pub async fn open_page(&self) -> Result<Page, ExtractError> {
        let page = self.browser.new_page("about:blank").await?;
        page.execute(SetBypassCspParams { enabled: true }).await?;

        page.execute(fetch::EnableParams {
            patterns: Some(vec![RequestPattern {
                url_pattern: Some("*".to_string()),
                resource_type: None,
                request_stage: None,
            }]),
            handle_auth_requests: None,
        })
        .await?;

        let mut requests = page.event_listener::<EventRequestPaused>().await?;
        let interceptor = page.clone();
        let resolver = self.resolver.clone();
        tokio::spawn(async move {
            while let Some(event) = requests.next().await {
                serve_request(&interceptor, &resolver, &event).await;
            }
        });

        Ok(page)
    }

    /// Close the browser. Called on both success and failure paths of a run.
    pub async fn shutdown(mut self) {
        if let Err(err) = self.browser.close().await {
            tracing::debug!("browser close failed: {}", err);
        }
        self.handler_task.abort();
    }
}

async fn serve_request(page: &Page, resolver: &AssetResolver, event: &EventRequestPaused) {
    let url = &event.request.url;
    let outcome = match resolver.resolve_url(url) {
        AssetResponse::Ok { body, content_type } => {
            fulfill(page, event, 200, content_type, &body).await
        }
        AssetResponse::NotFound => fulfill(page, event, 404, "text/plain", b"not found").await,
        AssetResponse::ReadError(message) => {
            tracing::warn!("asset read failed for {}: {}", url, message);
            fulfill(page, event, 500, "text/plain", b"read error").await
        }
    };
    if let Err(err) = outcome {
        tracing::debug!("could not fulfill {}: {}", url, err);
    }
}

async fn fulfill(
    page: &Page,
    event: &EventRequestPaused,
    status: i64,
    content_type: &str,
    body: &[u8],
) -> Result<(), String> {
    let params = FulfillRequestParams::builder()
        .request_id(event.request_id.clone())
        .response_code(status)
        .response_headers(vec![HeaderEntry::new("Content-Type", content_type)])
        .body(BASE64.encode(body))
        .build()?;
    page.execute(params).await.map_err(|err| err.to_string())?;
    Ok(())
}
