//! Static asset resolution for browser request interception.
//!
//! The build directory is never served over the network: every request the
//! page issues (navigations, scripts, styles, fonts, images) is answered
//! from disk by the interceptor in `browser.rs`, which delegates here.

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

/// Synthetic origin the static build is addressed under. It never resolves;
/// the interceptor answers every request before the network is consulted.
pub const SITE_ORIGIN: &str = "http://distill.localhost";

/// Outcome of resolving one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetResponse {
    Ok {
        body: Vec<u8>,
        content_type: &'static str,
    },
    /// Missing file, or a path that does not stay under the site root.
    NotFound,
    /// The file exists but could not be read; served as a 500.
    ReadError(String),
}

/// Resolves request paths to files under a site root.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: &Path) -> std::io::Result<Self> {
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    /// Resolve a full request URL (percent-encoded) against the site root.
    pub fn resolve_url(&self, url: &str) -> AssetResponse {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return AssetResponse::NotFound,
        };
        let path = percent_decode_str(parsed.path()).decode_utf8_lossy();
        self.resolve(&path)
    }

    /// Resolve a decoded URL path to file bytes and a content type.
    ///
    /// Extensionless paths are treated as directory requests and get an
    /// index document appended. Paths that escape the root resolve to
    /// `NotFound`, never to a file outside it.
    pub fn resolve(&self, url_path: &str) -> AssetResponse {
        let relative = url_path.trim_start_matches('/');
        let mut candidate = self.root.join(relative);
        if candidate.extension().is_none() {
            candidate.push("index.html");
        }

        let resolved = match candidate.canonicalize() {
            Ok(resolved) => resolved,
            Err(_) => return AssetResponse::NotFound,
        };
        if !resolved.starts_with(&self.root) {
            return AssetResponse::NotFound;
        }

        match fs::read(&resolved) {
            Ok(body) => AssetResponse::Ok {
                body,
                content_type: content_type_for(&resolved),
            },
            Err(err) => AssetResponse::ReadError(err.to_string()),
        }
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "html" | "htm" => "text/html",
        "js" | "mjs" => "text/javascript",
        "css" => "text/css",
        "json" | "map" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "txt" => "text/plain",
        "xml" => "application/xml",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}
