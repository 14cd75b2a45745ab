//! Run configuration consumed by the generators.

/// Summary metadata and link base for one generation run.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Base URL prefixed to generated links.
    pub base_url: String,

    /// Summary document title.
    pub title: String,

    /// Summary document description.
    pub description: String,

    /// Sibling documentation sites to link from the summary.
    pub refs: Vec<RefSite>,
}

/// A linked sibling documentation site.
#[derive(Debug, Clone)]
pub struct RefSite {
    pub title: String,
    pub url: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            title: "Summary".to_string(),
            description: String::new(),
            refs: Vec::new(),
        }
    }
}

impl OutputConfig {
    /// Join a site-relative path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
