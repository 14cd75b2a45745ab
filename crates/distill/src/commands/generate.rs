//! Extraction and generation command.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use serde::Deserialize;

use distill_extract::{extract_site, ExtractOptions};
use distill_output::{write_site, OutputConfig, RefSite};

/// Configuration file structure (distill.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteSection,
    #[serde(default)]
    refs: Vec<RefEntry>,
}

#[derive(Debug, Deserialize)]
struct SiteSection {
    #[serde(default = "default_dist")]
    dist: String,
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct RefEntry {
    title: String,
    url: String,
}

fn default_dist() -> String {
    "storybook-static".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_title() -> String {
    "Summary".to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            dist: default_dist(),
            base_url: default_base_url(),
            title: default_title(),
            description: String::new(),
        }
    }
}

/// Load configuration from distill.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(config_path: &Path) -> Result<ConfigFile> {
    if config_path.exists() {
        let content = fs::read_to_string(config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", config_path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", config_path.display(), e))?;
        tracing::info!("Loaded config from {}", config_path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Run the generate command.
pub async fn run(
    dist: Option<PathBuf>,
    base_url: Option<String>,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let file_config = load_config(Path::new("distill.toml"))?;

    let site_root = dist.unwrap_or_else(|| PathBuf::from(&file_config.site.dist));
    if !site_root.exists() {
        anyhow::bail!(
            "Static build not found: {}. Build your Storybook first.",
            site_root.display()
        );
    }

    let config = OutputConfig {
        base_url: base_url.unwrap_or(file_config.site.base_url),
        title: title.unwrap_or(file_config.site.title),
        description: description.unwrap_or(file_config.site.description),
        refs: file_config
            .refs
            .into_iter()
            .map(|entry| RefSite {
                title: entry.title,
                url: entry.url,
            })
            .collect(),
    };

    tracing::info!("Extracting story metadata from {}...", site_root.display());
    let start = Instant::now();

    let items = extract_site(&site_root, &ExtractOptions::default()).await?;
    let date = chrono::Local::now().date_naive();
    let result = write_site(&site_root, &config, &items, date)?;

    tracing::info!(
        "Generated {} documents for {} items in {}ms",
        result.files,
        result.items,
        start.elapsed().as_millis()
    );
    tracing::info!("Output: {}", site_root.join("llms.txt").display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let config = load_config(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.site.dist, "storybook-static");
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.site.title, "Summary");
        assert_eq!(config.site.description, "");
        assert!(config.refs.is_empty());
    }

    #[test]
    fn parses_full_config() {
        let config: ConfigFile = toml::from_str(
            r#"
[site]
dist = "build/storybook"
base_url = "https://docs.example.com"
title = "Acme UI"
description = "Internal component library."

[[refs]]
title = "Design Tokens"
url = "https://tokens.example.com"
"#,
        )
        .unwrap();

        assert_eq!(config.site.dist, "build/storybook");
        assert_eq!(config.site.base_url, "https://docs.example.com");
        assert_eq!(config.site.title, "Acme UI");
        assert_eq!(config.refs.len(), 1);
        assert_eq!(config.refs[0].title, "Design Tokens");
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: ConfigFile = toml::from_str("[site]\ntitle = \"Acme UI\"\n").unwrap();
        assert_eq!(config.site.title, "Acme UI");
        assert_eq!(config.site.dist, "storybook-static");
        assert_eq!(config.site.base_url, "/");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("distill.toml");
        fs::write(&path, "[site\ndist =").unwrap();
        assert!(load_config(&path).is_err());
    }
}
