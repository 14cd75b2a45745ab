//! Initialize a distill.toml in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing distill...");

    let config_path = Path::new("distill.toml");
    if config_path.exists() && !yes {
        tracing::warn!("distill.toml already exists. Use --yes to overwrite.");
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG).context("Failed to write distill.toml")?;
    tracing::info!("Created distill.toml");
    tracing::info!("Run 'distill generate' after building your Storybook.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Distill configuration

[site]
# Storybook static build directory
dist = "storybook-static"

# Base URL prefixed to generated links
base_url = "/"

# Summary document title
title = "Summary"

# Summary document description
description = ""

# Sibling documentation sites linked from the summary
# [[refs]]
# title = "Design Tokens"
# url = "https://tokens.example.com"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let value: toml::Value = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(
            value["site"]["dist"].as_str(),
            Some("storybook-static")
        );
    }
}
