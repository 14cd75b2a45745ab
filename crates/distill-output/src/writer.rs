//! Output tree writer.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use distill_extract::DocItem;

use crate::config::OutputConfig;
use crate::html::HtmlEngine;
use crate::item::item_text;
use crate::sitemap::sitemap;
use crate::summary::summary_text;

/// Errors that can occur while writing the output tree.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Failed to write output: {0}")]
    Write(String),
}

/// Result of one write pass.
#[derive(Debug)]
pub struct WriteSummary {
    /// Items written to the items subdirectory.
    pub items: usize,

    /// Total files written, including summary, sitemap, and index.
    pub files: usize,
}

/// Write the generated documents under the site root.
///
/// The items subdirectory is deleted and recreated every run: a full-batch
/// overwrite, with no partial-item preservation. The sitemap and the HTML
/// index are written after the per-item files so a mid-run failure cannot
/// leave them pointing at half-written content.
pub fn write_site(
    site_root: &Path,
    config: &OutputConfig,
    items: &[DocItem],
    date: NaiveDate,
) -> Result<WriteSummary, WriteError> {
    let engine = HtmlEngine::new();

    fs::create_dir_all(site_root).map_err(|e| WriteError::Write(e.to_string()))?;
    write_file(&site_root.join("llms.txt"), &summary_text(config, items))?;

    let items_dir = site_root.join("llms");
    if items_dir.exists() {
        fs::remove_dir_all(&items_dir).map_err(|e| WriteError::Write(e.to_string()))?;
    }
    fs::create_dir_all(&items_dir).map_err(|e| WriteError::Write(e.to_string()))?;

    let mut files = 1;
    for item in items {
        write_file(&items_dir.join(format!("{}.txt", item.id)), &item_text(item))?;
        let html = engine
            .render_item(config, item)
            .map_err(|e| WriteError::Template(e.to_string()))?;
        write_file(&items_dir.join(format!("{}.html", item.id)), &html)?;
        files += 2;
    }

    write_file(&items_dir.join("sitemap.xml"), &sitemap(config, items, date))?;
    let index = engine
        .render_index(config, items)
        .map_err(|e| WriteError::Template(e.to_string()))?;
    write_file(&items_dir.join("index.html"), &index)?;
    files += 2;

    tracing::info!(
        "wrote {} files for {} items under {}",
        files,
        items.len(),
        site_root.display()
    );

    Ok(WriteSummary {
        items: items.len(),
        files,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    fs::write(path, contents)
        .map_err(|e| WriteError::Write(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_extract::StoryVariant;
    use tempfile::tempdir;

    fn item(id: &str) -> DocItem {
        DocItem {
            id: id.to_string(),
            title: id.to_string(),
            component: None,
            stories: vec![StoryVariant {
                id: format!("{}--primary", id),
                name: "Primary".to_string(),
                docs_only: false,
                full_source: String::new(),
                description: String::new(),
                source_code: "<X />".to_string(),
            }],
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn writes_the_full_output_tree() {
        let temp = tempdir().unwrap();
        let config = OutputConfig::default();

        let summary = write_site(temp.path(), &config, &[item("button")], date()).unwrap();

        assert_eq!(summary.items, 1);
        assert_eq!(summary.files, 5);
        assert!(temp.path().join("llms.txt").exists());
        assert!(temp.path().join("llms").join("button.txt").exists());
        assert!(temp.path().join("llms").join("button.html").exists());
        assert!(temp.path().join("llms").join("sitemap.xml").exists());
        assert!(temp.path().join("llms").join("index.html").exists());
    }

    #[test]
    fn recreates_the_items_directory_each_run() {
        let temp = tempdir().unwrap();
        let config = OutputConfig::default();

        write_site(temp.path(), &config, &[item("old")], date()).unwrap();
        assert!(temp.path().join("llms").join("old.txt").exists());

        write_site(temp.path(), &config, &[item("new")], date()).unwrap();
        assert!(!temp.path().join("llms").join("old.txt").exists());
        assert!(temp.path().join("llms").join("new.txt").exists());
    }

    #[test]
    fn summary_survives_item_directory_recreation() {
        let temp = tempdir().unwrap();
        let config = OutputConfig::default();

        write_site(temp.path(), &config, &[item("button")], date()).unwrap();
        let summary = fs::read_to_string(temp.path().join("llms.txt")).unwrap();
        assert!(summary.contains("- [button](/llms/button.html)"));
    }
}
