//! Sitemap generation.

use chrono::NaiveDate;
use distill_extract::DocItem;

use crate::config::OutputConfig;

/// Fixed priority schedule: the summary outranks the index, which outranks
/// item text, which outranks item HTML. Everything changes weekly.
const SUMMARY_TEXT_PRIORITY: &str = "1.0";
const SUMMARY_HTML_PRIORITY: &str = "0.9";
const ITEM_TEXT_PRIORITY: &str = "0.8";
const ITEM_HTML_PRIORITY: &str = "0.7";

/// Generate the sitemap for one run. The date is injected by the caller so
/// generation stays deterministic.
pub fn sitemap(config: &OutputConfig, items: &[DocItem], date: NaiveDate) -> String {
    let lastmod = date.format("%Y-%m-%d").to_string();

    let mut entries: Vec<(String, &str)> = vec![
        (config.url("llms.txt"), SUMMARY_TEXT_PRIORITY),
        (config.url("llms/index.html"), SUMMARY_HTML_PRIORITY),
    ];
    for item in items {
        entries.push((
            config.url(&format!("llms/{}.txt", item.id)),
            ITEM_TEXT_PRIORITY,
        ));
        entries.push((
            config.url(&format!("llms/{}.html", item.id)),
            ITEM_HTML_PRIORITY,
        ));
    }

    let urls: Vec<String> = entries
        .iter()
        .map(|(loc, priority)| {
            format!(
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>{}</priority>\n  </url>",
                loc, lastmod, priority
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}\n</urlset>\n",
        urls.join("\n")
    )
}
