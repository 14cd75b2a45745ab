//! HTML documents, rendered through embedded minijinja templates.

use minijinja::{context, Environment};
use serde::Serialize;

use distill_extract::{ComponentMeta, DocItem};

use crate::config::OutputConfig;
use crate::item::props_table;
use crate::summary::{first_description_line, ATTRIBUTION};

/// An item card on the index page.
#[derive(Debug, Clone, Serialize)]
struct Card {
    title: String,
    href: String,
    description: String,
}

/// A sibling-site link on the index page.
#[derive(Debug, Clone, Serialize)]
struct RefLink {
    title: String,
    href: String,
}

/// Template engine for the index and per-item pages.
pub struct HtmlEngine {
    env: Environment<'static>,
}

impl HtmlEngine {
    /// Create an engine with the embedded templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        env.add_template_owned("item.html".to_string(), ITEM_TEMPLATE.to_string())
            .expect("Failed to add item template");

        Self { env }
    }

    /// Render the summary index page.
    pub fn render_index(
        &self,
        config: &OutputConfig,
        items: &[DocItem],
    ) -> Result<String, minijinja::Error> {
        let cards: Vec<Card> = items
            .iter()
            .map(|item| Card {
                title: item.title.clone(),
                href: format!("{}.html", item.id),
                description: first_description_line(item).unwrap_or_default().to_string(),
            })
            .collect();

        let refs: Vec<RefLink> = config
            .refs
            .iter()
            .map(|site| RefLink {
                title: site.title.clone(),
                href: format!("{}/llms.txt", site.url.trim_end_matches('/')),
            })
            .collect();

        let tmpl = self.env.get_template("index.html")?;
        tmpl.render(context! {
            title => &config.title,
            description => &config.description,
            attribution => ATTRIBUTION,
            cards => cards,
            refs => refs,
        })
    }

    /// Render the page for one item.
    pub fn render_item(
        &self,
        config: &OutputConfig,
        item: &DocItem,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("item.html")?;
        tmpl.render(context! {
            title => &item.title,
            site_title => &config.title,
            content => item_body(item),
        })
    }
}

impl Default for HtmlEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-rendered inner HTML for an item page, mirroring the text generator's
/// structure.
fn item_body(item: &DocItem) -> String {
    if item.is_prose_page() {
        return item
            .stories
            .iter()
            .filter(|story| !story.full_source.is_empty())
            .map(|story| format!("<pre class=\"prose\">{}</pre>", escape_text(&story.full_source)))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut parts: Vec<String> = Vec::new();

    if let Some(meta) = &item.component {
        if !meta.description.is_empty() {
            parts.push(format!("<p>{}</p>", escape_text(&meta.description)));
        }
        if let Some(table) = props_table_html(meta) {
            parts.push("<h2>Props</h2>".to_string());
            parts.push(table);
        }

        let documented: Vec<(&String, &ComponentMeta)> = meta
            .subcomponents
            .iter()
            .filter(|(_, sub)| sub.has_docs())
            .collect();
        if !documented.is_empty() {
            parts.push("<h2>Subcomponents</h2>".to_string());
            for (name, sub) in documented {
                parts.push(format!("<h3>{}</h3>", escape_text(name)));
                if !sub.description.is_empty() {
                    parts.push(format!("<p>{}</p>", escape_text(&sub.description)));
                }
                if let Some(table) = props_table_html(sub) {
                    parts.push(table);
                }
            }
        }
    }

    if !item.stories.is_empty() {
        parts.push("<h2>Examples</h2>".to_string());
        for story in &item.stories {
            parts.push(format!("<h3>{}</h3>", escape_text(&story.name)));
            if !story.description.is_empty() {
                parts.push(format!("<p>{}</p>", escape_text(&story.description)));
            }
            if !story.source_code.is_empty() {
                parts.push(format!(
                    "<pre><code class=\"language-tsx\">{}</code></pre>",
                    escape_code(&story.source_code)
                ));
            }
        }
    }

    parts.join("\n")
}

/// Props table as HTML; reuses the Markdown table rows for cell content.
fn props_table_html(meta: &ComponentMeta) -> Option<String> {
    let markdown = props_table(&meta.props)?;
    let mut rows = markdown.lines();
    let header = rows.next().unwrap_or_default();
    rows.next(); // delimiter line

    let header_cells: String = pipe_cells(header)
        .map(|cell| format!("<th>{}</th>", escape_text(cell)))
        .collect();
    let body_rows: String = rows
        .map(|row| {
            let cells: String = pipe_cells(row)
                .map(|cell| format!("<td>{}</td>", escape_text(cell)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    Some(format!(
        "<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        header_cells, body_rows
    ))
}

fn pipe_cells(row: &str) -> impl Iterator<Item = &str> {
    row.trim_matches('|').split(" | ").map(str::trim)
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Source examples only need the tag-significant characters escaped.
fn escape_code(code: &str) -> String {
    code.replace('<', "&lt;").replace('>', "&gt;")
}

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: system-ui, sans-serif; line-height: 1.6; color: #1a1a1a; max-width: 960px; margin: 0 auto; padding: 2rem; }
    h1 { margin-bottom: 0.5rem; }
    .attribution { color: #666; margin-bottom: 1.5rem; }
    .description { margin-bottom: 2rem; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; text-decoration: none; color: inherit; display: block; }
    .card:hover { border-color: #888; }
    .card h2 { font-size: 1rem; margin-bottom: 0.25rem; }
    .card p { font-size: 0.875rem; color: #666; }
    .refs { margin-top: 2.5rem; }
    .refs h2 { margin-bottom: 0.5rem; }
  </style>
</head>
<body>
  <h1>{{ title }}</h1>
  <p class="attribution">{{ attribution }}</p>
  {% if description %}<p class="description">{{ description }}</p>
  {% endif %}<div class="grid">
  {% for card in cards %}
    <a class="card" href="{{ card.href }}">
      <h2>{{ card.title }}</h2>
      {% if card.description %}<p>{{ card.description }}</p>{% endif %}
    </a>
  {% endfor %}
  </div>
  {% if refs %}
  <div class="refs">
    <h2>References</h2>
    <ul>
    {% for ref in refs %}
      <li><a href="{{ ref.href }}">{{ ref.title }}</a></li>
    {% endfor %}
    </ul>
  </div>
  {% endif %}
</body>
</html>"##;

const ITEM_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: system-ui, sans-serif; line-height: 1.6; color: #1a1a1a; max-width: 800px; margin: 0 auto; padding: 2rem; }
    h1 { margin-bottom: 1rem; }
    h2 { margin: 2rem 0 0.75rem; }
    h3 { margin: 1.5rem 0 0.5rem; }
    p { margin-bottom: 0.75rem; }
    .back { display: inline-block; margin-bottom: 1.5rem; color: #666; text-decoration: none; }
    .back:hover { color: #1a1a1a; }
    table { border-collapse: collapse; width: 100%; margin-bottom: 1rem; }
    th, td { border: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; font-size: 0.875rem; }
    th { background: #f5f5f5; }
    pre { background: #f5f5f5; border-radius: 6px; padding: 0.75rem 1rem; overflow-x: auto; margin-bottom: 1rem; }
    code { font-family: ui-monospace, monospace; font-size: 0.875rem; }
  </style>
</head>
<body>
  <a class="back" href="index.html">&larr; {{ site_title }}</a>
  <h1>{{ title }}</h1>
  {{ content | safe }}
</body>
</html>"##;
