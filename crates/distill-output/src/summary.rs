//! Summary text document (`llms.txt`).

use distill_extract::DocItem;

use crate::config::OutputConfig;

/// Fixed attribution note carried by every generated summary.
pub(crate) const ATTRIBUTION: &str =
    "Component documentation extracted from a Storybook build, formatted for large language models.";

/// Generate the summary text document.
pub fn summary_text(config: &OutputConfig, items: &[DocItem]) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", config.title));
    out.push_str(&format!("> {}\n\n", ATTRIBUTION));

    if !config.description.is_empty() {
        out.push_str(&config.description);
        out.push_str("\n\n");
    }

    for item in items {
        let link = config.url(&format!("llms/{}.html", item.id));
        match first_description_line(item) {
            Some(line) => out.push_str(&format!("- [{}]({}): {}\n", item.title, link, line)),
            None => out.push_str(&format!("- [{}]({})\n", item.title, link)),
        }
    }

    if !config.refs.is_empty() {
        out.push_str("\n## Optional\n\n");
        for site in &config.refs {
            out.push_str(&format!(
                "- [{}]({}/llms.txt)\n",
                site.title,
                site.url.trim_end_matches('/')
            ));
        }
    }

    out
}

/// First line of the component description, when there is one.
pub(crate) fn first_description_line(item: &DocItem) -> Option<&str> {
    item.component
        .as_ref()
        .and_then(|meta| meta.description.lines().next())
        .map(str::trim)
        .filter(|line| !line.is_empty())
}
