//! Fenced code block emission for `<pre>` elements.

use scraper::ElementRef;

/// Render a `<pre>` element as a fenced code block.
///
/// The language tag is taken from the first `language-*` class found on the
/// element or any descendant. Content that already starts with a fence is
/// passed through unchanged so nested renderers don't double-fence it.
pub fn render_pre(el: ElementRef<'_>) -> String {
    let text: String = el.text().collect();
    let trimmed = text.trim();

    if trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let language = detect_language(el).unwrap_or_default();
    format!("```{}\n{}\n```", language, trimmed)
}

/// Find a `language-<name>` class token on the element or its descendants.
pub fn detect_language(el: ElementRef<'_>) -> Option<String> {
    for node in el.descendants() {
        if let Some(descendant) = ElementRef::wrap(node) {
            for class in descendant.value().classes() {
                if let Some(name) = class.strip_prefix("language-") {
                    if !name.is_empty() {
                        return Some(name.to_string());
                    }
                }
            }
        }
    }
    None
}
