//! DOM traversal and Markdown block assembly.

use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

use crate::codeblock;
use crate::table;

/// Render an HTML fragment to Markdown.
pub fn render(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    block_children(fragment.root_element().children()).join("\n\n")
}

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "figure", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre",
    "section", "table", "ul",
];

/// Elements with no useful plain-text representation.
const DROPPED_ELEMENTS: &[&str] = &["button", "img", "script", "style"];

fn is_block(name: &str) -> bool {
    BLOCK_ELEMENTS.contains(&name)
}

fn is_dropped(name: &str) -> bool {
    DROPPED_ELEMENTS.contains(&name)
}

/// Render a sequence of sibling nodes into Markdown blocks.
///
/// Consecutive inline content is gathered into an implicit paragraph; block
/// elements flush the gathered run and contribute their own blocks.
pub(crate) fn block_children<'a, I>(nodes: I) -> Vec<String>
where
    I: Iterator<Item = NodeRef<'a, Node>>,
{
    let mut blocks = Vec::new();
    let mut run = String::new();

    for node in nodes {
        match node.value() {
            Node::Text(text) => run.push_str(&collapse_whitespace(text)),
            Node::Element(element) if is_block(element.name()) => {
                flush_run(&mut run, &mut blocks);
                if let Some(el) = ElementRef::wrap(node) {
                    let rendered = render_block(el);
                    if !rendered.is_empty() {
                        blocks.push(rendered);
                    }
                }
            }
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(node) {
                    run.push_str(&render_inline_element(el));
                }
            }
            _ => {}
        }
    }

    flush_run(&mut run, &mut blocks);
    blocks
}

fn flush_run(run: &mut String, blocks: &mut Vec<String>) {
    let text = normalize_inline(run);
    if !text.is_empty() {
        blocks.push(text);
    }
    run.clear();
}

fn render_block(el: ElementRef<'_>) -> String {
    match el.value().name() {
        name @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
            let level = name[1..].parse::<usize>().unwrap_or(1);
            let text = inline_children(el);
            if text.is_empty() {
                String::new()
            } else {
                format!("{} {}", "#".repeat(level), text)
            }
        }
        "p" => inline_children(el),
        "hr" => "---".to_string(),
        "pre" => codeblock::render_pre(el),
        "blockquote" => quote(block_children(el.children()).join("\n\n")),
        "ul" => render_list(el, false),
        "ol" => render_list(el, true),
        "table" => table::render_table(el),
        // div, section, and the rest of the structural containers are
        // transparent: their children form blocks of their own.
        _ => block_children(el.children()).join("\n\n"),
    }
}

fn render_inline_element(el: ElementRef<'_>) -> String {
    let name = el.value().name();
    if is_dropped(name) {
        return String::new();
    }
    match name {
        "a" => render_anchor(el),
        "em" | "i" => wrap(&inline_children(el), "_"),
        "strong" | "b" => wrap(&inline_children(el), "**"),
        "del" | "s" | "strike" => wrap(&inline_children(el), "~~"),
        "code" => inline_code(el),
        "br" => "\n".to_string(),
        "input" => String::new(),
        _ => inline_children(el),
    }
}

/// Inline content of an element, whitespace-collapsed and trimmed.
fn inline_children(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.children() {
        match node.value() {
            Node::Text(text) => out.push_str(&collapse_whitespace(text)),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(node) {
                    out.push_str(&render_inline_element(child));
                }
            }
            _ => {}
        }
    }
    normalize_inline(&out)
}

/// Anchors that only make sense inside the original page are dropped:
/// no href, same-page fragment refs, and hidden/non-focusable elements.
fn render_anchor(el: ElementRef<'_>) -> String {
    let value = el.value();
    let hidden = value.attr("hidden").is_some()
        || value.attr("aria-hidden") == Some("true")
        || value.attr("tabindex") == Some("-1");
    let href = match value.attr("href") {
        Some(href) if !href.is_empty() && !href.starts_with('#') && !hidden => href,
        _ => return String::new(),
    };
    let text = inline_children(el);
    if text.is_empty() {
        String::new()
    } else {
        format!("[{}]({})", text, href)
    }
}

fn inline_code(el: ElementRef<'_>) -> String {
    let text: String = el.text().collect();
    let text = text.trim();
    if text.is_empty() {
        String::new()
    } else {
        format!("`{}`", text)
    }
}

fn wrap(text: &str, marker: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}{}{}", marker, trimmed, marker)
    }
}

fn quote(inner: String) -> String {
    if inner.is_empty() {
        return String::new();
    }
    inner
        .lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_list(el: ElementRef<'_>, ordered: bool) -> String {
    let mut items = Vec::new();
    let mut index = 1usize;

    for node in el.children() {
        if let Some(li) = ElementRef::wrap(node) {
            if li.value().name() != "li" {
                continue;
            }
            let marker = if ordered {
                format!("{}. ", index)
            } else {
                "- ".to_string()
            };
            index += 1;

            let check = task_marker(li).unwrap_or("");
            let body = block_children(li.children()).join("\n\n");
            let mut lines = body.lines();
            let first = lines.next().unwrap_or("");

            let mut item = format!("{}{}{}", marker, check, first);
            for line in lines {
                item.push('\n');
                if !line.is_empty() {
                    item.push_str("  ");
                    item.push_str(line);
                }
            }
            items.push(item);
        }
    }

    items.join("\n")
}

/// GFM task-list marker when the item wraps a checkbox input.
fn task_marker(li: ElementRef<'_>) -> Option<&'static str> {
    for node in li.descendants() {
        if let Some(el) = ElementRef::wrap(node) {
            if el.value().name() == "input" && el.value().attr("type") == Some("checkbox") {
                return Some(if el.value().attr("checked").is_some() {
                    "[x] "
                } else {
                    "[ ] "
                });
            }
        }
    }
    None
}

/// Collapse every whitespace run (including source newlines) to a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

/// Collapse space runs while preserving explicit line breaks, then trim.
fn normalize_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c == '\n' {
            while out.ends_with(' ') {
                out.pop();
            }
            out.push('\n');
            pending_space = false;
        } else if c == ' ' {
            pending_space = !out.is_empty() && !out.ends_with('\n');
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    while out.ends_with('\n') || out.ends_with(' ') {
        out.pop();
    }
    out
}
