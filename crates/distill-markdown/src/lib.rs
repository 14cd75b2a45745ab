//! Rule-based HTML to Markdown renderer.
//!
//! Converts fragments of rendered documentation pages into readable Markdown.
//! The rule set is fixed: ATX headings, `-` bullets, `---` rules, fenced code
//! blocks, `_` emphasis, `**` strong, inline links, and the GFM extensions for
//! strikethrough, tables, and task lists. Output is best-effort readable
//! Markdown, not a lossless round trip.

pub mod codeblock;
pub mod renderer;
pub mod table;

pub use renderer::render;
