//! GFM pipe tables.

use scraper::ElementRef;

use crate::renderer;

/// Render a `<table>` element as a GFM pipe table.
///
/// The first `<th>` row becomes the header; a table without one gets an
/// empty header row so the delimiter line still parses as a table.
pub fn render_table(el: ElementRef<'_>) -> String {
    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut width = 0usize;

    for node in el.descendants() {
        if let Some(tr) = ElementRef::wrap(node) {
            if tr.value().name() != "tr" {
                continue;
            }
            let mut cells = Vec::new();
            let mut has_header_cell = false;
            for cell_node in tr.children() {
                if let Some(cell) = ElementRef::wrap(cell_node) {
                    match cell.value().name() {
                        "th" => {
                            has_header_cell = true;
                            cells.push(cell_text(cell));
                        }
                        "td" => cells.push(cell_text(cell)),
                        _ => {}
                    }
                }
            }
            if cells.is_empty() {
                continue;
            }
            width = width.max(cells.len());
            if has_header_cell && header.is_none() && rows.is_empty() {
                header = Some(cells);
            } else {
                rows.push(cells);
            }
        }
    }

    if width == 0 {
        return String::new();
    }

    let header = header.unwrap_or_else(|| vec![String::new(); width]);
    let delimiter = vec!["---".to_string(); width];

    let mut out = row_line(&header, width);
    out.push('\n');
    out.push_str(&row_line(&delimiter, width));
    for row in &rows {
        out.push('\n');
        out.push_str(&row_line(row, width));
    }
    out
}

fn row_line(cells: &[String], width: usize) -> String {
    let mut padded = cells.to_vec();
    padded.resize(width, String::new());
    format!("| {} |", padded.join(" | "))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    renderer::block_children(cell.children())
        .join(" ")
        .replace('\n', " ")
}
