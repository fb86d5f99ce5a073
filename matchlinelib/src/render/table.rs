//! Aligned box-drawing table rendering (plain text).

use serde_json::Value;

use crate::label::id_to_word;
use crate::render::leaf::leaf_text;

/// Union of all keys across `records` in first-seen order, filtered by the
/// allow-list when given. Records that are not objects contribute nothing.
pub fn column_union(records: &[Value], properties: Option<&[String]>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    match properties {
        None => columns,
        Some(allowed) => columns
            .into_iter()
            .filter(|c| allowed.iter().any(|p| p == c))
            .collect(),
    }
}

/// Render a collection of records as a box-drawing table.
///
/// Column widths are the maximum of the header label and every cell in the
/// column; cells are left-aligned and right-padded. A record lacking a
/// column renders an empty cell. Scalar cells go through the leaf
/// formatter, so timestamps are prettified here (unlike the HTML table).
/// An empty collection yields a degenerate header-less frame with no body
/// rows.
pub fn render_table(records: &[Value], properties: Option<&[String]>) -> String {
    let columns = column_union(records, properties);
    let headers: Vec<String> = columns.iter().map(|c| id_to_word(c)).collect();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| match record.get(column) {
                    Some(cell) => leaf_text(cell),
                    None => String::new(),
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let pad = |s: &str, w: usize| {
        let len = s.chars().count();
        format!("{}{}", s, " ".repeat(w.saturating_sub(len)))
    };
    let rule = |junction: &str| {
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join(&format!("─{}─", junction))
    };

    let header_row = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect::<Vec<_>>()
        .join(" │ ");

    let mut out = String::new();
    out.push_str(&format!("┌─{}─┐\n", rule("┬")));
    out.push_str(&format!("│ {} │\n", header_row));
    out.push_str(&format!("├─{}─┤\n", rule("┼")));
    for row in &rows {
        let body = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join(" │ ");
        out.push_str(&format!("│ {} │\n", body));
    }
    out.push_str(&format!("└─{}─┘", rule("┴")));
    out
}
