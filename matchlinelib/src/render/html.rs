//! HTML fragment rendering: definition lists and tables.
//!
//! Values are interpolated as raw stringified text, without the timestamp
//! prettifying the text renderers apply and without HTML escaping (the
//! upstream API is the only data source; see DESIGN.md).

use serde_json::Value;

use crate::label::id_to_word;
use crate::render::leaf::raw_text;
use crate::render::table::column_union;

/// Render a record as an HTML `<dl>` definition list.
///
/// Each entry becomes `<dt>Label</dt><dd>value</dd>`; nested containers
/// are emitted as compact JSON. Non-object input yields an empty `<dl>`.
pub fn html_list(record: &Value) -> String {
    let entries = match record.as_object() {
        Some(map) => map
            .iter()
            .map(|(key, value)| {
                format!("\t<dt>{}</dt><dd>{}</dd>", id_to_word(key), raw_text(value))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        None => String::new(),
    };
    format!("<dl>\n{}\n</dl>", entries)
}

/// Render a collection of records as an HTML `<table>`.
///
/// Header cells carry class `k-<rawKey>` with labelled text; body cells
/// carry class `v-<rawKey>` with raw stringified values. Columns are the
/// first-seen union of keys, filtered by the allow-list when given;
/// missing cells render empty.
pub fn html_table(records: &[Value], properties: Option<&[String]>) -> String {
    let columns = column_union(records, properties);

    let header_html = columns
        .iter()
        .map(|key| format!("\t\t<th class=\"k-{}\">{}</th>", key, id_to_word(key)))
        .collect::<Vec<_>>()
        .join("\n");

    let row_html = records
        .iter()
        .map(|record| {
            let cells = columns
                .iter()
                .map(|key| {
                    let text = record.get(key).map(raw_text).unwrap_or_default();
                    format!("\t\t<td class=\"v-{}\">{}</td>", key, text)
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("\t<tr>\n{}</tr>", cells)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<table><thead>\n\t<tr>\n{}\n\t</tr>\n</thead><tbody>\n{}\n</tbody></table>",
        header_html, row_html
    )
}
