//! Nested list rendering (plain text).

use serde_json::Value;

use crate::label::id_to_word;
use crate::render::leaf::leaf_text;

/// Two spaces per nesting level. A formatting constant, not configurable.
const INDENT: &str = "  ";

/// Render a record or sequence as an indented nested list.
///
/// Object entries render as `- Label: value`; nested containers are
/// prefixed with a newline and recursed one level deeper. Sequences render
/// as `* ` bullets. Empty objects and sequences render the literal
/// `"none"`. When given, `properties` filters the top level only: object
/// keys by name, sequence elements by stringified index.
pub fn render_list(value: &Value, properties: Option<&[String]>) -> String {
    render_value(value, properties, 0, false)
}

fn render_value(
    value: &Value,
    properties: Option<&[String]>,
    indent: usize,
    skip_first_indent: bool,
) -> String {
    match value {
        Value::Array(items) => render_sequence(items, properties, indent, skip_first_indent),
        Value::Object(_) => render_record(value, properties, indent, skip_first_indent),
        leaf => leaf_text(leaf),
    }
}

fn render_sequence(
    items: &[Value],
    properties: Option<&[String]>,
    indent: usize,
    skip_first_indent: bool,
) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| selected(properties, &i.to_string()))
        .enumerate()
        .map(|(line, (_, item))| {
            let prefix = if skip_first_indent && line == 0 {
                String::new()
            } else {
                INDENT.repeat(indent)
            };
            // bullet items hug the bullet: first line of a nested value
            // continues on the same line
            format!("{}* {}", prefix, render_value(item, None, indent + 1, true))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_record(
    record: &Value,
    properties: Option<&[String]>,
    indent: usize,
    skip_first_indent: bool,
) -> String {
    let map = match record.as_object() {
        Some(map) => map,
        None => return leaf_text(record),
    };
    if map.is_empty() {
        return "none".to_string();
    }
    map.iter()
        .filter(|(key, _)| selected(properties, key))
        .enumerate()
        .map(|(line, (key, value))| {
            let prefix = if skip_first_indent && line == 0 {
                String::new()
            } else {
                INDENT.repeat(indent)
            };
            let rendered = match value {
                Value::Object(_) | Value::Array(_) => {
                    format!("\n{}", render_value(value, None, indent + 1, false))
                }
                leaf => leaf_text(leaf),
            };
            format!("{}- {}: {}", prefix, id_to_word(key), rendered)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn selected(properties: Option<&[String]>, key: &str) -> bool {
    match properties {
        None => true,
        Some(allowed) => allowed.iter().any(|p| p == key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_record() {
        let record = json!({ "gameName": "Crescendo", "eventCount": 192 });
        assert_eq!(
            render_list(&record, None),
            "- Game Name: Crescendo\n- Event Count: 192"
        );
    }

    #[test]
    fn test_empty_collection_sentinel() {
        assert_eq!(render_list(&json!([]), None), "none");
        assert_eq!(render_list(&json!({}), None), "none");
    }

    #[test]
    fn test_sequence_bullets() {
        let list = json!(["CMPTX", "NECMP"]);
        assert_eq!(render_list(&list, None), "* CMPTX\n* NECMP");
    }

    #[test]
    fn test_nested_record_indents() {
        let record = json!({ "name": "Einstein", "venue": { "city": "Houston" } });
        assert_eq!(
            render_list(&record, None),
            "- Name: Einstein\n- Venue: \n  - City: Houston"
        );
    }

    #[test]
    fn test_nested_sequence_of_records() {
        let record = json!({ "championships": [ { "name": "FIRST" } ] });
        assert_eq!(
            render_list(&record, None),
            "- Championships: \n  * - Name: FIRST"
        );
    }

    #[test]
    fn test_property_filter_on_records() {
        let record = json!({ "name": "Einstein", "city": "Houston", "country": "USA" });
        let props = vec!["name".to_string(), "city".to_string()];
        assert_eq!(
            render_list(&record, Some(&props)),
            "- Name: Einstein\n- City: Houston"
        );
    }

    #[test]
    fn test_numeric_index_filter_on_sequences() {
        let list = json!(["a", "b", "c"]);
        let props = vec!["0".to_string(), "2".to_string()];
        assert_eq!(render_list(&list, Some(&props)), "* a\n* c");
    }

    #[test]
    fn test_timestamp_leaf_formatting() {
        let record = json!({ "kickoff": "2024-01-06T17:00:00Z" });
        assert_eq!(render_list(&record, None), "- Kickoff: Sat Jan 06 17:00");
    }
}
