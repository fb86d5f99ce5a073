//! Field projection: derive records containing a subset of another
//! record's fields.
//!
//! Two shapes are supported, matching the two query styles the CLI and
//! server expose:
//!
//! - [`project`] filters *top-level* keys by name (include or exclude).
//!   Filtering is shallow: nested values are cloned whole, never
//!   deep-filtered.
//! - [`project_paths`] resolves dotted paths through the record and builds
//!   a flat record keyed by the path string, the shape used when columns
//!   are requested as `teams.0.teamNumber`-style selections.

use serde_json::{Map, Value};

use crate::path::{self, Path};
use crate::Result;

/// Build a new record from `record`'s top-level fields.
///
/// With `exclude = false` the result contains only the keys named in
/// `fields` that exist on the record; with `exclude = true` it contains
/// every key *not* named. A requested key that is absent yields an absent
/// key in the result, not an error. Non-object input yields an empty
/// object. `record` is not mutated.
pub fn project(record: &Value, fields: &[String], exclude: bool) -> Value {
    let mut result = Map::new();
    if let Value::Object(map) = record {
        for (key, value) in map {
            let listed = fields.iter().any(|f| f == key);
            if exclude != listed {
                result.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(result)
}

/// Build a flat record by resolving each dotted path against `record`.
///
/// Keys of the result are the dotted path strings themselves. A path whose
/// terminal segment is absent is omitted from the result; a path that
/// fails on an intermediate segment is a traversal error.
pub fn project_paths(record: &Value, paths: &[Path]) -> Result<Value> {
    let mut result = Map::new();
    for p in paths {
        if let Some(value) = path::get(record, p)? {
            result.insert(p.to_string(), value.clone());
        }
    }
    Ok(Value::Object(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "code": "CMPTX",
            "name": "Einstein Field",
            "city": "Houston",
            "venue": { "name": "GRB" }
        })
    }

    #[test]
    fn test_include_projection() {
        let record = sample();
        let out = project(&record, &["name".into(), "city".into()], false);
        assert_eq!(out, json!({ "name": "Einstein Field", "city": "Houston" }));
    }

    #[test]
    fn test_exclude_projection() {
        let record = sample();
        let out = project(&record, &["venue".into(), "code".into()], true);
        assert_eq!(out, json!({ "name": "Einstein Field", "city": "Houston" }));
    }

    #[test]
    fn test_projection_complement() {
        let record = sample();
        let fields = vec!["code".into(), "venue".into()];
        let included = project(&record, &fields, false);
        let excluded = project(&record, &fields, true);

        let mut keys: Vec<String> = included
            .as_object()
            .unwrap()
            .keys()
            .chain(excluded.as_object().unwrap().keys())
            .cloned()
            .collect();
        keys.sort();
        let mut all: Vec<String> = record.as_object().unwrap().keys().cloned().collect();
        all.sort();
        assert_eq!(keys, all);
        for key in included.as_object().unwrap().keys() {
            assert!(!excluded.as_object().unwrap().contains_key(key));
        }
    }

    #[test]
    fn test_missing_key_is_not_an_error() {
        let record = sample();
        let out = project(&record, &["nope".into()], false);
        assert_eq!(out, json!({}));
    }

    #[test]
    fn test_shallow_nested_copied_by_value() {
        let record = sample();
        let out = project(&record, &["venue".into()], false);
        assert_eq!(out, json!({ "venue": { "name": "GRB" } }));
    }

    #[test]
    fn test_non_object_yields_empty() {
        assert_eq!(project(&json!([1, 2]), &["a".into()], false), json!({}));
        assert_eq!(project(&json!(7), &[], true), json!({}));
    }

    #[test]
    fn test_project_paths() {
        let record = sample();
        let paths = vec![
            Path::parse("name").unwrap(),
            Path::parse("venue.name").unwrap(),
            Path::parse("venue.hall").unwrap(), // absent terminal: omitted
        ];
        let out = project_paths(&record, &paths).unwrap();
        assert_eq!(
            out,
            json!({ "name": "Einstein Field", "venue.name": "GRB" })
        );
    }

    #[test]
    fn test_project_paths_intermediate_failure() {
        let record = sample();
        let paths = vec![Path::parse("city.zip").unwrap()];
        assert!(project_paths(&record, &paths).is_err());
    }
}
