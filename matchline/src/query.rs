//! Shared query pipeline: sort and project raw record collections the
//! same way for terminal output and HTTP pages.

use anyhow::{Context, Result};
use matchlinelib::ordering::{sort_records, SortCriteria, SortSpec};
use matchlinelib::path::Path;
use matchlinelib::project::{project, project_paths};
use serde_json::Value;

/// Parsed selection/sort criteria from CLI flags or URL query params.
#[derive(Default)]
pub struct QueryOptions {
    /// Dotted paths to include, in request order
    pub props: Option<Vec<String>>,
    /// Top-level keys to drop
    pub exclude: Option<Vec<String>>,
    /// Sort keys; leading +/- on the first key flips the whole comparison
    pub sort: Option<SortSpec>,
}

impl QueryOptions {
    /// Build from the raw comma-delimited strings the CLI/server receive.
    pub fn parse(
        props: Option<&str>,
        exclude: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self> {
        let sort = match sort {
            Some(s) => Some(SortSpec::parse(s).with_context(|| format!("bad sort key: {}", s))?),
            None => None,
        };
        Ok(QueryOptions {
            props: props.map(split_list),
            exclude: exclude.map(split_list),
            sort,
        })
    }

    /// Sort, then project, returning the transformed collection.
    pub fn apply(self, mut records: Vec<Value>) -> Result<Vec<Value>> {
        if let Some(spec) = self.sort {
            sort_records(&mut records, &SortCriteria::Spec(spec));
        }
        if let Some(props) = &self.props {
            let paths = props
                .iter()
                .map(|p| Path::parse(p).with_context(|| format!("bad property path: {}", p)))
                .collect::<Result<Vec<_>>>()?;
            records = records
                .iter()
                .map(|r| project_paths(r, &paths).with_context(|| "projection failed"))
                .collect::<Result<Vec<_>>>()?;
        } else if let Some(excluded) = &self.exclude {
            records = records.iter().map(|r| project(r, excluded, true)).collect();
        }
        Ok(records)
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({ "matchNumber": 2, "field": "A", "startTime": "2024-01-01T10:00:00Z" }),
            json!({ "matchNumber": 1, "field": "B", "startTime": "2024-01-01T09:00:00Z" }),
        ]
    }

    #[test]
    fn test_sort_then_project() {
        let opts = QueryOptions::parse(Some("matchNumber"), None, Some("startTime")).unwrap();
        let out = opts.apply(records()).unwrap();
        assert_eq!(out[0], json!({ "matchNumber": 1 }));
        assert_eq!(out[1], json!({ "matchNumber": 2 }));
    }

    #[test]
    fn test_exclude_projection() {
        let opts = QueryOptions::parse(None, Some("field,startTime"), None).unwrap();
        let out = opts.apply(records()).unwrap();
        assert_eq!(out[0], json!({ "matchNumber": 2 }));
    }

    #[test]
    fn test_props_win_over_exclude() {
        let opts =
            QueryOptions::parse(Some("matchNumber"), Some("matchNumber"), None).unwrap();
        let out = opts.apply(records()).unwrap();
        assert_eq!(out[0], json!({ "matchNumber": 2 }));
    }

    #[test]
    fn test_descending_sigil() {
        let opts = QueryOptions::parse(None, None, Some("-matchNumber")).unwrap();
        let out = opts.apply(records()).unwrap();
        assert_eq!(out[0]["matchNumber"], json!(2));
    }

    #[test]
    fn test_bad_inputs_error() {
        assert!(QueryOptions::parse(None, None, Some("")).is_err());
        let opts = QueryOptions::parse(Some("a..b"), None, None).unwrap();
        assert!(opts.apply(records()).is_err());
    }
}
