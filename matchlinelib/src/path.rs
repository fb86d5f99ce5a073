//! Property paths: addressing locations inside schema-less JSON records.
//!
//! A [`Path`] is a non-empty ordered sequence of segments (object keys or
//! array indices) parsed from a dotted string such as `"teams.0.station"`.
//! The accessor functions traverse a [`serde_json::Value`] graph with a
//! single, consistent failure rule:
//!
//! - traversing *through* null, a scalar, or a missing intermediate
//!   container is an error ([`MatchlineError::PathTraversal`]);
//! - absence of the *final* segment only is not an error: `get` returns
//!   `Ok(None)`, `has` returns `Ok(false)`, `delete` returns `Ok(None)`.
//!
//! Silent `null` propagation through intermediate segments would surface as
//! misleading blank table cells, so it faults instead.

use serde_json::Value;

use crate::error::MatchlineError;
use crate::Result;

/// One step of a property path: an object key or an array index.
///
/// Parsing treats any all-digit segment as an index; object keys that
/// happen to be numeric strings are not addressable through dotted paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object key
    Key(String),
    /// Array index (non-negative)
    Index(usize),
}

impl Segment {
    /// The segment as it appears in a dotted path string.
    pub fn as_str(&self) -> String {
        match self {
            Segment::Key(k) => k.clone(),
            Segment::Index(i) => i.to_string(),
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Key(k) => write!(f, "{}", k),
            Segment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// A non-empty ordered sequence of segments addressing a location in a
/// record graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Build a path from pre-split segments. Errors if `segments` is empty.
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(MatchlineError::EmptyPath(String::new()));
        }
        Ok(Path { segments })
    }

    /// Single-segment path for a plain object key.
    pub fn key(key: impl Into<String>) -> Self {
        Path {
            segments: vec![Segment::Key(key.into())],
        }
    }

    /// Parse a dotted path string. All-digit segments become indices.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(MatchlineError::EmptyPath(s.to_string()));
        }
        let mut segments = Vec::new();
        for part in s.split('.') {
            if part.is_empty() {
                return Err(MatchlineError::EmptyPath(s.to_string()));
            }
            if part.bytes().all(|b| b.is_ascii_digit()) {
                // usize overflow on absurd indices falls back to a key
                match part.parse::<usize>() {
                    Ok(i) => segments.push(Segment::Index(i)),
                    Err(_) => segments.push(Segment::Key(part.to_string())),
                }
            } else {
                segments.push(Segment::Key(part.to_string()));
            }
        }
        Ok(Path { segments })
    }

    /// The segments in traversal order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// All segments except the last, and the last segment.
    fn split_last(&self) -> (&[Segment], &Segment) {
        let (last, init) = self
            .segments
            .split_last()
            .expect("Path is never empty by construction");
        (init, last)
    }
}

impl std::str::FromStr for Path {
    type Err = MatchlineError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .segments
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", joined)
    }
}

/// Describe a value's container kind for traversal error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn traversal_error(path: &Path, segment: &Segment, reason: String) -> MatchlineError {
    MatchlineError::PathTraversal {
        path: path.to_string(),
        segment: segment.as_str(),
        reason,
    }
}

/// Step one segment into a container; errors if `value` cannot contain it.
fn step<'a>(value: &'a Value, path: &Path, segment: &Segment) -> Result<Option<&'a Value>> {
    match (value, segment) {
        (Value::Object(map), Segment::Key(k)) => Ok(map.get(k)),
        (Value::Array(items), Segment::Index(i)) => Ok(items.get(*i)),
        (Value::Array(_), Segment::Key(k)) => Err(traversal_error(
            path,
            segment,
            format!("arrays are indexed by number, got key '{}'", k),
        )),
        (Value::Object(_), Segment::Index(i)) => Err(traversal_error(
            path,
            segment,
            format!("objects are keyed by string, got index {}", i),
        )),
        (other, _) => Err(traversal_error(
            path,
            segment,
            format!("value is {}, not a container", kind_of(other)),
        )),
    }
}

/// Walk all segments in `init`, faulting if any is absent or lands on a
/// non-container.
fn walk<'a>(root: &'a Value, path: &Path, init: &[Segment]) -> Result<&'a Value> {
    let mut current = root;
    for segment in init {
        current = step(current, path, segment)?
            .ok_or_else(|| traversal_error(path, segment, "missing intermediate key".into()))?;
    }
    Ok(current)
}

/// Mutable variant of [`walk`].
fn walk_mut<'a>(root: &'a mut Value, path: &Path, init: &[Segment]) -> Result<&'a mut Value> {
    let mut current = root;
    for segment in init {
        current = match (current, segment) {
            (Value::Object(map), Segment::Key(k)) => map
                .get_mut(k)
                .ok_or_else(|| traversal_error(path, segment, "missing intermediate key".into()))?,
            (Value::Array(items), Segment::Index(i)) => items
                .get_mut(*i)
                .ok_or_else(|| traversal_error(path, segment, "index out of bounds".into()))?,
            (other, _) => {
                // Reuse the immutable step for the error message
                step(other, path, segment)?;
                return Err(traversal_error(path, segment, "missing intermediate key".into()));
            }
        };
    }
    Ok(current)
}

/// Resolve `path` within `record`.
///
/// `Ok(None)` means every intermediate segment resolved but the final one
/// is absent; an intermediate failure is an error.
pub fn get<'a>(record: &'a Value, path: &Path) -> Result<Option<&'a Value>> {
    let (init, last) = path.split_last();
    let container = walk(record, path, init)?;
    step(container, path, last)
}

/// Assign `value` at `path`, traversing all but the last segment.
///
/// Inserts the terminal key if absent (objects); for arrays the terminal
/// index must be in bounds.
pub fn set(record: &mut Value, path: &Path, value: Value) -> Result<()> {
    let (init, last) = path.split_last();
    let container = walk_mut(record, path, init)?;
    match (container, last) {
        (Value::Object(map), Segment::Key(k)) => {
            map.insert(k.clone(), value);
            Ok(())
        }
        (Value::Array(items), Segment::Index(i)) => {
            if *i < items.len() {
                items[*i] = value;
                Ok(())
            } else {
                Err(traversal_error(path, last, "index out of bounds".into()))
            }
        }
        (other, _) => step(other, path, last).map(|_| ()),
    }
}

/// Remove the entry at `path`, returning the removed value.
///
/// `Ok(None)` if the terminal segment was already absent.
pub fn delete(record: &mut Value, path: &Path) -> Result<Option<Value>> {
    let (init, last) = path.split_last();
    let container = walk_mut(record, path, init)?;
    match (container, last) {
        (Value::Object(map), Segment::Key(k)) => Ok(map.remove(k)),
        (Value::Array(items), Segment::Index(i)) => {
            if *i < items.len() {
                Ok(Some(items.remove(*i)))
            } else {
                Ok(None)
            }
        }
        (other, _) => step(other, path, last).map(|_| None),
    }
}

/// Report whether the entry at `path` exists.
pub fn has(record: &Value, path: &Path) -> Result<bool> {
    Ok(get(record, path)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "Einstein Field",
            "city": "Houston",
            "teams": [
                { "teamNumber": 254, "station": "Red1" },
                { "teamNumber": 1678, "station": "Red2" }
            ],
            "venue": { "name": "GRB", "hall": null }
        })
    }

    #[test]
    fn test_parse_dotted_path() {
        let path = Path::parse("teams.0.station").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("teams".into()),
                Segment::Index(0),
                Segment::Key("station".into())
            ]
        );
        assert_eq!(path.to_string(), "teams.0.station");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Path::parse("").is_err());
        assert!(Path::parse("a..b").is_err());
        assert!(Path::parse(".a").is_err());
    }

    #[test]
    fn test_get_top_level_and_nested() {
        let record = sample();
        let v = get(&record, &Path::key("city")).unwrap();
        assert_eq!(v, Some(&json!("Houston")));

        let v = get(&record, &Path::parse("teams.1.teamNumber").unwrap()).unwrap();
        assert_eq!(v, Some(&json!(1678)));
    }

    #[test]
    fn test_get_missing_terminal_is_none() {
        let record = sample();
        assert_eq!(get(&record, &Path::key("country")).unwrap(), None);
        assert_eq!(
            get(&record, &Path::parse("venue.address").unwrap()).unwrap(),
            None
        );
    }

    #[test]
    fn test_get_missing_intermediate_faults() {
        let record = sample();
        let err = get(&record, &Path::parse("missing.name").unwrap()).unwrap_err();
        assert!(matches!(err, MatchlineError::PathTraversal { .. }));
    }

    #[test]
    fn test_get_through_scalar_faults() {
        let record = sample();
        // "city" is a string; stepping further must fault, not yield None
        assert!(get(&record, &Path::parse("city.name").unwrap()).is_err());
        // stepping through an explicit null faults too
        assert!(get(&record, &Path::parse("venue.hall.floor").unwrap()).is_err());
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut record = sample();
        let path = Path::parse("venue.hall").unwrap();
        set(&mut record, &path, json!("Hall C")).unwrap();
        assert_eq!(get(&record, &path).unwrap(), Some(&json!("Hall C")));

        let idx = Path::parse("teams.0.teamNumber").unwrap();
        set(&mut record, &idx, json!(118)).unwrap();
        assert_eq!(get(&record, &idx).unwrap(), Some(&json!(118)));
    }

    #[test]
    fn test_set_inserts_new_terminal_key() {
        let mut record = sample();
        set(&mut record, &Path::key("country"), json!("USA")).unwrap();
        assert_eq!(get(&record, &Path::key("country")).unwrap(), Some(&json!("USA")));
    }

    #[test]
    fn test_delete_then_has() {
        let mut record = sample();
        let path = Path::parse("venue.name").unwrap();
        assert!(has(&record, &path).unwrap());
        let removed = delete(&mut record, &path).unwrap();
        assert_eq!(removed, Some(json!("GRB")));
        assert!(!has(&record, &path).unwrap());
        // deleting again is not an error
        assert_eq!(delete(&mut record, &path).unwrap(), None);
    }

    #[test]
    fn test_delete_array_element() {
        let mut record = sample();
        let removed = delete(&mut record, &Path::parse("teams.0").unwrap()).unwrap();
        assert_eq!(removed.unwrap()["teamNumber"], json!(254));
        assert_eq!(record["teams"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_array_key_mismatch_faults() {
        let record = sample();
        assert!(get(&record, &Path::parse("teams.station").unwrap()).is_err());
    }
}
