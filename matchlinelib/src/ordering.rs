//! Comparison and sorting of schema-less records.
//!
//! The comparator is lexicographic over an ordered list of key selectors:
//! the first key is the primary sort, later keys break ties only. A full
//! tie falls through to comparing the two records directly.
//!
//! Descending order is *not* per-key. A sort specification parsed from a
//! CLI string applies the leading `+`/`-` sigil of the **first** key to the
//! sign of the entire multi-key comparison: one flag flips everything.
//! That matches the observable behavior this tool has always had; per-key
//! direction would reorder mixed-direction sorts (see DESIGN.md).

use std::cmp::Ordering;

use serde_json::Value;

use crate::error::MatchlineError;
use crate::path::{self, Path};
use crate::Result;

/// Deterministic total order over JSON values.
///
/// Values of different types order by type rank:
/// Null < Bool < Number < String < Array < Object. Within a type: booleans
/// false < true, numbers by `f64` total order, strings by byte order,
/// arrays elementwise then by length. Objects are incomparable without
/// keys and compare Equal to each other; a stable sort preserves their
/// insertion order. No string-to-number coercion is performed.
pub fn value_cmp(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (xi, yi) in x.iter().zip(y.iter()) {
                match value_cmp(xi, yi) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(_), Value::Object(_)) => Ordering::Equal,
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Derives a sortable value from a record: a dotted path resolved through
/// the record, or an arbitrary extractor function.
pub enum KeySelector {
    /// Resolve a property path; absent or untraversable paths extract Null
    Path(Path),
    /// Compute the key from the whole record. `Send + Sync` so sort
    /// criteria can live inside async request handlers.
    Extractor(Box<dyn Fn(&Value) -> Value + Send + Sync>),
}

impl KeySelector {
    /// Parse a dotted path string into a path selector.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(KeySelector::Path(Path::parse(s)?))
    }

    fn extract(&self, record: &Value) -> Value {
        match self {
            KeySelector::Path(p) => path::get(record, p)
                .ok()
                .flatten()
                .cloned()
                .unwrap_or(Value::Null),
            KeySelector::Extractor(f) => f(record),
        }
    }
}

/// Lexicographic multi-key comparison of two records.
///
/// Keys are evaluated left to right; the first differing extracted value
/// decides. If every key ties (or `keys` is empty) the records themselves
/// are compared with [`value_cmp`] as the final tiebreak.
pub fn compare(a: &Value, b: &Value, keys: &[KeySelector]) -> Ordering {
    for key in keys {
        let av = key.extract(a);
        let bv = key.extract(b);
        match value_cmp(&av, &bv) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    value_cmp(a, b)
}

/// A parsed sort specification: ordered keys plus a single global
/// direction flag taken from the first key's leading sigil.
pub struct SortSpec {
    /// Key selectors in priority order
    pub keys: Vec<KeySelector>,
    /// Flip the sign of the whole comparison
    pub descending: bool,
}

impl SortSpec {
    /// Parse a comma-separated key list such as `-startTime,matchNumber`.
    ///
    /// A leading `+` or `-` on the *first* key sets the direction for the
    /// entire comparison; sigils are not recognized on later keys.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(MatchlineError::InvalidSortSpec(s.to_string()));
        }
        let mut keys = Vec::new();
        let mut descending = false;
        for (i, raw) in s.split(',').enumerate() {
            let key = if i == 0 {
                match raw.strip_prefix('-') {
                    Some(rest) => {
                        descending = true;
                        rest
                    }
                    None => raw.strip_prefix('+').unwrap_or(raw),
                }
            } else {
                raw
            };
            if key.is_empty() {
                return Err(MatchlineError::InvalidSortSpec(s.to_string()));
            }
            keys.push(KeySelector::parse(key)?);
        }
        Ok(SortSpec { keys, descending })
    }

    /// Compare two records under this specification, direction applied.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let ord = compare(a, b, &self.keys);
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

/// How to order a collection: a ready-made comparator, a key list, or a
/// parsed sort specification.
pub enum SortCriteria {
    /// Two-argument comparator applied directly
    Comparator(Box<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>),
    /// Multi-key comparison via [`compare`], ascending
    Keys(Vec<KeySelector>),
    /// Keys plus the global direction flag
    Spec(SortSpec),
}

impl SortCriteria {
    fn cmp(&self, a: &Value, b: &Value) -> Ordering {
        match self {
            SortCriteria::Comparator(f) => f(a, b),
            SortCriteria::Keys(keys) => compare(a, b, keys),
            SortCriteria::Spec(spec) => spec.compare(a, b),
        }
    }
}

/// Sort a collection in place.
///
/// The sort is stable: records with tied keys keep their original relative
/// order, which also makes sorting idempotent.
pub fn sort_records(records: &mut [Value], criteria: &SortCriteria) {
    records.sort_by(|a, b| criteria.cmp(a, b));
}

/// Copy-on-write variant of [`sort_records`]: the source is unmodified.
pub fn sorted_records(records: &[Value], criteria: &SortCriteria) -> Vec<Value> {
    let mut copy = records.to_vec();
    sort_records(&mut copy, criteria);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matches() -> Vec<Value> {
        vec![
            json!({ "matchNumber": 3, "field": "A", "startTime": "2024-01-01T11:00:00Z" }),
            json!({ "matchNumber": 1, "field": "B", "startTime": "2024-01-01T10:00:00Z" }),
            json!({ "matchNumber": 2, "field": "A", "startTime": "2024-01-01T10:00:00Z" }),
        ]
    }

    fn numbers(records: &[Value]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r["matchNumber"].as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_value_cmp_within_types() {
        assert_eq!(value_cmp(&json!(1), &json!(2)), Ordering::Less);
        assert_eq!(value_cmp(&json!("a"), &json!("b")), Ordering::Less);
        assert_eq!(value_cmp(&json!(true), &json!(false)), Ordering::Greater);
        assert_eq!(value_cmp(&json!(1.5), &json!(1.5)), Ordering::Equal);
    }

    #[test]
    fn test_value_cmp_cross_type_rank() {
        assert_eq!(value_cmp(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(value_cmp(&json!(9), &json!("1")), Ordering::Less);
        assert_eq!(value_cmp(&json!("z"), &json!([])), Ordering::Less);
    }

    #[test]
    fn test_objects_compare_equal() {
        assert_eq!(
            value_cmp(&json!({ "a": 1 }), &json!({ "b": 2 })),
            Ordering::Equal
        );
    }

    #[test]
    fn test_single_key_sort() {
        let mut records = matches();
        let spec = SortSpec::parse("matchNumber").unwrap();
        sort_records(&mut records, &SortCriteria::Spec(spec));
        assert_eq!(numbers(&records), vec![1, 2, 3]);
    }

    #[test]
    fn test_multi_key_tiebreak() {
        let mut records = matches();
        let spec = SortSpec::parse("startTime,field").unwrap();
        sort_records(&mut records, &SortCriteria::Spec(spec));
        // ties on startTime break on field: A before B
        assert_eq!(numbers(&records), vec![2, 1, 3]);
    }

    #[test]
    fn test_leading_sigil_flips_whole_comparison() {
        let mut records = matches();
        let spec = SortSpec::parse("-startTime,field").unwrap();
        assert!(spec.descending);
        sort_records(&mut records, &SortCriteria::Spec(spec));
        // global inversion: the field tiebreak is reversed too
        assert_eq!(numbers(&records), vec![3, 1, 2]);
    }

    #[test]
    fn test_plus_sigil_is_ascending() {
        let spec = SortSpec::parse("+matchNumber").unwrap();
        assert!(!spec.descending);
    }

    #[test]
    fn test_sort_stability() {
        let mut records = matches();
        let spec = SortSpec::parse("startTime").unwrap();
        sort_records(&mut records, &SortCriteria::Spec(spec));
        // 1 and 2 tie on startTime; insertion order (3-list order 1 then 2)
        assert_eq!(numbers(&records), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_idempotence() {
        let spec = || SortCriteria::Spec(SortSpec::parse("startTime,matchNumber").unwrap());
        let once = sorted_records(&matches(), &spec());
        let twice = sorted_records(&once, &spec());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sorted_records_leaves_source_unmodified() {
        let records = matches();
        let spec = SortSpec::parse("matchNumber").unwrap();
        let sorted = sorted_records(&records, &SortCriteria::Spec(spec));
        assert_eq!(numbers(&records), vec![3, 1, 2]);
        assert_eq!(numbers(&sorted), vec![1, 2, 3]);
    }

    #[test]
    fn test_extractor_selector() {
        let mut records = matches();
        let keys = vec![KeySelector::Extractor(Box::new(|r| {
            // negate to sort descending through an extractor
            json!(-r["matchNumber"].as_i64().unwrap_or(0))
        }))];
        sort_records(&mut records, &SortCriteria::Keys(keys));
        assert_eq!(numbers(&records), vec![3, 2, 1]);
    }

    #[test]
    fn test_missing_key_extracts_null() {
        let mut records = vec![json!({ "a": 1 }), json!({})];
        let keys = vec![KeySelector::parse("a").unwrap()];
        sort_records(&mut records, &SortCriteria::Keys(keys));
        // Null ranks below numbers
        assert_eq!(records[0], json!({}));
    }

    #[test]
    fn test_heterogeneous_types_never_fault() {
        let mut records = vec![json!({ "k": "5" }), json!({ "k": 10 }), json!({ "k": null })];
        let keys = vec![KeySelector::parse("k").unwrap()];
        sort_records(&mut records, &SortCriteria::Keys(keys));
        // deterministic: null, then number, then string
        assert_eq!(records[0]["k"], json!(null));
        assert_eq!(records[1]["k"], json!(10));
        assert_eq!(records[2]["k"], json!("5"));
    }

    #[test]
    fn test_sort_criteria_usable_across_threads() {
        // sort criteria are held across awaits in the server handlers
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KeySelector>();
        assert_send_sync::<SortSpec>();
        assert_send_sync::<SortCriteria>();
    }

    #[test]
    fn test_invalid_specs() {
        assert!(SortSpec::parse("").is_err());
        assert!(SortSpec::parse("-").is_err());
        assert!(SortSpec::parse("a,,b").is_err());
    }
}
