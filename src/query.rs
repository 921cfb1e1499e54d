//! Query-string encoding for endpoint options.
//!
//! The Web API carries all parameters in the URL query string, for POST as
//! well as GET. Each options struct implements [`ToQuery`] explicitly rather
//! than deriving an encoding, which keeps the parameter names, the
//! comma/semicolon joining rules, and the omit-versus-empty distinction
//! visible at the call site and checked at compile time.
//!
//! Three encoding modes cover the API's conventions:
//!
//! - plain scalars, omitted when unset;
//! - sequences joined with `,`, omitted when empty;
//! - `key=value` maps joined with `;`, omitted when empty.
//!
//! A handful of endpoints distinguish an absent parameter from a present but
//! empty one (sending `tags=` clears all tags, omitting `tags` changes
//! nothing). Those fields use the always-present variants instead.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Custom per-type query encoding.
///
/// A field type may implement this to bypass the default rules; the encoder
/// invokes it instead. Returning `None` omits the parameter entirely, while
/// `Some(String::new())` produces a present-but-empty `name=`.
pub trait QueryValue {
    fn to_query_value(&self) -> Option<String>;
}

/// Conversion of an options struct into query parameters.
pub trait ToQuery {
    fn to_query(&self) -> QueryParams;
}

/// An ordered list of query `(name, value)` pairs.
///
/// Pairs are kept in insertion order; URL escaping is applied once by the
/// HTTP layer when the request is built, never per element.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair unconditionally.
    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        self.pairs.push((name.to_string(), value.into()));
    }

    /// Append a scalar, omitting the pair when unset.
    pub fn opt<T: Display>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.push(name, value.to_string());
        }
    }

    /// Append a string scalar, omitting the pair when unset or empty.
    pub fn opt_str(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(v) if !v.is_empty() => self.push(name, v),
            _ => {}
        }
    }

    /// Append a comma-joined sequence, omitting the pair when empty.
    ///
    /// Elements are concatenated literally; an element containing `,` is the
    /// caller's problem and is rejected by validation where it matters.
    pub fn csv<S: AsRef<str>>(&mut self, name: &str, values: &[S]) {
        if !values.is_empty() {
            self.push(name, join(values, ","));
        }
    }

    /// Append a comma-joined sequence that is present even when empty.
    ///
    /// The server treats `name=` and an absent `name` differently for these
    /// endpoints, so an empty sequence still produces the pair.
    pub fn csv_always<S: AsRef<str>>(&mut self, name: &str, values: &[S]) {
        self.push(name, join(values, ","));
    }

    /// Append a `;`-joined `key=value` map, omitting the pair when empty.
    ///
    /// `BTreeMap` iteration is sorted by key, so the encoding is
    /// deterministic and safe to assert on in tests.
    pub fn kv(&mut self, name: &str, map: &BTreeMap<String, String>) {
        if !map.is_empty() {
            let joined = map
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(";");
            self.push(name, joined);
        }
    }

    /// Append a pair using the field type's own encoding.
    pub fn custom(&mut self, name: &str, value: &impl QueryValue) {
        if let Some(encoded) = value.to_query_value() {
            self.push(name, encoded);
        }
    }

    /// The encoded pairs, in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// The value for `name`, if present. Test helper more than API surface.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

fn join<S: AsRef<str>>(values: &[S], sep: &str) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_omits_unset_scalars() {
        let mut q = QueryParams::new();
        q.opt("p", Some(2));
        q.opt::<u32>("ps", None);
        assert_eq!(q.pairs(), &[("p".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_opt_str_omits_empty() {
        let mut q = QueryParams::new();
        q.opt_str("q", Some(""));
        q.opt_str("language", Some("rust"));
        q.opt_str("repo", None);
        assert_eq!(q.len(), 1);
        assert_eq!(q.get("language"), Some("rust"));
    }

    #[test]
    fn test_csv_joins_and_omits_empty() {
        let mut q = QueryParams::new();
        q.csv("severities", &["MAJOR", "CRITICAL"]);
        q.csv::<&str>("statuses", &[]);
        assert_eq!(q.get("severities"), Some("MAJOR,CRITICAL"));
        assert_eq!(q.get("statuses"), None);
    }

    #[test]
    fn test_csv_round_trip() {
        let values = vec!["alpha", "beta", "gamma"];
        let mut q = QueryParams::new();
        q.csv("tags", &values);
        let rejoined: Vec<&str> = q.get("tags").unwrap().split(',').collect();
        assert_eq!(rejoined, values);
    }

    #[test]
    fn test_csv_always_keeps_empty_pair() {
        let mut q = QueryParams::new();
        q.csv_always::<&str>("tags", &[]);
        assert_eq!(q.get("tags"), Some(""));
    }

    #[test]
    fn test_kv_sorted_semicolon_join() {
        let mut map = BTreeMap::new();
        map.insert("zeta".to_string(), "1".to_string());
        map.insert("alpha".to_string(), "2".to_string());
        let mut q = QueryParams::new();
        q.kv("params", &map);
        assert_eq!(q.get("params"), Some("alpha=2;zeta=1"));

        q = QueryParams::new();
        q.kv("params", &BTreeMap::new());
        assert!(q.is_empty());
    }

    #[test]
    fn test_custom_encoding_controls_presence() {
        struct AlwaysEmpty;
        impl QueryValue for AlwaysEmpty {
            fn to_query_value(&self) -> Option<String> {
                Some(String::new())
            }
        }
        struct Absent;
        impl QueryValue for Absent {
            fn to_query_value(&self) -> Option<String> {
                None
            }
        }

        let mut q = QueryParams::new();
        q.custom("tags", &AlwaysEmpty);
        q.custom("branch", &Absent);
        assert_eq!(q.get("tags"), Some(""));
        assert_eq!(q.get("branch"), None);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut q = QueryParams::new();
        q.push("b", "2");
        q.push("a", "1");
        let names: Vec<&str> = q.pairs().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
