//! Field validation primitives for endpoint options.
//!
//! Every endpoint's options struct exposes a `validate()` method built by
//! composing these checks with `?`. Validation runs entirely locally and
//! always completes before a request is built, so a rejected call never
//! touches the network. Checks are fail-fast: the first violation is
//! returned, not an aggregate.

use std::collections::BTreeMap;
use std::fmt::Display;

use thiserror::Error;

/// What constraint a rejected field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field was left at its zero value.
    MissingRequired,
    /// A value is outside its allowed set.
    InvalidValue,
    /// A numeric value is outside its inclusive range.
    OutOfRange,
    /// A string is longer than its maximum length.
    TooLong,
    /// A string is shorter than its minimum length.
    TooShort,
}

/// A rejected caller input.
///
/// Carries the offending field name, a human-readable message, and the
/// violated constraint kind so callers can branch without string matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    /// Query-parameter name of the offending field.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// The violated constraint.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }
}

/// Shorthand for validation check results.
pub type Checked = Result<(), ValidationError>;

/// Reject an empty string as missing.
pub fn require(field: &str, value: &str) -> Checked {
    if value.is_empty() {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::MissingRequired,
            "is required",
        ));
    }
    Ok(())
}

/// Reject a `None` as missing.
pub fn require_some<T>(field: &str, value: &Option<T>) -> Checked {
    if value.is_none() {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::MissingRequired,
            "is required",
        ));
    }
    Ok(())
}

/// Reject an empty collection as missing.
pub fn require_any<T>(field: &str, values: &[T]) -> Checked {
    if values.is_empty() {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::MissingRequired,
            "must contain at least one value",
        ));
    }
    Ok(())
}

/// Reject a string longer than `max` characters.
///
/// Length is measured in characters, not bytes, so multi-byte text counts
/// each scalar value once. A string of exactly `max` characters passes.
pub fn max_length(field: &str, value: &str, max: usize) -> Checked {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::TooLong,
            format!("must be at most {max} characters, got {len}"),
        ));
    }
    Ok(())
}

/// Reject a string shorter than `min` characters.
pub fn min_length(field: &str, value: &str, min: usize) -> Checked {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::TooShort,
            format!("must be at least {min} characters, got {len}"),
        ));
    }
    Ok(())
}

/// Reject a numeric value outside the inclusive `[min, max]` range.
pub fn in_range<T>(field: &str, value: T, min: T, max: T) -> Checked
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::OutOfRange,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

/// Reject a value that is not a member of `allowed`.
///
/// Allowed sets are plain `const` slices declared next to the options that
/// use them and passed in explicitly, so tests can substitute fixtures.
pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> Checked {
    if !allowed.contains(&value) {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::InvalidValue,
            format!("must be one of [{}], got '{value}'", allowed.join(", ")),
        ));
    }
    Ok(())
}

/// Apply [`one_of`] to every element, reporting the first offender.
pub fn each_one_of<S: AsRef<str>>(field: &str, values: &[S], allowed: &[&str]) -> Checked {
    for value in values {
        one_of(field, value.as_ref(), allowed)?;
    }
    Ok(())
}

/// Apply [`one_of`] to every key of a map.
pub fn map_keys_one_of(
    field: &str,
    map: &BTreeMap<String, String>,
    allowed: &[&str],
) -> Checked {
    for key in map.keys() {
        one_of(field, key, allowed)?;
    }
    Ok(())
}

/// Apply [`one_of`] to every value of a map.
pub fn map_values_one_of(
    field: &str,
    map: &BTreeMap<String, String>,
    allowed: &[&str],
) -> Checked {
    for value in map.values() {
        one_of(field, value, allowed)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_rejects_empty_string() {
        let err = require("name", "").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingRequired);
        assert_eq!(err.field, "name");
        assert!(require("name", "my-project").is_ok());
    }

    #[test]
    fn test_require_some_rejects_none() {
        let unset: Option<u32> = None;
        let err = require_some("page", &unset).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingRequired);
        assert!(require_some("page", &Some(1)).is_ok());
    }

    #[test]
    fn test_require_any_rejects_empty_slice() {
        let empty: Vec<String> = Vec::new();
        let err = require_any("keys", &empty).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingRequired);
        assert!(require_any("keys", &["a"]).is_ok());
    }

    #[test]
    fn test_max_length_boundary() {
        assert!(max_length("name", &"x".repeat(500), 500).is_ok());
        let err = max_length("name", &"x".repeat(501), 500).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::TooLong);
    }

    #[test]
    fn test_max_length_counts_characters_not_bytes() {
        // Five three-byte characters are five characters.
        let value = "héllo".to_string() + &"é".repeat(3);
        assert_eq!(value.chars().count(), 8);
        assert!(max_length("name", &value, 8).is_ok());
        assert!(max_length("name", &value, 7).is_err());
    }

    #[test]
    fn test_min_length_boundary() {
        assert!(min_length("key", "ab", 2).is_ok());
        let err = min_length("key", "a", 2).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::TooShort);
    }

    #[test]
    fn test_in_range_inclusive_bounds() {
        assert!(in_range("ps", 1, 1, 500).is_ok());
        assert!(in_range("ps", 500, 1, 500).is_ok());
        assert_eq!(
            in_range("ps", 0, 1, 500).unwrap_err().kind,
            ValidationErrorKind::OutOfRange
        );
        assert_eq!(
            in_range("ps", 501, 1, 500).unwrap_err().kind,
            ValidationErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_one_of_membership() {
        const ALLOWED: &[&str] = &["public", "private"];
        for member in ALLOWED {
            assert!(one_of("visibility", member, ALLOWED).is_ok());
        }
        let err = one_of("visibility", "internal", ALLOWED).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidValue);
        assert!(err.message.contains("internal"));
    }

    #[test]
    fn test_each_one_of_reports_first_offender() {
        const ALLOWED: &[&str] = &["OPEN", "CLOSED"];
        let values = ["OPEN", "BOGUS", "ALSO_BOGUS"];
        let err = each_one_of("statuses", &values, ALLOWED).unwrap_err();
        assert!(err.message.contains("BOGUS"));
        assert!(!err.message.contains("ALSO_BOGUS"));
    }

    #[test]
    fn test_map_keys_and_values_checked_independently() {
        const KEYS: &[&str] = &["format", "regex"];
        const VALUES: &[&str] = &["xml", "strict"];
        let mut map = BTreeMap::new();
        map.insert("format".to_string(), "xml".to_string());
        map.insert("regex".to_string(), "strict".to_string());
        assert!(map_keys_one_of("params", &map, KEYS).is_ok());
        assert!(map_values_one_of("params", &map, VALUES).is_ok());

        map.insert("bogus".to_string(), "xml".to_string());
        assert_eq!(
            map_keys_one_of("params", &map, KEYS).unwrap_err().kind,
            ValidationErrorKind::InvalidValue
        );
    }
}
