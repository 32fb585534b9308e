//! Literal values carried by statements (defaults, inserted and updated values).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::object::ObjectName;

/// A value rendered into SQL by the target dialect.
///
/// Deserializes from plain JSON scalars; dates, timestamps, computed
/// expressions and sequence values use single-key objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// SQL NULL.
    Null,
    /// Boolean, rendered with the dialect's true/false literal.
    Boolean(bool),
    /// Integer literal.
    Integer(i64),
    /// Floating-point literal.
    Float(f64),
    /// String literal, quoted and escaped by the dialect.
    Text(String),
    /// Calendar date.
    Date { date: NaiveDate },
    /// Date and time without zone.
    DateTime { datetime: NaiveDateTime },
    /// Raw SQL expression, emitted as written.
    Computed { computed: String },
    /// Next value of a sequence.
    SequenceNextValue { next_value_of: ObjectName },
}

impl LiteralValue {
    /// Creates a string literal.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a computed expression.
    #[must_use]
    pub fn computed(expression: impl Into<String>) -> Self {
        Self::Computed {
            computed: expression.into(),
        }
    }

    /// Creates a sequence next-value reference.
    #[must_use]
    pub fn next_value_of(sequence: impl Into<ObjectName>) -> Self {
        Self::SequenceNextValue {
            next_value_of: sequence.into(),
        }
    }

    /// Returns true if this is SQL NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for LiteralValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date { date }
    }
}

impl From<NaiveDateTime> for LiteralValue {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::DateTime { datetime }
    }
}

/// Returns true if a computed expression names the current timestamp
/// generically rather than in a dialect's own spelling.
pub(crate) fn is_current_datetime(expression: &str) -> bool {
    let expression = expression.trim();
    ["now()", "current_timestamp", "current_datetime"]
        .iter()
        .any(|candidate| expression.eq_ignore_ascii_case(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_plain_scalars() {
        let values: Vec<LiteralValue> =
            serde_json::from_str(r#"[null, true, 42, 1.5, "abc"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                LiteralValue::Null,
                LiteralValue::Boolean(true),
                LiteralValue::Integer(42),
                LiteralValue::Float(1.5),
                LiteralValue::text("abc"),
            ]
        );
    }

    #[test]
    fn test_deserialize_tagged_objects() {
        let value: LiteralValue = serde_json::from_str(r#"{"date": "2024-01-31"}"#).unwrap();
        assert_eq!(
            value,
            LiteralValue::Date {
                date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
            }
        );

        let value: LiteralValue =
            serde_json::from_str(r#"{"computed": "CURRENT_TIMESTAMP"}"#).unwrap();
        assert_eq!(value, LiteralValue::computed("CURRENT_TIMESTAMP"));

        let value: LiteralValue =
            serde_json::from_str(r#"{"next_value_of": {"schema": "app", "name": "seq"}}"#)
                .unwrap();
        assert_eq!(value, LiteralValue::next_value_of("app.seq"));
    }

    #[test]
    fn test_current_datetime_spellings() {
        assert!(is_current_datetime("NOW()"));
        assert!(is_current_datetime(" current_timestamp "));
        assert!(!is_current_datetime("CURRENT_DATE"));
    }
}
