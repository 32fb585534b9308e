//! Validation results and advisory warnings.
//!
//! Validation never fails with `Err`: problems are collected as data so a
//! caller can report every one of them at once.

use std::fmt;

use crate::database::Database;
use crate::object::ObjectName;
use crate::value::LiteralValue;

/// A statement field that can be checked for presence.
pub trait FieldValue {
    /// Returns true if the field carries a usable value.
    fn is_present(&self) -> bool;

    /// Returns true if the field is a collection, which changes the wording
    /// of a missing-field error.
    fn is_collection(&self) -> bool {
        false
    }
}

impl FieldValue for str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl FieldValue for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

impl FieldValue for ObjectName {
    fn is_present(&self) -> bool {
        !self.is_blank()
    }
}

impl FieldValue for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl FieldValue for i64 {
    fn is_present(&self) -> bool {
        true
    }
}

impl FieldValue for u32 {
    fn is_present(&self) -> bool {
        true
    }
}

impl FieldValue for u64 {
    fn is_present(&self) -> bool {
        true
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(FieldValue::is_present)
    }
}

impl<T> FieldValue for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }

    fn is_collection(&self) -> bool {
        true
    }
}

impl<T> FieldValue for [T] {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }

    fn is_collection(&self) -> bool {
        true
    }
}

/// Errors and warnings produced by validating one statement.
///
/// An empty error list means the statement is valid for the dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Records an error.
    pub fn add_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.errors.push(message.into());
        self
    }

    /// Records a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) -> &mut Self {
        self.warnings.push(message.into());
        self
    }

    /// Records an error if `value` is a NaN or infinite float, which has no
    /// SQL literal.
    pub fn check_finite_value(&mut self, field: &str, value: &LiteralValue) -> &mut Self {
        if let LiteralValue::Float(n) = value {
            if !n.is_finite() {
                self.add_error(format!("{field} is not a finite number: {n}"));
            }
        }
        self
    }

    /// Records `"<field> is required"` (or `"No <field> defined"` for
    /// collections) if the value is absent or blank.
    pub fn check_required_field<V>(&mut self, field: &str, value: &V) -> &mut Self
    where
        V: FieldValue + ?Sized,
    {
        if !value.is_present() {
            if value.is_collection() {
                self.add_error(format!("No {field} defined"));
            } else {
                self.add_error(format!("{field} is required"));
            }
        }
        self
    }

    /// Records `"<field> is not allowed on <dialect>"` if the value is set.
    pub fn check_disallowed_field<V>(
        &mut self,
        field: &str,
        value: &V,
        database: &dyn Database,
    ) -> &mut Self
    where
        V: FieldValue + ?Sized,
    {
        if value.is_present() {
            self.add_error(format!(
                "{field} is not allowed on {}",
                database.short_name()
            ));
        }
        self
    }

    /// Merges another result into this one.
    pub fn extend(&mut self, other: Self) -> &mut Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.errors.join("; "))
    }
}

/// Advisory messages for a statement that will still render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn add(&mut self, message: impl Into<String>) -> &mut Self {
        self.messages.push(message.into());
        self
    }

    pub fn extend(&mut self, other: Self) -> &mut Self {
        self.messages.extend(other.messages);
        self
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.messages.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Dialect, OfflineDatabase};

    #[test]
    fn test_required_field_messages() {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("tableName", "  ")
            .check_required_field("columns", &Vec::<String>::new())
            .check_required_field("columnDataType", &None::<String>)
            .check_required_field("columnName", "id");
        assert_eq!(
            errors.errors(),
            [
                "tableName is required",
                "No columns defined",
                "columnDataType is required"
            ]
        );
    }

    #[test]
    fn test_disallowed_field_names_dialect() {
        let db = OfflineDatabase::new(Dialect::MySql);
        let mut errors = ValidationErrors::new();
        errors
            .check_disallowed_field("deferrable", &true, &db)
            .check_disallowed_field("initiallyDeferred", &false, &db);
        assert_eq!(errors.errors(), ["deferrable is not allowed on mysql"]);
    }

    #[test]
    fn test_finite_values() {
        let mut errors = ValidationErrors::new();
        errors
            .check_finite_value("defaultValue", &LiteralValue::Float(2.5))
            .check_finite_value("defaultValue", &LiteralValue::Integer(7))
            .check_finite_value("defaultValue", &LiteralValue::Float(f64::NAN));
        assert_eq!(errors.errors(), ["defaultValue is not a finite number: NaN"]);
    }

    #[test]
    fn test_extend_keeps_warnings_apart() {
        let mut first = ValidationErrors::new();
        first.add_error("a");
        let mut second = ValidationErrors::new();
        second.add_warning("b");
        first.extend(second);
        assert!(first.has_errors());
        assert_eq!(first.warnings(), ["b"]);
        assert_eq!(first.to_string(), "a");
    }
}
