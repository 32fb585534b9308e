//! Rendered SQL output.

use std::fmt;

use serde::Serialize;

use crate::object::DatabaseObject;

/// The default statement terminator.
pub const DEFAULT_END_DELIMITER: &str = ";";

/// One executable SQL statement produced by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSql {
    text: String,
    end_delimiter: String,
    affected: Vec<DatabaseObject>,
}

impl RenderedSql {
    /// Creates a statement terminated by `;`.
    #[must_use]
    pub fn new(text: impl Into<String>, affected: Vec<DatabaseObject>) -> Self {
        Self {
            text: text.into(),
            end_delimiter: DEFAULT_END_DELIMITER.to_string(),
            affected,
        }
    }

    /// Creates a statement with no affected objects.
    #[must_use]
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    /// Replaces the end delimiter.
    #[must_use]
    pub fn with_end_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = delimiter.into();
        self
    }

    /// The SQL text, without its terminator.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The terminator to emit after the text.
    #[must_use]
    pub fn end_delimiter(&self) -> &str {
        &self.end_delimiter
    }

    /// Objects this statement touches.
    #[must_use]
    pub fn affected(&self) -> &[DatabaseObject] {
        &self.affected
    }

    /// The text followed by its end delimiter.
    #[must_use]
    pub fn terminated(&self) -> String {
        format!("{}{}", self.text, self.end_delimiter)
    }
}

impl fmt::Display for RenderedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectName;

    #[test]
    fn test_defaults_to_semicolon() {
        let sql = RenderedSql::new(
            "DROP TABLE person",
            vec![DatabaseObject::table(&ObjectName::new("person"))],
        );
        assert_eq!(sql.end_delimiter(), ";");
        assert_eq!(sql.terminated(), "DROP TABLE person;");
        assert_eq!(sql.affected().len(), 1);
    }

    #[test]
    fn test_custom_delimiter() {
        let sql = RenderedSql::text_only("EXEC sp_who").with_end_delimiter("\nGO");
        assert_eq!(sql.to_string(), "EXEC sp_who");
        assert_eq!(sql.terminated(), "EXEC sp_who\nGO");
    }
}
