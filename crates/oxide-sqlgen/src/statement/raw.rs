//! Pass-through statements.

use serde::{Deserialize, Serialize};

/// SQL emitted as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSqlStatement {
    pub sql: String,
    /// Terminator to use instead of `;`.
    #[serde(default)]
    pub end_delimiter: Option<String>,
}

impl RawSqlStatement {
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            end_delimiter: None,
        }
    }

    #[must_use]
    pub fn with_end_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = Some(delimiter.into());
        self
    }
}

/// A single-line SQL comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStatement {
    pub text: String,
}

impl CommentStatement {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Tags the most recent changelog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDatabaseStatement {
    pub tag: String,
}

impl TagDatabaseStatement {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}
