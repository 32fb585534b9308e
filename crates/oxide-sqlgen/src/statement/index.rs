//! Index statements.

use serde::{Deserialize, Serialize};

use crate::object::ObjectName;

/// One indexed column or expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
    #[serde(default)]
    pub descending: bool,
    /// `name` is an expression and is emitted unescaped.
    #[serde(default)]
    pub computed: bool,
}

impl IndexColumn {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descending: false,
            computed: false,
        }
    }

    #[must_use]
    pub const fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    #[must_use]
    pub fn expression(expression: impl Into<String>) -> Self {
        Self {
            name: expression.into(),
            descending: false,
            computed: true,
        }
    }
}

impl From<&str> for IndexColumn {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIndexStatement {
    #[serde(default)]
    pub index_name: Option<String>,
    pub table: ObjectName,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub tablespace: Option<String>,
    #[serde(default)]
    pub clustered: bool,
    #[serde(default)]
    pub if_not_exists: bool,
}

impl CreateIndexStatement {
    #[must_use]
    pub fn new(index_name: impl Into<String>, table: impl Into<ObjectName>) -> Self {
        Self {
            index_name: Some(index_name.into()),
            table: table.into(),
            columns: Vec::new(),
            unique: false,
            tablespace: None,
            clustered: false,
            if_not_exists: false,
        }
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<IndexColumn>) -> Self {
        self.columns.push(column.into());
        self
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[must_use]
    pub fn with_tablespace(mut self, tablespace: impl Into<String>) -> Self {
        self.tablespace = Some(tablespace.into());
        self
    }

    #[must_use]
    pub const fn clustered(mut self) -> Self {
        self.clustered = true;
        self
    }

    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropIndexStatement {
    pub index_name: String,
    /// Owning table; also supplies the schema of the index.
    #[serde(default)]
    pub table: Option<ObjectName>,
}

impl DropIndexStatement {
    #[must_use]
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            table: None,
        }
    }

    #[must_use]
    pub fn on_table(mut self, table: impl Into<ObjectName>) -> Self {
        self.table = Some(table.into());
        self
    }
}
