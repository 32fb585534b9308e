//! Data statements: INSERT, UPDATE, DELETE.

use serde::{Deserialize, Serialize};

use crate::object::ObjectName;
use crate::value::LiteralValue;

/// A column paired with the value written to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub column: String,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub table: ObjectName,
    pub values: Vec<ColumnValue>,
}

impl InsertStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>) -> Self {
        Self {
            table: table.into(),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn value(mut self, column: impl Into<String>, value: impl Into<LiteralValue>) -> Self {
        self.values.push(ColumnValue {
            column: column.into(),
            value: value.into(),
        });
        self
    }
}

/// UPDATE with an optional raw WHERE clause. In order, each `:name` in the
/// clause is replaced by the next where column name and each `?` or `:value`
/// by the next where parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub table: ObjectName,
    pub values: Vec<ColumnValue>,
    #[serde(default)]
    pub where_clause: Option<String>,
    #[serde(default)]
    pub where_column_names: Vec<String>,
    #[serde(default)]
    pub where_parameters: Vec<LiteralValue>,
}

impl UpdateStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>) -> Self {
        Self {
            table: table.into(),
            values: Vec::new(),
            where_clause: None,
            where_column_names: Vec::new(),
            where_parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<LiteralValue>) -> Self {
        self.values.push(ColumnValue {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn with_where(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    /// Binds the next `:name` placeholder.
    #[must_use]
    pub fn where_column_name(mut self, column: impl Into<String>) -> Self {
        self.where_column_names.push(column.into());
        self
    }

    /// Binds the next `?` or `:value` placeholder.
    #[must_use]
    pub fn where_parameter(mut self, value: impl Into<LiteralValue>) -> Self {
        self.where_parameters.push(value.into());
        self
    }
}

/// DELETE with the same WHERE handling as [`UpdateStatement`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub table: ObjectName,
    #[serde(default)]
    pub where_clause: Option<String>,
    #[serde(default)]
    pub where_column_names: Vec<String>,
    #[serde(default)]
    pub where_parameters: Vec<LiteralValue>,
}

impl DeleteStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>) -> Self {
        Self {
            table: table.into(),
            where_clause: None,
            where_column_names: Vec::new(),
            where_parameters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_where(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    /// Binds the next `:name` placeholder.
    #[must_use]
    pub fn where_column_name(mut self, column: impl Into<String>) -> Self {
        self.where_column_names.push(column.into());
        self
    }

    /// Binds the next `?` or `:value` placeholder.
    #[must_use]
    pub fn where_parameter(mut self, value: impl Into<LiteralValue>) -> Self {
        self.where_parameters.push(value.into());
        self
    }
}
