//! Column-level statements.

use serde::{Deserialize, Serialize};

use super::table::ColumnSpec;
use crate::object::ObjectName;
use crate::value::LiteralValue;

/// A foreign key declared inline on an added column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnReference {
    pub constraint_name: String,
    /// `table(column)` or `schema.table(column)`.
    pub references: String,
    #[serde(default)]
    pub delete_cascade: bool,
}

/// One column added by [`AddColumnStatement`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewColumn {
    #[serde(flatten)]
    pub column: ColumnSpec,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub unique_constraint_name: Option<String>,
    #[serde(default)]
    pub foreign_key: Option<ColumnReference>,
    #[serde(default)]
    pub add_after_column: Option<String>,
    #[serde(default)]
    pub add_before_column: Option<String>,
    #[serde(default)]
    pub add_at_position: Option<u32>,
}

impl NewColumn {
    #[must_use]
    pub const fn new(column: ColumnSpec) -> Self {
        Self {
            column,
            primary_key: false,
            unique: false,
            unique_constraint_name: None,
            foreign_key: None,
            add_after_column: None,
            add_before_column: None,
            add_at_position: None,
        }
    }

    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    #[must_use]
    pub fn unique(mut self, constraint_name: Option<&str>) -> Self {
        self.unique = true;
        self.unique_constraint_name = constraint_name.map(str::to_string);
        self
    }

    #[must_use]
    pub fn references(
        mut self,
        constraint_name: impl Into<String>,
        references: impl Into<String>,
        delete_cascade: bool,
    ) -> Self {
        self.foreign_key = Some(ColumnReference {
            constraint_name: constraint_name.into(),
            references: references.into(),
            delete_cascade,
        });
        self
    }

    #[must_use]
    pub fn after(mut self, column: impl Into<String>) -> Self {
        self.add_after_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn before(mut self, column: impl Into<String>) -> Self {
        self.add_before_column = Some(column.into());
        self
    }

    #[must_use]
    pub const fn at_position(mut self, position: u32) -> Self {
        self.add_at_position = Some(position);
        self
    }
}

impl From<ColumnSpec> for NewColumn {
    fn from(column: ColumnSpec) -> Self {
        Self::new(column)
    }
}

/// Adds one or more columns to a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddColumnStatement {
    pub table: ObjectName,
    pub columns: Vec<NewColumn>,
}

impl AddColumnStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<NewColumn>) -> Self {
        self.columns.push(column.into());
        self
    }
}

/// Drops one or more columns from a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropColumnStatement {
    pub table: ObjectName,
    pub columns: Vec<String>,
}

impl DropColumnStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>, columns: &[&str]) -> Self {
        Self {
            table: table.into(),
            columns: columns.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameColumnStatement {
    pub table: ObjectName,
    pub old_name: String,
    pub new_name: String,
    /// Needed where a rename restates the column definition.
    #[serde(default)]
    pub column_data_type: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl RenameColumnStatement {
    #[must_use]
    pub fn new(
        table: impl Into<ObjectName>,
        old_name: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            old_name: old_name.into(),
            new_name: new_name.into(),
            column_data_type: None,
            remarks: None,
        }
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.column_data_type = Some(data_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyDataTypeStatement {
    pub table: ObjectName,
    pub column: String,
    pub new_data_type: String,
}

impl ModifyDataTypeStatement {
    #[must_use]
    pub fn new(
        table: impl Into<ObjectName>,
        column: impl Into<String>,
        new_data_type: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            new_data_type: new_data_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddDefaultValueStatement {
    pub table: ObjectName,
    pub column: String,
    #[serde(default)]
    pub column_data_type: Option<String>,
    pub default_value: LiteralValue,
    #[serde(default)]
    pub constraint_name: Option<String>,
}

impl AddDefaultValueStatement {
    #[must_use]
    pub fn new(
        table: impl Into<ObjectName>,
        column: impl Into<String>,
        default_value: impl Into<LiteralValue>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            column_data_type: None,
            default_value: default_value.into(),
            constraint_name: None,
        }
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.column_data_type = Some(data_type.into());
        self
    }

    #[must_use]
    pub fn with_constraint_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropDefaultValueStatement {
    pub table: ObjectName,
    pub column: String,
    #[serde(default)]
    pub column_data_type: Option<String>,
    #[serde(default)]
    pub constraint_name: Option<String>,
}

impl DropDefaultValueStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            column_data_type: None,
            constraint_name: None,
        }
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.column_data_type = Some(data_type.into());
        self
    }

    #[must_use]
    pub fn with_constraint_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }
}

/// Adds or drops a NOT NULL constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetNullableStatement {
    pub table: ObjectName,
    pub column: String,
    #[serde(default)]
    pub column_data_type: Option<String>,
    pub nullable: bool,
    #[serde(default)]
    pub constraint_name: Option<String>,
}

impl SetNullableStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>, column: impl Into<String>, nullable: bool) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            column_data_type: None,
            nullable,
            constraint_name: None,
        }
    }

    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.column_data_type = Some(data_type.into());
        self
    }

    #[must_use]
    pub fn with_constraint_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }
}

/// Makes an existing column auto-incrementing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAutoIncrementStatement {
    pub table: ObjectName,
    pub column: String,
    pub column_data_type: String,
    #[serde(default)]
    pub start_with: Option<i64>,
    #[serde(default)]
    pub increment_by: Option<i64>,
}

impl AddAutoIncrementStatement {
    #[must_use]
    pub fn new(
        table: impl Into<ObjectName>,
        column: impl Into<String>,
        column_data_type: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            column_data_type: column_data_type.into(),
            start_with: None,
            increment_by: None,
        }
    }

    #[must_use]
    pub const fn starting_at(mut self, start_with: i64, increment_by: i64) -> Self {
        self.start_with = Some(start_with);
        self.increment_by = Some(increment_by);
        self
    }
}
