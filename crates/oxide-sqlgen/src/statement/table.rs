//! Table statements and the column/constraint specs used by CREATE TABLE.

use serde::{Deserialize, Serialize};

use super::constraint::ForeignKeyAction;
use super::default_true;
use crate::object::ObjectName;
use crate::value::LiteralValue;

/// Auto-increment options for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoIncrement {
    #[serde(default)]
    pub start_with: Option<i64>,
    #[serde(default)]
    pub increment_by: Option<i64>,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    /// Declared SQL type, emitted as written.
    #[serde(default)]
    pub data_type: String,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub not_null_constraint_name: Option<String>,
    #[serde(default)]
    pub default_value: Option<LiteralValue>,
    /// Name of the default-value constraint where the dialect names them.
    #[serde(default)]
    pub default_constraint_name: Option<String>,
    #[serde(default)]
    pub auto_increment: Option<AutoIncrement>,
    #[serde(default)]
    pub remarks: Option<String>,
    /// The name is an expression; no type is required.
    #[serde(default)]
    pub computed: bool,
}

impl ColumnSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            not_null_constraint_name: None,
            default_value: None,
            default_constraint_name: None,
            auto_increment: None,
            remarks: None,
            computed: false,
        }
    }

    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    #[must_use]
    pub fn not_null_named(mut self, constraint: impl Into<String>) -> Self {
        self.nullable = false;
        self.not_null_constraint_name = Some(constraint.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<LiteralValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn default_constraint_name(mut self, name: impl Into<String>) -> Self {
        self.default_constraint_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = Some(AutoIncrement {
            start_with: None,
            increment_by: None,
        });
        self
    }

    #[must_use]
    pub const fn auto_increment_from(mut self, start_with: i64, increment_by: i64) -> Self {
        self.auto_increment = Some(AutoIncrement {
            start_with: Some(start_with),
            increment_by: Some(increment_by),
        });
        self
    }

    #[must_use]
    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    #[must_use]
    pub const fn computed(mut self) -> Self {
        self.computed = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKeySpec {
    #[serde(default)]
    pub name: Option<String>,
    pub columns: Vec<String>,
    #[serde(default)]
    pub tablespace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeySpec {
    pub name: String,
    pub columns: Vec<String>,
    pub referenced_table: ObjectName,
    pub referenced_columns: Vec<String>,
    #[serde(default)]
    pub on_delete: Option<ForeignKeyAction>,
    #[serde(default)]
    pub on_update: Option<ForeignKeyAction>,
    #[serde(default)]
    pub deferrable: bool,
    #[serde(default)]
    pub initially_deferred: bool,
}

impl ForeignKeySpec {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        columns: &[&str],
        referenced_table: impl Into<ObjectName>,
        referenced_columns: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(ToString::to_string).collect(),
            referenced_table: referenced_table.into(),
            referenced_columns: referenced_columns.iter().map(ToString::to_string).collect(),
            on_delete: None,
            on_update: None,
            deferrable: false,
            initially_deferred: false,
        }
    }

    #[must_use]
    pub const fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    #[must_use]
    pub const fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }

    #[must_use]
    pub const fn deferrable(mut self, initially_deferred: bool) -> Self {
        self.deferrable = true;
        self.initially_deferred = initially_deferred;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub columns: Vec<String>,
    #[serde(default)]
    pub tablespace: Option<String>,
}

/// CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStatement {
    pub table: ObjectName,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub primary_key: Option<PrimaryKeySpec>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeySpec>,
    #[serde(default)]
    pub unique_constraints: Vec<UniqueSpec>,
    #[serde(default)]
    pub tablespace: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub if_not_exists: bool,
}

impl CreateTableStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            unique_constraints: Vec::new(),
            tablespace: None,
            remarks: None,
            if_not_exists: false,
        }
    }

    #[must_use]
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    /// Declares the primary key over the given columns.
    #[must_use]
    pub fn primary_key(mut self, name: Option<&str>, columns: &[&str]) -> Self {
        self.primary_key = Some(PrimaryKeySpec {
            name: name.map(str::to_string),
            columns: columns.iter().map(ToString::to_string).collect(),
            tablespace: None,
        });
        self
    }

    #[must_use]
    pub fn foreign_key(mut self, foreign_key: ForeignKeySpec) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    #[must_use]
    pub fn unique(mut self, name: Option<&str>, columns: &[&str]) -> Self {
        self.unique_constraints.push(UniqueSpec {
            name: name.map(str::to_string),
            columns: columns.iter().map(ToString::to_string).collect(),
            tablespace: None,
        });
        self
    }

    #[must_use]
    pub fn tablespace(mut self, tablespace: impl Into<String>) -> Self {
        self.tablespace = Some(tablespace.into());
        self
    }

    #[must_use]
    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }
}

/// DROP TABLE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTableStatement {
    pub table: ObjectName,
    #[serde(default)]
    pub cascade_constraints: bool,
    #[serde(default)]
    pub if_exists: bool,
}

impl DropTableStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>) -> Self {
        Self {
            table: table.into(),
            cascade_constraints: false,
            if_exists: false,
        }
    }

    #[must_use]
    pub const fn cascade_constraints(mut self) -> Self {
        self.cascade_constraints = true;
        self
    }

    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }
}

/// Renames a table within its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTableStatement {
    pub old_table: ObjectName,
    pub new_name: String,
}

impl RenameTableStatement {
    #[must_use]
    pub fn new(old_table: impl Into<ObjectName>, new_name: impl Into<String>) -> Self {
        Self {
            old_table: old_table.into(),
            new_name: new_name.into(),
        }
    }
}

/// Sets the comment on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTableRemarksStatement {
    pub table: ObjectName,
    pub remarks: String,
}

impl SetTableRemarksStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>, remarks: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            remarks: remarks.into(),
        }
    }
}

/// Reorganizes a table after structural changes (DB2 REORG).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorganizeTableStatement {
    pub table: ObjectName,
}

impl ReorganizeTableStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>) -> Self {
        Self {
            table: table.into(),
        }
    }
}
