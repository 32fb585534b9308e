//! Constraint statements.

use serde::{Deserialize, Serialize};

use crate::object::ObjectName;

/// Referential action for ON DELETE / ON UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl ForeignKeyAction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPrimaryKeyStatement {
    pub table: ObjectName,
    pub columns: Vec<String>,
    #[serde(default)]
    pub constraint_name: Option<String>,
    #[serde(default)]
    pub tablespace: Option<String>,
    /// Clustered or nonclustered, where the dialect distinguishes them.
    #[serde(default)]
    pub clustered: Option<bool>,
}

impl AddPrimaryKeyStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>, columns: &[&str]) -> Self {
        Self {
            table: table.into(),
            columns: columns.iter().map(ToString::to_string).collect(),
            constraint_name: None,
            tablespace: None,
            clustered: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_tablespace(mut self, tablespace: impl Into<String>) -> Self {
        self.tablespace = Some(tablespace.into());
        self
    }

    #[must_use]
    pub const fn clustered(mut self, clustered: bool) -> Self {
        self.clustered = Some(clustered);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropPrimaryKeyStatement {
    pub table: ObjectName,
    #[serde(default)]
    pub constraint_name: Option<String>,
}

impl DropPrimaryKeyStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>) -> Self {
        Self {
            table: table.into(),
            constraint_name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddForeignKeyConstraintStatement {
    pub constraint_name: String,
    pub base_table: ObjectName,
    pub base_columns: Vec<String>,
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

impl AddForeignKeyConstraintStatement {
    #[must_use]
    pub fn new(
        constraint_name: impl Into<String>,
        base_table: impl Into<ObjectName>,
        base_columns: &[&str],
        referenced_table: impl Into<ObjectName>,
        referenced_columns: &[&str],
    ) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            base_table: base_table.into(),
            base_columns: base_columns.iter().map(ToString::to_string).collect(),
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
    pub const fn deferrable(mut self) -> Self {
        self.deferrable = true;
        self
    }

    #[must_use]
    pub const fn initially_deferred(mut self) -> Self {
        self.initially_deferred = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropForeignKeyConstraintStatement {
    pub base_table: ObjectName,
    pub constraint_name: String,
}

impl DropForeignKeyConstraintStatement {
    #[must_use]
    pub fn new(base_table: impl Into<ObjectName>, constraint_name: impl Into<String>) -> Self {
        Self {
            base_table: base_table.into(),
            constraint_name: constraint_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddUniqueConstraintStatement {
    pub table: ObjectName,
    pub columns: Vec<String>,
    #[serde(default)]
    pub constraint_name: Option<String>,
    #[serde(default)]
    pub tablespace: Option<String>,
    #[serde(default)]
    pub deferrable: bool,
    #[serde(default)]
    pub initially_deferred: bool,
    /// Create the constraint disabled.
    #[serde(default)]
    pub disabled: bool,
}

impl AddUniqueConstraintStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>, columns: &[&str]) -> Self {
        Self {
            table: table.into(),
            columns: columns.iter().map(ToString::to_string).collect(),
            constraint_name: None,
            tablespace: None,
            deferrable: false,
            initially_deferred: false,
            disabled: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_tablespace(mut self, tablespace: impl Into<String>) -> Self {
        self.tablespace = Some(tablespace.into());
        self
    }

    #[must_use]
    pub const fn deferrable(mut self, initially_deferred: bool) -> Self {
        self.deferrable = true;
        self.initially_deferred = initially_deferred;
        self
    }

    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropUniqueConstraintStatement {
    pub table: ObjectName,
    #[serde(default)]
    pub constraint_name: Option<String>,
    /// Columns of the constraint, for dialects that drop by column list.
    #[serde(default)]
    pub columns: Vec<String>,
}

impl DropUniqueConstraintStatement {
    #[must_use]
    pub fn new(table: impl Into<ObjectName>, constraint_name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            constraint_name: Some(constraint_name.into()),
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(ToString::to_string).collect();
        self
    }
}
