//! Database capability descriptors.
//!
//! Generators never talk to a database. Everything they need to know about
//! the target (identity, version, feature flags, quoting, literal syntax) is
//! asked of a [`Database`] descriptor, so the same statement can be rendered
//! for any dialect without a connection.

mod offline;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use offline::{ObjectQuoting, OfflineDatabase};

use crate::error::{CapabilityError, UnknownDialect};
use crate::object::ObjectName;
use crate::value::{is_current_datetime, LiteralValue};

/// Identity of a SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "postgresql")]
    Postgres,
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "mariadb")]
    MariaDb,
    #[serde(rename = "sqlite")]
    Sqlite,
    #[serde(rename = "mssql")]
    Mssql,
    #[serde(rename = "oracle")]
    Oracle,
    #[serde(rename = "h2")]
    H2,
    #[serde(rename = "hsqldb")]
    Hsql,
    #[serde(rename = "derby")]
    Derby,
    #[serde(rename = "db2")]
    Db2,
    #[serde(rename = "sybase")]
    Sybase,
    #[serde(rename = "asany")]
    SybaseAsa,
    #[serde(rename = "informix")]
    Informix,
    #[serde(rename = "firebird")]
    Firebird,
    #[serde(rename = "snowflake")]
    Snowflake,
    #[serde(rename = "bigquery")]
    BigQuery,
}

impl Dialect {
    /// Every known dialect.
    pub const ALL: [Self; 16] = [
        Self::Postgres,
        Self::MySql,
        Self::MariaDb,
        Self::Sqlite,
        Self::Mssql,
        Self::Oracle,
        Self::H2,
        Self::Hsql,
        Self::Derby,
        Self::Db2,
        Self::Sybase,
        Self::SybaseAsa,
        Self::Informix,
        Self::Firebird,
        Self::Snowflake,
        Self::BigQuery,
    ];

    /// The short name used in messages and on the command line.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Postgres => "postgresql",
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Sqlite => "sqlite",
            Self::Mssql => "mssql",
            Self::Oracle => "oracle",
            Self::H2 => "h2",
            Self::Hsql => "hsqldb",
            Self::Derby => "derby",
            Self::Db2 => "db2",
            Self::Sybase => "sybase",
            Self::SybaseAsa => "asany",
            Self::Informix => "informix",
            Self::Firebird => "firebird",
            Self::Snowflake => "snowflake",
            Self::BigQuery => "bigquery",
        }
    }

    /// MySQL and MariaDB.
    #[must_use]
    pub const fn is_mysql_family(self) -> bool {
        matches!(self, Self::MySql | Self::MariaDb)
    }

    /// Sybase ASE and SQL Anywhere.
    #[must_use]
    pub const fn is_sybase_family(self) -> bool {
        matches!(self, Self::Sybase | Self::SybaseAsa)
    }

    /// Dialects speaking Transact-SQL.
    #[must_use]
    pub const fn is_tsql_family(self) -> bool {
        matches!(self, Self::Mssql | Self::Sybase | Self::SybaseAsa)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let dialect = match normalized.as_str() {
            "postgres" | "pg" => Self::Postgres,
            "sqlserver" => Self::Mssql,
            "hsql" => Self::Hsql,
            "sybase_asa" | "sqlanywhere" => Self::SybaseAsa,
            other => Self::ALL
                .into_iter()
                .find(|dialect| dialect.short_name() == other)
                .ok_or_else(|| UnknownDialect(s.to_string()))?,
        };
        Ok(dialect)
    }
}

/// Kinds of schema objects, for escaping and feature checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Catalog,
    Schema,
    Table,
    Column,
    View,
    Index,
    Sequence,
    Constraint,
}

/// What a generator may ask about its target database.
///
/// Implementations are read-only and shareable across threads. The default
/// methods give the behavior shared by most dialects; descriptors override
/// what differs.
pub trait Database: Send + Sync {
    /// Dialect identity.
    fn dialect(&self) -> Dialect;

    /// Short name used in messages, e.g. `"postgresql"`.
    fn short_name(&self) -> &'static str {
        self.dialect().short_name()
    }

    /// Major version of the target.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] if the version is unknown.
    fn major_version(&self) -> Result<u32, CapabilityError>;

    /// Minor version of the target.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] if the version is unknown.
    fn minor_version(&self) -> Result<u32, CapabilityError>;

    /// Returns true if the target is at least `major.minor`.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] if the version is unknown.
    fn is_at_least(&self, major: u32, minor: u32) -> Result<bool, CapabilityError> {
        let actual = self.major_version()?;
        if actual == major {
            return Ok(self.minor_version()? >= minor);
        }
        Ok(actual > major)
    }

    fn supports_schemas(&self) -> bool;
    fn supports_catalogs(&self) -> bool;
    fn supports_sequences(&self) -> bool;
    fn supports_tablespaces(&self) -> bool;
    fn supports_auto_increment(&self) -> bool;
    fn supports_initially_deferrable_columns(&self) -> bool;
    fn supports_restrict_foreign_keys(&self) -> bool;
    fn supports_drop_table_cascade_constraints(&self) -> bool;
    fn supports_primary_key_names(&self) -> bool;
    fn supports_not_null_constraint_names(&self) -> bool;
    fn supports_create_if_not_exists(&self, kind: ObjectKind) -> bool;
    fn supports_drop_if_exists(&self, kind: ObjectKind) -> bool;

    /// Default schema of the connection, if any.
    fn default_schema_name(&self) -> Option<&str> {
        None
    }

    /// Whether unqualified names are rendered with the default schema.
    fn output_default_schema(&self) -> bool {
        false
    }

    /// Escapes a single, unqualified object name.
    fn escape_object_name(&self, name: &str, kind: ObjectKind) -> String;

    /// Escapes a catalog- and schema-qualified name, dropping qualifiers the
    /// dialect does not support. On dialects with catalogs but no schemas the
    /// schema is treated as the catalog.
    fn escape_qualified_name(&self, name: &ObjectName, kind: ObjectKind) -> String {
        let mut parts = Vec::with_capacity(3);
        let schema = name.schema.as_deref().or_else(|| {
            self.output_default_schema()
                .then(|| self.default_schema_name())
                .flatten()
        });
        if self.supports_schemas() {
            if self.supports_catalogs() {
                if let Some(catalog) = name.catalog.as_deref() {
                    parts.push(self.escape_object_name(catalog, ObjectKind::Catalog));
                }
            }
            if let Some(schema) = schema {
                parts.push(self.escape_object_name(schema, ObjectKind::Schema));
            }
        } else if self.supports_catalogs() {
            if let Some(catalog) = name.catalog.as_deref().or(schema) {
                parts.push(self.escape_object_name(catalog, ObjectKind::Catalog));
            }
        }
        parts.push(self.escape_object_name(&name.name, kind));
        parts.join(".")
    }

    fn escape_table_name(&self, table: &ObjectName) -> String {
        self.escape_qualified_name(table, ObjectKind::Table)
    }

    fn escape_view_name(&self, view: &ObjectName) -> String {
        self.escape_qualified_name(view, ObjectKind::View)
    }

    fn escape_sequence_name(&self, sequence: &ObjectName) -> String {
        self.escape_qualified_name(sequence, ObjectKind::Sequence)
    }

    /// Escapes an index name qualified with its table's schema.
    fn escape_index_name(&self, table: &ObjectName, index: &str) -> String {
        self.escape_qualified_name(&table.sibling(index), ObjectKind::Index)
    }

    fn escape_column_name(&self, _table: &ObjectName, column: &str) -> String {
        self.escape_object_name(column, ObjectKind::Column)
    }

    /// Escapes each column and joins them with `", "`.
    fn escape_column_list(&self, table: &ObjectName, columns: &[String]) -> String {
        columns
            .iter()
            .map(|column| self.escape_column_name(table, column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn escape_constraint_name(&self, name: &str) -> String {
        self.escape_object_name(name, ObjectKind::Constraint)
    }

    /// Escapes the contents of a string literal (without the quotes).
    fn escape_string(&self, value: &str) -> String {
        value.replace('\'', "''")
    }

    /// Formats an ISO-8601 date or `date'T'time` value as a literal.
    fn date_literal(&self, iso: &str) -> String {
        format!("'{}'", iso.replace('T', " "))
    }

    fn true_literal(&self) -> &'static str;
    fn false_literal(&self) -> &'static str;
    fn current_datetime_function(&self) -> &'static str;

    fn line_comment(&self) -> &'static str {
        "--"
    }

    /// Expression yielding the next value of a sequence.
    fn sequence_next_value(&self, sequence: &ObjectName) -> String {
        format!("NEXT VALUE FOR {}", self.escape_sequence_name(sequence))
    }

    /// Clause appended to a column definition to make it auto-incrementing.
    fn auto_increment_clause(&self, start_with: Option<i64>, increment_by: Option<i64>) -> String;

    /// The column type as it should appear in DDL. Declared types pass
    /// through; descriptors may substitute serial types for auto-increment
    /// columns.
    fn column_type_sql(&self, declared: &str, _auto_increment: bool) -> String {
        declared.trim().to_string()
    }

    /// Name for an unnamed default-value constraint.
    fn default_constraint_name(&self, table: &str, column: &str) -> String {
        format!("DF_{table}_{column}")
    }

    /// Renders a literal value as SQL.
    fn value_to_sql(&self, value: &LiteralValue) -> String {
        match value {
            LiteralValue::Null => "NULL".to_string(),
            LiteralValue::Boolean(true) => self.true_literal().to_string(),
            LiteralValue::Boolean(false) => self.false_literal().to_string(),
            LiteralValue::Integer(n) => n.to_string(),
            LiteralValue::Float(n) if !n.is_finite() => "NULL".to_string(),
            LiteralValue::Float(n) => n.to_string(),
            LiteralValue::Text(s) => format!("'{}'", self.escape_string(s)),
            LiteralValue::Date { date } => self.date_literal(&date.format("%Y-%m-%d").to_string()),
            LiteralValue::DateTime { datetime } => {
                self.date_literal(&datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
            LiteralValue::Computed { computed } if is_current_datetime(computed) => {
                self.current_datetime_function().to_string()
            }
            LiteralValue::Computed { computed } => computed.clone(),
            LiteralValue::SequenceNextValue { next_value_of } => {
                self.sequence_next_value(next_value_of)
            }
        }
    }
}
