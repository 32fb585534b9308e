//! A connectionless descriptor driven by a per-dialect capability table.

use serde::{Deserialize, Serialize};

use super::{Database, Dialect, ObjectKind};
use crate::error::CapabilityError;
use crate::object::ObjectName;

/// When object names are wrapped in quote characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectQuoting {
    /// Quote only names that would not parse bare: reserved words, names
    /// starting with a digit, names with non-identifier characters.
    #[default]
    Legacy,
    /// Quote every name.
    QuoteAll,
}

/// Capability flags and literal syntax of one dialect.
#[derive(Debug, Clone, Copy)]
struct Profile {
    quote: (char, char),
    schemas: bool,
    catalogs: bool,
    sequences: bool,
    tablespaces: bool,
    auto_increment: bool,
    deferrable: bool,
    restrict_foreign_keys: bool,
    drop_cascade: bool,
    primary_key_names: bool,
    not_null_names: bool,
    create_if_not_exists: &'static [ObjectKind],
    drop_if_exists: &'static [ObjectKind],
    true_literal: &'static str,
    false_literal: &'static str,
    current_datetime: &'static str,
}

const BASE: Profile = Profile {
    quote: ('"', '"'),
    schemas: true,
    catalogs: false,
    sequences: true,
    tablespaces: false,
    auto_increment: true,
    deferrable: false,
    restrict_foreign_keys: true,
    drop_cascade: false,
    primary_key_names: true,
    not_null_names: false,
    create_if_not_exists: &[],
    drop_if_exists: &[],
    true_literal: "TRUE",
    false_literal: "FALSE",
    current_datetime: "CURRENT_TIMESTAMP",
};

const TABLE_INDEX_SEQUENCE: &[ObjectKind] =
    &[ObjectKind::Table, ObjectKind::Index, ObjectKind::Sequence];
const TABLE_INDEX_SEQUENCE_VIEW: &[ObjectKind] = &[
    ObjectKind::Table,
    ObjectKind::Index,
    ObjectKind::Sequence,
    ObjectKind::View,
];
const TABLE_INDEX_VIEW: &[ObjectKind] = &[ObjectKind::Table, ObjectKind::Index, ObjectKind::View];

#[allow(clippy::too_many_lines)]
const fn profile(dialect: Dialect) -> Profile {
    match dialect {
        Dialect::Postgres => Profile {
            tablespaces: true,
            deferrable: true,
            drop_cascade: true,
            create_if_not_exists: TABLE_INDEX_SEQUENCE,
            drop_if_exists: TABLE_INDEX_SEQUENCE_VIEW,
            current_datetime: "NOW()",
            ..BASE
        },
        Dialect::MySql | Dialect::MariaDb => Profile {
            quote: ('`', '`'),
            schemas: false,
            catalogs: true,
            sequences: matches!(dialect, Dialect::MariaDb),
            create_if_not_exists: TABLE_INDEX_SEQUENCE,
            drop_if_exists: TABLE_INDEX_SEQUENCE_VIEW,
            true_literal: "1",
            false_literal: "0",
            current_datetime: "NOW()",
            ..BASE
        },
        Dialect::Sqlite => Profile {
            schemas: false,
            sequences: false,
            primary_key_names: false,
            create_if_not_exists: TABLE_INDEX_VIEW,
            drop_if_exists: TABLE_INDEX_VIEW,
            true_literal: "1",
            false_literal: "0",
            ..BASE
        },
        Dialect::Mssql => Profile {
            quote: ('[', ']'),
            catalogs: true,
            tablespaces: true,
            restrict_foreign_keys: false,
            drop_if_exists: TABLE_INDEX_SEQUENCE_VIEW,
            true_literal: "1",
            false_literal: "0",
            current_datetime: "GETDATE()",
            ..BASE
        },
        Dialect::Oracle => Profile {
            tablespaces: true,
            deferrable: true,
            restrict_foreign_keys: false,
            drop_cascade: true,
            not_null_names: true,
            true_literal: "1",
            false_literal: "0",
            current_datetime: "SYSTIMESTAMP",
            ..BASE
        },
        Dialect::H2 => Profile {
            catalogs: true,
            drop_cascade: true,
            create_if_not_exists: TABLE_INDEX_SEQUENCE,
            drop_if_exists: TABLE_INDEX_SEQUENCE_VIEW,
            ..BASE
        },
        Dialect::Hsql => Profile {
            catalogs: true,
            drop_cascade: true,
            create_if_not_exists: TABLE_INDEX_SEQUENCE,
            drop_if_exists: TABLE_INDEX_SEQUENCE_VIEW,
            current_datetime: "NOW",
            ..BASE
        },
        Dialect::Derby => BASE,
        Dialect::Db2 => Profile {
            tablespaces: true,
            true_literal: "1",
            false_literal: "0",
            ..BASE
        },
        Dialect::Sybase => Profile {
            quote: ('[', ']'),
            catalogs: true,
            sequences: false,
            tablespaces: true,
            restrict_foreign_keys: false,
            true_literal: "1",
            false_literal: "0",
            current_datetime: "GETDATE()",
            ..BASE
        },
        Dialect::SybaseAsa => Profile {
            quote: ('[', ']'),
            tablespaces: true,
            restrict_foreign_keys: false,
            true_literal: "1",
            false_literal: "0",
            current_datetime: "CURRENT TIMESTAMP",
            ..BASE
        },
        Dialect::Informix => Profile {
            tablespaces: true,
            drop_cascade: true,
            create_if_not_exists: TABLE_INDEX_SEQUENCE,
            drop_if_exists: TABLE_INDEX_SEQUENCE_VIEW,
            true_literal: "'t'",
            false_literal: "'f'",
            current_datetime: "CURRENT YEAR TO FRACTION(5)",
            ..BASE
        },
        Dialect::Firebird => Profile {
            schemas: false,
            auto_increment: false,
            ..BASE
        },
        Dialect::Snowflake => Profile {
            deferrable: true,
            drop_cascade: true,
            create_if_not_exists: TABLE_INDEX_SEQUENCE_VIEW,
            drop_if_exists: TABLE_INDEX_SEQUENCE_VIEW,
            ..BASE
        },
        Dialect::BigQuery => Profile {
            quote: ('`', '`'),
            sequences: false,
            auto_increment: false,
            create_if_not_exists: TABLE_INDEX_VIEW,
            drop_if_exists: TABLE_INDEX_VIEW,
            ..BASE
        },
    }
}

/// Words that must be quoted even under legacy quoting.
const RESERVED_WORDS: &[&str] = &[
    "ALL", "AND", "AS", "BY", "CHECK", "COLUMN", "CONSTRAINT", "CREATE", "DEFAULT", "DELETE",
    "DESC", "DISTINCT", "DROP", "FROM", "GROUP", "INDEX", "INSERT", "INTO", "KEY", "NOT", "NULL",
    "ON", "OR", "ORDER", "PRIMARY", "REFERENCES", "SELECT", "SET", "TABLE", "TO", "UNION",
    "UNIQUE", "UPDATE", "USER", "VALUES", "VIEW", "WHERE",
];

fn needs_quoting(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_digit()
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        || RESERVED_WORDS
            .iter()
            .any(|word| word.eq_ignore_ascii_case(name))
}

/// Describes a database by dialect and configuration alone.
///
/// # Example
///
/// ```rust
/// use oxide_sqlgen::database::{Database, Dialect, OfflineDatabase};
/// use oxide_sqlgen::ObjectName;
///
/// let db = OfflineDatabase::new(Dialect::Postgres).with_version(16, 2);
/// assert_eq!(db.escape_table_name(&ObjectName::from("app.order")), "app.\"order\"");
/// assert!(db.is_at_least(10, 0).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineDatabase {
    dialect: Dialect,
    version: Option<(u32, u32)>,
    default_schema: Option<String>,
    output_default_schema: bool,
    quoting: ObjectQuoting,
}

impl OfflineDatabase {
    /// Creates a descriptor with no version information.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            version: None,
            default_schema: None,
            output_default_schema: false,
            quoting: ObjectQuoting::Legacy,
        }
    }

    #[must_use]
    pub const fn with_version(mut self, major: u32, minor: u32) -> Self {
        self.version = Some((major, minor));
        self
    }

    #[must_use]
    pub fn with_default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }

    /// Qualifies unqualified names with the default schema.
    #[must_use]
    pub const fn with_output_default_schema(mut self, output: bool) -> Self {
        self.output_default_schema = output;
        self
    }

    #[must_use]
    pub const fn with_quoting(mut self, quoting: ObjectQuoting) -> Self {
        self.quoting = quoting;
        self
    }

    const fn profile(&self) -> Profile {
        profile(self.dialect)
    }

    const fn version_unavailable(&self) -> CapabilityError {
        CapabilityError::VersionUnavailable {
            dialect: self.dialect,
        }
    }

    /// Postgres before 10 has no identity columns; serial types stand in.
    fn uses_serial_types(&self) -> bool {
        match self.dialect {
            Dialect::Postgres => self.version.is_some_and(|(major, _)| major < 10),
            Dialect::Informix => true,
            _ => false,
        }
    }
}

impl Database for OfflineDatabase {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn major_version(&self) -> Result<u32, CapabilityError> {
        self.version
            .map(|(major, _)| major)
            .ok_or_else(|| self.version_unavailable())
    }

    fn minor_version(&self) -> Result<u32, CapabilityError> {
        self.version
            .map(|(_, minor)| minor)
            .ok_or_else(|| self.version_unavailable())
    }

    fn supports_schemas(&self) -> bool {
        self.profile().schemas
    }

    fn supports_catalogs(&self) -> bool {
        self.profile().catalogs
    }

    fn supports_sequences(&self) -> bool {
        self.profile().sequences
    }

    fn supports_tablespaces(&self) -> bool {
        self.profile().tablespaces
    }

    fn supports_auto_increment(&self) -> bool {
        self.profile().auto_increment
    }

    fn supports_initially_deferrable_columns(&self) -> bool {
        self.profile().deferrable
    }

    fn supports_restrict_foreign_keys(&self) -> bool {
        self.profile().restrict_foreign_keys
    }

    fn supports_drop_table_cascade_constraints(&self) -> bool {
        self.profile().drop_cascade
    }

    fn supports_primary_key_names(&self) -> bool {
        self.profile().primary_key_names
    }

    fn supports_not_null_constraint_names(&self) -> bool {
        self.profile().not_null_names
    }

    fn supports_create_if_not_exists(&self, kind: ObjectKind) -> bool {
        self.profile().create_if_not_exists.contains(&kind)
    }

    fn supports_drop_if_exists(&self, kind: ObjectKind) -> bool {
        self.profile().drop_if_exists.contains(&kind)
    }

    fn default_schema_name(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    fn output_default_schema(&self) -> bool {
        self.output_default_schema
    }

    fn escape_object_name(&self, name: &str, _kind: ObjectKind) -> String {
        let name = name.trim();
        let quote = match self.quoting {
            ObjectQuoting::Legacy => needs_quoting(name),
            ObjectQuoting::QuoteAll => !name.is_empty(),
        };
        if !quote {
            return name.to_string();
        }
        let (open, close) = self.profile().quote;
        let escaped = name.replace(close, &format!("{close}{close}"));
        format!("{open}{escaped}{close}")
    }

    fn date_literal(&self, iso: &str) -> String {
        let has_time = iso.contains('T');
        match self.dialect {
            Dialect::Oracle if has_time => format!(
                "TO_TIMESTAMP('{}', 'YYYY-MM-DD HH24:MI:SS')",
                iso.replace('T', " ")
            ),
            Dialect::Oracle => format!("TO_DATE('{iso}', 'YYYY-MM-DD')"),
            Dialect::Mssql => format!("'{iso}'"),
            _ => format!("'{}'", iso.replace('T', " ")),
        }
    }

    fn true_literal(&self) -> &'static str {
        self.profile().true_literal
    }

    fn false_literal(&self) -> &'static str {
        self.profile().false_literal
    }

    fn current_datetime_function(&self) -> &'static str {
        self.profile().current_datetime
    }

    fn sequence_next_value(&self, sequence: &ObjectName) -> String {
        let escaped = self.escape_sequence_name(sequence);
        match self.dialect {
            Dialect::Postgres => format!("nextval('{escaped}')"),
            Dialect::Oracle | Dialect::Informix => format!("{escaped}.nextval"),
            _ => format!("NEXT VALUE FOR {escaped}"),
        }
    }

    fn auto_increment_clause(&self, start_with: Option<i64>, increment_by: Option<i64>) -> String {
        let identity = || {
            let mut clause = "GENERATED BY DEFAULT AS IDENTITY".to_string();
            let mut options = Vec::new();
            if let Some(start) = start_with {
                options.push(format!("START WITH {start}"));
            }
            if let Some(increment) = increment_by {
                options.push(format!("INCREMENT BY {increment}"));
            }
            if !options.is_empty() {
                clause.push_str(&format!(" ({})", options.join(" ")));
            }
            clause
        };
        match self.dialect {
            Dialect::Postgres if self.uses_serial_types() => String::new(),
            Dialect::Postgres
            | Dialect::Oracle
            | Dialect::H2
            | Dialect::Hsql
            | Dialect::Derby
            | Dialect::Db2 => identity(),
            Dialect::MySql | Dialect::MariaDb => "AUTO_INCREMENT".to_string(),
            Dialect::Sqlite => "AUTOINCREMENT".to_string(),
            Dialect::Mssql => match (start_with, increment_by) {
                (None, None) => "IDENTITY".to_string(),
                (start, increment) => format!(
                    "IDENTITY ({}, {})",
                    start.unwrap_or(1),
                    increment.unwrap_or(1)
                ),
            },
            Dialect::Sybase => "IDENTITY".to_string(),
            Dialect::SybaseAsa => "DEFAULT AUTOINCREMENT".to_string(),
            Dialect::Snowflake => {
                let mut clause = "AUTOINCREMENT".to_string();
                if let Some(start) = start_with {
                    clause.push_str(&format!(" START {start}"));
                }
                if let Some(increment) = increment_by {
                    clause.push_str(&format!(" INCREMENT {increment}"));
                }
                clause
            }
            Dialect::Informix | Dialect::Firebird | Dialect::BigQuery => String::new(),
        }
    }

    fn column_type_sql(&self, declared: &str, auto_increment: bool) -> String {
        let declared = declared.trim();
        if !(auto_increment && self.uses_serial_types()) {
            return declared.to_string();
        }
        match declared.to_ascii_lowercase().as_str() {
            "int" | "integer" | "int4" => "SERIAL".to_string(),
            "bigint" | "int8" => {
                if self.dialect == Dialect::Informix {
                    "SERIAL8".to_string()
                } else {
                    "BIGSERIAL".to_string()
                }
            }
            "smallint" | "int2" if self.dialect == Dialect::Postgres => "SMALLSERIAL".to_string(),
            _ => declared.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::LiteralValue;
    use chrono::NaiveDate;

    #[test]
    fn test_legacy_quoting() {
        let db = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(db.escape_object_name("users", ObjectKind::Table), "users");
        assert_eq!(db.escape_object_name("user", ObjectKind::Table), "\"user\"");
        assert_eq!(
            db.escape_object_name("first name", ObjectKind::Column),
            "\"first name\""
        );
        assert_eq!(db.escape_object_name("1st", ObjectKind::Column), "\"1st\"");
    }

    #[test]
    fn test_quote_all_per_dialect() {
        let table = ObjectName::new("person");
        let quoted = |dialect| {
            OfflineDatabase::new(dialect)
                .with_quoting(ObjectQuoting::QuoteAll)
                .escape_table_name(&table)
        };
        assert_eq!(quoted(Dialect::Postgres), "\"person\"");
        assert_eq!(quoted(Dialect::MySql), "`person`");
        assert_eq!(quoted(Dialect::Mssql), "[person]");
    }

    #[test]
    fn test_quote_character_doubled() {
        let db = OfflineDatabase::new(Dialect::Mssql);
        assert_eq!(db.escape_object_name("odd]name", ObjectKind::Table), "[odd]]name]");
    }

    #[test]
    fn test_schema_qualification() {
        let pg = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(pg.escape_table_name(&ObjectName::from("app.users")), "app.users");

        // MySQL has no schemas; the schema names the database instead.
        let mysql = OfflineDatabase::new(Dialect::MySql);
        assert_eq!(
            mysql.escape_table_name(&ObjectName::from("shop.orders")),
            "shop.orders"
        );

        let sqlite = OfflineDatabase::new(Dialect::Sqlite);
        assert_eq!(sqlite.escape_table_name(&ObjectName::from("main.t")), "t");
    }

    #[test]
    fn test_output_default_schema() {
        let db = OfflineDatabase::new(Dialect::Postgres)
            .with_default_schema("app")
            .with_output_default_schema(true);
        assert_eq!(db.escape_table_name(&ObjectName::new("users")), "app.users");
        let db = OfflineDatabase::new(Dialect::Postgres).with_default_schema("app");
        assert_eq!(db.escape_table_name(&ObjectName::new("users")), "users");
    }

    #[test]
    fn test_version_probe() {
        let db = OfflineDatabase::new(Dialect::MySql);
        assert_eq!(
            db.major_version(),
            Err(CapabilityError::VersionUnavailable {
                dialect: Dialect::MySql
            })
        );
        let db = db.with_version(8, 0);
        assert_eq!(db.is_at_least(8, 0), Ok(true));
        assert_eq!(db.is_at_least(8, 1), Ok(false));
        assert_eq!(db.is_at_least(5, 7), Ok(true));
    }

    #[test]
    fn test_auto_increment_clauses() {
        let clause = |db: OfflineDatabase| db.auto_increment_clause(Some(100), Some(5));
        assert_eq!(
            clause(OfflineDatabase::new(Dialect::Postgres)),
            "GENERATED BY DEFAULT AS IDENTITY (START WITH 100 INCREMENT BY 5)"
        );
        assert_eq!(clause(OfflineDatabase::new(Dialect::Mssql)), "IDENTITY (100, 5)");
        assert_eq!(clause(OfflineDatabase::new(Dialect::MySql)), "AUTO_INCREMENT");
        assert_eq!(
            OfflineDatabase::new(Dialect::Mssql).auto_increment_clause(None, None),
            "IDENTITY"
        );
        assert_eq!(
            clause(OfflineDatabase::new(Dialect::Postgres).with_version(9, 6)),
            ""
        );
    }

    #[test]
    fn test_serial_types_on_old_postgres() {
        let old = OfflineDatabase::new(Dialect::Postgres).with_version(9, 6);
        assert_eq!(old.column_type_sql("int", true), "SERIAL");
        assert_eq!(old.column_type_sql("BIGINT", true), "BIGSERIAL");
        assert_eq!(old.column_type_sql("int", false), "int");
        let new = OfflineDatabase::new(Dialect::Postgres).with_version(16, 0);
        assert_eq!(new.column_type_sql("int", true), "int");
    }

    #[test]
    fn test_literals() {
        let date = LiteralValue::from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let stamp = LiteralValue::from(
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        );
        let oracle = OfflineDatabase::new(Dialect::Oracle);
        assert_eq!(
            oracle.value_to_sql(&date),
            "TO_DATE('2024-03-01', 'YYYY-MM-DD')"
        );
        assert_eq!(
            oracle.value_to_sql(&stamp),
            "TO_TIMESTAMP('2024-03-01 10:30:00', 'YYYY-MM-DD HH24:MI:SS')"
        );
        let pg = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(pg.value_to_sql(&stamp), "'2024-03-01 10:30:00'");
        assert_eq!(pg.value_to_sql(&LiteralValue::text("O'Brien")), "'O''Brien'");
        assert_eq!(pg.value_to_sql(&LiteralValue::Boolean(true)), "TRUE");
        assert_eq!(
            OfflineDatabase::new(Dialect::Mssql).value_to_sql(&LiteralValue::Boolean(false)),
            "0"
        );
        assert_eq!(
            OfflineDatabase::new(Dialect::Mssql).value_to_sql(&LiteralValue::computed("now()")),
            "GETDATE()"
        );
        assert_eq!(
            pg.value_to_sql(&LiteralValue::next_value_of("seq_id")),
            "nextval('seq_id')"
        );
    }
}
