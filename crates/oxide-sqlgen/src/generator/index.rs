//! Index generators.

use super::{GenerationContext, StatementGenerator, SPECIALIZATION_DATABASE};
use crate::database::{Database, Dialect, ObjectKind};
use crate::error::GenerationFailure;
use crate::object::{DatabaseObject, ObjectName};
use crate::sql::RenderedSql;
use crate::statement::{CreateIndexStatement, DropIndexStatement, IndexColumn};
use crate::validation::{ValidationErrors, Warnings};

/// Index names are schema-qualified except where an index always lives
/// beside its table.
fn escape_index(database: &dyn Database, table: &ObjectName, name: &str) -> String {
    let dialect = database.dialect();
    if dialect.is_mysql_family() || dialect.is_tsql_family() || dialect == Dialect::Postgres {
        database.escape_object_name(name, ObjectKind::Index)
    } else {
        database.escape_index_name(table, name)
    }
}

fn index_column(database: &dyn Database, table: &ObjectName, column: &IndexColumn) -> String {
    let name = if column.computed {
        column.name.trim().to_string()
    } else {
        database.escape_column_name(table, &column.name)
    };
    if column.descending {
        format!("{name} DESC")
    } else {
        name
    }
}

fn index_columns(database: &dyn Database, statement: &CreateIndexStatement) -> String {
    statement
        .columns
        .iter()
        .map(|column| index_column(database, &statement.table, column))
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_index(statement: &CreateIndexStatement, database: &dyn Database) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors
        .check_required_field("tableName", &statement.table)
        .check_required_field("columns", &statement.columns);
    if !database.supports_create_if_not_exists(ObjectKind::Index) {
        errors.check_disallowed_field("ifNotExists", &statement.if_not_exists, database);
    }
    errors
}

fn index_object(statement: &CreateIndexStatement) -> Vec<DatabaseObject> {
    let name = statement.index_name.as_deref().unwrap_or_default();
    vec![DatabaseObject::index(name, Some(&statement.table))]
}

fn required_name(statement: &CreateIndexStatement) -> Result<&str, GenerationFailure> {
    statement
        .index_name
        .as_deref()
        .ok_or_else(|| GenerationFailure::Invalid("indexName is required".into()))
}

/// `CREATE [UNIQUE] INDEX <name> ON <table>(<columns>)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateIndexGenerator;

impl StatementGenerator for CreateIndexGenerator {
    type Statement = CreateIndexStatement;

    fn name(&self) -> &'static str {
        "CreateIndexGenerator"
    }

    fn validate(&self, statement: &CreateIndexStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = check_index(statement, database);
        errors.check_required_field("indexName", &statement.index_name);
        if !database.dialect().is_tsql_family() {
            errors.check_disallowed_field("clustered", &statement.clustered, database);
        }
        errors
    }

    fn warn(&self, statement: &CreateIndexStatement, database: &dyn Database) -> Warnings {
        let mut warnings = Warnings::new();
        if statement.tablespace.is_some() && !database.supports_tablespaces() {
            warnings.add(format!(
                "Tablespaces are ignored on {}",
                database.short_name()
            ));
        }
        warnings
    }

    fn generate(
        &self,
        statement: &CreateIndexStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let dialect = database.dialect();
        let name = required_name(statement)?;

        let mut sql = String::from("CREATE ");
        if statement.unique {
            sql.push_str("UNIQUE ");
        }
        if statement.clustered && dialect.is_tsql_family() {
            sql.push_str("CLUSTERED ");
        }
        sql.push_str("INDEX ");
        if statement.if_not_exists && database.supports_create_if_not_exists(ObjectKind::Index) {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&format!(
            "{} ON {}({})",
            escape_index(database, &statement.table, name),
            database.escape_table_name(&statement.table),
            index_columns(database, statement)
        ));
        if let Some(tablespace) = statement
            .tablespace
            .as_deref()
            .filter(|_| database.supports_tablespaces())
        {
            let keyword = match dialect {
                _ if dialect.is_tsql_family() => "ON",
                Dialect::Informix => "IN",
                _ => "TABLESPACE",
            };
            sql.push_str(&format!(" {keyword} {tablespace}"));
        }
        Ok(vec![RenderedSql::new(sql, index_object(statement))])
    }
}

/// PostgreSQL allows unnamed indexes and clusters the table on request.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateIndexGeneratorPostgres;

impl StatementGenerator for CreateIndexGeneratorPostgres {
    type Statement = CreateIndexStatement;

    fn name(&self) -> &'static str {
        "CreateIndexGeneratorPostgres"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &CreateIndexStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::Postgres
    }

    fn validate(&self, statement: &CreateIndexStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = check_index(statement, database);
        if statement.clustered && statement.index_name.is_none() {
            errors.add_error("A clustered index requires indexName");
        }
        errors
    }

    fn generate(
        &self,
        statement: &CreateIndexStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let mut sql = String::from("CREATE ");
        if statement.unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str("INDEX ");
        if statement.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        if let Some(name) = statement.index_name.as_deref() {
            sql.push_str(&escape_index(database, &statement.table, name));
            sql.push(' ');
        }
        sql.push_str(&format!("ON {table}({})", index_columns(database, statement)));
        if let Some(tablespace) = statement.tablespace.as_deref() {
            sql.push_str(&format!(" TABLESPACE {tablespace}"));
        }

        let mut rendered = vec![RenderedSql::new(sql, index_object(statement))];
        if statement.clustered {
            let name = required_name(statement)?;
            rendered.push(RenderedSql::new(
                format!(
                    "CLUSTER {table} USING {}",
                    escape_index(database, &statement.table, name)
                ),
                vec![DatabaseObject::table(&statement.table)],
            ));
        }
        Ok(rendered)
    }
}

/// Firebird orders a whole index at once and indexes expressions with
/// `COMPUTED BY`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateIndexGeneratorFirebird;

impl StatementGenerator for CreateIndexGeneratorFirebird {
    type Statement = CreateIndexStatement;

    fn name(&self) -> &'static str {
        "CreateIndexGeneratorFirebird"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &CreateIndexStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::Firebird
    }

    fn validate(&self, statement: &CreateIndexStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = check_index(statement, database);
        errors.check_required_field("indexName", &statement.index_name);
        let columns = &statement.columns;
        if columns.iter().any(|c| c.descending) && !columns.iter().all(|c| c.descending) {
            errors.add_error("Cannot mix ascending and descending columns in one index on firebird");
        }
        if columns.iter().any(|c| c.computed) && columns.len() > 1 {
            errors.add_error("A computed index on firebird takes exactly one expression");
        }
        errors
    }

    fn generate(
        &self,
        statement: &CreateIndexStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let name = required_name(statement)?;
        let columns = &statement.columns;
        let mut sql = String::from("CREATE ");
        if statement.unique {
            sql.push_str("UNIQUE ");
        }
        if !columns.is_empty() && columns.iter().all(|c| c.descending) {
            sql.push_str("DESCENDING ");
        }
        sql.push_str(&format!(
            "INDEX {} ON {}",
            escape_index(database, &statement.table, name),
            database.escape_table_name(&statement.table)
        ));
        match columns.first() {
            Some(expression) if expression.computed => {
                sql.push_str(&format!(" COMPUTED BY ({})", expression.name.trim()));
            }
            _ => {
                let names = columns
                    .iter()
                    .map(|column| database.escape_column_name(&statement.table, &column.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                sql.push_str(&format!("({names})"));
            }
        }
        Ok(vec![RenderedSql::new(sql, index_object(statement))])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DropIndexGenerator;

impl DropIndexGenerator {
    /// Dialects where an index is named through its table.
    const fn needs_table(dialect: Dialect) -> bool {
        dialect.is_mysql_family() || matches!(dialect, Dialect::Mssql | Dialect::Sybase)
    }
}

impl StatementGenerator for DropIndexGenerator {
    type Statement = DropIndexStatement;

    fn name(&self) -> &'static str {
        "DropIndexGenerator"
    }

    fn validate(&self, statement: &DropIndexStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("indexName", &statement.index_name);
        if Self::needs_table(database.dialect()) {
            errors.check_required_field("tableName", &statement.table);
        }
        errors
    }

    fn generate(
        &self,
        statement: &DropIndexStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let dialect = database.dialect();
        let index = statement.index_name.as_str();
        let sql = match statement.table.as_ref() {
            Some(table) if dialect == Dialect::Sybase => format!(
                "DROP INDEX {}.{}",
                database.escape_table_name(table),
                database.escape_object_name(index, ObjectKind::Index)
            ),
            Some(table) if Self::needs_table(dialect) => format!(
                "DROP INDEX {} ON {}",
                database.escape_object_name(index, ObjectKind::Index),
                database.escape_table_name(table)
            ),
            Some(table) => format!("DROP INDEX {}", database.escape_index_name(table, index)),
            None if Self::needs_table(dialect) => {
                return Err(GenerationFailure::Invalid("tableName is required".into()));
            }
            None => format!(
                "DROP INDEX {}",
                database.escape_object_name(index, ObjectKind::Index)
            ),
        };
        Ok(vec![RenderedSql::new(
            sql,
            vec![DatabaseObject::index(index, statement.table.as_ref())],
        )])
    }
}
