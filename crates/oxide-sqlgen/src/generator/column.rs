//! Column-level generators.

use std::sync::OnceLock;

use regex::Regex;

use super::{default_clause, GenerationContext, StatementGenerator, SPECIALIZATION_DATABASE};
use crate::clause::ClauseSequence;
use crate::database::{Database, Dialect};
use crate::error::{ClauseError, GenerationFailure};
use crate::object::{DatabaseObject, ObjectName};
use crate::sql::RenderedSql;
use crate::statement::{
    AddColumnStatement, AddForeignKeyConstraintStatement, AddUniqueConstraintStatement,
    DropColumnStatement, ForeignKeyAction, ModifyDataTypeStatement, NewColumn,
    RenameColumnStatement, ReorganizeTableStatement, SetNullableStatement, Statement,
};
use crate::validation::{ValidationErrors, Warnings};

fn reference_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^([\w._]+)\s*\(\s*(\w+)\s*\)$").ok())
        .as_ref()
}

/// Splits `schema.table(column)` into the referenced table and column.
fn parse_reference(references: &str) -> Option<(ObjectName, String)> {
    let captures = reference_pattern()?.captures(references.trim())?;
    let table = captures.get(1)?.as_str();
    let column = captures.get(2)?.as_str();
    Some((ObjectName::from(table), column.to_string()))
}

fn unparseable_reference(references: &str) -> String {
    format!("Don't know how to find table and column names from {references}")
}

/// `NOT NULL`, named where the dialect names not-null constraints.
fn not_null_clause(database: &dyn Database, constraint_name: Option<&str>) -> String {
    match constraint_name.filter(|_| database.supports_not_null_constraint_names()) {
        Some(name) => format!(
            "CONSTRAINT {} NOT NULL",
            database.escape_constraint_name(name)
        ),
        None => "NOT NULL".to_string(),
    }
}

/// ALTER TABLE ... ADD for one or more columns.
///
/// Each column is a clause tree keyed `add`, `name`, `type`,
/// `auto increment`, `default`, `not null` or `null`, `primary key`,
/// `remarks`, `before` and `after`. Unique and foreign-key options are
/// rendered through the registry as separate constraint statements.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddColumnGenerator;

impl AddColumnGenerator {
    /// Clause tree for one added column.
    ///
    /// # Errors
    ///
    /// Fails only on an internal key collision.
    pub fn column_clauses(
        table: &ObjectName,
        column: &NewColumn,
        database: &dyn Database,
    ) -> Result<ClauseSequence, ClauseError> {
        let dialect = database.dialect();
        let spec = &column.column;
        let auto_increment = spec
            .auto_increment
            .filter(|_| database.supports_auto_increment());
        let declared = spec.data_type.trim();
        let column_type = database.column_type_sql(declared, auto_increment.is_some());
        let serial = column_type != declared;

        let mut clauses = ClauseSequence::new();
        clauses
            .append("add", "ADD")?
            .append("name", database.escape_column_name(table, &spec.name))?
            .append("type", column_type)?;
        if let Some(auto) = auto_increment.filter(|_| !serial) {
            clauses.append(
                "auto increment",
                database.auto_increment_clause(auto.start_with, auto.increment_by),
            )?;
        }
        if let Some(value) = spec.default_value.as_ref().filter(|_| !serial) {
            clauses.append(
                "default",
                default_clause(
                    database,
                    table,
                    &spec.name,
                    spec.default_constraint_name.as_deref(),
                    value,
                ),
            )?;
        }
        if !spec.nullable {
            clauses.append(
                "not null",
                not_null_clause(database, spec.not_null_constraint_name.as_deref()),
            )?;
        } else if dialect.is_sybase_family()
            || dialect.is_mysql_family()
            || (dialect == Dialect::Mssql && declared.eq_ignore_ascii_case("timestamp"))
        {
            clauses.append("null", "NULL")?;
        }
        if column.primary_key {
            clauses.append("primary key", "PRIMARY KEY")?;
        }
        if let Some(remarks) = spec.remarks.as_deref().filter(|_| dialect.is_mysql_family()) {
            clauses.append(
                "remarks",
                format!("COMMENT '{}'", database.escape_string(remarks.trim())),
            )?;
        }
        if let Some(before) = column.add_before_column.as_deref() {
            clauses.append(
                "before",
                format!("BEFORE {}", database.escape_column_name(table, before)),
            )?;
        }
        if let Some(after) = column.add_after_column.as_deref() {
            clauses.append(
                "after",
                format!("AFTER {}", database.escape_column_name(table, after)),
            )?;
        }
        Ok(clauses)
    }

    /// Renders the statement, letting `edit` rework each column's clause
    /// tree first. MySQL adds several columns in one ALTER TABLE; other
    /// dialects get one statement per column.
    ///
    /// # Errors
    ///
    /// Propagates failures from `edit` and from the nested constraint
    /// statements.
    pub fn render_with<F>(
        statement: &AddColumnStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
        edit: F,
    ) -> Result<Vec<RenderedSql>, GenerationFailure>
    where
        F: Fn(&NewColumn, &mut ClauseSequence) -> Result<(), GenerationFailure>,
    {
        let table = &statement.table;
        let prefix = format!("ALTER TABLE {}", database.escape_table_name(table));
        let mut columns = Vec::with_capacity(statement.columns.len());
        for column in &statement.columns {
            let mut clauses = Self::column_clauses(table, column, database)?;
            edit(column, &mut clauses)?;
            columns.push((column, clauses.render()));
        }

        let mut rendered = Vec::new();
        if database.dialect().is_mysql_family() && columns.len() > 1 {
            let text = columns
                .iter()
                .map(|(_, sql)| sql.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let affected = columns
                .iter()
                .map(|(column, _)| DatabaseObject::column(table, &column.column.name))
                .collect();
            rendered.push(RenderedSql::new(format!("{prefix} {text}"), affected));
            for column in &statement.columns {
                rendered.extend(Self::constraints(table, column, database, context)?);
            }
        } else {
            for (column, sql) in &columns {
                rendered.push(RenderedSql::new(
                    format!("{prefix} {sql}"),
                    vec![DatabaseObject::column(table, &column.column.name)],
                ));
                rendered.extend(Self::constraints(table, column, database, context)?);
            }
        }
        Ok(rendered)
    }

    /// The unique and foreign-key constraints declared on a new column.
    fn constraints(
        table: &ObjectName,
        column: &NewColumn,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let name = column.column.name.as_str();
        let mut rendered = Vec::new();
        if column.unique {
            let mut unique = AddUniqueConstraintStatement::new(table.clone(), &[name]);
            if let Some(constraint) = column.unique_constraint_name.as_deref() {
                unique = unique.with_name(constraint);
            }
            let unique: Statement = unique.into();
            rendered.extend(context.generate(&unique, database)?);
        }
        if let Some(reference) = &column.foreign_key {
            let (referenced_table, referenced_column) = parse_reference(&reference.references)
                .ok_or_else(|| GenerationFailure::Invalid(unparseable_reference(&reference.references)))?;
            let mut foreign_key = AddForeignKeyConstraintStatement::new(
                reference.constraint_name.as_str(),
                table.clone(),
                &[name],
                referenced_table,
                &[referenced_column.as_str()],
            );
            if reference.delete_cascade {
                foreign_key = foreign_key.on_delete(ForeignKeyAction::Cascade);
            }
            let foreign_key: Statement = foreign_key.into();
            rendered.extend(context.generate(&foreign_key, database)?);
        }
        Ok(rendered)
    }
}

impl StatementGenerator for AddColumnGenerator {
    type Statement = AddColumnStatement;

    fn name(&self) -> &'static str {
        "AddColumnGenerator"
    }

    fn validate(&self, statement: &AddColumnStatement, database: &dyn Database) -> ValidationErrors {
        let dialect = database.dialect();
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("tableName", &statement.table)
            .check_required_field("columns", &statement.columns);

        for column in &statement.columns {
            let spec = &column.column;
            errors.check_required_field("columnName", &spec.name);
            if !spec.computed {
                errors.check_required_field("columnType", &spec.data_type);
            }
            if let Some(value) = &spec.default_value {
                errors.check_finite_value("defaultValue", value);
            }

            let old_h2 =
                dialect == Dialect::H2 && database.major_version().is_ok_and(|major| major < 2);
            if column.primary_key
                && (matches!(dialect, Dialect::Db2 | Dialect::Derby | Dialect::Sqlite) || old_h2)
            {
                errors.add_error("Cannot add a primary key column");
            }
            if dialect.is_mysql_family() && spec.auto_increment.is_some() && !column.primary_key {
                errors.add_error("Cannot add a non-primary key identity column");
            }
            if !(dialect.is_mysql_family() || dialect == Dialect::H2) {
                errors.check_disallowed_field("addAfterColumn", &column.add_after_column, database);
            }
            if !matches!(dialect, Dialect::H2 | Dialect::Hsql) {
                errors.check_disallowed_field("addBeforeColumn", &column.add_before_column, database);
            }
            errors.check_disallowed_field("addAtPosition", &column.add_at_position, database);

            if let Some(reference) = &column.foreign_key {
                errors.check_required_field("foreignKeyName", &reference.constraint_name);
                if parse_reference(&reference.references).is_none() {
                    errors.add_error(unparseable_reference(&reference.references));
                }
            }
        }
        errors
    }

    fn generate(
        &self,
        statement: &AddColumnStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        Self::render_with(statement, database, context, |_, _| Ok(()))
    }
}

/// ADD COLUMN for dialects that require `DEFAULT` straight after the type,
/// ahead of identity and nullability clauses.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddColumnGeneratorDefaultClauseBeforeNotNull;

impl StatementGenerator for AddColumnGeneratorDefaultClauseBeforeNotNull {
    type Statement = AddColumnStatement;

    fn name(&self) -> &'static str {
        "AddColumnGeneratorDefaultClauseBeforeNotNull"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &AddColumnStatement, database: &dyn Database) -> bool {
        matches!(
            database.dialect(),
            Dialect::Oracle
                | Dialect::Derby
                | Dialect::Db2
                | Dialect::H2
                | Dialect::Hsql
                | Dialect::Firebird
                | Dialect::Informix
                | Dialect::Sybase
                | Dialect::SybaseAsa
        )
    }

    fn validate(&self, statement: &AddColumnStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = AddColumnGenerator.validate(statement, database);
        if database.dialect() == Dialect::Derby
            && statement
                .columns
                .iter()
                .any(|column| column.column.auto_increment.is_some())
        {
            errors.add_error("Cannot add an identity column to derby");
        }
        errors
    }

    fn generate(
        &self,
        statement: &AddColumnStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        AddColumnGenerator::render_with(statement, database, context, |_, clauses| {
            if let Some(default) = clauses.remove("default") {
                clauses.insert_after("type", "default", default)?;
            }
            Ok(())
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DropColumnGenerator;

impl StatementGenerator for DropColumnGenerator {
    type Statement = DropColumnStatement;

    fn name(&self) -> &'static str {
        "DropColumnGenerator"
    }

    /// SQLite gained DROP COLUMN in 3.35.
    fn is_applicable(&self, _statement: &DropColumnStatement, database: &dyn Database) -> bool {
        database.dialect() != Dialect::Sqlite || database.is_at_least(3, 35).unwrap_or(true)
    }

    fn validate(&self, statement: &DropColumnStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("tableName", &statement.table)
            .check_required_field("columns", &statement.columns);
        for column in &statement.columns {
            errors.check_required_field("columnName", column);
        }
        errors
    }

    fn generate(
        &self,
        statement: &DropColumnStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = &statement.table;
        let prefix = format!("ALTER TABLE {}", database.escape_table_name(table));
        let drop = |column: &str| format!("DROP COLUMN {}", database.escape_column_name(table, column));

        if database.dialect().is_mysql_family() && statement.columns.len() > 1 {
            let drops = statement
                .columns
                .iter()
                .map(|column| drop(column))
                .collect::<Vec<_>>()
                .join(", ");
            let affected = statement
                .columns
                .iter()
                .map(|column| DatabaseObject::column(table, column))
                .collect();
            return Ok(vec![RenderedSql::new(format!("{prefix} {drops}"), affected)]);
        }
        Ok(statement
            .columns
            .iter()
            .map(|column| {
                RenderedSql::new(
                    format!("{prefix} {}", drop(column)),
                    vec![DatabaseObject::column(table, column)],
                )
            })
            .collect())
    }
}

/// Renames a column, branching across dialect families.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenameColumnGenerator;

impl RenameColumnGenerator {
    /// MySQL 8 and MariaDB 10.5 know RENAME COLUMN; older servers need
    /// CHANGE with the full column type.
    fn mysql(
        statement: &RenameColumnStatement,
        database: &dyn Database,
        table: &str,
        old: &str,
        new: &str,
    ) -> Result<String, GenerationFailure> {
        let rename_keyword = if database.dialect() == Dialect::MariaDb {
            database.is_at_least(10, 5)
        } else {
            database.is_at_least(8, 0)
        };
        match (rename_keyword, statement.column_data_type.as_deref()) {
            (Ok(true), _) => Ok(format!("ALTER TABLE {table} RENAME COLUMN {old} TO {new}")),
            (_, Some(data_type)) => Ok(format!(
                "ALTER TABLE {table} CHANGE {old} {new} {}",
                data_type.trim()
            )),
            (Ok(false), None) => Err(GenerationFailure::Invalid(format!(
                "columnDataType is required to rename a column on {}",
                database.short_name()
            ))),
            (Err(err), None) => Err(err.into()),
        }
    }
}

impl StatementGenerator for RenameColumnGenerator {
    type Statement = RenameColumnStatement;

    fn name(&self) -> &'static str {
        "RenameColumnGenerator"
    }

    /// SQLite gained RENAME COLUMN in 3.25.
    fn is_applicable(&self, _statement: &RenameColumnStatement, database: &dyn Database) -> bool {
        database.dialect() != Dialect::Sqlite || database.is_at_least(3, 25).unwrap_or(true)
    }

    fn validate(&self, statement: &RenameColumnStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("tableName", &statement.table)
            .check_required_field("oldColumnName", &statement.old_name)
            .check_required_field("newColumnName", &statement.new_name);
        if database.dialect().is_mysql_family() {
            errors.check_required_field("columnDataType", &statement.column_data_type);
        }
        errors
    }

    fn generate(
        &self,
        statement: &RenameColumnStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table_name = &statement.table;
        let table = database.escape_table_name(table_name);
        let old = database.escape_column_name(table_name, &statement.old_name);
        let new = database.escape_column_name(table_name, &statement.new_name);
        let mut sql = match database.dialect() {
            Dialect::Mssql => format!(
                "exec sp_rename '{table}.{old}', '{}', 'COLUMN'",
                statement.new_name
            ),
            Dialect::MySql | Dialect::MariaDb => Self::mysql(statement, database, &table, &old, &new)?,
            Dialect::Sybase => format!(
                "exec sp_rename '{}.{}', '{}'",
                table_name.name, statement.old_name, statement.new_name
            ),
            Dialect::H2 | Dialect::Hsql => {
                format!("ALTER TABLE {table} ALTER COLUMN {old} RENAME TO {new}")
            }
            Dialect::Firebird => format!("ALTER TABLE {table} ALTER COLUMN {old} TO {new}"),
            Dialect::Derby | Dialect::Informix => format!("RENAME COLUMN {table}.{old} TO {new}"),
            Dialect::SybaseAsa => format!("ALTER TABLE {table} RENAME {old} TO {new}"),
            _ => format!("ALTER TABLE {table} RENAME COLUMN {old} TO {new}"),
        };
        if let Some(remarks) = statement
            .remarks
            .as_deref()
            .filter(|_| database.dialect().is_mysql_family())
        {
            sql.push_str(&format!(" COMMENT '{}'", database.escape_string(remarks)));
        }
        Ok(vec![RenderedSql::new(
            sql,
            vec![
                DatabaseObject::column(table_name, &statement.old_name),
                DatabaseObject::column(table_name, &statement.new_name),
            ],
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ModifyDataTypeGenerator;

impl StatementGenerator for ModifyDataTypeGenerator {
    type Statement = ModifyDataTypeStatement;

    fn name(&self) -> &'static str {
        "ModifyDataTypeGenerator"
    }

    fn is_applicable(&self, _statement: &ModifyDataTypeStatement, database: &dyn Database) -> bool {
        database.dialect() != Dialect::Sqlite
    }

    fn validate(&self, statement: &ModifyDataTypeStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("tableName", &statement.table)
            .check_required_field("columnName", &statement.column)
            .check_required_field("newDataType", &statement.new_data_type);
        errors
    }

    fn generate(
        &self,
        statement: &ModifyDataTypeStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let column = database.escape_column_name(&statement.table, &statement.column);
        let data_type = statement.new_data_type.trim();
        let sql = match database.dialect() {
            Dialect::Informix => format!("ALTER TABLE {table} MODIFY ({column} {data_type})"),
            Dialect::MySql
            | Dialect::MariaDb
            | Dialect::Oracle
            | Dialect::Sybase
            | Dialect::SybaseAsa => format!("ALTER TABLE {table} MODIFY {column} {data_type}"),
            Dialect::Derby | Dialect::Db2 | Dialect::BigQuery => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} SET DATA TYPE {data_type}")
            }
            Dialect::Postgres | Dialect::Firebird | Dialect::Snowflake => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} TYPE {data_type}")
            }
            _ => format!("ALTER TABLE {table} ALTER COLUMN {column} {data_type}"),
        };
        Ok(vec![RenderedSql::new(
            sql,
            vec![DatabaseObject::column(&statement.table, &statement.column)],
        )])
    }
}

/// Adds or drops NOT NULL on an existing column.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetNullableGenerator;

impl StatementGenerator for SetNullableGenerator {
    type Statement = SetNullableStatement;

    fn name(&self) -> &'static str {
        "SetNullableGenerator"
    }

    fn is_applicable(&self, _statement: &SetNullableStatement, database: &dyn Database) -> bool {
        database.dialect() != Dialect::Sqlite
    }

    fn validate(&self, statement: &SetNullableStatement, database: &dyn Database) -> ValidationErrors {
        let dialect = database.dialect();
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("tableName", &statement.table)
            .check_required_field("columnName", &statement.column);
        if dialect.is_mysql_family()
            || matches!(dialect, Dialect::Mssql | Dialect::Sybase | Dialect::Informix)
        {
            errors.check_required_field("columnDataType", &statement.column_data_type);
        }
        errors
    }

    fn warn(&self, statement: &SetNullableStatement, database: &dyn Database) -> Warnings {
        let mut warnings = Warnings::new();
        if statement.constraint_name.is_some() && !database.supports_not_null_constraint_names() {
            warnings.add(format!(
                "Not-null constraint names are ignored on {}",
                database.short_name()
            ));
        }
        warnings
    }

    fn generate(
        &self,
        statement: &SetNullableStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let column = database.escape_column_name(&statement.table, &statement.column);
        let data_type = statement.column_data_type.as_deref().map_or("", str::trim);
        let nullability = if statement.nullable { "NULL" } else { "NOT NULL" };

        let sql = match database.dialect() {
            Dialect::Oracle => {
                let clause = if statement.nullable {
                    "NULL".to_string()
                } else {
                    not_null_clause(database, statement.constraint_name.as_deref())
                };
                format!("ALTER TABLE {table} MODIFY {column} {clause}")
            }
            Dialect::Mssql => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} {data_type} {nullability}")
            }
            Dialect::MySql | Dialect::MariaDb | Dialect::Sybase => {
                format!("ALTER TABLE {table} MODIFY {column} {data_type} {nullability}")
            }
            Dialect::SybaseAsa => format!("ALTER TABLE {table} ALTER {column} {nullability}"),
            Dialect::Derby => format!("ALTER TABLE {table} ALTER COLUMN {column} {nullability}"),
            Dialect::H2 | Dialect::Hsql => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} SET {nullability}")
            }
            Dialect::Informix => {
                let suffix = if statement.nullable { "" } else { " NOT NULL" };
                format!("ALTER TABLE {table} MODIFY ({column} {data_type}{suffix})")
            }
            _ => {
                let action = if statement.nullable { "DROP" } else { "SET" };
                format!("ALTER TABLE {table} ALTER COLUMN {column} {action} NOT NULL")
            }
        };

        let mut rendered = vec![RenderedSql::new(
            sql,
            vec![DatabaseObject::column(&statement.table, &statement.column)],
        )];
        if database.dialect() == Dialect::Db2 {
            let reorg: Statement = ReorganizeTableStatement::new(statement.table.clone()).into();
            rendered.extend(context.generate(&reorg, database)?);
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{render_sql, validation_errors};
    use super::*;
    use crate::database::OfflineDatabase;
    use crate::error::GenerateError;
    use crate::registry::SqlGeneratorRegistry;
    use crate::statement::ColumnSpec;

    #[test]
    fn test_parse_reference() {
        assert_eq!(
            parse_reference("app.person(id)"),
            Some((ObjectName::from("app.person"), "id".to_string()))
        );
        assert_eq!(
            parse_reference("person ( id )"),
            Some((ObjectName::new("person"), "id".to_string()))
        );
        assert_eq!(parse_reference("person.id"), None);
    }

    #[test]
    fn test_add_column_postgres() {
        let statement = AddColumnStatement::new("person")
            .column(ColumnSpec::new("age", "INT").not_null().default_value(0));
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Postgres)),
            ["ALTER TABLE person ADD age INT DEFAULT 0 NOT NULL"]
        );
    }

    #[test]
    fn test_add_columns_mysql_single_statement() {
        let statement = AddColumnStatement::new("person")
            .column(ColumnSpec::new("a", "INT"))
            .column(ColumnSpec::new("b", "VARCHAR(10)"));
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::MySql)),
            ["ALTER TABLE person ADD a INT NULL, ADD b VARCHAR(10) NULL"]
        );
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Postgres)),
            [
                "ALTER TABLE person ADD a INT",
                "ALTER TABLE person ADD b VARCHAR(10)",
            ]
        );
    }

    #[test]
    fn test_add_column_mssql_named_default() {
        let statement = AddColumnStatement::new("person")
            .column(ColumnSpec::new("active", "BIT").default_value(true));
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Mssql)),
            ["ALTER TABLE person ADD active BIT CONSTRAINT DF_person_active DEFAULT 1"]
        );
    }

    #[test]
    fn test_add_column_delegates_constraints() {
        let column = NewColumn::from(ColumnSpec::new("org_id", "INT"))
            .unique(Some("uq_org"))
            .references("fk_org", "org(id)", true);
        let statement = AddColumnStatement::new("person").column(column);
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Postgres)),
            [
                "ALTER TABLE person ADD org_id INT",
                "ALTER TABLE person ADD CONSTRAINT uq_org UNIQUE (org_id)",
                "ALTER TABLE person ADD CONSTRAINT fk_org FOREIGN KEY (org_id) REFERENCES org (id) ON DELETE CASCADE",
            ]
        );
    }

    #[test]
    fn test_add_column_default_before_identity() {
        let statement = AddColumnStatement::new("person").column(
            ColumnSpec::new("code", "INT")
                .default_value(1)
                .auto_increment()
                .not_null(),
        );
        let db = OfflineDatabase::new(Dialect::Db2);
        let best = SqlGeneratorRegistry::global()
            .best_generator(&statement.clone().into(), &db)
            .unwrap();
        assert_eq!(best.name(), "AddColumnGeneratorDefaultClauseBeforeNotNull");
        assert_eq!(
            render_sql(statement.clone(), &db),
            ["ALTER TABLE person ADD code INT DEFAULT 1 GENERATED BY DEFAULT AS IDENTITY NOT NULL"]
        );
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Postgres)),
            ["ALTER TABLE person ADD code INT GENERATED BY DEFAULT AS IDENTITY DEFAULT 1 NOT NULL"]
        );
    }

    #[test]
    fn test_add_column_validation() {
        let pk = AddColumnStatement::new("person")
            .column(NewColumn::from(ColumnSpec::new("id", "INT")).primary_key());
        assert_eq!(
            validation_errors(pk, &OfflineDatabase::new(Dialect::Sqlite)),
            ["Cannot add a primary key column"]
        );

        let after = AddColumnStatement::new("person")
            .column(NewColumn::from(ColumnSpec::new("age", "INT")).after("name"));
        assert_eq!(
            validation_errors(after.clone(), &OfflineDatabase::new(Dialect::Postgres)),
            ["addAfterColumn is not allowed on postgresql"]
        );
        assert!(validation_errors(after, &OfflineDatabase::new(Dialect::MySql)).is_empty());

        let reference = AddColumnStatement::new("person")
            .column(NewColumn::from(ColumnSpec::new("org", "INT")).references("fk", "org.id", false));
        assert_eq!(
            validation_errors(reference, &OfflineDatabase::new(Dialect::Postgres)),
            ["Don't know how to find table and column names from org.id"]
        );

        let identity = AddColumnStatement::new("person")
            .column(ColumnSpec::new("seq", "INT").auto_increment());
        assert_eq!(
            validation_errors(identity, &OfflineDatabase::new(Dialect::Derby)),
            ["Cannot add an identity column to derby"]
        );
    }

    #[test]
    fn test_drop_columns() {
        let statement = DropColumnStatement::new("person", &["a", "b"]);
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::MySql)),
            ["ALTER TABLE person DROP COLUMN a, DROP COLUMN b"]
        );
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Postgres)),
            ["ALTER TABLE person DROP COLUMN a", "ALTER TABLE person DROP COLUMN b"]
        );
        let old_sqlite = OfflineDatabase::new(Dialect::Sqlite).with_version(3, 30);
        assert!(!SqlGeneratorRegistry::global().supports(&statement.into(), &old_sqlite));
    }

    #[test]
    fn test_rename_column_per_dialect() {
        let statement = RenameColumnStatement::new("person", "name", "full_name");
        let sql = |db: OfflineDatabase| render_sql(statement.clone(), &db);
        assert_eq!(
            sql(OfflineDatabase::new(Dialect::Postgres)),
            ["ALTER TABLE person RENAME COLUMN name TO full_name"]
        );
        assert_eq!(
            sql(OfflineDatabase::new(Dialect::Mssql)),
            ["exec sp_rename 'person.name', 'full_name', 'COLUMN'"]
        );
        assert_eq!(
            sql(OfflineDatabase::new(Dialect::H2)),
            ["ALTER TABLE person ALTER COLUMN name RENAME TO full_name"]
        );
        assert_eq!(
            sql(OfflineDatabase::new(Dialect::Derby)),
            ["RENAME COLUMN person.name TO full_name"]
        );
        assert_eq!(
            sql(OfflineDatabase::new(Dialect::MySql).with_version(8, 0)),
            ["ALTER TABLE person RENAME COLUMN name TO full_name"]
        );
    }

    #[test]
    fn test_rename_column_old_mysql_uses_change() {
        let statement = RenameColumnStatement::new("person", "name", "full_name")
            .with_data_type("VARCHAR(255)");
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::MySql).with_version(5, 7)),
            ["ALTER TABLE person CHANGE name full_name VARCHAR(255)"]
        );
    }

    #[test]
    fn test_rename_column_version_probe_failure() {
        let statement: Statement = RenameColumnStatement::new("person", "name", "full_name").into();
        let result = SqlGeneratorRegistry::global()
            .generate(&statement, &OfflineDatabase::new(Dialect::MySql));
        assert!(matches!(
            result,
            Err(GenerateError::Failed {
                generator: "RenameColumnGenerator",
                source: GenerationFailure::Capability(_),
                ..
            })
        ));
    }

    #[test]
    fn test_modify_data_type_per_dialect() {
        let statement = ModifyDataTypeStatement::new("person", "name", "TEXT");
        let sql = |dialect| render_sql(statement.clone(), &OfflineDatabase::new(dialect));
        assert_eq!(sql(Dialect::Postgres), ["ALTER TABLE person ALTER COLUMN name TYPE TEXT"]);
        assert_eq!(sql(Dialect::MySql), ["ALTER TABLE person MODIFY name TEXT"]);
        assert_eq!(sql(Dialect::Db2), ["ALTER TABLE person ALTER COLUMN name SET DATA TYPE TEXT"]);
        assert_eq!(sql(Dialect::Mssql), ["ALTER TABLE person ALTER COLUMN name TEXT"]);
        assert_eq!(sql(Dialect::Informix), ["ALTER TABLE person MODIFY (name TEXT)"]);
    }

    #[test]
    fn test_set_nullable() {
        let not_null = SetNullableStatement::new("person", "name", false);
        assert_eq!(
            render_sql(not_null.clone(), &OfflineDatabase::new(Dialect::Postgres)),
            ["ALTER TABLE person ALTER COLUMN name SET NOT NULL"]
        );
        assert_eq!(
            render_sql(
                SetNullableStatement::new("person", "name", true),
                &OfflineDatabase::new(Dialect::H2)
            ),
            ["ALTER TABLE person ALTER COLUMN name SET NULL"]
        );
        assert_eq!(
            render_sql(
                not_null.clone().with_constraint_name("nn_name"),
                &OfflineDatabase::new(Dialect::Oracle)
            ),
            ["ALTER TABLE person MODIFY name CONSTRAINT nn_name NOT NULL"]
        );
        assert_eq!(
            render_sql(not_null.clone(), &OfflineDatabase::new(Dialect::Db2)),
            [
                "ALTER TABLE person ALTER COLUMN name SET NOT NULL",
                "CALL SYSPROC.ADMIN_CMD ('REORG TABLE person')",
            ]
        );
        assert_eq!(
            validation_errors(not_null, &OfflineDatabase::new(Dialect::MySql)),
            ["columnDataType is required"]
        );
    }
}
