//! Table-level generators.

use std::collections::HashSet;

use super::{
    check_deferrable, default_clause, deferrable_clause, foreign_key_actions,
    index_tablespace_clause, GenerationContext, StatementGenerator, SPECIALIZATION_DATABASE,
};
use crate::clause::ClauseSequence;
use crate::database::{Database, Dialect, ObjectKind};
use crate::error::{ClauseError, GenerationFailure};
use crate::object::{DatabaseObject, ObjectName};
use crate::sql::RenderedSql;
use crate::statement::{
    ColumnSpec, CreateTableStatement, DropTableStatement, ReorganizeTableStatement,
    RenameTableStatement, SetTableRemarksStatement, Statement,
};
use crate::validation::{ValidationErrors, Warnings};

/// Dialects with `COMMENT ON TABLE` / `COMMENT ON COLUMN`.
const fn has_comment_on(dialect: Dialect) -> bool {
    matches!(
        dialect,
        Dialect::Postgres
            | Dialect::Oracle
            | Dialect::H2
            | Dialect::Hsql
            | Dialect::Db2
            | Dialect::SybaseAsa
            | Dialect::Snowflake
    )
}

/// `sp_addextendedproperty` call setting the description of a table or one
/// of its columns.
fn mssql_description(
    database: &dyn Database,
    table: &ObjectName,
    column: Option<&str>,
    remarks: &str,
) -> String {
    let schema = table
        .schema
        .as_deref()
        .or_else(|| database.default_schema_name())
        .unwrap_or("dbo");
    let mut sql = format!(
        "EXEC sp_addextendedproperty @name = N'MS_Description', @value = N'{}', \
         @level0type = N'SCHEMA', @level0name = N'{schema}', \
         @level1type = N'TABLE', @level1name = N'{}'",
        database.escape_string(remarks),
        table.name
    );
    if let Some(column) = column {
        sql.push_str(&format!(
            ", @level2type = N'COLUMN', @level2name = N'{column}'"
        ));
    }
    sql
}

/// CREATE TABLE on every dialect.
///
/// The statement is built as a clause tree: `create table`, `if not exists`,
/// `table name`, `definition` and trailing table options. The definition
/// holds one sequence per column (keyed `column <name>`) followed by
/// `primary key`, `foreign key <name>` and `unique <name>` entries, so
/// dialect generators can edit it through [`table_clauses`].
///
/// [`table_clauses`]: CreateTableGenerator::table_clauses
/// Clause key of a table-level foreign key.
fn foreign_key_clause_key(name: &str) -> String {
    format!("foreign key {name}")
}

/// Clause key of a table-level unique constraint; unnamed ones are keyed
/// by position.
fn unique_clause_key(position: usize, name: Option<&str>) -> String {
    name.map_or_else(
        || format!("unique #{}", position + 1),
        |name| format!("unique {name}"),
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CreateTableGenerator;

impl CreateTableGenerator {
    /// Builds the CREATE TABLE clause tree and the statements that must run
    /// right after it (column comments, serial sequence adjustments).
    ///
    /// # Errors
    ///
    /// Fails on duplicate column or constraint keys.
    pub fn table_clauses(
        statement: &CreateTableStatement,
        database: &dyn Database,
    ) -> Result<(ClauseSequence, Vec<RenderedSql>), GenerationFailure> {
        let dialect = database.dialect();
        let table = &statement.table;
        let primary_key = statement
            .primary_key
            .as_ref()
            .filter(|pk| !pk.columns.is_empty());
        // SQLite only accepts AUTOINCREMENT on an inline primary key.
        let inline_primary_key = primary_key.and_then(|pk| match pk.columns.as_slice() {
            [only] if dialect == Dialect::Sqlite => statement
                .columns
                .iter()
                .find(|column| &column.name == only && column.auto_increment.is_some())
                .map(|column| column.name.as_str()),
            _ => None,
        });

        let mut definition = ClauseSequence::wrapped("(", ", ", ")");
        let mut follow_up = Vec::new();
        for column in &statement.columns {
            let inline = inline_primary_key == Some(column.name.as_str());
            definition.append(
                &format!("column {}", column.name),
                Self::column_clauses(table, column, database, inline)?,
            )?;
            follow_up.extend(Self::serial_start(table, column, database));
            if let Some(remarks) = column.remarks.as_deref() {
                follow_up.extend(Self::column_remarks(table, &column.name, remarks, database));
            }
        }

        if let Some(pk) = primary_key.filter(|_| inline_primary_key.is_none()) {
            let mut clause = String::new();
            if let Some(name) = pk
                .name
                .as_deref()
                .filter(|_| database.supports_primary_key_names())
            {
                clause.push_str(&format!("CONSTRAINT {} ", database.escape_constraint_name(name)));
            }
            clause.push_str(&format!(
                "PRIMARY KEY ({})",
                database.escape_column_list(table, &pk.columns)
            ));
            clause.push_str(&index_tablespace_clause(database, pk.tablespace.as_deref()));
            definition.append("primary key", clause)?;
        }

        for foreign_key in &statement.foreign_keys {
            let name = database.escape_constraint_name(&foreign_key.name);
            let mut clause = String::new();
            if dialect != Dialect::Informix {
                clause.push_str(&format!("CONSTRAINT {name} "));
            }
            clause.push_str(&format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                database.escape_column_list(table, &foreign_key.columns),
                database.escape_table_name(&foreign_key.referenced_table),
                database.escape_column_list(
                    &foreign_key.referenced_table,
                    &foreign_key.referenced_columns
                ),
            ));
            clause.push_str(&foreign_key_actions(
                database,
                foreign_key.on_delete,
                foreign_key.on_update,
            ));
            if database.supports_initially_deferrable_columns() {
                clause.push_str(&deferrable_clause(
                    foreign_key.deferrable,
                    foreign_key.initially_deferred,
                ));
            }
            // Informix names the constraint after its definition.
            if dialect == Dialect::Informix {
                clause.push_str(&format!(" CONSTRAINT {name}"));
            }
            definition.append(&foreign_key_clause_key(&foreign_key.name), clause)?;
        }

        for (position, unique) in statement.unique_constraints.iter().enumerate() {
            let mut clause = String::new();
            if let Some(name) = unique.name.as_deref() {
                clause.push_str(&format!("CONSTRAINT {} ", database.escape_constraint_name(name)));
            }
            clause.push_str(&format!(
                "UNIQUE ({})",
                database.escape_column_list(table, &unique.columns)
            ));
            clause.push_str(&index_tablespace_clause(database, unique.tablespace.as_deref()));
            definition.append(&unique_clause_key(position, unique.name.as_deref()), clause)?;
        }

        let mut sql = ClauseSequence::new();
        sql.append("create table", "CREATE TABLE")?;
        if statement.if_not_exists && database.supports_create_if_not_exists(ObjectKind::Table) {
            sql.append("if not exists", "IF NOT EXISTS")?;
        }
        sql.append("table name", database.escape_table_name(table))?
            .append("definition", definition)?;

        if dialect.is_mysql_family() {
            let start = statement
                .columns
                .iter()
                .find_map(|column| column.auto_increment.and_then(|auto| auto.start_with));
            if let Some(start) = start {
                sql.append("auto increment start", format!("AUTO_INCREMENT={start}"))?;
            }
            if let Some(remarks) = statement.remarks.as_deref() {
                sql.append(
                    "remarks",
                    format!("COMMENT='{}'", database.escape_string(remarks)),
                )?;
            }
        }
        if let Some(tablespace) = statement
            .tablespace
            .as_deref()
            .filter(|_| database.supports_tablespaces())
        {
            let clause = if dialect.is_tsql_family() {
                format!("ON {tablespace}")
            } else {
                format!("TABLESPACE {tablespace}")
            };
            sql.append("tablespace", clause)?;
        }
        Ok((sql, follow_up))
    }

    fn column_clauses(
        table: &ObjectName,
        column: &ColumnSpec,
        database: &dyn Database,
        inline_primary_key: bool,
    ) -> Result<ClauseSequence, ClauseError> {
        let dialect = database.dialect();
        let auto_increment = column
            .auto_increment
            .filter(|_| database.supports_auto_increment())
            .filter(|_| dialect != Dialect::Sqlite || inline_primary_key);
        let declared = column.data_type.trim();
        let column_type = database.column_type_sql(declared, auto_increment.is_some());
        // Serial types bring their own sequence default.
        let serial = column_type != declared;

        let mut clauses = ClauseSequence::new();
        let name = if column.computed {
            column.name.clone()
        } else {
            database.escape_column_name(table, &column.name)
        };
        clauses.append("name", name)?.append("type", column_type)?;
        if inline_primary_key {
            clauses.append("primary key", "PRIMARY KEY")?;
        }
        if let Some(value) = column.default_value.as_ref().filter(|_| !serial) {
            clauses.append(
                "default",
                default_clause(
                    database,
                    table,
                    &column.name,
                    column.default_constraint_name.as_deref(),
                    value,
                ),
            )?;
        }
        if let Some(auto) = auto_increment.filter(|_| !serial) {
            clauses.append(
                "auto increment",
                database.auto_increment_clause(auto.start_with, auto.increment_by),
            )?;
        }
        if !column.nullable {
            let clause = match column
                .not_null_constraint_name
                .as_deref()
                .filter(|_| database.supports_not_null_constraint_names())
            {
                Some(name) => format!(
                    "CONSTRAINT {} NOT NULL",
                    database.escape_constraint_name(name)
                ),
                None => "NOT NULL".to_string(),
            };
            clauses.append("not null", clause)?;
        } else if dialect.is_sybase_family()
            || (dialect.is_mysql_family() && declared.to_ascii_lowercase().starts_with("timestamp"))
        {
            // Both default these columns to NOT NULL.
            clauses.append("null", "NULL")?;
        }
        if let Some(remarks) = column
            .remarks
            .as_deref()
            .filter(|_| dialect.is_mysql_family())
        {
            clauses.append(
                "remarks",
                format!("COMMENT '{}'", database.escape_string(remarks)),
            )?;
        }
        Ok(clauses)
    }

    /// Serial columns cannot declare a start value inline; their sequence is
    /// adjusted afterwards.
    fn serial_start(
        table: &ObjectName,
        column: &ColumnSpec,
        database: &dyn Database,
    ) -> Option<RenderedSql> {
        let start = column.auto_increment?.start_with?;
        let declared = column.data_type.trim();
        if database.dialect() != Dialect::Postgres
            || database.column_type_sql(declared, true) == declared
        {
            return None;
        }
        let sequence = table.sibling(format!("{}_{}_seq", table.name, column.name));
        Some(RenderedSql::new(
            format!(
                "ALTER SEQUENCE {} START WITH {start}",
                database.escape_sequence_name(&sequence)
            ),
            vec![DatabaseObject::sequence(&sequence)],
        ))
    }

    fn column_remarks(
        table: &ObjectName,
        column: &str,
        remarks: &str,
        database: &dyn Database,
    ) -> Option<RenderedSql> {
        let dialect = database.dialect();
        let text = if dialect == Dialect::Mssql {
            mssql_description(database, table, Some(column), remarks)
        } else if has_comment_on(dialect) {
            format!(
                "COMMENT ON COLUMN {}.{} IS '{}'",
                database.escape_table_name(table),
                database.escape_column_name(table, column),
                database.escape_string(remarks)
            )
        } else {
            return None;
        };
        Some(RenderedSql::new(text, vec![DatabaseObject::column(table, column)]))
    }

    /// Renders the clause tree, then the table comment and follow-up
    /// statements.
    fn assemble(
        statement: &CreateTableStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
        sql: &ClauseSequence,
        follow_up: Vec<RenderedSql>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let mut rendered = vec![RenderedSql::new(
            sql.render(),
            vec![DatabaseObject::table(&statement.table)],
        )];
        if let Some(remarks) = statement
            .remarks
            .as_deref()
            .filter(|_| !database.dialect().is_mysql_family())
        {
            let remarks: Statement =
                SetTableRemarksStatement::new(statement.table.clone(), remarks).into();
            if context.supports(&remarks, database) {
                rendered.extend(context.generate(&remarks, database)?);
            }
        }
        rendered.extend(follow_up);
        Ok(rendered)
    }
}

impl StatementGenerator for CreateTableGenerator {
    type Statement = CreateTableStatement;

    fn name(&self) -> &'static str {
        "CreateTableGenerator"
    }

    fn validate(&self, statement: &CreateTableStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("tableName", &statement.table)
            .check_required_field("columns", &statement.columns);

        let mut seen = HashSet::new();
        for column in &statement.columns {
            errors.check_required_field("columnName", &column.name);
            if !column.computed {
                errors.check_required_field("columnType", &column.data_type);
            }
            if !column.name.trim().is_empty() && !seen.insert(column.name.to_lowercase()) {
                errors.add_error(format!("Column '{}' is defined more than once", column.name));
            }
            if let Some(value) = &column.default_value {
                errors.check_finite_value("defaultValue", value);
            }
        }

        if let Some(pk) = &statement.primary_key {
            for column in &pk.columns {
                if !statement
                    .columns
                    .iter()
                    .any(|defined| defined.name.eq_ignore_ascii_case(column))
                {
                    errors.add_error(format!("Primary key column '{column}' is not defined"));
                }
            }
        }

        let mut constraint_keys = HashSet::new();
        let mut check_constraint_key = |key: String, label: &str| {
            if !constraint_keys.insert(key.trim().to_lowercase()) {
                errors.add_error(format!("Constraint '{label}' is defined more than once"));
            }
        };
        for foreign_key in statement
            .foreign_keys
            .iter()
            .filter(|foreign_key| !foreign_key.name.trim().is_empty())
        {
            check_constraint_key(foreign_key_clause_key(&foreign_key.name), &foreign_key.name);
        }
        for (position, unique) in statement.unique_constraints.iter().enumerate() {
            let key = unique_clause_key(position, unique.name.as_deref());
            let label = unique.name.clone().unwrap_or_else(|| key.clone());
            check_constraint_key(key, &label);
        }

        for foreign_key in &statement.foreign_keys {
            errors
                .check_required_field("foreignKeyName", &foreign_key.name)
                .check_required_field("baseColumnNames", &foreign_key.columns)
                .check_required_field("referencedTableName", &foreign_key.referenced_table)
                .check_required_field("referencedColumnNames", &foreign_key.referenced_columns);
            check_deferrable(
                &mut errors,
                foreign_key.deferrable,
                foreign_key.initially_deferred,
                database,
            );
        }
        errors
    }

    fn warn(&self, statement: &CreateTableStatement, database: &dyn Database) -> Warnings {
        let mut warnings = Warnings::new();
        if !database.supports_auto_increment()
            && statement
                .columns
                .iter()
                .any(|column| column.auto_increment.is_some())
        {
            warnings.add(format!(
                "Auto-increment is not supported on {}; columns are created without it",
                database.short_name()
            ));
        }
        warnings
    }

    fn generate(
        &self,
        statement: &CreateTableStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let (sql, follow_up) = Self::table_clauses(statement, database)?;
        Self::assemble(statement, database, context, &sql, follow_up)
    }
}

/// CREATE TABLE on BigQuery, which enforces no constraints: the primary key
/// is declared `NOT ENFORCED`, foreign keys and unique constraints are
/// dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateTableGeneratorBigQuery;

impl StatementGenerator for CreateTableGeneratorBigQuery {
    type Statement = CreateTableStatement;

    fn name(&self) -> &'static str {
        "CreateTableGeneratorBigQuery"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &CreateTableStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::BigQuery
    }

    fn validate(&self, statement: &CreateTableStatement, database: &dyn Database) -> ValidationErrors {
        CreateTableGenerator.validate(statement, database)
    }

    fn warn(&self, statement: &CreateTableStatement, database: &dyn Database) -> Warnings {
        let mut warnings = CreateTableGenerator.warn(statement, database);
        if !statement.foreign_keys.is_empty() || !statement.unique_constraints.is_empty() {
            warnings.add("BigQuery does not support foreign key or unique constraints; they are omitted");
        }
        warnings
    }

    fn generate(
        &self,
        statement: &CreateTableStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let (mut sql, follow_up) = CreateTableGenerator::table_clauses(statement, database)?;
        if let Some(definition) = sql.get_sequence_mut("definition") {
            let constraints: Vec<String> = definition
                .keys()
                .filter(|key| key.starts_with("foreign key ") || key.starts_with("unique "))
                .map(str::to_string)
                .collect();
            for key in constraints {
                definition.remove(&key);
            }
            if let Some(pk) = &statement.primary_key {
                definition.replace_if_exists(
                    "primary key",
                    format!(
                        "PRIMARY KEY ({}) NOT ENFORCED",
                        database.escape_column_list(&statement.table, &pk.columns)
                    ),
                );
            }
        }
        CreateTableGenerator::assemble(statement, database, context, &sql, follow_up)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DropTableGenerator;

impl StatementGenerator for DropTableGenerator {
    type Statement = DropTableStatement;

    fn name(&self) -> &'static str {
        "DropTableGenerator"
    }

    fn validate(&self, statement: &DropTableStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", &statement.table);
        if !database.supports_drop_if_exists(ObjectKind::Table) {
            errors.check_disallowed_field("ifExists", &statement.if_exists, database);
        }
        errors
    }

    fn warn(&self, statement: &DropTableStatement, database: &dyn Database) -> Warnings {
        let mut warnings = Warnings::new();
        if statement.cascade_constraints && !database.supports_drop_table_cascade_constraints() {
            warnings.add(format!(
                "Cascading constraints is not supported on {}; dropping without CASCADE",
                database.short_name()
            ));
        }
        warnings
    }

    fn generate(
        &self,
        statement: &DropTableStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let mut sql = ClauseSequence::new();
        sql.append("drop table", "DROP TABLE")?;
        if statement.if_exists && database.supports_drop_if_exists(ObjectKind::Table) {
            sql.append("if exists", "IF EXISTS")?;
        }
        sql.append("table name", database.escape_table_name(&statement.table))?;
        if statement.cascade_constraints && database.supports_drop_table_cascade_constraints() {
            let cascade = if database.dialect() == Dialect::Oracle {
                "CASCADE CONSTRAINTS"
            } else {
                "CASCADE"
            };
            sql.append("cascade", cascade)?;
        }
        Ok(vec![RenderedSql::new(
            sql.render(),
            vec![DatabaseObject::table(&statement.table)],
        )])
    }
}

/// Renames a table, branching across dialect families.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenameTableGenerator;

impl StatementGenerator for RenameTableGenerator {
    type Statement = RenameTableStatement;

    fn name(&self) -> &'static str {
        "RenameTableGenerator"
    }

    fn is_applicable(&self, _statement: &RenameTableStatement, database: &dyn Database) -> bool {
        database.dialect() != Dialect::Firebird
    }

    fn validate(&self, statement: &RenameTableStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("oldTableName", &statement.old_table)
            .check_required_field("newTableName", &statement.new_name);
        errors
    }

    fn generate(
        &self,
        statement: &RenameTableStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let old = database.escape_table_name(&statement.old_table);
        let new_table = statement.old_table.sibling(&statement.new_name);
        let new_name = database.escape_object_name(&statement.new_name, ObjectKind::Table);
        let sql = match database.dialect() {
            Dialect::Mssql | Dialect::Sybase => {
                format!("exec sp_rename '{old}', '{}'", statement.new_name)
            }
            Dialect::MySql | Dialect::MariaDb => format!(
                "ALTER TABLE {old} RENAME {}",
                database.escape_table_name(&new_table)
            ),
            Dialect::Derby | Dialect::Db2 | Dialect::Informix => {
                format!("RENAME TABLE {old} TO {new_name}")
            }
            Dialect::SybaseAsa => format!("ALTER TABLE {old} RENAME {new_name}"),
            _ => format!("ALTER TABLE {old} RENAME TO {new_name}"),
        };
        Ok(vec![RenderedSql::new(
            sql,
            vec![
                DatabaseObject::table(&statement.old_table),
                DatabaseObject::table(&new_table),
            ],
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SetTableRemarksGenerator;

impl StatementGenerator for SetTableRemarksGenerator {
    type Statement = SetTableRemarksStatement;

    fn name(&self) -> &'static str {
        "SetTableRemarksGenerator"
    }

    fn is_applicable(&self, _statement: &SetTableRemarksStatement, database: &dyn Database) -> bool {
        let dialect = database.dialect();
        dialect.is_mysql_family() || has_comment_on(dialect)
    }

    fn validate(&self, statement: &SetTableRemarksStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", &statement.table);
        errors
    }

    fn generate(
        &self,
        statement: &SetTableRemarksStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let remarks = database.escape_string(&statement.remarks);
        let sql = if database.dialect().is_mysql_family() {
            format!("ALTER TABLE {table} COMMENT = '{remarks}'")
        } else {
            format!("COMMENT ON TABLE {table} IS '{remarks}'")
        };
        Ok(vec![RenderedSql::new(
            sql,
            vec![DatabaseObject::table(&statement.table)],
        )])
    }
}

/// Table remarks on MSSQL, stored as the `MS_Description` extended property.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetTableRemarksGeneratorMssql;

impl StatementGenerator for SetTableRemarksGeneratorMssql {
    type Statement = SetTableRemarksStatement;

    fn name(&self) -> &'static str {
        "SetTableRemarksGeneratorMssql"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &SetTableRemarksStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::Mssql
    }

    fn validate(&self, statement: &SetTableRemarksStatement, database: &dyn Database) -> ValidationErrors {
        SetTableRemarksGenerator.validate(statement, database)
    }

    fn generate(
        &self,
        statement: &SetTableRemarksStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        Ok(vec![RenderedSql::new(
            mssql_description(database, &statement.table, None, &statement.remarks),
            vec![DatabaseObject::table(&statement.table)],
        )])
    }
}

/// `REORG TABLE` through `ADMIN_CMD`; DB2 only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReorganizeTableGenerator;

impl StatementGenerator for ReorganizeTableGenerator {
    type Statement = ReorganizeTableStatement;

    fn name(&self) -> &'static str {
        "ReorganizeTableGenerator"
    }

    fn is_applicable(&self, _statement: &ReorganizeTableStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::Db2
    }

    fn validate(&self, statement: &ReorganizeTableStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", &statement.table);
        errors
    }

    fn generate(
        &self,
        statement: &ReorganizeTableStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        Ok(vec![RenderedSql::new(
            format!(
                "CALL SYSPROC.ADMIN_CMD ('REORG TABLE {}')",
                database.escape_table_name(&statement.table)
            ),
            vec![DatabaseObject::table(&statement.table)],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::super::{render_sql, validation_errors};
    use super::*;
    use crate::database::OfflineDatabase;
    use crate::statement::{ForeignKeyAction, ForeignKeySpec};

    fn person() -> CreateTableStatement {
        CreateTableStatement::new("person")
            .column(ColumnSpec::new("id", "INT").not_null())
            .column(ColumnSpec::new("name", "VARCHAR(255)"))
            .primary_key(Some("pk_person"), &["id"])
    }

    #[test]
    fn test_create_table_postgres() {
        let db = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(
            render_sql(person(), &db),
            ["CREATE TABLE person (id INT NOT NULL, name VARCHAR(255), CONSTRAINT pk_person PRIMARY KEY (id))"]
        );
    }

    #[test]
    fn test_create_table_if_not_exists() {
        let statement = person().if_not_exists();
        assert!(render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Postgres))[0]
            .starts_with("CREATE TABLE IF NOT EXISTS person ("));
        assert!(render_sql(statement, &OfflineDatabase::new(Dialect::Oracle))[0]
            .starts_with("CREATE TABLE person ("));
    }

    #[test]
    fn test_create_table_sqlite_inline_primary_key() {
        let statement = CreateTableStatement::new("person")
            .column(ColumnSpec::new("id", "INTEGER").auto_increment())
            .column(ColumnSpec::new("name", "TEXT"))
            .primary_key(None, &["id"]);
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Sqlite)),
            ["CREATE TABLE person (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)"]
        );
    }

    #[test]
    fn test_create_table_mysql_options() {
        let statement = CreateTableStatement::new("person")
            .column(ColumnSpec::new("id", "INT").not_null().auto_increment_from(100, 1))
            .primary_key(None, &["id"])
            .remarks("People");
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::MySql)),
            ["CREATE TABLE person (id INT AUTO_INCREMENT NOT NULL, PRIMARY KEY (id)) AUTO_INCREMENT=100 COMMENT='People'"]
        );
    }

    #[test]
    fn test_create_table_remarks_are_delegated() {
        let statement = person().remarks("People");
        let pg = render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Postgres));
        assert_eq!(pg.len(), 2);
        assert_eq!(pg[1], "COMMENT ON TABLE person IS 'People'");

        let mssql = render_sql(statement, &OfflineDatabase::new(Dialect::Mssql));
        assert_eq!(
            mssql[1],
            "EXEC sp_addextendedproperty @name = N'MS_Description', @value = N'People', \
             @level0type = N'SCHEMA', @level0name = N'dbo', \
             @level1type = N'TABLE', @level1name = N'person'"
        );
    }

    #[test]
    fn test_create_table_old_postgres_serial() {
        let statement = CreateTableStatement::new("person")
            .column(ColumnSpec::new("id", "INT").not_null().auto_increment_from(5, 1));
        let db = OfflineDatabase::new(Dialect::Postgres).with_version(9, 6);
        assert_eq!(
            render_sql(statement, &db),
            [
                "CREATE TABLE person (id SERIAL NOT NULL)",
                "ALTER SEQUENCE person_id_seq START WITH 5",
            ]
        );
    }

    #[test]
    fn test_create_table_foreign_key() {
        let statement = CreateTableStatement::new("address")
            .column(ColumnSpec::new("id", "INT"))
            .column(ColumnSpec::new("person_id", "INT"))
            .foreign_key(
                ForeignKeySpec::new("fk_address_person", &["person_id"], "person", &["id"])
                    .on_delete(ForeignKeyAction::Cascade),
            );
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Postgres)),
            ["CREATE TABLE address (id INT, person_id INT, CONSTRAINT fk_address_person FOREIGN KEY (person_id) REFERENCES person (id) ON DELETE CASCADE)"]
        );
    }

    #[test]
    fn test_create_table_bigquery_drops_constraints() {
        let statement = CreateTableStatement::new("person")
            .column(ColumnSpec::new("id", "INT64").not_null())
            .column(ColumnSpec::new("org", "INT64"))
            .primary_key(Some("pk_person"), &["id"])
            .foreign_key(ForeignKeySpec::new("fk_org", &["org"], "org", &["id"]))
            .unique(Some("uq_org"), &["org"]);
        let db = OfflineDatabase::new(Dialect::BigQuery);
        assert_eq!(
            render_sql(statement.clone(), &db),
            ["CREATE TABLE person (id INT64 NOT NULL, org INT64, PRIMARY KEY (id) NOT ENFORCED)"]
        );
        let warnings = CreateTableGeneratorBigQuery.warn(&statement, &db);
        assert!(warnings.has_warnings());
    }

    #[test]
    fn test_create_table_validation() {
        let db = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(
            validation_errors(CreateTableStatement::new("person"), &db),
            ["No columns defined"]
        );
        let duplicate = CreateTableStatement::new("person")
            .column(ColumnSpec::new("id", "INT"))
            .column(ColumnSpec::new("ID", "INT"))
            .primary_key(None, &["missing"]);
        assert_eq!(
            validation_errors(duplicate, &db),
            [
                "Column 'ID' is defined more than once",
                "Primary key column 'missing' is not defined",
            ]
        );
    }

    #[test]
    fn test_create_table_constraint_names() {
        let db = OfflineDatabase::new(Dialect::Postgres);
        let numbered = CreateTableStatement::new("person")
            .column(ColumnSpec::new("a", "INT"))
            .column(ColumnSpec::new("b", "INT"))
            .unique(None, &["a"])
            .unique(Some("1"), &["b"]);
        assert!(validation_errors(numbered.clone(), &db).is_empty());
        assert_eq!(
            render_sql(numbered, &db),
            ["CREATE TABLE person (a INT, b INT, UNIQUE (a), CONSTRAINT \"1\" UNIQUE (b))"]
        );

        let clashing = CreateTableStatement::new("address")
            .column(ColumnSpec::new("person_id", "INT"))
            .foreign_key(ForeignKeySpec::new("fk_person", &["person_id"], "person", &["id"]))
            .foreign_key(ForeignKeySpec::new("FK_PERSON", &["person_id"], "person", &["id"]))
            .unique(Some("uq_person"), &["person_id"])
            .unique(Some("UQ_Person"), &["person_id"]);
        assert_eq!(
            validation_errors(clashing, &db),
            [
                "Constraint 'FK_PERSON' is defined more than once",
                "Constraint 'UQ_Person' is defined more than once",
            ]
        );
    }

    #[test]
    fn test_create_table_deferrable_foreign_key_on_mysql() {
        let statement = CreateTableStatement::new("address")
            .column(ColumnSpec::new("person_id", "INT"))
            .foreign_key(
                ForeignKeySpec::new("fk_person", &["person_id"], "person", &["id"])
                    .deferrable(true),
            );
        assert_eq!(
            validation_errors(statement, &OfflineDatabase::new(Dialect::MySql)),
            [
                "initiallyDeferred is not allowed on mysql",
                "deferrable is not allowed on mysql",
            ]
        );
    }

    #[test]
    fn test_drop_table_cascade() {
        let statement = DropTableStatement::new("person").cascade_constraints();
        let sql = |dialect| render_sql(statement.clone(), &OfflineDatabase::new(dialect));
        assert_eq!(sql(Dialect::Postgres), ["DROP TABLE person CASCADE"]);
        assert_eq!(sql(Dialect::Oracle), ["DROP TABLE person CASCADE CONSTRAINTS"]);
        assert_eq!(sql(Dialect::MySql), ["DROP TABLE person"]);
    }

    #[test]
    fn test_drop_table_if_exists() {
        let statement = DropTableStatement::new("app.person").if_exists();
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Postgres)),
            ["DROP TABLE IF EXISTS app.person"]
        );
        assert_eq!(
            validation_errors(statement, &OfflineDatabase::new(Dialect::Oracle)),
            ["ifExists is not allowed on oracle"]
        );
    }

    #[test]
    fn test_rename_table_per_dialect() {
        let statement = RenameTableStatement::new("person", "people");
        let sql = |dialect| render_sql(statement.clone(), &OfflineDatabase::new(dialect));
        assert_eq!(sql(Dialect::Postgres), ["ALTER TABLE person RENAME TO people"]);
        assert_eq!(sql(Dialect::Mssql), ["exec sp_rename 'person', 'people'"]);
        assert_eq!(sql(Dialect::MySql), ["ALTER TABLE person RENAME people"]);
        assert_eq!(sql(Dialect::Derby), ["RENAME TABLE person TO people"]);
        assert_eq!(sql(Dialect::SybaseAsa), ["ALTER TABLE person RENAME people"]);
    }

    #[test]
    fn test_rename_table_unsupported_on_firebird() {
        let statement: Statement = RenameTableStatement::new("person", "people").into();
        let db = OfflineDatabase::new(Dialect::Firebird);
        assert!(!crate::registry::SqlGeneratorRegistry::global().supports(&statement, &db));
    }

    #[test]
    fn test_set_table_remarks() {
        let statement = SetTableRemarksStatement::new("person", "It's people");
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Oracle)),
            ["COMMENT ON TABLE person IS 'It''s people'"]
        );
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::MySql)),
            ["ALTER TABLE person COMMENT = 'It''s people'"]
        );
    }

    #[test]
    fn test_reorganize_table_db2() {
        assert_eq!(
            render_sql(
                ReorganizeTableStatement::new("app.person"),
                &OfflineDatabase::new(Dialect::Db2)
            ),
            ["CALL SYSPROC.ADMIN_CMD ('REORG TABLE app.person')"]
        );
    }
}
