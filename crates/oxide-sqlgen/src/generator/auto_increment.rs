//! Generators turning an existing column into an auto-increment column.

use super::{GenerationContext, StatementGenerator, SPECIALIZATION_DATABASE};
use crate::database::{Database, Dialect};
use crate::error::GenerationFailure;
use crate::object::{DatabaseObject, ObjectName};
use crate::sql::RenderedSql;
use crate::statement::{
    AddAutoIncrementStatement, AddDefaultValueStatement, CreateSequenceStatement,
    ReorganizeTableStatement, Statement,
};
use crate::validation::ValidationErrors;
use crate::value::LiteralValue;

fn check_fields(statement: &AddAutoIncrementStatement) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors
        .check_required_field("tableName", &statement.table)
        .check_required_field("columnName", &statement.column)
        .check_required_field("columnDataType", &statement.column_data_type);
    errors
}

fn affected(statement: &AddAutoIncrementStatement) -> Vec<DatabaseObject> {
    vec![
        DatabaseObject::table(&statement.table),
        DatabaseObject::column(&statement.table, &statement.column),
    ]
}

/// `ALTER TABLE ... MODIFY <column> <type> <auto-increment clause>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddAutoIncrementGenerator;

impl StatementGenerator for AddAutoIncrementGenerator {
    type Statement = AddAutoIncrementStatement;

    fn name(&self) -> &'static str {
        "AddAutoIncrementGenerator"
    }

    fn is_applicable(&self, _statement: &AddAutoIncrementStatement, database: &dyn Database) -> bool {
        database.supports_auto_increment()
            && !matches!(
                database.dialect(),
                Dialect::Derby
                    | Dialect::Mssql
                    | Dialect::Sybase
                    | Dialect::SybaseAsa
                    | Dialect::Sqlite
                    | Dialect::Informix
            )
    }

    fn validate(&self, statement: &AddAutoIncrementStatement, _database: &dyn Database) -> ValidationErrors {
        check_fields(statement)
    }

    fn generate(
        &self,
        statement: &AddAutoIncrementStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let column = database.escape_column_name(&statement.table, &statement.column);
        let clause = database.auto_increment_clause(statement.start_with, statement.increment_by);
        let mut rendered = vec![RenderedSql::new(
            format!(
                "ALTER TABLE {table} MODIFY {column} {} {clause}",
                statement.column_data_type.trim()
            ),
            affected(statement),
        )];
        // MySQL sets the counter on the table.
        if let Some(start) = statement
            .start_with
            .filter(|_| database.dialect().is_mysql_family())
        {
            rendered.push(RenderedSql::new(
                format!("ALTER TABLE {table} AUTO_INCREMENT={start}"),
                vec![DatabaseObject::table(&statement.table)],
            ));
        }
        Ok(rendered)
    }
}

/// PostgreSQL backs the column with a sequence owned by it.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddAutoIncrementGeneratorPostgres;

impl AddAutoIncrementGeneratorPostgres {
    /// `<table>_<column>_seq` in the table's schema.
    fn sequence_name(statement: &AddAutoIncrementStatement) -> ObjectName {
        statement
            .table
            .sibling(format!("{}_{}_seq", statement.table.name, statement.column))
    }
}

impl StatementGenerator for AddAutoIncrementGeneratorPostgres {
    type Statement = AddAutoIncrementStatement;

    fn name(&self) -> &'static str {
        "AddAutoIncrementGeneratorPostgres"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &AddAutoIncrementStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::Postgres
    }

    fn validate(&self, statement: &AddAutoIncrementStatement, _database: &dyn Database) -> ValidationErrors {
        check_fields(statement)
    }

    fn generate(
        &self,
        statement: &AddAutoIncrementStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let sequence = Self::sequence_name(statement);

        let mut create = CreateSequenceStatement::new(sequence.clone());
        create.start_value = statement.start_with;
        create.increment_by = statement.increment_by;
        let create: Statement = create.into();

        let default: Statement = AddDefaultValueStatement::new(
            statement.table.clone(),
            statement.column.as_str(),
            LiteralValue::next_value_of(sequence.clone()),
        )
        .with_data_type(statement.column_data_type.as_str())
        .into();

        let mut rendered = context.generate(&create, database)?;
        rendered.extend(context.generate(&default, database)?);
        rendered.push(RenderedSql::new(
            format!(
                "ALTER SEQUENCE {} OWNED BY {}.{}",
                database.escape_sequence_name(&sequence),
                database.escape_table_name(&statement.table),
                database.escape_column_name(&statement.table, &statement.column)
            ),
            vec![
                DatabaseObject::sequence(&sequence),
                DatabaseObject::column(&statement.table, &statement.column),
            ],
        ));
        Ok(rendered)
    }
}

/// DB2 turns the column into an identity column, then reorganizes the table.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddAutoIncrementGeneratorDb2;

impl StatementGenerator for AddAutoIncrementGeneratorDb2 {
    type Statement = AddAutoIncrementStatement;

    fn name(&self) -> &'static str {
        "AddAutoIncrementGeneratorDb2"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &AddAutoIncrementStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::Db2
    }

    fn validate(&self, statement: &AddAutoIncrementStatement, _database: &dyn Database) -> ValidationErrors {
        check_fields(statement)
    }

    fn generate(
        &self,
        statement: &AddAutoIncrementStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let column = database.escape_column_name(&statement.table, &statement.column);
        let clause = database.auto_increment_clause(statement.start_with, statement.increment_by);
        let mut rendered = vec![RenderedSql::new(
            format!("ALTER TABLE {table} ALTER COLUMN {column} SET {clause}"),
            affected(statement),
        )];
        let reorg: Statement = ReorganizeTableStatement::new(statement.table.clone()).into();
        rendered.extend(context.generate(&reorg, database)?);
        Ok(rendered)
    }
}

/// HSQLDB and H2 restate the column type with an identity clause.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddAutoIncrementGeneratorHsqlH2;

impl StatementGenerator for AddAutoIncrementGeneratorHsqlH2 {
    type Statement = AddAutoIncrementStatement;

    fn name(&self) -> &'static str {
        "AddAutoIncrementGeneratorHsqlH2"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &AddAutoIncrementStatement, database: &dyn Database) -> bool {
        matches!(database.dialect(), Dialect::H2 | Dialect::Hsql)
    }

    fn validate(&self, statement: &AddAutoIncrementStatement, _database: &dyn Database) -> ValidationErrors {
        check_fields(statement)
    }

    fn generate(
        &self,
        statement: &AddAutoIncrementStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let column = database.escape_column_name(&statement.table, &statement.column);
        let clause = database.auto_increment_clause(statement.start_with, statement.increment_by);
        Ok(vec![RenderedSql::new(
            format!(
                "ALTER TABLE {table} ALTER COLUMN {column} {} {clause}",
                statement.column_data_type.trim()
            ),
            affected(statement),
        )])
    }
}
