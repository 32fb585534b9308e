//! Column default generators.

use super::{default_clause, GenerationContext, StatementGenerator, SPECIALIZATION_DATABASE};
use crate::database::{Database, Dialect};
use crate::error::GenerationFailure;
use crate::object::DatabaseObject;
use crate::sql::RenderedSql;
use crate::statement::{AddDefaultValueStatement, DropDefaultValueStatement};
use crate::validation::ValidationErrors;
use crate::value::LiteralValue;

fn check_add_default(statement: &AddDefaultValueStatement, database: &dyn Database) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors
        .check_required_field("tableName", &statement.table)
        .check_required_field("columnName", &statement.column);
    if statement.default_value.is_null() {
        errors.add_error("defaultValue is required");
    }
    errors.check_finite_value("defaultValue", &statement.default_value);
    if matches!(statement.default_value, LiteralValue::SequenceNextValue { .. })
        && !database.supports_sequences()
    {
        errors.add_error(format!(
            "Database {} does not support sequences",
            database.short_name()
        ));
    }
    errors
}

fn column_object(statement: &AddDefaultValueStatement) -> Vec<DatabaseObject> {
    vec![DatabaseObject::column(&statement.table, &statement.column)]
}

/// Sets a column default with ALTER TABLE.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddDefaultValueGenerator;

impl StatementGenerator for AddDefaultValueGenerator {
    type Statement = AddDefaultValueStatement;

    fn name(&self) -> &'static str {
        "AddDefaultValueGenerator"
    }

    fn is_applicable(&self, _statement: &AddDefaultValueStatement, database: &dyn Database) -> bool {
        database.dialect() != Dialect::Sqlite
    }

    fn validate(&self, statement: &AddDefaultValueStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = check_add_default(statement, database);
        if database.dialect() == Dialect::Informix {
            errors.check_required_field("columnDataType", &statement.column_data_type);
        }
        errors
    }

    fn generate(
        &self,
        statement: &AddDefaultValueStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let column = database.escape_column_name(&statement.table, &statement.column);
        let value = database.value_to_sql(&statement.default_value);
        let sql = match database.dialect() {
            Dialect::Sybase => format!("ALTER TABLE {table} REPLACE {column} DEFAULT {value}"),
            Dialect::SybaseAsa => format!("ALTER TABLE {table} ALTER {column} DEFAULT {value}"),
            Dialect::MySql | Dialect::MariaDb => {
                format!("ALTER TABLE {table} ALTER {column} SET DEFAULT {value}")
            }
            Dialect::Derby => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} WITH DEFAULT {value}")
            }
            Dialect::Informix => {
                let data_type = statement
                    .column_data_type
                    .as_deref()
                    .ok_or_else(|| GenerationFailure::Invalid("columnDataType is required".into()))?;
                format!(
                    "ALTER TABLE {table} MODIFY ({column} {} DEFAULT {value})",
                    data_type.trim()
                )
            }
            _ => format!("ALTER TABLE {table} ALTER COLUMN {column} SET DEFAULT {value}"),
        };
        Ok(vec![RenderedSql::new(sql, column_object(statement))])
    }
}

/// MSSQL defaults are named constraints.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddDefaultValueGeneratorMssql;

impl StatementGenerator for AddDefaultValueGeneratorMssql {
    type Statement = AddDefaultValueStatement;

    fn name(&self) -> &'static str {
        "AddDefaultValueGeneratorMssql"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &AddDefaultValueStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::Mssql
    }

    fn validate(&self, statement: &AddDefaultValueStatement, database: &dyn Database) -> ValidationErrors {
        check_add_default(statement, database)
    }

    fn generate(
        &self,
        statement: &AddDefaultValueStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let column = database.escape_column_name(&statement.table, &statement.column);
        let clause = default_clause(
            database,
            &statement.table,
            &statement.column,
            statement.constraint_name.as_deref(),
            &statement.default_value,
        );
        Ok(vec![RenderedSql::new(
            format!("ALTER TABLE {table} ADD {clause} FOR {column}"),
            column_object(statement),
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AddDefaultValueGeneratorOracle;

impl StatementGenerator for AddDefaultValueGeneratorOracle {
    type Statement = AddDefaultValueStatement;

    fn name(&self) -> &'static str {
        "AddDefaultValueGeneratorOracle"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &AddDefaultValueStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::Oracle
    }

    fn validate(&self, statement: &AddDefaultValueStatement, database: &dyn Database) -> ValidationErrors {
        check_add_default(statement, database)
    }

    fn generate(
        &self,
        statement: &AddDefaultValueStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let column = database.escape_column_name(&statement.table, &statement.column);
        let value = database.value_to_sql(&statement.default_value);
        Ok(vec![RenderedSql::new(
            format!("ALTER TABLE {table} MODIFY {column} DEFAULT {value}"),
            column_object(statement),
        )])
    }
}

/// Removes a column default.
#[derive(Debug, Default, Clone, Copy)]
pub struct DropDefaultValueGenerator;

impl StatementGenerator for DropDefaultValueGenerator {
    type Statement = DropDefaultValueStatement;

    fn name(&self) -> &'static str {
        "DropDefaultValueGenerator"
    }

    fn is_applicable(&self, _statement: &DropDefaultValueStatement, database: &dyn Database) -> bool {
        database.dialect() != Dialect::Sqlite
    }

    fn validate(&self, statement: &DropDefaultValueStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("tableName", &statement.table)
            .check_required_field("columnName", &statement.column);
        if database.dialect() == Dialect::Informix {
            errors.check_required_field("columnDataType", &statement.column_data_type);
        }
        errors
    }

    fn generate(
        &self,
        statement: &DropDefaultValueStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let column = database.escape_column_name(&statement.table, &statement.column);
        let sql = match database.dialect() {
            Dialect::Mssql => {
                let name = statement.constraint_name.clone().unwrap_or_else(|| {
                    database.default_constraint_name(&statement.table.name, &statement.column)
                });
                format!(
                    "ALTER TABLE {table} DROP CONSTRAINT {}",
                    database.escape_constraint_name(&name)
                )
            }
            Dialect::MySql | Dialect::MariaDb | Dialect::SybaseAsa => {
                format!("ALTER TABLE {table} ALTER {column} DROP DEFAULT")
            }
            Dialect::Oracle => format!("ALTER TABLE {table} MODIFY {column} DEFAULT NULL"),
            Dialect::Sybase => format!("ALTER TABLE {table} REPLACE {column} DEFAULT NULL"),
            Dialect::Derby => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} WITH DEFAULT NULL")
            }
            Dialect::Informix => {
                let data_type = statement
                    .column_data_type
                    .as_deref()
                    .ok_or_else(|| GenerationFailure::Invalid("columnDataType is required".into()))?;
                format!("ALTER TABLE {table} MODIFY ({column} {})", data_type.trim())
            }
            _ => format!("ALTER TABLE {table} ALTER COLUMN {column} DROP DEFAULT"),
        };
        Ok(vec![RenderedSql::new(
            sql,
            vec![DatabaseObject::column(&statement.table, &statement.column)],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::super::{render_sql, validation_errors};
    use super::*;
    use crate::database::OfflineDatabase;

    #[test]
    fn test_add_default_value_per_dialect() {
        let statement = AddDefaultValueStatement::new("person", "status", "new");
        let sql = |dialect| render_sql(statement.clone(), &OfflineDatabase::new(dialect));
        assert_eq!(
            sql(Dialect::Postgres),
            ["ALTER TABLE person ALTER COLUMN status SET DEFAULT 'new'"]
        );
        assert_eq!(
            sql(Dialect::MySql),
            ["ALTER TABLE person ALTER status SET DEFAULT 'new'"]
        );
        assert_eq!(
            sql(Dialect::Oracle),
            ["ALTER TABLE person MODIFY status DEFAULT 'new'"]
        );
        assert_eq!(
            sql(Dialect::Mssql),
            ["ALTER TABLE person ADD CONSTRAINT DF_person_status DEFAULT 'new' FOR status"]
        );
        assert_eq!(
            sql(Dialect::Derby),
            ["ALTER TABLE person ALTER COLUMN status WITH DEFAULT 'new'"]
        );
    }

    #[test]
    fn test_add_default_value_named_constraint() {
        let statement =
            AddDefaultValueStatement::new("person", "active", true).with_constraint_name("df_active");
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Mssql)),
            ["ALTER TABLE person ADD CONSTRAINT df_active DEFAULT 1 FOR active"]
        );
    }

    #[test]
    fn test_add_default_value_current_timestamp() {
        let statement =
            AddDefaultValueStatement::new("person", "created", LiteralValue::computed("now()"));
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Oracle)),
            ["ALTER TABLE person MODIFY created DEFAULT SYSTIMESTAMP"]
        );
    }

    #[test]
    fn test_add_default_value_validation() {
        let sequence_default = AddDefaultValueStatement::new(
            "person",
            "id",
            LiteralValue::next_value_of("person_seq"),
        );
        assert_eq!(
            validation_errors(sequence_default, &OfflineDatabase::new(Dialect::MySql)),
            ["Database mysql does not support sequences"]
        );

        let informix = AddDefaultValueStatement::new("person", "age", 0);
        assert_eq!(
            validation_errors(informix, &OfflineDatabase::new(Dialect::Informix)),
            ["columnDataType is required"]
        );
    }

    #[test]
    fn test_drop_default_value_per_dialect() {
        let statement = DropDefaultValueStatement::new("person", "status");
        let sql = |dialect| render_sql(statement.clone(), &OfflineDatabase::new(dialect));
        assert_eq!(
            sql(Dialect::Postgres),
            ["ALTER TABLE person ALTER COLUMN status DROP DEFAULT"]
        );
        assert_eq!(sql(Dialect::MySql), ["ALTER TABLE person ALTER status DROP DEFAULT"]);
        assert_eq!(
            sql(Dialect::Mssql),
            ["ALTER TABLE person DROP CONSTRAINT DF_person_status"]
        );
        assert_eq!(
            sql(Dialect::Oracle),
            ["ALTER TABLE person MODIFY status DEFAULT NULL"]
        );
        assert_eq!(
            render_sql(
                statement.with_data_type("VARCHAR(10)"),
                &OfflineDatabase::new(Dialect::Informix)
            ),
            ["ALTER TABLE person MODIFY (status VARCHAR(10))"]
        );
    }
}
