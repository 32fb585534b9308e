//! INSERT, UPDATE and DELETE generators.

use super::{bind_where_parameters, check_where_parameters, GenerationContext, StatementGenerator};
use crate::database::Database;
use crate::error::GenerationFailure;
use crate::object::{DatabaseObject, ObjectName};
use crate::sql::RenderedSql;
use crate::statement::{ColumnValue, DeleteStatement, InsertStatement, UpdateStatement};
use crate::validation::ValidationErrors;
use crate::value::LiteralValue;

fn check_values(errors: &mut ValidationErrors, values: &[ColumnValue]) {
    errors.check_required_field("columns", values);
    for value in values {
        errors
            .check_required_field("columnName", &value.column)
            .check_finite_value(&format!("Value of column '{}'", value.column), &value.value);
    }
}

/// ` WHERE <clause>` with placeholders bound, or nothing. Bindings without
/// a clause to go into are an error.
fn where_sql(
    table: &ObjectName,
    clause: Option<&str>,
    column_names: &[String],
    parameters: &[LiteralValue],
    database: &dyn Database,
) -> Result<String, GenerationFailure> {
    let clause = clause.map(str::trim).unwrap_or_default();
    let bound = bind_where_parameters(clause, table, column_names, parameters, database)?;
    if bound.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!(" WHERE {bound}"))
    }
}

fn table_object(table: &ObjectName) -> Vec<DatabaseObject> {
    vec![DatabaseObject::table(table)]
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InsertGenerator;

impl StatementGenerator for InsertGenerator {
    type Statement = InsertStatement;

    fn name(&self) -> &'static str {
        "InsertGenerator"
    }

    fn validate(&self, statement: &InsertStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", &statement.table);
        check_values(&mut errors, &statement.values);
        errors
    }

    fn generate(
        &self,
        statement: &InsertStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let (columns, values): (Vec<_>, Vec<_>) = statement
            .values
            .iter()
            .map(|entry| {
                (
                    database.escape_column_name(&statement.table, &entry.column),
                    database.value_to_sql(&entry.value),
                )
            })
            .unzip();
        Ok(vec![RenderedSql::new(
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                database.escape_table_name(&statement.table),
                columns.join(", "),
                values.join(", ")
            ),
            table_object(&statement.table),
        )])
    }
}

/// UPDATE with `:name`, `?` and `:value` placeholders bound in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateGenerator;

impl StatementGenerator for UpdateGenerator {
    type Statement = UpdateStatement;

    fn name(&self) -> &'static str {
        "UpdateGenerator"
    }

    fn validate(&self, statement: &UpdateStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", &statement.table);
        check_values(&mut errors, &statement.values);
        check_where_parameters(
            &mut errors,
            statement.where_clause.as_deref(),
            &statement.where_column_names,
            &statement.where_parameters,
        );
        errors
    }

    fn generate(
        &self,
        statement: &UpdateStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let assignments = statement
            .values
            .iter()
            .map(|entry| {
                format!(
                    "{} = {}",
                    database.escape_column_name(&statement.table, &entry.column),
                    database.value_to_sql(&entry.value)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        let filter = where_sql(
            &statement.table,
            statement.where_clause.as_deref(),
            &statement.where_column_names,
            &statement.where_parameters,
            database,
        )?;
        Ok(vec![RenderedSql::new(
            format!(
                "UPDATE {} SET {assignments}{filter}",
                database.escape_table_name(&statement.table)
            ),
            table_object(&statement.table),
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteGenerator;

impl StatementGenerator for DeleteGenerator {
    type Statement = DeleteStatement;

    fn name(&self) -> &'static str {
        "DeleteGenerator"
    }

    fn validate(&self, statement: &DeleteStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", &statement.table);
        check_where_parameters(
            &mut errors,
            statement.where_clause.as_deref(),
            &statement.where_column_names,
            &statement.where_parameters,
        );
        errors
    }

    fn generate(
        &self,
        statement: &DeleteStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let filter = where_sql(
            &statement.table,
            statement.where_clause.as_deref(),
            &statement.where_column_names,
            &statement.where_parameters,
            database,
        )?;
        Ok(vec![RenderedSql::new(
            format!(
                "DELETE FROM {}{filter}",
                database.escape_table_name(&statement.table)
            ),
            table_object(&statement.table),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::super::{render_sql, validation_errors};
    use super::*;
    use crate::database::{Dialect, OfflineDatabase};
    use crate::error::GenerateError;
    use crate::registry::SqlGeneratorRegistry;
    use crate::statement::Statement;

    #[test]
    fn test_insert() {
        let statement = InsertStatement::new("person")
            .value("id", 1)
            .value("name", "O'Hara")
            .value("active", true)
            .value("created", LiteralValue::computed("current_timestamp"));
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Postgres)),
            ["INSERT INTO person (id, name, active, created) VALUES (1, 'O''Hara', TRUE, NOW())"]
        );
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Mssql)),
            ["INSERT INTO person (id, name, active, created) VALUES (1, 'O''Hara', 1, GETDATE())"]
        );
    }

    #[test]
    fn test_insert_requires_values() {
        assert_eq!(
            validation_errors(InsertStatement::new("person"), &OfflineDatabase::new(Dialect::H2)),
            ["No columns defined"]
        );
    }

    #[test]
    fn test_update_binds_where_parameters() {
        let statement = UpdateStatement::new("person")
            .set("name", "Ann")
            .set("age", LiteralValue::Null)
            .with_where("id = :value AND tenant = :value")
            .where_parameter(7)
            .where_parameter("acme");
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Postgres)),
            ["UPDATE person SET name = 'Ann', age = NULL WHERE id = 7 AND tenant = 'acme'"]
        );
    }

    #[test]
    fn test_update_parameter_mismatch() {
        let statement = UpdateStatement::new("person")
            .set("name", "Ann")
            .with_where("id = :value");
        let db = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(
            validation_errors(statement.clone(), &db),
            ["whereClause has 1 value placeholders but 0 whereParams"]
        );
        let generic: Statement = statement.into();
        assert!(matches!(
            SqlGeneratorRegistry::global().generate(&generic, &db),
            Err(GenerateError::Failed {
                source: GenerationFailure::Invalid(_),
                ..
            })
        ));
    }

    #[test]
    fn test_question_mark_and_column_name_placeholders() {
        let statement = UpdateStatement::new("t")
            .set("a", 1)
            .with_where(":name = ? AND b = :value")
            .where_column_name("select")
            .where_parameter(5)
            .where_parameter("x");
        let db = OfflineDatabase::new(Dialect::Postgres);
        assert!(validation_errors(statement.clone(), &db).is_empty());
        assert_eq!(
            render_sql(statement, &db),
            ["UPDATE t SET a = 1 WHERE \"select\" = 5 AND b = 'x'"]
        );
        assert_eq!(
            render_sql(
                DeleteStatement::new("t")
                    .with_where(":name = ?")
                    .where_column_name("id")
                    .where_parameter(9),
                &OfflineDatabase::new(Dialect::MySql)
            ),
            ["DELETE FROM t WHERE id = 9"]
        );
    }

    #[test]
    fn test_leftover_where_parameters_fail() {
        let statement = UpdateStatement::new("t")
            .set("a", 1)
            .with_where("id = 1")
            .where_parameter(5);
        let db = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(
            validation_errors(statement.clone(), &db),
            ["whereClause has 0 value placeholders but 1 whereParams"]
        );
        let generic: Statement = statement.into();
        assert!(matches!(
            SqlGeneratorRegistry::global().generate(&generic, &db),
            Err(GenerateError::Failed {
                source: GenerationFailure::Invalid(_),
                ..
            })
        ));

        let unnamed = DeleteStatement::new("t")
            .with_where("id = ?")
            .where_column_name("id")
            .where_parameter(1);
        assert_eq!(
            validation_errors(unnamed, &db),
            ["whereClause has 0 :name placeholders but 1 whereColumnNames"]
        );
    }

    #[test]
    fn test_non_finite_values() {
        let statement = InsertStatement::new("reading")
            .value("id", 1)
            .value("level", LiteralValue::Float(f64::NAN))
            .value("peak", LiteralValue::Float(f64::INFINITY));
        let db = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(
            validation_errors(statement.clone(), &db),
            [
                "Value of column 'level' is not a finite number: NaN",
                "Value of column 'peak' is not a finite number: inf",
            ]
        );
        assert_eq!(
            render_sql(statement, &db),
            ["INSERT INTO reading (id, level, peak) VALUES (1, NULL, NULL)"]
        );

        let delete = DeleteStatement::new("reading")
            .with_where("level = ?")
            .where_parameter(LiteralValue::Float(f64::NEG_INFINITY));
        assert_eq!(
            validation_errors(delete, &db),
            ["whereParams is not a finite number: -inf"]
        );
    }

    #[test]
    fn test_delete() {
        let db = OfflineDatabase::new(Dialect::MySql);
        assert_eq!(
            render_sql(DeleteStatement::new("shop.orders"), &db),
            ["DELETE FROM shop.orders"]
        );
        assert_eq!(
            render_sql(
                DeleteStatement::new("orders")
                    .with_where("status = :value")
                    .where_parameter("void"),
                &db
            ),
            ["DELETE FROM orders WHERE status = 'void'"]
        );
    }
}
