//! Primary key, foreign key and unique constraint generators.

use super::{
    check_deferrable, deferrable_clause, foreign_key_actions, index_tablespace_clause,
    GenerationContext, StatementGenerator, SPECIALIZATION_DATABASE,
};
use crate::database::{Database, Dialect};
use crate::error::GenerationFailure;
use crate::object::{DatabaseObject, ObjectName};
use crate::sql::RenderedSql;
use crate::statement::{
    AddForeignKeyConstraintStatement, AddPrimaryKeyStatement, AddUniqueConstraintStatement,
    DropForeignKeyConstraintStatement, DropPrimaryKeyStatement, DropUniqueConstraintStatement,
    ReorganizeTableStatement, Statement,
};
use crate::validation::ValidationErrors;

/// SQLite cannot add or drop constraints on an existing table.
fn alters_constraints(database: &dyn Database) -> bool {
    database.dialect() != Dialect::Sqlite
}

/// `ADD [CONSTRAINT <name>] <body>`. Informix names the constraint after
/// its definition.
fn add_constraint(database: &dyn Database, name: Option<&str>, body: &str) -> String {
    match name {
        Some(name) if database.dialect() == Dialect::Informix => format!(
            "ADD CONSTRAINT {body} CONSTRAINT {}",
            database.escape_constraint_name(name)
        ),
        Some(name) => format!(
            "ADD CONSTRAINT {} {body}",
            database.escape_constraint_name(name)
        ),
        None => format!("ADD {body}"),
    }
}

fn constraint_object(table: &ObjectName, name: Option<&str>) -> Vec<DatabaseObject> {
    vec![DatabaseObject::constraint(table, name)]
}

fn check_primary_key(statement: &AddPrimaryKeyStatement) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors
        .check_required_field("tableName", &statement.table)
        .check_required_field("columnNames", &statement.columns);
    errors
}

/// Renders the ADD PRIMARY KEY statement, with `modifier` placed between
/// the keywords and the column list.
fn add_primary_key(
    statement: &AddPrimaryKeyStatement,
    database: &dyn Database,
    context: &GenerationContext<'_>,
    modifier: &str,
) -> Result<Vec<RenderedSql>, GenerationFailure> {
    let table = database.escape_table_name(&statement.table);
    let columns = database.escape_column_list(&statement.table, &statement.columns);
    let name = statement
        .constraint_name
        .as_deref()
        .filter(|_| database.supports_primary_key_names());
    let body = format!("PRIMARY KEY{modifier} ({columns})");
    let sql = format!(
        "ALTER TABLE {table} {}{}",
        add_constraint(database, name, &body),
        index_tablespace_clause(database, statement.tablespace.as_deref())
    );

    let mut rendered = vec![RenderedSql::new(
        sql,
        constraint_object(&statement.table, statement.constraint_name.as_deref()),
    )];
    if database.dialect() == Dialect::Db2 {
        let reorg: Statement = ReorganizeTableStatement::new(statement.table.clone()).into();
        rendered.extend(context.generate(&reorg, database)?);
    }
    Ok(rendered)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AddPrimaryKeyGenerator;

impl StatementGenerator for AddPrimaryKeyGenerator {
    type Statement = AddPrimaryKeyStatement;

    fn name(&self) -> &'static str {
        "AddPrimaryKeyGenerator"
    }

    fn is_applicable(&self, _statement: &AddPrimaryKeyStatement, database: &dyn Database) -> bool {
        alters_constraints(database)
    }

    fn validate(&self, statement: &AddPrimaryKeyStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = check_primary_key(statement);
        errors.check_disallowed_field("clustered", &statement.clustered.is_some(), database);
        errors
    }

    fn generate(
        &self,
        statement: &AddPrimaryKeyStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        add_primary_key(statement, database, context, "")
    }
}

/// MSSQL primary keys can be clustered or nonclustered.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddPrimaryKeyGeneratorMssql;

impl StatementGenerator for AddPrimaryKeyGeneratorMssql {
    type Statement = AddPrimaryKeyStatement;

    fn name(&self) -> &'static str {
        "AddPrimaryKeyGeneratorMssql"
    }

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DATABASE
    }

    fn is_applicable(&self, _statement: &AddPrimaryKeyStatement, database: &dyn Database) -> bool {
        database.dialect() == Dialect::Mssql
    }

    fn validate(&self, statement: &AddPrimaryKeyStatement, _database: &dyn Database) -> ValidationErrors {
        check_primary_key(statement)
    }

    fn generate(
        &self,
        statement: &AddPrimaryKeyStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let modifier = match statement.clustered {
            Some(true) => " CLUSTERED",
            Some(false) => " NONCLUSTERED",
            None => "",
        };
        add_primary_key(statement, database, context, modifier)
    }
}

/// Dialects that can only drop a primary key by its constraint name.
const fn drops_primary_key_by_name(dialect: Dialect) -> bool {
    matches!(
        dialect,
        Dialect::Postgres
            | Dialect::Mssql
            | Dialect::Sybase
            | Dialect::SybaseAsa
            | Dialect::Informix
            | Dialect::BigQuery
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DropPrimaryKeyGenerator;

impl StatementGenerator for DropPrimaryKeyGenerator {
    type Statement = DropPrimaryKeyStatement;

    fn name(&self) -> &'static str {
        "DropPrimaryKeyGenerator"
    }

    fn is_applicable(&self, _statement: &DropPrimaryKeyStatement, database: &dyn Database) -> bool {
        alters_constraints(database)
    }

    fn validate(&self, statement: &DropPrimaryKeyStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", &statement.table);
        if drops_primary_key_by_name(database.dialect()) {
            errors.check_required_field("constraintName", &statement.constraint_name);
        }
        errors
    }

    fn generate(
        &self,
        statement: &DropPrimaryKeyStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let dialect = database.dialect();
        let sql = if drops_primary_key_by_name(dialect) {
            let name = statement
                .constraint_name
                .as_deref()
                .ok_or_else(|| GenerationFailure::Invalid("constraintName is required".into()))?;
            format!(
                "ALTER TABLE {table} DROP CONSTRAINT {}",
                database.escape_constraint_name(name)
            )
        } else if dialect == Dialect::Oracle {
            format!("ALTER TABLE {table} DROP PRIMARY KEY DROP INDEX")
        } else {
            format!("ALTER TABLE {table} DROP PRIMARY KEY")
        };
        Ok(vec![RenderedSql::new(
            sql,
            constraint_object(&statement.table, statement.constraint_name.as_deref()),
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AddForeignKeyConstraintGenerator;

impl StatementGenerator for AddForeignKeyConstraintGenerator {
    type Statement = AddForeignKeyConstraintStatement;

    fn name(&self) -> &'static str {
        "AddForeignKeyConstraintGenerator"
    }

    fn is_applicable(&self, _statement: &AddForeignKeyConstraintStatement, database: &dyn Database) -> bool {
        alters_constraints(database)
    }

    fn validate(
        &self,
        statement: &AddForeignKeyConstraintStatement,
        database: &dyn Database,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("constraintName", &statement.constraint_name)
            .check_required_field("baseTableName", &statement.base_table)
            .check_required_field("baseColumnNames", &statement.base_columns)
            .check_required_field("referencedTableName", &statement.referenced_table)
            .check_required_field("referencedColumnNames", &statement.referenced_columns);
        if statement.base_columns.len() != statement.referenced_columns.len()
            && !statement.referenced_columns.is_empty()
        {
            errors.add_error("baseColumnNames and referencedColumnNames differ in length");
        }
        check_deferrable(
            &mut errors,
            statement.deferrable,
            statement.initially_deferred,
            database,
        );
        errors
    }

    fn generate(
        &self,
        statement: &AddForeignKeyConstraintStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let body = format!(
            "FOREIGN KEY ({}) REFERENCES {} ({}){}{}",
            database.escape_column_list(&statement.base_table, &statement.base_columns),
            database.escape_table_name(&statement.referenced_table),
            database.escape_column_list(&statement.referenced_table, &statement.referenced_columns),
            foreign_key_actions(database, statement.on_delete, statement.on_update),
            deferrable_clause(statement.deferrable, statement.initially_deferred),
        );
        let sql = format!(
            "ALTER TABLE {} {}",
            database.escape_table_name(&statement.base_table),
            add_constraint(database, Some(&statement.constraint_name), &body)
        );
        Ok(vec![RenderedSql::new(
            sql,
            vec![
                DatabaseObject::constraint(&statement.base_table, Some(&statement.constraint_name)),
                DatabaseObject::table(&statement.referenced_table),
            ],
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DropForeignKeyConstraintGenerator;

impl StatementGenerator for DropForeignKeyConstraintGenerator {
    type Statement = DropForeignKeyConstraintStatement;

    fn name(&self) -> &'static str {
        "DropForeignKeyConstraintGenerator"
    }

    fn is_applicable(&self, _statement: &DropForeignKeyConstraintStatement, database: &dyn Database) -> bool {
        alters_constraints(database)
    }

    fn validate(
        &self,
        statement: &DropForeignKeyConstraintStatement,
        _database: &dyn Database,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("baseTableName", &statement.base_table)
            .check_required_field("constraintName", &statement.constraint_name);
        errors
    }

    fn generate(
        &self,
        statement: &DropForeignKeyConstraintStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let keyword = if database.dialect().is_mysql_family() {
            "FOREIGN KEY"
        } else {
            "CONSTRAINT"
        };
        Ok(vec![RenderedSql::new(
            format!(
                "ALTER TABLE {} DROP {keyword} {}",
                database.escape_table_name(&statement.base_table),
                database.escape_constraint_name(&statement.constraint_name)
            ),
            constraint_object(&statement.base_table, Some(&statement.constraint_name)),
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AddUniqueConstraintGenerator;

impl StatementGenerator for AddUniqueConstraintGenerator {
    type Statement = AddUniqueConstraintStatement;

    fn name(&self) -> &'static str {
        "AddUniqueConstraintGenerator"
    }

    fn is_applicable(&self, _statement: &AddUniqueConstraintStatement, database: &dyn Database) -> bool {
        alters_constraints(database)
    }

    fn validate(&self, statement: &AddUniqueConstraintStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("tableName", &statement.table)
            .check_required_field("columnNames", &statement.columns);
        check_deferrable(
            &mut errors,
            statement.deferrable,
            statement.initially_deferred,
            database,
        );
        if database.dialect() != Dialect::Oracle {
            errors.check_disallowed_field("disabled", &statement.disabled, database);
        }
        errors
    }

    fn generate(
        &self,
        statement: &AddUniqueConstraintStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let mut body = format!(
            "UNIQUE ({}){}",
            database.escape_column_list(&statement.table, &statement.columns),
            deferrable_clause(statement.deferrable, statement.initially_deferred)
        );
        if statement.disabled && database.dialect() == Dialect::Oracle {
            body.push_str(" DISABLE");
        }
        let sql = format!(
            "ALTER TABLE {} {}{}",
            database.escape_table_name(&statement.table),
            add_constraint(database, statement.constraint_name.as_deref(), &body),
            index_tablespace_clause(database, statement.tablespace.as_deref())
        );
        Ok(vec![RenderedSql::new(
            sql,
            constraint_object(&statement.table, statement.constraint_name.as_deref()),
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DropUniqueConstraintGenerator;

impl StatementGenerator for DropUniqueConstraintGenerator {
    type Statement = DropUniqueConstraintStatement;

    fn name(&self) -> &'static str {
        "DropUniqueConstraintGenerator"
    }

    fn is_applicable(&self, _statement: &DropUniqueConstraintStatement, database: &dyn Database) -> bool {
        alters_constraints(database)
    }

    fn validate(&self, statement: &DropUniqueConstraintStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", &statement.table);
        // ASA drops unique constraints by column list.
        if database.dialect() == Dialect::SybaseAsa {
            errors.check_required_field("columnNames", &statement.columns);
        } else {
            errors.check_required_field("constraintName", &statement.constraint_name);
        }
        errors
    }

    fn generate(
        &self,
        statement: &DropUniqueConstraintStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = database.escape_table_name(&statement.table);
        let dialect = database.dialect();
        let sql = if dialect == Dialect::SybaseAsa {
            format!(
                "ALTER TABLE {table} DROP UNIQUE ({})",
                database.escape_column_list(&statement.table, &statement.columns)
            )
        } else {
            let name = statement
                .constraint_name
                .as_deref()
                .map(|name| database.escape_constraint_name(name))
                .ok_or_else(|| GenerationFailure::Invalid("constraintName is required".into()))?;
            match dialect {
                Dialect::MySql | Dialect::MariaDb => format!("ALTER TABLE {table} DROP KEY {name}"),
                Dialect::Oracle => format!("ALTER TABLE {table} DROP CONSTRAINT {name} DROP INDEX"),
                _ => format!("ALTER TABLE {table} DROP CONSTRAINT {name}"),
            }
        };
        Ok(vec![RenderedSql::new(
            sql,
            constraint_object(&statement.table, statement.constraint_name.as_deref()),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::super::{render_sql, validation_errors};
    use super::*;
    use crate::database::OfflineDatabase;
    use crate::registry::SqlGeneratorRegistry;
    use crate::statement::ForeignKeyAction;

    #[test]
    fn test_add_primary_key() {
        let statement = AddPrimaryKeyStatement::new("person", &["id", "tenant"]).with_name("pk_person");
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Postgres)),
            ["ALTER TABLE person ADD CONSTRAINT pk_person PRIMARY KEY (id, tenant)"]
        );
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Informix)),
            ["ALTER TABLE person ADD CONSTRAINT PRIMARY KEY (id, tenant) CONSTRAINT pk_person"]
        );
        assert_eq!(
            render_sql(
                statement.with_tablespace("fast"),
                &OfflineDatabase::new(Dialect::Oracle)
            ),
            ["ALTER TABLE person ADD CONSTRAINT pk_person PRIMARY KEY (id, tenant) USING INDEX TABLESPACE fast"]
        );
    }

    #[test]
    fn test_add_primary_key_db2_reorganizes() {
        let statement = AddPrimaryKeyStatement::new("person", &["id"]);
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Db2)),
            [
                "ALTER TABLE person ADD PRIMARY KEY (id)",
                "CALL SYSPROC.ADMIN_CMD ('REORG TABLE person')",
            ]
        );
    }

    #[test]
    fn test_add_primary_key_mssql_clustered() {
        let statement = AddPrimaryKeyStatement::new("person", &["id"])
            .with_name("pk_person")
            .clustered(false)
            .with_tablespace("secondary");
        let db = OfflineDatabase::new(Dialect::Mssql);
        assert_eq!(
            render_sql(statement.clone(), &db),
            ["ALTER TABLE person ADD CONSTRAINT pk_person PRIMARY KEY NONCLUSTERED (id) ON secondary"]
        );
        assert!(validation_errors(statement.clone(), &db).is_empty());
        assert_eq!(
            validation_errors(statement, &OfflineDatabase::new(Dialect::Postgres)),
            ["clustered is not allowed on postgresql"]
        );
    }

    #[test]
    fn test_drop_primary_key() {
        let unnamed = DropPrimaryKeyStatement::new("person");
        assert_eq!(
            render_sql(unnamed.clone(), &OfflineDatabase::new(Dialect::MySql)),
            ["ALTER TABLE person DROP PRIMARY KEY"]
        );
        assert_eq!(
            render_sql(unnamed.clone(), &OfflineDatabase::new(Dialect::Oracle)),
            ["ALTER TABLE person DROP PRIMARY KEY DROP INDEX"]
        );
        assert_eq!(
            validation_errors(unnamed.clone(), &OfflineDatabase::new(Dialect::Postgres)),
            ["constraintName is required"]
        );
        assert_eq!(
            render_sql(
                unnamed.with_name("pk_person"),
                &OfflineDatabase::new(Dialect::Postgres)
            ),
            ["ALTER TABLE person DROP CONSTRAINT pk_person"]
        );
    }

    #[test]
    fn test_add_foreign_key() {
        let statement =
            AddForeignKeyConstraintStatement::new("fk_org", "person", &["org_id"], "org", &["id"])
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Restrict)
                .deferrable()
                .initially_deferred();
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Postgres)),
            ["ALTER TABLE person ADD CONSTRAINT fk_org FOREIGN KEY (org_id) REFERENCES org (id) ON UPDATE RESTRICT ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED"]
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
    fn test_add_foreign_key_mismatched_columns() {
        let statement = AddForeignKeyConstraintStatement::new(
            "fk_org",
            "person",
            &["org_id", "tenant"],
            "org",
            &["id"],
        );
        assert_eq!(
            validation_errors(statement, &OfflineDatabase::new(Dialect::Postgres)),
            ["baseColumnNames and referencedColumnNames differ in length"]
        );
    }

    #[test]
    fn test_drop_foreign_key() {
        let statement = DropForeignKeyConstraintStatement::new("person", "fk_org");
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::MariaDb)),
            ["ALTER TABLE person DROP FOREIGN KEY fk_org"]
        );
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::H2)),
            ["ALTER TABLE person DROP CONSTRAINT fk_org"]
        );
        assert!(!SqlGeneratorRegistry::global()
            .supports(&statement.into(), &OfflineDatabase::new(Dialect::Sqlite)));
    }

    #[test]
    fn test_add_unique_constraint() {
        let statement = AddUniqueConstraintStatement::new("person", &["email"]).with_name("uq_email");
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::MySql)),
            ["ALTER TABLE person ADD CONSTRAINT uq_email UNIQUE (email)"]
        );
        assert_eq!(
            render_sql(
                statement.clone().disabled(),
                &OfflineDatabase::new(Dialect::Oracle)
            ),
            ["ALTER TABLE person ADD CONSTRAINT uq_email UNIQUE (email) DISABLE"]
        );
        assert_eq!(
            render_sql(
                statement.clone().deferrable(true),
                &OfflineDatabase::new(Dialect::Postgres)
            ),
            ["ALTER TABLE person ADD CONSTRAINT uq_email UNIQUE (email) DEFERRABLE INITIALLY DEFERRED"]
        );
        assert_eq!(
            validation_errors(statement.disabled(), &OfflineDatabase::new(Dialect::Postgres)),
            ["disabled is not allowed on postgresql"]
        );
    }

    #[test]
    fn test_drop_unique_constraint() {
        let statement = DropUniqueConstraintStatement::new("person", "uq_email").with_columns(&["email"]);
        let sql = |dialect| render_sql(statement.clone(), &OfflineDatabase::new(dialect));
        assert_eq!(sql(Dialect::MySql), ["ALTER TABLE person DROP KEY uq_email"]);
        assert_eq!(
            sql(Dialect::Oracle),
            ["ALTER TABLE person DROP CONSTRAINT uq_email DROP INDEX"]
        );
        assert_eq!(sql(Dialect::SybaseAsa), ["ALTER TABLE person DROP UNIQUE (email)"]);
        assert_eq!(sql(Dialect::Postgres), ["ALTER TABLE person DROP CONSTRAINT uq_email"]);
    }
}
