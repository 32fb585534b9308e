//! View generators.

use tracing::trace;

use super::{GenerationContext, StatementGenerator};
use crate::database::{Database, Dialect, ObjectKind};
use crate::error::GenerationFailure;
use crate::object::DatabaseObject;
use crate::sql::RenderedSql;
use crate::statement::{CreateViewStatement, DropViewStatement, RenameViewStatement};
use crate::validation::ValidationErrors;

/// Dialects with `CREATE OR REPLACE VIEW`.
const fn replaces_views(dialect: Dialect) -> bool {
    matches!(
        dialect,
        Dialect::Postgres
            | Dialect::Oracle
            | Dialect::H2
            | Dialect::MySql
            | Dialect::MariaDb
            | Dialect::Db2
            | Dialect::Snowflake
            | Dialect::BigQuery
    )
}

/// Creates a view, optionally replacing an existing one.
///
/// MSSQL gained `CREATE OR ALTER` in version 13 (2016). Older or
/// unversioned MSSQL targets get a stub-then-alter script instead, which
/// works everywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateViewGenerator;

impl CreateViewGenerator {
    fn mssql_replace(
        statement: &CreateViewStatement,
        database: &dyn Database,
        view: &str,
        query: &str,
    ) -> Vec<String> {
        let create_or_alter = database.is_at_least(13, 0).unwrap_or_else(|err| {
            trace!(%err, "no MSSQL version, replacing view with a stub");
            false
        });
        if create_or_alter {
            return vec![format!("CREATE OR ALTER VIEW {view} AS {query}")];
        }
        let schema = statement
            .view
            .schema
            .as_deref()
            .or_else(|| database.default_schema_name())
            .unwrap_or("dbo");
        vec![
            format!(
                "IF NOT EXISTS (SELECT * FROM sys.views WHERE object_id = OBJECT_ID(N'[{schema}].[{name}]')) EXEC sp_executesql N'CREATE VIEW {view} AS SELECT ''stub'' AS stub'",
                name = statement.view.name
            ),
            format!("ALTER VIEW {view} AS {query}"),
        ]
    }
}

impl StatementGenerator for CreateViewGenerator {
    type Statement = CreateViewStatement;

    fn name(&self) -> &'static str {
        "CreateViewGenerator"
    }

    fn validate(&self, statement: &CreateViewStatement, database: &dyn Database) -> ValidationErrors {
        let dialect = database.dialect();
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("viewName", &statement.view)
            .check_required_field("selectQuery", &statement.select_query);
        if !(replaces_views(dialect)
            || matches!(dialect, Dialect::Mssql | Dialect::Sqlite | Dialect::Firebird))
        {
            errors.check_disallowed_field("replaceIfExists", &statement.replace_if_exists, database);
        }
        errors
    }

    fn generate(
        &self,
        statement: &CreateViewStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let view = database.escape_view_name(&statement.view);
        let query = statement.select_query.trim();
        let dialect = database.dialect();

        let texts = if !statement.replace_if_exists {
            vec![format!("CREATE VIEW {view} AS {query}")]
        } else if replaces_views(dialect) {
            vec![format!("CREATE OR REPLACE VIEW {view} AS {query}")]
        } else {
            match dialect {
                Dialect::Mssql => Self::mssql_replace(statement, database, &view, query),
                Dialect::Firebird => vec![format!("CREATE OR ALTER VIEW {view} AS {query}")],
                Dialect::Sqlite => vec![
                    format!("DROP VIEW IF EXISTS {view}"),
                    format!("CREATE VIEW {view} AS {query}"),
                ],
                _ => {
                    return Err(GenerationFailure::Invalid(format!(
                        "replaceIfExists is not allowed on {}",
                        database.short_name()
                    )))
                }
            }
        };
        Ok(texts
            .into_iter()
            .map(|text| RenderedSql::new(text, vec![DatabaseObject::view(&statement.view)]))
            .collect())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DropViewGenerator;

impl StatementGenerator for DropViewGenerator {
    type Statement = DropViewStatement;

    fn name(&self) -> &'static str {
        "DropViewGenerator"
    }

    fn validate(&self, statement: &DropViewStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("viewName", &statement.view);
        if !database.supports_drop_if_exists(ObjectKind::View) {
            errors.check_disallowed_field("ifExists", &statement.if_exists, database);
        }
        errors
    }

    fn generate(
        &self,
        statement: &DropViewStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let if_exists = if statement.if_exists && database.supports_drop_if_exists(ObjectKind::View) {
            "IF EXISTS "
        } else {
            ""
        };
        Ok(vec![RenderedSql::new(
            format!(
                "DROP VIEW {if_exists}{}",
                database.escape_view_name(&statement.view)
            ),
            vec![DatabaseObject::view(&statement.view)],
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RenameViewGenerator;

impl StatementGenerator for RenameViewGenerator {
    type Statement = RenameViewStatement;

    fn name(&self) -> &'static str {
        "RenameViewGenerator"
    }

    fn is_applicable(&self, _statement: &RenameViewStatement, database: &dyn Database) -> bool {
        !matches!(
            database.dialect(),
            Dialect::Derby
                | Dialect::Hsql
                | Dialect::H2
                | Dialect::Db2
                | Dialect::Firebird
                | Dialect::Sqlite
                | Dialect::Informix
                | Dialect::BigQuery
        )
    }

    fn validate(&self, statement: &RenameViewStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors
            .check_required_field("oldViewName", &statement.old_view)
            .check_required_field("newViewName", &statement.new_name);
        errors
    }

    fn generate(
        &self,
        statement: &RenameViewStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let old = database.escape_view_name(&statement.old_view);
        let new_view = statement.old_view.sibling(statement.new_name.as_str());
        let new = database.escape_object_name(&statement.new_name, ObjectKind::View);
        let sql = match database.dialect() {
            Dialect::Mssql | Dialect::Sybase => {
                format!("exec sp_rename '{old}', '{}'", statement.new_name)
            }
            Dialect::MySql | Dialect::MariaDb => {
                format!("RENAME TABLE {old} TO {}", database.escape_view_name(&new_view))
            }
            Dialect::Postgres => format!("ALTER TABLE {old} RENAME TO {new}"),
            Dialect::Snowflake => format!("ALTER VIEW {old} RENAME TO {new}"),
            _ => format!("RENAME {old} TO {new}"),
        };
        Ok(vec![RenderedSql::new(
            sql,
            vec![
                DatabaseObject::view(&statement.old_view),
                DatabaseObject::view(&new_view),
            ],
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::super::{render_sql, validation_errors};
    use super::*;
    use crate::database::OfflineDatabase;
    use crate::registry::SqlGeneratorRegistry;
    use crate::statement::Statement;

    const QUERY: &str = "SELECT id, name FROM person";

    #[test]
    fn test_create_view() {
        assert_eq!(
            render_sql(
                CreateViewStatement::new("people", QUERY),
                &OfflineDatabase::new(Dialect::H2)
            ),
            ["CREATE VIEW people AS SELECT id, name FROM person"]
        );
        assert_eq!(
            render_sql(
                CreateViewStatement::new("app.people", QUERY).replace_if_exists(),
                &OfflineDatabase::new(Dialect::Postgres)
            ),
            ["CREATE OR REPLACE VIEW app.people AS SELECT id, name FROM person"]
        );
    }

    #[test]
    fn test_mssql_replace_follows_version() {
        let statement = CreateViewStatement::new("people", QUERY).replace_if_exists();
        assert_eq!(
            render_sql(
                statement.clone(),
                &OfflineDatabase::new(Dialect::Mssql).with_version(15, 0)
            ),
            ["CREATE OR ALTER VIEW people AS SELECT id, name FROM person"]
        );
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Mssql).with_version(11, 0)),
            [
                "IF NOT EXISTS (SELECT * FROM sys.views WHERE object_id = OBJECT_ID(N'[dbo].[people]')) EXEC sp_executesql N'CREATE VIEW people AS SELECT ''stub'' AS stub'",
                "ALTER VIEW people AS SELECT id, name FROM person",
            ]
        );
    }

    #[test]
    fn test_sqlite_replace_drops_first() {
        let statement = CreateViewStatement::new("people", QUERY).replace_if_exists();
        assert_eq!(
            render_sql(statement, &OfflineDatabase::new(Dialect::Sqlite)),
            [
                "DROP VIEW IF EXISTS people",
                "CREATE VIEW people AS SELECT id, name FROM person",
            ]
        );
    }

    #[test]
    fn test_replace_rejected_where_unsupported() {
        let statement = CreateViewStatement::new("people", QUERY).replace_if_exists();
        assert_eq!(
            validation_errors(statement, &OfflineDatabase::new(Dialect::Derby)),
            ["replaceIfExists is not allowed on derby"]
        );
    }

    #[test]
    fn test_drop_view() {
        let statement = DropViewStatement::new("people").if_exists();
        assert_eq!(
            render_sql(statement.clone(), &OfflineDatabase::new(Dialect::Postgres)),
            ["DROP VIEW IF EXISTS people"]
        );
        assert_eq!(
            validation_errors(statement, &OfflineDatabase::new(Dialect::Oracle)),
            ["ifExists is not allowed on oracle"]
        );
    }

    #[test]
    fn test_rename_view() {
        let statement = RenameViewStatement::new("app.people", "persons");
        let sql = |dialect| render_sql(statement.clone(), &OfflineDatabase::new(dialect));
        assert_eq!(sql(Dialect::Postgres), ["ALTER TABLE app.people RENAME TO persons"]);
        assert_eq!(sql(Dialect::Oracle), ["RENAME app.people TO persons"]);
        assert_eq!(sql(Dialect::MySql), ["RENAME TABLE app.people TO app.persons"]);
        assert_eq!(sql(Dialect::Mssql), ["exec sp_rename 'app.people', 'persons'"]);

        let generic: Statement = statement.into();
        assert!(!SqlGeneratorRegistry::global()
            .supports(&generic, &OfflineDatabase::new(Dialect::Sqlite)));
    }
}
