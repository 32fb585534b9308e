//! Raw SQL, comments and changelog tagging.

use super::{GenerationContext, StatementGenerator};
use crate::database::Database;
use crate::error::GenerationFailure;
use crate::object::ObjectName;
use crate::sql::RenderedSql;
use crate::statement::{
    CommentStatement, RawSqlStatement, Statement, TagDatabaseStatement, UpdateStatement,
};
use crate::validation::ValidationErrors;

/// Emits SQL as written. Nothing is reported as affected since the text is
/// opaque.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawSqlGenerator;

impl StatementGenerator for RawSqlGenerator {
    type Statement = RawSqlStatement;

    fn name(&self) -> &'static str {
        "RawSqlGenerator"
    }

    fn validate(&self, statement: &RawSqlStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sql", &statement.sql);
        errors
    }

    fn generate(
        &self,
        statement: &RawSqlStatement,
        _database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let sql = RenderedSql::text_only(statement.sql.trim());
        Ok(vec![match &statement.end_delimiter {
            Some(delimiter) => sql.with_end_delimiter(delimiter.as_str()),
            None => sql,
        }])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CommentGenerator;

impl StatementGenerator for CommentGenerator {
    type Statement = CommentStatement;

    fn name(&self) -> &'static str {
        "CommentGenerator"
    }

    fn validate(&self, statement: &CommentStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("text", &statement.text);
        errors
    }

    fn generate(
        &self,
        statement: &CommentStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        // One line per comment so a newline cannot end it early.
        let text = statement
            .text
            .lines()
            .map(|line| format!("{} {}", database.line_comment(), line.trim_end()))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(vec![RenderedSql::text_only(text).with_end_delimiter("")])
    }
}

/// Sets `TAG` on the most recently executed changelog row.
///
/// The UPDATE itself is rendered by whichever generator the registry picks
/// for [`UpdateStatement`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TagDatabaseGenerator;

impl TagDatabaseGenerator {
    fn changelog_table(context: &GenerationContext<'_>) -> ObjectName {
        let settings = context.settings();
        let table = ObjectName::new(settings.changelog_table_name.as_str());
        match &settings.changelog_schema_name {
            Some(schema) => table.with_schema(schema.as_str()),
            None => table,
        }
    }
}

impl StatementGenerator for TagDatabaseGenerator {
    type Statement = TagDatabaseStatement;

    fn name(&self) -> &'static str {
        "TagDatabaseGenerator"
    }

    fn validate(&self, statement: &TagDatabaseStatement, _database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tag", &statement.tag);
        errors
    }

    fn generate(
        &self,
        statement: &TagDatabaseStatement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let table = Self::changelog_table(context);
        let escaped = database.escape_table_name(&table);
        let executed = database.escape_column_name(&table, "DATEEXECUTED");
        // MySQL refuses to select from the table being updated unless the
        // subquery is materialized first.
        let latest = if database.dialect().is_mysql_family() {
            format!("(SELECT MAX({executed}) FROM (SELECT {executed} FROM {escaped}) AS X)")
        } else {
            format!("(SELECT MAX({executed}) FROM {escaped})")
        };
        let update: Statement = UpdateStatement::new(table)
            .set("TAG", statement.tag.as_str())
            .with_where(format!("{executed} = {latest}"))
            .into();
        Ok(context.generate(&update, database)?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{render_sql, validation_errors};
    use super::*;
    use crate::database::{Dialect, OfflineDatabase};
    use crate::registry::SqlGeneratorRegistry;
    use crate::settings::GeneratorSettings;

    #[test]
    fn test_raw_sql_keeps_text_and_delimiter() {
        let db = OfflineDatabase::new(Dialect::Mssql);
        let statement: Statement = RawSqlStatement::new("  EXEC sp_who \n")
            .with_end_delimiter("\nGO")
            .into();
        let sql = SqlGeneratorRegistry::global().generate(&statement, &db).unwrap();
        assert_eq!(sql.len(), 1);
        assert_eq!(sql[0].text(), "EXEC sp_who");
        assert_eq!(sql[0].terminated(), "EXEC sp_who\nGO");
        assert!(sql[0].affected().is_empty());
    }

    #[test]
    fn test_raw_sql_requires_text() {
        assert_eq!(
            validation_errors(RawSqlStatement::new("  "), &OfflineDatabase::new(Dialect::H2)),
            ["sql is required"]
        );
    }

    #[test]
    fn test_comment() {
        let db = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(
            render_sql(CommentStatement::new("add people\nand their pets"), &db),
            ["-- add people\n-- and their pets"]
        );
        let statement: Statement = CommentStatement::new("x").into();
        let sql = SqlGeneratorRegistry::global().generate(&statement, &db).unwrap();
        assert_eq!(sql[0].end_delimiter(), "");
    }

    #[test]
    fn test_tag_database() {
        assert_eq!(
            render_sql(
                TagDatabaseStatement::new("v1.0"),
                &OfflineDatabase::new(Dialect::Postgres)
            ),
            ["UPDATE DATABASECHANGELOG SET TAG = 'v1.0' WHERE DATEEXECUTED = (SELECT MAX(DATEEXECUTED) FROM DATABASECHANGELOG)"]
        );
        assert_eq!(
            render_sql(TagDatabaseStatement::new("v1.0"), &OfflineDatabase::new(Dialect::MySql)),
            ["UPDATE DATABASECHANGELOG SET TAG = 'v1.0' WHERE DATEEXECUTED = (SELECT MAX(DATEEXECUTED) FROM (SELECT DATEEXECUTED FROM DATABASECHANGELOG) AS X)"]
        );
    }

    #[test]
    fn test_tag_database_uses_configured_table() {
        let registry = SqlGeneratorRegistry::builder()
            .with_builtin_generators()
            .settings(GeneratorSettings {
                changelog_table_name: "history".to_string(),
                changelog_schema_name: Some("audit".to_string()),
                ..GeneratorSettings::default()
            })
            .build();
        let statement: Statement = TagDatabaseStatement::new("release").into();
        let sql = registry
            .generate(&statement, &OfflineDatabase::new(Dialect::Postgres))
            .unwrap();
        assert_eq!(
            sql[0].text(),
            "UPDATE audit.history SET TAG = 'release' WHERE DATEEXECUTED = (SELECT MAX(DATEEXECUTED) FROM audit.history)"
        );
    }
}
