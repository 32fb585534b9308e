#![allow(dead_code)]

use oxide_sqlgen::{
    Database, Dialect, GenerateError, OfflineDatabase, SqlGeneratorRegistry, Statement,
};

pub fn db(dialect: Dialect) -> OfflineDatabase {
    OfflineDatabase::new(dialect)
}

/// Renders through the global registry and returns the SQL texts.
pub fn sql(statement: impl Into<Statement>, database: &dyn Database) -> Vec<String> {
    let statement = statement.into();
    SqlGeneratorRegistry::global()
        .generate(&statement, database)
        .unwrap_or_else(|e| panic!("Failed to render {statement:?}\nError: {e}"))
        .iter()
        .map(|sql| sql.text().to_string())
        .collect()
}

/// Renders with `registry` and returns the SQL texts.
pub fn sql_with(
    registry: &SqlGeneratorRegistry,
    statement: impl Into<Statement>,
    database: &dyn Database,
) -> Vec<String> {
    let statement = statement.into();
    registry
        .generate(&statement, database)
        .unwrap_or_else(|e| panic!("Failed to render {statement:?}\nError: {e}"))
        .iter()
        .map(|sql| sql.text().to_string())
        .collect()
}

pub fn generate_err(statement: impl Into<Statement>, database: &dyn Database) -> GenerateError {
    let statement = statement.into();
    SqlGeneratorRegistry::global()
        .generate(&statement, database)
        .expect_err(&format!("Expected generation error for: {statement:?}"))
}

pub fn errors(statement: impl Into<Statement>, database: &dyn Database) -> Vec<String> {
    SqlGeneratorRegistry::global()
        .validate(&statement.into(), database)
        .errors()
        .to_vec()
}

pub fn warnings(statement: impl Into<Statement>, database: &dyn Database) -> Vec<String> {
    SqlGeneratorRegistry::global()
        .warn(&statement.into(), database)
        .messages()
        .to_vec()
}
