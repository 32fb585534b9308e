//! # oxide-sqlgen
//!
//! Renders dialect-neutral database change statements into SQL text for a
//! specific database, without connecting to it.
//!
//! This crate provides:
//! - A catalogue of [`Statement`] values describing schema and data changes
//! - A [`Database`] capability descriptor, with [`OfflineDatabase`] covering
//!   sixteen dialects from flag tables
//! - Generators that render one statement kind each, ranked by
//!   specialization inside a [`SqlGeneratorRegistry`]
//! - A keyed [`ClauseSequence`] that generators build and edit before
//!   joining it into text
//!
//! ## Rendering
//!
//! ```rust
//! use oxide_sqlgen::database::{Dialect, OfflineDatabase};
//! use oxide_sqlgen::statement::{AddColumnStatement, ColumnSpec};
//! use oxide_sqlgen::Statement;
//!
//! let statement: Statement = AddColumnStatement::new("person")
//!     .column(ColumnSpec::new("email", "VARCHAR(255)").not_null())
//!     .into();
//!
//! let db = OfflineDatabase::new(Dialect::Postgres);
//! assert!(oxide_sqlgen::validate(&statement, &db).errors().is_empty());
//! let sql = oxide_sqlgen::generate(&statement, &db).unwrap();
//! assert_eq!(sql[0].text(), "ALTER TABLE person ADD email VARCHAR(255) NOT NULL");
//! ```
//!
//! ## Custom generators
//!
//! Build a registry with [`SqlGeneratorRegistry::builder`] to add
//! generators next to the built-in ones. A generator with a higher
//! [`specialization`](generator::StatementGenerator::specialization) wins
//! over the built-in generator for the same statement.

pub mod clause;
pub mod database;
pub mod error;
pub mod generator;
pub mod object;
pub mod registry;
pub mod settings;
pub mod sql;
pub mod statement;
pub mod validation;
pub mod value;

pub use clause::{Clause, ClauseSequence};
pub use database::{Database, Dialect, ObjectKind, ObjectQuoting, OfflineDatabase};
pub use error::{CapabilityError, ClauseError, GenerateError, GenerationFailure, Result};
pub use generator::{GenerationContext, SqlGenerator, StatementGenerator};
pub use object::{DatabaseObject, ObjectName};
pub use registry::{RegistryBuilder, SqlGeneratorRegistry, UnsupportedPolicy};
pub use settings::{GeneratorSettings, TiePolicy};
pub use sql::RenderedSql;
pub use statement::{Statement, StatementKind};
pub use validation::{ValidationErrors, Warnings};
pub use value::LiteralValue;

/// Whether the global registry can render `statement` for `database`.
#[must_use]
pub fn supports(statement: &Statement, database: &dyn Database) -> bool {
    SqlGeneratorRegistry::global().supports(statement, database)
}

/// Validates `statement` with the global registry.
#[must_use]
pub fn validate(statement: &Statement, database: &dyn Database) -> ValidationErrors {
    SqlGeneratorRegistry::global().validate(statement, database)
}

/// Advisory warnings from the global registry.
#[must_use]
pub fn warn(statement: &Statement, database: &dyn Database) -> Warnings {
    SqlGeneratorRegistry::global().warn(statement, database)
}

/// Renders `statement` with the global registry.
///
/// # Errors
///
/// Returns a [`GenerateError`] if no generator supports the statement or
/// rendering fails.
pub fn generate(statement: &Statement, database: &dyn Database) -> Result<Vec<RenderedSql>> {
    SqlGeneratorRegistry::global().generate(statement, database)
}
