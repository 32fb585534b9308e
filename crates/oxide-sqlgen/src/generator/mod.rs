//! The generator contract and the built-in generators.
//!
//! A generator renders one statement kind. It reports whether it applies to
//! a statement on a given database, validates it, lists advisory warnings,
//! and renders it to zero or more [`RenderedSql`] values. The registry asks
//! every applicable generator for its specialization and uses the highest.
//!
//! Generators are written against [`StatementGenerator`], which receives
//! the concrete statement struct; a blanket impl adapts each one to the
//! object-safe [`SqlGenerator`] stored by the registry.

mod auto_increment;
mod column;
mod constraint;
mod data;
mod default_value;
mod index;
mod raw;
mod sequence;
mod table;
mod view;

use std::ptr;
use std::sync::OnceLock;

use regex::Regex;

pub use auto_increment::{
    AddAutoIncrementGenerator, AddAutoIncrementGeneratorDb2, AddAutoIncrementGeneratorHsqlH2,
    AddAutoIncrementGeneratorPostgres,
};
pub use column::{
    AddColumnGenerator, AddColumnGeneratorDefaultClauseBeforeNotNull, DropColumnGenerator,
    ModifyDataTypeGenerator, RenameColumnGenerator, SetNullableGenerator,
};
pub use constraint::{
    AddForeignKeyConstraintGenerator, AddPrimaryKeyGenerator, AddPrimaryKeyGeneratorMssql,
    AddUniqueConstraintGenerator, DropForeignKeyConstraintGenerator, DropPrimaryKeyGenerator,
    DropUniqueConstraintGenerator,
};
pub use data::{DeleteGenerator, InsertGenerator, UpdateGenerator};
pub use default_value::{
    AddDefaultValueGenerator, AddDefaultValueGeneratorMssql, AddDefaultValueGeneratorOracle,
    DropDefaultValueGenerator,
};
pub use index::{
    CreateIndexGenerator, CreateIndexGeneratorFirebird, CreateIndexGeneratorPostgres,
    DropIndexGenerator,
};
pub use raw::{CommentGenerator, RawSqlGenerator, TagDatabaseGenerator};
pub use sequence::{AlterSequenceGenerator, CreateSequenceGenerator, DropSequenceGenerator};
pub use table::{
    CreateTableGenerator, CreateTableGeneratorBigQuery, DropTableGenerator,
    ReorganizeTableGenerator, RenameTableGenerator, SetTableRemarksGenerator,
    SetTableRemarksGeneratorMssql,
};
pub use view::{CreateViewGenerator, DropViewGenerator, RenameViewGenerator};

use crate::database::{Database, Dialect};
use crate::error::{GenerateError, GenerationFailure};
use crate::object::ObjectName;
use crate::registry::SqlGeneratorRegistry;
use crate::settings::GeneratorSettings;
use crate::sql::RenderedSql;
use crate::statement::{ForeignKeyAction, Statement, StatementKind, TypedStatement};
use crate::validation::{ValidationErrors, Warnings};
use crate::value::LiteralValue;

/// Specialization of a generator that works across dialects.
pub const SPECIALIZATION_DEFAULT: u32 = 1;

/// Specialization of a generator written for particular dialects.
pub const SPECIALIZATION_DATABASE: u32 = 5;

/// Object-safe generator interface held by the registry.
pub trait SqlGenerator: Send + Sync {
    /// Identifies the generator in diagnostics.
    fn name(&self) -> &'static str;

    /// The statement kind this generator renders.
    fn statement_kind(&self) -> StatementKind;

    /// Rank used to choose among applicable generators; higher wins.
    fn specialization(&self) -> u32;

    /// Whether this generator can render `statement` for `database`.
    fn is_applicable(&self, statement: &Statement, database: &dyn Database) -> bool;

    /// Checks the statement for problems on this database.
    fn validate(&self, statement: &Statement, database: &dyn Database) -> ValidationErrors;

    /// Advisory messages for a statement that will still render.
    fn warn(&self, statement: &Statement, database: &dyn Database) -> Warnings;

    /// Renders the statement.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationFailure`] if rendering fails; the registry wraps
    /// it with the statement kind and dialect.
    fn generate(
        &self,
        statement: &Statement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure>;
}

/// A generator for one concrete statement type.
pub trait StatementGenerator: Send + Sync {
    type Statement: TypedStatement;

    fn name(&self) -> &'static str;

    fn specialization(&self) -> u32 {
        SPECIALIZATION_DEFAULT
    }

    fn is_applicable(&self, _statement: &Self::Statement, _database: &dyn Database) -> bool {
        true
    }

    fn validate(&self, statement: &Self::Statement, database: &dyn Database) -> ValidationErrors;

    fn warn(&self, _statement: &Self::Statement, _database: &dyn Database) -> Warnings {
        Warnings::new()
    }

    /// Renders the statement.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationFailure`] if the statement cannot be rendered.
    fn generate(
        &self,
        statement: &Self::Statement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure>;
}

impl<G: StatementGenerator> SqlGenerator for G {
    fn name(&self) -> &'static str {
        StatementGenerator::name(self)
    }

    fn statement_kind(&self) -> StatementKind {
        G::Statement::KIND
    }

    fn specialization(&self) -> u32 {
        StatementGenerator::specialization(self)
    }

    fn is_applicable(&self, statement: &Statement, database: &dyn Database) -> bool {
        G::Statement::from_statement(statement)
            .is_some_and(|typed| StatementGenerator::is_applicable(self, typed, database))
    }

    fn validate(&self, statement: &Statement, database: &dyn Database) -> ValidationErrors {
        match G::Statement::from_statement(statement) {
            Some(typed) => StatementGenerator::validate(self, typed, database),
            None => {
                let mut errors = ValidationErrors::new();
                errors.add_error(format!(
                    "{} cannot validate {}",
                    StatementGenerator::name(self),
                    statement.kind()
                ));
                errors
            }
        }
    }

    fn warn(&self, statement: &Statement, database: &dyn Database) -> Warnings {
        G::Statement::from_statement(statement)
            .map(|typed| StatementGenerator::warn(self, typed, database))
            .unwrap_or_default()
    }

    fn generate(
        &self,
        statement: &Statement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let typed = G::Statement::from_statement(statement).ok_or_else(|| {
            GenerationFailure::Invalid(format!(
                "{} cannot render {}",
                StatementGenerator::name(self),
                statement.kind()
            ))
        })?;
        StatementGenerator::generate(self, typed, database, context)
    }
}

/// The chain of statements being rendered, from the top-level call down to
/// the current one. Generators use it to delegate sub-statements back to
/// the registry.
#[derive(Clone, Copy)]
pub struct GenerationContext<'a> {
    registry: &'a SqlGeneratorRegistry,
    statement: &'a Statement,
    parent: Option<&'a GenerationContext<'a>>,
    depth: usize,
}

impl<'a> GenerationContext<'a> {
    pub(crate) const fn root(registry: &'a SqlGeneratorRegistry, statement: &'a Statement) -> Self {
        Self {
            registry,
            statement,
            parent: None,
            depth: 0,
        }
    }

    pub(crate) const fn child(&'a self, statement: &'a Statement) -> Self {
        Self {
            registry: self.registry,
            statement,
            parent: Some(self),
            depth: self.depth + 1,
        }
    }

    /// Nesting depth; the top-level statement is at depth 0.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The statement rendered at this level.
    #[must_use]
    pub const fn statement(&self) -> &Statement {
        self.statement
    }

    #[must_use]
    pub fn settings(&self) -> &GeneratorSettings {
        self.registry.settings()
    }

    /// True if this very `statement` instance is being rendered at this
    /// level or above. An equal statement built afresh is not matched; loops
    /// through new instances end at the nesting depth limit.
    #[must_use]
    pub fn is_rendering(&self, statement: &Statement) -> bool {
        let mut current = Some(self);
        while let Some(context) = current {
            if ptr::eq(context.statement, statement) {
                return true;
            }
            current = context.parent;
        }
        false
    }

    /// Whether the registry can render `statement` for `database`.
    #[must_use]
    pub fn supports(&self, statement: &Statement, database: &dyn Database) -> bool {
        self.registry.supports(statement, database)
    }

    /// Renders a sub-statement through the registry.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::SelfReference`] if the statement is already
    /// being rendered up the chain, [`GenerateError::NestingTooDeep`] past the
    /// configured depth, or whatever rendering the sub-statement returns.
    pub fn generate(
        &self,
        statement: &Statement,
        database: &dyn Database,
    ) -> Result<Vec<RenderedSql>, GenerateError> {
        self.registry.generate_nested(statement, database, self)
    }
}

/// Every built-in generator, in registration order.
#[must_use]
pub fn builtin_generators() -> Vec<Box<dyn SqlGenerator>> {
    vec![
        Box::new(CreateTableGenerator),
        Box::new(CreateTableGeneratorBigQuery),
        Box::new(DropTableGenerator),
        Box::new(RenameTableGenerator),
        Box::new(SetTableRemarksGenerator),
        Box::new(SetTableRemarksGeneratorMssql),
        Box::new(ReorganizeTableGenerator),
        Box::new(AddColumnGenerator),
        Box::new(AddColumnGeneratorDefaultClauseBeforeNotNull),
        Box::new(DropColumnGenerator),
        Box::new(RenameColumnGenerator),
        Box::new(ModifyDataTypeGenerator),
        Box::new(SetNullableGenerator),
        Box::new(AddDefaultValueGenerator),
        Box::new(AddDefaultValueGeneratorMssql),
        Box::new(AddDefaultValueGeneratorOracle),
        Box::new(DropDefaultValueGenerator),
        Box::new(AddAutoIncrementGenerator),
        Box::new(AddAutoIncrementGeneratorPostgres),
        Box::new(AddAutoIncrementGeneratorDb2),
        Box::new(AddAutoIncrementGeneratorHsqlH2),
        Box::new(AddPrimaryKeyGenerator),
        Box::new(AddPrimaryKeyGeneratorMssql),
        Box::new(DropPrimaryKeyGenerator),
        Box::new(AddForeignKeyConstraintGenerator),
        Box::new(DropForeignKeyConstraintGenerator),
        Box::new(AddUniqueConstraintGenerator),
        Box::new(DropUniqueConstraintGenerator),
        Box::new(CreateIndexGenerator),
        Box::new(CreateIndexGeneratorPostgres),
        Box::new(CreateIndexGeneratorFirebird),
        Box::new(DropIndexGenerator),
        Box::new(CreateViewGenerator),
        Box::new(DropViewGenerator),
        Box::new(RenameViewGenerator),
        Box::new(CreateSequenceGenerator),
        Box::new(AlterSequenceGenerator),
        Box::new(DropSequenceGenerator),
        Box::new(InsertGenerator),
        Box::new(UpdateGenerator),
        Box::new(DeleteGenerator),
        Box::new(RawSqlGenerator),
        Box::new(CommentGenerator),
        Box::new(TagDatabaseGenerator),
    ]
}

/// `DEFAULT <value>`, preceded on MSSQL by the (possibly generated) name of
/// the default constraint.
fn default_clause(
    database: &dyn Database,
    table: &ObjectName,
    column: &str,
    constraint_name: Option<&str>,
    value: &LiteralValue,
) -> String {
    let rendered = database.value_to_sql(value);
    if database.dialect() == Dialect::Mssql {
        let name = constraint_name.map_or_else(
            || database.default_constraint_name(&table.name, column),
            str::to_string,
        );
        return format!(
            "CONSTRAINT {} DEFAULT {rendered}",
            database.escape_constraint_name(&name)
        );
    }
    format!("DEFAULT {rendered}")
}

/// ` ON DELETE ...` / ` ON UPDATE ...`, dropping actions the dialect cannot
/// express.
fn foreign_key_actions(
    database: &dyn Database,
    on_delete: Option<ForeignKeyAction>,
    on_update: Option<ForeignKeyAction>,
) -> String {
    let expressible = |action: &ForeignKeyAction| {
        *action != ForeignKeyAction::Restrict || database.supports_restrict_foreign_keys()
    };
    let mut sql = String::new();
    if let Some(action) = on_update.filter(expressible) {
        // Oracle has no ON UPDATE.
        if database.dialect() != Dialect::Oracle {
            sql.push_str(&format!(" ON UPDATE {}", action.as_sql()));
        }
    }
    if let Some(action) = on_delete.filter(expressible) {
        let oracle_default = database.dialect() == Dialect::Oracle
            && matches!(action, ForeignKeyAction::NoAction | ForeignKeyAction::SetDefault);
        if !oracle_default {
            sql.push_str(&format!(" ON DELETE {}", action.as_sql()));
        }
    }
    sql
}

/// Where the index backing a key or unique constraint is stored.
fn index_tablespace_clause(database: &dyn Database, tablespace: Option<&str>) -> String {
    let dialect = database.dialect();
    match tablespace.filter(|_| database.supports_tablespaces()) {
        Some(tablespace) if dialect.is_tsql_family() => format!(" ON {tablespace}"),
        Some(tablespace) if matches!(dialect, Dialect::Oracle | Dialect::Postgres) => {
            format!(" USING INDEX TABLESPACE {tablespace}")
        }
        _ => String::new(),
    }
}

/// ` DEFERRABLE` / ` INITIALLY DEFERRED`.
fn deferrable_clause(deferrable: bool, initially_deferred: bool) -> String {
    let mut sql = String::new();
    if deferrable {
        sql.push_str(" DEFERRABLE");
    }
    if initially_deferred {
        sql.push_str(" INITIALLY DEFERRED");
    }
    sql
}

/// Adds the errors for deferrable options the dialect cannot express.
fn check_deferrable(
    errors: &mut ValidationErrors,
    deferrable: bool,
    initially_deferred: bool,
    database: &dyn Database,
) {
    if !database.supports_initially_deferrable_columns() {
        errors
            .check_disallowed_field("initiallyDeferred", &initially_deferred, database)
            .check_disallowed_field("deferrable", &deferrable, database);
    }
}

fn where_placeholder_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r":name|\?|:value").ok())
        .as_ref()
}

/// Counts `(:name, value)` placeholders, where `?` and `:value` both take
/// a value.
fn count_where_placeholders(clause: &str) -> (usize, usize) {
    where_placeholder_pattern().map_or((0, 0), |pattern| {
        pattern
            .find_iter(clause)
            .fold((0, 0), |(names, values), found| {
                if found.as_str() == ":name" {
                    (names + 1, values)
                } else {
                    (names, values + 1)
                }
            })
    })
}

/// Binds a WHERE clause: each `:name` takes the next column name, escaped
/// for `table`, and each `?` or `:value` takes the next parameter.
/// Missing and leftover bindings are both errors.
fn bind_where_parameters(
    clause: &str,
    table: &ObjectName,
    column_names: &[String],
    parameters: &[LiteralValue],
    database: &dyn Database,
) -> Result<String, GenerationFailure> {
    let pattern = where_placeholder_pattern().ok_or_else(|| {
        GenerationFailure::Invalid("where placeholder pattern failed to compile".to_string())
    })?;
    let mut names = column_names.iter();
    let mut values = parameters.iter();
    let mut bound = String::with_capacity(clause.len());
    let mut last = 0;
    for found in pattern.find_iter(clause) {
        bound.push_str(&clause[last..found.start()]);
        if found.as_str() == ":name" {
            let name = names.next().ok_or_else(|| {
                GenerationFailure::Invalid(format!("Not enough where column names for '{clause}'"))
            })?;
            bound.push_str(&database.escape_column_name(table, name));
        } else {
            let value = values.next().ok_or_else(|| {
                GenerationFailure::Invalid(format!("Not enough where parameters for '{clause}'"))
            })?;
            bound.push_str(&database.value_to_sql(value));
        }
        last = found.end();
    }
    bound.push_str(&clause[last..]);
    if names.next().is_some() {
        return Err(GenerationFailure::Invalid(format!(
            "Unused where column names for '{clause}'"
        )));
    }
    if values.next().is_some() {
        return Err(GenerationFailure::Invalid(format!(
            "Unused where parameters for '{clause}'"
        )));
    }
    Ok(bound)
}

/// Checks a WHERE clause against its column names and parameters.
fn check_where_parameters(
    errors: &mut ValidationErrors,
    clause: Option<&str>,
    column_names: &[String],
    parameters: &[LiteralValue],
) {
    for parameter in parameters {
        errors.check_finite_value("whereParams", parameter);
    }
    let (names, values) = clause.map_or((0, 0), count_where_placeholders);
    if names != column_names.len() {
        errors.add_error(format!(
            "whereClause has {names} :name placeholders but {} whereColumnNames",
            column_names.len()
        ));
    }
    if values != parameters.len() {
        errors.add_error(format!(
            "whereClause has {values} value placeholders but {} whereParams",
            parameters.len()
        ));
    }
}

#[cfg(test)]
fn render_sql(statement: impl Into<Statement>, database: &dyn Database) -> Vec<String> {
    SqlGeneratorRegistry::global()
        .generate(&statement.into(), database)
        .unwrap()
        .iter()
        .map(|sql| sql.text().to_string())
        .collect()
}

#[cfg(test)]
fn validation_errors(statement: impl Into<Statement>, database: &dyn Database) -> Vec<String> {
    SqlGeneratorRegistry::global()
        .validate(&statement.into(), database)
        .errors()
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::OfflineDatabase;

    #[test]
    fn test_builtin_generators_cover_every_kind() {
        let generators = builtin_generators();
        for kind in StatementKind::ALL {
            assert!(
                generators.iter().any(|g| g.statement_kind() == *kind),
                "no generator for {kind}"
            );
        }
    }

    #[test]
    fn test_builtin_names_are_unique() {
        let mut names: Vec<_> = builtin_generators().iter().map(|g| g.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_bind_where_parameters() {
        let db = OfflineDatabase::new(Dialect::Postgres);
        let table = ObjectName::from("person");
        let bound = bind_where_parameters(
            "id = :value AND name = ?",
            &table,
            &[],
            &[LiteralValue::Integer(3), LiteralValue::text("x")],
            &db,
        )
        .unwrap();
        assert_eq!(bound, "id = 3 AND name = 'x'");

        let named = bind_where_parameters(
            ":name = ? OR :name IS NULL",
            &table,
            &["order".to_string(), "note".to_string()],
            &[LiteralValue::Integer(1)],
            &db,
        )
        .unwrap();
        assert_eq!(named, "\"order\" = 1 OR note IS NULL");
    }

    #[test]
    fn test_bind_where_parameters_rejects_missing_and_leftover() {
        let db = OfflineDatabase::new(Dialect::Postgres);
        let table = ObjectName::from("person");
        let one = [LiteralValue::Integer(1)];
        let missing = bind_where_parameters("id = :value", &table, &[], &[], &db);
        assert!(matches!(missing, Err(GenerationFailure::Invalid(_))));
        let leftover = bind_where_parameters("id = 1", &table, &[], &one, &db);
        assert!(matches!(leftover, Err(GenerationFailure::Invalid(message)) if message.starts_with("Unused where parameters")));
        let name = bind_where_parameters(":name = ?", &table, &[], &one, &db);
        assert!(matches!(name, Err(GenerationFailure::Invalid(_))));
        let extra_name =
            bind_where_parameters("id = ?", &table, &["id".to_string()], &one, &db);
        assert!(matches!(extra_name, Err(GenerationFailure::Invalid(_))));
    }

    #[test]
    fn test_count_where_placeholders() {
        assert_eq!(count_where_placeholders(":name = ? AND b = :value"), (1, 2));
        assert_eq!(count_where_placeholders("a = 1"), (0, 0));
    }

    #[test]
    fn test_foreign_key_actions_per_dialect() {
        let pg = OfflineDatabase::new(Dialect::Postgres);
        assert_eq!(
            foreign_key_actions(
                &pg,
                Some(ForeignKeyAction::Cascade),
                Some(ForeignKeyAction::Restrict)
            ),
            " ON UPDATE RESTRICT ON DELETE CASCADE"
        );
        let oracle = OfflineDatabase::new(Dialect::Oracle);
        assert_eq!(
            foreign_key_actions(
                &oracle,
                Some(ForeignKeyAction::SetNull),
                Some(ForeignKeyAction::Cascade)
            ),
            " ON DELETE SET NULL"
        );
        let mssql = OfflineDatabase::new(Dialect::Mssql);
        assert_eq!(
            foreign_key_actions(&mssql, Some(ForeignKeyAction::Restrict), None),
            ""
        );
    }
}
