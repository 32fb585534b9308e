//! Sequence generators.

use super::{GenerationContext, StatementGenerator};
use crate::clause::ClauseSequence;
use crate::database::{Database, Dialect, ObjectKind};
use crate::error::{ClauseError, GenerationFailure};
use crate::object::DatabaseObject;
use crate::sql::RenderedSql;
use crate::statement::{AlterSequenceStatement, CreateSequenceStatement, DropSequenceStatement};
use crate::validation::{ValidationErrors, Warnings};

/// Sequence options shared by CREATE and ALTER, appended under the keys
/// `increment`, `min`, `max`, `cache`, `cycle` and `order`.
#[derive(Debug, Clone, Copy)]
struct SequenceOptions {
    increment_by: Option<i64>,
    min_value: Option<i64>,
    max_value: Option<i64>,
    cache_size: Option<u64>,
    cycle: Option<bool>,
    ordered: Option<bool>,
}

impl SequenceOptions {
    fn append_to(self, clauses: &mut ClauseSequence, database: &dyn Database) -> Result<(), ClauseError> {
        let dialect = database.dialect();
        if let Some(increment) = self.increment_by {
            clauses.append("increment", format!("INCREMENT BY {increment}"))?;
        }
        if let Some(min) = self.min_value {
            clauses.append("min", format!("MINVALUE {min}"))?;
        }
        if let Some(max) = self.max_value {
            clauses.append("max", format!("MAXVALUE {max}"))?;
        }
        match self.cache_size {
            Some(0) if matches!(dialect, Dialect::Oracle | Dialect::MariaDb) => {
                clauses.append("cache", "NOCACHE")?;
            }
            Some(0) if dialect == Dialect::Db2 => {
                clauses.append("cache", "NO CACHE")?;
            }
            Some(cache) => {
                clauses.append("cache", format!("CACHE {cache}"))?;
            }
            None => {}
        }
        match self.cycle {
            Some(true) => {
                clauses.append("cycle", "CYCLE")?;
            }
            Some(false) if matches!(dialect, Dialect::Oracle | Dialect::MariaDb) => {
                clauses.append("cycle", "NOCYCLE")?;
            }
            Some(false) => {
                clauses.append("cycle", "NO CYCLE")?;
            }
            None => {}
        }
        match (self.ordered, dialect) {
            (Some(true), Dialect::Oracle | Dialect::Db2) => {
                clauses.append("order", "ORDER")?;
            }
            (Some(false), Dialect::Oracle) => {
                clauses.append("order", "NOORDER")?;
            }
            (Some(false), Dialect::Db2) => {
                clauses.append("order", "NO ORDER")?;
            }
            _ => {}
        }
        Ok(())
    }
}

fn check_ordered(errors: &mut ValidationErrors, ordered: Option<bool>, database: &dyn Database) {
    if !matches!(database.dialect(), Dialect::Oracle | Dialect::Db2) {
        errors.check_disallowed_field("ordered", &ordered.is_some(), database);
    }
}

/// CREATE SEQUENCE, assembled as a [`ClauseSequence`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateSequenceGenerator;

impl CreateSequenceGenerator {
    /// The clause tree of the CREATE statement, keyed `create sequence`,
    /// `if not exists`, `name`, `as`, `start`, then the shared options.
    ///
    /// # Errors
    ///
    /// Fails only on an internal key collision.
    pub fn clauses(
        statement: &CreateSequenceStatement,
        database: &dyn Database,
    ) -> Result<ClauseSequence, ClauseError> {
        let mut clauses = ClauseSequence::new();
        clauses.append("create sequence", "CREATE SEQUENCE")?;
        if statement.if_not_exists && database.supports_create_if_not_exists(ObjectKind::Sequence) {
            clauses.append("if not exists", "IF NOT EXISTS")?;
        }
        clauses.append("name", database.escape_sequence_name(&statement.sequence))?;
        if let Some(data_type) = statement.data_type.as_deref() {
            clauses.append("as", format!("AS {}", data_type.trim()))?;
        }
        if let Some(start) = statement.start_value {
            clauses.append("start", format!("START WITH {start}"))?;
        }
        SequenceOptions {
            increment_by: statement.increment_by,
            min_value: statement.min_value,
            max_value: statement.max_value,
            cache_size: statement.cache_size,
            cycle: statement.cycle,
            ordered: statement.ordered,
        }
        .append_to(&mut clauses, database)?;
        Ok(clauses)
    }
}

impl StatementGenerator for CreateSequenceGenerator {
    type Statement = CreateSequenceStatement;

    fn name(&self) -> &'static str {
        "CreateSequenceGenerator"
    }

    fn is_applicable(&self, _statement: &CreateSequenceStatement, database: &dyn Database) -> bool {
        database.supports_sequences()
    }

    fn validate(&self, statement: &CreateSequenceStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sequenceName", &statement.sequence);
        if !database.supports_create_if_not_exists(ObjectKind::Sequence) {
            errors.check_disallowed_field("ifNotExists", &statement.if_not_exists, database);
        }
        if !matches!(
            database.dialect(),
            Dialect::Postgres | Dialect::Mssql | Dialect::H2 | Dialect::Hsql | Dialect::Db2 | Dialect::Derby
        ) {
            errors.check_disallowed_field("dataType", &statement.data_type, database);
        }
        check_ordered(&mut errors, statement.ordered, database);
        if let (Some(min), Some(max)) = (statement.min_value, statement.max_value) {
            if min > max {
                errors.add_error(format!("minValue {min} is greater than maxValue {max}"));
            }
        }
        errors
    }

    fn generate(
        &self,
        statement: &CreateSequenceStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let clauses = Self::clauses(statement, database)?;
        Ok(vec![RenderedSql::new(
            clauses.render(),
            vec![DatabaseObject::sequence(&statement.sequence)],
        )])
    }
}

/// ALTER SEQUENCE; renders nothing when no option changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlterSequenceGenerator;

impl StatementGenerator for AlterSequenceGenerator {
    type Statement = AlterSequenceStatement;

    fn name(&self) -> &'static str {
        "AlterSequenceGenerator"
    }

    fn is_applicable(&self, _statement: &AlterSequenceStatement, database: &dyn Database) -> bool {
        database.supports_sequences()
    }

    fn validate(&self, statement: &AlterSequenceStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sequenceName", &statement.sequence);
        check_ordered(&mut errors, statement.ordered, database);
        errors
    }

    fn warn(&self, statement: &AlterSequenceStatement, _database: &dyn Database) -> Warnings {
        let mut warnings = Warnings::new();
        if statement.is_noop() {
            warnings.add(format!(
                "Nothing to alter on sequence {}",
                statement.sequence
            ));
        }
        warnings
    }

    fn generate(
        &self,
        statement: &AlterSequenceStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        if statement.is_noop() {
            return Ok(Vec::new());
        }
        let mut clauses = ClauseSequence::new();
        clauses
            .append("alter sequence", "ALTER SEQUENCE")?
            .append("name", database.escape_sequence_name(&statement.sequence))?;
        SequenceOptions {
            increment_by: statement.increment_by,
            min_value: statement.min_value,
            max_value: statement.max_value,
            cache_size: statement.cache_size,
            cycle: statement.cycle,
            ordered: statement.ordered,
        }
        .append_to(&mut clauses, database)?;
        Ok(vec![RenderedSql::new(
            clauses.render(),
            vec![DatabaseObject::sequence(&statement.sequence)],
        )])
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DropSequenceGenerator;

impl StatementGenerator for DropSequenceGenerator {
    type Statement = DropSequenceStatement;

    fn name(&self) -> &'static str {
        "DropSequenceGenerator"
    }

    fn is_applicable(&self, _statement: &DropSequenceStatement, database: &dyn Database) -> bool {
        database.supports_sequences()
    }

    fn validate(&self, statement: &DropSequenceStatement, database: &dyn Database) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sequenceName", &statement.sequence);
        if !database.supports_drop_if_exists(ObjectKind::Sequence) {
            errors.check_disallowed_field("ifExists", &statement.if_exists, database);
        }
        errors
    }

    fn generate(
        &self,
        statement: &DropSequenceStatement,
        database: &dyn Database,
        _context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>, GenerationFailure> {
        let mut sql = String::from("DROP SEQUENCE ");
        if statement.if_exists && database.supports_drop_if_exists(ObjectKind::Sequence) {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&database.escape_sequence_name(&statement.sequence));
        // Derby requires the drop behavior.
        if database.dialect() == Dialect::Derby {
            sql.push_str(" RESTRICT");
        }
        Ok(vec![RenderedSql::new(
            sql,
            vec![DatabaseObject::sequence(&statement.sequence)],
        )])
    }
}
