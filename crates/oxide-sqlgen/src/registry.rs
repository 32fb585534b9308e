//! The generator registry: ranked lookup, validation and rendering.
//!
//! Generators are grouped by statement kind. For a statement and a database
//! the registry keeps the applicable generators, orders them by descending
//! specialization (stable, so registration order breaks ties) and uses the
//! first. A process-wide registry holding the built-in generators is
//! created on first use.

use std::collections::HashMap;
use std::fmt;
use std::ptr;
use std::sync::OnceLock;

use tracing::{debug, trace};

use crate::database::Database;
use crate::error::{GenerateError, Result};
use crate::generator::{builtin_generators, GenerationContext, SqlGenerator};
use crate::settings::{GeneratorSettings, TiePolicy};
use crate::sql::RenderedSql;
use crate::statement::{Statement, StatementKind};
use crate::validation::{ValidationErrors, Warnings};

static GLOBAL: OnceLock<SqlGeneratorRegistry> = OnceLock::new();

/// How validation treats a statement no generator supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Use [`Statement::skip_on_unsupported`].
    #[default]
    StatementDefault,
    /// Report a warning; the statement is skipped.
    Skip,
    /// Report an error.
    Fail,
}

impl UnsupportedPolicy {
    const fn skips(self, statement: &Statement) -> bool {
        match self {
            Self::StatementDefault => statement.skip_on_unsupported(),
            Self::Skip => true,
            Self::Fail => false,
        }
    }
}

/// Builds a [`SqlGeneratorRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    generators: Vec<Box<dyn SqlGenerator>>,
    settings: GeneratorSettings,
}

impl RegistryBuilder {
    /// Adds every built-in generator.
    #[must_use]
    pub fn with_builtin_generators(mut self) -> Self {
        self.generators.extend(builtin_generators());
        self
    }

    /// Adds a generator after those already registered.
    #[must_use]
    pub fn register(mut self, generator: impl SqlGenerator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn build(self) -> SqlGeneratorRegistry {
        let count = self.generators.len();
        let mut generators: HashMap<StatementKind, Vec<Box<dyn SqlGenerator>>> = HashMap::new();
        for generator in self.generators {
            generators
                .entry(generator.statement_kind())
                .or_default()
                .push(generator);
        }
        debug!(generators = count, kinds = generators.len(), "generator registry built");
        SqlGeneratorRegistry {
            generators,
            settings: self.settings,
        }
    }
}

/// Generators indexed by statement kind. Immutable once built, so it can be
/// shared freely between threads.
pub struct SqlGeneratorRegistry {
    generators: HashMap<StatementKind, Vec<Box<dyn SqlGenerator>>>,
    settings: GeneratorSettings,
}

impl fmt::Debug for SqlGeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlGeneratorRegistry")
            .field("generators", &self.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl SqlGeneratorRegistry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The process-wide registry. Built with the built-in generators and
    /// default settings on first use unless one was installed.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::builder().with_builtin_generators().build())
    }

    /// Installs the process-wide registry.
    ///
    /// # Errors
    ///
    /// Returns the registry back if the global one already exists.
    pub fn install_global(registry: Self) -> std::result::Result<&'static Self, Self> {
        GLOBAL.set(registry)?;
        Ok(Self::global())
    }

    #[must_use]
    pub const fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Total number of registered generators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applicable generators for the statement, most specialized first.
    #[must_use]
    pub fn generators(&self, statement: &Statement, database: &dyn Database) -> Vec<&dyn SqlGenerator> {
        let Some(candidates) = self.generators.get(&statement.kind()) else {
            return Vec::new();
        };
        let mut ranked: Vec<&dyn SqlGenerator> = candidates
            .iter()
            .map(AsRef::as_ref)
            .filter(|generator| generator.is_applicable(statement, database))
            .collect();
        ranked.sort_by_key(|generator| std::cmp::Reverse(generator.specialization()));
        trace!(
            statement = %statement.kind(),
            dialect = database.short_name(),
            candidates = ?ranked.iter().map(|g| g.name()).collect::<Vec<_>>(),
            "ranked generators"
        );
        ranked
    }

    /// The generator that would render the statement.
    ///
    /// # Errors
    ///
    /// [`GenerateError::Unsupported`] if none applies;
    /// [`GenerateError::AmbiguousGenerators`] on a tie under
    /// [`TiePolicy::Reject`].
    pub fn best_generator(
        &self,
        statement: &Statement,
        database: &dyn Database,
    ) -> Result<&dyn SqlGenerator> {
        let ranked = self.generators(statement, database);
        let Some(best) = ranked.first().copied() else {
            return Err(GenerateError::Unsupported {
                statement: statement.kind(),
                dialect: database.short_name().to_string(),
            });
        };
        if self.settings.tie_policy == TiePolicy::Reject {
            let tied: Vec<&'static str> = ranked
                .iter()
                .take_while(|g| g.specialization() == best.specialization())
                .map(|g| g.name())
                .collect();
            if tied.len() > 1 {
                return Err(GenerateError::AmbiguousGenerators {
                    statement: statement.kind(),
                    dialect: database.short_name().to_string(),
                    specialization: best.specialization(),
                    generators: tied,
                });
            }
        }
        Ok(best)
    }

    /// True if some generator applies to the statement.
    #[must_use]
    pub fn supports(&self, statement: &Statement, database: &dyn Database) -> bool {
        !self.generators(statement, database).is_empty()
    }

    /// Validates with [`UnsupportedPolicy::StatementDefault`].
    #[must_use]
    pub fn validate(&self, statement: &Statement, database: &dyn Database) -> ValidationErrors {
        self.validate_with(statement, database, UnsupportedPolicy::default())
    }

    /// Validates the statement with the generator that would render it. An
    /// unsupported statement becomes an error, or a warning if `policy`
    /// skips it.
    #[must_use]
    pub fn validate_with(
        &self,
        statement: &Statement,
        database: &dyn Database,
        policy: UnsupportedPolicy,
    ) -> ValidationErrors {
        match self.best_generator(statement, database) {
            Ok(generator) => generator.validate(statement, database),
            Err(err @ GenerateError::Unsupported { .. }) => {
                let mut errors = ValidationErrors::new();
                if policy.skips(statement) {
                    errors.add_warning(err.to_string());
                } else {
                    errors.add_error(err.to_string());
                }
                errors
            }
            Err(err) => {
                let mut errors = ValidationErrors::new();
                errors.add_error(err.to_string());
                errors
            }
        }
    }

    /// Advisory warnings from the generator that would render the statement.
    #[must_use]
    pub fn warn(&self, statement: &Statement, database: &dyn Database) -> Warnings {
        match self.best_generator(statement, database) {
            Ok(generator) => generator.warn(statement, database),
            Err(err) => {
                let mut warnings = Warnings::new();
                warnings.add(err.to_string());
                warnings
            }
        }
    }

    /// Renders the statement with the most specialized applicable generator.
    ///
    /// # Errors
    ///
    /// See [`best_generator`](Self::best_generator); a failing generator is
    /// reported as [`GenerateError::Failed`].
    pub fn generate(&self, statement: &Statement, database: &dyn Database) -> Result<Vec<RenderedSql>> {
        let context = GenerationContext::root(self, statement);
        self.render(statement, database, &context)
    }

    /// Renders several statements in order and concatenates the output.
    ///
    /// # Errors
    ///
    /// Stops at the first statement that fails.
    pub fn generate_all(
        &self,
        statements: &[Statement],
        database: &dyn Database,
    ) -> Result<Vec<RenderedSql>> {
        let mut sql = Vec::new();
        for statement in statements {
            sql.extend(self.generate(statement, database)?);
        }
        Ok(sql)
    }

    pub(crate) fn generate_nested(
        &self,
        statement: &Statement,
        database: &dyn Database,
        parent: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>> {
        if parent.is_rendering(statement) {
            return Err(GenerateError::SelfReference {
                statement: statement.kind(),
            });
        }
        let limit = self.settings.max_nesting_depth;
        if parent.depth() + 1 > limit {
            return Err(GenerateError::NestingTooDeep {
                statement: statement.kind(),
                limit,
            });
        }
        debug_assert!(ptr::eq(parent.settings(), &self.settings));
        let context = parent.child(statement);
        self.render(statement, database, &context)
    }

    fn render(
        &self,
        statement: &Statement,
        database: &dyn Database,
        context: &GenerationContext<'_>,
    ) -> Result<Vec<RenderedSql>> {
        let generator = self.best_generator(statement, database)?;
        debug!(
            statement = %statement.kind(),
            dialect = database.short_name(),
            generator = generator.name(),
            depth = context.depth(),
            "generating SQL"
        );
        generator
            .generate(statement, database, context)
            .map_err(|source| GenerateError::Failed {
                statement: statement.kind(),
                dialect: database.short_name().to_string(),
                generator: generator.name(),
                source,
            })
    }
}
