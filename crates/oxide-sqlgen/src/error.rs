//! Error types for SQL generation.

use crate::database::Dialect;
use crate::statement::StatementKind;

/// Errors surfaced by the generator registry.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// No registered generator is applicable to the statement and dialect.
    #[error("{statement} is not supported on {dialect}")]
    Unsupported {
        /// Kind of the statement that was requested.
        statement: StatementKind,
        /// Short name of the target dialect.
        dialect: String,
    },

    /// Several generators share the highest specialization and the registry
    /// is configured to reject ties.
    #[error(
        "Generators {} share specialization {specialization} for {statement} on {dialect}",
        .generators.join(", ")
    )]
    AmbiguousGenerators {
        /// Kind of the statement that was requested.
        statement: StatementKind,
        /// Short name of the target dialect.
        dialect: String,
        /// The shared specialization level.
        specialization: u32,
        /// Names of the tied generators, in registration order.
        generators: Vec<&'static str>,
    },

    /// The selected generator failed while rendering.
    #[error("{generator} failed to render {statement} for {dialect}: {source}")]
    Failed {
        /// Kind of the statement being rendered.
        statement: StatementKind,
        /// Short name of the target dialect.
        dialect: String,
        /// Name of the generator that failed.
        generator: &'static str,
        /// What went wrong.
        #[source]
        source: GenerationFailure,
    },

    /// Nested delegation went deeper than the configured limit.
    #[error("Nested generation of {statement} exceeded the depth limit of {limit}")]
    NestingTooDeep {
        /// Kind of the statement that would have exceeded the limit.
        statement: StatementKind,
        /// Configured maximum nesting depth.
        limit: usize,
    },

    /// A generator delegated a statement that is already being generated
    /// further up the chain.
    #[error("{statement} delegated back to itself")]
    SelfReference {
        /// Kind of the re-entered statement.
        statement: StatementKind,
    },
}

impl GenerateError {
    /// Follows nested delegation failures down to the innermost error.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Failed {
                source: GenerationFailure::Nested(inner),
                ..
            } => inner.root_cause(),
            other => other,
        }
    }
}

/// Failures raised by a generator while it renders a statement.
#[derive(Debug, thiserror::Error)]
pub enum GenerationFailure {
    /// Clause-sequence manipulation failed.
    #[error(transparent)]
    Clause(#[from] ClauseError),

    /// A capability probe on the database descriptor failed.
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    /// The statement cannot be rendered as given.
    #[error("{0}")]
    Invalid(String),

    /// A statement delegated back to the registry failed.
    #[error(transparent)]
    Nested(Box<GenerateError>),
}

impl From<GenerateError> for GenerationFailure {
    fn from(err: GenerateError) -> Self {
        Self::Nested(Box::new(err))
    }
}

/// Errors from keyed clause-sequence operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClauseError {
    /// The referenced key is not present.
    #[error("Key '{0}' is not defined")]
    MissingKey(String),

    /// A key was required but is blank.
    #[error("Clause key cannot be blank")]
    BlankKey,

    /// The key is already present in the sequence.
    #[error("Cannot add clause with key '{0}' because it is already defined")]
    DuplicateKey(String),
}

/// Errors from capability probes on a database descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityError {
    /// The descriptor has no version information.
    #[error("Version of {dialect} is not available")]
    VersionUnavailable {
        /// The dialect that was probed.
        dialect: Dialect,
    },
}

/// A dialect name that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect '{0}'")]
pub struct UnknownDialect(pub String);

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_nested_failures() {
        let inner = GenerateError::SelfReference {
            statement: StatementKind::Update,
        };
        let outer = GenerateError::Failed {
            statement: StatementKind::TagDatabase,
            dialect: "h2".to_string(),
            generator: "TagDatabaseGenerator",
            source: inner.into(),
        };
        assert!(matches!(
            outer.root_cause(),
            GenerateError::SelfReference {
                statement: StatementKind::Update
            }
        ));
    }

    #[test]
    fn test_messages_name_statement_and_dialect() {
        let err = GenerateError::Unsupported {
            statement: StatementKind::CreateSequence,
            dialect: "mysql".to_string(),
        };
        assert_eq!(err.to_string(), "CreateSequence is not supported on mysql");

        let err = GenerateError::AmbiguousGenerators {
            statement: StatementKind::DropTable,
            dialect: "postgresql".to_string(),
            specialization: 5,
            generators: vec!["A", "B"],
        };
        assert_eq!(
            err.to_string(),
            "Generators A, B share specialization 5 for DropTable on postgresql"
        );
    }

    #[test]
    fn test_clause_error_messages() {
        assert_eq!(
            ClauseError::DuplicateKey("name".into()).to_string(),
            "Cannot add clause with key 'name' because it is already defined"
        );
        assert_eq!(
            ClauseError::MissingKey("type".into()).to_string(),
            "Key 'type' is not defined"
        );
    }
}
