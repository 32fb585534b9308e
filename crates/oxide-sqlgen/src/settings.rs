//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Default name of the changelog table updated by tag statements.
pub const DEFAULT_CHANGELOG_TABLE: &str = "DATABASECHANGELOG";

/// Default limit on nested generator delegation.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 8;

/// How the registry resolves several generators sharing the highest
/// specialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// The generator registered first wins.
    #[default]
    FirstRegistered,
    /// A tie is reported as [`GenerateError::AmbiguousGenerators`](crate::GenerateError::AmbiguousGenerators).
    Reject,
}

/// Settings fixed when a registry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Table holding changelog history, targeted by tag statements.
    pub changelog_table_name: String,
    /// Schema of the changelog table, if not the default.
    pub changelog_schema_name: Option<String>,
    /// Maximum depth of nested delegation before generation is aborted.
    pub max_nesting_depth: usize,
    /// Resolution of equally specialized generators.
    pub tie_policy: TiePolicy,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            changelog_table_name: DEFAULT_CHANGELOG_TABLE.to_string(),
            changelog_schema_name: None,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            tie_policy: TiePolicy::default(),
        }
    }
}
