//! oxide-sqlgen CLI
//!
//! Renders statements described in JSON to SQL for a chosen dialect,
//! without connecting to a database.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_sqlgen::{
    Database, Dialect, GeneratorSettings, ObjectQuoting, OfflineDatabase, SqlGeneratorRegistry,
    Statement, TiePolicy, UnsupportedPolicy,
};

/// Render database change statements to dialect-specific SQL.
#[derive(Parser)]
#[command(name = "oxide-sqlgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target dialect (postgresql, mysql, mssql, oracle, ...).
    #[arg(short, long, env = "OXIDE_SQLGEN_DIALECT", global = true)]
    dialect: Option<Dialect>,

    /// Database version as MAJOR[.MINOR].
    #[arg(long, env = "OXIDE_SQLGEN_DB_VERSION", value_parser = parse_version, global = true)]
    db_version: Option<(u32, u32)>,

    /// Default schema of the target database.
    #[arg(long, env = "OXIDE_SQLGEN_DEFAULT_SCHEMA", global = true)]
    default_schema: Option<String>,

    /// Qualify unqualified names with the default schema.
    #[arg(long, global = true)]
    output_default_schema: bool,

    /// Quote every object name, not only those that need it.
    #[arg(long, global = true)]
    quote_all: bool,

    /// Changelog table updated by tag statements.
    #[arg(long, env = "OXIDE_SQLGEN_CHANGELOG_TABLE", global = true)]
    changelog_table: Option<String>,

    /// Schema of the changelog table.
    #[arg(long, global = true)]
    changelog_schema: Option<String>,

    /// Maximum depth of nested statement generation.
    #[arg(long, global = true)]
    max_nesting_depth: Option<usize>,

    /// Fail when two generators are equally specialized.
    #[arg(long, global = true)]
    strict_ties: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SQL for every statement in a JSON file.
    Render {
        /// JSON file holding one statement or an array of statements.
        input: PathBuf,

        /// Skip statements no generator supports instead of failing.
        #[arg(long)]
        skip_unsupported: bool,

        /// Render without validating first.
        #[arg(long)]
        no_validate: bool,
    },

    /// Report validation errors and warnings.
    Validate {
        /// JSON file holding one statement or an array of statements.
        input: PathBuf,
    },

    /// Show the generators that could render each statement, best first.
    Explain {
        /// JSON file holding one statement or an array of statements.
        input: PathBuf,
    },

    /// List the supported dialects.
    Dialects,
}

fn parse_version(value: &str) -> Result<(u32, u32), String> {
    let mut parts = value.trim().split('.');
    let major = parts
        .next()
        .and_then(|major| major.parse().ok())
        .ok_or_else(|| format!("invalid version '{value}', expected MAJOR[.MINOR]"))?;
    let minor = match parts.next() {
        Some(minor) => minor
            .parse()
            .map_err(|_| format!("invalid minor version in '{value}'"))?,
        None => 0,
    };
    Ok((major, minor))
}

impl Cli {
    fn database(&self) -> anyhow::Result<OfflineDatabase> {
        let dialect = self
            .dialect
            .context("a target dialect is required (--dialect or OXIDE_SQLGEN_DIALECT)")?;
        let mut database = OfflineDatabase::new(dialect)
            .with_output_default_schema(self.output_default_schema);
        if let Some((major, minor)) = self.db_version {
            database = database.with_version(major, minor);
        }
        if let Some(schema) = &self.default_schema {
            database = database.with_default_schema(schema.as_str());
        }
        if self.quote_all {
            database = database.with_quoting(ObjectQuoting::QuoteAll);
        }
        Ok(database)
    }

    fn settings(&self) -> GeneratorSettings {
        let mut settings = GeneratorSettings::default();
        if let Some(table) = &self.changelog_table {
            settings.changelog_table_name.clone_from(table);
        }
        settings.changelog_schema_name.clone_from(&self.changelog_schema);
        if let Some(depth) = self.max_nesting_depth {
            settings.max_nesting_depth = depth;
        }
        if self.strict_ties {
            settings.tie_policy = TiePolicy::Reject;
        }
        settings
    }

    fn registry(&self) -> SqlGeneratorRegistry {
        SqlGeneratorRegistry::builder()
            .with_builtin_generators()
            .settings(self.settings())
            .build()
    }
}

/// Reads one statement or an array of statements.
fn load_statements(path: &Path) -> anyhow::Result<Vec<Statement>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let statements = if value.is_array() {
        serde_json::from_value::<Vec<Statement>>(value)
    } else {
        serde_json::from_value::<Statement>(value).map(|statement| vec![statement])
    }
    .with_context(|| format!("{} does not describe statements", path.display()))?;
    debug!(count = statements.len(), path = %path.display(), "statements loaded");
    Ok(statements)
}

/// Runs the command, writing results to `out`. Returns false if any
/// statement was invalid.
fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Dialects => {
            for dialect in Dialect::ALL {
                writeln!(out, "{}", dialect.short_name())?;
            }
            Ok(true)
        }
        Commands::Render {
            input,
            skip_unsupported,
            no_validate,
        } => render(cli, input, *skip_unsupported, *no_validate, out),
        Commands::Validate { input } => validate(cli, input, out),
        Commands::Explain { input } => explain(cli, input, out),
    }
}

fn render(
    cli: &Cli,
    input: &Path,
    skip_unsupported: bool,
    no_validate: bool,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    let database = cli.database()?;
    let registry = cli.registry();
    let statements = load_statements(input)?;
    let policy = if skip_unsupported {
        UnsupportedPolicy::Skip
    } else {
        UnsupportedPolicy::StatementDefault
    };

    let mut valid = true;
    let mut rendered = Vec::new();
    for (position, statement) in statements.iter().enumerate() {
        let number = position + 1;
        if registry.supports(statement, &database) {
            for message in registry.warn(statement, &database).iter() {
                warn!("#{number} {}: {message}", statement.kind());
            }
        } else if skip_unsupported || statement.skip_on_unsupported() {
            warn!(
                "#{number} {} is not supported on {}; skipped",
                statement.kind(),
                database.dialect()
            );
            continue;
        }
        if !no_validate {
            let result = registry.validate_with(statement, &database, policy);
            if result.has_errors() {
                for message in result.errors() {
                    error!("#{number} {}: {message}", statement.kind());
                }
                valid = false;
                continue;
            }
        }
        rendered.extend(
            registry
                .generate(statement, &database)
                .with_context(|| format!("statement #{number} could not be rendered"))?,
        );
    }

    if !valid {
        return Ok(false);
    }
    for sql in &rendered {
        writeln!(out, "{}", sql.terminated())?;
    }
    info!(
        statements = statements.len(),
        sql = rendered.len(),
        dialect = database.short_name(),
        "rendered"
    );
    Ok(true)
}

fn validate(cli: &Cli, input: &Path, out: &mut dyn Write) -> anyhow::Result<bool> {
    let database = cli.database()?;
    let registry = cli.registry();
    let statements = load_statements(input)?;

    let mut valid = true;
    for (position, statement) in statements.iter().enumerate() {
        let number = position + 1;
        let mut result = registry.validate(statement, &database);
        if registry.supports(statement, &database) {
            for message in registry.warn(statement, &database).iter() {
                result.add_warning(message);
            }
        }
        if !result.has_errors() && !result.has_warnings() {
            writeln!(out, "#{number} {}: ok", statement.kind())?;
            continue;
        }
        for message in result.errors() {
            writeln!(out, "#{number} {}: error: {message}", statement.kind())?;
        }
        for message in result.warnings() {
            writeln!(out, "#{number} {}: warning: {message}", statement.kind())?;
        }
        valid &= !result.has_errors();
    }
    Ok(valid)
}

fn explain(cli: &Cli, input: &Path, out: &mut dyn Write) -> anyhow::Result<bool> {
    let database = cli.database()?;
    let registry = cli.registry();
    let statements = load_statements(input)?;

    for (position, statement) in statements.iter().enumerate() {
        writeln!(out, "#{} {}", position + 1, statement.kind())?;
        let generators = registry.generators(statement, &database);
        if generators.is_empty() {
            writeln!(out, "  not supported on {}", database.short_name())?;
        }
        for generator in generators {
            writeln!(
                out,
                "  {} (specialization {})",
                generator.name(),
                generator.specialization()
            )?;
        }
    }
    Ok(true)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let stdout = io::stdout();
    let valid = run(&cli, &mut stdout.lock())?;
    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
