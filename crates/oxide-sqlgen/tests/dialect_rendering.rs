//! End-to-end rendering of statements against offline dialect descriptors.

mod common;

use common::{db, generate_err, sql};
use oxide_sqlgen::statement::{
    ColumnSpec, CreateIndexStatement, CreateSequenceStatement, CreateTableStatement,
    DropTableStatement, InsertStatement, RawSqlStatement, TagDatabaseStatement,
};
use oxide_sqlgen::{
    DatabaseObject, Dialect, GenerateError, ObjectName, ObjectQuoting, OfflineDatabase,
    SqlGeneratorRegistry, Statement, StatementKind,
};

fn person() -> CreateTableStatement {
    CreateTableStatement::new("person")
        .column(ColumnSpec::new("id", "INT").not_null())
        .column(ColumnSpec::new("name", "VARCHAR(255)"))
        .primary_key(Some("pk_person"), &["id"])
}

// =============================================================================
// Change sets
// =============================================================================

#[test]
fn test_changeset_renders_in_order() {
    let statements: Vec<Statement> = vec![
        person().into(),
        CreateIndexStatement::new("idx_person_name", "person")
            .column("name")
            .into(),
        InsertStatement::new("person")
            .value("id", 1)
            .value("name", "Ada")
            .into(),
        TagDatabaseStatement::new("v1").into(),
    ];
    let rendered = SqlGeneratorRegistry::global()
        .generate_all(&statements, &db(Dialect::Postgres))
        .unwrap();
    let texts: Vec<_> = rendered.iter().map(|sql| sql.terminated()).collect();
    assert_eq!(
        texts,
        [
            "CREATE TABLE person (id INT NOT NULL, name VARCHAR(255), CONSTRAINT pk_person PRIMARY KEY (id));",
            "CREATE INDEX idx_person_name ON person(name);",
            "INSERT INTO person (id, name) VALUES (1, 'Ada');",
            "UPDATE DATABASECHANGELOG SET TAG = 'v1' WHERE DATEEXECUTED = (SELECT MAX(DATEEXECUTED) FROM DATABASECHANGELOG);",
        ]
    );
}

#[test]
fn test_changeset_stops_at_first_unsupported_statement() {
    let statements: Vec<Statement> = vec![
        DropTableStatement::new("person").into(),
        CreateSequenceStatement::new("person_seq").into(),
    ];
    let err = SqlGeneratorRegistry::global()
        .generate_all(&statements, &db(Dialect::MySql))
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Unsupported {
            statement: StatementKind::CreateSequence,
            ..
        }
    ));
    assert_eq!(err.to_string(), "CreateSequence is not supported on mysql");
}

#[test]
fn test_every_dialect_drops_tables() {
    for dialect in Dialect::ALL {
        let rendered = sql(DropTableStatement::new("person"), &db(dialect));
        assert_eq!(rendered, ["DROP TABLE person"], "dialect {dialect:?}");
    }
}

// =============================================================================
// Names
// =============================================================================

#[test]
fn test_quote_all_uses_dialect_quotes() {
    let drop = |dialect| {
        sql(
            DropTableStatement::new("app.person"),
            &OfflineDatabase::new(dialect).with_quoting(ObjectQuoting::QuoteAll),
        )
    };
    assert_eq!(drop(Dialect::Postgres), ["DROP TABLE \"app\".\"person\""]);
    assert_eq!(drop(Dialect::MySql), ["DROP TABLE `app`.`person`"]);
    assert_eq!(drop(Dialect::Mssql), ["DROP TABLE [app].[person]"]);
}

#[test]
fn test_reserved_words_are_quoted() {
    assert_eq!(
        sql(DropTableStatement::new("order"), &db(Dialect::Postgres)),
        ["DROP TABLE \"order\""]
    );
    assert_eq!(
        sql(DropTableStatement::new("order"), &db(Dialect::MariaDb)),
        ["DROP TABLE `order`"]
    );
}

#[test]
fn test_schema_handling_per_dialect() {
    let statement = DropTableStatement::new("app.person");
    assert_eq!(sql(statement.clone(), &db(Dialect::Oracle)), ["DROP TABLE app.person"]);
    assert_eq!(sql(statement.clone(), &db(Dialect::MySql)), ["DROP TABLE app.person"]);
    assert_eq!(sql(statement, &db(Dialect::Sqlite)), ["DROP TABLE person"]);
}

#[test]
fn test_default_schema_output() {
    let statement = DropTableStatement::new("person");
    let hidden = OfflineDatabase::new(Dialect::Postgres).with_default_schema("app");
    assert_eq!(sql(statement.clone(), &hidden), ["DROP TABLE person"]);

    let shown = hidden.with_output_default_schema(true);
    assert_eq!(sql(statement, &shown), ["DROP TABLE app.person"]);
}

// =============================================================================
// Output metadata
// =============================================================================

#[test]
fn test_affected_objects_and_delimiters() {
    let drop: Statement = DropTableStatement::new("app.person").into();
    let rendered = oxide_sqlgen::generate(&drop, &db(Dialect::Postgres)).unwrap();
    assert_eq!(
        rendered[0].affected(),
        [DatabaseObject::table(&ObjectName::from("app.person"))]
    );
    assert_eq!(rendered[0].terminated(), "DROP TABLE app.person;");

    let raw: Statement = RawSqlStatement::new("CREATE PROCEDURE noop AS BEGIN END")
        .with_end_delimiter("\nGO")
        .into();
    let rendered = oxide_sqlgen::generate(&raw, &db(Dialect::Mssql)).unwrap();
    assert_eq!(rendered[0].terminated(), "CREATE PROCEDURE noop AS BEGIN END\nGO");
}

#[test]
fn test_unsupported_statement_is_an_error() {
    let err = generate_err(
        CreateSequenceStatement::new("order_seq"),
        &db(Dialect::Sqlite),
    );
    assert_eq!(err.to_string(), "CreateSequence is not supported on sqlite");
}
