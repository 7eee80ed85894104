use sqlmint::{ErrorKind, prelude::*};
use std::collections::BTreeMap;

fn accounts(dialect: &Dialect) -> Table {
    let mut table = Table::new("ACCOUNTS");

    table
        .add_column(Column::new("ID", LogicalType::Long))
        .expect("open table")
        .set_type_info(dialect.type_info(JdbcType::Bigint))
        .expect("unsealed")
        .set_as_primary_key()
        .expect("unsealed")
        .set_identity(true)
        .expect("no default");

    table
        .add_column(Column::new("EMAIL", LogicalType::String))
        .expect("open table")
        .set_type_info(dialect.type_info(JdbcType::Varchar))
        .expect("unsealed")
        .set_column_meta(ColumnMeta::default().with_length(120))
        .expect("unsealed")
        .set_unique(true)
        .expect("unsealed");

    table
}

#[test]
fn ddl_fragments_follow_the_dialect() {
    let compiler = Compiler::for_dialect(DialectName::SqlServer).expect("builtin registry");
    let mut table = accounts(compiler.dialect());
    table.finalize();

    let defs: Vec<String> = table
        .columns()
        .iter()
        .map(|c| compiler.column_definition(c).expect("typed"))
        .collect();

    assert_eq!(
        defs,
        [
            "[ID] BIGINT NOT NULL IDENTITY(1,1)",
            "[EMAIL] VARCHAR(120) NOT NULL UNIQUE",
        ]
    );
}

#[test]
fn finalized_table_rejects_configuration() {
    let dialect = Dialect::new(DialectName::Ansi);
    let mut table = accounts(&dialect);
    table.finalize();

    let err = table
        .column_mut("EMAIL")
        .map(|_| ())
        .expect_err("finalized");
    assert_eq!(Error::from(err).kind(), ErrorKind::Schema);

    let err = table
        .add_column(Column::new("NAME", LogicalType::String))
        .map(|_| ())
        .expect_err("finalized");
    assert_eq!(Error::from(err).kind(), ErrorKind::Schema);
}

#[test]
fn copy_configuration_clones_shape_across_tables() {
    let dialect = Dialect::new(DialectName::Postgres);
    let source_table = accounts(&dialect);
    let source = source_table.column("EMAIL").expect("column");

    let mut archive = Table::new("ACCOUNTS_ARCHIVE");
    let target = archive
        .add_column(Column::new("OLD_EMAIL", LogicalType::String))
        .expect("open table");
    source.copy_configuration_to(target).expect("unsealed target");

    assert_eq!(target.identifier().as_str(), "OLD_EMAIL");
    assert_eq!(target.table().map(Identifier::as_str), Some("ACCOUNTS_ARCHIVE"));
    assert_eq!(target.is_unique(), source.is_unique());
    assert_eq!(target.is_nullable(), source.is_nullable());
    assert_eq!(target.type_info(), source.type_info());
    assert_eq!(target.declared(), source.declared());
    assert_eq!(target.wrapper_functions(), source.wrapper_functions());
}

#[test]
fn type_mapping_binds_existing_columns_only() {
    let dialect = Dialect::new(DialectName::Ansi);
    let table = accounts(&dialect);

    let mapping = TypeMapping::bind(&table, "email", LogicalType::String, &["EMAIL"])
        .expect("column exists");
    assert_eq!(mapping.member(), Some("email"));
    assert!(!mapping.is_multi_column());

    let err = TypeMapping::bind(&table, "phone", LogicalType::String, &["PHONE"])
        .expect_err("missing column");
    assert_eq!(Error::from(err).kind(), ErrorKind::Schema);
}

#[test]
fn table_validation_reports_every_mismatch() {
    let dialect = Dialect::new(DialectName::Postgres);
    let mut table = accounts(&dialect);
    table.finalize();

    let mut metadata = BTreeMap::new();
    metadata.insert(
        "id".to_string(),
        IntrospectedColumn::new("id", JdbcType::Bigint.code())
            .with_auto_increment()
            .with_nullable(true),
    );
    metadata.insert(
        "email".to_string(),
        IntrospectedColumn::new("email", JdbcType::Varchar.code()).with_size(255, 0),
    );

    let errs = table.validate(&metadata).expect_err("two mismatches");

    assert_eq!(
        errs.as_slice(),
        [
            ValidationError::NullabilityMismatch {
                column: "ID".to_string(),
                expected: false,
                actual: true,
            },
            ValidationError::WrongPrecision {
                column: "EMAIL".to_string(),
                expected: 120,
                actual: 255,
            },
        ]
    );
    assert_eq!(Error::from(errs).kind(), ErrorKind::Validation);
}
