use crate::{
    dialect::Dialect,
    error::SchemaError,
    schema::{
        identifier::Identifier,
        type_info::{ColumnMeta, PrecisionSpec, SqlTypeInfo},
        wrapper::{WrapperFunctions, WrapperMode, WrapperTemplate},
    },
    validate::IntrospectedColumn,
    value::SqlValue,
};
use sqlmint_primitives::{JdbcType, LogicalType};

///
/// ColumnState
///
/// `Unbound` until type information is attached, `Configured` after, and
/// `Sealed` once the owning table is finalized.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnState {
    Unbound,
    Configured,
    Sealed,
}

///
/// Column
///
/// One physical storage slot. A plain record; validation lives in
/// `validate` and SQL rendering in `dialect`/`expr`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    identifier: Identifier,
    table: Option<Identifier>,
    stored_type: LogicalType,
    primary_key: bool,
    nullable: bool,
    defaultable: bool,
    unique: bool,
    identity: bool,
    default_value: Option<SqlValue>,
    declared: ColumnMeta,
    type_info: Option<SqlTypeInfo>,
    constraints: Option<String>,
    wrappers: WrapperFunctions,
    state: ColumnState,
}

impl Column {
    #[must_use]
    pub fn new(identifier: impl Into<Identifier>, stored_type: LogicalType) -> Self {
        Self {
            identifier: identifier.into(),
            table: None,
            stored_type,
            primary_key: false,
            nullable: false,
            defaultable: false,
            unique: false,
            identity: false,
            default_value: None,
            declared: ColumnMeta::default(),
            type_info: None,
            constraints: None,
            wrappers: WrapperFunctions::default(),
            state: ColumnState::Unbound,
        }
    }

    //
    // accessors
    //

    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Owning table, once the column has been added to one.
    #[must_use]
    pub const fn table(&self) -> Option<&Identifier> {
        self.table.as_ref()
    }

    #[must_use]
    pub const fn stored_type(&self) -> LogicalType {
        self.stored_type
    }

    #[must_use]
    pub const fn state(&self) -> ColumnState {
        self.state
    }

    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub const fn is_defaultable(&self) -> bool {
        self.defaultable
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.identity
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&SqlValue> {
        self.default_value.as_ref()
    }

    #[must_use]
    pub const fn declared(&self) -> &ColumnMeta {
        &self.declared
    }

    #[must_use]
    pub const fn type_info(&self) -> Option<&SqlTypeInfo> {
        self.type_info.as_ref()
    }

    #[must_use]
    pub fn constraints(&self) -> Option<&str> {
        self.constraints.as_deref()
    }

    #[must_use]
    pub const fn wrapper_functions(&self) -> &WrapperFunctions {
        &self.wrappers
    }

    #[must_use]
    pub const fn wrapper_function(&self, mode: WrapperMode) -> Option<&WrapperTemplate> {
        self.wrappers.get(mode)
    }

    /// JDBC type in effect: declared, else from type info, else the stored
    /// logical type's default.
    #[must_use]
    pub fn jdbc_type(&self) -> JdbcType {
        self.declared
            .jdbc_type
            .or_else(|| self.type_info.as_ref().map(|info| info.jdbc_type))
            .unwrap_or_else(|| self.stored_type.default_jdbc_type())
    }

    /// True for LOB / LONGVAR* storage.
    #[must_use]
    pub fn is_unlimited_length(&self) -> bool {
        self.jdbc_type().is_unlimited()
    }

    //
    // setters (schema build only)
    //

    pub fn set_as_primary_key(&mut self) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        self.primary_key = true;
        self.nullable = false;

        Ok(self)
    }

    pub fn set_nullable(&mut self, nullable: bool) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        if nullable && self.primary_key {
            return Err(self.nullable_primary_key());
        }
        self.nullable = nullable;

        Ok(self)
    }

    pub fn set_defaultable(&mut self, defaultable: bool) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        self.defaultable = defaultable;

        Ok(self)
    }

    pub fn set_unique(&mut self, unique: bool) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        self.unique = unique;

        Ok(self)
    }

    /// Mark the column as datastore-generated (AUTO_INCREMENT, IDENTITY...).
    pub fn set_identity(&mut self, identity: bool) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        if identity && self.default_value.is_some() {
            return Err(self.identity_with_default());
        }
        self.identity = identity;

        Ok(self)
    }

    pub fn set_default_value(&mut self, value: SqlValue) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        if self.identity {
            return Err(self.identity_with_default());
        }
        self.default_value = Some(value);

        Ok(self)
    }

    pub fn set_column_meta(&mut self, declared: ColumnMeta) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        self.declared = declared;

        Ok(self)
    }

    pub fn set_type_info(&mut self, type_info: SqlTypeInfo) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        self.type_info = Some(type_info);
        self.state = ColumnState::Configured;

        Ok(self)
    }

    pub fn set_constraints(
        &mut self,
        constraints: impl Into<String>,
    ) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        let constraints = constraints.into();
        self.constraints = (!constraints.trim().is_empty()).then_some(constraints);

        Ok(self)
    }

    /// Store a wrapper template such as `SQRT(?)` for one clause.
    pub fn set_wrapper_function(
        &mut self,
        template: &str,
        mode: WrapperMode,
    ) -> Result<&mut Self, SchemaError> {
        self.ensure_configurable()?;
        let template = WrapperTemplate::parse(template)?;
        self.wrappers.set(mode, template);

        Ok(self)
    }

    //
    // wrapper application
    //

    /// Wrap `replacement` (usually the qualified column identifier) in the
    /// SELECT template; without one, `replacement` is returned unchanged.
    #[must_use]
    pub fn apply_select_function(&self, replacement: &str) -> String {
        self.wrappers.apply(WrapperMode::Select, replacement)
    }

    #[must_use]
    pub fn apply_insert_function(&self, replacement: &str) -> String {
        self.wrappers.apply(WrapperMode::Insert, replacement)
    }

    #[must_use]
    pub fn apply_update_function(&self, replacement: &str) -> String {
        self.wrappers.apply(WrapperMode::Update, replacement)
    }

    //
    // cross-column
    //

    /// Copy every configured attribute onto `other`. The target keeps its
    /// own identifier, owning table, and primary-key flag, so a nullable
    /// source cannot be copied onto a primary-key target.
    pub fn copy_configuration_to(&self, other: &mut Self) -> Result<(), SchemaError> {
        other.ensure_configurable()?;
        if self.nullable && other.primary_key {
            return Err(other.nullable_primary_key());
        }

        other.nullable = self.nullable;
        other.defaultable = self.defaultable;
        other.unique = self.unique;
        other.identity = self.identity;
        other.default_value.clone_from(&self.default_value);
        other.declared.clone_from(&self.declared);
        other.type_info.clone_from(&self.type_info);
        other.constraints.clone_from(&self.constraints);
        other.wrappers.clone_from(&self.wrappers);
        if other.type_info.is_some() {
            other.state = ColumnState::Configured;
        }

        Ok(())
    }

    /// Adopt datastore-side defaults and identity before finalization.
    ///
    /// A configured default is never overwritten, and a column that carries
    /// a default is not promoted to identity. Any datastore default marks
    /// the column defaultable.
    pub fn initialize_from_datastore(
        &mut self,
        info: &IntrospectedColumn,
    ) -> Result<(), SchemaError> {
        self.ensure_configurable()?;

        if info.auto_increment {
            if self.default_value.is_none() {
                self.identity = true;
            } else {
                tracing::warn!(
                    column = %self.identifier,
                    "datastore reports auto-increment on a column with a default; keeping default"
                );
            }
            return Ok(());
        }

        if info.default_value.is_some() {
            self.defaultable = true;
        }
        if self.default_value.is_none() && !self.identity {
            self.default_value = info
                .default_value
                .as_deref()
                .and_then(SqlValue::parse_column_default);
        }

        Ok(())
    }

    /// DDL fragment: `<name> <TYPE>[(p[,s])] [DEFAULT v] [NOT NULL] [UNIQUE]
    /// [identity] [constraints]`.
    pub fn sql_definition(&self, dialect: &Dialect) -> Result<String, SchemaError> {
        let type_info = self
            .type_info
            .as_ref()
            .ok_or_else(|| SchemaError::MissingTypeInfo {
                column: self.identifier.to_string(),
            })?;

        let mut def = format!(
            "{} {}",
            dialect.quote_identifier(&self.identifier),
            self.type_spec(type_info, dialect)
        );

        if let Some(default) = &self.default_value {
            let literal =
                dialect
                    .literal_sql(default)
                    .ok_or_else(|| SchemaError::UnrenderableDefault {
                        column: self.identifier.to_string(),
                    })?;
            def.push_str(" DEFAULT ");
            def.push_str(&literal);
        }
        if !self.nullable {
            def.push_str(" NOT NULL");
        }
        if self.unique {
            def.push_str(" UNIQUE");
        }
        if self.identity {
            def.push(' ');
            def.push_str(dialect.identity_clause());
        }
        if let Some(constraints) = &self.constraints {
            def.push(' ');
            def.push_str(constraints.trim());
        }

        Ok(def)
    }

    fn type_spec(&self, type_info: &SqlTypeInfo, dialect: &Dialect) -> String {
        let name = self
            .declared
            .sql_type
            .as_deref()
            .unwrap_or(&type_info.type_name);

        match type_info.precision_spec {
            PrecisionSpec::None => name.to_string(),
            PrecisionSpec::Length => {
                let length = self.declared.length.or_else(|| {
                    type_info
                        .jdbc_type
                        .is_character()
                        .then(|| dialect.string_default_length())
                });
                match length {
                    Some(length) => format!("{name}({length})"),
                    None => name.to_string(),
                }
            }
            PrecisionSpec::PrecisionScale => match (self.declared.length, self.declared.scale) {
                (Some(precision), Some(scale)) => format!("{name}({precision},{scale})"),
                (Some(precision), None) => format!("{name}({precision})"),
                _ => name.to_string(),
            },
        }
    }

    //
    // lifecycle
    //

    pub(crate) fn attach_to(&mut self, table: &Identifier) {
        self.table = Some(table.clone());
    }

    pub(crate) const fn seal(&mut self) {
        self.state = ColumnState::Sealed;
    }

    fn ensure_configurable(&self) -> Result<(), SchemaError> {
        if self.state == ColumnState::Sealed {
            return Err(SchemaError::ColumnSealed {
                column: self.identifier.to_string(),
            });
        }

        Ok(())
    }

    fn nullable_primary_key(&self) -> SchemaError {
        SchemaError::NullablePrimaryKey {
            column: self.identifier.to_string(),
        }
    }

    fn identity_with_default(&self) -> SchemaError {
        SchemaError::IdentityWithDefault {
            column: self.identifier.to_string(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Table;
    use sqlmint_config::DialectName;

    fn name_column() -> Column {
        let mut column = Column::new("NAME", LogicalType::String);
        column
            .set_type_info(
                SqlTypeInfo::new("VARCHAR", JdbcType::Varchar)
                    .with_max_precision(4000)
                    .with_precision_spec(PrecisionSpec::Length),
            )
            .expect("unsealed")
            .set_column_meta(ColumnMeta::default().with_length(64))
            .expect("unsealed");

        column
    }

    #[test]
    fn new_column_is_unbound_until_typed() {
        let mut column = Column::new("ID", LogicalType::Long);
        assert_eq!(column.state(), ColumnState::Unbound);

        column
            .set_type_info(SqlTypeInfo::new("BIGINT", JdbcType::Bigint))
            .expect("unsealed");
        assert_eq!(column.state(), ColumnState::Configured);
    }

    #[test]
    fn select_wrapper_applies_to_replacement() {
        let mut column = Column::new("C", LogicalType::String);
        column
            .set_wrapper_function("FN(?)", WrapperMode::Select)
            .expect("valid template");

        assert_eq!(column.apply_select_function("C"), "FN(C)");
        assert_eq!(column.apply_insert_function("?"), "?");
    }

    #[test]
    fn missing_select_wrapper_returns_replacement() {
        let column = Column::new("C", LogicalType::String);

        assert_eq!(column.apply_select_function("C"), "C");
        assert!(column.wrapper_function(WrapperMode::Select).is_none());
    }

    #[test]
    fn identity_and_default_are_exclusive() {
        let mut column = Column::new("ID", LogicalType::Long);
        column.set_identity(true).expect("no default yet");

        let err = column
            .set_default_value(SqlValue::Int(1))
            .expect_err("identity forbids default");
        assert!(matches!(err, SchemaError::IdentityWithDefault { .. }));

        let mut column = Column::new("ID", LogicalType::Long);
        column.set_default_value(SqlValue::Int(1)).expect("no identity");
        assert!(column.set_identity(true).is_err());
        assert!(column.set_identity(false).is_ok());
    }

    #[test]
    fn primary_key_is_never_nullable() {
        let mut column = Column::new("ID", LogicalType::Long);
        column
            .set_nullable(true)
            .expect("unsealed")
            .set_as_primary_key()
            .expect("unsealed");
        assert!(!column.is_nullable());

        let err = column
            .set_nullable(true)
            .map(|_| ())
            .expect_err("primary key");
        assert_eq!(
            err,
            SchemaError::NullablePrimaryKey {
                column: "ID".to_string(),
            }
        );
        assert!(!column.is_nullable());
        assert!(column.set_nullable(false).is_ok());
    }

    #[test]
    fn nullable_source_cannot_copy_onto_primary_key() {
        let mut source = name_column();
        source.set_nullable(true).expect("unsealed");

        let mut target = Column::new("ARCHIVE_ID", LogicalType::String);
        target.set_as_primary_key().expect("unsealed");

        let err = source
            .copy_configuration_to(&mut target)
            .expect_err("nullable onto primary key");
        assert!(matches!(err, SchemaError::NullablePrimaryKey { .. }));
        assert!(!target.is_nullable());
        assert!(target.type_info().is_none());

        source.set_nullable(false).expect("unsealed");
        source.copy_configuration_to(&mut target).expect("not null source");
        assert_eq!(target.is_nullable(), source.is_nullable());
        assert!(target.is_primary_key());
    }

    #[test]
    fn copy_configuration_keeps_target_identity() {
        let mut source = name_column();
        source
            .set_nullable(true)
            .expect("unsealed")
            .set_defaultable(true)
            .expect("unsealed")
            .set_unique(true)
            .expect("unsealed")
            .set_default_value(SqlValue::from("n/a"))
            .expect("unsealed")
            .set_constraints("CHECK (NAME <> '')")
            .expect("unsealed")
            .set_wrapper_function("UPPER(?)", WrapperMode::Insert)
            .expect("valid template");

        let mut table = Table::new("PEOPLE_ARCHIVE");
        table
            .add_column(Column::new("ARCHIVED_NAME", LogicalType::String))
            .expect("new column");
        let target = table.column_mut("ARCHIVED_NAME").expect("present");

        source.copy_configuration_to(target).expect("unsealed target");

        assert_eq!(target.identifier(), "ARCHIVED_NAME");
        assert_eq!(target.table().map(Identifier::as_str), Some("PEOPLE_ARCHIVE"));
        assert!(target.is_nullable());
        assert!(target.is_defaultable());
        assert!(target.is_unique());
        assert_eq!(target.is_identity(), source.is_identity());
        assert_eq!(target.default_value(), source.default_value());
        assert_eq!(target.declared(), source.declared());
        assert_eq!(target.type_info(), source.type_info());
        assert_eq!(target.constraints(), source.constraints());
        assert_eq!(target.wrapper_functions(), source.wrapper_functions());
        assert_eq!(target.state(), ColumnState::Configured);
    }

    #[test]
    fn copy_configuration_carries_identity() {
        let mut source = Column::new("ID", LogicalType::Long);
        source
            .set_type_info(SqlTypeInfo::new("BIGINT", JdbcType::Bigint))
            .expect("unsealed")
            .set_identity(true)
            .expect("no default");

        let mut target = Column::new("LEGACY_ID", LogicalType::Long);
        target
            .set_default_value(SqlValue::Int(0))
            .expect("no identity yet");
        source.copy_configuration_to(&mut target).expect("unsealed target");

        assert!(target.is_identity());
        assert!(target.default_value().is_none());
        assert_eq!(target.identifier(), "LEGACY_ID");
    }

    #[test]
    fn copy_configuration_onto_sealed_column_fails() {
        let source = name_column();
        let mut target = name_column();
        target.seal();

        let err = source
            .copy_configuration_to(&mut target)
            .expect_err("sealed target");
        assert!(matches!(err, SchemaError::ColumnSealed { .. }));
    }

    #[test]
    fn sql_definition_renders_full_shape() {
        let dialect = Dialect::new(DialectName::Postgres);
        let mut column = name_column();
        column
            .set_unique(true)
            .expect("unsealed")
            .set_default_value(SqlValue::from("it's"))
            .expect("unsealed")
            .set_constraints("CHECK (\"NAME\" <> '')")
            .expect("unsealed");

        assert_eq!(
            column.sql_definition(&dialect).expect("typed column"),
            "\"NAME\" VARCHAR(64) DEFAULT 'it''s' NOT NULL UNIQUE CHECK (\"NAME\" <> '')"
        );
    }

    #[test]
    fn sql_definition_uses_dialect_identity_clause() {
        let dialect = Dialect::new(DialectName::MySql);
        let mut column = Column::new("ID", LogicalType::Long);
        column
            .set_type_info(dialect.type_info(JdbcType::Bigint))
            .expect("unsealed")
            .set_as_primary_key()
            .expect("unsealed")
            .set_identity(true)
            .expect("no default");

        assert_eq!(
            column.sql_definition(&dialect).expect("typed column"),
            "`ID` BIGINT NOT NULL AUTO_INCREMENT"
        );
    }

    #[test]
    fn sql_definition_falls_back_to_default_string_length() {
        let dialect = Dialect::new(DialectName::Ansi);
        let mut column = Column::new("TITLE", LogicalType::String);
        column
            .set_type_info(dialect.type_info(JdbcType::Varchar))
            .expect("unsealed")
            .set_nullable(true)
            .expect("unsealed");

        assert_eq!(
            column.sql_definition(&dialect).expect("typed column"),
            "\"TITLE\" VARCHAR(255)"
        );
    }

    #[test]
    fn sql_definition_renders_decimal_precision_and_scale() {
        let dialect = Dialect::new(DialectName::Ansi);
        let mut column = Column::new("PRICE", LogicalType::BigDecimal);
        column
            .set_type_info(dialect.type_info(JdbcType::Decimal))
            .expect("unsealed")
            .set_column_meta(ColumnMeta::default().with_length(12).with_scale(2))
            .expect("unsealed");

        assert_eq!(
            column.sql_definition(&dialect).expect("typed column"),
            "\"PRICE\" DECIMAL(12,2) NOT NULL"
        );
    }

    #[test]
    fn sql_definition_requires_type_info() {
        let dialect = Dialect::new(DialectName::Ansi);
        let err = Column::new("X", LogicalType::Int)
            .sql_definition(&dialect)
            .expect_err("untyped column");

        assert!(matches!(err, SchemaError::MissingTypeInfo { .. }));
    }

    #[test]
    fn datastore_auto_increment_marks_identity() {
        let mut column = Column::new("ID", LogicalType::Long);
        let info = IntrospectedColumn::new("ID", JdbcType::Bigint.code()).with_auto_increment();

        column.initialize_from_datastore(&info).expect("unsealed");

        assert!(column.is_identity());
        assert!(column.default_value().is_none());
    }

    #[test]
    fn datastore_default_is_adopted_only_when_unset() {
        let info = IntrospectedColumn::new("STATUS", JdbcType::Varchar.code()).with_default("'open'");

        let mut column = Column::new("STATUS", LogicalType::String);
        assert!(!column.is_defaultable());
        column.initialize_from_datastore(&info).expect("unsealed");
        assert_eq!(column.default_value(), Some(&SqlValue::from("open")));
        assert!(column.is_defaultable());

        let mut column = Column::new("STATUS", LogicalType::String);
        column
            .set_default_value(SqlValue::from("closed"))
            .expect("unsealed");
        column.initialize_from_datastore(&info).expect("unsealed");
        assert_eq!(column.default_value(), Some(&SqlValue::from("closed")));
        assert!(column.is_defaultable());
    }

    #[test]
    fn defaultable_flag_is_settable_until_sealed() {
        let mut column = Column::new("CREATED", LogicalType::Timestamp);
        column.set_defaultable(true).expect("unsealed");
        assert!(column.is_defaultable());

        column.set_defaultable(false).expect("unsealed");
        assert!(!column.is_defaultable());

        column.seal();
        assert!(matches!(
            column.set_defaultable(true),
            Err(SchemaError::ColumnSealed { .. })
        ));
        assert!(!column.is_defaultable());
    }

    #[test]
    fn sql_definition_prefers_declared_sql_type() {
        let dialect = Dialect::new(DialectName::Postgres);
        let mut column = Column::new("NOTES", LogicalType::String);
        column
            .set_type_info(dialect.type_info(JdbcType::Varchar))
            .expect("unsealed")
            .set_column_meta(
                ColumnMeta::default()
                    .with_sql_type("CHARACTER VARYING")
                    .with_length(80),
            )
            .expect("unsealed")
            .set_nullable(true)
            .expect("unsealed");

        assert_eq!(
            column.sql_definition(&dialect).expect("typed column"),
            "\"NOTES\" CHARACTER VARYING(80)"
        );
    }
}
