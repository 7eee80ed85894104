use crate::Error;
use sqlmint_config::{DialectName, SqlmintConfig};
use sqlmint_core::{
    dialect::Dialect,
    expr::{SqlExpression, SqlFragment},
    method::MethodRegistry,
    schema::Column,
};
use std::path::Path;

///
/// Compiler
///
/// A dialect and the method registry built from it. Immutable once
/// constructed; share it by reference across compiling threads.
///

#[derive(Clone, Debug)]
pub struct Compiler {
    dialect: Dialect,
    registry: MethodRegistry,
}

impl Compiler {
    pub fn new(dialect: Dialect) -> Result<Self, Error> {
        let registry = dialect.method_registry()?;
        tracing::debug!(
            dialect = %dialect.name(),
            methods = registry.len(),
            "compiler ready"
        );

        Ok(Self { dialect, registry })
    }

    /// Builtin setup for one dialect, without overrides.
    pub fn for_dialect(name: DialectName) -> Result<Self, Error> {
        Self::new(Dialect::new(name))
    }

    pub fn from_config(config: &SqlmintConfig) -> Result<Self, Error> {
        Self::new(Dialect::from_config(config))
    }

    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        Self::from_config(&SqlmintConfig::from_toml_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_config(&SqlmintConfig::load(path)?)
    }

    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    #[must_use]
    pub const fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Lower `receiver.operation(args..)`.
    pub fn compile(
        &self,
        operation: &str,
        receiver: SqlExpression,
        args: Vec<SqlExpression>,
    ) -> Result<SqlExpression, Error> {
        Ok(self.registry.compile(operation, receiver, args)?)
    }

    #[must_use]
    pub fn render(&self, expr: &SqlExpression) -> SqlFragment {
        expr.to_sql(&self.dialect)
    }

    /// Compile and render in one step.
    pub fn compile_to_sql(
        &self,
        operation: &str,
        receiver: SqlExpression,
        args: Vec<SqlExpression>,
    ) -> Result<SqlFragment, Error> {
        let expr = self.compile(operation, receiver, args)?;

        Ok(self.render(&expr))
    }

    /// DDL fragment for `column` in this dialect.
    pub fn column_definition(&self, column: &Column) -> Result<String, Error> {
        Ok(column.sql_definition(&self.dialect)?)
    }
}
