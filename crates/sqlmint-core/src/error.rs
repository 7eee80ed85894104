//! Failure taxonomy for compilation, registry setup, and schema building.
//!
//! Column validation failures live in `validate`; they are reported in
//! bulk rather than one at a time.

use crate::method::Arity;
use sqlmint_config::DialectName;
use sqlmint_primitives::LogicalType;
use thiserror::Error as ThisError;

///
/// CompileError
///
/// Aborts compilation of the whole expression being built. Never recovered
/// locally and never retried against another dialect.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("'{operation}' on {receiver} takes {expected} argument(s), found {found}")]
    Arity {
        operation: String,
        receiver: LogicalType,
        expected: Arity,
        found: usize,
    },

    #[error("'{operation}' is not supported on {receiver} by the {dialect} dialect")]
    UnsupportedOperation {
        receiver: LogicalType,
        operation: String,
        dialect: DialectName,
    },

    #[error("argument {index} of '{operation}' must be integral, found {found}")]
    ArgumentType {
        operation: String,
        index: usize,
        found: LogicalType,
    },

    #[error("'{operation}' range [{begin}, {end}) ends before it begins")]
    InvalidRange {
        operation: String,
        begin: i64,
        end: i64,
    },
}

///
/// RegistryError
///
/// Startup-time configuration errors raised while a dialect builds its
/// method registry.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("a compiler for '{operation}' on {receiver} is already registered")]
    Conflict {
        receiver: LogicalType,
        operation: String,
    },

    #[error("'{operation}' on {receiver} is not a string operation")]
    ReceiverType {
        receiver: LogicalType,
        operation: String,
    },

    #[error("config references unknown operation '{operation}'")]
    UnknownOperation { operation: String },
}

///
/// SchemaError
///
/// Schema-build failures: table composition and column configuration.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("table '{table}' already has a column '{column}'")]
    DuplicateColumn { table: String, column: String },

    #[error("table '{table}' has no column '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error("table '{table}' is finalized")]
    TableFinalized { table: String },

    #[error("column '{column}' is sealed and can no longer be configured")]
    ColumnSealed { column: String },

    #[error("primary-key column '{column}' cannot be nullable")]
    NullablePrimaryKey { column: String },

    #[error("identity column '{column}' cannot carry a default value")]
    IdentityWithDefault { column: String },

    #[error("column '{column}' has no type information")]
    MissingTypeInfo { column: String },

    #[error("default value of column '{column}' has no SQL literal form")]
    UnrenderableDefault { column: String },

    #[error("type mapping for '{member}' binds no columns")]
    EmptyMapping { member: String },

    #[error(transparent)]
    Template(#[from] TemplateError),
}

///
/// TemplateError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TemplateError {
    #[error("wrapper function '{template}' has no '?' placeholder")]
    MissingPlaceholder { template: String },

    #[error("wrapper function '{template}' has {count} '?' placeholders, expected exactly one")]
    MultiplePlaceholders { template: String, count: usize },
}
