use serde::{Deserialize, Serialize};
use sqlmint_config::ConfigError;
use sqlmint_core::{
    error::{CompileError, RegistryError, SchemaError, TemplateError},
    validate::ValidationErrors,
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type. Each variant keeps the typed source so callers can
/// match on its fields; `kind` gives the stable category.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Registry(_) => ErrorKind::Registry,
            Self::Compile(CompileError::Arity { .. }) => ErrorKind::Arity,
            Self::Compile(
                CompileError::ArgumentType { .. } | CompileError::InvalidRange { .. },
            ) => ErrorKind::ArgumentType,
            Self::Compile(CompileError::UnsupportedOperation { .. }) => ErrorKind::Unsupported,
            Self::Schema(_) => ErrorKind::Schema,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// The compile failure, if this error came from lowering an operation.
    #[must_use]
    pub const fn as_compile(&self) -> Option<&CompileError> {
        match self {
            Self::Compile(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TemplateError> for Error {
    fn from(err: TemplateError) -> Self {
        Self::Schema(SchemaError::Template(err))
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Configuration could not be read or parsed.
    Config,

    /// The dialect's method registry could not be built.
    Registry,

    /// Wrong argument count for an operation.
    Arity,

    /// An argument has the wrong type or an impossible literal value.
    ArgumentType,

    /// No compiler for (type, operation) in this dialect.
    Unsupported,

    /// Schema construction or column configuration was rejected.
    Schema,

    /// A column does not match the datastore or its required usage.
    Validation,
}
