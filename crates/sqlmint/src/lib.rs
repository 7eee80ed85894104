//! ## Crate layout
//! - `config`: TOML dialect configuration.
//! - `core`: columns, tables, type mappings, expressions, and the
//!   per-dialect method registry.
//! - `primitives`: logical and JDBC type vocabularies.
//!
//! `Compiler` wires a configured dialect to its method registry; the
//! `prelude` module covers what query and schema generators need.

pub use sqlmint_config as config;
pub use sqlmint_core as core;
pub use sqlmint_primitives as primitives;

mod compiler;
pub mod error;

pub use compiler::Compiler;
pub use error::{Error, ErrorKind};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Compiler, Error};
    pub use sqlmint_config::{DialectName, SqlmintConfig};
    pub use sqlmint_core::{
        prelude::*,
        schema::{ColumnMeta, SqlTypeInfo},
        validate::{IntrospectedColumn, ValidationError, ValidationErrors},
    };
}
