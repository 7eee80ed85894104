//! Core of sqlmint: columns and tables, type mappings, SQL expression nodes,
//! the per-dialect method registry, and the operation compilers it holds.
#![warn(unreachable_pub)]

pub mod dialect;
pub mod error;
pub mod expr;
pub mod method;
pub mod obs;
pub mod schema;
pub mod validate;
pub mod value;

// re-exports
pub use sqlmint_primitives::{JdbcType, LogicalType, TypeFamily};

///
/// Prelude
///
/// Domain vocabulary only; errors and registries are imported explicitly.
///

pub mod prelude {
    pub use crate::{
        dialect::Dialect,
        expr::{SqlExpression, SqlFragment},
        schema::{Column, ColumnRef, Identifier, Table, TypeMapping, WrapperMode},
        value::SqlValue,
    };
    pub use sqlmint_primitives::{JdbcType, LogicalType};
}
