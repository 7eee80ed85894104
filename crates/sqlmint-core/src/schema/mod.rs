//! Storage-side schema model: identifiers, columns, tables, and the
//! mappings that bind logical values to columns.
//!
//! Everything here is configured single-threaded during schema build.
//! `Table::finalize` seals every column; a finalized table is read-only
//! and may be shared across compiling threads.

mod column;
mod identifier;
mod mapping;
mod table;
mod type_info;
mod wrapper;

pub use column::{Column, ColumnState};
pub use identifier::Identifier;
pub use mapping::{ColumnRef, TypeMapping};
pub use table::Table;
pub use type_info::{ColumnMeta, PrecisionSpec, SqlTypeInfo};
pub use wrapper::{WrapperFunctions, WrapperMode, WrapperTemplate};
