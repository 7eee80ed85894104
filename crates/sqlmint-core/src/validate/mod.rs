//! Column validation against datastore metadata, and declared-shape checks.
//!
//! Validation never mutates a column. Every mismatch found in one pass is
//! reported; none is coerced away.

mod column;
mod table;

use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use sqlmint_primitives::JdbcType;
use std::fmt;
use thiserror::Error as ThisError;

///
/// IntrospectedColumn
///
/// What the datastore reports for one column (driver metadata).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct IntrospectedColumn {
    pub name: String,

    /// Raw driver type code; may be a vendor code with no `JdbcType`.
    pub type_code: i32,
    pub nullable: bool,

    /// Length for character/binary types, precision for numeric types.
    pub column_size: u32,

    /// Scale for numeric types.
    pub decimal_digits: u32,
    pub default_value: Option<String>,
    pub auto_increment: bool,
}

impl IntrospectedColumn {
    #[must_use]
    pub fn new(name: impl Into<String>, type_code: i32) -> Self {
        Self {
            name: name.into(),
            type_code,
            nullable: false,
            column_size: 0,
            decimal_digits: 0,
            default_value: None,
            auto_increment: false,
        }
    }

    #[must_use]
    pub const fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub const fn with_size(mut self, column_size: u32, decimal_digits: u32) -> Self {
        self.column_size = column_size;
        self.decimal_digits = decimal_digits;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    #[must_use]
    pub const fn with_auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}

///
/// DefinitionCategory
///
/// Usage a column's declared shape was checked against.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum DefinitionCategory {
    #[display("primitive")]
    Primitive,
    #[display("integer")]
    Integer,
    #[display("decimal")]
    Decimal,
    #[display("string")]
    String,
}

///
/// DeclaredShape
///
/// The column's declared type, as reported in definition failures.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DeclaredShape {
    pub jdbc_type: JdbcType,
    pub length: Option<u32>,
    pub scale: Option<u32>,
}

impl fmt::Display for DeclaredShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.jdbc_type)?;
        match (self.length, self.scale) {
            (Some(length), Some(scale)) => write!(f, "({length},{scale})"),
            (Some(length), None) => write!(f, "({length})"),
            (None, Some(scale)) => write!(f, "(?,{scale})"),
            (None, None) => Ok(()),
        }
    }
}

///
/// ValidationError
///
/// One itemized failure, carrying expected vs. actual.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
pub enum ValidationError {
    #[error("column '{column}' is declared {expected} but the datastore reports type code {actual}")]
    TypeIncompatible {
        column: String,
        expected: JdbcType,
        actual: i32,
    },

    #[error("column '{column}' expects scale {expected}, datastore has {actual}")]
    WrongScale {
        column: String,
        expected: u32,
        actual: u32,
    },

    #[error("column '{column}' expects precision {expected}, datastore has {actual}")]
    WrongPrecision {
        column: String,
        expected: u32,
        actual: u32,
    },

    #[error("column '{column}' expects nullable={expected}, datastore has nullable={actual}")]
    NullabilityMismatch {
        column: String,
        expected: bool,
        actual: bool,
    },

    #[error("table '{table}' has no column '{column}' in the datastore")]
    MissingColumn { table: String, column: String },

    #[error("column '{column}' declared as {declared} cannot be used as {category}")]
    Definition {
        column: String,
        category: DefinitionCategory,
        declared: DeclaredShape,
    },
}

///
/// ValidationErrors
///
/// Every failure from one validation pass, in discovery order.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq, ThisError)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }

    /// `Ok` when nothing was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    let items: Vec<String> = errors.iter().map(ToString::to_string).collect();

    format!("{} validation failure(s): {}", errors.len(), items.join("; "))
}
