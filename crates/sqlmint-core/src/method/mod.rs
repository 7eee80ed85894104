//! Operation compilers and the per-dialect registry that dispatches to them.
//!
//! A compiler is a stateless strategy keyed by (receiver logical type,
//! operation name). It either folds a literal receiver at compile time or
//! emits a SQL function call around the receiver.

mod registry;
mod string;

pub use registry::{MethodRegistry, MethodRegistryBuilder};
pub use string::{StringLengthMethod, StringTransform, StringTransformMethod, SubstringMethod};

use crate::{error::CompileError, expr::SqlExpression};
use serde::{Deserialize, Serialize};
use sqlmint_primitives::LogicalType;
use std::fmt;

pub const TO_UPPER_CASE: &str = "toUpperCase";
pub const TO_LOWER_CASE: &str = "toLowerCase";
pub const TRIM: &str = "trim";
pub const TRIM_LEFT: &str = "trimLeft";
pub const TRIM_RIGHT: &str = "trimRight";
pub const LENGTH: &str = "length";
pub const SUBSTRING: &str = "substring";

/// Every operation a builtin compiler implements.
pub const BUILTIN_OPERATIONS: [&str; 7] = [
    TO_UPPER_CASE,
    TO_LOWER_CASE,
    TRIM,
    TRIM_LEFT,
    TRIM_RIGHT,
    LENGTH,
    SUBSTRING,
];

/// Return whether `operation` names a builtin compiler.
#[must_use]
pub fn is_builtin_operation(operation: &str) -> bool {
    BUILTIN_OPERATIONS.contains(&operation)
}

///
/// Arity
///
/// Inclusive bounds on the argument count (receiver excluded).
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    #[must_use]
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    #[must_use]
    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn accepts(self, found: usize) -> bool {
        found >= self.min && found <= self.max
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

///
/// SqlMethod
///
/// One operation compiler. Implementations hold no mutable state, so a
/// single instance is shared by every compilation on every thread.
///

pub trait SqlMethod: fmt::Debug + Send + Sync {
    /// Operation name this compiler is registered under.
    fn operation(&self) -> &str;

    fn arity(&self) -> Arity;

    /// Return whether this compiler may be registered for `receiver`.
    fn accepts(&self, _receiver: LogicalType) -> bool {
        true
    }

    /// Lower `receiver.operation(args..)` to a new expression.
    fn compile(
        &self,
        receiver: SqlExpression,
        args: Vec<SqlExpression>,
    ) -> Result<SqlExpression, CompileError>;
}

/// Reject an argument list outside the method's arity.
pub fn check_arity(
    method: &dyn SqlMethod,
    receiver: &SqlExpression,
    args: &[SqlExpression],
) -> Result<(), CompileError> {
    let arity = method.arity();
    if arity.accepts(args.len()) {
        return Ok(());
    }

    Err(CompileError::Arity {
        operation: method.operation().to_string(),
        receiver: receiver.logical_type(),
        expected: arity,
        found: args.len(),
    })
}

///
/// TESTS
///
