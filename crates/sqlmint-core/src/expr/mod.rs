//! Typed SQL expression nodes.
//!
//! Expressions are built bottom-up while one clause is compiled. Every node
//! carries the `TypeMapping` of the value it produces; compilers read its
//! logical type to pick a strategy. Nodes are plain owned values: a
//! compiler consumes its inputs and returns a fresh tree.

mod render;

pub use render::SqlFragment;

use crate::{
    schema::{Column, ColumnRef, Identifier, TypeMapping, WrapperMode, WrapperTemplate},
    value::SqlValue,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use sqlmint_primitives::LogicalType;

///
/// SqlExpression
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SqlExpression {
    kind: ExprKind,
    mapping: TypeMapping,
}

///
/// ExprKind
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ExprKind {
    /// A value known at compile time.
    Literal(SqlValue),

    /// A bound statement parameter. Never folded, even when its value is
    /// known, so the statement stays reusable across executions.
    Parameter(ParamSlot),

    Column(ColumnReference),

    Composed {
        op: Composition,
        args: Vec<SqlExpression>,
    },
}

///
/// ParamSlot
///
/// One `?` in rendered SQL. Unnamed slots come from literals the dialect
/// cannot inline.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ParamSlot {
    pub name: Option<String>,
    pub value: Option<SqlValue>,
}

///
/// ColumnReference
///
/// Column addressed from an expression; keeps the SELECT wrapper so the
/// rendered reference reads through it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ColumnReference {
    pub qualifier: Option<Identifier>,
    pub column: Identifier,
    pub select_wrapper: Option<WrapperTemplate>,
}

///
/// Composition
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Composition {
    /// `NAME(arg, ...)`
    Function(String),

    /// `(lhs op rhs)`
    Binary(BinaryOp),
}

///
/// BinaryOp
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum BinaryOp {
    #[display("+")]
    Add,
    #[display("-")]
    Sub,
}

impl SqlExpression {
    //
    // constructors
    //

    #[must_use]
    pub fn literal(value: impl Into<SqlValue>, mapping: TypeMapping) -> Self {
        Self {
            kind: ExprKind::Literal(value.into()),
            mapping,
        }
    }

    /// Literal of a computed value with no backing column.
    #[must_use]
    pub fn typed_literal(value: impl Into<SqlValue>, logical_type: LogicalType) -> Self {
        Self::literal(value, TypeMapping::new(logical_type))
    }

    /// Named parameter whose value is bound at execution time.
    #[must_use]
    pub fn parameter(name: impl Into<String>, mapping: TypeMapping) -> Self {
        Self {
            kind: ExprKind::Parameter(ParamSlot {
                name: Some(name.into()),
                value: None,
            }),
            mapping,
        }
    }

    /// Named parameter carrying a value known now but still bound, not
    /// inlined.
    #[must_use]
    pub fn bound_parameter(
        name: impl Into<String>,
        value: impl Into<SqlValue>,
        mapping: TypeMapping,
    ) -> Self {
        Self {
            kind: ExprKind::Parameter(ParamSlot {
                name: Some(name.into()),
                value: Some(value.into()),
            }),
            mapping,
        }
    }

    /// Reference to a column, typed by the column's stored type.
    #[must_use]
    pub fn column(column: &Column) -> Self {
        let mut mapping = TypeMapping::new(column.stored_type());
        if let Some(table) = column.table() {
            mapping = mapping.with_column(ColumnRef::new(
                table.clone(),
                column.identifier().clone(),
            ));
        }

        Self {
            kind: ExprKind::Column(ColumnReference {
                qualifier: column.table().cloned(),
                column: column.identifier().clone(),
                select_wrapper: column
                    .wrapper_function(WrapperMode::Select)
                    .cloned(),
            }),
            mapping,
        }
    }

    /// SQL function call over `args`.
    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>, mapping: TypeMapping) -> Self {
        Self {
            kind: ExprKind::Composed {
                op: Composition::Function(name.into()),
                args,
            },
            mapping,
        }
    }

    #[must_use]
    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self, mapping: TypeMapping) -> Self {
        Self {
            kind: ExprKind::Composed {
                op: Composition::Binary(op),
                args: vec![lhs, rhs],
            },
            mapping,
        }
    }

    //
    // accessors
    //

    #[must_use]
    pub const fn kind(&self) -> &ExprKind {
        &self.kind
    }

    #[must_use]
    pub const fn mapping(&self) -> &TypeMapping {
        &self.mapping
    }

    #[must_use]
    pub const fn logical_type(&self) -> LogicalType {
        self.mapping.logical_type()
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self.kind, ExprKind::Literal(_))
    }

    #[must_use]
    pub const fn is_parameter(&self) -> bool {
        matches!(self.kind, ExprKind::Parameter(_))
    }

    /// The held value when this is a literal.
    #[must_use]
    pub const fn literal_value(&self) -> Option<&SqlValue> {
        match &self.kind {
            ExprKind::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Literal text, when this is a non-null string literal.
    #[must_use]
    pub fn literal_text(&self) -> Option<&str> {
        self.literal_value().and_then(SqlValue::as_text)
    }

    /// Literal integer, when this is a non-null integer literal.
    #[must_use]
    pub fn literal_int(&self) -> Option<i64> {
        self.literal_value().and_then(SqlValue::as_int)
    }

    /// Replace the held value, keeping the type binding.
    #[must_use]
    pub fn with_literal(&self, value: impl Into<SqlValue>) -> Self {
        Self::literal(value, self.mapping.clone())
    }
}

///
/// TESTS
///
