use crate::{
    error::SchemaError,
    schema::{identifier::Identifier, table::Table},
};
use serde::{Deserialize, Serialize};
use sqlmint_primitives::LogicalType;

///
/// ColumnRef
///
/// Table-qualified pointer to a column.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ColumnRef {
    table: Identifier,
    column: Identifier,
}

impl ColumnRef {
    #[must_use]
    pub const fn new(table: Identifier, column: Identifier) -> Self {
        Self { table, column }
    }

    #[must_use]
    pub const fn table(&self) -> &Identifier {
        &self.table
    }

    #[must_use]
    pub const fn column(&self) -> &Identifier {
        &self.column
    }
}

///
/// TypeMapping
///
/// Binds one logical value (a field, or a value computed in a query) to
/// the columns that store it, and records its logical type. Computed
/// values have no columns.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TypeMapping {
    logical_type: LogicalType,
    member: Option<String>,
    columns: Vec<ColumnRef>,
}

impl TypeMapping {
    /// Mapping for a computed value with no backing column.
    #[must_use]
    pub const fn new(logical_type: LogicalType) -> Self {
        Self {
            logical_type,
            member: None,
            columns: Vec::new(),
        }
    }

    /// Bind a persisted member to columns of `table`; every column must
    /// exist and at least one is required.
    pub fn bind(
        table: &Table,
        member: impl Into<String>,
        logical_type: LogicalType,
        columns: &[&str],
    ) -> Result<Self, SchemaError> {
        let member = member.into();
        if columns.is_empty() {
            return Err(SchemaError::EmptyMapping { member });
        }

        let columns = columns
            .iter()
            .map(|name| table.column_ref(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            logical_type,
            member: Some(member),
            columns,
        })
    }

    #[must_use]
    pub fn with_column(mut self, column: ColumnRef) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub const fn logical_type(&self) -> LogicalType {
        self.logical_type
    }

    #[must_use]
    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    #[must_use]
    pub const fn is_multi_column(&self) -> bool {
        self.columns.len() > 1
    }
}

///
/// TESTS
///
