use crate::{
    error::SchemaError,
    schema::{column::Column, identifier::Identifier, mapping::ColumnRef},
};

///
/// Table
///
/// Ordered, identifier-unique collection of columns owned by one logical
/// entity. Once finalized, every column is sealed and the table is
/// read-only.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    name: Identifier,
    columns: Vec<Column>,
    finalized: bool,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            finalized: false,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &Identifier {
        &self.name
    }

    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn column(&self, identifier: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.identifier() == identifier)
    }

    /// Mutable access for schema build; fails once the table is finalized.
    pub fn column_mut(&mut self, identifier: &str) -> Result<&mut Column, SchemaError> {
        self.ensure_open()?;

        let table = self.name.to_string();
        self.columns
            .iter_mut()
            .find(|c| c.identifier() == identifier)
            .ok_or_else(|| SchemaError::UnknownColumn {
                table,
                column: identifier.to_string(),
            })
    }

    /// Add a column; identifier collisions are rejected.
    pub fn add_column(&mut self, mut column: Column) -> Result<&mut Column, SchemaError> {
        self.ensure_open()?;

        if self.column(column.identifier()).is_some() {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.to_string(),
                column: column.identifier().to_string(),
            });
        }

        column.attach_to(&self.name);
        let index = self.columns.len();
        self.columns.push(column);

        Ok(&mut self.columns[index])
    }

    /// Build a reference to one of this table's columns.
    pub fn column_ref(&self, identifier: &str) -> Result<ColumnRef, SchemaError> {
        self.column(identifier)
            .map(|column| ColumnRef::new(self.name.clone(), column.identifier().clone()))
            .ok_or_else(|| SchemaError::UnknownColumn {
                table: self.name.to_string(),
                column: identifier.to_string(),
            })
    }

    /// Seal every column. Idempotent.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }

        for column in &mut self.columns {
            column.seal();
        }
        self.finalized = true;

        tracing::debug!(table = %self.name, columns = self.columns.len(), "table finalized");
    }

    fn ensure_open(&self) -> Result<(), SchemaError> {
        if self.finalized {
            return Err(SchemaError::TableFinalized {
                table: self.name.to_string(),
            });
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnState;
    use sqlmint_primitives::LogicalType;

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut table = Table::new("PEOPLE");
        table
            .add_column(Column::new("ID", LogicalType::Long))
            .expect("first column");

        let err = table
            .add_column(Column::new("ID", LogicalType::String))
            .expect_err("duplicate");

        assert_eq!(
            err,
            SchemaError::DuplicateColumn {
                table: "PEOPLE".to_string(),
                column: "ID".to_string(),
            }
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn columns_keep_declaration_order() {
        let mut table = Table::new("PEOPLE");
        for name in ["ID", "NAME", "EMAIL"] {
            table
                .add_column(Column::new(name, LogicalType::String))
                .expect("unique column");
        }

        let names: Vec<_> = table.columns().iter().map(|c| c.identifier().as_str()).collect();
        assert_eq!(names, ["ID", "NAME", "EMAIL"]);
        assert!(
            table
                .columns()
                .iter()
                .all(|c| c.table() == Some(table.name()))
        );
    }

    #[test]
    fn finalized_table_rejects_changes() {
        let mut table = Table::new("PEOPLE");
        table
            .add_column(Column::new("ID", LogicalType::Long))
            .expect("first column");
        table.finalize();

        assert!(matches!(
            table.add_column(Column::new("NAME", LogicalType::String)),
            Err(SchemaError::TableFinalized { .. })
        ));
        assert!(matches!(
            table.column_mut("ID"),
            Err(SchemaError::TableFinalized { .. })
        ));
        assert_eq!(
            table.column("ID").map(Column::state),
            Some(ColumnState::Sealed)
        );
    }

    #[test]
    fn sealed_column_setters_fail() {
        let mut table = Table::new("PEOPLE");
        table
            .add_column(Column::new("ID", LogicalType::Long))
            .expect("first column");
        table.finalize();

        // a clone escapes the table but keeps its sealed state
        let mut escaped = table.column("ID").cloned().expect("present");
        assert!(matches!(
            escaped.set_nullable(true),
            Err(SchemaError::ColumnSealed { .. })
        ));
    }

    #[test]
    fn column_ref_requires_known_column() {
        let mut table = Table::new("PEOPLE");
        table
            .add_column(Column::new("ID", LogicalType::Long))
            .expect("first column");

        let column_ref = table.column_ref("ID").expect("known column");
        assert_eq!(column_ref.table(), "PEOPLE");
        assert!(table.column_ref("MISSING").is_err());
    }
}
