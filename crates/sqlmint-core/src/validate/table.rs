use crate::{
    obs::sink::{self, MetricsEvent},
    schema::Table,
    validate::{IntrospectedColumn, ValidationError, ValidationErrors},
};
use std::collections::BTreeMap;

impl Table {
    /// Validate every column against the datastore's metadata for this
    /// table, keyed by column name.
    ///
    /// Lookup is exact first, then case-insensitive, since datastores fold
    /// unquoted identifiers. A column with no metadata is reported as
    /// missing; the remaining columns are still checked.
    pub fn validate(
        &self,
        metadata: &BTreeMap<String, IntrospectedColumn>,
    ) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();

        for column in self.columns() {
            let name = column.identifier();
            let info = metadata.get(name.as_str()).or_else(|| {
                metadata
                    .iter()
                    .find(|(key, _)| name.matches_folded(key))
                    .map(|(_, info)| info)
            });

            match info {
                Some(info) => {
                    if let Err(column_errs) = column.validate(info) {
                        errs.merge(column_errs);
                    }
                }
                None => {
                    sink::record(MetricsEvent::ColumnMissing);
                    errs.push(ValidationError::MissingColumn {
                        table: self.name().to_string(),
                        column: name.to_string(),
                    });
                }
            }
        }

        errs.result()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::{
        obs::{metrics_report, metrics_reset_all},
        schema::{Column, ColumnMeta, SqlTypeInfo, Table},
        validate::{IntrospectedColumn, ValidationError},
    };
    use sqlmint_primitives::{JdbcType, LogicalType};
    use std::collections::BTreeMap;

    fn orders() -> Table {
        let mut table = Table::new("ORDERS");

        for (name, ty, jdbc) in [
            ("ID", LogicalType::Long, JdbcType::Bigint),
            ("STATUS", LogicalType::String, JdbcType::Varchar),
        ] {
            let column = table.add_column(Column::new(name, ty)).expect("open table");
            column
                .set_type_info(SqlTypeInfo::new(jdbc.to_string(), jdbc))
                .expect("unsealed")
                .set_column_meta(ColumnMeta::default().with_jdbc_type(jdbc))
                .expect("unsealed");
        }
        table.finalize();

        table
    }

    fn metadata(entries: &[(&str, JdbcType)]) -> BTreeMap<String, IntrospectedColumn> {
        entries
            .iter()
            .map(|(name, jdbc)| {
                (
                    (*name).to_string(),
                    IntrospectedColumn::new(*name, jdbc.code()),
                )
            })
            .collect()
    }

    #[test]
    fn matching_table_validates() {
        let table = orders();
        let meta = metadata(&[("ID", JdbcType::Bigint), ("STATUS", JdbcType::Varchar)]);

        assert!(table.validate(&meta).is_ok());
    }

    #[test]
    fn lookup_falls_back_to_case_insensitive() {
        let table = orders();
        let meta = metadata(&[("id", JdbcType::Bigint), ("status", JdbcType::Varchar)]);

        assert!(table.validate(&meta).is_ok());
    }

    #[test]
    fn missing_and_mismatched_columns_are_collected() {
        metrics_reset_all();
        let table = orders();
        let meta = metadata(&[("ID", JdbcType::Varchar)]);

        let errs = table.validate(&meta).expect_err("two failures");

        assert_eq!(errs.len(), 2);
        assert!(matches!(
            errs[0],
            ValidationError::TypeIncompatible { ref column, .. } if column == "ID"
        ));
        assert_eq!(
            errs[1],
            ValidationError::MissingColumn {
                table: "ORDERS".to_string(),
                column: "STATUS".to_string(),
            }
        );

        let counters = metrics_report(None).counters.expect("counters");
        assert_eq!(counters.ops.columns_validated, 1);
        assert_eq!(counters.ops.column_failures, 2);
    }
}
