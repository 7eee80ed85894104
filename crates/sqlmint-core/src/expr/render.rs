use crate::{
    dialect::Dialect,
    expr::{ColumnReference, Composition, ExprKind, ParamSlot, SqlExpression},
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// SqlFragment
///
/// Rendered SQL text plus its parameter slots, in the order their `?`
/// placeholders appear.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<ParamSlot>,
}

impl fmt::Display for SqlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl SqlExpression {
    /// Render this tree for `dialect`.
    #[must_use]
    pub fn to_sql(&self, dialect: &Dialect) -> SqlFragment {
        let mut out = SqlFragment::default();
        self.render_into(dialect, &mut out);

        out
    }

    fn render_into(&self, dialect: &Dialect, out: &mut SqlFragment) {
        match &self.kind {
            ExprKind::Literal(value) => match dialect.literal_sql(value) {
                Some(sql) => out.sql.push_str(&sql),
                None => {
                    out.sql.push('?');
                    out.params.push(ParamSlot {
                        name: None,
                        value: Some(value.clone()),
                    });
                }
            },

            ExprKind::Parameter(slot) => {
                out.sql.push('?');
                out.params.push(slot.clone());
            }

            ExprKind::Column(reference) => out.sql.push_str(&render_column(reference, dialect)),

            ExprKind::Composed {
                op: Composition::Function(name),
                args,
            } => {
                out.sql.push_str(name);
                out.sql.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.sql.push_str(", ");
                    }
                    arg.render_into(dialect, out);
                }
                out.sql.push(')');
            }

            ExprKind::Composed {
                op: Composition::Binary(op),
                args,
            } => {
                out.sql.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.sql.push(' ');
                        out.sql.push_str(&op.to_string());
                        out.sql.push(' ');
                    }
                    arg.render_into(dialect, out);
                }
                out.sql.push(')');
            }
        }
    }
}

fn render_column(reference: &ColumnReference, dialect: &Dialect) -> String {
    let column = dialect.quote_identifier(&reference.column);
    let qualified = match &reference.qualifier {
        Some(table) => format!("{}.{column}", dialect.quote_identifier(table)),
        None => column,
    };

    match &reference.select_wrapper {
        Some(template) => template.apply(&qualified),
        None => qualified,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::{
        dialect::Dialect,
        expr::{BinaryOp, ParamSlot, SqlExpression},
        schema::{Column, Table, TypeMapping, WrapperMode},
        value::SqlValue,
    };
    use sqlmint_config::DialectName;
    use sqlmint_primitives::LogicalType;

    fn text() -> TypeMapping {
        TypeMapping::new(LogicalType::String)
    }

    #[test]
    fn literal_renders_inline_with_escaping() {
        let dialect = Dialect::new(DialectName::Ansi);
        let frag = SqlExpression::literal("o'neil", text()).to_sql(&dialect);

        assert_eq!(frag.sql, "'o''neil'");
        assert!(frag.params.is_empty());
    }

    #[test]
    fn non_finite_float_renders_as_parameter() {
        let dialect = Dialect::new(DialectName::Postgres);
        let frag = SqlExpression::typed_literal(SqlValue::Float(f64::INFINITY), LogicalType::Double)
            .to_sql(&dialect);

        assert_eq!(frag.sql, "?");
        assert_eq!(
            frag.params,
            vec![ParamSlot {
                name: None,
                value: Some(SqlValue::Float(f64::INFINITY)),
            }]
        );
    }

    #[test]
    fn column_renders_qualified_through_select_wrapper() {
        let mut table = Table::new("USERS");
        table
            .add_column(Column::new("SECRET", LogicalType::String))
            .expect("open table")
            .set_wrapper_function("DECRYPT(?)", WrapperMode::Select)
            .expect("valid template");
        let column = table.column("SECRET").expect("added");

        let frag = SqlExpression::column(column).to_sql(&Dialect::new(DialectName::MySql));

        assert_eq!(frag.sql, "DECRYPT(`USERS`.`SECRET`)");
    }

    #[test]
    fn nested_composition_keeps_parameter_order() {
        let dialect = Dialect::new(DialectName::Ansi);
        let expr = SqlExpression::function(
            "SUBSTRING",
            vec![
                SqlExpression::parameter("s", text()),
                SqlExpression::binary(
                    BinaryOp::Add,
                    SqlExpression::parameter("begin", TypeMapping::new(LogicalType::Int)),
                    SqlExpression::typed_literal(1_i64, LogicalType::Int),
                    TypeMapping::new(LogicalType::Int),
                ),
            ],
            text(),
        );

        let frag = expr.to_sql(&dialect);

        assert_eq!(frag.sql, "SUBSTRING(?, (? + 1))");
        let names: Vec<_> = frag
            .params
            .iter()
            .map(|p| p.name.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(names, ["s", "begin"]);
    }
}
