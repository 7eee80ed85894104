use crate::{
    obs::sink::{self, MetricsEvent},
    schema::Column,
    validate::{
        DeclaredShape, DefinitionCategory, IntrospectedColumn, ValidationError, ValidationErrors,
    },
};
use sqlmint_primitives::{JdbcType, TypeFamily};

impl Column {
    /// Compare the configured shape against datastore metadata.
    ///
    /// Reports type incompatibility, precision, scale and nullability
    /// mismatches together. Precision and scale are only compared when
    /// the type codes are compatible.
    pub fn validate(&self, info: &IntrospectedColumn) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        let column = self.identifier().to_string();
        let expected = self.jdbc_type();

        match JdbcType::from_code(info.type_code) {
            Some(actual) if expected.is_compatible_with(actual) => {
                self.compare_size(expected, actual, info, &mut errs);
            }
            _ => errs.push(ValidationError::TypeIncompatible {
                column: column.clone(),
                expected,
                actual: info.type_code,
            }),
        }

        if self.is_nullable() != info.nullable {
            errs.push(ValidationError::NullabilityMismatch {
                column,
                expected: self.is_nullable(),
                actual: info.nullable,
            });
        }

        sink::record(MetricsEvent::ColumnValidated {
            failures: u64::try_from(errs.len()).unwrap_or(u64::MAX),
        });
        if !errs.is_empty() {
            tracing::warn!(
                table = self.table().map_or("", |t| t.as_str()),
                column = %self.identifier(),
                failures = errs.len(),
                "column does not match datastore"
            );
        }

        errs.result()
    }

    fn compare_size(
        &self,
        expected: JdbcType,
        actual: JdbcType,
        info: &IntrospectedColumn,
        errs: &mut ValidationErrors,
    ) {
        let declared = self.declared();

        if expected.has_declared_size()
            && actual.has_declared_size()
            && let Some(precision) = declared.length
            && info.column_size > 0
            && info.column_size != precision
        {
            errs.push(ValidationError::WrongPrecision {
                column: self.identifier().to_string(),
                expected: precision,
                actual: info.column_size,
            });
        }

        if expected.is_exact_numeric()
            && let Some(scale) = declared.scale
            && info.decimal_digits != scale
        {
            errs.push(ValidationError::WrongScale {
                column: self.identifier().to_string(),
                expected: scale,
                actual: info.decimal_digits,
            });
        }
    }

    /// The column must hold a single scalar: no LOB, binary, or opaque type.
    pub fn check_primitive(&self) -> Result<(), ValidationError> {
        let jdbc = self.jdbc_type();
        let ok = !jdbc.is_unlimited()
            && !matches!(jdbc.family(), None | Some(TypeFamily::Binary));

        self.definition_result(ok, DefinitionCategory::Primitive)
    }

    /// The column must be numeric with no fractional digits.
    pub fn check_integer(&self) -> Result<(), ValidationError> {
        let jdbc = self.jdbc_type();
        let scale = self.declared().scale.unwrap_or(0);
        let ok = jdbc.is_integral() || (jdbc.is_exact_numeric() && scale == 0);

        self.definition_result(ok, DefinitionCategory::Integer)
    }

    /// The column must be numeric; a declared scale may not exceed the
    /// declared precision, and precision must fit the type info.
    pub fn check_decimal(&self) -> Result<(), ValidationError> {
        let jdbc = self.jdbc_type();
        let declared = self.declared();
        let max = self.type_info().map_or(0, |info| info.max_precision);

        let ok = jdbc.family() == Some(TypeFamily::Numeric)
            && match (declared.length, declared.scale) {
                (Some(precision), Some(scale)) => scale <= precision,
                (None, Some(scale)) => max == 0 || scale <= max,
                _ => true,
            }
            && declared
                .length
                .is_none_or(|precision| precision > 0 && (max == 0 || precision <= max));

        self.definition_result(ok, DefinitionCategory::Decimal)
    }

    /// The column must be character-typed with a positive length that fits
    /// the type info.
    pub fn check_string(&self) -> Result<(), ValidationError> {
        let jdbc = self.jdbc_type();
        let max = self.type_info().map_or(0, |info| info.max_precision);

        let ok = jdbc.is_character()
            && self.declared().length.is_none_or(|length| {
                length > 0 && (jdbc.is_unlimited() || max == 0 || length <= max)
            });

        self.definition_result(ok, DefinitionCategory::String)
    }

    /// The column's declared shape as reported in definition failures.
    #[must_use]
    pub fn declared_shape(&self) -> DeclaredShape {
        DeclaredShape {
            jdbc_type: self.jdbc_type(),
            length: self.declared().length,
            scale: self.declared().scale,
        }
    }

    fn definition_result(
        &self,
        ok: bool,
        category: DefinitionCategory,
    ) -> Result<(), ValidationError> {
        if ok {
            return Ok(());
        }

        sink::record(MetricsEvent::ColumnDefinitionRejected);

        Err(ValidationError::Definition {
            column: self.identifier().to_string(),
            category,
            declared: self.declared_shape(),
        })
    }
}

///
/// TESTS
///
