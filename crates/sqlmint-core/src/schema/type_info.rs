use serde::{Deserialize, Serialize};
use sqlmint_primitives::JdbcType;

///
/// PrecisionSpec
///
/// Which size arguments a SQL type accepts in DDL.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum PrecisionSpec {
    #[default]
    None,
    Length,
    PrecisionScale,
}

///
/// SqlTypeInfo
///
/// One row of a dialect's type table.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SqlTypeInfo {
    pub type_name: String,
    pub jdbc_type: JdbcType,

    /// Maximum length (character/binary) or precision (numeric); 0 if unbounded.
    pub max_precision: u32,
    pub precision_spec: PrecisionSpec,
}

impl SqlTypeInfo {
    #[must_use]
    pub fn new(type_name: impl Into<String>, jdbc_type: JdbcType) -> Self {
        Self {
            type_name: type_name.into(),
            jdbc_type,
            max_precision: 0,
            precision_spec: PrecisionSpec::None,
        }
    }

    #[must_use]
    pub fn with_max_precision(mut self, max_precision: u32) -> Self {
        self.max_precision = max_precision;
        self
    }

    #[must_use]
    pub fn with_precision_spec(mut self, spec: PrecisionSpec) -> Self {
        self.precision_spec = spec;
        self
    }
}

///
/// ColumnMeta
///
/// Shape declared by the persisted field's metadata. Every part is
/// optional; unset parts fall back to the dialect type info.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ColumnMeta {
    pub jdbc_type: Option<JdbcType>,
    pub sql_type: Option<String>,

    /// Length for character/binary types, precision for numeric types.
    pub length: Option<u32>,
    pub scale: Option<u32>,
}

impl ColumnMeta {
    #[must_use]
    pub fn with_jdbc_type(mut self, jdbc_type: JdbcType) -> Self {
        self.jdbc_type = Some(jdbc_type);
        self
    }

    #[must_use]
    pub fn with_sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    #[must_use]
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }
}
