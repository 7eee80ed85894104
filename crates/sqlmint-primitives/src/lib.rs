//! Closed type vocabulary shared by every sqlmint layer.
//!
//! `LogicalType` keys operation dispatch; `JdbcType` carries the storage
//! type codes reported by drivers and dialect type tables.

#[macro_use]
mod macros;

use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// LogicalType
///
/// Abstract value type of a field or computed value, independent of the
/// storage type code that backs it.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
pub enum LogicalType {
    BigDecimal,
    BigInteger,
    Binary,
    Boolean,
    Byte,
    Char,
    Date,
    Double,
    Float,
    Int,
    Long,
    Short,
    String,
    Time,
    Timestamp,
}

impl LogicalType {
    /// Return the full metadata descriptor for one logical type.
    #[must_use]
    pub const fn metadata(self) -> LogicalTypeMetadata {
        logical_type_registry!(metadata_from_registry, self)
    }

    #[must_use]
    pub const fn family(self) -> TypeFamily {
        self.metadata().family
    }

    /// JDBC type a column storing this logical type defaults to.
    #[must_use]
    pub const fn default_jdbc_type(self) -> JdbcType {
        self.metadata().default_jdbc_type
    }

    #[must_use]
    pub const fn is_integral(self) -> bool {
        self.metadata().is_integral
    }

    /// Return whether string operations (case, trim, length...) apply.
    #[must_use]
    pub const fn supports_string_methods(self) -> bool {
        self.metadata().supports_string_methods
    }
}

///
/// LogicalTypeMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LogicalTypeMetadata {
    pub family: TypeFamily,
    pub default_jdbc_type: JdbcType,
    pub is_integral: bool,
    pub supports_string_methods: bool,
}

///
/// TypeFamily
///
/// Coarse grouping used for compatibility checks between declared and
/// introspected types.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum TypeFamily {
    Binary,
    Bool,
    Numeric,
    Temporal,
    Textual,
}

/// Ordered list of all logical types in registry order.
pub const ALL_LOGICAL_TYPES: [LogicalType; 15] = logical_type_registry!(all_types_from_registry);

///
/// JdbcType
///
/// JDBC-equivalent storage type. Codes follow `java.sql.Types`, which is
/// what driver metadata reports.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
pub enum JdbcType {
    Bigint,
    Binary,
    Bit,
    Blob,
    Boolean,
    Char,
    Clob,
    Date,
    Decimal,
    Double,
    Float,
    Integer,
    LongNVarchar,
    LongVarbinary,
    LongVarchar,
    NChar,
    NClob,
    NVarchar,
    Numeric,
    Other,
    Real,
    Smallint,
    Time,
    Timestamp,
    Tinyint,
    Varbinary,
    Varchar,
}

impl JdbcType {
    /// `java.sql.Types` code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Bigint => -5,
            Self::Binary => -2,
            Self::Bit => -7,
            Self::Blob => 2004,
            Self::Boolean => 16,
            Self::Char => 1,
            Self::Clob => 2005,
            Self::Date => 91,
            Self::Decimal => 3,
            Self::Double => 8,
            Self::Float => 6,
            Self::Integer => 4,
            Self::LongNVarchar => -16,
            Self::LongVarbinary => -4,
            Self::LongVarchar => -1,
            Self::NChar => -15,
            Self::NClob => 2011,
            Self::NVarchar => -9,
            Self::Numeric => 2,
            Self::Other => 1111,
            Self::Real => 7,
            Self::Smallint => 5,
            Self::Time => 92,
            Self::Timestamp => 93,
            Self::Tinyint => -6,
            Self::Varbinary => -3,
            Self::Varchar => 12,
        }
    }

    /// Resolve a driver-reported code; unknown vendor codes yield `None`.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        let ty = match code {
            -5 => Self::Bigint,
            -2 => Self::Binary,
            -7 => Self::Bit,
            2004 => Self::Blob,
            16 => Self::Boolean,
            1 => Self::Char,
            2005 => Self::Clob,
            91 => Self::Date,
            3 => Self::Decimal,
            8 => Self::Double,
            6 => Self::Float,
            4 => Self::Integer,
            -16 => Self::LongNVarchar,
            -4 => Self::LongVarbinary,
            -1 => Self::LongVarchar,
            -15 => Self::NChar,
            2011 => Self::NClob,
            -9 => Self::NVarchar,
            2 => Self::Numeric,
            1111 => Self::Other,
            7 => Self::Real,
            5 => Self::Smallint,
            92 => Self::Time,
            93 => Self::Timestamp,
            -6 => Self::Tinyint,
            -3 => Self::Varbinary,
            12 => Self::Varchar,
            _ => return None,
        };

        Some(ty)
    }

    /// Family used when deciding whether two type codes are interchangeable.
    /// `Other` has no family and only matches itself.
    #[must_use]
    pub const fn family(self) -> Option<TypeFamily> {
        match self {
            Self::Bigint
            | Self::Decimal
            | Self::Double
            | Self::Float
            | Self::Integer
            | Self::Numeric
            | Self::Real
            | Self::Smallint
            | Self::Tinyint => Some(TypeFamily::Numeric),
            Self::Char
            | Self::Clob
            | Self::LongNVarchar
            | Self::LongVarchar
            | Self::NChar
            | Self::NClob
            | Self::NVarchar
            | Self::Varchar => Some(TypeFamily::Textual),
            Self::Binary | Self::Blob | Self::LongVarbinary | Self::Varbinary => {
                Some(TypeFamily::Binary)
            }
            Self::Bit | Self::Boolean => Some(TypeFamily::Bool),
            Self::Date | Self::Time | Self::Timestamp => Some(TypeFamily::Temporal),
            Self::Other => None,
        }
    }

    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Bigint | Self::Integer | Self::Smallint | Self::Tinyint
        )
    }

    /// NUMERIC/DECIMAL: precision and scale are both meaningful.
    #[must_use]
    pub const fn is_exact_numeric(self) -> bool {
        matches!(self, Self::Decimal | Self::Numeric)
    }

    #[must_use]
    pub const fn is_character(self) -> bool {
        matches!(self.family(), Some(TypeFamily::Textual))
    }

    /// Large-object and long-variable types with no practical length bound.
    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        matches!(
            self,
            Self::Blob
                | Self::Clob
                | Self::LongNVarchar
                | Self::LongVarbinary
                | Self::LongVarchar
                | Self::NClob
        )
    }

    /// Return whether a declared size (length or precision) is meaningful
    /// for this type when comparing against datastore metadata.
    #[must_use]
    pub const fn has_declared_size(self) -> bool {
        matches!(
            self,
            Self::Binary
                | Self::Char
                | Self::Decimal
                | Self::NChar
                | Self::NVarchar
                | Self::Numeric
                | Self::Varbinary
                | Self::Varchar
        )
    }

    /// Return whether `other` may back a column declared as `self`.
    #[must_use]
    pub fn is_compatible_with(self, other: Self) -> bool {
        if self == other {
            return true;
        }

        match (self.family(), other.family()) {
            (Some(TypeFamily::Numeric), Some(TypeFamily::Numeric)) => {
                // integral columns must stay integral; NUMERIC(p,0) is accepted
                // as integral storage by most datastores
                if self.is_integral() {
                    other.is_integral() || other.is_exact_numeric()
                } else {
                    true
                }
            }
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

///
/// TESTS
///
