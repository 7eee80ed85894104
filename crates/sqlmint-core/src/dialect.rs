//! Target-datastore SQL conventions: identifier quoting, literal rendering,
//! DDL type names, and the function names the operation compilers emit.

use crate::{
    error::RegistryError,
    method::{
        self, MethodRegistry, SqlMethod, StringLengthMethod, StringTransform,
        StringTransformMethod, SubstringMethod,
    },
    schema::{PrecisionSpec, SqlTypeInfo},
    value::SqlValue,
};
use sqlmint_config::{DEFAULT_STRING_LENGTH, DialectName, SqlmintConfig};
use sqlmint_primitives::{JdbcType, LogicalType};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Write as _,
    sync::Arc,
};

/// Receiver types every string compiler is registered for.
const STRING_RECEIVERS: [LogicalType; 2] = [LogicalType::Char, LogicalType::String];

///
/// Dialect
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dialect {
    name: DialectName,
    string_default_length: u32,
    functions: BTreeMap<String, String>,
    disabled: BTreeSet<String>,
}

impl Dialect {
    #[must_use]
    pub const fn new(name: DialectName) -> Self {
        Self {
            name,
            string_default_length: DEFAULT_STRING_LENGTH,
            functions: BTreeMap::new(),
            disabled: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &SqlmintConfig) -> Self {
        Self {
            name: config.dialect,
            string_default_length: config.string_default_length,
            functions: config.functions.clone(),
            disabled: config.disabled.operations.iter().cloned().collect(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> DialectName {
        self.name
    }

    /// Length used in DDL for a string column that declares none.
    #[must_use]
    pub const fn string_default_length(&self) -> u32 {
        self.string_default_length
    }

    /// Quote one identifier; embedded closing quotes are doubled.
    #[must_use]
    pub fn quote_identifier(&self, ident: &str) -> String {
        match self.name {
            DialectName::MySql => format!("`{}`", ident.replace('`', "``")),
            DialectName::SqlServer => format!("[{}]", ident.replace(']', "]]")),
            DialectName::Ansi | DialectName::Oracle | DialectName::Postgres => {
                format!("\"{}\"", ident.replace('"', "\"\""))
            }
        }
    }

    /// Inline SQL literal for `value`, or `None` when it has no literal
    /// form (non-finite floats) and must be bound instead.
    #[must_use]
    pub fn literal_sql(&self, value: &SqlValue) -> Option<String> {
        let sql = match value {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(b) => match (self.has_boolean_literals(), b) {
                (true, true) => "TRUE".to_string(),
                (true, false) => "FALSE".to_string(),
                (false, true) => "1".to_string(),
                (false, false) => "0".to_string(),
            },
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Float(f) if f.is_finite() => format!("{f:?}"),
            SqlValue::Float(_) => return None,
            SqlValue::Text(s) => self.string_literal(s),
            SqlValue::Bytes(bytes) => self.bytes_literal(bytes),
        };

        Some(sql)
    }

    /// DDL clause marking a column as datastore-generated.
    #[must_use]
    pub const fn identity_clause(&self) -> &'static str {
        match self.name {
            DialectName::MySql => "AUTO_INCREMENT",
            DialectName::SqlServer => "IDENTITY(1,1)",
            DialectName::Ansi | DialectName::Oracle | DialectName::Postgres => {
                "GENERATED BY DEFAULT AS IDENTITY"
            }
        }
    }

    /// DDL type information for a JDBC type.
    #[must_use]
    pub fn type_info(&self, jdbc_type: JdbcType) -> SqlTypeInfo {
        let (name, spec, max) = match self.name {
            DialectName::Ansi => ansi_type(jdbc_type),
            DialectName::MySql => mysql_type(jdbc_type),
            DialectName::Oracle => oracle_type(jdbc_type),
            DialectName::Postgres => postgres_type(jdbc_type),
            DialectName::SqlServer => sqlserver_type(jdbc_type),
        };

        SqlTypeInfo::new(name, jdbc_type)
            .with_precision_spec(spec)
            .with_max_precision(max)
    }

    /// SQL function emitted for a builtin operation, honouring configured
    /// overrides. `None` for operations no builtin compiler implements.
    #[must_use]
    pub fn function_name(&self, operation: &str) -> Option<&str> {
        if let Some(name) = self.functions.get(operation) {
            return Some(name.as_str());
        }

        let name = match operation {
            method::TO_UPPER_CASE => "UPPER",
            method::TO_LOWER_CASE => "LOWER",
            method::TRIM => "TRIM",
            method::TRIM_LEFT => "LTRIM",
            method::TRIM_RIGHT => "RTRIM",
            method::LENGTH => match self.name {
                DialectName::Oracle => "LENGTH",
                DialectName::SqlServer => "LEN",
                DialectName::Ansi | DialectName::MySql | DialectName::Postgres => "CHAR_LENGTH",
            },
            method::SUBSTRING => match self.name {
                DialectName::Oracle => "SUBSTR",
                _ => "SUBSTRING",
            },
            _ => return None,
        };

        Some(name)
    }

    #[must_use]
    pub fn is_disabled(&self, operation: &str) -> bool {
        self.disabled.contains(operation)
    }

    /// Build the immutable method registry for this dialect.
    ///
    /// Every builtin operation that is not disabled is registered for each
    /// string receiver type. Overrides or disables naming an unknown
    /// operation fail the build.
    pub fn method_registry(&self) -> Result<MethodRegistry, RegistryError> {
        for operation in self.functions.keys().chain(&self.disabled) {
            if !method::is_builtin_operation(operation) {
                return Err(RegistryError::UnknownOperation {
                    operation: operation.clone(),
                });
            }
        }

        let mut builder = MethodRegistry::builder(self.name);
        for method in self.builtin_methods() {
            for receiver in STRING_RECEIVERS {
                builder.register(receiver, Arc::clone(&method))?;
            }
        }
        let registry = builder.build();

        tracing::info!(
            dialect = %self.name,
            methods = registry.len(),
            disabled = self.disabled.len(),
            "method registry built"
        );

        Ok(registry)
    }

    fn builtin_methods(&self) -> Vec<Arc<dyn SqlMethod>> {
        let mut methods: Vec<Arc<dyn SqlMethod>> = Vec::new();

        for transform in StringTransform::ALL {
            if let Some(function) = self.enabled_function(transform.operation()) {
                methods.push(Arc::new(StringTransformMethod::new(transform, function)));
            }
        }
        if let Some(function) = self.enabled_function(method::LENGTH) {
            methods.push(Arc::new(StringLengthMethod::new(function)));
        }
        if let Some(function) = self.enabled_function(method::SUBSTRING) {
            methods.push(Arc::new(SubstringMethod::new(function)));
        }

        methods
    }

    fn enabled_function(&self, operation: &str) -> Option<&str> {
        if self.is_disabled(operation) {
            return None;
        }

        self.function_name(operation)
    }

    const fn has_boolean_literals(&self) -> bool {
        matches!(
            self.name,
            DialectName::Ansi | DialectName::MySql | DialectName::Postgres
        )
    }

    fn string_literal(&self, s: &str) -> String {
        let mut escaped = s.replace('\'', "''");
        if self.name == DialectName::MySql {
            escaped = escaped.replace('\\', "\\\\");
        }

        format!("'{escaped}'")
    }

    fn bytes_literal(&self, bytes: &[u8]) -> String {
        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            let _ = write!(hex, "{byte:02X}");
        }

        match self.name {
            DialectName::Postgres => format!("'\\x{hex}'"),
            DialectName::SqlServer => format!("0x{hex}"),
            DialectName::Oracle => format!("HEXTORAW('{hex}')"),
            DialectName::Ansi | DialectName::MySql => format!("X'{hex}'"),
        }
    }
}

type TypeEntry = (&'static str, PrecisionSpec, u32);

const fn plain(name: &'static str) -> TypeEntry {
    (name, PrecisionSpec::None, 0)
}

const fn sized(name: &'static str, max: u32) -> TypeEntry {
    (name, PrecisionSpec::Length, max)
}

const fn decimal(name: &'static str, max: u32) -> TypeEntry {
    (name, PrecisionSpec::PrecisionScale, max)
}

const fn ansi_type(jdbc: JdbcType) -> TypeEntry {
    match jdbc {
        JdbcType::Bigint => plain("BIGINT"),
        JdbcType::Binary => sized("BINARY", 8000),
        JdbcType::Bit | JdbcType::Boolean => plain("BOOLEAN"),
        JdbcType::Blob | JdbcType::LongVarbinary => plain("BLOB"),
        JdbcType::Char => sized("CHAR", 254),
        JdbcType::Clob | JdbcType::LongVarchar => plain("CLOB"),
        JdbcType::Date => plain("DATE"),
        JdbcType::Decimal => decimal("DECIMAL", 38),
        JdbcType::Double => plain("DOUBLE PRECISION"),
        JdbcType::Float => plain("FLOAT"),
        JdbcType::Integer => plain("INTEGER"),
        JdbcType::LongNVarchar | JdbcType::NClob => plain("NCLOB"),
        JdbcType::NChar => sized("NCHAR", 254),
        JdbcType::NVarchar => sized("NVARCHAR", 4000),
        JdbcType::Numeric => decimal("NUMERIC", 38),
        JdbcType::Other => plain("OTHER"),
        JdbcType::Real => plain("REAL"),
        JdbcType::Smallint | JdbcType::Tinyint => plain("SMALLINT"),
        JdbcType::Time => plain("TIME"),
        JdbcType::Timestamp => plain("TIMESTAMP"),
        JdbcType::Varbinary => sized("VARBINARY", 8000),
        JdbcType::Varchar => sized("VARCHAR", 4000),
    }
}

const fn postgres_type(jdbc: JdbcType) -> TypeEntry {
    match jdbc {
        JdbcType::Binary
        | JdbcType::Blob
        | JdbcType::LongVarbinary
        | JdbcType::Varbinary => plain("BYTEA"),
        JdbcType::Clob | JdbcType::LongNVarchar | JdbcType::LongVarchar | JdbcType::NClob => {
            plain("TEXT")
        }
        JdbcType::Decimal | JdbcType::Numeric => decimal("NUMERIC", 1000),
        JdbcType::NChar => sized("CHAR", 10_485_760),
        JdbcType::NVarchar | JdbcType::Varchar => sized("VARCHAR", 10_485_760),
        JdbcType::Other => plain("JSONB"),
        _ => ansi_type(jdbc),
    }
}

const fn mysql_type(jdbc: JdbcType) -> TypeEntry {
    match jdbc {
        JdbcType::Bit | JdbcType::Boolean => plain("BOOLEAN"),
        JdbcType::Blob | JdbcType::LongVarbinary => plain("LONGBLOB"),
        JdbcType::Char | JdbcType::NChar => sized("CHAR", 255),
        JdbcType::Clob | JdbcType::LongNVarchar | JdbcType::LongVarchar | JdbcType::NClob => {
            plain("LONGTEXT")
        }
        JdbcType::Decimal | JdbcType::Numeric => decimal("DECIMAL", 65),
        JdbcType::Double => plain("DOUBLE"),
        JdbcType::Other => plain("JSON"),
        JdbcType::Timestamp => plain("DATETIME"),
        JdbcType::Tinyint => plain("TINYINT"),
        JdbcType::NVarchar | JdbcType::Varchar => sized("VARCHAR", 65_535),
        _ => ansi_type(jdbc),
    }
}

const fn sqlserver_type(jdbc: JdbcType) -> TypeEntry {
    match jdbc {
        JdbcType::Bit | JdbcType::Boolean => plain("BIT"),
        JdbcType::Blob | JdbcType::LongVarbinary => plain("VARBINARY(MAX)"),
        JdbcType::Clob | JdbcType::LongVarchar => plain("VARCHAR(MAX)"),
        JdbcType::Double => plain("FLOAT"),
        JdbcType::LongNVarchar | JdbcType::NClob => plain("NVARCHAR(MAX)"),
        JdbcType::NChar => sized("NCHAR", 4000),
        JdbcType::NVarchar => sized("NVARCHAR", 4000),
        JdbcType::Other => plain("SQL_VARIANT"),
        JdbcType::Timestamp => plain("DATETIME2"),
        JdbcType::Tinyint => plain("TINYINT"),
        JdbcType::Varchar => sized("VARCHAR", 8000),
        _ => ansi_type(jdbc),
    }
}

const fn oracle_type(jdbc: JdbcType) -> TypeEntry {
    match jdbc {
        JdbcType::Bigint => plain("NUMBER(19)"),
        JdbcType::Binary | JdbcType::Varbinary => sized("RAW", 2000),
        JdbcType::Bit | JdbcType::Boolean => plain("NUMBER(1)"),
        JdbcType::Decimal | JdbcType::Numeric => decimal("NUMBER", 38),
        JdbcType::Double => plain("BINARY_DOUBLE"),
        JdbcType::Float | JdbcType::Real => plain("BINARY_FLOAT"),
        JdbcType::Integer => plain("NUMBER(10)"),
        JdbcType::LongNVarchar | JdbcType::NClob => plain("NCLOB"),
        JdbcType::NVarchar => sized("NVARCHAR2", 2000),
        JdbcType::Smallint => plain("NUMBER(5)"),
        JdbcType::Time | JdbcType::Timestamp => plain("TIMESTAMP"),
        JdbcType::Tinyint => plain("NUMBER(3)"),
        JdbcType::Varchar => sized("VARCHAR2", 4000),
        _ => ansi_type(jdbc),
    }
}

///
/// TESTS
///
