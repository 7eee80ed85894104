#[macro_export]
macro_rules! logical_type_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                BigDecimal,
                Numeric,
                Numeric,
                is_integral = false,
                supports_string_methods = false
            ),
            (
                BigInteger,
                Numeric,
                Numeric,
                is_integral = true,
                supports_string_methods = false
            ),
            (
                Binary,
                Binary,
                Varbinary,
                is_integral = false,
                supports_string_methods = false
            ),
            (
                Boolean,
                Bool,
                Boolean,
                is_integral = false,
                supports_string_methods = false
            ),
            (
                Byte,
                Numeric,
                Tinyint,
                is_integral = true,
                supports_string_methods = false
            ),
            (
                Char,
                Textual,
                Char,
                is_integral = false,
                supports_string_methods = true
            ),
            (
                Date,
                Temporal,
                Date,
                is_integral = false,
                supports_string_methods = false
            ),
            (
                Double,
                Numeric,
                Double,
                is_integral = false,
                supports_string_methods = false
            ),
            (
                Float,
                Numeric,
                Real,
                is_integral = false,
                supports_string_methods = false
            ),
            (
                Int,
                Numeric,
                Integer,
                is_integral = true,
                supports_string_methods = false
            ),
            (
                Long,
                Numeric,
                Bigint,
                is_integral = true,
                supports_string_methods = false
            ),
            (
                Short,
                Numeric,
                Smallint,
                is_integral = true,
                supports_string_methods = false
            ),
            (
                String,
                Textual,
                Varchar,
                is_integral = false,
                supports_string_methods = true
            ),
            (
                Time,
                Temporal,
                Time,
                is_integral = false,
                supports_string_methods = false
            ),
            (
                Timestamp,
                Temporal,
                Timestamp,
                is_integral = false,
                supports_string_methods = false
            ),
        }
    };
}

#[macro_export]
macro_rules! logical_type_registry {
    ($macro:ident) => {
        $crate::logical_type_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::logical_type_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $ty:expr; @entries $( ($logical:ident, $family:ident, $jdbc:ident, is_integral = $is_integral:expr, supports_string_methods = $supports_string_methods:expr) ),* $(,)? ) => {
        match $ty {
            $(
                $crate::LogicalType::$logical => $crate::LogicalTypeMetadata {
                    family: $crate::TypeFamily::$family,
                    default_jdbc_type: $crate::JdbcType::$jdbc,
                    is_integral: $is_integral,
                    supports_string_methods: $supports_string_methods,
                },
            )*
        }
    };
}

macro_rules! all_types_from_registry {
    ( @entries $( ($logical:ident, $family:ident, $jdbc:ident, is_integral = $is_integral:expr, supports_string_methods = $supports_string_methods:expr) ),* $(,)? ) => {
        [ $( $crate::LogicalType::$logical ),* ]
    };
}
