use serde::{Deserialize, Serialize};

///
/// SqlValue
///
/// Value held by a literal, a bound parameter, or a column default.
/// `Null` is the absence-of-value sentinel.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl SqlValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Parse a datastore-reported column default (`COLUMN_DEF`).
    ///
    /// Returns `None` for expressions (sequence calls, functions) that are
    /// not plain literals.
    #[must_use]
    pub fn parse_column_default(raw: &str) -> Option<Self> {
        let mut s = raw.trim();
        while s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
            s = s[1..s.len() - 1].trim();
        }

        if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
            return Some(Self::Text(s[1..s.len() - 1].replace("''", "'")));
        }
        if s.eq_ignore_ascii_case("null") {
            return Some(Self::Null);
        }
        if s.eq_ignore_ascii_case("true") {
            return Some(Self::Bool(true));
        }
        if s.eq_ignore_ascii_case("false") {
            return Some(Self::Bool(false));
        }
        if let Ok(n) = s.parse::<i64>() {
            return Some(Self::Int(n));
        }
        if let Ok(f) = s.parse::<f64>() {
            return f.is_finite().then_some(Self::Float(f));
        }

        None
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_defaults_parse_as_literals() {
        assert_eq!(
            SqlValue::parse_column_default("'it''s'"),
            Some(SqlValue::Text("it's".to_string()))
        );
        assert_eq!(SqlValue::parse_column_default("((42))"), Some(SqlValue::Int(42)));
        assert_eq!(SqlValue::parse_column_default("1.5"), Some(SqlValue::Float(1.5)));
        assert_eq!(SqlValue::parse_column_default("NULL"), Some(SqlValue::Null));
        assert_eq!(SqlValue::parse_column_default("TRUE"), Some(SqlValue::Bool(true)));
    }

    #[test]
    fn column_default_expressions_are_ignored() {
        assert_eq!(
            SqlValue::parse_column_default("nextval('seq_id'::regclass)"),
            None
        );
        assert_eq!(SqlValue::parse_column_default("CURRENT_TIMESTAMP"), None);
        assert_eq!(SqlValue::parse_column_default("NaN"), None);
    }
}
