//! Dialect configuration loaded from TOML.
//!
//! This crate only describes configuration; turning it into a live dialect
//! and method registry happens in `sqlmint-core`.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use thiserror::Error as ThisError;

/// Default VARCHAR length used when a string column declares none.
pub const DEFAULT_STRING_LENGTH: u32 = 255;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("string_default_length must be positive")]
    ZeroStringLength,
}

///
/// DialectName
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectName {
    #[default]
    #[display("ansi")]
    Ansi,
    #[display("mysql")]
    MySql,
    #[display("oracle")]
    Oracle,
    #[display("postgres")]
    Postgres,
    #[display("sqlserver")]
    SqlServer,
}

///
/// SqlmintConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SqlmintConfig {
    #[serde(default)]
    pub dialect: DialectName,

    #[serde(default = "default_string_length")]
    pub string_default_length: u32,

    /// Operation name -> SQL function name overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub functions: BTreeMap<String, String>,

    #[serde(default)]
    pub disabled: DisabledConfig,
}

const fn default_string_length() -> u32 {
    DEFAULT_STRING_LENGTH
}

impl Default for SqlmintConfig {
    fn default() -> Self {
        Self {
            dialect: DialectName::default(),
            string_default_length: DEFAULT_STRING_LENGTH,
            functions: BTreeMap::new(),
            disabled: DisabledConfig::default(),
        }
    }
}

impl SqlmintConfig {
    /// Build a default config for one dialect.
    #[must_use]
    pub fn for_dialect(dialect: DialectName) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.check()?;

        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Return whether an operation has been disabled for this dialect.
    #[must_use]
    pub fn is_disabled(&self, operation: &str) -> bool {
        self.disabled.operations.iter().any(|op| op == operation)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.string_default_length == 0 {
            return Err(ConfigError::ZeroStringLength);
        }

        Ok(())
    }
}

///
/// DisabledConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DisabledConfig {
    #[serde(default)]
    pub operations: Vec<String>,
}

///
/// TESTS
///
