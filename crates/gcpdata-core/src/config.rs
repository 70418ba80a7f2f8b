//! Mapping configuration, loadable from TOML.

use crate::MAX_NAME_LEN;
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, path::PathBuf};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// NamingPolicy
///
/// How a default mapped name is derived from the declared field ident when
/// no explicit name override is present.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    #[default]
    AsDeclared,
    CamelCase,
    SnakeCase,
}

impl NamingPolicy {
    #[must_use]
    pub fn apply(self, ident: &str) -> String {
        match self {
            Self::AsDeclared => ident.to_string(),
            Self::CamelCase => ident.to_case(Case::Camel),
            Self::SnakeCase => ident.to_case(Case::Snake),
        }
    }
}

///
/// MappingConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingConfig {
    pub naming: NamingPolicy,
    pub max_name_len: usize,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            naming: NamingPolicy::default(),
            max_name_len: MAX_NAME_LEN,
        }
    }
}

impl MappingConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_name_len == 0 {
            return Err(ConfigError::Invalid(
                "max_name_len must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
