use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// NamedQueries
///
/// Source of named SQL queries, keyed by query name.
///

pub trait NamedQueries {
    fn query(&self, name: &str) -> Option<&str>;

    fn has_query(&self, name: &str) -> bool {
        self.query(name).is_some()
    }
}

///
/// NamedQueryMap
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NamedQueryMap {
    queries: BTreeMap<String, String>,
}

impl NamedQueryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat TOML table of `"Entity.method" = "SQL"` entries.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, sql: impl Into<String>) -> Self {
        self.insert(name, sql);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, sql: impl Into<String>) {
        self.queries.insert(name.into(), sql.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl NamedQueries for NamedQueryMap {
    fn query(&self, name: &str) -> Option<&str> {
        self.queries.get(name).map(String::as_str)
    }
}
