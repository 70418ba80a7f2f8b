use gcpdata_core::{config::ConfigError, error::MappingError, query::QueryError};
use thiserror::Error as ThisError;

///
/// Error
/// Aggregate error for callers that load config, map entities and resolve
/// queries through one path.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl Error {
    /// The mapping error behind this error, if any, including one raised
    /// while resolving a query.
    #[must_use]
    pub const fn mapping(&self) -> Option<&MappingError> {
        match self {
            Self::Mapping(err) | Self::Query(QueryError::Mapping(err)) => Some(err),
            _ => None,
        }
    }
}
