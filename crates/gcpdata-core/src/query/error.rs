use crate::{error::MappingError, query::PartOp};
use thiserror::Error as ThisError;

///
/// QueryError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("query method '{method}' is not a derivable query: {reason}")]
    InvalidMethodName { method: String, reason: String },

    #[error("query method '{method}' references unknown property '{property}' on '{entity}'")]
    UnknownProperty {
        method: String,
        entity: String,
        property: String,
    },

    #[error("operator {op} is not supported on property '{property}' of type {shape}")]
    UnsupportedOperator {
        op: PartOp,
        property: String,
        shape: String,
    },

    #[error("query method '{method}' needs {expected} parameters but declares {actual}")]
    ParameterCount {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("named query '{query}' binds '@{param}' but method '{method}' has no such parameter")]
    UnboundParameter {
        query: String,
        method: String,
        param: String,
    },
}

impl QueryError {
    pub(crate) fn invalid_method(method: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMethodName {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}
