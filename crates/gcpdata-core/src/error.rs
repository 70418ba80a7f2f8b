use derive_more::Display;
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// MappingRule
///
/// Stable classification of the declaration rule a `MappingError` reports.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum MappingRule {
    AncestorsNotList,
    AncestorsNotPair,
    DuplicateId,
    EmbeddedReference,
    InvalidName,
    MissingId,
    NameTooLong,
    UntypedIterable,
}

///
/// MappingError
///
/// Mapping configuration error. Always permanent: it points at an invalid
/// entity declaration, never at a transient condition.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("mapping error in '{entity}': {message}")]
pub struct MappingError {
    pub rule: MappingRule,
    pub entity: String,
    pub field: Option<String>,
    pub message: String,
}

impl MappingError {
    /// Construct an entity-level error.
    pub fn new(rule: MappingRule, entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            entity: entity.into(),
            field: None,
            message: message.into(),
        }
    }

    /// Construct an error attributed to one declared field.
    pub fn for_field(
        rule: MappingRule,
        entity: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            entity: entity.into(),
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub(crate) fn embedded_reference(entity: &str, field: &str) -> Self {
        Self::for_field(
            MappingRule::EmbeddedReference,
            entity,
            field,
            format!("field '{field}' cannot be both embedded and a reference"),
        )
    }

    pub(crate) fn ancestors_not_list(entity: &str, field: &str, shape: &str) -> Self {
        Self::for_field(
            MappingRule::AncestorsNotList,
            entity,
            field,
            format!("ancestors field '{field}' must be a list of key/value pairs; got {shape}"),
        )
    }

    pub(crate) fn ancestors_not_pair(entity: &str, field: &str, shape: &str) -> Self {
        Self::for_field(
            MappingRule::AncestorsNotPair,
            entity,
            field,
            format!("ancestors field '{field}' must hold key/value pairs; got {shape}"),
        )
    }

    pub(crate) fn untyped_iterable(entity: &str, field: &str) -> Self {
        Self::for_field(
            MappingRule::UntypedIterable,
            entity,
            field,
            format!("iterable field '{field}' has no declared element type"),
        )
    }

    pub(crate) fn id_count(entity: &str, count: usize) -> Self {
        let rule = if count == 0 {
            MappingRule::MissingId
        } else {
            MappingRule::DuplicateId
        };

        Self::new(
            rule,
            entity,
            format!("entity must declare exactly one id property; found {count}"),
        )
    }

    #[must_use]
    pub const fn is_field_error(&self) -> bool {
        self.field.is_some()
    }
}
