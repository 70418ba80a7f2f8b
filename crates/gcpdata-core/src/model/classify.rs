//! Module: model::classify
//! Responsibility: turn declared fields into property descriptors and check
//! entity-level mapping invariants.
//! Does not own: caching or concurrency (see `context`).
//!
//! Validation is fail-fast: the first violated rule is returned.

use crate::{
    config::MappingConfig,
    error::{MappingError, MappingRule},
    model::{entity::PersistentEntity, property::PropertyDescriptor},
    node::{EntityDecl, FieldDecl},
};
use tracing::trace;

/// Classify one declared field.
///
/// Returns `Ok(None)` for fields excluded from persistence, whatever other
/// markers they carry.
pub fn classify(
    owner: &'static str,
    field: &FieldDecl,
    config: &MappingConfig,
) -> Result<Option<PropertyDescriptor>, MappingError> {
    let attrs = &field.attrs;

    if attrs.not_mapped {
        trace!(entity = owner, field = field.ident, "field excluded from mapping");
        return Ok(None);
    }

    if attrs.embedded && attrs.reference {
        return Err(MappingError::embedded_reference(owner, field.ident));
    }

    if attrs.ancestors {
        validate_ancestors(owner, field)?;
    }

    let mapped_name = attrs
        .name_override()
        .map_or_else(|| config.naming.apply(field.ident), ToString::to_string);

    if mapped_name.len() > config.max_name_len {
        return Err(MappingError::for_field(
            MappingRule::NameTooLong,
            owner,
            field.ident,
            format!(
                "mapped name '{mapped_name}' exceeds max length {}",
                config.max_name_len
            ),
        ));
    }

    trace!(
        entity = owner,
        field = field.ident,
        mapped_name = %mapped_name,
        shape = %field.shape,
        "field classified"
    );

    Ok(Some(PropertyDescriptor {
        owner,
        field_name: field.ident,
        mapped_name,
        declared_type: field.shape.clone(),
        id: attrs.id,
        embedded: attrs.embedded,
        reference: attrs.reference,
        ancestors: attrs.ancestors,
    }))
}

// Ancestor chains are ordered sequences of (key name, key value) pairs.
fn validate_ancestors(owner: &str, field: &FieldDecl) -> Result<(), MappingError> {
    if !field.shape.is_list_like() {
        return Err(MappingError::ancestors_not_list(
            owner,
            field.ident,
            &field.shape.to_string(),
        ));
    }

    match field.shape.element() {
        Some(element) if element.is_pair() => Ok(()),
        Some(element) => Err(MappingError::ancestors_not_pair(
            owner,
            field.ident,
            &element.to_string(),
        )),
        None => Err(MappingError::ancestors_not_pair(
            owner,
            field.ident,
            &field.shape.to_string(),
        )),
    }
}

/// Check the invariants that need the complete property set.
pub fn validate_entity(
    owner: &str,
    properties: &[PropertyDescriptor],
) -> Result<(), MappingError> {
    let id_count = properties.iter().filter(|p| p.is_id_property()).count();
    if id_count != 1 {
        return Err(MappingError::id_count(owner, id_count));
    }

    // already rejected per field; kept for descriptors built elsewhere
    if let Some(prop) = properties
        .iter()
        .find(|p| p.is_embedded() && p.is_reference())
    {
        return Err(MappingError::embedded_reference(owner, prop.field_name()));
    }

    Ok(())
}

/// Classify every field of a declaration and build the persistent entity.
pub fn classify_entity(
    decl: &EntityDecl,
    config: &MappingConfig,
) -> Result<PersistentEntity, MappingError> {
    let kind_name = decl.resolved_kind();
    validate_kind_name(decl.path, kind_name, config)?;

    let mut properties = Vec::with_capacity(decl.fields.len());
    for field in &decl.fields {
        if let Some(prop) = classify(decl.path, field, config)? {
            properties.push(prop);
        }
    }

    validate_entity(decl.path, &properties)?;

    Ok(PersistentEntity::new(decl, properties))
}

fn validate_kind_name(
    owner: &str,
    kind_name: &str,
    config: &MappingConfig,
) -> Result<(), MappingError> {
    if kind_name.is_empty() {
        return Err(MappingError::new(
            MappingRule::InvalidName,
            owner,
            "entity kind name is empty",
        ));
    }
    if !kind_name.is_ascii() {
        return Err(MappingError::new(
            MappingRule::InvalidName,
            owner,
            format!("entity kind name '{kind_name}' must be ASCII"),
        ));
    }
    if kind_name.len() > config.max_name_len {
        return Err(MappingError::new(
            MappingRule::NameTooLong,
            owner,
            format!(
                "entity kind name '{kind_name}' exceeds max length {}",
                config.max_name_len
            ),
        ));
    }

    Ok(())
}
