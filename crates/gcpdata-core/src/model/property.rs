use crate::{error::MappingError, types::TypeShape};
use serde::Serialize;
use std::ops::Not;

///
/// PropertyDescriptor
///
/// Classified metadata for one mapped field. Only mapped fields produce a
/// descriptor; fields excluded from persistence never reach this type.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    pub(crate) owner: &'static str,
    pub(crate) field_name: &'static str,
    pub(crate) mapped_name: String,
    pub(crate) declared_type: TypeShape,

    #[serde(skip_serializing_if = "Not::not")]
    pub(crate) id: bool,
    #[serde(skip_serializing_if = "Not::not")]
    pub(crate) embedded: bool,
    #[serde(skip_serializing_if = "Not::not")]
    pub(crate) reference: bool,
    #[serde(skip_serializing_if = "Not::not")]
    pub(crate) ancestors: bool,
}

impl PropertyDescriptor {
    /// Path of the entity that declares this property.
    #[must_use]
    pub const fn owner(&self) -> &'static str {
        self.owner
    }

    /// Declared field ident, as written on the struct.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        self.field_name
    }

    /// Storage property name: the explicit name override when present,
    /// otherwise the default derived from `field_name`. This is the name
    /// queries and stored documents use.
    #[must_use]
    pub fn mapped_name(&self) -> &str {
        &self.mapped_name
    }

    #[must_use]
    pub const fn declared_type(&self) -> &TypeShape {
        &self.declared_type
    }

    #[must_use]
    pub const fn is_id_property(&self) -> bool {
        self.id
    }

    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    #[must_use]
    pub const fn is_reference(&self) -> bool {
        self.reference
    }

    #[must_use]
    pub const fn is_ancestors(&self) -> bool {
        self.ancestors
    }

    // Excluded fields never produce a descriptor.
    #[must_use]
    pub const fn is_mapped(&self) -> bool {
        true
    }

    #[must_use]
    pub fn is_iterable(&self) -> bool {
        self.declared_type.is_iterable()
    }

    /// Element type of an iterable property, resolved on request.
    ///
    /// Returns `Ok(None)` for non-iterable properties and an
    /// `UntypedIterable` error when the iterable declares no element type.
    pub fn iterable_inner_type(&self) -> Result<Option<&TypeShape>, MappingError> {
        if !self.declared_type.is_iterable() {
            return Ok(None);
        }

        match self.declared_type.element() {
            Some(element) => Ok(Some(element)),
            None => Err(MappingError::untyped_iterable(self.owner, self.field_name)),
        }
    }

    /// Association view of this property. Mapped properties are always the
    /// inverse side; there is no obverse.
    #[must_use]
    pub const fn association(&self) -> Association<'_> {
        Association {
            inverse: self,
            obverse: None,
        }
    }
}

///
/// Association
///

#[derive(Clone, Copy, Debug)]
pub struct Association<'a> {
    pub inverse: &'a PropertyDescriptor,
    pub obverse: Option<&'a PropertyDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::MappingRule, types::ScalarKind};
    use std::ptr;

    fn descriptor(shape: TypeShape) -> PropertyDescriptor {
        PropertyDescriptor {
            owner: "tests::Owner",
            field_name: "values",
            mapped_name: "values".to_string(),
            declared_type: shape,
            id: false,
            embedded: false,
            reference: false,
            ancestors: false,
        }
    }

    #[test]
    fn typed_list_resolves_inner_type() {
        let prop = descriptor(TypeShape::list(TypeShape::scalar(ScalarKind::Float64)));

        assert!(prop.is_iterable());
        assert_eq!(
            prop.iterable_inner_type().expect("typed list should resolve"),
            Some(&TypeShape::Scalar(ScalarKind::Float64))
        );
    }

    #[test]
    fn untyped_list_fails_only_on_inner_type_access() {
        let prop = descriptor(TypeShape::untyped_list());

        let err = prop
            .iterable_inner_type()
            .expect_err("untyped list should fail inner type lookup");
        assert_eq!(err.rule, MappingRule::UntypedIterable);
        assert_eq!(err.entity, "tests::Owner");
        assert_eq!(err.field.as_deref(), Some("values"));

        // every other accessor keeps working
        assert!(prop.is_iterable());
        assert_eq!(prop.mapped_name(), "values");
        assert_eq!(prop.declared_type(), &TypeShape::untyped_list());
    }

    #[test]
    fn optional_list_keeps_iterable_rules() {
        let doubles = descriptor(TypeShape::optional(TypeShape::list(TypeShape::scalar(
            ScalarKind::Float64,
        ))));
        assert!(doubles.is_iterable());
        assert_eq!(
            doubles.iterable_inner_type().expect("optional typed list should resolve"),
            Some(&TypeShape::Scalar(ScalarKind::Float64))
        );

        let raw = descriptor(TypeShape::optional(TypeShape::untyped_list()));
        assert!(raw.is_iterable());
        let err = raw
            .iterable_inner_type()
            .expect_err("optional untyped list has no inner type");
        assert_eq!(err.rule, MappingRule::UntypedIterable);
    }

    #[test]
    fn scalar_has_no_inner_type() {
        let prop = descriptor(TypeShape::text());

        assert!(!prop.is_iterable());
        assert_eq!(prop.iterable_inner_type().expect("scalar is fine"), None);
    }

    #[test]
    fn association_inverse_is_self() {
        let prop = descriptor(TypeShape::text());
        let association = prop.association();

        assert!(ptr::eq(association.inverse, &prop));
        assert!(association.obverse.is_none());
    }
}
