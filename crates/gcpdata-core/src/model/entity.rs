use crate::{model::property::PropertyDescriptor, node::EntityDecl};
use serde::Serialize;
use std::slice::Iter;

///
/// PersistentEntity
///
/// Validated mapping for one domain type. Built once by the mapping context
/// and shared read-only afterwards.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PersistentEntity {
    path: &'static str,
    ident: &'static str,
    kind_name: &'static str,
    properties: Vec<PropertyDescriptor>,

    #[serde(skip)]
    id_index: usize,
}

impl PersistentEntity {
    // Callers must have validated that exactly one property is the id.
    pub(crate) fn new(decl: &EntityDecl, properties: Vec<PropertyDescriptor>) -> Self {
        let id_index = properties
            .iter()
            .position(PropertyDescriptor::is_id_property)
            .unwrap_or_default();

        Self {
            path: decl.path,
            ident: decl.ident,
            kind_name: decl.resolved_kind(),
            properties,
            id_index,
        }
    }

    /// Fully-qualified type path (the type's identity).
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Storage kind name (explicit override or the type ident).
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        self.kind_name
    }

    #[must_use]
    pub fn id_property(&self) -> &PropertyDescriptor {
        &self.properties[self.id_index]
    }

    /// Mapped properties in declaration order. Restartable: every call
    /// yields the same sequence.
    pub fn properties(&self) -> Iter<'_, PropertyDescriptor> {
        self.properties.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Look up a property by its declared field name.
    #[must_use]
    pub fn property(&self, field_name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.field_name() == field_name)
    }

    /// Look up a property by its storage name.
    #[must_use]
    pub fn property_by_mapped_name(&self, mapped_name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.mapped_name() == mapped_name)
    }

    /// Visit every mapped property in order.
    pub fn with_properties(&self, mut f: impl FnMut(&PropertyDescriptor)) {
        for prop in &self.properties {
            f(prop);
        }
    }
}

impl<'a> IntoIterator for &'a PersistentEntity {
    type Item = &'a PropertyDescriptor;
    type IntoIter = Iter<'a, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
