use crate::types::TypeShape;
use serde::Serialize;
use std::ops::Not;

///
/// FieldAttrs
///
/// Mapping markers attached to one declared field.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FieldAttrs {
    #[serde(default, skip_serializing_if = "Not::not")]
    pub id: bool,

    /// Explicit storage name. An empty string counts as no override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub embedded: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub reference: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub ancestors: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub not_mapped: bool,
}

impl FieldAttrs {
    /// The explicit name override, treating `""` as absent.
    #[must_use]
    pub fn name_override(&self) -> Option<&'static str> {
        self.name.filter(|name| !name.is_empty())
    }
}

///
/// FieldDecl
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldDecl {
    pub ident: &'static str,
    pub shape: TypeShape,
    pub attrs: FieldAttrs,
}

impl FieldDecl {
    #[must_use]
    pub fn new(ident: &'static str, shape: TypeShape) -> Self {
        Self {
            ident,
            shape,
            attrs: FieldAttrs::default(),
        }
    }

    #[must_use]
    pub const fn id(mut self) -> Self {
        self.attrs.id = true;
        self
    }

    #[must_use]
    pub const fn name(mut self, name: &'static str) -> Self {
        self.attrs.name = Some(name);
        self
    }

    #[must_use]
    pub const fn embedded(mut self) -> Self {
        self.attrs.embedded = true;
        self
    }

    #[must_use]
    pub const fn reference(mut self) -> Self {
        self.attrs.reference = true;
        self
    }

    #[must_use]
    pub const fn ancestors(mut self) -> Self {
        self.attrs.ancestors = true;
        self
    }

    #[must_use]
    pub const fn not_mapped(mut self) -> Self {
        self.attrs.not_mapped = true;
        self
    }
}
