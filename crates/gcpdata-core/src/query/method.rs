use crate::{
    model::entity::PersistentEntity, node::EntityDecl, traits::Persistent, types::TypeShape,
};

///
/// QueryParameter
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryParameter {
    pub name: Option<&'static str>,
    pub shape: TypeShape,
}

///
/// QueryMethod
///
/// One repository query method: its name, the entity it queries, an
/// optional explicit named-query name and its declared parameters.
///

#[derive(Clone, Debug)]
pub struct QueryMethod {
    pub name: &'static str,
    pub entity: &'static str,
    pub named_query_name: Option<&'static str>,
    pub parameters: Vec<QueryParameter>,
    entity_decl: fn() -> EntityDecl,
}

impl QueryMethod {
    #[must_use]
    pub fn new<T: Persistent>(name: &'static str) -> Self {
        Self {
            name,
            entity: T::PATH,
            named_query_name: None,
            parameters: Vec::new(),
            entity_decl: T::entity_decl,
        }
    }

    #[must_use]
    pub const fn named_query(mut self, name: &'static str) -> Self {
        self.named_query_name = Some(name);
        self
    }

    #[must_use]
    pub fn param(mut self, name: &'static str, shape: TypeShape) -> Self {
        self.parameters.push(QueryParameter {
            name: Some(name),
            shape,
        });
        self
    }

    #[must_use]
    pub fn unnamed_param(mut self, shape: TypeShape) -> Self {
        self.parameters.push(QueryParameter { name: None, shape });
        self
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&QueryParameter> {
        self.parameters.iter().find(|p| p.name == Some(name))
    }

    /// Named-query key for this method: the explicit name, or
    /// `"<EntityIdent>.<method>"`.
    #[must_use]
    pub fn resolve_named_query_name(&self, entity: &PersistentEntity) -> String {
        self.named_query_name.map_or_else(
            || format!("{}.{}", entity.ident(), self.name),
            ToString::to_string,
        )
    }

    pub(crate) const fn entity_decl(&self) -> fn() -> EntityDecl {
        self.entity_decl
    }
}
