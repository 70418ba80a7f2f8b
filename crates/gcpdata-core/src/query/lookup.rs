use crate::{
    context::MappingContext,
    model::entity::PersistentEntity,
    query::{NamedQueries, PartTree, QueryError, QueryMethod},
};
use std::{collections::BTreeSet, sync::Arc};
use tracing::trace;

///
/// QueryFactory
///
/// Host-supplied constructor for executable queries.
///

pub trait QueryFactory {
    type Query;

    fn create_sql_query(
        &self,
        entity: &Arc<PersistentEntity>,
        method: &QueryMethod,
        sql: &str,
    ) -> Self::Query;

    fn create_part_tree_query(
        &self,
        entity: &Arc<PersistentEntity>,
        method: &QueryMethod,
        tree: PartTree,
    ) -> Self::Query;
}

///
/// QueryLookupStrategy
///
/// Resolves a query method to a named SQL query when one exists under its
/// query name, and to a method-name derived part tree otherwise.
///

#[derive(Debug)]
pub struct QueryLookupStrategy<F> {
    context: Arc<MappingContext>,
    factory: F,
}

impl<F: QueryFactory> QueryLookupStrategy<F> {
    #[must_use]
    pub const fn new(context: Arc<MappingContext>, factory: F) -> Self {
        Self { context, factory }
    }

    #[must_use]
    pub const fn context(&self) -> &Arc<MappingContext> {
        &self.context
    }

    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    pub fn resolve_query(
        &self,
        method: &QueryMethod,
        named_queries: &(impl NamedQueries + ?Sized),
    ) -> Result<F::Query, QueryError> {
        let entity = self
            .context
            .register_with(method.entity, method.entity_decl())?;
        let query_name = method.resolve_named_query_name(&entity);

        if let Some(sql) = named_queries.query(&query_name) {
            for param in sql_parameters(sql) {
                if method.parameter(param).is_none() {
                    return Err(QueryError::UnboundParameter {
                        query: query_name,
                        method: method.name.to_string(),
                        param: param.to_string(),
                    });
                }
            }
            trace!(entity = entity.path(), query = %query_name, "resolved named query");

            return Ok(self.factory.create_sql_query(&entity, method, sql));
        }

        let tree = PartTree::parse(method.name, &entity)?;
        let expected = tree.parameter_count();
        if expected != method.parameters.len() {
            return Err(QueryError::ParameterCount {
                method: method.name.to_string(),
                expected,
                actual: method.parameters.len(),
            });
        }
        trace!(entity = entity.path(), method = method.name, "resolved part tree query");

        Ok(self.factory.create_part_tree_query(&entity, method, tree))
    }
}

/// Distinct `@name` placeholders in `sql`, ignoring quoted literals and
/// comments.
#[must_use]
pub fn sql_parameters(sql: &str) -> BTreeSet<&str> {
    let bytes = sql.as_bytes();
    let mut params = BTreeSet::new();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if matches!(b, b'\'' | b'"' | b'`') => quote = Some(b),
            None if bytes[i..].starts_with(b"--") => {
                i = bytes[i..]
                    .iter()
                    .position(|c| *c == b'\n')
                    .map_or(bytes.len(), |n| i + n);
                continue;
            }
            None if bytes[i..].starts_with(b"/*") => {
                i = bytes[i + 2..]
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map_or(bytes.len(), |n| i + n + 4);
                continue;
            }
            None if b == b'@' => {
                let start = i + 1;
                let end = bytes[start..]
                    .iter()
                    .position(|c| !(c.is_ascii_alphanumeric() || *c == b'_'))
                    .map_or(bytes.len(), |n| start + n);

                if end > start && !bytes[start].is_ascii_digit() {
                    params.insert(&sql[start..end]);
                }
                i = end;
                continue;
            }
            None => {}
        }
        i += 1;
    }

    params
}

///
/// TESTS
///
