use crate::node::EntityDecl;

///
/// Persistent
///
/// A domain type with a declared persistence schema. Usually derived with
/// `#[derive(Persistent)]`; `PATH` is the type's identity in the mapping
/// context and must be unique per type.
///

pub trait Persistent: 'static {
    const PATH: &'static str;

    fn entity_decl() -> EntityDecl;
}
