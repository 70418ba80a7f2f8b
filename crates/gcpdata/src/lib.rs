//! ## Crate layout
//! - `core`: entity schema, field classification, the mapping context and
//!   query lookup.
//! - `Persistent` (derive): declares an entity schema from a Rust struct.
//!
//! The `prelude` module carries the vocabulary most callers need.

pub use gcpdata_core as core;

// trait and derive share the name, like serde's Serialize
pub use gcpdata_core::traits::Persistent;
pub use gcpdata_derive::Persistent;

mod error;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        context::MappingContext,
        model::{entity::PersistentEntity, property::PropertyDescriptor},
        node::{EntityDecl, FieldDecl},
        query::{NamedQueryMap, QueryLookupStrategy, QueryMethod},
        traits::Persistent,
        types::{ScalarKind, TypeShape},
    };
    pub use gcpdata_derive::Persistent;
}
