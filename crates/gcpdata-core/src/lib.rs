//! Core mapping runtime for gcpdata: declarative entity schema, field
//! classification, the mapping context, and query lookup.
//!
//! In general:
//! - `node` defines *what is declared* (per-type schema, built by hand or by
//!   `#[derive(Persistent)]`)
//! - `model` defines *what is mapped* (validated, cached descriptors)
#![warn(unreachable_pub)]

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod node;
pub mod query;
pub mod traits;
pub mod types;

///
/// CONSTANTS
///

/// Default maximum length for entity kind names and mapped property names.
pub const MAX_NAME_LEN: usize = 64;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, strategies or config loaders are re-exported here.
///

pub mod prelude {
    pub use crate::{
        context::MappingContext,
        model::{entity::PersistentEntity, property::PropertyDescriptor},
        node::{EntityDecl, FieldDecl},
        traits::Persistent,
        types::{ScalarKind, TypeShape},
    };
}
