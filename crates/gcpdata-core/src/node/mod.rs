//! Declarative entity schema.
//!
//! Nodes here describe what a domain type declares; nothing in this module
//! validates. Classification lives in `model::classify`.

mod entity;
mod field;

pub use self::entity::*;
pub use self::field::*;
