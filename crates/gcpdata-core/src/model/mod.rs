//! Runtime mapping model.
//!
//! These are the validated, immutable forms of `node` declarations, as
//! cached by the mapping context and read by the query layer.
pub mod classify;
pub mod entity;
pub mod property;
