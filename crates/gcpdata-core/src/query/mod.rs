//! Query lookup over mapped entities.
//!
//! A repository query method resolves either to a named SQL query (when one
//! is registered under the method's query name) or to a part tree derived
//! from the method name. Building and running the final query is the host's
//! job, through `QueryFactory`.

mod error;
mod lookup;
mod method;
mod named;
mod part_tree;

pub use error::QueryError;
pub use lookup::{QueryFactory, QueryLookupStrategy, sql_parameters};
pub use method::{QueryMethod, QueryParameter};
pub use named::{NamedQueries, NamedQueryMap};
pub use part_tree::{Direction, Order, Part, PartOp, PartTree, Subject};
