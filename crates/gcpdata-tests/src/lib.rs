//! Entities declared with `#[derive(Persistent)]`, exercised end to end
//! through the mapping context and query lookup.

pub mod prelude {
    pub use gcpdata::prelude::*;
}

pub mod test;
