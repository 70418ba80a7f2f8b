//! `#[derive(Persistent)]` for gcpdata entities.
//!
//! The derive only declares the schema; every mapping rule is enforced when
//! the entity is first registered with a `MappingContext`.

use proc_macro::TokenStream;

mod persistent;
mod shape;
mod util;

#[proc_macro_derive(Persistent, attributes(persistent))]
pub fn derive_persistent(input: TokenStream) -> TokenStream {
    persistent::derive_persistent(input.into()).into()
}
