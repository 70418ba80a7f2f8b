use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, WhereClause};

// where_clause_with_bounds
// Appends extra predicates to an existing where clause.
pub fn where_clause_with_bounds(
    where_clause: Option<&WhereClause>,
    bounds: &[TokenStream],
) -> TokenStream {
    if bounds.is_empty() {
        return where_clause.map_or_else(|| quote!(), |wc| quote!(#wc));
    }

    if let Some(wc) = where_clause {
        let preds = &wc.predicates;
        quote!(where #preds, #(#bounds),*)
    } else {
        quote!(where #(#bounds),*)
    }
}

// Every type parameter must be 'static for the impl to satisfy the trait.
pub fn static_bounds(generics: &Generics) -> Vec<TokenStream> {
    generics
        .type_params()
        .map(|param| {
            let ident = &param.ident;
            quote!(#ident: 'static)
        })
        .collect()
}
