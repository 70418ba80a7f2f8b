use crate::{
    shape::ShapeInference,
    util::{static_bounds, where_clause_with_bounds},
};
use darling::{FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Error, Generics, Ident, LitStr, Type};

///
/// EntityInput
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(persistent), supports(struct_named))]
struct EntityInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, FieldInput>,

    #[darling(default)]
    kind: Option<LitStr>,
}

///
/// FieldInput
///

#[derive(Debug, FromField)]
#[darling(attributes(persistent))]
struct FieldInput {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    id: bool,

    #[darling(default)]
    name: Option<LitStr>,

    #[darling(default)]
    embedded: bool,

    #[darling(default)]
    reference: bool,

    #[darling(default)]
    ancestors: bool,

    #[darling(default)]
    not_mapped: bool,
}

impl FieldInput {
    fn decl(&self, shapes: &ShapeInference<'_>) -> Result<TokenStream, Error> {
        let Some(ident) = &self.ident else {
            return Err(Error::new_spanned(&self.ty, "Persistent fields must be named"));
        };
        let ident = ident.to_string();
        let ident = ident.strip_prefix("r#").unwrap_or(&ident);
        let shape = shapes.shape(&self.ty);

        let mut modifiers = Vec::new();
        if self.id {
            modifiers.push(quote!(.id()));
        }
        if let Some(name) = &self.name {
            modifiers.push(quote!(.name(#name)));
        }
        if self.embedded {
            modifiers.push(quote!(.embedded()));
        }
        if self.reference {
            modifiers.push(quote!(.reference()));
        }
        if self.ancestors {
            modifiers.push(quote!(.ancestors()));
        }
        if self.not_mapped {
            modifiers.push(quote!(.not_mapped()));
        }

        Ok(quote! {
            ::gcpdata::core::node::FieldDecl::new(#ident, #shape) #(#modifiers)*
        })
    }
}

// derive_persistent
pub fn derive_persistent(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let entity = match EntityInput::from_derive_input(&input) {
        Ok(entity) => entity,
        Err(err) => return err.write_errors(),
    };

    match expand(&entity) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(entity: &EntityInput) -> Result<TokenStream, Error> {
    if let Some(lifetime) = entity.generics.lifetimes().next() {
        return Err(Error::new_spanned(
            lifetime,
            "Persistent cannot be derived for types with lifetime parameters",
        ));
    }

    let params: Vec<Ident> = entity
        .generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let shapes = ShapeInference::new(&params);

    let Data::Struct(fields) = &entity.data else {
        return Err(Error::new_spanned(
            &entity.ident,
            "Persistent can only be derived for structs with named fields",
        ));
    };
    let fields = fields
        .iter()
        .map(|field| field.decl(&shapes))
        .collect::<Result<Vec<_>, _>>()?;

    let ident = &entity.ident;
    let kind = entity.kind.as_ref().map(|kind| quote!(.kind(#kind)));
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();
    let where_clause = where_clause_with_bounds(where_clause, &static_bounds(&entity.generics));

    Ok(quote! {
        impl #impl_generics ::gcpdata::core::traits::Persistent for #ident #ty_generics #where_clause {
            const PATH: &'static str = concat!(module_path!(), "::", stringify!(#ident));

            fn entity_decl() -> ::gcpdata::core::node::EntityDecl {
                ::gcpdata::core::node::EntityDecl::new(Self::PATH)
                    #kind
                    #(.field(#fields))*
            }
        }
    })
}

///
/// TESTS
///
