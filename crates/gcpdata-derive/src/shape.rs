use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, Ident, PathArguments, Type, TypePath};

///
/// ShapeInference
///
/// Maps a field's Rust type to a `TypeShape` constructor expression.
/// Type parameters of the deriving struct are unresolved: they become `Any`,
/// and an iterable over one is an untyped iterable.
///

pub struct ShapeInference<'a> {
    params: &'a [Ident],
}

impl<'a> ShapeInference<'a> {
    pub const fn new(params: &'a [Ident]) -> Self {
        Self { params }
    }

    pub fn shape(&self, ty: &Type) -> TokenStream {
        let shape = quote!(::gcpdata::core::types::TypeShape);

        match ty {
            Type::Group(group) => self.shape(&group.elem),
            Type::Paren(paren) => self.shape(&paren.elem),
            Type::Reference(reference) => self.shape(&reference.elem),
            Type::Array(array) => self.list(&array.elem),
            Type::Tuple(tuple) if tuple.elems.len() == 2 => {
                let key = self.shape(&tuple.elems[0]);
                let value = self.shape(&tuple.elems[1]);

                quote!(#shape::pair(#key, #value))
            }
            Type::Path(path) if path.qself.is_none() => self.path(path),
            other => {
                let name = quote!(#other).to_string();

                quote!(#shape::named(#name))
            }
        }
    }

    fn path(&self, ty: &TypePath) -> TokenStream {
        let shape = quote!(::gcpdata::core::types::TypeShape);

        if self.is_param(ty) {
            return quote!(#shape::Any);
        }

        let Some(segment) = ty.path.segments.last() else {
            return quote!(#shape::Any);
        };
        let args = type_args(&segment.arguments);
        let ident = segment.ident.to_string();

        match (ident.as_str(), args.as_slice()) {
            ("String" | "str" | "char", []) => scalar("Text"),
            ("bool", []) => scalar("Bool"),
            ("f32", []) => scalar("Float32"),
            ("f64", []) => scalar("Float64"),
            ("i8", []) => scalar("Int8"),
            ("i16", []) => scalar("Int16"),
            ("i32", []) => scalar("Int32"),
            ("i64" | "isize", []) => scalar("Int64"),
            ("u8", []) => scalar("Uint8"),
            ("u16", []) => scalar("Uint16"),
            ("u32", []) => scalar("Uint32"),
            ("u64" | "usize", []) => scalar("Uint64"),
            ("SystemTime", []) => scalar("Timestamp"),
            ("Vec", [inner]) if is_ident(inner, "u8") => scalar("Blob"),
            ("Box" | "Arc" | "Rc", [inner]) => self.shape(inner),
            ("Option", [inner]) => {
                let inner = self.shape(inner);

                quote!(#shape::optional(#inner))
            }
            ("Vec" | "VecDeque" | "LinkedList", [inner]) => self.list(inner),
            ("HashSet" | "BTreeSet", [inner, ..]) => self.set(inner),
            ("HashMap" | "BTreeMap", [key, value, ..]) => {
                let key = self.shape(key);
                let value = self.shape(value);

                quote!(#shape::map(#key, #value))
            }
            _ => {
                let name = ty
                    .path
                    .segments
                    .iter()
                    .map(|segment| segment.ident.to_string())
                    .collect::<Vec<_>>()
                    .join("::");

                quote!(#shape::named(#name))
            }
        }
    }

    fn list(&self, element: &Type) -> TokenStream {
        let shape = quote!(::gcpdata::core::types::TypeShape);

        if self.is_param_type(element) {
            quote!(#shape::untyped_list())
        } else {
            let element = self.shape(element);

            quote!(#shape::list(#element))
        }
    }

    fn set(&self, element: &Type) -> TokenStream {
        let shape = quote!(::gcpdata::core::types::TypeShape);

        if self.is_param_type(element) {
            quote!(#shape::untyped_set())
        } else {
            let element = self.shape(element);

            quote!(#shape::set(#element))
        }
    }

    fn is_param_type(&self, ty: &Type) -> bool {
        matches!(ty, Type::Path(path) if path.qself.is_none() && self.is_param(path))
    }

    fn is_param(&self, ty: &TypePath) -> bool {
        ty.path
            .get_ident()
            .is_some_and(|ident| self.params.contains(ident))
    }
}

fn scalar(kind: &str) -> TokenStream {
    let kind = Ident::new(kind, proc_macro2::Span::call_site());

    quote! {
        ::gcpdata::core::types::TypeShape::scalar(::gcpdata::core::types::ScalarKind::#kind)
    }
}

fn type_args(arguments: &PathArguments) -> Vec<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return Vec::new();
    };

    args.args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
        .collect()
}

fn is_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path.get_ident().is_some_and(|i| i == ident)
}

///
/// TESTS
///
