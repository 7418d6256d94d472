//! Derive macro for the `HasParameters` trait.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

/// Generate `HasParameters` for a struct holding an `Arc<P>`.
pub fn derive_has_parameters_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "#[derive(HasParameters)] requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(HasParameters)] only supports structs",
            ))
        }
    };

    let marked: Vec<_> = fields
        .iter()
        .filter(|f| f.attrs.iter().any(|a| a.path().is_ident("parameters")))
        .collect();
    let field = match marked.as_slice() {
        [field] => *field,
        [] => fields
            .iter()
            .find(|f| f.ident.as_ref().is_some_and(|i| i == "parameters"))
            .ok_or_else(|| {
                syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(HasParameters)] needs a `parameters` field or a field marked #[parameters]",
                )
            })?,
        [_, second, ..] => {
            return Err(syn::Error::new_spanned(
                second,
                "only one field can be marked #[parameters]",
            ))
        }
    };

    let parameters_type = arc_inner(&field.ty)?;
    let field_ident = &field.ident;
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::plinth::core::HasParameters for #struct_name #ty_generics #where_clause {
            type Parameters = #parameters_type;

            fn parameters(&self) -> &::std::sync::Arc<Self::Parameters> {
                &self.#field_ident
            }
        }
    })
}

/// Extract `P` from `Arc<P>` (or `std::sync::Arc<P>`).
fn arc_inner(ty: &Type) -> syn::Result<&Type> {
    let error = || syn::Error::new_spanned(ty, "the parameters field must have type `Arc<YourParameters>`");

    let Type::Path(path) = ty else {
        return Err(error());
    };
    let segment = path.path.segments.last().ok_or_else(error)?;
    if segment.ident != "Arc" {
        return Err(error());
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Err(error());
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Ok(inner),
        _ => Err(error()),
    }
}
