//! Derive macro for the `FactoryPresets` trait.
//!
//! ```ignore
//! #[derive(Presets)]
//! #[preset(parameters = GainParameters)]
//! pub enum GainPresets {
//!     #[preset(name = "Unity", values(gain = 0.0))]
//!     Unity,
//!     #[preset(name = "Boost", values(gain = 6.0))]
//!     Boost,
//! }
//! ```
//!
//! Values are plain (unnormalized) and keyed by parameter string id. Each
//! preset's values become a `static` array so applying a preset never
//! allocates.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parse;
use syn::{Data, DeriveInput, Fields};

use plinth_utils::fnv1a_32;

use crate::range_eval::eval_literal_expr;

struct PresetValueInfo {
    string_id: String,
    plain_value: f64,
}

struct PresetVariant {
    name: String,
    values: Vec<PresetValueInfo>,
}

/// Parse and generate the `FactoryPresets` implementation for an enum.
pub fn derive_presets_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    let data_enum = match &input.data {
        Data::Enum(e) => e,
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Presets)] only supports enums",
            ))
        }
    };

    let parameters_type = parse_parameters_attribute(&input.attrs)?;

    let mut presets = Vec::new();
    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "#[derive(Presets)] only supports unit variants",
            ));
        }
        presets.push(parse_variant_attribute(&variant.attrs, &variant.ident)?);
    }

    if presets.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            "#[derive(Presets)] requires at least one variant",
        ));
    }

    let enum_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let count = presets.len();

    let info_arms = presets.iter().enumerate().map(|(idx, preset)| {
        let name = &preset.name;
        quote! {
            #idx => ::core::option::Option::Some(::plinth::core::PresetInfo { name: #name }),
        }
    });

    let mut statics = Vec::new();
    let mut values_arms = Vec::new();
    for (idx, preset) in presets.iter().enumerate() {
        let static_name = format_ident!("__PLINTH_{}_PRESET_{}_VALUES", enum_name.to_string().to_uppercase(), idx);
        let values = preset.values.iter().map(|v| {
            let id = fnv1a_32(&v.string_id);
            let plain = v.plain_value;
            quote! {
                ::plinth::core::PresetValue { id: #id, plain_value: #plain }
            }
        });
        let len = preset.values.len();

        statics.push(quote! {
            static #static_name: [::plinth::core::PresetValue; #len] = [#(#values),*];
        });
        values_arms.push(quote! { #idx => &#static_name, });
    }

    Ok(quote! {
        #(#statics)*

        impl #impl_generics ::plinth::core::FactoryPresets for #enum_name #ty_generics #where_clause {
            type Parameters = #parameters_type;

            fn count() -> usize {
                #count
            }

            fn info(index: usize) -> ::core::option::Option<::plinth::core::PresetInfo> {
                match index {
                    #(#info_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn values(index: usize) -> &'static [::plinth::core::PresetValue] {
                match index {
                    #(#values_arms)*
                    _ => &[],
                }
            }
        }
    })
}

/// `#[preset(parameters = Type)]` on the enum.
fn parse_parameters_attribute(attrs: &[syn::Attribute]) -> syn::Result<syn::Type> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident("preset")) else {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[derive(Presets)] requires #[preset(parameters = YourParameters)] on the enum",
        ));
    };

    let mut parameters_type: Option<syn::Type> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("parameters") {
            parameters_type = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `parameters = Type`"))
        }
    })?;

    parameters_type
        .ok_or_else(|| syn::Error::new_spanned(attr, "expected #[preset(parameters = Type)]"))
}

/// `#[preset(name = "...", values(id = value, ...))]` on a variant.
fn parse_variant_attribute(
    attrs: &[syn::Attribute],
    variant: &syn::Ident,
) -> syn::Result<PresetVariant> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident("preset")) else {
        return Err(syn::Error::new_spanned(
            variant,
            "variant requires #[preset(name = \"...\", values(...))]",
        ));
    };

    let mut name: Option<String> = None;
    let mut values: Vec<PresetValueInfo> = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            name = Some(lit.value());
            Ok(())
        } else if meta.path.is_ident("values") {
            let content;
            syn::parenthesized!(content in meta.input);
            let pairs = content.parse_terminated(syn::ExprAssign::parse, syn::Token![,])?;

            for pair in pairs {
                let string_id = match pair.left.as_ref() {
                    syn::Expr::Path(path) => match path.path.get_ident() {
                        Some(ident) => ident.to_string(),
                        None => {
                            return Err(syn::Error::new_spanned(
                                &pair.left,
                                "expected a parameter id",
                            ))
                        }
                    },
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(s),
                        ..
                    }) => s.value(),
                    _ => {
                        return Err(syn::Error::new_spanned(
                            &pair.left,
                            "expected a parameter id",
                        ))
                    }
                };
                if values.iter().any(|v| v.string_id == string_id) {
                    return Err(syn::Error::new_spanned(
                        &pair.left,
                        format!("parameter {:?} is set twice in this preset", string_id),
                    ));
                }
                let plain_value = eval_literal_expr(&pair.right)?.as_f64();
                values.push(PresetValueInfo {
                    string_id,
                    plain_value,
                });
            }
            Ok(())
        } else {
            Err(meta.error("expected `name` or `values`"))
        }
    })?;

    let name = name.ok_or_else(|| syn::Error::new_spanned(attr, "preset requires `name = \"...\"`"))?;
    Ok(PresetVariant { name, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(src: &str) -> syn::Result<TokenStream> {
        derive_presets_impl(syn::parse_str(src).unwrap())
    }

    #[test]
    fn test_generates_statics_per_preset() {
        let tokens = derive(
            r#"#[preset(parameters = P)]
            enum Presets {
                #[preset(name = "Unity", values(gain = 0.0))]
                Unity,
                #[preset(name = "Quiet", values(gain = -12))]
                Quiet,
            }"#,
        )
        .unwrap()
        .to_string()
        .replace(' ', "");
        assert!(tokens.contains("__PLINTH_PRESETS_PRESET_0_VALUES"));
        assert!(tokens.contains("__PLINTH_PRESETS_PRESET_1_VALUES"));
        assert!(tokens.contains(&fnv1a_32("gain").to_string()));
        assert!(tokens.contains("-12f64"));
    }

    #[test]
    fn test_errors() {
        assert!(derive("enum E { A }").is_err());
        assert!(derive("#[preset(parameters = P)] enum E {}").is_err());
        assert!(derive("#[preset(parameters = P)] enum E { A }").is_err());
        assert!(derive(r#"#[preset(parameters = P)] enum E { #[preset(name = "A")] A(u8) }"#).is_err());
        assert!(derive(r#"#[preset(parameters = P)] enum E { #[preset(name = "A", values(x = 1, x = 2))] A }"#).is_err());
        assert!(derive(r#"#[preset(parameters = P)] struct S;"#).is_err());
    }
}
