//! Derive macro for the `Parameters` trait.
//!
//! Each field carrying a `#[parameter(...)]` attribute becomes a host-visible
//! parameter. The macro generates:
//!
//! - `impl Default`, constructing every parameter with its id already set
//! - `impl Parameters` with `by_id` compiled to a `match` on the hashed ids
//! - one `<FIELD>_ID` associated constant per parameter

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Type};

use plinth_utils::fnv1a_32;

use crate::range_eval::{eval_bool_expr, eval_literal_expr, eval_range};

/// Which core parameter type a field holds.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldType {
    Float,
    Bool,
}

/// Value-mapping flavour of a float parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Linear,
    Db,
    Hz,
    Ms,
    Seconds,
    Percent,
    Pan,
}

impl Kind {
    fn parse(lit: &syn::LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "linear" | "float" => Ok(Kind::Linear),
            "db" => Ok(Kind::Db),
            "hz" => Ok(Kind::Hz),
            "ms" => Ok(Kind::Ms),
            "seconds" | "s" => Ok(Kind::Seconds),
            "percent" => Ok(Kind::Percent),
            "pan" => Ok(Kind::Pan),
            other => Err(syn::Error::new_spanned(
                lit,
                format!(
                    "unknown parameter kind {:?}, expected one of \"linear\", \"db\", \"hz\", \"ms\", \"seconds\", \"percent\", \"pan\"",
                    other
                ),
            )),
        }
    }

    /// Kinds with a fixed range ignore `range = ...`.
    fn has_fixed_range(self) -> bool {
        matches!(self, Kind::Percent | Kind::Pan)
    }
}

enum DefaultValue {
    Number(f64),
    Bool(bool),
}

/// Everything parsed from one `#[parameter(...)]` field.
struct ParameterField {
    ident: syn::Ident,
    field_type: FieldType,
    string_id: syn::LitStr,
    name: Option<syn::LitStr>,
    short_name: Option<syn::LitStr>,
    default: Option<DefaultValue>,
    range: Option<(f64, f64)>,
    kind: Kind,
    precision: Option<usize>,
    readonly: bool,
    non_automatable: bool,
    bypass: bool,
}

impl ParameterField {
    fn hash(&self) -> u32 {
        fnv1a_32(&self.string_id.value())
    }

    fn id_const(&self) -> syn::Ident {
        format_ident!("{}_ID", self.ident.to_string().to_uppercase())
    }

    fn display_name(&self) -> TokenStream {
        match &self.name {
            Some(name) => quote! { #name },
            None => {
                let name = self.ident.to_string();
                quote! { #name }
            }
        }
    }

    /// Expression constructing the parameter with its ids set.
    fn constructor(&self) -> syn::Result<TokenStream> {
        let name = self.display_name();
        let hash = self.hash();
        let string_id = &self.string_id;

        let base = match self.field_type {
            FieldType::Bool => {
                if self.bypass {
                    quote! { ::plinth::core::BoolParameter::bypass() }
                } else {
                    let default = match self.default {
                        None => false,
                        Some(DefaultValue::Bool(b)) => b,
                        Some(DefaultValue::Number(_)) => {
                            return Err(syn::Error::new_spanned(
                                &self.ident,
                                "bool parameters need `default = true` or `default = false`",
                            ))
                        }
                    };
                    quote! { ::plinth::core::BoolParameter::new(#name, #default) }
                }
            }
            FieldType::Float => {
                if self.bypass {
                    return Err(syn::Error::new_spanned(
                        &self.ident,
                        "`bypass` requires a BoolParameter field",
                    ));
                }
                let default = match self.default {
                    Some(DefaultValue::Number(v)) => Some(v),
                    Some(DefaultValue::Bool(_)) => {
                        return Err(syn::Error::new_spanned(
                            &self.ident,
                            "float parameters need a numeric default",
                        ))
                    }
                    None => None,
                };
                self.float_constructor(name, default)?
            }
        };

        let short_name = self.short_name.as_ref().map(|s| quote! { .with_short_name(#s) });
        let precision = self.precision.map(|p| quote! { .with_precision(#p) });
        let readonly = self.readonly.then(|| quote! { .readonly() });
        let non_automatable = self.non_automatable.then(|| quote! { .non_automatable() });

        Ok(quote! {
            #base
                .with_id(#hash)
                .with_string_id(#string_id)
                #short_name
                #precision
                #readonly
                #non_automatable
        })
    }

    fn float_constructor(&self, name: TokenStream, default: Option<f64>) -> syn::Result<TokenStream> {
        if self.kind.has_fixed_range() {
            if self.range.is_some() {
                return Err(syn::Error::new_spanned(
                    &self.ident,
                    "`percent` and `pan` parameters have a fixed range, remove `range = ...`",
                ));
            }
            let default = default.unwrap_or(0.0);
            let (constructor, min, max) = match self.kind {
                Kind::Percent => (format_ident!("percent"), 0.0, 1.0),
                _ => (format_ident!("pan"), -1.0, 1.0),
            };
            if default < min || default > max {
                return Err(syn::Error::new_spanned(
                    &self.ident,
                    format!("default {} is outside range {}..={}", default, min, max),
                ));
            }
            return Ok(quote! { ::plinth::core::FloatParameter::#constructor(#name, #default) });
        }

        let Some((min, max)) = self.range else {
            return Err(syn::Error::new_spanned(
                &self.ident,
                "float parameters need `range = min..=max`",
            ));
        };
        let default = default.unwrap_or(min);
        if default < min || default > max {
            return Err(syn::Error::new_spanned(
                &self.ident,
                format!("default {} is outside range {}..={}", default, min, max),
            ));
        }
        if self.kind == Kind::Hz && min <= 0.0 {
            return Err(syn::Error::new_spanned(
                &self.ident,
                "`hz` parameters use a logarithmic mapping and need a positive minimum",
            ));
        }

        let constructor = match self.kind {
            Kind::Linear => format_ident!("new"),
            Kind::Db => format_ident!("db"),
            Kind::Hz => format_ident!("hz"),
            Kind::Ms => format_ident!("ms"),
            Kind::Seconds => format_ident!("seconds"),
            Kind::Percent | Kind::Pan => unreachable!("fixed-range kinds handled above"),
        };
        Ok(quote! {
            ::plinth::core::FloatParameter::#constructor(#name, #default, #min..=#max)
        })
    }
}

/// Parse and generate the `Parameters` implementation for a struct.
pub fn derive_parameters_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "#[derive(Parameters)] requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Parameters)] only supports structs",
            ))
        }
    };

    let mut parameters = Vec::new();
    let mut other_fields = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        match field.attrs.iter().find(|a| a.path().is_ident("parameter")) {
            Some(attr) => parameters.push(parse_parameter_field(ident, &field.ty, attr)?),
            None => other_fields.push(ident),
        }
    }

    check_unique_ids(&parameters)?;

    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let count = parameters.len();

    let initializers = parameters
        .iter()
        .map(|p| {
            let ident = &p.ident;
            let constructor = p.constructor()?;
            Ok(quote! { #ident: #constructor, })
        })
        .collect::<syn::Result<Vec<_>>>()?;
    let other_initializers = other_fields
        .iter()
        .map(|ident| quote! { #ident: ::core::default::Default::default(), });

    let iter_items = parameters.iter().map(|p| {
        let ident = &p.ident;
        quote! { &self.#ident as &dyn ::plinth::core::ParameterRef }
    });

    let by_id_arms = parameters.iter().map(|p| {
        let ident = &p.ident;
        let hash = p.hash();
        quote! { #hash => ::core::option::Option::Some(&self.#ident as &dyn ::plinth::core::ParameterRef), }
    });

    let id_consts = parameters.iter().map(|p| {
        let name = p.id_const();
        let hash = p.hash();
        let doc = format!("Host id of the `{}` parameter.", p.string_id.value());
        quote! {
            #[doc = #doc]
            pub const #name: ::plinth::core::ParameterId = #hash;
        }
    });

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#id_consts)*
        }

        impl #impl_generics ::core::default::Default for #struct_name #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#initializers)*
                    #(#other_initializers)*
                }
            }
        }

        impl #impl_generics ::plinth::core::Parameters for #struct_name #ty_generics #where_clause {
            fn count(&self) -> usize {
                #count
            }

            fn iter(&self) -> ::std::boxed::Box<dyn ::core::iter::Iterator<Item = &dyn ::plinth::core::ParameterRef> + '_> {
                let items: [&dyn ::plinth::core::ParameterRef; #count] = [#(#iter_items),*];
                ::std::boxed::Box::new(items.into_iter())
            }

            fn by_id(&self, id: ::plinth::core::ParameterId) -> ::core::option::Option<&dyn ::plinth::core::ParameterRef> {
                match id {
                    #(#by_id_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// Reject repeated string ids and distinct ids that hash to the same value.
fn check_unique_ids(parameters: &[ParameterField]) -> syn::Result<()> {
    let mut seen: HashMap<u32, &ParameterField> = HashMap::new();
    for parameter in parameters {
        if let Some(previous) = seen.insert(parameter.hash(), parameter) {
            let message = if previous.string_id.value() == parameter.string_id.value() {
                format!(
                    "duplicate parameter id {:?} (also used by field `{}`)",
                    parameter.string_id.value(),
                    previous.ident
                )
            } else {
                format!(
                    "parameter id {:?} collides with {:?} (field `{}`): both hash to 0x{:08x}, rename one",
                    parameter.string_id.value(),
                    previous.string_id.value(),
                    previous.ident,
                    parameter.hash()
                )
            };
            return Err(syn::Error::new_spanned(&parameter.string_id, message));
        }
    }
    Ok(())
}

fn field_type(ty: &Type) -> syn::Result<FieldType> {
    let segment = match ty {
        Type::Path(path) => path.path.segments.last(),
        _ => None,
    };
    match segment.map(|s| s.ident.to_string()).as_deref() {
        Some("FloatParameter") => Ok(FieldType::Float),
        Some("BoolParameter") => Ok(FieldType::Bool),
        _ => Err(syn::Error::new_spanned(
            ty,
            "#[parameter] fields must be FloatParameter or BoolParameter",
        )),
    }
}

fn parse_parameter_field(
    ident: syn::Ident,
    ty: &Type,
    attr: &syn::Attribute,
) -> syn::Result<ParameterField> {
    let field_type = field_type(ty)?;

    let mut string_id: Option<syn::LitStr> = None;
    let mut name = None;
    let mut short_name = None;
    let mut default = None;
    let mut range = None;
    let mut kind = None;
    let mut precision = None;
    let mut readonly = false;
    let mut non_automatable = false;
    let mut bypass = false;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("id") {
            let lit: syn::LitStr = meta.value()?.parse()?;
            if lit.value().is_empty() {
                return Err(syn::Error::new_spanned(&lit, "parameter id must not be empty"));
            }
            string_id = Some(lit);
        } else if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse::<syn::LitStr>()?);
        } else if meta.path.is_ident("short_name") {
            short_name = Some(meta.value()?.parse::<syn::LitStr>()?);
        } else if meta.path.is_ident("default") {
            let expr: syn::Expr = meta.value()?.parse()?;
            default = Some(match field_type {
                FieldType::Bool => DefaultValue::Bool(eval_bool_expr(&expr)?),
                FieldType::Float => DefaultValue::Number(eval_literal_expr(&expr)?.as_f64()),
            });
        } else if meta.path.is_ident("range") {
            let expr: syn::Expr = meta.value()?.parse()?;
            range = Some(eval_range(&expr)?);
        } else if meta.path.is_ident("kind") {
            kind = Some(Kind::parse(&meta.value()?.parse()?)?);
        } else if meta.path.is_ident("precision") {
            let lit: syn::LitInt = meta.value()?.parse()?;
            precision = Some(lit.base10_parse::<usize>()?);
        } else if meta.path.is_ident("readonly") {
            readonly = true;
        } else if meta.path.is_ident("non_automatable") {
            non_automatable = true;
        } else if meta.path.is_ident("bypass") {
            bypass = true;
        } else {
            return Err(meta.error(
                "unknown key, expected one of `id`, `name`, `short_name`, `default`, `range`, `kind`, `precision`, `readonly`, `non_automatable`, `bypass`",
            ));
        }
        Ok(())
    })?;

    let string_id = string_id.ok_or_else(|| {
        syn::Error::new_spanned(attr, "#[parameter] requires `id = \"...\"`")
    })?;

    if field_type == FieldType::Bool
        && (range.is_some() || kind.is_some() || precision.is_some() || readonly)
    {
        return Err(syn::Error::new_spanned(
            attr,
            "`range`, `kind`, `precision` and `readonly` only apply to FloatParameter fields",
        ));
    }

    Ok(ParameterField {
        ident,
        field_type,
        string_id,
        name,
        short_name,
        default,
        range,
        kind: kind.unwrap_or(Kind::Linear),
        precision,
        readonly,
        non_automatable,
        bypass,
    })
}
