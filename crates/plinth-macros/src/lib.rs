//! Derive macros for Plinth.
//!
//! - `#[derive(Parameters)]` implements `Parameters` and `Default` for a
//!   struct of parameter fields.
//! - `#[derive(HasParameters)]` implements `HasParameters` for a struct
//!   holding an `Arc` of its parameters.
//! - `#[derive(Presets)]` implements `FactoryPresets` for an enum of presets.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod has_parameters;
mod parameters;
mod presets;
mod range_eval;

/// Derive `Parameters` and `Default` from `#[parameter(...)]` attributes.
///
/// ```ignore
/// #[derive(Parameters)]
/// pub struct GainParameters {
///     #[parameter(id = "gain", name = "Gain", default = 0.0, range = -60.0..=12.0, kind = "db")]
///     pub gain: FloatParameter,
///
///     #[parameter(id = "bypass", bypass)]
///     pub bypass: BoolParameter,
/// }
/// ```
///
/// Supported keys:
///
/// - `id = "..."` (required): stable string id, hashed with FNV-1a for the
///   numeric id hosts see
/// - `name = "..."`: display name (defaults to the field name)
/// - `short_name = "..."`
/// - `default = <number | bool>`
/// - `range = <min>..=<max>`
/// - `kind = "linear" | "db" | "hz" | "ms" | "seconds" | "percent" | "pan"`
/// - `precision = <usize>`, `readonly`, `non_automatable`, `bypass`
///
/// Fields without a `#[parameter]` attribute are filled with
/// `Default::default()` and are not exposed to the host.
#[proc_macro_derive(Parameters, attributes(parameter))]
pub fn derive_parameters(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    parameters::derive_parameters_impl(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Derive `HasParameters` for a struct with an `Arc<P>` field.
///
/// The field is the one marked `#[parameters]`, or the field named
/// `parameters` if none is marked.
#[proc_macro_derive(HasParameters, attributes(parameters))]
pub fn derive_has_parameters(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    has_parameters::derive_has_parameters_impl(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Derive `FactoryPresets` for an enum of unit variants.
///
/// ```ignore
/// #[derive(Presets)]
/// #[preset(parameters = GainParameters)]
/// pub enum GainPresets {
///     #[preset(name = "Unity", values(gain = 0.0))]
///     Unity,
///     #[preset(name = "Quiet", values(gain = -12.0))]
///     Quiet,
/// }
/// ```
#[proc_macro_derive(Presets, attributes(preset))]
pub fn derive_presets(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    presets::derive_presets_impl(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
