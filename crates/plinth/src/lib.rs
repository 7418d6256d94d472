//! # Plinth
//!
//! A small audio plugin framework for Rust.
//!
//! ## Architecture
//!
//! ```text
//! Your plugin (Descriptor + Processor)
//!        ↓
//! PluginInstance<D, Presets> (lifecycle, events, state, programs)
//!        ↓
//! dyn AudioPlugin (what a host adapter talks to)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use plinth::prelude::*;
//!
//! #[derive(Parameters)]
//! pub struct GainParameters {
//!     #[parameter(id = "gain", name = "Gain", default = 0.0, range = -60.0..=12.0, kind = "db")]
//!     pub gain: FloatParameter,
//! }
//!
//! #[derive(Default, HasParameters)]
//! pub struct GainDescriptor {
//!     parameters: Arc<GainParameters>,
//! }
//!
//! impl Descriptor for GainDescriptor {
//!     type Setup = SampleRate;
//!     type Processor = GainProcessor;
//!
//!     fn prepare(self, setup: SampleRate) -> GainProcessor {
//!         GainProcessor { parameters: self.parameters, sample_rate: setup.hz() }
//!     }
//! }
//!
//! #[derive(HasParameters)]
//! pub struct GainProcessor {
//!     parameters: Arc<GainParameters>,
//!     sample_rate: f64,
//! }
//!
//! impl Processor for GainProcessor {
//!     type Descriptor = GainDescriptor;
//!
//!     fn unprepare(self) -> GainDescriptor {
//!         GainDescriptor { parameters: self.parameters }
//!     }
//!
//!     fn process(&mut self, buffer: &mut Buffer<'_, '_, f32>, _context: &ProcessContext) {
//!         buffer.apply_gain(self.parameters.gain.as_linear() as f32);
//!     }
//! }
//!
//! pub static CONFIG: PluginConfig = PluginConfig::new("Gain");
//! export_plugin!(CONFIG, GainDescriptor);
//! ```

pub use plinth_core as core;

pub use plinth_core::export_plugin;

#[cfg(feature = "derive")]
pub use plinth_macros::{HasParameters, Parameters, Presets};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use plinth::prelude::*;
/// ```
pub mod prelude {
    pub use plinth_core::{
        // Buffers and samples
        Buffer, Sample,
        // Lifecycle traits
        AudioPlugin, Descriptor, HasParameters, PluginInstance, Processor, ProcessContext,
        // Setup types (composable)
        MainOutputChannels, MaxBufferSize, PluginSetup, ProcessSpec, SampleRate,
        // Buses
        BusInfo, BusLayout, BusType,
        // Configuration
        Category, PluginConfig, Subcategory,
        // Events
        Event, EventBody,
        // Parameters
        BoolParameter, FloatParameter, Formatter, NoParameters, ParameterFlags, ParameterId,
        ParameterInfo, ParameterRef, ParameterUnit, ParameterValue, Parameters,
        LinearMapper, LogMapper, RangeMapper,
        // Factory presets
        FactoryPresets, NoPresets, PresetInfo, PresetValue,
        // DSP
        Gain, ProcessorChain, Smoother, SmoothingStyle, Stage,
        // Editor
        Canvas, Colour, DisplayList, Editor, EditorConstraints, EditorContext, Justification,
        // Geometry
        Rect, Size,
        // Errors
        PluginError, PluginResult,
    };

    pub use plinth_core::export_plugin;

    // Derive macros share names with the traits they implement; they live in
    // different namespaces.
    #[cfg(feature = "derive")]
    pub use plinth_macros::{HasParameters, Parameters, Presets};
}
