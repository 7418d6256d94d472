//! Core traits and runtime for Plinth plugins.
//!
//! A plugin is split into two halves:
//!
//! ```text
//! Descriptor (parameters, metadata)
//!        | prepare(setup)           ^ unprepare()
//!        v                          |
//! Processor (format-dependent DSP state)
//! ```
//!
//! [`PluginInstance`] drives that lifecycle on behalf of a host through the
//! object-safe [`AudioPlugin`] trait, and [`export_plugin!`] generates the
//! single `create_plugin()` entry point a plugin crate exposes.

pub mod buffer;
pub mod bus;
pub mod config;
pub mod denormals;
pub mod dsp;
pub mod error;
pub mod events;
pub mod gui;
pub mod instance;
pub mod parameter_format;
pub mod parameter_info;
pub mod parameter_range;
pub mod parameter_types;
pub mod plugin;
pub mod preset;
pub mod sample;
pub mod setup;
pub mod smoothing;
pub mod state;
pub mod types;

pub use buffer::Buffer;
pub use bus::{BusInfo, BusLayout, BusType};
pub use config::{Category, PluginConfig, Subcategory};
pub use denormals::ScopedNoDenormals;
pub use dsp::{Gain, ProcessorChain, Stage, DEFAULT_GAIN_RAMP_SECONDS};
pub use error::{PluginError, PluginResult};
pub use events::{Event, EventBody};
pub use gui::{
    Canvas, Colour, DisplayList, DrawCommand, Editor, EditorConstraints, EditorContext,
    Justification,
};
pub use instance::{AudioPlugin, PluginInstance};
pub use parameter_format::Formatter;
pub use parameter_info::{ParameterFlags, ParameterInfo, ParameterUnit};
pub use parameter_range::{LinearMapper, LogMapper, RangeMapper};
pub use parameter_types::{
    db_to_linear, linear_to_db, BoolParameter, FloatParameter, NoParameters, ParameterRef,
    ParameterSnapshot, Parameters,
};
pub use plugin::{Descriptor, HasParameters, ProcessContext, Processor};
pub use preset::{FactoryPresets, NoPresets, PresetInfo, PresetValue};
pub use sample::Sample;
pub use setup::{MainOutputChannels, MaxBufferSize, PluginSetup, ProcessSpec, SampleRate};
pub use smoothing::{Smoother, SmoothingStyle};
pub use state::{load_state, save_state, StateChunk, STATE_FORMAT, STATE_VERSION};
pub use types::{ParameterId, ParameterValue, Rect, Size, MAX_CHANNELS};
