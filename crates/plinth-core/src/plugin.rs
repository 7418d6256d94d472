//! Plugin traits.
//!
//! A plugin is written as two types that hand ownership back and forth:
//!
//! - a [`Descriptor`]: unprepared. Owns the parameters and describes the
//!   plugin, but knows nothing about the audio format.
//! - a [`Processor`]: prepared. Created by [`Descriptor::prepare`] with the
//!   setup values it asked for, owns all format-dependent DSP state, and
//!   turns back into the descriptor with [`Processor::unprepare`].
//!
//! ```text
//! Descriptor --prepare(setup)--> Processor
//!     ^                              |
//!     +---------unprepare()----------+
//! ```
//!
//! Both halves share one `Arc<Parameters>`, so values survive the round trip
//! and an editor can observe them no matter which half currently exists.

use std::sync::Arc;

use crate::buffer::Buffer;
use crate::bus::{BusInfo, BusLayout};
use crate::events::Event;
use crate::gui::{Editor, EditorContext};
use crate::parameter_types::Parameters;
use crate::setup::PluginSetup;

/// Per-call information passed to [`Processor::process`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessContext {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Largest block the processor was prepared for.
    pub max_block_size: u32,
    /// Samples in this call's buffer.
    pub num_samples: usize,
    /// Position of this buffer within the host block.
    pub block_offset: usize,
}

/// Access to the shared parameter collection.
pub trait HasParameters: Send + 'static {
    /// The parameter collection.
    type Parameters: Parameters + 'static;

    /// The shared parameters.
    fn parameters(&self) -> &Arc<Self::Parameters>;
}

/// The unprepared half of a plugin.
pub trait Descriptor: HasParameters + Default {
    /// Values the processor needs at prepare time. See [`crate::setup`].
    type Setup: PluginSetup;

    /// The prepared half.
    type Processor: Processor<Descriptor = Self, Parameters = Self::Parameters>;

    /// Build the processor for the given format. May allocate.
    fn prepare(self, setup: Self::Setup) -> Self::Processor;

    /// Default main input bus. `None` for generators.
    fn input_bus_info() -> Option<BusInfo> {
        Some(BusInfo::stereo("Input"))
    }

    /// Default main output bus.
    fn output_bus_info() -> Option<BusInfo> {
        Some(BusInfo::stereo("Output"))
    }

    /// Whether the plugin can run with `layout`.
    ///
    /// The default accepts mono or stereo output with at most as many input
    /// channels as outputs.
    fn is_layout_supported(layout: &BusLayout) -> bool {
        matches!(layout.main_output_channels, 1 | 2)
            && layout.main_input_channels <= layout.main_output_channels
    }

    /// Whether [`create_editor`](Self::create_editor) returns an editor.
    fn has_editor() -> bool {
        false
    }

    /// Create an editor observing the plugin through `context`.
    fn create_editor(_context: EditorContext<Self::Parameters>) -> Option<Box<dyn Editor>> {
        None
    }
}

/// The prepared half of a plugin.
pub trait Processor: HasParameters {
    /// The unprepared half.
    type Descriptor: Descriptor<Processor = Self, Parameters = Self::Parameters>;

    /// Drop format-dependent state and return the descriptor.
    fn unprepare(self) -> Self::Descriptor;

    /// Process audio in place.
    ///
    /// Runs on the audio thread: no allocation, locks or I/O. The buffer
    /// never exceeds the prepared block size.
    fn process(&mut self, buffer: &mut Buffer<'_, '_, f32>, context: &ProcessContext);

    /// Handle a non-parameter event at its position in the block. Parameter
    /// changes are written to the parameters before processing resumes.
    fn handle_event(&mut self, _event: &Event) {}

    /// Clear ramps and other transient state, e.g. after loading state.
    fn reset(&mut self) {}

    /// Latency in samples.
    fn latency_samples(&self) -> u32 {
        0
    }

    /// Length of the tail after input stops, in seconds.
    fn tail_seconds(&self) -> f64 {
        0.0
    }
}
