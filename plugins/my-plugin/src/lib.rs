//! MyPlugin - a stereo gain plugin template.
//!
//! Demonstrates the two-phase pattern:
//!
//! 1. [`MyPlugin`] is the unprepared half: parameters and metadata only.
//! 2. [`MyPluginProcessor`] is built by `prepare()` once the sample rate and
//!    block size are known, and owns the signal chain.
//!
//! The signal chain is a single [`Gain`] stage driven by the `gain`
//! parameter. The editor paints a static label; see [`editor`].

use std::sync::Arc;

use plinth::prelude::*;

pub mod editor;

use editor::MyPluginEditor;

// =============================================================================
// Plugin Configuration
// =============================================================================

/// Shared plugin configuration.
pub static CONFIG: PluginConfig = PluginConfig::new("MyPlugin")
    .with_vendor("Plinth")
    .with_url("https://example.com/my-plugin")
    .with_email("support@example.com")
    .with_version(env!("CARGO_PKG_VERSION"))
    .with_subcategories(&[Subcategory::Tools, Subcategory::Stereo]);

// =============================================================================
// Parameters
// =============================================================================

#[derive(Parameters)]
pub struct MyPluginParameters {
    /// Output gain: -60 dB to +12 dB, default 0 dB (unity)
    #[parameter(id = "gain", name = "Gain", default = 0.0, range = -60.0..=12.0, kind = "db")]
    pub gain: FloatParameter,
}

#[derive(Presets)]
#[preset(parameters = MyPluginParameters)]
pub enum MyPluginPresets {
    #[preset(name = "Unity", values(gain = 0.0))]
    Unity,

    #[preset(name = "Quiet", values(gain = -12.0))]
    Quiet,

    #[preset(name = "Boost", values(gain = 6.0))]
    Boost,
}

// =============================================================================
// Descriptor (unprepared state)
// =============================================================================

#[derive(Default, HasParameters)]
pub struct MyPlugin {
    parameters: Arc<MyPluginParameters>,
}

impl Descriptor for MyPlugin {
    type Setup = ProcessSpec;
    type Processor = MyPluginProcessor;

    fn prepare(self, spec: ProcessSpec) -> MyPluginProcessor {
        let mut chain = ProcessorChain::new((Gain::new(),));
        Stage::<f32>::prepare(&mut chain, &spec);

        // start at the current setting instead of ramping up from unity
        chain.stages_mut().0.set_gain_linear(self.parameters.gain.as_linear());
        Stage::<f32>::reset(&mut chain);

        log::debug!(
            "MyPlugin: chain prepared for {} Hz, {} samples, {} channels",
            spec.sample_rate,
            spec.maximum_block_size,
            spec.num_channels
        );

        MyPluginProcessor {
            parameters: self.parameters,
            chain,
        }
    }

    fn has_editor() -> bool {
        true
    }

    fn create_editor(context: EditorContext<MyPluginParameters>) -> Option<Box<dyn Editor>> {
        Some(Box::new(MyPluginEditor::new(context)))
    }
}

// =============================================================================
// Processor (prepared state)
// =============================================================================

#[derive(HasParameters)]
pub struct MyPluginProcessor {
    parameters: Arc<MyPluginParameters>,
    chain: ProcessorChain<(Gain,)>,
}

impl MyPluginProcessor {
    /// The gain stage.
    pub fn gain_stage(&self) -> &Gain {
        &self.chain.stages().0
    }
}

impl Processor for MyPluginProcessor {
    type Descriptor = MyPlugin;

    fn unprepare(self) -> MyPlugin {
        MyPlugin {
            parameters: self.parameters,
        }
    }

    fn process(&mut self, buffer: &mut Buffer<'_, '_, f32>, _context: &ProcessContext) {
        let gain = self.parameters.gain.as_linear();
        self.chain.stages_mut().0.set_gain_linear(gain);
        Stage::<f32>::process(&mut self.chain, buffer);
    }

    fn reset(&mut self) {
        let gain = self.parameters.gain.as_linear();
        self.chain.stages_mut().0.set_gain_linear(gain);
        Stage::<f32>::reset(&mut self.chain);
    }

    fn latency_samples(&self) -> u32 {
        Stage::<f32>::latency_samples(&self.chain)
    }
}

// =============================================================================
// Plugin Export
// =============================================================================

export_plugin!(CONFIG, MyPlugin, MyPluginPresets);
