//! Host-facing plugin instance.
//!
//! [`PluginInstance`] wraps a [`Descriptor`]/[`Processor`] pair behind the
//! object-safe [`AudioPlugin`] trait hosts talk to, and runs the lifecycle:
//!
//! ```text
//! Unprepared --prepare--> Prepared --release--> Unprepared
//!                            |  ^
//!                            +--+ prepare with a new format re-prepares
//! ```

use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::buffer::Buffer;
use crate::bus::BusLayout;
use crate::config::PluginConfig;
use crate::denormals::ScopedNoDenormals;
use crate::events::{Event, EventBody};
use crate::gui::{Editor, EditorContext};
use crate::parameter_info::ParameterInfo;
use crate::parameter_types::Parameters;
use crate::plugin::{Descriptor, HasParameters, ProcessContext, Processor};
use crate::preset::{FactoryPresets, NoPresets};
use crate::setup::{PluginSetup, ProcessSpec};
use crate::state;
use crate::types::{ParameterId, ParameterValue};

/// The interface a host drives a plugin through.
///
/// `&mut self` on the lifecycle and processing methods means prepare,
/// release and process never overlap.
pub trait AudioPlugin: Send {
    // === Lifecycle ===

    /// Prepare for processing. Re-prepares if already prepared.
    fn prepare(&mut self, sample_rate: f64, max_block_size: u32, num_channels: u32);

    /// Drop format-dependent resources. Idempotent.
    fn release(&mut self);

    /// Whether the plugin is prepared.
    fn is_prepared(&self) -> bool;

    /// Format of the last prepare, while prepared.
    fn process_spec(&self) -> Option<ProcessSpec>;

    // === Processing ===

    /// Process one block in place.
    ///
    /// `channels` holds `max(inputs, outputs)` slices; the first
    /// `main_input_channels` carry input. Events must be sorted by offset.
    ///
    /// Denormal flushing is enabled for the whole call and the previous
    /// floating-point control state restored afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the plugin is not prepared, or if an earlier prepare
    /// panicked and left the instance unusable.
    fn process_block(&mut self, channels: &mut [&mut [f32]], events: &[Event]);

    // === Editor ===

    /// Whether [`create_editor`](Self::create_editor) returns an editor.
    fn has_editor(&self) -> bool;

    /// Create an editor. The caller owns it; it does not keep the plugin
    /// alive.
    fn create_editor(&mut self) -> Option<Box<dyn Editor>>;

    // === State ===

    /// Serialize all parameter values and the current program.
    fn get_state(&self) -> Vec<u8>;

    /// Restore from [`get_state`](Self::get_state) output. Invalid data
    /// resets every parameter to its default.
    fn set_state(&mut self, data: &[u8]);

    // === Metadata ===

    /// Plugin name from the config.
    fn name(&self) -> &str;

    /// Vendor name from the config.
    fn vendor(&self) -> &str;

    /// Version string from the config.
    fn version(&self) -> &str;

    /// Whether the plugin wants incoming note and CC events.
    fn accepts_midi(&self) -> bool;

    /// Whether the plugin emits MIDI.
    fn produces_midi(&self) -> bool;

    /// Whether the plugin processes MIDI only.
    fn is_midi_effect(&self) -> bool;

    /// Tail length in seconds. Zero while unprepared.
    fn tail_length_seconds(&self) -> f64;

    /// Latency in samples. Zero while unprepared.
    fn latency_samples(&self) -> u32;

    // === Buses ===

    /// Whether the plugin can run with `layout`.
    fn is_layout_supported(&self, layout: &BusLayout) -> bool;

    /// Current main-bus layout.
    fn bus_layout(&self) -> BusLayout;

    /// Switch layout. Only accepted while unprepared and if supported.
    fn set_bus_layout(&mut self, layout: BusLayout) -> bool;

    // === Programs ===

    /// Number of programs, at least 1.
    fn num_programs(&self) -> i32;

    /// Index of the selected program.
    fn current_program(&self) -> i32;

    /// Select a program, loading its factory preset. Out-of-range indices
    /// are ignored.
    fn set_current_program(&mut self, index: i32);

    /// Name of program `index`, empty if out of range.
    fn program_name(&self, index: i32) -> String;

    /// Rename program `index` for this instance.
    fn change_program_name(&mut self, index: i32, name: &str);

    // === Parameters ===

    /// Number of host-visible parameters.
    fn parameter_count(&self) -> usize;

    /// Metadata of the parameter at `index` in declaration order.
    fn parameter_info(&self, index: usize) -> Option<ParameterInfo>;

    /// Normalized value of parameter `id`.
    fn parameter_normalized(&self, id: ParameterId) -> Option<ParameterValue>;

    /// Set parameter `id` from a normalized value. Returns `false` for
    /// unknown ids.
    fn set_parameter_normalized(&mut self, id: ParameterId, value: ParameterValue) -> bool;

    /// Current value of parameter `id` formatted with its unit.
    fn parameter_display(&self, id: ParameterId) -> Option<String>;
}

/// Lifecycle state.
enum PluginState<D: Descriptor> {
    Unprepared(D),
    Prepared {
        processor: D::Processor,
        spec: ProcessSpec,
    },
    /// Only exists while ownership moves between the two halves. If
    /// `Descriptor::prepare` or `Processor::unprepare` panics the instance
    /// stays here for good: prepare is refused and processing panics.
    Transitioning,
}

/// [`AudioPlugin`] implementation for a descriptor and its factory presets.
pub struct PluginInstance<D, Presets = NoPresets<<D as HasParameters>::Parameters>>
where
    D: Descriptor,
    Presets: FactoryPresets<Parameters = D::Parameters>,
{
    config: &'static PluginConfig,
    state: PluginState<D>,
    parameters: Arc<D::Parameters>,
    layout: BusLayout,
    current_program: i32,
    program_names: Vec<String>,
    _presets: std::marker::PhantomData<fn() -> Presets>,
}

impl<D, Presets> PluginInstance<D, Presets>
where
    D: Descriptor,
    Presets: FactoryPresets<Parameters = D::Parameters>,
{
    /// Create an unprepared instance with default parameters.
    pub fn new(config: &'static PluginConfig) -> Self {
        let descriptor = D::default();
        let parameters = Arc::clone(descriptor.parameters());
        let layout = BusLayout::from_buses(D::input_bus_info().as_ref(), D::output_bus_info().as_ref());
        if let Err(err) = layout.validate() {
            error!("{}: invalid default bus configuration: {}", config.name, err);
        }

        let program_names = if Presets::count() == 0 {
            vec![String::new()]
        } else {
            (0..Presets::count())
                .map(|i| Presets::info(i).map(|p| p.name.to_string()).unwrap_or_default())
                .collect()
        };

        Self {
            config,
            state: PluginState::Unprepared(descriptor),
            parameters,
            layout,
            current_program: 0,
            program_names,
            _presets: std::marker::PhantomData,
        }
    }

    /// The shared parameters.
    pub fn parameters(&self) -> &Arc<D::Parameters> {
        &self.parameters
    }

    /// The processor, while prepared.
    pub fn processor(&self) -> Option<&D::Processor> {
        match &self.state {
            PluginState::Prepared { processor, .. } => Some(processor),
            _ => None,
        }
    }

    /// Mutable access to the processor, while prepared.
    pub fn processor_mut(&mut self) -> Option<&mut D::Processor> {
        match &mut self.state {
            PluginState::Prepared { processor, .. } => Some(processor),
            _ => None,
        }
    }

    fn program_index(&self, index: i32) -> Option<usize> {
        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.program_names.len())
    }
}

/// Run the processor over `len` samples at `start`, in chunks no larger than
/// the prepared block size.
fn run_segment<P: Processor>(
    processor: &mut P,
    buffer: &mut Buffer<'_, '_, f32>,
    spec: &ProcessSpec,
    start: usize,
    len: usize,
) {
    let max_block = (spec.maximum_block_size as usize).max(1);
    let mut done = 0;
    while done < len {
        let n = (len - done).min(max_block);
        let mut window = buffer.window(start + done, n);
        let context = ProcessContext {
            sample_rate: spec.sample_rate,
            max_block_size: spec.maximum_block_size,
            num_samples: n,
            block_offset: start + done,
        };
        processor.process(&mut window, &context);
        done += n;
    }
}

impl<D, Presets> AudioPlugin for PluginInstance<D, Presets>
where
    D: Descriptor,
    Presets: FactoryPresets<Parameters = D::Parameters>,
{
    fn prepare(&mut self, sample_rate: f64, max_block_size: u32, num_channels: u32) {
        let spec = ProcessSpec::new(sample_rate, max_block_size, num_channels);
        if num_channels as usize != self.layout.total_channels() {
            warn!(
                "{}: prepared with {} channels, layout {} expects {}",
                self.config.name,
                num_channels,
                self.layout,
                self.layout.total_channels()
            );
        }

        let descriptor = match std::mem::replace(&mut self.state, PluginState::Transitioning) {
            PluginState::Unprepared(descriptor) => descriptor,
            PluginState::Prepared { processor, spec: old } => {
                debug!(
                    "{}: re-preparing ({} Hz, {} samples) -> ({} Hz, {} samples)",
                    self.config.name,
                    old.sample_rate,
                    old.maximum_block_size,
                    sample_rate,
                    max_block_size
                );
                processor.unprepare()
            }
            PluginState::Transitioning => {
                error!("{}: prepare called on an instance in an invalid state", self.config.name);
                return;
            }
        };

        let processor = descriptor.prepare(D::Setup::extract(&spec));
        self.state = PluginState::Prepared { processor, spec };
        debug!(
            "{}: prepared at {} Hz, max block {}, {} channels",
            self.config.name, sample_rate, max_block_size, num_channels
        );
    }

    fn release(&mut self) {
        match std::mem::replace(&mut self.state, PluginState::Transitioning) {
            PluginState::Prepared { processor, .. } => {
                self.state = PluginState::Unprepared(processor.unprepare());
                debug!("{}: released", self.config.name);
            }
            other => self.state = other,
        }
    }

    fn is_prepared(&self) -> bool {
        matches!(self.state, PluginState::Prepared { .. })
    }

    fn process_spec(&self) -> Option<ProcessSpec> {
        match &self.state {
            PluginState::Prepared { spec, .. } => Some(*spec),
            _ => None,
        }
    }

    fn process_block(&mut self, channels: &mut [&mut [f32]], events: &[Event]) {
        let (processor, spec) = match &mut self.state {
            PluginState::Prepared { processor, spec } => (processor, *spec),
            PluginState::Unprepared(_) => {
                panic!("{}: process_block called before prepare", self.config.name)
            }
            PluginState::Transitioning => panic!(
                "{}: process_block called on an instance in an invalid state after a failed prepare",
                self.config.name
            ),
        };

        let _no_denormals = ScopedNoDenormals::new();

        let num_samples = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        let num_inputs = self.layout.main_input_channels as usize;
        let mut buffer = Buffer::new(channels, num_inputs, num_samples);
        buffer.clear_unused_outputs();

        let mut position = 0;
        for event in events {
            // late offsets land at the end, out-of-order ones at the cursor
            let offset = (event.sample_offset as usize).min(num_samples).max(position);
            if offset > position {
                run_segment(processor, &mut buffer, &spec, position, offset - position);
                position = offset;
            }
            match event.body {
                EventBody::ParameterChange { id, value } => {
                    if let Some(parameter) = self.parameters.by_id(id) {
                        parameter.set_normalized(value);
                    }
                }
                _ => processor.handle_event(event),
            }
        }
        if position < num_samples {
            run_segment(processor, &mut buffer, &spec, position, num_samples - position);
        }
    }

    fn has_editor(&self) -> bool {
        D::has_editor()
    }

    fn create_editor(&mut self) -> Option<Box<dyn Editor>> {
        if !D::has_editor() {
            return None;
        }
        D::create_editor(EditorContext::new(&self.parameters, self.config))
    }

    fn get_state(&self) -> Vec<u8> {
        match state::save_state(self.config.name, self.current_program, &*self.parameters) {
            Ok(data) => data,
            Err(err) => {
                error!("{}: failed to save state: {}", self.config.name, err);
                Vec::new()
            }
        }
    }

    fn set_state(&mut self, data: &[u8]) {
        match state::load_state(self.config.name, data, &*self.parameters) {
            Ok(program) => {
                self.current_program = self.program_index(program).map_or(0, |_| program);
            }
            Err(err) => {
                warn!("{}: rejecting state, using defaults: {}", self.config.name, err);
                self.parameters.reset_to_defaults();
                self.current_program = 0;
            }
        }
        if let PluginState::Prepared { processor, .. } = &mut self.state {
            processor.reset();
        }
    }

    fn name(&self) -> &str {
        self.config.name
    }

    fn vendor(&self) -> &str {
        self.config.vendor
    }

    fn version(&self) -> &str {
        self.config.version
    }

    fn accepts_midi(&self) -> bool {
        self.config.category.accepts_midi()
    }

    fn produces_midi(&self) -> bool {
        self.config.category.produces_midi()
    }

    fn is_midi_effect(&self) -> bool {
        self.config.category.is_midi_effect()
    }

    fn tail_length_seconds(&self) -> f64 {
        self.processor().map_or(0.0, |p| p.tail_seconds())
    }

    fn latency_samples(&self) -> u32 {
        self.processor().map_or(0, |p| p.latency_samples())
    }

    fn is_layout_supported(&self, layout: &BusLayout) -> bool {
        layout.validate().is_ok() && D::is_layout_supported(layout)
    }

    fn bus_layout(&self) -> BusLayout {
        self.layout
    }

    fn set_bus_layout(&mut self, layout: BusLayout) -> bool {
        if self.is_prepared() {
            warn!(
                "{}: cannot change layout to {} while prepared",
                self.config.name, layout
            );
            return false;
        }
        if !self.is_layout_supported(&layout) {
            warn!("{}: unsupported layout {}", self.config.name, layout);
            return false;
        }
        self.layout = layout;
        debug!("{}: layout set to {}", self.config.name, layout);
        true
    }

    fn num_programs(&self) -> i32 {
        self.program_names.len() as i32
    }

    fn current_program(&self) -> i32 {
        self.current_program
    }

    fn set_current_program(&mut self, index: i32) {
        let Some(slot) = self.program_index(index) else {
            warn!("{}: program {} out of range", self.config.name, index);
            return;
        };
        self.current_program = index;
        if Presets::apply(slot, &self.parameters) {
            info!("{}: loaded program {:?}", self.config.name, self.program_names[slot]);
        }
    }

    fn program_name(&self, index: i32) -> String {
        self.program_index(index)
            .map(|i| self.program_names[i].clone())
            .unwrap_or_default()
    }

    fn change_program_name(&mut self, index: i32, name: &str) {
        if let Some(i) = self.program_index(index) {
            self.program_names[i] = name.to_string();
        }
    }

    fn parameter_count(&self) -> usize {
        self.parameters.count()
    }

    fn parameter_info(&self, index: usize) -> Option<ParameterInfo> {
        self.parameters.by_index(index).map(|p| p.info().clone())
    }

    fn parameter_normalized(&self, id: ParameterId) -> Option<ParameterValue> {
        self.parameters.by_id(id).map(|p| p.get_normalized())
    }

    fn set_parameter_normalized(&mut self, id: ParameterId, value: ParameterValue) -> bool {
        match self.parameters.by_id(id) {
            Some(parameter) => {
                parameter.set_normalized(value);
                true
            }
            None => false,
        }
    }

    fn parameter_display(&self, id: ParameterId) -> Option<String> {
        let parameter = self.parameters.by_id(id)?;
        let text = parameter.display();
        Some(match parameter.units() {
            "" => text,
            units => format!("{} {}", text, units),
        })
    }
}

/// Define the plugin's entry point.
///
/// Expands to `pub fn create_plugin() -> Box<dyn AudioPlugin>` building a
/// [`PluginInstance`] for the descriptor, optionally with factory presets.
///
/// ```ignore
/// pub static CONFIG: PluginConfig = PluginConfig::new("My Plugin");
/// export_plugin!(CONFIG, MyDescriptor, MyPresets);
/// ```
#[macro_export]
macro_rules! export_plugin {
    ($config:expr, $descriptor:ty $(,)?) => {
        $crate::export_plugin!(
            $config,
            $descriptor,
            $crate::NoPresets<<$descriptor as $crate::HasParameters>::Parameters>
        );
    };
    ($config:expr, $descriptor:ty, $presets:ty $(,)?) => {
        /// Create a new, unprepared instance of this plugin.
        pub fn create_plugin() -> ::std::boxed::Box<dyn $crate::AudioPlugin> {
            ::std::boxed::Box::new($crate::PluginInstance::<$descriptor, $presets>::new(&$config))
        }
    };
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;
    use crate::denormals::flush_to_zero_enabled;
    use crate::parameter_types::{FloatParameter, ParameterRef};
    use crate::preset::{PresetInfo, PresetValue};
    use crate::setup::SampleRate;

    static CONFIG: PluginConfig = PluginConfig::new("Test").with_vendor("Acme");

    const LEVEL: ParameterId = 10;

    struct TestParameters {
        level: FloatParameter,
    }

    impl Default for TestParameters {
        fn default() -> Self {
            Self {
                level: FloatParameter::new("Level", 1.0, 0.0..=2.0)
                    .with_id(LEVEL)
                    .with_string_id("level"),
            }
        }
    }

    impl Parameters for TestParameters {
        fn count(&self) -> usize {
            1
        }

        fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParameterRef> + '_> {
            Box::new(std::iter::once(&self.level as &dyn ParameterRef))
        }

        fn by_id(&self, id: ParameterId) -> Option<&dyn ParameterRef> {
            (id == LEVEL).then_some(&self.level as &dyn ParameterRef)
        }
    }

    #[derive(Default)]
    struct TestDescriptor {
        parameters: Arc<TestParameters>,
    }

    impl HasParameters for TestDescriptor {
        type Parameters = TestParameters;

        fn parameters(&self) -> &Arc<TestParameters> {
            &self.parameters
        }
    }

    impl Descriptor for TestDescriptor {
        type Setup = SampleRate;
        type Processor = TestProcessor;

        fn prepare(self, setup: SampleRate) -> TestProcessor {
            assert!(setup.hz() > 0.0, "sample rate must be positive");
            TestProcessor {
                parameters: self.parameters,
                sample_rate: setup.hz(),
                calls: Vec::new(),
                flushing: Vec::new(),
                notes: 0,
                resets: 0,
            }
        }
    }

    /// Multiplies by the level parameter and records each call.
    struct TestProcessor {
        parameters: Arc<TestParameters>,
        sample_rate: f64,
        calls: Vec<(usize, usize)>,
        /// Denormal flushing state seen by each process call.
        flushing: Vec<bool>,
        notes: usize,
        resets: usize,
    }

    impl HasParameters for TestProcessor {
        type Parameters = TestParameters;

        fn parameters(&self) -> &Arc<TestParameters> {
            &self.parameters
        }
    }

    impl Processor for TestProcessor {
        type Descriptor = TestDescriptor;

        fn unprepare(self) -> TestDescriptor {
            TestDescriptor {
                parameters: self.parameters,
            }
        }

        fn process(&mut self, buffer: &mut Buffer<'_, '_, f32>, context: &ProcessContext) {
            self.calls.push((context.block_offset, context.num_samples));
            self.flushing.push(flush_to_zero_enabled());
            buffer.apply_gain(self.parameters.level.get() as f32);
        }

        fn handle_event(&mut self, _event: &Event) {
            self.notes += 1;
        }

        fn reset(&mut self) {
            self.resets += 1;
        }

        fn tail_seconds(&self) -> f64 {
            0.5
        }
    }

    struct TestPresets;

    static HALF: [PresetValue; 1] = [PresetValue {
        id: LEVEL,
        plain_value: 0.5,
    }];

    impl FactoryPresets for TestPresets {
        type Parameters = TestParameters;

        fn count() -> usize {
            2
        }

        fn info(index: usize) -> Option<PresetInfo> {
            match index {
                0 => Some(PresetInfo { name: "Full" }),
                1 => Some(PresetInfo { name: "Half" }),
                _ => None,
            }
        }

        fn values(index: usize) -> &'static [PresetValue] {
            match index {
                1 => &HALF,
                _ => &[],
            }
        }
    }

    fn instance() -> PluginInstance<TestDescriptor> {
        PluginInstance::new(&CONFIG)
    }

    #[test]
    fn test_lifecycle() {
        let mut plugin = instance();
        assert!(!plugin.is_prepared());
        assert_eq!(plugin.tail_length_seconds(), 0.0);

        plugin.prepare(48000.0, 64, 2);
        assert!(plugin.is_prepared());
        assert_eq!(plugin.process_spec(), Some(ProcessSpec::new(48000.0, 64, 2)));
        assert_eq!(plugin.processor().map(|p| p.sample_rate), Some(48000.0));
        assert_eq!(plugin.tail_length_seconds(), 0.5);

        plugin.prepare(96000.0, 128, 2);
        assert_eq!(plugin.processor().map(|p| p.sample_rate), Some(96000.0));

        plugin.release();
        plugin.release();
        assert!(!plugin.is_prepared());
        assert!(plugin.process_spec().is_none());
    }

    #[test]
    fn test_parameters_survive_reprepare() {
        let mut plugin = instance();
        plugin.parameters().level.set(1.5);
        plugin.prepare(44100.0, 32, 2);
        plugin.release();
        plugin.prepare(48000.0, 32, 2);
        assert_eq!(plugin.parameters().level.get(), 1.5);
    }

    #[test]
    #[should_panic(expected = "before prepare")]
    fn test_process_unprepared_panics() {
        let mut plugin = instance();
        let mut left = [0.0f32; 4];
        let mut channels: [&mut [f32]; 1] = [&mut left];
        plugin.process_block(&mut channels, &[]);
    }

    #[test]
    #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
    fn test_denormals_flushed_during_process_only() {
        let mut plugin = instance();
        plugin.prepare(44100.0, 4, 1);
        let before = flush_to_zero_enabled();

        let mut data = [1.0f32; 10];
        let events = [Event::parameter_change(5, LEVEL, 0.5)];
        {
            let mut channels: [&mut [f32]; 1] = [&mut data];
            plugin.process_block(&mut channels, &events);
        }

        let flushing = plugin.processor().map(|p| p.flushing.clone()).unwrap_or_default();
        assert!(!flushing.is_empty());
        assert!(flushing.iter().all(|&on| on));
        assert_eq!(flush_to_zero_enabled(), before);
    }

    #[test]
    fn test_failed_prepare_leaves_instance_unusable() {
        let mut plugin = instance();
        let result = catch_unwind(AssertUnwindSafe(|| plugin.prepare(-1.0, 64, 2)));
        assert!(result.is_err());
        assert!(!plugin.is_prepared());

        plugin.prepare(44100.0, 64, 2);
        assert!(!plugin.is_prepared());

        let mut data = [1.0f32; 4];
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut channels: [&mut [f32]; 1] = [&mut data];
            plugin.process_block(&mut channels, &[]);
        }));
        let message = result
            .err()
            .and_then(|e| e.downcast::<String>().ok())
            .map(|s| *s)
            .unwrap_or_default();
        assert!(message.contains("invalid state"), "{}", message);
    }

    #[test]
    fn test_blocks_are_chunked() {
        let mut plugin = instance();
        plugin.prepare(44100.0, 4, 2);
        let mut left = [1.0f32; 10];
        let mut right = [1.0f32; 10];
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        plugin.process_block(&mut channels, &[]);
        let calls = &plugin.processor().map(|p| p.calls.clone()).unwrap_or_default();
        assert_eq!(calls, &[(0, 4), (4, 4), (8, 2)]);
    }

    #[test]
    fn test_parameter_changes_are_sample_accurate() {
        let mut plugin = instance();
        plugin.prepare(44100.0, 64, 1);
        let mut data = [1.0f32; 8];
        let events = [
            Event::parameter_change(3, LEVEL, 0.0),
            Event::note_on(5, 0, 60, 1.0),
            Event::parameter_change(6, LEVEL, 1.0),
        ];
        {
            let mut channels: [&mut [f32]; 1] = [&mut data];
            plugin.process_block(&mut channels, &events);
        }
        assert_eq!(data, [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 2.0, 2.0]);
        let processor = plugin.processor().unwrap();
        assert_eq!(processor.calls, vec![(0, 3), (3, 2), (5, 1), (6, 2)]);
        assert_eq!(processor.notes, 1);
    }

    #[test]
    fn test_late_and_unordered_events() {
        let mut plugin = instance();
        plugin.prepare(44100.0, 64, 1);
        let mut data = [1.0f32; 4];
        let events = [
            Event::parameter_change(2, LEVEL, 1.0),
            Event::parameter_change(1, LEVEL, 0.0),
            Event::parameter_change(100, LEVEL, 0.25),
        ];
        {
            let mut channels: [&mut [f32]; 1] = [&mut data];
            plugin.process_block(&mut channels, &events);
        }
        // the out-of-order change applies at sample 2, the late one after the block
        assert_eq!(data, [1.0, 1.0, 0.0, 0.0]);
        assert_eq!(plugin.parameters().level.get(), 0.5);
    }

    #[test]
    fn test_output_only_channels_are_cleared() {
        let mut plugin = instance();
        assert!(plugin.set_bus_layout(BusLayout::new(1, 2)));
        plugin.prepare(44100.0, 64, 2);
        let mut input = [1.0f32; 4];
        let mut stale = [9.0f32; 4];
        {
            let mut channels: [&mut [f32]; 2] = [&mut input, &mut stale];
            plugin.process_block(&mut channels, &[]);
        }
        assert_eq!(input, [1.0; 4]);
        assert_eq!(stale, [0.0; 4]);
    }

    #[test]
    fn test_layouts() {
        let mut plugin = instance();
        assert_eq!(plugin.bus_layout(), BusLayout::STEREO);
        assert!(plugin.is_layout_supported(&BusLayout::MONO));
        assert!(!plugin.is_layout_supported(&BusLayout::new(2, 1)));
        assert!(!plugin.is_layout_supported(&BusLayout::new(6, 6)));
        assert!(!plugin.set_bus_layout(BusLayout::new(2, 1)));

        plugin.prepare(44100.0, 64, 2);
        assert!(!plugin.set_bus_layout(BusLayout::MONO));
        plugin.release();
        assert!(plugin.set_bus_layout(BusLayout::MONO));
        assert_eq!(plugin.bus_layout(), BusLayout::MONO);
    }

    #[test]
    fn test_state_round_trip_resets_processor() {
        let mut plugin = instance();
        plugin.prepare(44100.0, 64, 2);
        plugin.parameters().level.set(0.3);
        let data = plugin.get_state();

        plugin.parameters().level.set(2.0);
        plugin.set_state(&data);
        assert_eq!(plugin.parameters().level.get(), 0.3);
        assert_eq!(plugin.processor().map(|p| p.resets), Some(1));
    }

    #[test]
    fn test_garbage_state_gives_defaults() {
        let mut plugin = instance();
        plugin.parameters().level.set(0.3);
        plugin.set_state(b"not json at all");
        assert_eq!(plugin.parameters().level.get(), 1.0);
        plugin.parameters().level.set(0.3);
        plugin.set_state(&[]);
        assert_eq!(plugin.parameters().level.get(), 1.0);
    }

    #[test]
    fn test_metadata() {
        let plugin = instance();
        assert_eq!(plugin.name(), "Test");
        assert_eq!(plugin.vendor(), "Acme");
        assert!(!plugin.accepts_midi());
        assert!(!plugin.produces_midi());
        assert!(!plugin.is_midi_effect());
        assert_eq!(plugin.latency_samples(), 0);
        assert!(!plugin.has_editor());
    }

    #[test]
    fn test_programs_without_presets() {
        let mut plugin = instance();
        assert_eq!(plugin.num_programs(), 1);
        assert_eq!(plugin.current_program(), 0);
        assert_eq!(plugin.program_name(0), "");
        plugin.set_current_program(3);
        assert_eq!(plugin.current_program(), 0);
        plugin.change_program_name(0, "Mine");
        assert_eq!(plugin.program_name(0), "Mine");
        assert_eq!(plugin.program_name(-1), "");
    }

    #[test]
    fn test_programs_from_presets() {
        let mut plugin: PluginInstance<TestDescriptor, TestPresets> = PluginInstance::new(&CONFIG);
        assert_eq!(plugin.num_programs(), 2);
        assert_eq!(plugin.program_name(1), "Half");
        plugin.set_current_program(1);
        assert_eq!(plugin.current_program(), 1);
        assert_eq!(plugin.parameters().level.get(), 0.5);

        let data = plugin.get_state();
        let mut other: PluginInstance<TestDescriptor, TestPresets> = PluginInstance::new(&CONFIG);
        other.set_state(&data);
        assert_eq!(other.current_program(), 1);
    }

    #[test]
    fn test_host_parameter_access() {
        let mut plugin = instance();
        assert_eq!(plugin.parameter_count(), 1);
        assert_eq!(plugin.parameter_info(0).map(|i| i.string_id), Some("level"));
        assert!(plugin.parameter_info(1).is_none());
        assert!(plugin.set_parameter_normalized(LEVEL, 0.25));
        assert_eq!(plugin.parameter_normalized(LEVEL), Some(0.25));
        assert_eq!(plugin.parameter_display(LEVEL).as_deref(), Some("0.50"));
        assert!(!plugin.set_parameter_normalized(99, 0.5));
        assert!(plugin.parameter_normalized(99).is_none());
    }

    #[test]
    fn test_export_macro() {
        mod exported {
            use super::{TestDescriptor, CONFIG};
            crate::export_plugin!(CONFIG, TestDescriptor);
        }
        let plugin = exported::create_plugin();
        assert_eq!(plugin.name(), "Test");
        assert!(!plugin.is_prepared());
    }
}
