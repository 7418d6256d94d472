//! Signal chain building blocks.
//!
//! A [`ProcessorChain`] runs a tuple of [`Stage`]s in order over the same
//! buffer. Stages are prepared with the [`ProcessSpec`] every time the
//! processor is (re)prepared.
//!
//! ```ignore
//! let mut chain = ProcessorChain::new((Gain::new(),));
//! chain.prepare(&ProcessSpec::new(48000.0, 512, 2));
//! chain.stages_mut().0.set_gain_decibels(-6.0);
//! chain.process(&mut buffer);
//! ```

use crate::buffer::Buffer;
use crate::parameter_types::{db_to_linear, linear_to_db};
use crate::sample::Sample;
use crate::setup::ProcessSpec;
use crate::smoothing::{Smoother, SmoothingStyle};

/// One DSP element of a signal chain.
pub trait Stage<S: Sample = f32>: Send {
    /// Configure for a new format. May allocate.
    fn prepare(&mut self, spec: &ProcessSpec);

    /// Process the buffer in place. Must not allocate or block.
    fn process(&mut self, buffer: &mut Buffer<'_, '_, S>);

    /// Clear internal state (ramps, delay lines) without changing settings.
    fn reset(&mut self);

    /// Latency this stage adds, in samples.
    fn latency_samples(&self) -> u32 {
        0
    }
}

/// Ordered chain of stages stored as a tuple.
#[derive(Debug, Clone, Default)]
pub struct ProcessorChain<T> {
    stages: T,
}

impl<T> ProcessorChain<T> {
    /// Wrap a tuple of stages.
    pub const fn new(stages: T) -> Self {
        Self { stages }
    }

    /// The stages, for reading settings by position (`chain.stages().0`).
    pub fn stages(&self) -> &T {
        &self.stages
    }

    /// The stages, for changing settings by position.
    pub fn stages_mut(&mut self) -> &mut T {
        &mut self.stages
    }
}

macro_rules! impl_chain_tuple {
    ($($stage:ident $idx:tt),+) => {
        impl<S: Sample, $($stage: Stage<S>),+> Stage<S> for ProcessorChain<($($stage,)+)> {
            fn prepare(&mut self, spec: &ProcessSpec) {
                $(self.stages.$idx.prepare(spec);)+
            }

            fn process(&mut self, buffer: &mut Buffer<'_, '_, S>) {
                $(self.stages.$idx.process(buffer);)+
            }

            fn reset(&mut self) {
                $(self.stages.$idx.reset();)+
            }

            fn latency_samples(&self) -> u32 {
                0 $(+ self.stages.$idx.latency_samples())+
            }
        }
    };
}

impl_chain_tuple!(A 0);
impl_chain_tuple!(A 0, B 1);
impl_chain_tuple!(A 0, B 1, C 2);
impl_chain_tuple!(A 0, B 1, C 2, D 3);

/// Default gain ramp length.
pub const DEFAULT_GAIN_RAMP_SECONDS: f64 = 0.05;

/// Linear gain with a linear ramp between settings.
///
/// Unity gain leaves samples bit-exact.
#[derive(Debug, Clone)]
pub struct Gain {
    smoother: Smoother,
    ramp_seconds: f64,
}

impl Gain {
    /// Unity gain with the default ramp.
    pub fn new() -> Self {
        let mut smoother = Smoother::new(SmoothingStyle::Linear(DEFAULT_GAIN_RAMP_SECONDS * 1000.0));
        smoother.reset(1.0);
        Self {
            smoother,
            ramp_seconds: DEFAULT_GAIN_RAMP_SECONDS,
        }
    }

    /// Set the target gain as a linear factor.
    pub fn set_gain_linear(&mut self, gain: f64) {
        self.smoother.set_target(gain);
    }

    /// Set the target gain in decibels.
    pub fn set_gain_decibels(&mut self, db: f64) {
        self.set_gain_linear(db_to_linear(db));
    }

    /// Target gain as a linear factor.
    pub fn gain_linear(&self) -> f64 {
        self.smoother.target()
    }

    /// Target gain in decibels.
    pub fn gain_decibels(&self) -> f64 {
        linear_to_db(self.gain_linear())
    }

    /// Set the ramp length. Zero disables ramping.
    pub fn set_ramp_duration_seconds(&mut self, seconds: f64) {
        self.ramp_seconds = seconds.max(0.0);
        self.smoother
            .set_style(SmoothingStyle::Linear(self.ramp_seconds * 1000.0));
    }

    /// Ramp length in seconds.
    pub fn ramp_duration_seconds(&self) -> f64 {
        self.ramp_seconds
    }

    /// Whether a ramp is in progress.
    pub fn is_smoothing(&self) -> bool {
        self.smoother.is_smoothing()
    }
}

impl Default for Gain {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sample> Stage<S> for Gain {
    fn prepare(&mut self, spec: &ProcessSpec) {
        self.smoother.set_sample_rate(spec.sample_rate);
    }

    fn process(&mut self, buffer: &mut Buffer<'_, '_, S>) {
        if !self.smoother.is_smoothing() {
            let gain = self.smoother.target();
            if gain != 1.0 {
                buffer.apply_gain(S::from_f64(gain));
            }
            return;
        }

        if buffer.num_channels() == 0 {
            self.smoother.skip(buffer.num_samples());
            return;
        }

        // every channel follows the same ramp
        let start = self.smoother;
        let mut end = start;
        for channel in buffer.channels_mut() {
            let mut ramp = start;
            for sample in channel.iter_mut() {
                *sample *= S::from_f64(ramp.next());
            }
            end = ramp;
        }
        self.smoother = end;
    }

    fn reset(&mut self) {
        self.smoother.reset(self.smoother.target());
    }
}
