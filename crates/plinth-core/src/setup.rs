//! Processing format and the setup values a plugin asks for at prepare time.
//!
//! Use these types with [`Descriptor::Setup`](crate::Descriptor::Setup) to
//! declare what the processor needs:
//!
//! | Type | Value | Use Case |
//! |------|-------|----------|
//! | `()` | - | Stateless plugins |
//! | [`SampleRate`] | `f64` | Time-based DSP (smoothing, delay, filter) |
//! | [`MaxBufferSize`] | `usize` | Scratch buffers, lookahead |
//! | [`MainOutputChannels`] | `u32` | Per-channel state |
//! | [`ProcessSpec`] | all of the above | Chains that prepare every stage |
//!
//! Request several values with a tuple:
//!
//! ```ignore
//! type Setup = (SampleRate, MaxBufferSize);
//! ```

/// Audio format a processor is prepared for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Largest block the host will pass to a single process call.
    pub maximum_block_size: u32,
    /// Number of channels in the buffers passed to process.
    pub num_channels: u32,
}

impl ProcessSpec {
    /// Create a spec.
    pub const fn new(sample_rate: f64, maximum_block_size: u32, num_channels: u32) -> Self {
        Self {
            sample_rate,
            maximum_block_size,
            num_channels,
        }
    }
}

/// Values a plugin can request from [`ProcessSpec`].
pub trait PluginSetup: Sized {
    /// Extract this value from a [`ProcessSpec`].
    fn extract(spec: &ProcessSpec) -> Self;
}

impl PluginSetup for () {
    fn extract(_: &ProcessSpec) -> Self {}
}

impl PluginSetup for ProcessSpec {
    fn extract(spec: &ProcessSpec) -> Self {
        *spec
    }
}

/// Sample rate in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRate(pub f64);

impl SampleRate {
    /// Sample rate in Hz.
    pub const fn hz(&self) -> f64 {
        self.0
    }
}

impl PluginSetup for SampleRate {
    fn extract(spec: &ProcessSpec) -> Self {
        SampleRate(spec.sample_rate)
    }
}

/// Largest block per process call, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxBufferSize(pub usize);

impl PluginSetup for MaxBufferSize {
    fn extract(spec: &ProcessSpec) -> Self {
        MaxBufferSize(spec.maximum_block_size as usize)
    }
}

/// Channel count of the process buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainOutputChannels(pub u32);

impl PluginSetup for MainOutputChannels {
    fn extract(spec: &ProcessSpec) -> Self {
        MainOutputChannels(spec.num_channels)
    }
}

macro_rules! impl_setup_tuple {
    ($($name:ident),+) => {
        impl<$($name: PluginSetup),+> PluginSetup for ($($name,)+) {
            fn extract(spec: &ProcessSpec) -> Self {
                ($($name::extract(spec),)+)
            }
        }
    };
}

impl_setup_tuple!(A);
impl_setup_tuple!(A, B);
impl_setup_tuple!(A, B, C);
impl_setup_tuple!(A, B, C, D);
