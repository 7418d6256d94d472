//! In-place audio buffer view.
//!
//! [`Buffer`] wraps the channel slices the host hands to `process_block` for
//! the duration of one callback. Processing is in place: channels
//! `0..num_input_channels` hold input on entry, every channel holds output on
//! exit. Channels at or beyond the input count are output-only and must not be
//! read as input.
//!
//! A buffer can be narrowed to a sub-range of samples with [`Buffer::window`]
//! without allocating, which is how the instance layer splits blocks at event
//! offsets.

use crate::sample::Sample;

/// Mutable view over `channels × samples` of host audio.
///
/// `'a` is the borrow of the channel table, `'c` the borrow of the sample
/// memory. Keeping them separate allows windows to reborrow the table.
pub struct Buffer<'a, 'c, S: Sample = f32> {
    channels: &'a mut [&'c mut [S]],
    start: usize,
    num_samples: usize,
    num_input_channels: usize,
}

impl<'a, 'c, S: Sample> Buffer<'a, 'c, S> {
    /// Create a buffer over `num_samples` samples of each channel.
    ///
    /// `num_input_channels` is clamped to the number of channels.
    ///
    /// # Panics
    ///
    /// Panics if any channel is shorter than `num_samples`.
    pub fn new(
        channels: &'a mut [&'c mut [S]],
        num_input_channels: usize,
        num_samples: usize,
    ) -> Self {
        assert!(
            channels.iter().all(|c| c.len() >= num_samples),
            "every channel must hold at least {} samples",
            num_samples
        );
        let num_input_channels = num_input_channels.min(channels.len());
        Self {
            channels,
            start: 0,
            num_samples,
            num_input_channels,
        }
    }

    /// Create a buffer spanning the shortest channel, treating every channel
    /// as both input and output.
    pub fn from_channels(channels: &'a mut [&'c mut [S]]) -> Self {
        let num_samples = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        let num_input_channels = channels.len();
        Self {
            channels,
            start: 0,
            num_samples,
            num_input_channels,
        }
    }

    /// Total number of channels (inputs and output-only channels).
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of channels that carry valid input.
    #[inline]
    pub fn num_input_channels(&self) -> usize {
        self.num_input_channels
    }

    /// Number of output channels (every channel is written).
    #[inline]
    pub fn num_output_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel in this view.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Whether the view has no samples or no channels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_samples == 0 || self.channels.is_empty()
    }

    /// Samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    #[inline]
    pub fn channel(&self, index: usize) -> &[S] {
        &self.channels[index][self.start..self.start + self.num_samples]
    }

    /// Mutable samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [S] {
        let end = self.start + self.num_samples;
        &mut self.channels[index][self.start..end]
    }

    /// Iterate over all channels mutably.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [S]> + use<'_, 'c, S> {
        let (start, end) = (self.start, self.start + self.num_samples);
        self.channels.iter_mut().map(move |c| &mut c[start..end])
    }

    /// Zero one channel.
    #[inline]
    pub fn clear_channel(&mut self, index: usize) {
        self.channel_mut(index).fill(S::ZERO);
    }

    /// Zero every channel.
    pub fn clear(&mut self) {
        for channel in self.channels_mut() {
            channel.fill(S::ZERO);
        }
    }

    /// Zero the output-only channels (index >= `num_input_channels`).
    ///
    /// Hosts may hand over stale memory for these channels, so they must be
    /// cleared before any stage adds into them.
    pub fn clear_unused_outputs(&mut self) {
        for index in self.num_input_channels..self.channels.len() {
            self.clear_channel(index);
        }
    }

    /// Multiply every channel by a constant.
    pub fn apply_gain(&mut self, gain: S) {
        for channel in self.channels_mut() {
            for sample in channel.iter_mut() {
                *sample *= gain;
            }
        }
    }

    /// Narrow the view to `len` samples starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the window extends past the end of this view.
    pub fn window(&mut self, offset: usize, len: usize) -> Buffer<'_, 'c, S> {
        assert!(
            offset + len <= self.num_samples,
            "window {}..{} exceeds buffer of {} samples",
            offset,
            offset + len,
            self.num_samples
        );
        Buffer {
            channels: &mut *self.channels,
            start: self.start + offset,
            num_samples: len,
            num_input_channels: self.num_input_channels,
        }
    }
}
