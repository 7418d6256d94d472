//! Value smoothing to avoid zipper noise on parameter changes.
//!
//! ```ignore
//! let mut smoother = Smoother::new(SmoothingStyle::Linear(50.0));
//! smoother.set_sample_rate(48000.0);
//! smoother.reset(1.0);
//! smoother.set_target(0.5);
//! let gain = smoother.next(); // moves toward 0.5 over 50 ms
//! ```

/// Ramp shape and duration. Durations are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingStyle {
    /// Jump to the target immediately.
    None,
    /// Constant step per sample; reaches the target exactly after the duration.
    Linear(f64),
    /// One-pole approach; within -60 dB of the distance after the duration,
    /// then snaps to the target.
    Exponential(f64),
}

impl SmoothingStyle {
    fn duration_ms(&self) -> f64 {
        match self {
            SmoothingStyle::None => 0.0,
            SmoothingStyle::Linear(ms) | SmoothingStyle::Exponential(ms) => ms.max(0.0),
        }
    }
}

/// Per-sample value smoother.
///
/// `Copy` so a processor can run a scratch copy over one channel and commit
/// the state after the last channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoother {
    style: SmoothingStyle,
    sample_rate: f64,
    current: f64,
    target: f64,
    /// Linear increment or exponential coefficient.
    step: f64,
    steps_left: u32,
}

impl Smoother {
    /// Create a smoother at 0.0. Call [`set_sample_rate`](Self::set_sample_rate)
    /// before use.
    pub const fn new(style: SmoothingStyle) -> Self {
        Self {
            style,
            sample_rate: 44100.0,
            current: 0.0,
            target: 0.0,
            step: 0.0,
            steps_left: 0,
        }
    }

    /// Change the ramp style. Takes effect on the next target change.
    pub fn set_style(&mut self, style: SmoothingStyle) {
        self.style = style;
    }

    /// Current style.
    pub fn style(&self) -> SmoothingStyle {
        self.style
    }

    /// Set the sample rate and snap to the current target.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.reset(self.target);
    }

    /// Jump to `value` with no ramp.
    pub fn reset(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.steps_left = 0;
    }

    /// Start a ramp from the current value to `target`.
    ///
    /// Setting the target it already ramps to is a no-op, so this can be
    /// called once per block with the latest parameter value.
    pub fn set_target(&mut self, target: f64) {
        if target == self.target {
            return;
        }
        self.target = target;

        let steps = (self.style.duration_ms() * 0.001 * self.sample_rate).round();
        if steps < 1.0 {
            self.reset(target);
            return;
        }
        self.steps_left = steps.min(u32::MAX as f64) as u32;
        self.step = match self.style {
            SmoothingStyle::None => 0.0,
            SmoothingStyle::Linear(_) => (target - self.current) / steps,
            SmoothingStyle::Exponential(_) => 0.001_f64.powf(1.0 / steps),
        };
    }

    /// Advance one sample and return the new value.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        if self.steps_left == 0 {
            return self.current;
        }
        self.steps_left -= 1;
        if self.steps_left == 0 {
            self.current = self.target;
        } else {
            match self.style {
                SmoothingStyle::Linear(_) => self.current += self.step,
                SmoothingStyle::Exponential(_) => {
                    self.current = self.target + (self.current - self.target) * self.step
                }
                SmoothingStyle::None => self.current = self.target,
            }
        }
        self.current
    }

    /// Advance `samples` samples without producing output.
    pub fn skip(&mut self, samples: usize) {
        if self.steps_left == 0 {
            return;
        }
        match self.style {
            SmoothingStyle::Linear(_) if (samples as u64) < self.steps_left as u64 => {
                self.current += self.step * samples as f64;
                self.steps_left -= samples as u32;
            }
            _ => {
                for _ in 0..samples.min(self.steps_left as usize) {
                    self.next();
                }
            }
        }
    }

    /// Value returned by the last [`next`](Self::next).
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Value the ramp is heading to.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether a ramp is in progress.
    pub fn is_smoothing(&self) -> bool {
        self.steps_left > 0
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(SmoothingStyle::Linear(50.0))
    }
}
