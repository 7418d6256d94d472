//! Mapping between plain parameter values and the normalized `0.0..=1.0`
//! range hosts automate.

use std::ops::RangeInclusive;

/// Converts plain values to normalized values and back.
///
/// `normalize` clamps its input to the range, `denormalize` clamps its input
/// to `0.0..=1.0`, so round trips always stay in range.
pub trait RangeMapper: Send + Sync {
    /// Plain → normalized.
    fn normalize(&self, plain: f64) -> f64;

    /// Normalized → plain.
    fn denormalize(&self, normalized: f64) -> f64;

    /// `(min, max)` in plain units.
    fn range(&self) -> (f64, f64);
}

/// Linear mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMapper {
    min: f64,
    max: f64,
}

impl LinearMapper {
    /// Create a linear mapper over `range`.
    pub fn new(range: RangeInclusive<f64>) -> Self {
        Self {
            min: *range.start(),
            max: *range.end(),
        }
    }
}

impl RangeMapper for LinearMapper {
    fn normalize(&self, plain: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((plain - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    fn denormalize(&self, normalized: f64) -> f64 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Logarithmic mapping for frequencies and other strictly positive ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogMapper {
    min: f64,
    max: f64,
}

impl LogMapper {
    /// Create a log mapper. Both ends must be positive.
    pub fn new(range: RangeInclusive<f64>) -> Self {
        let min = range.start().max(f64::MIN_POSITIVE);
        let max = range.end().max(min);
        Self { min, max }
    }
}

impl RangeMapper for LogMapper {
    fn normalize(&self, plain: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        let plain = plain.clamp(self.min, self.max);
        ((plain / self.min).ln() / (self.max / self.min).ln()).clamp(0.0, 1.0)
    }

    fn denormalize(&self, normalized: f64) -> f64 {
        self.min * (self.max / self.min).powf(normalized.clamp(0.0, 1.0))
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let m = LinearMapper::new(-60.0..=12.0);
        assert_eq!(m.normalize(-60.0), 0.0);
        assert_eq!(m.normalize(12.0), 1.0);
        assert!((m.normalize(0.0) - 60.0 / 72.0).abs() < 1e-12);
        assert_eq!(m.denormalize(0.0), -60.0);
        assert_eq!(m.denormalize(1.0), 12.0);
        assert_eq!(m.normalize(100.0), 1.0);
        assert_eq!(m.denormalize(-1.0), -60.0);
        assert_eq!(m.range(), (-60.0, 12.0));
    }

    #[test]
    fn test_linear_degenerate() {
        let m = LinearMapper::new(1.0..=1.0);
        assert_eq!(m.normalize(1.0), 0.0);
        assert_eq!(m.denormalize(0.7), 1.0);
    }

    #[test]
    fn test_log() {
        let m = LogMapper::new(20.0..=20000.0);
        assert!((m.normalize(20.0)).abs() < 1e-12);
        assert!((m.normalize(20000.0) - 1.0).abs() < 1e-12);
        // geometric midpoint
        assert!((m.denormalize(0.5) - 632.455_532).abs() < 1e-3);
        let x = 1234.5;
        assert!((m.denormalize(m.normalize(x)) - x).abs() < 1e-9);
    }
}
