//! Parameter types with encapsulated atomic storage.
//!
//! [`FloatParameter`] and [`BoolParameter`] own their value as an atomic, so a
//! parameter collection can be shared as `Arc<P>` between the audio thread,
//! the host and an editor without locks. Use `#[derive(Parameters)]` to
//! implement [`Parameters`] for a struct of them:
//!
//! ```ignore
//! use plinth::prelude::*;
//!
//! #[derive(Parameters)]
//! pub struct MyParameters {
//!     #[parameter(id = "gain", name = "Gain", default = 0.0, range = -60.0..=12.0, kind = "db")]
//!     pub gain: FloatParameter,
//! }
//! ```

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::parameter_format::Formatter;
use crate::parameter_info::{ParameterFlags, ParameterInfo, ParameterUnit};
use crate::parameter_range::{LinearMapper, LogMapper, RangeMapper};
use crate::types::{ParameterId, ParameterValue};

/// Normalized parameter values keyed by string id.
///
/// This is the shape saved into state chunks and presets.
pub type ParameterSnapshot = BTreeMap<String, ParameterValue>;

// =============================================================================
// ParameterRef Trait - Type-erased parameter access
// =============================================================================

/// Type-erased access to a single parameter.
///
/// All implementations are `Send + Sync` so the same parameter can be read
/// from the audio thread and written from host or UI threads.
pub trait ParameterRef: Send + Sync {
    /// Get the parameter's full metadata.
    fn info(&self) -> &ParameterInfo;

    /// Get the parameter's unique ID.
    fn id(&self) -> ParameterId {
        self.info().id
    }

    /// Get the string id used in saved state.
    fn string_id(&self) -> &'static str {
        self.info().string_id
    }

    /// Get the parameter's display name.
    fn name(&self) -> &'static str {
        self.info().name
    }

    /// Get the parameter's unit string (e.g., "dB", "Hz", "ms").
    fn units(&self) -> &'static str {
        self.info().units
    }

    /// Get the parameter flags.
    fn flags(&self) -> &ParameterFlags {
        &self.info().flags
    }

    /// Get the default normalized value.
    fn default_normalized(&self) -> ParameterValue {
        self.info().default_normalized
    }

    /// Get the current normalized value (0.0-1.0).
    ///
    /// Lock-free; safe to call from the audio thread.
    fn get_normalized(&self) -> ParameterValue;

    /// Set the normalized value.
    ///
    /// Lock-free. Values are clamped to `[0.0, 1.0]`; NaN resets the
    /// parameter to its default.
    fn set_normalized(&self, value: ParameterValue);

    /// Get the current plain value in natural units.
    fn get_plain(&self) -> ParameterValue {
        self.normalized_to_plain(self.get_normalized())
    }

    /// Format the current value for display.
    fn display(&self) -> String {
        self.display_normalized(self.get_normalized())
    }

    /// Format a normalized value for display.
    fn display_normalized(&self, normalized: ParameterValue) -> String;

    /// Parse a display string to a normalized value.
    fn parse(&self, s: &str) -> Option<ParameterValue>;

    /// Convert a normalized value to a plain value.
    fn normalized_to_plain(&self, normalized: ParameterValue) -> ParameterValue;

    /// Convert a plain value to a normalized value.
    fn plain_to_normalized(&self, plain: ParameterValue) -> ParameterValue;

    /// Reset to the default value.
    fn reset(&self) {
        self.set_normalized(self.default_normalized());
    }
}

// =============================================================================
// Parameters Trait - Parameter collection
// =============================================================================

/// A plugin's parameter collection.
///
/// Usually implemented with `#[derive(Parameters)]`. `by_id` must not
/// allocate: the audio thread uses it to apply parameter-change events.
pub trait Parameters: Send + Sync {
    /// Returns the total number of parameters.
    fn count(&self) -> usize;

    /// Iterate over all parameters (type-erased) in declaration order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParameterRef> + '_>;

    /// Look up a parameter by numeric id.
    fn by_id(&self, id: ParameterId) -> Option<&dyn ParameterRef>;

    /// Look up a parameter by position.
    fn by_index(&self, index: usize) -> Option<&dyn ParameterRef> {
        self.iter().nth(index)
    }

    /// Look up a parameter by string id.
    fn by_string_id(&self, string_id: &str) -> Option<&dyn ParameterRef> {
        self.iter().find(|p| state_key(*p) == string_id)
    }

    /// Current normalized values keyed by string id.
    fn snapshot(&self) -> ParameterSnapshot {
        self.iter()
            .map(|p| (state_key(p), p.get_normalized()))
            .collect()
    }

    /// Apply a snapshot.
    ///
    /// Every parameter ends up with a defined value: ids missing from the
    /// snapshot or holding a non-finite value get their default, others are
    /// clamped into range. Unknown ids in the snapshot are ignored.
    fn restore(&self, snapshot: &ParameterSnapshot) {
        for parameter in self.iter() {
            match snapshot.get(&state_key(parameter)) {
                Some(value) if value.is_finite() => parameter.set_normalized(*value),
                _ => parameter.reset(),
            }
        }
    }

    /// Set every parameter to its default value.
    fn reset_to_defaults(&self) {
        for parameter in self.iter() {
            parameter.reset();
        }
    }
}

/// Key used for a parameter in snapshots: its string id, or the numeric id
/// for parameters built without one.
fn state_key(parameter: &dyn ParameterRef) -> String {
    match parameter.string_id() {
        "" => parameter.id().to_string(),
        s => s.to_string(),
    }
}

/// Collection for plugins without parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoParameters;

impl Parameters for NoParameters {
    fn count(&self) -> usize {
        0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParameterRef> + '_> {
        Box::new(std::iter::empty())
    }

    fn by_id(&self, _id: ParameterId) -> Option<&dyn ParameterRef> {
        None
    }
}

// =============================================================================
// FloatParameter - Float parameter with atomic storage
// =============================================================================

/// Float parameter with atomic storage and automatic formatting.
///
/// # Specialized Constructors
///
/// - [`FloatParameter::new`]: Generic float parameter
/// - [`FloatParameter::db`]: Decibel parameter with dB formatting
/// - [`FloatParameter::hz`]: Frequency parameter with logarithmic mapping
/// - [`FloatParameter::ms`]: Milliseconds parameter
/// - [`FloatParameter::seconds`]: Seconds parameter
/// - [`FloatParameter::percent`]: Percentage parameter (0-100%)
/// - [`FloatParameter::pan`]: Pan parameter (L-C-R)
///
/// ```ignore
/// let gain = FloatParameter::db("Gain", 0.0, -60.0..=12.0).with_id(0);
/// gain.set(-6.0);
/// let amplitude = gain.as_linear(); // ~0.5
/// ```
pub struct FloatParameter {
    info: ParameterInfo,
    /// Normalized value as `f64` bits.
    value: AtomicU64,
    range: Box<dyn RangeMapper>,
    formatter: Formatter,
    /// Stored plain value is in dB; `as_linear` converts.
    is_db: bool,
}

impl FloatParameter {
    fn with_mapper(
        name: &'static str,
        default: f64,
        mapper: Box<dyn RangeMapper>,
        formatter: Formatter,
        unit: ParameterUnit,
    ) -> Self {
        let default_normalized = mapper.normalize(default);
        Self {
            info: ParameterInfo::new(0, name)
                .with_units(formatter.unit())
                .with_unit(unit)
                .with_default(default_normalized),
            value: AtomicU64::new(default_normalized.to_bits()),
            range: mapper,
            formatter,
            is_db: false,
        }
    }

    /// Create a generic float parameter with linear mapping.
    ///
    /// The parameter ID defaults to 0 and should be set via [`with_id`](Self::with_id)
    /// or the `#[derive(Parameters)]` macro.
    pub fn new(name: &'static str, default: f64, range: RangeInclusive<f64>) -> Self {
        Self::with_mapper(
            name,
            default,
            Box::new(LinearMapper::new(range)),
            Formatter::Float { precision: 2 },
            ParameterUnit::Generic,
        )
    }

    /// Create a decibel parameter.
    ///
    /// The plain value is **dB**: [`get`](Self::get) returns dB for display and
    /// automation, [`as_linear`](Self::as_linear) returns the amplitude for DSP.
    pub fn db(name: &'static str, default_db: f64, range_db: RangeInclusive<f64>) -> Self {
        let min_db = *range_db.start();
        let mut parameter = Self::with_mapper(
            name,
            default_db,
            Box::new(LinearMapper::new(range_db)),
            Formatter::Decibel {
                precision: 1,
                min_db,
            },
            ParameterUnit::Decibels,
        );
        parameter.is_db = true;
        parameter
    }

    /// Create a frequency parameter with logarithmic mapping.
    pub fn hz(name: &'static str, default_hz: f64, range_hz: RangeInclusive<f64>) -> Self {
        Self::with_mapper(
            name,
            default_hz,
            Box::new(LogMapper::new(range_hz)),
            Formatter::Frequency,
            ParameterUnit::Hertz,
        )
    }

    /// Create a milliseconds parameter.
    pub fn ms(name: &'static str, default_ms: f64, range_ms: RangeInclusive<f64>) -> Self {
        Self::with_mapper(
            name,
            default_ms,
            Box::new(LinearMapper::new(range_ms)),
            Formatter::Milliseconds { precision: 1 },
            ParameterUnit::Milliseconds,
        )
    }

    /// Create a seconds parameter.
    pub fn seconds(name: &'static str, default_s: f64, range_s: RangeInclusive<f64>) -> Self {
        Self::with_mapper(
            name,
            default_s,
            Box::new(LinearMapper::new(range_s)),
            Formatter::Seconds { precision: 2 },
            ParameterUnit::Seconds,
        )
    }

    /// Create a percentage parameter.
    ///
    /// Stored as 0.0-1.0, displayed as 0-100%. `default_pct` is 0.0-1.0.
    pub fn percent(name: &'static str, default_pct: f64) -> Self {
        Self::with_mapper(
            name,
            default_pct,
            Box::new(LinearMapper::new(0.0..=1.0)),
            Formatter::Percent { precision: 0 },
            ParameterUnit::Percent,
        )
    }

    /// Create a pan parameter, -1.0 (full left) to +1.0 (full right).
    pub fn pan(name: &'static str, default: f64) -> Self {
        Self::with_mapper(
            name,
            default,
            Box::new(LinearMapper::new(-1.0..=1.0)),
            Formatter::Pan,
            ParameterUnit::Pan,
        )
    }

    // === Builder methods ===

    /// Set the parameter ID.
    ///
    /// Called by `#[derive(Parameters)]` with the FNV-1a hash of the string id.
    pub fn with_id(mut self, id: ParameterId) -> Self {
        self.info.id = id;
        self
    }

    /// Set the string id used as the key in saved state.
    pub fn with_string_id(mut self, string_id: &'static str) -> Self {
        self.info.string_id = string_id;
        self
    }

    /// Set the short name for constrained UIs.
    pub fn with_short_name(mut self, short: &'static str) -> Self {
        self.info.short_name = short;
        self
    }

    /// Make the parameter read-only.
    pub fn readonly(mut self) -> Self {
        self.info.flags.is_readonly = true;
        self.info.flags.can_automate = false;
        self
    }

    /// Disable automation for this parameter.
    pub fn non_automatable(mut self) -> Self {
        self.info.flags.can_automate = false;
        self
    }

    /// Override the unit hint.
    pub fn with_unit(mut self, unit: ParameterUnit) -> Self {
        self.info.unit = unit;
        self
    }

    /// Set display precision (decimal places).
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.formatter = self.formatter.with_precision(precision);
        self
    }

    /// Replace the formatter. The unit string follows the new formatter;
    /// dB storage and [`as_linear`](Self::as_linear) are unaffected.
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.info.units = formatter.unit();
        self.formatter = formatter;
        self
    }

    /// Get the current formatter.
    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// `(min, max)` in plain units.
    pub fn range(&self) -> (f64, f64) {
        self.range.range()
    }

    // === Value access ===

    /// Get the current plain value in natural units.
    #[inline]
    pub fn get(&self) -> f64 {
        let normalized = f64::from_bits(self.value.load(Ordering::Relaxed));
        self.range.denormalize(normalized)
    }

    /// Set the plain value in natural units. Clamped to the range.
    #[inline]
    pub fn set(&self, value: f64) {
        let normalized = self.range.normalize(value);
        self.value.store(normalized.to_bits(), Ordering::Relaxed);
    }

    /// Get the value as linear amplitude.
    ///
    /// For dB parameters this converts from dB. For other parameters it is
    /// equivalent to [`get`](Self::get).
    #[inline]
    pub fn as_linear(&self) -> f64 {
        let plain = self.get();
        if self.is_db {
            db_to_linear(plain)
        } else {
            plain
        }
    }
}

impl ParameterRef for FloatParameter {
    fn info(&self) -> &ParameterInfo {
        &self.info
    }

    fn get_normalized(&self) -> ParameterValue {
        f64::from_bits(self.value.load(Ordering::Relaxed))
    }

    fn set_normalized(&self, value: ParameterValue) {
        let value = if value.is_nan() {
            self.info.default_normalized
        } else {
            value.clamp(0.0, 1.0)
        };
        self.value.store(value.to_bits(), Ordering::Relaxed);
    }

    fn display_normalized(&self, normalized: ParameterValue) -> String {
        self.formatter.text(self.range.denormalize(normalized))
    }

    fn parse(&self, s: &str) -> Option<ParameterValue> {
        let plain = self.formatter.parse(s)?;
        Some(self.range.normalize(plain))
    }

    fn normalized_to_plain(&self, normalized: ParameterValue) -> ParameterValue {
        self.range.denormalize(normalized)
    }

    fn plain_to_normalized(&self, plain: ParameterValue) -> ParameterValue {
        self.range.normalize(plain)
    }
}

impl std::fmt::Debug for FloatParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatParameter")
            .field("id", &self.info.id)
            .field("name", &self.info.name)
            .field("value", &self.get())
            .finish()
    }
}

// =============================================================================
// BoolParameter - Boolean parameter with atomic storage
// =============================================================================

/// Boolean parameter with atomic storage.
///
/// Normalized values above 0.5 read as `true`.
pub struct BoolParameter {
    info: ParameterInfo,
    value: AtomicBool,
}

impl BoolParameter {
    /// Create a generic boolean parameter.
    pub fn new(name: &'static str, default: bool) -> Self {
        Self {
            info: ParameterInfo::new(0, name)
                .with_unit(ParameterUnit::Boolean)
                .with_default(if default { 1.0 } else { 0.0 })
                .with_steps(1),
            value: AtomicBool::new(default),
        }
    }

    /// Create a bypass switch ("Bypass", default off, flagged as bypass).
    pub fn bypass() -> Self {
        Self {
            info: ParameterInfo::bypass(0),
            value: AtomicBool::new(false),
        }
    }

    // === Builder methods ===

    /// Set the parameter ID.
    pub fn with_id(mut self, id: ParameterId) -> Self {
        self.info.id = id;
        self
    }

    /// Set the string id used as the key in saved state.
    pub fn with_string_id(mut self, string_id: &'static str) -> Self {
        self.info.string_id = string_id;
        self
    }

    /// Set the short name for constrained UIs.
    pub fn with_short_name(mut self, short: &'static str) -> Self {
        self.info.short_name = short;
        self
    }

    /// Disable automation for this parameter.
    pub fn non_automatable(mut self) -> Self {
        self.info.flags.can_automate = false;
        self
    }

    // === Value access ===

    /// Get the current boolean value.
    #[inline]
    pub fn get(&self) -> bool {
        self.value.load(Ordering::Relaxed)
    }

    /// Set the boolean value.
    #[inline]
    pub fn set(&self, value: bool) {
        self.value.store(value, Ordering::Relaxed);
    }
}

impl ParameterRef for BoolParameter {
    fn info(&self) -> &ParameterInfo {
        &self.info
    }

    fn get_normalized(&self) -> ParameterValue {
        if self.get() {
            1.0
        } else {
            0.0
        }
    }

    fn set_normalized(&self, value: ParameterValue) {
        if value.is_nan() {
            self.set(self.info.default_normalized > 0.5);
        } else {
            self.set(value > 0.5);
        }
    }

    fn display_normalized(&self, normalized: ParameterValue) -> String {
        Formatter::Boolean.text(normalized)
    }

    fn parse(&self, s: &str) -> Option<ParameterValue> {
        Formatter::Boolean.parse(s)
    }

    fn normalized_to_plain(&self, normalized: ParameterValue) -> ParameterValue {
        if normalized > 0.5 {
            1.0
        } else {
            0.0
        }
    }

    fn plain_to_normalized(&self, plain: ParameterValue) -> ParameterValue {
        self.normalized_to_plain(plain)
    }
}

impl std::fmt::Debug for BoolParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoolParameter")
            .field("id", &self.info.id)
            .field("name", &self.info.name)
            .field("value", &self.get())
            .finish()
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Decibels to linear amplitude. -100 dB and below is silence.
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    if db <= -100.0 {
        0.0
    } else {
        10.0_f64.powf(db / 20.0)
    }
}

/// Linear amplitude to decibels. Silence maps to -100 dB.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 1e-5 {
        -100.0
    } else {
        20.0 * linear.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestParameters {
        gain: FloatParameter,
        mix: FloatParameter,
        bypass: BoolParameter,
    }

    impl TestParameters {
        fn new() -> Self {
            Self {
                gain: FloatParameter::db("Gain", 0.0, -60.0..=12.0)
                    .with_id(1)
                    .with_string_id("gain"),
                mix: FloatParameter::percent("Mix", 1.0)
                    .with_id(2)
                    .with_string_id("mix"),
                bypass: BoolParameter::bypass().with_id(3).with_string_id("bypass"),
            }
        }
    }

    impl Parameters for TestParameters {
        fn count(&self) -> usize {
            3
        }

        fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParameterRef> + '_> {
            Box::new(
                [
                    &self.gain as &dyn ParameterRef,
                    &self.mix as &dyn ParameterRef,
                    &self.bypass as &dyn ParameterRef,
                ]
                .into_iter(),
            )
        }

        fn by_id(&self, id: ParameterId) -> Option<&dyn ParameterRef> {
            match id {
                1 => Some(&self.gain),
                2 => Some(&self.mix),
                3 => Some(&self.bypass),
                _ => None,
            }
        }
    }

    #[test]
    fn test_db_parameter() {
        let gain = FloatParameter::db("Gain", 0.0, -60.0..=12.0);
        assert_eq!(gain.get(), 0.0);
        assert!((gain.as_linear() - 1.0).abs() < 1e-12);
        assert_eq!(gain.info().units, "dB");
        assert_eq!(gain.info().unit, ParameterUnit::Decibels);
        assert!((gain.default_normalized() - 60.0 / 72.0).abs() < 1e-12);

        gain.set(-6.0);
        assert!((gain.as_linear() - 0.501_187).abs() < 1e-5);
        assert_eq!(gain.display(), "-6.0");

        gain.set(100.0);
        assert_eq!(gain.get(), 12.0);
    }

    #[test]
    fn test_set_normalized_clamps_and_rejects_nan() {
        let gain = FloatParameter::db("Gain", 0.0, -60.0..=12.0);
        gain.set_normalized(1.5);
        assert_eq!(gain.get_normalized(), 1.0);
        gain.set_normalized(-0.5);
        assert_eq!(gain.get_normalized(), 0.0);
        gain.set_normalized(f64::NAN);
        assert_eq!(gain.get_normalized(), gain.default_normalized());
    }

    #[test]
    fn test_parse() {
        let gain = FloatParameter::db("Gain", 0.0, -60.0..=12.0);
        assert_eq!(gain.parse("-60 dB"), Some(0.0));
        assert_eq!(gain.parse("12"), Some(1.0));
        assert_eq!(gain.parse("abc"), None);

        let hz = FloatParameter::hz("Cutoff", 1000.0, 20.0..=20000.0);
        let n = hz.parse("1 kHz").unwrap();
        assert!((hz.normalized_to_plain(n) - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_bool_parameter() {
        let enabled = BoolParameter::new("Enabled", true);
        assert!(enabled.get());
        assert_eq!(enabled.get_normalized(), 1.0);
        enabled.set_normalized(0.2);
        assert!(!enabled.get());
        enabled.set_normalized(f64::NAN);
        assert!(enabled.get());
        assert_eq!(enabled.display(), "On");

        let bypass = BoolParameter::bypass();
        assert!(bypass.flags().is_bypass);
        assert!(!bypass.get());
    }

    #[test]
    fn test_collection_lookup() {
        let params = TestParameters::new();
        assert_eq!(params.count(), 3);
        assert_eq!(params.by_id(2).map(|p| p.name()), Some("Mix"));
        assert_eq!(params.by_string_id("bypass").map(|p| p.id()), Some(3));
        assert_eq!(params.by_index(0).map(|p| p.string_id()), Some("gain"));
        assert!(params.by_id(99).is_none());
        assert!(params.by_string_id("nope").is_none());
    }

    #[test]
    fn test_snapshot_restore() {
        let params = TestParameters::new();
        params.gain.set(-12.0);
        params.bypass.set(true);
        let snapshot = params.snapshot();
        assert_eq!(snapshot.len(), 3);

        params.reset_to_defaults();
        assert_eq!(params.gain.get(), 0.0);
        assert!(!params.bypass.get());

        params.restore(&snapshot);
        assert_eq!(params.gain.get(), -12.0);
        assert!(params.bypass.get());
    }

    #[test]
    fn test_restore_fills_missing_and_ignores_unknown() {
        let params = TestParameters::new();
        params.mix.set(0.25);

        let mut snapshot = ParameterSnapshot::new();
        snapshot.insert("gain".to_string(), 0.0);
        snapshot.insert("unknown".to_string(), 0.7);
        snapshot.insert("bypass".to_string(), f64::INFINITY);
        params.restore(&snapshot);

        assert_eq!(params.gain.get(), -60.0);
        // missing → default
        assert_eq!(params.mix.get(), 1.0);
        // non-finite → default
        assert!(!params.bypass.get());
    }

    #[test]
    fn test_snapshot_key_without_string_id() {
        let param = FloatParameter::new("Raw", 0.5, 0.0..=1.0).with_id(42);
        assert_eq!(state_key(&param), "42");
    }

    #[test]
    fn test_no_parameters() {
        let params = NoParameters;
        assert_eq!(params.count(), 0);
        assert!(params.snapshot().is_empty());
        params.restore(&ParameterSnapshot::new());
    }

    #[test]
    fn test_db_conversions() {
        assert_eq!(db_to_linear(0.0), 1.0);
        assert_eq!(db_to_linear(-100.0), 0.0);
        assert!((linear_to_db(0.5) + 6.0206).abs() < 1e-3);
        assert_eq!(linear_to_db(0.0), -100.0);
    }
}
