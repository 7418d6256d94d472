//! Parameter metadata types.
//!
//! - [`ParameterInfo`] - complete parameter description (name, range, flags)
//! - [`ParameterFlags`] - behavioral flags (automation, bypass, list)
//! - [`ParameterUnit`] - unit hint hosts use to pick a control

use crate::types::{ParameterId, ParameterValue};

/// Unit hint for a parameter.
///
/// Most constructors set this automatically:
///
/// ```ignore
/// let gain = FloatParameter::db("Gain", 0.0, -60.0..=12.0);  // → Decibels
/// let enabled = BoolParameter::new("Enabled", true);         // → Boolean
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ParameterUnit {
    /// Generic parameter (default slider)
    #[default]
    Generic,
    /// Boolean parameter (checkbox)
    Boolean,
    /// Percentage (0-100%)
    Percent,
    /// Time in seconds
    Seconds,
    /// Time in milliseconds
    Milliseconds,
    /// Frequency in Hertz
    Hertz,
    /// Level in decibels
    Decibels,
    /// Stereo pan (-1 to +1)
    Pan,
}

/// Flags controlling parameter behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterFlags {
    /// Parameter can be automated by the host.
    pub can_automate: bool,
    /// Parameter is read-only (display only).
    pub is_readonly: bool,
    /// Parameter is the bypass switch.
    pub is_bypass: bool,
    /// Parameter should be displayed as a list of discrete labels.
    pub is_list: bool,
}

impl ParameterFlags {
    /// Automatable, writable, not bypass, not a list.
    pub const DEFAULT: ParameterFlags = ParameterFlags {
        can_automate: true,
        is_readonly: false,
        is_bypass: false,
        is_list: false,
    };
}

impl Default for ParameterFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Metadata describing a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Numeric identifier (FNV-1a hash of `string_id`).
    pub id: ParameterId,
    /// String identifier from `#[parameter(id = "...")]`. Used as the key in
    /// saved state.
    pub string_id: &'static str,
    /// Full parameter name (e.g., "Master Volume").
    pub name: &'static str,
    /// Short parameter name for constrained UIs (e.g., "Vol").
    pub short_name: &'static str,
    /// Unit label (e.g., "dB", "%", "Hz").
    pub units: &'static str,
    /// Unit hint.
    pub unit: ParameterUnit,
    /// Default value in normalized form (0.0 to 1.0).
    pub default_normalized: ParameterValue,
    /// Number of discrete steps. 0 = continuous, 1 = toggle, >1 = discrete.
    pub step_count: i32,
    /// Behavioral flags.
    pub flags: ParameterFlags,
}

impl ParameterInfo {
    /// Create a new continuous parameter with default flags.
    pub const fn new(id: ParameterId, name: &'static str) -> Self {
        Self {
            id,
            string_id: "",
            name,
            short_name: name,
            units: "",
            unit: ParameterUnit::Generic,
            default_normalized: 0.5,
            step_count: 0,
            flags: ParameterFlags::DEFAULT,
        }
    }

    /// Create a bypass toggle: one step, automatable, default off.
    pub const fn bypass(id: ParameterId) -> Self {
        Self {
            id,
            string_id: "",
            name: "Bypass",
            short_name: "Byp",
            units: "",
            unit: ParameterUnit::Boolean,
            default_normalized: 0.0,
            step_count: 1,
            flags: ParameterFlags {
                is_bypass: true,
                ..ParameterFlags::DEFAULT
            },
        }
    }

    /// Set the string identifier.
    pub const fn with_string_id(mut self, string_id: &'static str) -> Self {
        self.string_id = string_id;
        self
    }

    /// Set the short name.
    pub const fn with_short_name(mut self, short_name: &'static str) -> Self {
        self.short_name = short_name;
        self
    }

    /// Set the unit label.
    pub const fn with_units(mut self, units: &'static str) -> Self {
        self.units = units;
        self
    }

    /// Set the unit hint.
    pub const fn with_unit(mut self, unit: ParameterUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the default normalized value.
    pub const fn with_default(mut self, default: ParameterValue) -> Self {
        self.default_normalized = default;
        self
    }

    /// Set the step count (0 = continuous).
    pub const fn with_steps(mut self, steps: i32) -> Self {
        self.step_count = steps;
        self
    }

    /// Set parameter flags.
    pub const fn with_flags(mut self, flags: ParameterFlags) -> Self {
        self.flags = flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let info = ParameterInfo::new(7, "Gain")
            .with_string_id("gain")
            .with_units("dB")
            .with_unit(ParameterUnit::Decibels);
        assert_eq!(info.short_name, "Gain");
        assert_eq!(info.string_id, "gain");
        assert_eq!(info.step_count, 0);
        assert!(info.flags.can_automate);
        assert!(!info.flags.is_bypass);
    }

    #[test]
    fn test_bypass() {
        let info = ParameterInfo::bypass(1);
        assert!(info.flags.is_bypass);
        assert_eq!(info.step_count, 1);
        assert_eq!(info.default_normalized, 0.0);
        assert_eq!(info.unit, ParameterUnit::Boolean);
    }
}
