//! Factory presets.
//!
//! Presets are opt-in through [`FactoryPresets`]. Plugins without presets use
//! [`NoPresets`]. Hosts see presets as the plugin's program list.
//!
//! Presets can be sparse: applying one only touches the parameters it lists.
//!
//! ```ignore
//! #[derive(Presets)]
//! #[preset(parameters = GainParameters)]
//! pub enum GainPresets {
//!     #[preset(name = "Unity", values(gain = 0.0))]
//!     Unity,
//!     #[preset(name = "Quiet", values(gain = -12.0))]
//!     Quiet,
//! }
//! ```

use std::marker::PhantomData;

use crate::parameter_types::Parameters;
use crate::types::ParameterId;

/// Information about a single preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetInfo {
    /// Display name shown in the host's program list.
    pub name: &'static str,
}

/// A single parameter value within a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetValue {
    /// Parameter hash ID (FNV-1a hash of the string ID).
    pub id: ParameterId,
    /// Plain value in natural units (e.g., dB, Hz, ms).
    pub plain_value: f64,
}

/// Factory preset collection, usually implemented by `#[derive(Presets)]`.
pub trait FactoryPresets: Send + Sync + 'static {
    /// The parameter struct this preset collection applies to.
    type Parameters: Parameters;

    /// Returns the total number of factory presets.
    fn count() -> usize;

    /// Information about the preset at `index`, `None` if out of range.
    fn info(index: usize) -> Option<PresetInfo>;

    /// Values of the preset at `index`, empty if out of range.
    fn values(index: usize) -> &'static [PresetValue];

    /// Apply a preset. Parameters it does not list keep their values.
    ///
    /// Returns `false` if the index was out of range.
    fn apply(index: usize, parameters: &Self::Parameters) -> bool {
        if index >= Self::count() {
            return false;
        }

        for value in Self::values(index) {
            if let Some(param) = parameters.by_id(value.id) {
                param.set_normalized(param.plain_to_normalized(value.plain_value));
            }
        }

        true
    }
}

/// Empty preset list.
pub struct NoPresets<P>(PhantomData<fn() -> P>);

impl<P: Parameters + 'static> FactoryPresets for NoPresets<P> {
    type Parameters = P;

    fn count() -> usize {
        0
    }

    fn info(_index: usize) -> Option<PresetInfo> {
        None
    }

    fn values(_index: usize) -> &'static [PresetValue] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter_types::{FloatParameter, ParameterRef};
    use plinth_utils::fnv1a_32;

    struct GainParameters {
        gain: FloatParameter,
        trim: FloatParameter,
    }

    impl GainParameters {
        fn new() -> Self {
            Self {
                gain: FloatParameter::db("Gain", 0.0, -60.0..=12.0)
                    .with_id(fnv1a_32("gain"))
                    .with_string_id("gain"),
                trim: FloatParameter::db("Trim", 0.0, -12.0..=12.0)
                    .with_id(fnv1a_32("trim"))
                    .with_string_id("trim"),
            }
        }
    }

    impl Parameters for GainParameters {
        fn count(&self) -> usize {
            2
        }

        fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParameterRef> + '_> {
            Box::new([&self.gain as &dyn ParameterRef, &self.trim as &dyn ParameterRef].into_iter())
        }

        fn by_id(&self, id: ParameterId) -> Option<&dyn ParameterRef> {
            const GAIN: u32 = fnv1a_32("gain");
            const TRIM: u32 = fnv1a_32("trim");
            match id {
                GAIN => Some(&self.gain),
                TRIM => Some(&self.trim),
                _ => None,
            }
        }
    }

    struct QuietPreset;

    static QUIET_VALUES: [PresetValue; 1] = [PresetValue {
        id: fnv1a_32("gain"),
        plain_value: -12.0,
    }];

    impl FactoryPresets for QuietPreset {
        type Parameters = GainParameters;

        fn count() -> usize {
            1
        }

        fn info(index: usize) -> Option<PresetInfo> {
            (index == 0).then_some(PresetInfo { name: "Quiet" })
        }

        fn values(index: usize) -> &'static [PresetValue] {
            if index == 0 {
                &QUIET_VALUES
            } else {
                &[]
            }
        }
    }

    #[test]
    fn test_apply_is_sparse() {
        let params = GainParameters::new();
        params.trim.set(3.0);
        assert!(QuietPreset::apply(0, &params));
        assert!((params.gain.get() + 12.0).abs() < 1e-9);
        assert!((params.trim.get() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_out_of_range() {
        let params = GainParameters::new();
        assert!(!QuietPreset::apply(1, &params));
        assert_eq!(params.gain.get(), 0.0);
    }

    #[test]
    fn test_no_presets() {
        assert_eq!(NoPresets::<GainParameters>::count(), 0);
        assert!(NoPresets::<GainParameters>::info(0).is_none());
        assert!(NoPresets::<GainParameters>::values(0).is_empty());
    }
}
