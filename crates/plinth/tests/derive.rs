//! Tests for the derive macros, expanded through the `plinth` facade.

use std::sync::Arc;

use plinth::core::parameter_types::ParameterSnapshot;
use plinth::prelude::*;
use plinth_utils::fnv1a_32;

#[derive(Parameters)]
pub struct FilterParameters {
    #[parameter(id = "gain", name = "Gain", default = -6.0, range = -60.0..=12.0, kind = "db")]
    pub gain: FloatParameter,

    #[parameter(id = "cutoff", name = "Cutoff", default = 1000.0, range = 20.0..=20000.0, kind = "hz")]
    pub cutoff: FloatParameter,

    #[parameter(id = "mix", name = "Mix", short_name = "Mx", default = 0.5, kind = "percent")]
    pub mix: FloatParameter,

    #[parameter(id = "drive", range = 0..=10, precision = 1, non_automatable)]
    pub drive: FloatParameter,

    #[parameter(id = "meter", name = "Meter", range = -60.0..=0.0, default = -60.0, readonly)]
    pub meter: FloatParameter,

    #[parameter(id = "bypass", bypass)]
    pub bypass: BoolParameter,

    #[parameter(id = "oversample", name = "Oversample", default = true)]
    pub oversample: BoolParameter,

    pub scratch: Vec<f32>,
}

#[derive(Presets)]
#[preset(parameters = FilterParameters)]
pub enum FilterPresets {
    #[preset(name = "Init")]
    Init,

    #[preset(name = "Dark", values(cutoff = 400.0, gain = -3))]
    Dark,

    #[preset(name = "Bypassed", values(bypass = 1.0))]
    Bypassed,
}

#[derive(Default, HasParameters)]
pub struct FilterDescriptor {
    parameters: Arc<FilterParameters>,
}

#[derive(HasParameters)]
pub struct Marked {
    #[parameters]
    shared: Arc<FilterParameters>,
    _other: u32,
}

#[test]
fn test_count_and_order() {
    let p = FilterParameters::default();
    assert_eq!(p.count(), 7);
    let ids: Vec<&str> = p.iter().map(|p| p.string_id()).collect();
    assert_eq!(
        ids,
        ["gain", "cutoff", "mix", "drive", "meter", "bypass", "oversample"]
    );
    assert!(p.scratch.is_empty());
}

#[test]
fn test_ids_are_fnv_hashes() {
    let p = FilterParameters::default();
    assert_eq!(FilterParameters::GAIN_ID, fnv1a_32("gain"));
    assert_eq!(FilterParameters::BYPASS_ID, fnv1a_32("bypass"));
    assert_eq!(p.gain.id(), FilterParameters::GAIN_ID);
    for parameter in p.iter() {
        let found = p.by_id(parameter.id()).map(|q| q.string_id());
        assert_eq!(found, Some(parameter.string_id()));
    }
    assert!(p.by_id(0).is_none());
    assert_eq!(p.by_string_id("mix").map(|q| q.id()), Some(FilterParameters::MIX_ID));
}

#[test]
fn test_defaults_and_metadata() {
    let p = FilterParameters::default();
    assert!((p.gain.get() - -6.0).abs() < 1e-9);
    assert_eq!(p.gain.units(), "dB");
    assert!((p.cutoff.get() - 1000.0).abs() < 1e-6);
    assert!((p.mix.get() - 0.5).abs() < 1e-9);
    assert_eq!(p.mix.info().short_name, "Mx");
    assert_eq!(p.drive.get(), 0.0);
    assert_eq!(p.drive.name(), "drive");
    assert!(!p.drive.flags().can_automate);
    assert!(p.meter.flags().is_readonly);
    assert!(p.bypass.flags().is_bypass);
    assert!(!p.bypass.get());
    assert!(p.oversample.get());
}

#[test]
fn test_snapshot_restore() {
    let p = FilterParameters::default();
    p.gain.set(3.0);
    p.oversample.set(false);
    let snapshot = p.snapshot();
    assert_eq!(snapshot.len(), 7);

    let q = FilterParameters::default();
    q.restore(&snapshot);
    assert_eq!(q.gain.get_normalized(), p.gain.get_normalized());
    assert!(!q.oversample.get());

    let mut partial = ParameterSnapshot::new();
    partial.insert("cutoff".into(), 1.0);
    partial.insert("unknown".into(), 0.3);
    q.restore(&partial);
    assert!((q.cutoff.get() - 20000.0).abs() < 1e-6);
    assert!((q.gain.get() - -6.0).abs() < 1e-9);
    assert!(q.oversample.get());
}

#[test]
fn test_presets() {
    assert_eq!(FilterPresets::count(), 3);
    assert_eq!(FilterPresets::info(1).map(|i| i.name), Some("Dark"));
    assert!(FilterPresets::info(3).is_none());
    assert!(FilterPresets::values(0).is_empty());

    let p = FilterParameters::default();
    assert!(FilterPresets::apply(1, &p));
    assert!((p.cutoff.get() - 400.0).abs() < 1e-6);
    assert!((p.gain.get() - -3.0).abs() < 1e-9);

    // sparse: values a preset does not name are left alone
    assert!(FilterPresets::apply(2, &p));
    assert!(p.bypass.get());
    assert!((p.cutoff.get() - 400.0).abs() < 1e-6);

    assert!(!FilterPresets::apply(7, &p));
}

#[test]
fn test_has_parameters() {
    let descriptor = FilterDescriptor::default();
    descriptor.parameters().gain.set(1.0);
    assert!((descriptor.parameters.gain.get() - 1.0).abs() < 1e-9);

    let marked = Marked {
        shared: Arc::clone(descriptor.parameters()),
        _other: 0,
    };
    assert!(Arc::ptr_eq(marked.parameters(), &descriptor.parameters));
}
