//! Plugin configuration.
//!
//! Static metadata shared by every instance of a plugin. Declared once as a
//! `static` using the const builder:
//!
//! ```ignore
//! use plinth_core::{PluginConfig, Category};
//!
//! pub static CONFIG: PluginConfig = PluginConfig::new("My Plugin")
//!     .with_vendor("My Company")
//!     .with_version("1.0.0");
//! ```

// =========================================================================
// Subcategory
// =========================================================================

/// Plugin subcategory for more specific classification.
///
/// Use with [`PluginConfig::with_subcategories`] to describe plugin
/// characteristics to hosts that browse by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcategory {
    /// Scope, FFT display, loudness processing
    Analyzer,
    /// Delay, multi-tap delay, ping-pong delay
    Delay,
    /// Amp simulator, soft clipper
    Distortion,
    /// Compressor, expander, gate, limiter
    Dynamics,
    /// Equalization
    Eq,
    /// Specific filters
    Filter,
    /// Tone and noise generators
    Generator,
    /// Dither, noise shaping
    Mastering,
    /// Phaser, flanger, chorus, tremolo
    Modulation,
    /// Reverberation, room simulation
    Reverb,
    /// Stereo wideners, panners
    Spatial,
    /// Volume, mixer, tuner
    Tools,
    /// Synthesizers
    Synth,
    /// Mono only plugin
    Mono,
    /// Stereo only plugin
    Stereo,
}

impl Subcategory {
    /// Host-facing tag string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Subcategory::Analyzer => "Analyzer",
            Subcategory::Delay => "Delay",
            Subcategory::Distortion => "Distortion",
            Subcategory::Dynamics => "Dynamics",
            Subcategory::Eq => "EQ",
            Subcategory::Filter => "Filter",
            Subcategory::Generator => "Generator",
            Subcategory::Mastering => "Mastering",
            Subcategory::Modulation => "Modulation",
            Subcategory::Reverb => "Reverb",
            Subcategory::Spatial => "Spatial",
            Subcategory::Tools => "Tools",
            Subcategory::Synth => "Synth",
            Subcategory::Mono => "Mono",
            Subcategory::Stereo => "Stereo",
        }
    }
}

// =========================================================================
// Category
// =========================================================================

/// Plugin type - determines how hosts categorize and use the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    /// Audio effect (EQ, compressor, reverb, delay)
    #[default]
    Effect,
    /// Virtual instrument (synth, sampler, drum machine)
    Instrument,
    /// MIDI processor (arpeggiator, chord generator)
    MidiEffect,
    /// Audio generator (test tones, noise, file player)
    Generator,
}

impl Category {
    /// Base category string (e.g. `"Fx"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Effect | Category::MidiEffect => "Fx",
            Category::Instrument => "Instrument",
            Category::Generator => "Generator",
        }
    }

    /// Check if this type accepts MIDI input
    pub const fn accepts_midi(&self) -> bool {
        matches!(self, Category::Instrument | Category::MidiEffect)
    }

    /// Check if this type can produce MIDI output
    pub const fn produces_midi(&self) -> bool {
        matches!(self, Category::MidiEffect)
    }

    /// Check if this type is a pure MIDI processor
    pub const fn is_midi_effect(&self) -> bool {
        matches!(self, Category::MidiEffect)
    }
}

// =========================================================================
// PluginConfig
// =========================================================================

/// Static plugin metadata.
///
/// All fields are `'static` so a config can live in a `static` and be handed
/// to editors by reference.
#[derive(Debug, Clone, Copy)]
pub struct PluginConfig {
    /// Plugin name shown in hosts. Also tags saved state.
    pub name: &'static str,
    /// Plugin category.
    pub category: Category,
    /// Vendor name.
    pub vendor: &'static str,
    /// Vendor URL.
    pub url: &'static str,
    /// Vendor email.
    pub email: &'static str,
    /// Version string.
    pub version: &'static str,
    /// Subcategories for host browsers.
    pub subcategories: &'static [Subcategory],
}

impl PluginConfig {
    /// Create a config with the required name. Category defaults to
    /// [`Category::Effect`].
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            category: Category::Effect,
            vendor: "",
            url: "",
            email: "",
            version: "0.1.0",
            subcategories: &[],
        }
    }

    /// Set the plugin category.
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the vendor name.
    pub const fn with_vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    /// Set the vendor URL.
    pub const fn with_url(mut self, url: &'static str) -> Self {
        self.url = url;
        self
    }

    /// Set the vendor email.
    pub const fn with_email(mut self, email: &'static str) -> Self {
        self.email = email;
        self
    }

    /// Set the version string.
    pub const fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    /// Set the plugin subcategories.
    pub const fn with_subcategories(mut self, subcategories: &'static [Subcategory]) -> Self {
        self.subcategories = subcategories;
        self
    }

    /// Category and subcategories joined with pipes, e.g. `"Fx|Tools"`.
    pub fn category_string(&self) -> String {
        let mut result = String::from(self.category.as_str());
        for sub in self.subcategories {
            result.push('|');
            result.push_str(sub.as_str());
        }
        result
    }
}
