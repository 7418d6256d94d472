//! Bus and channel layout types.
//!
//! Plugins declare their default buses through [`Descriptor`](crate::Descriptor)
//! and accept or reject host-proposed layouts with
//! [`Descriptor::is_layout_supported`](crate::Descriptor::is_layout_supported).
//! Rejection is the only error path for layouts: an unsupported layout is
//! never discovered inside `process_block`.

use crate::error::{PluginError, PluginResult};
use crate::types::MAX_CHANNELS;

/// Audio bus type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusType {
    /// Main audio bus.
    #[default]
    Main,
    /// Auxiliary bus (e.g. sidechain).
    Aux,
}

/// Information about an audio bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusInfo {
    /// Display name (e.g. "Input").
    pub name: &'static str,
    /// Bus type.
    pub bus_type: BusType,
    /// Number of channels.
    pub channel_count: u32,
    /// Whether the bus is active by default.
    pub is_default_active: bool,
}

impl BusInfo {
    /// Stereo main bus.
    pub const fn stereo(name: &'static str) -> Self {
        Self {
            name,
            bus_type: BusType::Main,
            channel_count: 2,
            is_default_active: true,
        }
    }

    /// Mono main bus.
    pub const fn mono(name: &'static str) -> Self {
        Self {
            name,
            bus_type: BusType::Main,
            channel_count: 1,
            is_default_active: true,
        }
    }
}

/// Main-bus channel layout negotiated with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusLayout {
    /// Channels on the main input bus (0 for generators).
    pub main_input_channels: u32,
    /// Channels on the main output bus.
    pub main_output_channels: u32,
}

impl BusLayout {
    /// Mono in, mono out.
    pub const MONO: BusLayout = BusLayout::new(1, 1);
    /// Stereo in, stereo out.
    pub const STEREO: BusLayout = BusLayout::new(2, 2);

    /// Create a layout.
    pub const fn new(main_input_channels: u32, main_output_channels: u32) -> Self {
        Self {
            main_input_channels,
            main_output_channels,
        }
    }

    /// Build a layout from the main buses a plugin declares.
    pub fn from_buses(input: Option<&BusInfo>, output: Option<&BusInfo>) -> Self {
        Self {
            main_input_channels: input.map(|b| b.channel_count).unwrap_or(0),
            main_output_channels: output.map(|b| b.channel_count).unwrap_or(0),
        }
    }

    /// Number of channel slices the host passes to `process_block`.
    pub fn total_channels(&self) -> usize {
        self.main_input_channels.max(self.main_output_channels) as usize
    }

    /// Check the layout against system limits.
    pub fn validate(&self) -> PluginResult<()> {
        if self.main_input_channels as usize > MAX_CHANNELS {
            return Err(PluginError::UnsupportedLayout(format!(
                "input bus declares {} channels, but MAX_CHANNELS is {}",
                self.main_input_channels, MAX_CHANNELS
            )));
        }
        if self.main_output_channels as usize > MAX_CHANNELS {
            return Err(PluginError::UnsupportedLayout(format!(
                "output bus declares {} channels, but MAX_CHANNELS is {}",
                self.main_output_channels, MAX_CHANNELS
            )));
        }
        if self.main_output_channels == 0 {
            return Err(PluginError::UnsupportedLayout(
                "output bus has no channels".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BusLayout {
    /// Stereo in, stereo out.
    fn default() -> Self {
        Self::STEREO
    }
}

impl std::fmt::Display for BusLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}in/{}out",
            self.main_input_channels, self.main_output_channels
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = BusLayout::default();
        assert_eq!(layout, BusLayout::STEREO);
        assert_eq!(layout.total_channels(), 2);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_from_buses() {
        let input = BusInfo::mono("Input");
        let output = BusInfo::stereo("Output");
        let layout = BusLayout::from_buses(Some(&input), Some(&output));
        assert_eq!(layout, BusLayout::new(1, 2));
        assert_eq!(layout.total_channels(), 2);

        let generator = BusLayout::from_buses(None, Some(&output));
        assert_eq!(generator.main_input_channels, 0);
    }

    #[test]
    fn test_validate_limits() {
        assert!(BusLayout::new(2, MAX_CHANNELS as u32 + 1).validate().is_err());
        assert!(BusLayout::new(MAX_CHANNELS as u32 + 1, 2).validate().is_err());
        assert!(BusLayout::new(2, 0).validate().is_err());
        assert!(BusLayout::new(0, 2).validate().is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(BusLayout::new(1, 2).to_string(), "1in/2out");
    }
}
