//! Saved plugin state.
//!
//! State chunks are tagged JSON documents:
//!
//! ```text
//! {"format":"plinth-state","version":1,"plugin":"MyPlugin","program":0,
//!  "parameters":{"gain":0.8333333333333334}}
//! ```
//!
//! Parameter values are normalized and keyed by string id, so chunks survive
//! parameter reordering. Loaders accept any version from 1 up and ignore
//! fields and ids they don't know.

use serde::{Deserialize, Serialize};

use crate::error::{PluginError, PluginResult};
use crate::parameter_types::{ParameterSnapshot, Parameters};

/// Value of the `format` tag.
pub const STATE_FORMAT: &str = "plinth-state";

/// Version written by this crate.
pub const STATE_VERSION: u32 = 1;

/// Decoded state chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChunk {
    /// Format tag, always [`STATE_FORMAT`].
    pub format: String,
    /// Format version.
    pub version: u32,
    /// Name of the plugin that wrote the chunk.
    pub plugin: String,
    /// Selected program.
    #[serde(default)]
    pub program: i32,
    /// Normalized parameter values by string id.
    #[serde(default)]
    pub parameters: ParameterSnapshot,
}

impl StateChunk {
    /// Capture the current parameter values.
    pub fn capture<P: Parameters + ?Sized>(plugin: &str, program: i32, parameters: &P) -> Self {
        Self {
            format: STATE_FORMAT.to_string(),
            version: STATE_VERSION,
            plugin: plugin.to_string(),
            program,
            parameters: parameters.snapshot(),
        }
    }

    /// Encode as JSON bytes.
    pub fn to_bytes(&self) -> PluginResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode and validate a chunk written for `plugin`.
    pub fn from_bytes(plugin: &str, data: &[u8]) -> PluginResult<Self> {
        if data.is_empty() {
            return Err(PluginError::StateError("empty state".to_string()));
        }
        let chunk: StateChunk = serde_json::from_slice(data)?;
        if chunk.format != STATE_FORMAT {
            return Err(PluginError::StateError(format!(
                "unknown format tag {:?}",
                chunk.format
            )));
        }
        if chunk.version == 0 {
            return Err(PluginError::StateError("version 0 is not valid".to_string()));
        }
        if chunk.plugin != plugin {
            return Err(PluginError::StateError(format!(
                "state belongs to {:?}, not {:?}",
                chunk.plugin, plugin
            )));
        }
        Ok(chunk)
    }

    /// Write the saved values into `parameters`.
    pub fn apply<P: Parameters + ?Sized>(&self, parameters: &P) {
        parameters.restore(&self.parameters);
    }
}

/// Serialize `parameters` into a state chunk.
pub fn save_state<P: Parameters + ?Sized>(
    plugin: &str,
    program: i32,
    parameters: &P,
) -> PluginResult<Vec<u8>> {
    StateChunk::capture(plugin, program, parameters).to_bytes()
}

/// Restore `parameters` from a state chunk and return the saved program.
///
/// On error the parameters are left untouched; callers decide the fallback.
pub fn load_state<P: Parameters + ?Sized>(
    plugin: &str,
    data: &[u8],
    parameters: &P,
) -> PluginResult<i32> {
    let chunk = StateChunk::from_bytes(plugin, data)?;
    chunk.apply(parameters);
    Ok(chunk.program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter_types::{BoolParameter, FloatParameter, ParameterRef};
    use crate::types::ParameterId;

    struct TestParameters {
        gain: FloatParameter,
        bypass: BoolParameter,
    }

    impl TestParameters {
        fn new() -> Self {
            Self {
                gain: FloatParameter::db("Gain", 0.0, -60.0..=12.0)
                    .with_id(1)
                    .with_string_id("gain"),
                bypass: BoolParameter::bypass().with_id(2).with_string_id("bypass"),
            }
        }
    }

    impl Parameters for TestParameters {
        fn count(&self) -> usize {
            2
        }

        fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParameterRef> + '_> {
            Box::new([&self.gain as &dyn ParameterRef, &self.bypass as &dyn ParameterRef].into_iter())
        }

        fn by_id(&self, id: ParameterId) -> Option<&dyn ParameterRef> {
            match id {
                1 => Some(&self.gain),
                2 => Some(&self.bypass),
                _ => None,
            }
        }
    }

    #[test]
    fn test_round_trip_exact() {
        let params = TestParameters::new();
        params.gain.set_normalized(0.123_456_789_012_345_6);
        params.bypass.set(true);
        let data = save_state("Test", 2, &params).unwrap();

        let restored = TestParameters::new();
        let program = load_state("Test", &data, &restored).unwrap();
        assert_eq!(program, 2);
        assert_eq!(
            restored.gain.get_normalized(),
            params.gain.get_normalized()
        );
        assert!(restored.bypass.get());
    }

    #[test]
    fn test_chunk_layout() {
        let params = TestParameters::new();
        let data = save_state("Test", 0, &params).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&data).unwrap();
        assert_eq!(value["format"], "plinth-state");
        assert_eq!(value["version"], 1);
        assert_eq!(value["plugin"], "Test");
        assert!(value["parameters"]["gain"].is_f64());
    }

    #[test]
    fn test_rejects_bad_chunks() {
        let params = TestParameters::new();
        params.gain.set(-30.0);

        assert!(load_state("Test", b"", &params).is_err());
        assert!(matches!(
            load_state("Test", b"\x00\x01garbage", &params),
            Err(PluginError::Serialization(_))
        ));
        assert!(load_state("Test", br#"{"format":"other","version":1,"plugin":"Test"}"#, &params).is_err());
        assert!(load_state("Test", br#"{"format":"plinth-state","version":0,"plugin":"Test"}"#, &params).is_err());
        assert!(load_state("Other", &save_state("Test", 0, &params).unwrap(), &params).is_err());

        // untouched on error
        assert_eq!(params.gain.get(), -30.0);
    }

    #[test]
    fn test_accepts_newer_version_and_unknown_fields() {
        let params = TestParameters::new();
        let data = br#"{"format":"plinth-state","version":3,"plugin":"Test","extra":true,
                        "parameters":{"gain":0.0,"future":0.5}}"#;
        let program = load_state("Test", data, &params).unwrap();
        assert_eq!(program, 0);
        assert_eq!(params.gain.get(), -60.0);
        assert!(!params.bypass.get());
    }

    #[test]
    fn test_truncated_chunk() {
        let params = TestParameters::new();
        let data = save_state("Test", 0, &params).unwrap();
        assert!(load_state("Test", &data[..data.len() / 2], &params).is_err());
    }
}
