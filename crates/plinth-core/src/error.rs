//! Error types.

use std::fmt;

/// Errors reported by plugin operations.
///
/// None of these are fatal to the host: the instance layer turns them into
/// fallbacks (default parameters, rejected layouts) and logs them.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginError {
    /// A state chunk could not be restored.
    StateError(String),
    /// A state chunk could not be encoded or decoded.
    Serialization(String),
    /// The requested bus layout is not supported.
    UnsupportedLayout(String),
    /// A parameter id is unknown.
    InvalidParameter(u32),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::StateError(msg) => write!(f, "state error: {}", msg),
            PluginError::Serialization(msg) => write!(f, "serialization error: {}", msg),
            PluginError::UnsupportedLayout(msg) => write!(f, "unsupported layout: {}", msg),
            PluginError::InvalidParameter(id) => write!(f, "unknown parameter id {:#010x}", id),
        }
    }
}

impl std::error::Error for PluginError {}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        PluginError::Serialization(err.to_string())
    }
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
