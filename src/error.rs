use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

/// Hard failure conditions surfaced to callers.
///
/// Everything recoverable stays out of this enum: constructor failures,
/// unknown classes met during tolerant item parsing, and mutation gaps are
/// routed through the [reporter](crate::reporter) as structured events and
/// leave an empty slot behind. `InnertubeError` is reserved for programmer
/// errors and caller-visible schema-contract violations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum InnertubeError {
    #[error("Expected an array of wrappers, got a single item of type {classname}")]
    ExpectedArray { classname: String },
    #[error("Module not found in parser registry: {0}")]
    ModuleNotFound(String),
    #[error("No active memo. Open a memo scope before reading section state")]
    MemoInactive,
    #[error("{tag} has no key '{key}'")]
    MissingKey { tag: String, key: String },
    #[error("Type mismatch: expected one of {expected:?}, got {actual}")]
    Typecheck {
        expected: Vec<String>,
        actual: String,
    },
    #[error("Parse failure: {0}")]
    Parse(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl InnertubeError {
    /// Shorthand used by node constructors when a required field is absent
    /// or has the wrong shape.
    pub fn missing_field(tag: &str, field: &str) -> Self {
        InnertubeError::Parse(format!("{tag} requires field '{field}'"))
    }
}

impl From<JsonError> for InnertubeError {
    fn from(src: JsonError) -> InnertubeError {
        InnertubeError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<std::num::ParseIntError> for InnertubeError {
    fn from(src: std::num::ParseIntError) -> InnertubeError {
        InnertubeError::Serialization(format!("Integer coercion failed: {src}"))
    }
}
