//! Error types for protojson code generation

use thiserror::Error;

/// Result type alias for code generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error type for code generation operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// A map field's key or value option names a field missing from the entry type
    #[error(
        "couldn't look up key or val for map field {field}: entry type has no field named {missing:?}"
    )]
    UnresolvedMapField { field: String, missing: String },

    /// Map keys travel as JSON object keys, so only string keys are supported
    #[error("map field {field} has a {kind} key; only string keys are supported")]
    UnsupportedMapKey { field: String, kind: String },

    /// Map values may not themselves be repeated
    #[error("map field {field} has a repeated value field {value}")]
    UnsupportedMapValue { field: String, value: String },

    /// The field kind has no Java/JSON mapping
    #[error("field {field} has unsupported type {kind}")]
    UnsupportedType { field: String, kind: String },

    /// Method has no HTTP verb/path options
    #[error("can't generate method {method}, doesn't have options set")]
    MissingHttpOptions { method: String },

    /// Path template could not be turned into stub parameters
    #[error("invalid path template {path:?} on method {method}: {reason}")]
    InvalidPathTemplate {
        method: String,
        path: String,
        reason: String,
    },

    /// Field cannot be exported to a flat string map
    #[error("field {field} is not supported for toMap")]
    UnsupportedFlatMap { field: String },

    /// Code template referenced a variable that was never defined
    #[error("undefined template variable: {0}")]
    UndefinedVariable(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Schema descriptors could not be resolved
    #[error("descriptor error: {0}")]
    Descriptor(String),

    /// Plugin request could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// One or more errors were recorded during a generation run
    #[error("{}", join_errors(.0))]
    GenerationFailed(Vec<CodegenError>),
}

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::Config(err.to_string())
    }
}

fn join_errors(errors: &[CodegenError]) -> String {
    match errors {
        [] => "generation failed".to_string(),
        [single] => single.to_string(),
        many => {
            let lines: Vec<String> = many.iter().map(|e| format!("  - {e}")).collect();
            format!("{} errors during generation:\n{}", many.len(), lines.join("\n"))
        }
    }
}
