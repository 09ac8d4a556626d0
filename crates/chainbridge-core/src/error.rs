//! Error types for the ChainBridge codec, aliasing and event pipelines.

use thiserror::Error;

/// Errors from the binary stream codec.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("short read decoding {field}: needed {expected} bytes")]
    ShortRead { field: &'static str, expected: usize },

    #[error("read failed decoding {field}: {source}")]
    Read {
        field: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("write failed encoding {field}: {source}")]
    WriteFailed {
        field: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("byte string length {declared} exceeds maximum {max}")]
    SizeExceeded { declared: u64, max: u64 },
}

impl WireError {
    /// Returns `true` if the stream ended before the value was complete.
    pub fn is_short_read(&self) -> bool {
        matches!(self, WireError::ShortRead { .. })
    }
}

/// Errors raised while binding an event schema. These happen once, at
/// startup, and are fatal for the component that needed the schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid ABI JSON: {reason}")]
    InvalidAbi { reason: String },

    #[error("event '{name}' not found in ABI")]
    EventNotFound { name: String },

    #[error("event '{event}' has no field '{field}'")]
    MissingField { event: String, field: String },

    #[error("cannot resolve type '{ty}' of parameter '{param}': {reason}")]
    UnresolvableType {
        param: String,
        ty: String,
        reason: String,
    },
}

/// Errors raised while decoding a single log against a bound schema.
#[derive(Debug, Error)]
pub enum EventDecodeError {
    #[error("log has {available} topics, indexed field '{field}' needs topic {index}")]
    MissingTopic {
        field: String,
        index: usize,
        available: usize,
    },

    #[error("topic for indexed field '{field}' failed to parse: {reason}")]
    TopicDecodeFailed { field: String, reason: String },

    #[error("log data failed to unpack: {reason}")]
    DataDecodeFailed { reason: String },

    #[error("field '{field}' missing or not a {expected}")]
    FieldMismatch {
        field: String,
        expected: &'static str,
    },
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid alias offset '{value}': {reason}")]
    InvalidAliasOffset { value: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
