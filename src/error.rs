//! Compass error types.
//!
//! Every failure is returned to the immediate caller. The codec never logs
//! an error in place of returning it.
//!
//! Decode failures are grouped under [`DecodeError`] so callers can treat
//! "this is not something our codec produced" as a single case while still
//! being able to inspect why.

use thiserror::Error;

/// Reasons an encoded string could not be turned back into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Empty input. No Brotli stream is zero bytes long.
    #[error("empty input is not a compressed stream")]
    EmptyInput,

    /// Character outside `[A-Za-z0-9-_]`.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// Offending character.
        character: char,
        /// Character index in the input.
        position: usize,
    },

    /// Encoded length leaves a remainder of 1 modulo 4.
    #[error("invalid encoded length {0}")]
    InvalidLength(usize),

    /// Structurally invalid base64.
    #[error("base64 decode error: {0}")]
    Base64(String),

    /// Not a well-formed Brotli stream (truncated, garbage, or empty).
    #[error("corrupt compressed data: {0}")]
    CorruptData(String),

    /// Decompressed payload is not UTF-8.
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// Decompressed payload exceeds the configured limit.
    #[error("decompressed payload exceeds {limit} bytes")]
    TooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },
}

/// Compass errors.
#[derive(Error, Debug)]
pub enum CompassError {
    /// Backend construction failed. Fatal, never retried.
    #[error("Backend initialization failed: {0}")]
    Initialization(String),

    /// Synchronous codec call before the backend became ready.
    #[error("Compressor not initialized; await ensure_ready() or use the async API")]
    NotInitialized,

    /// Input is not valid data produced by this codec.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Compression operation failed.
    #[error("Compression error: {0}")]
    Compression(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Network communication error.
    #[error("Network error: {0}")]
    Network(String),

    /// Remote endpoint answered with a non-success status.
    #[error("Remote error ({status}): {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompassError {
    /// True for any failure that means "not valid compressed data".
    pub fn is_decode(&self) -> bool {
        matches!(self, CompassError::Decode(_))
    }
}

/// Result type alias for Compass operations
pub type Result<T> = std::result::Result<T, CompassError>;

impl From<reqwest::Error> for CompassError {
    fn from(err: reqwest::Error) -> Self {
        CompassError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for CompassError {
    fn from(err: toml::de::Error) -> Self {
        CompassError::Config(format!("Failed to parse config: {err}"))
    }
}

impl From<base64::DecodeError> for DecodeError {
    fn from(err: base64::DecodeError) -> Self {
        DecodeError::Base64(err.to_string())
    }
}

impl From<base64::DecodeError> for CompassError {
    fn from(err: base64::DecodeError) -> Self {
        CompassError::Decode(err.into())
    }
}
