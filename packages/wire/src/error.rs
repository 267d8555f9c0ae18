//! Error types for the wire layer.

use thiserror::Error;

use crate::format::Format;

/// Errors raised while encoding or decoding messages.
///
/// `Decode` is the only error a well-configured codec produces at runtime;
/// `Encode` and `UnsupportedFormat` mean the codec itself is misconfigured.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Bytes did not match the expected message shape.
    #[error("decode error ({format}): expected {shape}: {message}")]
    Decode {
        format: Format,
        shape: &'static str,
        message: String,
    },

    /// A message could not be serialized.
    #[error("encode error ({format}): {shape}: {message}")]
    Encode {
        format: Format,
        shape: &'static str,
        message: String,
    },

    /// No codec is available for the format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(Format),

    /// A structured value is internally inconsistent.
    #[error("malformed {what}: {message}")]
    Malformed { what: &'static str, message: String },
}

impl Error {
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}

/// Result type alias for wire operations.
pub type Result<T> = std::result::Result<T, Error>;
