//! Error types for parsing the primitive text forms.

use thiserror::Error;

/// Failure while decoding one of the fixed-width text forms.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Decoded byte length does not match the type's width.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Input was not valid lowercase hex of the expected width.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Input was not valid standard base64.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}
