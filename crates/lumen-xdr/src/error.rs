//! Error types for XDR encoding and decoding.

use thiserror::Error;

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, XdrError>;

/// Errors raised while decoding or constructing wire values.
///
/// All decode errors are fatal to the current decode call: the partially
/// built value is discarded and the error propagates to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid boolean value {0} (must be 0 or 1)")]
    InvalidBoolean(u32),

    #[error("invalid discriminant {value} for {ty}")]
    InvalidDiscriminant { ty: &'static str, value: u32 },

    #[error("non-zero padding byte")]
    InvalidPadding,

    #[error("{ty} length {len} exceeds maximum {max}")]
    LengthExceedsMax {
        ty: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{0} trailing bytes after decode")]
    TrailingBytes(usize),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("invalid base64")]
    InvalidBase64,

    #[error("invalid asset code")]
    InvalidAssetCode,

    #[error("value out of range for {0}")]
    OutOfRange(&'static str),
}
