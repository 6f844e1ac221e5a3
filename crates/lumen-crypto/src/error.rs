//! Error types for key handling and address encoding.

use thiserror::Error;

/// Errors from keys, signatures, and checksummed address strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The string is not valid unpadded base32.
    #[error("invalid base32 encoding")]
    InvalidEncoding,

    /// The trailing checksum does not match the payload.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// The version byte names a different key kind than the caller asked for.
    #[error("wrong key kind: expected {expected}, found version byte {found:#04x}")]
    WrongVersion {
        expected: &'static str,
        found: u8,
    },

    /// The decoded payload has the wrong length for its key kind.
    #[error("invalid payload length {0} for key kind")]
    InvalidPayloadLength(usize),

    /// The bytes do not form a valid Ed25519 public key.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Signature verification failed.
    #[error("signature verification failed")]
    InvalidSignature,
}

pub type Result<T> = std::result::Result<T, CryptoError>;
