//! Error types for building and signing transactions.

use lumen_crypto::CryptoError;
use thiserror::Error;

/// Errors from the builder and signer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    /// A transaction must carry at least one operation.
    #[error("transaction has no operations")]
    NoOperations,

    /// A transaction carries at most 100 operations.
    #[error("transaction has {0} operations, maximum is 100")]
    TooManyOperations(usize),

    /// The fee-bump fee does not cover the inner transaction plus its own
    /// slot.
    #[error("fee-bump fee {provided} is below the required {required}")]
    FeeBumpFeeTooLow { required: i64, provided: i64 },

    /// A key or signature error from the crypto layer.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

pub type Result<T> = std::result::Result<T, TxError>;
