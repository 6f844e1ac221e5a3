//! # Lumen Tx
//!
//! Building and signing transactions.
//!
//! The builder accumulates operations and options, `build()` freezes them
//! into an immutable transaction, and the signing functions derive the
//! network-scoped hash and attach decorated signatures. A signed v1
//! envelope can then be wrapped in a fee bump.
//!
//! ## Key Types
//!
//! - [`TransactionBuilder`] - Mutable accumulation into a `Transaction`
//! - [`FeeBumpBuilder`] - Wraps a signed v1 envelope with a new fee payer
//! - [`sign`] / [`verify_signature`] / [`envelope_hash`] - Signature plumbing

pub mod builder;
pub mod envelope;
pub mod error;

pub use builder::{TransactionBuilder, BASE_FEE};
pub use envelope::{
    envelope_hash, fee_bump_hash, sign, transaction_hash, verify_signature, FeeBumpBuilder,
};
pub use error::{Result, TxError};
