//! # Lumen Testkit
//!
//! Testing utilities for the Lumen SDK.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed transactions with pinned hashes and
//!   signatures for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the signable hash for fixed inputs:
//!
//! ```rust
//! use lumen_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, tx_hash) in verify_all_vectors() {
//!     assert!(matches, "{name} diverged: {tx_hash}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use lumen_testkit::generators::{tx_from_params, TxParams};
//!
//! proptest! {
//!     #[test]
//!     fn builds_deterministically(params: TxParams) {
//!         prop_assert_eq!(tx_from_params(&params), tx_from_params(&params));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use lumen_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([7; 32]);
//! let envelope = fixture.signed_payment(1, 5_000_000);
//! assert_eq!(envelope.signatures().len(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{tx_from_params, TxParams};
pub use vectors::{
    all_vectors, signed_envelope_from_vector, transaction_from_vector, verify_all_vectors,
    GoldenVector,
};
