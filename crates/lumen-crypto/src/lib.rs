//! # Lumen Crypto
//!
//! Ed25519 keys, checksummed address strings, and network identities.
//!
//! ## Key Types
//!
//! - [`Keypair`] - An Ed25519 signing key that speaks `G...`/`S...` strings
//! - [`Network`] - A passphrase-named network whose id salts signable hashes
//! - [`strkey`] - Encode/decode for every address kind (`G M C P S T X`)

pub mod error;
pub mod keypair;
pub mod network;
pub mod strkey;

pub use error::{CryptoError, Result};
pub use keypair::{verify, Keypair};
pub use network::{sha256, Network};
