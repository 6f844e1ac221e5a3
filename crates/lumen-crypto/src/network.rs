//! Network identities.
//!
//! A network is named by a passphrase; its 32-byte id is the SHA-256 of
//! that passphrase and is mixed into every signable transaction hash, so a
//! signature made for one network is invalid on every other.

use sha2::{Digest, Sha256};

/// A network, identified by its passphrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    passphrase: String,
}

impl Network {
    /// The public production network.
    pub fn public() -> Self {
        Self::new("Public Global Stellar Network ; September 2015")
    }

    /// The shared test network.
    pub fn testnet() -> Self {
        Self::new("Test SDF Network ; September 2015")
    }

    /// A network with an arbitrary passphrase (private and standalone
    /// networks).
    pub fn new(passphrase: &str) -> Self {
        Self {
            passphrase: passphrase.to_string(),
        }
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// The network id: SHA-256 of the passphrase.
    pub fn id(&self) -> [u8; 32] {
        Sha256::digest(self.passphrase.as_bytes()).into()
    }
}

/// SHA-256 of arbitrary bytes. Transaction hashes use this.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testnet_id() {
        assert_eq!(
            hex::encode(Network::testnet().id()),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }

    #[test]
    fn test_public_id() {
        assert_eq!(
            hex::encode(Network::public().id()),
            "7ac33997544e3175d266bd022439b22cdb16508c01163f26e5cb2a3e1045a979"
        );
    }

    #[test]
    fn test_custom_passphrase() {
        let a = Network::new("Standalone Network ; February 2017");
        let b = Network::new("Standalone Network ; February 2017");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), Network::testnet().id());
    }
}
