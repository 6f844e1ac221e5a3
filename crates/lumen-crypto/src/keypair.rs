//! Ed25519 keypairs in their address form.
//!
//! Wraps ed25519-dalek's SigningKey and speaks the checksummed address
//! strings: `G...` for the public side, `S...` for the seed.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use lumen_xdr::{AccountId, DecoratedSignature};

use crate::error::{CryptoError, Result};
use crate::strkey;

/// A keypair for signing transactions.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Create from a seed in its `S...` form.
    pub fn from_secret_seed(s: &str) -> Result<Self> {
        Ok(Self::from_seed(&strkey::decode_seed(s)?))
    }

    /// The raw public key bytes.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The public side as a wire account id.
    pub fn account_id(&self) -> AccountId {
        AccountId::from_bytes(self.public_key())
    }

    /// The public side in its `G...` form.
    pub fn address(&self) -> String {
        strkey::encode_account_id(&self.public_key())
    }

    /// The seed in its `S...` form.
    pub fn secret_seed(&self) -> String {
        strkey::encode_seed(&self.signing_key.to_bytes())
    }

    /// The last four bytes of the public key, used to label signatures.
    pub fn signature_hint(&self) -> [u8; 4] {
        let key = self.public_key();
        [key[28], key[29], key[30], key[31]]
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Sign a message and attach the hint.
    pub fn sign_decorated(&self, message: &[u8]) -> DecoratedSignature {
        DecoratedSignature {
            hint: self.signature_hint(),
            signature: self.sign(message).to_vec(),
        }
    }

    /// Verify a signature made by this keypair.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        verify(&self.public_key(), message, signature)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({})", self.address())
    }
}

/// Verify an Ed25519 signature against a raw public key.
pub fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8]) -> Result<()> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key).map_err(|_| CryptoError::InvalidPublicKey)?;
    let sig_bytes: [u8; 64] = signature
        .try_into()
        .map_err(|_| CryptoError::InvalidSignature)?;
    let sig = Signature::from_bytes(&sig_bytes);
    verifying_key
        .verify(message, &sig)
        .map_err(|_| CryptoError::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> [u8; 32] {
        std::array::from_fn(|i| i as u8)
    }

    #[test]
    fn test_known_seed_public_key() {
        let kp = Keypair::from_seed(&seed());
        assert_eq!(
            hex::encode(kp.public_key()),
            "03a107bff3ce10be1d70dd18e74bc09967e4d6309ba50d5f1ddc8664125531b8"
        );
        assert_eq!(kp.signature_hint(), [0x12, 0x55, 0x31, 0xb8]);
    }

    #[test]
    fn test_known_signature() {
        let kp = Keypair::from_seed(&seed());
        let sig = kp.sign(b"hello world");
        assert_eq!(
            hex::encode(sig),
            "c9e88a06c88855aa75f90bcfdc5a87b76a99c0d2044114b8931e72089e7b8c7a\
             c6b4a9776b57326f2d781aa8da8821fe6b4c7296fde0b63ca24d7f6343ac6a0a"
        );
        kp.verify(b"hello world", &sig).unwrap();
        assert_eq!(
            kp.verify(b"hello worlD", &sig),
            Err(CryptoError::InvalidSignature)
        );
    }

    #[test]
    fn test_secret_seed_roundtrip() {
        let kp = Keypair::from_seed(&seed());
        let s = kp.secret_seed();
        assert!(s.starts_with('S'));
        let restored = Keypair::from_secret_seed(&s).unwrap();
        assert_eq!(restored.public_key(), kp.public_key());
    }

    #[test]
    fn test_random_keypairs_differ() {
        let a = Keypair::random();
        let b = Keypair::random();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_sign_decorated() {
        let kp = Keypair::from_seed(&seed());
        let sig = kp.sign_decorated(b"msg");
        assert_eq!(sig.hint, kp.signature_hint());
        assert_eq!(sig.signature.len(), 64);
        kp.verify(b"msg", &sig.signature).unwrap();
    }

    #[test]
    fn test_verify_rejects_wrong_length() {
        let kp = Keypair::from_seed(&seed());
        assert_eq!(
            kp.verify(b"msg", &[0u8; 63]),
            Err(CryptoError::InvalidSignature)
        );
    }
}
