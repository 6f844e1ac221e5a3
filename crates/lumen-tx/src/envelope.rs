//! Signable hashes, signing, and fee-bump wrapping.
//!
//! The signable hash commits to the network: it is the SHA-256 of the
//! network id, then the envelope-type tag, then the encoded transaction.
//! Signing a hash for one network therefore produces a signature no other
//! network accepts.

use lumen_crypto::{sha256, Keypair, Network};
use lumen_xdr::{
    FeeBumpTransaction, FeeBumpTransactionEnvelope, MuxedAccount, Transaction,
    TransactionEnvelope, TransactionV1Envelope, XdrEncode,
};

use crate::error::{Result, TxError};

const ENVELOPE_TYPE_TX: u32 = 2;
const ENVELOPE_TYPE_TX_FEE_BUMP: u32 = 5;

fn signable_hash(network: &Network, tag: u32, tx_bytes: &[u8]) -> [u8; 32] {
    let mut payload = Vec::with_capacity(36 + tx_bytes.len());
    payload.extend_from_slice(&network.id());
    payload.extend_from_slice(&tag.to_be_bytes());
    payload.extend_from_slice(tx_bytes);
    sha256(&payload)
}

/// The hash a signer of `tx` commits to on `network`.
pub fn transaction_hash(tx: &Transaction, network: &Network) -> [u8; 32] {
    signable_hash(network, ENVELOPE_TYPE_TX, &tx.to_xdr())
}

/// The hash a signer of a fee bump commits to on `network`.
pub fn fee_bump_hash(tx: &FeeBumpTransaction, network: &Network) -> [u8; 32] {
    signable_hash(network, ENVELOPE_TYPE_TX_FEE_BUMP, &tx.to_xdr())
}

/// The signable hash at an envelope's own level.
///
/// Legacy v0 envelopes hash as their upgraded v1 form; a fee bump hashes
/// the outer wrapper, not the inner transaction.
pub fn envelope_hash(envelope: &TransactionEnvelope, network: &Network) -> [u8; 32] {
    match envelope {
        TransactionEnvelope::V0(e) => transaction_hash(&e.tx.upgrade(), network),
        TransactionEnvelope::V1(e) => transaction_hash(&e.tx, network),
        TransactionEnvelope::FeeBump(e) => fee_bump_hash(&e.tx, network),
    }
}

/// Sign an envelope for `network` and append the decorated signature.
///
/// Signatures accumulate in call order; signing twice with the same key
/// appends twice.
pub fn sign(envelope: &mut TransactionEnvelope, keypair: &Keypair, network: &Network) {
    let hash = envelope_hash(envelope, network);
    let sig = keypair.sign_decorated(&hash);
    tracing::debug!(
        hint = %hex::encode(sig.hint),
        hash = %hex::encode(hash),
        "signed envelope"
    );
    envelope.push_signature(sig);
}

/// True when any attached signature is a valid signature by `public_key`
/// over the envelope's hash on `network`.
pub fn verify_signature(
    envelope: &TransactionEnvelope,
    public_key: &[u8; 32],
    network: &Network,
) -> bool {
    let hash = envelope_hash(envelope, network);
    envelope
        .signatures()
        .iter()
        .any(|sig| lumen_crypto::verify(public_key, &hash, &sig.signature).is_ok())
}

/// Builder for wrapping a signed v1 envelope in a fee bump.
#[derive(Debug, Clone)]
pub struct FeeBumpBuilder {
    fee_source: MuxedAccount,
    fee: i64,
    inner: TransactionV1Envelope,
}

impl FeeBumpBuilder {
    /// Start a fee bump paid by `fee_source` around `inner`.
    pub fn new(fee_source: MuxedAccount, inner: TransactionV1Envelope) -> Self {
        Self {
            fee_source,
            fee: 0,
            inner,
        }
    }

    /// Set the replacement fee in stroops.
    pub fn fee(mut self, fee: i64) -> Self {
        self.fee = fee;
        self
    }

    /// Wrap, validating that the new fee covers the inner fee with one
    /// extra operation slot for the bump itself.
    pub fn build(self) -> Result<TransactionEnvelope> {
        let required = self.inner.tx.fee as i64 * (1 + self.inner.tx.operations.len() as i64);
        if self.fee < required {
            return Err(TxError::FeeBumpFeeTooLow {
                required,
                provided: self.fee,
            });
        }
        tracing::debug!(fee = self.fee, required, "built fee bump");
        Ok(TransactionEnvelope::FeeBump(FeeBumpTransactionEnvelope {
            tx: FeeBumpTransaction {
                fee_source: self.fee_source,
                fee: self.fee,
                inner: self.inner,
            },
            signatures: Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransactionBuilder;
    use lumen_xdr::{Asset, Operation, OperationBody};

    fn keypair() -> Keypair {
        Keypair::from_seed(&std::array::from_fn(|i| i as u8))
    }

    fn sample_envelope() -> TransactionEnvelope {
        let kp = keypair();
        let tx = TransactionBuilder::new(MuxedAccount::Ed25519(kp.public_key()), 7)
            .add_operation(Operation::new(OperationBody::Payment {
                destination: MuxedAccount::Ed25519(kp.public_key()),
                asset: Asset::Native,
                amount: 50,
            }))
            .build()
            .unwrap();
        TransactionEnvelope::V1(TransactionV1Envelope {
            tx,
            signatures: Vec::new(),
        })
    }

    #[test]
    fn test_sign_and_verify() {
        let kp = keypair();
        let network = Network::testnet();
        let mut env = sample_envelope();
        sign(&mut env, &kp, &network);
        assert_eq!(env.signatures().len(), 1);
        assert_eq!(env.signatures()[0].hint, kp.signature_hint());
        assert!(verify_signature(&env, &kp.public_key(), &network));
    }

    #[test]
    fn test_network_domain_separation() {
        let kp = keypair();
        let mut env = sample_envelope();
        sign(&mut env, &kp, &Network::testnet());
        assert!(!verify_signature(&env, &kp.public_key(), &Network::public()));
    }

    #[test]
    fn test_duplicate_signatures_appended() {
        let kp = keypair();
        let network = Network::testnet();
        let mut env = sample_envelope();
        sign(&mut env, &kp, &network);
        sign(&mut env, &kp, &network);
        assert_eq!(env.signatures().len(), 2);
        assert_eq!(env.signatures()[0], env.signatures()[1]);
    }

    #[test]
    fn test_fee_bump_wraps_and_hashes_outer() {
        let kp = keypair();
        let network = Network::testnet();
        let mut env = sample_envelope();
        sign(&mut env, &kp, &network);
        let inner = match env {
            TransactionEnvelope::V1(e) => e,
            _ => unreachable!(),
        };
        let inner_hash = transaction_hash(&inner.tx, &network);

        let bumped = FeeBumpBuilder::new(MuxedAccount::Ed25519([9; 32]), inner)
            .fee(400)
            .build()
            .unwrap();
        assert_ne!(envelope_hash(&bumped, &network), inner_hash);
    }

    #[test]
    fn test_fee_bump_fee_floor() {
        let env = sample_envelope();
        let inner = match env {
            TransactionEnvelope::V1(e) => e,
            _ => unreachable!(),
        };
        // Inner fee 100, one op: outer must be at least 200.
        let result = FeeBumpBuilder::new(MuxedAccount::Ed25519([9; 32]), inner)
            .fee(199)
            .build();
        assert_eq!(
            result,
            Err(TxError::FeeBumpFeeTooLow {
                required: 200,
                provided: 199
            })
        );
    }

    #[test]
    fn test_v0_envelope_hashes_as_upgraded() {
        let env = sample_envelope();
        let (tx, network) = match &env {
            TransactionEnvelope::V1(e) => (e.tx.clone(), Network::testnet()),
            _ => unreachable!(),
        };
        let v0 = lumen_xdr::TransactionV0 {
            source_ed25519: *tx.source.account_id().as_bytes(),
            fee: tx.fee,
            seq_num: tx.seq_num,
            time_bounds: None,
            memo: tx.memo.clone(),
            operations: tx.operations.clone(),
        };
        let v0_env = TransactionEnvelope::V0(lumen_xdr::TransactionV0Envelope {
            tx: v0,
            signatures: Vec::new(),
        });
        assert_eq!(
            envelope_hash(&v0_env, &network),
            transaction_hash(&tx, &network)
        );
    }
}
