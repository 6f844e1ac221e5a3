//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use lumen_crypto::{Keypair, Network};
use lumen_tx::{sign, TransactionBuilder};
use lumen_xdr::{
    Asset, Memo, MuxedAccount, Operation, OperationBody, Transaction, TransactionEnvelope,
    TransactionV1Envelope,
};

/// A test fixture with a keypair and a network.
pub struct TestFixture {
    pub keypair: Keypair,
    pub network: Network,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair on the test network.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::random(),
            network: Network::testnet(),
        }
    }

    /// Create with a deterministic keypair from a seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            network: Network::testnet(),
        }
    }

    /// The fixture account as a transaction source.
    pub fn source(&self) -> MuxedAccount {
        self.keypair.account_id().into()
    }

    /// The fixture account in its `G...` form.
    pub fn address(&self) -> String {
        self.keypair.address()
    }

    /// Build a native payment from the fixture account to itself.
    pub fn make_payment(&self, seq_num: i64, amount: i64) -> Transaction {
        TransactionBuilder::new(self.source(), seq_num)
            .add_operation(Operation::new(OperationBody::Payment {
                destination: self.source(),
                asset: Asset::Native,
                amount,
            }))
            .build()
            .expect("a single payment is always buildable")
    }

    /// Build a payment with a text memo.
    pub fn make_memo_payment(&self, seq_num: i64, amount: i64, memo: &str) -> Transaction {
        TransactionBuilder::new(self.source(), seq_num)
            .memo(Memo::text(memo).expect("memo fits"))
            .add_operation(Operation::new(OperationBody::Payment {
                destination: self.source(),
                asset: Asset::Native,
                amount,
            }))
            .build()
            .expect("a single payment is always buildable")
    }

    /// Build and sign a payment, returning the envelope.
    pub fn signed_payment(&self, seq_num: i64, amount: i64) -> TransactionEnvelope {
        let mut envelope = TransactionEnvelope::V1(TransactionV1Envelope {
            tx: self.make_payment(seq_num, amount),
            signatures: Vec::new(),
        });
        sign(&mut envelope, &self.keypair, &self.network);
        envelope
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0xf1;
            TestFixture::with_seed(seed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_tx::verify_signature;

    #[test]
    fn test_fixture_payment() {
        let fixture = TestFixture::with_seed([7; 32]);
        let tx = fixture.make_payment(1, 5_000_000);

        assert_eq!(tx.seq_num, 1);
        assert_eq!(tx.operations.len(), 1);
        assert_eq!(tx.source, fixture.source());
    }

    #[test]
    fn test_signed_payment_verifies() {
        let fixture = TestFixture::with_seed([7; 32]);
        let envelope = fixture.signed_payment(1, 5_000_000);

        assert_eq!(envelope.signatures().len(), 1);
        assert!(verify_signature(
            &envelope,
            &fixture.keypair.public_key(),
            &fixture.network
        ));
    }

    #[test]
    fn test_signed_payment_fails_against_other_key() {
        let fixture = TestFixture::with_seed([7; 32]);
        let other = TestFixture::with_seed([8; 32]);
        let envelope = fixture.signed_payment(1, 5_000_000);

        assert!(!verify_signature(
            &envelope,
            &other.keypair.public_key(),
            &other.network
        ));
    }

    #[test]
    fn test_multi_party() {
        let parties = multi_party_fixtures(3);

        let addrs: Vec<_> = parties.iter().map(|p| p.address()).collect();
        assert_ne!(addrs[0], addrs[1]);
        assert_ne!(addrs[1], addrs[2]);
        assert_ne!(addrs[0], addrs[2]);
    }

    #[test]
    fn test_fixture_envelope_renders_as_text() {
        let fixture = TestFixture::with_seed([7; 32]);
        let envelope = fixture.signed_payment(3, 1_000);

        let text = lumen_txrep::to_txrep(&envelope);
        assert_eq!(lumen_txrep::from_txrep(&text).unwrap(), envelope);
    }
}
