//! Proptest generators for property-based testing.

use proptest::prelude::*;

use lumen_crypto::Keypair;
use lumen_tx::TransactionBuilder;
use lumen_xdr::{
    AccountId, Asset, ClaimPredicate, Hash256, Memo, MuxedAccount, Operation, OperationBody,
    Price, ScMapEntry, ScVal, SignerKey, Transaction,
};

/// Generate a keypair from an arbitrary seed.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random AccountId.
pub fn account_id() -> impl Strategy<Value = AccountId> {
    any::<[u8; 32]>().prop_map(AccountId::from_bytes)
}

/// Generate a random muxed account, bare or with a multiplexing id.
pub fn muxed_account() -> impl Strategy<Value = MuxedAccount> {
    prop_oneof![
        any::<[u8; 32]>().prop_map(MuxedAccount::Ed25519),
        (any::<u64>(), any::<[u8; 32]>())
            .prop_map(|(id, key)| MuxedAccount::MuxedEd25519 { id, key }),
    ]
}

/// Generate a random Hash256.
pub fn hash256() -> impl Strategy<Value = Hash256> {
    any::<[u8; 32]>().prop_map(Hash256::from_bytes)
}

/// Generate a random asset, native or credit of either code width.
pub fn asset() -> impl Strategy<Value = Asset> {
    prop_oneof![
        Just(Asset::Native),
        ("[A-Z][A-Z0-9]{0,3}", account_id())
            .prop_map(|(code, issuer)| Asset::credit(&code, issuer).expect("code fits")),
        ("[A-Z][A-Z0-9]{4,11}", account_id())
            .prop_map(|(code, issuer)| Asset::credit(&code, issuer).expect("code fits")),
    ]
}

/// Generate a positive amount in stroops.
pub fn amount() -> impl Strategy<Value = i64> {
    1i64..=i64::MAX
}

/// Generate a price with positive terms.
pub fn price() -> impl Strategy<Value = Price> {
    (1i32..=i32::MAX, 1i32..=i32::MAX).prop_map(|(n, d)| Price { n, d })
}

/// Generate a memo of any kind.
pub fn memo() -> impl Strategy<Value = Memo> {
    prop_oneof![
        Just(Memo::None),
        "[a-zA-Z0-9 ]{0,28}".prop_map(|s| Memo::text(&s).expect("text fits")),
        any::<u64>().prop_map(Memo::Id),
        hash256().prop_map(Memo::Hash),
        hash256().prop_map(Memo::Return),
    ]
}

/// Generate a signer key of any kind.
pub fn signer_key() -> impl Strategy<Value = SignerKey> {
    prop_oneof![
        any::<[u8; 32]>().prop_map(SignerKey::Ed25519),
        hash256().prop_map(SignerKey::PreAuthTx),
        hash256().prop_map(SignerKey::HashX),
        (any::<[u8; 32]>(), prop::collection::vec(any::<u8>(), 1..=64)).prop_map(
            |(key, payload)| {
                SignerKey::ed25519_signed_payload(key, payload).expect("payload fits")
            }
        ),
    ]
}

/// Generate a claim predicate tree within the operand and depth limits.
pub fn claim_predicate() -> impl Strategy<Value = ClaimPredicate> {
    let leaf = prop_oneof![
        Just(ClaimPredicate::Unconditional),
        (0i64..=i64::MAX).prop_map(ClaimPredicate::BeforeAbsoluteTime),
        (0i64..=i64::MAX).prop_map(ClaimPredicate::BeforeRelativeTime),
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..=2).prop_map(ClaimPredicate::And),
            prop::collection::vec(inner.clone(), 1..=2).prop_map(ClaimPredicate::Or),
            inner.prop_map(|p| ClaimPredicate::Not(Some(Box::new(p)))),
        ]
    })
}

/// Generate a contract value tree.
pub fn sc_val() -> impl Strategy<Value = ScVal> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(ScVal::Bool),
        Just(ScVal::Void),
        any::<u32>().prop_map(ScVal::U32),
        any::<i32>().prop_map(ScVal::I32),
        any::<u64>().prop_map(ScVal::U64),
        any::<i64>().prop_map(ScVal::I64),
        any::<u64>().prop_map(ScVal::Timepoint),
        any::<u128>().prop_map(ScVal::u128),
        any::<i128>().prop_map(ScVal::i128),
        prop::collection::vec(any::<u8>(), 0..=32).prop_map(ScVal::Bytes),
        "[a-zA-Z0-9 ]{0,16}".prop_map(ScVal::String),
        "[a-zA-Z_][a-zA-Z0-9_]{0,31}".prop_map(|s| ScVal::symbol(&s).expect("symbol fits")),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..=4).prop_map(ScVal::vec),
            prop::collection::vec((inner.clone(), inner), 0..=3).prop_map(|kvs| {
                ScVal::map(
                    kvs.into_iter()
                        .map(|(key, val)| ScMapEntry { key, val })
                        .collect(),
                )
            }),
        ]
    })
}

/// Generate a representative operation body.
pub fn operation_body() -> impl Strategy<Value = OperationBody> {
    prop_oneof![
        (account_id(), amount()).prop_map(|(destination, starting_balance)| {
            OperationBody::CreateAccount {
                destination,
                starting_balance,
            }
        }),
        (muxed_account(), asset(), amount()).prop_map(|(destination, asset, amount)| {
            OperationBody::Payment {
                destination,
                asset,
                amount,
            }
        }),
        (asset(), amount()).prop_map(|(line, limit)| OperationBody::ChangeTrust {
            line: line.into(),
            limit,
        }),
        ("[a-z]{1,64}", prop::option::of(prop::collection::vec(any::<u8>(), 0..=64))).prop_map(
            |(data_name, data_value)| OperationBody::ManageData {
                data_name,
                data_value,
            }
        ),
        any::<i64>().prop_map(|bump_to| OperationBody::BumpSequence { bump_to }),
        (asset(), asset(), amount(), price(), any::<i64>()).prop_map(
            |(selling, buying, amount, price, offer_id)| OperationBody::ManageSellOffer {
                selling,
                buying,
                amount,
                price,
                offer_id,
            }
        ),
    ]
}

/// Parameters for generating a single-payment transaction.
#[derive(Debug, Clone)]
pub struct TxParams {
    pub seed: [u8; 32],
    pub seq_num: i64,
    pub fee: u32,
    pub amount: i64,
    pub memo: Memo,
}

impl Arbitrary for TxParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(),
            1i64..=i64::MAX / 2,
            100u32..=1_000_000u32,
            1i64..=i64::MAX / 2,
            memo(),
        )
            .prop_map(|(seed, seq_num, fee, amount, memo)| TxParams {
                seed,
                seq_num,
                fee,
                amount,
                memo,
            })
            .boxed()
    }
}

/// Build the transaction a `TxParams` describes.
pub fn tx_from_params(params: &TxParams) -> Transaction {
    let keypair = Keypair::from_seed(&params.seed);
    let source: MuxedAccount = keypair.account_id().into();
    TransactionBuilder::new(source.clone(), params.seq_num)
        .fee(params.fee)
        .memo(params.memo.clone())
        .add_operation(Operation::new(OperationBody::Payment {
            destination: source,
            asset: Asset::Native,
            amount: params.amount,
        }))
        .build()
        .expect("a single payment is always buildable")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_crypto::Network;
    use lumen_tx::{sign, transaction_hash, verify_signature};
    use lumen_xdr::{TransactionEnvelope, TransactionV1Envelope, XdrDecode, XdrEncode};

    proptest! {
        #[test]
        fn test_tx_hash_deterministic(params: TxParams) {
            let network = Network::testnet();
            let t1 = tx_from_params(&params);
            let t2 = tx_from_params(&params);

            prop_assert_eq!(
                transaction_hash(&t1, &network),
                transaction_hash(&t2, &network)
            );
        }

        #[test]
        fn test_envelope_survives_wire(params: TxParams) {
            let envelope = TransactionEnvelope::V1(TransactionV1Envelope {
                tx: tx_from_params(&params),
                signatures: Vec::new(),
            });
            let bytes = envelope.to_xdr();
            prop_assert_eq!(TransactionEnvelope::from_xdr(&bytes).unwrap(), envelope);
        }

        #[test]
        fn test_signed_envelope_verifies(params: TxParams) {
            let network = Network::testnet();
            let keypair = Keypair::from_seed(&params.seed);
            let mut envelope = TransactionEnvelope::V1(TransactionV1Envelope {
                tx: tx_from_params(&params),
                signatures: Vec::new(),
            });
            sign(&mut envelope, &keypair, &network);

            prop_assert!(verify_signature(&envelope, &keypair.public_key(), &network));
        }

        #[test]
        fn test_operation_survives_text(body in operation_body()) {
            let envelope = TransactionEnvelope::V1(TransactionV1Envelope {
                tx: Transaction {
                    source: MuxedAccount::Ed25519([1; 32]),
                    fee: 100,
                    seq_num: 1,
                    cond: lumen_xdr::Preconditions::None,
                    memo: Memo::None,
                    operations: vec![Operation::new(body)],
                    ext: lumen_xdr::TransactionExt::V0,
                },
                signatures: Vec::new(),
            });
            let text = lumen_txrep::to_txrep(&envelope);
            prop_assert_eq!(lumen_txrep::from_txrep(&text).unwrap(), envelope);
        }

        #[test]
        fn test_sc_val_survives_wire(val in sc_val()) {
            let bytes = val.to_xdr();
            prop_assert_eq!(ScVal::from_xdr(&bytes).unwrap(), val);
        }

        #[test]
        fn test_predicate_operands_bounded(predicate in claim_predicate()) {
            fn check(p: &ClaimPredicate) -> bool {
                match p {
                    ClaimPredicate::And(ops) | ClaimPredicate::Or(ops) => {
                        ops.len() <= 2 && ops.iter().all(check)
                    }
                    ClaimPredicate::Not(Some(inner)) => check(inner),
                    _ => true,
                }
            }
            prop_assert!(check(&predicate));
        }
    }
}
