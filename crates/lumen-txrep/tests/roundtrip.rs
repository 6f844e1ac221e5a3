//! Text-form round-trips across every operation and envelope kind.

use lumen_txrep::{from_txrep, to_txrep, to_txrep_with, TxRepError, TxRepOptions};
use lumen_xdr::{
    AccountId, Asset, AssetCode, ChangeTrustAsset, ClaimPredicate, Claimant, ClaimableBalanceId,
    ContractDataDurability, ContractExecutable, ContractIdPreimage, CreateContractArgs,
    DecoratedSignature, FeeBumpTransaction, FeeBumpTransactionEnvelope, Hash256, HostFunction,
    InvokeContractArgs, LedgerFootprint, LedgerKey, Memo, MuxedAccount, Operation, OperationBody,
    Preconditions, PreconditionsV2, Price, RevokeSponsorship, ScAddress, ScSymbol, ScVal, Signer,
    SignerKey, SorobanAddressCredentials, SorobanAuthorizationEntry, SorobanAuthorizedFunction,
    SorobanAuthorizedInvocation, SorobanCredentials, SorobanResources, SorobanTransactionData,
    TimeBounds, Transaction, TransactionEnvelope, TransactionExt, TransactionV0,
    TransactionV0Envelope, TransactionV1Envelope,
};

const SOURCE: &str = "GBCJLPKHE2QTXTYZNZG6K3OBRPHJHABT2MG6JLAMM5FOARHM2GL67VCW";

fn account(byte: u8) -> AccountId {
    AccountId::from_bytes([byte; 32])
}

fn muxed(byte: u8) -> MuxedAccount {
    MuxedAccount::Ed25519([byte; 32])
}

fn credit(code: &str) -> Asset {
    Asset::credit(code, account(7)).unwrap()
}

fn envelope(body: OperationBody) -> TransactionEnvelope {
    TransactionEnvelope::V1(TransactionV1Envelope {
        tx: Transaction {
            source: muxed(1),
            fee: 100,
            seq_num: 42,
            cond: Preconditions::None,
            memo: Memo::None,
            operations: vec![Operation {
                source: None,
                body,
            }],
            ext: TransactionExt::V0,
        },
        signatures: Vec::new(),
    })
}

fn invoke_args() -> InvokeContractArgs {
    InvokeContractArgs {
        contract_address: ScAddress::Contract(Hash256::from_bytes([9; 32])),
        function_name: ScSymbol::new("transfer").unwrap(),
        args: vec![ScVal::U32(7), ScVal::symbol("to").unwrap()],
    }
}

fn create_args() -> CreateContractArgs {
    CreateContractArgs {
        contract_id_preimage: ContractIdPreimage::Address {
            address: ScAddress::Account(account(3)),
            salt: Hash256::from_bytes([4; 32]),
        },
        executable: ContractExecutable::Wasm(Hash256::from_bytes([5; 32])),
    }
}

fn all_bodies() -> Vec<OperationBody> {
    vec![
        OperationBody::CreateAccount {
            destination: account(2),
            starting_balance: 10_000_000,
        },
        OperationBody::Payment {
            destination: muxed(2),
            asset: credit("USD"),
            amount: 25,
        },
        OperationBody::PathPaymentStrictReceive {
            send_asset: Asset::Native,
            send_max: 100,
            destination: muxed(2),
            dest_asset: credit("EUR"),
            dest_amount: 99,
            path: vec![credit("USD"), credit("LONGCODE")],
        },
        OperationBody::ManageSellOffer {
            selling: Asset::Native,
            buying: credit("USD"),
            amount: 500,
            price: Price { n: 3, d: 2 },
            offer_id: 77,
        },
        OperationBody::CreatePassiveSellOffer {
            selling: credit("USD"),
            buying: Asset::Native,
            amount: 10,
            price: Price { n: 1, d: 4 },
        },
        OperationBody::SetOptions {
            inflation_dest: Some(account(2)),
            clear_flags: None,
            set_flags: Some(1),
            master_weight: Some(255),
            low_threshold: None,
            med_threshold: Some(2),
            high_threshold: Some(3),
            home_domain: Some("example.com".to_string()),
            signer: Some(Signer {
                key: SignerKey::Ed25519([6; 32]),
                weight: 10,
            }),
        },
        OperationBody::ChangeTrust {
            line: ChangeTrustAsset::from(credit("USD")),
            limit: i64::MAX,
        },
        OperationBody::AllowTrust {
            trustor: account(2),
            asset: AssetCode::new("USD").unwrap(),
            authorize: 1,
        },
        OperationBody::AccountMerge {
            destination: muxed(2),
        },
        OperationBody::Inflation,
        OperationBody::ManageData {
            data_name: "config v2".to_string(),
            data_value: Some(vec![1, 2, 3]),
        },
        OperationBody::BumpSequence { bump_to: 12345 },
        OperationBody::ManageBuyOffer {
            selling: Asset::Native,
            buying: credit("USD"),
            buy_amount: 11,
            price: Price { n: 5, d: 9 },
            offer_id: 0,
        },
        OperationBody::PathPaymentStrictSend {
            send_asset: credit("USD"),
            send_amount: 1,
            destination: muxed(2),
            dest_asset: Asset::Native,
            dest_min: 1,
            path: vec![],
        },
        OperationBody::CreateClaimableBalance {
            asset: Asset::Native,
            amount: 1000,
            claimants: vec![Claimant::V0 {
                destination: account(2),
                predicate: ClaimPredicate::And(vec![
                    ClaimPredicate::BeforeAbsoluteTime(1_700_000_000),
                    ClaimPredicate::Not(Some(Box::new(ClaimPredicate::BeforeRelativeTime(60)))),
                ]),
            }],
        },
        OperationBody::ClaimClaimableBalance {
            balance_id: ClaimableBalanceId::V0(Hash256::from_bytes([8; 32])),
        },
        OperationBody::BeginSponsoringFutureReserves {
            sponsored_id: account(2),
        },
        OperationBody::EndSponsoringFutureReserves,
        OperationBody::RevokeSponsorship(RevokeSponsorship::LedgerEntry(LedgerKey::TrustLine {
            account_id: account(2),
            asset: credit("USD").into(),
        })),
        OperationBody::Clawback {
            asset: credit("USD"),
            from: muxed(2),
            amount: 30,
        },
        OperationBody::ClawbackClaimableBalance {
            balance_id: ClaimableBalanceId::V0(Hash256::from_bytes([8; 32])),
        },
        OperationBody::SetTrustLineFlags {
            trustor: account(2),
            asset: credit("USD"),
            clear_flags: 2,
            set_flags: 1,
        },
        OperationBody::LiquidityPoolDeposit {
            pool_id: Hash256::from_bytes([9; 32]),
            max_amount_a: 100,
            max_amount_b: 200,
            min_price: Price { n: 1, d: 2 },
            max_price: Price { n: 2, d: 1 },
        },
        OperationBody::LiquidityPoolWithdraw {
            pool_id: Hash256::from_bytes([9; 32]),
            amount: 50,
            min_amount_a: 10,
            min_amount_b: 20,
        },
        OperationBody::InvokeHostFunction {
            host_function: HostFunction::InvokeContract(invoke_args()),
            auth: vec![SorobanAuthorizationEntry {
                credentials: SorobanCredentials::Address(SorobanAddressCredentials {
                    address: ScAddress::Account(account(3)),
                    nonce: 99,
                    signature_expiration_ledger: 1000,
                    signature: ScVal::Void,
                }),
                root_invocation: SorobanAuthorizedInvocation {
                    function: SorobanAuthorizedFunction::ContractFn(invoke_args()),
                    sub_invocations: vec![SorobanAuthorizedInvocation {
                        function: SorobanAuthorizedFunction::CreateContractHostFn(create_args()),
                        sub_invocations: vec![],
                    }],
                },
            }],
        },
        OperationBody::ExtendFootprintTtl { extend_to: 10_000 },
        OperationBody::RestoreFootprint,
    ]
}

#[test]
fn roundtrip_every_operation() {
    for body in all_bodies() {
        let original = envelope(body);
        let text = to_txrep(&original);
        let parsed = from_txrep(&text).unwrap();
        assert_eq!(parsed, original, "text was:\n{text}");
    }
}

#[test]
fn roundtrip_six_claimants_with_nested_predicates() {
    use ClaimPredicate::*;

    let predicates = vec![
        Unconditional,
        And(vec![BeforeAbsoluteTime(1_700_000_000), BeforeRelativeTime(3600)]),
        Or(vec![Unconditional, BeforeAbsoluteTime(1_800_000_000)]),
        Not(Some(Box::new(BeforeRelativeTime(60)))),
        Not(None),
        And(vec![
            Or(vec![Not(Some(Box::new(Unconditional))), BeforeRelativeTime(7)]),
            BeforeAbsoluteTime(9),
        ]),
    ];
    let claimants = predicates
        .into_iter()
        .enumerate()
        .map(|(i, predicate)| Claimant::V0 {
            destination: account(i as u8 + 10),
            predicate,
        })
        .collect();
    let original = envelope(OperationBody::CreateClaimableBalance {
        asset: Asset::Native,
        amount: 600,
        claimants,
    });

    let text = to_txrep(&original);
    assert_eq!(from_txrep(&text).unwrap(), original);
    assert_eq!(to_txrep(&from_txrep(&text).unwrap()), text);
}

#[test]
fn roundtrip_v0_envelope() {
    let original = TransactionEnvelope::V0(TransactionV0Envelope {
        tx: TransactionV0 {
            source_ed25519: [1; 32],
            fee: 100,
            seq_num: 7,
            time_bounds: Some(TimeBounds {
                min_time: 100,
                max_time: 200,
            }),
            memo: Memo::text("hi").unwrap(),
            operations: vec![Operation {
                source: None,
                body: OperationBody::Inflation,
            }],
        },
        signatures: vec![DecoratedSignature {
            hint: [1, 2, 3, 4],
            signature: vec![9; 64],
        }],
    });
    let text = to_txrep(&original);
    assert_eq!(from_txrep(&text).unwrap(), original);
}

#[test]
fn roundtrip_fee_bump_envelope() {
    let TransactionEnvelope::V1(inner) = envelope(OperationBody::Payment {
        destination: muxed(2),
        asset: Asset::Native,
        amount: 5,
    }) else {
        unreachable!()
    };
    let original = TransactionEnvelope::FeeBump(FeeBumpTransactionEnvelope {
        tx: FeeBumpTransaction {
            fee_source: MuxedAccount::MuxedEd25519 {
                id: 5050,
                key: [3; 32],
            },
            fee: 400,
            inner,
        },
        signatures: vec![DecoratedSignature {
            hint: [0xde, 0xad, 0xbe, 0xef],
            signature: vec![7; 64],
        }],
    });
    let text = to_txrep(&original);
    assert!(text.starts_with("type: ENVELOPE_TYPE_TX_FEE_BUMP\n"));
    assert_eq!(from_txrep(&text).unwrap(), original);
}

#[test]
fn roundtrip_preconditions_v2_and_memo_hash() {
    let mut env = envelope(OperationBody::BumpSequence { bump_to: 1 });
    let TransactionEnvelope::V1(e) = &mut env else {
        unreachable!()
    };
    e.tx.cond = Preconditions::V2(PreconditionsV2 {
        time_bounds: Some(TimeBounds {
            min_time: 1,
            max_time: 2,
        }),
        ledger_bounds: None,
        min_seq_num: Some(40),
        min_seq_age: 3600,
        min_seq_ledger_gap: 5,
        extra_signers: vec![
            SignerKey::Ed25519([1; 32]),
            SignerKey::ed25519_signed_payload([2; 32], vec![1, 2, 3]).unwrap(),
        ],
    });
    e.tx.memo = Memo::Hash(Hash256::from_bytes([0xab; 32]));
    let text = to_txrep(&env);
    assert_eq!(from_txrep(&text).unwrap(), env);
}

#[test]
fn roundtrip_soroban_transaction_data() {
    let mut env = envelope(OperationBody::ExtendFootprintTtl { extend_to: 100 });
    let TransactionEnvelope::V1(e) = &mut env else {
        unreachable!()
    };
    e.tx.ext = TransactionExt::V1(SorobanTransactionData {
        resources: SorobanResources {
            footprint: LedgerFootprint {
                read_only: vec![LedgerKey::ContractData {
                    contract: ScAddress::Contract(Hash256::from_bytes([9; 32])),
                    key: ScVal::map(vec![lumen_xdr::ScMapEntry {
                        key: ScVal::symbol("counter").unwrap(),
                        val: ScVal::u128(1 << 80),
                    }]),
                    durability: ContractDataDurability::Persistent,
                }],
                read_write: vec![LedgerKey::ContractCode {
                    hash: Hash256::from_bytes([7; 32]),
                }],
            },
            instructions: 1_000_000,
            read_bytes: 2048,
            write_bytes: 1024,
        },
        resource_fee: 55_000,
    });
    let text = to_txrep(&env);
    assert_eq!(from_txrep(&text).unwrap(), env);
}

#[test]
fn roundtrip_scval_extremes() {
    let body = OperationBody::InvokeHostFunction {
        host_function: HostFunction::InvokeContract(InvokeContractArgs {
            contract_address: ScAddress::Contract(Hash256::from_bytes([1; 32])),
            function_name: ScSymbol::new("store").unwrap(),
            args: vec![
                ScVal::i128(i128::MIN),
                ScVal::u128(u128::MAX),
                ScVal::I64(i64::MIN),
                ScVal::Vec(None),
                ScVal::Map(None),
                ScVal::vec(vec![ScVal::Bool(true), ScVal::Void]),
                ScVal::String("line one\nline two".to_string()),
                ScVal::Bytes(vec![0, 255]),
                ScVal::LedgerKeyNonce(-1),
            ],
        }),
        auth: vec![],
    };
    let original = envelope(body);
    let text = to_txrep(&original);
    assert_eq!(from_txrep(&text).unwrap(), original);
}

#[test]
fn text_is_stable_under_reparse() {
    for body in all_bodies() {
        let text = to_txrep(&envelope(body));
        let reparsed = from_txrep(&text).unwrap();
        assert_eq!(to_txrep(&reparsed), text);
    }
}

#[test]
fn fixed_payment_text() {
    let text = format!(
        "type: ENVELOPE_TYPE_TX\n\
         tx.sourceAccount: {SOURCE}\n\
         tx.fee: 100\n\
         tx.seqNum: 42\n\
         tx.cond.type: PRECOND_NONE\n\
         tx.memo.type: MEMO_NONE\n\
         tx.operations.len: 1\n\
         tx.operations[0].sourceAccount._present: false\n\
         tx.operations[0].body.type: PAYMENT\n\
         tx.operations[0].body.paymentOp.destination: {SOURCE}\n\
         tx.operations[0].body.paymentOp.asset: native\n\
         tx.operations[0].body.paymentOp.amount: 500000000\n\
         tx.ext.v: 0\n\
         signatures.len: 0\n"
    );
    let parsed = from_txrep(&text).unwrap();
    assert_eq!(to_txrep(&parsed), text);
    let TransactionEnvelope::V1(e) = &parsed else {
        panic!("expected a v1 envelope")
    };
    assert_eq!(e.tx.fee, 100);
    assert_eq!(e.tx.seq_num, 42);
    let OperationBody::Payment { amount, asset, .. } = &e.tx.operations[0].body else {
        panic!("expected a payment")
    };
    assert_eq!(*amount, 500_000_000);
    assert_eq!(*asset, Asset::Native);
}

#[test]
fn parser_tolerates_comments_and_annotations() {
    let text = format!(
        "# payment envelope\n\
         type: ENVELOPE_TYPE_TX\n\
         tx.sourceAccount: {SOURCE}\n\
         tx.fee: 100\n\
         tx.seqNum: 42\n\
         \n\
         tx.cond.type: PRECOND_NONE\n\
         tx.memo.type: MEMO_NONE\n\
         tx.operations.len: 1\n\
         tx.operations[0].sourceAccount._present: false\n\
         tx.operations[0].body.type: PAYMENT\n\
         tx.operations[0].body.paymentOp.destination: {SOURCE}\n\
         tx.operations[0].body.paymentOp.asset: native\n\
         tx.operations[0].body.paymentOp.amount: 1234567890 (123.456789)\n\
         tx.ext.v: 0\n\
         signatures.len: 0\n"
    );
    let parsed = from_txrep(&text).unwrap();
    let OperationBody::Payment { amount, .. } = &match &parsed {
        TransactionEnvelope::V1(e) => &e.tx.operations[0],
        _ => panic!("expected a v1 envelope"),
    }
    .body
    else {
        panic!("expected a payment")
    };
    assert_eq!(*amount, 1_234_567_890);
}

#[test]
fn annotated_output_reparses() {
    let original = envelope(OperationBody::Payment {
        destination: muxed(2),
        asset: Asset::Native,
        amount: 1_234_567_890,
    });
    let text = to_txrep_with(&original, &TxRepOptions { annotations: true });
    assert!(text.contains("amount: 1234567890 (123.456789)"));
    assert_eq!(from_txrep(&text).unwrap(), original);
}

#[test]
fn builder_output_renders_and_parses() {
    use lumen_tx::TransactionBuilder;

    let tx = TransactionBuilder::new(muxed(1), 42)
        .memo(Memo::text("invoice 42").unwrap())
        .time_bounds(1_600_000_000, 1_700_000_000)
        .add_operation(Operation::new(OperationBody::Payment {
            destination: muxed(2),
            asset: Asset::Native,
            amount: 10_000_000,
        }))
        .build()
        .unwrap();
    let env = TransactionEnvelope::V1(TransactionV1Envelope {
        tx,
        signatures: Vec::new(),
    });
    let text = to_txrep(&env);
    assert!(text.contains("tx.memo.text: \"invoice 42\""));
    assert_eq!(from_txrep(&text).unwrap(), env);
}

#[test]
fn missing_field_is_reported_by_path() {
    let text = "type: ENVELOPE_TYPE_TX\ntx.fee: 100\n";
    assert_eq!(
        from_txrep(text).unwrap_err(),
        TxRepError::MissingField("tx.sourceAccount".to_string())
    );
}

#[test]
fn entries_past_declared_length_are_rejected() {
    let text = format!(
        "type: ENVELOPE_TYPE_TX\n\
         tx.sourceAccount: {SOURCE}\n\
         tx.fee: 100\n\
         tx.seqNum: 42\n\
         tx.cond.type: PRECOND_NONE\n\
         tx.memo.type: MEMO_NONE\n\
         tx.operations.len: 1\n\
         tx.operations[0].sourceAccount._present: false\n\
         tx.operations[0].body.type: INFLATION\n\
         tx.ext.v: 0\n\
         signatures.len: 0\n\
         signatures[2].hint: deadbeef\n\
         signatures[2].signature: 0707\n"
    );
    assert_eq!(
        from_txrep(&text).unwrap_err(),
        TxRepError::LengthMismatch {
            path: "signatures".to_string(),
            declared: 0,
            actual: 3,
        }
    );
}

#[test]
fn unknown_operation_name_is_rejected() {
    let text = format!(
        "type: ENVELOPE_TYPE_TX\n\
         tx.sourceAccount: {SOURCE}\n\
         tx.fee: 100\n\
         tx.seqNum: 42\n\
         tx.cond.type: PRECOND_NONE\n\
         tx.memo.type: MEMO_NONE\n\
         tx.operations.len: 1\n\
         tx.operations[0].sourceAccount._present: false\n\
         tx.operations[0].body.type: TELEPORT\n\
         tx.ext.v: 0\n\
         signatures.len: 0\n"
    );
    assert!(matches!(
        from_txrep(&text).unwrap_err(),
        TxRepError::UnknownVariant { name, .. } if name == "TELEPORT"
    ));
}

#[test]
fn text_survives_wire_encoding() {
    use lumen_xdr::{XdrDecode, XdrEncode};

    for body in all_bodies() {
        let original = envelope(body);
        let bytes = original.to_xdr();
        let decoded = TransactionEnvelope::from_xdr(&bytes).unwrap();
        let text = to_txrep(&decoded);
        let reparsed = from_txrep(&text).unwrap();
        assert_eq!(reparsed.to_xdr(), bytes);
    }
}
