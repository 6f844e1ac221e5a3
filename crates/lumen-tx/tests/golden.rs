//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the wire protocol must produce identical:
//! - envelope base64
//! - signable hash (network-scoped)
//! - deterministic Ed25519 signatures

use lumen_crypto::{strkey, Keypair, Network};
use lumen_tx::{envelope_hash, sign, transaction_hash, verify_signature, TransactionBuilder};
use lumen_xdr::{
    Asset, ClaimableBalanceId, Hash256, Memo, MuxedAccount, Operation, OperationBody,
    TransactionEnvelope, TransactionV1Envelope, XdrDecode, XdrEncode,
};

const SOURCE: &str = "GBCJLPKHE2QTXTYZNZG6K3OBRPHJHABT2MG6JLAMM5FOARHM2GL67VCW";

const CLAIM_ENVELOPE_B64: &str = "AAAAAgAAAABElb1HJqE7zxluTeVtwYvOk4Az0w3krAxnSuBE7NGX7w\
AAAGQAClykAAAAAQAAAAAAAAAAAAAAAQAAAAAAAAAPAAAAAM6rFO672/4loYMOOeMRwhgIRt90lHuiSjhrgxTMum\
YiAAAAAAAAAAA=";

const PAYMENT_ENVELOPE_B64: &str = "AAAAAgAAAABElb1HJqE7zxluTeVtwYvOk4Az0w3krAxnSuBE7NGX7w\
AAAMgAAAAAAAAAKgAAAAEAAAAAX14QAAAAAABlU/EAAAAAAQAAAAVIZWxsbwAAAAAAAAEAAAAAAAAAAQAAAABElb\
1HJqE7zxluTeVtwYvOk4Az0w3krAxnSuBE7NGX7wAAAAFVU0QAAAAAAESVvUcmoTvPGW5N5W3Bi86TgDPTDeSsDG\
dK4ETs0ZfvAAAAAEmWAtIAAAAAAAAAAA==";

fn source_account() -> MuxedAccount {
    MuxedAccount::Ed25519(strkey::decode_account_id(SOURCE).unwrap())
}

fn claim_envelope() -> TransactionEnvelope {
    let balance_id = ClaimableBalanceId::V0(
        Hash256::from_hex("ceab14eebbdbfe25a1830e39e311c2180846df74947ba24a386b8314ccba6622")
            .unwrap(),
    );
    let tx = TransactionBuilder::new(source_account(), 2916609211498497)
        .fee(100)
        .add_operation(Operation::new(OperationBody::ClaimClaimableBalance {
            balance_id,
        }))
        .build()
        .unwrap();
    TransactionEnvelope::V1(TransactionV1Envelope {
        tx,
        signatures: Vec::new(),
    })
}

#[test]
fn golden_claim_claimable_balance_base64() {
    assert_eq!(claim_envelope().to_xdr_base64(), CLAIM_ENVELOPE_B64);
}

#[test]
fn golden_claim_claimable_balance_decodes_back() {
    let decoded = TransactionEnvelope::from_xdr_base64(CLAIM_ENVELOPE_B64).unwrap();
    assert_eq!(decoded, claim_envelope());
}

#[test]
fn golden_claim_signable_hash_on_testnet() {
    let hash = envelope_hash(&claim_envelope(), &Network::testnet());
    assert_eq!(
        hex::encode(hash),
        "379f0fa127d927a9cb25aa71a0920bd93c59b06aadc95dddcb6ee1f05f40d683"
    );
}

#[test]
fn golden_payment_with_memo_and_time_bounds() {
    let key = strkey::decode_account_id(SOURCE).unwrap();
    let issuer = lumen_xdr::AccountId::from_bytes(key);
    let tx = TransactionBuilder::new(source_account(), 42)
        .fee(200)
        .time_bounds(1_600_000_000, 1_700_000_000)
        .memo(Memo::text("Hello").unwrap())
        .add_operation(Operation::new(OperationBody::Payment {
            destination: source_account(),
            asset: Asset::credit("USD", issuer).unwrap(),
            amount: 1_234_567_890,
        }))
        .build()
        .unwrap();
    let env = TransactionEnvelope::V1(TransactionV1Envelope {
        tx,
        signatures: Vec::new(),
    });
    assert_eq!(env.to_xdr_base64(), PAYMENT_ENVELOPE_B64);
    assert_eq!(TransactionEnvelope::from_xdr_base64(PAYMENT_ENVELOPE_B64).unwrap(), env);
}

#[test]
fn golden_signed_envelope_from_fixed_seed() {
    let seed: [u8; 32] = std::array::from_fn(|i| i as u8);
    let kp = Keypair::from_seed(&seed);
    let source = MuxedAccount::Ed25519(kp.public_key());
    let tx = TransactionBuilder::new(source, 7)
        .add_operation(Operation::new(OperationBody::Payment {
            destination: source,
            asset: Asset::Native,
            amount: 50,
        }))
        .build()
        .unwrap();

    let network = Network::testnet();
    assert_eq!(
        hex::encode(transaction_hash(&tx, &network)),
        "0ce5c120a852c4b2b3bed8358a0b02677b20fd8a434e15fa67108b1b1e33fd39"
    );

    let mut env = TransactionEnvelope::V1(TransactionV1Envelope {
        tx,
        signatures: Vec::new(),
    });
    assert_eq!(
        env.to_xdr_base64(),
        "AAAAAgAAAAADoQe/884Qvh1w3RjnS8CZZ+TWMJulDV8d3IZkElUxuAAAAGQAAAAAAAAABwAAAAAAAAAA\
         AAAAAQAAAAAAAAABAAAAAAOhB7/zzhC+HXDdGOdLwJln5NYwm6UNXx3chmQSVTG4AAAAAAAAAAAAAAAy\
         AAAAAAAAAAA="
    );

    sign(&mut env, &kp, &network);
    assert_eq!(env.signatures()[0].hint, [0x12, 0x55, 0x31, 0xb8]);
    assert_eq!(
        hex::encode(&env.signatures()[0].signature),
        "52bf04166299557b07395b677192928d06b1a98b3eb21b8249abc09cc852dfab\
         0f7eaacce9261b8d58ab3d5d00476c683ed40dd8f917713a19dc30e2ab6f2102"
    );
    assert_eq!(
        env.to_xdr_base64(),
        "AAAAAgAAAAADoQe/884Qvh1w3RjnS8CZZ+TWMJulDV8d3IZkElUxuAAAAGQAAAAAAAAABwAAAAAAAAAA\
         AAAAAQAAAAAAAAABAAAAAAOhB7/zzhC+HXDdGOdLwJln5NYwm6UNXx3chmQSVTG4AAAAAAAAAAAAAAAy\
         AAAAAAAAAAESVTG4AAAAQFK/BBZimVV7BzlbZ3GSko0GsamLPrIbgkmrwJzIUt+rD36qzOkmG41Yqz1d\
         AEdsaD7UDdj5F3E6Gdww4qtvIQI="
    );
    assert!(verify_signature(&env, &kp.public_key(), &network));
}
