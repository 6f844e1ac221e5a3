//! Checksummed base32 address strings.
//!
//! Every key kind gets a one-letter prefix determined by its version byte:
//! `G` account, `M` muxed account, `C` contract, `P` signed payload, `S`
//! secret seed, `T` pre-auth transaction hash, `X` preimage hash. The string
//! is `base32(version ‖ payload ‖ crc16)` without padding, where the CRC-16
//! (XModem polynomial) of `version ‖ payload` is appended little-endian.

use data_encoding::BASE32_NOPAD;
use lumen_xdr::{AccountId, MuxedAccount};

use crate::error::{CryptoError, Result};

const VERSION_ACCOUNT: u8 = 6 << 3; // 'G'
const VERSION_MUXED: u8 = 12 << 3; // 'M'
const VERSION_CONTRACT: u8 = 2 << 3; // 'C'
const VERSION_SIGNED_PAYLOAD: u8 = 15 << 3; // 'P'
const VERSION_SEED: u8 = 18 << 3; // 'S'
const VERSION_PRE_AUTH_TX: u8 = 19 << 3; // 'T'
const VERSION_HASH_X: u8 = 23 << 3; // 'X'

/// Maximum byte length of a signed-payload signer payload.
const MAX_PAYLOAD: usize = 64;

/// CRC-16 with the XModem polynomial, zero initial value.
fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &b in data {
        crc ^= (b as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

fn encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 3);
    data.push(version);
    data.extend_from_slice(payload);
    let crc = crc16(&data);
    data.extend_from_slice(&crc.to_le_bytes());
    BASE32_NOPAD.encode(&data)
}

/// Decode a checksummed string and return its version byte and payload.
fn decode(s: &str) -> Result<(u8, Vec<u8>)> {
    let data = BASE32_NOPAD
        .decode(s.as_bytes())
        .map_err(|_| CryptoError::InvalidEncoding)?;
    if data.len() < 3 {
        return Err(CryptoError::InvalidEncoding);
    }
    let (body, checksum) = data.split_at(data.len() - 2);
    let expected = crc16(body).to_le_bytes();
    if checksum != expected {
        return Err(CryptoError::ChecksumMismatch);
    }
    Ok((body[0], body[1..].to_vec()))
}

fn decode_kind(s: &str, version: u8, kind: &'static str) -> Result<Vec<u8>> {
    let (found, payload) = decode(s)?;
    if found != version {
        return Err(CryptoError::WrongVersion {
            expected: kind,
            found,
        });
    }
    Ok(payload)
}

fn as_key(payload: Vec<u8>) -> Result<[u8; 32]> {
    let len = payload.len();
    payload
        .try_into()
        .map_err(|_| CryptoError::InvalidPayloadLength(len))
}

/// Encode an account id (`G...`).
pub fn encode_account_id(key: &[u8; 32]) -> String {
    encode(VERSION_ACCOUNT, key)
}

/// Decode an account id (`G...`).
pub fn decode_account_id(s: &str) -> Result<[u8; 32]> {
    as_key(decode_kind(s, VERSION_ACCOUNT, "account id")?)
}

/// Encode a muxed account (`M...`): the key followed by the big-endian id.
pub fn encode_muxed(key: &[u8; 32], id: u64) -> String {
    let mut payload = Vec::with_capacity(40);
    payload.extend_from_slice(key);
    payload.extend_from_slice(&id.to_be_bytes());
    encode(VERSION_MUXED, &payload)
}

/// Decode a muxed account (`M...`) into its key and id.
pub fn decode_muxed(s: &str) -> Result<([u8; 32], u64)> {
    let payload = decode_kind(s, VERSION_MUXED, "muxed account")?;
    if payload.len() != 40 {
        return Err(CryptoError::InvalidPayloadLength(payload.len()));
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&payload[..32]);
    let mut id = [0u8; 8];
    id.copy_from_slice(&payload[32..]);
    Ok((key, u64::from_be_bytes(id)))
}

/// Encode a contract id (`C...`).
pub fn encode_contract(hash: &[u8; 32]) -> String {
    encode(VERSION_CONTRACT, hash)
}

/// Decode a contract id (`C...`).
pub fn decode_contract(s: &str) -> Result<[u8; 32]> {
    as_key(decode_kind(s, VERSION_CONTRACT, "contract id")?)
}

/// Encode a signed-payload signer (`P...`): key, payload length, payload
/// zero-padded to a 4-byte boundary.
pub fn encode_signed_payload(key: &[u8; 32], payload: &[u8]) -> Result<String> {
    if payload.len() > MAX_PAYLOAD {
        return Err(CryptoError::InvalidPayloadLength(payload.len()));
    }
    let padded = payload.len().div_ceil(4) * 4;
    let mut data = Vec::with_capacity(36 + padded);
    data.extend_from_slice(key);
    data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    data.extend_from_slice(payload);
    data.resize(36 + padded, 0);
    Ok(encode(VERSION_SIGNED_PAYLOAD, &data))
}

/// Decode a signed-payload signer (`P...`) into its key and payload.
pub fn decode_signed_payload(s: &str) -> Result<([u8; 32], Vec<u8>)> {
    let data = decode_kind(s, VERSION_SIGNED_PAYLOAD, "signed payload")?;
    if data.len() < 36 {
        return Err(CryptoError::InvalidPayloadLength(data.len()));
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&data[..32]);
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&data[32..36]);
    let len = u32::from_be_bytes(len_bytes) as usize;
    if len > MAX_PAYLOAD || data.len() != 36 + len.div_ceil(4) * 4 {
        return Err(CryptoError::InvalidPayloadLength(data.len()));
    }
    if data[36 + len..].iter().any(|&b| b != 0) {
        return Err(CryptoError::InvalidEncoding);
    }
    Ok((key, data[36..36 + len].to_vec()))
}

/// Encode a secret seed (`S...`).
pub fn encode_seed(seed: &[u8; 32]) -> String {
    encode(VERSION_SEED, seed)
}

/// Decode a secret seed (`S...`).
pub fn decode_seed(s: &str) -> Result<[u8; 32]> {
    as_key(decode_kind(s, VERSION_SEED, "secret seed")?)
}

/// Encode a pre-auth transaction hash (`T...`).
pub fn encode_pre_auth_tx(hash: &[u8; 32]) -> String {
    encode(VERSION_PRE_AUTH_TX, hash)
}

/// Decode a pre-auth transaction hash (`T...`).
pub fn decode_pre_auth_tx(s: &str) -> Result<[u8; 32]> {
    as_key(decode_kind(s, VERSION_PRE_AUTH_TX, "pre-auth tx hash")?)
}

/// Encode a preimage hash (`X...`).
pub fn encode_hash_x(hash: &[u8; 32]) -> String {
    encode(VERSION_HASH_X, hash)
}

/// Decode a preimage hash (`X...`).
pub fn decode_hash_x(s: &str) -> Result<[u8; 32]> {
    as_key(decode_kind(s, VERSION_HASH_X, "preimage hash")?)
}

/// Render a muxed account in its address form: `M...` when multiplexed,
/// `G...` otherwise.
pub fn encode_muxed_account(account: &MuxedAccount) -> String {
    match account {
        MuxedAccount::Ed25519(key) => encode_account_id(key),
        MuxedAccount::MuxedEd25519 { id, key } => encode_muxed(key, *id),
    }
}

/// Parse a `G...` or `M...` string into a muxed account.
pub fn decode_muxed_account(s: &str) -> Result<MuxedAccount> {
    match s.as_bytes().first() {
        Some(b'M') => {
            let (key, id) = decode_muxed(s)?;
            Ok(MuxedAccount::MuxedEd25519 { id, key })
        }
        _ => Ok(MuxedAccount::Ed25519(decode_account_id(s)?)),
    }
}

/// Render an account id in its `G...` form.
pub fn account_id_to_string(id: &AccountId) -> String {
    encode_account_id(id.as_bytes())
}

/// Parse a `G...` string into an account id.
pub fn account_id_from_string(s: &str) -> Result<AccountId> {
    Ok(AccountId::from_bytes(decode_account_id(s)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [
        0x44, 0x95, 0xbd, 0x47, 0x26, 0xa1, 0x3b, 0xcf, 0x19, 0x6e, 0x4d, 0xe5, 0x6d, 0xc1, 0x8b,
        0xce, 0x93, 0x80, 0x33, 0xd3, 0x0d, 0xe4, 0xac, 0x0c, 0x67, 0x4a, 0xe0, 0x44, 0xec, 0xd1,
        0x97, 0xef,
    ];

    const ACCOUNT: &str = "GBCJLPKHE2QTXTYZNZG6K3OBRPHJHABT2MG6JLAMM5FOARHM2GL67VCW";

    #[test]
    fn test_account_id_roundtrip() {
        assert_eq!(encode_account_id(&KEY), ACCOUNT);
        assert_eq!(decode_account_id(ACCOUNT).unwrap(), KEY);
    }

    #[test]
    fn test_muxed_roundtrip() {
        let s = encode_muxed(&KEY, 1234);
        assert_eq!(
            s,
            "MBCJLPKHE2QTXTYZNZG6K3OBRPHJHABT2MG6JLAMM5FOARHM2GL66AAAAAAAAAAE2I5S4"
        );
        assert_eq!(decode_muxed(&s).unwrap(), (KEY, 1234));
    }

    #[test]
    fn test_contract_roundtrip() {
        let s = encode_contract(&KEY);
        assert_eq!(s, "CBCJLPKHE2QTXTYZNZG6K3OBRPHJHABT2MG6JLAMM5FOARHM2GL66RHP");
        assert_eq!(decode_contract(&s).unwrap(), KEY);
    }

    #[test]
    fn test_signed_payload_roundtrip() {
        let payload = vec![1, 2, 3, 4, 5];
        let s = encode_signed_payload(&KEY, &payload).unwrap();
        assert_eq!(
            s,
            "PBCJLPKHE2QTXTYZNZG6K3OBRPHJHABT2MG6JLAMM5FOARHM2GL66AAAAACQCAQDAQCQAAAATQWA"
        );
        assert_eq!(decode_signed_payload(&s).unwrap(), (KEY, payload));
    }

    #[test]
    fn test_signed_payload_limits() {
        assert!(encode_signed_payload(&KEY, &[0; 64]).is_ok());
        assert!(matches!(
            encode_signed_payload(&KEY, &[0; 65]),
            Err(CryptoError::InvalidPayloadLength(65))
        ));
    }

    #[test]
    fn test_seed_and_hash_kinds() {
        let seed: [u8; 32] = std::array::from_fn(|i| i as u8);
        let s = encode_seed(&seed);
        assert_eq!(s, "SAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6NKI");
        assert_eq!(decode_seed(&s).unwrap(), seed);

        let t = encode_pre_auth_tx(&KEY);
        assert_eq!(t, "TBCJLPKHE2QTXTYZNZG6K3OBRPHJHABT2MG6JLAMM5FOARHM2GL66IQH");
        assert_eq!(decode_pre_auth_tx(&t).unwrap(), KEY);

        let x = encode_hash_x(&KEY);
        assert_eq!(x, "XBCJLPKHE2QTXTYZNZG6K3OBRPHJHABT2MG6JLAMM5FOARHM2GL67MV6");
        assert_eq!(decode_hash_x(&x).unwrap(), KEY);
    }

    #[test]
    fn test_corrupted_character_fails_checksum() {
        let mut s = ACCOUNT.to_string();
        // Flip one payload character to another valid base32 character.
        s.replace_range(10..11, if &s[10..11] == "A" { "B" } else { "A" });
        assert_eq!(decode_account_id(&s), Err(CryptoError::ChecksumMismatch));
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let seed = encode_seed(&KEY);
        assert!(matches!(
            decode_account_id(&seed),
            Err(CryptoError::WrongVersion { found, .. }) if found == 18 << 3
        ));
    }

    #[test]
    fn test_invalid_base32_rejected() {
        assert_eq!(
            decode_account_id("GB!!INVALID"),
            Err(CryptoError::InvalidEncoding)
        );
        // Lowercase is not part of the alphabet.
        assert_eq!(
            decode_account_id(&ACCOUNT.to_lowercase()),
            Err(CryptoError::InvalidEncoding)
        );
    }

    #[test]
    fn test_muxed_account_conversion() {
        let plain = MuxedAccount::Ed25519(KEY);
        assert_eq!(encode_muxed_account(&plain), ACCOUNT);
        assert_eq!(decode_muxed_account(ACCOUNT).unwrap(), plain);

        let muxed = MuxedAccount::MuxedEd25519 { id: 1234, key: KEY };
        let s = encode_muxed_account(&muxed);
        assert!(s.starts_with('M'));
        assert_eq!(decode_muxed_account(&s).unwrap(), muxed);
    }

    #[test]
    fn test_truncated_payload_rejected() {
        // A valid checksum over a 16-byte payload still fails the length check.
        let s = encode(VERSION_ACCOUNT, &[7u8; 16]);
        assert!(matches!(
            decode_account_id(&s),
            Err(CryptoError::InvalidPayloadLength(16))
        ));
    }

    proptest::proptest! {
        #[test]
        fn test_account_id_roundtrip_any_key(key in proptest::prelude::any::<[u8; 32]>()) {
            proptest::prop_assert_eq!(decode_account_id(&encode_account_id(&key)).unwrap(), key);
        }

        #[test]
        fn test_muxed_roundtrip_any_key(
            key in proptest::prelude::any::<[u8; 32]>(),
            id in proptest::prelude::any::<u64>(),
        ) {
            proptest::prop_assert_eq!(decode_muxed(&encode_muxed(&key, id)).unwrap(), (key, id));
        }

        #[test]
        fn test_signed_payload_roundtrip_any_payload(
            key in proptest::prelude::any::<[u8; 32]>(),
            payload in proptest::collection::vec(proptest::prelude::any::<u8>(), 1..=64),
        ) {
            let s = encode_signed_payload(&key, &payload).unwrap();
            proptest::prop_assert_eq!(decode_signed_payload(&s).unwrap(), (key, payload));
        }
    }
}
