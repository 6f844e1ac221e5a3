//! Leaf value formats shared by the writer and the parser.
//!
//! Addresses and keys render as their checksummed string forms, assets as
//! `native` or `CODE:ISSUER`, byte blobs as lowercase hex, and strings
//! double-quoted with `\\`, `\"`, and `\n` escapes.

use lumen_crypto::strkey;
use lumen_xdr::{AccountId, Asset, Hash256, ScAddress, SignerKey};

use crate::error::{Result, TxRepError};

/// Quote a string: `\\`, `\"`, `\n` escapes, surrounded by double quotes.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Undo [`quote`]. The input must begin and end with a double quote.
pub(crate) fn unquote(path: &str, s: &str) -> Result<String> {
    let inner = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| TxRepError::invalid(path, "expected a double-quoted string"))?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            if c == '"' {
                return Err(TxRepError::invalid(path, "unescaped quote inside string"));
            }
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            _ => return Err(TxRepError::invalid(path, "bad escape sequence")),
        }
    }
    Ok(out)
}

/// `native` or `CODE:ISSUER`.
pub(crate) fn asset_to_string(asset: &Asset) -> String {
    match asset {
        Asset::Native => "native".to_string(),
        Asset::CreditAlphanum4 { code, issuer } => format!(
            "{}:{}",
            code.to_string_lossy(),
            strkey::encode_account_id(issuer.as_bytes())
        ),
        Asset::CreditAlphanum12 { code, issuer } => format!(
            "{}:{}",
            code.to_string_lossy(),
            strkey::encode_account_id(issuer.as_bytes())
        ),
    }
}

pub(crate) fn asset_from_string(path: &str, s: &str) -> Result<Asset> {
    if s == "native" {
        return Ok(Asset::Native);
    }
    let (code, issuer) = s
        .split_once(':')
        .ok_or_else(|| TxRepError::invalid(path, "expected `native` or `CODE:ISSUER`"))?;
    let issuer = AccountId::from_bytes(
        strkey::decode_account_id(issuer)
            .map_err(|e| TxRepError::invalid(path, format!("bad issuer: {e}")))?,
    );
    Asset::credit(code, issuer).map_err(|e| TxRepError::invalid(path, format!("bad code: {e}")))
}

/// The checksummed string form of a signer key (`G`, `T`, `X`, or `P`).
pub(crate) fn signer_key_to_string(key: &SignerKey) -> String {
    match key {
        SignerKey::Ed25519(k) => strkey::encode_account_id(k),
        SignerKey::PreAuthTx(h) => strkey::encode_pre_auth_tx(h.as_bytes()),
        SignerKey::HashX(h) => strkey::encode_hash_x(h.as_bytes()),
        // Payload length was validated at construction.
        SignerKey::Ed25519SignedPayload { key, payload } => {
            strkey::encode_signed_payload(key, payload).unwrap_or_default()
        }
    }
}

pub(crate) fn signer_key_from_string(path: &str, s: &str) -> Result<SignerKey> {
    let bad = |e| TxRepError::invalid(path, format!("bad signer key: {e}"));
    match s.as_bytes().first() {
        Some(b'G') => Ok(SignerKey::Ed25519(
            strkey::decode_account_id(s).map_err(bad)?,
        )),
        Some(b'T') => Ok(SignerKey::PreAuthTx(Hash256::from_bytes(
            strkey::decode_pre_auth_tx(s).map_err(bad)?,
        ))),
        Some(b'X') => Ok(SignerKey::HashX(Hash256::from_bytes(
            strkey::decode_hash_x(s).map_err(bad)?,
        ))),
        Some(b'P') => {
            let (key, payload) = strkey::decode_signed_payload(s).map_err(bad)?;
            SignerKey::ed25519_signed_payload(key, payload)
                .map_err(|e| TxRepError::invalid(path, format!("bad payload: {e}")))
        }
        _ => Err(TxRepError::invalid(path, "unknown signer key prefix")),
    }
}

/// The checksummed string form of a contract-facing address (`G` or `C`).
pub(crate) fn sc_address_to_string(address: &ScAddress) -> String {
    match address {
        ScAddress::Account(id) => strkey::encode_account_id(id.as_bytes()),
        ScAddress::Contract(hash) => strkey::encode_contract(hash.as_bytes()),
    }
}

pub(crate) fn sc_address_from_string(path: &str, s: &str) -> Result<ScAddress> {
    let bad = |e| TxRepError::invalid(path, format!("bad address: {e}"));
    match s.as_bytes().first() {
        Some(b'C') => Ok(ScAddress::Contract(Hash256::from_bytes(
            strkey::decode_contract(s).map_err(bad)?,
        ))),
        _ => Ok(ScAddress::Account(AccountId::from_bytes(
            strkey::decode_account_id(s).map_err(bad)?,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_roundtrip() {
        for s in ["plain", "with \"quotes\"", "back\\slash", "line\nbreak", ""] {
            assert_eq!(unquote("p", &quote(s)).unwrap(), s);
        }
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }

    proptest::proptest! {
        #[test]
        fn test_quote_roundtrip_any_string(s in "\\PC{0,64}") {
            proptest::prop_assert_eq!(unquote("p", &quote(&s)).unwrap(), s);
        }
    }

    #[test]
    fn test_unquote_rejects_bare_text() {
        assert!(unquote("p", "no quotes").is_err());
        assert!(unquote("p", "\"bad escape \\x\"").is_err());
    }

    #[test]
    fn test_asset_string_roundtrip() {
        let issuer = AccountId::from_bytes([0x44; 32]);
        for asset in [
            Asset::Native,
            Asset::credit("USD", issuer).unwrap(),
            Asset::credit("LONGCODE", issuer).unwrap(),
        ] {
            let s = asset_to_string(&asset);
            assert_eq!(asset_from_string("p", &s).unwrap(), asset);
        }
    }

    #[test]
    fn test_signer_key_string_roundtrip() {
        let keys = [
            SignerKey::Ed25519([1; 32]),
            SignerKey::PreAuthTx(Hash256::from_bytes([2; 32])),
            SignerKey::HashX(Hash256::from_bytes([3; 32])),
            SignerKey::ed25519_signed_payload([4; 32], vec![9, 8, 7]).unwrap(),
        ];
        for key in keys {
            let s = signer_key_to_string(&key);
            assert_eq!(signer_key_from_string("p", &s).unwrap(), key);
        }
    }
}
