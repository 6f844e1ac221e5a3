//! Contract values: the tagged union exchanged with the contract host.

use std::fmt;

use crate::bignum::{Int128Parts, Int256Parts, UInt128Parts, UInt256Parts};
use crate::codec::{encode_string, encode_var_opaque, ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};
use crate::types::{AccountId, Hash256};

/// Maximum byte length of a symbol.
pub const MAX_SYMBOL: usize = 32;

/// An address as seen by contracts: an account or a contract instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScAddress {
    Account(AccountId),
    Contract(Hash256),
}

impl XdrEncode for ScAddress {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Account(id) => {
                0u32.encode(out);
                id.encode(out);
            }
            Self::Contract(hash) => {
                1u32.encode(out);
                hash.encode(out);
            }
        }
    }
}

impl XdrDecode for ScAddress {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::Account(AccountId::decode(cur)?)),
            1 => Ok(Self::Contract(Hash256::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "ScAddress",
                value,
            }),
        }
    }
}

/// A short identifier naming contract functions and map keys.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ScSymbol(String);

impl ScSymbol {
    /// Validate and wrap a symbol: at most 32 bytes of `[a-zA-Z0-9_]`.
    pub fn new(s: &str) -> Result<Self> {
        if s.len() > MAX_SYMBOL {
            return Err(XdrError::LengthExceedsMax {
                ty: "ScSymbol",
                len: s.len(),
                max: MAX_SYMBOL,
            });
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(XdrError::InvalidUtf8);
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ScSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScSymbol({})", self.0)
    }
}

impl XdrEncode for ScSymbol {
    fn encode(&self, out: &mut Vec<u8>) {
        encode_string(out, &self.0);
    }
}

impl XdrDecode for ScSymbol {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let s = cur.read_string("ScSymbol", MAX_SYMBOL)?;
        Self::new(&s)
    }
}

/// One key/value pair of a contract map.
///
/// Map entries keep their insertion order; the codec does not sort them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScMapEntry {
    pub key: ScVal,
    pub val: ScVal,
}

impl XdrEncode for ScMapEntry {
    fn encode(&self, out: &mut Vec<u8>) {
        self.key.encode(out);
        self.val.encode(out);
    }
}

impl XdrDecode for ScMapEntry {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            key: ScVal::decode(cur)?,
            val: ScVal::decode(cur)?,
        })
    }
}

/// A contract value.
///
/// Vectors and maps are wire-optional (a presence flag precedes the body);
/// the model keeps the option so round-trips are byte-exact. Discriminants
/// 2 (error) and 19 (contract instance) belong to host result payloads and
/// are not modeled; decoding them fails with `InvalidDiscriminant`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScVal {
    Bool(bool),
    Void,
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Timepoint(u64),
    Duration(u64),
    U128(UInt128Parts),
    I128(Int128Parts),
    U256(UInt256Parts),
    I256(Int256Parts),
    Bytes(Vec<u8>),
    String(String),
    Symbol(ScSymbol),
    Vec(Option<Vec<ScVal>>),
    Map(Option<Vec<ScMapEntry>>),
    Address(ScAddress),
    LedgerKeyContractInstance,
    LedgerKeyNonce(i64),
}

impl ScVal {
    /// A present vector value.
    pub fn vec(items: Vec<ScVal>) -> Self {
        Self::Vec(Some(items))
    }

    /// A present map value.
    pub fn map(entries: Vec<ScMapEntry>) -> Self {
        Self::Map(Some(entries))
    }

    pub fn u128(v: u128) -> Self {
        Self::U128(UInt128Parts::from_u128(v))
    }

    pub fn i128(v: i128) -> Self {
        Self::I128(Int128Parts::from_i128(v))
    }

    pub fn symbol(s: &str) -> Result<Self> {
        Ok(Self::Symbol(ScSymbol::new(s)?))
    }
}

impl XdrEncode for ScVal {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Bool(b) => {
                0u32.encode(out);
                b.encode(out);
            }
            Self::Void => 1u32.encode(out),
            Self::U32(v) => {
                3u32.encode(out);
                v.encode(out);
            }
            Self::I32(v) => {
                4u32.encode(out);
                v.encode(out);
            }
            Self::U64(v) => {
                5u32.encode(out);
                v.encode(out);
            }
            Self::I64(v) => {
                6u32.encode(out);
                v.encode(out);
            }
            Self::Timepoint(v) => {
                7u32.encode(out);
                v.encode(out);
            }
            Self::Duration(v) => {
                8u32.encode(out);
                v.encode(out);
            }
            Self::U128(v) => {
                9u32.encode(out);
                v.encode(out);
            }
            Self::I128(v) => {
                10u32.encode(out);
                v.encode(out);
            }
            Self::U256(v) => {
                11u32.encode(out);
                v.encode(out);
            }
            Self::I256(v) => {
                12u32.encode(out);
                v.encode(out);
            }
            Self::Bytes(b) => {
                13u32.encode(out);
                encode_var_opaque(out, b);
            }
            Self::String(s) => {
                14u32.encode(out);
                encode_string(out, s);
            }
            Self::Symbol(s) => {
                15u32.encode(out);
                s.encode(out);
            }
            Self::Vec(v) => {
                16u32.encode(out);
                v.encode(out);
            }
            Self::Map(m) => {
                17u32.encode(out);
                m.encode(out);
            }
            Self::Address(a) => {
                18u32.encode(out);
                a.encode(out);
            }
            Self::LedgerKeyContractInstance => 20u32.encode(out),
            Self::LedgerKeyNonce(n) => {
                21u32.encode(out);
                n.encode(out);
            }
        }
    }
}

impl XdrDecode for ScVal {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::Bool(cur.read_bool()?)),
            1 => Ok(Self::Void),
            3 => Ok(Self::U32(cur.read_u32()?)),
            4 => Ok(Self::I32(cur.read_i32()?)),
            5 => Ok(Self::U64(cur.read_u64()?)),
            6 => Ok(Self::I64(cur.read_i64()?)),
            7 => Ok(Self::Timepoint(cur.read_u64()?)),
            8 => Ok(Self::Duration(cur.read_u64()?)),
            9 => Ok(Self::U128(UInt128Parts::decode(cur)?)),
            10 => Ok(Self::I128(Int128Parts::decode(cur)?)),
            11 => Ok(Self::U256(UInt256Parts::decode(cur)?)),
            12 => Ok(Self::I256(Int256Parts::decode(cur)?)),
            13 => Ok(Self::Bytes(cur.read_var_opaque("ScVal bytes", u32::MAX as usize)?)),
            14 => Ok(Self::String(cur.read_string("ScVal string", u32::MAX as usize)?)),
            15 => Ok(Self::Symbol(ScSymbol::decode(cur)?)),
            16 => Ok(Self::Vec(Option::decode(cur)?)),
            17 => Ok(Self::Map(Option::decode(cur)?)),
            18 => Ok(Self::Address(ScAddress::decode(cur)?)),
            20 => Ok(Self::LedgerKeyContractInstance),
            21 => Ok(Self::LedgerKeyNonce(cur.read_i64()?)),
            value => Err(XdrError::InvalidDiscriminant { ty: "ScVal", value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn test_scalar_variants_roundtrip() {
        let vals = [
            ScVal::Bool(true),
            ScVal::Void,
            ScVal::U32(7),
            ScVal::I32(-7),
            ScVal::U64(u64::MAX),
            ScVal::I64(i64::MIN),
            ScVal::Timepoint(1_700_000_000),
            ScVal::Duration(3600),
            ScVal::u128(u128::MAX),
            ScVal::i128(i128::MIN),
            ScVal::Bytes(vec![1, 2, 3]),
            ScVal::String("hello".into()),
            ScVal::symbol("transfer").unwrap(),
            ScVal::LedgerKeyContractInstance,
            ScVal::LedgerKeyNonce(42),
        ];
        for val in vals {
            assert_eq!(ScVal::from_xdr(&val.to_xdr()).unwrap(), val);
        }
    }

    #[test]
    fn test_nested_containers_roundtrip() {
        let val = ScVal::map(vec![
            ScMapEntry {
                key: ScVal::symbol("amounts").unwrap(),
                val: ScVal::vec(vec![ScVal::u128(1), ScVal::u128(2)]),
            },
            ScMapEntry {
                key: ScVal::symbol("owner").unwrap(),
                val: ScVal::Address(ScAddress::Account(AccountId::from_bytes([3; 32]))),
            },
        ]);
        assert_eq!(ScVal::from_xdr(&val.to_xdr()).unwrap(), val);
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let entries = vec![
            ScMapEntry {
                key: ScVal::symbol("zzz").unwrap(),
                val: ScVal::U32(1),
            },
            ScMapEntry {
                key: ScVal::symbol("aaa").unwrap(),
                val: ScVal::U32(2),
            },
        ];
        let val = ScVal::map(entries.clone());
        match ScVal::from_xdr(&val.to_xdr()).unwrap() {
            ScVal::Map(Some(decoded)) => assert_eq!(decoded, entries),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_absent_vec_roundtrips_absent() {
        let val = ScVal::Vec(None);
        let xdr = val.to_xdr();
        assert_eq!(xdr, [0, 0, 0, 16, 0, 0, 0, 0]);
        assert_eq!(ScVal::from_xdr(&xdr).unwrap(), val);
    }

    #[test]
    fn test_unmodeled_discriminants_rejected() {
        for disc in [2u32, 19, 22] {
            let mut xdr = Vec::new();
            disc.encode(&mut xdr);
            assert!(matches!(
                ScVal::from_xdr(&xdr),
                Err(XdrError::InvalidDiscriminant { ty: "ScVal", value }) if value == disc
            ));
        }
    }

    #[test]
    fn test_symbol_validation() {
        assert!(ScSymbol::new("valid_Symbol1").is_ok());
        assert!(ScSymbol::new(&"s".repeat(33)).is_err());
        assert!(ScSymbol::new("no spaces").is_err());
    }

    #[test]
    fn test_u256_value_roundtrip() {
        let big = BigInt::from(7u8).pow(90);
        let parts = UInt256Parts::from_biguint(&big.to_biguint().unwrap()).unwrap();
        let val = ScVal::U256(parts);
        assert_eq!(ScVal::from_xdr(&val.to_xdr()).unwrap(), val);
    }
}
