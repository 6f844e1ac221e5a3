//! Assets: the native token and issued credit assets.

use std::fmt;

use crate::codec::{encode_fixed_opaque, ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};
use crate::types::{AccountId, Hash256};

const ASSET_TYPE_NATIVE: u32 = 0;
const ASSET_TYPE_ALPHANUM4: u32 = 1;
const ASSET_TYPE_ALPHANUM12: u32 = 2;
const ASSET_TYPE_POOL_SHARE: u32 = 3;

fn code_is_valid(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// A 1-4 character asset code, zero-padded to 4 bytes on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetCode4(pub [u8; 4]);

impl AssetCode4 {
    pub fn new(code: &str) -> Result<Self> {
        if code.len() > 4 || !code_is_valid(code) {
            return Err(XdrError::InvalidAssetCode);
        }
        let mut bytes = [0u8; 4];
        bytes[..code.len()].copy_from_slice(code.as_bytes());
        Ok(Self(bytes))
    }

    /// The code with wire padding stripped.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0)
            .trim_end_matches('\0')
            .to_string()
    }
}

impl fmt::Debug for AssetCode4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetCode4({})", self.to_string_lossy())
    }
}

/// A 5-12 character asset code, zero-padded to 12 bytes on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetCode12(pub [u8; 12]);

impl AssetCode12 {
    pub fn new(code: &str) -> Result<Self> {
        if code.len() < 5 || code.len() > 12 || !code_is_valid(code) {
            return Err(XdrError::InvalidAssetCode);
        }
        let mut bytes = [0u8; 12];
        bytes[..code.len()].copy_from_slice(code.as_bytes());
        Ok(Self(bytes))
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0)
            .trim_end_matches('\0')
            .to_string()
    }
}

impl fmt::Debug for AssetCode12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetCode12({})", self.to_string_lossy())
    }
}

/// An asset code of either width, as used by the allow-trust operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCode {
    Code4(AssetCode4),
    Code12(AssetCode12),
}

impl AssetCode {
    pub fn new(code: &str) -> Result<Self> {
        if code.len() <= 4 {
            Ok(Self::Code4(AssetCode4::new(code)?))
        } else {
            Ok(Self::Code12(AssetCode12::new(code)?))
        }
    }

    pub fn to_string_lossy(&self) -> String {
        match self {
            Self::Code4(c) => c.to_string_lossy(),
            Self::Code12(c) => c.to_string_lossy(),
        }
    }
}

impl XdrEncode for AssetCode {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Code4(code) => {
                ASSET_TYPE_ALPHANUM4.encode(out);
                encode_fixed_opaque(out, &code.0);
            }
            Self::Code12(code) => {
                ASSET_TYPE_ALPHANUM12.encode(out);
                encode_fixed_opaque(out, &code.0);
            }
        }
    }
}

impl XdrDecode for AssetCode {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            ASSET_TYPE_ALPHANUM4 => Ok(Self::Code4(AssetCode4(cur.read_fixed::<4>()?))),
            ASSET_TYPE_ALPHANUM12 => Ok(Self::Code12(AssetCode12(cur.read_fixed::<12>()?))),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "AssetCode",
                value,
            }),
        }
    }
}

/// The asset tagged union: native or an issued credit asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Native,
    CreditAlphanum4 { code: AssetCode4, issuer: AccountId },
    CreditAlphanum12 { code: AssetCode12, issuer: AccountId },
}

impl Asset {
    /// Build a credit asset, selecting the variant from the code length.
    pub fn credit(code: &str, issuer: AccountId) -> Result<Self> {
        if code.len() <= 4 {
            Ok(Self::CreditAlphanum4 {
                code: AssetCode4::new(code)?,
                issuer,
            })
        } else {
            Ok(Self::CreditAlphanum12 {
                code: AssetCode12::new(code)?,
                issuer,
            })
        }
    }
}

impl XdrEncode for Asset {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Native => ASSET_TYPE_NATIVE.encode(out),
            Self::CreditAlphanum4 { code, issuer } => {
                ASSET_TYPE_ALPHANUM4.encode(out);
                encode_fixed_opaque(out, &code.0);
                issuer.encode(out);
            }
            Self::CreditAlphanum12 { code, issuer } => {
                ASSET_TYPE_ALPHANUM12.encode(out);
                encode_fixed_opaque(out, &code.0);
                issuer.encode(out);
            }
        }
    }
}

impl XdrDecode for Asset {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            ASSET_TYPE_NATIVE => Ok(Self::Native),
            ASSET_TYPE_ALPHANUM4 => Ok(Self::CreditAlphanum4 {
                code: AssetCode4(cur.read_fixed::<4>()?),
                issuer: AccountId::decode(cur)?,
            }),
            ASSET_TYPE_ALPHANUM12 => Ok(Self::CreditAlphanum12 {
                code: AssetCode12(cur.read_fixed::<12>()?),
                issuer: AccountId::decode(cur)?,
            }),
            value => Err(XdrError::InvalidDiscriminant { ty: "Asset", value }),
        }
    }
}

/// Constant-product liquidity pool parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityPoolConstantProductParameters {
    pub asset_a: Asset,
    pub asset_b: Asset,
    pub fee: i32,
}

/// Liquidity pool parameters union (constant product is the only kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityPoolParameters {
    ConstantProduct(LiquidityPoolConstantProductParameters),
}

impl XdrEncode for LiquidityPoolParameters {
    fn encode(&self, out: &mut Vec<u8>) {
        let Self::ConstantProduct(p) = self;
        0u32.encode(out);
        p.asset_a.encode(out);
        p.asset_b.encode(out);
        p.fee.encode(out);
    }
}

impl XdrDecode for LiquidityPoolParameters {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::ConstantProduct(
                LiquidityPoolConstantProductParameters {
                    asset_a: Asset::decode(cur)?,
                    asset_b: Asset::decode(cur)?,
                    fee: cur.read_i32()?,
                },
            )),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "LiquidityPoolParameters",
                value,
            }),
        }
    }
}

/// The asset form carried by trustline ledger entries: adds pool shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustLineAsset {
    Native,
    CreditAlphanum4 { code: AssetCode4, issuer: AccountId },
    CreditAlphanum12 { code: AssetCode12, issuer: AccountId },
    PoolShare(Hash256),
}

impl From<Asset> for TrustLineAsset {
    fn from(a: Asset) -> Self {
        match a {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4 { code, issuer } => Self::CreditAlphanum4 { code, issuer },
            Asset::CreditAlphanum12 { code, issuer } => Self::CreditAlphanum12 { code, issuer },
        }
    }
}

impl XdrEncode for TrustLineAsset {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Native => ASSET_TYPE_NATIVE.encode(out),
            Self::CreditAlphanum4 { code, issuer } => {
                ASSET_TYPE_ALPHANUM4.encode(out);
                encode_fixed_opaque(out, &code.0);
                issuer.encode(out);
            }
            Self::CreditAlphanum12 { code, issuer } => {
                ASSET_TYPE_ALPHANUM12.encode(out);
                encode_fixed_opaque(out, &code.0);
                issuer.encode(out);
            }
            Self::PoolShare(id) => {
                ASSET_TYPE_POOL_SHARE.encode(out);
                id.encode(out);
            }
        }
    }
}

impl XdrDecode for TrustLineAsset {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            ASSET_TYPE_NATIVE => Ok(Self::Native),
            ASSET_TYPE_ALPHANUM4 => Ok(Self::CreditAlphanum4 {
                code: AssetCode4(cur.read_fixed::<4>()?),
                issuer: AccountId::decode(cur)?,
            }),
            ASSET_TYPE_ALPHANUM12 => Ok(Self::CreditAlphanum12 {
                code: AssetCode12(cur.read_fixed::<12>()?),
                issuer: AccountId::decode(cur)?,
            }),
            ASSET_TYPE_POOL_SHARE => Ok(Self::PoolShare(Hash256::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "TrustLineAsset",
                value,
            }),
        }
    }
}

/// The asset form accepted by change-trust: adds full pool parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTrustAsset {
    Native,
    CreditAlphanum4 { code: AssetCode4, issuer: AccountId },
    CreditAlphanum12 { code: AssetCode12, issuer: AccountId },
    LiquidityPool(LiquidityPoolParameters),
}

impl From<Asset> for ChangeTrustAsset {
    fn from(a: Asset) -> Self {
        match a {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4 { code, issuer } => Self::CreditAlphanum4 { code, issuer },
            Asset::CreditAlphanum12 { code, issuer } => Self::CreditAlphanum12 { code, issuer },
        }
    }
}

impl XdrEncode for ChangeTrustAsset {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Native => ASSET_TYPE_NATIVE.encode(out),
            Self::CreditAlphanum4 { code, issuer } => {
                ASSET_TYPE_ALPHANUM4.encode(out);
                encode_fixed_opaque(out, &code.0);
                issuer.encode(out);
            }
            Self::CreditAlphanum12 { code, issuer } => {
                ASSET_TYPE_ALPHANUM12.encode(out);
                encode_fixed_opaque(out, &code.0);
                issuer.encode(out);
            }
            Self::LiquidityPool(params) => {
                ASSET_TYPE_POOL_SHARE.encode(out);
                params.encode(out);
            }
        }
    }
}

impl XdrDecode for ChangeTrustAsset {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            ASSET_TYPE_NATIVE => Ok(Self::Native),
            ASSET_TYPE_ALPHANUM4 => Ok(Self::CreditAlphanum4 {
                code: AssetCode4(cur.read_fixed::<4>()?),
                issuer: AccountId::decode(cur)?,
            }),
            ASSET_TYPE_ALPHANUM12 => Ok(Self::CreditAlphanum12 {
                code: AssetCode12(cur.read_fixed::<12>()?),
                issuer: AccountId::decode(cur)?,
            }),
            ASSET_TYPE_POOL_SHARE => Ok(Self::LiquidityPool(LiquidityPoolParameters::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "ChangeTrustAsset",
                value,
            }),
        }
    }
}
