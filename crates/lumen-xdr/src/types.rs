//! Shared wire types: hashes, account identifiers, signers, prices.

use std::fmt;

use crate::codec::{encode_fixed_opaque, encode_var_opaque, ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};

/// Maximum number of operations in a transaction.
pub const MAX_OPERATIONS: usize = 100;

/// Maximum number of extra signers in extended preconditions.
pub const MAX_EXTRA_SIGNERS: usize = 20;

/// Maximum byte length of a signed-payload signer payload.
pub const MAX_SIGNED_PAYLOAD: usize = 64;

/// Maximum byte length of a signature.
pub const MAX_SIGNATURE: usize = 64;

/// A 32-byte hash (transaction hashes, balance ids, pool ids, wasm hashes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|_| XdrError::InvalidUtf8)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| XdrError::LengthExceedsMax {
            ty: "Hash256",
            len: 0,
            max: 32,
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl XdrEncode for Hash256 {
    fn encode(&self, out: &mut Vec<u8>) {
        encode_fixed_opaque(out, &self.0);
    }
}

impl XdrDecode for Hash256 {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self(cur.read_fixed::<32>()?))
    }
}

/// An account identifier: a 32-byte Ed25519 public key.
///
/// Wire form is the PublicKey union, which today has a single arm
/// (key type 0, Ed25519).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", &self.to_hex()[..16])
    }
}

impl XdrEncode for AccountId {
    fn encode(&self, out: &mut Vec<u8>) {
        0u32.encode(out);
        encode_fixed_opaque(out, &self.0);
    }
}

impl XdrDecode for AccountId {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self(cur.read_fixed::<32>()?)),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "AccountId",
                value,
            }),
        }
    }
}

/// A transaction source or payment destination, optionally carrying a
/// 64-bit multiplexing id on top of the underlying Ed25519 key.
///
/// On the wire the muxed form encodes the id before the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MuxedAccount {
    Ed25519([u8; 32]),
    MuxedEd25519 { id: u64, key: [u8; 32] },
}

impl MuxedAccount {
    /// The underlying account id, with any multiplexing id stripped.
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::Ed25519(key) | Self::MuxedEd25519 { key, .. } => AccountId(*key),
        }
    }

    /// The multiplexing id, if present.
    pub fn muxed_id(&self) -> Option<u64> {
        match self {
            Self::Ed25519(_) => None,
            Self::MuxedEd25519 { id, .. } => Some(*id),
        }
    }
}

impl From<AccountId> for MuxedAccount {
    fn from(id: AccountId) -> Self {
        Self::Ed25519(id.0)
    }
}

const KEY_TYPE_ED25519: u32 = 0;
const KEY_TYPE_MUXED_ED25519: u32 = 0x100;

impl XdrEncode for MuxedAccount {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Ed25519(key) => {
                KEY_TYPE_ED25519.encode(out);
                encode_fixed_opaque(out, key);
            }
            Self::MuxedEd25519 { id, key } => {
                KEY_TYPE_MUXED_ED25519.encode(out);
                id.encode(out);
                encode_fixed_opaque(out, key);
            }
        }
    }
}

impl XdrDecode for MuxedAccount {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            KEY_TYPE_ED25519 => Ok(Self::Ed25519(cur.read_fixed::<32>()?)),
            KEY_TYPE_MUXED_ED25519 => Ok(Self::MuxedEd25519 {
                id: cur.read_u64()?,
                key: cur.read_fixed::<32>()?,
            }),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "MuxedAccount",
                value,
            }),
        }
    }
}

/// A key that can authorize an account: plain Ed25519, the hash of a
/// pre-authorized transaction, the preimage-hash form, or an Ed25519 key
/// bound to a fixed payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignerKey {
    Ed25519([u8; 32]),
    PreAuthTx(Hash256),
    HashX(Hash256),
    Ed25519SignedPayload { key: [u8; 32], payload: Vec<u8> },
}

impl SignerKey {
    /// Build a signed-payload signer, validating the payload length.
    pub fn ed25519_signed_payload(key: [u8; 32], payload: Vec<u8>) -> Result<Self> {
        if payload.len() > MAX_SIGNED_PAYLOAD {
            return Err(XdrError::LengthExceedsMax {
                ty: "SignerKey payload",
                len: payload.len(),
                max: MAX_SIGNED_PAYLOAD,
            });
        }
        Ok(Self::Ed25519SignedPayload { key, payload })
    }
}

impl XdrEncode for SignerKey {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Ed25519(key) => {
                0u32.encode(out);
                encode_fixed_opaque(out, key);
            }
            Self::PreAuthTx(hash) => {
                1u32.encode(out);
                hash.encode(out);
            }
            Self::HashX(hash) => {
                2u32.encode(out);
                hash.encode(out);
            }
            Self::Ed25519SignedPayload { key, payload } => {
                3u32.encode(out);
                encode_fixed_opaque(out, key);
                encode_var_opaque(out, payload);
            }
        }
    }
}

impl XdrDecode for SignerKey {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::Ed25519(cur.read_fixed::<32>()?)),
            1 => Ok(Self::PreAuthTx(Hash256::decode(cur)?)),
            2 => Ok(Self::HashX(Hash256::decode(cur)?)),
            3 => Ok(Self::Ed25519SignedPayload {
                key: cur.read_fixed::<32>()?,
                payload: cur.read_var_opaque("SignerKey payload", MAX_SIGNED_PAYLOAD)?,
            }),
            value => Err(XdrError::InvalidDiscriminant {
                ty: "SignerKey",
                value,
            }),
        }
    }
}

/// A signer entry on an account: key plus weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

impl XdrEncode for Signer {
    fn encode(&self, out: &mut Vec<u8>) {
        self.key.encode(out);
        self.weight.encode(out);
    }
}

impl XdrDecode for Signer {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            key: SignerKey::decode(cur)?,
            weight: cur.read_u32()?,
        })
    }
}

/// An offer price as a rational number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub n: i32,
    pub d: i32,
}

impl XdrEncode for Price {
    fn encode(&self, out: &mut Vec<u8>) {
        self.n.encode(out);
        self.d.encode(out);
    }
}

impl XdrDecode for Price {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            n: cur.read_i32()?,
            d: cur.read_i32()?,
        })
    }
}

/// A signature plus the 4-byte hint identifying which signer produced it.
///
/// The hint is the last four bytes of the signer's public key. It is a
/// lookup aid only, never a security check.
#[derive(Clone, PartialEq, Eq)]
pub struct DecoratedSignature {
    pub hint: [u8; 4],
    pub signature: Vec<u8>,
}

impl fmt::Debug for DecoratedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecoratedSignature({}, {}...)",
            hex::encode(self.hint),
            hex::encode(&self.signature[..self.signature.len().min(8)])
        )
    }
}

impl XdrEncode for DecoratedSignature {
    fn encode(&self, out: &mut Vec<u8>) {
        encode_fixed_opaque(out, &self.hint);
        encode_var_opaque(out, &self.signature);
    }
}

impl XdrDecode for DecoratedSignature {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            hint: cur.read_fixed::<4>()?,
            signature: cur.read_var_opaque("signature", MAX_SIGNATURE)?,
        })
    }
}
