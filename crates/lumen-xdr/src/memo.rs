//! Transaction memos.

use crate::codec::{encode_string, ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};
use crate::types::Hash256;

/// Maximum byte length of a text memo.
pub const MEMO_TEXT_MAX: usize = 28;

/// An optional note attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Memo {
    None,
    Text(String),
    Id(u64),
    Hash(Hash256),
    Return(Hash256),
}

impl Memo {
    /// Build a text memo, validating the 28-byte limit.
    pub fn text(text: &str) -> Result<Self> {
        if text.len() > MEMO_TEXT_MAX {
            return Err(XdrError::LengthExceedsMax {
                ty: "Memo text",
                len: text.len(),
                max: MEMO_TEXT_MAX,
            });
        }
        Ok(Self::Text(text.to_string()))
    }
}

impl XdrEncode for Memo {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::None => 0u32.encode(out),
            Self::Text(text) => {
                1u32.encode(out);
                encode_string(out, text);
            }
            Self::Id(id) => {
                2u32.encode(out);
                id.encode(out);
            }
            Self::Hash(hash) => {
                3u32.encode(out);
                hash.encode(out);
            }
            Self::Return(hash) => {
                4u32.encode(out);
                hash.encode(out);
            }
        }
    }
}

impl XdrDecode for Memo {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        match cur.read_u32()? {
            0 => Ok(Self::None),
            1 => Ok(Self::Text(cur.read_string("Memo text", MEMO_TEXT_MAX)?)),
            2 => Ok(Self::Id(cur.read_u64()?)),
            3 => Ok(Self::Hash(Hash256::decode(cur)?)),
            4 => Ok(Self::Return(Hash256::decode(cur)?)),
            value => Err(XdrError::InvalidDiscriminant { ty: "Memo", value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_limit() {
        assert!(Memo::text(&"x".repeat(28)).is_ok());
        assert!(matches!(
            Memo::text(&"x".repeat(29)),
            Err(XdrError::LengthExceedsMax { len: 29, max: 28, .. })
        ));
    }

    #[test]
    fn test_all_variants_roundtrip() {
        let memos = [
            Memo::None,
            Memo::text("Hello").unwrap(),
            Memo::Id(0xdead_beef),
            Memo::Hash(Hash256::from_bytes([5; 32])),
            Memo::Return(Hash256::from_bytes([6; 32])),
        ];
        for memo in memos {
            assert_eq!(Memo::from_xdr(&memo.to_xdr()).unwrap(), memo);
        }
    }

    #[test]
    fn test_oversized_text_rejected_on_decode() {
        let mut xdr = Vec::new();
        1u32.encode(&mut xdr);
        encode_string(&mut xdr, &"y".repeat(32));
        assert!(matches!(
            Memo::from_xdr(&xdr),
            Err(XdrError::LengthExceedsMax { .. })
        ));
    }
}
