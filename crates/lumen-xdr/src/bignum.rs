//! 128-bit and 256-bit contract integers.
//!
//! On the wire these are two or four unsigned 64-bit words, most significant
//! first. 128-bit values map to native `i128`/`u128`; 256-bit values are
//! exposed through `num_bigint` with range validation at the boundary.

use num_bigint::{BigInt, BigUint, Sign};

use crate::codec::{ReadCursor, XdrDecode, XdrEncode};
use crate::error::{Result, XdrError};

/// Wire words of an unsigned 128-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UInt128Parts {
    pub hi: u64,
    pub lo: u64,
}

impl UInt128Parts {
    pub fn from_u128(v: u128) -> Self {
        Self {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }

    pub fn to_u128(self) -> u128 {
        ((self.hi as u128) << 64) | self.lo as u128
    }

    /// Convert from an arbitrary-precision integer, rejecting values outside
    /// `[0, 2^128)`.
    pub fn from_bigint(v: &BigInt) -> Result<Self> {
        if v.sign() == Sign::Minus || v.bits() > 128 {
            return Err(XdrError::OutOfRange("u128"));
        }
        let (_, bytes) = v.to_bytes_be();
        let mut buf = [0u8; 16];
        buf[16 - bytes.len()..].copy_from_slice(&bytes);
        Ok(Self::from_u128(u128::from_be_bytes(buf)))
    }
}

impl XdrEncode for UInt128Parts {
    fn encode(&self, out: &mut Vec<u8>) {
        self.hi.encode(out);
        self.lo.encode(out);
    }
}

impl XdrDecode for UInt128Parts {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            hi: cur.read_u64()?,
            lo: cur.read_u64()?,
        })
    }
}

/// Wire words of a signed 128-bit integer (two's complement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Int128Parts {
    pub hi: i64,
    pub lo: u64,
}

impl Int128Parts {
    pub fn from_i128(v: i128) -> Self {
        Self {
            hi: (v >> 64) as i64,
            lo: v as u64,
        }
    }

    pub fn to_i128(self) -> i128 {
        ((self.hi as i128) << 64) | self.lo as i128
    }

    /// Convert from an arbitrary-precision integer, rejecting values outside
    /// `[-2^127, 2^127)`.
    pub fn from_bigint(v: &BigInt) -> Result<Self> {
        let lo_bound = -(BigInt::from(1u8) << 127u32);
        let hi_bound = BigInt::from(1u8) << 127u32;
        if *v < lo_bound || *v >= hi_bound {
            return Err(XdrError::OutOfRange("i128"));
        }
        // In range, so the native conversion cannot fail.
        let (sign, bytes) = v.to_bytes_be();
        let mut buf = [0u8; 16];
        buf[16 - bytes.len()..].copy_from_slice(&bytes);
        let magnitude = u128::from_be_bytes(buf);
        let value = if sign == Sign::Minus {
            (magnitude as i128).wrapping_neg()
        } else {
            magnitude as i128
        };
        Ok(Self::from_i128(value))
    }
}

impl XdrEncode for Int128Parts {
    fn encode(&self, out: &mut Vec<u8>) {
        self.hi.encode(out);
        self.lo.encode(out);
    }
}

impl XdrDecode for Int128Parts {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            hi: cur.read_i64()?,
            lo: cur.read_u64()?,
        })
    }
}

/// Wire words of an unsigned 256-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UInt256Parts {
    pub hi_hi: u64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

impl UInt256Parts {
    /// Convert from an arbitrary-precision integer, rejecting values outside
    /// `[0, 2^256)`.
    pub fn from_biguint(v: &BigUint) -> Result<Self> {
        if v.bits() > 256 {
            return Err(XdrError::OutOfRange("u256"));
        }
        let bytes = v.to_bytes_be();
        let mut buf = [0u8; 32];
        buf[32 - bytes.len()..].copy_from_slice(&bytes);
        Ok(Self::from_be_bytes(buf))
    }

    pub fn to_biguint(self) -> BigUint {
        BigUint::from_bytes_be(&self.to_be_bytes())
    }

    fn from_be_bytes(b: [u8; 32]) -> Self {
        let word = |i: usize| u64::from_be_bytes(b[i * 8..i * 8 + 8].try_into().unwrap());
        Self {
            hi_hi: word(0),
            hi_lo: word(1),
            lo_hi: word(2),
            lo_lo: word(3),
        }
    }

    fn to_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..8].copy_from_slice(&self.hi_hi.to_be_bytes());
        out[8..16].copy_from_slice(&self.hi_lo.to_be_bytes());
        out[16..24].copy_from_slice(&self.lo_hi.to_be_bytes());
        out[24..].copy_from_slice(&self.lo_lo.to_be_bytes());
        out
    }
}

impl XdrEncode for UInt256Parts {
    fn encode(&self, out: &mut Vec<u8>) {
        self.hi_hi.encode(out);
        self.hi_lo.encode(out);
        self.lo_hi.encode(out);
        self.lo_lo.encode(out);
    }
}

impl XdrDecode for UInt256Parts {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            hi_hi: cur.read_u64()?,
            hi_lo: cur.read_u64()?,
            lo_hi: cur.read_u64()?,
            lo_lo: cur.read_u64()?,
        })
    }
}

/// Wire words of a signed 256-bit integer (two's complement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Int256Parts {
    pub hi_hi: i64,
    pub hi_lo: u64,
    pub lo_hi: u64,
    pub lo_lo: u64,
}

impl Int256Parts {
    /// Convert from an arbitrary-precision integer, rejecting values outside
    /// `[-2^255, 2^255)`.
    pub fn from_bigint(v: &BigInt) -> Result<Self> {
        let lo_bound = -(BigInt::from(1u8) << 255u32);
        let hi_bound = BigInt::from(1u8) << 255u32;
        if *v < lo_bound || *v >= hi_bound {
            return Err(XdrError::OutOfRange("i256"));
        }
        let unsigned = if v.sign() == Sign::Minus {
            ((BigInt::from(1u8) << 256u32) + v).to_biguint().unwrap()
        } else {
            v.to_biguint().unwrap()
        };
        let parts = UInt256Parts::from_biguint(&unsigned)?;
        Ok(Self {
            hi_hi: parts.hi_hi as i64,
            hi_lo: parts.hi_lo,
            lo_hi: parts.lo_hi,
            lo_lo: parts.lo_lo,
        })
    }

    pub fn to_bigint(self) -> BigInt {
        let unsigned = UInt256Parts {
            hi_hi: self.hi_hi as u64,
            hi_lo: self.hi_lo,
            lo_hi: self.lo_hi,
            lo_lo: self.lo_lo,
        }
        .to_biguint();
        let value = BigInt::from(unsigned);
        if self.hi_hi < 0 {
            value - (BigInt::from(1u8) << 256u32)
        } else {
            value
        }
    }
}

impl XdrEncode for Int256Parts {
    fn encode(&self, out: &mut Vec<u8>) {
        self.hi_hi.encode(out);
        self.hi_lo.encode(out);
        self.lo_hi.encode(out);
        self.lo_lo.encode(out);
    }
}

impl XdrDecode for Int256Parts {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        Ok(Self {
            hi_hi: cur.read_i64()?,
            hi_lo: cur.read_u64()?,
            lo_hi: cur.read_u64()?,
            lo_lo: cur.read_u64()?,
        })
    }
}
