//! Primitive XDR codec.
//!
//! XDR encodes everything in 4-byte units: fixed-width big-endian integers,
//! length-prefixed variable data padded with zeros to the next multiple of
//! four, presence-flagged optionals, and count-prefixed arrays. Unions are a
//! u32 discriminant followed by the active arm.
//!
//! Encoding is infallible: values are validated when constructed, so by the
//! time a value exists it always has a wire form. Decoding is strict and
//! returns a typed error on the first malformed byte.

use data_encoding::BASE64;

use crate::error::{Result, XdrError};

/// A read cursor over an XDR byte buffer.
///
/// The cursor advances as values are decoded; decoding past the end of the
/// buffer yields [`XdrError::UnexpectedEof`].
#[derive(Debug)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    /// Create a cursor at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True when every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Take `n` raw bytes off the front.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(XdrError::UnexpectedEof);
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let b = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(b);
        Ok(u64::from_be_bytes(arr))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// Booleans are a u32 that must be exactly 0 or 1.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(XdrError::InvalidBoolean(other)),
        }
    }

    /// Read a fixed-length opaque of `N` bytes plus its zero padding.
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        self.read_padding(N)?;
        Ok(out)
    }

    /// Read a length-prefixed opaque, enforcing `max` on the declared length.
    pub fn read_var_opaque(&mut self, ty: &'static str, max: usize) -> Result<Vec<u8>> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(XdrError::LengthExceedsMax { ty, len, max });
        }
        let data = self.take(len)?.to_vec();
        self.read_padding(len)?;
        Ok(data)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self, ty: &'static str, max: usize) -> Result<String> {
        let bytes = self.read_var_opaque(ty, max)?;
        String::from_utf8(bytes).map_err(|_| XdrError::InvalidUtf8)
    }

    /// Consume the padding that follows `len` payload bytes, verifying it is
    /// all zeros.
    fn read_padding(&mut self, len: usize) -> Result<()> {
        let pad = (4 - len % 4) % 4;
        if pad == 0 {
            return Ok(());
        }
        for &b in self.take(pad)? {
            if b != 0 {
                return Err(XdrError::InvalidPadding);
            }
        }
        Ok(())
    }
}

/// Types with an XDR wire form.
pub trait XdrEncode {
    /// Append the wire bytes of `self` to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Encode to a fresh buffer.
    fn to_xdr(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode(&mut out);
        out
    }

    /// Encode to base64 text, the form exchanged with ledger endpoints.
    fn to_xdr_base64(&self) -> String {
        BASE64.encode(&self.to_xdr())
    }
}

/// Types decodable from an XDR wire form.
pub trait XdrDecode: Sized {
    /// Decode one value, advancing the cursor.
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self>;

    /// Decode a complete buffer; trailing bytes are an error.
    fn from_xdr(bytes: &[u8]) -> Result<Self> {
        let mut cur = ReadCursor::new(bytes);
        let value = Self::decode(&mut cur)?;
        if !cur.is_exhausted() {
            return Err(XdrError::TrailingBytes(cur.remaining()));
        }
        Ok(value)
    }

    /// Decode from base64 text.
    fn from_xdr_base64(text: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(text.trim().as_bytes())
            .map_err(|_| XdrError::InvalidBase64)?;
        Self::from_xdr(&bytes)
    }
}

impl XdrEncode for u32 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl XdrDecode for u32 {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        cur.read_u32()
    }
}

impl XdrEncode for i32 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl XdrDecode for i32 {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        cur.read_i32()
    }
}

impl XdrEncode for u64 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl XdrDecode for u64 {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        cur.read_u64()
    }
}

impl XdrEncode for i64 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl XdrDecode for i64 {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        cur.read_i64()
    }
}

impl XdrEncode for bool {
    fn encode(&self, out: &mut Vec<u8>) {
        (*self as u32).encode(out);
    }
}

impl XdrDecode for bool {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        cur.read_bool()
    }
}

/// Optionals are a u32 presence flag followed by the value iff present.
impl<T: XdrEncode> XdrEncode for Option<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Some(v) => {
                1u32.encode(out);
                v.encode(out);
            }
            None => 0u32.encode(out),
        }
    }
}

impl<T: XdrDecode> XdrDecode for Option<T> {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        if cur.read_bool()? {
            Ok(Some(T::decode(cur)?))
        } else {
            Ok(None)
        }
    }
}

/// Arrays are a u32 count followed by consecutively encoded elements.
///
/// Per-entity count limits (operations, claimants, path hops, ...) are
/// enforced by the entity decoders; the generic impl only guards the count
/// against the bytes actually available, so a corrupt count cannot force a
/// huge allocation.
impl<T: XdrEncode> XdrEncode for Vec<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        (self.len() as u32).encode(out);
        for item in self {
            item.encode(out);
        }
    }
}

impl<T: XdrDecode> XdrDecode for Vec<T> {
    fn decode(cur: &mut ReadCursor<'_>) -> Result<Self> {
        let count = cur.read_u32()? as usize;
        // Every XDR element occupies at least 4 bytes.
        if count > cur.remaining() / 4 {
            return Err(XdrError::UnexpectedEof);
        }
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode(cur)?);
        }
        Ok(items)
    }
}

/// Encode a variable-length opaque: length prefix, payload, zero padding.
pub fn encode_var_opaque(out: &mut Vec<u8>, data: &[u8]) {
    (data.len() as u32).encode(out);
    out.extend_from_slice(data);
    out.extend(std::iter::repeat(0u8).take((4 - data.len() % 4) % 4));
}

/// Encode a fixed-length opaque with zero padding to the next 4-byte unit.
pub fn encode_fixed_opaque(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
    out.extend(std::iter::repeat(0u8).take((4 - data.len() % 4) % 4));
}

/// Encode a string: identical wire form to a variable-length opaque.
pub fn encode_string(out: &mut Vec<u8>, s: &str) {
    encode_var_opaque(out, s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_roundtrip() {
        let mut out = Vec::new();
        0xdead_beefu32.encode(&mut out);
        (-7i32).encode(&mut out);
        0x0102_0304_0506_0708u64.encode(&mut out);
        i64::MIN.encode(&mut out);

        let mut cur = ReadCursor::new(&out);
        assert_eq!(cur.read_u32().unwrap(), 0xdead_beef);
        assert_eq!(cur.read_i32().unwrap(), -7);
        assert_eq!(cur.read_u64().unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(cur.read_i64().unwrap(), i64::MIN);
        assert!(cur.is_exhausted());
    }

    #[test]
    fn test_big_endian_layout() {
        let mut out = Vec::new();
        1u32.encode(&mut out);
        assert_eq!(out, [0, 0, 0, 1]);
    }

    #[test]
    fn test_bool_rejects_other_values() {
        let mut cur = ReadCursor::new(&[0, 0, 0, 2]);
        assert_eq!(cur.read_bool(), Err(XdrError::InvalidBoolean(2)));
    }

    #[test]
    fn test_var_opaque_padding() {
        let mut out = Vec::new();
        encode_var_opaque(&mut out, b"hello");
        assert_eq!(out, [0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o', 0, 0, 0]);

        let mut cur = ReadCursor::new(&out);
        assert_eq!(cur.read_var_opaque("test", 64).unwrap(), b"hello");
        assert!(cur.is_exhausted());
    }

    #[test]
    fn test_nonzero_padding_rejected() {
        let buf = [0, 0, 0, 1, b'x', 0, 0, 1];
        let mut cur = ReadCursor::new(&buf);
        assert_eq!(
            cur.read_var_opaque("test", 64),
            Err(XdrError::InvalidPadding)
        );
    }

    #[test]
    fn test_var_opaque_max_enforced() {
        let mut out = Vec::new();
        encode_var_opaque(&mut out, &[0u8; 10]);
        let mut cur = ReadCursor::new(&out);
        assert!(matches!(
            cur.read_var_opaque("test", 4),
            Err(XdrError::LengthExceedsMax { len: 10, max: 4, .. })
        ));
    }

    #[test]
    fn test_truncated_input() {
        let mut cur = ReadCursor::new(&[0, 0]);
        assert_eq!(cur.read_u32(), Err(XdrError::UnexpectedEof));
    }

    #[test]
    fn test_option_roundtrip() {
        let some: Option<u32> = Some(9);
        let none: Option<u32> = None;
        assert_eq!(Option::<u32>::from_xdr(&some.to_xdr()).unwrap(), Some(9));
        assert_eq!(Option::<u32>::from_xdr(&none.to_xdr()).unwrap(), None);
        assert_eq!(none.to_xdr(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_vec_count_guard() {
        // Declared count of 1000 elements with only 4 bytes behind it.
        let buf = [0, 0, 3, 0xe8, 0, 0, 0, 1];
        assert_eq!(Vec::<u32>::from_xdr(&buf), Err(XdrError::UnexpectedEof));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let buf = [0, 0, 0, 1, 0xff];
        assert_eq!(u32::from_xdr(&buf), Err(XdrError::TrailingBytes(1)));
    }

    #[test]
    fn test_base64_roundtrip() {
        let v = 0x00ff_00ffu32;
        let text = v.to_xdr_base64();
        assert_eq!(u32::from_xdr_base64(&text).unwrap(), v);
        assert!(u32::from_xdr_base64("not base64!").is_err());
    }
}
