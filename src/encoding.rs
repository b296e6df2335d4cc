//! Canonical binary primitives.
//!
//! Fixed-width integers are big-endian. Variable-length integers are unsigned
//! LEB128 and must be in minimal form when read back. Byte slices carry a varint
//! length prefix. Every encoder and decoder in the crate is built from the
//! functions here so both directions stay byte-identical.

use std::io::{self, Read, Write};

use crate::error::DecodeError;

/// Longest LEB128 encoding of a `u64`.
pub const MAX_UVARINT_LEN: usize = 10;

/// Trait for objects that have a canonical binary representation for hashing/signing.
/// careful: This must be deterministic across platforms/versions.
pub trait CanonicalSerialize {
    fn canonical_serialize<W: Write>(&self, writer: &mut W) -> io::Result<()>;

    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.canonical_serialize(&mut buf).expect("memory write failed");
        buf
    }
}

pub trait CanonicalDeserialize: Sized {
    fn canonical_deserialize<R: Read>(reader: &mut R) -> Result<Self, DecodeError>;

    /// Decodes a complete value; leftover bytes are rejected.
    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = bytes;
        let value = Self::canonical_deserialize(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(DecodeError::TrailingBytes(cursor.len()));
        }
        Ok(value)
    }
}

// --- Writers ---

pub fn write_u8<W: Write>(writer: &mut W, value: u8) -> io::Result<()> {
    writer.write_all(&[value])
}

pub fn write_u64<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    writer.write_all(&value.to_be_bytes())
}

pub fn write_uvarint<W: Write>(writer: &mut W, mut value: u64) -> io::Result<()> {
    let mut buf = [0u8; MAX_UVARINT_LEN];
    let mut len = 0;
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf[len] = byte;
        len += 1;
        if value == 0 {
            break;
        }
    }
    writer.write_all(&buf[..len])
}

pub fn write_byte_slice<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    write_uvarint(writer, bytes.len() as u64)?;
    writer.write_all(bytes)
}

// --- Readers ---

fn read_exact<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    what: &'static str,
) -> Result<(), DecodeError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => DecodeError::Truncated(what),
        _ => DecodeError::Io(e.to_string()),
    })
}

pub fn read_u8<R: Read>(reader: &mut R) -> Result<u8, DecodeError> {
    let mut buf = [0u8; 1];
    read_exact(reader, &mut buf, "byte")?;
    Ok(buf[0])
}

pub fn read_u64<R: Read>(reader: &mut R) -> Result<u64, DecodeError> {
    let mut buf = [0u8; 8];
    read_exact(reader, &mut buf, "u64")?;
    Ok(u64::from_be_bytes(buf))
}

pub fn read_uvarint<R: Read>(reader: &mut R) -> Result<u64, DecodeError> {
    let mut result = 0u64;
    for i in 0..MAX_UVARINT_LEN {
        let mut buf = [0u8; 1];
        read_exact(reader, &mut buf, "varint")?;
        let byte = buf[0];
        let low = u64::from(byte & 0x7f);
        // The tenth byte may only contribute the top bit.
        if i == MAX_UVARINT_LEN - 1 && low > 1 {
            return Err(DecodeError::VarintOverflow);
        }
        result |= low << (7 * i);
        if byte & 0x80 == 0 {
            if i > 0 && byte == 0 {
                return Err(DecodeError::NonCanonicalVarint);
            }
            return Ok(result);
        }
    }
    Err(DecodeError::VarintOverflow)
}

pub fn read_byte_slice<R: Read>(reader: &mut R) -> Result<Vec<u8>, DecodeError> {
    let declared = read_uvarint(reader)?;
    // Read through `take` so a hostile prefix can't force a huge allocation.
    let mut buf = Vec::new();
    reader
        .by_ref()
        .take(declared)
        .read_to_end(&mut buf)
        .map_err(|e| DecodeError::Io(e.to_string()))?;
    if buf.len() as u64 != declared {
        return Err(DecodeError::LengthOverflow {
            declared,
            available: buf.len(),
        });
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        write_uvarint(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn test_u64_is_big_endian() {
        let mut buf = Vec::new();
        write_u64(&mut buf, 0x0102_0304_0506_0708).unwrap();
        assert_eq!(buf, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(read_u64(&mut buf.as_slice()).unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_uvarint_known_encodings() {
        assert_eq!(varint(0), vec![0x00]);
        assert_eq!(varint(1), vec![0x01]);
        assert_eq!(varint(127), vec![0x7f]);
        assert_eq!(varint(128), vec![0x80, 0x01]);
        assert_eq!(varint(300), vec![0xac, 0x02]);
        assert_eq!(varint(u64::MAX).len(), MAX_UVARINT_LEN);

        for value in [0, 1, 127, 128, 300, 1 << 35, u64::MAX] {
            assert_eq!(read_uvarint(&mut varint(value).as_slice()).unwrap(), value);
        }
    }

    #[test]
    fn test_uvarint_rejects_non_minimal() {
        let padded = [0x80u8, 0x00];
        assert_eq!(
            read_uvarint(&mut &padded[..]),
            Err(DecodeError::NonCanonicalVarint)
        );
    }

    #[test]
    fn test_uvarint_rejects_overflow() {
        let mut too_big = vec![0xffu8; 9];
        too_big.push(0x02);
        assert_eq!(read_uvarint(&mut too_big.as_slice()), Err(DecodeError::VarintOverflow));

        let too_long = [0x80u8; 11];
        assert_eq!(read_uvarint(&mut &too_long[..]), Err(DecodeError::VarintOverflow));
    }

    #[test]
    fn test_truncated_inputs() {
        assert_eq!(read_u64(&mut &[0u8; 7][..]), Err(DecodeError::Truncated("u64")));
        assert_eq!(read_u8(&mut &[0u8; 0][..]), Err(DecodeError::Truncated("byte")));
        assert_eq!(read_uvarint(&mut &[0x80u8][..]), Err(DecodeError::Truncated("varint")));
    }

    #[test]
    fn test_byte_slice_length_prefix_exceeds_input() {
        // Declares 5 bytes, carries 2.
        let data = [0x05u8, 0xaa, 0xbb];
        assert_eq!(
            read_byte_slice(&mut &data[..]),
            Err(DecodeError::LengthOverflow { declared: 5, available: 2 })
        );

        // A huge declared length must fail without allocating for it.
        let mut huge = varint(u64::MAX >> 1);
        huge.push(0x01);
        assert!(matches!(
            read_byte_slice(&mut huge.as_slice()),
            Err(DecodeError::LengthOverflow { available: 1, .. })
        ));
    }

    #[test]
    fn test_byte_slice_advances_cursor() {
        let mut buf = Vec::new();
        write_byte_slice(&mut buf, b"abc").unwrap();
        write_u8(&mut buf, 0x42).unwrap();
        assert_eq!(buf, vec![0x03, b'a', b'b', b'c', 0x42]);

        let mut cursor = buf.as_slice();
        assert_eq!(read_byte_slice(&mut cursor).unwrap(), b"abc".to_vec());
        assert_eq!(read_u8(&mut cursor).unwrap(), 0x42);
        assert!(cursor.is_empty());
    }
}
