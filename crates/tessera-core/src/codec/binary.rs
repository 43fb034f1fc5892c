// ============================================
// File: crates/tessera-core/src/codec/binary.rs
// ============================================
//! # Length-Prefixed Binary Fields
//!
//! ## Creation Reason
//! The legacy payload format and the privacy group encoding share one
//! primitive: a field is an 8-byte big-endian length followed by that
//! many bytes, and an array is an 8-byte count followed by fields.
//!
//! ## Main Functionality
//! - `FieldWriter`: Appends fields and arrays to a `BytesMut`
//! - `FieldReader`: Cursor over a byte slice that reports underflow as
//!   `MalformedPayload` instead of panicking
//!
//! ## Wire Format
//! ```text
//! field: ┌──────────────────┬───────────────┐
//!        │ len (u64 BE, 8)  │ len bytes     │
//!        └──────────────────┴───────────────┘
//! array: ┌──────────────────┬───────┬───────┬─────┐
//!        │ count (u64 BE)   │ field │ field │ ... │
//!        └──────────────────┴───────┴───────┴─────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Always validate lengths against the remaining buffer before reading
//! - Lengths are signed 64-bit on the wire; negative values are rejected
//!
//! ## Last Modified
//! v0.1.0 - Initial field codec

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{CoreError, Result};

/// Size of a length or count prefix in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 8;

// ============================================
// FieldWriter
// ============================================

/// Writes length-prefixed fields.
#[derive(Debug, Default)]
pub struct FieldWriter {
    buf: BytesMut,
}

impl FieldWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with reserved capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Writes a bare count or length prefix.
    pub fn put_count(&mut self, count: usize) {
        self.buf.put_u64(count as u64);
    }

    /// Writes one length-prefixed field.
    pub fn put_field(&mut self, bytes: &[u8]) {
        self.buf.reserve(LENGTH_PREFIX_SIZE + bytes.len());
        self.put_count(bytes.len());
        self.buf.put_slice(bytes);
    }

    /// Writes a count followed by one field per item.
    pub fn put_array<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
        T: AsRef<[u8]>,
    {
        let items = items.into_iter();
        self.put_count(items.len());
        for item in items {
            self.put_field(item.as_ref());
        }
    }

    /// Returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

// ============================================
// FieldReader
// ============================================

/// Reads length-prefixed fields from a byte slice.
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    buf: &'a [u8],
}

impl<'a> FieldReader<'a> {
    /// Creates a reader over `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { buf: bytes }
    }

    /// Returns `true` if unread bytes remain.
    #[must_use]
    pub fn has_remaining(&self) -> bool {
        self.buf.has_remaining()
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Reads a count or length prefix.
    ///
    /// # Errors
    /// `MalformedPayload` if fewer than 8 bytes remain or the value is
    /// negative.
    pub fn read_count(&mut self, what: &str) -> Result<usize> {
        if self.buf.remaining() < LENGTH_PREFIX_SIZE {
            return Err(CoreError::malformed(format!(
                "truncated length prefix for {what}: {} bytes left",
                self.buf.remaining()
            )));
        }

        let raw = self.buf.get_i64();
        usize::try_from(raw)
            .map_err(|_| CoreError::malformed(format!("invalid length {raw} for {what}")))
    }

    /// Reads one length-prefixed field.
    ///
    /// # Errors
    /// `MalformedPayload` if the declared length exceeds the remaining
    /// bytes.
    pub fn read_field(&mut self, what: &str) -> Result<Vec<u8>> {
        let len = self.read_count(what)?;
        if len > self.buf.remaining() {
            return Err(CoreError::malformed(format!(
                "{what} declares {len} bytes but only {} remain",
                self.buf.remaining()
            )));
        }

        let field = self.buf[..len].to_vec();
        self.buf.advance(len);
        Ok(field)
    }

    /// Reads a count followed by that many fields.
    ///
    /// # Errors
    /// `MalformedPayload` on any truncated element.
    pub fn read_array(&mut self, what: &str) -> Result<Vec<Vec<u8>>> {
        let count = self.read_count(what)?;
        // Every element needs at least a prefix, so cap the preallocation.
        let mut items = Vec::with_capacity(count.min(self.buf.remaining() / LENGTH_PREFIX_SIZE));
        for _ in 0..count {
            items.push(self.read_field(what)?);
        }
        Ok(items)
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_layout() {
        let mut writer = FieldWriter::new();
        writer.put_field(b"test");
        assert_eq!(
            writer.finish(),
            vec![0, 0, 0, 0, 0, 0, 0, 4, b't', b'e', b's', b't']
        );
    }

    #[test]
    fn test_array_layout() {
        let mut writer = FieldWriter::new();
        writer.put_array([b"a".to_vec(), Vec::new()]);
        assert_eq!(
            writer.finish(),
            vec![0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 1, b'a', 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_reader_walks_fields() {
        let mut writer = FieldWriter::with_capacity(64);
        writer.put_field(b"one");
        writer.put_array([b"two".as_slice(), b"three".as_slice()]);
        let bytes = writer.finish();

        let mut reader = FieldReader::new(&bytes);
        assert_eq!(reader.read_field("first").unwrap(), b"one");
        assert_eq!(
            reader.read_array("list").unwrap(),
            vec![b"two".to_vec(), b"three".to_vec()]
        );
        assert!(!reader.has_remaining());
    }

    #[test]
    fn test_truncated_prefix_is_malformed() {
        let mut reader = FieldReader::new(&[0, 0, 0]);
        assert!(matches!(
            reader.read_field("x"),
            Err(CoreError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_length_beyond_buffer_is_malformed() {
        let bytes = [0, 0, 0, 0, 0, 0, 0, 9, 1, 2];
        let mut reader = FieldReader::new(&bytes);
        assert!(matches!(
            reader.read_field("x"),
            Err(CoreError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_negative_length_is_malformed() {
        let bytes = [0xFF; 8];
        let mut reader = FieldReader::new(&bytes);
        assert!(matches!(
            reader.read_count("x"),
            Err(CoreError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_huge_array_count_is_malformed() {
        let bytes = [0x00, 0x00, 0x00, 0x10, 0, 0, 0, 0];
        let mut reader = FieldReader::new(&bytes);
        assert!(matches!(
            reader.read_array("x"),
            Err(CoreError::MalformedPayload { .. })
        ));
    }
}
