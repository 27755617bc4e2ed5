//! Bounds-checked little-endian reads over the raw input bytes.

use std::convert::TryInto;

use crate::error::{Error, Result};

/// A cursor over one BSON document's bytes.
///
/// Every accessor checks the remaining length; a read past the end reports
/// [`Error::UnexpectedEof`] instead of trusting the document's own structural
/// claims.
pub(crate) struct BsonReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BsonReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn byte_at(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// The byte just before the cursor, if any.
    pub(crate) fn prev_byte(&self) -> Option<u8> {
        self.pos.checked_sub(1).and_then(|i| self.byte_at(i))
    }

    fn peek(&self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::UnexpectedEof)?;
        self.bytes.get(self.pos..end).ok_or(Error::UnexpectedEof)
    }

    /// Reads an `i32` without advancing the cursor.
    pub(crate) fn peek_i32(&self) -> Result<i32> {
        // Unwrap safety: `peek` returned exactly four bytes.
        Ok(i32::from_le_bytes(self.peek(4)?.try_into().unwrap()))
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        let byte = *self.bytes.get(self.pos).ok_or(Error::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        let value = self.peek_i32()?;
        self.pos += 4;
        Ok(value)
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64> {
        // Unwrap safety: `peek` returned exactly eight bytes.
        let value = i64::from_le_bytes(self.peek(8)?.try_into().unwrap());
        self.pos += 8;
        Ok(value)
    }

    /// Reads an IEEE-754 binary64 value.
    pub(crate) fn read_f64(&mut self) -> Result<f64> {
        // Unwrap safety: `peek` returned exactly eight bytes.
        let value = f64::from_le_bytes(self.peek(8)?.try_into().unwrap());
        self.pos += 8;
        Ok(value)
    }

    /// Consumes and returns the next `n` bytes.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let slice = self.peek(n)?;
        self.pos += n;
        Ok(slice)
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<()> {
        self.peek(n)?;
        self.pos += n;
        Ok(())
    }

    /// Consumes a null-terminated byte string, returning the bytes before
    /// the terminator and leaving the cursor just past it.
    pub(crate) fn cstring(&mut self) -> Result<&'a [u8]> {
        let rest = &self.bytes[self.pos..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(Error::UnexpectedEof)?;
        self.pos += nul + 1;
        Ok(&rest[..nul])
    }
}
