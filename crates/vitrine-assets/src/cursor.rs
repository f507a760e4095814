//! Bounds-checked reads over an immutable byte buffer.

use crate::error::GlbError;

/// Read-only view over a byte buffer with little-endian helpers.
///
/// Every read is checked against the buffer length before indexing, so a
/// corrupt length field can only ever produce [`GlbError::OutOfBounds`].
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Borrow `length` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, length: usize) -> Result<&'a [u8], GlbError> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(GlbError::OutOfBounds {
                offset,
                length,
                available: self.bytes.len(),
            })?;
        Ok(&self.bytes[offset..end])
    }

    /// Copy `N` bytes starting at `offset` into a fixed-size array.
    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], GlbError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice(offset, N)?);
        Ok(out)
    }

    pub fn read_u32_le(&self, offset: usize) -> Result<u32, GlbError> {
        self.read_array(offset).map(u32::from_le_bytes)
    }
}
