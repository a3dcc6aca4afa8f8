//! Bounds-checked big-endian reads over a byte slice.

use fgdkit_foundation::{Error, FormatError, Result};

/// A cursor over encoded bytes.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Returns the current byte offset.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Consumes `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Truncated`] if fewer bytes remain.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::format(FormatError::Truncated {
                offset: self.offset,
                needed: len,
            }));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    /// Reads one byte.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Truncated`] at end of input.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Reads a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Truncated`] at end of input.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.take_array().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Truncated`] at end of input.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.take_array().map(u32::from_be_bytes)
    }

    /// Reads a big-endian `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Truncated`] at end of input.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.take_array().map(f64::from_be_bytes)
    }
}
