//! Interning of strings into dense 16-bit ids.
//!
//! Every string in an encoded file is replaced by its id; the table itself
//! is written once, ahead of the entities.

use std::collections::HashMap;

use fgdkit_foundation::{CapacityError, Error, FormatError, Result};

use crate::reader::Reader;

/// Number of distinct strings a 16-bit id can address.
pub const MAX_STRINGS: usize = 1 << 16;

/// Longest string a 16-bit length prefix can describe.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Assigns ids to strings while encoding.
#[derive(Clone, Debug, Default)]
pub struct StringDictionary {
    ids: HashMap<String, u16>,
    strings: Vec<String>,
}

impl StringDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `text`, assigning the next one if it is new.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::DictionaryOverflow`] once every id is taken.
    pub fn index_of(&mut self, text: &str) -> Result<u16> {
        if let Some(&id) = self.ids.get(text) {
            return Ok(id);
        }
        let id = u16::try_from(self.strings.len()).map_err(|_| {
            Error::capacity(CapacityError::DictionaryOverflow { limit: MAX_STRINGS })
        })?;
        self.ids.insert(text.to_string(), id);
        self.strings.push(text.to_string());
        Ok(id)
    }

    /// Returns the number of distinct strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if no strings were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Writes the table: a `u32` count, then each string as a `u16` byte
    /// length and its UTF-8 bytes, in id order.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::StringTooLong`] for a string over
    /// [`MAX_STRING_LEN`] bytes.
    pub fn serialize(&self, out: &mut Vec<u8>) -> Result<()> {
        // At most MAX_STRINGS entries, which fits a u32.
        #[allow(clippy::cast_possible_truncation)]
        let count = self.strings.len() as u32;
        out.extend_from_slice(&count.to_be_bytes());
        for text in &self.strings {
            let len = u16::try_from(text.len()).map_err(|_| {
                Error::capacity(CapacityError::StringTooLong {
                    len: text.len(),
                    limit: MAX_STRING_LEN,
                })
            })?;
            out.extend_from_slice(&len.to_be_bytes());
            out.extend_from_slice(text.as_bytes());
        }
        Ok(())
    }
}

/// The decoded string table of an encoded file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictionaryReader {
    strings: Vec<String>,
}

impl DictionaryReader {
    /// Reads a table written by [`StringDictionary::serialize`].
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] for truncated input or invalid UTF-8.
    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u32()?;
        let mut strings = Vec::new();
        for index in 0..count as usize {
            let len = reader.read_u16()?;
            let bytes = reader.take(usize::from(len))?;
            let text = std::str::from_utf8(bytes)
                .map_err(|_| Error::format(FormatError::InvalidUtf8(index)))?;
            strings.push(text.to_string());
        }
        Ok(Self { strings })
    }

    /// Returns the string with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidStringId`] if the id is out of range.
    pub fn lookup(&self, id: u16) -> Result<&str> {
        self.strings
            .get(usize::from(id))
            .map(String::as_str)
            .ok_or_else(|| {
                Error::format(FormatError::InvalidStringId {
                    id,
                    len: self.strings.len(),
                })
            })
    }

    /// Reads an id and returns a copy of its string.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] for truncated input or a bad id.
    pub fn read_string(&self, reader: &mut Reader<'_>) -> Result<String> {
        let id = reader.read_u16()?;
        self.lookup(id).map(str::to_string)
    }

    /// Returns the number of strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
