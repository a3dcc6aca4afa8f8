//! Compact binary encoding for FGD databases.
//!
//! This crate provides:
//! - [`StringDictionary`] / [`DictionaryReader`] - Interning of repeated text
//! - [`encode`] / [`decode`] - The versioned big-endian file format
//!
//! The format drops descriptions and helpers to keep files small; use a
//! MessagePack snapshot when those must survive.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod dictionary;
pub mod reader;


pub use codec::{FORMAT_VERSION, MAGIC, decode, encode};
pub use dictionary::{DictionaryReader, StringDictionary};
pub use reader::Reader;
