//! Lossless database snapshots using `MessagePack`.
//!
//! Unlike the compact binary format, a snapshot keeps descriptions and
//! helpers, and stores base links exactly as they are.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use fgdkit_foundation::{Error, ErrorKind, Result};
use fgdkit_schema::Fgd;
use tracing::debug;

/// Serializes a database to `MessagePack` bytes.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(fgd: &Fgd) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(fgd).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a database from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Fgd> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Saves a database to a file, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(fgd: &Fgd, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create file '{}': {e}", path.display())))?;

    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(fgd)?;

    writer
        .write_all(&bytes)
        .map_err(|e| Error::io(format!("failed to write to file '{}': {e}", path.display())))?;
    writer
        .flush()
        .map_err(|e| Error::io(format!("failed to flush file '{}': {e}", path.display())))?;

    debug!(path = %path.display(), bytes = bytes.len(), "saved snapshot");
    Ok(())
}

/// Loads a database from a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Fgd> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open file '{}': {e}", path.display())))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;

    from_bytes(&bytes)
}
