//! Filesystems that `@include` paths are resolved against.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use fgdkit_foundation::{Error, Result};

/// Read access to the files an FGD may include.
pub trait FileSystem {
    /// Reads a whole file.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::FileNotFound`](fgdkit_foundation::ErrorKind::FileNotFound)
    /// if the file does not exist, or [`ErrorKind::Io`](fgdkit_foundation::ErrorKind::Io)
    /// if it exists but cannot be read.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Returns the key used to detect repeated includes of the same file.
    fn identity(&self, path: &str) -> String {
        normalize_path(path)
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        (**self).read(path)
    }

    fn identity(&self, path: &str) -> String {
        (**self).identity(path)
    }
}

/// Lowercases a path, uses forward slashes and drops `./` segments.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/").to_lowercase();
    unified
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// A filesystem held entirely in memory, keyed by normalized path.
#[derive(Clone, Debug, Default)]
pub struct MemoryFs {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFs {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, builder style.
    #[must_use]
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.add(path, contents);
        self
    }

    /// Adds or replaces a file.
    pub fn add(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        self.files.insert(normalize_path(path), contents.into());
    }

    /// Returns the number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if there are no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| Error::file_not_found(path))
    }
}

/// A filesystem rooted at a directory on disk.
#[derive(Clone, Debug)]
pub struct DirectoryFs {
    root: PathBuf,
}

impl DirectoryFs {
    /// Creates a filesystem that resolves paths under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSystem for DirectoryFs {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.root.join(path.replace('\\', "/"));
        std::fs::read(&full).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Error::file_not_found(full.display().to_string()),
            _ => Error::io(format!("{}: {err}", full.display())),
        })
    }
}
