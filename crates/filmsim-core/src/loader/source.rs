//! Byte sources that supply the raw profile catalog.

use std::io;
use std::path::{Path, PathBuf};

/// Supplies the raw bytes of a profile catalog.
///
/// Implementations perform a single bounded read. Cancellation imposed by
/// the host should surface as an `io::Error`.
pub trait ProfileSource: Send + Sync {
    fn read(&self) -> io::Result<Vec<u8>>;

    /// Human-readable origin for logs and error messages.
    fn describe(&self) -> String;
}

/// Reads the catalog from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the catalog is read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileSource for FileSource {
    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a catalog held in memory, e.g. one compiled into the binary.
#[derive(Debug, Clone)]
pub struct MemorySource {
    label: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            bytes: bytes.into(),
        }
    }
}

impl ProfileSource for MemorySource {
    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<memory:{}>", self.label)
    }
}
