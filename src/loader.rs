//! Program image loading
//!
//! An image is a flat file of big-endian 32-bit words. Its length must be a
//! multiple of four bytes; a truncated trailing word is rejected rather than
//! silently dropped.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Faults reported before execution begins
#[derive(Debug)]
pub enum LoadError {
    /// The image could not be read
    Io { path: PathBuf, source: io::Error },

    /// The image length is not a multiple of four bytes
    Truncated { len: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "Cannot read program '{}': {}", path.display(), source)
            }
            LoadError::Truncated { len } => {
                write!(
                    f,
                    "Program image is {} bytes long, which is not a whole number of 32-bit words",
                    len
                )
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Truncated { .. } => None,
        }
    }
}

/// Decode a raw image into instruction words
pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<u32>, LoadError> {
    if bytes.len() % 4 != 0 {
        return Err(LoadError::Truncated { len: bytes.len() });
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Encode instruction words as a raw image
pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_be_bytes()).collect()
}

/// Read and decode a program image from disk
pub fn load_program_file(path: impl AsRef<Path>) -> Result<Vec<u32>, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    words_from_bytes(&bytes)
}
