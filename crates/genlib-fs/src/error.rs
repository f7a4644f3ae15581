//! Error types for filesystem adapters.

use std::io;

use genlib_core::HashError;
use thiserror::Error;

/// Errors while reading version metadata from a PE file.
///
/// The version port reports absence as `None`; these errors only surface
/// in logs and through [`crate::parse_fixed_file_version`].
#[derive(Debug, Error)]
pub enum PeError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a PE executable")]
    NotPortableExecutable,

    #[error("No version resource found")]
    NoVersionResource,

    #[error("File too large to inspect: {0} bytes")]
    TooLarge(u64),
}

/// Map an I/O error for `path` onto the hasher port error.
pub fn hash_error(path: &std::path::Path, err: &io::Error) -> HashError {
    if err.kind() == io::ErrorKind::NotFound {
        HashError::NotFound(path.display().to_string())
    } else {
        HashError::Io(format!("{}: {err}", path.display()))
    }
}
