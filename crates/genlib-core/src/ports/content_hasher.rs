//! Content hasher port definition.
//!
//! Fingerprints are only required to be stable for identical file
//! contents; tamper resistance is not a goal.
//!
//! # Design
//!
//! - Synchronous: callers run it on a blocking thread
//! - Implementations live in `genlib-fs`

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while fingerprinting a file.
#[derive(Debug, Error)]
pub enum HashError {
    /// The file does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read.
    #[error("IO error: {0}")]
    Io(String),
}

/// Port for computing a stable content fingerprint of a file.
#[cfg_attr(test, mockall::automock)]
pub trait ContentHasher: Send + Sync {
    /// Compute the hex-encoded fingerprint of the file at `path`.
    fn compute_hash(&self, path: &Path) -> Result<String, HashError>;
}
