//! SHA-256 content fingerprints.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use genlib_core::{ContentHasher, HashError};
use sha2::{Digest, Sha256};

use crate::error::hash_error;

const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 of a file as lowercase hex.
///
/// Streams the file in chunks, so large archives never load into memory.
pub fn compute_sha256(path: &Path) -> Result<String, HashError> {
    let mut file = File::open(path).map_err(|e| hash_error(path, &e))?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buffer).map_err(|e| hash_error(path, &e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// [`ContentHasher`] backed by SHA-256.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn compute_hash(&self, path: &Path) -> Result<String, HashError> {
        compute_sha256(path)
    }
}
