//! Filesystem adapters for genlib.
//!
//! Implements the synchronous ports from `genlib-core`:
//!
//! - [`Sha256Hasher`]: streamed SHA-256 fingerprints
//! - [`PeVersionReader`]: file version from a PE `VS_FIXEDFILEINFO` block
//! - [`GeneralsOnlineIdentifier`] and [`SuperHackersIdentifier`]:
//!   community client recognition
//!
//! Everything here blocks; callers run it on blocking threads.

#![deny(unused_crate_dependencies)]

mod error;
mod hasher;
mod pe_version;
mod publishers;

pub use error::PeError;
pub use hasher::{Sha256Hasher, compute_sha256};
pub use pe_version::{PeVersionReader, parse_fixed_file_version};
pub use publishers::{GeneralsOnlineIdentifier, SuperHackersIdentifier, default_identifiers};

// Re-export the ports these adapters implement
pub use genlib_core::{ContentHasher, FileVersionReader, HashError, PublisherIdentifier};

// Only used by integration tests
#[cfg(test)]
use tokio as _;
