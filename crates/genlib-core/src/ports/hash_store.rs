//! Hash record store trait definition.
//!
//! Persists fingerprints added at runtime so they survive restarts.
//! The registry itself stays in memory; this store only seeds it.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::HashRecord;

/// Repository for user-added fingerprint records.
///
/// # Design Rules
///
/// - Append-only: records are never updated or removed
/// - `insert` of an existing hash returns `Err(RepositoryError::AlreadyExists)`
#[async_trait]
pub trait HashRecordStore: Send + Sync {
    /// All stored records.
    async fn list(&self) -> Result<Vec<HashRecord>, RepositoryError>;

    /// Persist a new record.
    async fn insert(&self, record: &HashRecord) -> Result<(), RepositoryError>;
}
