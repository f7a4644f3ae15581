//! `SQLite` implementation of the `HashRecordStore` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use genlib_core::domain::normalize_hash;
use genlib_core::{HashRecord, HashRecordStore, RepositoryError};

use super::row_mappers::{insert_error, now_timestamp, row_to_hash_record, storage_error};

/// `SQLite` store for fingerprints added at runtime.
pub struct SqliteHashRecordStore {
    pool: SqlitePool,
}

impl SqliteHashRecordStore {
    /// Create a new `SQLite` hash record store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HashRecordStore for SqliteHashRecordStore {
    async fn list(&self) -> Result<Vec<HashRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT hash, game_type, version, publisher, trusted FROM known_hashes ORDER BY added_at, hash",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(row_to_hash_record).collect()
    }

    async fn insert(&self, record: &HashRecord) -> Result<(), RepositoryError> {
        let hash = normalize_hash(&record.hash);
        if hash.is_empty() {
            return Err(RepositoryError::Constraint(
                "Hash cannot be empty".to_string(),
            ));
        }

        sqlx::query(
            "INSERT INTO known_hashes (hash, game_type, version, publisher, trusted, added_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&hash)
        .bind(record.game_type.slug())
        .bind(&record.version)
        .bind(&record.publisher)
        .bind(i64::from(record.trusted))
        .bind(now_timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, format!("Hash {hash}")))?;

        Ok(())
    }
}
