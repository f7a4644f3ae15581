//! `SQLite` implementation of the `ProfileRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use genlib_core::{ManifestId, ProfileRepository, RepositoryError};

use super::row_mappers::storage_error;

/// Enabled sets of named profiles, one row per enabled manifest.
pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    /// Create a new `SQLite` profile repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn load_enabled(&self, profile: &str) -> Result<Vec<ManifestId>, RepositoryError> {
        let ids: Vec<String> = sqlx::query_scalar(
            "SELECT manifest_id FROM profile_enabled WHERE profile = ? ORDER BY position",
        )
        .bind(profile)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(ids.into_iter().map(ManifestId::new).collect())
    }

    async fn save_enabled(
        &self,
        profile: &str,
        enabled: &[ManifestId],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        sqlx::query("DELETE FROM profile_enabled WHERE profile = ?")
            .bind(profile)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        for (position, id) in enabled.iter().enumerate() {
            sqlx::query(
                "INSERT INTO profile_enabled (profile, position, manifest_id) VALUES (?, ?, ?)",
            )
            .bind(profile)
            .bind(i64::try_from(position).map_err(storage_error)?)
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        }

        tx.commit().await.map_err(storage_error)?;
        Ok(())
    }
}
