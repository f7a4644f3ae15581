//! `SQLite` implementation of the `ManifestPool` trait.

use std::path::Path;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use genlib_core::{ContentManifest, ManifestAddResult, ManifestId, ManifestPool, RepositoryError};

use super::row_mappers::{now_timestamp, path_to_column, row_to_manifest, storage_error};

/// `SQLite` implementation of the `ManifestPool` trait.
///
/// Manifests are stored as JSON next to a few indexed columns. Re-adding
/// an id replaces the body but keeps the original insertion position.
pub struct SqliteManifestPool {
    pool: SqlitePool,
}

impl SqliteManifestPool {
    /// Create a new `SQLite` manifest pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Content directory a manifest was registered with.
    pub async fn base_path(&self, id: &ManifestId) -> Result<Option<String>, RepositoryError> {
        sqlx::query_scalar("SELECT base_path FROM manifests WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)
    }
}

#[async_trait]
impl ManifestPool for SqliteManifestPool {
    async fn add_manifest(
        &self,
        manifest: &ContentManifest,
        base_path: &Path,
    ) -> Result<ManifestAddResult, RepositoryError> {
        if manifest.id.is_empty() {
            return Ok(ManifestAddResult::rejected("Manifest id cannot be empty"));
        }
        if manifest.name.trim().is_empty() {
            return Ok(ManifestAddResult::rejected(format!(
                "Manifest {} has no name",
                manifest.id
            )));
        }

        let body = serde_json::to_string(manifest)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let now = now_timestamp();

        sqlx::query(
            r#"INSERT INTO manifests (id, content_type, target_game, body, base_path, added_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                content_type = excluded.content_type,
                target_game = excluded.target_game,
                body = excluded.body,
                base_path = excluded.base_path,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(manifest.id.as_str())
        .bind(manifest.content_type.slug())
        .bind(manifest.target_game.slug())
        .bind(&body)
        .bind(path_to_column(base_path))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        debug!(id = %manifest.id, "Stored manifest");
        Ok(ManifestAddResult::accepted(manifest.id.clone()))
    }

    async fn get_manifest(&self, id: &ManifestId) -> Result<Option<ContentManifest>, RepositoryError> {
        let row = sqlx::query("SELECT body FROM manifests WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(row_to_manifest).transpose()
    }

    async fn get_all_manifests(&self) -> Result<Vec<ContentManifest>, RepositoryError> {
        let rows = sqlx::query("SELECT body FROM manifests ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(row_to_manifest).collect()
    }

    async fn remove_manifest(&self, id: &ManifestId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM manifests WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}
