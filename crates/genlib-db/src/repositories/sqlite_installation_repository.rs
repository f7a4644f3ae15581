//! `SQLite` implementation of the `InstallationRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use genlib_core::{GameInstallation, InstallationRepository, RepositoryError};

use super::row_mappers::{now_timestamp, path_to_column, row_to_installation, storage_error};

const INSTALLATION_SELECT_COLUMNS: &str = "id, channel, generals_path, zero_hour_path";

/// `SQLite` implementation of the `InstallationRepository` trait.
pub struct SqliteInstallationRepository {
    pool: SqlitePool,
}

impl SqliteInstallationRepository {
    /// Create a new `SQLite` installation repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstallationRepository for SqliteInstallationRepository {
    async fn list(&self) -> Result<Vec<GameInstallation>, RepositoryError> {
        let query = format!("SELECT {INSTALLATION_SELECT_COLUMNS} FROM installations ORDER BY seq");

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(row_to_installation).collect()
    }

    async fn get(&self, id: &str) -> Result<GameInstallation, RepositoryError> {
        let query = format!("SELECT {INSTALLATION_SELECT_COLUMNS} FROM installations WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Installation '{id}'")))?;

        row_to_installation(&row)
    }

    async fn upsert(&self, installation: &GameInstallation) -> Result<(), RepositoryError> {
        if installation.id.trim().is_empty() {
            return Err(RepositoryError::Constraint(
                "Installation id cannot be empty".to_string(),
            ));
        }

        sqlx::query(
            r#"INSERT INTO installations (id, channel, generals_path, zero_hour_path, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                channel = excluded.channel,
                generals_path = excluded.generals_path,
                zero_hour_path = excluded.zero_hour_path,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&installation.id)
        .bind(installation.channel.slug())
        .bind(installation.generals_path.as_deref().map(path_to_column))
        .bind(installation.zero_hour_path.as_deref().map(path_to_column))
        .bind(now_timestamp())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM installations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Installation '{id}'")));
        }
        Ok(())
    }
}
