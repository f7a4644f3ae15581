//! Row mapping helpers for `SQLite` queries.

use std::path::{Path, PathBuf};

use genlib_core::{
    ContentManifest, GameInstallation, GameType, HashRecord, InstallChannel, RepositoryError,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Timestamp format shared by every `*_at` column.
pub fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn storage_error(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// Map an insert failure, turning unique-key violations into `AlreadyExists`.
pub fn insert_error(e: sqlx::Error, what: impl Into<String>) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::AlreadyExists(what.into())
        }
        _ => storage_error(e),
    }
}

pub fn path_to_column(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn parse_game_type(raw: &str) -> Result<GameType, RepositoryError> {
    raw.parse().map_err(RepositoryError::Serialization)
}

/// Parse a `manifests` row. The JSON body is authoritative.
pub fn row_to_manifest(row: &SqliteRow) -> Result<ContentManifest, RepositoryError> {
    let body: String = row.try_get("body").map_err(storage_error)?;
    serde_json::from_str(&body).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

pub fn row_to_hash_record(row: &SqliteRow) -> Result<HashRecord, RepositoryError> {
    let game_type: String = row.try_get("game_type").map_err(storage_error)?;
    let trusted: i64 = row.try_get("trusted").map_err(storage_error)?;

    Ok(HashRecord {
        hash: row.try_get("hash").map_err(storage_error)?,
        game_type: parse_game_type(&game_type)?,
        version: row.try_get("version").map_err(storage_error)?,
        publisher: row.try_get("publisher").map_err(storage_error)?,
        trusted: trusted != 0,
    })
}

pub fn row_to_installation(row: &SqliteRow) -> Result<GameInstallation, RepositoryError> {
    let channel: String = row.try_get("channel").map_err(storage_error)?;
    let generals_path: Option<String> = row.try_get("generals_path").map_err(storage_error)?;
    let zero_hour_path: Option<String> = row.try_get("zero_hour_path").map_err(storage_error)?;

    Ok(GameInstallation {
        id: row.try_get("id").map_err(storage_error)?,
        channel: channel
            .parse::<InstallChannel>()
            .map_err(RepositoryError::Serialization)?,
        generals_path: generals_path.map(PathBuf::from),
        zero_hour_path: zero_hour_path.map(PathBuf::from),
    })
}
