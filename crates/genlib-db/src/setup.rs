//! Database setup and initialization.
//!
//! Entry points call [`setup_database`] with the resolved database path
//! (see `genlib_core::database_path`).

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// Creates the parent directory and the database file when missing, then
/// creates all tables and indexes.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or created, or
/// if schema creation fails.
///
/// # Example
///
/// ```rust,no_run
/// use genlib_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("/path/to/genlib.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Every connection to `sqlite::memory:` opens its own database, so the
/// pool is pinned to a single connection that never expires.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all statements use IF NOT EXISTS.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Manifest pool. `seq` keeps insertion order stable across upserts.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS manifests (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            content_type TEXT NOT NULL,
            target_game TEXT NOT NULL,
            body TEXT NOT NULL,
            base_path TEXT NOT NULL,
            added_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_manifests_content_type ON manifests(content_type)")
        .execute(pool)
        .await?;

    // User-added fingerprints
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS known_hashes (
            hash TEXT PRIMARY KEY NOT NULL,
            game_type TEXT NOT NULL,
            version TEXT NOT NULL,
            publisher TEXT NOT NULL,
            trusted INTEGER NOT NULL DEFAULT 0,
            added_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS installations (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            channel TEXT NOT NULL,
            generals_path TEXT,
            zero_hour_path TEXT,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Enabled content per profile, in enable order
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profile_enabled (
            profile TEXT NOT NULL,
            position INTEGER NOT NULL,
            manifest_id TEXT NOT NULL,
            PRIMARY KEY (profile, position)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings_kv (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
