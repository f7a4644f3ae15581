//! Composition utilities for wiring `SQLite` repositories.
//!
//! Construction only; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use genlib_core::Repos;

use crate::repositories::{
    SqliteHashRecordStore, SqliteInstallationRepository, SqliteManifestPool,
    SqliteProfileRepository, SqliteSettingsRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// This is the recommended way for adapters to obtain repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqliteManifestPool::new(pool.clone())),
            Arc::new(SqliteHashRecordStore::new(pool.clone())),
            Arc::new(SqliteInstallationRepository::new(pool.clone())),
            Arc::new(SqliteProfileRepository::new(pool.clone())),
            Arc::new(SqliteSettingsRepository::new(pool)),
        )
    }

    /// Create a manifest pool from a database pool.
    pub fn manifest_pool(pool: SqlitePool) -> Arc<SqliteManifestPool> {
        Arc::new(SqliteManifestPool::new(pool))
    }
}

/// Test database helper for integration tests.
///
/// Wraps an in-memory database with the production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All repositories backed by this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }
}
