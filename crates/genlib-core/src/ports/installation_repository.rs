//! Installation repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::GameInstallation;

/// Repository for registered game installations.
#[async_trait]
pub trait InstallationRepository: Send + Sync {
    /// List all installations in registration order.
    async fn list(&self) -> Result<Vec<GameInstallation>, RepositoryError>;

    /// Get an installation by id.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it doesn't exist.
    async fn get(&self, id: &str) -> Result<GameInstallation, RepositoryError>;

    /// Insert or replace an installation.
    async fn upsert(&self, installation: &GameInstallation) -> Result<(), RepositoryError>;

    /// Delete an installation by id.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it doesn't exist.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}
