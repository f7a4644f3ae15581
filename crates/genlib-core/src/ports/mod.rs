//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Filesystem-touching ports (hasher, version reader, publisher
//!   identifiers) are synchronous; the detector runs them on blocking threads
//! - Persistence ports are async and CRUD-focused

pub mod content_hasher;
pub mod file_version;
pub mod hash_store;
pub mod installation_repository;
pub mod manifest_pool;
pub mod profile_repository;
pub mod publisher_identifier;
pub mod settings_repository;

use std::sync::Arc;
use thiserror::Error;

pub use content_hasher::{ContentHasher, HashError};
pub use file_version::{FileVersionReader, NoopFileVersionReader};
pub use hash_store::HashRecordStore;
pub use installation_repository::InstallationRepository;
pub use manifest_pool::{InMemoryManifestPool, ManifestAddResult, ManifestPool};
pub use profile_repository::ProfileRepository;
pub use publisher_identifier::{PublisherIdentification, PublisherIdentifier};
pub use settings_repository::SettingsRepository;

#[cfg(test)]
pub use content_hasher::MockContentHasher;

/// Container for all repository trait objects.
///
/// Provides a consistent way to wire repositories across adapters without
/// coupling them to concrete implementations.
#[derive(Clone)]
pub struct Repos {
    /// Content manifest catalogue.
    pub manifests: Arc<dyn ManifestPool>,
    /// User-added fingerprint records.
    pub hashes: Arc<dyn HashRecordStore>,
    /// Registered game installations.
    pub installations: Arc<dyn InstallationRepository>,
    /// Enabled content per profile.
    pub profiles: Arc<dyn ProfileRepository>,
    /// Application settings.
    pub settings: Arc<dyn SettingsRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        manifests: Arc<dyn ManifestPool>,
        hashes: Arc<dyn HashRecordStore>,
        installations: Arc<dyn InstallationRepository>,
        profiles: Arc<dyn ProfileRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            manifests,
            hashes,
            installations,
            profiles,
            settings,
        }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key, unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters should map this to their own error types (CLI exit codes,
/// serialized API errors).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Detection could not run.
    #[error(transparent)]
    Detection(#[from] crate::services::DetectionError),

    /// Resolver contract violation.
    #[error(transparent)]
    Resolver(#[from] crate::services::ResolverError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Path resolution error.
    #[error(transparent)]
    Path(#[from] crate::paths::PathError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
