//! `SQLite` persistence for genlib.
//!
//! Implements the persistence ports of `genlib-core` (manifest pool,
//! fingerprint store, installations, profiles, settings) on top of `sqlx`.
//! Entry points call [`setup_database`] and hand the pool to
//! [`CoreFactory::build_repos`].

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{
    SqliteHashRecordStore, SqliteInstallationRepository, SqliteManifestPool,
    SqliteProfileRepository, SqliteSettingsRepository,
};

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
