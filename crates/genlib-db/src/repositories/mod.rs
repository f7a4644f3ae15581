//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_hash_record_store;
mod sqlite_installation_repository;
mod sqlite_manifest_pool;
mod sqlite_profile_repository;
mod sqlite_settings_repository;

pub use sqlite_hash_record_store::SqliteHashRecordStore;
pub use sqlite_installation_repository::SqliteInstallationRepository;
pub use sqlite_manifest_pool::SqliteManifestPool;
pub use sqlite_profile_repository::SqliteProfileRepository;
pub use sqlite_settings_repository::SqliteSettingsRepository;
