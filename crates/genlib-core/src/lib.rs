//! Core domain types, ports and services for genlib.
//!
//! genlib finds Command & Conquer: Generals and Zero Hour clients on disk,
//! identifies them by fingerprint, registers them as content manifests
//! and manages which content is enabled together.
//!
//! This crate is storage- and filesystem-agnostic: hashing, PE metadata,
//! publisher detection and persistence are ports implemented by
//! `genlib-fs` and `genlib-db`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    ANY_DEPENDENCY_ID, ClientSource, ContentDependency, ContentFilter, ContentManifest,
    ContentType, DependencyViolation, DisableOutcome, EnableOutcome, GameClient,
    GameInstallation, GameType, HashRecord, InstallChannel, ManifestId, OFFICIAL_PUBLISHER,
    ResolutionAction, ResolutionNote, UNKNOWN_VERSION, ViolationKind, semantic_match,
};
pub use ports::{
    ContentHasher, CoreError, FileVersionReader, HashError, HashRecordStore, InMemoryManifestPool,
    InstallationRepository, ManifestAddResult, ManifestPool, NoopFileVersionReader,
    ProfileRepository, PublisherIdentification, PublisherIdentifier, Repos, RepositoryError,
    SettingsRepository,
};
pub use services::{
    ClientDetector, ClientRegistrar, ContentSession, DetectionError, DetectionOutcome,
    HashRegistry, InstallationScan, ResolverError, ScanOptions, ScanState, bundled_records,
};
pub use settings::{
    DEFAULT_PROFILE, Settings, SettingsError, SettingsUpdate, validate_settings,
};

// Re-export path utilities
pub use paths::{DATA_DIR_ENV, PathError, data_root, database_path, normalize_user_path};
