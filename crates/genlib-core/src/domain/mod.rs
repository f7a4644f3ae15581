//! Domain types for game detection and content resolution.
//!
//! These types are pure data: no filesystem access, no persistence.

mod client;
mod game;
mod hash;
mod manifest;
mod resolution;

pub use client::{ClientSource, GameClient};
pub use game::{GameInstallation, GameType, InstallChannel, UNKNOWN_VERSION};
pub use hash::{HashRecord, OFFICIAL_PUBLISHER, normalize_hash};
pub use manifest::{
    ANY_DEPENDENCY_ID, ContentDependency, ContentManifest, ContentType, ManifestId,
    semantic_match,
};
pub use resolution::{
    ContentFilter, DependencyViolation, DisableOutcome, EnableOutcome, ResolutionAction,
    ResolutionNote, ViolationKind,
};
