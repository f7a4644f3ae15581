//! Profile repository trait definition.
//!
//! A profile is the persisted form of a content session's enabled set.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::ManifestId;

/// Repository for the enabled content of named profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Enabled manifest ids of a profile, in enable order.
    ///
    /// Returns an empty list for unknown profiles.
    async fn load_enabled(&self, profile: &str) -> Result<Vec<ManifestId>, RepositoryError>;

    /// Replace the enabled set of a profile.
    async fn save_enabled(&self, profile: &str, enabled: &[ManifestId])
    -> Result<(), RepositoryError>;
}
