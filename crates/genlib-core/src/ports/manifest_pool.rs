//! Manifest pool port definition.
//!
//! The pool is the persisted catalogue of content manifests. Its storage
//! format belongs entirely to the implementation.

use std::path::Path;

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{ContentManifest, ManifestId};

/// Result of adding a manifest to the pool.
///
/// Rejection is reported through `success`/`errors` rather than an `Err`,
/// so callers can keep working with a fallback id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestAddResult {
    pub success: bool,
    /// Id the pool stored the manifest under.
    pub assigned_id: Option<ManifestId>,
    pub errors: Vec<String>,
}

impl ManifestAddResult {
    pub fn accepted(id: ManifestId) -> Self {
        Self {
            success: true,
            assigned_id: Some(id),
            errors: Vec::new(),
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            assigned_id: None,
            errors: vec![error.into()],
        }
    }
}

/// Catalogue of content manifests.
///
/// # Design Rules
///
/// - No storage types in signatures
/// - `add_manifest` replaces an existing manifest with the same id
/// - Lookups of unknown ids return `Ok(None)`, not an error
#[async_trait]
pub trait ManifestPool: Send + Sync {
    /// Store a manifest whose content lives under `base_path`.
    async fn add_manifest(
        &self,
        manifest: &ContentManifest,
        base_path: &Path,
    ) -> Result<ManifestAddResult, RepositoryError>;

    /// Fetch a manifest by id.
    async fn get_manifest(&self, id: &ManifestId) -> Result<Option<ContentManifest>, RepositoryError>;

    /// Every manifest in the pool.
    async fn get_all_manifests(&self) -> Result<Vec<ContentManifest>, RepositoryError>;

    /// Remove a manifest. Returns whether it existed.
    async fn remove_manifest(&self, id: &ManifestId) -> Result<bool, RepositoryError>;
}

/// Manifest pool kept entirely in memory.
///
/// Preserves insertion order, which keeps resolver candidate searches
/// deterministic. Used by tests and by callers that never persist.
#[derive(Debug, Default)]
pub struct InMemoryManifestPool {
    manifests: tokio::sync::RwLock<Vec<ContentManifest>>,
}

impl InMemoryManifestPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool pre-filled with `manifests`.
    pub fn with_manifests(manifests: impl IntoIterator<Item = ContentManifest>) -> Self {
        Self {
            manifests: tokio::sync::RwLock::new(manifests.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ManifestPool for InMemoryManifestPool {
    async fn add_manifest(
        &self,
        manifest: &ContentManifest,
        _base_path: &Path,
    ) -> Result<ManifestAddResult, RepositoryError> {
        if manifest.id.is_empty() {
            return Ok(ManifestAddResult::rejected("Manifest id cannot be empty"));
        }

        let mut manifests = self.manifests.write().await;
        match manifests.iter_mut().find(|m| m.id == manifest.id) {
            Some(existing) => *existing = manifest.clone(),
            None => manifests.push(manifest.clone()),
        }
        Ok(ManifestAddResult::accepted(manifest.id.clone()))
    }

    async fn get_manifest(&self, id: &ManifestId) -> Result<Option<ContentManifest>, RepositoryError> {
        Ok(self
            .manifests
            .read()
            .await
            .iter()
            .find(|m| m.id == *id)
            .cloned())
    }

    async fn get_all_manifests(&self) -> Result<Vec<ContentManifest>, RepositoryError> {
        Ok(self.manifests.read().await.clone())
    }

    async fn remove_manifest(&self, id: &ManifestId) -> Result<bool, RepositoryError> {
        let mut manifests = self.manifests.write().await;
        let before = manifests.len();
        manifests.retain(|m| m.id != *id);
        Ok(manifests.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentType, GameType};

    #[tokio::test]
    async fn test_add_replaces_same_id() {
        let pool = InMemoryManifestPool::new();
        let mut manifest = ContentManifest::new(
            "1.0.test.mod.shockwave",
            "Shockwave",
            ContentType::Mod,
            GameType::ZeroHour,
        );
        pool.add_manifest(&manifest, Path::new("/mods")).await.unwrap();
        manifest.version = "1.2".to_string();
        let result = pool.add_manifest(&manifest, Path::new("/mods")).await.unwrap();

        assert!(result.success);
        assert_eq!(pool.get_all_manifests().await.unwrap().len(), 1);
        assert_eq!(
            pool.get_manifest(&manifest.id).await.unwrap().unwrap().version,
            "1.2"
        );
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let pool = InMemoryManifestPool::new();
        let manifest = ContentManifest::new("", "Nameless", ContentType::Map, GameType::Generals);
        let result = pool.add_manifest(&manifest, Path::new("/maps")).await.unwrap();

        assert!(!result.success);
        assert!(result.assigned_id.is_none());
        assert!(!pool.remove_manifest(&manifest.id).await.unwrap());
    }
}
