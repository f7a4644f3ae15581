//! Content enablement and dependency resolution.
//!
//! A [`ContentSession`] owns the set of enabled manifests for one profile,
//! the discovery list of everything else that matches the active filter,
//! and the rules that keep the enabled set consistent: single-instance
//! types, automatic dependency resolution and validation.
//!
//! Missing dependencies and conflicts are not errors. They are reported as
//! [`DependencyViolation`]s; only unknown ids and storage failures surface
//! as [`ResolverError`].

use std::borrow::Cow;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{
    ContentDependency, ContentFilter, ContentManifest, ContentType, DependencyViolation,
    DisableOutcome, EnableOutcome, GameType, ManifestId, ResolutionAction, ResolutionNote,
    ViolationKind,
};
use crate::ports::{ManifestPool, RepositoryError};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Manifest not found: {0}")]
    ManifestNotFound(ManifestId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Dependencies the resolver works with for `manifest`.
///
/// Client manifests that declare nothing still need an installation of
/// their game.
pub fn effective_dependencies(manifest: &ContentManifest) -> Cow<'_, [ContentDependency]> {
    if manifest.dependencies.is_empty()
        && manifest.content_type == ContentType::Client
        && manifest.target_game != GameType::Unknown
    {
        return Cow::Owned(vec![ContentDependency::installation(vec![
            manifest.target_game,
        ])]);
    }
    Cow::Borrowed(&manifest.dependencies)
}

/// Enabled content for one profile.
pub struct ContentSession {
    pool: Arc<dyn ManifestPool>,
    /// In enable order.
    enabled: Vec<ContentManifest>,
    discovery: Vec<ContentManifest>,
    filter: ContentFilter,
}

impl ContentSession {
    /// Empty session. Call [`Self::refresh_discovery`] to populate the
    /// discovery list.
    pub fn new(pool: Arc<dyn ManifestPool>) -> Self {
        Self {
            pool,
            enabled: Vec::new(),
            discovery: Vec::new(),
            filter: ContentFilter::default(),
        }
    }

    pub fn enabled(&self) -> &[ContentManifest] {
        &self.enabled
    }

    /// Enabled ids in enable order, for persisting the profile.
    pub fn enabled_ids(&self) -> Vec<ManifestId> {
        self.enabled.iter().map(|m| m.id.clone()).collect()
    }

    pub fn discovery(&self) -> &[ContentManifest] {
        &self.discovery
    }

    pub fn filter(&self) -> &ContentFilter {
        &self.filter
    }

    pub fn is_enabled(&self, id: &ManifestId) -> bool {
        self.enabled.iter().any(|m| m.id == *id)
    }

    /// Replace the active filter and rebuild the discovery list.
    pub async fn set_filter(&mut self, filter: ContentFilter) -> Result<(), ResolverError> {
        self.filter = filter;
        self.refresh_discovery().await
    }

    /// Rebuild the discovery list from the pool.
    pub async fn refresh_discovery(&mut self) -> Result<(), ResolverError> {
        let all = self.pool.get_all_manifests().await?;
        self.discovery = all
            .into_iter()
            .filter(|m| !self.is_enabled(&m.id) && self.filter.matches(m))
            .collect();
        Ok(())
    }

    /// Restore a persisted enabled set without resolving dependencies.
    ///
    /// Ids no longer in the pool are skipped and returned. Single-instance
    /// types keep the last listed item.
    pub async fn load_enabled(&mut self, ids: &[ManifestId]) -> Result<Vec<ManifestId>, ResolverError> {
        self.enabled.clear();
        let mut missing = Vec::new();

        for id in ids {
            match self.pool.get_manifest(id).await? {
                Some(manifest) => {
                    if manifest.content_type.is_single_instance() {
                        self.enabled.retain(|m| m.content_type != manifest.content_type);
                    }
                    self.enabled.retain(|m| m.id != manifest.id);
                    self.enabled.push(manifest);
                }
                None => {
                    warn!(id = %id, "Enabled manifest no longer in pool");
                    missing.push(id.clone());
                }
            }
        }

        self.refresh_discovery().await?;
        Ok(missing)
    }

    /// Enable a manifest and everything it needs.
    pub async fn enable(&mut self, id: &ManifestId) -> Result<EnableOutcome, ResolverError> {
        let manifest = self
            .pool
            .get_manifest(id)
            .await?
            .ok_or_else(|| ResolverError::ManifestNotFound(id.clone()))?;

        let mut outcome = EnableOutcome::default();
        if self.is_enabled(id) {
            warn!(id = %id, "Content already enabled");
            outcome
                .notes
                .push(ResolutionNote::AlreadyEnabled { id: id.clone() });
            outcome.violations = self.validate();
            return Ok(outcome);
        }

        let catalogue = self.pool.get_all_manifests().await?;
        let mut queue: VecDeque<(ContentManifest, Option<ManifestId>)> =
            VecDeque::from([(manifest, None)]);
        let mut visited: HashSet<ManifestId> = HashSet::new();

        while let Some((item, required_by)) = queue.pop_front() {
            if !visited.insert(item.id.clone()) || self.is_enabled(&item.id) {
                continue;
            }
            self.activate(item.clone(), required_by, &mut outcome);

            for candidate in self.resolve_dependencies(&item, &catalogue, &visited, &mut outcome) {
                debug!(manifest = %item.id, candidate = %candidate.id, "Queued dependency");
                queue.push_back((candidate.clone(), Some(item.id.clone())));
            }
        }

        outcome.violations = self.validate();
        info!(
            id = %id,
            enabled = outcome.enabled_ids().len(),
            violations = outcome.violations.len(),
            "Enabled content"
        );
        Ok(outcome)
    }

    /// Disable a manifest. Dependents are left enabled and show up as
    /// violations.
    pub async fn disable(&mut self, id: &ManifestId) -> Result<DisableOutcome, ResolverError> {
        let Some(position) = self.enabled.iter().position(|m| m.id == *id) else {
            if self.pool.get_manifest(id).await?.is_none() {
                return Err(ResolverError::ManifestNotFound(id.clone()));
            }
            warn!(id = %id, "Content is not enabled");
            return Ok(DisableOutcome {
                violations: self.validate(),
                ..DisableOutcome::default()
            });
        };

        let manifest = self.enabled.remove(position);
        let returned_to_discovery = self.return_to_discovery(manifest);
        info!(id = %id, returned_to_discovery, "Disabled content");

        Ok(DisableOutcome {
            was_enabled: true,
            returned_to_discovery,
            violations: self.validate(),
        })
    }

    /// Check the enabled set. Read-only.
    pub fn validate(&self) -> Vec<DependencyViolation> {
        let mut violations = Vec::new();

        for manifest in &self.enabled {
            for dependency in effective_dependencies(manifest).iter() {
                if dependency.is_optional {
                    continue;
                }
                let satisfied = if dependency.dependency_type.is_single_instance() {
                    self.enabled
                        .iter()
                        .any(|m| m.content_type == dependency.dependency_type)
                } else {
                    self.has_content_for(dependency)
                };
                if !satisfied {
                    violations.push(DependencyViolation {
                        manifest_id: manifest.id.clone(),
                        kind: ViolationKind::MissingDependency {
                            dependency_id: dependency.id.clone(),
                            dependency_name: dependency.name.clone(),
                            dependency_type: dependency.dependency_type,
                        },
                        message: format!(
                            "{} requires {} ({})",
                            manifest.name, dependency.name, dependency.dependency_type
                        ),
                    });
                }
            }
        }

        let mut seen_pairs: HashSet<(ManifestId, ManifestId)> = HashSet::new();
        for manifest in &self.enabled {
            let conflicts = manifest
                .dependencies
                .iter()
                .flat_map(|dependency| dependency.conflicts_with.iter());
            for other_id in conflicts {
                if *other_id == manifest.id || !self.is_enabled(other_id) {
                    continue;
                }
                let pair = if manifest.id <= *other_id {
                    (manifest.id.clone(), other_id.clone())
                } else {
                    (other_id.clone(), manifest.id.clone())
                };
                if seen_pairs.insert(pair) {
                    violations.push(DependencyViolation {
                        manifest_id: manifest.id.clone(),
                        kind: ViolationKind::Conflict {
                            other_id: other_id.clone(),
                        },
                        message: format!("{} conflicts with {other_id}", manifest.name),
                    });
                }
            }
        }

        violations
    }

    /// Insert `item`, displacing other items of a single-instance type.
    fn activate(
        &mut self,
        item: ContentManifest,
        required_by: Option<ManifestId>,
        outcome: &mut EnableOutcome,
    ) {
        if item.content_type.is_single_instance() {
            let (displaced, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.enabled)
                .into_iter()
                .partition(|m| m.content_type == item.content_type);
            self.enabled = kept;
            for old in displaced {
                info!(replaced = %old.id, by = %item.id, "Replacing {}", item.content_type);
                outcome.actions.push(ResolutionAction::Replaced {
                    id: old.id.clone(),
                    replaced_by: item.id.clone(),
                });
                self.return_to_discovery(old);
            }
        }

        self.discovery.retain(|m| m.id != item.id);
        outcome.actions.push(ResolutionAction::Enabled {
            id: item.id.clone(),
            required_by,
        });
        self.enabled.push(item);
    }

    fn return_to_discovery(&mut self, manifest: ContentManifest) -> bool {
        if !self.filter.matches(&manifest) || self.discovery.iter().any(|m| m.id == manifest.id) {
            return false;
        }
        self.discovery.push(manifest);
        true
    }

    /// Candidates for the unmet, non-optional dependencies of `item`.
    ///
    /// Candidates already handled in this pass are not returned again; they
    /// are noted as cycles and left to [`Self::validate`].
    fn resolve_dependencies<'a>(
        &self,
        item: &ContentManifest,
        catalogue: &'a [ContentManifest],
        visited: &HashSet<ManifestId>,
        outcome: &mut EnableOutcome,
    ) -> Vec<&'a ContentManifest> {
        let mut candidates = Vec::new();

        for dependency in effective_dependencies(item).iter() {
            if dependency.is_optional {
                continue;
            }
            let candidate = if dependency.dependency_type == ContentType::Installation {
                if self.has_installation_for(dependency) {
                    continue;
                }
                find_installation(item, dependency, catalogue)
            } else {
                if self.has_content_for(dependency) {
                    continue;
                }
                find_content(dependency, catalogue)
            };

            match candidate {
                Some(candidate) if visited.contains(&candidate.id) => {
                    debug!(
                        manifest = %item.id,
                        candidate = %candidate.id,
                        "Candidate already handled in this pass"
                    );
                    outcome.notes.push(ResolutionNote::CycleDetected {
                        manifest_id: item.id.clone(),
                        candidate_id: candidate.id.clone(),
                    });
                }
                Some(candidate) => candidates.push(candidate),
                None => {
                    debug!(manifest = %item.id, dependency = %dependency.name, "No candidate for dependency");
                    outcome.notes.push(ResolutionNote::Unresolvable {
                        manifest_id: item.id.clone(),
                        dependency_name: dependency.name.clone(),
                    });
                }
            }
        }

        candidates
    }

    fn has_installation_for(&self, dependency: &ContentDependency) -> bool {
        self.enabled
            .iter()
            .any(|m| satisfies_installation(dependency, m))
    }

    fn has_content_for(&self, dependency: &ContentDependency) -> bool {
        self.enabled
            .iter()
            .any(|m| satisfies_content(dependency, m))
    }
}

fn satisfies_installation(dependency: &ContentDependency, manifest: &ContentManifest) -> bool {
    if manifest.content_type != ContentType::Installation {
        return false;
    }
    if dependency.matches_id(&manifest.id) {
        return true;
    }
    if dependency.compatible_game_types.is_empty() {
        dependency.id.is_any()
    } else {
        dependency.compatible_game_types.contains(&manifest.target_game)
    }
}

fn satisfies_content(dependency: &ContentDependency, manifest: &ContentManifest) -> bool {
    if dependency.id.is_any() {
        manifest.content_type == dependency.dependency_type
            && dependency.accepts_game(manifest.target_game)
    } else {
        dependency.matches_id(&manifest.id)
    }
}

/// Installation candidate: the item's source installation, the exact id,
/// a match on the item's install channel, then any match.
fn find_installation<'a>(
    item: &ContentManifest,
    dependency: &ContentDependency,
    catalogue: &'a [ContentManifest],
) -> Option<&'a ContentManifest> {
    let installations = || {
        catalogue
            .iter()
            .filter(|m| m.content_type == ContentType::Installation && m.id != item.id)
    };

    item.source_installation
        .as_ref()
        .and_then(|source| {
            installations().find(|m| m.id == *source && satisfies_installation(dependency, m))
        })
        .or_else(|| installations().find(|m| m.id == dependency.id))
        .or_else(|| {
            item.install_channel.and_then(|channel| {
                installations().find(|m| {
                    m.install_channel == Some(channel) && satisfies_installation(dependency, m)
                })
            })
        })
        .or_else(|| installations().find(|m| satisfies_installation(dependency, m)))
}

/// Content candidate: exact id, then a semantic match, then for `any` the
/// first item of the right type and game.
fn find_content<'a>(
    dependency: &ContentDependency,
    catalogue: &'a [ContentManifest],
) -> Option<&'a ContentManifest> {
    if dependency.id.is_any() {
        return catalogue.iter().find(|m| satisfies_content(dependency, m));
    }
    catalogue
        .iter()
        .find(|m| m.id == dependency.id)
        .or_else(|| {
            catalogue.iter().find(|m| {
                m.content_type == dependency.dependency_type && dependency.matches_id(&m.id)
            })
        })
}
