//! Resolution result types.
//!
//! Dependency problems are business conditions, not errors: they are
//! collected into these structures and handed back to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::game::GameType;
use super::manifest::{ContentManifest, ContentType, ManifestId};

/// Why a manifest's requirements are not met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A non-optional dependency has no enabled counterpart.
    MissingDependency {
        dependency_id: ManifestId,
        dependency_name: String,
        dependency_type: ContentType,
    },
    /// Two enabled manifests conflict with each other.
    Conflict { other_id: ManifestId },
}

/// A single unmet requirement reported by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyViolation {
    /// Manifest whose requirement is violated.
    pub manifest_id: ManifestId,
    pub kind: ViolationKind,
    /// User-facing description.
    pub message: String,
}

impl fmt::Display for DependencyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Something the resolver did on the caller's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ResolutionAction {
    /// Item was enabled (the requested item or a resolved dependency).
    Enabled {
        id: ManifestId,
        /// Manifest whose dependency pulled this item in, if any.
        required_by: Option<ManifestId>,
    },
    /// Item was disabled to make room for another of a single-instance type.
    Replaced {
        id: ManifestId,
        replaced_by: ManifestId,
    },
}

/// Non-fatal observations made during a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "note", rename_all = "snake_case")]
pub enum ResolutionNote {
    /// Enable was requested for an item that is already enabled.
    AlreadyEnabled { id: ManifestId },
    /// No candidate in the pool satisfies a dependency.
    Unresolvable {
        manifest_id: ManifestId,
        dependency_name: String,
    },
    /// A candidate was already handled in this pass and has since been
    /// displaced, so re-enabling it would loop.
    CycleDetected {
        manifest_id: ManifestId,
        candidate_id: ManifestId,
    },
}

/// Result of enabling an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnableOutcome {
    pub actions: Vec<ResolutionAction>,
    pub notes: Vec<ResolutionNote>,
    /// Validation run after resolution.
    pub violations: Vec<DependencyViolation>,
}

impl EnableOutcome {
    /// Ids enabled by this call, in order.
    pub fn enabled_ids(&self) -> Vec<&ManifestId> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                ResolutionAction::Enabled { id, .. } => Some(id),
                ResolutionAction::Replaced { .. } => None,
            })
            .collect()
    }

    /// Whether the call changed the enabled set at all.
    pub fn changed(&self) -> bool {
        !self.actions.is_empty()
    }
}

/// Result of disabling an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisableOutcome {
    /// Whether the item was enabled before the call.
    pub was_enabled: bool,
    /// Whether the item went back into the discovery list.
    pub returned_to_discovery: bool,
    pub violations: Vec<DependencyViolation>,
}

/// Active filter deciding which disabled items are listed for discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFilter {
    /// Only these content types. Empty allows all.
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    /// Only content for this game.
    #[serde(default)]
    pub target_game: Option<GameType>,
    /// Case-insensitive substring of the manifest name.
    #[serde(default)]
    pub search: Option<String>,
}

impl ContentFilter {
    pub fn matches(&self, manifest: &ContentManifest) -> bool {
        if !self.content_types.is_empty() && !self.content_types.contains(&manifest.content_type) {
            return false;
        }
        if self
            .target_game
            .is_some_and(|game| game != manifest.target_game)
        {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => manifest
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}
