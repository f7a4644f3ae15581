//! Content manifest domain types.
//!
//! A manifest describes one installable/enableable unit of content and
//! carries its own dependency list. Manifests are owned by the manifest
//! pool; the resolver only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::game::{GameType, InstallChannel};

/// Dependency id sentinel meaning "any item of the dependency type".
pub const ANY_DEPENDENCY_ID: &str = "any";

/// Schema version written as the first manifest id segment.
const MANIFEST_SCHEMA_VERSION: u32 = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Content Type
// ─────────────────────────────────────────────────────────────────────────────

/// Classification of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Installation,
    Client,
    Mod,
    Patch,
    Addon,
    MapPack,
    Executable,
    Tool,
    Map,
    Mission,
}

impl ContentType {
    pub const ALL: [Self; 10] = [
        Self::Installation,
        Self::Client,
        Self::Mod,
        Self::Patch,
        Self::Addon,
        Self::MapPack,
        Self::Executable,
        Self::Tool,
        Self::Map,
        Self::Mission,
    ];

    /// Whether at most one item of this type may be enabled at a time.
    pub const fn is_single_instance(self) -> bool {
        matches!(self, Self::Installation | Self::Client)
    }

    /// Segment used in manifest ids.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Installation => "gameinstallation",
            Self::Client => "gameclient",
            Self::Mod => "mod",
            Self::Patch => "patch",
            Self::Addon => "addon",
            Self::MapPack => "mappack",
            Self::Executable => "executable",
            Self::Tool => "tool",
            Self::Map => "map",
            Self::Mission => "mission",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Installation => "Installation",
            Self::Client => "Client",
            Self::Mod => "Mod",
            Self::Patch => "Patch",
            Self::Addon => "Addon",
            Self::MapPack => "MapPack",
            Self::Executable => "Executable",
            Self::Tool => "Tool",
            Self::Map => "Map",
            Self::Mission => "Mission",
        };
        f.write_str(name)
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|ty| {
                ty.slug() == normalized || ty.to_string().to_ascii_lowercase() == normalized
            })
            .ok_or_else(|| format!("Unknown content type: {s}"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Manifest Id
// ─────────────────────────────────────────────────────────────────────────────

/// Structured, dot-delimited manifest identifier.
///
/// Layout: `schema.userversion.publisher.contenttype.contentname`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestId(String);

impl ManifestId {
    /// Wrap an existing id string without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Deterministically build an id from its parts.
    ///
    /// The same inputs always produce the same id, so repeated scans of an
    /// unchanged installation never create duplicate manifests.
    pub fn generate(
        publisher: &str,
        content_type: ContentType,
        content_name: &str,
        version: Option<&str>,
    ) -> Self {
        let numeric_version = version.map_or(0, numeric_version);
        Self(format!(
            "{MANIFEST_SCHEMA_VERSION}.{numeric_version}.{}.{}.{}",
            id_segment(publisher),
            content_type.slug(),
            id_segment(content_name),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `any` sentinel used by dependencies.
    pub fn is_any(&self) -> bool {
        self.0.eq_ignore_ascii_case(ANY_DEPENDENCY_ID)
    }

    /// Dot-separated segments of the id.
    pub fn segments(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }
}

impl fmt::Display for ManifestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ManifestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ManifestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Semantic (non-exact) id match.
///
/// Two ids match when both have at least five segments and their 4th
/// (content type) and 5th (content name) segments are equal, ignoring case.
/// Schema, version and publisher segments are ignored.
pub fn semantic_match(a: &ManifestId, b: &ManifestId) -> bool {
    let left = a.segments();
    let right = b.segments();
    if left.len() < 5 || right.len() < 5 {
        return false;
    }
    left[3].eq_ignore_ascii_case(right[3]) && left[4].eq_ignore_ascii_case(right[4])
}

/// Digits of a version string as a number (`"1.04"` → `104`).
fn numeric_version(version: &str) -> u64 {
    let digits: String = version.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

fn id_segment(raw: &str) -> String {
    let segment: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    if segment.is_empty() {
        "unknown".to_string()
    } else {
        segment
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dependencies
// ─────────────────────────────────────────────────────────────────────────────

/// A dependency declared by a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDependency {
    /// Concrete manifest id, or the `any` sentinel.
    pub id: ManifestId,
    /// Display name for reporting.
    pub name: String,
    /// Content type the dependency must be satisfied by.
    pub dependency_type: ContentType,
    /// Games a satisfying item may target. Empty accepts any game.
    #[serde(default)]
    pub compatible_game_types: Vec<GameType>,
    /// Optional dependencies never produce violations.
    #[serde(default)]
    pub is_optional: bool,
    /// Manifest ids that must not be enabled together with the owner.
    #[serde(default)]
    pub conflicts_with: Vec<ManifestId>,
    /// Disables semantic matching: only the exact id satisfies.
    #[serde(default)]
    pub strict_publisher_match: bool,
}

impl ContentDependency {
    /// Dependency on any installation of the given games.
    pub fn installation(compatible_game_types: Vec<GameType>) -> Self {
        let name = match compatible_game_types.as_slice() {
            [single] => format!("{single} installation"),
            _ => "Game installation".to_string(),
        };
        Self {
            id: ManifestId::new(ANY_DEPENDENCY_ID),
            name,
            dependency_type: ContentType::Installation,
            compatible_game_types,
            is_optional: false,
            conflicts_with: Vec::new(),
            strict_publisher_match: false,
        }
    }

    /// Dependency on one concrete manifest.
    pub fn on(id: impl Into<ManifestId>, name: impl Into<String>, ty: ContentType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dependency_type: ty,
            compatible_game_types: Vec::new(),
            is_optional: false,
            conflicts_with: Vec::new(),
            strict_publisher_match: false,
        }
    }

    /// Whether `game` is acceptable for this dependency.
    pub fn accepts_game(&self, game: GameType) -> bool {
        self.compatible_game_types.is_empty() || self.compatible_game_types.contains(&game)
    }

    /// Whether a manifest id satisfies this dependency's id requirement.
    ///
    /// Exact match always satisfies; otherwise a semantic match does unless
    /// the dependency is strict. The `any` sentinel never matches here.
    pub fn matches_id(&self, candidate: &ManifestId) -> bool {
        if self.id.is_any() {
            return false;
        }
        if self.id == *candidate {
            return true;
        }
        !self.strict_publisher_match && semantic_match(&self.id, candidate)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Manifest
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted descriptor of one content unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentManifest {
    pub id: ManifestId,
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub content_type: ContentType,
    pub target_game: GameType,
    /// Publisher that produced the content (e.g. "generalsonline").
    #[serde(default)]
    pub publisher: Option<String>,
    /// Distribution channel the content originates from.
    #[serde(default)]
    pub install_channel: Option<InstallChannel>,
    /// Installation manifest this content was discovered in.
    #[serde(default)]
    pub source_installation: Option<ManifestId>,
    #[serde(default)]
    pub dependencies: Vec<ContentDependency>,
}

impl ContentManifest {
    /// Create a manifest without dependencies or provenance.
    pub fn new(
        id: impl Into<ManifestId>,
        name: impl Into<String>,
        content_type: ContentType,
        target_game: GameType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: String::new(),
            content_type,
            target_game,
            publisher: None,
            install_channel: None,
            source_installation: None,
            dependencies: Vec::new(),
        }
    }

    /// Builder-style dependency addition.
    #[must_use]
    pub fn with_dependency(mut self, dependency: ContentDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }
}
