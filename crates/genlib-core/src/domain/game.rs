//! Game and installation domain types.
//!
//! These types describe which title an executable belongs to and where
//! a game was installed from, independent of how installations are found.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Version string used whenever a fingerprint or probe yields nothing usable.
pub const UNKNOWN_VERSION: &str = "Unknown";

// ─────────────────────────────────────────────────────────────────────────────
// Game Type
// ─────────────────────────────────────────────────────────────────────────────

/// The game title an executable or content item targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Command & Conquer: Generals.
    Generals,
    /// Command & Conquer: Generals - Zero Hour.
    ZeroHour,
    /// Unrecognized title.
    #[default]
    Unknown,
}

impl GameType {
    /// All recognized titles, excluding `Unknown`.
    pub const KNOWN: [Self; 2] = [Self::Generals, Self::ZeroHour];

    /// Latest official patch version for the title.
    ///
    /// Used when an executable only reports a placeholder version.
    pub const fn latest_official_version(self) -> &'static str {
        match self {
            Self::Generals => "1.08",
            Self::ZeroHour => "1.04",
            Self::Unknown => UNKNOWN_VERSION,
        }
    }

    /// Name segment used when building manifest ids.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Generals => "generals",
            Self::ZeroHour => "zerohour",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable title.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Generals => "Generals",
            Self::ZeroHour => "Zero Hour",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "generals" | "ccgenerals" => Ok(Self::Generals),
            "zerohour" | "zh" | "generalszerohour" => Ok(Self::ZeroHour),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown game type: {s}")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Install Channel
// ─────────────────────────────────────────────────────────────────────────────

/// The distribution channel an installation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InstallChannel {
    Steam,
    EaApp,
    Origin,
    TheFirstDecade,
    Retail,
    CdIso,
    Wine,
    #[default]
    Unknown,
}

impl InstallChannel {
    /// Lower-case identifier, also used as the manifest publisher segment.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::EaApp => "eaapp",
            Self::Origin => "origin",
            Self::TheFirstDecade => "thefirstdecade",
            Self::Retail => "retail",
            Self::CdIso => "cdiso",
            Self::Wine => "wine",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InstallChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for InstallChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "steam" => Ok(Self::Steam),
            "eaapp" | "ea" => Ok(Self::EaApp),
            "origin" => Ok(Self::Origin),
            "thefirstdecade" | "tfd" => Ok(Self::TheFirstDecade),
            "retail" => Ok(Self::Retail),
            "cdiso" | "cd" | "iso" => Ok(Self::CdIso),
            "wine" => Ok(Self::Wine),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Unknown install channel: {s}")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Game Installation
// ─────────────────────────────────────────────────────────────────────────────

/// A known game installation on disk.
///
/// One installation may carry both titles (Zero Hour ships as an expansion
/// next to Generals), so each game directory is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInstallation {
    /// Stable identifier chosen by whoever registered the installation.
    pub id: String,
    /// Distribution channel.
    pub channel: InstallChannel,
    /// Directory containing the Generals executables.
    pub generals_path: Option<PathBuf>,
    /// Directory containing the Zero Hour executables.
    pub zero_hour_path: Option<PathBuf>,
}

impl GameInstallation {
    /// Create an installation with no game directories yet.
    pub fn new(id: impl Into<String>, channel: InstallChannel) -> Self {
        Self {
            id: id.into(),
            channel,
            generals_path: None,
            zero_hour_path: None,
        }
    }

    /// Directory for the given title, if this installation has it.
    pub fn game_path(&self, game_type: GameType) -> Option<&Path> {
        match game_type {
            GameType::Generals => self.generals_path.as_deref(),
            GameType::ZeroHour => self.zero_hour_path.as_deref(),
            GameType::Unknown => None,
        }
    }

    /// Titles present in this installation, Generals first.
    pub fn game_types(&self) -> Vec<GameType> {
        GameType::KNOWN
            .into_iter()
            .filter(|game| self.game_path(*game).is_some())
            .collect()
    }
}
