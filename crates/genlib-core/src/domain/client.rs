//! Detected game client types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::game::{GameType, InstallChannel, UNKNOWN_VERSION};
use super::manifest::ManifestId;

/// How a client was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientSource {
    /// Probed inside a registered installation.
    Installation,
    /// Found by an ad-hoc recursive directory scan.
    DirectoryScan,
    /// Recognized by a publisher identifier.
    Publisher,
}

/// A game executable identified by the detector.
///
/// `id` stays empty until the client has been registered as a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClient {
    pub name: String,
    pub id: ManifestId,
    pub version: String,
    pub executable_path: PathBuf,
    pub game_type: GameType,
    /// Id of the `GameInstallation` the client was found in.
    pub installation_id: Option<String>,
    pub working_directory: PathBuf,
    /// Publisher identifier that recognized the client, if any.
    pub publisher_type: Option<String>,
    pub source_type: ClientSource,
    #[serde(default)]
    pub install_channel: InstallChannel,
}

impl GameClient {
    /// Create an unregistered client for an executable.
    pub fn new(
        name: impl Into<String>,
        executable_path: PathBuf,
        game_type: GameType,
        version: impl Into<String>,
        source_type: ClientSource,
    ) -> Self {
        let working_directory = executable_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();
        Self {
            name: name.into(),
            id: ManifestId::default(),
            version: version.into(),
            executable_path,
            game_type,
            installation_id: None,
            working_directory,
            publisher_type: None,
            source_type,
            install_channel: InstallChannel::Unknown,
        }
    }

    /// Whether the client has a persisted manifest id.
    pub fn is_registered(&self) -> bool {
        !self.id.is_empty()
    }

    /// Whether neither the fingerprint nor metadata identified the executable.
    pub fn is_unknown(&self) -> bool {
        self.game_type == GameType::Unknown || self.version == UNKNOWN_VERSION
    }

    /// Whether the client still needs to be acquired by a publisher pipeline.
    pub fn needs_acquisition(&self) -> bool {
        self.source_type == ClientSource::Publisher && !self.is_registered()
    }
}
