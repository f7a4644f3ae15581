//! Publisher identifier port definition.
//!
//! Publisher identifiers recognize third-party client variants that are not
//! covered by the fingerprint table, e.g. community-built executables that
//! sit next to the official ones.

use std::path::{Path, PathBuf};

use crate::domain::GameType;

/// What a publisher identifier found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherIdentification {
    /// Stable publisher key (e.g. "generalsonline").
    pub publisher_id: String,
    /// Human-readable client name.
    pub display_name: String,
    pub game_type: GameType,
    /// Version reported locally by the client, if any.
    pub local_version: Option<String>,
    /// The recognized executable.
    pub executable_path: PathBuf,
}

/// Port for recognizing one publisher's client executables.
///
/// Identifiers only look at the top level of a directory.
pub trait PublisherIdentifier: Send + Sync {
    /// Stable publisher key.
    fn publisher_id(&self) -> &str;

    /// Lower-case executable filenames this publisher ships.
    fn executable_names(&self) -> &[&'static str];

    /// Whether the client replaces its own binaries over time.
    ///
    /// Fingerprints of self-updating clients are never verified.
    fn is_self_updating(&self) -> bool;

    /// Cheap check whether `dir` contains a recognizable executable.
    fn can_identify(&self, dir: &Path) -> bool;

    /// Identify every client of this publisher in `dir`.
    ///
    /// Some publishers ship several variants side by side (e.g. 30 Hz and
    /// 60 Hz builds), so more than one identification may be returned.
    fn identify(&self, dir: &Path) -> Vec<PublisherIdentification>;
}
