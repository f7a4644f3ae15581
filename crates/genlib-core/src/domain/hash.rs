//! Fingerprint records.

use serde::{Deserialize, Serialize};

use super::game::GameType;

/// Publisher recorded for fingerprints of the official retail binaries.
pub const OFFICIAL_PUBLISHER: &str = "ea";

/// What a known executable fingerprint identifies.
///
/// Records are immutable once registered: the registry never overwrites or
/// removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRecord {
    /// Hex-encoded content hash, stored lower-case.
    pub hash: String,
    /// Title the executable belongs to.
    pub game_type: GameType,
    /// Game version the executable reports (e.g. "1.04").
    pub version: String,
    /// Publisher of the binary (e.g. "ea", "thesuperhackers").
    pub publisher: String,
    /// Whether the record comes from a vetted source.
    pub trusted: bool,
}

impl HashRecord {
    /// Create a record, normalizing the hash to lower case.
    pub fn new(
        hash: impl AsRef<str>,
        game_type: GameType,
        version: impl Into<String>,
        publisher: impl Into<String>,
        trusted: bool,
    ) -> Self {
        Self {
            hash: normalize_hash(hash.as_ref()),
            game_type,
            version: version.into(),
            publisher: publisher.into(),
            trusted,
        }
    }
}

/// Canonical form used for hash keys: trimmed and lower-case.
pub fn normalize_hash(hash: &str) -> String {
    hash.trim().to_ascii_lowercase()
}
