//! Normalization of embedded file-version strings.

use crate::domain::{GameType, UNKNOWN_VERSION};

/// Versions that installers stamp on binaries regardless of the real patch.
const PLACEHOLDER_VERSIONS: [&str; 5] = ["0", "0.0", "0.0.0.0", "1.0", "1.0.0.0"];

/// Turn a raw file-version string into the game's version notation.
///
/// - Leading `v` and anything after the numeric part (`-beta`,
///   ` (build 12)`) is dropped.
/// - Three- and four-part versions collapse to `major.minor+build`, so
///   `1.0.4.0` becomes `1.04`.
/// - Placeholders and empty input become the latest official version of
///   `game_type`.
pub fn normalize_file_version(raw: &str, game_type: GameType) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(['v', 'V'])
        .unwrap_or(trimmed);

    let numeric: &str = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .map_or(trimmed, |end| &trimmed[..end]);
    let numeric = numeric.trim_matches('.');

    if numeric.is_empty() || PLACEHOLDER_VERSIONS.contains(&numeric) {
        return game_type.latest_official_version().to_string();
    }

    let parts: Vec<&str> = numeric.split('.').filter(|p| !p.is_empty()).collect();
    match parts.as_slice() {
        [major, minor, build, ..] => format!("{major}.{minor}{build}"),
        [major, minor] => format!("{major}.{minor}"),
        [major] => (*major).to_string(),
        [] => UNKNOWN_VERSION.to_string(),
    }
}
