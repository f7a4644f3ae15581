//! File-version metadata port definition.
//!
//! Executables usually embed a version resource. The detector falls back
//! to it when no fingerprint matches.

use std::path::Path;

/// Port for reading the embedded file version of an executable.
pub trait FileVersionReader: Send + Sync {
    /// Raw version string (e.g. `"1.0.4.0"`), or `None` when the file has
    /// no readable version metadata.
    fn read_file_version(&self, path: &Path) -> Option<String>;
}

/// Reader that never finds version metadata.
///
/// Used when no metadata reader is wired in; the detector then relies on
/// the latest official version fallback.
pub struct NoopFileVersionReader;

impl FileVersionReader for NoopFileVersionReader {
    fn read_file_version(&self, _path: &Path) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_reader_reports_nothing() {
        let reader = NoopFileVersionReader;
        assert_eq!(reader.read_file_version(Path::new("/any/game.dat")), None);
    }
}
