//! TheSuperHackers community patch builds.

use std::path::Path;

use genlib_core::{
    FileVersionReader, GameType, PublisherIdentification, PublisherIdentifier,
};

use super::find_executable;
use crate::pe_version::PeVersionReader;

const PUBLISHER_ID: &str = "thesuperhackers";

const BUILDS: [(&str, &str, GameType); 2] = [
    ("generalsv.exe", "TheSuperHackers Generals", GameType::Generals),
    ("generalszh.exe", "TheSuperHackers Zero Hour", GameType::ZeroHour),
];

const EXECUTABLE_NAMES: [&str; 2] = [BUILDS[0].0, BUILDS[1].0];

/// Recognizes TheSuperHackers builds. Releases are versioned binaries, so
/// the detector verifies them by fingerprint.
#[derive(Debug, Default)]
pub struct SuperHackersIdentifier {
    version_reader: PeVersionReader,
}

impl PublisherIdentifier for SuperHackersIdentifier {
    fn publisher_id(&self) -> &str {
        PUBLISHER_ID
    }

    fn executable_names(&self) -> &[&'static str] {
        &EXECUTABLE_NAMES
    }

    fn is_self_updating(&self) -> bool {
        false
    }

    fn can_identify(&self, dir: &Path) -> bool {
        EXECUTABLE_NAMES
            .iter()
            .any(|name| find_executable(dir, name).is_some())
    }

    fn identify(&self, dir: &Path) -> Vec<PublisherIdentification> {
        BUILDS
            .iter()
            .filter_map(|(exe, display_name, game_type)| {
                let path = find_executable(dir, exe)?;
                Some(PublisherIdentification {
                    publisher_id: PUBLISHER_ID.to_string(),
                    display_name: (*display_name).to_string(),
                    game_type: *game_type,
                    local_version: self.version_reader.read_file_version(&path),
                    executable_path: path,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifies_zero_hour_build() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("GeneralsZH.exe"), b"stub").unwrap();

        let identifier = SuperHackersIdentifier::default();
        let found = identifier.identify(dir.path());

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].game_type, GameType::ZeroHour);
        assert_eq!(found[0].executable_path, dir.path().join("GeneralsZH.exe"));
        assert!(!identifier.is_self_updating());
    }
}
