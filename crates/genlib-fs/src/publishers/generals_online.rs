//! GeneralsOnline: a self-updating Zero Hour client shipped in 30 Hz and
//! 60 Hz builds.

use std::path::Path;

use genlib_core::{
    FileVersionReader, GameType, PublisherIdentification, PublisherIdentifier,
};
use tracing::debug;

use super::find_executable;
use crate::pe_version::PeVersionReader;

const PUBLISHER_ID: &str = "generalsonline";

/// Executable name and display name per build.
const BUILDS: [(&str, &str); 2] = [
    ("generalsonlinezh_30.exe", "GeneralsOnline 30Hz"),
    ("generalsonlinezh_60.exe", "GeneralsOnline 60Hz"),
];

const EXECUTABLE_NAMES: [&str; 2] = [BUILDS[0].0, BUILDS[1].0];

/// Recognizes GeneralsOnline builds.
///
/// The client replaces its binaries on every update, so fingerprints are
/// never checked; the embedded file version is reported when present.
#[derive(Debug, Default)]
pub struct GeneralsOnlineIdentifier {
    version_reader: PeVersionReader,
}

impl PublisherIdentifier for GeneralsOnlineIdentifier {
    fn publisher_id(&self) -> &str {
        PUBLISHER_ID
    }

    fn executable_names(&self) -> &[&'static str] {
        &EXECUTABLE_NAMES
    }

    fn is_self_updating(&self) -> bool {
        true
    }

    fn can_identify(&self, dir: &Path) -> bool {
        EXECUTABLE_NAMES
            .iter()
            .any(|name| find_executable(dir, name).is_some())
    }

    fn identify(&self, dir: &Path) -> Vec<PublisherIdentification> {
        BUILDS
            .iter()
            .filter_map(|(exe, display_name)| {
                let path = find_executable(dir, exe)?;
                debug!(path = %path.display(), "Found GeneralsOnline build");
                Some(PublisherIdentification {
                    publisher_id: PUBLISHER_ID.to_string(),
                    display_name: (*display_name).to_string(),
                    game_type: GameType::ZeroHour,
                    local_version: self.version_reader.read_file_version(&path),
                    executable_path: path,
                })
            })
            .collect()
    }
}
