//! Publisher identifiers for community-maintained game clients.

mod generals_online;
mod super_hackers;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use genlib_core::PublisherIdentifier;

pub use generals_online::GeneralsOnlineIdentifier;
pub use super_hackers::SuperHackersIdentifier;

/// Every identifier this crate ships.
pub fn default_identifiers() -> Vec<Arc<dyn PublisherIdentifier>> {
    vec![
        Arc::new(GeneralsOnlineIdentifier::default()),
        Arc::new(SuperHackersIdentifier::default()),
    ]
}

/// Find a top-level file in `dir`, ignoring filename case.
fn find_executable(dir: &Path, name: &str) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_name().to_string_lossy().eq_ignore_ascii_case(name)
                && entry.file_type().is_ok_and(|t| t.is_file())
        })
        .map(|entry| entry.path())
}
