//! Platform-specific path resolution.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GENLIB_DATA_DIR";

/// Get the root directory for application data (database, settings).
///
/// Resolution order:
/// 1. `GENLIB_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/genlib`)
///
/// The directory is created if it doesn't exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = resolve_data_root(env::var(DATA_DIR_ENV).ok(), dirs::data_local_dir())?;

    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Get the path to the genlib database file.
pub fn database_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("genlib.db"))
}

/// Pure resolution step of [`data_root`], split out for testing.
fn resolve_data_root(
    env_override: Option<String>,
    system_data_dir: Option<PathBuf>,
) -> Result<PathBuf, PathError> {
    if let Some(path) = env_override.filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let data_dir = system_data_dir.ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join("genlib"))
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed.starts_with("~/") || trimmed == "~" {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        if trimmed == "~" {
            home
        } else {
            home.join(trimmed.trim_start_matches("~/"))
        }
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}
