//! Settings domain types and validation.
//!
//! This module contains the core settings types used across the application.
//! These are pure domain types with no infrastructure dependencies.

use serde::{Deserialize, Serialize};

use crate::domain::GameType;

/// Profile used when no profile is named explicitly.
pub const DEFAULT_PROFILE: &str = "default";

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory names skipped by recursive scans, on top of the built-in set.
    pub extra_excluded_dirs: Option<Vec<String>>,

    /// Executable filenames probed after the built-in candidates.
    pub extra_executable_names: Option<Vec<String>>,

    /// Maximum directory depth for recursive scans (1-64). Unset scans the
    /// whole tree.
    pub max_scan_depth: Option<u32>,

    /// Profile whose enabled set the CLI operates on.
    pub active_profile: Option<String>,

    /// Game used to pre-filter the discovery list.
    pub default_filter_game: Option<GameType>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            extra_excluded_dirs: None,
            extra_executable_names: None,
            max_scan_depth: None,
            active_profile: None,
            default_filter_game: None,
        }
    }

    /// Get the effective profile name (with default fallback).
    pub fn effective_profile(&self) -> &str {
        self.active_profile.as_deref().unwrap_or(DEFAULT_PROFILE)
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref dirs) = other.extra_excluded_dirs {
            self.extra_excluded_dirs.clone_from(dirs);
        }
        if let Some(ref names) = other.extra_executable_names {
            self.extra_executable_names.clone_from(names);
        }
        if let Some(ref depth) = other.max_scan_depth {
            self.max_scan_depth = *depth;
        }
        if let Some(ref profile) = other.active_profile {
            self.active_profile.clone_from(profile);
        }
        if let Some(ref game) = other.default_filter_game {
            self.default_filter_game = *game;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub extra_excluded_dirs: Option<Option<Vec<String>>>,
    pub extra_executable_names: Option<Option<Vec<String>>>,
    pub max_scan_depth: Option<Option<u32>>,
    pub active_profile: Option<Option<String>>,
    pub default_filter_game: Option<Option<GameType>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Max scan depth must be between 1 and 64, got {0}")]
    InvalidScanDepth(u32),

    #[error("Profile name cannot be empty")]
    EmptyProfileName,

    #[error("Entries in {0} cannot be empty")]
    EmptyListEntry(&'static str),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(depth) = settings.max_scan_depth {
        if !(1..=64).contains(&depth) {
            return Err(SettingsError::InvalidScanDepth(depth));
        }
    }

    if settings
        .active_profile
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyProfileName);
    }

    if settings
        .extra_excluded_dirs
        .iter()
        .flatten()
        .any(|d| d.trim().is_empty())
    {
        return Err(SettingsError::EmptyListEntry("extra_excluded_dirs"));
    }

    if settings
        .extra_executable_names
        .iter()
        .flatten()
        .any(|n| n.trim().is_empty())
    {
        return Err(SettingsError::EmptyListEntry("extra_executable_names"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.max_scan_depth, None);
        assert_eq!(settings.effective_profile(), DEFAULT_PROFILE);
        assert!(settings.extra_excluded_dirs.is_none());
    }

    #[test]
    fn test_validate_settings_valid() {
        let settings = Settings::with_defaults();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_validate_scan_depth_out_of_range() {
        let settings = Settings {
            max_scan_depth: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidScanDepth(0))
        ));

        let settings = Settings {
            max_scan_depth: Some(65),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidScanDepth(65))
        ));
    }

    #[test]
    fn test_validate_empty_profile() {
        let settings = Settings {
            active_profile: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptyProfileName)
        ));
    }

    #[test]
    fn test_validate_empty_list_entries() {
        let settings = Settings {
            extra_excluded_dirs: Some(vec!["mods".to_string(), String::new()]),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptyListEntry("extra_excluded_dirs"))
        ));
    }

    #[test]
    fn test_merge_settings() {
        let mut settings = Settings {
            max_scan_depth: Some(12),
            ..Settings::with_defaults()
        };
        let update = SettingsUpdate {
            active_profile: Some(Some("tournament".to_string())),
            max_scan_depth: Some(None),
            ..Default::default()
        };
        settings.merge(&update);

        assert_eq!(settings.effective_profile(), "tournament");
        assert_eq!(settings.max_scan_depth, None);
        assert_eq!(settings.extra_executable_names, None); // Unchanged
    }
}
