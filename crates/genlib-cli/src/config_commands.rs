//! Configuration management subcommands.

use clap::Subcommand;

use genlib_core::GameType;

/// Configuration management commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show all current settings
    Show,
    /// Update settings
    Set {
        /// Maximum directory depth for recursive scans (1-64)
        #[arg(long)]
        max_scan_depth: Option<u32>,
        /// Extra directory name skipped by scans (repeatable)
        #[arg(long = "exclude-dir")]
        exclude_dirs: Vec<String>,
        /// Extra executable filename probed by detection (repeatable)
        #[arg(long = "executable-name")]
        executable_names: Vec<String>,
        /// Profile used when --profile is not given
        #[arg(long)]
        active_profile: Option<String>,
        /// Game used to pre-filter the discovery list
        #[arg(long)]
        filter_game: Option<GameType>,
        /// Clear the discovery game filter
        #[arg(long, conflicts_with = "filter_game")]
        clear_filter_game: bool,
    },
    /// Reset all settings to defaults
    Reset,
}
