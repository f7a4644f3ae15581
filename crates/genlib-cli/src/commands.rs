//! Main commands enum and primary subcommands.

use clap::Subcommand;

use genlib_core::{ContentType, GameType, InstallChannel, OFFICIAL_PUBLISHER};

use crate::config_commands::ConfigCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show resolved paths for all genlib directories
    Paths,

    /// Recursively scan a directory for game executables
    Scan {
        /// Directory to scan
        dir: String,
        /// Register identified clients in the manifest pool
        #[arg(long)]
        register: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect clients in every registered installation
    Detect {
        /// Register installations and identified clients in the manifest pool
        #[arg(long)]
        register: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage registered game installations
    Installations {
        #[command(subcommand)]
        command: InstallationCommand,
    },

    /// Manage user-added executable fingerprints
    Hashes {
        #[command(subcommand)]
        command: HashCommand,
    },

    /// Inspect the manifest pool
    Manifests {
        #[command(subcommand)]
        command: ManifestCommand,
    },

    /// Enable a manifest and everything it depends on
    Enable {
        /// Manifest id
        id: String,
    },

    /// Disable a manifest
    Disable {
        /// Manifest id
        id: String,
    },

    /// Check the enabled set for missing dependencies and conflicts
    Validate,

    /// Show the enabled content of the active profile
    Status,

    /// View or change application settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Installation command variants.
#[derive(Subcommand)]
pub enum InstallationCommand {
    /// Register an installation
    Add {
        /// Identifier for the installation
        id: String,
        /// Distribution channel (steam, eaapp, origin, tfd, retail, cdiso, wine)
        #[arg(long, default_value = "unknown")]
        channel: InstallChannel,
        /// Directory holding the Generals executables
        #[arg(long)]
        generals: Option<String>,
        /// Directory holding the Zero Hour executables
        #[arg(long = "zero-hour")]
        zero_hour: Option<String>,
    },
    /// List registered installations
    List,
    /// Remove an installation
    Remove {
        /// Identifier of the installation
        id: String,
    },
}

/// Fingerprint command variants.
#[derive(Subcommand)]
pub enum HashCommand {
    /// Add a fingerprint for an executable
    Add {
        /// Hex SHA-256 of the executable
        hash: String,
        /// Game the executable belongs to (generals, zerohour)
        game: GameType,
        /// Game version the executable reports (e.g. 1.04)
        version: String,
        /// Publisher of the binary
        #[arg(long, default_value = OFFICIAL_PUBLISHER)]
        publisher: String,
        /// Mark the record as coming from an unvetted source
        #[arg(long)]
        untrusted: bool,
    },
    /// List user-added fingerprints
    List,
}

/// Manifest command variants.
#[derive(Subcommand)]
pub enum ManifestCommand {
    /// List manifests in the pool
    List {
        /// Only this content type
        #[arg(long = "type")]
        content_type: Option<ContentType>,
        /// Only content for this game
        #[arg(long)]
        game: Option<GameType>,
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
    },
    /// Remove a manifest from the pool
    Remove {
        /// Manifest id
        id: String,
    },
}
