//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the game client and content library.
#[derive(Parser)]
#[command(name = "genlib")]
#[command(about = "Detect game clients and manage add-on content")]
#[command(version)]
pub struct Cli {
    /// Profile whose enabled content is read and written
    #[arg(long, global = true, env = "GENLIB_PROFILE")]
    pub profile: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
