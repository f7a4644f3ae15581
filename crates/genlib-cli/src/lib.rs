//! Command-line adapter for genlib.
//!
//! `main.rs` parses arguments, calls [`bootstrap`] and routes each command
//! to a handler in [`handlers`].

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tracing_subscriber as _;

#[cfg(test)]
use tempfile as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap, bootstrap_with};
pub use commands::{Commands, HashCommand, InstallationCommand, ManifestCommand};
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
