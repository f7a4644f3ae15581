//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that parse CLI input, call core services and format
//!   output for the terminal
//!
//! Handlers do not open database connections themselves.

pub mod config;
pub mod content;
pub mod detect;
pub mod hashes;
pub mod installations;
pub mod manifests;
pub mod paths;
pub mod scan;
