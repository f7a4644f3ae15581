//! Detect command handler.
//!
//! Probes every registered installation concurrently.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::{print_clients, print_scans};

pub async fn execute(ctx: &CliContext, register: bool, json: bool) -> Result<()> {
    let installations = ctx.repos.installations.list().await?;
    if installations.is_empty() {
        println!("No installations registered.");
        println!("Use 'genlib installations add <id> --channel <channel> --zero-hour <dir>' first.");
        return Ok(());
    }

    let outcome = ctx
        .detector(register)
        .detect_from_installations(&installations)
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.clients)?);
        return Ok(());
    }

    print_clients(&outcome.clients);
    println!("\nInstallations:");
    print_scans(&outcome.scans);
    Ok(())
}
