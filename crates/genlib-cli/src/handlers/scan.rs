//! Scan command handler.
//!
//! Recursively scans a directory for game executables. Ctrl-C stops the
//! walk early and still reports what was found.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use genlib_core::{CoreError, normalize_user_path};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_clients;

pub async fn execute(ctx: &CliContext, dir: &str, register: bool, json: bool) -> Result<()> {
    let root = normalize_user_path(dir).map_err(|e| CliError::from(CoreError::Path(e)))?;

    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let result = ctx
        .detector(register)
        .scan_directory_with_cancel(&root, cancel)
        .await;
    watcher.abort();
    let outcome = result.map_err(|e| CliError::from(CoreError::Detection(e)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.clients)?);
        return Ok(());
    }

    if outcome.cancelled {
        println!("Scan cancelled; showing partial results.");
    }
    if outcome.truncated {
        println!("Some directories were below max_scan_depth and were not scanned.");
    }
    print_clients(&outcome.clients);
    println!(
        "\nScanned {} in {:.2}s",
        root.display(),
        outcome.elapsed.as_secs_f64()
    );
    Ok(())
}
