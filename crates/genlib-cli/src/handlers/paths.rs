//! Paths command handler.
//!
//! Displays all resolved paths in `key = value` format for diagnostics.

use anyhow::Result;

use genlib_core::{DATA_DIR_ENV, data_root, database_path};

pub fn execute() -> Result<()> {
    let override_value = std::env::var(DATA_DIR_ENV).ok();
    println!("data_root = {}", data_root()?.display());
    println!("database = {}", database_path()?.display());
    println!(
        "{DATA_DIR_ENV} = {}",
        override_value.as_deref().unwrap_or("(unset)")
    );
    Ok(())
}
