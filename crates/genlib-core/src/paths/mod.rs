//! Path utilities for genlib data directories.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately
//! - OS-specific logic is kept private in `platform`

mod error;
mod platform;

pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root, database_path, normalize_user_path};
