//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod client_display;
pub mod resolution_display;
pub mod tables;

pub use client_display::{print_clients, print_scans};
pub use resolution_display::{
    describe_action, describe_note, print_disable_outcome, print_enable_outcome,
    print_violations,
};
pub use tables::{format_optional, print_separator, truncate_string};
