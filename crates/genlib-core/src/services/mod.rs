//! Core services: detection, registration and content resolution.
//!
//! Services depend only on ports and domain types; adapters are injected
//! at the composition root.

mod client_detector;
mod client_registrar;
mod dependency_resolver;
mod hash_registry;
mod version;

pub use client_detector::{
    AUTO_UPDATED_VERSION, ClientDetector, DEFAULT_EXCLUDED_DIRS, DetectionError, DetectionOutcome,
    InstallationScan, ScanOptions, ScanState,
};
pub use client_registrar::{
    ClientRegistrar, client_manifest, client_manifest_id, installation_manifest,
    installation_manifest_id,
};
pub use dependency_resolver::{ContentSession, ResolverError, effective_dependencies};
pub use hash_registry::{DEFAULT_EXECUTABLE_NAMES, HashRegistry, bundled_records, parse_records};
pub use version::normalize_file_version;
