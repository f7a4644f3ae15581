//! Game client detection.
//!
//! Finds game executables inside registered installations and in arbitrary
//! directory trees, and identifies them by fingerprint, embedded version
//! metadata or publisher identifiers.
//!
//! All filesystem work runs on tokio's blocking pool. Installations are
//! probed concurrently; each one walks the [`ScanState`] machine.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::client_registrar::{ClientRegistrar, client_manifest_id};
use super::hash_registry::HashRegistry;
use super::version::normalize_file_version;
use crate::domain::{
    ClientSource, GameClient, GameInstallation, GameType, ManifestId, OFFICIAL_PUBLISHER,
    UNKNOWN_VERSION,
};
use crate::ports::{
    ContentHasher, FileVersionReader, ManifestPool, NoopFileVersionReader, PublisherIdentifier,
};
use crate::settings::Settings;

/// Directory names never descended into by recursive scans.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 13] = [
    ".git",
    ".svn",
    ".hg",
    ".vs",
    "node_modules",
    "target",
    "obj",
    "build",
    "cache",
    ".cache",
    "__pycache__",
    "_commonredist",
    "redist",
];

/// Version reported for self-updating publisher clients without a local
/// version.
pub const AUTO_UPDATED_VERSION: &str = "Auto-Updated";

// ─────────────────────────────────────────────────────────────────────────────
// Errors and scan state
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that stop a detection run.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Invalid scan transition from {from:?} to {to:?}")]
    InvalidTransition { from: ScanState, to: ScanState },

    #[error("Detection task failed: {0}")]
    Join(String),
}

/// Progress of one installation through detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    NotScanned,
    VersionProbed,
    PublisherProbed,
    Registered,
}

impl ScanState {
    const fn next(self) -> Option<Self> {
        match self {
            Self::NotScanned => Some(Self::VersionProbed),
            Self::VersionProbed => Some(Self::PublisherProbed),
            Self::PublisherProbed => Some(Self::Registered),
            Self::Registered => None,
        }
    }
}

/// Scan record for one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationScan {
    pub installation_id: String,
    state: ScanState,
}

impl InstallationScan {
    pub fn new(installation_id: impl Into<String>) -> Self {
        Self {
            installation_id: installation_id.into(),
            state: ScanState::NotScanned,
        }
    }

    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// Move to `next`. Only the immediate successor state is accepted.
    pub fn advance(&mut self, next: ScanState) -> Result<(), DetectionError> {
        if self.state.next() != Some(next) {
            return Err(DetectionError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

/// Everything a detection run found.
#[derive(Debug, Clone, Default)]
pub struct DetectionOutcome {
    pub clients: Vec<GameClient>,
    /// Per-installation progress; empty for directory scans.
    pub scans: Vec<InstallationScan>,
    pub elapsed: Duration,
    /// Whether the run stopped early on cancellation.
    pub cancelled: bool,
    /// Whether a depth limit left directories unscanned.
    pub truncated: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Limits for recursive directory scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Lower-case directory names to skip.
    pub excluded_dirs: Vec<String>,
    /// Maximum depth below the scan root. `None` walks the whole tree.
    pub max_depth: Option<u32>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| (*d).to_string()).collect(),
            max_depth: None,
        }
    }
}

impl ScanOptions {
    /// Built-in exclusions plus the user's extras.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut options = Self {
            max_depth: settings.max_scan_depth,
            ..Self::default()
        };
        for dir in settings.extra_excluded_dirs.iter().flatten() {
            let dir = dir.trim().to_ascii_lowercase();
            if !dir.is_empty() && !options.excluded_dirs.contains(&dir) {
                options.excluded_dirs.push(dir);
            }
        }
        options
    }

    fn is_excluded(&self, dir_name: &str) -> bool {
        self.excluded_dirs
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(dir_name))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Detector
// ─────────────────────────────────────────────────────────────────────────────

/// Detects game clients on disk.
pub struct ClientDetector {
    registry: Arc<HashRegistry>,
    hasher: Arc<dyn ContentHasher>,
    version_reader: Arc<dyn FileVersionReader>,
    publishers: Vec<Arc<dyn PublisherIdentifier>>,
    pool: Arc<dyn ManifestPool>,
    registrar: Option<Arc<ClientRegistrar>>,
    options: ScanOptions,
}

impl ClientDetector {
    /// Detector with no version metadata reader, no publisher identifiers
    /// and no registration.
    pub fn new(
        registry: Arc<HashRegistry>,
        hasher: Arc<dyn ContentHasher>,
        pool: Arc<dyn ManifestPool>,
    ) -> Self {
        Self {
            registry,
            hasher,
            version_reader: Arc::new(NoopFileVersionReader),
            publishers: Vec::new(),
            pool,
            registrar: None,
            options: ScanOptions::default(),
        }
    }

    #[must_use]
    pub fn with_version_reader(mut self, reader: Arc<dyn FileVersionReader>) -> Self {
        self.version_reader = reader;
        self
    }

    #[must_use]
    pub fn with_publisher(mut self, identifier: Arc<dyn PublisherIdentifier>) -> Self {
        self.publishers.push(identifier);
        self
    }

    #[must_use]
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Register every identified client and installation after probing.
    #[must_use]
    pub fn with_registrar(mut self, registrar: Arc<ClientRegistrar>) -> Self {
        self.registrar = Some(registrar);
        self
    }

    /// Probe every installation concurrently.
    ///
    /// Installations whose probe task fails are logged and left out; the
    /// rest are still reported, in input order.
    pub async fn detect_from_installations(
        &self,
        installations: &[GameInstallation],
    ) -> DetectionOutcome {
        let started = Instant::now();
        let known_ids = Arc::new(self.known_manifest_ids().await);

        let mut tasks = JoinSet::new();
        for (index, installation) in installations.iter().cloned().enumerate() {
            let probe = self.probe(Arc::clone(&known_ids));
            tasks.spawn_blocking(move || (index, probe.probe_installation(&installation)));
        }

        let mut probed = Vec::with_capacity(installations.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(result))) => probed.push((index, result)),
                Ok((index, Err(e))) => {
                    error!(installation = %installations[index].id, error = %e, "Installation probe failed");
                }
                Err(e) => error!(error = %e, "Installation probe task panicked"),
            }
        }
        probed.sort_by_key(|(index, _)| *index);

        let mut outcome = DetectionOutcome::default();
        for (index, (mut scan, clients)) in probed {
            let clients = match &self.registrar {
                Some(registrar) => {
                    registrar.register_installation(&installations[index]).await;
                    let registered = register_all(registrar, clients).await;
                    if let Err(e) = scan.advance(ScanState::Registered) {
                        warn!(installation = %scan.installation_id, error = %e, "Scan state not advanced");
                    }
                    registered
                }
                None => clients,
            };
            outcome.clients.extend(clients);
            outcome.scans.push(scan);
        }

        outcome.elapsed = started.elapsed();
        info!(
            installations = installations.len(),
            clients = outcome.clients.len(),
            elapsed_ms = outcome.elapsed.as_millis(),
            "Installation detection finished"
        );
        outcome
    }

    /// Recursively scan `root` for executables.
    pub async fn scan_directory(&self, root: &Path) -> Result<DetectionOutcome, DetectionError> {
        self.scan_directory_with_cancel(root, CancellationToken::new())
            .await
    }

    /// Recursively scan `root`, stopping early once `cancel` fires.
    ///
    /// A cancelled scan returns the clients found so far with
    /// `cancelled` set.
    pub async fn scan_directory_with_cancel(
        &self,
        root: &Path,
        cancel: CancellationToken,
    ) -> Result<DetectionOutcome, DetectionError> {
        if !root.is_dir() {
            return Err(DetectionError::DirectoryNotFound(root.to_path_buf()));
        }

        let started = Instant::now();
        let probe = self.probe(Arc::new(HashSet::new()));
        let walk_root = root.to_path_buf();
        let walked = tokio::task::spawn_blocking(move || probe.walk(&walk_root, &cancel))
                .await
                .map_err(|e| DetectionError::Join(e.to_string()))?;

        let clients = match &self.registrar {
            Some(registrar) => register_all(registrar, walked.clients).await,
            None => walked.clients,
        };

        let elapsed = started.elapsed();
        info!(
            root = %root.display(),
            clients = clients.len(),
            cancelled = walked.cancelled,
            truncated = walked.truncated,
            elapsed_ms = elapsed.as_millis(),
            "Directory scan finished"
        );
        Ok(DetectionOutcome {
            clients,
            scans: Vec::new(),
            elapsed,
            cancelled: walked.cancelled,
            truncated: walked.truncated,
        })
    }

    async fn known_manifest_ids(&self) -> HashSet<ManifestId> {
        match self.pool.get_all_manifests().await {
            Ok(manifests) => manifests.into_iter().map(|m| m.id).collect(),
            Err(e) => {
                warn!(error = %e, "Could not read manifest pool, publisher matches not deduplicated");
                HashSet::new()
            }
        }
    }

    fn probe(&self, known_ids: Arc<HashSet<ManifestId>>) -> Probe {
        Probe {
            registry: Arc::clone(&self.registry),
            hasher: Arc::clone(&self.hasher),
            version_reader: Arc::clone(&self.version_reader),
            publishers: self.publishers.clone(),
            options: self.options.clone(),
            known_ids,
        }
    }
}

async fn register_all(registrar: &ClientRegistrar, clients: Vec<GameClient>) -> Vec<GameClient> {
    let mut registered = Vec::with_capacity(clients.len());
    for client in clients {
        registered.push(registrar.register(client).await);
    }
    registered
}

// ─────────────────────────────────────────────────────────────────────────────
// Blocking probe
// ─────────────────────────────────────────────────────────────────────────────

/// Owned snapshot of the detector's collaborators, moved onto a blocking
/// thread.
struct Probe {
    registry: Arc<HashRegistry>,
    hasher: Arc<dyn ContentHasher>,
    version_reader: Arc<dyn FileVersionReader>,
    publishers: Vec<Arc<dyn PublisherIdentifier>>,
    options: ScanOptions,
    known_ids: Arc<HashSet<ManifestId>>,
}

/// Result of a recursive walk.
struct Walk {
    clients: Vec<GameClient>,
    cancelled: bool,
    truncated: bool,
}

/// Result of the version probe for one game directory.
struct VersionProbe {
    version: String,
    executable_path: PathBuf,
}

impl Probe {
    fn probe_installation(
        &self,
        installation: &GameInstallation,
    ) -> Result<(InstallationScan, Vec<GameClient>), DetectionError> {
        let mut scan = InstallationScan::new(installation.id.clone());
        let mut clients = Vec::new();

        for game_type in installation.game_types() {
            let Some(dir) = installation.game_path(game_type) else {
                continue;
            };
            match self.probe_version(dir, game_type) {
                Some(found) => {
                    let mut client = GameClient::new(
                        format!("{} {}", game_type.display_name(), found.version),
                        found.executable_path,
                        game_type,
                        found.version,
                        ClientSource::Installation,
                    );
                    client.installation_id = Some(installation.id.clone());
                    client.install_channel = installation.channel;
                    info!(
                        installation = %installation.id,
                        name = %client.name,
                        path = %client.executable_path.display(),
                        "Identified client"
                    );
                    clients.push(client);
                }
                None => debug!(
                    installation = %installation.id,
                    dir = %dir.display(),
                    "No executable candidates found"
                ),
            }
        }
        scan.advance(ScanState::VersionProbed)?;

        let mut seen_paths = HashSet::new();
        for game_type in installation.game_types() {
            let Some(dir) = installation.game_path(game_type) else {
                continue;
            };
            for client in self.probe_publishers(dir, installation) {
                if seen_paths.insert(client.executable_path.clone()) {
                    clients.push(client);
                }
            }
        }
        scan.advance(ScanState::PublisherProbed)?;

        Ok((scan, clients))
    }

    /// Fingerprint candidates in priority order; fall back to embedded
    /// version metadata of the first readable candidate.
    fn probe_version(&self, dir: &Path, game_type: GameType) -> Option<VersionProbe> {
        let mut fallback: Option<PathBuf> = None;

        for name in self.registry.possible_executable_names() {
            let Some(path) = resolve_file(dir, &name) else {
                continue;
            };
            debug!(path = %path.display(), "Fingerprinting candidate");

            let hash = match self.hasher.compute_hash(&path) {
                Ok(hash) => hash,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable candidate");
                    continue;
                }
            };

            let version = self.registry.get_version_from_hash(&hash, game_type);
            if version != UNKNOWN_VERSION {
                return Some(VersionProbe {
                    version,
                    executable_path: path,
                });
            }
            if fallback.is_none() && !self.is_publisher_binary(&name) {
                fallback = Some(path);
            }
        }

        let path = fallback?;
        let raw = self.version_reader.read_file_version(&path).unwrap_or_default();
        let version = normalize_file_version(&raw, game_type);
        debug!(
            path = %path.display(),
            raw = %raw,
            version = %version,
            "No fingerprint match, using file version"
        );
        Some(VersionProbe {
            version,
            executable_path: path,
        })
    }

    fn is_publisher_binary(&self, file_name: &str) -> bool {
        self.publishers.iter().any(|publisher| {
            publisher
                .executable_names()
                .iter()
                .any(|name| name.eq_ignore_ascii_case(file_name))
        })
    }

    fn probe_publishers(&self, dir: &Path, installation: &GameInstallation) -> Vec<GameClient> {
        let mut clients = Vec::new();

        for publisher in &self.publishers {
            if !publisher.can_identify(dir) {
                continue;
            }
            for found in publisher.identify(dir) {
                let local_version = found
                    .local_version
                    .as_deref()
                    .map(|raw| normalize_file_version(raw, found.game_type));
                let version = if publisher.is_self_updating() {
                    local_version.unwrap_or_else(|| AUTO_UPDATED_VERSION.to_string())
                } else {
                    self.publisher_version(&found.executable_path, found.game_type)
                        .or(local_version)
                        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
                };

                let mut client = GameClient::new(
                    found.display_name,
                    found.executable_path,
                    found.game_type,
                    version,
                    ClientSource::Publisher,
                );
                client.publisher_type = Some(found.publisher_id);
                client.installation_id = Some(installation.id.clone());
                client.install_channel = installation.channel;

                let id = client_manifest_id(&client);
                if self.known_ids.contains(&id) {
                    debug!(id = %id, "Publisher client already in manifest pool");
                    continue;
                }
                info!(
                    publisher = publisher.publisher_id(),
                    name = %client.name,
                    version = %client.version,
                    "Identified publisher client"
                );
                clients.push(client);
            }
        }
        clients
    }

    fn publisher_version(&self, path: &Path, game_type: GameType) -> Option<String> {
        match self.hasher.compute_hash(path) {
            Ok(hash) => self
                .registry
                .try_get_info(&hash)
                .filter(|record| record.game_type == game_type)
                .map(|record| record.version),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not fingerprint publisher executable");
                None
            }
        }
    }

    /// Breadth-first walk from `root`.
    fn walk(&self, root: &Path, cancel: &CancellationToken) -> Walk {
        let mut clients = Vec::new();
        let mut truncated = false;
        let mut queue = VecDeque::from([(root.to_path_buf(), 0u32)]);

        while let Some((dir, depth)) = queue.pop_front() {
            let mut entries: Vec<fs::DirEntry> = match fs::read_dir(&dir) {
                Ok(entries) => entries.filter_map(Result::ok).collect(),
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                    continue;
                }
            };
            entries.sort_by_key(fs::DirEntry::file_name);

            for entry in entries {
                if cancel.is_cancelled() {
                    info!(found = clients.len(), "Directory scan cancelled");
                    return Walk {
                        clients,
                        cancelled: true,
                        truncated,
                    };
                }
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                let name = entry.file_name().to_string_lossy().into_owned();

                if file_type.is_dir() {
                    if self.options.is_excluded(&name) {
                        debug!(dir = %entry.path().display(), "Skipping excluded directory");
                    } else if self.options.max_depth.is_some_and(|max| depth >= max) {
                        debug!(dir = %entry.path().display(), depth, "Directory below depth limit not scanned");
                        truncated = true;
                    } else {
                        queue.push_back((entry.path(), depth + 1));
                    }
                } else if file_type.is_file() && self.registry.is_candidate_name(&name) {
                    if let Some(client) = self.identify_file(&entry.path(), &name) {
                        clients.push(client);
                    }
                }
            }
        }
        Walk {
            clients,
            cancelled: cancel.is_cancelled(),
            truncated,
        }
    }

    fn identify_file(&self, path: &Path, file_name: &str) -> Option<GameClient> {
        let hash = match self.hasher.compute_hash(path) {
            Ok(hash) => hash,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable executable");
                return None;
            }
        };

        let Some(record) = self.registry.try_get_info(&hash) else {
            debug!(path = %path.display(), "Unrecognized executable");
            return Some(GameClient::new(
                file_name,
                path.to_path_buf(),
                GameType::Unknown,
                UNKNOWN_VERSION,
                ClientSource::DirectoryScan,
            ));
        };

        let mut client = GameClient::new(
            format!("{} {}", record.game_type.display_name(), record.version),
            path.to_path_buf(),
            record.game_type,
            record.version,
            ClientSource::DirectoryScan,
        );
        if record.publisher != OFFICIAL_PUBLISHER {
            client.publisher_type = Some(record.publisher);
        }
        info!(name = %client.name, path = %path.display(), "Identified client");
        Some(client)
    }
}

/// Find `name` in `dir`, ignoring filename case.
///
/// The returned path carries the on-disk spelling. An exact match wins over
/// other spellings on case-sensitive filesystems.
fn resolve_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let mut matches: Vec<fs::DirEntry> = fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_name().to_string_lossy().eq_ignore_ascii_case(name)
                && entry.file_type().is_ok_and(|t| t.is_file())
        })
        .collect();
    matches.sort_by_key(fs::DirEntry::file_name);

    let index = matches
        .iter()
        .position(|entry| entry.file_name() == name)
        .unwrap_or(0);
    (index < matches.len()).then(|| matches.swap_remove(index).path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HashRecord, InstallChannel};
    use crate::ports::{
        HashError, InMemoryManifestPool, MockContentHasher, PublisherIdentification,
    };
    use tempfile::TempDir;

    const ZH_HASH: &str = "5c3c4a9c0e1b2d7f";

    fn registry_with_zh() -> Arc<HashRegistry> {
        let registry = HashRegistry::with_default_executables();
        registry.try_add_hash(
            ZH_HASH,
            HashRecord::new(ZH_HASH, GameType::ZeroHour, "1.04", OFFICIAL_PUBLISHER, true),
        );
        Arc::new(registry)
    }

    fn constant_hasher(hash: &'static str) -> Arc<MockContentHasher> {
        let mut hasher = MockContentHasher::new();
        hasher
            .expect_compute_hash()
            .returning(move |_| Ok(hash.to_string()));
        Arc::new(hasher)
    }

    fn detector(registry: Arc<HashRegistry>, hasher: Arc<MockContentHasher>) -> ClientDetector {
        ClientDetector::new(registry, hasher, Arc::new(InMemoryManifestPool::new()))
    }

    fn zh_installation(dir: &Path) -> GameInstallation {
        let mut installation = GameInstallation::new("steam", InstallChannel::Steam);
        installation.zero_hour_path = Some(dir.to_path_buf());
        installation
    }

    struct FixedVersion(&'static str);

    impl FileVersionReader for FixedVersion {
        fn read_file_version(&self, _path: &Path) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    struct FakePublisher {
        self_updating: bool,
        local_version: Option<&'static str>,
    }

    impl PublisherIdentifier for FakePublisher {
        fn publisher_id(&self) -> &str {
            "communityclient"
        }

        fn executable_names(&self) -> &[&'static str] {
            &["community.exe"]
        }

        fn is_self_updating(&self) -> bool {
            self.self_updating
        }

        fn can_identify(&self, dir: &Path) -> bool {
            dir.join("community.exe").is_file()
        }

        fn identify(&self, dir: &Path) -> Vec<PublisherIdentification> {
            vec![PublisherIdentification {
                publisher_id: "communityclient".to_string(),
                display_name: "Community Client".to_string(),
                game_type: GameType::ZeroHour,
                local_version: self.local_version.map(String::from),
                executable_path: dir.join("community.exe"),
            }]
        }
    }

    #[test]
    fn test_scan_state_transitions() {
        let mut scan = InstallationScan::new("steam");
        assert!(scan.advance(ScanState::PublisherProbed).is_err());
        scan.advance(ScanState::VersionProbed).unwrap();
        scan.advance(ScanState::PublisherProbed).unwrap();
        scan.advance(ScanState::Registered).unwrap();
        assert!(matches!(
            scan.advance(ScanState::Registered),
            Err(DetectionError::InvalidTransition {
                from: ScanState::Registered,
                ..
            })
        ));
    }

    #[test]
    fn test_scan_options_merge_settings() {
        let settings = Settings {
            extra_excluded_dirs: Some(vec!["Backups".to_string(), "target".to_string()]),
            max_scan_depth: Some(3),
            ..Settings::default()
        };
        let options = ScanOptions::from_settings(&settings);

        assert_eq!(options.max_depth, Some(3));
        assert_eq!(ScanOptions::default().max_depth, None);
        assert_eq!(options.excluded_dirs.len(), DEFAULT_EXCLUDED_DIRS.len() + 1);
        assert!(options.is_excluded("BACKUPS"));
        assert!(options.is_excluded("Node_Modules"));
    }

    #[tokio::test]
    async fn test_fingerprint_match_sets_version_and_actual_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Game.DAT"), b"zh").unwrap();

        let outcome = detector(registry_with_zh(), constant_hasher(ZH_HASH))
            .detect_from_installations(&[zh_installation(dir.path())])
            .await;

        assert_eq!(outcome.clients.len(), 1);
        let client = &outcome.clients[0];
        assert_eq!(client.version, "1.04");
        assert_eq!(client.game_type, GameType::ZeroHour);
        assert_eq!(client.executable_path, dir.path().join("Game.DAT"));
        assert_eq!(client.install_channel, InstallChannel::Steam);
        assert_eq!(outcome.scans[0].state(), ScanState::PublisherProbed);
    }

    #[test]
    fn test_resolve_file_returns_on_disk_spelling() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Generals.EXE"), b"gen").unwrap();

        let resolved = resolve_file(dir.path(), "generals.exe").unwrap();

        assert_eq!(resolved.file_name().unwrap(), "Generals.EXE");
        assert!(resolve_file(dir.path(), "game.dat").is_none());
    }

    #[tokio::test]
    async fn test_fingerprint_for_other_game_falls_back_to_metadata() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("generals.exe"), b"gen").unwrap();
        let mut installation = GameInstallation::new("retail", InstallChannel::Retail);
        installation.generals_path = Some(dir.path().to_path_buf());

        let outcome = detector(registry_with_zh(), constant_hasher(ZH_HASH))
            .with_version_reader(Arc::new(FixedVersion("1.0.0.0")))
            .detect_from_installations(&[installation])
            .await;

        assert_eq!(outcome.clients.len(), 1);
        assert_eq!(outcome.clients[0].version, "1.08");
    }

    #[tokio::test]
    async fn test_metadata_fallback_collapses_version() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("generals.exe"), b"zh").unwrap();

        let outcome = detector(registry_with_zh(), constant_hasher("ffff"))
            .with_version_reader(Arc::new(FixedVersion("1.0.4.0 (retail)")))
            .detect_from_installations(&[zh_installation(dir.path())])
            .await;

        assert_eq!(outcome.clients[0].version, "1.04");
    }

    #[tokio::test]
    async fn test_no_candidates_produce_no_client() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"hello").unwrap();

        let outcome = detector(registry_with_zh(), constant_hasher(ZH_HASH))
            .detect_from_installations(&[zh_installation(dir.path())])
            .await;

        assert!(outcome.clients.is_empty());
        assert_eq!(outcome.scans.len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_candidates_are_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("game.dat"), b"zh").unwrap();

        let mut hasher = MockContentHasher::new();
        hasher
            .expect_compute_hash()
            .returning(|path| Err(HashError::Io(path.display().to_string())));

        let outcome = detector(registry_with_zh(), Arc::new(hasher))
            .detect_from_installations(&[zh_installation(dir.path())])
            .await;

        assert!(outcome.clients.is_empty());
    }

    #[tokio::test]
    async fn test_self_updating_publisher_skips_fingerprint() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("community.exe"), b"client").unwrap();

        let mut hasher = MockContentHasher::new();
        hasher.expect_compute_hash().never();

        let outcome = ClientDetector::new(
            Arc::new(HashRegistry::new()),
            Arc::new(hasher),
            Arc::new(InMemoryManifestPool::new()),
        )
        .with_publisher(Arc::new(FakePublisher {
            self_updating: true,
            local_version: None,
        }))
        .detect_from_installations(&[zh_installation(dir.path())])
        .await;

        assert_eq!(outcome.clients.len(), 1);
        let client = &outcome.clients[0];
        assert_eq!(client.version, AUTO_UPDATED_VERSION);
        assert_eq!(client.publisher_type.as_deref(), Some("communityclient"));
        assert!(client.needs_acquisition());
    }

    #[tokio::test]
    async fn test_fingerprinted_publisher_uses_registry_version() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("community.exe"), b"client").unwrap();

        let outcome = ClientDetector::new(
            registry_with_zh(),
            constant_hasher(ZH_HASH),
            Arc::new(InMemoryManifestPool::new()),
        )
        .with_publisher(Arc::new(FakePublisher {
            self_updating: false,
            local_version: None,
        }))
        .detect_from_installations(&[zh_installation(dir.path())])
        .await;

        let publisher_client = outcome
            .clients
            .iter()
            .find(|c| c.source_type == ClientSource::Publisher)
            .unwrap();
        assert_eq!(publisher_client.version, "1.04");
    }

    #[tokio::test]
    async fn test_publisher_local_version_is_normalized() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("community.exe"), b"client").unwrap();

        let outcome = ClientDetector::new(
            Arc::new(HashRegistry::new()),
            constant_hasher("ffff"),
            Arc::new(InMemoryManifestPool::new()),
        )
        .with_publisher(Arc::new(FakePublisher {
            self_updating: true,
            local_version: Some("1.0.4.0"),
        }))
        .detect_from_installations(&[zh_installation(dir.path())])
        .await;

        let publisher_client = outcome
            .clients
            .iter()
            .find(|c| c.source_type == ClientSource::Publisher)
            .unwrap();
        assert_eq!(publisher_client.version, "1.04");
    }

    #[tokio::test]
    async fn test_recursive_scan_respects_exclusions() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("games").join("zh");
        let excluded = root.path().join("Node_Modules");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::create_dir_all(&excluded).unwrap();
        std::fs::write(nested.join("game.dat"), b"zh").unwrap();
        std::fs::write(excluded.join("game.dat"), b"zh").unwrap();

        let outcome = detector(registry_with_zh(), constant_hasher(ZH_HASH))
            .scan_directory(root.path())
            .await
            .unwrap();

        assert!(!outcome.cancelled);
        assert!(!outcome.truncated);
        assert_eq!(outcome.clients.len(), 1);
        assert_eq!(outcome.clients[0].executable_path, nested.join("game.dat"));
        assert_eq!(outcome.clients[0].source_type, ClientSource::DirectoryScan);
    }

    #[tokio::test]
    async fn test_recursive_scan_reports_unknown_executables() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("generals.exe"), b"??").unwrap();

        let outcome = detector(registry_with_zh(), constant_hasher("0000"))
            .scan_directory(root.path())
            .await
            .unwrap();

        assert_eq!(outcome.clients.len(), 1);
        assert!(outcome.clients[0].is_unknown());
    }

    #[tokio::test]
    async fn test_scan_missing_directory() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope");

        let result = detector(registry_with_zh(), constant_hasher(ZH_HASH))
            .scan_directory(&missing)
            .await;

        assert!(matches!(result, Err(DetectionError::DirectoryNotFound(p)) if p == missing));
    }

    #[tokio::test]
    async fn test_cancelled_scan_stops_early() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("game.dat"), b"zh").unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = detector(registry_with_zh(), constant_hasher(ZH_HASH))
            .scan_directory_with_cancel(root.path(), cancel)
            .await
            .unwrap();

        assert!(outcome.cancelled);
        assert!(outcome.clients.is_empty());
    }

    #[tokio::test]
    async fn test_registrar_attaches_ids_and_finishes_scan() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("game.dat"), b"zh").unwrap();
        let pool = Arc::new(InMemoryManifestPool::new());

        let outcome = ClientDetector::new(registry_with_zh(), constant_hasher(ZH_HASH), pool.clone())
            .with_registrar(Arc::new(ClientRegistrar::new(pool.clone())))
            .detect_from_installations(&[zh_installation(dir.path())])
            .await;

        assert!(outcome.clients[0].is_registered());
        assert_eq!(outcome.scans[0].state(), ScanState::Registered);
        // Installation manifest plus client manifest.
        assert_eq!(pool.get_all_manifests().await.unwrap().len(), 2);
    }
}
