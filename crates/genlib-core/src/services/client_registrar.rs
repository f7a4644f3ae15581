//! Turns detected clients and installations into pool manifests.
//!
//! Ids are derived deterministically from what was detected, so scanning
//! the same installation twice reuses the manifests from the first run.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{
    ClientSource, ContentDependency, ContentManifest, ContentType, GameClient, GameInstallation,
    GameType, InstallChannel, ManifestId,
};
use crate::ports::ManifestPool;

/// Hex characters of the location digest kept in ids.
const LOCATION_KEY_LEN: usize = 8;

/// Short stable digest of an installation id or a directory.
///
/// Ids are sanitized to `[a-z0-9]`, so the raw value is hashed instead of
/// embedded; `retail-cd` and `retail_cd` stay distinct.
fn location_key(value: &str) -> String {
    let mut key = format!("{:x}", Sha256::digest(value.as_bytes()));
    key.truncate(LOCATION_KEY_LEN);
    key
}

/// Key of the directory a scanned client sits in.
///
/// The canonical path is used when the directory still exists, so the same
/// copy gets the same key however it was reached.
fn directory_key(dir: &Path) -> String {
    let canonical = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    location_key(&canonical.to_string_lossy())
}

/// Manifest id of the installation manifest for one game of an installation.
pub fn installation_manifest_id(
    channel: InstallChannel,
    installation_id: &str,
    game_type: GameType,
) -> ManifestId {
    ManifestId::generate(
        channel.slug(),
        ContentType::Installation,
        &format!("{}{}", game_type.slug(), location_key(installation_id)),
        None,
    )
}

/// Manifest id a client is registered under.
///
/// The content name carries a key of where the client lives: its
/// installation, or its directory for scanned clients. Publisher clients
/// update themselves, so their version is left out.
pub fn client_manifest_id(client: &GameClient) -> ManifestId {
    let location = match (&client.installation_id, client.source_type) {
        (Some(installation_id), _) => location_key(installation_id),
        (None, ClientSource::DirectoryScan) => directory_key(&client.working_directory),
        (None, _) => String::new(),
    };

    if client.source_type == ClientSource::Publisher {
        let publisher = client.publisher_type.as_deref().unwrap_or_default();
        return ManifestId::generate(
            publisher,
            ContentType::Client,
            &format!("{}{location}", client.name),
            None,
        );
    }

    let publisher = client
        .publisher_type
        .as_deref()
        .unwrap_or(client.install_channel.slug());
    ManifestId::generate(
        publisher,
        ContentType::Client,
        &format!("{}{location}", client.game_type.slug()),
        Some(&client.version),
    )
}

/// Client manifest for a detected client.
pub fn client_manifest(client: &GameClient) -> ContentManifest {
    let mut manifest = ContentManifest::new(
        client_manifest_id(client),
        client.name.clone(),
        ContentType::Client,
        client.game_type,
    )
    .with_dependency(ContentDependency::installation(vec![client.game_type]));

    manifest.version.clone_from(&client.version);
    manifest.publisher = Some(
        client
            .publisher_type
            .clone()
            .unwrap_or_else(|| client.install_channel.slug().to_string()),
    );
    if client.install_channel != InstallChannel::Unknown {
        manifest.install_channel = Some(client.install_channel);
    }
    if let Some(installation_id) = &client.installation_id {
        manifest.source_installation = Some(installation_manifest_id(
            client.install_channel,
            installation_id,
            client.game_type,
        ));
    }
    manifest
}

/// Installation manifest for one game of an installation.
pub fn installation_manifest(
    installation: &GameInstallation,
    game_type: GameType,
) -> ContentManifest {
    let mut manifest = ContentManifest::new(
        installation_manifest_id(installation.channel, &installation.id, game_type),
        format!("{} ({})", game_type.display_name(), installation.channel),
        ContentType::Installation,
        game_type,
    );
    manifest.publisher = Some(installation.channel.slug().to_string());
    manifest.install_channel = Some(installation.channel);
    manifest
}

/// Registers clients and installations with the manifest pool.
///
/// Registrations are serialized: lookup and insert of one manifest never
/// interleave with another registration.
pub struct ClientRegistrar {
    pool: Arc<dyn ManifestPool>,
    registration_lock: Mutex<()>,
}

impl ClientRegistrar {
    pub fn new(pool: Arc<dyn ManifestPool>) -> Self {
        Self {
            pool,
            registration_lock: Mutex::new(()),
        }
    }

    /// Register a client and return it with its manifest id attached.
    ///
    /// Already-registered clients are returned unchanged. Publisher clients
    /// are left for their acquisition pipeline and unidentified executables
    /// are never registered; both come back with an empty id.
    pub async fn register(&self, mut client: GameClient) -> GameClient {
        if client.is_registered() {
            return client;
        }
        if client.source_type == ClientSource::Publisher {
            debug!(
                name = %client.name,
                publisher = ?client.publisher_type,
                "Publisher client needs acquisition, not registering"
            );
            return client;
        }
        if client.is_unknown() {
            info!(
                path = %client.executable_path.display(),
                "Skipping registration of unidentified executable"
            );
            return client;
        }

        let manifest = client_manifest(&client);
        client.id = self.store(manifest, &client.working_directory).await;
        info!(id = %client.id, name = %client.name, "Registered client");
        client
    }

    /// Register one installation manifest per game the installation has.
    pub async fn register_installation(&self, installation: &GameInstallation) -> Vec<ManifestId> {
        let mut ids = Vec::new();
        for game_type in installation.game_types() {
            let Some(base_path) = installation.game_path(game_type) else {
                continue;
            };
            let manifest = installation_manifest(installation, game_type);
            ids.push(self.store(manifest, base_path).await);
        }
        ids
    }

    /// Add `manifest` unless a manifest with its id exists.
    ///
    /// Falls back to the locally generated id when the pool rejects the
    /// manifest or cannot be reached.
    async fn store(&self, manifest: ContentManifest, base_path: &Path) -> ManifestId {
        let _guard = self.registration_lock.lock().await;

        match self.pool.get_manifest(&manifest.id).await {
            Ok(Some(_)) => {
                debug!(id = %manifest.id, "Reusing existing manifest");
                return manifest.id;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(id = %manifest.id, error = %e, "Manifest lookup failed, using generated id");
                return manifest.id;
            }
        }

        match self.pool.add_manifest(&manifest, base_path).await {
            Ok(result) if result.success => result.assigned_id.unwrap_or(manifest.id),
            Ok(result) => {
                warn!(
                    id = %manifest.id,
                    errors = ?result.errors,
                    "Manifest pool rejected manifest, using generated id"
                );
                manifest.id
            }
            Err(e) => {
                warn!(id = %manifest.id, error = %e, "Failed to add manifest, using generated id");
                manifest.id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNKNOWN_VERSION;
    use crate::ports::{InMemoryManifestPool, ManifestAddResult, RepositoryError};
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct RejectingPool;

    #[async_trait]
    impl ManifestPool for RejectingPool {
        async fn add_manifest(
            &self,
            _manifest: &ContentManifest,
            _base_path: &Path,
        ) -> Result<ManifestAddResult, RepositoryError> {
            Ok(ManifestAddResult::rejected("read-only pool"))
        }

        async fn get_manifest(
            &self,
            _id: &ManifestId,
        ) -> Result<Option<ContentManifest>, RepositoryError> {
            Ok(None)
        }

        async fn get_all_manifests(&self) -> Result<Vec<ContentManifest>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn remove_manifest(&self, _id: &ManifestId) -> Result<bool, RepositoryError> {
            Ok(false)
        }
    }

    fn steam_zh_client() -> GameClient {
        let mut client = GameClient::new(
            "Zero Hour 1.04",
            PathBuf::from("/games/steam/zh/game.dat"),
            GameType::ZeroHour,
            "1.04",
            ClientSource::Installation,
        );
        client.install_channel = InstallChannel::Steam;
        client.installation_id = Some("steam".to_string());
        client
    }

    #[test]
    fn test_client_manifest_shape() {
        let manifest = client_manifest(&steam_zh_client());

        assert_eq!(
            manifest.id.as_str(),
            format!("1.104.steam.gameclient.zerohour{}", location_key("steam"))
        );
        assert_eq!(manifest.content_type, ContentType::Client);
        assert_eq!(
            manifest.source_installation,
            Some(installation_manifest_id(InstallChannel::Steam, "steam", GameType::ZeroHour))
        );
        assert_eq!(manifest.dependencies.len(), 1);
        assert_eq!(manifest.dependencies[0].dependency_type, ContentType::Installation);
        assert_eq!(manifest.dependencies[0].compatible_game_types, vec![GameType::ZeroHour]);
    }

    #[tokio::test]
    async fn test_register_twice_reuses_manifest() {
        let pool = Arc::new(InMemoryManifestPool::new());
        let registrar = ClientRegistrar::new(pool.clone());

        let first = registrar.register(steam_zh_client()).await;
        let second = registrar.register(steam_zh_client()).await;

        assert!(first.is_registered());
        assert_eq!(first.id, second.id);
        assert_eq!(pool.get_all_manifests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_registrations_create_one_manifest() {
        let pool = Arc::new(InMemoryManifestPool::new());
        let registrar = ClientRegistrar::new(pool.clone());

        let (a, b) = tokio::join!(
            registrar.register(steam_zh_client()),
            registrar.register(steam_zh_client())
        );

        assert_eq!(a.id, b.id);
        assert_eq!(pool.get_all_manifests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_registration_keeps_generated_id() {
        let registrar = ClientRegistrar::new(Arc::new(RejectingPool));
        let client = registrar.register(steam_zh_client()).await;

        assert_eq!(client.id, client_manifest_id(&steam_zh_client()));
    }

    #[tokio::test]
    async fn test_publisher_and_unknown_clients_are_not_registered() {
        let pool = Arc::new(InMemoryManifestPool::new());
        let registrar = ClientRegistrar::new(pool.clone());

        let mut publisher = GameClient::new(
            "GeneralsOnline 60Hz",
            PathBuf::from("/games/zh/generalsonlinezh_60.exe"),
            GameType::ZeroHour,
            "Auto-Updated",
            ClientSource::Publisher,
        );
        publisher.publisher_type = Some("generalsonline".to_string());
        let unknown = GameClient::new(
            "game.dat",
            PathBuf::from("/downloads/game.dat"),
            GameType::Unknown,
            UNKNOWN_VERSION,
            ClientSource::DirectoryScan,
        );

        assert!(registrar.register(publisher).await.needs_acquisition());
        assert!(!registrar.register(unknown).await.is_registered());
        assert!(pool.get_all_manifests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_installation_per_game() {
        let pool = Arc::new(InMemoryManifestPool::new());
        let registrar = ClientRegistrar::new(pool.clone());

        let mut installation = GameInstallation::new("tfd", InstallChannel::TheFirstDecade);
        installation.generals_path = Some(PathBuf::from("/games/tfd/generals"));
        installation.zero_hour_path = Some(PathBuf::from("/games/tfd/zh"));

        let ids = registrar.register_installation(&installation).await;

        assert_eq!(ids.len(), 2);
        assert_eq!(
            ids[1],
            installation_manifest_id(InstallChannel::TheFirstDecade, "tfd", GameType::ZeroHour)
        );
        let stored = pool.get_manifest(&ids[0]).await.unwrap().unwrap();
        assert_eq!(stored.content_type, ContentType::Installation);
        assert_eq!(stored.target_game, GameType::Generals);
    }

    #[tokio::test]
    async fn test_installations_on_same_channel_get_distinct_ids() {
        let pool = Arc::new(InMemoryManifestPool::new());
        let registrar = ClientRegistrar::new(pool.clone());

        let mut registered = Vec::new();
        for (id, path) in [("retail-cd", "/games/cd/zh"), ("retail-backup", "/backup/zh")] {
            let mut installation = GameInstallation::new(id, InstallChannel::Retail);
            installation.zero_hour_path = Some(PathBuf::from(path));
            let installation_ids = registrar.register_installation(&installation).await;

            let mut client = GameClient::new(
                "Zero Hour 1.04",
                PathBuf::from(path).join("game.dat"),
                GameType::ZeroHour,
                "1.04",
                ClientSource::Installation,
            );
            client.install_channel = InstallChannel::Retail;
            client.installation_id = Some(id.to_string());
            let client = registrar.register(client).await;

            let stored = pool.get_manifest(&client.id).await.unwrap().unwrap();
            assert_eq!(stored.source_installation.as_ref(), installation_ids.first());
            registered.push((installation_ids[0].clone(), client.id));
        }

        assert_ne!(registered[0].0, registered[1].0);
        assert_ne!(registered[0].1, registered[1].1);
        assert_eq!(pool.get_all_manifests().await.unwrap().len(), 4);
    }

    #[test]
    fn test_installation_ids_differing_in_punctuation_stay_apart() {
        assert_ne!(
            installation_manifest_id(InstallChannel::Retail, "retail-cd", GameType::ZeroHour),
            installation_manifest_id(InstallChannel::Retail, "retail_cd", GameType::ZeroHour)
        );
    }

    #[tokio::test]
    async fn test_scanned_copies_with_same_directory_name_get_distinct_ids() {
        let root = tempfile::TempDir::new().unwrap();
        let pool = Arc::new(InMemoryManifestPool::new());
        let registrar = ClientRegistrar::new(pool.clone());

        let mut ids = Vec::new();
        for drive in ["x", "y"] {
            let dir = root.path().join(drive).join("Zero Hour");
            std::fs::create_dir_all(&dir).unwrap();
            let client = GameClient::new(
                "Zero Hour 1.04",
                dir.join("game.dat"),
                GameType::ZeroHour,
                "1.04",
                ClientSource::DirectoryScan,
            );
            ids.push(registrar.register(client).await.id);
        }

        assert_ne!(ids[0], ids[1]);
        assert_eq!(pool.get_all_manifests().await.unwrap().len(), 2);
    }
}
