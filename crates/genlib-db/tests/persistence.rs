//! End-to-end persistence: detection results registered into a file-backed
//! pool survive reopening the database and drive a content session.

use std::sync::Arc;

use genlib_core::{
    ClientRegistrar, ContentDependency, ContentManifest, ContentSession, ContentType,
    DEFAULT_PROFILE, GameInstallation, GameType, HashRecord, HashRecordStore, HashRegistry,
    InstallChannel, ManifestId, ManifestPool, OFFICIAL_PUBLISHER, ProfileRepository, Settings,
    SettingsRepository,
};
use genlib_db::{CoreFactory, setup_database};

fn steam_installation(dir: &std::path::Path) -> GameInstallation {
    let mut installation = GameInstallation::new("steam", InstallChannel::Steam);
    installation.zero_hour_path = Some(dir.join("zh"));
    installation
}

#[tokio::test]
async fn test_registered_installation_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("genlib.db");

    let ids = {
        let pool = setup_database(&db_path).await.unwrap();
        let repos = CoreFactory::build_repos(pool.clone());
        let registrar = ClientRegistrar::new(repos.manifests.clone());
        let ids = registrar
            .register_installation(&steam_installation(dir.path()))
            .await;
        repos.profiles.save_enabled(DEFAULT_PROFILE, &ids).await.unwrap();
        pool.close().await;
        ids
    };

    let pool = setup_database(&db_path).await.unwrap();
    let repos = CoreFactory::build_repos(pool);

    let manifests = repos.manifests.get_all_manifests().await.unwrap();
    assert_eq!(manifests.len(), 1);
    assert_eq!(manifests[0].content_type, ContentType::Installation);

    let mut session = ContentSession::new(repos.manifests.clone());
    let missing = session
        .load_enabled(&repos.profiles.load_enabled(DEFAULT_PROFILE).await.unwrap())
        .await
        .unwrap();
    assert!(missing.is_empty());
    assert_eq!(session.enabled_ids(), ids);
}

#[tokio::test]
async fn test_enable_resolves_against_sqlite_pool() {
    let dir = tempfile::tempdir().unwrap();
    let pool = setup_database(&dir.path().join("genlib.db")).await.unwrap();
    let repos = CoreFactory::build_repos(pool);

    let registrar = ClientRegistrar::new(repos.manifests.clone());
    registrar
        .register_installation(&steam_installation(dir.path()))
        .await;

    let map_pack = ContentManifest::new(
        ManifestId::generate("community", ContentType::MapPack, "Tournament", None),
        "Tournament Maps",
        ContentType::MapPack,
        GameType::ZeroHour,
    )
    .with_dependency(ContentDependency::installation(vec![GameType::ZeroHour]));
    repos
        .manifests
        .add_manifest(&map_pack, dir.path())
        .await
        .unwrap();

    let mut session = ContentSession::new(repos.manifests.clone());
    let outcome = session.enable(&map_pack.id).await.unwrap();

    assert!(outcome.changed());
    assert_eq!(outcome.enabled_ids().len(), 2);
    assert!(outcome.violations.is_empty());
    assert_eq!(session.enabled().len(), 2);
    assert!(session.validate().is_empty());
}

#[tokio::test]
async fn test_seeded_registry_from_store() {
    let dir = tempfile::tempdir().unwrap();
    let pool = setup_database(&dir.path().join("genlib.db")).await.unwrap();
    let repos = CoreFactory::build_repos(pool);

    repos
        .hashes
        .insert(&HashRecord::new("00ff", GameType::Generals, "1.08", OFFICIAL_PUBLISHER, true))
        .await
        .unwrap();

    let registry = Arc::new(HashRegistry::with_default_executables());
    assert_eq!(registry.seed(repos.hashes.list().await.unwrap()), 1);
    assert_eq!(registry.get_version_from_hash("00FF", GameType::Generals), "1.08");

    let settings = Settings {
        max_scan_depth: Some(3),
        ..Settings::with_defaults()
    };
    repos.settings.save(&settings).await.unwrap();
    assert_eq!(repos.settings.load().await.unwrap(), settings);
}
