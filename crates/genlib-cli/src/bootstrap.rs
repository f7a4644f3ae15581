//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Database pool and repositories (via genlib-db)
//! - Hasher, version reader and publisher identifiers (via genlib-fs)
//! - Fingerprint registry, registrar and detector (via genlib-core)
//!
//! Command handlers receive the composed `CliContext`.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use genlib_core::{
    ClientDetector, ClientRegistrar, ContentFilter, ContentSession, HashRegistry, Repos,
    ScanOptions, Settings, bundled_records, database_path,
};
use genlib_db::{CoreFactory, setup_database};
use genlib_fs::{PeVersionReader, Sha256Hasher, default_identifiers};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Profile named on the command line; overrides the settings value.
    pub profile: Option<String>,
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Persistence ports.
    pub repos: Repos,
    /// Fingerprints: built-in candidates plus everything stored.
    pub registry: Arc<HashRegistry>,
    /// Shared registrar so concurrent registrations stay serialized.
    pub registrar: Arc<ClientRegistrar>,
    /// Settings as loaded at startup.
    pub settings: Settings,
    /// Profile whose enabled set commands operate on.
    pub profile: String,
}

impl CliContext {
    /// Detector wired with the filesystem adapters and current settings.
    ///
    /// With `register`, identified clients are added to the manifest pool.
    pub fn detector(&self, register: bool) -> ClientDetector {
        let mut detector = ClientDetector::new(
            Arc::clone(&self.registry),
            Arc::new(Sha256Hasher),
            self.repos.manifests.clone(),
        )
        .with_version_reader(Arc::new(PeVersionReader))
        .with_scan_options(ScanOptions::from_settings(&self.settings));

        for identifier in default_identifiers() {
            detector = detector.with_publisher(identifier);
        }
        if register {
            detector = detector.with_registrar(Arc::clone(&self.registrar));
        }
        detector
    }

    /// Content session restored from the active profile.
    ///
    /// Ids that are no longer in the pool are dropped and reported.
    pub async fn session(&self) -> Result<ContentSession> {
        let mut session = ContentSession::new(self.repos.manifests.clone());
        let enabled = self.repos.profiles.load_enabled(&self.profile).await?;
        let missing = session.load_enabled(&enabled).await?;
        if !missing.is_empty() {
            println!(
                "Warning: {} enabled item(s) no longer exist and were dropped:",
                missing.len()
            );
            for id in &missing {
                println!("  {id}");
            }
        }

        if let Some(game) = self.settings.default_filter_game {
            session
                .set_filter(ContentFilter {
                    target_game: Some(game),
                    ..ContentFilter::default()
                })
                .await?;
        }
        Ok(session)
    }

    /// Persist a session's enabled set to the active profile.
    pub async fn save_session(&self, session: &ContentSession) -> Result<()> {
        self.repos
            .profiles
            .save_enabled(&self.profile, &session.enabled_ids())
            .await?;
        Ok(())
    }
}

/// Bootstrap the CLI application.
///
/// Opens (or creates) the database at the resolved data path and composes
/// the context on top of it.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let db_path = database_path()?;
    debug!(path = %db_path.display(), "Opening database");
    let pool = setup_database(&db_path).await?;
    bootstrap_with(CoreFactory::build_repos(pool), config).await
}

/// Bootstrap with custom repos (for testing).
pub async fn bootstrap_with(repos: Repos, config: CliConfig) -> Result<CliContext> {
    let settings = repos.settings.load().await?;

    let registry = Arc::new(HashRegistry::with_default_executables());
    for name in settings.extra_executable_names.iter().flatten() {
        registry.add_possible_executable_name(name);
    }
    let bundled = registry.seed(bundled_records()?);
    let stored = registry.seed(repos.hashes.list().await?);
    debug!(bundled, stored, "Seeded fingerprint registry");

    let profile = config
        .profile
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| settings.effective_profile().to_string());

    Ok(CliContext {
        registrar: Arc::new(ClientRegistrar::new(repos.manifests.clone())),
        repos,
        registry,
        settings,
        profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use genlib_core::{DEFAULT_PROFILE, GameType, HashRecord, OFFICIAL_PUBLISHER};
    use genlib_db::TestDb;

    #[tokio::test]
    async fn test_bootstrap_seeds_registry_from_store() {
        let db = TestDb::new().await.unwrap();
        let repos = db.repos();
        repos
            .hashes
            .insert(&HashRecord::new("beef", GameType::ZeroHour, "1.04", OFFICIAL_PUBLISHER, true))
            .await
            .unwrap();
        repos
            .settings
            .save(&Settings {
                extra_executable_names: Some(vec!["zh_custom.exe".to_string()]),
                ..Settings::with_defaults()
            })
            .await
            .unwrap();

        let ctx = bootstrap_with(repos, CliConfig::default()).await.unwrap();

        assert_eq!(ctx.registry.len(), bundled_records().unwrap().len() + 1);
        assert!(ctx.registry.is_candidate_name("ZH_CUSTOM.EXE"));
        assert_eq!(ctx.profile, DEFAULT_PROFILE);
    }

    #[tokio::test]
    async fn test_profile_override() {
        let db = TestDb::new().await.unwrap();
        let config = CliConfig {
            profile: Some("lan".to_string()),
        };

        let ctx = bootstrap_with(db.repos(), config).await.unwrap();
        assert_eq!(ctx.profile, "lan");
    }
}
