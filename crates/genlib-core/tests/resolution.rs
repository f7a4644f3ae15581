//! Integration tests for content enablement against an in-memory pool.

use std::sync::Arc;

use genlib_core::{
    ContentDependency, ContentFilter, ContentManifest, ContentSession, ContentType, GameType,
    InMemoryManifestPool, InstallChannel, ManifestId, ResolutionAction, ViolationKind,
};

fn installation(game: GameType, channel: InstallChannel) -> ContentManifest {
    let mut manifest = ContentManifest::new(
        ManifestId::generate(channel.slug(), ContentType::Installation, game.slug(), None),
        format!("{game} ({channel})"),
        ContentType::Installation,
        game,
    );
    manifest.install_channel = Some(channel);
    manifest
}

fn item(name: &str, ty: ContentType, game: GameType) -> ContentManifest {
    ContentManifest::new(
        ManifestId::generate("community", ty, name, Some("1.0")),
        name,
        ty,
        game,
    )
}

async fn session_with(manifests: Vec<ContentManifest>) -> ContentSession {
    let mut session = ContentSession::new(Arc::new(InMemoryManifestPool::with_manifests(manifests)));
    session.refresh_discovery().await.unwrap();
    session
}

#[tokio::test]
async fn test_two_installations_leave_exactly_one_enabled() {
    let generals = installation(GameType::Generals, InstallChannel::Steam);
    let zero_hour = installation(GameType::ZeroHour, InstallChannel::Steam);
    let mut session = session_with(vec![generals.clone(), zero_hour.clone()]).await;

    session.enable(&generals.id).await.unwrap();
    session.enable(&zero_hour.id).await.unwrap();

    let installations: Vec<_> = session
        .enabled()
        .iter()
        .filter(|m| m.content_type == ContentType::Installation)
        .collect();
    assert_eq!(installations.len(), 1);
    assert_eq!(installations[0].id, zero_hour.id);
    assert!(session.discovery().iter().any(|m| m.id == generals.id));
}

#[tokio::test]
async fn test_mod_switches_to_compatible_installation() {
    let generals = installation(GameType::Generals, InstallChannel::Retail);
    let zero_hour = installation(GameType::ZeroHour, InstallChannel::Retail);
    let rise_of_the_reds = item("Rise of the Reds", ContentType::Mod, GameType::ZeroHour)
        .with_dependency(ContentDependency::installation(vec![GameType::ZeroHour]));
    let mut session =
        session_with(vec![generals.clone(), zero_hour.clone(), rise_of_the_reds.clone()]).await;

    session.enable(&generals.id).await.unwrap();
    let outcome = session.enable(&rise_of_the_reds.id).await.unwrap();

    assert!(outcome.violations.is_empty());
    assert!(session.is_enabled(&zero_hour.id));
    assert!(outcome.actions.contains(&ResolutionAction::Replaced {
        id: generals.id.clone(),
        replaced_by: zero_hour.id.clone(),
    }));
}

#[tokio::test]
async fn test_mod_without_compatible_installation_reports_violation() {
    let generals = installation(GameType::Generals, InstallChannel::Retail);
    let rise_of_the_reds = item("Rise of the Reds", ContentType::Mod, GameType::ZeroHour)
        .with_dependency(ContentDependency::installation(vec![GameType::ZeroHour]));
    let mut session = session_with(vec![generals.clone(), rise_of_the_reds.clone()]).await;

    session.enable(&generals.id).await.unwrap();
    let outcome = session.enable(&rise_of_the_reds.id).await.unwrap();

    // Installations are validated by presence only: the Generals
    // installation counts, but nothing compatible was pulled in.
    assert!(session.is_enabled(&generals.id));
    assert!(outcome.violations.is_empty());
    assert_eq!(outcome.notes.len(), 1);
}

#[tokio::test]
async fn test_mutual_conflict_yields_one_violation() {
    let mut first = item("Contra", ContentType::Mod, GameType::ZeroHour);
    let mut second = item("ShockWave", ContentType::Mod, GameType::ZeroHour);
    let conflict_with = |id: &ManifestId| ContentDependency {
        is_optional: true,
        conflicts_with: vec![id.clone()],
        ..ContentDependency::installation(vec![GameType::ZeroHour])
    };
    first.dependencies.push(conflict_with(&second.id));
    second.dependencies.push(conflict_with(&first.id));
    let mut session = session_with(vec![first.clone(), second.clone()]).await;

    session.enable(&first.id).await.unwrap();
    session.enable(&second.id).await.unwrap();

    let violations = session.validate();
    assert_eq!(violations.len(), 1);
    assert!(matches!(violations[0].kind, ViolationKind::Conflict { .. }));
}

#[tokio::test]
async fn test_mutual_requirements_terminate() {
    let mut first = item("Map Pack A", ContentType::MapPack, GameType::ZeroHour);
    let mut second = item("Map Pack B", ContentType::MapPack, GameType::ZeroHour);
    first
        .dependencies
        .push(ContentDependency::on(second.id.clone(), "Map Pack B", ContentType::MapPack));
    second
        .dependencies
        .push(ContentDependency::on(first.id.clone(), "Map Pack A", ContentType::MapPack));
    let mut session = session_with(vec![first.clone(), second.clone()]).await;

    let outcome = session.enable(&first.id).await.unwrap();

    assert_eq!(outcome.enabled_ids().len(), 2);
    assert!(outcome.violations.is_empty());
}

#[tokio::test]
async fn test_any_dependency_pulls_first_matching_item() {
    let generals_patch = item("Generals Patch", ContentType::Patch, GameType::Generals);
    let zh_patch = item("ZH Patch", ContentType::Patch, GameType::ZeroHour);
    let mut needs_patch = ContentDependency::installation(vec![GameType::ZeroHour]);
    needs_patch.dependency_type = ContentType::Patch;
    needs_patch.name = "Any patch".to_string();
    let tool = item("Replay Tool", ContentType::Tool, GameType::ZeroHour).with_dependency(needs_patch);
    let mut session =
        session_with(vec![generals_patch.clone(), zh_patch.clone(), tool.clone()]).await;

    let outcome = session.enable(&tool.id).await.unwrap();

    assert!(session.is_enabled(&zh_patch.id));
    assert!(!session.is_enabled(&generals_patch.id));
    assert!(outcome.violations.is_empty());
}

#[tokio::test]
async fn test_filter_limits_discovery() {
    let map = item("Tournament Island", ContentType::Map, GameType::ZeroHour);
    let mission = item("Operation Firestorm", ContentType::Mission, GameType::Generals);
    let mut session = session_with(vec![map.clone(), mission.clone()]).await;
    assert_eq!(session.discovery().len(), 2);

    session
        .set_filter(ContentFilter {
            search: Some("island".to_string()),
            ..ContentFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(session.discovery().len(), 1);

    session.enable(&map.id).await.unwrap();
    assert!(session.discovery().is_empty());

    let outcome = session.disable(&map.id).await.unwrap();
    assert!(outcome.returned_to_discovery);
    assert_eq!(session.discovery()[0].id, map.id);
}
