//! Installation command handler.

use std::path::Path;

use anyhow::Result;

use genlib_core::{CoreError, GameInstallation, InstallChannel, normalize_user_path};

use crate::bootstrap::CliContext;
use crate::commands::InstallationCommand;
use crate::error::CliError;
use crate::presentation::print_separator;

pub async fn execute(ctx: &CliContext, command: InstallationCommand) -> Result<()> {
    match command {
        InstallationCommand::Add {
            id,
            channel,
            generals,
            zero_hour,
        } => add(ctx, id, channel, generals, zero_hour).await,
        InstallationCommand::List => list(ctx).await,
        InstallationCommand::Remove { id } => {
            ctx.repos
                .installations
                .delete(&id)
                .await
                .map_err(|e| CliError::from(CoreError::Repository(e)))?;
            println!("✓ Removed installation '{id}'");
            Ok(())
        }
    }
}

/// Build an installation from CLI input.
///
/// At least one game directory is required; directories that do not exist
/// are accepted but reported.
pub fn build_installation(
    id: String,
    channel: InstallChannel,
    generals: Option<&str>,
    zero_hour: Option<&str>,
) -> Result<GameInstallation, CliError> {
    if id.trim().is_empty() {
        return Err(CliError::Arguments("Installation id cannot be empty".to_string()));
    }
    if generals.is_none() && zero_hour.is_none() {
        return Err(CliError::Arguments(
            "Provide --generals and/or --zero-hour".to_string(),
        ));
    }

    let resolve = |raw: Option<&str>| {
        raw.map(normalize_user_path)
            .transpose()
            .map_err(|e| CliError::from(CoreError::Path(e)))
    };

    let mut installation = GameInstallation::new(id, channel);
    installation.generals_path = resolve(generals)?;
    installation.zero_hour_path = resolve(zero_hour)?;
    Ok(installation)
}

async fn add(
    ctx: &CliContext,
    id: String,
    channel: InstallChannel,
    generals: Option<String>,
    zero_hour: Option<String>,
) -> Result<()> {
    let installation =
        build_installation(id, channel, generals.as_deref(), zero_hour.as_deref())?;

    for game in installation.game_types() {
        if let Some(path) = installation.game_path(game) {
            if !path.is_dir() {
                println!("Warning: {} directory {} does not exist", game, path.display());
            }
        }
    }

    ctx.repos.installations.upsert(&installation).await?;
    println!(
        "✓ Saved installation '{}' ({})",
        installation.id, installation.channel
    );
    Ok(())
}

fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "--".to_string(), |p| p.display().to_string())
}

async fn list(ctx: &CliContext) -> Result<()> {
    let installations = ctx.repos.installations.list().await?;
    if installations.is_empty() {
        println!("No installations registered.");
        return Ok(());
    }

    println!("{:<16} {:<16} {:<36} Zero Hour", "Id", "Channel", "Generals");
    print_separator(100);
    for installation in installations {
        println!(
            "{:<16} {:<16} {:<36} {}",
            installation.id,
            installation.channel.slug(),
            display_path(installation.generals_path.as_deref()),
            display_path(installation.zero_hour_path.as_deref()),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use genlib_core::GameType;

    #[test]
    fn test_build_installation_requires_a_game_dir() {
        let err = build_installation("steam".to_string(), InstallChannel::Steam, None, None)
            .unwrap_err();
        assert!(matches!(err, CliError::Arguments(_)));
    }

    #[test]
    fn test_build_installation_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let zh = dir.path().join("zh");
        let installation = build_installation(
            "steam".to_string(),
            InstallChannel::Steam,
            None,
            zh.to_str(),
        )
        .unwrap();

        assert_eq!(installation.game_types(), vec![GameType::ZeroHour]);
        assert_eq!(installation.zero_hour_path, Some(zh));
    }
}
