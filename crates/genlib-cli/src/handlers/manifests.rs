//! Manifest command handler.

use anyhow::Result;

use genlib_core::{ContentFilter, ContentType, GameType, ManifestId};

use crate::bootstrap::CliContext;
use crate::commands::ManifestCommand;
use crate::error::CliError;
use crate::presentation::{print_separator, truncate_string};

pub async fn execute(ctx: &CliContext, command: ManifestCommand) -> Result<()> {
    match command {
        ManifestCommand::List {
            content_type,
            game,
            search,
        } => list(ctx, content_type, game, search).await,
        ManifestCommand::Remove { id } => {
            let id = ManifestId::new(id);
            if !ctx.repos.manifests.remove_manifest(&id).await? {
                return Err(CliError::NotFound(format!("Manifest {id}")).into());
            }
            println!("✓ Removed manifest {id}");
            Ok(())
        }
    }
}

async fn list(
    ctx: &CliContext,
    content_type: Option<ContentType>,
    game: Option<GameType>,
    search: Option<String>,
) -> Result<()> {
    let filter = ContentFilter {
        content_types: content_type.into_iter().collect(),
        target_game: game,
        search,
    };
    let manifests: Vec<_> = ctx
        .repos
        .manifests
        .get_all_manifests()
        .await?
        .into_iter()
        .filter(|m| filter.matches(m))
        .collect();

    if manifests.is_empty() {
        println!("No manifests found.");
        return Ok(());
    }

    let enabled = ctx.repos.profiles.load_enabled(&ctx.profile).await?;
    println!(
        "{:<3} {:<48} {:<28} {:<16} {:<10} Version",
        "", "Id", "Name", "Type", "Game"
    );
    print_separator(120);
    for manifest in manifests {
        let marker = if enabled.contains(&manifest.id) { "*" } else { "" };
        println!(
            "{:<3} {:<48} {:<28} {:<16} {:<10} {}",
            marker,
            truncate_string(manifest.id.as_str(), 47),
            truncate_string(&manifest.name, 27),
            manifest.content_type.slug(),
            manifest.target_game.display_name(),
            manifest.version
        );
    }
    println!("\n* enabled in profile '{}'", ctx.profile);
    Ok(())
}
