//! Config command handler.

use anyhow::Result;

use genlib_core::{CoreError, GameType, Settings, SettingsUpdate, validate_settings};

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let settings = ctx.repos.settings.load().await?;
            print_settings(&settings);
            Ok(())
        }
        ConfigCommand::Set {
            max_scan_depth,
            exclude_dirs,
            executable_names,
            active_profile,
            filter_game,
            clear_filter_game,
        } => {
            let current = ctx.repos.settings.load().await?;
            let update = build_update(
                &current,
                max_scan_depth,
                exclude_dirs,
                executable_names,
                active_profile,
                filter_game,
                clear_filter_game,
            );
            let Some(update) = update else {
                println!("No settings provided. Use --help to see available options.");
                return Ok(());
            };

            let mut updated = current;
            updated.merge(&update);
            validate_settings(&updated).map_err(|e| CliError::from(CoreError::Settings(e)))?;

            ctx.repos.settings.save(&updated).await?;
            println!("✓ Settings updated successfully:");
            print_settings(&updated);
            Ok(())
        }
        ConfigCommand::Reset => {
            ctx.repos.settings.save(&Settings::with_defaults()).await?;
            println!("✓ All settings have been reset to defaults.");
            Ok(())
        }
    }
}

/// Turn `config set` flags into an update. List flags append to the
/// current lists. Returns `None` when no flag was given.
pub fn build_update(
    current: &Settings,
    max_scan_depth: Option<u32>,
    exclude_dirs: Vec<String>,
    executable_names: Vec<String>,
    active_profile: Option<String>,
    filter_game: Option<GameType>,
    clear_filter_game: bool,
) -> Option<SettingsUpdate> {
    let append = |existing: &Option<Vec<String>>, extra: Vec<String>| {
        (!extra.is_empty()).then(|| {
            let mut merged = existing.clone().unwrap_or_default();
            for item in extra {
                if !merged.iter().any(|m| m.eq_ignore_ascii_case(&item)) {
                    merged.push(item);
                }
            }
            Some(merged)
        })
    };

    let update = SettingsUpdate {
        extra_excluded_dirs: append(&current.extra_excluded_dirs, exclude_dirs),
        extra_executable_names: append(&current.extra_executable_names, executable_names),
        max_scan_depth: max_scan_depth.map(Some),
        active_profile: active_profile.map(Some),
        default_filter_game: if clear_filter_game {
            Some(None)
        } else {
            filter_game.map(Some)
        },
    };

    let changed = update.extra_excluded_dirs.is_some()
        || update.extra_executable_names.is_some()
        || update.max_scan_depth.is_some()
        || update.active_profile.is_some()
        || update.default_filter_game.is_some();
    changed.then_some(update)
}

fn print_settings(settings: &Settings) {
    match settings.max_scan_depth {
        Some(depth) => println!("  max_scan_depth:         {depth}"),
        None => println!("  max_scan_depth:         unlimited"),
    }
    println!("  extra_excluded_dirs:    {:?}", settings.extra_excluded_dirs);
    println!("  extra_executable_names: {:?}", settings.extra_executable_names);
    println!("  active_profile:         {}", settings.effective_profile());
    println!("  default_filter_game:    {:?}", settings.default_filter_game);
}
