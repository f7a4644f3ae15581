//! Fingerprint command handler.

use anyhow::Result;

use genlib_core::{CoreError, GameType, HashRecord, RepositoryError};

use crate::bootstrap::CliContext;
use crate::commands::HashCommand;
use crate::error::CliError;
use crate::presentation::print_separator;

pub async fn execute(ctx: &CliContext, command: HashCommand) -> Result<()> {
    match command {
        HashCommand::Add {
            hash,
            game,
            version,
            publisher,
            untrusted,
        } => {
            let record = build_record(&hash, game, &version, &publisher, !untrusted)?;
            ctx.repos
                .hashes
                .insert(&record)
                .await
                .map_err(|e| match e {
                    RepositoryError::AlreadyExists(_) => {
                        CliError::Arguments(format!("Hash {} is already registered", record.hash))
                    }
                    other => CliError::from(CoreError::Repository(other)),
                })?;
            ctx.registry.try_add_hash(&record.hash, record.clone());
            println!(
                "✓ Added {} {} ({}) for {}",
                record.game_type, record.version, record.publisher, record.hash
            );
            Ok(())
        }
        HashCommand::List => {
            let records = ctx.repos.hashes.list().await?;
            if records.is_empty() {
                println!("No fingerprints added.");
                return Ok(());
            }
            println!(
                "{:<66} {:<10} {:<10} {:<16} Trusted",
                "Hash", "Game", "Version", "Publisher"
            );
            print_separator(110);
            for record in records {
                println!(
                    "{:<66} {:<10} {:<10} {:<16} {}",
                    record.hash,
                    record.game_type.display_name(),
                    record.version,
                    record.publisher,
                    if record.trusted { "yes" } else { "no" }
                );
            }
            Ok(())
        }
    }
}

/// Validate CLI input and build a record.
///
/// Fingerprints are hex digests; versions and publishers must be
/// non-empty and the game must be a known title.
pub fn build_record(
    hash: &str,
    game: GameType,
    version: &str,
    publisher: &str,
    trusted: bool,
) -> Result<HashRecord, CliError> {
    let hash = hash.trim();
    if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CliError::Arguments(format!(
            "'{hash}' is not a hex digest"
        )));
    }
    if game == GameType::Unknown {
        return Err(CliError::Arguments(
            "Fingerprints must name a known game".to_string(),
        ));
    }
    if version.trim().is_empty() || publisher.trim().is_empty() {
        return Err(CliError::Arguments(
            "Version and publisher cannot be empty".to_string(),
        ));
    }
    Ok(HashRecord::new(
        hash,
        game,
        version.trim(),
        publisher.trim(),
        trusted,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_record_normalizes_hash() {
        let record = build_record(" ABCDEF01 ", GameType::ZeroHour, "1.04", "ea", true).unwrap();
        assert_eq!(record.hash, "abcdef01");
        assert!(record.trusted);
    }

    #[test]
    fn test_build_record_rejects_bad_input() {
        assert!(build_record("xyz", GameType::ZeroHour, "1.04", "ea", true).is_err());
        assert!(build_record("abcd", GameType::Unknown, "1.04", "ea", true).is_err());
        assert!(build_record("abcd", GameType::Generals, " ", "ea", true).is_err());
    }
}
