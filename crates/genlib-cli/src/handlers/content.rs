//! Content command handlers: enable, disable, validate and status.
//!
//! Each command restores the active profile into a content session, acts
//! on it and writes the enabled set back.

use anyhow::Result;

use genlib_core::{CoreError, ManifestId, ResolverError};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{
    print_disable_outcome, print_enable_outcome, print_separator, print_violations,
    truncate_string,
};

fn resolver_error(e: ResolverError) -> CliError {
    CliError::from(CoreError::Resolver(e))
}

pub async fn enable(ctx: &CliContext, id: &str) -> Result<()> {
    let mut session = ctx.session().await?;
    let outcome = session
        .enable(&ManifestId::new(id))
        .await
        .map_err(resolver_error)?;

    if outcome.changed() {
        ctx.save_session(&session).await?;
        println!("✓ Enabled {id} in profile '{}'", ctx.profile);
    }
    print_enable_outcome(&outcome);
    Ok(())
}

pub async fn disable(ctx: &CliContext, id: &str) -> Result<()> {
    let mut session = ctx.session().await?;
    let outcome = session
        .disable(&ManifestId::new(id))
        .await
        .map_err(resolver_error)?;

    if outcome.was_enabled {
        ctx.save_session(&session).await?;
        println!("✓ Disabled {id} in profile '{}'", ctx.profile);
    } else {
        println!("{id} was not enabled in profile '{}'", ctx.profile);
    }
    print_disable_outcome(&outcome);
    Ok(())
}

/// Fails with [`CliError::Violations`] when the enabled set is invalid.
pub async fn validate(ctx: &CliContext) -> Result<()> {
    let session = ctx.session().await?;
    let violations = session.validate();
    print_violations(&violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::Violations(violations.len()).into())
    }
}

pub async fn status(ctx: &CliContext) -> Result<()> {
    let session = ctx.session().await?;

    println!("Profile: {}", ctx.profile);
    if session.enabled().is_empty() {
        println!("Nothing enabled.");
    } else {
        println!("\n{:<16} {:<48} Name", "Type", "Id");
        print_separator(100);
        for manifest in session.enabled() {
            println!(
                "{:<16} {:<48} {}",
                manifest.content_type.slug(),
                truncate_string(manifest.id.as_str(), 47),
                manifest.name
            );
        }
    }

    println!("\n{} item(s) available to enable", session.discovery().len());
    let violations = session.validate();
    if !violations.is_empty() {
        println!();
        print_violations(&violations);
    }
    Ok(())
}
