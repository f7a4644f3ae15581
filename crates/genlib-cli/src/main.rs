//! CLI entry point.
//!
//! Infrastructure is wired together once via `bootstrap`; command dispatch
//! routes to handlers that receive the composed `CliContext`.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use genlib_cli::{Cli, CliConfig, CliContext, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(ctx: &CliContext, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Paths => handlers::paths::execute(),
        Commands::Scan {
            dir,
            register,
            json,
        } => handlers::scan::execute(ctx, &dir, register, json).await,
        Commands::Detect { register, json } => {
            handlers::detect::execute(ctx, register, json).await
        }
        Commands::Installations { command } => {
            handlers::installations::execute(ctx, command).await
        }
        Commands::Hashes { command } => handlers::hashes::execute(ctx, command).await,
        Commands::Manifests { command } => handlers::manifests::execute(ctx, command).await,
        Commands::Enable { id } => handlers::content::enable(ctx, &id).await,
        Commands::Disable { id } => handlers::content::disable(ctx, &id).await,
        Commands::Validate => handlers::content::validate(ctx).await,
        Commands::Status => handlers::content::status(ctx).await,
        Commands::Config { command } => handlers::config::execute(ctx, command).await,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Paths must work even when the database cannot be opened
    if matches!(command, Commands::Paths) {
        return handlers::paths::execute();
    }

    let ctx = bootstrap(CliConfig {
        profile: cli.profile,
    })
    .await?;
    dispatch(&ctx, command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = CliError::exit_code_for(&e);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
