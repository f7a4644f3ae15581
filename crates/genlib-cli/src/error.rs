//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use genlib_core::{CoreError, DetectionError, RepositoryError, ResolverError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The enabled set has unmet requirements.
    #[error("{0} dependency violation(s)")]
    Violations(usize),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) | Self::Violations(_) => 1,
            Self::Arguments(_) => 2,
            Self::NotFound(_) => 66, // EX_NOINPUT
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }

    /// Exit code for any error surfaced by a handler.
    pub fn exit_code_for(err: &anyhow::Error) -> i32 {
        if let Some(cli) = err.downcast_ref::<Self>() {
            return cli.exit_code();
        }
        if let Some(repo) = err.downcast_ref::<RepositoryError>() {
            return match repo {
                RepositoryError::NotFound(_) => 66,
                RepositoryError::AlreadyExists(_) | RepositoryError::Constraint(_) => 2,
                RepositoryError::Storage(_) | RepositoryError::Serialization(_) => 73,
            };
        }
        if err.downcast_ref::<std::io::Error>().is_some() {
            return 74;
        }
        1
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::NotFound(msg)) => Self::NotFound(msg),
            CoreError::Repository(
                RepositoryError::AlreadyExists(msg) | RepositoryError::Constraint(msg),
            ) => Self::Arguments(msg),
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Detection(DetectionError::DirectoryNotFound(path)) => {
                Self::NotFound(path.display().to_string())
            }
            CoreError::Detection(e) => Self::Core(e.to_string()),
            CoreError::Resolver(ResolverError::ManifestNotFound(id)) => {
                Self::NotFound(format!("Manifest {id}"))
            }
            CoreError::Resolver(e) => Self::Database(e.to_string()),
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
            CoreError::Path(path_err) => Self::Config(path_err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
