//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Client construction or credential error
    #[error("{0}")]
    Client(#[from] lavatory_client::ClientError),

    /// Server request failed outside a single repository
    #[error("Repository error: {0}")]
    Repository(#[from] lavatory_domain::RepositoryError),

    /// Policies directory or policy file error
    #[error("{0}")]
    Policy(#[from] lavatory_policy::PolicyError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Some repositories could not be processed
    #[error("{0} repositories failed")]
    PurgeFailed(usize),
}
