//! Error types shared across the domain boundary

use thiserror::Error;

/// Failure reported by a [`crate::RepositoryClient`] implementation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Network, HTTP status or server-side error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Credentials rejected by the server
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Addressed artifact or repository does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error raised while building search criteria
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CriteriaError {
    /// A value outside the accepted vocabulary
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
