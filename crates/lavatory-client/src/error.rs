//! Error types for the Artifactory client.

use lavatory_domain::RepositoryError;
use thiserror::Error;

/// Client operation errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required credential variable is not set
    #[error("Missing environment variable {0}")]
    MissingEnvironmentVariable(String),

    /// Base URL cannot be used
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Connection error (network, DNS, TLS, timeout)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Credentials rejected (HTTP 401/403)
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Addressed resource does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP status
    #[error("Server error: {0}")]
    ServerError(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ConnectionError(e.to_string())
        } else if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                    ClientError::AuthError(format!("HTTP {}", status))
                }
                Some(status) if status.as_u16() == 404 => ClientError::NotFound(e.to_string()),
                Some(status) => ClientError::ServerError(format!("HTTP {}: {}", status, e)),
                None => ClientError::ServerError(e.to_string()),
            }
        } else {
            ClientError::ConnectionError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

impl From<ClientError> for RepositoryError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::AuthError(msg) => RepositoryError::Auth(msg),
            ClientError::NotFound(msg) => RepositoryError::NotFound(msg),
            ClientError::InvalidResponse(msg) => RepositoryError::InvalidResponse(msg),
            other => RepositoryError::Transport(other.to_string()),
        }
    }
}
