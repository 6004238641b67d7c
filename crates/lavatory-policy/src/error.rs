//! Policy loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a [`crate::PolicySource`]
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Extra policies path is not a directory
    #[error("Invalid policies directory: {}", .0.display())]
    InvalidPoliciesDirectory(PathBuf),

    /// A policy file could not be parsed
    #[error("Invalid policy {}: {reason}", path.display())]
    InvalidPolicy {
        /// Offending file
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Reading the policies directory failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
