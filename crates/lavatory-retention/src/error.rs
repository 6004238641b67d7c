//! Error types for retention operations

use lavatory_domain::RepositoryError;
use thiserror::Error;

/// Errors that can occur while evaluating a retention strategy
#[derive(Error, Debug)]
pub enum RetentionError {
    /// The server rejected or failed a search
    #[error("Search failed in {repo}: {source}")]
    SearchFailed {
        /// Repository being searched
        repo: String,
        /// Underlying client error
        #[source]
        source: RepositoryError,
    },

    /// Retention settings cannot be evaluated
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
