//! Lavatory Artifactory client
//!
//! Blocking REST client implementing [`lavatory_domain::RepositoryClient`]
//! against an Artifactory server.
//!
//! # Example
//!
//! ```no_run
//! use lavatory_client::{ArtifactoryClient, Credentials};
//! use lavatory_domain::RepositoryClient;
//!
//! let credentials = Credentials::from_env().expect("Missing credentials");
//! let client = ArtifactoryClient::new(credentials).expect("Failed to build client");
//!
//! for repo in client.storage_summary().expect("Failed to read storage info") {
//!     println!("{} {}", repo.key, repo.used_space_bytes);
//! }
//! ```

#![warn(missing_docs)]

mod aql;
mod client;
mod credentials;
mod error;
mod storage;

pub use aql::{parse_results, render_query};
pub use client::{ArtifactoryClient, DEFAULT_TIMEOUT};
pub use credentials::{Credentials, PASSWORD_VAR, URL_VAR, USERNAME_VAR};
pub use error::ClientError;
pub use storage::{parse_size, parse_storage_info};
