//! Lavatory Domain Layer
//!
//! Core vocabulary shared by every Lavatory crate: the artifacts and
//! repositories a binary-repository server exposes, the AQL-style criteria
//! used to search them, and the [`RepositoryClient`] trait that separates the
//! retention engine from the HTTP transport.
//!
//! ## Key Concepts
//!
//! - **Repository**: a named storage bucket holding a folder/artifact tree
//! - **Artifact item**: a file or folder returned by a search
//! - **Criteria**: an AND of field/operator/value terms
//! - **Search window**: optional sort, offset and limit applied to a search
//!
//! ## Architecture
//!
//! This crate holds no transport code. The blocking HTTP implementation
//! lives in `lavatory-client`; [`memory::InMemoryRepository`] is a
//! deterministic implementation for tests and offline runs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod criteria;
pub mod error;
pub mod item;
pub mod memory;
pub mod repository;
pub mod traits;

// Re-exports for convenience
pub use criteria::{build_criteria, Criteria, Operator, SearchWindow, Sort, Term, TermValue};
pub use error::{CriteriaError, RepositoryError};
pub use item::{ArtifactItem, ItemType};
pub use memory::InMemoryRepository;
pub use repository::{RepoType, RepositoryDescriptor, StorageSummary};
pub use traits::RepositoryClient;

/// Ordered sequence of artifacts eligible for deletion
pub type PurgeList = Vec<ArtifactItem>;
