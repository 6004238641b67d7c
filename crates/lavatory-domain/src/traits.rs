//! Trait definitions for external interactions
//!
//! These traits define the boundary between retention logic and the
//! repository server. The HTTP implementation lives in `lavatory-client`.

use crate::{ArtifactItem, Criteria, RepositoryDescriptor, RepositoryError, SearchWindow};
use std::collections::HashMap;

/// Operations the retention engine needs from a repository server
///
/// Calls are synchronous. Implementations return results as the server
/// sees them at call time and never paginate.
pub trait RepositoryClient {
    /// Storage summary of every repository (`GET storageinfo`)
    fn storage_summary(&self) -> Result<Vec<RepositoryDescriptor>, RepositoryError>;

    /// Items matching `criteria`, shaped by `window`
    ///
    /// Result order is unspecified unless `window.sort` is set.
    fn search(
        &self,
        criteria: &Criteria,
        window: &SearchWindow,
    ) -> Result<Vec<ArtifactItem>, RepositoryError>;

    /// Delete one artifact
    fn delete(&self, item: &ArtifactItem) -> Result<(), RepositoryError>;

    /// Properties attached to an artifact
    fn properties(&self, item: &ArtifactItem) -> Result<HashMap<String, String>, RepositoryError>;
}
