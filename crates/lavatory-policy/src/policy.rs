//! The policy interface and the built-in default policy

use lavatory_domain::{ItemType, PurgeList};
use lavatory_retention::{Artifactory, RetentionError};

/// A retention policy: decides which artifacts of one repository to purge
pub trait Policy: Send + Sync {
    /// Human-readable description shown by the `policies` command
    fn description(&self) -> &str;

    /// Evaluate the policy into a purge list
    fn purgelist(&self, artifactory: &Artifactory<'_>) -> Result<PurgeList, RetentionError>;
}

/// Applied to repositories without a policy of their own
///
/// Lists every file at any depth; nothing is deleted unless the run is live.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl DefaultPolicy {
    /// Registry name
    pub const NAME: &'static str = "default";
}

impl Policy for DefaultPolicy {
    fn description(&self) -> &str {
        "Default retention policy. Purges every file in the repository."
    }

    fn purgelist(&self, artifactory: &Artifactory<'_>) -> Result<PurgeList, RetentionError> {
        artifactory.all_artifacts(ItemType::File, None)
    }
}
