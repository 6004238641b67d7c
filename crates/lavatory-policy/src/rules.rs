//! Declarative policies read from TOML files
//!
//! ```toml
//! description = "Keep the 5 newest tags of every image, files for 30 days"
//!
//! [[rules]]
//! kind = "count"
//! retention_count = 5
//!
//! [[rules]]
//! kind = "time"
//! keep_days = 30
//! ```

use crate::{Policy, PolicyError};
use lavatory_domain::{ItemType, PurgeList};
use lavatory_retention::{Artifactory, CountRetention, RetentionError, TimeRetention};
use serde::Deserialize;
use std::path::Path;

/// Settings of the `all` rule
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AllArtifacts {
    /// Kind of item listed
    pub item_type: ItemType,
    /// Only list items at this depth
    pub depth: Option<u32>,
}

impl Default for AllArtifacts {
    fn default() -> Self {
        Self {
            item_type: ItemType::File,
            depth: None,
        }
    }
}

/// One retention strategy with its settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rule {
    /// Keep the newest N items per project
    Count(CountRetention),
    /// Keep items younger than N days
    Time(TimeRetention),
    /// Purge everything
    All(AllArtifacts),
}

impl Rule {
    fn evaluate(&self, artifactory: &Artifactory<'_>) -> Result<PurgeList, RetentionError> {
        match self {
            Rule::Count(settings) => artifactory.count_based_retention(settings),
            Rule::Time(settings) => artifactory.time_based_retention(settings),
            Rule::All(settings) => artifactory.all_artifacts(settings.item_type, settings.depth),
        }
    }
}

/// A policy made of an ordered list of rules
///
/// Rule results are concatenated in file order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RulePolicy {
    /// Text shown by the `policies` command
    pub description: String,
    /// Rules evaluated in order
    pub rules: Vec<Rule>,
}

impl RulePolicy {
    /// Parse a policy file body; `path` is only used in errors
    pub fn parse(contents: &str, path: &Path) -> Result<Self, PolicyError> {
        let policy: RulePolicy = toml::from_str(contents).map_err(|e| PolicyError::InvalidPolicy {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if policy.rules.is_empty() {
            return Err(PolicyError::InvalidPolicy {
                path: path.to_path_buf(),
                reason: "no rules".to_string(),
            });
        }

        Ok(policy)
    }

    /// Read and parse a policy file
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, path)
    }
}

impl Policy for RulePolicy {
    fn description(&self) -> &str {
        &self.description
    }

    fn purgelist(&self, artifactory: &Artifactory<'_>) -> Result<PurgeList, RetentionError> {
        let mut purgelist = PurgeList::new();
        for rule in &self.rules {
            purgelist.extend(rule.evaluate(artifactory)?);
        }
        Ok(purgelist)
    }
}
