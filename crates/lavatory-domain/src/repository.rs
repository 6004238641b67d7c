//! Repository descriptors and storage summary snapshots

use crate::error::CriteriaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    /// Hosted repository receiving deployments
    Local,
    /// Aggregation of other repositories
    Virtual,
    /// Cache of a remote repository
    Cache,
}

impl RepoType {
    /// Get the repository type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoType::Local => "local",
            RepoType::Virtual => "virtual",
            RepoType::Cache => "cache",
        }
    }

    /// Parse a repository type, case-insensitively (the storage API reports `LOCAL`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" => Some(RepoType::Local),
            "virtual" => Some(RepoType::Virtual),
            "cache" => Some(RepoType::Cache),
            _ => None,
        }
    }
}

impl std::str::FromStr for RepoType {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            CriteriaError::InvalidArgument(format!("Invalid repository type: {}", s))
        })
    }
}

impl fmt::Display for RepoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time storage figures for one repository
///
/// Never mutated; a fresh snapshot replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryDescriptor {
    /// Repository key
    pub key: String,

    /// Local, virtual or cache
    pub repo_type: RepoType,

    /// Package type (docker, maven, npm, ...)
    pub package_type: String,

    /// Used space in bytes
    pub used_space_bytes: u64,

    /// Number of files
    pub files_count: u64,

    /// Number of folders
    pub folders_count: u64,

    /// Number of items (files and folders)
    pub items_count: u64,
}

/// Storage summary of every repository on the server, keyed by repository key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageSummary {
    repositories: BTreeMap<String, RepositoryDescriptor>,
}

impl StorageSummary {
    /// Build a summary from descriptors; a later duplicate key replaces an earlier one
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = RepositoryDescriptor>) -> Self {
        let repositories = descriptors
            .into_iter()
            .map(|descriptor| (descriptor.key.clone(), descriptor))
            .collect();
        Self { repositories }
    }

    /// Get the descriptor of a repository
    pub fn get(&self, key: &str) -> Option<&RepositoryDescriptor> {
        self.repositories.get(key)
    }

    /// Iterate over descriptors in key order
    pub fn iter(&self) -> impl Iterator<Item = &RepositoryDescriptor> {
        self.repositories.values()
    }

    /// Repository keys to operate on
    ///
    /// Explicit names win and are returned as given, even when the summary
    /// does not know them. Otherwise every repository of `repo_type`.
    pub fn select(&self, names: &[String], repo_type: RepoType) -> Vec<String> {
        if !names.is_empty() {
            return names.to_vec();
        }
        self.repositories
            .values()
            .filter(|descriptor| descriptor.repo_type == repo_type)
            .map(|descriptor| descriptor.key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(key: &str, repo_type: RepoType) -> RepositoryDescriptor {
        RepositoryDescriptor {
            key: key.to_string(),
            repo_type,
            package_type: "Generic".to_string(),
            used_space_bytes: 0,
            files_count: 0,
            folders_count: 0,
            items_count: 0,
        }
    }

    #[test]
    fn test_repo_type_parsing() {
        assert_eq!(RepoType::parse("LOCAL"), Some(RepoType::Local));
        assert_eq!(RepoType::parse("virtual"), Some(RepoType::Virtual));
        assert_eq!(RepoType::parse("Cache"), Some(RepoType::Cache));
        assert_eq!(RepoType::parse("NA"), None);
        assert!("remote".parse::<RepoType>().is_err());
    }

    #[test]
    fn test_select_by_type() {
        let summary = StorageSummary::from_descriptors(vec![
            descriptor("yum-local", RepoType::Local),
            descriptor("docker-local", RepoType::Local),
            descriptor("maven-virtual", RepoType::Virtual),
        ]);

        assert_eq!(
            summary.select(&[], RepoType::Local),
            vec!["docker-local".to_string(), "yum-local".to_string()]
        );
        assert_eq!(summary.select(&[], RepoType::Virtual), vec!["maven-virtual".to_string()]);
        assert!(summary.select(&[], RepoType::Cache).is_empty());
    }

    #[test]
    fn test_select_explicit_names_win() {
        let summary = StorageSummary::from_descriptors(vec![descriptor("yum-local", RepoType::Local)]);
        let names = vec!["unknown-local".to_string()];
        assert_eq!(summary.select(&names, RepoType::Virtual), names);
    }

    #[test]
    fn test_lookup() {
        let summary = StorageSummary::from_descriptors(vec![descriptor("yum-local", RepoType::Local)]);
        assert_eq!(summary.get("yum-local").map(|d| d.repo_type), Some(RepoType::Local));
        assert!(summary.get("npm-local").is_none());
        assert_eq!(summary.iter().count(), 1);
    }
}
