//! Before/after performance report

use lavatory_domain::{RepositoryDescriptor, StorageSummary};
use serde::Serialize;
use std::fmt;

/// Percentage reduction from `old` to `new`
///
/// Zero when `old` is zero. Negative when the repository grew.
pub fn get_percentage(old: u64, new: u64) -> f64 {
    if old == 0 {
        return 0.0;
    }
    100.0 * (old as f64 - new as f64) / old as f64
}

/// Storage and file-count change of one repository across a purge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    /// Repository name
    pub repo: String,
    /// Bytes used before the purge
    pub storage_before: u64,
    /// Bytes used after the purge
    pub storage_after: u64,
    /// File count before the purge
    pub files_before: u64,
    /// File count after the purge
    pub files_after: u64,
}

impl PerformanceReport {
    /// Compare two snapshots of the same repository
    pub fn new(repo: impl Into<String>, before: &RepositoryDescriptor, after: &RepositoryDescriptor) -> Self {
        Self {
            repo: repo.into(),
            storage_before: before.used_space_bytes,
            storage_after: after.used_space_bytes,
            files_before: before.files_count,
            files_after: after.files_count,
        }
    }

    /// Reports for every repository in `repos` present in both summaries
    pub fn for_repositories(repos: &[String], before: &StorageSummary, after: &StorageSummary) -> Vec<Self> {
        repos
            .iter()
            .filter_map(|repo| match (before.get(repo), after.get(repo)) {
                (Some(b), Some(a)) => Some(Self::new(repo.as_str(), b, a)),
                _ => {
                    tracing::debug!("No storage snapshot pair for {}", repo);
                    None
                }
            })
            .collect()
    }

    /// Bytes freed (negative if the repository grew)
    pub fn storage_delta(&self) -> i64 {
        self.storage_before as i64 - self.storage_after as i64
    }

    /// Files removed (negative if files were added)
    pub fn files_delta(&self) -> i64 {
        self.files_before as i64 - self.files_after as i64
    }

    /// Storage reduction in percent
    pub fn storage_percentage(&self) -> f64 {
        get_percentage(self.storage_before, self.storage_after)
    }

    /// File-count reduction in percent
    pub fn files_percentage(&self) -> f64 {
        get_percentage(self.files_before, self.files_after)
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: storage {} -> {} bytes (freed {}, {:.1}%), files {} -> {} (removed {}, {:.1}%)",
            self.repo,
            self.storage_before,
            self.storage_after,
            self.storage_delta(),
            self.storage_percentage(),
            self.files_before,
            self.files_after,
            self.files_delta(),
            self.files_percentage(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lavatory_domain::RepoType;

    fn descriptor(key: &str, bytes: u64, files: u64) -> RepositoryDescriptor {
        RepositoryDescriptor {
            key: key.to_string(),
            repo_type: RepoType::Local,
            package_type: "Docker".to_string(),
            used_space_bytes: bytes,
            files_count: files,
            folders_count: 0,
            items_count: files,
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(get_percentage(200, 50), 75.0);
        assert_eq!(get_percentage(10, 10), 0.0);
        assert_eq!(get_percentage(0, 0), 0.0);
        assert_eq!(get_percentage(0, 500), 0.0);
        assert_eq!(get_percentage(100, 150), -50.0);
    }

    #[test]
    fn test_report_line() {
        let report = PerformanceReport::new(
            "docker-local",
            &descriptor("docker-local", 1000, 10),
            &descriptor("docker-local", 400, 4),
        );

        assert_eq!(report.storage_delta(), 600);
        assert_eq!(report.files_delta(), 6);
        assert_eq!(
            report.to_string(),
            "docker-local: storage 1000 -> 400 bytes (freed 600, 60.0%), files 10 -> 4 (removed 6, 60.0%)"
        );
    }

    #[test]
    fn test_for_repositories_skips_missing() {
        let before = StorageSummary::from_descriptors(vec![descriptor("a-local", 10, 1), descriptor("b-local", 10, 1)]);
        let after = StorageSummary::from_descriptors(vec![descriptor("a-local", 5, 0)]);

        let reports = PerformanceReport::for_repositories(
            &["a-local".to_string(), "b-local".to_string(), "c-local".to_string()],
            &before,
            &after,
        );
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].repo, "a-local");
    }
}
