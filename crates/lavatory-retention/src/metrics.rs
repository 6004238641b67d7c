//! Metrics collection for purge runs

use std::collections::BTreeMap;

/// Counters collected over one purge run
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Items purged per repository
    pub purged: BTreeMap<String, usize>,

    /// Repositories without a policy
    pub skipped: Vec<String>,

    /// Repositories whose policy failed, with the error text
    pub failed: BTreeMap<String, String>,

    /// Whether the run deleted nothing
    pub dry_run: bool,

    /// Total runtime in seconds
    pub total_runtime_secs: u64,
}

impl RunMetrics {
    /// Create new empty metrics
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Record a processed repository
    pub fn record_purge(&mut self, repo: &str, count: usize) {
        *self.purged.entry(repo.to_string()).or_insert(0) += count;
    }

    /// Record a repository skipped for lack of a policy
    pub fn record_skip(&mut self, repo: &str) {
        self.skipped.push(repo.to_string());
    }

    /// Record a repository that could not be processed
    pub fn record_failure(&mut self, repo: &str, error: impl ToString) {
        self.failed.insert(repo.to_string(), error.to_string());
    }

    /// Repositories processed, in name order
    pub fn processed(&self) -> Vec<String> {
        self.purged.keys().cloned().collect()
    }

    /// Items purged across all repositories
    pub fn total_purged(&self) -> usize {
        self.purged.values().sum()
    }

    /// Whether any repository failed
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mode = if self.dry_run { "dry run" } else { "live" };
        let mut lines = vec![
            "Purge Summary".to_string(),
            "=============".to_string(),
            format!("Mode: {}", mode),
            format!("Total runtime: {}s", self.total_runtime_secs),
            String::new(),
        ];

        if !self.purged.is_empty() {
            lines.push("Purged by repository:".to_string());
            for (repo, count) in &self.purged {
                lines.push(format!("  {}: {}", repo, count));
            }
            lines.push(format!("  Total: {}", self.total_purged()));
        }

        if !self.skipped.is_empty() {
            lines.push(format!("Skipped (no policy): {}", self.skipped.join(", ")));
        }

        if !self.failed.is_empty() {
            lines.push("Failed:".to_string());
            for (repo, error) in &self.failed {
                lines.push(format!("  {}: {}", repo, error));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = RunMetrics::new(true);
        assert!(metrics.dry_run);
        assert_eq!(metrics.total_purged(), 0);
        assert!(!metrics.has_failures());
    }

    #[test]
    fn test_record_purge() {
        let mut metrics = RunMetrics::new(false);
        metrics.record_purge("docker-local", 5);
        metrics.record_purge("yum-local", 3);
        metrics.record_purge("docker-local", 2);

        assert_eq!(metrics.purged.get("docker-local"), Some(&7));
        assert_eq!(metrics.total_purged(), 10);
        assert_eq!(metrics.processed(), vec!["docker-local".to_string(), "yum-local".to_string()]);
    }

    #[test]
    fn test_record_failure() {
        let mut metrics = RunMetrics::new(false);
        metrics.record_failure("npm-local", "Search failed in npm-local: Transport error");
        metrics.record_skip("maven-local");

        assert!(metrics.has_failures());
        assert_eq!(metrics.skipped, vec!["maven-local".to_string()]);
    }

    #[test]
    fn test_summary() {
        let mut metrics = RunMetrics::new(true);
        metrics.record_purge("docker-local", 5);
        metrics.record_skip("maven-local");
        metrics.record_failure("npm-local", "boom");
        metrics.total_runtime_secs = 12;

        let summary = metrics.summary();
        assert!(summary.contains("Mode: dry run"));
        assert!(summary.contains("Total runtime: 12s"));
        assert!(summary.contains("docker-local: 5"));
        assert!(summary.contains("Skipped (no policy): maven-local"));
        assert!(summary.contains("npm-local: boom"));
    }
}
