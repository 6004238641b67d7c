//! Purge command implementation.

use crate::cli::PurgeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lavatory_domain::{RepoType, RepositoryClient, StorageSummary};
use lavatory_policy::PolicySource;
use lavatory_retention::{Artifactory, PerformanceReport, RunMetrics};
use std::time::Instant;

/// What a purge run operates on.
#[derive(Debug, Clone)]
pub struct PurgeOptions {
    /// Only log what would be purged
    pub dry_run: bool,
    /// Apply the default policy to repositories without one
    pub allow_default: bool,
    /// Explicit repositories; every repository of `repo_type` when empty
    pub repos: Vec<String>,
    /// Type of repositories selected when `repos` is empty
    pub repo_type: RepoType,
}

impl From<&PurgeArgs> for PurgeOptions {
    fn from(args: &PurgeArgs) -> Self {
        Self {
            dry_run: args.dry_run(),
            allow_default: args.allow_default(),
            repos: args.selection.repos.clone(),
            repo_type: args.selection.repo_type.into(),
        }
    }
}

/// Result of a purge run.
#[derive(Debug)]
pub struct PurgeOutcome {
    /// Per-repository counters
    pub metrics: RunMetrics,
    /// Storage reduction of every processed repository
    pub reports: Vec<PerformanceReport>,
}

/// Execute the purge command.
///
/// The policy source is built before any request reaches the server.
pub fn execute_purge(args: PurgeArgs, client: &dyn RepositoryClient, formatter: &Formatter) -> Result<()> {
    let source = PolicySource::new(args.policies_path.as_deref())?;
    let options = PurgeOptions::from(&args);

    if options.dry_run {
        println!("{}", formatter.warning("Dry run: nothing will be deleted. Use --nodryrun to purge."));
    }

    let outcome = run_purge(client, &source, &options)?;

    println!("{}", formatter.format_reports(&outcome.reports)?);
    println!("{}", formatter.format_summary(&outcome.metrics));

    if outcome.metrics.has_failures() {
        return Err(CliError::PurgeFailed(outcome.metrics.failed.len()));
    }
    Ok(())
}

/// Resolve, evaluate and purge every selected repository
///
/// A repository whose policy fails is recorded and the run moves on.
pub fn run_purge(
    client: &dyn RepositoryClient,
    source: &PolicySource,
    options: &PurgeOptions,
) -> Result<PurgeOutcome> {
    let start = Instant::now();
    let before = StorageSummary::from_descriptors(client.storage_summary()?);
    let selected = before.select(&options.repos, options.repo_type);
    let mut metrics = RunMetrics::new(options.dry_run);

    for repo in &selected {
        let Some(policy) = source.resolve(repo, options.allow_default) else {
            metrics.record_skip(repo);
            continue;
        };

        tracing::info!("Retrieving artifacts from repo {}", repo);
        tracing::info!("Policy Docs: {}", policy.description());
        let artifactory = Artifactory::new(client, repo.as_str());
        match policy.purgelist(&artifactory) {
            Ok(purgelist) => {
                let purged = artifactory.purge(options.dry_run, &purgelist);
                tracing::info!("Processed {}, Purged {}", repo, purged);
                metrics.record_purge(repo, purged);
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", repo, e);
                metrics.record_failure(repo, &e);
            }
        }
    }

    // Deletes already happened, so a failed snapshot only costs the reports
    let reports = match client.storage_summary() {
        Ok(descriptors) => {
            let after = StorageSummary::from_descriptors(descriptors);
            PerformanceReport::for_repositories(&metrics.processed(), &before, &after)
        }
        Err(e) => {
            tracing::warn!("Storage summary after purge failed, no reports: {}", e);
            Vec::new()
        }
    };
    for report in &reports {
        tracing::info!("{}", report);
    }

    metrics.total_runtime_secs = start.elapsed().as_secs();
    Ok(PurgeOutcome { metrics, reports })
}
