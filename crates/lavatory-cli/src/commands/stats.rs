//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::error::Result;
use crate::output::Formatter;
use lavatory_domain::{RepositoryClient, RepositoryDescriptor, StorageSummary};

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, client: &dyn RepositoryClient, formatter: &Formatter) -> Result<()> {
    let repositories = repository_stats(client, &args.repos)?;
    println!("{}", formatter.format_repositories(&repositories)?);
    Ok(())
}

/// Storage metadata of `repos`, or of every repository when empty
///
/// Names the server does not know are logged and left out.
pub fn repository_stats(client: &dyn RepositoryClient, repos: &[String]) -> Result<Vec<RepositoryDescriptor>> {
    let summary = StorageSummary::from_descriptors(client.storage_summary()?);

    if repos.is_empty() {
        return Ok(summary.iter().cloned().collect());
    }

    Ok(repos
        .iter()
        .filter_map(|repo| {
            let descriptor = summary.get(repo).cloned();
            if descriptor.is_none() {
                tracing::warn!("Repository {} not found", repo);
            }
            descriptor
        })
        .collect())
}
