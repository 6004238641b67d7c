//! Policies command implementation.

use crate::cli::PoliciesArgs;
use crate::error::Result;
use crate::output::Formatter;
use lavatory_domain::{RepositoryClient, StorageSummary};
use lavatory_policy::{PolicyDescription, PolicySource};

/// Execute the policies command.
pub fn execute_policies(args: PoliciesArgs, client: &dyn RepositoryClient, formatter: &Formatter) -> Result<()> {
    let source = PolicySource::new(args.policies_path.as_deref())?;
    let descriptions = describe_policies(client, &source, &args.selection.repos, args.selection.repo_type.into())?;
    println!("{}", formatter.format_policies(&descriptions)?);
    Ok(())
}

/// Policy description of every selected repository, default included
pub fn describe_policies(
    client: &dyn RepositoryClient,
    source: &PolicySource,
    repos: &[String],
    repo_type: lavatory_domain::RepoType,
) -> Result<Vec<PolicyDescription>> {
    let summary = StorageSummary::from_descriptors(client.storage_summary()?);
    Ok(summary
        .select(repos, repo_type)
        .iter()
        .map(|repo| source.describe(repo))
        .collect())
}
