//! Purge executor

use lavatory_domain::{ArtifactItem, RepositoryClient};

/// Delete every item, or only log them in dry-run mode
///
/// Returns the number of items purged. A dry run counts every item and never
/// calls [`RepositoryClient::delete`]. A live run counts successful deletes
/// only; a failed delete is logged and the batch continues.
pub fn purge(client: &dyn RepositoryClient, dry_run: bool, items: &[ArtifactItem]) -> usize {
    let mode = if dry_run { "DRYRUN" } else { "LIVE" };
    let mut purged = 0;

    for item in items {
        tracing::info!("  {} purge {}", mode, item);

        if dry_run {
            purged += 1;
            continue;
        }

        match client.delete(item) {
            Ok(()) => purged += 1,
            Err(e) => tracing::warn!("Failed to purge {}: {}", item, e),
        }
    }

    purged
}
