//! Repository-scoped retention strategies

use crate::purge::purge;
use crate::{CountRetention, RetentionError, TimeRetention};
use chrono::{DateTime, Duration, Utc};
use lavatory_domain::{
    build_criteria, ArtifactItem, ItemType, PurgeList, RepositoryClient, SearchWindow, Sort, Term,
};

/// Handle on one repository that evaluates retention strategies
///
/// Every strategy only builds a purge list; nothing is deleted until
/// [`Artifactory::purge`] is called.
///
/// # Examples
///
/// ```
/// use lavatory_domain::{InMemoryRepository, ItemType};
/// use lavatory_retention::{Artifactory, CountRetention};
///
/// let repository = InMemoryRepository::new();
/// let artifactory = Artifactory::new(&repository, "docker-local");
///
/// let purgelist = artifactory.count_based_retention(&CountRetention::keep(5)).unwrap();
/// assert!(purgelist.is_empty());
/// ```
pub struct Artifactory<'a> {
    client: &'a dyn RepositoryClient,
    repo: String,
}

impl<'a> Artifactory<'a> {
    /// Create a handle on `repo`
    pub fn new(client: &'a dyn RepositoryClient, repo: impl Into<String>) -> Self {
        Self {
            client,
            repo: repo.into(),
        }
    }

    /// Repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Search this repository
    pub fn filter(
        &self,
        item_type: ItemType,
        depth: Option<u32>,
        terms: Vec<Term>,
        window: &SearchWindow,
    ) -> Result<PurgeList, RetentionError> {
        let criteria = build_criteria(&self.repo, item_type, depth, terms);
        self.client
            .search(&criteria, window)
            .map_err(|source| RetentionError::SearchFailed {
                repo: self.repo.clone(),
                source,
            })
    }

    /// Everything past the newest `retention_count` items of each project
    ///
    /// Per-project lists are concatenated as returned, so overlapping
    /// project paths can list an item twice.
    pub fn count_based_retention(&self, settings: &CountRetention) -> Result<PurgeList, RetentionError> {
        if settings.artifact_depth <= settings.project_depth {
            return Err(RetentionError::InvalidArgument(format!(
                "artifact depth {} must be deeper than project depth {}",
                settings.artifact_depth, settings.project_depth
            )));
        }

        let projects = self.filter(
            ItemType::Folder,
            Some(settings.project_depth),
            Vec::new(),
            &SearchWindow::unbounded(),
        )?;

        let mut purgelist = PurgeList::new();
        for project in projects {
            if let Some(wanted) = &settings.project {
                if &project.name != wanted {
                    continue;
                }
            }

            let project_path = project.full_path();
            let scope = if settings.artifact_depth == settings.project_depth + 1 {
                Term::equals("path", project_path.as_str())
            } else {
                Term::matches("path", format!("{}/*", project_path))
            };

            let mut terms = vec![scope];
            terms.extend(settings.extra_terms.iter().cloned());

            let window = SearchWindow::unbounded()
                .with_sort(Sort::newest_first())
                .with_offset(settings.retention_count);
            let expired = self.filter(settings.item_type, Some(settings.artifact_depth), terms, &window)?;

            tracing::debug!("{} items past the newest {} in {}", expired.len(), settings.retention_count, project);
            purgelist.extend(expired);
        }

        sort_by_path(&mut purgelist);
        Ok(purgelist)
    }

    /// Items created more than `keep_days` days ago
    pub fn time_based_retention(&self, settings: &TimeRetention) -> Result<PurgeList, RetentionError> {
        self.time_based_retention_at(Utc::now(), settings)
    }

    /// Items created before `now - keep_days`
    ///
    /// The cutoff is exclusive: an item created exactly at the cutoff is kept.
    /// A `keep_days` reaching past the earliest representable date is rejected.
    pub fn time_based_retention_at(
        &self,
        now: DateTime<Utc>,
        settings: &TimeRetention,
    ) -> Result<PurgeList, RetentionError> {
        let cutoff = Duration::try_days(i64::from(settings.keep_days))
            .and_then(|keep| now.checked_sub_signed(keep))
            .ok_or_else(|| {
                RetentionError::InvalidArgument(format!("keep_days {} is out of range", settings.keep_days))
            })?;

        let mut terms = vec![Term::created_before(&cutoff)];
        terms.extend(settings.extra_terms.iter().cloned());

        let mut purgelist = self.filter(settings.item_type, None, terms, &SearchWindow::unbounded())?;
        sort_by_path(&mut purgelist);
        Ok(purgelist)
    }

    /// Every item of `item_type`, optionally at one depth
    pub fn all_artifacts(&self, item_type: ItemType, depth: Option<u32>) -> Result<PurgeList, RetentionError> {
        let mut purgelist = self.filter(item_type, depth, Vec::new(), &SearchWindow::unbounded())?;
        sort_by_path(&mut purgelist);
        Ok(purgelist)
    }

    /// Delete `items` (or only log them when `dry_run`)
    pub fn purge(&self, dry_run: bool, items: &[ArtifactItem]) -> usize {
        purge(self.client, dry_run, items)
    }
}

fn sort_by_path(items: &mut PurgeList) {
    items.sort_by(|a, b| a.path.cmp(&b.path));
}
