//! In-memory repository server
//!
//! Evaluates [`Criteria`] against a fixed set of items so retention logic
//! can be exercised without a server. Searches and deletes are recorded,
//! and failures can be injected per repository or per artifact.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use lavatory_domain::{
//!     build_criteria, ArtifactItem, InMemoryRepository, ItemType, RepositoryClient, SearchWindow,
//! };
//!
//! let server = InMemoryRepository::new();
//! server.insert(ArtifactItem::new("generic-local", ".", "a.txt", ItemType::File, Utc::now()));
//!
//! let criteria = build_criteria("generic-local", ItemType::File, None, vec![]);
//! let found = server.search(&criteria, &SearchWindow::unbounded()).unwrap();
//! assert_eq!(found.len(), 1);
//! ```

use crate::criteria::AQL_DATE_FORMAT;
use crate::{
    ArtifactItem, Criteria, ItemType, Operator, RepoType, RepositoryClient, RepositoryDescriptor,
    RepositoryError, SearchWindow, Sort, Term, TermValue,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    items: Vec<ArtifactItem>,
    repositories: Vec<(String, RepoType, String)>,
    failing_searches: HashSet<String>,
    failing_deletes: HashSet<String>,
    searches: Vec<(Criteria, SearchWindow)>,
    deleted: Vec<String>,
}

/// Repository server backed by a vector of items
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    /// Create an empty server
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repository so it shows up in the storage summary
    pub fn add_repository(&self, key: impl Into<String>, repo_type: RepoType, package_type: impl Into<String>) {
        self.lock().repositories.push((key.into(), repo_type, package_type.into()));
    }

    /// Store an item
    pub fn insert(&self, item: ArtifactItem) {
        self.lock().items.push(item);
    }

    /// Store several items
    pub fn extend(&self, items: impl IntoIterator<Item = ArtifactItem>) {
        self.lock().items.extend(items);
    }

    /// Make every search against `repo` fail with a transport error
    pub fn fail_searches_for(&self, repo: impl Into<String>) {
        self.lock().failing_searches.insert(repo.into());
    }

    /// Make deleting the artifact at `repo:full_path` fail
    pub fn fail_delete_of(&self, repo: &str, full_path: &str) {
        self.lock().failing_deletes.insert(format!("{}:{}", repo, full_path));
    }

    /// Items currently stored
    pub fn items(&self) -> Vec<ArtifactItem> {
        self.lock().items.clone()
    }

    /// Number of searches issued so far
    pub fn search_count(&self) -> usize {
        self.lock().searches.len()
    }

    /// Criteria and windows of every search, in call order
    pub fn searches(&self) -> Vec<(Criteria, SearchWindow)> {
        self.lock().searches.clone()
    }

    /// `repo:full_path` of every successful delete, in call order
    pub fn deleted(&self) -> Vec<String> {
        self.lock().deleted.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RepositoryClient for InMemoryRepository {
    fn storage_summary(&self) -> Result<Vec<RepositoryDescriptor>, RepositoryError> {
        let state = self.lock();
        let descriptors = state
            .repositories
            .iter()
            .map(|(key, repo_type, package_type)| {
                let items: Vec<&ArtifactItem> = state.items.iter().filter(|i| &i.repo == key).collect();
                let files_count = items.iter().filter(|i| i.item_type == ItemType::File).count() as u64;
                let folders_count = items.iter().filter(|i| i.item_type == ItemType::Folder).count() as u64;
                RepositoryDescriptor {
                    key: key.clone(),
                    repo_type: *repo_type,
                    package_type: package_type.clone(),
                    used_space_bytes: items.iter().map(|i| i.size).sum(),
                    files_count,
                    folders_count,
                    items_count: files_count + folders_count,
                }
            })
            .collect();
        Ok(descriptors)
    }

    fn search(
        &self,
        criteria: &Criteria,
        window: &SearchWindow,
    ) -> Result<Vec<ArtifactItem>, RepositoryError> {
        let mut state = self.lock();
        state.searches.push((criteria.clone(), window.clone()));

        if let Some(Term { value: TermValue::Text(repo), .. }) = criteria.term("repo") {
            if state.failing_searches.contains(repo) {
                return Err(RepositoryError::Transport(format!("search against {} refused", repo)));
            }
        }

        let mut results: Vec<ArtifactItem> = state
            .items
            .iter()
            .filter(|item| criteria.terms().iter().all(|term| evaluate(term, item)))
            .cloned()
            .collect();

        if let Some(sort) = &window.sort {
            results.sort_by(|a, b| compare(sort, a, b));
        }

        let offset = window.offset.unwrap_or(0);
        let limit = window.limit.unwrap_or(usize::MAX);
        Ok(results.into_iter().skip(offset).take(limit).collect())
    }

    fn delete(&self, item: &ArtifactItem) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let key = item.to_string();
        if state.failing_deletes.contains(&key) {
            return Err(RepositoryError::Transport(format!("delete of {} refused", key)));
        }

        let before = state.items.len();
        state.items.retain(|stored| stored.to_string() != key);
        if state.items.len() == before {
            return Err(RepositoryError::NotFound(key));
        }
        state.deleted.push(key);
        Ok(())
    }

    fn properties(&self, item: &ArtifactItem) -> Result<HashMap<String, String>, RepositoryError> {
        let state = self.lock();
        let key = item.to_string();
        state
            .items
            .iter()
            .find(|stored| stored.to_string() == key)
            .map(|stored| stored.properties.clone())
            .ok_or(RepositoryError::NotFound(key))
    }
}

enum FieldValue {
    Text(String),
    Number(u64),
    Time(DateTime<Utc>),
    Missing,
}

fn field_value(field: &str, item: &ArtifactItem) -> FieldValue {
    match field {
        "repo" => FieldValue::Text(item.repo.clone()),
        "path" => FieldValue::Text(item.path.clone()),
        "name" => FieldValue::Text(item.name.clone()),
        "type" => FieldValue::Text(item.item_type.as_str().to_string()),
        "depth" => FieldValue::Number(u64::from(item.depth())),
        "size" => FieldValue::Number(item.size),
        "created" => FieldValue::Time(item.created),
        other => match other.strip_prefix('@').and_then(|key| item.properties.get(key)) {
            Some(value) => FieldValue::Text(value.clone()),
            None => FieldValue::Missing,
        },
    }
}

fn evaluate(term: &Term, item: &ArtifactItem) -> bool {
    if term.field == "type" && term.operator == Operator::Eq {
        return match &term.value {
            TermValue::Text(wanted) => ItemType::parse(wanted).map_or(false, |wanted| wanted.admits(item.item_type)),
            TermValue::Number(_) => false,
        };
    }

    let actual = field_value(&term.field, item);
    match term.operator {
        Operator::Eq => match (&actual, &term.value) {
            (FieldValue::Text(a), TermValue::Text(v)) => a == v,
            (FieldValue::Number(a), TermValue::Number(v)) => a == v,
            (FieldValue::Time(a), TermValue::Text(v)) => parse_time(v).map_or(false, |t| *a == t),
            _ => false,
        },
        Operator::Lt => match (&actual, &term.value) {
            (FieldValue::Time(a), TermValue::Text(v)) => parse_time(v).map_or(false, |t| *a < t),
            (FieldValue::Number(a), TermValue::Number(v)) => a < v,
            (FieldValue::Text(a), TermValue::Text(v)) => a < v,
            _ => false,
        },
        Operator::Match => match &actual {
            FieldValue::Text(a) => wildcard_match(&term.value.to_string(), a),
            _ => false,
        },
        Operator::NMatch => match &actual {
            FieldValue::Text(a) => !wildcard_match(&term.value.to_string(), a),
            _ => true,
        },
    }
}

fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, AQL_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|t| t.with_timezone(&Utc)))
}

fn compare(sort: &Sort, a: &ArtifactItem, b: &ArtifactItem) -> Ordering {
    let ordering = sort
        .fields()
        .iter()
        .map(|field| match field.as_str() {
            "created" => a.created.cmp(&b.created),
            "path" => a.path.cmp(&b.path),
            "name" => a.name.cmp(&b.name),
            "size" => a.size.cmp(&b.size),
            _ => Ordering::Equal,
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal);

    if sort.is_descending() {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Match `text` against a pattern where `*` is any run and `?` any single character
fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            backtrack = Some((p, t));
            p += 1;
        } else if let Some((star, matched)) = backtrack {
            p = star + 1;
            t = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_criteria;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn folder(path: &str, name: &str, age_days: i64) -> ArtifactItem {
        ArtifactItem::new("docker-local", path, name, ItemType::Folder, now() - Duration::days(age_days))
    }

    #[test]
    fn test_wildcard_match() {
        assert!(wildcard_match("*/repodata", "centos/7/repodata"));
        assert!(!wildcard_match("*/repodata", "centos/7/x86_64"));
        assert!(wildcard_match("team/*", "team/app/1.0"));
        assert!(wildcard_match("v?.0", "v1.0"));
        assert!(!wildcard_match("v?.0", "v10.0"));
        assert!(wildcard_match("*", ""));
    }

    #[test]
    fn test_search_by_depth_and_type() {
        let server = InMemoryRepository::new();
        server.insert(folder("team", "app", 10));
        server.insert(folder("team/app", "1.0", 5));
        server.insert(ArtifactItem::new("docker-local", "team/app/1.0", "manifest.json", ItemType::File, now()));

        let criteria = build_criteria("docker-local", ItemType::Folder, Some(2), vec![]);
        let found = server.search(&criteria, &SearchWindow::unbounded()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "app");

        let criteria = build_criteria("docker-local", ItemType::Any, None, vec![]);
        assert_eq!(server.search(&criteria, &SearchWindow::unbounded()).unwrap().len(), 3);

        let criteria = build_criteria("docker-local", ItemType::File, None, vec![]);
        let found = server.search(&criteria, &SearchWindow::unbounded()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "manifest.json");
    }

    #[test]
    fn test_search_ignores_repodata() {
        let server = InMemoryRepository::new();
        server.insert(ArtifactItem::new("yum-local", "centos/repodata", "repomd.xml", ItemType::File, now()));
        server.insert(ArtifactItem::new("yum-local", "centos/x86_64", "a.rpm", ItemType::File, now()));

        let criteria = build_criteria("yum-local", ItemType::File, None, vec![]);
        let found = server.search(&criteria, &SearchWindow::unbounded()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "a.rpm");
    }

    #[test]
    fn test_sort_and_offset() {
        let server = InMemoryRepository::new();
        server.insert(folder("team/app", "old", 30));
        server.insert(folder("team/app", "new", 1));
        server.insert(folder("team/app", "mid", 10));

        let criteria = build_criteria("docker-local", ItemType::Folder, Some(3), vec![]);
        let window = SearchWindow::unbounded().with_sort(Sort::newest_first()).with_offset(1);
        let names: Vec<String> = server
            .search(&criteria, &window)
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["mid".to_string(), "old".to_string()]);
    }

    #[test]
    fn test_created_before() {
        let server = InMemoryRepository::new();
        server.insert(folder("team/app", "old", 30));
        server.insert(folder("team/app", "new", 1));

        let criteria = Criteria::new().and(Term::created_before(&(now() - Duration::days(7))));
        let found = server.search(&criteria, &SearchWindow::unbounded()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "old");
    }

    #[test]
    fn test_property_terms() {
        let server = InMemoryRepository::new();
        server.insert(folder("team/app", "a", 1).with_property("deployed", "dev"));
        server.insert(folder("team/app", "b", 1).with_property("deployed", "prod"));
        server.insert(folder("team/app", "c", 1));

        let criteria = Criteria::new().and(Term::equals("@deployed", "dev"));
        assert_eq!(server.search(&criteria, &SearchWindow::unbounded()).unwrap().len(), 1);

        let criteria = Criteria::new().and(Term::not_matches("@deployed", "prod"));
        assert_eq!(server.search(&criteria, &SearchWindow::unbounded()).unwrap().len(), 2);
    }

    #[test]
    fn test_delete_and_failures() {
        let server = InMemoryRepository::new();
        let keep = folder("team/app", "keep", 1);
        let gone = folder("team/app", "gone", 1);
        server.extend(vec![keep.clone(), gone.clone()]);
        server.fail_delete_of("docker-local", "team/app/keep");

        assert!(server.delete(&gone).is_ok());
        assert!(server.delete(&keep).is_err());
        assert!(matches!(server.delete(&gone), Err(RepositoryError::NotFound(_))));
        assert_eq!(server.deleted(), vec!["docker-local:team/app/gone".to_string()]);
        assert_eq!(server.items().len(), 1);
    }

    #[test]
    fn test_failing_search() {
        let server = InMemoryRepository::new();
        server.fail_searches_for("broken-local");
        let criteria = build_criteria("broken-local", ItemType::File, None, vec![]);
        let result = server.search(&criteria, &SearchWindow::unbounded());
        assert!(matches!(result, Err(RepositoryError::Transport(_))));
        assert_eq!(server.search_count(), 1);
    }

    #[test]
    fn test_storage_summary() {
        let server = InMemoryRepository::new();
        server.add_repository("docker-local", RepoType::Local, "Docker");
        server.insert(folder("team", "app", 1));
        server.insert(ArtifactItem::new("docker-local", "team/app", "layer", ItemType::File, now()).with_size(100));

        let summary = server.storage_summary().unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].files_count, 1);
        assert_eq!(summary[0].folders_count, 1);
        assert_eq!(summary[0].items_count, 2);
        assert_eq!(summary[0].used_space_bytes, 100);
    }
}
