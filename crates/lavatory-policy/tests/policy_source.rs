//! Policy resolution against a policies directory on disk

use chrono::{Duration, Utc};
use lavatory_domain::{ArtifactItem, InMemoryRepository, ItemType};
use lavatory_policy::{DefaultPolicy, Policy, PolicyError, PolicySource};
use lavatory_retention::Artifactory;
use std::fs;
use tempfile::TempDir;

const DOCKER_POLICY: &str = r#"
description = "Keeps the newest tag of every image"

[[rules]]
kind = "count"
retention_count = 1
"#;

const OVERRIDE_DEFAULT: &str = r#"
description = "Site-wide default: files older than a year"

[[rules]]
kind = "time"
keep_days = 365
"#;

fn policies_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

#[test]
fn test_extra_policy_resolves_by_normalized_name() {
    let dir = policies_dir(&[("docker_local.toml", DOCKER_POLICY)]);
    let source = PolicySource::new(Some(dir.path())).unwrap();

    let policy = source.resolve("docker-local", false).unwrap();
    assert_eq!(policy.description(), "Keeps the newest tag of every image");
    assert_eq!(source.list_policies(), vec!["default".to_string(), "docker_local".to_string()]);
}

#[test]
fn test_extra_policy_evaluates() {
    let dir = policies_dir(&[("docker_local.toml", DOCKER_POLICY)]);
    let source = PolicySource::new(Some(dir.path())).unwrap();

    let now = Utc::now();
    let repository = InMemoryRepository::new();
    repository.extend(vec![
        ArtifactItem::new("docker-local", "team", "app", ItemType::Folder, now - Duration::days(50)),
        ArtifactItem::new("docker-local", "team/app", "1.0", ItemType::Folder, now - Duration::days(30)),
        ArtifactItem::new("docker-local", "team/app", "1.1", ItemType::Folder, now - Duration::days(20)),
    ]);

    let artifactory = Artifactory::new(&repository, "docker-local");
    let purgelist = source.resolve("docker-local", true).unwrap().purgelist(&artifactory).unwrap();

    assert_eq!(purgelist.len(), 1);
    assert_eq!(purgelist[0].full_path(), "team/app/1.0");
}

#[test]
fn test_fallback_without_matching_file() {
    let dir = policies_dir(&[("docker_local.toml", DOCKER_POLICY)]);
    let source = PolicySource::new(Some(dir.path())).unwrap();

    let fallback = source.resolve("yum-local", true).unwrap();
    assert_eq!(fallback.description(), DefaultPolicy.description());
    assert!(source.resolve("yum-local", false).is_none());
}

#[test]
fn test_extra_directory_shadows_builtin() {
    let dir = policies_dir(&[("default.toml", OVERRIDE_DEFAULT)]);
    let source = PolicySource::new(Some(dir.path())).unwrap();

    let fallback = source.resolve("anything-local", true).unwrap();
    assert_eq!(fallback.description(), "Site-wide default: files older than a year");

    let by_name = source.resolve("default", false).unwrap();
    assert_eq!(by_name.description(), "Site-wide default: files older than a year");
}

#[test]
fn test_other_files_ignored() {
    let dir = policies_dir(&[("README.md", "# notes"), ("docker_local.py", "def purgelist(a): pass")]);
    let source = PolicySource::new(Some(dir.path())).unwrap();
    assert_eq!(source.list_policies(), vec!["default".to_string()]);
}

#[test]
fn test_missing_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    match PolicySource::new(Some(&missing)) {
        Err(PolicyError::InvalidPoliciesDirectory(path)) => assert_eq!(path, missing),
        Err(other) => panic!("Expected invalid directory, got {}", other),
        Ok(_) => panic!("Expected invalid directory"),
    }
}

#[test]
fn test_file_instead_of_directory_is_fatal() {
    let dir = policies_dir(&[("docker_local.toml", DOCKER_POLICY)]);
    let file = dir.path().join("docker_local.toml");
    assert!(matches!(
        PolicySource::new(Some(&file)),
        Err(PolicyError::InvalidPoliciesDirectory(_))
    ));
}

#[test]
fn test_malformed_policy_is_fatal() {
    let dir = policies_dir(&[("docker_local.toml", "description = \n")]);
    match PolicySource::new(Some(dir.path())) {
        Err(PolicyError::InvalidPolicy { path, .. }) => assert!(path.ends_with("docker_local.toml")),
        Err(other) => panic!("Expected invalid policy, got {}", other),
        Ok(_) => panic!("Expected invalid policy"),
    }
}

#[test]
fn test_colliding_file_names_are_fatal() {
    let dir = policies_dir(&[("docker-local.toml", DOCKER_POLICY), ("docker_local.toml", OVERRIDE_DEFAULT)]);
    match PolicySource::new(Some(dir.path())) {
        Err(PolicyError::InvalidPolicy { reason, .. }) => assert_eq!(reason, "duplicate policy key"),
        Err(other) => panic!("Expected duplicate policy key, got {}", other),
        Ok(_) => panic!("Expected duplicate policy key"),
    }
}

#[test]
fn test_describe_records() {
    let dir = policies_dir(&[("docker_local.toml", DOCKER_POLICY)]);
    let source = PolicySource::new(Some(dir.path())).unwrap();

    let records: Vec<_> = ["docker-local", "yum-local"].iter().map(|repo| source.describe(repo)).collect();
    assert_eq!(records[0].policy_description, "Keeps the newest tag of every image");
    assert_eq!(records[1].repo, "yum-local");
    assert_eq!(records[1].policy_description, DefaultPolicy.description());
}
