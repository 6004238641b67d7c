//! Policy registry and repository-to-policy resolution

use crate::{DefaultPolicy, Policy, PolicyError, RulePolicy};
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Extension of policy files in the extra policies directory
pub const POLICY_EXTENSION: &str = "toml";

/// Policy description record printed by the `policies` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyDescription {
    /// Repository name
    pub repo: String,
    /// Description of the policy that would be applied
    pub policy_description: String,
}

/// Registry of every known policy
///
/// Policies from the extra directory shadow built-ins of the same name.
pub struct PolicySource {
    extra: BTreeMap<String, Box<dyn Policy>>,
    builtin: BTreeMap<String, Box<dyn Policy>>,
}

impl PolicySource {
    /// Register the built-ins and load every policy file in `extra_dir`
    ///
    /// Fails when `extra_dir` is not a directory, a policy file is malformed,
    /// or two file names map to the same policy key.
    pub fn new(extra_dir: Option<&Path>) -> Result<Self, PolicyError> {
        let mut extra = BTreeMap::new();

        if let Some(dir) = extra_dir {
            if !dir.is_dir() {
                return Err(PolicyError::InvalidPoliciesDirectory(dir.to_path_buf()));
            }
            tracing::info!("Searching for policies in {}", dir.display());

            for entry in std::fs::read_dir(dir)? {
                let path = entry?.path();
                if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(POLICY_EXTENSION) {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };

                let policy = RulePolicy::from_file(&path)?;
                match extra.entry(policy_key(stem)) {
                    Entry::Vacant(slot) => {
                        slot.insert(Box::new(policy) as Box<dyn Policy>);
                    }
                    Entry::Occupied(_) => {
                        return Err(PolicyError::InvalidPolicy {
                            path,
                            reason: "duplicate policy key".to_string(),
                        });
                    }
                }
            }
        }

        let source = Self {
            extra,
            builtin: builtin_policies(),
        };
        tracing::debug!("Policies found: {:?}", source.list_policies());
        Ok(source)
    }

    /// Built-in policies only
    pub fn builtin() -> Self {
        Self {
            extra: BTreeMap::new(),
            builtin: builtin_policies(),
        }
    }

    /// Policy for `repo`
    ///
    /// Looks up the repository name with `-` replaced by `_`, first among the
    /// extra policies, then the built-ins. On a miss returns the `default`
    /// policy (looked up the same way) when `allow_default` is set, otherwise
    /// `None`.
    pub fn resolve(&self, repo: &str, allow_default: bool) -> Option<&dyn Policy> {
        if let Some(policy) = self.lookup(&policy_key(repo)) {
            return Some(policy);
        }

        if allow_default {
            tracing::info!("No policy found for {}. Applying Default", repo);
            self.lookup(DefaultPolicy::NAME)
        } else {
            tracing::info!("No policy found for {}. Skipping Default", repo);
            None
        }
    }

    fn lookup(&self, key: &str) -> Option<&dyn Policy> {
        self.extra
            .get(key)
            .or_else(|| self.builtin.get(key))
            .map(|policy| &**policy)
    }

    /// Names of every known policy
    pub fn list_policies(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self.extra.keys().chain(self.builtin.keys()).collect();
        names.into_iter().cloned().collect()
    }

    /// Description of the policy `repo` resolves to, default included
    pub fn describe(&self, repo: &str) -> PolicyDescription {
        let policy_description = self
            .resolve(repo, true)
            .map(|policy| policy.description().to_string())
            .unwrap_or_default();
        tracing::info!("{} - {}", repo, policy_description);

        PolicyDescription {
            repo: repo.to_string(),
            policy_description,
        }
    }
}

/// Registry key of a repository or policy file name
pub fn policy_key(name: &str) -> String {
    name.replace('-', "_")
}

fn builtin_policies() -> BTreeMap<String, Box<dyn Policy>> {
    let mut builtin: BTreeMap<String, Box<dyn Policy>> = BTreeMap::new();
    builtin.insert(DefaultPolicy::NAME.to_string(), Box::new(DefaultPolicy));
    builtin
}
