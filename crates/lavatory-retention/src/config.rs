//! Settings for the retention strategies
//!
//! Both structs deserialize from TOML with every field optional, which is how
//! policy files embed them.

use lavatory_domain::{ItemType, Term};
use serde::{Deserialize, Serialize};

/// Settings for count-based retention
///
/// # Examples
///
/// ```
/// use lavatory_retention::CountRetention;
///
/// let settings = CountRetention::keep(5);
/// assert_eq!(settings.retention_count, 5);
/// assert_eq!(settings.project_depth, 2);
/// assert_eq!(settings.artifact_depth, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountRetention {
    /// Newest items kept per project
    pub retention_count: usize,

    /// Depth of the project folders
    pub project_depth: u32,

    /// Depth of the artifacts counted inside each project
    pub artifact_depth: u32,

    /// Kind of item counted
    pub item_type: ItemType,

    /// Only evaluate the project with this folder name
    pub project: Option<String>,

    /// Terms added to every per-project search
    pub extra_terms: Vec<Term>,
}

impl Default for CountRetention {
    fn default() -> Self {
        Self {
            retention_count: 10,
            project_depth: 2,
            artifact_depth: 3,
            item_type: ItemType::Folder,
            project: None,
            extra_terms: Vec::new(),
        }
    }
}

impl CountRetention {
    /// Keep `retention_count` items per project, other settings default
    pub fn keep(retention_count: usize) -> Self {
        Self {
            retention_count,
            ..Default::default()
        }
    }
}

/// Settings for time-based retention
///
/// # Examples
///
/// ```
/// use lavatory_retention::TimeRetention;
///
/// let settings: TimeRetention = toml::from_str("keep_days = 30").unwrap();
/// assert_eq!(settings.keep_days, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeRetention {
    /// Items created within this many days are kept
    pub keep_days: u32,

    /// Kind of item considered
    pub item_type: ItemType,

    /// Terms added to the search, typically property filters
    pub extra_terms: Vec<Term>,
}

impl Default for TimeRetention {
    fn default() -> Self {
        Self {
            keep_days: 60,
            item_type: ItemType::File,
            extra_terms: Vec::new(),
        }
    }
}

impl TimeRetention {
    /// Keep items younger than `keep_days`, other settings default
    pub fn keep_days(keep_days: u32) -> Self {
        Self {
            keep_days,
            ..Default::default()
        }
    }
}
