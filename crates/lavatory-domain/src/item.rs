//! Artifact module - files and folders returned by repository searches

use crate::error::CriteriaError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Path value the server uses for items sitting at the repository root
pub const ROOT_PATH: &str = ".";

/// Kind of item a search targets
///
/// Search results are always `File` or `Folder`; `Any` only appears in
/// queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Regular artifact
    File,
    /// Folder in the repository tree
    Folder,
    /// Either of the above
    Any,
}

impl ItemType {
    /// Get the item type as it appears in search criteria
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::File => "file",
            ItemType::Folder => "folder",
            ItemType::Any => "any",
        }
    }

    /// Parse an item type, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "file" => Some(ItemType::File),
            "folder" => Some(ItemType::Folder),
            "any" => Some(ItemType::Any),
            _ => None,
        }
    }

    /// Whether an item of type `other` satisfies a query for `self`
    pub fn admits(&self, other: ItemType) -> bool {
        *self == ItemType::Any || *self == other
    }
}

impl std::str::FromStr for ItemType {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            CriteriaError::InvalidArgument(format!(
                "item type must be one of file, folder, any (got '{}')",
                s
            ))
        })
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file or folder stored in a repository
///
/// Produced by searches. `(repo, path, name)` identifies the artifact; the
/// same artifact may appear more than once in a purge list when subtree
/// queries overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactItem {
    /// Repository key
    pub repo: String,

    /// Folder path within the repository (`"."` at the root)
    pub path: String,

    /// Item name
    pub name: String,

    /// File or folder
    pub item_type: ItemType,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Size in bytes (zero for folders)
    pub size: u64,

    /// Custom properties attached to the item
    pub properties: HashMap<String, String>,

    /// Download statistics, when the search requested them
    pub stats: Option<HashMap<String, String>>,
}

impl ArtifactItem {
    /// Create an item with no properties or statistics
    pub fn new(
        repo: impl Into<String>,
        path: impl Into<String>,
        name: impl Into<String>,
        item_type: ItemType,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            repo: repo.into(),
            path: path.into(),
            name: name.into(),
            item_type,
            created,
            size: 0,
            properties: HashMap::new(),
            stats: None,
        }
    }

    /// Set the size in bytes
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Attach a property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Whether the item sits directly under the repository root
    pub fn is_at_root(&self) -> bool {
        self.path.is_empty() || self.path == ROOT_PATH
    }

    /// Path of the item relative to the repository root
    pub fn full_path(&self) -> String {
        if self.is_at_root() {
            self.name.clone()
        } else {
            format!("{}/{}", self.path, self.name)
        }
    }

    /// Tree depth as the search API counts it (root items have depth 1)
    pub fn depth(&self) -> u32 {
        if self.is_at_root() {
            return 1;
        }
        self.path.split('/').filter(|segment| !segment.is_empty()).count() as u32 + 1
    }
}

impl fmt::Display for ArtifactItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repo, self.full_path())
    }
}
