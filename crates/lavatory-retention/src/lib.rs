//! Lavatory retention engine
//!
//! Evaluates retention strategies against one repository and purges the
//! result.
//!
//! # Overview
//!
//! - **Count-based retention**: keep the newest N artifacts of every project
//!   folder
//! - **Time-based retention**: purge everything created more than N days ago
//! - **All artifacts**: list everything (the default policy)
//! - **Purge**: delete a purge list, or only log it in dry-run mode
//! - **Reporting**: storage and file-count reduction per repository, plus run
//!   metrics
//!
//! # Usage
//!
//! ```
//! use lavatory_domain::InMemoryRepository;
//! use lavatory_retention::{Artifactory, TimeRetention};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = InMemoryRepository::new();
//! let artifactory = Artifactory::new(&repository, "yum-local");
//!
//! let purgelist = artifactory.time_based_retention(&TimeRetention::keep_days(30))?;
//! let purged = artifactory.purge(true, &purgelist);
//! assert_eq!(purged, purgelist.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Strategy settings deserialize from TOML:
//!
//! ```toml
//! retention_count = 5
//! project_depth = 2
//! artifact_depth = 3
//! item_type = "folder"
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod purge;
mod report;
mod retention;

pub use config::{CountRetention, TimeRetention};
pub use error::RetentionError;
pub use metrics::RunMetrics;
pub use purge::purge;
pub use report::{get_percentage, PerformanceReport};
pub use retention::Artifactory;
