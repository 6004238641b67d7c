//! Lavatory policies
//!
//! Maps repositories to retention policies.
//!
//! A policy for repository `docker-local` is a file named `docker_local.toml`
//! in the extra policies directory (see [`rules`] for the format). Repositories
//! without a file get the built-in [`DefaultPolicy`] unless defaults are
//! disabled, in which case they are skipped.
//!
//! ```
//! use lavatory_policy::PolicySource;
//!
//! let source = PolicySource::new(None).unwrap();
//! assert!(source.resolve("docker-local", true).is_some());
//! assert!(source.resolve("docker-local", false).is_none());
//! ```

#![warn(missing_docs)]

mod error;
mod policy;
pub mod rules;
mod source;

pub use error::PolicyError;
pub use policy::{DefaultPolicy, Policy};
pub use rules::{AllArtifacts, Rule, RulePolicy};
pub use source::{policy_key, PolicyDescription, PolicySource, POLICY_EXTENSION};
