//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use lavatory_client::{PASSWORD_VAR, URL_VAR, USERNAME_VAR};
use lavatory_domain::RepoType;
use std::path::PathBuf;

/// Lavatory - apply retention policies to Artifactory repositories.
#[derive(Debug, Parser)]
#[command(name = "lavatory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Artifactory base URL
    #[arg(long, env = URL_VAR, global = true)]
    pub url: Option<String>,

    /// Artifactory user name
    #[arg(long, env = USERNAME_VAR, global = true)]
    pub username: Option<String>,

    /// Artifactory password or API key
    #[arg(long, env = PASSWORD_VAR, hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply retention policies and purge artifacts
    Purge(PurgeArgs),

    /// Print the policy description of every selected repository as JSON
    Policies(PoliciesArgs),

    /// Print repository storage metadata
    Stats(StatsArgs),

    /// Print the version
    Version,
}

/// Repository selection shared by several commands.
#[derive(Debug, Clone, clap::Args)]
pub struct RepoSelection {
    /// Repository to run against; repeatable. All repositories of the type when omitted
    #[arg(long = "repo")]
    pub repos: Vec<String>,

    /// Type of repositories to select
    #[arg(long, value_enum, default_value = "local")]
    pub repo_type: RepoTypeArg,
}

/// Arguments for the purge command.
#[derive(Debug, Parser)]
pub struct PurgeArgs {
    /// Extra directory of policy files
    #[arg(long)]
    pub policies_path: Option<PathBuf>,

    /// Only log what would be purged (default)
    #[arg(long = "dryrun", overrides_with = "nodryrun")]
    pub dryrun: bool,

    /// Actually delete artifacts
    #[arg(long = "nodryrun", overrides_with = "dryrun")]
    pub nodryrun: bool,

    /// Apply the default policy to repositories without one (default)
    #[arg(long = "default", overrides_with = "no_default")]
    pub default: bool,

    /// Skip repositories without a policy
    #[arg(long = "no-default", overrides_with = "default")]
    pub no_default: bool,

    #[command(flatten)]
    pub selection: RepoSelection,
}

impl PurgeArgs {
    /// Whether the run only logs
    pub fn dry_run(&self) -> bool {
        !self.nodryrun
    }

    /// Whether unmatched repositories get the default policy
    pub fn allow_default(&self) -> bool {
        !self.no_default
    }
}

/// Arguments for the policies command.
#[derive(Debug, Parser)]
pub struct PoliciesArgs {
    /// Extra directory of policy files
    #[arg(long)]
    pub policies_path: Option<PathBuf>,

    #[command(flatten)]
    pub selection: RepoSelection,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Repository to show; repeatable. Every repository when omitted
    #[arg(long = "repo")]
    pub repos: Vec<String>,
}

/// Repository type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RepoTypeArg {
    /// Local repositories
    Local,
    /// Virtual repositories
    Virtual,
    /// Remote repository caches
    Cache,
}

impl From<RepoTypeArg> for RepoType {
    fn from(repo_type: RepoTypeArg) -> Self {
        match repo_type {
            RepoTypeArg::Local => RepoType::Local,
            RepoTypeArg::Virtual => RepoType::Virtual,
            RepoTypeArg::Cache => RepoType::Cache,
        }
    }
}
