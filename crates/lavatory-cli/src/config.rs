//! Runtime configuration derived from the global arguments.

use crate::cli::{Cli, CliFormat};
use crate::error::Result;
use crate::output::OutputFormat;
use lavatory_client::{Credentials, PASSWORD_VAR, URL_VAR, USERNAME_VAR};

/// Build credentials from `--url`, `--username` and `--password`
///
/// Clap has already fallen back to the `ARTIFACTORY_*` variables, so a value
/// missing here is missing from both places.
pub fn credentials(cli: &Cli) -> Result<Credentials> {
    let credentials = Credentials::from_lookup(|name| match name {
        URL_VAR => cli.url.clone(),
        USERNAME_VAR => cli.username.clone(),
        PASSWORD_VAR => cli.password.clone(),
        _ => None,
    })?;
    tracing::debug!("Using {:?}", credentials);
    Ok(credentials)
}

/// `EnvFilter` directives for a `-v` count
///
/// Lavatory crates log at info, debug or trace; everything else at warn.
pub fn log_filter(verbose: u8) -> String {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    [
        "lavatory_cli",
        "lavatory_client",
        "lavatory_domain",
        "lavatory_policy",
        "lavatory_retention",
    ]
    .iter()
    .fold("warn".to_string(), |filter, krate| format!("{},{}={}", filter, krate, level))
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}
