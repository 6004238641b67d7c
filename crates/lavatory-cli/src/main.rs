//! Lavatory CLI - apply retention policies to Artifactory repositories.

use clap::Parser;
use lavatory_cli::commands;
use lavatory_cli::config::{credentials, log_filter};
use lavatory_cli::{Cli, Command, Formatter};
use lavatory_client::ArtifactoryClient;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose)));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let formatter = Formatter::new(cli.format.into(), !cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run(cli: Cli, formatter: &Formatter) -> lavatory_cli::Result<()> {
    if let Command::Version = cli.command {
        commands::execute_version();
        return Ok(());
    }

    let client = ArtifactoryClient::new(credentials(&cli)?)?;

    match cli.command {
        Command::Purge(args) => commands::execute_purge(args, &client, formatter),
        Command::Policies(args) => commands::execute_policies(args, &client, formatter),
        Command::Stats(args) => commands::execute_stats(args, &client, formatter),
        Command::Version => Ok(()),
    }
}
