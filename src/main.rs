//! Keyturn - Rotate AWS IAM access keys into GitHub Actions secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyturn::cli::output;
use keyturn::cli::{execute, Cli};
use keyturn::core::constants::LOG_ENV;
use keyturn::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keyturn=debug")
        } else {
            EnvFilter::new("keyturn=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.config) {
        if matches!(e, Error::Reported) {
            std::process::exit(1);
        }

        let suggestion = match &e {
            Error::Config(ConfigError::MissingField {
                field: "github token",
            }) => Some("set GITHUB_TOKEN or pass --github-token"),
            Error::Config(ConfigError::MissingField {
                field: "repository",
            }) => Some("set GITHUB_REPOSITORY, pass --repository, or use --organization"),
            Error::Credential(_) => Some("check the AWS credentials available to this process"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
