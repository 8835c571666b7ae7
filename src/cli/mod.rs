//! Command-line interface.

pub mod completions;
pub mod notify;
pub mod output;
pub mod rotate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::Overrides;

/// Keyturn - Rotate AWS IAM access keys into GitHub Actions secrets.
#[derive(Parser)]
#[command(
    name = "keyturn",
    about = "Rotate AWS IAM access keys into GitHub Actions secrets",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./keyturn.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a new access key, publish it, and delete the previous one
    Rotate(RotateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flags for `keyturn rotate`.
///
/// Environment variable names match the inputs a GitHub Action receives.
#[derive(Args, Debug, Default, Clone)]
pub struct RotateArgs {
    /// GitHub token with permission to write secrets
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// IAM user to rotate (defaults to the calling user)
    #[arg(long, env = "INPUT_IAM-USER-NAME")]
    pub iam_user_name: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Publish organization secrets instead of repository secrets
    #[arg(long, env = "INPUT_ORGANIZATION")]
    pub organization: Option<String>,

    /// Publish secrets of this repository environment
    #[arg(long, env = "INPUT_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Secret name for the access key id [default: AWS_ACCESS_KEY_ID]
    #[arg(long, env = "INPUT_GITHUB-ACCESS-KEY-ID-NAME")]
    pub access_key_id_name: Option<String>,

    /// Secret name for the secret access key [default: AWS_SECRET_ACCESS_KEY]
    #[arg(long, env = "INPUT_GITHUB-SECRET-ACCESS-KEY-NAME")]
    pub secret_access_key_name: Option<String>,

    /// GitHub API base URL [default: https://api.github.com]
    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,
}

impl From<RotateArgs> for Overrides {
    fn from(args: RotateArgs) -> Self {
        Self {
            github_token: args.github_token,
            iam_user_name: args.iam_user_name,
            repository: args.repository,
            organization: args.organization,
            environment: args.environment,
            api_url: args.github_api_url,
            access_key_id_name: args.access_key_id_name,
            secret_access_key_name: args.secret_access_key_name,
        }
    }
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, config: Option<PathBuf>) -> crate::error::Result<()> {
    match command {
        Command::Rotate(args) => rotate::execute(args, config.as_deref()),
        Command::Completions { shell } => completions::execute(shell),
    }
}
