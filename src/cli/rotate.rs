//! Rotate command.
//!
//! Resolves settings, wires the AWS and GitHub clients, and runs one
//! rotation on a current-thread runtime.

use std::path::Path;

use aws_config::BehaviorVersion;
use tracing::debug;

use crate::cli::{notify, output, RotateArgs};
use crate::core::config::{Config, Settings};
use crate::core::credentials::IamCredentials;
use crate::core::rotation::{self, Notifier, RotationOutcome};
use crate::core::secrets::{self, GithubClient, SecretTarget};
use crate::error::{Error, Result};

/// Execute one rotation.
///
/// 1. Load config file and merge flags/env
/// 2. Select the secret target
/// 3. Load AWS config and resolve the IAM user if none is configured
/// 4. Run the rotation protocol
pub fn execute(args: RotateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::discover(config_path)?;
    let settings = Settings::resolve(args.into(), config)?;

    // Fail on a bad target before any AWS call.
    let target = settings.target.select()?;
    debug!(%target, "target selected");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Unexpected(format!("failed to create runtime: {}", e)))?;

    let notifier = notify::detect();
    let outcome = rt.block_on(run(&settings, target, notifier.as_ref()))?;

    match outcome {
        RotationOutcome::Rotated {
            new_access_key_id,
            retired,
        } => {
            output::success("access key rotated");
            output::kv("new key:", &new_access_key_id);
            if let Some(retired) = retired {
                output::kv("deleted:", retired);
            }
            Ok(())
        }
        RotationOutcome::Refused { existing } => {
            output::hint(&format!(
                "delete one of {} manually, then run keyturn rotate again",
                existing.join(", ")
            ));
            Err(Error::Reported)
        }
        RotationOutcome::Failed { step, error } => {
            debug!(%step, ?error, "rotation failed");
            Err(Error::Reported)
        }
    }
}

async fn run(
    settings: &Settings,
    target: SecretTarget,
    notifier: &dyn Notifier,
) -> Result<RotationOutcome> {
    let aws = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let credentials = IamCredentials::new(&aws);

    let identity = match &settings.identity {
        Some(identity) => identity.clone(),
        None => credentials.current_user().await?,
    };
    let input = settings.rotation_input(identity, target);

    let client = GithubClient::new(settings.github_token.as_str(), &settings.api_url)?;
    let store = secrets::store_for(input.target.clone(), client);
    debug!(target = %store.target(), identity = %input.identity, "rotating");

    Ok(rotation::rotate(&input, &credentials, store.as_ref(), notifier).await)
}
