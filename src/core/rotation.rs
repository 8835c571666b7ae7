//! Access key rotation protocol.
//!
//! ```text
//! CHECK → PROVISION → FETCH_KEY → PUBLISH_ID → PUBLISH_SECRET → RETIRE → DONE
//!   │
//!   └→ ABORT (identity already at the key cap)       any step → FAILED
//! ```
//!
//! Steps run strictly in order. The previous key is only deleted once both
//! new secrets are published, so any failure before RETIRE leaves the old
//! credential live. Outcomes are reported through a [`Notifier`] and the
//! returned [`RotationOutcome`]; errors never escape [`rotate`].

use std::fmt;

use tracing::{info, warn};

use crate::core::cipher;
use crate::core::constants::MAX_ACCESS_KEYS;
use crate::core::credentials::Credentials;
use crate::core::secrets::{EncryptedSecret, PublicKeyEnvelope, SecretStore, SecretTarget};
use crate::core::types::{AccessKeyId, IdentityName, SecretName};
use crate::error::Error;

/// Receives progress and failure messages.
pub trait Notifier {
    /// A step is about to run.
    fn notify(&self, message: &str);

    /// The run did not complete.
    fn report_failure(&self, message: &str);
}

/// Everything a single rotation needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationInput {
    pub identity: IdentityName,
    pub access_key_id_name: SecretName,
    pub secret_access_key_name: SecretName,
    /// Target the store is built for; progress messages name the store's own
    /// target, since that is where writes go.
    pub target: SecretTarget,
}

/// Protocol step, used to tell where a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Check,
    Provision,
    FetchKey,
    PublishId,
    PublishSecret,
    Retire,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Check => "check",
            Self::Provision => "provision",
            Self::FetchKey => "fetch key",
            Self::PublishId => "publish access key id",
            Self::PublishSecret => "publish secret access key",
            Self::Retire => "retire",
        };
        f.write_str(name)
    }
}

/// Result of a rotation run.
#[derive(Debug)]
pub enum RotationOutcome {
    /// New key published; `retired` is the deleted previous key, if any.
    Rotated {
        new_access_key_id: AccessKeyId,
        retired: Option<AccessKeyId>,
    },
    /// The identity already held the maximum number of keys.
    Refused { existing: Vec<AccessKeyId> },
    /// A step failed; nothing after it ran.
    Failed { step: Step, error: Error },
}

impl RotationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Rotated { .. })
    }
}

/// Rotate the identity's access key and publish the new pair.
///
/// 1. List current keys; refuse if the identity is at the cap
/// 2. Create a new key pair
/// 3. Fetch the target's public key
/// 4. Seal and publish the access key id
/// 5. Seal and publish the secret access key
/// 6. Delete the key that existed before step 2 (skipped when there was none)
pub async fn rotate(
    input: &RotationInput,
    credentials: &dyn Credentials,
    store: &dyn SecretStore,
    notifier: &dyn Notifier,
) -> RotationOutcome {
    let identity = input.identity.as_str();

    info!(%identity, target = %store.target(), "starting rotation");
    notifier.notify(&format!("checking access keys of IAM user {}", identity));

    let existing = match credentials.list(identity).await {
        Ok(keys) => keys,
        Err(error) => return failed(notifier, Step::Check, error),
    };

    if existing.len() >= MAX_ACCESS_KEYS {
        let refusal = Error::Precondition {
            identity: identity.to_string(),
            count: existing.len(),
        };
        warn!(%identity, count = existing.len(), "refusing rotation");
        notifier.report_failure(&refusal.to_string());
        return RotationOutcome::Refused { existing };
    }

    let previous = existing.first().cloned();

    match provision_and_publish(input, credentials, store, notifier, previous).await {
        Ok(outcome) => outcome,
        Err((step, error)) => failed(notifier, step, error),
    }
}

async fn provision_and_publish(
    input: &RotationInput,
    credentials: &dyn Credentials,
    store: &dyn SecretStore,
    notifier: &dyn Notifier,
    previous: Option<AccessKeyId>,
) -> Result<RotationOutcome, (Step, Error)> {
    let identity = input.identity.as_str();

    info!(step = %Step::Provision, "running step");
    notifier.notify(&format!("creating new access key for {}", identity));
    let pair = credentials
        .create(identity)
        .await
        .map_err(|e| (Step::Provision, e))?;

    info!(step = %Step::FetchKey, "running step");
    notifier.notify(&format!("fetching public key for {}", store.target()));
    let public_key = store
        .fetch_public_key()
        .await
        .map_err(|e| (Step::FetchKey, e))?;

    info!(step = %Step::PublishId, "running step");
    notifier.notify(&format!(
        "updating secret {} in {}",
        input.access_key_id_name,
        store.target()
    ));
    publish(store, &public_key, &input.access_key_id_name, pair.id.as_bytes())
        .await
        .map_err(|e| (Step::PublishId, e))?;

    info!(step = %Step::PublishSecret, "running step");
    notifier.notify(&format!(
        "updating secret {} in {}",
        input.secret_access_key_name,
        store.target()
    ));
    publish(
        store,
        &public_key,
        &input.secret_access_key_name,
        pair.secret.as_bytes(),
    )
    .await
    .map_err(|e| (Step::PublishSecret, e))?;

    let retired = match previous {
        Some(previous) => {
            info!(step = %Step::Retire, access_key_id = %previous, "running step");
            notifier.notify(&format!("deleting previous access key {}", previous));
            credentials
                .delete(identity, &previous)
                .await
                .map_err(|e| (Step::Retire, e))?;
            Some(previous)
        }
        None => {
            info!("no previous access key to retire");
            notifier.notify(&format!("{} had no previous access key to delete", identity));
            None
        }
    };

    info!(new_access_key_id = %pair.id, "rotation complete");
    Ok(RotationOutcome::Rotated {
        new_access_key_id: pair.id.clone(),
        retired,
    })
}

async fn publish(
    store: &dyn SecretStore,
    public_key: &PublicKeyEnvelope,
    name: &str,
    plaintext: &[u8],
) -> crate::error::Result<()> {
    let ciphertext = cipher::encrypt(plaintext, &public_key.key)?;
    store
        .upsert(&EncryptedSecret {
            name: name.to_string(),
            ciphertext,
            key_id: public_key.key_id.clone(),
        })
        .await
}

fn failed(notifier: &dyn Notifier, step: Step, error: Error) -> RotationOutcome {
    warn!(%step, %error, "rotation failed");
    notifier.report_failure(&format!("rotation failed at {}: {}", step, error));
    RotationOutcome::Failed { step, error }
}
