//! AWS IAM credential provider.
//!
//! Wraps `aws-sdk-iam` over an already-loaded [`SdkConfig`], so region,
//! credentials and endpoint come from the caller (default chain in the CLI,
//! a mock endpoint in tests).

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::Client;
use tracing::{debug, instrument};

use super::{AccessKeyPair, Credentials};
use crate::core::types::{AccessKeyId, IdentityName};
use crate::error::{CredentialError, Result};

/// IAM-backed access key provider.
#[derive(Clone, Debug)]
pub struct IamCredentials {
    client: Client,
}

impl IamCredentials {
    /// Build a provider from a loaded AWS configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    /// Build a provider from an existing IAM client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Resolve the IAM user the loaded credentials belong to.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Identity` if the call fails or the caller
    /// is not an IAM user (e.g. an assumed role).
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<IdentityName> {
        debug!("resolving calling IAM user");

        let output = self
            .client
            .get_user()
            .send()
            .await
            .map_err(|e| CredentialError::Identity(DisplayErrorContext(&e).to_string()))?;

        let user = output.user().ok_or_else(|| {
            CredentialError::Identity("response did not include a user".to_string())
        })?;

        let name = user.user_name();
        if name.is_empty() {
            return Err(CredentialError::Identity("response had an empty user name".to_string()).into());
        }

        debug!(identity = %name, "resolved IAM user");
        Ok(name.to_string())
    }
}

#[async_trait]
impl Credentials for IamCredentials {
    #[instrument(skip(self))]
    async fn list(&self, identity: &str) -> Result<Vec<AccessKeyId>> {
        let output = self
            .client
            .list_access_keys()
            .user_name(identity)
            .send()
            .await
            .map_err(|e| CredentialError::List {
                identity: identity.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        let mut keys: Vec<_> = output
            .access_key_metadata()
            .iter()
            .filter_map(|meta| {
                let created = meta.create_date().map(|d| (d.secs(), d.subsec_nanos()));
                meta.access_key_id().map(|id| (created, id.to_string()))
            })
            .collect();

        // IAM does not promise an order; oldest first is the contract.
        keys.sort_by_key(|(created, _)| *created);

        debug!(count = keys.len(), "listed access keys");
        Ok(keys.into_iter().map(|(_, id)| id).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, identity: &str) -> Result<AccessKeyPair> {
        let creation_error = |reason: String| CredentialError::Creation {
            identity: identity.to_string(),
            reason,
        };

        let output = self
            .client
            .create_access_key()
            .user_name(identity)
            .send()
            .await
            .map_err(|e| creation_error(DisplayErrorContext(&e).to_string()))?;

        let key = output
            .access_key()
            .ok_or_else(|| creation_error("response did not include an access key".to_string()))?;

        if key.access_key_id().is_empty() {
            return Err(creation_error("response is missing the access key id".to_string()).into());
        }
        if key.secret_access_key().is_empty() {
            return Err(
                creation_error("response is missing the secret access key".to_string()).into(),
            );
        }

        debug!(access_key_id = %key.access_key_id(), "created access key");
        Ok(AccessKeyPair::new(key.access_key_id(), key.secret_access_key()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, identity: &str, access_key_id: &str) -> Result<()> {
        self.client
            .delete_access_key()
            .user_name(identity)
            .access_key_id(access_key_id)
            .send()
            .await
            .map_err(|e| CredentialError::Deletion {
                identity: identity.to_string(),
                access_key_id: access_key_id.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        debug!("deleted access key");
        Ok(())
    }
}
