//! Repository-scoped Actions secrets.

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use super::github::GithubClient;
use super::{EncryptedSecret, PublicKeyEnvelope, SecretStore, SecretTarget};
use crate::error::{Result, StoreError};

#[derive(Serialize)]
struct SecretWrite<'a> {
    encrypted_value: &'a str,
    key_id: &'a str,
}

/// Secrets of a single repository.
#[derive(Debug)]
pub struct RepositorySecrets {
    client: GithubClient,
    target: SecretTarget,
    owner: String,
    repo: String,
}

impl RepositorySecrets {
    pub fn new(client: GithubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        let owner = owner.into();
        let repo = repo.into();
        Self {
            client,
            target: SecretTarget::Repository {
                owner: owner.clone(),
                repo: repo.clone(),
            },
            owner,
            repo,
        }
    }
}

#[async_trait]
impl SecretStore for RepositorySecrets {
    fn target(&self) -> &SecretTarget {
        &self.target
    }

    #[instrument(skip(self), fields(target = %self.target))]
    async fn fetch_public_key(&self) -> Result<PublicKeyEnvelope> {
        let url = self.client.url(&[
            "repos",
            &self.owner,
            &self.repo,
            "actions",
            "secrets",
            "public-key",
        ]);

        let key = self
            .client
            .get(&url, &[])
            .await
            .map_err(|e| StoreError::request(&self.target, "fetch public key", e))?;

        Ok(key)
    }

    #[instrument(skip(self, secret), fields(target = %self.target, name = %secret.name))]
    async fn upsert(&self, secret: &EncryptedSecret) -> Result<()> {
        let url = self.client.url(&[
            "repos",
            &self.owner,
            &self.repo,
            "actions",
            "secrets",
            &secret.name,
        ]);

        let body = SecretWrite {
            encrypted_value: &secret.ciphertext,
            key_id: &secret.key_id,
        };

        self.client
            .put(&url, &body)
            .await
            .map_err(|e| StoreError::request(&self.target, "upsert secret", e))?;

        Ok(())
    }
}
