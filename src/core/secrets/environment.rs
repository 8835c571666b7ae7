//! Environment-scoped Actions secrets.
//!
//! GitHub addresses environment secrets by the repository's numeric id, so
//! every call needs owner/repo resolved first. The id is looked up once per
//! store and reused.

use std::sync::OnceLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::github::GithubClient;
use super::{EncryptedSecret, PublicKeyEnvelope, SecretStore, SecretTarget};
use crate::error::{Result, StoreError};

#[derive(Deserialize)]
struct Repository {
    id: u64,
}

#[derive(Serialize)]
struct SecretWrite<'a> {
    encrypted_value: &'a str,
    key_id: &'a str,
}

/// Secrets of one deployment environment of a repository.
#[derive(Debug)]
pub struct EnvironmentSecrets {
    client: GithubClient,
    target: SecretTarget,
    owner: String,
    repo: String,
    environment: String,
    repository_id: OnceLock<u64>,
}

impl EnvironmentSecrets {
    pub fn new(
        client: GithubClient,
        owner: impl Into<String>,
        repo: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        let repo = repo.into();
        let environment = environment.into();
        Self {
            client,
            target: SecretTarget::RepositoryEnvironment {
                owner: owner.clone(),
                repo: repo.clone(),
                environment: environment.clone(),
            },
            owner,
            repo,
            environment,
            repository_id: OnceLock::new(),
        }
    }

    async fn repository_id(&self) -> Result<u64> {
        if let Some(id) = self.repository_id.get() {
            return Ok(*id);
        }

        let url = self.client.url(&["repos", &self.owner, &self.repo]);
        let repository: Repository = self
            .client
            .get(&url, &[])
            .await
            .map_err(|e| StoreError::request(&self.target, "resolve repository id", e))?;

        debug!(repository_id = repository.id, "resolved repository id");
        Ok(*self.repository_id.get_or_init(|| repository.id))
    }
}

#[async_trait]
impl SecretStore for EnvironmentSecrets {
    fn target(&self) -> &SecretTarget {
        &self.target
    }

    #[instrument(skip(self), fields(target = %self.target))]
    async fn fetch_public_key(&self) -> Result<PublicKeyEnvelope> {
        let id = self.repository_id().await?.to_string();
        let url = self.client.url(&[
            "repositories",
            &id,
            "environments",
            &self.environment,
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
        let id = self.repository_id().await?.to_string();
        let url = self.client.url(&[
            "repositories",
            &id,
            "environments",
            &self.environment,
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
