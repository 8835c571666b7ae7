//! Organization-scoped Actions secrets.
//!
//! Organization secrets carry a visibility (`all`, `private` or `selected`)
//! and, for `selected`, the repositories allowed to read them. A PUT without
//! those fields resets them, so `upsert` reads the current values and writes
//! them back unchanged alongside the new ciphertext.
//!
//! The repository list is only read (and written) for `selected`. GitHub
//! rejects listing repositories of an `all` or `private` secret, and a PUT
//! without `selected_repository_ids` leaves those visibilities intact.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::github::GithubClient;
use super::{EncryptedSecret, PublicKeyEnvelope, SecretStore, SecretTarget};
use crate::core::constants::GITHUB_PAGE_SIZE;
use crate::error::{Result, StoreError};

const SELECTED: &str = "selected";

#[derive(Deserialize)]
struct OrganizationSecret {
    visibility: String,
}

#[derive(Deserialize)]
struct RepositoryPage {
    total_count: usize,
    repositories: Vec<RepositoryRef>,
}

#[derive(Deserialize)]
struct RepositoryRef {
    id: u64,
}

#[derive(Serialize)]
struct SecretWrite<'a> {
    encrypted_value: &'a str,
    key_id: &'a str,
    visibility: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_repository_ids: Option<&'a [u64]>,
}

/// Current scoping of an organization secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoping {
    pub visibility: String,
    /// Only read when visibility is `selected`.
    pub selected_repository_ids: Option<Vec<u64>>,
}

/// Secrets of an organization.
#[derive(Debug)]
pub struct OrganizationSecrets {
    client: GithubClient,
    target: SecretTarget,
    organization: String,
}

impl OrganizationSecrets {
    pub fn new(client: GithubClient, organization: impl Into<String>) -> Self {
        let organization = organization.into();
        Self {
            client,
            target: SecretTarget::Organization {
                organization: organization.clone(),
            },
            organization,
        }
    }

    /// Read the visibility and selected repositories of an existing secret.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SecretNotFound` if the secret does not exist,
    /// `StoreError::Request` for any other failure.
    pub async fn scoping(&self, name: &str) -> Result<Scoping> {
        let url = self.client.url(&[
            "orgs",
            &self.organization,
            "actions",
            "secrets",
            name,
        ]);

        let secret: OrganizationSecret = self.client.get(&url, &[]).await.map_err(|e| {
            if e.is_not_found() {
                StoreError::SecretNotFound {
                    target: self.target.to_string(),
                    name: name.to_string(),
                }
            } else {
                StoreError::request(&self.target, "read secret visibility", e)
            }
        })?;

        let selected_repository_ids = if secret.visibility == SELECTED {
            Some(self.selected_repository_ids(name).await?)
        } else {
            None
        };

        debug!(
            visibility = %secret.visibility,
            selected = selected_repository_ids.as_ref().map(Vec::len),
            "read secret scoping"
        );

        Ok(Scoping {
            visibility: secret.visibility,
            selected_repository_ids,
        })
    }

    async fn selected_repository_ids(&self, name: &str) -> Result<Vec<u64>> {
        let url = self.client.url(&[
            "orgs",
            &self.organization,
            "actions",
            "secrets",
            name,
            "repositories",
        ]);

        let mut ids = Vec::new();
        let mut page = 1usize;
        loop {
            let query = [
                ("per_page", GITHUB_PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ];
            let batch: RepositoryPage = self
                .client
                .get(&url, &query)
                .await
                .map_err(|e| StoreError::request(&self.target, "list selected repositories", e))?;

            let fetched = batch.repositories.len();
            ids.extend(batch.repositories.into_iter().map(|r| r.id));

            if fetched == 0 || ids.len() >= batch.total_count {
                break;
            }
            page += 1;
        }

        Ok(ids)
    }
}

#[async_trait]
impl SecretStore for OrganizationSecrets {
    fn target(&self) -> &SecretTarget {
        &self.target
    }

    #[instrument(skip(self), fields(target = %self.target))]
    async fn fetch_public_key(&self) -> Result<PublicKeyEnvelope> {
        let url = self.client.url(&[
            "orgs",
            &self.organization,
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
        let scoping = self.scoping(&secret.name).await?;

        let url = self.client.url(&[
            "orgs",
            &self.organization,
            "actions",
            "secrets",
            &secret.name,
        ]);

        let body = SecretWrite {
            encrypted_value: &secret.ciphertext,
            key_id: &secret.key_id,
            visibility: &scoping.visibility,
            selected_repository_ids: scoping.selected_repository_ids.as_deref(),
        };

        self.client
            .put(&url, &body)
            .await
            .map_err(|e| StoreError::request(&self.target, "upsert secret", e))?;

        Ok(())
    }
}
