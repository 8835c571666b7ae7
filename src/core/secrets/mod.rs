//! Encrypted secret publication.
//!
//! A [`SecretStore`] publishes sealed values into one [`SecretTarget`]:
//! a repository, an environment of a repository, or an organization.
//! Each target kind has its own store so its addressing rules stay visible:
//!
//! - [`RepositorySecrets`]: addressed by owner/repo
//! - [`EnvironmentSecrets`]: addressed by numeric repository id + environment
//! - [`OrganizationSecrets`]: addressed by organization, and preserves the
//!   secret's visibility and selected repositories on every write

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::types::{Ciphertext, SecretName};
use crate::error::Result;

mod environment;
mod github;
mod organization;
mod repository;

pub use environment::EnvironmentSecrets;
pub use github::GithubClient;
pub use organization::{OrganizationSecrets, Scoping};
pub use repository::RepositorySecrets;

/// Where secrets are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretTarget {
    Repository {
        owner: String,
        repo: String,
    },
    RepositoryEnvironment {
        owner: String,
        repo: String,
        environment: String,
    },
    Organization {
        organization: String,
    },
}

impl fmt::Display for SecretTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository { owner, repo } => write!(f, "repository {}/{}", owner, repo),
            Self::RepositoryEnvironment {
                owner,
                repo,
                environment,
            } => write!(f, "environment {} of repository {}/{}", environment, owner, repo),
            Self::Organization { organization } => write!(f, "organization {}", organization),
        }
    }
}

/// The target's current encryption key.
///
/// Fetched fresh for every rotation; GitHub may rotate it server-side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublicKeyEnvelope {
    /// Base64-encoded X25519 public key.
    pub key: String,
    /// Identifier GitHub uses to validate the following write.
    pub key_id: String,
}

/// A sealed value ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedSecret {
    pub name: SecretName,
    pub ciphertext: Ciphertext,
    pub key_id: String,
}

/// Target-scoped encrypted key/value publication.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// The target this store writes to.
    fn target(&self) -> &SecretTarget;

    /// Fetch the target's current public key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Request` if the lookup fails.
    async fn fetch_public_key(&self) -> Result<PublicKeyEnvelope>;

    /// Create or replace a secret.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Request` if the write (or a lookup it depends on)
    /// fails, and `StoreError::SecretNotFound` where a store requires the
    /// secret to exist already.
    async fn upsert(&self, secret: &EncryptedSecret) -> Result<()>;
}

/// Build the store for a target.
pub fn store_for(target: SecretTarget, client: GithubClient) -> Box<dyn SecretStore> {
    match target {
        SecretTarget::Repository { owner, repo } => {
            Box::new(RepositorySecrets::new(client, owner, repo))
        }
        SecretTarget::RepositoryEnvironment {
            owner,
            repo,
            environment,
        } => Box::new(EnvironmentSecrets::new(client, owner, repo, environment)),
        SecretTarget::Organization { organization } => {
            Box::new(OrganizationSecrets::new(client, organization))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GithubClient {
        GithubClient::public("token").unwrap()
    }

    #[test]
    fn test_target_display() {
        let repo = SecretTarget::Repository {
            owner: "acme".into(),
            repo: "api".into(),
        };
        assert_eq!(repo.to_string(), "repository acme/api");

        let env = SecretTarget::RepositoryEnvironment {
            owner: "acme".into(),
            repo: "api".into(),
            environment: "prod".into(),
        };
        assert_eq!(env.to_string(), "environment prod of repository acme/api");

        let org = SecretTarget::Organization {
            organization: "acme".into(),
        };
        assert_eq!(org.to_string(), "organization acme");
    }

    #[test]
    fn test_store_for_keeps_target() {
        let targets = [
            SecretTarget::Repository {
                owner: "acme".into(),
                repo: "api".into(),
            },
            SecretTarget::RepositoryEnvironment {
                owner: "acme".into(),
                repo: "api".into(),
                environment: "prod".into(),
            },
            SecretTarget::Organization {
                organization: "acme".into(),
            },
        ];

        for target in targets {
            let store = store_for(target.clone(), client());
            assert_eq!(store.target(), &target);
        }
    }
}
