//! Access key lifecycle for a single cloud identity.
//!
//! The [`Credentials`] trait is the capability set the rotation protocol
//! drives: list, create, delete. Implementations are thin proxies over the
//! provider and never retry; errors surface unchanged to the caller.
//!
//! ## Adding a New Provider
//!
//! 1. Implement the `Credentials` trait
//! 2. Add the implementation in a new file (e.g., `gcp.rs`)
//! 3. Re-export from this module

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::core::types::AccessKeyId;
use crate::error::Result;

mod iam;

pub use iam::IamCredentials;

/// A freshly created access key pair.
///
/// The secret is only ever returned by `create`; the provider cannot hand it
/// out again, so it lives here until it has been sealed and published.
pub struct AccessKeyPair {
    pub id: AccessKeyId,
    pub secret: Zeroizing<String>,
}

impl AccessKeyPair {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: Zeroizing::new(secret.into()),
        }
    }
}

impl fmt::Debug for AccessKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKeyPair")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Access key provider for one identity at a time.
#[async_trait]
pub trait Credentials: Send + Sync {
    /// List the identity's access key ids, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::List` if the provider call fails.
    async fn list(&self, identity: &str) -> Result<Vec<AccessKeyId>>;

    /// Create a new access key pair for the identity.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Creation` if the provider rejects the call
    /// or returns a pair with a missing id or secret.
    async fn create(&self, identity: &str) -> Result<AccessKeyPair>;

    /// Delete one of the identity's access keys.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Deletion` if the key does not exist or the
    /// provider rejects the call.
    async fn delete(&self, identity: &str, access_key_id: &str) -> Result<()>;
}
