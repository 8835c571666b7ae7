//! Error types for keyturn.
//!
//! Each concern has its own error enum; [`Error`] wraps them so callers can
//! propagate with `?` and still match on the source of a failure.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The identity already holds the maximum number of access keys.
    #[error("AWS user {identity} already has {count} access keys")]
    Precondition { identity: String, count: usize },

    #[error("unexpected error: {0}")]
    Unexpected(String),

    /// The failure was already shown to the user by a notifier.
    #[error("rotation did not complete")]
    Reported,
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Access key lifecycle errors from the credential provider.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("failed to list access keys of {identity}: {reason}")]
    List { identity: String, reason: String },

    #[error("failed to create access key for {identity}: {reason}")]
    Creation { identity: String, reason: String },

    #[error("failed to delete access key {access_key_id} of {identity}: {reason}")]
    Deletion {
        identity: String,
        access_key_id: String,
        reason: String,
    },

    #[error("failed to resolve the calling IAM user: {0}")]
    Identity(String),
}

/// Sealed-box encryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Secret store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A fetch or write against the store failed.
    #[error("{operation} failed for {target}: {reason}")]
    Request {
        target: String,
        operation: &'static str,
        reason: String,
    },

    /// The organization secret to update does not exist yet.
    #[error("secret {name} not found in {target}")]
    SecretNotFound { target: String, name: String },
}

impl StoreError {
    pub(crate) fn request(
        target: impl ToString,
        operation: &'static str,
        reason: impl ToString,
    ) -> Self {
        Self::Request {
            target: target.to_string(),
            operation,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
