//! Constants used throughout keyturn.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "keyturn.toml";

/// Default secret name for the access key id.
pub const DEFAULT_ACCESS_KEY_ID_NAME: &str = "AWS_ACCESS_KEY_ID";

/// Default secret name for the secret access key.
pub const DEFAULT_SECRET_ACCESS_KEY_NAME: &str = "AWS_SECRET_ACCESS_KEY";

/// Public GitHub REST API endpoint.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub REST API version pinned on every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Media type requested from the GitHub REST API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Page size used when listing organization secret repositories.
pub const GITHUB_PAGE_SIZE: usize = 100;

/// IAM's hard cap on concurrent access keys per user.
pub const MAX_ACCESS_KEYS: usize = 2;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "KEYTURN_LOG";
