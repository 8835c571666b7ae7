//! Settings resolution.
//!
//! Settings come from three layers, highest precedence first:
//!
//! 1. command-line flags and environment variables ([`Overrides`])
//! 2. the optional `keyturn.toml` file ([`Config`])
//! 3. built-in defaults
//!
//! The GitHub token is only accepted from the first layer.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::rotation::RotationInput;
use crate::core::secrets::SecretTarget;
use crate::core::target::TargetConfig;
use crate::core::types::{IdentityName, SecretName};
use crate::core::validation::{validate_identity, validate_secret_name};
use crate::error::{ConfigError, Result};

/// Contents of `keyturn.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub aws: AwsSection,
    #[serde(default)]
    pub github: GithubSection,
    #[serde(default)]
    pub secrets: SecretsSection,
}

/// `[aws]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsSection {
    /// IAM user whose keys are rotated; the calling user when unset
    pub user_name: Option<String>,
}

/// `[github]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GithubSection {
    /// `owner/repo`
    pub repository: Option<String>,
    pub organization: Option<String>,
    pub environment: Option<String>,
    pub api_url: Option<String>,
}

/// `[secrets]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretsSection {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Config {
    /// Path of the default configuration file in the current directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed or has unknown keys.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        Ok(config)
    }

    /// Load an explicitly named file, or the default file if it exists.
    ///
    /// An explicit path must exist; a missing default file yields an empty
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns error if a file is present but cannot be read or parsed.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load(&path)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Values supplied by flags or environment variables.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub github_token: Option<String>,
    pub iam_user_name: Option<String>,
    pub repository: Option<String>,
    pub organization: Option<String>,
    pub environment: Option<String>,
    pub api_url: Option<String>,
    pub access_key_id_name: Option<String>,
    pub secret_access_key_name: Option<String>,
}

/// Fully resolved, validated settings for one run.
pub struct Settings {
    pub github_token: Zeroizing<String>,
    pub api_url: String,
    /// `None` means "the calling IAM user"
    pub identity: Option<IdentityName>,
    pub access_key_id_name: SecretName,
    pub secret_access_key_name: SecretName,
    pub target: TargetConfig,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("github_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("identity", &self.identity)
            .field("access_key_id_name", &self.access_key_id_name)
            .field("secret_access_key_name", &self.secret_access_key_name)
            .field("target", &self.target)
            .finish()
    }
}

impl Settings {
    /// Merge the layers and validate the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if no GitHub token is available,
    /// or `ConfigError::InvalidValue` for malformed names.
    pub fn resolve(overrides: Overrides, config: Config) -> Result<Self> {
        let github_token = present(overrides.github_token)
            .ok_or(ConfigError::MissingField {
                field: "github token",
            })?;

        let api_url = present(overrides.api_url)
            .or(present(config.github.api_url))
            .unwrap_or_else(|| constants::DEFAULT_GITHUB_API_URL.to_string());

        let identity = present(overrides.iam_user_name).or(present(config.aws.user_name));
        if let Some(identity) = &identity {
            validate_identity(identity)?;
        }

        let access_key_id_name = present(overrides.access_key_id_name)
            .or(present(config.secrets.access_key_id))
            .unwrap_or_else(|| constants::DEFAULT_ACCESS_KEY_ID_NAME.to_string());
        validate_secret_name("access key id secret name", &access_key_id_name)?;

        let secret_access_key_name = present(overrides.secret_access_key_name)
            .or(present(config.secrets.secret_access_key))
            .unwrap_or_else(|| constants::DEFAULT_SECRET_ACCESS_KEY_NAME.to_string());
        validate_secret_name("secret access key secret name", &secret_access_key_name)?;

        if access_key_id_name.eq_ignore_ascii_case(&secret_access_key_name) {
            warn!(
                name = %access_key_id_name,
                "both values share one secret name; the secret access key will overwrite the id"
            );
        }

        let target = TargetConfig {
            repository: present(overrides.repository).or(present(config.github.repository)),
            organization: present(overrides.organization).or(present(config.github.organization)),
            environment: present(overrides.environment).or(present(config.github.environment)),
        };

        let settings = Self {
            github_token: Zeroizing::new(github_token),
            api_url,
            identity,
            access_key_id_name,
            secret_access_key_name,
            target,
        };
        debug!(?settings, "settings resolved");

        Ok(settings)
    }

    /// Build the rotation input for a resolved identity and selected target.
    pub fn rotation_input(&self, identity: IdentityName, target: SecretTarget) -> RotationInput {
        RotationInput {
            identity,
            access_key_id_name: self.access_key_id_name.clone(),
            secret_access_key_name: self.secret_access_key_name.clone(),
            target,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
