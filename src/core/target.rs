//! Secret target selection.
//!
//! Maps configuration onto exactly one [`SecretTarget`]. Precedence is
//! environment, then organization, then repository: an environment only
//! exists inside a repository, so it wins even when an organization is set.

use tracing::debug;

use crate::core::secrets::SecretTarget;
use crate::error::{ConfigError, Result};

/// Unresolved target settings, as read from config, env and flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetConfig {
    /// `owner/repo`
    pub repository: Option<String>,
    pub organization: Option<String>,
    pub environment: Option<String>,
}

impl TargetConfig {
    /// Select the secret target.
    ///
    /// Empty strings count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the selected variant needs a repository and
    /// none (or a malformed one) is configured.
    pub fn select(&self) -> Result<SecretTarget> {
        let environment = non_empty(&self.environment);
        let organization = non_empty(&self.organization);

        let target = if let Some(environment) = environment {
            let (owner, repo) = self.owner_repo()?;
            SecretTarget::RepositoryEnvironment {
                owner,
                repo,
                environment: environment.to_string(),
            }
        } else if let Some(organization) = organization {
            SecretTarget::Organization {
                organization: organization.to_string(),
            }
        } else {
            let (owner, repo) = self.owner_repo()?;
            SecretTarget::Repository { owner, repo }
        };

        debug!(%target, "selected secret target");
        Ok(target)
    }

    fn owner_repo(&self) -> Result<(String, String)> {
        let repository =
            non_empty(&self.repository).ok_or(ConfigError::MissingField { field: "repository" })?;
        parse_repository(repository)
    }
}

/// Split `owner/repo` into its parts.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` unless the input is exactly two
/// non-empty segments.
pub fn parse_repository(repository: &str) -> Result<(String, String)> {
    let mut parts = repository.trim().split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidValue {
            field: "repository",
            reason: format!("expected owner/repo, got '{}'", repository),
        }
        .into()),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(repo: Option<&str>, org: Option<&str>, env: Option<&str>) -> TargetConfig {
        TargetConfig {
            repository: repo.map(String::from),
            organization: org.map(String::from),
            environment: env.map(String::from),
        }
    }

    #[test]
    fn test_repository_only_selects_repository() {
        let target = config(Some("acme/api"), None, None).select().unwrap();
        assert_eq!(
            target,
            SecretTarget::Repository {
                owner: "acme".into(),
                repo: "api".into()
            }
        );
    }

    #[test]
    fn test_organization_without_environment_selects_organization() {
        let target = config(Some("acme/api"), Some("acme"), None).select().unwrap();
        assert_eq!(
            target,
            SecretTarget::Organization {
                organization: "acme".into()
            }
        );
    }

    #[test]
    fn test_organization_needs_no_repository() {
        let target = config(None, Some("acme"), None).select().unwrap();
        assert!(matches!(target, SecretTarget::Organization { .. }));
    }

    #[test]
    fn test_environment_wins_over_organization() {
        let expected = SecretTarget::RepositoryEnvironment {
            owner: "acme".into(),
            repo: "api".into(),
            environment: "prod".into(),
        };

        let with_org = config(Some("acme/api"), Some("acme"), Some("prod"))
            .select()
            .unwrap();
        assert_eq!(with_org, expected);

        let without_org = config(Some("acme/api"), None, Some("prod")).select().unwrap();
        assert_eq!(without_org, expected);
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let target = config(Some("acme/api"), Some(""), Some("  ")).select().unwrap();
        assert!(matches!(target, SecretTarget::Repository { .. }));
    }

    #[test]
    fn test_environment_requires_repository() {
        assert!(config(None, Some("acme"), Some("prod")).select().is_err());
    }

    #[test]
    fn test_repository_required_without_organization() {
        let err = config(None, None, None).select().unwrap_err();
        assert!(err.to_string().contains("repository"));
    }

    #[test]
    fn test_parse_repository() {
        assert_eq!(
            parse_repository("acme/api").unwrap(),
            ("acme".to_string(), "api".to_string())
        );
        assert!(parse_repository("acme").is_err());
        assert!(parse_repository("acme/").is_err());
        assert!(parse_repository("/api").is_err());
        assert!(parse_repository("acme/api/extra").is_err());
    }
}
