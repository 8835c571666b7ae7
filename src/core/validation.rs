//! Input validation for keyturn settings.

use crate::error::{ConfigError, Result};

/// Reserved prefix GitHub refuses for user-defined secrets.
const RESERVED_PREFIX: &str = "GITHUB_";

/// Validate a GitHub Actions secret name.
///
/// Secret names must follow GitHub's rules:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot start with `GITHUB_` (any case)
/// - Cannot be empty
///
/// # Arguments
///
/// * `field` - Setting the name came from (for error messages)
/// * `name` - The secret name to validate
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the name is invalid.
pub fn validate_secret_name(field: &'static str, name: &str) -> Result<()> {
    let invalid = |reason: String| ConfigError::InvalidValue { field, reason };

    if name.is_empty() {
        return Err(invalid("secret name cannot be empty".to_string()).into());
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid(format!("'{}' cannot start with a digit", name)).into());
    }

    if let Some((i, ch)) = name
        .chars()
        .enumerate()
        .find(|(_, ch)| !ch.is_ascii_alphanumeric() && *ch != '_')
    {
        return Err(invalid(format!(
            "invalid character '{}' at position {} in '{}'. Only letters, digits, and underscore are allowed",
            ch,
            i + 1,
            name
        ))
        .into());
    }

    if name.to_ascii_uppercase().starts_with(RESERVED_PREFIX) {
        return Err(invalid(format!("'{}' uses the reserved GITHUB_ prefix", name)).into());
    }

    Ok(())
}

/// Validate an IAM user name.
///
/// IAM allows letters, digits and `+=,.@_-`, up to 64 characters.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the name is invalid.
pub fn validate_identity(name: &str) -> Result<()> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: "iam user name",
        reason,
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty".to_string()).into());
    }

    if name.len() > 64 {
        return Err(invalid(format!("'{}' is longer than 64 characters", name)).into());
    }

    if let Some(ch) = name
        .chars()
        .find(|ch| !ch.is_ascii_alphanumeric() && !"+=,.@_-".contains(*ch))
    {
        return Err(invalid(format!("invalid character '{}' in '{}'", ch, name)).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_secret_names() {
        assert!(validate_secret_name("name", "AWS_ACCESS_KEY_ID").is_ok());
        assert!(validate_secret_name("name", "aws_secret_access_key").is_ok());
        assert!(validate_secret_name("name", "_PRIVATE").is_ok());
        assert!(validate_secret_name("name", "KEY_2").is_ok());
    }

    #[test]
    fn test_invalid_secret_names() {
        assert!(validate_secret_name("name", "").is_err());
        assert!(validate_secret_name("name", "2FA_KEY").is_err());
        assert!(validate_secret_name("name", "AWS-KEY").is_err());
        assert!(validate_secret_name("name", "AWS KEY").is_err());
        assert!(validate_secret_name("name", "GITHUB_TOKEN").is_err());
        assert!(validate_secret_name("name", "github_key").is_err());
    }

    #[test]
    fn test_identity_names() {
        assert!(validate_identity("deploy-bot").is_ok());
        assert!(validate_identity("ci+deploy@acme.com").is_ok());
        assert!(validate_identity("").is_err());
        assert!(validate_identity("has space").is_err());
        assert!(validate_identity(&"a".repeat(65)).is_err());
    }
}
