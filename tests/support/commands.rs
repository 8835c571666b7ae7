//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a keyturn command with a clean environment.
    ///
    /// Returns a Command configured with:
    /// - no inherited environment variables
    /// - HOME set to the temporary home directory
    /// - AWS config files pointed into the temporary home
    /// - Current directory set to the test directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keyturn").expect("failed to find keyturn binary");
        cmd.env_clear();
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env("AWS_CONFIG_FILE", self.home.path().join("aws-config"));
        cmd.env(
            "AWS_SHARED_CREDENTIALS_FILE",
            self.home.path().join("aws-credentials"),
        );
        cmd.env("AWS_EC2_METADATA_DISABLED", "true");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Create a `keyturn rotate` command wired to mock AWS and GitHub
    /// endpoints.
    pub fn rotate_cmd(&self, iam_url: &str, github_url: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("AWS_ACCESS_KEY_ID", "AKIDTESTRUNNER")
            .env("AWS_SECRET_ACCESS_KEY", "runner-secret")
            .env("AWS_REGION", "us-east-1")
            .env("AWS_ENDPOINT_URL", iam_url)
            .env("GITHUB_TOKEN", "ghp_test")
            .env("GITHUB_API_URL", github_url)
            .arg("rotate");
        cmd
    }

    /// Shortcut for `keyturn rotate` with extra arguments and no services.
    pub fn rotate_offline(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("rotate")
            .args(args)
            .output()
            .expect("failed to run keyturn rotate")
    }
}
