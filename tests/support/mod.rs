//! Test support utilities for keyturn integration tests.
//!
//! Provides isolated CLI environments and mock IAM/GitHub responses.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Child processes get a cleared environment, so ambient GitHub Actions or
/// AWS variables on the machine running the tests never leak in.
pub struct Test {
    /// Working directory for the command
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Write a `keyturn.toml` into the working directory.
    pub fn with_config(contents: &str) -> Self {
        let t = Self::new();
        std::fs::write(t.dir.path().join("keyturn.toml"), contents)
            .expect("failed to write config");
        t
    }
}
