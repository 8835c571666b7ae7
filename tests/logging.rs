//! Logging and verbosity tests.
//!
//! These tests verify that the verbose flag and KEYTURN_LOG control debug
//! output, and that debug output stays on stderr.

mod support;
use support::*;

const ARGS: &[&str] = &["rotate", "--github-token", "ghp_test"];

#[test]
fn test_verbose_flag_shows_debug_output() {
    let t = Test::new();
    let output = t.cmd().arg("--verbose").args(ARGS).output().unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "settings resolved");
    assert_output_excludes(&output, "ghp_test");
}

#[test]
fn test_quiet_by_default() {
    let t = Test::new();
    let output = t.cmd().args(ARGS).output().unwrap();

    assert_failure(&output);
    assert!(!stderr(&output).contains("settings resolved"));
}

#[test]
fn test_log_env_overrides_verbosity() {
    let t = Test::new();
    let output = t
        .cmd()
        .env("KEYTURN_LOG", "keyturn=debug")
        .args(ARGS)
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "no config file, using defaults");
    assert!(!stdout(&output).contains("settings resolved"));
}
