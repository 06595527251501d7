//! Shared E2E test helpers for `permsync` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Environment variables that would leak the developer's setup into a test.
const AMBIENT_VARS: &[&str] = &[
    "PERMSYNC_DEBUG",
    "PERMSYNC_ORIGIN",
    "PERMSYNC_DRIVE_ID",
    "PERMSYNC_API_VERSION",
    "PERMSYNC_TIMEOUT_SECS",
    "PERMSYNC_TOKEN_ENV",
    "PERMSYNC_LOG_LEVEL",
    "PERMSYNC_TOKEN",
    "RUST_LOG",
];

/// Build a Command for the `permsync` binary isolated in a tempdir.
///
/// The tempdir serves as both `HOME` (no global config) and project root.
/// Returns (command, _guard). Keep the guard alive for the test's duration.
pub fn permsync_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("permsync");
    cmd.timeout(TIMEOUT_BASIC);
    for var in AMBIENT_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", tmp.path());
    cmd.args(["-C", tmp.path().to_str().expect("valid utf8")]);
    (cmd, tmp)
}

/// Write a desired-permissions document into `dir`.
pub fn write_desired(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("desired.json");
    std::fs::write(&path, json).expect("write desired file");
    path
}

/// Write `<dir>/.permsync/config.toml`.
pub fn write_project_config(dir: &Path, toml: &str) -> PathBuf {
    let config_dir = dir.join(".permsync");
    std::fs::create_dir_all(&config_dir).expect("create project config dir");
    let path = config_dir.join("config.toml");
    std::fs::write(&path, toml).expect("write project config");
    path
}
