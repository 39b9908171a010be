//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

/// Test context with temporary working directory
pub struct TestContext {
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Write `requestr.yaml` into the working directory
    pub fn with_config(self, config: &str) -> Self {
        std::fs::write(self.path().join("requestr.yaml"), config).expect("Failed to write config");
        self
    }

    /// Write a file into the working directory and return its path
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("requestr").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("HTTP_PROXY")
            .env_remove("RUST_LOG")
            .env_remove("REQUESTR_CONFIG")
            .env_remove("REQUESTR_LOG_LEVEL")
            .env("NO_COLOR", "1");
        cmd
    }
}
