//! Common test utilities shared across integration tests.
//!
//! Clippy cannot track usage across integration test files, hence the
//! `allow(dead_code)` annotation.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixture {
    temp_dir: TempDir,
    data_dir: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".timescale");

        fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self { temp_dir, data_dir }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Command preconfigured with this fixture's data directory.
    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("timescale");
        cmd.env_remove("TIMESCALE_PATH")
            .arg("--data-dir")
            .arg(self.data_dir());
        cmd
    }

    /// Write `content` to an input file outside the data directory.
    pub fn write_input(&self, name: &str, content: &str) -> PathBuf {
        let dir = self.temp_dir.path().join("inputs");
        fs::create_dir_all(&dir).expect("Failed to create input dir");
        let path = dir.join(name);
        fs::write(&path, content).expect("Failed to write input file");
        path
    }

    /// Import `content` under `name`, asserting success.
    pub fn import(&self, name: &str, content: &str) {
        let path = self.write_input(name, content);
        self.command().arg("import").arg(&path).assert().success();
    }

    /// Run a command with `--format json` and parse stdout.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .args(["--format", "json"])
            .args(args)
            .output()
            .expect("Failed to run command");

        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
    }
}
