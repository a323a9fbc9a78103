//! Shared testing utilities for bundlegen CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated project directory per test.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    project_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated project directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let project_dir = root.path().join("project");
        fs::create_dir_all(&project_dir).expect("Failed to create test project directory");
        Self { root, project_dir }
    }

    /// Path to the project directory used for CLI invocations.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Build a command for invoking the compiled `bundlegen` binary
    /// within the project directory.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("bundlegen").expect("Failed to locate bundlegen binary");
        cmd.current_dir(&self.project_dir);
        cmd
    }

    /// Package root for the default acme/demo-bundle test package.
    pub fn package_root(&self) -> PathBuf {
        self.project_dir.join("acme").join("demo-bundle")
    }

    /// Read a file below the default package root.
    pub fn read_package_file(&self, relative: &str) -> String {
        let path = self.package_root().join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
    }

    /// Assert that a file exists below the default package root.
    pub fn assert_package_file(&self, relative: &str) {
        let path = self.package_root().join(relative);
        assert!(path.exists(), "{} should exist", path.display());
    }

    /// Files in `dir` whose names start with `prefix` and end with
    /// `suffix`; used to locate timestamped backups.
    pub fn find_matching(&self, dir: &Path, prefix: &str, suffix: &str) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut matches: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix) && n.ends_with(suffix))
            })
            .collect();
        matches.sort();
        matches
    }
}
