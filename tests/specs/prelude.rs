//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the testgate binary against Go module
//! fixtures.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use tempfile::TempDir;

/// Returns a Command configured to run the testgate binary.
///
/// Logging is pinned so stray `TESTGATE_*` variables never leak in.
pub fn testgate_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("testgate"));
    cmd.env_remove("TESTGATE_CONFIG").env("TESTGATE_LOG", "off");
    cmd
}

/// Get path to a test fixture directory.
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Whether a Go toolchain is on PATH. Specs that drive real Go modules
/// return early without one.
pub fn go_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        let found = Command::new("go")
            .arg("version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success());
        if !found {
            eprintln!("go toolchain not found; skipping Go fixture specs");
        }
        found
    })
}

/// `testgate check` against a fixture, with the fixture as working directory.
pub fn check_fixture(name: &str) -> Command {
    let mut cmd = testgate_cmd();
    cmd.arg("check").current_dir(fixture(name));
    cmd
}

/// A throwaway project directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// A directory holding only a go.mod for `module`.
    pub fn module(module: &str) -> Self {
        let project = Self::empty();
        project.file("go.mod", &format!("module {}\n\ngo 1.22\n", module));
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }
}
