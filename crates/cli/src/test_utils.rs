//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::Result;
use crate::go::{FileKind, GoParser, Package, PackageFile, PackageGraph};

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
///
/// # Example
///
/// ```ignore
/// let tmp = TempDir::new().unwrap();
/// create_tree(tmp.path(), &[
///     ("go.mod", "module example.com/m\n"),
///     ("sum/sum.go", "package sum\n"),
/// ]);
/// ```
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Builds a package from in-memory `(file name, source)` pairs.
///
/// File kinds are classified the way `go list` would.
pub fn try_package(import_path: &str, files: &[(&str, &str)]) -> Result<Package> {
    let mut parser = GoParser::new()?;
    let mut parsed = Vec::new();
    for (name, source) in files {
        let syntax = parser.parse(Path::new(name), source)?;
        let kind = FileKind::classify(name, &syntax.package);
        parsed.push(PackageFile { kind, syntax });
    }
    let name = parsed
        .iter()
        .find(|f| f.kind != FileKind::ExternalTest)
        .map(|f| f.syntax.package.clone())
        .unwrap_or_default();
    Ok(Package::new(import_path, name, PathBuf::from(import_path), parsed))
}

pub fn package(import_path: &str, files: &[(&str, &str)]) -> Package {
    try_package(import_path, files).unwrap()
}

/// Builds a graph from `(import path, files)` entries.
pub fn graph(packages: &[(&str, &[(&str, &str)])]) -> PackageGraph {
    PackageGraph::new(
        packages
            .iter()
            .map(|(path, files)| package(path, files))
            .collect(),
    )
    .unwrap()
}

/// Writes an executable shell script standing in for the `go` binary.
///
/// Returns its absolute path.
#[cfg(unix)]
pub fn fake_go(dir: &Path, script: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-go");
    fs::write(&path, format!("#!/bin/sh\n{}", script)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path.to_string_lossy().into_owned()
}

/// A temp directory holding a go.mod for `module`.
pub fn temp_module(module: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("go.mod"),
        format!("module {}\n\ngo 1.22\n", module),
    )
    .unwrap();
    dir
}
