// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Package loading via `go list`.
//!
//! `go list -e -json <pattern>` enumerates the packages and their files;
//! every file is then parsed here. Packages the toolchain reports as broken
//! (bad imports, unparsable headers) and files with syntax errors fail the
//! whole load.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::{FileKind, GoParser, Package, PackageFile, PackageGraph};
use crate::error::{Error, Result};

/// Inputs for a load.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Module root; `go list` runs here.
    pub root: PathBuf,
    /// Package pattern, e.g. `./...`.
    pub pattern: String,
    /// Go toolchain binary.
    pub go: String,
}

/// One package record from `go list -json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListedPackage {
    pub dir: PathBuf,
    pub import_path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub go_files: Vec<String>,
    #[serde(default)]
    pub cgo_files: Vec<String>,
    #[serde(default)]
    pub test_go_files: Vec<String>,
    #[serde(default)]
    pub x_test_go_files: Vec<String>,
    #[serde(default)]
    pub error: Option<ListError>,
    #[serde(default)]
    pub deps_errors: Vec<ListError>,
}

/// Error record attached to a listed package.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListError {
    #[serde(default)]
    pub pos: String,
    pub err: String,
}

impl std::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.pos.is_empty() {
            f.write_str(&self.err)
        } else {
            write!(f, "{}: {}", self.pos, self.err)
        }
    }
}

/// Load every package matching the pattern, with syntax and scopes.
pub fn load(opts: &LoadOptions) -> Result<PackageGraph> {
    if opts.pattern.is_empty() || opts.pattern.contains('\0') {
        return Err(Error::load(
            opts.pattern.escape_debug().to_string(),
            "invalid package pattern",
        ));
    }

    tracing::debug!("{} list -e -json {} (in {})", opts.go, opts.pattern, opts.root.display());
    let output = Command::new(&opts.go)
        .args(["list", "-e", "-json"])
        .arg(&opts.pattern)
        .current_dir(&opts.root)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| Error::exec(&opts.go, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::load(&opts.pattern, stderr.trim().to_string()));
    }

    let listed = parse_listing(&output.stdout)?;
    if listed.is_empty() {
        return Err(Error::load(&opts.pattern, "pattern matched no packages"));
    }
    compile(listed)
}

/// Decode the concatenated JSON objects printed by `go list -json`.
pub fn parse_listing(bytes: &[u8]) -> Result<Vec<ListedPackage>> {
    serde_json::Deserializer::from_slice(bytes)
        .into_iter::<ListedPackage>()
        .map(|item| item.map_err(|e| Error::protocol("go list -json", e.to_string())))
        .collect()
}

/// Parse every listed file and assemble the package graph.
pub fn compile(listed: Vec<ListedPackage>) -> Result<PackageGraph> {
    let mut parser = GoParser::new()?;
    let mut packages = Vec::with_capacity(listed.len());

    for pkg in listed {
        if let Some(err) = &pkg.error {
            return Err(Error::load(&pkg.import_path, err.to_string()));
        }
        if let Some(err) = pkg.deps_errors.first() {
            return Err(Error::load(&pkg.import_path, err.to_string()));
        }

        let groups = [
            (FileKind::Source, &pkg.go_files),
            (FileKind::Source, &pkg.cgo_files),
            (FileKind::Test, &pkg.test_go_files),
            (FileKind::ExternalTest, &pkg.x_test_go_files),
        ];
        let mut files = Vec::new();
        for (kind, names) in groups {
            for name in names {
                let path = pkg.dir.join(name);
                let syntax = parse_file(&mut parser, &pkg.import_path, &path)?;
                files.push(PackageFile { kind, syntax });
            }
        }

        tracing::debug!("loaded {} ({} files)", pkg.import_path, files.len());
        packages.push(Package::new(pkg.import_path, pkg.name, pkg.dir, files));
    }

    let graph = PackageGraph::new(packages)?;
    graph.check_types()?;
    Ok(graph)
}

fn parse_file(parser: &mut GoParser, import_path: &str, path: &Path) -> Result<super::SourceFile> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| Error::load(import_path, format!("{}: {}", path.display(), e)))?;
    parser.parse(path, &source).map_err(|e| match e {
        Error::Load { message, .. } => Error::load(import_path, format!("{}: {}", path.display(), message)),
        other => other,
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
