// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Go package graph: syntax plus resolved scopes for every loaded package.
//!
//! The graph is built once per invocation by [`loader::load`] and is
//! read-only afterwards.

pub mod loader;
pub mod scope;
pub mod syntax;

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub use scope::{ResolvedType, Resolver, Scope, Symbol, default_import_name};
pub use syntax::{Decl, FuncDecl, GoParser, Import, ImportAlias, SourceFile, TypeExpr};

/// Role of a file within its package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Non-test file (`GoFiles`, `CgoFiles`).
    Source,
    /// `_test.go` file in the package itself (`TestGoFiles`).
    Test,
    /// `_test.go` file in the `<name>_test` package (`XTestGoFiles`).
    ExternalTest,
}

impl FileKind {
    pub fn is_test(self) -> bool {
        !matches!(self, Self::Source)
    }

    /// Classify by file name and package clause, as `go list` would.
    pub fn classify(file_name: &str, package_clause: &str) -> Self {
        if !file_name.ends_with("_test.go") {
            Self::Source
        } else if package_clause.ends_with("_test") {
            Self::ExternalTest
        } else {
            Self::Test
        }
    }
}

/// One parsed file of a package.
#[derive(Debug, Clone)]
pub struct PackageFile {
    pub kind: FileKind,
    pub syntax: SourceFile,
}

/// A loaded package.
#[derive(Debug, Clone)]
pub struct Package {
    pub import_path: String,
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<PackageFile>,
    scope: Scope,
    external_scope: Scope,
}

impl Package {
    pub fn new(
        import_path: impl Into<String>,
        name: impl Into<String>,
        dir: impl Into<PathBuf>,
        files: Vec<PackageFile>,
    ) -> Self {
        let indexed = |external: bool| {
            files
                .iter()
                .enumerate()
                .filter(move |(_, f)| (f.kind == FileKind::ExternalTest) == external)
                .map(|(i, f)| (i, &f.syntax))
        };
        let scope = Scope::build(indexed(false));
        let external_scope = Scope::build(indexed(true));
        Self {
            import_path: import_path.into(),
            name: name.into(),
            dir: dir.into(),
            files,
            scope,
            external_scope,
        }
    }

    /// Package block seen by files of `kind`.
    pub fn scope_for(&self, kind: FileKind) -> &Scope {
        match kind {
            FileKind::ExternalTest => &self.external_scope,
            FileKind::Source | FileKind::Test => &self.scope,
        }
    }

    /// Import path that identifies types declared by files of `kind`.
    pub fn identity(&self, kind: FileKind) -> String {
        match kind {
            FileKind::ExternalTest => format!("{}_test", self.import_path),
            FileKind::Source | FileKind::Test => self.import_path.clone(),
        }
    }

    pub fn source_files(&self) -> impl Iterator<Item = &PackageFile> {
        self.files.iter().filter(|f| !f.kind.is_test())
    }

    pub fn test_files(&self) -> impl Iterator<Item = &PackageFile> {
        self.files.iter().filter(|f| f.kind.is_test())
    }
}

/// All loaded packages, ordered by import path.
#[derive(Debug, Default)]
pub struct PackageGraph {
    packages: Vec<Package>,
    index: HashMap<String, usize>,
}

impl PackageGraph {
    /// Build the graph, rejecting import names that collide with
    /// package-level declarations.
    pub fn new(mut packages: Vec<Package>) -> Result<Self> {
        packages.sort_by(|a, b| a.import_path.cmp(&b.import_path));
        let index = packages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.import_path.clone(), i))
            .collect();
        let graph = Self { packages, index };
        for package in &graph.packages {
            graph.check_redeclarations(package)?;
        }
        Ok(graph)
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn get(&self, import_path: &str) -> Option<&Package> {
        self.index.get(import_path).map(|&i| &self.packages[i])
    }

    pub fn import_paths(&self) -> BTreeSet<String> {
        self.index.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Name an import binds in its file block, if any.
    pub fn import_name(&self, import: &Import) -> Option<String> {
        match &import.alias {
            ImportAlias::Named(name) => Some(name.clone()),
            ImportAlias::Default => Some(match self.get(&import.path) {
                Some(pkg) => pkg.name.clone(),
                None => default_import_name(&import.path),
            }),
            ImportAlias::Dot | ImportAlias::Blank => None,
        }
    }

    pub fn resolver<'g>(&'g self, package: &'g Package, file: &'g PackageFile) -> Resolver<'g> {
        Resolver::new(self, package, file)
    }

    fn check_redeclarations(&self, package: &Package) -> Result<()> {
        for file in &package.files {
            let scope = package.scope_for(file.kind);
            for import in &file.syntax.imports {
                if let Some(name) = self.import_name(import)
                    && scope.lookup(&name).is_some()
                {
                    return Err(Error::load(
                        &package.import_path,
                        format!(
                            "{}:{}: {} redeclared in this block",
                            display_name(&file.syntax.path),
                            import.line,
                            name
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
