// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-entry-point and needs-tests classification.
//!
//! A function is a test entry point only when its parameter resolves to the
//! `testing` package's own context type. Look-alikes (a local `T`, an import
//! of some other package named `testing`, `*testing.B`) are rejected.

use crate::go::{Decl, FuncDecl, Package, PackageFile, PackageGraph, ResolvedType};

/// Import path of the standard test framework.
pub const TESTING_PACKAGE: &str = "testing";

/// Kind of entry point, chosen by name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Test,
    Fuzz,
}

impl EntryKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Test => "Test",
            Self::Fuzz => "Fuzz",
        }
    }

    /// The only parameter type accepted for this kind: `*testing.T` or `*testing.F`.
    pub fn context_type(self) -> ResolvedType {
        let name = match self {
            Self::Test => "T",
            Self::Fuzz => "F",
        };
        ResolvedType::named(TESTING_PACKAGE, name).pointer()
    }

    /// Classify a declaration name.
    ///
    /// The name must start with the prefix and the rune after it must not be
    /// lowercase: `TestSum` and `Test` qualify, `Testsum` does not.
    pub fn for_name(name: &str) -> Option<Self> {
        [Self::Test, Self::Fuzz].into_iter().find(|kind| {
            name.strip_prefix(kind.prefix())
                .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_lowercase()))
        })
    }
}

/// Whether `func` (declared in `file` of `package`) is a test or fuzz entry point.
pub fn is_test_entry_point(
    graph: &PackageGraph,
    package: &Package,
    file: &PackageFile,
    func: &FuncDecl,
) -> bool {
    entry_kind(graph, package, file, func).is_some()
}

/// Entry kind of `func`, if it is an entry point.
pub fn entry_kind(
    graph: &PackageGraph,
    package: &Package,
    file: &PackageFile,
    func: &FuncDecl,
) -> Option<EntryKind> {
    if func.has_receiver || func.has_results || !func.type_params.is_empty() {
        return None;
    }
    let kind = EntryKind::for_name(&func.name)?;
    let [param] = func.params.as_slice() else {
        return None;
    };
    let resolved = graph.resolver(package, file).resolve(param, &func.type_params);
    (resolved == kind.context_type()).then_some(kind)
}

/// Whether a package carries executable statements and so must have tests.
///
/// Only non-test files count. Type, const and plain var declarations carry
/// no statements.
pub fn needs_tests(package: &Package) -> bool {
    package.source_files().any(|file| {
        file.syntax.decls.iter().any(|decl| match decl {
            Decl::Func(f) => f.statements > 0,
            Decl::Value(v) => v.executable,
            Decl::Type(_) => false,
        })
    })
}

/// Whether a package's `_test.go` files declare at least one entry point.
pub fn has_tests(graph: &PackageGraph, package: &Package) -> bool {
    package.test_files().any(|file| {
        file.syntax
            .funcs()
            .any(|func| is_test_entry_point(graph, package, file, func))
    })
}

/// Outcome of the needs-tests check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HasTestsReport {
    /// Import paths of packages that need tests but have none, sorted.
    pub missing: Vec<String>,
}

impl HasTestsReport {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        self.missing
            .iter()
            .map(|pkg| format!("{} has no tests", pkg))
            .collect()
    }
}

/// Check every package independently; a parent's tests never cover a child.
pub fn verify_has_tests(graph: &PackageGraph) -> HasTestsReport {
    let mut missing = Vec::new();
    for package in graph.packages() {
        let needs = needs_tests(package);
        let has = has_tests(graph, package);
        tracing::debug!(
            "{}: needs tests = {}, has tests = {}",
            package.import_path,
            needs,
            has
        );
        if needs && !has {
            missing.push(package.import_path.clone());
        }
    }
    HasTestsReport { missing }
}

#[cfg(test)]
#[path = "oracle_tests.rs"]
mod tests;
