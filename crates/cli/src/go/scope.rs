// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scope resolution for Go type expressions.
//!
//! Lookup follows Go's block structure: function type parameters, then the
//! package block (top-level declarations of every file), then the file block
//! (imports, including dot imports), then the universe. Aliases are followed
//! to their target; defined types get their own identity in the declaring
//! package.

use std::collections::HashMap;
use std::fmt;

use super::syntax::{Decl, ImportAlias, SourceFile, TypeExpr, ValueKind};
use super::{FileKind, Package, PackageFile, PackageGraph, display_name};
use crate::error::{Error, Result};

/// Alias chains longer than this are treated as cycles.
const MAX_ALIAS_DEPTH: usize = 32;

const ALIAS_CYCLE: &str = "alias cycle";

const UNIVERSE_TYPES: &[&str] = &[
    "any", "bool", "byte", "comparable", "complex64", "complex128", "error", "float32",
    "float64", "int", "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr",
];

/// A package-level declaration.
#[derive(Debug, Clone)]
pub enum Symbol {
    Type {
        alias: bool,
        target: TypeExpr,
        /// Index of the declaring file in `Package::files`.
        file: usize,
    },
    Func,
    Var,
    Const,
}

/// Package block: top-level declaration names mapped to their symbols.
#[derive(Debug, Default, Clone)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
}

impl Scope {
    /// Build a package block from `(file index, file)` pairs.
    pub fn build<'a>(files: impl IntoIterator<Item = (usize, &'a SourceFile)>) -> Self {
        let mut symbols = HashMap::new();
        for (index, file) in files {
            for decl in &file.decls {
                match decl {
                    Decl::Func(f) if !f.has_receiver && f.name != "init" && f.name != "_" => {
                        symbols.insert(f.name.clone(), Symbol::Func);
                    }
                    Decl::Func(_) => {}
                    Decl::Type(t) => {
                        symbols.insert(
                            t.name.clone(),
                            Symbol::Type {
                                alias: t.is_alias,
                                target: t.target.clone(),
                                file: index,
                            },
                        );
                    }
                    Decl::Value(v) => {
                        let symbol = match v.kind {
                            ValueKind::Const => Symbol::Const,
                            ValueKind::Var => Symbol::Var,
                        };
                        for name in v.names.iter().filter(|n| n.as_str() != "_") {
                            symbols.insert(name.clone(), symbol.clone());
                        }
                    }
                }
            }
        }
        Self { symbols }
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.symbols.len()
    }
}

/// A type after name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// A defined type, identified by canonical import path and name.
    Named { package: String, name: String },
    Pointer(Box<ResolvedType>),
    TypeParam(String),
    Builtin(String),
    /// Type literals (slices, maps, funcs, instantiated generics, ...).
    Composite(&'static str),
    /// The expression does not name a type visible from this file.
    Unresolved(String),
}

impl ResolvedType {
    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(self) -> Self {
        Self::Pointer(Box::new(self))
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { package, name } => write!(f, "{}.{}", package, name),
            Self::Pointer(inner) => write!(f, "*{}", inner),
            Self::TypeParam(name) | Self::Builtin(name) => f.write_str(name),
            Self::Composite(kind) => write!(f, "<{}>", kind),
            Self::Unresolved(what) => write!(f, "<unresolved {}>", what),
        }
    }
}

/// Name a default import binds when the imported package isn't loaded.
///
/// Uses the last path element, skipping a major-version element (`/v2`) and
/// a gopkg.in style suffix (`yaml.v3`).
pub fn default_import_name(path: &str) -> String {
    let mut segments = path.rsplit('/');
    let last = segments.next().unwrap_or(path);
    let is_major = |s: &str| {
        s.strip_prefix('v')
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    };
    let base = match segments.next() {
        Some(prev) if is_major(last) => prev,
        _ => last,
    };
    match base.rsplit_once('.') {
        Some((stem, version)) if is_major(version) => stem.to_string(),
        _ => base.to_string(),
    }
}

/// Resolves type expressions as seen from one file of a package.
pub struct Resolver<'g> {
    graph: &'g PackageGraph,
    package: &'g Package,
    file: &'g PackageFile,
}

impl<'g> Resolver<'g> {
    pub fn new(graph: &'g PackageGraph, package: &'g Package, file: &'g PackageFile) -> Self {
        Self {
            graph,
            package,
            file,
        }
    }

    /// Resolve `expr` with `type_params` in the innermost scope.
    pub fn resolve(&self, expr: &TypeExpr, type_params: &[String]) -> ResolvedType {
        self.resolve_at(expr, type_params, 0)
    }

    fn resolve_at(&self, expr: &TypeExpr, type_params: &[String], depth: usize) -> ResolvedType {
        if depth > MAX_ALIAS_DEPTH {
            return ResolvedType::Unresolved(ALIAS_CYCLE.to_string());
        }
        match expr {
            TypeExpr::Pointer(inner) => self.resolve_at(inner, type_params, depth).pointer(),
            TypeExpr::Generic(_) => ResolvedType::Composite("generic_type"),
            TypeExpr::Other(kind) => ResolvedType::Composite(kind),
            TypeExpr::Name(name) => self.resolve_name(name, type_params, depth),
            TypeExpr::Qualified { package, name } => self.resolve_qualified(package, name, depth),
        }
    }

    /// Explain why `expr` names no type, when it provably names none.
    ///
    /// Only the name written here is judged; a broken alias target is
    /// reported at its own declaration. Names an unloaded dot import could
    /// provide, or a qualifier an unloaded package of unknown name could
    /// bind, are accepted.
    pub fn undefined(&self, expr: &TypeExpr, type_params: &[String]) -> Option<String> {
        let mut expr = expr;
        while let TypeExpr::Pointer(inner) = expr {
            expr = inner;
        }
        let ResolvedType::Unresolved(what) = self.resolve(expr, type_params) else {
            return None;
        };
        if what == ALIAS_CYCLE {
            return Some("invalid recursive type alias".to_string());
        }
        match expr {
            TypeExpr::Name(name) if *name == what => {
                if self.imports_unloaded(|alias| *alias == ImportAlias::Dot, |_| true) {
                    return None;
                }
                if self.package.scope_for(self.file.kind).lookup(name).is_some() {
                    return Some(format!("{} is not a type", name));
                }
                Some(format!("undefined: {}", name))
            }
            TypeExpr::Qualified { package, name } => {
                let written = format!("{}.{}", package, name);
                if what == written {
                    let unknown_name = |path: &str| !is_identifier(&default_import_name(path));
                    if self.imports_unloaded(|alias| *alias == ImportAlias::Default, unknown_name) {
                        return None;
                    }
                } else if what.rsplit_once('.').map(|(_, n)| n) != Some(name.as_str()) {
                    return None;
                }
                Some(format!("undefined: {}", written))
            }
            _ => None,
        }
    }

    fn imports_unloaded(
        &self,
        alias: impl Fn(&ImportAlias) -> bool,
        path: impl Fn(&str) -> bool,
    ) -> bool {
        self.file.syntax.imports.iter().any(|i| {
            alias(&i.alias) && self.graph.get(&i.path).is_none() && path(&i.path)
        })
    }

    fn resolve_name(&self, name: &str, type_params: &[String], depth: usize) -> ResolvedType {
        if type_params.iter().any(|p| p == name) {
            return ResolvedType::TypeParam(name.to_string());
        }

        let scope = self.package.scope_for(self.file.kind);
        if let Some(symbol) = scope.lookup(name) {
            return self.graph.resolve_symbol(self.package, self.file.kind, name, symbol, depth);
        }

        if let Some(resolved) = self.resolve_dot_imported(name, depth) {
            return resolved;
        }

        if UNIVERSE_TYPES.contains(&name) {
            return ResolvedType::Builtin(name.to_string());
        }
        ResolvedType::Unresolved(name.to_string())
    }

    fn resolve_qualified(&self, qualifier: &str, name: &str, depth: usize) -> ResolvedType {
        let import = self
            .file
            .syntax
            .imports
            .iter()
            .find(|i| self.graph.import_name(i).as_deref() == Some(qualifier));
        match import {
            Some(import) => self.graph.resolve_exported(&import.path, name, depth),
            None => ResolvedType::Unresolved(format!("{}.{}", qualifier, name)),
        }
    }

    fn resolve_dot_imported(&self, name: &str, depth: usize) -> Option<ResolvedType> {
        let dot_paths: Vec<&str> = self
            .file
            .syntax
            .imports
            .iter()
            .filter(|i| i.alias == ImportAlias::Dot)
            .map(|i| i.path.as_str())
            .collect();

        // Loaded packages can be checked for the name directly.
        for path in &dot_paths {
            if let Some(pkg) = self.graph.get(path)
                && pkg.scope_for(FileKind::Source).lookup(name).is_some()
            {
                return Some(self.graph.resolve_exported(path, name, depth));
            }
        }

        // Otherwise only an unambiguous external dot import can provide it.
        let mut external = dot_paths.iter().filter(|p| self.graph.get(p).is_none());
        match (external.next(), external.next()) {
            (Some(path), None) => Some(self.graph.resolve_exported(path, name, depth)),
            _ => None,
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl PackageGraph {
    /// Reject parameter types and type declarations that name no type.
    ///
    /// Methods are skipped: receiver type parameters are not tracked.
    pub fn check_types(&self) -> Result<()> {
        for package in &self.packages {
            for file in &package.files {
                let resolver = Resolver::new(self, package, file);
                for decl in &file.syntax.decls {
                    let (exprs, type_params, line): (Vec<&TypeExpr>, &[String], usize) =
                        match decl {
                            Decl::Func(f) if !f.has_receiver => {
                                (f.params.iter().collect(), &f.type_params, f.line)
                            }
                            Decl::Type(t) => (vec![&t.target], &t.type_params, t.line),
                            Decl::Func(_) | Decl::Value(_) => continue,
                        };
                    let problem = exprs
                        .into_iter()
                        .find_map(|expr| resolver.undefined(expr, type_params));
                    if let Some(problem) = problem {
                        return Err(Error::load(
                            &package.import_path,
                            format!("{}:{}: {}", display_name(&file.syntax.path), line, problem),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve `name` exported from the package at `path`.
    pub(crate) fn resolve_exported(&self, path: &str, name: &str, depth: usize) -> ResolvedType {
        match self.get(path) {
            Some(pkg) => match pkg.scope_for(FileKind::Source).lookup(name) {
                Some(symbol) => self.resolve_symbol(pkg, FileKind::Source, name, symbol, depth),
                None => ResolvedType::Unresolved(format!("{}.{}", path, name)),
            },
            None => ResolvedType::named(path, name),
        }
    }

    pub(crate) fn resolve_symbol(
        &self,
        package: &Package,
        kind: FileKind,
        name: &str,
        symbol: &Symbol,
        depth: usize,
    ) -> ResolvedType {
        match symbol {
            Symbol::Type {
                alias: true,
                target,
                file,
            } => match package.files.get(*file) {
                Some(decl_file) => {
                    Resolver::new(self, package, decl_file).resolve_at(target, &[], depth + 1)
                }
                None => ResolvedType::Unresolved(name.to_string()),
            },
            Symbol::Type { alias: false, .. } => {
                ResolvedType::named(package.identity(kind), name)
            }
            Symbol::Func | Symbol::Var | Symbol::Const => {
                ResolvedType::Unresolved(name.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
