// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Go syntax lowering.
//!
//! Parses Go source with tree-sitter and lowers the top-level declarations
//! into a small typed tree. Only the shapes needed for test classification
//! are kept: imports, function signatures, statement counts, type specs and
//! const/var specs.

use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser};

use crate::error::{Error, Result};

/// A parsed Go source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Name from the package clause.
    pub package: String,
    pub imports: Vec<Import>,
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Function and method declarations in source order.
    pub fn funcs(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Func(f) => Some(f),
            _ => None,
        })
    }
}

/// A single import spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: String,
    pub alias: ImportAlias,
    /// 1-based line of the import spec.
    pub line: usize,
}

/// How an import binds its name in the file block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportAlias {
    /// `import "path"`: bound under the imported package's own name.
    Default,
    /// `import name "path"`
    Named(String),
    /// `import . "path"`
    Dot,
    /// `import _ "path"`
    Blank,
}

/// A top-level declaration.
#[derive(Debug, Clone)]
pub enum Decl {
    Func(FuncDecl),
    Type(TypeSpec),
    Value(ValueSpec),
}

/// A function or method declaration.
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: String,
    pub has_receiver: bool,
    pub type_params: Vec<String>,
    /// One entry per declared parameter: `a, b int` yields two.
    pub params: Vec<TypeExpr>,
    pub has_results: bool,
    /// Statements directly in the body (0 for bodiless declarations).
    pub statements: usize,
    pub line: usize,
}

/// `type Name T` or `type Name = T`.
#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub name: String,
    pub is_alias: bool,
    pub type_params: Vec<String>,
    pub target: TypeExpr,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Const,
    Var,
}

/// A const or var spec.
#[derive(Debug, Clone)]
pub struct ValueSpec {
    pub kind: ValueKind,
    pub names: Vec<String>,
    /// The initializer contains a function literal with statements.
    pub executable: bool,
    pub line: usize,
}

/// Syntactic type expression, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Unqualified identifier: `T`, `int`.
    Name(String),
    /// `pkg.Name`
    Qualified { package: String, name: String },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// Instantiated generic type `T[int]`.
    Generic(Box<TypeExpr>),
    /// Any other type literal, tagged with its node kind.
    Other(&'static str),
}

/// Reusable tree-sitter parser for Go.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Error::load("go grammar", e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse one file. Any syntax error is a load error.
    pub fn parse(&mut self, path: &Path, source: &str) -> Result<SourceFile> {
        let display = path.display().to_string();
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::load(&display, "parser produced no syntax tree"))?;
        let root = tree.root_node();
        let src = source.as_bytes();

        if let Some(bad) = first_error(root) {
            let pos = bad.start_position();
            let what = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                let snippet: String = text(bad, src).chars().take(20).collect();
                format!("unexpected {:?}", snippet)
            };
            return Err(Error::load(
                display,
                format!("syntax error at {}:{}: {}", pos.row + 1, pos.column + 1, what),
            ));
        }

        let mut file = SourceFile {
            path: path.to_path_buf(),
            package: String::new(),
            imports: Vec::new(),
            decls: Vec::new(),
        };

        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "package_clause" => {
                    let mut inner = node.walk();
                    if let Some(id) = node.named_children(&mut inner).next() {
                        file.package = text(id, src).to_string();
                    }
                }
                "import_declaration" => collect_imports(node, src, &mut file.imports),
                "function_declaration" => file.decls.push(Decl::Func(lower_func(node, src, false))),
                "method_declaration" => file.decls.push(Decl::Func(lower_func(node, src, true))),
                "type_declaration" => lower_type_specs(node, src, &mut file.decls),
                "const_declaration" => lower_value_specs(node, src, ValueKind::Const, &mut file.decls),
                "var_declaration" => lower_value_specs(node, src, ValueKind::Var, &mut file.decls),
                _ => {}
            }
        }

        if file.package.is_empty() {
            return Err(Error::load(display, "missing package clause"));
        }
        Ok(file)
    }
}

fn text<'a>(node: Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(bad) = first_error(child) {
            return Some(bad);
        }
    }
    None
}

fn collect_imports(node: Node, src: &[u8], out: &mut Vec<Import>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => out.extend(lower_import(child, src)),
            "import_spec_list" => collect_imports(child, src, out),
            _ => {}
        }
    }
}

fn lower_import(spec: Node, src: &[u8]) -> Option<Import> {
    let path = text(spec.child_by_field_name("path")?, src)
        .trim_matches(|c| c == '"' || c == '`')
        .to_string();
    let alias = match spec.child_by_field_name("name").map(|n| text(n, src)) {
        None => ImportAlias::Default,
        Some(".") => ImportAlias::Dot,
        Some("_") => ImportAlias::Blank,
        Some(name) => ImportAlias::Named(name.to_string()),
    };
    Some(Import {
        path,
        alias,
        line: spec.start_position().row + 1,
    })
}

fn lower_func(node: Node, src: &[u8], has_receiver: bool) -> FuncDecl {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src).to_string())
        .unwrap_or_default();
    let type_params = node
        .child_by_field_name("type_parameters")
        .map(|tp| field_names_of(tp, "type_parameter_declaration", src))
        .unwrap_or_default();
    let params = node
        .child_by_field_name("parameters")
        .map(|p| lower_params(p, src))
        .unwrap_or_default();
    let has_results = node.child_by_field_name("result").is_some();
    let statements = node
        .child_by_field_name("body")
        .map(count_statements)
        .unwrap_or(0);

    FuncDecl {
        name,
        has_receiver,
        type_params,
        params,
        has_results,
        statements,
        line: node.start_position().row + 1,
    }
}

/// Collect the `name` fields of every `kind` child of `list`.
fn field_names_of(list: Node, kind: &str, src: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = list.walk();
    for child in list.named_children(&mut cursor) {
        if child.kind() == kind {
            names.extend(names_of(child, src));
        }
    }
    names
}

fn names_of(node: Node, src: &[u8]) -> Vec<String> {
    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .map(|n| text(n, src).to_string())
        .collect()
}

fn lower_params(list: Node, src: &[u8]) -> Vec<TypeExpr> {
    let mut params = Vec::new();
    let mut cursor = list.walk();
    for child in list.named_children(&mut cursor) {
        let ty = match child.kind() {
            "parameter_declaration" => child
                .child_by_field_name("type")
                .map(|t| lower_type(t, src))
                .unwrap_or(TypeExpr::Other("unknown")),
            "variadic_parameter_declaration" => TypeExpr::Other("variadic"),
            _ => continue,
        };
        // Unnamed parameters (`func(int, string)`) declare one each.
        let count = names_of(child, src).len().max(1);
        params.extend(std::iter::repeat_n(ty, count));
    }
    params
}

pub(crate) fn lower_type(node: Node, src: &[u8]) -> TypeExpr {
    match node.kind() {
        "type_identifier" | "identifier" => TypeExpr::Name(text(node, src).to_string()),
        "qualified_type" => {
            let field = |f: &str| {
                node.child_by_field_name(f)
                    .map(|n| text(n, src).to_string())
                    .unwrap_or_default()
            };
            TypeExpr::Qualified {
                package: field("package"),
                name: field("name"),
            }
        }
        "pointer_type" => TypeExpr::Pointer(Box::new(first_type(node, src))),
        "parenthesized_type" => first_type(node, src),
        "generic_type" => TypeExpr::Generic(Box::new(
            node.child_by_field_name("type")
                .map(|t| lower_type(t, src))
                .unwrap_or(TypeExpr::Other("unknown")),
        )),
        kind => TypeExpr::Other(kind),
    }
}

fn first_type(node: Node, src: &[u8]) -> TypeExpr {
    let mut cursor = node.walk();
    let inner = node
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    inner
        .map(|n| lower_type(n, src))
        .unwrap_or(TypeExpr::Other("unknown"))
}

fn count_statements(block: Node) -> usize {
    let mut cursor = block.walk();
    block
        .named_children(&mut cursor)
        .map(|child| match child.kind() {
            "statement_list" => count_statements(child),
            "comment" | "empty_statement" => 0,
            _ => 1,
        })
        .sum()
}

fn lower_type_specs(decl: Node, src: &[u8], out: &mut Vec<Decl>) {
    let mut cursor = decl.walk();
    for spec in decl.named_children(&mut cursor) {
        let is_alias = match spec.kind() {
            "type_spec" => false,
            "type_alias" => true,
            _ => continue,
        };
        let Some(name) = spec.child_by_field_name("name") else {
            continue;
        };
        let target = spec
            .child_by_field_name("type")
            .map(|t| lower_type(t, src))
            .unwrap_or(TypeExpr::Other("unknown"));
        let type_params = spec
            .child_by_field_name("type_parameters")
            .map(|tp| field_names_of(tp, "type_parameter_declaration", src))
            .unwrap_or_default();
        out.push(Decl::Type(TypeSpec {
            name: text(name, src).to_string(),
            is_alias,
            type_params,
            target,
            line: spec.start_position().row + 1,
        }));
    }
}

fn lower_value_specs(decl: Node, src: &[u8], kind: ValueKind, out: &mut Vec<Decl>) {
    let mut cursor = decl.walk();
    for spec in decl.named_children(&mut cursor) {
        match spec.kind() {
            "const_spec" | "var_spec" => out.push(Decl::Value(ValueSpec {
                kind,
                names: names_of(spec, src),
                executable: has_executable_literal(spec),
                line: spec.start_position().row + 1,
            })),
            "var_spec_list" => lower_value_specs(spec, src, kind, out),
            _ => {}
        }
    }
}

fn has_executable_literal(node: Node) -> bool {
    if node.kind() == "func_literal" {
        return node
            .child_by_field_name("body")
            .is_some_and(|body| count_statements(body) > 0);
    }
    let mut cursor = node.walk();
    let mut children = node.named_children(&mut cursor);
    children.any(has_executable_literal)
}

#[cfg(test)]
#[path = "syntax_tests.rs"]
mod tests;
