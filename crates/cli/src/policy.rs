// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Policy orchestration.
//!
//! Loads the package graph once, then runs vet, the tests and the
//! needs-tests check in sequence. Load, exec and protocol errors abort;
//! everything else is merged into one report rendered in a fixed order:
//! lint diagnostics, failing tests, missing tests.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::go::loader::{self, LoadOptions};
use crate::lint::{self, LintOptions, LintOutcome};
use crate::oracle::{self, HasTestsReport};
use crate::runner::{self, TestRun, TestRunOptions};

/// Settings threaded into every stage.
#[derive(Debug, Clone)]
pub struct PolicyOptions {
    pub root: PathBuf,
    pub pattern: String,
    pub go: String,
    pub vet: bool,
    pub timeout: Duration,
}

impl PolicyOptions {
    pub fn from_config(root: &Path, config: &Config) -> Self {
        Self {
            root: root.to_path_buf(),
            pattern: config.pattern.clone(),
            go: config.tests.go.clone(),
            vet: config.vet.enabled,
            timeout: config.tests.timeout,
        }
    }
}

/// Merged outcome of every stage.
#[derive(Debug, Clone)]
pub struct PolicyReport {
    /// `None` when vet is disabled.
    pub lint: Option<LintOutcome>,
    pub tests: TestRun,
    pub has_tests: HasTestsReport,
}

impl PolicyReport {
    pub fn passed(&self) -> bool {
        self.lint.as_ref().is_none_or(|l| l.passed)
            && self.tests.passed
            && self.tests.coverage_result().ok
            && self.has_tests.passed()
    }

    /// Report lines: lint, then failing tests, then missing tests.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.lint.as_ref().map(LintOutcome::lines).unwrap_or_default();
        lines.extend(self.tests.failure_lines());
        lines.extend(self.has_tests.lines());
        lines
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

/// Run every stage and merge the results.
pub fn run_policy(opts: &PolicyOptions) -> Result<PolicyReport> {
    tracing::debug!("loading packages matching {}", opts.pattern);
    let graph = loader::load(&LoadOptions {
        root: opts.root.clone(),
        pattern: opts.pattern.clone(),
        go: opts.go.clone(),
    })?;

    let lint = if opts.vet {
        Some(lint::run_vet(&LintOptions {
            root: opts.root.clone(),
            pattern: opts.pattern.clone(),
            go: opts.go.clone(),
        })?)
    } else {
        tracing::debug!("vet disabled");
        None
    };

    let tests = runner::run_tests(&TestRunOptions {
        root: opts.root.clone(),
        pattern: opts.pattern.clone(),
        go: opts.go.clone(),
        timeout: opts.timeout,
        known_packages: Some(graph.import_paths()),
    })?;

    let has_tests = oracle::verify_has_tests(&graph);

    Ok(PolicyReport {
        lint,
        tests,
        has_tests,
    })
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
