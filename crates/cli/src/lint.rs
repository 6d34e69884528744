// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Static analysis via `go vet`.
//!
//! Any diagnostic fails the lint policy. Only a vet that cannot be started
//! is an error.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Inputs for a vet run.
#[derive(Debug, Clone)]
pub struct LintOptions {
    pub root: PathBuf,
    pub pattern: String,
    pub go: String,
}

/// Outcome of a vet run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOutcome {
    pub passed: bool,
    /// Diagnostics exactly as vet printed them (stdout, then stderr).
    pub output: String,
}

impl LintOutcome {
    pub fn lines(&self) -> Vec<String> {
        self.output.lines().map(str::to_string).collect()
    }
}

pub fn run_vet(opts: &LintOptions) -> Result<LintOutcome> {
    tracing::debug!("{} vet {} (in {})", opts.go, opts.pattern, opts.root.display());
    let output = Command::new(&opts.go)
        .arg("vet")
        .arg(&opts.pattern)
        .current_dir(&opts.root)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| Error::exec(&opts.go, e))?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    let passed = output.status.success() && text.trim().is_empty();
    if !output.status.success() && text.trim().is_empty() {
        text = format!("{} vet exited with {}\n", opts.go, output.status);
    }
    if !passed {
        tracing::debug!("vet reported {} lines (status {})", text.lines().count(), output.status);
    }
    Ok(LintOutcome {
        passed,
        output: text,
    })
}

#[cfg(test)]
#[path = "lint_tests.rs"]
mod tests;
