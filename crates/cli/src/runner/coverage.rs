// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage summary parsing.
//!
//! The toolchain prints one summary per package, e.g.
//! `coverage: 87.5% of statements`, `coverage: [no statements]` or
//! `[no test files]`.

use std::sync::LazyLock;

use regex::Regex;

/// Coverage below this fails the policy. No tolerance band.
pub const FULL_COVERAGE: f64 = 100.0;

#[allow(clippy::expect_used)]
static PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"coverage: (\d+(?:\.\d+)?)% of statements").expect("valid coverage regex")
});

/// A parsed coverage summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Summary {
    Percent(f64),
    NoStatements,
    NoTestFiles,
}

/// Parse a summary out of an output line, if it carries one.
pub fn parse_summary(line: &str) -> Option<Summary> {
    if let Some(caps) = PERCENT.captures(line) {
        return caps[1].parse().ok().map(Summary::Percent);
    }
    if line.contains("coverage: [no statements]") {
        return Some(Summary::NoStatements);
    }
    if line.contains("[no test files]") || line.trim_end() == "no test files" {
        return Some(Summary::NoTestFiles);
    }
    None
}

/// Overall coverage with its verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageResult {
    pub percentage: f64,
    pub ok: bool,
}

impl CoverageResult {
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage,
            ok: percentage >= FULL_COVERAGE,
        }
    }
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
