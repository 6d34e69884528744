// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental aggregation of test events into per-package reports.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use super::coverage::{CoverageResult, FULL_COVERAGE, Summary, parse_summary};
use super::event::{Action, TestEvent};
use crate::error::{Error, Result};

/// Results for one package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageReport {
    pub package: String,
    pub failed: bool,
    /// Output lines attributed to the package, verbatim minus the newline.
    pub output: Vec<String>,
    /// Failing tests in first-failure order.
    pub failed_tests: Vec<String>,
    /// Statement coverage, when a summary was reported.
    pub coverage: Option<f64>,
    /// The package was still running when the deadline fired.
    pub timed_out: bool,
    /// A package-level pass/fail/skip arrived.
    pub finished: bool,
}

impl PackageReport {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    pub fn coverage_ok(&self) -> bool {
        self.coverage.is_none_or(|c| c >= FULL_COVERAGE)
    }
}

/// Outcome of a `go test` run.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRun {
    pub passed: bool,
    pub packages: BTreeMap<String, PackageReport>,
    /// Lowest per-package coverage (100 when no package reported any).
    pub coverage: f64,
    pub timed_out: bool,
    /// Deadline the run was bound by.
    pub timeout: Duration,
    /// Compiler output from `build-output` events of failed builds.
    pub build_output: Vec<String>,
    /// Toolchain stderr, kept when the run exited unsuccessfully without
    /// blaming any package.
    pub stderr: Vec<String>,
    pub elapsed: Duration,
}

impl TestRun {
    pub fn coverage_result(&self) -> CoverageResult {
        CoverageResult::new(self.coverage)
    }

    /// Report lines for the failing-tests section, in a fixed order.
    pub fn failure_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for report in self.packages.values() {
            for test in &report.failed_tests {
                lines.push(format!("{}: {} failed", report.package, test));
            }
            if report.failed && report.failed_tests.is_empty() && !report.timed_out {
                lines.push(format!("{} failed", report.package));
            }
            if report.timed_out {
                lines.push(format!(
                    "{} timed out after {:?}",
                    report.package, self.timeout
                ));
            }
            if let Some(pct) = report.coverage
                && !report.coverage_ok()
            {
                lines.push(format!(
                    "{}: coverage {:.1}% of statements, want {}%",
                    report.package, pct, FULL_COVERAGE
                ));
            }
        }
        lines.extend(self.build_output.iter().cloned());
        lines.extend(self.stderr.iter().cloned());
        lines
    }

    /// Reports of packages that failed or timed out.
    pub fn failed_packages(&self) -> impl Iterator<Item = &PackageReport> {
        self.packages.values().filter(|r| r.failed || r.timed_out)
    }
}

/// How the event stream ended.
#[derive(Debug, Clone)]
pub(crate) struct RunEnd {
    pub timed_out: bool,
    pub exit_ok: bool,
    pub stderr: Vec<String>,
    pub timeout: Duration,
    pub elapsed: Duration,
    /// Target pattern, used to attribute a timeout when nothing was in flight.
    pub pattern: String,
}

/// Folds events into package reports as they arrive.
pub struct Aggregator<'a> {
    known: Option<&'a BTreeSet<String>>,
    packages: BTreeMap<String, PackageReport>,
    build_output: Vec<String>,
    build_failed: bool,
}

impl<'a> Aggregator<'a> {
    /// `known` restricts events to loaded packages; `None` accepts any.
    pub fn new(known: Option<&'a BTreeSet<String>>) -> Self {
        Self {
            known,
            packages: BTreeMap::new(),
            build_output: Vec::new(),
            build_failed: false,
        }
    }

    pub fn apply(&mut self, event: TestEvent) -> Result<()> {
        match event.action {
            Action::BuildOutput => {
                if let Some(text) = &event.output {
                    self.build_output.push(text.trim_end_matches('\n').to_string());
                }
                return Ok(());
            }
            Action::BuildFail => {
                self.build_failed = true;
                return Ok(());
            }
            _ => {}
        }

        let Some(package) = event.package() else {
            return Ok(());
        };
        if let Some(known) = self.known
            && !known.contains(package)
        {
            return Err(Error::protocol(
                "go test -json",
                format!("event for unknown package {:?}", package),
            ));
        }

        let report = self
            .packages
            .entry(package.to_string())
            .or_insert_with(|| PackageReport::new(package));

        match event.action {
            Action::Output => {
                if let Some(text) = &event.output {
                    let line = text.trim_end_matches('\n');
                    match parse_summary(line) {
                        Some(Summary::Percent(pct)) => report.coverage = Some(pct),
                        Some(Summary::NoStatements) => report.coverage = Some(FULL_COVERAGE),
                        Some(Summary::NoTestFiles) | None => {}
                    }
                    report.output.push(line.to_string());
                }
            }
            Action::Fail => {
                report.failed = true;
                match event.test {
                    Some(test) => {
                        if !report.failed_tests.contains(&test) {
                            report.failed_tests.push(test);
                        }
                    }
                    None => report.finished = true,
                }
            }
            Action::Pass | Action::Skip => {
                if event.test.is_none() {
                    report.finished = true;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Packages seen so far.
    pub fn packages(&self) -> &BTreeMap<String, PackageReport> {
        &self.packages
    }

    pub(crate) fn finish(mut self, end: RunEnd) -> TestRun {
        if end.timed_out {
            self.attribute_timeout(&end.pattern);
        }

        let coverage = self
            .packages
            .values()
            .filter_map(|r| r.coverage)
            .fold(FULL_COVERAGE, f64::min);
        let any_failed = self.build_failed || self.packages.values().any(|r| r.failed);
        let passed = !end.timed_out && end.exit_ok && !any_failed && coverage >= FULL_COVERAGE;

        TestRun {
            passed,
            packages: self.packages,
            coverage,
            timed_out: end.timed_out,
            timeout: end.timeout,
            build_output: if self.build_failed {
                self.build_output
            } else {
                Vec::new()
            },
            stderr: if end.exit_ok || end.timed_out || any_failed {
                Vec::new()
            } else {
                end.stderr
            },
            elapsed: end.elapsed,
        }
    }

    /// Mark in-flight packages as timed out, so the partial report is never
    /// empty after a timeout.
    fn attribute_timeout(&mut self, pattern: &str) {
        let mut attributed = false;
        for report in self.packages.values_mut().filter(|r| !r.finished) {
            report.timed_out = true;
            report.failed = true;
            attributed = true;
        }
        if attributed {
            return;
        }

        let pending: Vec<String> = match self.known {
            Some(known) => known
                .iter()
                .filter(|p| !self.packages.contains_key(*p))
                .cloned()
                .collect(),
            None => vec![pattern.to_string()],
        };
        let pending = if pending.is_empty() {
            vec![pattern.to_string()]
        } else {
            pending
        };
        for package in pending {
            let mut report = PackageReport::new(&package);
            report.timed_out = true;
            report.failed = true;
            self.packages.insert(package, report);
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
