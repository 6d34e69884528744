// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose logging helpers for the check command.

use std::path::Path;

use testgate::policy::{PolicyOptions, PolicyReport};
use testgate::verbose::VerboseLogger;

pub(super) fn options(verbose: &VerboseLogger, options: &PolicyOptions, config_path: Option<&Path>) {
    if !verbose.is_enabled() {
        return;
    }
    verbose.section("Configuration");
    match config_path {
        Some(path) => {
            let display = path.strip_prefix(&options.root).unwrap_or(path);
            verbose.log(&format!("Config: {}", display.display()));
        }
        None => verbose.log("Config: (defaults)"),
    }
    verbose.log(&format!("Root: {}", options.root.display()));
    verbose.log(&format!("Pattern: {}", options.pattern));
    verbose.log(&format!("Toolchain: {}", options.go));
    verbose.log(&format!("Vet: {}", if options.vet { "on" } else { "off" }));
    verbose.log(&format!("Test timeout: {:?}", options.timeout));
}

pub(super) fn stages(verbose: &VerboseLogger, report: &PolicyReport) {
    if !verbose.is_enabled() {
        return;
    }

    verbose.section("Vet");
    match &report.lint {
        Some(lint) if lint.passed => verbose.log("clean"),
        Some(lint) => verbose.log(&format!("{} diagnostic lines", lint.lines().len())),
        None => verbose.log("skipped"),
    }

    let tests = &report.tests;
    verbose.section("Tests");
    verbose.log(&format!(
        "{} packages in {:.1}s, coverage {:.1}%{}",
        tests.packages.len(),
        tests.elapsed.as_secs_f64(),
        tests.coverage,
        if tests.timed_out { " (timed out)" } else { "" }
    ));
    for failed in tests.failed_packages() {
        verbose.log(&format!("{}:", failed.package));
        verbose.block(&failed.output);
    }

    verbose.section("Needs tests");
    if report.has_tests.passed() {
        verbose.log("every package with code has tests");
    } else {
        verbose.log(&format!("{} packages without tests", report.has_tests.missing.len()));
    }
}
