// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `go test -json` event records.

use serde::Deserialize;

/// One line of the test event stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestEvent {
    pub action: Action,
    /// Import path of the package under test.
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub test: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    /// Seconds, on `pass` / `fail` / `skip`.
    #[serde(default)]
    pub elapsed: Option<f64>,
    /// Set on `build-output` / `build-fail` instead of `Package`.
    #[serde(default)]
    pub import_path: Option<String>,
}

impl TestEvent {
    /// Package the event belongs to, if it names one.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref().filter(|p| !p.is_empty())
    }
}

/// Event action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Start,
    Run,
    Pause,
    Cont,
    Pass,
    Bench,
    Fail,
    Output,
    Skip,
    BuildOutput,
    BuildFail,
    #[serde(other)]
    Other,
}

/// Decode a single stream line.
pub fn parse_event(line: &[u8]) -> Result<TestEvent, serde_json::Error> {
    serde_json::from_slice(line)
}
