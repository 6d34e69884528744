// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! Config structs delegate to these via `#[serde(default = ...)]`.

use std::time::Duration;

/// Every package in the module, recursively.
pub fn pattern() -> String {
    "./...".to_string()
}

pub fn enabled() -> bool {
    true
}

/// Matches `go test`'s own default per-binary timeout.
pub fn test_timeout() -> Duration {
    Duration::from_secs(10 * 60)
}

pub fn go() -> String {
    "go".to_string()
}

/// Config file written by `testgate init`.
pub const CONFIG_TEMPLATE: &str = r#"version = 1

# Packages to check.
pattern = "./..."

[vet]
enabled = true

[tests]
# Deadline for the whole test run: "<n>ms", "<n>s", "<n>m" or "<n>h".
timeout = "10m"
go = "go"
"#;
