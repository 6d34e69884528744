// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! testgate: test-policy enforcement for Go modules.
//!
//! A module passes when `go vet` is clean, every test passes, every package
//! reaches full statement coverage and every package with executable code
//! declares at least one test or fuzz entry point.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod go;
pub mod lint;
pub mod oracle;
pub mod policy;
pub mod runner;
pub mod verbose;

#[cfg(test)]
pub mod test_utils;

pub use error::{Error, ExitCode, Result};
