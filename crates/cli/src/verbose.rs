// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose output logger for diagnostic information.
//!
//! Writes to stderr so the policy report on stdout stays byte-for-byte
//! stable. Enabled with `--verbose`.

/// Verbose output logger. Writes to stderr when enabled.
pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a line indented under the current section.
    pub fn log(&self, msg: &str) {
        if self.enabled {
            eprintln!("{}", Self::indent(msg, 1));
        }
    }

    /// Print captured tool output, one level deeper than `log`.
    pub fn block(&self, lines: &[String]) {
        if self.enabled {
            for line in lines {
                eprintln!("{}", Self::indent(line, 2));
            }
        }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if self.enabled {
            eprintln!("\n{}:", title);
        }
    }

    fn indent(msg: &str, level: usize) -> String {
        format!("{}{}", "  ".repeat(level), msg)
    }
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;
