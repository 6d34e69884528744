// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Module root and config file discovery.

use std::path::{Path, PathBuf};

/// Config file name.
pub const CONFIG_FILE: &str = "testgate.toml";

/// Nearest ancestor of `start_dir` (inclusive) holding a `go.mod`.
pub fn find_module_root(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find(|dir| dir.join("go.mod").is_file())
        .map(Path::to_path_buf)
}

/// Find `testgate.toml` starting from `start_dir` and walking up to the git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }
        if dir.join(".git").exists() {
            return None;
        }
    }
    None
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
