// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `testgate init` command implementation.

use std::path::Path;

use testgate::cli::InitArgs;
use testgate::config::defaults::CONFIG_TEMPLATE;
use testgate::discovery::{self, CONFIG_FILE};
use testgate::error::ExitCode;

/// Write a default config at the module root (or at `-C <path>`).
pub fn run(args: &InitArgs, config_path: Option<&Path>) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => discovery::find_module_root(&cwd)
            .unwrap_or(cwd)
            .join(CONFIG_FILE),
    };

    if path.exists() && !args.force {
        eprintln!(
            "testgate: {} already exists (use --force to overwrite)",
            path.display()
        );
        return Ok(ExitCode::ConfigError);
    }

    std::fs::write(&path, CONFIG_TEMPLATE)?;
    println!("Created {}", path.display());
    Ok(ExitCode::Success)
}
