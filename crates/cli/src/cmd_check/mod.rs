// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `testgate check` command implementation.

mod verbose;

use std::io::Write;
use std::path::{Path, PathBuf};

use testgate::cli::CheckArgs;
use testgate::config::{self, Config};
use testgate::discovery;
use testgate::error::ExitCode;
use testgate::policy::{self, PolicyOptions};
use testgate::verbose::VerboseLogger;

/// Run the `testgate check` command.
pub fn run(args: &CheckArgs, config_path: Option<&Path>) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;

    let root = match &args.path {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => cwd.join(path),
        None => discovery::find_module_root(&cwd).unwrap_or_else(|| cwd.clone()),
    };

    let config_path: Option<PathBuf> = config_path
        .map(Path::to_path_buf)
        .or_else(|| discovery::find_config(&root));
    let config = match &config_path {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };

    let options = resolve_options(&root, &config, args);
    let logger = VerboseLogger::new(args.verbose);
    verbose::options(&logger, &options, config_path.as_deref());

    let report = policy::run_policy(&options)?;
    verbose::stages(&logger, &report);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report.render(&mut out)?;
    out.flush()?;

    Ok(if report.passed() {
        ExitCode::Success
    } else {
        ExitCode::PolicyFailed
    })
}

/// Config file values, overridden by flags.
fn resolve_options(root: &Path, config: &Config, args: &CheckArgs) -> PolicyOptions {
    let mut options = PolicyOptions::from_config(root, config);
    if let Some(pattern) = &args.pattern {
        options.pattern = pattern.clone();
    }
    if let Some(timeout) = args.timeout {
        options.timeout = timeout;
    }
    if let Some(go) = &args.go {
        options.go = go.clone();
    }
    if args.no_vet {
        options.vet = false;
    }
    options
}
