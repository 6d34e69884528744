// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use tracing_subscriber::EnvFilter;

use testgate::cli::{Cli, Command};
use testgate::error::ExitCode;

mod cmd_check;
mod cmd_init;

fn main() -> std::process::ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Command::Check(args)) => cmd_check::run(args, cli.config.as_deref()),
        Some(Command::Init(args)) => cmd_init::run(args, cli.config.as_deref()),
        None => cmd_check::run(&cli.check, cli.config.as_deref()),
    };

    match result {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("testgate: {:#}", err);
            ExitCode::for_error(&err).into()
        }
    }
}

/// Log to stderr, filtered by `TESTGATE_LOG` (default: warn).
fn init_logging() {
    let filter = EnvFilter::try_from_env("TESTGATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
