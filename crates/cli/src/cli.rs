//! CLI argument parsing with clap derive.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::parse_duration;

/// Enforces a test policy on Go modules: passing tests, clean vet,
/// full statement coverage and tests in every package with logic.
#[derive(Parser)]
#[command(name = "testgate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "TESTGATE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Arguments for the default `check` command
    #[command(flatten)]
    pub check: CheckArgs,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check the policy (default)
    Check(CheckArgs),
    /// Write a default testgate.toml
    Init(InitArgs),
}

#[derive(clap::Args, Default)]
pub struct CheckArgs {
    /// Module directory (default: the enclosing module of the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Package pattern to check (default: ./...)
    #[arg(long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Deadline for the test run, e.g. 90s or 10m
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Go toolchain binary
    #[arg(long, value_name = "BIN")]
    pub go: Option<String>,

    /// Skip go vet
    #[arg(long)]
    pub no_vet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Overwrite existing config
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
