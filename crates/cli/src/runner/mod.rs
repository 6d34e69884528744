// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test and coverage runner.
//!
//! Runs `go test -json -cover` and folds its event stream into package
//! reports while it is still running. A reader thread decodes stdout; the
//! calling thread races it, then the exit and stderr, against one deadline.
//! On expiry the whole process group is killed and the partial reports are
//! returned.

pub mod coverage;
pub mod event;
pub mod process;
pub mod report;

use std::collections::BTreeSet;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, select};

use crate::error::{Error, Result};

pub use coverage::{CoverageResult, FULL_COVERAGE};
pub use event::{Action, TestEvent};
pub use report::{Aggregator, PackageReport, TestRun};

use self::report::RunEnd;

const STREAM: &str = "go test -json";

/// How long to wait for stderr after a killed run.
const STDERR_GRACE: Duration = Duration::from_millis(200);

/// Exit polling interval once stdout has closed.
const EXIT_POLL: Duration = Duration::from_millis(10);

/// Inputs for a test run.
#[derive(Debug, Clone)]
pub struct TestRunOptions {
    /// Module root; the toolchain runs here.
    pub root: PathBuf,
    pub pattern: String,
    pub go: String,
    pub timeout: Duration,
    /// Loaded import paths. Events for anything else are malformed.
    pub known_packages: Option<BTreeSet<String>>,
}

enum StreamItem {
    Event(TestEvent),
    Malformed(String),
    ReadFailed(std::io::Error),
}

/// Run the tests under a deadline.
///
/// A timeout is not an error: it yields a failed run with the partial
/// reports collected so far.
pub fn run_tests(opts: &TestRunOptions) -> Result<TestRun> {
    let started = Instant::now();

    let mut cmd = Command::new(&opts.go);
    cmd.args(["test", "-json", "-cover"])
        .arg(&opts.pattern)
        .current_dir(&opts.root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    process::own_group(&mut cmd);

    tracing::debug!("{} test -json -cover {} (timeout {:?})", opts.go, opts.pattern, opts.timeout);
    let mut child = cmd.spawn().map_err(|e| Error::exec(&opts.go, e))?;
    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        process::terminate(&mut child);
        return Err(Error::Io(std::io::Error::other("child pipes unavailable")));
    };

    let events = read_events(stdout);
    let stderr_lines = read_stderr(stderr);
    // A deadline past the end of the clock never fires.
    let deadline = match started.checked_add(opts.timeout) {
        Some(at) => crossbeam_channel::at(at),
        None => crossbeam_channel::never(),
    };
    let mut aggregator = Aggregator::new(opts.known_packages.as_ref());
    let mut timed_out = false;

    loop {
        select! {
            recv(events) -> item => match item {
                Ok(StreamItem::Event(event)) => {
                    if let Err(err) = aggregator.apply(event) {
                        process::terminate(&mut child);
                        return Err(err);
                    }
                }
                Ok(StreamItem::Malformed(message)) => {
                    process::terminate(&mut child);
                    return Err(Error::protocol(STREAM, message));
                }
                Ok(StreamItem::ReadFailed(err)) => {
                    process::terminate(&mut child);
                    return Err(Error::Io(err));
                }
                Err(_) => break,
            },
            recv(deadline) -> _ => {
                expire(&mut child, opts, &aggregator);
                timed_out = true;
                break;
            }
        }
    }

    // Closing stdout does not end the run: the toolchain, or a test child
    // holding stderr, stays under the same deadline.
    let mut exit_ok = false;
    if !timed_out {
        match wait_until(&mut child, &deadline) {
            Ok(Some(status)) => exit_ok = status.success(),
            Ok(None) => {
                expire(&mut child, opts, &aggregator);
                timed_out = true;
            }
            Err(err) => {
                process::terminate(&mut child);
                return Err(err);
            }
        }
    }
    let stderr = if timed_out {
        stderr_lines.recv_timeout(STDERR_GRACE).unwrap_or_default()
    } else {
        select! {
            recv(stderr_lines) -> lines => lines.unwrap_or_default(),
            recv(deadline) -> _ => {
                expire(&mut child, opts, &aggregator);
                timed_out = true;
                exit_ok = false;
                stderr_lines.recv_timeout(STDERR_GRACE).unwrap_or_default()
            }
        }
    };

    let run = aggregator.finish(RunEnd {
        timed_out,
        exit_ok,
        stderr,
        timeout: opts.timeout,
        elapsed: started.elapsed(),
        pattern: opts.pattern.clone(),
    });
    tracing::debug!(
        "tests finished in {:?}: passed = {}, coverage = {:.1}%",
        run.elapsed,
        run.passed,
        run.coverage
    );
    Ok(run)
}

/// Poll the child until it exits. `None` means the deadline fired first.
fn wait_until(child: &mut Child, deadline: &Receiver<Instant>) -> Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        select! {
            recv(deadline) -> _ => return Ok(None),
            default(EXIT_POLL) => {}
        }
    }
}

/// Kill the process group after the deadline.
fn expire(child: &mut Child, opts: &TestRunOptions, aggregator: &Aggregator<'_>) {
    tracing::warn!(
        "tests exceeded {:?}; killing process group ({} packages seen)",
        opts.timeout,
        aggregator.packages().len()
    );
    process::terminate(child);
}

/// Decode stdout line by line on a dedicated thread.
fn read_events(stdout: ChildStdout) -> Receiver<StreamItem> {
    let (tx, rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || {
        for line in BufReader::new(stdout).split(b'\n') {
            let item = match line {
                Ok(line) if line.trim_ascii().is_empty() => continue,
                Ok(line) => match event::parse_event(&line) {
                    Ok(event) => StreamItem::Event(event),
                    Err(e) => StreamItem::Malformed(format!(
                        "{} in line {:?}",
                        e,
                        String::from_utf8_lossy(&line)
                    )),
                },
                Err(e) => StreamItem::ReadFailed(e),
            };
            let last = !matches!(item, StreamItem::Event(_));
            if tx.send(item).is_err() || last {
                break;
            }
        }
    });
    rx
}

/// Collect stderr on its own thread so a chatty toolchain never blocks.
fn read_stderr(stderr: ChildStderr) -> Receiver<Vec<String>> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Err(e) = BufReader::new(stderr).read_to_end(&mut buf) {
            tracing::debug!("stderr read failed: {}", e);
        }
        let lines = String::from_utf8_lossy(&buf)
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
        let _ = tx.send(lines);
    });
    rx
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
