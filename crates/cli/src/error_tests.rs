// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn config_errors_map_to_config_exit_code() {
    let err = anyhow::Error::new(Error::Config {
        path: PathBuf::from("testgate.toml"),
        message: "unsupported version 7".to_string(),
    });
    assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigError);
}

#[test]
fn load_and_exec_errors_are_internal() {
    let load = anyhow::Error::new(Error::load("example.com/m", "syntax error"));
    assert_eq!(ExitCode::for_error(&load), ExitCode::InternalError);

    let exec = anyhow::Error::new(Error::exec(
        "go",
        std::io::Error::from(std::io::ErrorKind::NotFound),
    ));
    assert_eq!(ExitCode::for_error(&exec), ExitCode::InternalError);
}

#[test]
fn protocol_error_names_the_stream() {
    let err = Error::protocol("go test -json", "expected value at line 1 column 1");
    assert_eq!(
        err.to_string(),
        "malformed go test -json output: expected value at line 1 column 1"
    );
}

#[test]
fn exit_code_values_are_stable() {
    assert_eq!(ExitCode::Success as u8, 0);
    assert_eq!(ExitCode::PolicyFailed as u8, 1);
    assert_eq!(ExitCode::ConfigError as u8, 2);
    assert_eq!(ExitCode::InternalError as u8, 3);
}
