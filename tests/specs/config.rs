//! Behavioral specs for testgate.toml handling.

use crate::prelude::*;

/// > Invalid config exits 2
#[test]
fn unknown_key_is_config_error() {
    let project = Project::module("example.com/m");
    project.file("testgate.toml", "version = 1\nparallel = true\n");

    testgate_cmd()
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("testgate.toml"));
}

/// > Unsupported version exits 2
#[test]
fn unsupported_version_is_config_error() {
    let project = Project::module("example.com/m");
    project.file("testgate.toml", "version = 2\n");

    testgate_cmd()
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unsupported config version 2"));
}

/// > -C selects a config outside the module
#[test]
fn explicit_config_path_is_used() {
    let project = Project::module("example.com/m");
    project.file("ci/strict.toml", "version = 1\n[tests]\ntimeout = \"never\"\n");

    testgate_cmd()
        .args(["-C", "ci/strict.toml"])
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("strict.toml"));
}

/// > The config file names the toolchain
#[test]
fn config_selects_toolchain() {
    let project = Project::module("example.com/m");
    project.file(
        "testgate.toml",
        "version = 1\n[tests]\ngo = \"/nonexistent/bin/go\"\n",
    );

    testgate_cmd()
        .current_dir(project.path())
        .assert()
        .code(3)
        .stderr(predicates::str::contains("/nonexistent/bin/go"));
}

/// > Flags override the config file
#[test]
fn flags_override_config() {
    let project = Project::module("example.com/m");
    project.file("testgate.toml", "version = 1\n[tests]\ngo = \"/nonexistent/a/go\"\n");

    testgate_cmd()
        .args(["--go", "/nonexistent/b/go"])
        .current_dir(project.path())
        .assert()
        .code(3)
        .stderr(predicates::str::contains("/nonexistent/b/go"));
}

/// > Invalid --timeout values are usage errors
#[test]
fn invalid_timeout_flag_is_rejected() {
    testgate_cmd()
        .args(["--timeout", "soon"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("soon"));
}
