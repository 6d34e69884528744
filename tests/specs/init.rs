//! Behavioral specs for `testgate init`.

use crate::prelude::*;

/// > init writes testgate.toml at the module root
#[test]
fn init_creates_config_at_module_root() {
    let project = Project::module("example.com/m");
    project.file("pkg/a.go", "package pkg\n");

    testgate_cmd()
        .arg("init")
        .current_dir(project.path().join("pkg"))
        .assert()
        .success()
        .stdout(predicates::str::contains("Created"));

    let config = std::fs::read_to_string(project.path().join("testgate.toml")).unwrap();
    assert!(config.contains("version = 1"));
}

/// > Refuses to overwrite an existing config without --force
#[test]
fn init_refuses_to_overwrite_without_force() {
    let project = Project::module("example.com/m");
    project.file("testgate.toml", "version = 1\n# existing\n");

    testgate_cmd()
        .arg("init")
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("already exists"))
        .stderr(predicates::str::contains("--force"));

    let config = std::fs::read_to_string(project.path().join("testgate.toml")).unwrap();
    assert!(config.contains("# existing"));
}

/// > --force overwrites an existing config
#[test]
fn init_force_overwrites_existing_config() {
    let project = Project::module("example.com/m");
    project.file("testgate.toml", "version = 1\n# existing\n");

    testgate_cmd()
        .args(["init", "--force"])
        .current_dir(project.path())
        .assert()
        .success();

    let config = std::fs::read_to_string(project.path().join("testgate.toml")).unwrap();
    assert!(!config.contains("# existing"));
    assert!(config.contains("[tests]"));
}

/// > The written config is accepted by check
#[test]
fn init_output_is_a_valid_config() {
    let project = Project::module("example.com/m");
    testgate_cmd()
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success();

    // A config error would exit 2; a missing toolchain exits 3.
    testgate_cmd()
        .args(["check", "--go", "/nonexistent/bin/go"])
        .current_dir(project.path())
        .assert()
        .code(3);
}
