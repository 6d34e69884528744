//! Behavioral specs for `testgate check` against Go module fixtures.

use crate::prelude::*;

// =============================================================================
// Passing Modules
// =============================================================================

/// > A tested, fully covered, vet-clean module passes silently
#[test]
fn passing_module_exits_zero_with_no_output() {
    if !go_available() {
        return;
    }
    check_fixture("testok").assert().success().stdout("");
}

/// > Check is the default command
#[test]
fn bare_invocation_checks_current_module() {
    if !go_available() {
        return;
    }
    testgate_cmd()
        .current_dir(fixture("testok"))
        .assert()
        .success();
}

/// > A path argument selects the module
#[test]
fn path_argument_selects_module() {
    if !go_available() {
        return;
    }
    testgate_cmd()
        .arg(fixture("testfail"))
        .assert()
        .code(1)
        .stdout(predicates::str::contains("testfail: TestSum failed"));
}

/// > Fuzz targets count as tests
#[test]
fn fuzz_targets_count_as_tests() {
    if !go_available() {
        return;
    }
    check_fixture("testfuzz")
        .assert()
        .stdout(predicates::str::contains("has no tests").not());
}

/// > Packages without executable statements need no tests
#[test]
fn declaration_only_package_needs_no_tests() {
    if !go_available() {
        return;
    }
    check_fixture("noneedtests")
        .assert()
        .stdout(predicates::str::contains("has no tests").not());
}

// =============================================================================
// Policy Violations
// =============================================================================

/// > Failing tests are named as "<package>: <test> failed"
#[test]
fn failing_test_is_reported_by_name() {
    if !go_available() {
        return;
    }
    check_fixture("testfail")
        .assert()
        .code(1)
        .stdout("testfail: TestSum failed\n");
}

/// > Coverage below 100% fails the policy
#[test]
fn partial_coverage_fails() {
    if !go_available() {
        return;
    }
    check_fixture("nocoverage")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("nocoverage: coverage"))
        .stdout(predicates::str::contains("want 100%"));
}

/// > Each package with code is checked for tests on its own
#[test]
fn every_untested_package_is_listed() {
    if !go_available() {
        return;
    }
    check_fixture("notests")
        .assert()
        .code(1)
        .stdout(predicates::str::contains(
            "notests has no tests\nnotests/sub has no tests\n",
        ));
}

/// > Helpers in _test.go files are not tests
#[test]
fn test_file_without_entry_points_fails() {
    if !go_available() {
        return;
    }
    check_fixture("withouttests")
        .assert()
        .code(1)
        .stdout(predicates::str::contains("withouttests has no tests"));
}

/// > Vet diagnostics fail the policy and are printed first
#[test]
fn vet_diagnostics_fail() {
    if !go_available() {
        return;
    }
    let output = check_fixture("printfvet").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("describe.go"), "{}", stdout);
}

/// > --no-vet skips static analysis
#[test]
fn no_vet_skips_static_analysis() {
    if !go_available() {
        return;
    }
    check_fixture("printfvet")
        .arg("--no-vet")
        .assert()
        .success()
        .stdout("");
}

/// > A run past its deadline is killed and reported, not an error
#[test]
fn timeout_is_a_policy_failure() {
    if !go_available() {
        return;
    }
    check_fixture("timeout")
        .args(["--timeout", "100ms"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("timed out after 100ms"));
}

/// > Output is identical across runs
#[test]
fn output_is_deterministic() {
    if !go_available() {
        return;
    }
    let first = check_fixture("notests").output().unwrap();
    let second = check_fixture("notests").output().unwrap();
    similar_asserts::assert_eq!(
        String::from_utf8_lossy(&first.stdout),
        String::from_utf8_lossy(&second.stdout)
    );
}

// =============================================================================
// Unrecoverable Errors
// =============================================================================

/// > A missing toolchain exits 3
#[test]
fn missing_toolchain_is_internal_error() {
    check_fixture("testok")
        .args(["--go", "/nonexistent/bin/go"])
        .assert()
        .code(3)
        .stderr(predicates::str::contains("failed to run /nonexistent/bin/go"));
}

/// > Syntax errors abort the run
#[test]
fn syntax_error_is_internal_error() {
    if !go_available() {
        return;
    }
    check_fixture("brokensyntax")
        .assert()
        .code(3)
        .stderr(predicates::str::contains("failed to load"));
}

/// > A pattern that matches nothing aborts the run
#[test]
fn empty_pattern_match_is_internal_error() {
    if !go_available() {
        return;
    }
    check_fixture("testok")
        .args(["--pattern", "./nothing/..."])
        .assert()
        .code(3);
}
