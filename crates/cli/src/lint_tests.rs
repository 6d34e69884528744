// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::test_utils::temp_module;

#[test]
fn missing_toolchain_is_an_exec_error() {
    let tmp = temp_module("printfvet");
    let err = run_vet(&LintOptions {
        root: tmp.path().to_path_buf(),
        pattern: "./...".to_string(),
        go: tmp.path().join("missing-go").to_string_lossy().into_owned(),
    })
    .unwrap_err();
    assert!(matches!(err, Error::Exec { .. }));
}

#[test]
fn outcome_lines_split_output() {
    let outcome = LintOutcome {
        passed: false,
        output: "# printfvet\n./main.go:7:2: fmt.Printf format %d has arg s of wrong type string\n".to_string(),
    };
    assert_eq!(outcome.lines().len(), 2);
}

#[cfg(unix)]
mod with_fake_toolchain {
    use super::*;
    use crate::test_utils::fake_go;

    fn vet(script: &str) -> LintOutcome {
        let tmp = temp_module("printfvet");
        let go = fake_go(tmp.path(), script);
        run_vet(&LintOptions {
            root: tmp.path().to_path_buf(),
            pattern: "./...".to_string(),
            go,
        })
        .unwrap()
    }

    #[test]
    fn silent_success_passes() {
        let outcome = vet("exit 0\n");
        assert!(outcome.passed);
        assert!(outcome.lines().is_empty());
    }

    #[test]
    fn diagnostics_fail() {
        let outcome = vet(
            "echo '# printfvet' >&2\necho './main.go:7:2: fmt.Printf format %d has arg s of wrong type string' >&2\nexit 1\n",
        );
        assert!(!outcome.passed);
        assert_eq!(
            outcome.lines(),
            vec![
                "# printfvet".to_string(),
                "./main.go:7:2: fmt.Printf format %d has arg s of wrong type string".to_string(),
            ]
        );
    }

    #[test]
    fn output_with_zero_exit_still_fails() {
        let outcome = vet("echo 'suspicious construct'\nexit 0\n");
        assert!(!outcome.passed);
    }

    #[test]
    fn silent_failure_reports_status() {
        let outcome = vet("exit 3\n");
        assert!(!outcome.passed);
        let lines = outcome.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("vet exited with"), "{}", lines[0]);
    }
}
