//! Command-line tests
//!
//! Run the compiled binary against the e2e fixtures to check stdout, stderr and
//! exit codes.

use rstest::rstest;
use std::process::Command;

const FIXTURES: &str = "tests/fixtures";

fn split_ledger() -> Command {
    Command::new(env!("CARGO_BIN_EXE_split-ledger"))
}

#[rstest]
#[case::sync_strategy("sync")]
#[case::async_strategy("async")]
fn test_cli_writes_transfers_with_settled_flags(#[case] strategy: &str) {
    let output = split_ledger()
        .arg("--strategy")
        .arg(strategy)
        .arg("--settled")
        .arg(format!("{FIXTURES}/settled_flags/settled.csv"))
        .arg("--split")
        .arg("trip")
        .arg(format!("{FIXTURES}/settled_flags/participants.csv"))
        .arg(format!("{FIXTURES}/settled_flags/expenses.csv"))
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let expected = std::fs::read_to_string(format!("{FIXTURES}/settled_flags/expected_transfers.csv"))
        .expect("Failed to read expected file");
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn test_cli_balances_report() {
    let output = split_ledger()
        .arg("--report")
        .arg("balances")
        .arg(format!("{FIXTURES}/worked_scenario/participants.csv"))
        .arg(format!("{FIXTURES}/worked_scenario/expenses.csv"))
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let expected =
        std::fs::read_to_string(format!("{FIXTURES}/worked_scenario/expected_balances.csv"))
            .expect("Failed to read expected file");
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn test_cli_missing_file_exits_with_error() {
    let output = split_ledger()
        .arg("missing-participants.csv")
        .arg(format!("{FIXTURES}/worked_scenario/expenses.csv"))
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: File not found: missing-participants.csv"));
}

#[test]
fn test_cli_reject_policy_exits_with_error() {
    let output = split_ledger()
        .arg("--unknown-participants")
        .arg("reject")
        .arg(format!("{FIXTURES}/removed_participant/participants.csv"))
        .arg(format!("{FIXTURES}/removed_participant/expenses.csv"))
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Expense 1 references unknown participant 3"));
}

#[test]
fn test_cli_logs_skipped_rows_to_stderr() {
    let output = split_ledger()
        .env("RUST_LOG", "warn")
        .arg(format!("{FIXTURES}/malformed_rows/participants.csv"))
        .arg(format!("{FIXTURES}/malformed_rows/expenses.csv"))
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipping row"));
    assert!(stderr.contains("skipping expense"));
}

#[test]
fn test_cli_balance_overflow_exits_with_error() {
    let output = split_ledger()
        .arg(format!("{FIXTURES}/balance_overflow/participants.csv"))
        .arg(format!("{FIXTURES}/balance_overflow/expenses.csv"))
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Error: Balance overflow while applying expense 4"));
}
