//! End-to-end integration tests
//!
//! These tests validate the complete reporting pipeline using predefined CSV
//! fixtures. Each fixture directory under tests/fixtures/ holds:
//! - participants.csv and expenses.csv (inputs)
//! - settled.csv (optional settled flags, looked up under split `trip`)
//! - expected_balances.csv and/or expected_transfers.csv
//!
//! Fixtures cover:
//! - The basic worked scenario
//! - Rounding of thirds
//! - Expenses naming participants no longer on the roster
//! - Settled flags matched by split, direction and rounded amount
//! - Malformed and rejected rows being skipped
//! - Duplicate ids in an involved list
//! - Already-settled groups and several creditors
//!
//! Each case runs twice: once with the sync strategy and once with the async one.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use split_ledger::cli::{ReportKind, StrategyType};
    use split_ledger::core::UnknownParticipantPolicy;
    use split_ledger::strategy::{create_strategy, ReportRequest};
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::NamedTempFile;

    /// Run a fixture report and compare it with the matching expected file
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected
    fn run_test_fixture(fixture_name: &str, report: ReportKind, strategy_type: StrategyType) {
        let fixture_dir = PathBuf::from(format!("tests/fixtures/{}", fixture_name));
        let expected_path = fixture_dir.join(match report {
            ReportKind::Balances => "expected_balances.csv",
            ReportKind::Transfers => "expected_transfers.csv",
        });

        assert!(
            expected_path.exists(),
            "Expected file not found: {}",
            expected_path.display()
        );

        let settled_path = fixture_dir.join("settled.csv");
        let request = ReportRequest {
            participants: fixture_dir.join("participants.csv"),
            expenses: fixture_dir.join("expenses.csv"),
            settled: settled_path.exists().then_some(settled_path),
            split: "trip".to_string(),
            report,
            policy: UnknownParticipantPolicy::Tolerate,
        };

        let strategy = create_strategy(strategy_type);
        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        strategy
            .process(&request, &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to process ledger: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
            panic!(
                "Failed to read expected file {}: {}",
                expected_path.display(),
                e
            )
        });

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (report: {:?}, strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, report, strategy_type, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures with both strategies
    #[rstest]
    #[case("worked_scenario", ReportKind::Balances)]
    #[case("worked_scenario", ReportKind::Transfers)]
    #[case("thirds_rounding", ReportKind::Balances)]
    #[case("thirds_rounding", ReportKind::Transfers)]
    #[case("removed_participant", ReportKind::Balances)]
    #[case("removed_participant", ReportKind::Transfers)]
    #[case("settled_flags", ReportKind::Transfers)]
    #[case("malformed_rows", ReportKind::Balances)]
    #[case("malformed_rows", ReportKind::Transfers)]
    #[case("duplicate_involved", ReportKind::Balances)]
    #[case("duplicate_involved", ReportKind::Transfers)]
    #[case("already_settled", ReportKind::Balances)]
    #[case("already_settled", ReportKind::Transfers)]
    #[case("multiple_creditors", ReportKind::Balances)]
    #[case("multiple_creditors", ReportKind::Transfers)]
    fn test_fixtures(
        #[case] fixture: &str,
        #[case] report: ReportKind,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        run_test_fixture(fixture, report, strategy);
    }

    /// Removed participants fail the run under the reject policy
    #[rstest]
    fn test_reject_policy_on_removed_participant(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let fixture_dir = Path::new("tests/fixtures/removed_participant");
        let request = ReportRequest {
            participants: fixture_dir.join("participants.csv"),
            expenses: fixture_dir.join("expenses.csv"),
            settled: None,
            split: "trip".to_string(),
            report: ReportKind::Balances,
            policy: UnknownParticipantPolicy::Reject,
        };
        let mut output = Vec::new();

        let error = create_strategy(strategy)
            .process(&request, &mut output)
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Expense 1 references unknown participant 3"
        );
    }
}
