//! Synchronous report strategy
//!
//! Reads the participants, expenses and (optional) settled-flags files one after
//! another with [`SyncReader`], then rebuilds the ledger and writes the report.
//!
//! # Design
//!
//! The SyncReportStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Ledger rules to `Ledger` (roster, expenses, balances, simplification)
//! - CSV output to `csv_format` (format handling)

use crate::io::csv_format::{ExpenseCsvRecord, ParticipantCsvRecord, SettledCsvRecord};
use crate::io::sync_reader::SyncReader;
use crate::strategy::{build_ledger, build_tracker, write_report, ReportRequest, ReportStrategy};
use crate::types::LedgerError;
use std::io::Write;

/// Synchronous report strategy
///
/// # Examples
///
/// ```no_run
/// use split_ledger::cli::ReportKind;
/// use split_ledger::core::UnknownParticipantPolicy;
/// use split_ledger::strategy::{ReportRequest, ReportStrategy, SyncReportStrategy};
/// use std::io;
///
/// let request = ReportRequest {
///     participants: "participants.csv".into(),
///     expenses: "expenses.csv".into(),
///     settled: None,
///     split: "default".to_string(),
///     report: ReportKind::Transfers,
///     policy: UnknownParticipantPolicy::Tolerate,
/// };
///
/// SyncReportStrategy
///     .process(&request, &mut io::stdout())
///     .expect("Report failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncReportStrategy;

impl ReportStrategy for SyncReportStrategy {
    /// Load every input file in turn, then write the report
    ///
    /// All files are opened before any is parsed, so a missing settled-flags
    /// file fails the run as early as a missing participants file.
    fn process(&self, request: &ReportRequest, output: &mut dyn Write) -> Result<(), LedgerError> {
        let participants = SyncReader::<ParticipantCsvRecord>::new(&request.participants)?;
        let expenses = SyncReader::<ExpenseCsvRecord>::new(&request.expenses)?;
        let settled = request
            .settled
            .as_deref()
            .map(SyncReader::<SettledCsvRecord>::new)
            .transpose()?;

        let ledger = build_ledger(participants.read_all(), expenses.read_all());
        let tracker = build_tracker(settled.map(SyncReader::read_all).unwrap_or_default());

        write_report(request, &ledger, &tracker, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReportKind;
    use crate::strategy::test_support::*;
    use std::path::PathBuf;

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let participants = create_temp_csv(PARTICIPANTS);
        let expenses = create_temp_csv(EXPENSES);
        let mut request = request(&participants, &expenses, None, ReportKind::Transfers);
        request.settled = Some(PathBuf::from("nonexistent.csv"));
        let mut output = Vec::new();

        let result = SyncReportStrategy.process(&request, &mut output);

        assert_eq!(
            result.unwrap_err(),
            LedgerError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
        assert!(output.is_empty());
    }

    #[test]
    fn test_sync_strategy_continues_on_malformed_rows() {
        let participants = create_temp_csv("id,name\n1,A\nnot-a-number,B\n2,C\n");
        let expenses = create_temp_csv(
            "id,description,amount,payer,involved,timestamp\n\
             1,Lunch,30,1,1;2,2024-05-01\n\
             2,Broken,-5,1,1;2,2024-05-02\n\
             3,Snacks,abc,2,1;2,2024-05-03\n",
        );
        let request = request(&participants, &expenses, None, ReportKind::Balances);
        let mut output = Vec::new();

        SyncReportStrategy.process(&request, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "participant,name,balance,on_roster\n\
             1,A,15.00,true\n\
             2,C,-15.00,true\n"
        );
    }

    #[test]
    fn test_sync_strategy_empty_ledger_has_no_transfers() {
        let participants = create_temp_csv("id,name\n");
        let expenses = create_temp_csv("id,description,amount,payer,involved,timestamp\n");
        let request = request(&participants, &expenses, None, ReportKind::Transfers);
        let mut output = Vec::new();

        SyncReportStrategy.process(&request, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "from,from_name,to,to_name,amount,settled\n"
        );
    }
}
