//! Report strategy module
//!
//! This module defines the Strategy pattern for the complete reporting pipeline:
//! loading the participants, expenses and settled-flag CSV files, rebuilding the
//! ledger, and writing a balances or transfers report. Implementations differ
//! only in how the files are read (sequentially, or concurrently on a tokio
//! runtime) and must produce byte-identical output for the same input.

use crate::cli::{ReportKind, StrategyType};
use crate::core::{Ledger, SettlementKey, SettlementTracker, UnknownParticipantPolicy};
use crate::io::csv_format::{write_balances_csv, write_transfers_csv};
use crate::types::{Expense, LedgerError, Participant};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncReportStrategy;
pub use sync::SyncReportStrategy;

/// Everything a strategy needs to produce one report
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Participants CSV (`id,name`)
    pub participants: PathBuf,
    /// Expenses CSV (`id,description,amount,payer,involved,timestamp[,repaid]`)
    pub expenses: PathBuf,
    /// Optional settled-flags CSV (`split,from,to,amount`)
    pub settled: Option<PathBuf>,
    /// Split whose settled flags annotate the transfers
    pub split: String,
    /// Which report to write
    pub report: ReportKind,
    /// How expenses naming participants missing from the roster are treated
    pub policy: UnknownParticipantPolicy,
}

/// Report strategy trait for complete reporting pipelines
pub trait ReportStrategy: Send + Sync {
    /// Load the request's files and write the requested report to output
    ///
    /// # Arguments
    ///
    /// * `request` - Input paths and report options
    /// * `output` - Mutable reference to a writer for the report CSV
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the report was written (possibly after skipping bad rows)
    /// * `Err(LedgerError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An input file cannot be opened (file not found, permission denied)
    /// - The reject policy is selected and an expense names an unknown participant
    /// - Output cannot be written
    ///
    /// Malformed rows and rows the ledger rejects are logged with `tracing` and
    /// skipped; they never abort the report.
    fn process(&self, request: &ReportRequest, output: &mut dyn Write) -> Result<(), LedgerError>;
}

/// Create a report strategy based on the specified strategy type
///
/// # Returns
///
/// A boxed trait object implementing the ReportStrategy trait
pub fn create_strategy(strategy_type: StrategyType) -> Box<dyn ReportStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncReportStrategy),
        StrategyType::Async => Box::new(AsyncReportStrategy),
    }
}

/// Rebuild a ledger from loaded rows
///
/// Participants go in first so expense loading sees the full roster. Rows the
/// ledger rejects (duplicate ids, invalid expenses) are logged and skipped.
pub(crate) fn build_ledger(participants: Vec<Participant>, expenses: Vec<Expense>) -> Ledger {
    let mut ledger = Ledger::new();

    for participant in participants {
        let id = participant.id;
        if let Err(e) = ledger.insert_participant(participant) {
            warn!(participant = id, "skipping participant: {}", e);
        }
    }

    for expense in expenses {
        let id = expense.id;
        if let Err(e) = ledger.load_expense(expense) {
            warn!(expense = id, "skipping expense: {}", e);
        }
    }

    info!(
        participants = ledger.roster().len(),
        expenses = ledger.expenses().len(),
        "loaded ledger"
    );
    ledger
}

/// Collect settled flags; a key listed twice is still just settled
pub(crate) fn build_tracker(keys: Vec<SettlementKey>) -> SettlementTracker {
    let tracker = SettlementTracker::new();
    for key in keys {
        tracker.set_settled(key, true);
    }
    tracker
}

/// Write the requested report for a loaded ledger
pub(crate) fn write_report(
    request: &ReportRequest,
    ledger: &Ledger,
    tracker: &SettlementTracker,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match request.report {
        ReportKind::Balances => {
            let balances = ledger.balances(request.policy)?;
            write_balances_csv(&balances, ledger.roster(), output)
        }
        ReportKind::Transfers => {
            let plan = ledger.settlement_plan(request.policy)?;
            info!(transfers = plan.len(), split = %request.split, "computed settlement plan");
            let annotated = tracker.annotate(&request.split, &plan);
            write_transfers_csv(&annotated, ledger.roster(), output)
        }
    }
}
