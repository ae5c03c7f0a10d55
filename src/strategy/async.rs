//! Asynchronous report strategy
//!
//! Reads the input files concurrently on a tokio runtime, then hands the loaded
//! rows to the same ledger and report code as the synchronous strategy.
//!
//! # Architecture
//!
//! ```text
//! AsyncReportStrategy
//!     ├── tokio::fs::File ──compat──► AsyncReader<_, ParticipantCsvRecord> ─┐
//!     ├── tokio::fs::File ──compat──► AsyncReader<_, ExpenseCsvRecord>     ─┼─ try_join!
//!     ├── tokio::fs::File ──compat──► AsyncReader<_, SettledCsvRecord>     ─┘
//!     └── Ledger + SettlementTracker ──► report CSV
//! ```
//!
//! Each file is read in file order, and the ledger is rebuilt only after every
//! read has finished, so the output never depends on which read completes first.

use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::{CsvRow, ExpenseCsvRecord, ParticipantCsvRecord, SettledCsvRecord};
use crate::strategy::{build_ledger, build_tracker, write_report, ReportRequest, ReportStrategy};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;

/// Asynchronous report strategy
///
/// Owns no state; a current-thread tokio runtime is created per call to
/// [`ReportStrategy::process`].
#[derive(Debug, Clone, Copy)]
pub struct AsyncReportStrategy;

/// Open `path` with tokio and read all rows of type `T`
async fn read_file<T>(path: &Path) -> Result<Vec<T::Output>, LedgerError>
where
    T: CsvRow + 'static,
{
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| LedgerError::open_failed(path, e))?;

    let mut reader = AsyncReader::<_, T>::new(file.compat());
    Ok(reader.read_all().await)
}

impl ReportStrategy for AsyncReportStrategy {
    /// Read all input files concurrently, then write the report
    ///
    /// # Errors
    ///
    /// Besides the errors of the trait method, fails if the tokio runtime cannot
    /// be created.
    fn process(&self, request: &ReportRequest, output: &mut dyn Write) -> Result<(), LedgerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let (participants, expenses, settled) = runtime.block_on(async {
            let settled = async {
                match &request.settled {
                    Some(path) => read_file::<SettledCsvRecord>(path).await,
                    None => Ok(Vec::new()),
                }
            };

            tokio::try_join!(
                read_file::<ParticipantCsvRecord>(&request.participants),
                read_file::<ExpenseCsvRecord>(&request.expenses),
                settled,
            )
        })?;

        let ledger = build_ledger(participants, expenses);
        let tracker = build_tracker(settled);

        write_report(request, &ledger, &tracker, output)
    }
}
