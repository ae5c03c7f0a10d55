//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over rows of one ledger CSV file. The row type
//! (`ParticipantCsvRecord`, `ExpenseCsvRecord`, `SettledCsvRecord`) decides what
//! each row converts into.
//!
//! ```no_run
//! use split_ledger::io::csv_format::ParticipantCsvRecord;
//! use split_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::<ParticipantCsvRecord>::new(Path::new("participants.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(participant) => println!("{}: {}", participant.id, participant.name),
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Row errors are yielded as `Err` items carrying the line number
//! - [`SyncReader::read_all`] logs row errors with `tracing` and skips them

use crate::io::csv_format::CsvRow;
use crate::types::LedgerError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::marker::PhantomData;
use std::path::Path;
use tracing::warn;

/// Synchronous CSV reader over rows of type `T`
#[derive(Debug)]
pub struct SyncReader<T: CsvRow> {
    reader: csv::Reader<File>,
    line_num: usize,
    _row: PhantomData<T>,
}

impl<T: CsvRow> SyncReader<T> {
    /// Open a CSV file for streaming iteration
    ///
    /// The reader trims whitespace around every field and accepts rows with a
    /// varying number of fields (the expenses `repaid` column is optional).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::FileNotFound`] if the file does not exist and
    /// [`LedgerError::IoError`] if it cannot be opened for another reason.
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| LedgerError::open_failed(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
            _row: PhantomData,
        })
    }

    /// Drain the reader, keeping converted rows and logging the rest
    pub fn read_all(self) -> Vec<T::Output> {
        self.filter_map(|result| match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("skipping row: {}", e);
                None
            }
        })
        .collect()
    }
}

impl<T: CsvRow> Iterator for SyncReader<T> {
    type Item = Result<T::Output, String>;

    /// Read, deserialize and convert the next row
    ///
    /// Line numbers in errors count the header as line 1.
    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = self.reader.deserialize::<T>();
        let row = rows.next()?;
        self.line_num += 1;
        let line = self.line_num + 1;

        Some(match row {
            Ok(row) => row.convert().map_err(|e| format!("Line {}: {}", line, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}
