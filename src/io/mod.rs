//! I/O module
//!
//! Handles ledger CSV parsing and report output.
//!
//! # Components
//!
//! - `csv_format` - CSV row types, conversion and report serialization
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader over `futures` readers

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    format_money, write_balances_csv, write_transfers_csv, CsvRow, ExpenseCsvRecord,
    ParticipantCsvRecord, SettledCsvRecord,
};
pub use sync_reader::SyncReader;
