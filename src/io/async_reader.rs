//! Asynchronous CSV reader with stream interface
//!
//! Reads ledger CSV rows from any `futures::io::AsyncRead` source.
//!
//! ```text
//! tokio::fs::File ──compat──► AsyncReader<R, T> ──► Vec<T::Output>
//!                                   ↓
//!                            csv_format module
//!                            (CsvRow::convert)
//! ```
//!
//! Rows that fail to parse or convert are logged with `tracing` and skipped,
//! so the async path sees the same rows as [`crate::io::SyncReader::read_all`].

use crate::io::csv_format::CsvRow;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use std::marker::PhantomData;
use tracing::warn;

/// Asynchronous CSV reader over rows of type `T`
pub struct AsyncReader<R: AsyncRead + Unpin, T: CsvRow> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    _row: PhantomData<T>,
}

impl<R, T> AsyncReader<R, T>
where
    R: AsyncRead + Unpin + Send,
    T: CsvRow + 'static,
{
    /// Create a new AsyncReader from an async reader
    ///
    /// Configured like the sync reader: fields are trimmed and rows may have a
    /// varying number of fields.
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            _row: PhantomData,
        }
    }

    /// Read every remaining row
    ///
    /// # Returns
    ///
    /// The successfully converted rows, in file order.
    pub async fn read_all(&mut self) -> Vec<T::Output> {
        let mut values = Vec::new();
        let mut rows = self.csv_reader.deserialize::<T>();
        // header is line 1
        let mut line = 1;

        while let Some(row) = rows.next().await {
            line += 1;
            match row {
                Ok(row) => match row.convert() {
                    Ok(value) => values.push(value),
                    Err(e) => warn!("skipping row: Line {}: {}", line, e),
                },
                Err(e) => warn!("skipping row: Line {}: CSV parse error: {}", line, e),
            }
        }

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_format::{ExpenseCsvRecord, ParticipantCsvRecord, SettledCsvRecord};
    use futures::io::Cursor;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_async_reader_reads_participants() {
        let csv_content = "id,name\n1,Ana\n2,Ben\n3,Cleo\n";
        let mut reader = AsyncReader::<_, ParticipantCsvRecord>::new(Cursor::new(csv_content));

        let participants = reader.read_all().await;

        assert_eq!(participants.len(), 3);
        assert_eq!(participants[2].id, 3);
        assert_eq!(participants[2].name, "Cleo");
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut reader = AsyncReader::<_, ParticipantCsvRecord>::new(Cursor::new("id,name\n"));

        assert!(reader.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_rows() {
        let csv_content = "id,description,amount,payer,involved,timestamp\n\
                           1,Dinner,100,1,1;2,2024-05-01\n\
                           2,Taxi,lots,1,1;2,2024-05-02\n\
                           x,Museum,30,1,1;2,2024-05-03\n\
                           4,Fuel,  25.50 ,2,  1;2 ,2024-05-04\n";
        let mut reader = AsyncReader::<_, ExpenseCsvRecord>::new(Cursor::new(csv_content));

        let expenses = reader.read_all().await;

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].id, 1);
        assert_eq!(expenses[1].id, 4);
        assert_eq!(expenses[1].amount, Decimal::new(2550, 2));
        assert_eq!(expenses[1].involved, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_async_reader_reads_settled_flags() {
        let csv_content = "split,from,to,amount\ntrip,3,1,45.004\n";
        let mut reader = AsyncReader::<_, SettledCsvRecord>::new(Cursor::new(csv_content));

        let keys = reader.read_all().await;

        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].split, "trip");
        assert_eq!(keys[0].amount_cents, 4500);
    }
}
