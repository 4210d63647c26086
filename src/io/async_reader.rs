//! Asynchronous CSV reader with batch interface
//!
//! Reads ledger requests from any `futures::io::AsyncRead` source in batches,
//! using csv-async for streaming parsing. Invalid rows are logged and skipped.

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::LedgerRequest;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read up to `batch_size` requests
    ///
    /// Rows that fail to parse or convert are logged and skipped; they do not
    /// count towards the batch size.
    ///
    /// # Returns
    ///
    /// The converted requests, or an empty vector once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<LedgerRequest> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(request) => batch.push(request),
                    Err(e) => warn!(error = %e, "Skipping invalid record"),
                },
                Some(Err(e)) => warn!(error = %e, "Skipping malformed CSV row"),
                None => break,
            }
        }

        batch
    }
}
