//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger requests from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<LedgerRequest, LedgerError>` for each CSV row:
//!
//! ```no_run
//! use rust_ledger_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("requests.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(request) => println!("Processing request: {:?}", request),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants carrying the line
//!   number, and iteration continues with the next row

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LedgerError, LedgerRequest};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one record at a time, so memory use does not grow with file size.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Open a CSV request file
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (deletes may omit target and amount)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// * `LedgerError::FileNotFound` - the file does not exist
    /// * `LedgerError::IoError` - the file could not be opened otherwise
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| LedgerError::open_failed(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerRequest, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;
        self.line_num += 1;

        Some(match next {
            Ok(csv_record) => convert_csv_record(csv_record).map_err(|e| LedgerError::ParseError {
                line: Some(self.line_num),
                message: e.to_string(),
            }),
            Err(e) => Err(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));

        assert_eq!(
            result.unwrap_err(),
            LedgerError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_sync_reader_iterates_transfer() {
        let file = create_temp_csv("type,account,target,amount\ntransfer,111,222,15.25\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records, vec![Ok(LedgerRequest::transfer("111", "222", "15.25"))]);
    }

    #[test]
    fn test_sync_reader_iterates_mixed_operations() {
        let file = create_temp_csv(
            "type,account,target,amount\n\
             transfer,A,B,40.35\n\
             delete,B,,\n\
             DELETE,C,,\n",
        );

        let records: Vec<LedgerRequest> = SyncReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].op, OperationType::Transfer);
        assert_eq!(records[1], LedgerRequest::delete("B"));
        assert_eq!(records[2], LedgerRequest::delete("C"));
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let file = create_temp_csv(
            "type,account,target,amount\n\
             transfer,A,B,1.00\n\
             refund,A,B,1.00\n\
             transfer,C,D,1.00\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[2].is_ok());
        let error = records[1].as_ref().unwrap_err();
        assert!(matches!(error, LedgerError::ParseError { line: Some(3), .. }));
        assert!(error.to_string().contains("Invalid operation type"));
    }

    #[test]
    fn test_sync_reader_keeps_unparsable_amount() {
        let file = create_temp_csv("type,account,target,amount\ntransfer,A,B,invalid\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records[0].as_ref().unwrap().amount.as_deref(), Some("invalid"));
    }

    #[test]
    fn test_sync_reader_handles_whitespace() {
        let file = create_temp_csv("type,account,target,amount\n  transfer  ,  A  ,  B  ,  5.00  \n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records, vec![Ok(LedgerRequest::transfer("A", "B", "5.00"))]);
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("type,account,target,amount\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert!(records.is_empty());
    }
}
