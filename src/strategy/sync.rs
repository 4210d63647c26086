//! Synchronous processing strategy
//!
//! Single-threaded pipeline: requests are applied strictly in file order,
//! which makes the result fully deterministic.
//!
//! The strategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Request handling to `LedgerEngine`
//! - CSV output to `csv_format::write_accounts_csv`

use crate::core::LedgerEngine;
use crate::io::csv_format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{LedgerError, LedgerOutcome};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_ledger_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(10000);
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("requests.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy {
    default_balance: i64,
}

impl SyncProcessingStrategy {
    /// Create a strategy whose ledgers start accounts at `default_balance` minor units
    pub fn new(default_balance: i64) -> Self {
        Self { default_balance }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<Vec<LedgerOutcome>, LedgerError> {
        let engine = LedgerEngine::new(self.default_balance);
        let reader = SyncReader::new(input_path)?;
        let mut outcomes = Vec::new();

        for result in reader {
            let request = match result {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "Skipping invalid record");
                    continue;
                }
            };

            match engine.process(&request) {
                Ok(outcome) => {
                    debug!(
                        account = outcome.account_number(),
                        success = outcome.success(),
                        "Request processed"
                    );
                    outcomes.push(outcome);
                }
                Err(e) => warn!(error = %e, account = %request.account, "Request failed"),
            }
        }

        write_accounts_csv(&engine.get_accounts(), output)?;

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DEFAULT_BALANCE: i64 = 10000;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(content: &str) -> (Vec<LedgerOutcome>, String) {
        let file = create_temp_csv(content);
        let strategy = SyncProcessingStrategy::new(DEFAULT_BALANCE);
        let mut output = Vec::new();

        let outcomes = strategy.process(file.path(), &mut output).unwrap();
        (outcomes, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_sync_strategy_processes_transfer() {
        let (outcomes, output) = run("type,account,target,amount\ntransfer,A,B,40.35\n");

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].success());
        assert_eq!(output, "account,balance\nA,59.65\nB,140.35\n");
    }

    #[test]
    fn test_sync_strategy_applies_requests_in_order() {
        let (outcomes, output) = run(
            "type,account,target,amount\n\
             transfer,A,B,40.35\n\
             transfer,A,B,60.00\n\
             delete,B,,\n\
             delete,B,,\n",
        );

        let successes: Vec<bool> = outcomes.iter().map(|o| o.success()).collect();
        assert_eq!(successes, vec![true, false, true, false]);
        assert_eq!(outcomes[1].message(), Some("Insufficient funds."));
        assert_eq!(output, "account,balance\nA,59.65\n");
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::new(DEFAULT_BALANCE);
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);

        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_strategy_continues_on_invalid_record() {
        let (outcomes, output) = run(
            "type,account,target,amount\n\
             transfer,A,B,1.00\n\
             refund,C,D,1.00\n\
             transfer,E,F,1.00\n",
        );

        assert_eq!(outcomes.len(), 2);
        assert!(output.contains("E,99.00"));
        assert!(!output.contains("C,"));
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
