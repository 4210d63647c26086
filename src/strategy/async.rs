//! Asynchronous batch processing strategy
//!
//! Requests are read in batches and each batch is executed concurrently on a
//! tokio multi-threaded runtime, partitioned by the accounts it touches.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (connected-account partitioning + tasks)
//!     └── LedgerEngine
//!         ├── AccountRegistry (DashMap of Arc<Account>)
//!         └── TransferEngine (atomic debit/credit)
//! ```
//!
//! Batches run one after another, so a request never overtakes one from an
//! earlier batch. Within a batch, requests linked through a shared account
//! keep their order; unrelated groups run concurrently. The final statement
//! matches the sync strategy for any input.

use crate::core::{BatchProcessor, LedgerEngine};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_accounts_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::{LedgerError, LedgerOutcome};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for batch processing
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of requests per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "Invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "Invalid worker count, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Balance in minor units for newly created accounts
    default_balance: i64,
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(default_balance: i64, config: BatchConfig) -> Self {
        Self {
            default_balance,
            config,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<Vec<LedgerOutcome>, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| LedgerError::Runtime {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let engine = LedgerEngine::new(self.default_balance);
            let processor = BatchProcessor::new(engine.clone());

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| LedgerError::open_failed(input_path, e))?;

            // csv-async reads through the futures-io traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);
            let mut outcomes = Vec::new();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                debug!(size = batch.len(), "Processing batch");
                for processed in processor.process_batch(batch).await {
                    match processed.result {
                        Ok(outcome) => outcomes.push(outcome),
                        Err(e) => warn!(
                            error = %e,
                            account = %processed.request.account,
                            "Request failed"
                        ),
                    }
                }
            }

            write_accounts_csv(&engine.get_accounts(), output)?;

            Ok(outcomes)
        })
    }
}
