//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete request processing
//! pipelines: reading the request log, applying it to a fresh ledger and
//! writing the final account statement. Strategies are selected at runtime.

use crate::cli::StrategyType;
use crate::types::{LedgerError, LedgerOutcome};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete request processing pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Process requests from `input_path` and write the account statement
    ///
    /// Each run starts from an empty ledger.
    ///
    /// # Returns
    ///
    /// The outcomes of all successfully handled requests, in input order.
    /// Records that could not be parsed or processed are logged and skipped;
    /// they do not make this method fail.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened
    /// - The async runtime cannot be started
    /// - The statement cannot be written to `output`
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<Vec<LedgerOutcome>, LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `default_balance` - Balance in minor units for newly created accounts
/// * `config` - Optional configuration for async batch processing (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    default_balance: i64,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(default_balance)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(default_balance, config))
        }
    }
}
