use crate::core::money;
use crate::strategy::BatchConfig;
use crate::types::LedgerError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay a log of transfer and delete requests against an in-memory ledger
#[derive(Parser, Debug)]
#[command(name = "ledger-engine")]
#[command(about = "Replay transfer and delete requests against an in-memory ledger", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing ledger requests
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent batches"
    )]
    pub strategy: StrategyType,

    /// Opening balance of accounts created on first reference
    #[arg(
        long = "default-balance",
        value_name = "AMOUNT",
        default_value = "100.00",
        help = "Opening balance for new accounts, as a decimal amount"
    )]
    pub default_balance: String,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of runtime worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads processing batches (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Optional file receiving one outcome row per processed request
    #[arg(
        long = "outcomes",
        value_name = "PATH",
        help = "Write per-request outcomes as CSV to this file"
    )]
    pub outcomes: Option<PathBuf>,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// [`BatchConfig::new`] with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// The configured default balance converted to minor units
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidArgument` if the value is not a decimal
    /// amount that fits the ledger's range.
    pub fn default_balance_minor_units(&self) -> Result<i64, LedgerError> {
        money::parse_minor_units(&self.default_balance).map_err(|_| {
            LedgerError::invalid_argument(&format!(
                "invalid default balance '{}'",
                self.default_balance
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program", "input.csv"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "input.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "input.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::batch_size(&["program", "--batch-size", "2000", "input.csv"], Some(2000), None)]
    #[case::max_concurrent(&["program", "--max-concurrent", "8", "input.csv"], None, Some(8))]
    #[case::no_options(&["program", "input.csv"], None, None)]
    #[case::all_options(
        &["program", "--strategy", "async", "--batch-size", "2000", "--max-concurrent", "8", "input.csv"],
        Some(2000),
        Some(8)
    )]
    fn test_config_options(
        #[case] args: &[&str],
        #[case] batch_size: Option<usize>,
        #[case] max_concurrent: Option<usize>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.batch_size, batch_size);
        assert_eq!(parsed.max_concurrent_batches, max_concurrent);
    }

    #[rstest]
    #[case::all_defaults(&["program", "input.csv"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "--batch-size", "2000", "input.csv"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "--max-concurrent", "8", "input.csv"], 1000, 8)]
    #[case::zero_batch_size(&["program", "--batch-size", "0", "input.csv"], 1000, num_cpus::get())]
    #[case::zero_max_concurrent(&["program", "--max-concurrent", "0", "input.csv"], 1000, num_cpus::get())]
    fn test_batch_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_batch_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[rstest]
    #[case::default_value(&["program", "input.csv"], 10000)]
    #[case::whole_number(&["program", "--default-balance", "250", "input.csv"], 25000)]
    #[case::rounded_half_up(&["program", "--default-balance", "0.005", "input.csv"], 1)]
    #[case::negative(&["program", "--default-balance=-5.50", "input.csv"], -550)]
    fn test_default_balance(#[case] args: &[&str], #[case] expected: i64) {
        let parsed = CliArgs::try_parse_from(args).unwrap();

        assert_eq!(parsed.default_balance_minor_units(), Ok(expected));
    }

    #[test]
    fn test_invalid_default_balance() {
        let parsed =
            CliArgs::try_parse_from(["program", "--default-balance", "plenty", "input.csv"])
                .unwrap();

        assert!(matches!(
            parsed.default_balance_minor_units(),
            Err(LedgerError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_outcomes_path() {
        let parsed =
            CliArgs::try_parse_from(["program", "--outcomes", "out.csv", "input.csv"]).unwrap();

        assert_eq!(parsed.outcomes, Some(PathBuf::from("out.csv")));
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
