//! Rust Ledger Engine CLI
//!
//! Command-line interface replaying ledger requests from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.csv > accounts.csv
//! cargo run -- --strategy sync requests.csv > accounts.csv
//! cargo run -- --default-balance 250.00 requests.csv > accounts.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 requests.csv > accounts.csv
//! cargo run -- --outcomes outcomes.csv requests.csv > accounts.csv
//! ```
//!
//! The program reads requests from the input CSV file, applies them to a fresh
//! ledger using the selected processing strategy, and writes the final account
//! statement to stdout. Logs go to stderr, filtered by `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid default balance, file not found, file not writable, etc.)

use rust_ledger_engine::cli::{self, CliArgs};
use rust_ledger_engine::io::write_outcomes_csv;
use rust_ledger_engine::strategy;
use rust_ledger_engine::types::LedgerError;
use std::fs::File;
use std::io::BufWriter;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        error!(error = %e, "Processing failed");
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), LedgerError> {
    let default_balance = args.default_balance_minor_units()?;

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, default_balance, config)
    };

    info!(
        input = %args.input_file.display(),
        strategy = ?args.strategy,
        default_balance,
        "Replaying requests"
    );

    let mut output = std::io::stdout();
    let outcomes = strategy.process(&args.input_file, &mut output)?;

    if let Some(path) = &args.outcomes {
        let file = File::create(path).map_err(|e| LedgerError::open_failed(path, e))?;
        let mut writer = BufWriter::new(file);
        write_outcomes_csv(&outcomes, &mut writer)?;
    }

    Ok(())
}
