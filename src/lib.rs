//! Rust Ledger Engine Library
//! # Overview
//!
//! This library provides an in-memory ledger of accounts holding balances in
//! minor units, with lock-free transfers between them and a CSV replay
//! pipeline implementing both a sync and an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, LedgerRequest, LedgerOutcome, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::money`] - Conversion between decimal amounts and minor units
//!   - [`core::registry`] - Concurrent account table with lazy creation
//!   - [`core::transfer`] - Conditional debit and independent credit
//!   - [`core::engine`] - Request dispatch
//! - [`io`] - CSV reading and statement writing
//! - [`strategy`] - Pluggable processing pipelines
//!
//! # Operations
//!
//! - **Transfer**: Move an amount from a source to a target account. Both
//!   accounts are created with the default balance if they do not exist yet.
//!   Non-positive amounts and uncovered debits are rejected without any
//!   balance change.
//! - **Delete**: Remove an account regardless of its balance.
//! - **Get**: Read one account's balance without creating it.
//!
//! # Consistency
//!
//! Every balance is a single atomic integer. A debit is a compare-and-swap
//! that only succeeds when the balance covers the amount; the matching credit
//! is applied afterwards. Money is conserved once all transfers have
//! finished, but a reader may briefly observe a debit without its credit.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{AccountRegistry, LedgerEngine, TransferEngine};
pub use io::{write_accounts_csv, write_outcomes_csv};
pub use types::{
    Account, AccountNumber, AccountSnapshot, LedgerError, LedgerOutcome, LedgerRequest,
    OperationType, TransferOutcome, TransferRejection,
};
