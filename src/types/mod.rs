//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: The live account cell and its snapshot
//! - `request`: Ledger requests read from input
//! - `outcome`: Transfer and delete outcomes
//! - `error`: Error types for the ledger engine

pub mod account;
pub mod error;
pub mod outcome;
pub mod request;

pub use account::{Account, AccountNumber, AccountSnapshot};
pub use error::LedgerError;
pub use outcome::{LedgerOutcome, TransferOutcome, TransferRejection};
pub use request::{LedgerRequest, OperationType};
