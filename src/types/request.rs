//! Request types for the Rust Ledger Engine
//!
//! A [`LedgerRequest`] is one line of the replayed request log: either a
//! transfer between two accounts, the removal of an account, or a lookup of
//! a single account.

use super::account::AccountNumber;

/// Operations the ledger accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Move money from `account` to `target`
    ///
    /// Both accounts are created with the default balance if they do not
    /// exist yet.
    Transfer,

    /// Remove `account` from the registry, unconditionally
    Delete,

    /// Read `account` without creating it
    Get,
}

impl OperationType {
    /// Lowercase name as it appears in CSV files
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Transfer => "transfer",
            OperationType::Delete => "delete",
            OperationType::Get => "get",
        }
    }
}

/// A single request against the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRequest {
    /// What to do
    pub op: OperationType,

    /// Primary account: the transfer source, or the account to delete or read
    pub account: AccountNumber,

    /// Transfer target; always `Some` for transfers, `None` otherwise
    pub target: Option<AccountNumber>,

    /// Amount exactly as received
    ///
    /// Kept unparsed: an absent or malformed amount is a business outcome
    /// of the transfer, decided by the transfer engine.
    pub amount: Option<String>,
}

impl LedgerRequest {
    /// Build a transfer request
    pub fn transfer(source: &str, target: &str, amount: &str) -> Self {
        LedgerRequest {
            op: OperationType::Transfer,
            account: source.to_string(),
            target: Some(target.to_string()),
            amount: Some(amount.to_string()),
        }
    }

    /// Build a delete request
    pub fn delete(number: &str) -> Self {
        LedgerRequest {
            op: OperationType::Delete,
            account: number.to_string(),
            target: None,
            amount: None,
        }
    }

    /// Build a single-account lookup request
    pub fn get(number: &str) -> Self {
        LedgerRequest {
            op: OperationType::Get,
            account: number.to_string(),
            target: None,
            amount: None,
        }
    }
}
