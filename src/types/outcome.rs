//! Outcome types for the Rust Ledger Engine
//!
//! Transfers never fail with an error for business reasons. Instead they
//! report a [`TransferOutcome`] whose `rejection` explains what went wrong,
//! so callers can show it to end users.

use super::account::AccountNumber;
use rust_decimal::Decimal;
use std::fmt;

/// Why a transfer was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferRejection {
    /// Amount missing, unparsable, or not positive
    InvalidAmount,

    /// Source balance does not cover the amount
    InsufficientFunds,
}

impl TransferRejection {
    /// User-facing message
    pub fn message(&self) -> &'static str {
        match self {
            TransferRejection::InvalidAmount => "Invalid amount.",
            TransferRejection::InsufficientFunds => "Insufficient funds.",
        }
    }
}

impl fmt::Display for TransferRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a transfer, seen from the source account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// The source account number
    pub account_number: AccountNumber,

    /// Source balance after the attempt, with two decimal places
    pub balance: Decimal,

    /// `None` on success
    pub rejection: Option<TransferRejection>,
}

impl TransferOutcome {
    /// Whether the money moved
    pub fn success(&self) -> bool {
        self.rejection.is_none()
    }

    /// Failure message; present if and only if the transfer failed
    pub fn message(&self) -> Option<&'static str> {
        self.rejection.as_ref().map(TransferRejection::message)
    }
}

/// Result of any ledger request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerOutcome {
    /// A transfer was attempted
    Transfer(TransferOutcome),

    /// A delete was attempted; `removed` is false if the account was unknown
    Delete {
        /// The account number that was targeted
        account_number: AccountNumber,
        /// Whether an account was actually removed
        removed: bool,
    },

    /// A single account was looked up
    Account {
        /// The account number that was requested
        account_number: AccountNumber,
        /// Balance with two decimal places; `None` if the account is unknown
        balance: Option<Decimal>,
    },
}

impl LedgerOutcome {
    /// Message shown for a delete or lookup of an unknown account
    pub const ACCOUNT_NOT_FOUND: &'static str = "Account not found.";

    /// Account the outcome refers to
    pub fn account_number(&self) -> &str {
        match self {
            LedgerOutcome::Transfer(outcome) => &outcome.account_number,
            LedgerOutcome::Delete { account_number, .. } => account_number,
            LedgerOutcome::Account { account_number, .. } => account_number,
        }
    }

    /// Whether the request had its intended effect
    pub fn success(&self) -> bool {
        match self {
            LedgerOutcome::Transfer(outcome) => outcome.success(),
            LedgerOutcome::Delete { removed, .. } => *removed,
            LedgerOutcome::Account { balance, .. } => balance.is_some(),
        }
    }

    /// Failure message, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            LedgerOutcome::Transfer(outcome) => outcome.message(),
            LedgerOutcome::Delete { removed: true, .. } => None,
            LedgerOutcome::Delete { removed: false, .. } => Some(Self::ACCOUNT_NOT_FOUND),
            LedgerOutcome::Account { balance: Some(_), .. } => None,
            LedgerOutcome::Account { balance: None, .. } => Some(Self::ACCOUNT_NOT_FOUND),
        }
    }
}
