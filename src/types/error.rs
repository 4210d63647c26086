//! Error types for the Rust Ledger Engine
//!
//! This module defines the hard failures that can occur while running the ledger.
//! Business-level rejections of a transfer (bad amount, insufficient funds) are
//! NOT errors; they travel inside [`TransferOutcome`](super::TransferOutcome).
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, unknown operations, missing fields
//! - **Contract Errors**: Empty account numbers, unusable amounts
//! - **Arithmetic Errors**: Balance overflow on credit

use thiserror::Error;

/// Main error type for the ledger engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Unknown operation type in a request record
    #[error("Invalid operation type '{op}'")]
    InvalidOperation {
        /// The unrecognised operation string
        op: String,
    },

    /// A field required by the operation is missing
    #[error("{op} request for account '{account}' requires a {field}")]
    MissingField {
        /// Operation that needs the field
        op: String,
        /// Account the request refers to
        account: String,
        /// Name of the missing field
        field: String,
    },

    /// Caller passed an unusable account number
    ///
    /// Signals a programming-contract violation; it is never recovered
    /// inside the core.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: String,
    },

    /// Amount could not be converted into minor units
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The offending amount, as received
        amount: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected and any partial effect is rolled back.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account whose balance would overflow
        account: String,
    },

    /// Async runtime could not be started
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the runtime failure
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(reason: &str) -> Self {
        LedgerError::InvalidArgument {
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InvalidOperation error
    pub fn invalid_operation(op: &str) -> Self {
        LedgerError::InvalidOperation { op: op.to_string() }
    }

    /// Create a MissingField error
    pub fn missing_field(op: &str, account: &str, field: &str) -> Self {
        LedgerError::MissingField {
            op: op.to_string(),
            account: account.to_string(),
            field: field.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a FileNotFound or IoError depending on the I/O error kind
    pub fn open_failed(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            LedgerError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            }
        }
    }
}
