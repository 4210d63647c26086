//! CSV format handling for ledger requests and statements
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain requests
//! - Account statement and outcome serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::core::money;
use crate::types::{AccountSnapshot, LedgerError, LedgerOutcome, LedgerRequest, OperationType};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, account, target, amount.
/// Target and amount are optional because deletes and lookups use neither.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub op: String,
    pub account: String,
    pub target: Option<String>,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to a LedgerRequest
///
/// This function:
/// - Parses the operation type (case-insensitive)
/// - Rejects empty account numbers
/// - Requires a target for transfers
/// - Leaves the amount unparsed; the transfer engine judges it
///
/// # Errors
///
/// * `LedgerError::InvalidOperation` - unknown operation type
/// * `LedgerError::InvalidArgument` - empty account number
/// * `LedgerError::MissingField` - transfer without target
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<LedgerRequest, LedgerError> {
    let op = match csv_record.op.trim().to_lowercase().as_str() {
        "transfer" => OperationType::Transfer,
        "delete" => OperationType::Delete,
        "get" => OperationType::Get,
        _ => return Err(LedgerError::invalid_operation(&csv_record.op)),
    };

    let account = csv_record.account.trim().to_string();
    if account.is_empty() {
        return Err(LedgerError::invalid_argument(
            "account number must not be empty",
        ));
    }

    match op {
        OperationType::Transfer => {
            let target = non_empty(csv_record.target).ok_or_else(|| {
                LedgerError::missing_field(op.as_str(), &account, "target")
            })?;
            Ok(LedgerRequest {
                op,
                account,
                target: Some(target),
                amount: non_empty(csv_record.amount),
            })
        }
        // Deletes and lookups ignore any target or amount present in the row
        OperationType::Delete | OperationType::Get => Ok(LedgerRequest {
            op,
            account,
            target: None,
            amount: None,
        }),
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Write the account statement in CSV format
///
/// Columns: account, balance. Accounts are sorted by number for deterministic
/// output and balances always carry two decimal places.
pub fn write_accounts_csv(
    accounts: &[AccountSnapshot],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["account", "balance"])?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by(|a, b| a.number.cmp(&b.number));

    for account in sorted_accounts {
        let balance = money::to_decimal(account.balance).to_string();
        writer.write_record([account.number.as_str(), balance.as_str()])?;
    }

    writer.flush()?;

    Ok(())
}

/// Write request outcomes in CSV format
///
/// Columns: type, account, balance, success, message. Rows keep the order of
/// `outcomes`. Delete rows and lookups of unknown accounts have no balance;
/// successful rows have no message.
pub fn write_outcomes_csv(
    outcomes: &[LedgerOutcome],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["type", "account", "balance", "success", "message"])?;

    for outcome in outcomes {
        let (op, balance) = match outcome {
            LedgerOutcome::Transfer(transfer) => {
                (OperationType::Transfer, transfer.balance.to_string())
            }
            LedgerOutcome::Delete { .. } => (OperationType::Delete, String::new()),
            LedgerOutcome::Account { balance, .. } => (
                OperationType::Get,
                balance.map(|b| b.to_string()).unwrap_or_default(),
            ),
        };
        let success = outcome.success().to_string();
        writer.write_record([
            op.as_str(),
            outcome.account_number(),
            balance.as_str(),
            success.as_str(),
            outcome.message().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
