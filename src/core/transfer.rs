//! Money transfer between two accounts
//!
//! # Algorithm
//!
//! 1. Resolve source and target through [`AccountRegistry::get_or_create`].
//!    Unknown accounts are created with the default balance; transfers never
//!    report "account not found".
//! 2. Reject amounts that are missing, unparsable, or not positive, without
//!    touching either balance.
//! 3. Debit the source with a single conditional compare-and-swap loop:
//!    subtract only if the balance covers the amount. Concurrent debits of
//!    the same source serialize on the atomic, so no transfer can overdraw.
//!    Success is read from the loop's own result, which says whether the
//!    final compare-and-swap changed the balance. This is the same signal as
//!    comparing the balance before and after, without a second read that a
//!    concurrent credit could disturb.
//! 4. On success, credit the target with a separate atomic add.
//!
//! # Consistency
//!
//! Steps 3 and 4 are two independent atomic operations, not one
//! cross-account transaction. Between them the debited amount is briefly
//! missing from the sum of all balances, and a concurrent
//! [`AccountRegistry::get_all`] may observe that dip. Once the transfer
//! returns, the total is conserved. Callers that need conservation at every
//! instant must add their own synchronization on top.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::money;
use super::AccountRegistry;
use crate::types::{Account, LedgerError, TransferOutcome, TransferRejection};

/// Transfer executor bound to one registry
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct TransferEngine {
    registry: Arc<AccountRegistry>,
}

impl TransferEngine {
    /// Create a transfer engine working on `registry`
    pub fn new(registry: Arc<AccountRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this engine resolves accounts through
    pub fn registry(&self) -> &Arc<AccountRegistry> {
        &self.registry
    }

    /// Transfer a decimal amount from `source` to `target`
    ///
    /// # Returns
    ///
    /// A [`TransferOutcome`] for the source account. Invalid amounts and
    /// insufficient funds are reported inside the outcome, not as errors.
    ///
    /// # Errors
    ///
    /// * `LedgerError::InvalidArgument` - an account number is empty
    /// * `LedgerError::ArithmeticOverflow` - the credit would overflow the
    ///   target balance; the debit has been rolled back
    pub fn transfer(
        &self,
        source: &str,
        target: &str,
        amount: Decimal,
    ) -> Result<TransferOutcome, LedgerError> {
        let (source_account, target_account) = self.resolve(source, target)?;
        let amount = money::to_minor_units(amount).ok();
        self.execute(&source_account, &target_account, amount)
    }

    /// Transfer an amount given as raw text
    ///
    /// Same as [`TransferEngine::transfer`], except that a missing or
    /// unparsable amount yields an `InvalidAmount` outcome.
    pub fn transfer_raw(
        &self,
        source: &str,
        target: &str,
        amount: Option<&str>,
    ) -> Result<TransferOutcome, LedgerError> {
        let (source_account, target_account) = self.resolve(source, target)?;
        let amount = amount.and_then(|raw| money::parse_minor_units(raw).ok());
        self.execute(&source_account, &target_account, amount)
    }

    fn resolve(
        &self,
        source: &str,
        target: &str,
    ) -> Result<(Arc<Account>, Arc<Account>), LedgerError> {
        let source_account = self.registry.get_or_create(source)?;
        let target_account = self.registry.get_or_create(target)?;
        Ok((source_account, target_account))
    }

    fn execute(
        &self,
        source: &Account,
        target: &Account,
        amount: Option<i64>,
    ) -> Result<TransferOutcome, LedgerError> {
        let amount = match amount {
            Some(amount) if amount > 0 => amount,
            _ => {
                return Ok(rejected(
                    source,
                    source.balance(),
                    TransferRejection::InvalidAmount,
                ))
            }
        };

        let source_balance = match source.debit_if_covered(amount) {
            Ok(updated) => updated,
            Err(unchanged) => {
                debug!(
                    account = source.number(),
                    target = target.number(),
                    amount,
                    balance = unchanged,
                    "Transfer rejected for insufficient funds"
                );
                return Ok(rejected(
                    source,
                    unchanged,
                    TransferRejection::InsufficientFunds,
                ));
            }
        };

        if target.credit(amount).is_none() {
            // Roll the debit back before reporting the overflow
            if source.credit(amount).is_none() {
                return Err(LedgerError::arithmetic_overflow(
                    "rollback",
                    source.number(),
                ));
            }
            return Err(LedgerError::arithmetic_overflow("credit", target.number()));
        }

        debug!(
            account = source.number(),
            target = target.number(),
            amount,
            balance = source_balance,
            "Transfer completed"
        );

        Ok(TransferOutcome {
            account_number: source.number().to_string(),
            balance: money::to_decimal(source_balance),
            rejection: None,
        })
    }
}

fn rejected(source: &Account, balance: i64, rejection: TransferRejection) -> TransferOutcome {
    TransferOutcome {
        account_number: source.number().to_string(),
        balance: money::to_decimal(balance),
        rejection: Some(rejection),
    }
}
