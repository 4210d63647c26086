//! Request dispatch
//!
//! This module provides the `LedgerEngine` struct, which plays the part of the
//! request handler sitting in front of the core: it takes a [`LedgerRequest`],
//! routes it to the [`TransferEngine`] or the [`AccountRegistry`], and turns the
//! result into a [`LedgerOutcome`]. Lookups never create accounts.
//!
//! # Architecture
//!
//! ```text
//! LedgerEngine
//!     ├── Arc<AccountRegistry>  (account table, get-or-create, get, delete)
//!     └── TransferEngine        (conditional debit + independent credit)
//! ```
//!
//! # Thread Safety
//!
//! The engine is cloneable and all clones share the same registry, so it can
//! be handed to as many threads or tasks as needed.

use std::sync::Arc;

use tracing::debug;

use super::{money, AccountRegistry, TransferEngine};
use crate::types::{
    AccountSnapshot, LedgerError, LedgerOutcome, LedgerRequest, OperationType,
};

/// Routes ledger requests to the core components
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    /// Shared account table
    registry: Arc<AccountRegistry>,

    /// Transfer executor over the same registry
    transfers: TransferEngine,
}

impl LedgerEngine {
    /// Create an engine with a fresh registry
    ///
    /// # Arguments
    ///
    /// * `default_balance` - Balance in minor units for newly created accounts
    pub fn new(default_balance: i64) -> Self {
        Self::with_registry(Arc::new(AccountRegistry::new(default_balance)))
    }

    /// Create an engine over an existing registry
    pub fn with_registry(registry: Arc<AccountRegistry>) -> Self {
        let transfers = TransferEngine::new(Arc::clone(&registry));
        Self {
            registry,
            transfers,
        }
    }

    /// The shared account registry
    pub fn registry(&self) -> &Arc<AccountRegistry> {
        &self.registry
    }

    /// The transfer engine
    pub fn transfers(&self) -> &TransferEngine {
        &self.transfers
    }

    /// Process a single request
    ///
    /// # Returns
    ///
    /// * `Ok(LedgerOutcome)` - The request was handled; business rejections
    ///   are part of the outcome
    /// * `Err(LedgerError)` - The request was malformed or violated a contract
    pub fn process(&self, request: &LedgerRequest) -> Result<LedgerOutcome, LedgerError> {
        match request.op {
            OperationType::Transfer => {
                let target = request.target.as_deref().ok_or_else(|| {
                    LedgerError::missing_field("transfer", &request.account, "target")
                })?;
                let outcome = self.transfers.transfer_raw(
                    &request.account,
                    target,
                    request.amount.as_deref(),
                )?;
                Ok(LedgerOutcome::Transfer(outcome))
            }
            OperationType::Delete => {
                let removed = self.registry.delete(&request.account)?;
                debug!(account = %request.account, removed, "Delete processed");
                Ok(LedgerOutcome::Delete {
                    account_number: request.account.clone(),
                    removed,
                })
            }
            OperationType::Get => {
                let balance = self
                    .registry
                    .get(&request.account)?
                    .map(|account| money::to_decimal(account.balance()));
                debug!(
                    account = %request.account,
                    success = balance.is_some(),
                    "Lookup processed"
                );
                Ok(LedgerOutcome::Account {
                    account_number: request.account.clone(),
                    balance,
                })
            }
        }
    }

    /// Sorted snapshot of all accounts
    pub fn get_accounts(&self) -> Vec<AccountSnapshot> {
        self.registry.statement()
    }
}
