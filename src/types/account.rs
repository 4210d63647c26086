//! Account-related types for the Rust Ledger Engine
//!
//! An [`Account`] is a named balance cell. The balance lives in an
//! [`AtomicI64`] owned by the account, counted in minor units (cents), so
//! concurrent transfers can update it without a lock.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicI64, Ordering};

/// Account identifier, assigned by the caller
pub type AccountNumber = String;

/// A live, concurrently updated account
///
/// Identity is the account number alone: two handles with the same number
/// compare equal regardless of the balance each one currently shows.
#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    balance: AtomicI64,
}

impl Account {
    /// Create an account holding `balance` minor units
    pub fn new(number: impl Into<AccountNumber>, balance: i64) -> Self {
        Account {
            number: number.into(),
            balance: AtomicI64::new(balance),
        }
    }

    /// The immutable account number
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Current balance in minor units
    pub fn balance(&self) -> i64 {
        self.balance.load(Ordering::SeqCst)
    }

    /// Subtract `amount` only if the balance covers it
    ///
    /// Runs as a single compare-and-swap retry loop. Returns `Ok(new_balance)`
    /// when the debit was applied and `Err(current_balance)` when funds were
    /// insufficient and nothing changed.
    ///
    /// `amount` must be positive; a negative debit would act as a credit.
    pub fn debit_if_covered(&self, amount: i64) -> Result<i64, i64> {
        debug_assert!(amount > 0, "debit amount must be positive, got {}", amount);
        self.balance
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |balance| {
                if balance >= amount {
                    balance.checked_sub(amount)
                } else {
                    None
                }
            })
            .map(|previous| previous - amount)
    }

    /// Add `amount`, refusing to wrap around on overflow
    ///
    /// Returns the new balance, or `None` if the addition would overflow
    /// (in which case the balance is untouched).
    ///
    /// `amount` must be positive.
    pub fn credit(&self, amount: i64) -> Option<i64> {
        debug_assert!(amount > 0, "credit amount must be positive, got {}", amount);
        self.balance
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |balance| {
                balance.checked_add(amount)
            })
            .ok()
            .map(|previous| previous + amount)
    }

    /// Point-in-time copy of this account
    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            number: self.number.clone(),
            balance: self.balance(),
        }
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

/// Immutable account view used for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// The account number
    pub number: AccountNumber,

    /// Balance in minor units at the time the snapshot was taken
    pub balance: i64,
}
