//! Thread-safe account registry
//!
//! This module provides the `AccountRegistry` struct, the sole owner of the
//! account table.
//!
//! # Design
//!
//! The `AccountRegistry` uses `DashMap` (a concurrent HashMap) keyed by account
//! number. Each entry holds an `Arc<Account>`, so every caller asking for the
//! same number gets a handle to the same balance cell. Balances are mutated
//! through the account's own atomic, never through the map, which means map
//! shards are only locked for insert, remove and lookup.
//!
//! There is no explicit "create" operation. Accounts come into existence on
//! first reference through [`AccountRegistry::get_or_create`], holding the
//! default balance the registry was constructed with.
//!
//! # Thread Safety
//!
//! All operations are atomic at single-key granularity:
//! - Concurrent `get_or_create` calls for one number create it exactly once
//! - Concurrent `delete` calls for one number report success exactly once
//! - `get_all` never fails under concurrent churn, but it is a best-effort
//!   point-in-time copy, not a serializable read

use std::collections::HashSet;
use std::sync::Arc;

use crate::types::{Account, AccountSnapshot, LedgerError};
use dashmap::DashMap;
use tracing::trace;

/// Concurrent registry of live accounts
#[derive(Debug)]
pub struct AccountRegistry {
    /// Balance, in minor units, given to newly created accounts
    default_balance: i64,

    /// Account table keyed by account number
    ///
    /// DashMap provides fine-grained locking through internal sharding,
    /// allowing concurrent access to different accounts without global locks.
    accounts: DashMap<String, Arc<Account>>,
}

impl AccountRegistry {
    /// Create an empty registry
    ///
    /// # Arguments
    ///
    /// * `default_balance` - Balance in minor units for accounts created on
    ///   first reference
    pub fn new(default_balance: i64) -> Self {
        Self {
            default_balance,
            accounts: DashMap::new(),
        }
    }

    /// Balance in minor units given to new accounts
    pub fn default_balance(&self) -> i64 {
        self.default_balance
    }

    /// Get an existing account or create it with the default balance
    ///
    /// If several threads ask for the same missing number at once, only one of
    /// them inserts it and all of them receive the same `Arc<Account>`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidArgument` if `number` is empty or blank.
    pub fn get_or_create(&self, number: &str) -> Result<Arc<Account>, LedgerError> {
        validate_number(number)?;

        if let Some(existing) = self.accounts.get(number) {
            return Ok(Arc::clone(existing.value()));
        }

        let account = self
            .accounts
            .entry(number.to_string())
            .or_insert_with(|| {
                trace!(account = number, balance = self.default_balance, "Creating account");
                Arc::new(Account::new(number, self.default_balance))
            });
        Ok(Arc::clone(account.value()))
    }

    /// Look up an account without creating it
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidArgument` if `number` is empty or blank.
    pub fn get(&self, number: &str) -> Result<Option<Arc<Account>>, LedgerError> {
        validate_number(number)?;

        Ok(self
            .accounts
            .get(number)
            .map(|entry| Arc::clone(entry.value())))
    }

    /// Remove an account
    ///
    /// Deletion is unconditional: the balance is not checked, and a transfer
    /// holding a handle to the account may still complete against it.
    ///
    /// # Returns
    ///
    /// `true` if an account was removed, `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidArgument` if `number` is empty or blank.
    pub fn delete(&self, number: &str) -> Result<bool, LedgerError> {
        validate_number(number)?;

        Ok(self.accounts.remove(number).is_some())
    }

    /// Copy of the currently registered accounts
    ///
    /// The returned set is independent of the registry and can be iterated
    /// while other threads keep inserting and removing accounts.
    pub fn get_all(&self) -> HashSet<Arc<Account>> {
        self.accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Snapshots of all accounts, sorted by account number
    pub fn statement(&self) -> Vec<AccountSnapshot> {
        let mut snapshots: Vec<AccountSnapshot> =
            self.get_all().iter().map(|account| account.snapshot()).collect();
        snapshots.sort_by(|a, b| a.number.cmp(&b.number));
        snapshots
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account is registered
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn validate_number(number: &str) -> Result<(), LedgerError> {
    if number.trim().is_empty() {
        return Err(LedgerError::invalid_argument(
            "account number must not be empty",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::thread;

    const DEFAULT_BALANCE: i64 = 10000;

    #[test]
    fn test_get_or_create_uses_default_balance() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);

        let account = registry.get_or_create("123").unwrap();

        assert_eq!(account.number(), "123");
        assert_eq!(account.balance(), DEFAULT_BALANCE);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_or_create_returns_existing_account() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);

        let first = registry.get_or_create("123").unwrap();
        first.credit(500);
        let second = registry.get_or_create("123").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.balance(), DEFAULT_BALANCE + 500);
    }

    #[test]
    fn test_get_does_not_create() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);

        assert_eq!(registry.get("unknown").unwrap(), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_finds_created_account() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);
        let created = registry.get_or_create("123").unwrap();

        let found = registry.get("123").unwrap().unwrap();

        assert!(Arc::ptr_eq(&created, &found));
    }

    #[test]
    fn test_delete_reports_success_once() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);
        registry.get_or_create("123").unwrap();

        assert!(registry.delete("123").unwrap());
        assert!(!registry.delete("123").unwrap());
        assert!(!registry.delete("123").unwrap());
        assert_eq!(registry.get("123").unwrap(), None);
    }

    #[test]
    fn test_delete_unknown_account() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);

        assert!(!registry.delete("unknown").unwrap());
    }

    #[test]
    fn test_delete_ignores_balance() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);
        let account = registry.get_or_create("123").unwrap();
        account.debit_if_covered(DEFAULT_BALANCE).unwrap();
        account.credit(1);

        assert!(registry.delete("123").unwrap());
    }

    #[test]
    fn test_recreated_account_starts_from_default() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);
        registry.get_or_create("123").unwrap().credit(700);
        registry.delete("123").unwrap();

        let account = registry.get_or_create("123").unwrap();

        assert_eq!(account.balance(), DEFAULT_BALANCE);
    }

    #[test]
    fn test_get_all_returns_all_accounts() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);
        for number in ["1", "2", "3"] {
            registry.get_or_create(number).unwrap();
        }

        let accounts = registry.get_all();

        assert_eq!(accounts.len(), 3);
        let numbers: HashSet<&str> = accounts.iter().map(|a| a.number()).collect();
        assert_eq!(numbers, HashSet::from(["1", "2", "3"]));
    }

    #[test]
    fn test_get_all_is_detached_from_registry() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);
        registry.get_or_create("1").unwrap();

        let accounts = registry.get_all();
        registry.get_or_create("2").unwrap();
        registry.delete("1").unwrap();

        assert_eq!(accounts.len(), 1);
        assert!(accounts.iter().any(|a| a.number() == "1"));
    }

    #[test]
    fn test_statement_is_sorted() {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);
        for number in ["c", "a", "b"] {
            registry.get_or_create(number).unwrap();
        }

        let numbers: Vec<String> = registry
            .statement()
            .into_iter()
            .map(|snapshot| snapshot.number)
            .collect();

        assert_eq!(numbers, vec!["a", "b", "c"]);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    fn test_rejects_empty_numbers(#[case] number: &str) {
        let registry = AccountRegistry::new(DEFAULT_BALANCE);

        assert!(matches!(
            registry.get_or_create(number),
            Err(LedgerError::InvalidArgument { .. })
        ));
        assert!(matches!(
            registry.get(number),
            Err(LedgerError::InvalidArgument { .. })
        ));
        assert!(matches!(
            registry.delete(number),
            Err(LedgerError::InvalidArgument { .. })
        ));
        assert!(registry.is_empty());
    }

    // Concurrent access tests
    #[test]
    fn test_concurrent_get_or_create_same_account() {
        let registry = Arc::new(AccountRegistry::new(DEFAULT_BALANCE));
        let mut handles = vec![];

        for _ in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                let account = registry.get_or_create("shared").unwrap();
                account.credit(1);
                account
            }));
        }

        let accounts: Vec<Arc<Account>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(registry.len(), 1);
        for account in &accounts {
            assert!(Arc::ptr_eq(account, &accounts[0]));
        }
        // No credit was lost to a second, shadowed instance
        assert_eq!(accounts[0].balance(), DEFAULT_BALANCE + 16);
    }

    #[test]
    fn test_concurrent_get_or_create_different_accounts() {
        let registry = Arc::new(AccountRegistry::new(DEFAULT_BALANCE));
        let mut handles = vec![];

        for i in 0..10 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                let account = registry.get_or_create(&i.to_string()).unwrap();
                assert_eq!(account.balance(), DEFAULT_BALANCE);
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 10);
    }

    #[test]
    fn test_concurrent_delete_same_account() {
        let registry = Arc::new(AccountRegistry::new(DEFAULT_BALANCE));
        registry.get_or_create("doomed").unwrap();
        let mut handles = vec![];

        for _ in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || registry.delete("doomed").unwrap()));
        }

        let removed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|removed| *removed)
            .count();

        assert_eq!(removed, 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_get_all_during_churn() {
        let registry = Arc::new(AccountRegistry::new(DEFAULT_BALANCE));
        for i in 0..5 {
            registry.get_or_create(&format!("stable-{}", i)).unwrap();
        }
        let mut handles = vec![];

        for i in 0..10 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for round in 0..100 {
                    if i % 2 == 0 {
                        let accounts = registry.get_all();
                        assert!(accounts.len() >= 5);
                    } else {
                        let number = format!("churn-{}-{}", i, round);
                        registry.get_or_create(&number).unwrap();
                        registry.delete(&number).unwrap();
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 5);
    }
}
