//! Account repository
//!
//! Loads and persists the full account list under the "accounts" blob key.
//! The list is cached after first load; every mutation rewrites the whole
//! document in a single call, so each write observes the state left by the
//! previous one.

use std::sync::{Arc, RwLock};

use log::warn;

use crate::error::{AqshaError, AqshaResult};
use crate::models::{Account, AccountForm, AccountId, AccountPatch, Money};

use super::blob::{read_value, write_value, BlobStore};
use super::KEY_ACCOUNTS;

/// Repository for account persistence
pub struct AccountRepository {
    store: Arc<dyn BlobStore>,
    cache: RwLock<Option<Vec<Account>>>,
}

impl AccountRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Load the account list, seeding the defaults on first run
    ///
    /// An unreadable document is treated as first run: the error is logged and
    /// the defaults are seeded rather than failing every read forever.
    fn load(&self) -> AqshaResult<Vec<Account>> {
        {
            let cache = self.cache.read().map_err(|e| {
                AqshaError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;
            if let Some(accounts) = cache.as_ref() {
                return Ok(accounts.clone());
            }
        }

        let stored: Option<Vec<Account>> = match read_value(self.store.as_ref(), KEY_ACCOUNTS) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Error loading accounts, reseeding defaults: {}", e);
                None
            }
        };

        let accounts = match stored {
            Some(accounts) if !accounts.is_empty() => accounts,
            _ => {
                let defaults = Account::default_pair();
                write_value(self.store.as_ref(), KEY_ACCOUNTS, &defaults)?;
                defaults
            }
        };

        let mut cache = self
            .cache
            .write()
            .map_err(|e| AqshaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *cache = Some(accounts.clone());

        Ok(accounts)
    }

    fn persist(&self, accounts: Vec<Account>) -> AqshaResult<()> {
        write_value(self.store.as_ref(), KEY_ACCOUNTS, &accounts)?;

        let mut cache = self
            .cache
            .write()
            .map_err(|e| AqshaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *cache = Some(accounts);

        Ok(())
    }

    /// Get all accounts, archived included
    pub fn list(&self) -> AqshaResult<Vec<Account>> {
        self.load()
    }

    /// Get all active (non-archived) accounts
    pub fn list_active(&self) -> AqshaResult<Vec<Account>> {
        Ok(self.load()?.into_iter().filter(|a| !a.is_archived).collect())
    }

    /// Get an account by id
    pub fn get(&self, id: AccountId) -> AqshaResult<Option<Account>> {
        Ok(self.load()?.into_iter().find(|a| a.id == id))
    }

    /// Create a new account from form data
    pub fn create(&self, form: AccountForm) -> AqshaResult<Account> {
        let account = Account::new(form);
        account
            .validate()
            .map_err(|e| AqshaError::Validation(e.to_string()))?;

        let mut accounts = self.load()?;
        accounts.push(account.clone());
        self.persist(accounts)?;

        Ok(account)
    }

    /// Apply a partial update to an account
    pub fn update(&self, id: AccountId, patch: AccountPatch) -> AqshaResult<Account> {
        let mut accounts = self.load()?;

        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AqshaError::account_not_found(id.to_string()))?;

        account.apply(patch);
        account
            .validate()
            .map_err(|e| AqshaError::Validation(e.to_string()))?;
        let updated = account.clone();

        self.persist(accounts)?;
        Ok(updated)
    }

    /// Hard-delete an account
    ///
    /// Seeded default accounts cannot be deleted, only archived. Returns
    /// `Ok(false)` if no such account exists.
    pub fn delete(&self, id: AccountId) -> AqshaResult<bool> {
        let mut accounts = self.load()?;

        let Some(account) = accounts.iter().find(|a| a.id == id) else {
            return Ok(false);
        };
        if account.is_default {
            return Err(AqshaError::Validation(
                "Default accounts cannot be deleted".to_string(),
            ));
        }

        accounts.retain(|a| a.id != id);
        self.persist(accounts)?;
        Ok(true)
    }

    /// Archive an account (soft delete)
    pub fn archive(&self, id: AccountId) -> AqshaResult<Account> {
        self.update(id, AccountPatch::archived())
    }

    /// Sum of all account balances, archived included
    pub fn total_balance(&self) -> AqshaResult<Money> {
        Ok(self.load()?.iter().map(|a| a.balance).sum())
    }

    /// Sum of active account balances
    pub fn active_balance(&self) -> AqshaResult<Money> {
        Ok(self.list_active()?.iter().map(|a| a.balance).sum())
    }

    /// Replace all accounts with a fresh default pair
    pub fn reset(&self) -> AqshaResult<()> {
        self.persist(Account::default_pair())
    }

    /// Remove all accounts, including the defaults
    ///
    /// The next read will reseed the default pair.
    pub fn clear(&self) -> AqshaResult<()> {
        self.store.remove(KEY_ACCOUNTS)?;

        let mut cache = self
            .cache
            .write()
            .map_err(|e| AqshaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *cache = None;

        Ok(())
    }
}
