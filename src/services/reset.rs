//! Full data reset
//!
//! Wipes the transaction log first, then the accounts, so a failure part-way
//! through can leave accounts with stale balances but never transactions
//! referencing wiped accounts.

use log::info;

use crate::error::{AqshaError, AqshaResult};
use crate::storage::Store;

/// Service for wiping all stored data
pub struct ResetService<'a> {
    store: &'a Store,
}

impl<'a> ResetService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Erase all transactions and accounts
    ///
    /// With `reset_accounts_to_defaults` the default account pair is reseeded
    /// with zero balances; otherwise the account document is removed entirely
    /// and the defaults reappear on next read.
    pub fn reset_all_data(&self, reset_accounts_to_defaults: bool) -> AqshaResult<()> {
        self.store
            .transactions
            .reset()
            .map_err(|e| AqshaError::Reset(format!("Failed to clear transactions: {}", e)))?;

        if reset_accounts_to_defaults {
            self.store
                .accounts
                .reset()
                .map_err(|e| AqshaError::Reset(format!("Failed to reset accounts: {}", e)))?;
        } else {
            self.store
                .accounts
                .clear()
                .map_err(|e| AqshaError::Reset(format!("Failed to clear accounts: {}", e)))?;
        }

        info!("All data reset (reseed defaults: {})", reset_accounts_to_defaults);
        Ok(())
    }
}
