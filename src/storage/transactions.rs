//! Transaction repository
//!
//! Persists the append-only transaction log under the "transactions" blob key,
//! newest first. Records are never edited in place; the only mutations are
//! append and full reset.

use std::sync::{Arc, RwLock};

use log::warn;

use crate::error::{AqshaError, AqshaResult};
use crate::models::{AccountId, CategoryId, Transaction};

use super::blob::{read_value, write_value, BlobStore};
use super::KEY_TRANSACTIONS;

/// Repository for transaction persistence
pub struct TransactionRepository {
    store: Arc<dyn BlobStore>,
    cache: RwLock<Option<Vec<Transaction>>>,
}

impl TransactionRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Load the transaction log; an unreadable document logs a warning and
    /// yields an empty log
    fn load(&self) -> AqshaResult<Vec<Transaction>> {
        {
            let cache = self.cache.read().map_err(|e| {
                AqshaError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;
            if let Some(transactions) = cache.as_ref() {
                return Ok(transactions.clone());
            }
        }

        let transactions: Vec<Transaction> =
            match read_value(self.store.as_ref(), KEY_TRANSACTIONS) {
                Ok(stored) => stored.unwrap_or_default(),
                Err(e) => {
                    warn!("Error loading transactions, starting empty: {}", e);
                    Vec::new()
                }
            };

        let mut cache = self
            .cache
            .write()
            .map_err(|e| AqshaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *cache = Some(transactions.clone());

        Ok(transactions)
    }

    fn persist(&self, transactions: Vec<Transaction>) -> AqshaResult<()> {
        write_value(self.store.as_ref(), KEY_TRANSACTIONS, &transactions)?;

        let mut cache = self
            .cache
            .write()
            .map_err(|e| AqshaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *cache = Some(transactions);

        Ok(())
    }

    /// Get the full log, newest first
    pub fn list(&self) -> AqshaResult<Vec<Transaction>> {
        self.load()
    }

    /// Transactions touching the given account as source or destination
    pub fn list_by_account(&self, account_id: AccountId) -> AqshaResult<Vec<Transaction>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|t| t.involves_account(&account_id))
            .collect())
    }

    /// Expense transactions tagged with the given category
    pub fn list_by_category(&self, category_id: CategoryId) -> AqshaResult<Vec<Transaction>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|t| t.category.as_ref().map(|c| c.id) == Some(category_id))
            .collect())
    }

    /// Prepend a new record to the log
    pub fn append(&self, transaction: Transaction) -> AqshaResult<()> {
        let mut transactions = self.load()?;
        transactions.insert(0, transaction);
        self.persist(transactions)
    }

    /// Number of recorded transactions
    pub fn count(&self) -> AqshaResult<usize> {
        Ok(self.load()?.len())
    }

    /// Erase the log
    pub fn reset(&self) -> AqshaResult<()> {
        self.persist(Vec::new())
    }
}
