//! Transaction service
//!
//! Creating a transaction is the one operation that touches both documents:
//! it appends to the log and applies balance deltas to the affected accounts.
//! Validation and account lookups happen before any write, so a rejected
//! draft leaves no partial state behind.

use chrono::Utc;
use log::debug;

use crate::error::{AqshaError, AqshaResult};
use crate::models::{
    Account, AccountId, AccountPatch, AccountSnapshot, Money, Transaction, TransactionDraft,
    TransactionId,
};
use crate::storage::Store;

/// Service for recording transactions
pub struct TransactionService<'a> {
    store: &'a Store,
}

impl<'a> TransactionService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Validate a draft, apply balance deltas, and append the record
    ///
    /// Accounts are re-fetched here rather than trusted from the draft, so the
    /// snapshots and deltas are computed against current balances. Any
    /// missing account aborts before a single write happens.
    pub fn create(&self, draft: TransactionDraft) -> AqshaResult<Transaction> {
        let amount = draft
            .validate()
            .map_err(|e| AqshaError::Validation(e.to_string()))?;

        let source = self.fetch(draft.source_account)?;
        let destination = self.fetch(draft.destination_account)?;

        let transaction = Transaction {
            id: TransactionId::new(),
            kind: draft.kind,
            amount,
            date: draft.date.unwrap_or_else(Utc::now),
            category: draft.category,
            income_source: draft.income_source,
            source_account: source.as_ref().map(AccountSnapshot::from),
            destination_account: destination.as_ref().map(AccountSnapshot::from),
            note: draft.note,
        };

        if let Some(account) = &source {
            self.apply_delta(account, -amount)?;
        }
        if let Some(account) = &destination {
            self.apply_delta(account, amount)?;
        }

        self.store.transactions.append(transaction.clone())?;
        debug!("Recorded {} {}", transaction.kind, transaction.amount);

        Ok(transaction)
    }

    fn fetch(&self, id: Option<AccountId>) -> AqshaResult<Option<Account>> {
        match id {
            Some(id) => {
                let account = self
                    .store
                    .accounts
                    .get(id)?
                    .ok_or_else(|| AqshaError::account_not_found(id.to_string()))?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    fn apply_delta(&self, account: &Account, delta: Money) -> AqshaResult<()> {
        self.store
            .accounts
            .update(account.id, AccountPatch::balance(account.balance + delta))?;
        Ok(())
    }

    /// The full log, newest first
    pub fn list(&self) -> AqshaResult<Vec<Transaction>> {
        self.store.transactions.list()
    }

    /// Transactions touching an account as source or destination
    pub fn list_by_account(&self, account_id: AccountId) -> AqshaResult<Vec<Transaction>> {
        self.store.transactions.list_by_account(account_id)
    }

    /// Total recorded income minus expenses; transfers net to zero
    ///
    /// When every balance change went through [`create`](Self::create), this
    /// equals the sum of all account balances. The consistency suite checks
    /// that identity against the file-backed store.
    pub fn net_recorded(&self) -> AqshaResult<Money> {
        Ok(self.list()?.iter().map(Transaction::signed_amount).sum())
    }
}
