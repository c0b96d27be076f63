//! Transaction model
//!
//! Transactions are immutable once created: the list is an append-only log,
//! cleared only by a full reset. Each record embeds denormalized snapshots of
//! the accounts, category, and income source it referenced at creation time,
//! so later edits to those entities never rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::{Account, AccountKind};
use super::category::{Category, IncomeSource};
use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Kind of transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// Denormalized view of an account as it looked when the transaction was
/// created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    /// Balance before this transaction was applied
    pub balance: Money,
}

impl From<&Account> for AccountSnapshot {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            kind: account.kind,
            balance: account.balance,
        }
    }
}

/// A recorded income, expense, or transfer event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Kind of transaction
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Positive amount; the sign of the balance effect is implied by the kind
    pub amount: Money,

    /// When the transaction happened (ISO-8601 in storage)
    pub date: DateTime<Utc>,

    /// Expense category snapshot (expenses only)
    pub category: Option<Category>,

    /// Income source snapshot (income only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_source: Option<IncomeSource>,

    /// Account debited (expense, transfer)
    pub source_account: Option<AccountSnapshot>,

    /// Account credited (income, transfer)
    pub destination_account: Option<AccountSnapshot>,

    /// Free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Check whether this transaction touches the given account, as either
    /// source or destination
    pub fn involves_account(&self, account_id: &AccountId) -> bool {
        self.source_account.as_ref().map(|a| &a.id) == Some(account_id)
            || self.destination_account.as_ref().map(|a| &a.id) == Some(account_id)
    }

    /// Signed amount from the perspective of totals: negative for expenses,
    /// positive for income, zero for transfers (they net out)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
            TransactionType::Transfer => Money::zero(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount
        )
    }
}

/// Intent to create a transaction, as assembled by the entry flow
///
/// The amount arrives as the raw keypad string; accounts are carried as ids
/// only, since the service re-fetches fresh records before applying balance
/// deltas.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: TransactionType,
    pub amount: String,
    pub category: Option<Category>,
    pub income_source: Option<IncomeSource>,
    pub source_account: Option<AccountId>,
    pub destination_account: Option<AccountId>,
    pub note: Option<String>,
    /// Transaction date; now when unset
    pub date: Option<DateTime<Utc>>,
}

impl TransactionDraft {
    /// Start a draft of the given kind with an amount string
    pub fn new(kind: TransactionType, amount: impl Into<String>) -> Self {
        Self {
            kind,
            amount: amount.into(),
            category: None,
            income_source: None,
            source_account: None,
            destination_account: None,
            note: None,
            date: None,
        }
    }

    /// Validate the draft and return the parsed amount
    ///
    /// Checks, in order: the amount parses and is positive, then the
    /// per-kind required fields are present, then transfer endpoints differ.
    pub fn validate(&self) -> Result<Money, DraftValidationError> {
        let amount =
            Money::parse(&self.amount).map_err(|_| DraftValidationError::AmountRequired)?;
        if !amount.is_positive() {
            return Err(DraftValidationError::AmountNotPositive);
        }

        match self.kind {
            TransactionType::Expense => {
                if self.source_account.is_none() {
                    return Err(DraftValidationError::MissingSourceAccount);
                }
                if self.category.is_none() {
                    return Err(DraftValidationError::MissingCategory);
                }
            }
            TransactionType::Income => {
                if self.destination_account.is_none() {
                    return Err(DraftValidationError::MissingDestinationAccount);
                }
                if self.income_source.is_none() {
                    return Err(DraftValidationError::MissingIncomeSource);
                }
            }
            TransactionType::Transfer => {
                let (source, destination) = match (self.source_account, self.destination_account) {
                    (Some(s), Some(d)) => (s, d),
                    _ => return Err(DraftValidationError::MissingTransferAccounts),
                };
                if source == destination {
                    return Err(DraftValidationError::SameTransferAccount);
                }
            }
        }

        Ok(amount)
    }
}

/// Validation errors for transaction drafts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftValidationError {
    AmountRequired,
    AmountNotPositive,
    MissingSourceAccount,
    MissingDestinationAccount,
    MissingCategory,
    MissingIncomeSource,
    MissingTransferAccounts,
    SameTransferAccount,
}

impl fmt::Display for DraftValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmountRequired => write!(f, "Amount is required"),
            Self::AmountNotPositive => write!(f, "Amount must be positive"),
            Self::MissingSourceAccount => write!(f, "Source account is required for expense"),
            Self::MissingDestinationAccount => {
                write!(f, "Destination account is required for income")
            }
            Self::MissingCategory => write!(f, "Category is required for expense"),
            Self::MissingIncomeSource => write!(f, "Income source is required for income"),
            Self::MissingTransferAccounts => {
                write!(f, "Both accounts are required for transfer")
            }
            Self::SameTransferAccount => write!(f, "Cannot transfer to the same account"),
        }
    }
}

impl std::error::Error for DraftValidationError {}
