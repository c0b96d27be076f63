//! Data models for the Aqsha core library

pub mod account;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountForm, AccountKind, AccountPatch, AccountValidationError};
pub use category::{Category, IncomeSource};
pub use ids::{AccountId, CategoryId, IncomeSourceId, TransactionId};
pub use money::{Money, MoneyParseError, DEFAULT_CURRENCY};
pub use transaction::{
    AccountSnapshot, DraftValidationError, Transaction, TransactionDraft, TransactionType,
};
