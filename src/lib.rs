//! Aqsha core: personal finance data layer
//!
//! Accounts, an append-only transaction log, and on-demand analytics over a
//! string-keyed JSON blob store. The tenge (₸) is the working currency;
//! amounts are stored in tiyn as integers.
//!
//! ```no_run
//! use aqsha_core::models::{Category, TransactionDraft, TransactionType};
//! use aqsha_core::services::TransactionService;
//! use aqsha_core::storage::Store;
//!
//! # fn main() -> aqsha_core::error::AqshaResult<()> {
//! let store = Store::in_memory();
//! let cash = store.accounts.list()?[0].id;
//!
//! let mut draft = TransactionDraft::new(TransactionType::Expense, "1500");
//! draft.source_account = Some(cash);
//! draft.category = Some(Category::new("Продукты", "#F97316", "🛒"));
//!
//! TransactionService::new(&store).create(draft)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{AqshaError, AqshaResult};
