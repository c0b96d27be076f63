//! Business logic on top of the repositories

pub mod reset;
pub mod transaction;

pub use reset::ResetService;
pub use transaction::TransactionService;
