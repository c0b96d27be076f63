//! Persistence layer
//!
//! Everything is stored as JSON documents in a string-keyed [`BlobStore`].
//! Repositories own a cached view of one document each and rewrite the whole
//! document on mutation.

pub mod accounts;
pub mod blob;
pub mod transactions;

pub use accounts::AccountRepository;
pub use blob::{read_value, write_value, BlobStore, FileBlobStore, MemoryBlobStore};
pub use transactions::TransactionRepository;

use std::sync::Arc;

use crate::config::AqshaPaths;

/// Blob key for the account list
pub const KEY_ACCOUNTS: &str = "accounts";
/// Blob key for the transaction log
pub const KEY_TRANSACTIONS: &str = "transactions";
/// Blob key for user settings
pub const KEY_SETTINGS: &str = "settings";

/// All repositories over a single blob store
pub struct Store {
    blob: Arc<dyn BlobStore>,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
}

impl Store {
    /// Build a store over an arbitrary blob backend
    pub fn new(blob: Arc<dyn BlobStore>) -> Self {
        Self {
            accounts: AccountRepository::new(Arc::clone(&blob)),
            transactions: TransactionRepository::new(Arc::clone(&blob)),
            blob,
        }
    }

    /// Open the file-backed store under the configured data directory
    pub fn open(paths: &AqshaPaths) -> Self {
        Self::new(Arc::new(FileBlobStore::new(paths.data_dir())))
    }

    /// An in-memory store, for tests
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBlobStore::new()))
    }

    /// The underlying blob backend
    pub fn blob(&self) -> &Arc<dyn BlobStore> {
        &self.blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repositories_share_backend() {
        let store = Store::in_memory();

        store.accounts.list().unwrap();
        assert!(store.blob().get(KEY_ACCOUNTS).unwrap().is_some());
        assert!(store.blob().get(KEY_TRANSACTIONS).unwrap().is_none());
    }

    #[test]
    fn test_open_uses_data_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = AqshaPaths::with_base_dir(temp_dir.path());
        let store = Store::open(&paths);

        store.accounts.list().unwrap();
        assert!(paths.data_dir().join("accounts.json").exists());
    }
}
