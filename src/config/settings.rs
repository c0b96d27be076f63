//! User settings
//!
//! A small preferences document stored under the "settings" blob key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AqshaResult;
use crate::models::DEFAULT_CURRENCY;
use crate::storage::{read_value, write_value, BlobStore, KEY_SETTINGS};

/// Interface language preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Kazakh
    #[default]
    Kk,
    /// Russian
    Ru,
    /// English
    En,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kk => write!(f, "Қазақша"),
            Self::Ru => write!(f, "Русский"),
            Self::En => write!(f, "English"),
        }
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub language: Language,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Settings {
    /// Load settings from the blob store, falling back to defaults
    pub fn load(store: &dyn BlobStore) -> AqshaResult<Self> {
        Ok(read_value(store, KEY_SETTINGS)?.unwrap_or_default())
    }

    /// Persist settings to the blob store
    pub fn save(&self, store: &dyn BlobStore) -> AqshaResult<()> {
        write_value(store, KEY_SETTINGS, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.language, Language::Kk);
        assert_eq!(settings.currency_symbol, "₸");
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let store = MemoryBlobStore::new();
        let settings = Settings::load(&store).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryBlobStore::new();
        let settings = Settings {
            language: Language::Ru,
            currency_symbol: "₸".to_string(),
        };

        settings.save(&store).unwrap();
        assert_eq!(Settings::load(&store).unwrap(), settings);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let store = MemoryBlobStore::new();
        store.set(KEY_SETTINGS, r#"{"language":"en"}"#).unwrap();

        let settings = Settings::load(&store).unwrap();
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.currency_symbol, "₸");
    }
}
