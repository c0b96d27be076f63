//! Path management
//!
//! Resolves where the blob store keeps its documents.
//!
//! ## Path Resolution Order
//!
//! 1. `AQSHA_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/aqsha` or `~/.config/aqsha`
//! 3. Windows: `%APPDATA%\aqsha`

use std::path::{Path, PathBuf};

use crate::error::{AqshaError, AqshaResult};

/// Manages all paths used by the Aqsha data layer
#[derive(Debug, Clone)]
pub struct AqshaPaths {
    base_dir: PathBuf,
}

impl AqshaPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> AqshaResult<Self> {
        let base_dir = if let Ok(custom) = std::env::var("AQSHA_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// The base directory (~/.config/aqsha/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Where blob documents live (~/.config/aqsha/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> AqshaResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AqshaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AqshaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> AqshaResult<PathBuf> {
    // Unix (Linux/macOS): XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| AqshaError::Config("Could not determine home directory".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("aqsha"))
}

#[cfg(windows)]
fn resolve_default_path() -> AqshaResult<PathBuf> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| AqshaError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("aqsha"))
}
