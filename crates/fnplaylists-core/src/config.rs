//! Settings file management
//!
//! The settings file is a small pretty-printed JSON object:
//!
//! ```json
//! {
//!   "installPath": "C:\\Program Files\\Epic Games\\Fortnite\\FortniteGame",
//!   "aesKey": "0x...",
//!   "language": "EN"
//! }
//! ```
//!
//! A missing or broken file is the expected first-run state: [`ConfigStore::load`]
//! regenerates defaults, writes them back and never fails.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{RunError, StoreError};
use crate::language::Language;
use crate::launcher;

/// Default settings file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Required length of the decryption key: `0x` followed by 64 hex digits.
pub const AES_KEY_LENGTH: usize = 66;

/// Run settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Directory holding the packaged game data
    pub install_path: String,
    /// Archive decryption key as hex with `0x` prefix
    pub aes_key: String,
    /// Language used to resolve display names
    pub language: Language,
}

impl Configuration {
    /// Defaults with the given install path.
    pub fn with_install_path(install_path: impl Into<String>) -> Self {
        Self {
            install_path: install_path.into(),
            ..Self::default()
        }
    }

    /// Check the settings a run depends on.
    ///
    /// Only the trimmed key length is checked, not whether it is valid hex.
    pub fn validate(&self) -> Result<(), RunError> {
        let actual = self.aes_key.trim().chars().count();
        if actual != AES_KEY_LENGTH {
            return Err(RunError::InvalidKeyLength {
                expected: AES_KEY_LENGTH,
                actual,
            });
        }

        if self.install_path.is_empty() {
            return Err(RunError::MissingInstallPath);
        }

        Ok(())
    }
}

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    launcher_manifest: Option<PathBuf>,
}

impl ConfigStore {
    /// Store backed by `path`, detecting the install directory through the
    /// platform's launcher manifest.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            launcher_manifest: launcher::default_manifest_path(),
        }
    }

    /// Use a specific launcher manifest (or none) for install detection
    #[must_use]
    pub fn with_launcher_manifest(mut self, manifest: Option<PathBuf>) -> Self {
        self.launcher_manifest = manifest;
        self
    }

    /// Settings file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings, regenerating defaults when the file is missing or
    /// invalid.
    ///
    /// Regenerated defaults have an empty key, the detected install path (or
    /// an empty one) and the default language. They are written back to the
    /// settings file; a failed write is logged and otherwise ignored.
    pub fn load(&self) -> Configuration {
        match self.read() {
            Ok(config) => {
                debug!("Loaded settings from {}", self.path.display());
                config
            }
            Err(e) => {
                debug!("Regenerating settings: {}", e);
                let install_path =
                    launcher::detect_install_path(self.launcher_manifest.as_deref())
                        .unwrap_or_default();
                let config = Configuration::with_install_path(install_path);

                match self.save(&config) {
                    Ok(()) => info!("Wrote default settings to {}", self.path.display()),
                    Err(e) => warn!("Failed to write default settings: {}", e),
                }

                config
            }
        }
    }

    /// Read and parse the settings file
    pub fn read(&self) -> Result<Configuration, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the settings file, pretty-printed
    pub fn save(&self, config: &Configuration) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
