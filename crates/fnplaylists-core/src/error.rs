//! Error types for settings, providers and pipeline runs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the settings and search list files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read, created or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file exists but is not valid JSON for the expected shape.
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The value could not be serialized.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised by an asset provider while mounting or reading archives.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The install directory does not exist.
    #[error("Install path not found: {}", .0.display())]
    InstallPathNotFound(PathBuf),

    /// I/O error while scanning the archive set.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An archive could not be interpreted.
    #[error("Invalid archive {}: {reason}", .path.display())]
    InvalidArchive {
        /// Archive location
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },
}

/// Reasons a pipeline run aborts.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum RunError {
    /// The configured decryption key does not have the expected length.
    #[error(
        "Please enter a valid aes key in the config file (expected {expected} characters, got {actual})"
    )]
    InvalidKeyLength {
        /// Required length
        expected: usize,
        /// Trimmed length of the configured key
        actual: usize,
    },

    /// No install directory configured or detected.
    #[error("Couldn't get installation dir, please enter it manually in the config file")]
    MissingInstallPath,

    /// The search list holds no codenames.
    #[error(
        "The search list is empty. Please add playlist code names to search for separated by new lines"
    )]
    EmptySearchList,

    /// The provider mounted no archive with the submitted key.
    #[error("The aes key '{key}' doesn't work with any pak file, please check it")]
    KeyRejected {
        /// Key as written in the settings file
        key: String,
    },

    /// Mounting or reading the archive set failed.
    #[error("Asset provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Reading or creating one of the input files failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Writing a report line failed.
    #[error("Failed to write report: {0}")]
    Report(#[from] io::Error),
}
