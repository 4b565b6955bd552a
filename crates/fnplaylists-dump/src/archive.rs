//! Archive manifests and key checks
//!
//! Each archive of a dump is a directory under `Content/Paks` holding an
//! `archive.json` manifest:
//!
//! ```json
//! {
//!   "mountPoint": "../../../FortniteGame/Content/",
//!   "engineVersion": "GAME_UE4_25",
//!   "encryptionKeyGuid": "00000000000000000000000000000000",
//!   "keyCheck": "5d0c...e1"
//! }
//! ```
//!
//! Archives without `encryptionKeyGuid` are not encrypted.

use fnplaylists_core::{EngineVersion, KeyGuid};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest file name inside an archive directory.
pub const MANIFEST_FILE: &str = "archive.json";

/// Errors reading an archive manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Manifest path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON
    #[error("invalid manifest {}: {source}", .path.display())]
    Parse {
        /// Manifest path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The encryption key GUID is not 32 hex digits
    #[error("invalid encryption key GUID '{0}'")]
    InvalidGuid(String),

    /// An encrypted archive has no key check
    #[error("encrypted archive without keyCheck")]
    MissingKeyCheck,
}

/// Raw `archive.json` content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveManifest {
    /// Virtual directory the archive's files are mounted under
    #[serde(default)]
    pub mount_point: String,
    /// Engine version tag the archive was cooked for
    #[serde(default)]
    pub engine_version: Option<String>,
    /// GUID of the encryption key, 32 hex digits
    #[serde(default)]
    pub encryption_key_guid: Option<String>,
    /// SHA-256 of the decoded key bytes, hex
    #[serde(default)]
    pub key_check: Option<String>,
}

/// Encryption state of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encryption {
    /// Mounted without a key
    None,
    /// Mounted once a key with this GUID and check is submitted
    Key {
        /// Key identity
        guid: KeyGuid,
        /// Lower-case hex SHA-256 of the key bytes
        check: String,
    },
}

/// An archive directory with its parsed manifest.
#[derive(Debug, Clone)]
pub struct Archive {
    name: String,
    dir: PathBuf,
    mount_point: String,
    engine_version: Option<String>,
    encryption: Encryption,
}

impl Archive {
    /// Read the manifest of the archive in `dir`.
    pub fn open(dir: &Path) -> Result<Self, ManifestError> {
        let path = dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?;
        let manifest: ArchiveManifest = serde_json::from_str(&content)
            .map_err(|source| ManifestError::Parse { path, source })?;

        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_manifest(name, dir.to_path_buf(), manifest)
    }

    /// Build an archive from an already parsed manifest.
    pub fn from_manifest(
        name: String,
        dir: PathBuf,
        manifest: ArchiveManifest,
    ) -> Result<Self, ManifestError> {
        let encryption = match manifest.encryption_key_guid {
            None => Encryption::None,
            Some(guid) => {
                let guid = guid
                    .parse::<KeyGuid>()
                    .map_err(|_| ManifestError::InvalidGuid(guid))?;
                let check = manifest
                    .key_check
                    .ok_or(ManifestError::MissingKeyCheck)?
                    .to_ascii_lowercase();
                Encryption::Key { guid, check }
            }
        };

        Ok(Self {
            name,
            dir,
            mount_point: normalize_mount_point(&manifest.mount_point),
            engine_version: manifest.engine_version,
            encryption,
        })
    }

    /// Archive directory name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Archive directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Normalized mount point, empty or ending in `/`
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    /// Encryption state
    pub const fn encryption(&self) -> &Encryption {
        &self.encryption
    }

    /// Whether the archive was cooked for `version`.
    ///
    /// Archives that don't name a version match every version.
    pub fn supports(&self, version: EngineVersion) -> bool {
        self.engine_version
            .as_deref()
            .is_none_or(|tag| tag == version.tag())
    }

    /// Engine version tag from the manifest
    pub fn engine_version(&self) -> Option<&str> {
        self.engine_version.as_deref()
    }

    /// Whether `key` (with lower-case hex `check`) opens this archive.
    pub fn accepts(&self, guid: KeyGuid, check: &str) -> bool {
        match &self.encryption {
            Encryption::None => false,
            Encryption::Key {
                guid: archive_guid,
                check: archive_check,
            } => *archive_guid == guid && archive_check == check,
        }
    }
}

/// Key check of a hex key: lower-case hex SHA-256 of the decoded bytes.
///
/// The key may carry a `0x` prefix. Returns `None` for keys that are not
/// valid hex.
pub fn key_check(key: &str) -> Option<String> {
    let key = key.trim();
    let digits = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key);
    if digits.is_empty() {
        return None;
    }

    let bytes = hex::decode(digits).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Some(hex::encode(hasher.finalize()))
}

/// Strip leading `../` segments and slashes; keep a trailing `/` on
/// non-empty mount points.
fn normalize_mount_point(mount_point: &str) -> String {
    let mut rest = mount_point.trim().replace('\\', "/");
    while let Some(stripped) = rest.strip_prefix("../") {
        rest = stripped.to_string();
    }
    let rest = rest.trim_start_matches('/');

    if rest.is_empty() || rest.ends_with('/') {
        rest.to_string()
    } else {
        format!("{rest}/")
    }
}
