//! Capability traits for asset providers
//!
//! An asset provider owns the mounted archive set: it accepts decryption keys,
//! exposes the index of packaged assets and loads packages and localized text
//! on request. The pipeline only talks to these traits, so it runs the same
//! against an on-disk archive set and against [`MemoryProvider`](crate::MemoryProvider).

use std::path::Path;

use crate::asset::{AssetPackage, EngineVersion, KeyGuid, LocalizedTextTable};
use crate::error::ProviderError;
use crate::language::Language;
use crate::pipeline::short_name;

/// Handle to one packaged asset.
pub trait AssetEntry {
    /// Virtual path of the asset, `/`-separated, in its original case
    fn path(&self) -> &str;

    /// File name of the asset without its extension
    fn name_without_extension(&self) -> &str {
        short_name(self.path())
    }
}

/// A mounted archive set.
pub trait AssetProvider {
    /// Entry handle type
    type Entry: AssetEntry;

    /// Submit a decryption key for the archives encrypted with `guid`.
    ///
    /// Returns the number of archives newly mounted with the key; zero means
    /// the key was rejected.
    fn submit_key(&mut self, guid: KeyGuid, key: &str) -> Result<usize, ProviderError>;

    /// Load the localized text table for `language`, if the archive set has one.
    fn load_localized_text(&self, language: Language) -> Option<LocalizedTextTable>;

    /// Every indexed entry with its index path.
    ///
    /// Index paths are the provider's lookup keys (lower-cased virtual paths
    /// for the providers in this workspace). Iteration order is provider
    /// defined.
    fn entries(&self) -> impl Iterator<Item = (&str, &Self::Entry)>;

    /// Load and parse the package behind `entry`.
    fn load_package(&self, entry: &Self::Entry) -> Option<AssetPackage>;
}

/// A provider that can mount an archive set from an install directory.
pub trait MountProvider: AssetProvider + Sized {
    /// Mount the archive set under `install_path` for `version`.
    ///
    /// Encrypted archives stay unmounted until a matching key is submitted.
    fn mount(install_path: &Path, version: EngineVersion) -> Result<Self, ProviderError>;
}
