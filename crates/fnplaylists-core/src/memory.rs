//! In-memory asset provider

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::asset::{AssetPackage, KeyGuid, LocalizedTextTable};
use crate::error::ProviderError;
use crate::language::Language;
use crate::provider::{AssetEntry, AssetProvider};

type PackageFactory = Box<dyn Fn() -> AssetPackage>;

/// Entry of a [`MemoryProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEntry {
    path: String,
}

impl AssetEntry for MemoryEntry {
    fn path(&self) -> &str {
        &self.path
    }
}

/// Asset provider backed by values registered up front.
///
/// Entries are indexed by their lower-cased path. Packages are built by a
/// factory on every load, so each load hands out fresh, unresolved exports.
///
/// ```
/// use fnplaylists_core::{
///     AssetPackage, AssetProvider, Export, KeyGuid, MemoryProvider, ObjectInstance,
/// };
///
/// let mut provider = MemoryProvider::new()
///     .with_key(KeyGuid::MAIN, "0xKEY", 3)
///     .with_package("Game/Athena/Playlist_Solo.uasset", || {
///         AssetPackage::new(vec![Export::with_object(
///             "Playlist_Solo",
///             "FortPlaylistAthena",
///             ObjectInstance::new(),
///         )])
///     });
///
/// assert_eq!(provider.submit_key(KeyGuid::MAIN, "0xKEY").unwrap(), 3);
/// assert_eq!(provider.entries().count(), 1);
/// ```
#[derive(Default)]
pub struct MemoryProvider {
    keys: HashMap<KeyGuid, Vec<(String, usize)>>,
    mounted: usize,
    entries: BTreeMap<String, MemoryEntry>,
    packages: HashMap<String, PackageFactory>,
    tables: HashMap<Language, LocalizedTextTable>,
}

impl MemoryProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `key` for `guid`, mounting `archives` archives when submitted.
    #[must_use]
    pub fn with_key(mut self, guid: KeyGuid, key: impl Into<String>, archives: usize) -> Self {
        self.keys
            .entry(guid)
            .or_default()
            .push((key.into(), archives));
        self
    }

    /// Index an entry that has no loadable package
    #[must_use]
    pub fn with_entry(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.entries
            .insert(path.to_lowercase(), MemoryEntry { path });
        self
    }

    /// Index an entry whose package is built by `factory`
    #[must_use]
    pub fn with_package(
        mut self,
        path: impl Into<String>,
        factory: impl Fn() -> AssetPackage + 'static,
    ) -> Self {
        let path = path.into();
        self.packages.insert(path.clone(), Box::new(factory));
        self.with_entry(path)
    }

    /// Register the localized text table of its language
    #[must_use]
    pub fn with_localized_text(mut self, table: LocalizedTextTable) -> Self {
        self.tables.insert(table.language(), table);
        self
    }

    /// Archives mounted so far
    pub const fn mounted_archives(&self) -> usize {
        self.mounted
    }
}

impl AssetProvider for MemoryProvider {
    type Entry = MemoryEntry;

    fn submit_key(&mut self, guid: KeyGuid, key: &str) -> Result<usize, ProviderError> {
        let key = key.trim();
        let Some(candidates) = self.keys.get_mut(&guid) else {
            return Ok(0);
        };

        // Archives mount once; a second submission of the same key adds nothing
        let Some(position) = candidates
            .iter()
            .position(|(known, _)| known.eq_ignore_ascii_case(key))
        else {
            return Ok(0);
        };
        let (_, archives) = candidates.remove(position);

        self.mounted += archives;
        Ok(archives)
    }

    fn load_localized_text(&self, language: Language) -> Option<LocalizedTextTable> {
        self.tables.get(&language).cloned()
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &Self::Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    fn load_package(&self, entry: &Self::Entry) -> Option<AssetPackage> {
        self.packages.get(&entry.path).map(|factory| factory())
    }
}

impl fmt::Debug for MemoryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryProvider")
            .field("mounted", &self.mounted)
            .field("entries", &self.entries.len())
            .field("packages", &self.packages.len())
            .field("tables", &self.tables.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::asset::{Export, ObjectInstance};

    #[test]
    fn test_submit_key() {
        let mut provider = MemoryProvider::new().with_key(KeyGuid::MAIN, "0xABCD", 2);

        assert_eq!(provider.submit_key(KeyGuid::MAIN, "0xFFFF").unwrap(), 0);
        assert_eq!(
            provider
                .submit_key(KeyGuid::from_bytes([1; 16]), "0xABCD")
                .unwrap(),
            0
        );
        assert_eq!(provider.submit_key(KeyGuid::MAIN, " 0xabcd\n").unwrap(), 2);
        assert_eq!(provider.mounted_archives(), 2);

        // Already mounted
        assert_eq!(provider.submit_key(KeyGuid::MAIN, "0xABCD").unwrap(), 0);
        assert_eq!(provider.mounted_archives(), 2);
    }

    #[test]
    fn test_entries_are_indexed_lowercase() {
        let provider = MemoryProvider::new()
            .with_entry("Game/Athena/Playlists/Playlist_Solo.uasset")
            .with_entry("Game/Athena/Items/Glider.uasset");

        let entries: Vec<_> = provider
            .entries()
            .map(|(key, entry)| (key.to_string(), entry.path().to_string()))
            .collect();
        assert_eq!(
            entries,
            vec![
                (
                    "game/athena/items/glider.uasset".to_string(),
                    "Game/Athena/Items/Glider.uasset".to_string()
                ),
                (
                    "game/athena/playlists/playlist_solo.uasset".to_string(),
                    "Game/Athena/Playlists/Playlist_Solo.uasset".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_load_package() {
        let provider = MemoryProvider::new()
            .with_entry("Game/NoPackage.uasset")
            .with_package("Game/Playlist.uasset", || {
                AssetPackage::new(vec![Export::with_object(
                    "Playlist",
                    "FortPlaylistAthena",
                    ObjectInstance::new(),
                )])
            });

        let packages: Vec<_> = provider
            .entries()
            .map(|(_, entry)| provider.load_package(entry).map(|p| p.exports().len()))
            .collect();
        assert_eq!(packages, vec![None, Some(1)]);
    }

    #[test]
    fn test_localized_text_by_language() {
        let provider = MemoryProvider::new()
            .with_localized_text(LocalizedTextTable::new(Language::Fr).with_entry("", "K", "Solo"));

        assert!(provider.load_localized_text(Language::En).is_none());
        let table = provider.load_localized_text(Language::Fr).unwrap();
        assert_eq!(table.get("", "K"), Some("Solo"));
    }
}
